use std::{fmt::Display, str::FromStr};

use chrono::{NaiveDate, NaiveDateTime};
use log::warn;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("Invalid value: {0}")]
pub struct ConversionError(String);

//--------------------------------------      Frequency       ---------------------------------------------------------
/// How often a merchant owes dues on a contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    /// A frequency value that the engine does not know about. Contracts with this frequency are still monitored, using
    /// calendar-month periods and the generic days-late thresholds.
    Unrecognized(String),
}

impl Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frequency::Daily => write!(f, "DAILY"),
            Frequency::Weekly => write!(f, "WEEKLY"),
            Frequency::Monthly => write!(f, "MONTHLY"),
            Frequency::Unrecognized(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for Frequency {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DAILY" => Ok(Self::Daily),
            "WEEKLY" => Ok(Self::Weekly),
            "MONTHLY" => Ok(Self::Monthly),
            _ => Err(ConversionError(format!("Invalid payment frequency: {s}"))),
        }
    }
}

impl From<String> for Frequency {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            warn!("Unrecognized payment frequency: {value}. The generic arrears thresholds will apply.");
            Frequency::Unrecognized(value)
        })
    }
}

//--------------------------------------     SeverityTier      ---------------------------------------------------------
/// The delinquency classification assigned to a merchant on each monitoring pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Type, Serialize, Deserialize)]
pub enum SeverityTier {
    /// No unpaid periods.
    #[default]
    UpToDate,
    Light,
    Significant,
    Critical,
    /// Arrears beyond every other threshold.
    Extended,
}

impl SeverityTier {
    pub const ALL: [SeverityTier; 5] = [
        SeverityTier::UpToDate,
        SeverityTier::Light,
        SeverityTier::Significant,
        SeverityTier::Critical,
        SeverityTier::Extended,
    ];
}

impl Display for SeverityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeverityTier::UpToDate => write!(f, "UpToDate"),
            SeverityTier::Light => write!(f, "Light"),
            SeverityTier::Significant => write!(f, "Significant"),
            SeverityTier::Critical => write!(f, "Critical"),
            SeverityTier::Extended => write!(f, "Extended"),
        }
    }
}

impl FromStr for SeverityTier {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UpToDate" => Ok(Self::UpToDate),
            "Light" => Ok(Self::Light),
            "Significant" => Ok(Self::Significant),
            "Critical" => Ok(Self::Critical),
            "Extended" => Ok(Self::Extended),
            s => Err(ConversionError(format!("Invalid severity tier: {s}"))),
        }
    }
}

//--------------------------------------      PaymentKind      ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentKind {
    /// The recurring stall due. This is the only kind of payment that counts towards a contract's periods.
    RecurringDue,
    /// The lump-sum annual right to trade.
    AnnualRight,
    Other(String),
}

impl Display for PaymentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentKind::RecurringDue => write!(f, "RECURRING_DUE"),
            PaymentKind::AnnualRight => write!(f, "ANNUAL_RIGHT"),
            PaymentKind::Other(s) => write!(f, "{s}"),
        }
    }
}

impl From<String> for PaymentKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "RECURRING_DUE" => PaymentKind::RecurringDue,
            "ANNUAL_RIGHT" => PaymentKind::AnnualRight,
            _ => PaymentKind::Other(value),
        }
    }
}

//--------------------------------------        Period         ---------------------------------------------------------
/// A fully elapsed billing interval. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} – {}]", self.start, self.end)
    }
}

//--------------------------------------       Contract        ---------------------------------------------------------
/// A merchant's agreement to pay recurring dues for a stall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    pub id: i64,
    pub merchant_id: Option<i64>,
    pub stall_id: Option<i64>,
    pub frequency: Frequency,
    pub start_date: Option<NaiveDate>,
    pub active: bool,
}

impl Contract {
    pub fn new(id: i64, merchant_id: i64, frequency: Frequency, start_date: NaiveDate) -> Self {
        Self {
            id,
            merchant_id: Some(merchant_id),
            stall_id: None,
            frequency,
            start_date: Some(start_date),
            active: true,
        }
    }

    pub fn with_stall(mut self, stall_id: i64) -> Self {
        self.stall_id = Some(stall_id);
        self
    }
}

/// The contract as stored in the database. The frequency is kept as free text, so that unknown values survive the
/// round trip.
#[derive(Debug, Clone, FromRow)]
pub struct ContractRow {
    pub id: i64,
    pub merchant_id: Option<i64>,
    pub stall_id: Option<i64>,
    pub frequency: String,
    pub start_date: Option<NaiveDate>,
    pub active: bool,
}

impl From<ContractRow> for Contract {
    fn from(row: ContractRow) -> Self {
        Self {
            id: row.id,
            merchant_id: row.merchant_id,
            stall_id: row.stall_id,
            frequency: Frequency::from(row.frequency),
            start_date: row.start_date,
            active: row.active,
        }
    }
}

//--------------------------------------       Merchant        ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Merchant {
    pub id: i64,
    pub name: String,
    pub status: SeverityTier,
    pub in_arrears: bool,
}

impl Merchant {
    pub fn new<S: Into<String>>(id: i64, name: S) -> Self {
        Self { id, name: name.into(), status: SeverityTier::UpToDate, in_arrears: false }
    }
}

//--------------------------------------     PaymentRecord     ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: i64,
    pub merchant_id: i64,
    pub kind: PaymentKind,
    /// The amount paid, in the smallest currency unit.
    pub amount: i64,
    /// Market-local wall clock time of the payment
    pub paid_at: NaiveDateTime,
}

#[derive(Debug, Clone, FromRow)]
pub struct PaymentRow {
    pub id: i64,
    pub merchant_id: i64,
    pub kind: String,
    pub amount: i64,
    pub paid_at: NaiveDateTime,
}

impl From<PaymentRow> for PaymentRecord {
    fn from(row: PaymentRow) -> Self {
        Self {
            id: row.id,
            merchant_id: row.merchant_id,
            kind: PaymentKind::from(row.kind),
            amount: row.amount,
            paid_at: row.paid_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub merchant_id: i64,
    pub kind: PaymentKind,
    pub amount: i64,
    pub paid_at: NaiveDateTime,
}

impl NewPayment {
    pub fn recurring_due(merchant_id: i64, amount: i64, paid_at: NaiveDateTime) -> Self {
        Self { merchant_id, kind: PaymentKind::RecurringDue, amount, paid_at }
    }

    pub fn with_kind(mut self, kind: PaymentKind) -> Self {
        self.kind = kind;
        self
    }
}

//--------------------------------------     ArrearsResult     ---------------------------------------------------------
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrearsResult {
    /// The oldest period without a qualifying payment
    pub first_unpaid_period: Option<Period>,
    pub unpaid_count: usize,
    pub periods_evaluated: usize,
}

impl ArrearsResult {
    pub fn is_in_arrears(&self) -> bool {
        self.unpaid_count > 0
    }
}
