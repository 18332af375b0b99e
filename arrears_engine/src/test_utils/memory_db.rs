use std::{
    collections::{BTreeMap, HashSet},
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use chrono::NaiveDate;
use tokio::time::sleep;

use crate::{
    db_types::{Contract, Merchant, NewPayment, PaymentKind, PaymentRecord, Period},
    traits::{ContractStore, MerchantStore, PaymentLedger, StoreError},
};

#[derive(Default)]
struct Tables {
    contracts: BTreeMap<i64, Contract>,
    merchants: BTreeMap<i64, Merchant>,
    payments: Vec<PaymentRecord>,
    saves: usize,
}

/// An in-memory backend. Clones share the same underlying tables.
#[derive(Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryDatabase {
    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("MemoryDatabase lock poisoned")
    }

    pub fn add_merchant(&self, merchant: Merchant) {
        self.tables().merchants.insert(merchant.id, merchant);
    }

    pub fn add_contract(&self, contract: Contract) {
        self.tables().contracts.insert(contract.id, contract);
    }

    pub fn add_payment(&self, payment: NewPayment) -> PaymentRecord {
        let mut tables = self.tables();
        let id = tables.payments.len() as i64 + 1;
        let record = PaymentRecord {
            id,
            merchant_id: payment.merchant_id,
            kind: payment.kind,
            amount: payment.amount,
            paid_at: payment.paid_at,
        };
        tables.payments.push(record.clone());
        record
    }

    pub fn merchant(&self, merchant_id: i64) -> Option<Merchant> {
        self.tables().merchants.get(&merchant_id).cloned()
    }

    /// The number of successful `save_merchant` calls so far
    pub fn save_count(&self) -> usize {
        self.tables().saves
    }
}

impl ContractStore for MemoryDatabase {
    async fn fetch_active_contracts(&self) -> Result<Vec<Contract>, StoreError> {
        Ok(self.tables().contracts.values().filter(|c| c.active).cloned().collect())
    }
}

impl PaymentLedger for MemoryDatabase {
    async fn payment_exists(
        &self,
        merchant_id: i64,
        kind: &PaymentKind,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<bool, StoreError> {
        let range = Period::new(from, to);
        let found = self
            .tables()
            .payments
            .iter()
            .any(|p| p.merchant_id == merchant_id && &p.kind == kind && range.contains(p.paid_at.date()));
        Ok(found)
    }
}

impl MerchantStore for MemoryDatabase {
    async fn fetch_merchant(&self, merchant_id: i64) -> Result<Option<Merchant>, StoreError> {
        Ok(self.merchant(merchant_id))
    }

    async fn save_merchant(&self, merchant: &Merchant) -> Result<(), StoreError> {
        let mut tables = self.tables();
        let existing = tables.merchants.get_mut(&merchant.id).ok_or(StoreError::MerchantNotFound(merchant.id))?;
        existing.status = merchant.status;
        existing.in_arrears = merchant.in_arrears;
        tables.saves += 1;
        Ok(())
    }
}

/// Returns how long a ledger lookup for the given merchant and period bounds should take.
pub type LedgerDelay = Arc<dyn Fn(i64, NaiveDate, NaiveDate) -> Duration + Send + Sync>;

/// Wraps a [`MemoryDatabase`] and injects faults: failing ledger lookups, failing merchant saves, and slow ledger
/// lookups. Each is configured per merchant.
#[derive(Clone)]
pub struct FaultyDatabase {
    inner: MemoryDatabase,
    failing_lookups: HashSet<i64>,
    failing_saves: HashSet<i64>,
    ledger_delay: Option<LedgerDelay>,
}

impl FaultyDatabase {
    pub fn new(inner: MemoryDatabase) -> Self {
        Self { inner, failing_lookups: HashSet::new(), failing_saves: HashSet::new(), ledger_delay: None }
    }

    pub fn with_failing_lookups<I: IntoIterator<Item = i64>>(mut self, merchants: I) -> Self {
        self.failing_lookups.extend(merchants);
        self
    }

    pub fn with_failing_saves<I: IntoIterator<Item = i64>>(mut self, merchants: I) -> Self {
        self.failing_saves.extend(merchants);
        self
    }

    pub fn with_ledger_delay<F>(mut self, delay: F) -> Self
    where F: Fn(i64, NaiveDate, NaiveDate) -> Duration + Send + Sync + 'static {
        self.ledger_delay = Some(Arc::new(delay));
        self
    }
}

impl ContractStore for FaultyDatabase {
    async fn fetch_active_contracts(&self) -> Result<Vec<Contract>, StoreError> {
        self.inner.fetch_active_contracts().await
    }
}

impl PaymentLedger for FaultyDatabase {
    async fn payment_exists(
        &self,
        merchant_id: i64,
        kind: &PaymentKind,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<bool, StoreError> {
        if let Some(delay) = &self.ledger_delay {
            let wait = delay(merchant_id, from, to);
            if !wait.is_zero() {
                sleep(wait).await;
            }
        }
        if self.failing_lookups.contains(&merchant_id) {
            return Err(StoreError::Unavailable(format!("ledger lookup failed for merchant #{merchant_id}")));
        }
        self.inner.payment_exists(merchant_id, kind, from, to).await
    }
}

impl MerchantStore for FaultyDatabase {
    async fn fetch_merchant(&self, merchant_id: i64) -> Result<Option<Merchant>, StoreError> {
        self.inner.fetch_merchant(merchant_id).await
    }

    async fn save_merchant(&self, merchant: &Merchant) -> Result<(), StoreError> {
        if self.failing_saves.contains(&merchant.id) {
            return Err(StoreError::DatabaseError(format!("could not save merchant #{}", merchant.id)));
        }
        self.inner.save_merchant(merchant).await
    }
}
