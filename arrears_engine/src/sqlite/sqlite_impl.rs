//! `SqliteDatabase` is a concrete implementation of an arrears engine backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements all the traits defined in the [`traits`] module.
//!
//! [`traits`]: crate::traits
use std::fmt::Debug;

use chrono::NaiveDate;
use log::*;
use sqlx::{migrate, SqlitePool};

use super::db::{contracts, db_url, merchants, new_pool, payments};
use crate::{
    db_types::{Contract, Merchant, PaymentKind},
    traits::{ContractStore, MerchantStore, PaymentLedger, StoreError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl ContractStore for SqliteDatabase {
    async fn fetch_active_contracts(&self) -> Result<Vec<Contract>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let contracts = contracts::fetch_active_contracts(&mut conn).await?;
        trace!("🗃️ {} active contracts fetched", contracts.len());
        Ok(contracts)
    }
}

impl PaymentLedger for SqliteDatabase {
    async fn payment_exists(
        &self,
        merchant_id: i64,
        kind: &PaymentKind,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<bool, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let exists = payments::payment_exists(merchant_id, kind, from, to, &mut conn).await?;
        Ok(exists)
    }
}

impl MerchantStore for SqliteDatabase {
    async fn fetch_merchant(&self, merchant_id: i64) -> Result<Option<Merchant>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let merchant = merchants::fetch_merchant(merchant_id, &mut conn).await?;
        Ok(merchant)
    }

    async fn save_merchant(&self, merchant: &Merchant) -> Result<(), StoreError> {
        let mut conn = self.pool.acquire().await?;
        let updated =
            merchants::update_arrears_status(merchant.id, merchant.status, merchant.in_arrears, &mut conn).await?;
        if !updated {
            return Err(StoreError::MerchantNotFound(merchant.id));
        }
        debug!("🗃️ Merchant #{} saved with status {} (in arrears: {})", merchant.id, merchant.status, merchant.in_arrears);
        Ok(())
    }
}

impl SqliteDatabase {
    /// Creates a new database API object, using the URL in `MKT_DATABASE_URL`
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// The URL of the database
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Brings the schema up to date.
    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        migrate!("./src/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Migrations complete");
        Ok(())
    }

    pub async fn close(&mut self) -> Result<(), StoreError> {
        self.pool.close().await;
        Ok(())
    }
}
