use crate::{db_types::Contract, traits::StoreError};

#[allow(async_fn_in_trait)]
pub trait ContractStore {
    /// Fetches every contract that is currently active, in ascending id order.
    ///
    /// Contracts may be incomplete: the merchant reference and start date are both optional. Callers are expected to
    /// handle these cases rather than the store filtering them out.
    async fn fetch_active_contracts(&self) -> Result<Vec<Contract>, StoreError>;
}
