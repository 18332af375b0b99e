use crate::{db_types::Merchant, traits::StoreError};

#[allow(async_fn_in_trait)]
pub trait MerchantStore {
    async fn fetch_merchant(&self, merchant_id: i64) -> Result<Option<Merchant>, StoreError>;

    /// Persists the merchant's arrears status (`status` and `in_arrears`). Other fields are not touched.
    ///
    /// Returns [`StoreError::MerchantNotFound`] if the merchant does not exist.
    async fn save_merchant(&self, merchant: &Merchant) -> Result<(), StoreError>;
}
