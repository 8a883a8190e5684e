use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use twofold_core::{PendingOtp, TwoFactorRecord, TwoFactorStore, TwoFactorStoreError, UserId};

/// In-memory two-factor record store.
///
/// Every mutating method takes the write lock for its whole read-modify-write
/// step, which serializes concurrent mutations per record. That is what makes
/// `consume_backup_code` single-winner under racing logins.
#[derive(Default, Clone)]
pub struct HashMapTwoFactorStore {
    records: Arc<RwLock<HashMap<UserId, TwoFactorRecord>>>,
}

impl HashMapTwoFactorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl TwoFactorStore for HashMapTwoFactorStore {
    async fn upsert(&self, record: TwoFactorRecord) -> Result<(), TwoFactorStoreError> {
        let mut records = self.records.write().await;
        records.insert(record.user_id(), record);
        Ok(())
    }

    async fn get(&self, user_id: UserId) -> Result<TwoFactorRecord, TwoFactorStoreError> {
        let records = self.records.read().await;
        records
            .get(&user_id)
            .cloned()
            .ok_or(TwoFactorStoreError::RecordNotFound)
    }

    async fn delete(&self, user_id: UserId) -> Result<(), TwoFactorStoreError> {
        let mut records = self.records.write().await;
        records
            .remove(&user_id)
            .map(|_| ())
            .ok_or(TwoFactorStoreError::RecordNotFound)
    }

    async fn mark_enabled(&self, user_id: UserId) -> Result<(), TwoFactorStoreError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&user_id)
            .ok_or(TwoFactorStoreError::RecordNotFound)?;
        record.enable();
        Ok(())
    }

    async fn set_pending_otp(
        &self,
        user_id: UserId,
        otp: PendingOtp,
    ) -> Result<(), TwoFactorStoreError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&user_id)
            .ok_or(TwoFactorStoreError::RecordNotFound)?;
        record.set_pending_otp(otp);
        Ok(())
    }

    async fn clear_pending_otp(&self, user_id: UserId) -> Result<(), TwoFactorStoreError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&user_id)
            .ok_or(TwoFactorStoreError::RecordNotFound)?;
        record.clear_pending_otp();
        Ok(())
    }

    async fn consume_backup_code(
        &self,
        user_id: UserId,
        submitted: &str,
    ) -> Result<bool, TwoFactorStoreError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&user_id)
            .ok_or(TwoFactorStoreError::RecordNotFound)?;
        Ok(record.take_backup_code(submitted))
    }
}
