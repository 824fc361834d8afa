use crate::domain::model::Record;
use crate::utils::error::StoreError;
use async_trait::async_trait;
use std::sync::Arc;

/// Persistence capability the domain service depends on.
///
/// `fetch` writes into a caller-owned slot and must return
/// [`StoreError::NotFound`] when `id` is unknown, leaving `out` untouched.
#[async_trait]
pub trait Store<R: Record>: Send + Sync {
    async fn insert(&self, record: R) -> Result<(), StoreError>;
    async fn fetch(&self, id: &str, out: &mut R) -> Result<(), StoreError>;
}

#[async_trait]
impl<R, T> Store<R> for Arc<T>
where
    R: Record,
    T: Store<R> + ?Sized,
{
    async fn insert(&self, record: R) -> Result<(), StoreError> {
        (**self).insert(record).await
    }

    async fn fetch(&self, id: &str, out: &mut R) -> Result<(), StoreError> {
        (**self).fetch(id, out).await
    }
}
