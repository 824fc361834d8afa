use crate::domain::context::Context;
use crate::domain::model::User;
use crate::domain::ports::Store;
use crate::utils::error::StoreError;
use tracing::Instrument;

/// User operations over any [`Store<User>`].
///
/// The service owns its store for its whole lifetime and adds nothing on top
/// of it: no validation, no retries, and store errors come back unchanged.
pub struct UserService<S: Store<User>> {
    store: S,
}

impl<S: Store<User>> UserService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn create_user(&self, ctx: &Context, user: User) -> Result<(), StoreError> {
        let span = tracing::debug_span!(
            "create_user",
            request_id = ctx.request_id(),
            user_id = %user.id
        );

        async {
            self.store.insert(user).await.inspect_err(|e| {
                tracing::warn!("insert failed: {}", e);
            })
        }
        .instrument(span)
        .await
    }

    pub async fn retrieve_user(&self, ctx: &Context, id: &str) -> Result<User, StoreError> {
        let span = tracing::debug_span!("retrieve_user", request_id = ctx.request_id(), user_id = id);

        async {
            let mut user = User::default();
            self.store.fetch(id, &mut user).await.inspect_err(|e| {
                tracing::warn!("fetch failed: {}", e);
            })?;
            Ok::<_, StoreError>(user)
        }
        .instrument(span)
        .await
    }
}
