use crate::domain::context::Context;
use crate::domain::model::User;
use crate::domain::ports::Store;
use crate::domain::services::UserService;
use crate::utils::error::{Result, StoreError};
use crate::utils::validation;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{Id, JoinSet};

#[derive(Debug, Default)]
pub struct ImportReport {
    pub created: Vec<String>,
    pub failed: Vec<(String, StoreError)>,
}

impl ImportReport {
    pub fn total(&self) -> usize {
        self.created.len() + self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// 讀取 JSON 陣列格式的使用者檔案
pub fn load_users_file<P: AsRef<Path>>(path: P) -> Result<Vec<User>> {
    let content = std::fs::read(path)?;
    let users: Vec<User> = serde_json::from_slice(&content)?;
    Ok(users)
}

/// Creates every user on its own task, at most `concurrency` inserts in
/// flight, and waits for all of them before returning. Failures are collected
/// per id; nothing is retried.
pub async fn import_users<S>(
    service: Arc<UserService<S>>,
    ctx: &Context,
    users: Vec<User>,
    concurrency: usize,
) -> Result<ImportReport>
where
    S: Store<User> + 'static,
{
    validation::validate_positive_number("import.concurrent_requests", concurrency, 1)?;

    let permits = Arc::new(Semaphore::new(concurrency));
    let mut tasks = JoinSet::new();
    // a panicked task only hands back its task id
    let mut ids_by_task: HashMap<Id, String> = HashMap::new();
    let mut report = ImportReport::default();

    tracing::info!(
        "Importing {} users with {} concurrent inserts",
        users.len(),
        concurrency
    );

    for user in users {
        let service = Arc::clone(&service);
        let permits = Arc::clone(&permits);
        let ctx = ctx.clone();

        let user_id = user.id.clone();
        let handle = tasks.spawn(async move {
            let id = user.id.clone();
            let result = match permits.acquire_owned().await {
                Ok(_permit) => service.create_user(&ctx, user).await,
                Err(_) => Err(StoreError::Backend {
                    message: "import semaphore closed".to_string(),
                }),
            };
            (id, result)
        });
        ids_by_task.insert(handle.id(), user_id);
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((id, Ok(()))) => report.created.push(id),
            Ok((id, Err(e))) => report.failed.push((id, e)),
            Err(join_error) => {
                let id = ids_by_task.remove(&join_error.id()).unwrap_or_default();
                tracing::error!("Import task for {} failed: {}", id, join_error);
                report.failed.push((
                    id,
                    StoreError::Backend {
                        message: format!("import task failed: {}", join_error),
                    },
                ));
            }
        }
    }

    tracing::info!(
        "Import finished: {} created, {} failed",
        report.created.len(),
        report.failed.len()
    );
    Ok(report)
}
