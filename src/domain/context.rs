use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// Per-call context handed to service operations. Only used for log
/// correlation; it never reaches the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    request_id: String,
}

impl Context {
    pub fn background() -> Self {
        let n = NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            request_id: format!("req-{}", n),
        }
    }

    pub fn with_request_id(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::background()
    }
}
