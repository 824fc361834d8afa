use serde::{Deserialize, Serialize};

/// Anything a [`Store`](super::ports::Store) can hold. Backends key records by
/// [`Record::record_id`]; `Default` provides the empty output slot for fetches.
pub trait Record: Clone + Default + Send + Sync + 'static {
    fn record_id(&self) -> &str;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
}

impl User {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
        }
    }
}

impl Record for User {
    fn record_id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("1", "a@example.com");
        assert_eq!(user.record_id(), "1");
        assert_eq!(user.email, "a@example.com");
    }

    #[test]
    fn test_user_json_shape() {
        let user: User = serde_json::from_str(r#"{"id":"7","email":"x@example.com"}"#).unwrap();
        assert_eq!(user, User::new("7", "x@example.com"));
    }
}
