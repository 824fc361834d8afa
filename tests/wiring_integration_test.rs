use anyhow::Result;
use notebook_users::app::{build_service, import_users, load_users_file};
use notebook_users::config::StoreBackend;
use notebook_users::{Context, StoreError, TomlConfig, User};
use std::sync::Arc;
use tempfile::TempDir;

fn file_config(temp_dir: &TempDir) -> Result<TomlConfig> {
    let data_path = temp_dir.path().join("data").join("users.json");
    let normalized_path = data_path.to_string_lossy().replace('\\', "/");

    let config_content = format!(
        r#"
[store]
backend = "file"
path = "{}"

[import]
concurrent_requests = 2
"#,
        normalized_path
    );

    let config_path = temp_dir.path().join("notebook.toml");
    std::fs::write(&config_path, config_content)?;
    Ok(TomlConfig::from_file(&config_path)?)
}

#[tokio::test]
async fn test_file_store_survives_a_new_service() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = file_config(&temp_dir)?;
    assert_eq!(config.store.backend, StoreBackend::File);

    {
        let service = build_service(&config)?;
        service
            .create_user(&Context::background(), User::new("1", "a@example.com"))
            .await?;
    }

    let service = build_service(&config)?;
    let user = service.retrieve_user(&Context::background(), "1").await?;
    assert_eq!(user, User::new("1", "a@example.com"));

    let err = service
        .retrieve_user(&Context::background(), "2")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    Ok(())
}

#[tokio::test]
async fn test_memory_store_is_per_process() -> Result<()> {
    let config = TomlConfig::default();

    let first = build_service(&config)?;
    first
        .create_user(&Context::background(), User::new("1", "a@example.com"))
        .await?;

    let second = build_service(&config)?;
    let err = second
        .retrieve_user(&Context::background(), "1")
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
    Ok(())
}

#[tokio::test]
async fn test_import_file_into_file_store() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = file_config(&temp_dir)?;

    let users_path = temp_dir.path().join("users-import.json");
    std::fs::write(
        &users_path,
        r#"[
            {"id": "a", "email": "a@example.com"},
            {"id": "b", "email": "b@example.com"},
            {"id": "c", "email": "c@example.com"}
        ]"#,
    )?;

    let users = load_users_file(&users_path)?;
    let service = Arc::new(build_service(&config)?);
    let ctx = Context::background();

    let report = import_users(
        Arc::clone(&service),
        &ctx,
        users,
        config.concurrent_requests(),
    )
    .await?;

    assert!(report.is_success());
    assert_eq!(report.created.len(), 3);

    for id in ["a", "b", "c"] {
        let user = service.retrieve_user(&ctx, id).await?;
        assert_eq!(user.email, format!("{}@example.com", id));
    }
    Ok(())
}

#[test]
fn test_malformed_import_file_is_rejected() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let users_path = temp_dir.path().join("broken.json");
    std::fs::write(&users_path, "{not an array}")?;

    assert!(load_users_file(&users_path).is_err());
    Ok(())
}
