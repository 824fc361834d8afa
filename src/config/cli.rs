use crate::config::toml_config::{StoreBackend, TomlConfig};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "notebook-users")]
#[command(about = "Create and look up users through a pluggable store")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the store backend from the config file
    #[arg(long, value_enum)]
    pub store: Option<StoreBackend>,

    /// Override the file store location
    #[arg(long)]
    pub data_path: Option<String>,

    /// Override the number of concurrent inserts during import
    #[arg(long)]
    pub concurrent_requests: Option<usize>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create one user
    Create {
        #[arg(long)]
        id: String,
        #[arg(long)]
        email: String,
    },
    /// Look up one user by id
    Get {
        #[arg(long)]
        id: String,
    },
    /// Create every user in a JSON array file
    Import {
        #[arg(long)]
        file: String,
    },
}

impl CliConfig {
    /// 合併設定檔與命令列參數，命令列優先，並驗證結果
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(backend) = self.store {
            config.store.backend = backend;
        }
        if let Some(path) = &self.data_path {
            config.store.path = Some(path.clone());
        }
        if let Some(n) = self.concurrent_requests {
            config.import.concurrent_requests = n;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::AppError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_create_command() {
        let cli = CliConfig::parse_from([
            "notebook-users",
            "--store",
            "memory",
            "create",
            "--id",
            "1",
            "--email",
            "a@example.com",
        ]);

        assert_eq!(cli.store, Some(StoreBackend::Memory));
        match cli.command {
            Command::Create { id, email } => {
                assert_eq!(id, "1");
                assert_eq!(email, "a@example.com");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[store]\nbackend = \"file\"\npath = \"from-file.json\"\n[import]\nconcurrent_requests = 2\n")
            .unwrap();

        let cli = CliConfig::parse_from([
            "notebook-users",
            "--config",
            temp_file.path().to_str().unwrap(),
            "--data-path",
            "from-flag.json",
            "--concurrent-requests",
            "8",
            "get",
            "--id",
            "1",
        ]);

        let config = cli.resolve().unwrap();
        assert_eq!(config.store.backend, StoreBackend::File);
        assert_eq!(config.store.path.as_deref(), Some("from-flag.json"));
        assert_eq!(config.concurrent_requests(), 8);
    }

    #[test]
    fn test_resolve_rejects_file_backend_without_path() {
        let cli = CliConfig::parse_from(["notebook-users", "--store", "file", "get", "--id", "1"]);
        let err = cli.resolve().unwrap_err();
        assert!(matches!(err, AppError::MissingConfigError { .. }));
    }
}
