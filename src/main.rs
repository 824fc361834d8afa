use clap::Parser;
use notebook_users::app::{build_service, import_users, load_users_file, AnyStore};
use notebook_users::utils::logger;
use notebook_users::{AppError, CliConfig, Command, Context, Result, TomlConfig, User, UserService};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 先載入配置，日誌格式取決於設定檔
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    logger::init_logger(&config.logging, cli.verbose);
    tracing::info!("Starting notebook-users");
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = run(cli.command, &config).await {
        tracing::error!("❌ {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(command: Command, config: &TomlConfig) -> Result<()> {
    // 建立 store 並注入 service
    let service: UserService<AnyStore> = build_service(config)?;
    let ctx = Context::background();

    match command {
        Command::Create { id, email } => {
            let user = User::new(id, email);
            service.create_user(&ctx, user.clone()).await?;
            println!("User created: {:?}", user);
        }
        Command::Get { id } => {
            let user = service.retrieve_user(&ctx, &id).await?;
            println!("{:?}", user);
        }
        Command::Import { file } => {
            let users = load_users_file(&file)?;
            let report = import_users(
                Arc::new(service),
                &ctx,
                users,
                config.concurrent_requests(),
            )
            .await?;

            println!("Imported {} of {} users", report.created.len(), report.total());
            for (id, e) in &report.failed {
                println!("  {}: {}", id, e);
            }

            if let Some((_, e)) = report.failed.into_iter().next() {
                return Err(AppError::Store(e));
            }
        }
    }

    Ok(())
}
