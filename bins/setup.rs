use dotenvy::dotenv;
use migration::{seeders::DatabaseSeeder, MigratorTrait};
use tracing::{error, info};
use uuid::Uuid;

fn init_logging() {
    // 提前加载 .env，使得 RUST_LOG / LOG_FORMAT 生效
    dotenv().ok();
    let format = std::env::var("LOG_FORMAT").ok();
    common::utils::logging::init_logging(format.as_deref());
    info!(service = "setup", event = "logger_init", "tracing subscriber initialized");
}

async fn run(cfg: configs::AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;

    migration::Migrator::up(&db, None).await?;
    let applied = migration::Migrator::get_applied_migrations(&db).await?.len();
    info!(service = "setup", event = "migrated", applied, "schema is up to date");

    let seeders = DatabaseSeeder::default();
    let ran = seeders.run_all(&db).await?;
    info!(service = "setup", event = "seeded", seeders = ran, names = ?seeders.names(), "seeders finished");

    // 确认翻译目录与服务配置可用
    let services = service::services::OrganizationServices::from_config(db.clone(), &cfg)?;
    info!(service = "setup", event = "services_ready", per_page = services.organizations.config().items_per_page, "organization services constructed");

    db.close().await?;
    Ok(())
}

fn main() -> std::process::ExitCode {
    init_logging();

    let run_id = Uuid::new_v4();
    let version = env!("CARGO_PKG_VERSION");

    let cfg = match configs::AppConfig::load_or_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "setup", event = "config_invalid", error = %e, "failed to load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "setup", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(service = "setup", event = "start", %run_id, version, sqlite = cfg.database.is_sqlite(), "setup starting");
    match rt.block_on(run(cfg)) {
        Ok(()) => {
            info!(service = "setup", event = "done", %run_id, "setup finished");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "setup", event = "run_failed", %run_id, error = %e, "setup failed");
            std::process::ExitCode::FAILURE
        }
    }
}
