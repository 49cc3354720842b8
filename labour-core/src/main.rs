use labour_core::{Config, LabourState, init_logger_with_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    init_logger_with_file(
        Some(&config.log_level),
        Some(config.log_json),
        config.log_dir.as_deref(),
    );

    tracing::info!(
        database = %config.database_path,
        environment = %config.environment,
        legacy_compat = config.legacy_compat,
        "Labour core starting"
    );

    let state = LabourState::initialize(&config).await?;

    let workers = state.workers().count().await?;
    let awaiting = state.substitutes().count_awaiting_approval().await?;
    tracing::info!(workers, awaiting_approval = awaiting, "Database ready");

    state.db.pool.close().await;
    Ok(())
}
