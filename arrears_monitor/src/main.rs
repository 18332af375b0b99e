use arrears_engine::SqliteDatabase;
use arrears_monitor::{
    cli::handle_command_line_args,
    config::MonitorConfig,
    errors::MonitorServiceError,
    monitor_worker::{run_once, start_monitor_worker},
};
use dotenvy::dotenv;
use log::*;

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    if handle_command_line_args() {
        return;
    }
    let config = MonitorConfig::from_env_or_default();
    match run(config).await {
        Ok(_) => println!("Bye!"),
        Err(e) => eprintln!("{e}"),
    }
}

async fn run(config: MonitorConfig) -> Result<(), MonitorServiceError> {
    info!("🚀️ Starting arrears monitor against {}", config.database_url);
    let db = SqliteDatabase::new_with_url(&config.database_url, config.max_connections())
        .await
        .map_err(|e| MonitorServiceError::InitializeError(e.to_string()))?;
    db.run_migrations().await.map_err(|e| MonitorServiceError::InitializeError(e.to_string()))?;
    if config.run_once {
        let report = run_once(db, &config).await?;
        info!("🚀️ Single monitoring pass complete. {report}");
        return Ok(());
    }
    let worker = start_monitor_worker(db, config);
    tokio::signal::ctrl_c().await?;
    info!("🚀️ Shutdown requested. Stopping the monitor worker.");
    worker.abort();
    Ok(())
}
