use anyhow::Result;
use object_browser::{
    config::AppConfig,
    handlers::console::{Console, StdinConfirm, stdin_lines},
    services::{
        controller::{AutoConfirm, Confirm, OperationController},
        remote::HttpObjectService,
        session::Session,
    },
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // --- Logging setup (stderr keeps the console output clean) ---
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // --- Parse config ---
    let cfg = AppConfig::from_env_and_args()?;
    tracing::info!("Starting object-browser with config: {:?}", cfg);

    // --- Wire the session ---
    let lines = stdin_lines();
    let confirm: Arc<dyn Confirm> = if cfg.assume_yes {
        Arc::new(AutoConfirm(true))
    } else {
        Arc::new(StdinConfirm::new(lines.clone()))
    };
    let service = Arc::new(HttpObjectService::new(&cfg.endpoint));
    let controller = OperationController::new(service, confirm, cfg.notice_ttl);
    let session = Session::new(controller);

    // --- Run the console ---
    tracing::info!("Browsing {}", cfg.endpoint);
    Console::new(session, cfg.download_dir.clone(), lines)
        .run()
        .await
}
