use habitrack_app::presentation::ipc;
use habitrack_app::presentation::state::AppState;
use habitrack_infrastructure::config::AppConfig;
use habitrack_infrastructure::logging::init_logger;
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = AppConfig::default_path();
    let config = AppConfig::load_with_env(&config_path)?;

    // stdout carries the command channel, so every log line goes to the file or stderr
    match init_logger(&config.log_dir, config.log_level.as_str()) {
        Ok(_) => {
            tracing::info!("🚀 Habitrack starting...");
            tracing::info!("📝 File logging initialized at: {}", config.log_dir.display());
        }
        Err(e) => {
            eprintln!("⚠️  Failed to initialize file logging: {}", e);
            eprintln!("   Falling back to stderr logging only");

            let _ = tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
                )
                .with_target(true)
                .with_line_number(true)
                .try_init();
        }
    }

    tracing::info!("🚀 Starting app state initialization...");
    let state = match AppState::new(config, config_path).await {
        Ok(state) => {
            tracing::info!("✅ App state initialized successfully");
            state
        }
        Err(e) => {
            tracing::error!("❌ Failed to initialize app state: {}", e);
            return Err(e);
        }
    };

    ipc::serve(&state, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}
