use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Init logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    fmt().with_env_filter(filter).init();

    // Startup banner at info level so something always prints at default verbosity
    let config = clientele::config::Config::from_env();
    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "<unset>".to_string());
    info!(
        target: "clientele",
        "clientele starting: RUST_LOG='{}', api_url={}, state_dir='{}', mock={}, forbidden_fallback={}",
        rust_log,
        config.api_url,
        config.state_dir.display(),
        config.use_mock,
        config.forbidden_fallback
    );

    clientele::cli::run(config)
}
