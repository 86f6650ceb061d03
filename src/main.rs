use std::process::ExitCode;

use spring_balls::{DemoConfig, DemoError};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Environment variable naming an optional JSON config file.
const CONFIG_ENV: &str = "SPRING_BALLS_CONFIG";

fn main() -> ExitCode {
    let log_level = match std::env::var("RUST_LOG")
        .unwrap_or_default()
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install logger: {err}");
    }

    info!("spring-balls v{}", env!("CARGO_PKG_VERSION"));

    match load_config().and_then(spring_balls::run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn load_config() -> Result<DemoConfig, DemoError> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            info!(path = %path.to_string_lossy(), "loading config");
            Ok(DemoConfig::from_json_file(path)?)
        }
        None => Ok(DemoConfig::default()),
    }
}
