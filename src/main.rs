use anyhow::Result;
use clap::Parser;
use files_service::{
    App,
    app::config::Config,
    cli::{self, Cli},
};
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first to get verbose flag and config override
    let cli = Cli::parse();

    if let Some(ref config_dir) = cli.config {
        files_service::util::paths::set_config_dir_override(Some(config_dir.clone()));
    }

    let config_path = files_service::util::paths::get_app_config_path()?;
    let config = Config::load_from(&config_path)?;

    // Logs go to stderr so command output on stdout stays clean
    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());

    let log_level = if cli.verbose {
        LevelFilter::TRACE
    } else {
        LevelFilter::from_str(&config.logging.level).unwrap_or(LevelFilter::INFO)
    };

    let json_layer = config.logging.json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(non_blocking.clone())
            .with_ansi(false)
    });
    let text_layer = (!config.logging.json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(json_layer.with_filter(log_level))
        .with(text_layer.with_filter(log_level))
        .init();

    if cli.verbose {
        tracing::info!("Verbose logging enabled (TRACE level)");
    }
    tracing::trace!("CLI arguments: {:?}", cli);
    // Config was read before the subscriber existed; report where it came from now
    if config_path.exists() {
        tracing::debug!("Loaded config from {:?}", config_path);
    } else {
        tracing::info!("Config not found at {:?}, using defaults", config_path);
    }
    tracing::debug!("Config loaded: {:?}", config);

    let app = App::with_default_providers(config);
    let exit_code = cli::handler::handle_command(cli.command, app).await;

    // Flush buffered log lines before exiting
    drop(guard);
    std::process::exit(exit_code);
}
