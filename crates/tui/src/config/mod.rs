use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/fintrack.toml";
const ENV_PREFIX: &str = "FINTRACK";

/// Runtime settings. Later layers win: defaults, the TOML file,
/// `FINTRACK_*` environment variables, then command-line flags.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub page_size: usize,
    pub log_file: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4000".to_string(),
            page_size: engine::PAGE_SIZE,
            log_file: "fintrack.log".to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Default, Parser)]
#[command(name = "fintrack", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override backend base URL (e.g. http://localhost:4000).
    #[arg(long)]
    base_url: Option<String>,
    /// Override rows per page.
    #[arg(long)]
    page_size: Option<usize>,
    /// Override log file path.
    #[arg(long)]
    log_file: Option<String>,
    /// Override log level (error, warn, info, debug, trace).
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn apply(self, settings: &mut AppConfig) {
        if let Some(base_url) = self.base_url {
            settings.base_url = base_url;
        }
        if let Some(page_size) = self.page_size {
            settings.page_size = page_size;
        }
        if let Some(log_file) = self.log_file {
            settings.log_file = log_file;
        }
        if let Some(log_level) = self.log_level {
            settings.log_level = log_level;
        }
    }
}

pub fn load() -> Result<AppConfig> {
    load_from(Args::parse())
}

fn load_from(args: Args) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let settings = config::Config::builder()
        .add_source(config::File::with_name(config_path).required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX))
        .build()?;

    let mut settings: AppConfig = settings.try_deserialize()?;
    args.apply(&mut settings);
    if settings.page_size == 0 {
        tracing::warn!("page_size 0 is not usable, falling back to 1");
        settings.page_size = 1;
    }
    Ok(settings)
}
