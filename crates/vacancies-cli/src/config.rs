use clap::Parser;
use std::path::PathBuf;
use std::sync::LazyLock;

use vacancies_core::DbConfig;
use vacancies_core::config::DEFAULT_API_URL;

static VERSION_INFO: LazyLock<String> = LazyLock::new(|| {
    let version = env!("CARGO_PKG_VERSION");

    let commit = option_env!("VERGEN_GIT_SHA")
        .map(|s| s.chars().take(7).collect::<String>())
        .unwrap_or_else(|| "unknown".to_string());

    let built = option_env!("VERGEN_BUILD_DATE").unwrap_or("unknown");
    let target = option_env!("VERGEN_CARGO_TARGET_TRIPLE").unwrap_or("unknown");
    let rustc = option_env!("VERGEN_RUSTC_SEMVER").unwrap_or("unknown");

    format!("{version}\ncommit: {commit}\nbuilt: {built}\ntarget: {target}\nrustc: {rustc}")
});

pub fn version_info() -> &'static str {
    &VERSION_INFO
}

/// CLI configuration parsed from command line arguments and environment variables
#[derive(Parser, Debug)]
#[command(name = "vacancies")]
#[command(
    author,
    version = version_info(),
    about = "Harvest hh.ru vacancies into PostgreSQL and query them interactively"
)]
#[command(after_help = "Examples:
  vacancies --db-name hh --db-user postgres --db-password secret
  DB_NAME=hh DB_USER=postgres vacancies
  vacancies --employers ~/my-employers.toml

Employers are read from ~/.config/vacancies/employers.toml, which is created
with the built-in employer list on first run.")]
pub struct Config {
    /// PostgreSQL database name
    #[arg(long, env = "DB_NAME", default_value = "vacancies")]
    pub db_name: String,

    /// PostgreSQL user
    #[arg(long, env = "DB_USER", default_value = "postgres")]
    pub db_user: String,

    /// PostgreSQL password
    #[arg(long, env = "DB_PASSWORD", default_value = "", hide_env_values = true)]
    pub db_password: String,

    /// PostgreSQL host
    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,

    /// PostgreSQL port
    #[arg(long, env = "DB_PORT", default_value_t = 5432)]
    pub db_port: u16,

    /// Base URL of the vacancy listing API
    #[arg(long, env = "HH_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Custom path to employers.toml configuration file
    #[arg(long, env = "EMPLOYERS_CONFIG", value_name = "PATH")]
    pub employers: Option<PathBuf>,
}

impl Config {
    /// Connection settings for the vacancy store.
    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            db_name: self.db_name.clone(),
            user: self.db_user.clone(),
            password: self.db_password.clone(),
            host: self.db_host.clone(),
            port: self.db_port,
            ..DbConfig::default()
        }
    }
}
