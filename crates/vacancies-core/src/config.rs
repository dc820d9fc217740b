//! Configuration types for the vacancies harvester.
//!
//! Database and HTTP settings are plain structs filled in by the CLI from
//! flags and environment variables. The list of employers to harvest lives in
//! `employers.toml`.

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgConnectOptions;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::AppError;

/// Default base URL of the HeadHunter listing API.
pub const DEFAULT_API_URL: &str = "https://api.hh.ru";

/// PostgreSQL connection configuration.
///
/// The harvester works over a single long-lived connection, so
/// `max_connections` defaults to 1.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub db_name: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            db_name: "vacancies".to_string(),
            user: "postgres".to_string(),
            password: String::new(),
            host: "localhost".to_string(),
            port: 5432,
            max_connections: 1,
        }
    }
}

impl DbConfig {
    /// Builds sqlx connect options from the individual connection parameters.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.db_name)
    }
}

/// HTTP client configuration for the listing API.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout: Duration,
    /// Number of items requested per employer. Only the first page is read.
    pub per_page: u32,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            per_page: 10,
        }
    }
}

// =============================================================================
// Employer Configuration (employers.toml)
// =============================================================================

/// Default enabled status when not specified in configuration.
fn default_enabled() -> bool {
    true
}

/// Employers harvested when no configuration file is available.
const BUILTIN_EMPLOYERS: &[(&str, &str)] = &[
    ("1740", "Yandex"),
    ("87021", "Wildberries"),
    ("2180", "Ozon"),
    ("2748", ""),
    ("907345", "Lukoil"),
    ("633069", ""),
    ("3529", "Sber"),
    ("78638", "T-Bank"),
    ("15478", "VK"),
    ("668019", ""),
];

/// Root configuration structure for employers.toml.
///
/// # Example
///
/// ```toml
/// [[employers]]
/// id = "1740"
/// name = "Yandex"
///
/// [[employers]]
/// id = "3529"
/// name = "Sber"
/// enabled = false
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployersConfig {
    pub employers: Vec<EmployerEntry>,
}

impl EmployersConfig {
    /// The built-in employer list used when no file can be read or created.
    pub fn builtin() -> Self {
        let employers = BUILTIN_EMPLOYERS
            .iter()
            .map(|(id, name)| EmployerEntry {
                id: (*id).to_string(),
                name: (!name.is_empty()).then(|| (*name).to_string()),
                enabled: true,
            })
            .collect();
        Self { employers }
    }

    /// Returns the ids of enabled employers, in file order.
    pub fn employer_ids(&self) -> Vec<String> {
        self.employers
            .iter()
            .filter(|e| e.enabled)
            .map(|e| e.id.clone())
            .collect()
    }
}

/// A single employer entry in the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployerEntry {
    /// Employer id as understood by the listing API.
    pub id: String,

    /// Optional human-readable label, only used for logging.
    pub name: Option<String>,

    /// Whether this employer is harvested at startup.
    ///
    /// Defaults to `true` if not specified.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "employers.toml";

/// Returns the default configuration directory path: `~/.config/vacancies/`
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("vacancies"))
}

/// Returns the default configuration file path: `~/.config/vacancies/employers.toml`
pub fn default_config_path() -> Option<PathBuf> {
    default_config_dir().map(|p| p.join(CONFIG_FILE_NAME))
}

const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Vacancies employer configuration
#
# Each entry is an employer id of the hh.ru listing API.
# Up to 10 vacancies are fetched per enabled employer at startup.
# Set enabled = false to skip an employer.

[[employers]]
id = "1740"
name = "Yandex"

[[employers]]
id = "87021"
name = "Wildberries"

[[employers]]
id = "2180"
name = "Ozon"

[[employers]]
id = "2748"

[[employers]]
id = "907345"
name = "Lukoil"

[[employers]]
id = "633069"

[[employers]]
id = "3529"
name = "Sber"

[[employers]]
id = "78638"
name = "T-Bank"

[[employers]]
id = "15478"
name = "VK"

[[employers]]
id = "668019"
"#;

/// Load employer configuration from a TOML file.
///
/// # Returns
/// * `Ok(Some(config))` - Configuration loaded successfully
/// * `Ok(None)` - No configuration file found and none could be created
/// * `Err(e)` - A custom path is missing, or the file exists but is invalid
///
/// If no file exists at the default path, a template listing the default
/// employers is written there first.
pub fn load_employers_config(path: Option<PathBuf>) -> Result<Option<EmployersConfig>, AppError> {
    let using_default_path = path.is_none();
    let config_path = match path {
        Some(p) => p,
        None => match default_config_path() {
            Some(p) => p,
            None => return Ok(None),
        },
    };

    if !config_path.exists() {
        if using_default_path {
            if let Err(e) = create_default_config(&config_path) {
                tracing::warn!("Could not create default config template: {}", e);
                return Ok(None);
            }
        } else {
            return Err(AppError::ConfigError(format!(
                "Config file not found: {}",
                config_path.display()
            )));
        }
    }

    let content = std::fs::read_to_string(&config_path).map_err(|e| {
        AppError::ConfigError(format!(
            "Failed to read config file '{}': {}",
            config_path.display(),
            e
        ))
    })?;

    let config: EmployersConfig = toml::from_str(&content).map_err(|e| {
        AppError::ConfigError(format!(
            "Invalid TOML in '{}': {}",
            config_path.display(),
            e
        ))
    })?;

    Ok(Some(config))
}

fn create_default_config(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(path, DEFAULT_CONFIG_TEMPLATE)?;
    tracing::info!("Created default employer config at: {}", path.display());

    Ok(())
}
