//! Application configuration structures
//!
//! This module contains the main configuration structures for the application.

use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;
use validator::Validate;

use crate::config::validation::ConfigValidator;
use crate::domain::{default_ln_factor, Address, PowerLawCommitment};
use crate::shared::error::AppError;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    /// Server address to bind to
    pub bind_address: IpAddr,

    /// Server port
    #[validate(range(min = 1, max = 65535))]
    pub port: u16,

    /// Maximum request size in bytes
    #[validate(range(min = 1024, max = 10485760))] // 1KB to 10MB
    pub max_request_size: u64,

    /// Worker threads (0 for auto-detect)
    #[validate(range(min = 0, max = 64))]
    pub worker_threads: usize,
}

/// Pool identity and payout settings, shown on the dashboard
#[derive(Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PoolConfig {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    /// Passphrase of the pool account
    #[validate(length(min = 1))]
    pub passphrase: String,

    /// Fee recipient, numeric id or RS address
    pub fee_recipient: String,

    /// Pool fee as a fraction of the block reward
    #[validate(range(min = 0.0, max = 1.0))]
    pub pool_fee_percentage: f64,

    pub donation_recipient: String,

    #[validate(range(min = 0, max = 100))]
    pub donation_percent: u32,

    #[validate(range(min = 0.0, max = 1.0))]
    pub winner_reward_percentage: f64,

    /// Coins
    #[validate(range(min = 0.0))]
    pub default_minimum_payout: f64,

    /// Coins
    #[validate(range(min = 0.0))]
    pub minimum_minimum_payout: f64,

    #[validate(range(min = 1))]
    pub min_payouts_per_transaction: u32,

    #[validate(range(min = 1))]
    pub n_avg: u32,

    #[validate(range(min = 1))]
    pub n_min: u32,

    /// Seconds
    pub max_deadline: u64,

    /// Blocks to wait before a round is processed
    pub process_lag: u32,

    /// Deadline normalization scale; defaults to 240 / ln(240)
    pub ln_factor: Option<f64>,

    /// Commitment weighting exponent; must match the pool core's scoring
    pub commitment_exponent: Option<f64>,
}

// Hand-written so the passphrase never reaches the logs
impl std::fmt::Debug for PoolConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolConfig")
            .field("name", &self.name)
            .field("passphrase", &"<redacted>")
            .field("fee_recipient", &self.fee_recipient)
            .field("pool_fee_percentage", &self.pool_fee_percentage)
            .field("donation_recipient", &self.donation_recipient)
            .field("donation_percent", &self.donation_percent)
            .field("process_lag", &self.process_lag)
            .finish_non_exhaustive()
    }
}

/// Dashboard site settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SiteConfig {
    #[validate(length(min = 1))]
    pub title: String,

    /// Public node the dashboard links to
    pub node_address: String,

    pub discord_link: String,

    pub info: String,

    pub faucet_url: String,

    pub explorer_url: String,

    /// Appended to `explorer_url` to link an account
    pub explorer_account: String,

    pub icon_ico: PathBuf,

    pub icon_png: PathBuf,

    /// Root directory of the static dashboard files
    pub asset_root: PathBuf,

    /// Turns the rendered-asset cache off
    pub disable_cache: bool,

    /// Upper bound of the rendered-asset cache in bytes
    #[validate(range(min = 1024))]
    pub cache_max_bytes: usize,
}

/// Pool core (ledger, tracker and scoring) connection
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PoolCoreConfig {
    /// JSON-RPC endpoint
    #[validate(url)]
    pub rpc_url: String,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    pub timeout_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    #[validate(length(min = 1))]
    pub level: String,

    /// Log format (text, json)
    #[validate(length(min = 1))]
    pub format: String,
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Pool configuration
    pub pool: PoolConfig,

    /// Dashboard configuration
    pub site: SiteConfig,

    /// Pool core configuration
    pub pool_core: PoolCoreConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::from([127, 0, 0, 1]),
            port: 8124,
            max_request_size: 1024 * 1024, // 1MB
            worker_threads: 0,             // Auto-detect
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            name: "Burst Pool".to_string(),
            passphrase: "change me".to_string(),
            fee_recipient: "0".to_string(),
            pool_fee_percentage: 0.02,
            donation_recipient: "0".to_string(),
            donation_percent: 1,
            winner_reward_percentage: 0.0,
            default_minimum_payout: 100.0,
            minimum_minimum_payout: 100.0,
            min_payouts_per_transaction: 10,
            n_avg: 360,
            n_min: 1,
            max_deadline: u64::MAX,
            process_lag: 10,
            ln_factor: None,
            commitment_exponent: None,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Burst Pool".to_string(),
            node_address: String::new(),
            discord_link: String::new(),
            info: String::new(),
            faucet_url: String::new(),
            explorer_url: "https://explorer.burstcoin.network/".to_string(),
            explorer_account: "?action=account&account=".to_string(),
            icon_ico: PathBuf::from("./html/favicon.ico"),
            icon_png: PathBuf::from("./html/img/poolIcon.png"),
            asset_root: PathBuf::from("./html"),
            disable_cache: false,
            cache_max_bytes: 16 * 1024 * 1024, // 16MB
        }
    }
}

impl Default for PoolCoreConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://127.0.0.1:8125/pool".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl PoolConfig {
    /// Account controlled by the configured passphrase
    pub fn pool_account(&self) -> Address {
        Address::from_passphrase(&self.passphrase)
    }

    pub fn fee_recipient_address(&self) -> crate::Result<Address> {
        parse_recipient("fee_recipient", &self.fee_recipient)
    }

    pub fn donation_recipient_address(&self) -> crate::Result<Address> {
        parse_recipient("donation_recipient", &self.donation_recipient)
    }

    pub fn ln_factor(&self) -> f64 {
        self.ln_factor.unwrap_or_else(default_ln_factor)
    }

    pub fn commitment_model(&self) -> PowerLawCommitment {
        self.commitment_exponent
            .map(PowerLawCommitment::new)
            .unwrap_or_default()
    }
}

impl SiteConfig {
    /// Explorer link prefix for accounts
    pub fn explorer_link(&self) -> String {
        format!("{}{}", self.explorer_url, self.explorer_account)
    }
}

fn parse_recipient(field: &str, value: &str) -> crate::Result<Address> {
    Address::from_either(value)
        .map_err(|e| AppError::Config(format!("Invalid {} '{}': {}", field, value, e)))
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> crate::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("pool").required(false))
            .add_source(config::Environment::with_prefix("POC_POOL").separator("__"))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build configuration: {}", e)))?;

        let config: AppConfig = config
            .try_deserialize()
            .map_err(|e| AppError::Config(format!("Failed to deserialize configuration: {}", e)))?;

        config
            .validate_config()
            .map_err(|e| AppError::Validation(format!("Configuration validation failed: {}", e)))?;
        ConfigValidator::validate_config(&config)?;

        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate_config(&self) -> Result<(), validator::ValidationErrors> {
        self.server.validate()?;
        self.pool.validate()?;
        self.site.validate()?;
        self.pool_core.validate()?;
        self.logging.validate()?;

        Ok(())
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.port)
    }

    /// Whether rendered assets are cached
    pub fn asset_cache_enabled(&self) -> bool {
        !self.site.disable_cache
    }
}
