//! Configuration validation module
//!
//! This module provides additional validation logic for configuration
//! beyond the basic validator crate validation.

use crate::config::app_config::{PoolConfig, PoolCoreConfig, SiteConfig};
use crate::config::AppConfig;
use crate::shared::error::AppError;

/// Configuration validator for additional validation logic
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the complete configuration
    pub fn validate_config(config: &AppConfig) -> crate::Result<()> {
        Self::validate_pool_config(&config.pool)?;
        Self::validate_site_config(&config.site)?;
        Self::validate_pool_core_config(&config.pool_core)?;

        Ok(())
    }

    /// Recipient addresses must parse and payout thresholds must be ordered
    fn validate_pool_config(pool: &PoolConfig) -> crate::Result<()> {
        pool.fee_recipient_address()?;
        pool.donation_recipient_address()?;

        if pool.default_minimum_payout < pool.minimum_minimum_payout {
            return Err(AppError::Validation(
                "default_minimum_payout cannot be lower than minimum_minimum_payout".to_string(),
            ));
        }

        if pool.n_min > pool.n_avg {
            return Err(AppError::Validation("n_min cannot be greater than n_avg".to_string()));
        }

        if let Some(ln_factor) = pool.ln_factor {
            if !ln_factor.is_finite() || ln_factor <= 0.0 {
                return Err(AppError::Validation("ln_factor must be a positive number".to_string()));
            }
        }

        if let Some(exponent) = pool.commitment_exponent {
            if !exponent.is_finite() || exponent < 0.0 {
                return Err(AppError::Validation("commitment_exponent must be a non-negative number".to_string()));
            }
        }

        if pool.passphrase == PoolConfig::default().passphrase {
            tracing::warn!("Pool passphrase is the built-in default - set pool.passphrase before going live");
        }

        Ok(())
    }

    /// Validate dashboard site settings
    fn validate_site_config(site: &SiteConfig) -> crate::Result<()> {
        if !site.explorer_url.is_empty()
            && !site.explorer_url.starts_with("http://")
            && !site.explorer_url.starts_with("https://")
        {
            return Err(AppError::Validation(
                "Explorer URL must start with http:// or https://".to_string(),
            ));
        }

        if !site.asset_root.is_dir() {
            tracing::warn!(asset_root = %site.asset_root.display(), "Asset root is not a directory - dashboard pages will redirect to the not-found page");
        }

        Ok(())
    }

    /// Validate pool core URL
    fn validate_pool_core_config(pool_core: &PoolCoreConfig) -> crate::Result<()> {
        if !pool_core.rpc_url.starts_with("http://") && !pool_core.rpc_url.starts_with("https://") {
            return Err(AppError::Validation(
                "Pool core RPC URL must start with http:// or https://".to_string(),
            ));
        }

        Ok(())
    }
}
