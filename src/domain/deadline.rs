//! Deadline normalization
//!
//! Miners with different committed stake are ranked on one board by
//! dividing their raw deadline by a commitment factor and compressing the
//! result logarithmically.

use crate::domain::{amount::Amount, mining::MiningInfo};

/// Default scaling constant: a 240 second deadline at factor 1 maps to 240
pub fn default_ln_factor() -> f64 {
    240.0 / 240f64.ln()
}

/// `floor(ln(raw / commitment_factor) * ln_factor)`, saturating into i64
pub fn normalize_deadline(raw_deadline: f64, commitment_factor: f64, ln_factor: f64) -> i64 {
    ((raw_deadline / commitment_factor).ln() * ln_factor).floor() as i64
}

/// Maps a miner's commitment to the weight applied to its deadlines
pub trait CommitmentModel: Send + Sync {
    fn factor(&self, commitment: Amount, mining_info: Option<&MiningInfo>) -> f64;
}

/// Power-law commitment weighting bounded to `[1/8, 8]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLawCommitment {
    exponent: f64,
}

impl PowerLawCommitment {
    const DEFAULT_EXPONENT: f64 = 0.4515449935;
    const MIN_FACTOR: f64 = 0.125;
    const MAX_FACTOR: f64 = 8.0;

    pub fn new(exponent: f64) -> Self {
        Self { exponent }
    }
}

impl Default for PowerLawCommitment {
    fn default() -> Self {
        Self::new(Self::DEFAULT_EXPONENT)
    }
}

impl CommitmentModel for PowerLawCommitment {
    fn factor(&self, commitment: Amount, mining_info: Option<&MiningInfo>) -> f64 {
        let Some(info) = mining_info.filter(|info| info.average_commitment_nqt > 0) else {
            return 1.0;
        };
        let ratio = commitment.planck() as f64 / info.average_commitment_nqt as f64;
        ratio
            .powf(self.exponent)
            .clamp(Self::MIN_FACTOR, Self::MAX_FACTOR)
    }
}
