//! Coin amounts held in planck (10^-8 of a coin)

use serde::{Deserialize, Serialize};
use std::fmt;

pub const PLANCK_PER_COIN: u64 = 100_000_000;
pub const UNIT: &str = "BURST";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub const fn from_planck(planck: u64) -> Self {
        Self(planck)
    }

    /// Converts a configured coin value; negative and NaN inputs become zero
    pub fn from_coins(coins: f64) -> Self {
        Self((coins * PLANCK_PER_COIN as f64).round() as u64)
    }

    pub fn planck(&self) -> u64 {
        self.0
    }

    /// Plain coin value, e.g. `1.5`
    pub fn to_unformatted_string(&self) -> String {
        format_coins(self.0 / PLANCK_PER_COIN, self.0 % PLANCK_PER_COIN, 8)
    }

    /// Coin value rounded to three decimals with unit, e.g. `1.5 BURST`
    pub fn to_formatted_string(&self) -> String {
        let milli = (self.0 as u128 + 50_000) / 100_000;
        let whole = (milli / 1000) as u64;
        let fraction = (milli % 1000) as u64;
        format!("{} {}", format_coins(whole, fraction, 3), UNIT)
    }
}

fn format_coins(whole: u64, fraction: u64, digits: usize) -> String {
    if fraction == 0 {
        return whole.to_string();
    }
    let fraction = format!("{:0width$}", fraction, width = digits);
    format!("{}.{}", whole, fraction.trim_end_matches('0'))
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_formatted_string())
    }
}
