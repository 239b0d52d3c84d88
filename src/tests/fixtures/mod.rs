//! Test fixtures for miners and rounds

use crate::domain::{Address, Amount, Miner, MiningInfo};

/// A qualified miner with no commitment, balance or deadlines
pub fn miner(id: u64, shared_capacity: f64, share: f64) -> Miner {
    Miner {
        address: Address::from_id(id),
        pending_balance: Amount::ZERO,
        total_capacity: shared_capacity,
        commitment: Amount::ZERO,
        committed_balance: Amount::ZERO,
        shared_capacity,
        share_percent: 100,
        donation_percent: 1,
        n_conf: 3,
        share,
        minimum_payout: Amount::from_coins(100.0),
        name: String::new(),
        user_agent: String::new(),
        deadlines: Vec::new(),
    }
}

pub fn mining_info(height: u64, average_commitment_nqt: u64) -> MiningInfo {
    MiningInfo {
        height,
        generation_signature: vec![0x5a; 32],
        base_target: 18_325_193_796,
        average_commitment_nqt,
    }
}
