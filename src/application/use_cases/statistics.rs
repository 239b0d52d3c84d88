//! Statistics API use case
//!
//! Read-only projections of the miner set, the won-block history and the
//! pool settings. Every operation tolerates an empty miner set and a
//! missing round.

use futures::future::try_join_all;
use std::sync::Arc;
use tracing::debug;

use crate::application::ports::{MinerStore, PoolService};
use crate::application::views::{
    CurrentRoundView, MinerView, MinerViewBuilder, MinersResponse, PoolConfigView, TopMinersResponse,
    WonBlockView, WonBlocksResponse,
};
use crate::config::AppConfig;
use crate::domain::{Address, Miner};
use crate::shared::error::AppResult;

/// Size of the leaderboard
pub const TOP_MINERS: usize = 10;

/// Won blocks shown on the dashboard
pub const WON_BLOCKS_LIMIT: usize = 100;

pub struct StatisticsUseCase {
    store: Arc<dyn MinerStore>,
    pool: Arc<dyn PoolService>,
    views: MinerViewBuilder,
    config: Arc<AppConfig>,
}

impl StatisticsUseCase {
    pub fn new(
        store: Arc<dyn MinerStore>,
        pool: Arc<dyn PoolService>,
        views: MinerViewBuilder,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            store,
            pool,
            views,
            config,
        }
    }

    /// All qualified miners, largest shared capacity first
    pub async fn miners(&self) -> AppResult<MinersResponse> {
        let mining_info = self.pool.mining_info().await?;
        let mut miners = self.store.miners_filtered().await?;
        sort_descending_by(&mut miners, |m| m.shared_capacity);

        let pool_capacity = miners.iter().map(|m| m.total_capacity).sum();
        let miners = miners
            .iter()
            .map(|m| self.views.project(m, mining_info.as_ref(), false))
            .collect();

        Ok(MinersResponse {
            miners,
            explorer: self.config.site.explorer_link(),
            pool_capacity,
        })
    }

    /// One miner with its deadline history, `None` when unknown
    pub async fn miner(&self, address: &str) -> AppResult<Option<MinerView>> {
        let address = match Address::from_either(address) {
            Ok(address) => address,
            Err(e) => {
                debug!(address = %address, error = %e, "Unparseable miner address");
                return Ok(None);
            }
        };

        let Some(miner) = self.store.miner(address).await? else {
            return Ok(None);
        };
        let mining_info = self.pool.mining_info().await?;
        Ok(Some(self.views.project(&miner, mining_info.as_ref(), true)))
    }

    pub async fn pool_config(&self) -> AppResult<PoolConfigView> {
        let pool = &self.config.pool;
        let account = self.pool.account();
        let fee_recipient = pool.fee_recipient_address()?;
        let donation_recipient = pool.donation_recipient_address()?;
        let transaction_fee = self.pool.transaction_fee().await?;

        Ok(PoolConfigView {
            version: env!("CARGO_PKG_VERSION").to_string(),
            explorer: self.config.site.explorer_link(),
            pool_name: pool.name.clone(),
            pool_account: account.id_string(),
            pool_account_rs: account.full_address(),
            n_avg: pool.n_avg,
            n_min: pool.n_min,
            max_deadline: pool.max_deadline,
            process_lag: pool.process_lag,
            fee_recipient: fee_recipient.id_string(),
            fee_recipient_rs: fee_recipient.full_address(),
            pool_fee_percentage: pool.pool_fee_percentage,
            donation_recipient: donation_recipient.id_string(),
            donation_recipient_rs: donation_recipient.full_address(),
            donation_percent: pool.donation_percent,
            winner_reward_percentage: pool.winner_reward_percentage,
            default_minimum_payout: pool.default_minimum_payout,
            minimum_minimum_payout: pool.minimum_minimum_payout,
            min_payouts_per_transaction: pool.min_payouts_per_transaction,
            transaction_fee: transaction_fee.to_unformatted_string(),
        })
    }

    pub async fn current_round(&self) -> AppResult<CurrentRoundView> {
        self.pool.current_round_info().await
    }

    /// Leaderboard by share; `others_share` is the residual of everyone not shown
    pub async fn top_miners(&self) -> AppResult<TopMinersResponse> {
        let mining_info = self.pool.mining_info().await?;
        let mut miners = self.store.miners_filtered().await?;
        sort_descending_by(&mut miners, |m| m.share);
        miners.truncate(TOP_MINERS);

        let shown: f64 = miners.iter().map(|m| m.share).sum();
        let top_miners = miners
            .iter()
            .map(|m| self.views.project(m, mining_info.as_ref(), false))
            .collect();

        Ok(TopMinersResponse {
            top_miners,
            explorer: self.config.site.explorer_link(),
            others_share: 1.0 - shown,
        })
    }

    pub async fn won_blocks(&self) -> AppResult<WonBlocksResponse> {
        let blocks = self.store.won_blocks(WON_BLOCKS_LIMIT).await?;
        let blocks = &blocks[..blocks.len().min(WON_BLOCKS_LIMIT)];

        let won_blocks = try_join_all(blocks.iter().map(|block| async move {
            let name = self
                .store
                .miner(block.generator_id)
                .await?
                .and_then(|m| m.display_name().map(str::to_string));
            AppResult::Ok(WonBlockView::new(block, name))
        }))
        .await?;

        Ok(WonBlocksResponse {
            won_blocks,
            explorer: self.config.site.explorer_link(),
        })
    }
}

// Stable, so ties keep the collaborator's order
fn sort_descending_by(miners: &mut [Miner], key: impl Fn(&Miner) -> f64) {
    miners.sort_by(|a, b| key(b).total_cmp(&key(a)));
}
