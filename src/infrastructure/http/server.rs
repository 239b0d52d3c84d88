//! HTTP server implementation
//!
//! Wires the pool core client, use cases, handlers and dispatcher together
//! and serves them with warp. Expected to sit behind a reverse proxy that
//! handles TLS and compression.

use std::sync::Arc;
use tracing::{info, instrument};
use warp::{Filter, Reply};

use crate::application::ports::{MinerStore, PoolService};
use crate::application::use_cases::{StatisticsUseCase, SubmitNonceUseCase};
use crate::application::views::MinerViewBuilder;
use crate::config::AppConfig;
use crate::infrastructure::adapters::{AssetCache, AssetSource, FsAssetSource, PoolCoreClient};
use crate::infrastructure::http::dispatcher::{Dispatcher, SharedDispatcher};
use crate::infrastructure::http::handlers::{AssetServer, StatisticsHandler, SubmissionHandler};
use crate::infrastructure::http::routes::RouteBuilder;
use crate::shared::error::{AppError, AppResult};

pub struct HttpServer {
    config: AppConfig,
    dispatcher: SharedDispatcher,
}

impl HttpServer {
    /// Server backed by the remote pool core and the local asset directory
    pub async fn new(config: AppConfig) -> AppResult<Self> {
        let pool_core = Arc::new(PoolCoreClient::new(&config)?);
        info!(rpc_url = %config.pool_core.rpc_url, "Pool core client ready");

        Ok(Self::with_collaborators(
            config,
            pool_core.clone(),
            pool_core,
            Arc::new(FsAssetSource),
        ))
    }

    /// Server over explicit collaborators
    pub fn with_collaborators(
        config: AppConfig,
        store: Arc<dyn MinerStore>,
        pool: Arc<dyn PoolService>,
        assets: Arc<dyn AssetSource>,
    ) -> Self {
        let shared_config = Arc::new(config.clone());
        let views = MinerViewBuilder::new(pool.commitment_model(), pool.ln_factor());

        let submission = SubmitNonceUseCase::new(pool.clone());
        let statistics = StatisticsUseCase::new(store, pool.clone(), views, shared_config);

        let cache = config
            .asset_cache_enabled()
            .then(|| AssetCache::new(config.site.cache_max_bytes));
        if cache.is_none() {
            info!("Asset cache disabled");
        }
        let asset_server = AssetServer::new(assets, &config.site, &config.pool, pool.account(), cache);

        let dispatcher = Arc::new(Dispatcher::new(
            SubmissionHandler::new(Arc::new(submission)),
            StatisticsHandler::new(Arc::new(statistics)),
            asset_server,
        ));

        Self { config, dispatcher }
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[instrument(skip(self))]
    pub async fn run(self) -> AppResult<()> {
        let addr: std::net::SocketAddr = self
            .config
            .server_address()
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid server address: {}", e)))?;

        let routes = self.create_routes();

        info!("Starting HTTP server on {}", addr);
        warp::serve(routes).run(addr).await;

        Ok(())
    }

    /// Create the application routes
    pub fn create_routes(&self) -> impl Filter<Extract = impl Reply, Error = std::convert::Infallible> + Clone {
        RouteBuilder::build_routes(&self.config, self.dispatcher.clone())
    }
}
