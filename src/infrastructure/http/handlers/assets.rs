//! Dashboard asset server
//!
//! Serves the allow-listed static files. Text documents are minimized and
//! templated with pool settings, then cached by path when caching is on.
//! Images are passed through untouched and never cached.

use bytes::Bytes;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::config::app_config::{PoolConfig, SiteConfig};
use crate::domain::{Address, Amount};
use crate::infrastructure::adapters::{AssetCache, AssetSource};
use crate::infrastructure::http::models::{PoolResponse, CONTENT_TYPE_HTML};
use crate::shared::error::AppResult;

pub const INDEX_DOCUMENT: &str = "/index.html";
pub const NOT_FOUND_DOCUMENT: &str = "/404.html";
pub const FORBIDDEN_BODY: &str = "<h1>Access Forbidden</h1>";

const POOL_ICON_PATH: &str = "/img/poolIcon.png";
const TRAVERSAL_TOKEN: &str = "../";

/// Extension and content type of every servable file
const ALLOWED_FILES: [(&str, &str); 5] = [
    (".html", "text/html"),
    (".css", "text/css"),
    (".js", "application/javascript"),
    (".png", "image/png"),
    (".ico", "image/x-icon"),
];

/// Applied in order. Conservative on purpose: anything touching commas or
/// parentheses would corrupt string literals in the scripts.
const MINIMIZE: [(&str, &str); 7] = [
    ("    ", ""),
    (" + ", "+"),
    (" = ", "="),
    (" == ", "=="),
    (" === ", "==="),
    ("\r", ""),
    ("\n", ""),
];

pub struct AssetServer {
    source: Arc<dyn AssetSource>,
    cache: Option<AssetCache>,
    asset_root: PathBuf,
    icon_ico: PathBuf,
    icon_png: PathBuf,
    /// Placeholder token and its value, applied in order
    template: Vec<(&'static str, String)>,
}

impl AssetServer {
    pub fn new(
        source: Arc<dyn AssetSource>,
        site: &SiteConfig,
        pool: &PoolConfig,
        pool_account: Address,
        cache: Option<AssetCache>,
    ) -> Self {
        let template = vec![
            ("{TITLE}", site.title.clone()),
            ("{PUBLICNODE}", site.node_address.clone()),
            ("{DISCORD}", site.discord_link.clone()),
            ("{INFO}", site.info.clone()),
            ("{POOL_ACCOUNT}", pool_account.full_address()),
            ("{LAG}", pool.process_lag.to_string()),
            (
                "{MIN_PAYOUT}",
                Amount::from_coins(pool.minimum_minimum_payout).to_unformatted_string(),
            ),
            ("{FAUCET}", site.faucet_url.clone()),
            ("{EXPLORER}", site.explorer_url.clone()),
        ];

        Self {
            source,
            cache,
            asset_root: site.asset_root.clone(),
            icon_ico: site.icon_ico.clone(),
            icon_png: site.icon_png.clone(),
            template,
        }
    }

    pub fn cache(&self) -> Option<&AssetCache> {
        self.cache.as_ref()
    }

    pub async fn serve(&self, path: &str) -> AppResult<PoolResponse> {
        let path = if path.is_empty() || path == "/" { INDEX_DOCUMENT } else { path };

        let Some(content_type) = content_type_for(path) else {
            return Ok(forbidden());
        };
        if path.contains(TRAVERSAL_TOKEN) {
            return Ok(forbidden());
        }

        let binary = is_binary(path);
        if !binary {
            if let Some(cache) = &self.cache {
                if let Some(hit) = cache.get(path).await {
                    return Ok(PoolResponse::new(200, hit.content_type, Bytes::from(hit.body.to_string())));
                }
            }
        }

        let file = self.resolve(path);
        let Some(contents) = self.source.read(&file).await? else {
            debug!(path = %path, file = %file.display(), "Asset missing");
            if path == NOT_FOUND_DOCUMENT {
                return Ok(PoolResponse::new(404, CONTENT_TYPE_HTML, "Not Found"));
            }
            return Ok(PoolResponse::redirect(NOT_FOUND_DOCUMENT));
        };

        if binary {
            return Ok(PoolResponse::new(200, content_type, contents));
        }

        let rendered: Arc<str> = Arc::from(self.render(&String::from_utf8_lossy(&contents)));
        if let Some(cache) = &self.cache {
            cache.insert(path, rendered.clone(), content_type).await;
        }

        Ok(PoolResponse::new(200, content_type, Bytes::from(rendered.to_string())))
    }

    fn resolve(&self, path: &str) -> PathBuf {
        if path.contains("favicon.ico") {
            self.icon_ico.clone()
        } else if path == POOL_ICON_PATH {
            self.icon_png.clone()
        } else {
            self.asset_root.join(path.trim_start_matches('/'))
        }
    }

    /// Minimize, then fill in the template tokens
    pub fn render(&self, document: &str) -> String {
        let minimized = MINIMIZE
            .iter()
            .fold(document.to_string(), |doc, (from, to)| doc.replace(from, to));

        self.template
            .iter()
            .fold(minimized, |doc, (token, value)| doc.replace(token, value))
    }
}

fn content_type_for(path: &str) -> Option<&'static str> {
    ALLOWED_FILES
        .iter()
        .find(|(extension, _)| path.ends_with(extension))
        .map(|(_, content_type)| *content_type)
}

fn is_binary(path: &str) -> bool {
    path.contains(".png") || path.contains(".ico")
}

fn forbidden() -> PoolResponse {
    PoolResponse::new(403, CONTENT_TYPE_HTML, FORBIDDEN_BODY)
}
