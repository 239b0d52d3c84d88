//! End-to-end tests through the warp routes

use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use warp::http::StatusCode;

use crate::config::AppConfig;
use crate::domain::{Address, Amount, Deadline};
use crate::infrastructure::adapters::{AssetSource, FsAssetSource};
use crate::infrastructure::http::HttpServer;
use crate::shared::error::AppError;
use crate::tests::common::{CountingAssetSource, MockPool, MockStore};
use crate::tests::config::{init, test_config};
use crate::tests::fixtures;

struct TestPool {
    server: HttpServer,
    _assets: TempDir,
}

impl TestPool {
    fn new(store: MockStore, pool: MockPool) -> Self {
        Self::with_source(store, pool, Arc::new(FsAssetSource), |_| {})
    }

    fn with_source(
        store: MockStore,
        pool: MockPool,
        source: Arc<dyn AssetSource>,
        configure: impl FnOnce(&mut AppConfig),
    ) -> Self {
        init();
        let assets = tempfile::tempdir().unwrap();
        std::fs::write(assets.path().join("index.html"), "<title>{TITLE}</title>\n<p>{POOL_ACCOUNT}</p>").unwrap();
        std::fs::write(assets.path().join("404.html"), "<h1>Not here</h1>").unwrap();

        let mut config = test_config(assets.path());
        configure(&mut config);
        let server = HttpServer::with_collaborators(config, Arc::new(store), Arc::new(pool), source);
        Self { server, _assets: assets }
    }

    async fn get(&self, path: &str) -> warp::http::Response<bytes::Bytes> {
        warp::test::request()
            .method("GET")
            .path(path)
            .reply(&self.server.create_routes())
            .await
    }

    async fn post(&self, path: &str, body: &str) -> warp::http::Response<bytes::Bytes> {
        warp::test::request()
            .method("POST")
            .path(path)
            .header("user-agent", "scavenger/1.7.8")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(body.to_string())
            .reply(&self.server.create_routes())
            .await
    }
}

fn body_json(response: &warp::http::Response<bytes::Bytes>) -> Value {
    serde_json::from_slice(response.body()).unwrap()
}

#[tokio::test]
async fn test_submit_nonce_success() {
    let pool = TestPool::new(MockStore::new(), MockPool::new().with_deadline(4321));

    let response = pool
        .post("/burst?requestType=submitNonce&accountId=12345", "nonce=987654321")
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "application/json");
    assert_eq!(body_json(&response), json!({"result": "success", "deadline": 4321}));
}

#[tokio::test]
async fn test_submit_nonce_passes_user_agent_as_client_id() {
    let mock = Arc::new(MockPool::new().with_deadline(1));
    let server = {
        init();
        let dir = tempfile::tempdir().unwrap();
        HttpServer::with_collaborators(
            test_config(dir.path()),
            Arc::new(MockStore::new()),
            mock.clone(),
            Arc::new(CountingAssetSource::new()),
        )
    };

    warp::test::request()
        .method("POST")
        .path("/burst?requestType=submitNonce&accountId=5&nonce=6")
        .header("user-agent", "Blago/1.0")
        .reply(&server.create_routes())
        .await;

    let submissions = mock.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].0.miner, Address::from_id(5));
    assert_eq!(submissions[0].1, "Blago/1.0");
}

#[tokio::test]
async fn test_non_utf8_user_agent_still_scores() {
    let mock = Arc::new(MockPool::new().with_deadline(9));
    init();
    let dir = tempfile::tempdir().unwrap();
    let server = HttpServer::with_collaborators(
        test_config(dir.path()),
        Arc::new(MockStore::new()),
        mock.clone(),
        Arc::new(CountingAssetSource::new()),
    );

    let response = warp::test::request()
        .method("POST")
        .path("/burst?requestType=submitNonce&accountId=5&nonce=6")
        .header("user-agent", &b"miner\xe9/1.0"[..])
        .reply(&server.create_routes())
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(&response), json!({"result": "success", "deadline": 9}));
    let submissions = mock.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].1, "miner\u{FFFD}/1.0");
}

#[tokio::test]
async fn test_truncated_body_over_socket_is_empty_ok() {
    let mock = Arc::new(MockPool::new().with_deadline(1));
    init();
    let dir = tempfile::tempdir().unwrap();
    let server = HttpServer::with_collaborators(
        test_config(dir.path()),
        Arc::new(MockStore::new()),
        mock.clone(),
        Arc::new(CountingAssetSource::new()),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let serving = tokio::spawn(warp::serve(server.create_routes()).incoming(listener).run());

    // Declares 100 bytes, sends 11, then closes the write half
    let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(
            b"POST /burst?requestType=submitNonce HTTP/1.1\r\n\
              Host: localhost\r\n\
              Content-Type: application/x-www-form-urlencoded\r\n\
              Content-Length: 100\r\n\r\n\
              accountId=5",
        )
        .await
        .unwrap();
    stream.shutdown().await.unwrap();

    let mut raw = Vec::new();
    let _ = tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut raw)).await;
    serving.abort();

    let reply = String::from_utf8_lossy(&raw);
    assert!(reply.starts_with("HTTP/1.1 200 OK"), "{}", reply);
    let (_, body) = reply.split_once("\r\n\r\n").unwrap();
    assert!(body.is_empty(), "{}", body);
    assert!(mock.submissions().is_empty());
}

#[tokio::test]
async fn test_submit_nonce_missing_account() {
    let pool = TestPool::new(MockStore::new(), MockPool::new().with_deadline(1));

    for body in ["nonce=1", "nonce=abc", "accountId=not-an-account&nonce=1"] {
        let response = pool.post("/burst?requestType=submitNonce", body).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(&response), json!({"result": "Account ID not set"}), "{}", body);
    }
}

#[tokio::test]
async fn test_submit_nonce_invalid_nonce() {
    let pool = TestPool::new(MockStore::new(), MockPool::new().with_deadline(1));

    for body in ["accountId=1", "accountId=1&nonce=", "accountId=1&nonce=12x", "accountId=1&nonce=-5"] {
        let response = pool.post("/burst?requestType=submitNonce", body).await;
        assert_eq!(body_json(&response), json!({"result": "Nonce not set or invalid"}), "{}", body);
    }
}

#[tokio::test]
async fn test_submit_nonce_business_rejection() {
    let pool = TestPool::new(MockStore::new(), MockPool::new().with_rejection("Deadline exceeds maximum"));

    let response = pool
        .post("/burst", "requestType=submitNonce&accountId=1&nonce=2")
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(&response), json!({"result": "Deadline exceeds maximum"}));
}

#[tokio::test]
async fn test_submit_nonce_requires_post() {
    let pool = TestPool::new(MockStore::new(), MockPool::new().with_deadline(1));

    let response = pool.get("/burst?requestType=submitNonce&accountId=1&nonce=2").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.body().as_ref(), b"404 not found");
}

#[tokio::test]
async fn test_get_mining_info() {
    let pool = TestPool::new(MockStore::new(), MockPool::new());
    let response = pool.get("/burst?requestType=getMiningInfo").await;
    assert_eq!(response.body().as_ref(), b"null");

    let mut info = fixtures::mining_info(u64::MAX, 12);
    info.base_target = u64::MAX - 1;
    let pool = TestPool::new(MockStore::new(), MockPool::new().with_mining_info(info));
    let response = pool.get("/burst?requestType=getMiningInfo").await;
    let body = body_json(&response);

    assert_eq!(body["height"].as_str().unwrap().parse::<u64>().unwrap(), u64::MAX);
    assert_eq!(body["baseTarget"].as_str().unwrap().parse::<u64>().unwrap(), u64::MAX - 1);
    assert_eq!(body["generationSignature"], "5a".repeat(32));
    assert_eq!(body["averageCommitmentNQT"], "12");
}

#[tokio::test]
async fn test_get_miners_and_top10() {
    let mut leader = fixtures::miner(3, 30.0, 0.5);
    leader.deadlines = vec![Deadline { deadline: 100, share_percent: 100, height: 77 }];
    let miners = vec![fixtures::miner(1, 10.0, 0.2), leader, fixtures::miner(2, 20.0, 0.3)];
    let pool = TestPool::new(
        MockStore::new().with_miners(miners),
        MockPool::new().with_mining_info(fixtures::mining_info(77, 0)),
    );

    let body = body_json(&pool.get("/api/getMiners").await);
    let addresses: Vec<_> = body["miners"].as_array().unwrap().iter().map(|m| m["address"].clone()).collect();
    assert_eq!(addresses, vec![json!("3"), json!("2"), json!("1")]);
    assert_eq!(body["poolCapacity"], 60.0);
    assert!(body["miners"][0]["currentRoundBestDeadline"].is_string());
    assert!(body["miners"][0].get("commitmentRatio").is_none());
    assert!(body["miners"][1].get("currentRoundBestDeadline").is_none());

    let body = body_json(&pool.get("/api/getTop10Miners").await);
    let shown: f64 = body["topMiners"].as_array().unwrap().iter().map(|m| m["share"].as_f64().unwrap()).sum();
    let others = body["othersShare"].as_f64().unwrap();
    assert!((shown + others - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_get_single_miner() {
    let pool = TestPool::new(MockStore::new().with_miners(vec![fixtures::miner(42, 1.0, 1.0)]), MockPool::new());

    let body = body_json(&pool.get("/api/getMiner/42").await);
    assert_eq!(body["address"], "42");
    assert_eq!(body["addressRS"], Address::from_id(42).full_address());
    assert_eq!(body["deadlines"], json!([]));

    let rs = Address::from_id(42).full_address();
    let body = body_json(&pool.get(&format!("/api/getMiner/{}", rs)).await);
    assert_eq!(body["address"], "42");

    assert_eq!(pool.get("/api/getMiner/43").await.body().as_ref(), b"null");
}

#[tokio::test]
async fn test_views_use_pool_commitment_model() {
    let mut miner = fixtures::miner(42, 1.0, 1.0);
    miner.commitment = Amount::from_planck(4_000);
    let pool = TestPool::new(
        MockStore::new().with_miners(vec![miner]),
        MockPool::new()
            .with_mining_info(fixtures::mining_info(5, 1_000))
            .with_commitment_exponent(1.0),
    );

    let body = body_json(&pool.get("/api/getMiner/42").await);
    assert_eq!(body["commitmentFactor"], 4.0);
    assert_eq!(body["commitmentRatio"], 4.0);
}

#[tokio::test]
async fn test_api_routes_match_by_prefix() {
    let pool = TestPool::new(
        MockStore::new().with_miners(vec![fixtures::miner(42, 1.0, 1.0)]),
        MockPool::new(),
    );

    let body = body_json(&pool.get("/api/getMiners/").await);
    assert_eq!(body["miners"][0]["address"], "42");

    let body = body_json(&pool.get("/api/getWonBlocks/").await);
    assert_eq!(body["wonBlocks"], json!([]));

    let body = body_json(&pool.get("/api/getMiner/42").await);
    assert_eq!(body["address"], "42");
}

#[tokio::test]
async fn test_get_config_and_unknown_api_path() {
    let pool = TestPool::new(MockStore::new(), MockPool::new().with_account(Address::from_id(77)));

    let body = body_json(&pool.get("/api/getConfig").await);
    assert_eq!(body["poolName"], "Test Pool");
    assert_eq!(body["poolAccount"], "77");
    assert_eq!(body["transactionFee"], "0.00735");

    let response = pool.get("/api/nothingHere").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.body().as_ref(), b"null");
}

#[tokio::test]
async fn test_get_current_round_passthrough() {
    let round = json!({"roundStart": 1_600_000_000, "bestDeadline": {"miner": "9", "deadline": 12}});
    let pool = TestPool::new(MockStore::new(), MockPool::new().with_current_round(round.clone()));

    assert_eq!(body_json(&pool.get("/api/getCurrentRound").await), round);
}

#[tokio::test]
async fn test_collaborator_failure_is_best_effort_text() {
    let pool = TestPool::new(
        MockStore::failing(AppError::Upstream("connection refused".to_string())),
        MockPool::new(),
    );

    let response = pool.get("/api/getMiners").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.body().as_ref(), b"Pool core error: connection refused");
}

#[tokio::test]
async fn test_disconnect_yields_empty_body() {
    let source = Arc::new(CountingAssetSource::failing(AppError::Disconnected("broken pipe".to_string())));
    let pool = TestPool::with_source(MockStore::new(), MockPool::new(), source, |_| {});

    let response = pool.get("/index.html").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.body().is_empty());
}

#[tokio::test]
async fn test_index_is_templated_from_disk() {
    let pool = TestPool::new(MockStore::new(), MockPool::new().with_account(Address::from_id(9)));

    let response = pool.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "text/html");
    assert_eq!(
        std::str::from_utf8(response.body()).unwrap(),
        format!("<title>Test Pool</title><p>{}</p>", Address::from_id(9).full_address())
    );
}

#[tokio::test]
async fn test_missing_asset_redirects() {
    let pool = TestPool::new(MockStore::new(), MockPool::new());

    let response = pool.get("/stats.html").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()["location"], "/404.html");

    let response = pool.get("/404.html").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_cached_asset_is_byte_identical_without_second_read() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let index = dir.path().join("index.html");
    let source = Arc::new(CountingAssetSource::new().with_file(&index, "<b>{TITLE}</b>"));
    let server = HttpServer::with_collaborators(
        config,
        Arc::new(MockStore::new()),
        Arc::new(MockPool::new()),
        source.clone(),
    );
    let routes = server.create_routes();

    let first = warp::test::request().path("/index.html").reply(&routes).await;
    let second = warp::test::request().path("/index.html").reply(&routes).await;

    assert_eq!(first.body(), second.body());
    assert_eq!(first.body().as_ref(), b"<b>Test Pool</b>");
    assert_eq!(source.reads(), 1);
}

#[tokio::test]
async fn test_disabled_cache_rereads() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path());
    config.site.disable_cache = true;
    let source = Arc::new(CountingAssetSource::new().with_file(dir.path().join("app.css"), "a  {}"));
    let server = HttpServer::with_collaborators(
        config,
        Arc::new(MockStore::new()),
        Arc::new(MockPool::new()),
        source.clone(),
    );
    let routes = server.create_routes();

    warp::test::request().path("/app.css").reply(&routes).await;
    warp::test::request().path("/app.css").reply(&routes).await;

    assert_eq!(source.reads(), 2);
}
