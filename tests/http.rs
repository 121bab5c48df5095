use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct ChartPayload {
    data: Vec<BTreeMap<String, serde_json::Value>>,
    series_keys: Vec<String>,
    colors: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct SummaryCard {
    id: String,
    change: String,
}

#[derive(Debug, Deserialize)]
struct DashboardResponse {
    project_id: String,
    title: String,
    selection: Vec<String>,
    chart: ChartPayload,
    summary: Vec<SummaryCard>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::Once;
    use std::sync::atomic::{AtomicI32, Ordering};

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/catalog")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_project_dashboard"))
        .env("PORT", port.to_string())
        .env("DASHBOARD_SEED", "2024")
        .env("DASHBOARD_DEFAULT_PROJECT", "demo")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn fetch_dashboard(server: &TestServer, path: &str) -> DashboardResponse {
    Client::new()
        .get(format!("{}{path}", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_dashboard_defaults() {
    let server = shared_server().await;
    let dashboard = fetch_dashboard(&server, "/api/dashboard/bitcoin").await;

    assert_eq!(dashboard.project_id, "bitcoin");
    assert_eq!(dashboard.title, "Bitcoin Tableau de bord");
    assert_eq!(dashboard.chart.data.len(), 1001);
    assert_eq!(
        dashboard.selection,
        vec!["twitter_post", "twitter_user", "discord_message"]
    );
    assert_eq!(dashboard.chart.series_keys, dashboard.selection);
    assert_eq!(dashboard.chart.colors.len(), 12);
    assert_eq!(dashboard.summary.len(), 12);
    assert_eq!(dashboard.summary[11].id, "return");
    for row in &dashboard.chart.data {
        assert_eq!(row.len(), 13, "date plus twelve metrics");
    }
    assert!(dashboard.summary.iter().all(|card| !card.change.is_empty()));
}

#[tokio::test]
async fn http_toggle_and_days() {
    let server = shared_server().await;
    let dashboard = fetch_dashboard(
        &server,
        "/api/dashboard/eth?metrics=twitter_post&toggle=trading_volume&days=2",
    )
    .await;

    assert_eq!(dashboard.selection, vec!["twitter_post", "trading_volume"]);
    assert_eq!(dashboard.chart.data.len(), 3);
    let volume = dashboard.chart.data[2]["trading_volume"].as_i64().unwrap();
    assert!((100_000..=10_000_000).contains(&volume));
}

#[tokio::test]
async fn http_seeded_renders_repeat() {
    let server = shared_server().await;
    let first = fetch_dashboard(&server, "/api/dashboard/demo?days=10").await;
    let second = fetch_dashboard(&server, "/api/dashboard/demo?days=10").await;
    assert_eq!(first.chart.data, second.chart.data);
}

#[tokio::test]
async fn http_rejects_unknown_metric_and_large_day_count() {
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/dashboard/demo?toggle=orkut_user", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.text().await.unwrap().contains("orkut_user"));

    let response = client
        .get(format!("{}/api/dashboard/demo?days=100000", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_root_redirects_to_default_project() {
    let server = shared_server().await;
    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    let response = client.get(format!("{}/", server.base_url)).send().await.unwrap();
    assert!(response.status().is_redirection());
    let location = response
        .headers()
        .get(reqwest::header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap();
    assert_eq!(location, "/dashboard/demo");
}

#[tokio::test]
async fn http_page_renders_html() {
    let server = shared_server().await;
    let response = Client::new()
        .get(format!("{}/dashboard/my%20project?metrics=return", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let html = response.text().await.unwrap();
    assert!(html.contains("My Project Tableau de bord"));
    assert_eq!(html.matches(r#"class="toggle active""#).count(), 1);
}
