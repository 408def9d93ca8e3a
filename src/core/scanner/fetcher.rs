// src/core/scanner/fetcher.rs

use std::error::Error as _;
use std::future::Future;
use std::time::Duration;

use reqwest::redirect::Policy;
use tracing::{debug, error, info};

use crate::core::models::{FetchResult, HeaderSet};

/// Performs the single outbound request of a scan.
///
/// Implementations must never fail with an error type of their own: every
/// transport problem is reported as `FetchResult::Failure`.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &str) -> impl Future<Output = FetchResult> + Send;
}

/// Transport settings for `HttpFetcher`.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Upper bound for the whole request, redirects included.
    pub timeout: Duration,
    /// Redirects to follow before giving up; 0 disables following.
    pub max_redirects: usize,
    pub user_agent: String,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub use_system_proxy: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            max_redirects: 10,
            user_agent: format!("SiteScan/{}", env!("CARGO_PKG_VERSION")),
            use_system_proxy: true,
        }
    }
}

/// `Fetcher` backed by a `reqwest::Client`.
///
/// The client (and its connection pool) is shared by every scan made through
/// this fetcher; it is cheap to clone and safe to use concurrently.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        let redirect = if config.max_redirects == 0 {
            Policy::none()
        } else {
            Policy::limited(config.max_redirects)
        };

        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .redirect(redirect);
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        let client = builder.build()?;
        debug!(timeout = ?config.timeout, max_redirects = config.max_redirects, "HTTP client ready.");
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult {
        info!(url, "Fetching target.");
        match self.client.get(url).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                if response.url().as_str() != url {
                    debug!(final_url = %response.url(), "Response came from a redirect target.");
                }
                info!(status, "Received HTTP response.");
                FetchResult::Success {
                    status,
                    headers: HeaderSet::from(response.headers().clone()),
                }
            }
            Err(e) => {
                let reason = describe_error(&e);
                error!(url, error = %reason, "HTTP request failed.");
                FetchResult::Failure { reason }
            }
        }
    }
}

/// Flattens a reqwest error and its sources into one diagnostic line,
/// prefixed with the kind of failure.
fn describe_error(err: &reqwest::Error) -> String {
    let kind = if err.is_timeout() {
        "timeout"
    } else if err.is_connect() {
        "connect"
    } else if err.is_redirect() {
        "redirect"
    } else if err.is_builder() {
        "invalid request"
    } else {
        "request"
    };

    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    format!("{kind}: {message}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, http::StatusCode, response::Redirect, routing::get};
    use std::net::SocketAddr;
    use tokio::net::TcpListener;

    fn test_config() -> FetchConfig {
        FetchConfig {
            timeout: Duration::from_secs(5),
            use_system_proxy: false,
            ..FetchConfig::default()
        }
    }

    async fn spawn_target() -> SocketAddr {
        let router = Router::new()
            .route(
                "/",
                get(|| async {
                    (
                        [("Content-Security-Policy", "default-src 'self'"), ("X-Frame-Options", "DENY")],
                        "hello",
                    )
                }),
            )
            .route("/missing", get(|| async { (StatusCode::NOT_FOUND, "not here") }))
            .route("/moved", get(|| async { Redirect::temporary("/") }))
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(3)).await;
                    "late"
                }),
            );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    #[tokio::test]
    async fn success_exposes_status_and_headers() {
        let addr = spawn_target().await;
        let fetcher = HttpFetcher::new(&test_config()).unwrap();

        match fetcher.fetch(&format!("http://{addr}/")).await {
            FetchResult::Success { status, headers } => {
                assert_eq!(status, 200);
                assert!(headers.contains("content-security-policy"));
                assert!(headers.contains("X-FRAME-OPTIONS"));
                assert!(!headers.contains("strict-transport-security"));
            }
            FetchResult::Failure { reason } => panic!("unexpected failure: {reason}"),
        }
    }

    #[tokio::test]
    async fn error_status_is_still_a_success() {
        let addr = spawn_target().await;
        let fetcher = HttpFetcher::new(&test_config()).unwrap();

        let result = fetcher.fetch(&format!("http://{addr}/missing")).await;
        assert!(matches!(result, FetchResult::Success { status: 404, .. }));
    }

    #[tokio::test]
    async fn redirects_are_followed_by_default() {
        let addr = spawn_target().await;
        let fetcher = HttpFetcher::new(&test_config()).unwrap();

        match fetcher.fetch(&format!("http://{addr}/moved")).await {
            FetchResult::Success { status, headers } => {
                assert_eq!(status, 200);
                assert!(headers.contains("x-frame-options"));
            }
            FetchResult::Failure { reason } => panic!("unexpected failure: {reason}"),
        }
    }

    #[tokio::test]
    async fn redirects_can_be_disabled() {
        let addr = spawn_target().await;
        let config = FetchConfig { max_redirects: 0, ..test_config() };
        let fetcher = HttpFetcher::new(&config).unwrap();

        let result = fetcher.fetch(&format!("http://{addr}/moved")).await;
        assert!(matches!(result, FetchResult::Success { status: 307, .. }));
    }

    #[tokio::test]
    async fn slow_target_times_out() {
        let addr = spawn_target().await;
        let config = FetchConfig { timeout: Duration::from_millis(200), ..test_config() };
        let fetcher = HttpFetcher::new(&config).unwrap();

        match fetcher.fetch(&format!("http://{addr}/slow")).await {
            FetchResult::Failure { reason } => assert!(reason.starts_with("timeout"), "{reason}"),
            FetchResult::Success { .. } => panic!("slow target should time out"),
        }
    }

    #[tokio::test]
    async fn refused_connection_is_a_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let fetcher = HttpFetcher::new(&test_config()).unwrap();

        let result = fetcher.fetch(&format!("http://{addr}/")).await;
        assert!(matches!(result, FetchResult::Failure { .. }));
    }

    #[tokio::test]
    async fn url_without_scheme_is_a_failure() {
        let fetcher = HttpFetcher::new(&test_config()).unwrap();
        let result = fetcher.fetch("example.com").await;
        assert!(matches!(result, FetchResult::Failure { .. }));
    }
}
