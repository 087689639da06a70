use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use axum::extract::Request;
use axum::response::Response;
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer, MaxAge};
use tower_http::trace::{DefaultOnBodyChunk, DefaultOnEos, TraceLayer};
use tracing::Span;

use crate::global::Global;

pub mod error;
pub mod routes;

type RequestSpan = fn(&Request) -> Span;
type OnRequest = fn(&Request, &Span);
type OnResponse = fn(&Response, Duration, &Span);
type HeadlinesTraceLayer = TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    RequestSpan,
    OnRequest,
    OnResponse,
    DefaultOnBodyChunk,
    DefaultOnEos,
    (),
>;

fn request_span(req: &Request) -> Span {
    tracing::info_span!(
        "request",
        method = %req.method(),
        path = %req.uri().path(),
        status = tracing::field::Empty,
    )
}

fn on_request(req: &Request, _span: &Span) {
    tracing::debug!(method = %req.method(), uri = %req.uri(), "incoming request");
}

fn on_response(res: &Response, latency: Duration, span: &Span) {
    span.record("status", res.status().as_u16());
    tracing::info!(status = res.status().as_u16(), latency_ms = latency.as_millis() as u64, "served");
}

fn trace_layer() -> HeadlinesTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(request_span as RequestSpan)
        .on_request(on_request as OnRequest)
        .on_response(on_response as OnResponse)
        .on_failure(())
}

/// Headlines are read-only, so browsers only need `GET`.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(AllowMethods::list([hyper::Method::GET]))
        .allow_headers(AllowHeaders::any())
        .max_age(MaxAge::exact(Duration::from_secs(3600)))
}

fn router(global: Arc<Global>) -> Router {
    routes::routes()
        .fallback(not_found)
        .with_state(global)
        .layer(
            ServiceBuilder::new()
                .layer(CompressionLayer::new())
                .layer(trace_layer())
                .layer(cors_layer()),
        )
}

async fn not_found() -> error::ApiError {
    error::ApiError::not_found(error::ApiErrorCode::ROUTE_NOT_FOUND, "route not found")
}

/// Serves the headlines API on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, global: Arc<Global>, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(global))
        .with_graceful_shutdown(shutdown)
        .await
        .context("http server error")
}

#[tracing::instrument(name = "HTTP", skip_all)]
pub async fn run(global: Arc<Global>) -> anyhow::Result<()> {
    let bind = global.config.api.bind;

    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind HTTP server to {bind}"))?;

    tracing::info!(%bind, "http server listening");

    serve(listener, global, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for shutdown signal");
        }
        tracing::info!("shutting down http server");
    })
    .await
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use axum::routing::get;
    use axum::Json;
    use tracing_test::traced_test;

    use super::*;
    use crate::config::{ApiConfig, Config, ProviderConfig, RetryConfig};
    use crate::headlines::fallback;

    async fn serve_upstream(router: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        addr
    }

    fn config(upstream: SocketAddr) -> Config {
        Config {
            level: "info".to_string(),
            api: ApiConfig {
                bind: "127.0.0.1:0".parse().unwrap(),
                user_agent: "headlines-api-test".to_string(),
            },
            provider: ProviderConfig {
                base_url: format!("http://{upstream}/v2/top-headlines"),
                api_key: "test-key".to_string(),
                country: "us".to_string(),
                page_size: 20,
                timeout_ms: 1_000,
                max_body_bytes: 1024 * 1024,
                retry: RetryConfig {
                    max_retries: 0,
                    base_delay_ms: 10,
                    max_delay_ms: 10,
                    jitter: 0.0,
                },
            },
        }
    }

    async fn spawn_app(upstream: SocketAddr) -> SocketAddr {
        let global = Global::init(config(upstream)).unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(serve(listener, global, std::future::pending()));

        addr
    }

    async fn healthy_upstream() -> SocketAddr {
        serve_upstream(Router::new().route(
            "/v2/top-headlines",
            get(|| async {
                Json(serde_json::json!({
                    "status": "ok",
                    "totalResults": 1,
                    "articles": [{
                        "source": { "id": null, "name": "AP" },
                        "title": "Live headline",
                        "description": "From upstream",
                        "url": "https://example.org/live",
                        "urlToImage": null,
                        "publishedAt": "2024-05-01T10:00:00Z"
                    }]
                }))
            }),
        ))
        .await
    }

    #[tokio::test]
    #[traced_test]
    async fn test_serve_stops_on_shutdown_signal() {
        let upstream = healthy_upstream().await;
        let global = Global::init(config(upstream)).unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        let server = tokio::spawn(serve(listener, global, async {
            let _ = rx.await;
        }));

        let resp = reqwest::get(format!("http://{addr}/")).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        tx.send(()).unwrap();
        let result = tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .expect("server did not stop")
            .unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test]
    #[traced_test]
    async fn test_top_headlines_route() {
        let app = spawn_app(healthy_upstream().await).await;

        let body: serde_json::Value = reqwest::get(format!("http://{app}/news"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body["status"], "ok");
        assert_eq!(body["totalResults"], 1);
        assert_eq!(body["articles"][0]["title"], "Live headline");
    }

    #[tokio::test]
    #[traced_test]
    async fn test_category_route_falls_back() {
        let upstream = serve_upstream(Router::new()).await;
        let app = spawn_app(upstream).await;

        let resp = reqwest::get(format!("http://{app}/news/sports")).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["totalResults"], 5);
        assert_eq!(body["message"], fallback::FALLBACK_MESSAGE);
        assert_eq!(body["articles"][0]["source"]["name"], "ESPN");
        assert_eq!(body["articles"][0]["urlToImage"], fallback::PLACEHOLDER_IMAGE_URL);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_root_lists_endpoints() {
        let app = spawn_app(healthy_upstream().await).await;

        let body: serde_json::Value = reqwest::get(format!("http://{app}/"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        let endpoints: Vec<_> = body["endpoints"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(
            endpoints,
            ["/news", "/news/business", "/news/health", "/news/sports", "/news/technology"]
        );
    }

    #[tokio::test]
    #[traced_test]
    async fn test_unknown_route_is_404() {
        let app = spawn_app(healthy_upstream().await).await;

        let resp = reqwest::get(format!("http://{app}/nope/at/all")).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["error_code"], 404);
        assert_eq!(body["error"], "route not found");
        assert_eq!(body["status"], "Not Found");
    }
}
