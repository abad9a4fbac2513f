pub mod handlers;
pub mod html;

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use color_eyre::eyre::{Context, Result};
use tokio::net::TcpListener;

use crate::api::models::DEFAULT_INTERVAL_SECS;
use crate::utils::log;

/// 한 번의 요청에서 수집하는 영상 길이 (8시간)
pub const VIDEO_DURATION_SECS: u64 = 28800;

pub const DEFAULT_ADDR: &str = "0.0.0.0:5000";

/// 프로세스 시작 시 한 번 만들어 핸들러에 공유하는 서버 설정
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: String,
    pub duration: u64,
    pub interval: u64,
    /// 내보내기 JSON 파일을 쓰고 다운로드할 디렉토리
    pub output_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            duration: VIDEO_DURATION_SECS,
            interval: DEFAULT_INTERVAL_SECS,
            output_dir: PathBuf::from("."),
        }
    }
}

impl ServerConfig {
    /// CLI 인자 > 환경 변수(`COMMENTS_ADDR`, `COMMENTS_OUTPUT_DIR`) > 기본값
    pub fn resolve(addr: Option<String>, output_dir: Option<PathBuf>) -> Self {
        let defaults = Self::default();

        let addr = addr
            .or_else(|| env::var("COMMENTS_ADDR").ok())
            .unwrap_or(defaults.addr);

        let output_dir = output_dir
            .or_else(|| env::var("COMMENTS_OUTPUT_DIR").ok().map(PathBuf::from))
            .unwrap_or(defaults.output_dir);

        Self {
            addr,
            output_dir,
            ..defaults
        }
    }
}

pub fn create_router(config: Arc<ServerConfig>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/fetch_comments", post(handlers::fetch_comments))
        .route("/save_comments", post(handlers::save_comments))
        .with_state(config)
}

pub async fn run_server(config: ServerConfig) -> Result<()> {
    let listener = TcpListener::bind(&config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;

    log(format!(
        "Comment fetch server listening on http://{} (output_dir={:?})",
        config.addr, config.output_dir
    ));

    axum::serve(listener, create_router(Arc::new(config)))
        .await
        .context("Comment fetch server stopped")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::IntoResponse;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn test_config(name: &str) -> ServerConfig {
        let output_dir = std::env::temp_dir().join(format!(
            "twitcasting-comments-server-{}-{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&output_dir).unwrap();

        ServerConfig {
            addr: "127.0.0.1:0".to_string(),
            duration: 600,
            interval: 300,
            output_dir,
        }
    }

    fn form_request(uri: &str, pairs: &[(&str, &str)]) -> Request<Body> {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();

        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_string(resp: axum::response::Response) -> String {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn spawn_upstream() -> String {
        let router = Router::new().route(
            "/userajax.php",
            get(|| async {
                let body = json!({
                    "history": {
                        "events": [
                            { "comment": { "createdAt": "t1", "message": "hi" }, "timeMillis": 5 }
                        ]
                    }
                });
                ([(header::CONTENT_TYPE, "application/json")], body.to_string()).into_response()
            }),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_resolve_prefers_cli_values() {
        let config = ServerConfig::resolve(
            Some("127.0.0.1:9999".to_string()),
            Some(PathBuf::from("/tmp/out")),
        );
        assert_eq!(config.addr, "127.0.0.1:9999");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.duration, VIDEO_DURATION_SECS);
        assert_eq!(config.interval, DEFAULT_INTERVAL_SECS);
    }

    #[tokio::test]
    async fn test_index_renders_form() {
        let app = create_router(Arc::new(test_config("index")));
        let resp = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_string(resp).await;
        assert!(body.contains(r#"action="/fetch_comments""#));
        assert!(body.contains(r#"name="url""#));
    }

    #[tokio::test]
    async fn test_fetch_comments_requires_url() {
        let config = Arc::new(test_config("missing-url"));

        for pairs in [&[][..], &[("url", "")][..]] {
            let resp = create_router(config.clone())
                .oneshot(form_request("/fetch_comments", pairs))
                .await
                .unwrap();

            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: Value = serde_json::from_str(&body_string(resp).await).unwrap();
            assert_eq!(body, json!({ "error": "URL is required" }));
        }
    }

    #[tokio::test]
    async fn test_fetch_comments_rejects_unparseable_url() {
        let app = create_router(Arc::new(test_config("bad-url")));
        let resp = app
            .oneshot(form_request("/fetch_comments", &[("url", "not a url")]))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_fetch_then_save_comments() {
        let base_url = spawn_upstream().await;
        let config = Arc::new(test_config("flow"));
        let video_url = format!("{}/someone/movie/777", base_url);

        let resp = create_router(config.clone())
            .oneshot(form_request("/fetch_comments", &[("url", video_url.as_str())]))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let page = body_string(resp).await;
        assert!(page.contains("&quot;message&quot;: &quot;hi&quot;"));
        assert!(page.contains(r#"value="extracted_data_777.json""#));

        let saved_path = config.output_dir.join("extracted_data_777.json");
        let saved: Value = serde_json::from_str(&fs::read_to_string(&saved_path).unwrap()).unwrap();
        let record = json!({ "message": "hi", "createdAt": "t1", "timeMillis": 5 });
        assert_eq!(saved, json!([record.clone(), record]));

        let resp = create_router(config.clone())
            .oneshot(form_request(
                "/save_comments",
                &[("file_name", "extracted_data_777.json")],
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let disposition = resp
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment"));
        assert!(disposition.contains("extracted_data_777.json"));
        let downloaded: Value = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(downloaded, saved);

        fs::remove_file(saved_path).ok();
    }

    #[tokio::test]
    async fn test_fetch_comments_reports_write_failure() {
        let base_url = spawn_upstream().await;
        let mut config = test_config("write-failure");
        config.output_dir = config.output_dir.join("missing").join("dir");
        let video_url = format!("{}/someone/movie/888", base_url);

        let resp = create_router(Arc::new(config))
            .oneshot(form_request("/fetch_comments", &[("url", video_url.as_str())]))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_save_comments_rejects_foreign_files() {
        let config = Arc::new(test_config("save"));

        let resp = create_router(config.clone())
            .oneshot(form_request("/save_comments", &[("file_name", "../Cargo.toml")]))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = create_router(config.clone())
            .oneshot(form_request("/save_comments", &[]))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = create_router(config)
            .oneshot(form_request(
                "/save_comments",
                &[("file_name", "extracted_data_does_not_exist.json")],
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
