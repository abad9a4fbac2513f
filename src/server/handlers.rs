use std::io::ErrorKind;
use std::sync::Arc;

use axum::extract::{Form, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::models::FetchRequest;
use crate::api::{fetch_all, parse_video_url};
use crate::data::{is_export_file_name, output_file_name, records_to_pretty_json, save_records_json};
use crate::server::{html, ServerConfig};
use crate::utils::log;

/// `/fetch_comments` 폼 입력
#[derive(Debug, Deserialize)]
pub struct FetchCommentsForm {
    pub url: Option<String>,
}

/// `/save_comments` 폼 입력
#[derive(Debug, Deserialize)]
pub struct SaveCommentsForm {
    pub file_name: Option<String>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    let body = ErrorResponse {
        error: error.into(),
    };
    (status, Json(body)).into_response()
}

pub async fn index() -> Html<String> {
    Html(html::render_index_page())
}

pub async fn fetch_comments(
    State(config): State<Arc<ServerConfig>>,
    Form(form): Form<FetchCommentsForm>,
) -> Response {
    let Some(url) = form.url.filter(|url| !url.trim().is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "URL is required");
    };

    let target = match parse_video_url(&url) {
        Ok(target) => target,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    log(format!(
        "fetch_comments: base_url={} video_id={}",
        target.base_url, target.video_id
    ));

    let req = FetchRequest::new(target.base_url, target.video_id.clone(), config.duration)
        .with_interval(config.interval);

    let records = match fetch_all(&req).await {
        Ok(records) => records,
        Err(e) => {
            log(format!("fetch_comments() fetch error: {:?}", e));
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
        }
    };

    if let Err(e) = save_records_json(&records, &config.output_dir, &target.video_id).await {
        log(format!("fetch_comments() save error: {:?}", e));
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
    }

    let pretty_json = match records_to_pretty_json(&records) {
        Ok(json) => json,
        Err(e) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };

    let file_name = output_file_name(&target.video_id);
    Html(html::render_comments_page(&pretty_json, &file_name)).into_response()
}

pub async fn save_comments(
    State(config): State<Arc<ServerConfig>>,
    Form(form): Form<SaveCommentsForm>,
) -> Response {
    let Some(file_name) = form.file_name.filter(|name| is_export_file_name(name)) else {
        return error_response(StatusCode::BAD_REQUEST, "A valid file_name is required");
    };

    let path = config.output_dir.join(&file_name);
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return error_response(StatusCode::NOT_FOUND, format!("{} not found", file_name));
        }
        Err(e) => {
            log(format!("save_comments() read error for {:?}: {:?}", path, e));
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
        }
    };

    (
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        bytes,
    )
        .into_response()
}
