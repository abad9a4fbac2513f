use chrono::Utc;
use color_eyre::eyre::{eyre, Context, Result};
use futures::future::join_all;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::api::json::extract_comments;
use crate::api::models::{CommentRecord, FetchRequest, TimeWindow};
use crate::utils::log;

/// ====== 구간 계산 ======

/// `[0, duration)`을 `interval` 크기로 자릅니다.
/// 마지막 구간의 `end`는 `duration`을 넘을 수 있고 그대로 업스트림에 넘깁니다.
pub fn time_windows(duration: u64, interval: u64) -> Vec<TimeWindow> {
    if interval == 0 {
        return Vec::new();
    }

    (0..duration)
        .step_by(interval as usize)
        .map(|start| TimeWindow {
            start,
            end: start + interval,
        })
        .collect()
}

/// 캐시 무효화용 `__n` 값 (현재 시각, ms)
pub fn current_nonce() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn history_url(base_url: &str, video_id: &str, window: &TimeWindow, nonce: i64) -> String {
    format!(
        "{}/userajax.php?c=history&m={}&f={}&t={}&format=json&__n={}&b=0&l=50",
        base_url, video_id, window.start, window.end, nonce
    )
}

/// 한 번의 수집 동안 모든 구간이 함께 쓰는 HTTP 클라이언트
pub fn build_client() -> Result<Client> {
    Client::builder()
        .user_agent("Mozilla")
        .build()
        .context("Failed to build HTTP client")
}

/// ====== HTTP 함수들 ======

/// 구간 하나를 가져옵니다. 어떤 실패든 로그만 남기고 빈 목록을 돌려줍니다.
pub async fn fetch_window(client: &Client, url: &str) -> Vec<CommentRecord> {
    match try_fetch_window(client, url).await {
        Ok(records) => records,
        Err(e) => {
            log(format!("fetchWindow() error for {}: {:?}", url, e));
            Vec::new()
        }
    }
}

async fn try_fetch_window(client: &Client, url: &str) -> Result<Vec<CommentRecord>> {
    let resp = client.get(url).send().await?;

    let status = resp.status();
    if status != StatusCode::OK {
        log(format!("fetchWindow() HTTP error {} for {}", status, url));
        return Ok(Vec::new());
    }

    let is_json = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));

    // 일부 응답은 JSON 본문을 text/plain 등으로 보내므로 텍스트로 받아 직접 파싱
    let body: Value = if is_json {
        resp.json()
            .await
            .with_context(|| format!("fetchWindow() JSON parse error for {}", url))?
    } else {
        let text = resp.text().await?;
        serde_json::from_str(&text)
            .with_context(|| format!("fetchWindow() text body is not JSON for {}", url))?
    };

    Ok(extract_comments(&body))
}

/// 전체 구간을 동시에 요청하고 구간 순서대로 이어 붙입니다.
pub async fn fetch_all(req: &FetchRequest) -> Result<Vec<CommentRecord>> {
    fetch_all_with_progress(req, |_, _| {}).await
}

/// `fetch_all`과 같고, 구간 하나가 끝날 때마다 `on_window_done(구간, 댓글 수)`을 호출합니다.
/// 콜백 호출 순서는 완료 순서이며 결과 순서에는 영향이 없습니다.
pub async fn fetch_all_with_progress<F>(
    req: &FetchRequest,
    on_window_done: F,
) -> Result<Vec<CommentRecord>>
where
    F: Fn(&TimeWindow, usize),
{
    if req.interval == 0 {
        return Err(eyre!("interval must be greater than 0"));
    }

    let windows = time_windows(req.duration, req.interval);
    let client = build_client()?;

    log(format!(
        "Fetching history: video_id={} windows={} interval={}s",
        req.video_id,
        windows.len(),
        req.interval
    ));

    // nonce는 구간마다 요청을 만드는 시점에 따로 잡는다
    let futures: Vec<_> = windows
        .iter()
        .map(|window| {
            let url = history_url(&req.base_url, &req.video_id, window, current_nonce());
            let client = &client;
            let on_window_done = &on_window_done;
            async move {
                let records = fetch_window(client, &url).await;
                on_window_done(window, records.len());
                records
            }
        })
        .collect();

    // join_all은 완료 순서와 관계없이 입력 순서대로 결과를 돌려준다
    let results = join_all(futures).await;
    let records: Vec<CommentRecord> = results.into_iter().flatten().collect();

    log(format!(
        "Fetched history: video_id={} comments={}",
        req.video_id,
        records.len()
    ));

    Ok(records)
}
