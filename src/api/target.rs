use color_eyre::eyre::{eyre, Context, Result};
use url::Url;

use crate::api::models::VideoTarget;

/// 영상 페이지 URL에서 `base_url`(scheme://host[:port])과 `video_id`(마지막 path 조각)를 뽑습니다.
/// 예: `https://twitcasting.tv/someone/movie/123` -> (`https://twitcasting.tv`, `123`)
pub fn parse_video_url(raw: &str) -> Result<VideoTarget> {
    let url = Url::parse(raw.trim()).with_context(|| format!("Invalid video URL: {}", raw))?;

    // history 요청은 HTTP로만 보낸다
    if !matches!(url.scheme(), "http" | "https") {
        return Err(eyre!("Unsupported video URL scheme: {}", raw));
    }

    let host = url
        .host_str()
        .ok_or_else(|| eyre!("Video URL has no host: {}", raw))?;

    let base_url = match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    };

    let video_id = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| eyre!("Video URL has no video id: {}", raw))?
        .to_string();

    Ok(VideoTarget { base_url, video_id })
}
