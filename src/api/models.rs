use serde::Serialize;
use serde_json::Value;

/// 한 번의 history 요청이 담당하는 구간 크기 (초)
pub const DEFAULT_INTERVAL_SECS: u64 = 300;

/// ====== 요청 단위 구조체들 ======

/// history 요청 하나가 담당하는 시간 구간 `[start, end)` (초 단위)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: u64,
    pub end: u64,
}

/// 영상 하나에 대한 전체 수집 요청
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// scheme + host (예: `https://twitcasting.tv`)
    pub base_url: String,
    pub video_id: String,
    pub duration: u64,
    pub interval: u64,
}

impl FetchRequest {
    pub fn new(base_url: impl Into<String>, video_id: impl Into<String>, duration: u64) -> Self {
        Self {
            base_url: base_url.into(),
            video_id: video_id.into(),
            duration,
            interval: DEFAULT_INTERVAL_SECS,
        }
    }

    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval;
        self
    }
}

/// 영상 페이지 URL에서 뽑아낸 요청 대상
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoTarget {
    pub base_url: String,
    pub video_id: String,
}

/// ====== 응답에서 추출한 댓글 ======

/// 세 필드 모두 업스트림이 준 값을 타입 변환 없이 그대로 넘긴다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentRecord {
    pub message: Value,
    #[serde(rename = "createdAt")]
    pub created_at: Value,
    #[serde(rename = "timeMillis")]
    pub time_millis: Value,
}
