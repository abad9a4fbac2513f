use serde_json::Value;

use crate::api::models::CommentRecord;

/// 중첩된 object를 키 순서대로 따라갑니다.
/// 중간에 키가 없거나 object가 아니면 `None`을 돌려줍니다.
pub fn value_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.as_object()?.get(*key))
}

/// `root.history.events` 목록. 어느 단계든 없으면 빈 슬라이스.
pub fn history_events(root: &Value) -> &[Value] {
    value_at(root, &["history", "events"])
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// 키가 있고 값이 null이 아닐 때만 돌려줍니다.
fn present<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    value_at(value, path).filter(|v| !v.is_null())
}

/// 이벤트 하나에서 댓글을 꺼냅니다.
/// `comment.createdAt`, `comment.message`, `timeMillis`가 모두 있고 null이 아니어야 합니다.
/// 값의 타입은 보지 않으며 `timeMillis == 0`도 유효한 값입니다.
pub fn extract_comment(event: &Value) -> Option<CommentRecord> {
    let created_at = present(event, &["comment", "createdAt"])?;
    let message = present(event, &["comment", "message"])?;
    let time_millis = present(event, &["timeMillis"])?;

    Some(CommentRecord {
        message: message.clone(),
        created_at: created_at.clone(),
        time_millis: time_millis.clone(),
    })
}

/// 응답 본문 전체에서 댓글 목록을 추출합니다 (원본 순서 유지).
pub fn extract_comments(root: &Value) -> Vec<CommentRecord> {
    history_events(root)
        .iter()
        .filter_map(extract_comment)
        .collect()
}
