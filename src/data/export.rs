use std::path::{Path, PathBuf};

use color_eyre::eyre::{Context, Result};

use crate::api::models::CommentRecord;
use crate::utils;

const FILE_PREFIX: &str = "extracted_data_";
const FILE_SUFFIX: &str = ".json";

/// `extracted_data_{video_id}.json`
pub fn output_file_name(video_id: &str) -> String {
    format!("{}{}{}", FILE_PREFIX, video_id, FILE_SUFFIX)
}

/// 다운로드 요청으로 들어온 파일 이름이 우리가 쓴 내보내기 파일 형식인지 확인합니다.
/// 경로 구분자나 `..`가 섞인 이름은 거부합니다.
pub fn is_export_file_name(name: &str) -> bool {
    let Some(video_id) = name
        .strip_prefix(FILE_PREFIX)
        .and_then(|rest| rest.strip_suffix(FILE_SUFFIX))
    else {
        return false;
    };

    !video_id.is_empty()
        && !name.contains("..")
        && !name.contains(['/', '\\'])
}

/// 댓글 목록을 보기 좋게 들여쓴 JSON 문자열로 만듭니다 (한글 등은 그대로 유지).
pub fn records_to_pretty_json(records: &[CommentRecord]) -> Result<String> {
    serde_json::to_string_pretty(records).context("Failed to serialize comments to JSON")
}

/// 댓글 목록을 `dir/extracted_data_{video_id}.json`에 저장하고 경로를 돌려줍니다.
pub async fn save_records_json<P: AsRef<Path>>(
    records: &[CommentRecord],
    dir: P,
    video_id: &str,
) -> Result<PathBuf> {
    let output_path = dir.as_ref().join(output_file_name(video_id));

    // JSON 파일로 저장
    let json_string = records_to_pretty_json(records)?;
    tokio::fs::write(&output_path, json_string)
        .await
        .with_context(|| format!("Failed to write JSON file: {:?}", output_path))?;

    utils::log(format!(
        "댓글 저장 완료: {}개, 파일: {:?}",
        records.len(),
        output_path
    ));

    Ok(output_path)
}
