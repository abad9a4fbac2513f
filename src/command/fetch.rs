use std::path::PathBuf;

use color_eyre::eyre::{eyre, Result};

use crate::api::models::FetchRequest;
use crate::api::{client, fetch_all_with_progress, parse_video_url};
use crate::data::save_records_json;
use crate::utils;

/// 댓글 수집 옵션
#[derive(structopt::StructOpt, Debug)]
pub struct FetchOpt {
    /// 영상 페이지 URL (예: https://twitcasting.tv/someone/movie/123)
    #[structopt(long)]
    pub url: String,

    /// 수집할 영상 길이 (초)
    #[structopt(long, default_value = "28800")]
    pub duration: u64,

    /// 요청 하나가 담당하는 구간 크기 (초)
    #[structopt(long, default_value = "300")]
    pub interval: u64,

    /// JSON 파일을 저장할 디렉토리
    #[structopt(long, parse(from_os_str), default_value = ".")]
    pub output_dir: PathBuf,
}

/// 웹 폼 없이 한 영상의 댓글을 수집하여 파일로 저장합니다.
pub async fn run_fetch(opts: &FetchOpt) -> Result<PathBuf> {
    if opts.interval == 0 {
        return Err(eyre!("interval은 0보다 커야 합니다"));
    }

    let target = parse_video_url(&opts.url)?;
    utils::log(format!(
        "댓글 수집 시작: base_url={} video_id={}",
        target.base_url, target.video_id
    ));

    let req = FetchRequest::new(target.base_url, target.video_id.clone(), opts.duration)
        .with_interval(opts.interval);

    let total = client::time_windows(req.duration, req.interval).len() as u64;
    let pb = utils::create_progress_bar(total, "history 구간 수집 중");

    let records = fetch_all_with_progress(&req, |_, _| pb.inc(1)).await?;
    pb.finish_with_message(format!("{}개 댓글", records.len()));

    save_records_json(&records, &opts.output_dir, &target.video_id).await
}
