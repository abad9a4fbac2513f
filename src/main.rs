use std::path::PathBuf;

use color_eyre::eyre::Result;
use mimalloc::MiMalloc;
use structopt::StructOpt;

mod api;
mod command;
mod data;
mod server;
mod utils;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// ====== CLI 구조체 ======

#[derive(StructOpt, Debug)]
#[structopt(name = "twitcasting-comments", about = "트윗캐스팅 댓글 수집기")]
pub enum Opt {
    /// 웹 폼 서버 모드
    #[structopt(name = "serve")]
    Serve(ServeOpt),

    /// 단일 영상 댓글 수집 모드
    #[structopt(name = "fetch")]
    Fetch(command::fetch::FetchOpt),
}

/// 웹 폼 서버 모드 옵션
#[derive(StructOpt, Debug)]
pub struct ServeOpt {
    /// 바인드 주소 (기본값: COMMENTS_ADDR 또는 0.0.0.0:5000)
    #[structopt(long)]
    pub addr: Option<String>,

    /// JSON 파일 저장 디렉토리 (기본값: COMMENTS_OUTPUT_DIR 또는 현재 디렉토리)
    #[structopt(long, parse(from_os_str))]
    pub output_dir: Option<PathBuf>,
}

/// ====== 엔트리포인트 ======

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let opt = Opt::from_args();

    match opt {
        Opt::Serve(opts) => run_serve(opts).await?,
        Opt::Fetch(opts) => {
            command::fetch::run_fetch(&opts).await?;
        }
    }

    Ok(())
}

/// 웹 폼 서버 모드 실행
async fn run_serve(opts: ServeOpt) -> Result<()> {
    let config = server::ServerConfig::resolve(opts.addr, opts.output_dir);
    utils::log("웹 폼 서버 모드 시작");
    server::run_server(config).await
}
