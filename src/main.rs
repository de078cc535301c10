use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};

use math_solver::utils::logging;
use math_solver::{App, Backend, Config, ProblemInput, RequestState};

/// 数学解题助手：提交题目图片或文本，输出格式化的解题过程
#[derive(Debug, Parser)]
#[command(version, about)]
#[command(group(ArgGroup::new("problem").required(true).args(["image", "text"])))]
struct Args {
    /// 题目图片（png / jpg / jpeg / gif）
    #[arg(long, value_name = "FILE")]
    image: Option<PathBuf>,

    /// 图片的补充说明
    #[arg(long, value_name = "TEXT", requires = "image")]
    comment: Option<String>,

    /// 题目文本
    #[arg(long, value_name = "TEXT")]
    text: Option<String>,

    /// 解题后端
    #[arg(long, value_enum, default_value_t = Backend::Http)]
    backend: Backend,

    /// 配置文件（TOML）
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// 输出的 HTML 页面
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,

    /// 输出详细日志
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // 加载配置
    let mut config = Config::load(args.config.as_deref()).context("加载配置失败")?;
    if let Some(out) = &args.out {
        config.output_html = out.display().to_string();
    }
    config.verbose_logging |= args.verbose;

    // 初始化日志
    logging::init(config.verbose_logging);

    let input = match args.image {
        Some(path) => ProblemInput::Image {
            path,
            comment: args.comment.unwrap_or_default(),
        },
        None => ProblemInput::Text(args.text.unwrap_or_default()),
    };

    // 初始化并运行应用
    let state = App::initialize(config, args.backend).run(input).await?;

    Ok(match state {
        RequestState::Success => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}
