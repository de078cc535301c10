/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，未设置时按 `verbose` 选择 debug 或 info。
/// 日志写到 stderr，stdout 只留给解题结果。
///
/// # 参数
/// - `verbose`: 是否输出详细日志
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 重复初始化（例如测试中）直接忽略
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 应用配置
/// - `backend`: 解题后端名称
pub fn log_startup(config: &Config, backend: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 数学解题助手");
    info!("🧮 解题后端: {}", backend);
    match config.request_timeout() {
        Some(timeout) => info!("⏱️ 请求超时: {} 秒", timeout.as_secs()),
        None => info!("⏱️ 请求超时: 不限"),
    }
    info!("📄 输出页面: {}", config.output_html);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（字符数）
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
