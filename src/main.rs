//! mastering-cli - 主程序入口
//!
//! 纯流程控制器：解析参数 → 执行操作 → 输出JSON；失败时写stderr并以非零码退出。

use anyhow::{Context, Result};
use mastering_cli::{
    error::{ErrorCategory, MasteringError, error_headline},
    ffmpeg::FfmpegSession,
    tools::{self, AppConfig},
};
use std::process;
use tracing_subscriber::EnvFilter;

/// 未归类错误的退出码
const GENERAL_ERROR: i32 = 1;

/// 初始化日志：写入stderr，stdout只留给结果
fn init_logging(config: &AppConfig) -> Result<()> {
    let default_directive = if config.verbose {
        "mastering_cli=debug"
    } else {
        "mastering_cli=warn"
    };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directive)
            .context("Invalid log filter / 日志过滤规则无效")?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to initialise logging / 日志初始化失败")
}

/// 错误处理和建议
fn handle_error(error: anyhow::Error) -> ! {
    eprintln!("{}", error_headline(&error));

    let exit_code = match error.downcast_ref::<MasteringError>() {
        Some(e) => {
            let category = ErrorCategory::from_error(e);
            eprintln!("[INFO] 类别 / Category: {}", category.display_name());
            eprintln!("[INFO] 建议 / Suggestion: {}", category.suggestion());
            category.exit_code()
        }
        None => GENERAL_ERROR,
    };

    process::exit(exit_code);
}

/// 应用程序主逻辑
fn run() -> Result<()> {
    let config = tools::parse_args();
    init_logging(&config)?;

    let session = FfmpegSession::system(config.toolchain.clone());
    let report = tools::run_operation(&session, &config.operation)?;
    println!("{}", tools::render_report(&report, config.format)?);
    Ok(())
}

fn main() {
    if let Err(error) = run() {
        handle_error(error);
    }
}
