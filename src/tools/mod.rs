//! 工具模块集合
//!
//! 包含CLI、文件扫描、操作执行、格式化等工具模块，支持main.rs的流程控制。

pub mod cli;
pub mod constants;
pub mod formatter;
pub mod processor;
pub mod scanner;
pub mod utils;

// 重新导出主要的公共接口
pub use cli::{AppConfig, Operation, OutputFormat, parse_args};
pub use formatter::{AnalyzeReport, BatchAnalyzeReport, FileMetrics, Report, render_report};
pub use processor::{analyze_path, run_operation};
pub use scanner::scan_audio_files;
