//! mastering-cli
//!
//! 以外部 ffmpeg/ffprobe 为引擎的音频分析与母带处理工具。
//!
//! ## 核心特性
//! - analyze：loudnorm 测量积分响度、真峰值，ffprobe 读取采样率/位深
//! - master：压缩 → 低/高架EQ → 限幅 滤镜链渲染 24-bit PCM，并复测成品
//! - 所有DSP均由 ffmpeg 完成，本库只拼装命令行并解析输出
//! - 结果以单个JSON文档输出到 stdout

pub mod core;
pub mod error;
pub mod ffmpeg;
pub mod tools;

// 重新导出核心类型
pub use crate::core::{AudioMetrics, MasterReport, MasterRequest};
pub use error::{ErrorCategory, MasteringError, MasteringResult};
pub use ffmpeg::{FfmpegSession, MasteringParams, SystemRunner, ToolRunner, Toolchain};
