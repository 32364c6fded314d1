//! FFmpeg桥接层
//!
//! 所有真正的DSP都在外部 ffmpeg 进程中完成；本模块只负责拼装命令行、
//! 调用进程并解析其输出。

pub mod filter_chain;
pub mod json_fields;
pub mod loudnorm;
pub mod probe;
pub mod runner;

pub use filter_chain::{MasteringParams, build_filter_chain, db_to_amplitude};
pub use loudnorm::{LoudnormStats, parse_loudnorm_output};
pub use probe::{StreamProbe, parse_probe_output};
pub use runner::{ProcessOutput, SystemRunner, ToolRunner, Toolchain, log_head, log_tail};

use crate::error::{MasteringResult, tool_failed};
use crate::tools::constants::process::RENDER_CODEC;
use crate::tools::utils::path_arg;
use std::path::Path;
use tracing::{debug, info};

/// 母带渲染命令参数（不含程序名）
pub fn render_args(input: &str, output: &str, filter_chain: &str) -> Vec<String> {
    [
        "-hide_banner",
        "-y",
        "-nostdin",
        "-i",
        input,
        "-acodec",
        RENDER_CODEC,
        "-af",
        filter_chain,
        output,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// 一次CLI调用期间使用的 ffmpeg/ffprobe 会话
pub struct FfmpegSession<R: ToolRunner = SystemRunner> {
    runner: R,
    toolchain: Toolchain,
}

impl FfmpegSession<SystemRunner> {
    pub fn system(toolchain: Toolchain) -> Self {
        Self::new(SystemRunner, toolchain)
    }
}

impl<R: ToolRunner> FfmpegSession<R> {
    pub fn new(runner: R, toolchain: Toolchain) -> Self {
        Self { runner, toolchain }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// 确认 ffmpeg 与 ffprobe 均可执行
    pub fn ensure_binaries(&self) -> MasteringResult<()> {
        self.toolchain.ensure_available(&self.runner)
    }

    /// 用给定滤镜链渲染母带文件（24-bit PCM）
    pub fn render(&self, input: &Path, output: &Path, filter_chain: &str) -> MasteringResult<()> {
        let args = render_args(&path_arg(input)?, &path_arg(output)?, filter_chain);
        debug!(filter_chain, "rendering master");

        let result = self.runner.run(&self.toolchain.ffmpeg, &args)?;
        if !result.success() {
            return Err(tool_failed("ffmpeg mastering failed", log_head(&result.stderr)));
        }

        info!(output = %output.display(), "master rendered");
        Ok(())
    }

    /// 运行 loudnorm 测量并解析统计值
    pub fn loudnorm(&self, input: &Path) -> MasteringResult<LoudnormStats> {
        let args = loudnorm::measure_args(&path_arg(input)?);
        let result = self.runner.run(&self.toolchain.ffmpeg, &args)?;
        if !result.success() {
            return Err(tool_failed("ffmpeg loudnorm failed", log_tail(&result.stderr)));
        }
        parse_loudnorm_output(&result.stderr)
    }

    /// 探测首个音频流
    pub fn probe(&self, input: &Path) -> MasteringResult<StreamProbe> {
        let args = probe::probe_args(&path_arg(input)?);
        let result = self.runner.run(&self.toolchain.ffprobe, &args)?;
        if !result.success() {
            return Err(tool_failed(
                format!("ffprobe failed for {}", input.display()),
                log_tail(&result.stderr),
            ));
        }
        parse_probe_output(&result.stdout)
    }
}
