//! 外部进程执行层
//!
//! `ToolRunner` 是唯一接触 `std::process` 的接缝：生产环境使用
//! [`SystemRunner`]，测试中可替换为脚本化实现。

use crate::error::{MasteringError, MasteringResult};
use crate::tools::constants::{defaults, process::LOG_EXCERPT_CHARS};
use std::io;
use std::process::{Command, Stdio};
use tracing::debug;

/// 外部进程的完成结果（输出已按UTF-8有损解码）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// 退出码；被信号终止时为 `None`
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    #[inline]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// 同步执行外部程序并收集全部输出
pub trait ToolRunner {
    /// 运行 `program args...`，阻塞至进程退出。
    ///
    /// 程序无法启动（不存在）时返回 [`MasteringError::ToolNotFound`]；
    /// 非零退出码不是错误，由调用方检查 [`ProcessOutput::success`]。
    fn run(&self, program: &str, args: &[String]) -> MasteringResult<ProcessOutput>;
}

/// 基于 `std::process::Command` 的真实执行器
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> MasteringResult<ProcessOutput> {
        debug!(program, args = %args.join(" "), "spawning external tool");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                    MasteringError::ToolNotFound(program.to_string())
                }
                _ => MasteringError::Io(e),
            })?;

        Ok(ProcessOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// ffmpeg/ffprobe 可执行文件位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub ffmpeg: String,
    pub ffprobe: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            ffmpeg: defaults::FFMPEG_BIN.to_string(),
            ffprobe: defaults::FFPROBE_BIN.to_string(),
        }
    }
}

impl Toolchain {
    pub fn new(ffmpeg: impl Into<String>, ffprobe: impl Into<String>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        }
    }

    /// 逐个执行 `<bin> -version` 确认两个二进制均可用
    pub fn ensure_available(&self, runner: &dyn ToolRunner) -> MasteringResult<()> {
        for binary in [&self.ffmpeg, &self.ffprobe] {
            let probe = runner.run(binary, &["-version".to_string()]);
            match probe {
                Ok(output) if output.success() => {
                    debug!(binary = %binary, "binary available");
                }
                Ok(_) | Err(MasteringError::ToolNotFound(_)) => {
                    return Err(MasteringError::ToolNotFound(binary.clone()));
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

/// 截取诊断文本开头（去除首尾空白后保留前N个字符）
pub fn log_head(log: &str) -> String {
    log.trim().chars().take(LOG_EXCERPT_CHARS).collect()
}

/// 截取诊断文本末尾（去除首尾空白后保留后N个字符）
///
/// ffmpeg 把真正的错误原因打印在最后，所以分析类错误取末尾。
pub fn log_tail(log: &str) -> String {
    let trimmed = log.trim();
    let total = trimmed.chars().count();
    trimmed
        .chars()
        .skip(total.saturating_sub(LOG_EXCERPT_CHARS))
        .collect()
}
