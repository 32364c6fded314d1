//! 统一错误处理框架
//!
//! 外部进程调用链路上的错误类型定义：输入校验、I/O、工具链缺失、
//! 外部进程失败、诊断输出解析失败。

use std::fmt;
use std::io;
use thiserror::Error;

/// 母带处理相关的统一错误类型
#[derive(Debug, Error)]
pub enum MasteringError {
    /// 输入验证错误（路径无效、非UTF-8路径等）
    #[error("{0}")]
    InvalidInput(String),

    /// 文件I/O错误
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// 外部二进制不可用
    #[error(
        "Required binary '{0}' was not found on PATH. Install ffmpeg/ffprobe or set FFMPEG_BIN / FFPROBE_BIN."
    )]
    ToolNotFound(String),

    /// 外部进程以非零状态退出，携带已截断的诊断文本
    #[error("{context}: {log}")]
    ToolFailed { context: String, log: String },

    /// 诊断输出无法解析
    #[error("{0}")]
    Parse(String),

    /// JSON 解析/序列化错误
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// 母带处理操作的标准Result类型
pub type MasteringResult<T> = Result<T, MasteringError>;

// ==================== 错误转换Helper函数 ====================

/// 创建外部进程失败错误的helper函数
#[inline]
pub fn tool_failed(context: impl Into<String>, log: impl Into<String>) -> MasteringError {
    MasteringError::ToolFailed {
        context: context.into(),
        log: log.into(),
    }
}

/// 创建解析错误的helper函数
#[inline]
pub fn parse_error<E: fmt::Display>(context: &str, err: E) -> MasteringError {
    MasteringError::Parse(format!("{context}: {err}"))
}

/// stderr 错误首行
///
/// 库错误的 Display 已带上来源（`I/O error: {0}`），只打印一层；
/// 其他错误展开 anyhow 的上下文链。
pub fn error_headline(error: &anyhow::Error) -> String {
    match error.downcast_ref::<MasteringError>() {
        Some(e) => format!("[mastering_cli] {e}"),
        None => format!("[mastering_cli] {error:#}"),
    }
}

// ==================== 错误分类系统 ====================

/// 错误类别枚举（用于退出码与建议文本）
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum ErrorCategory {
    /// 命令行/路径输入问题
    Input,
    /// I/O相关错误（目录创建失败、权限不足等）
    Io,
    /// ffmpeg/ffprobe 不可用
    Toolchain,
    /// 外部进程执行失败
    Process,
    /// 诊断输出解析失败
    Parse,
}

impl ErrorCategory {
    /// 从MasteringError提取错误类别
    pub fn from_error(e: &MasteringError) -> Self {
        match e {
            MasteringError::InvalidInput(_) => Self::Input,
            MasteringError::Io(_) => Self::Io,
            MasteringError::ToolNotFound(_) => Self::Toolchain,
            MasteringError::ToolFailed { .. } => Self::Process,
            MasteringError::Parse(_) | MasteringError::Json(_) => Self::Parse,
        }
    }

    /// 获取错误类别的显示名称
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Input => "input error / 输入错误",
            Self::Io => "I/O error / I/O错误",
            Self::Toolchain => "toolchain error / 工具链错误",
            Self::Process => "process error / 外部进程错误",
            Self::Parse => "parse error / 解析错误",
        }
    }

    /// 进程退出码
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io => 1,
            Self::Input => 2,
            Self::Toolchain => 3,
            Self::Process => 4,
            Self::Parse => 5,
        }
    }

    /// 建议文本
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::Input => {
                "检查命令行参数是否正确，使用 --help 查看完整用法 / Check command-line arguments, use --help to see full usage"
            }
            Self::Io => {
                "检查文件路径是否正确，文件是否存在且可读写 / Check that paths exist and are readable/writable"
            }
            Self::Toolchain => {
                "安装ffmpeg/ffprobe，或通过 --ffmpeg-bin / --ffprobe-bin 指定路径 / Install ffmpeg/ffprobe or point --ffmpeg-bin / --ffprobe-bin at them"
            }
            Self::Process => {
                "文件可能损坏或参数超出ffmpeg接受范围 / File may be corrupted or a parameter is outside ffmpeg's accepted range"
            }
            Self::Parse => {
                "ffmpeg输出格式异常，请确认ffmpeg版本支持loudnorm / Unexpected ffmpeg output, make sure your ffmpeg build ships loudnorm"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_not_found_message() {
        let err = MasteringError::ToolNotFound("ffprobe".to_string());
        assert_eq!(
            err.to_string(),
            "Required binary 'ffprobe' was not found on PATH. Install ffmpeg/ffprobe or set FFMPEG_BIN / FFPROBE_BIN."
        );
        assert_eq!(ErrorCategory::from_error(&err), ErrorCategory::Toolchain);
    }

    #[test]
    fn test_tool_failed_message() {
        let err = tool_failed("ffmpeg mastering failed", "Invalid argument");
        assert_eq!(err.to_string(), "ffmpeg mastering failed: Invalid argument");
        assert_eq!(ErrorCategory::from_error(&err).exit_code(), 4);
    }

    #[test]
    fn test_exit_codes_are_non_zero_and_distinct() {
        let categories = [
            ErrorCategory::Input,
            ErrorCategory::Io,
            ErrorCategory::Toolchain,
            ErrorCategory::Process,
            ErrorCategory::Parse,
        ];
        let mut codes: Vec<i32> = categories.iter().map(|c| c.exit_code()).collect();
        assert!(codes.iter().all(|&c| c != 0));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), categories.len());
    }

    #[test]
    fn test_headline_prints_io_source_once() {
        let err = MasteringError::from(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        let headline = error_headline(&anyhow::Error::new(err));
        assert_eq!(headline, "[mastering_cli] I/O error: denied");
        assert_eq!(headline.matches("denied").count(), 1);
    }

    #[test]
    fn test_headline_keeps_context_chain_for_other_errors() {
        let err = anyhow::anyhow!("bad directive").context("Invalid log filter");
        assert_eq!(
            error_headline(&err),
            "[mastering_cli] Invalid log filter: bad directive"
        );
    }

    #[test]
    fn test_display_names_per_category() {
        let err = MasteringError::InvalidInput("bad path".to_string());
        assert_eq!(
            ErrorCategory::from_error(&err).display_name(),
            "input error / 输入错误"
        );
        let err = tool_failed("ffmpeg loudnorm failed", "x");
        assert_eq!(
            ErrorCategory::from_error(&err).display_name(),
            "process error / 外部进程错误"
        );
    }

    #[test]
    fn test_json_error_is_parse_category() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = MasteringError::from(json_err);
        assert_eq!(ErrorCategory::from_error(&err), ErrorCategory::Parse);
    }
}
