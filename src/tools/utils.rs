//! 工具函数模块
//!
//! 提供数值舍入、文件路径处理等通用工具函数。

/// 数值工具函数
pub mod numeric {
    /// 舍入到一位小数（报告中的LUFS/dB/kHz都使用一位小数）
    ///
    /// 按二进制精确值舍入：`-9.85` 实际存储为 `-9.8499999...`，结果为 `-9.8`。
    /// 先乘10再 `round()` 会把乘积凑成 `-98.5` 而得到 `-9.9`。
    #[inline]
    pub fn round_to_tenth(value: f64) -> f64 {
        format!("{value:.1}").parse::<f64>().unwrap_or(value)
    }

    /// 仅保留有限值（`-inf`/`NaN` 视为缺失）
    #[inline]
    pub fn finite(value: f64) -> Option<f64> {
        value.is_finite().then_some(value)
    }
}

/// 文件路径处理工具函数
pub mod path {
    use crate::error::{MasteringError, MasteringResult};
    use std::path::Path;

    /// 提取文件名（返回String，用于日志显示）
    #[inline]
    pub fn extract_filename_lossy(path: &Path) -> String {
        path.file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }

    /// 将路径转换为外部进程参数（要求UTF-8）
    pub fn path_arg(path: &Path) -> MasteringResult<String> {
        path.to_str().map(str::to_string).ok_or_else(|| {
            MasteringError::InvalidInput(format!(
                "Path is not valid UTF-8 / 路径不是有效的UTF-8: {}",
                path.display()
            ))
        })
    }

    /// 检查扩展名是否在给定列表中（大小写不敏感）
    #[inline]
    pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| extensions.contains(&ext.to_lowercase().as_str()))
            .unwrap_or(false)
    }
}

pub use numeric::{finite, round_to_tenth};
pub use path::{extract_filename_lossy, has_extension, path_arg};
