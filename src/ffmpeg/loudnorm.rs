//! loudnorm 响度测量
//!
//! ffmpeg 的 loudnorm 滤镜在 `print_format=json` 下把统计结果以 JSON 对象的
//! 形式混在 stderr 诊断流的末尾打印。这里负责命令行和 JSON 提取。

use super::json_fields::lenient_f64;
use crate::error::{MasteringError, MasteringResult, parse_error};
use crate::tools::constants::process::LOUDNORM_FILTER;
use serde::Deserialize;
use tracing::warn;

/// loudnorm 测量阶段输出中本工具关心的字段
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LoudnormStats {
    /// 积分响度（LUFS）
    #[serde(default, deserialize_with = "lenient_f64")]
    pub input_i: Option<f64>,
    /// 真峰值（dBTP）
    #[serde(default, deserialize_with = "lenient_f64")]
    pub input_tp: Option<f64>,
    /// 响度范围（LU）
    #[serde(default, deserialize_with = "lenient_f64")]
    pub input_lra: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub input_thresh: Option<f64>,
}

/// 测量命令参数（不含程序名）
pub fn measure_args(input: &str) -> Vec<String> {
    [
        "-hide_banner",
        "-nostdin",
        "-i",
        input,
        "-af",
        LOUDNORM_FILTER,
        "-f",
        "null",
        "-",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// 从 stderr 中提取并解析 loudnorm JSON
///
/// 取第一个 `{` 到最后一个 `}` 之间的文本；如果其中混入了更早的诊断行
/// 导致解析失败，再退回到最后一个 `{` 开始的片段。
pub fn parse_loudnorm_output(stderr: &str) -> MasteringResult<LoudnormStats> {
    let unparsable = || MasteringError::Parse("Unable to parse loudnorm output.".to_string());

    let start = stderr.find('{').ok_or_else(unparsable)?;
    let end = stderr.rfind('}').ok_or_else(unparsable)?;
    if end <= start {
        return Err(unparsable());
    }

    match serde_json::from_str::<LoudnormStats>(&stderr[start..=end]) {
        Ok(stats) => Ok(stats),
        Err(first_err) => {
            let last_start = stderr[..end].rfind('{').unwrap_or(start);
            if last_start == start {
                return Err(parse_error("Invalid loudnorm JSON", first_err));
            }
            warn!("loudnorm output contains stray braces, retrying with last JSON object");
            serde_json::from_str::<LoudnormStats>(&stderr[last_start..=end])
                .map_err(|e| parse_error("Invalid loudnorm JSON", e))
        }
    }
}
