//! ffprobe 音频流探测
//!
//! 读取首个音频流的采样率与位深信息（`-of json`）。

use super::json_fields::lenient_f64;
use crate::error::MasteringResult;
use crate::tools::constants::process::PROBE_ENTRIES;
use serde::Deserialize;

/// ffprobe 返回的首个音频流（字段均可能缺失）
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StreamProbe {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sample_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub channels: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub bits_per_sample: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub bits_per_raw_sample: Option<f64>,
    #[serde(default)]
    pub sample_fmt: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ProbeDocument {
    #[serde(default)]
    streams: Option<Vec<StreamProbe>>,
}

/// 探测命令参数（不含程序名）
pub fn probe_args(input: &str) -> Vec<String> {
    [
        "-v",
        "error",
        "-select_streams",
        "a:0",
        "-show_entries",
        PROBE_ENTRIES,
        "-of",
        "json",
        input,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// 解析 ffprobe 的 JSON 输出；空输出视为 `{}`，没有音频流时返回空探测结果
pub fn parse_probe_output(stdout: &str) -> MasteringResult<StreamProbe> {
    let text = if stdout.trim().is_empty() { "{}" } else { stdout };
    let document: ProbeDocument = serde_json::from_str(text)?;
    Ok(document
        .streams
        .and_then(|streams| streams.into_iter().next())
        .unwrap_or_default())
}

impl StreamProbe {
    /// 采样率（kHz），仅在探测到正值时返回
    pub fn sample_rate_khz(&self) -> Option<f64> {
        self.sample_rate.filter(|&sr| sr > 0.0).map(|sr| sr / 1000.0)
    }

    /// 位深描述：优先使用显式位数，否则按 `sample_fmt` 前缀推断
    pub fn bit_depth(&self) -> Option<String> {
        let explicit = [self.bits_per_sample, self.bits_per_raw_sample]
            .into_iter()
            .flatten()
            .find(|&bits| bits > 0.0);
        if let Some(bits) = explicit {
            return Some(format!("{}-bit", bits as u32));
        }

        let fmt = self.sample_fmt.as_deref()?;
        let label = if fmt.starts_with("fl") {
            "32-bit float"
        } else if fmt.starts_with("dbl") {
            "64-bit float"
        } else if fmt.starts_with("s16") {
            "16-bit"
        } else if fmt.starts_with("s24") {
            "24-bit"
        } else if fmt.starts_with("s32") {
            "32-bit"
        } else {
            return None;
        };
        Some(label.to_string())
    }
}
