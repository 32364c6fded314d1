//! 响度指标记录
//!
//! 一次测量 = 一次 loudnorm 分析 + 一次 ffprobe 探测。

use crate::error::MasteringResult;
use crate::ffmpeg::{FfmpegSession, LoudnormStats, StreamProbe, ToolRunner};
use crate::tools::utils::{extract_filename_lossy, finite, round_to_tenth};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// 输出指标（JSON 键为 camelCase，缺失值序列化为 `null`）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioMetrics {
    /// 积分响度（LUFS）
    pub lufs: Option<f64>,
    /// 真峰值（dBTP）
    pub true_peak: Option<f64>,
    /// 峰值因数近似值：真峰值 - 积分响度
    pub crest: Option<f64>,
    /// 采样率（kHz）
    pub sample_rate: Option<f64>,
    pub bit_depth: Option<String>,
    pub notes: String,
}

impl AudioMetrics {
    /// 由测量结果组装指标
    ///
    /// crest 使用未舍入的原始值计算，再整体舍入到一位小数。
    pub fn from_measurements(
        stats: &LoudnormStats,
        probe: &StreamProbe,
        tag: &str,
        audio_path: &Path,
    ) -> Self {
        let lufs = stats.input_i.and_then(finite);
        let true_peak = stats.input_tp.and_then(finite);
        let crest = lufs
            .zip(true_peak)
            .map(|(lufs, peak)| round_to_tenth(peak - lufs));

        Self {
            lufs: lufs.map(round_to_tenth),
            true_peak: true_peak.map(round_to_tenth),
            crest,
            sample_rate: probe.sample_rate_khz().map(round_to_tenth),
            bit_depth: probe.bit_depth(),
            notes: format!(
                "{tag} metrics via ffmpeg loudnorm ({})",
                extract_filename_lossy(audio_path)
            ),
        }
    }
}

/// 测量单个音频文件
pub fn measure_audio<R: ToolRunner>(
    session: &FfmpegSession<R>,
    audio_path: &Path,
    tag: &str,
) -> MasteringResult<AudioMetrics> {
    let stats = session.loudnorm(audio_path)?;
    let probe = session.probe(audio_path)?;
    let metrics = AudioMetrics::from_measurements(&stats, &probe, tag, audio_path);

    info!(
        file = %audio_path.display(),
        lufs = ?metrics.lufs,
        true_peak = ?metrics.true_peak,
        "measured"
    );
    Ok(metrics)
}
