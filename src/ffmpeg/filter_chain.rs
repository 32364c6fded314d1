//! 母带滤镜链构建
//!
//! 将一组独立的母带参数映射为 ffmpeg `-af` 滤镜图字符串。
//! 纯函数，无I/O。阶段顺序固定：增益 → 压缩 → 低架EQ → 高架EQ → 限幅。

use crate::tools::constants::{defaults, limits};

/// 母带处理参数（全部为独立标量，单位见字段注释）
#[derive(Debug, Clone, PartialEq)]
pub struct MasteringParams {
    /// 目标响度（LUFS），仅随报告透传
    pub target_lufs: f64,
    /// 目标真峰值（dBTP），仅随报告透传
    pub true_peak: f64,
    /// 输入增益（dB）
    pub input_trim_db: f64,
    /// 压缩器阈值（dB）
    pub comp_threshold_db: f64,
    pub comp_ratio: f64,
    /// 压缩器启动时间（毫秒）
    pub attack_ms: f64,
    /// 压缩器释放时间（毫秒）
    pub release_ms: f64,
    pub eq_low_hz: f64,
    pub eq_low_db: f64,
    pub eq_low_q: f64,
    pub eq_high_hz: f64,
    pub eq_high_db: f64,
    pub eq_high_q: f64,
    /// 限幅器上限（dB）
    pub limiter_ceiling_db: f64,
    /// 预留：限幅器前瞻（毫秒），当前不进入滤镜链
    pub limiter_lookahead_ms: f64,
    /// 限幅器释放时间（毫秒）
    pub limiter_release_ms: f64,
}

impl Default for MasteringParams {
    fn default() -> Self {
        Self {
            target_lufs: defaults::TARGET_LUFS,
            true_peak: defaults::TRUE_PEAK_DB,
            input_trim_db: defaults::INPUT_TRIM_DB,
            comp_threshold_db: defaults::COMP_THRESHOLD_DB,
            comp_ratio: defaults::COMP_RATIO,
            attack_ms: defaults::ATTACK_MS,
            release_ms: defaults::RELEASE_MS,
            eq_low_hz: defaults::EQ_LOW_HZ,
            eq_low_db: defaults::EQ_LOW_DB,
            eq_low_q: defaults::EQ_LOW_Q,
            eq_high_hz: defaults::EQ_HIGH_HZ,
            eq_high_db: defaults::EQ_HIGH_DB,
            eq_high_q: defaults::EQ_HIGH_Q,
            limiter_ceiling_db: defaults::LIMITER_CEILING_DB,
            limiter_lookahead_ms: defaults::LIMITER_LOOKAHEAD_MS,
            limiter_release_ms: defaults::LIMITER_RELEASE_MS,
        }
    }
}

/// dB → 线性幅度，下限 1e-6
#[inline]
pub fn db_to_amplitude(db: f64) -> f64 {
    10f64.powf(db / 20.0).max(limits::MIN_AMPLITUDE)
}

/// 毫秒 → 秒，并钳制下限
#[inline]
fn ms_to_seconds(ms: f64, floor: f64) -> f64 {
    (ms / 1000.0).max(floor)
}

/// 构建完整滤镜链
pub fn build_filter_chain(params: &MasteringParams) -> String {
    let mut filters: Vec<String> = Vec::with_capacity(5);

    if let Some(trim) = trim_stage(params.input_trim_db) {
        filters.push(trim);
    }
    filters.push(compressor_stage(params));
    filters.push(shelf_stage(
        "bass",
        params.eq_low_db,
        params.eq_low_hz.max(limits::MIN_EQ_LOW_HZ),
        params.eq_low_q,
    ));
    filters.push(shelf_stage(
        "treble",
        params.eq_high_db,
        params.eq_high_hz.max(limits::MIN_EQ_HIGH_HZ),
        params.eq_high_q,
    ));
    filters.push(limiter_stage(params));

    filters.join(",")
}

fn trim_stage(trim_db: f64) -> Option<String> {
    (trim_db.abs() > limits::TRIM_EPSILON_DB).then(|| format!("volume={trim_db:.3}dB"))
}

fn compressor_stage(params: &MasteringParams) -> String {
    let threshold = db_to_amplitude(params.comp_threshold_db);
    let ratio = params.comp_ratio.max(limits::MIN_COMP_RATIO);
    let attack = ms_to_seconds(params.attack_ms, limits::MIN_ATTACK_SECONDS);
    let release = ms_to_seconds(params.release_ms, limits::MIN_RELEASE_SECONDS);
    format!(
        "acompressor=threshold={threshold:.6}:ratio={ratio:.3}:attack={attack:.4}:release={release:.4}:makeup=0.0:knee=2.0"
    )
}

fn shelf_stage(name: &str, gain_db: f64, freq_hz: f64, q: f64) -> String {
    let width = q.max(limits::MIN_EQ_Q);
    format!("{name}=g={gain_db:.2}:f={freq_hz:.1}:width_type=q:width={width:.3}")
}

fn limiter_stage(params: &MasteringParams) -> String {
    let limit = db_to_amplitude(params.limiter_ceiling_db);
    let release = ms_to_seconds(params.limiter_release_ms, limits::MIN_RELEASE_SECONDS);
    format!("alimiter=limit={limit:.6}:level=1.0:attack=0.001:release={release:.4}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_CHAIN: &str = "acompressor=threshold=0.223872:ratio=1.600:attack=0.0120:release=0.0800:makeup=0.0:knee=2.0,\
bass=g=-0.80:f=120.0:width_type=q:width=0.700,\
treble=g=0.60:f=3500.0:width_type=q:width=0.700,\
alimiter=limit=0.891251:level=1.0:attack=0.001:release=0.0400";

    #[test]
    fn test_default_chain() {
        assert_eq!(build_filter_chain(&MasteringParams::default()), DEFAULT_CHAIN);
    }

    #[test]
    fn test_trim_stage_gating() {
        let mut params = MasteringParams::default();

        params.input_trim_db = 0.005;
        assert!(!build_filter_chain(&params).contains("volume="));

        params.input_trim_db = -0.01;
        assert!(!build_filter_chain(&params).contains("volume="));

        params.input_trim_db = -3.0;
        let chain = build_filter_chain(&params);
        assert!(chain.starts_with("volume=-3.000dB,acompressor="), "{chain}");

        params.input_trim_db = 1.25;
        assert!(build_filter_chain(&params).starts_with("volume=1.250dB,"));
    }

    #[test]
    fn test_clamps_applied() {
        let params = MasteringParams {
            comp_ratio: 0.5,
            attack_ms: 0.0,
            release_ms: 1.0,
            eq_low_hz: 5.0,
            eq_low_q: 0.0,
            eq_high_hz: 50.0,
            eq_high_q: -1.0,
            limiter_release_ms: 0.0,
            ..MasteringParams::default()
        };
        let chain = build_filter_chain(&params);
        assert!(chain.contains("ratio=1.000"), "{chain}");
        assert!(chain.contains("attack=0.0010:release=0.0050"), "{chain}");
        assert!(chain.contains("bass=g=-0.80:f=20.0:width_type=q:width=0.100"), "{chain}");
        assert!(chain.contains("treble=g=0.60:f=200.0:width_type=q:width=0.100"), "{chain}");
        assert!(chain.ends_with("attack=0.001:release=0.0050"), "{chain}");
    }

    #[test]
    fn test_stage_order_fixed() {
        let params = MasteringParams {
            input_trim_db: 2.0,
            ..MasteringParams::default()
        };
        let chain = build_filter_chain(&params);
        let names: Vec<&str> = chain
            .split(',')
            .map(|stage| stage.split('=').next().unwrap_or_default())
            .collect();
        assert_eq!(names, ["volume", "acompressor", "bass", "treble", "alimiter"]);
    }

    #[test]
    fn test_db_to_amplitude() {
        assert!((db_to_amplitude(0.0) - 1.0).abs() < 1e-12);
        assert!((db_to_amplitude(-6.0) - 0.501187).abs() < 1e-6);
        assert_eq!(db_to_amplitude(-300.0), 1e-6);
    }

    #[test]
    fn test_lookahead_not_emitted() {
        let params = MasteringParams {
            limiter_lookahead_ms: 25.0,
            ..MasteringParams::default()
        };
        assert_eq!(build_filter_chain(&params), DEFAULT_CHAIN);
    }

    #[test]
    fn test_custom_threshold_and_ceiling() {
        let params = MasteringParams {
            comp_threshold_db: 0.0,
            limiter_ceiling_db: -300.0,
            ..MasteringParams::default()
        };
        let chain = build_filter_chain(&params);
        assert!(chain.starts_with("acompressor=threshold=1.000000:"), "{chain}");
        assert!(chain.contains("alimiter=limit=0.000001:"), "{chain}");
    }
}
