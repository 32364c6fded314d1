//! 常量和默认配置集中管理
//!
//! 将所有重要常量集中定义，避免"默认值漂移"和重复定义

/// 母带处理参数默认值
///
/// CLI 默认值与 `MasteringParams::default()` 共用这些常量。
pub mod defaults {
    pub const TARGET_LUFS: f64 = -14.0;
    pub const TRUE_PEAK_DB: f64 = -1.0;
    pub const INPUT_TRIM_DB: f64 = 0.0;
    pub const COMP_THRESHOLD_DB: f64 = -13.0;
    pub const COMP_RATIO: f64 = 1.6;
    pub const ATTACK_MS: f64 = 12.0;
    pub const RELEASE_MS: f64 = 80.0;
    pub const EQ_LOW_HZ: f64 = 120.0;
    pub const EQ_LOW_DB: f64 = -0.8;
    pub const EQ_LOW_Q: f64 = 0.7;
    pub const EQ_HIGH_HZ: f64 = 3500.0;
    pub const EQ_HIGH_DB: f64 = 0.6;
    pub const EQ_HIGH_Q: f64 = 0.7;
    pub const LIMITER_CEILING_DB: f64 = -1.0;
    /// 预留参数，暂不参与滤镜链
    pub const LIMITER_LOOKAHEAD_MS: f64 = 1.0;
    pub const LIMITER_RELEASE_MS: f64 = 40.0;

    pub const PLATFORM: &str = "streaming";
    pub const PROFILE_NAME: &str = "Streaming Default";

    /// analyze 模式的默认标签
    pub const ANALYZE_TAG: &str = "analyze";
    /// master 模式下成品测量使用的标签
    pub const MASTERED_TAG: &str = "mastered";

    pub const FFMPEG_BIN: &str = "ffmpeg";
    pub const FFPROBE_BIN: &str = "ffprobe";
}

/// 参数钳制下限
pub mod limits {
    /// dB→幅度换算的最小幅度
    pub const MIN_AMPLITUDE: f64 = 1e-6;
    /// 输入增益低于此绝对值时省略 volume 滤镜
    pub const TRIM_EPSILON_DB: f64 = 0.01;
    pub const MIN_COMP_RATIO: f64 = 1.0;
    pub const MIN_ATTACK_SECONDS: f64 = 0.001;
    pub const MIN_RELEASE_SECONDS: f64 = 0.005;
    pub const MIN_EQ_LOW_HZ: f64 = 20.0;
    pub const MIN_EQ_HIGH_HZ: f64 = 200.0;
    pub const MIN_EQ_Q: f64 = 0.1;
}

/// 外部进程交互常量
pub mod process {
    /// 错误信息中保留的诊断文本字符数
    pub const LOG_EXCERPT_CHARS: usize = 600;

    /// 母带渲染输出编码（24-bit PCM）
    pub const RENDER_CODEC: &str = "pcm_s24le";

    /// loudnorm 测量滤镜（只测量，不使用其归一化结果）
    pub const LOUDNORM_FILTER: &str = "loudnorm=I=-14:TP=-1.0:LRA=9:print_format=json";

    /// ffprobe 读取的音频流字段
    pub const PROBE_ENTRIES: &str =
        "stream=sample_rate,channels,bits_per_sample,bits_per_raw_sample,sample_fmt";
}

/// 批量分析支持的音频扩展名
pub const AUDIO_EXTENSIONS: &[&str] = &[
    "flac", "wav", "mp3", "m4a", "aac", "ogg", "opus", "aiff", "aif", "wv", "ape",
];
