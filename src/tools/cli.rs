//! 命令行接口模块
//!
//! 负责命令行参数解析与配置管理。

use super::constants::defaults;
use crate::core::MasterRequest;
use crate::ffmpeg::{MasteringParams, Toolchain};
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mastering-cli")]
#[command(about = "基于ffmpeg/ffprobe的音频分析与母带处理 / Audio analyze & master via ffmpeg/ffprobe")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// ffmpeg 可执行文件
    /// ffmpeg executable
    #[arg(long, env = "FFMPEG_BIN", default_value = defaults::FFMPEG_BIN, global = true)]
    pub ffmpeg_bin: String,

    /// ffprobe 可执行文件
    /// ffprobe executable
    #[arg(long, env = "FFPROBE_BIN", default_value = defaults::FFPROBE_BIN, global = true)]
    pub ffprobe_bin: String,

    /// 输出格式：json, table（默认json）
    /// Output format: json, table (default: json)
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Json, global = true)]
    pub format: OutputFormat,

    /// 显示详细日志（stderr）
    /// Verbose logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 测量响度/峰值指标
    /// Measure loudness / peak metrics for a file (or every audio file in a directory)
    Analyze {
        /// 音频文件或目录
        input_file: PathBuf,

        /// 写入 notes 字段的标签
        #[arg(long, default_value = defaults::ANALYZE_TAG)]
        tag: String,
    },

    /// 运行母带处理链并导出
    /// Run the DSP chain and export mastered audio
    Master(MasterArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct MasterArgs {
    pub input_file: PathBuf,
    pub output_file: PathBuf,

    #[arg(long, default_value_t = defaults::TARGET_LUFS, allow_negative_numbers = true)]
    pub target_lufs: f64,

    #[arg(long, default_value_t = defaults::TRUE_PEAK_DB, allow_negative_numbers = true)]
    pub true_peak: f64,

    #[arg(long, default_value_t = defaults::INPUT_TRIM_DB, allow_negative_numbers = true)]
    pub input_trim_db: f64,

    #[arg(long, default_value_t = defaults::COMP_THRESHOLD_DB, allow_negative_numbers = true)]
    pub comp_threshold: f64,

    #[arg(long, default_value_t = defaults::COMP_RATIO, allow_negative_numbers = true)]
    pub comp_ratio: f64,

    /// 压缩器启动时间（毫秒）
    /// Compressor attack in milliseconds
    #[arg(long, default_value_t = defaults::ATTACK_MS, allow_negative_numbers = true)]
    pub attack: f64,

    /// 压缩器释放时间（毫秒）
    /// Compressor release in milliseconds
    #[arg(long, default_value_t = defaults::RELEASE_MS, allow_negative_numbers = true)]
    pub release: f64,

    #[arg(long, default_value_t = defaults::EQ_LOW_HZ, allow_negative_numbers = true)]
    pub eq_low_hz: f64,

    #[arg(long, default_value_t = defaults::EQ_LOW_DB, allow_negative_numbers = true)]
    pub eq_low_db: f64,

    #[arg(long, default_value_t = defaults::EQ_LOW_Q, allow_negative_numbers = true)]
    pub eq_low_q: f64,

    #[arg(long, default_value_t = defaults::EQ_HIGH_HZ, allow_negative_numbers = true)]
    pub eq_high_hz: f64,

    #[arg(long, default_value_t = defaults::EQ_HIGH_DB, allow_negative_numbers = true)]
    pub eq_high_db: f64,

    #[arg(long, default_value_t = defaults::EQ_HIGH_Q, allow_negative_numbers = true)]
    pub eq_high_q: f64,

    #[arg(long, default_value_t = defaults::LIMITER_CEILING_DB, allow_negative_numbers = true)]
    pub limiter_ceiling: f64,

    /// 预留参数，暂不生效
    /// Reserved for future limiter improvements
    #[arg(long, default_value_t = defaults::LIMITER_LOOKAHEAD_MS, allow_negative_numbers = true)]
    pub limiter_lookahead: f64,

    /// 限幅器释放时间（毫秒）
    /// Limiter release in milliseconds
    #[arg(long, default_value_t = defaults::LIMITER_RELEASE_MS, allow_negative_numbers = true)]
    pub limiter_release: f64,

    #[arg(long, default_value = defaults::PLATFORM)]
    pub platform: String,

    #[arg(long, default_value = defaults::PROFILE_NAME)]
    pub profile_name: String,
}

impl MasterArgs {
    pub fn params(&self) -> MasteringParams {
        MasteringParams {
            target_lufs: self.target_lufs,
            true_peak: self.true_peak,
            input_trim_db: self.input_trim_db,
            comp_threshold_db: self.comp_threshold,
            comp_ratio: self.comp_ratio,
            attack_ms: self.attack,
            release_ms: self.release,
            eq_low_hz: self.eq_low_hz,
            eq_low_db: self.eq_low_db,
            eq_low_q: self.eq_low_q,
            eq_high_hz: self.eq_high_hz,
            eq_high_db: self.eq_high_db,
            eq_high_q: self.eq_high_q,
            limiter_ceiling_db: self.limiter_ceiling,
            limiter_lookahead_ms: self.limiter_lookahead,
            limiter_release_ms: self.limiter_release,
        }
    }

    pub fn into_request(self) -> MasterRequest {
        let params = self.params();
        MasterRequest {
            input: self.input_file,
            output: self.output_file,
            params,
            platform: self.platform,
            profile_name: self.profile_name,
        }
    }
}

/// 结果输出格式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
}

/// 待执行的操作
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Analyze { input: PathBuf, tag: String },
    Master(MasterRequest),
}

/// 应用程序配置
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub operation: Operation,
    pub toolchain: Toolchain,
    pub format: OutputFormat,
    /// 是否显示详细信息
    pub verbose: bool,
}

impl From<Cli> for AppConfig {
    fn from(cli: Cli) -> Self {
        let operation = match cli.command {
            Commands::Analyze { input_file, tag } => Operation::Analyze {
                input: input_file,
                tag,
            },
            Commands::Master(args) => Operation::Master(args.into_request()),
        };

        AppConfig {
            operation,
            toolchain: Toolchain::new(cli.ffmpeg_bin, cli.ffprobe_bin),
            format: cli.format,
            verbose: cli.verbose,
        }
    }
}

impl AppConfig {
    /// 从任意参数序列解析（首个元素为程序名）
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Cli::try_parse_from(args).map(Self::from)
    }
}

/// 解析命令行参数并创建配置（失败时由clap打印用法并退出）
pub fn parse_args() -> AppConfig {
    AppConfig::from(Cli::parse())
}
