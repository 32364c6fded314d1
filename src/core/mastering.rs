//! 母带渲染流程
//!
//! 渲染 → 对成品重新测量 → 组装报告。

use super::metrics::{AudioMetrics, measure_audio};
use crate::error::MasteringResult;
use crate::ffmpeg::{FfmpegSession, MasteringParams, ToolRunner, build_filter_chain};
use crate::tools::constants::defaults::MASTERED_TAG;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 一次母带任务的请求
#[derive(Debug, Clone, PartialEq)]
pub struct MasterRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub params: MasteringParams,
    /// 目标平台标识（透传到报告）
    pub platform: String,
    /// 预设名称（透传到报告）
    pub profile_name: String,
}

/// master 模式输出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterReport {
    pub final_metrics: AudioMetrics,
    pub output_file: String,
    pub platform: String,
    pub profile_name: String,
}

/// 仅渲染，不测量
pub fn render_master<R: ToolRunner>(
    session: &FfmpegSession<R>,
    input: &Path,
    output: &Path,
    params: &MasteringParams,
) -> MasteringResult<()> {
    ensure_parent_dir(output)?;
    let filter_chain = build_filter_chain(params);
    session.render(input, output, &filter_chain)
}

/// 渲染母带并测量成品
pub fn master_file<R: ToolRunner>(
    session: &FfmpegSession<R>,
    request: &MasterRequest,
) -> MasteringResult<MasterReport> {
    render_master(session, &request.input, &request.output, &request.params)?;
    let final_metrics = measure_audio(session, &request.output, MASTERED_TAG)?;

    Ok(MasterReport {
        final_metrics,
        output_file: request.output.display().to_string(),
        platform: request.platform.clone(),
        profile_name: request.profile_name.clone(),
    })
}

/// 创建输出文件的父目录（递归）
fn ensure_parent_dir(output: &Path) -> MasteringResult<()> {
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        debug!(dir = %parent.display(), "creating output directory");
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
