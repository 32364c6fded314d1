//! 操作执行模块
//!
//! 把解析好的 [`Operation`] 交给 ffmpeg 会话执行，产出可输出的 [`Report`]。

use super::cli::Operation;
use super::formatter::{AnalyzeReport, BatchAnalyzeReport, FileMetrics, Report};
use super::scanner::scan_audio_files;
use crate::core::{master_file, measure_audio};
use crate::error::MasteringResult;
use crate::ffmpeg::{FfmpegSession, ToolRunner};
use std::path::Path;
use tracing::info;

/// 执行一次操作（先校验工具链）
pub fn run_operation<R: ToolRunner>(
    session: &FfmpegSession<R>,
    operation: &Operation,
) -> MasteringResult<Report> {
    session.ensure_binaries()?;

    match operation {
        Operation::Analyze { input, tag } => analyze_path(session, input, tag),
        Operation::Master(request) => {
            info!(
                input = %request.input.display(),
                output = %request.output.display(),
                profile = %request.profile_name,
                "mastering"
            );
            master_file(session, request).map(Report::Master)
        }
    }
}

/// analyze：文件直接测量，目录逐个测量（首个失败即终止）
pub fn analyze_path<R: ToolRunner>(
    session: &FfmpegSession<R>,
    input: &Path,
    tag: &str,
) -> MasteringResult<Report> {
    if !input.is_dir() {
        let metrics = measure_audio(session, input, tag)?;
        return Ok(Report::Analyze(AnalyzeReport { metrics }));
    }

    let files = scan_audio_files(input)?;
    info!(dir = %input.display(), count = files.len(), "analyzing directory");

    let mut results = Vec::with_capacity(files.len());
    for (index, file) in files.iter().enumerate() {
        info!("[{}/{}] {}", index + 1, files.len(), file.display());
        let metrics = measure_audio(session, file, tag)?;
        results.push(FileMetrics {
            file: file.display().to_string(),
            metrics,
        });
    }

    Ok(Report::Batch(BatchAnalyzeReport { results }))
}
