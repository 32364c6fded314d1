//! 结果格式化模块
//!
//! JSON 为机器调用方准备（每次调用一个紧凑JSON文档），table 供人工查看。

use super::cli::OutputFormat;
use crate::core::{AudioMetrics, MasterReport};
use crate::error::MasteringResult;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table, presets::UTF8_FULL};
use serde::{Deserialize, Serialize};

/// analyze 单文件输出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeReport {
    pub metrics: AudioMetrics,
}

/// analyze 目录模式中的单个条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMetrics {
    pub file: String,
    pub metrics: AudioMetrics,
}

/// analyze 目录模式输出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchAnalyzeReport {
    pub results: Vec<FileMetrics>,
}

/// 可输出的报告
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Analyze(AnalyzeReport),
    Batch(BatchAnalyzeReport),
    Master(MasterReport),
}

/// 按格式渲染报告文本（不含末尾换行）
pub fn render_report(report: &Report, format: OutputFormat) -> MasteringResult<String> {
    match format {
        OutputFormat::Json => render_json(report),
        OutputFormat::Table => Ok(render_table(report)),
    }
}

fn render_json(report: &Report) -> MasteringResult<String> {
    let text = match report {
        Report::Analyze(r) => serde_json::to_string(r)?,
        Report::Batch(r) => serde_json::to_string(r)?,
        Report::Master(r) => serde_json::to_string(r)?,
    };
    Ok(text)
}

fn render_table(report: &Report) -> String {
    match report {
        Report::Analyze(r) => metrics_table(&r.metrics).to_string(),
        Report::Master(r) => {
            let mut out = String::new();
            out.push_str(&format!("Output / 输出文件: {}\n", r.output_file));
            out.push_str(&format!("Platform / 平台: {}\n", r.platform));
            out.push_str(&format!("Profile / 预设: {}\n", r.profile_name));
            out.push_str(&metrics_table(&r.final_metrics).to_string());
            out
        }
        Report::Batch(r) => {
            let mut table = new_table();
            table.set_header(vec![
                "File", "LUFS", "True Peak", "Crest", "Rate (kHz)", "Bit Depth",
            ]);
            for entry in &r.results {
                let m = &entry.metrics;
                table.add_row(vec![
                    Cell::new(&entry.file),
                    number_cell(m.lufs),
                    number_cell(m.true_peak),
                    number_cell(m.crest),
                    number_cell(m.sample_rate),
                    Cell::new(m.bit_depth.as_deref().unwrap_or("-")),
                ]);
            }
            table.to_string()
        }
    }
}

fn metrics_table(metrics: &AudioMetrics) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Metric / 指标", "Value / 数值"]);
    table.add_row(vec![Cell::new("LUFS"), number_cell(metrics.lufs)]);
    table.add_row(vec![Cell::new("True Peak (dBTP)"), number_cell(metrics.true_peak)]);
    table.add_row(vec![Cell::new("Crest (dB)"), number_cell(metrics.crest)]);
    table.add_row(vec![Cell::new("Sample Rate (kHz)"), number_cell(metrics.sample_rate)]);
    table.add_row(vec![
        Cell::new("Bit Depth"),
        Cell::new(metrics.bit_depth.as_deref().unwrap_or("-")).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![Cell::new("Notes"), Cell::new(&metrics.notes)]);
    table
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn number_cell(value: Option<f64>) -> Cell {
    let text = value.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"));
    Cell::new(text).set_alignment(CellAlignment::Right)
}
