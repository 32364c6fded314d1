//! 核心流程：测量与母带渲染

pub mod mastering;
pub mod metrics;

pub use mastering::{MasterReport, MasterRequest, master_file, render_master};
pub use metrics::{AudioMetrics, measure_audio};
