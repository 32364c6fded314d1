//! 外部工具替身
//!
//! 脚本化的 `ToolRunner`：记录每次调用，按命令行返回预置的 ffmpeg/ffprobe 输出，
//! 让流程测试无需真实 ffmpeg。

#![allow(dead_code)]

use mastering_cli::error::{MasteringError, MasteringResult};
use mastering_cli::ffmpeg::{ProcessOutput, ToolRunner};
use std::cell::RefCell;

/// 一次被记录的调用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_version_check(&self) -> bool {
        self.args.first().map(String::as_str) == Some("-version")
    }
}

/// 典型的 loudnorm stderr 输出
pub fn loudnorm_stderr(input_i: &str, input_tp: &str) -> String {
    format!(
        "Input #0, wav, from 'in.wav':\n  Duration: 00:00:30.00, bitrate: 1411 kb/s\n\
[Parsed_loudnorm_0 @ 0x7f8e1c004a40] \n{{\n\t\"input_i\" : \"{input_i}\",\n\t\"input_tp\" : \"{input_tp}\",\n\
\t\"input_lra\" : \"6.20\",\n\t\"input_thresh\" : \"-22.40\",\n\t\"output_i\" : \"-14.05\",\n\
\t\"normalization_type\" : \"dynamic\",\n\t\"target_offset\" : \"0.05\"\n}}\n"
    )
}

/// 典型的 ffprobe JSON 输出
pub fn probe_stdout(sample_rate: &str, bits_per_sample: u32, sample_fmt: &str) -> String {
    format!(
        "{{\n    \"programs\": [],\n    \"streams\": [\n        {{\n            \"sample_rate\": \"{sample_rate}\",\n\
            \"channels\": 2,\n            \"sample_fmt\": \"{sample_fmt}\",\n\
            \"bits_per_sample\": {bits_per_sample}\n        }}\n    ]\n}}\n"
    )
}

pub fn ok(stdout: impl Into<String>, stderr: impl Into<String>) -> ProcessOutput {
    ProcessOutput {
        exit_code: Some(0),
        stdout: stdout.into(),
        stderr: stderr.into(),
    }
}

pub fn failed(code: i32, stderr: impl Into<String>) -> ProcessOutput {
    ProcessOutput {
        exit_code: Some(code),
        stdout: String::new(),
        stderr: stderr.into(),
    }
}

type Responder = Box<dyn Fn(&Invocation) -> MasteringResult<ProcessOutput>>;

/// 按调用内容应答的脚本化执行器
pub struct ScriptedRunner {
    responder: Responder,
    calls: RefCell<Vec<Invocation>>,
}

impl ScriptedRunner {
    pub fn new(responder: impl Fn(&Invocation) -> MasteringResult<ProcessOutput> + 'static) -> Self {
        Self {
            responder: Box::new(responder),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// 一切正常的 ffmpeg/ffprobe：版本检查成功、渲染成功、给出固定测量值
    pub fn healthy() -> Self {
        Self::new(|call| {
            if call.is_version_check() {
                return Ok(ok("ffmpeg version 6.1", ""));
            }
            if call.program.contains("ffprobe") {
                return Ok(ok(probe_stdout("48000", 24, "s32"), ""));
            }
            if call.args.iter().any(|a| a == "-acodec") {
                return Ok(ok("", "size=    5168kB time=00:00:30.00"));
            }
            Ok(ok("", loudnorm_stderr("-13.96", "-1.04")))
        })
    }

    /// ffprobe 不存在（启动失败）
    pub fn without_ffprobe() -> Self {
        Self::new(|call| {
            if call.program.contains("ffprobe") {
                return Err(MasteringError::ToolNotFound(call.program.clone()));
            }
            Ok(ok("ffmpeg version 6.1", ""))
        })
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    /// 去掉版本检查后的调用
    pub fn work_calls(&self) -> Vec<Invocation> {
        self.calls()
            .into_iter()
            .filter(|c| !c.is_version_check())
            .collect()
    }
}

impl ToolRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[String]) -> MasteringResult<ProcessOutput> {
        let call = Invocation {
            program: program.to_string(),
            args: args.to_vec(),
        };
        self.calls.borrow_mut().push(call.clone());
        (self.responder)(&call)
    }
}
