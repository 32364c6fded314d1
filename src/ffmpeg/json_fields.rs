//! ffmpeg/ffprobe JSON字段的宽松解析
//!
//! loudnorm 把所有数值打印成字符串（`"-23.54"`），ffprobe 则混用数字和字符串
//! （`bits_per_sample: 0` 与 `bits_per_raw_sample: "24"`），统一按数值读取。

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// 将数字或数字字符串读取为 `f64`，其它内容视为缺失
pub fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// serde `deserialize_with` 适配：字段缺失、`null`、非数值均得到 `None`
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_f64))
}
