use serde::{Deserialize, Deserializer};

/// 反序列化可选字符串，空白字符串视为未设置
///
/// 配置文件中 `output = ""` 与不写该字段效果相同
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}
