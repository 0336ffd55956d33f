use std::io::ErrorKind;
use std::path::Path;
use crate::models::ExperimentName;

/// 标记文件解析后的标量值
enum Scalar {
    Text(String),
    Null,
    Composite,
}

// ————————————————————————————————————————————————————————————————————————
// 核心函数：读取运行目录中标记文件的实验名称字段
// 任何失败都不会中止调用，而是以 ExperimentName 的变体返回
// ————————————————————————————————————————————————————————————————————————
pub fn read_experiment_name(run_dir: &Path, marker_file: &str, key: &str) -> ExperimentName {
    let file_path = run_dir.join(marker_file);

    let contents = match std::fs::read_to_string(&file_path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return ExperimentName::FileMissing,
        Err(e) => return ExperimentName::Malformed(format!("failed to read {}: {}", file_path.display(), e)),
    };

    let field = if is_yaml_file(&file_path) {
        lookup_yaml_field(&contents, key)
    } else {
        lookup_json_field(&contents, key)
    };

    match field {
        Ok(Some(Scalar::Text(name))) => ExperimentName::Present(name),
        Ok(Some(Scalar::Null)) | Ok(None) => ExperimentName::FieldMissing,
        Ok(Some(Scalar::Composite)) => {
            ExperimentName::Malformed(format!("field '{}' is not a scalar", key))
        }
        Err(reason) => ExperimentName::Malformed(reason),
    }
}

fn is_yaml_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn lookup_json_field(contents: &str, key: &str) -> Result<Option<Scalar>, String> {
    let value: serde_json::Value =
        serde_json::from_str(contents).map_err(|e| format!("invalid JSON: {}", e))?;
    let map = value
        .as_object()
        .ok_or_else(|| "top-level JSON value is not an object".to_string())?;

    Ok(map.get(key).map(|v| match v {
        serde_json::Value::String(s) => Scalar::Text(s.clone()),
        serde_json::Value::Number(n) => Scalar::Text(n.to_string()),
        serde_json::Value::Bool(b) => Scalar::Text(b.to_string()),
        serde_json::Value::Null => Scalar::Null,
        _ => Scalar::Composite,
    }))
}

fn lookup_yaml_field(contents: &str, key: &str) -> Result<Option<Scalar>, String> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(contents).map_err(|e| format!("invalid YAML: {}", e))?;
    let map = value
        .as_mapping()
        .ok_or_else(|| "top-level YAML value is not a mapping".to_string())?;

    Ok(map.get(key).map(yaml_scalar))
}

fn yaml_scalar(value: &serde_yaml::Value) -> Scalar {
    match value {
        serde_yaml::Value::String(s) => Scalar::Text(s.clone()),
        serde_yaml::Value::Number(n) => Scalar::Text(n.to_string()),
        serde_yaml::Value::Bool(b) => Scalar::Text(b.to_string()),
        serde_yaml::Value::Null => Scalar::Null,
        // 忽略YAML标签，只看内部值
        serde_yaml::Value::Tagged(tagged) => yaml_scalar(&tagged.value),
        _ => Scalar::Composite,
    }
}
