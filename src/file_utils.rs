use std::path::{Path, PathBuf, MAIN_SEPARATOR, MAIN_SEPARATOR_STR};
use walkdir::WalkDir;
use crate::error::{AggregateError, Result};

/// 将命令行给出的日志路径解析为候选运行目录
///
/// 以路径分隔符结尾的已存在目录原样保留；否则把最后一段当作前缀，
/// 在其父目录中查找名称包含该前缀的条目，按字典序排列。
pub fn resolve_logdirs(all_logdirs: &[String]) -> Result<Vec<PathBuf>> {
    let mut logdirs = Vec::new();

    for logdir in all_logdirs {
        if Path::new(logdir).is_dir() && ends_with_separator(logdir) {
            logdirs.push(PathBuf::from(logdir));
            continue;
        }

        let (basedir, prefix) = split_prefix(logdir);
        let list_base = if basedir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            basedir.as_path()
        };

        let entries = std::fs::read_dir(list_base).map_err(|source| AggregateError::SearchBase {
            path: list_base.to_path_buf(),
            source,
        })?;

        let mut matched = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| AggregateError::SearchBase {
                path: list_base.to_path_buf(),
                source,
            })?;
            let name = entry.file_name();
            // 只在匹配时做有损转换，路径本身保留原始文件名
            if name.to_string_lossy().contains(prefix) {
                matched.push(basedir.join(&name));
            }
        }
        matched.sort();
        logdirs.extend(matched);
    }

    Ok(logdirs)
}

fn ends_with_separator(path: &str) -> bool {
    path.ends_with(MAIN_SEPARATOR) || path.ends_with('/')
}

/// 拆分为（搜索目录，前缀）。没有分隔符时搜索目录为空，表示当前目录
fn split_prefix(logdir: &str) -> (PathBuf, &str) {
    match logdir.rfind(MAIN_SEPARATOR) {
        Some(0) => (PathBuf::from(MAIN_SEPARATOR_STR), &logdir[1..]),
        Some(idx) => (PathBuf::from(&logdir[..idx]), &logdir[idx + 1..]),
        None => (PathBuf::new(), logdir),
    }
}

/// 按子串规则筛选目录：必须包含全部 select，且不能包含任意 exclude
pub fn filter_logdirs(
    logdirs: Vec<PathBuf>,
    select: Option<&[String]>,
    exclude: Option<&[String]>,
) -> Vec<PathBuf> {
    logdirs
        .into_iter()
        .filter(|log| {
            let log_str = log.to_string_lossy();
            let selected = select.map_or(true, |s| s.iter().all(|x| log_str.contains(x.as_str())));
            let excluded = exclude.map_or(false, |e| e.iter().any(|x| log_str.contains(x.as_str())));
            selected && !excluded
        })
        .collect()
}

/// 递归遍历 root，收集直接包含标记文件的目录（父目录先于子目录，同级按名称排序）
pub fn find_run_dirs(root: &Path, marker_file: &str) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping unreadable path under {}: {}", root.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_dir())
        .filter(|entry| entry.path().join(marker_file).is_file())
        .map(|entry| entry.into_path())
        .collect()
}
