//! # Test Discovery Module / 测试发现模块
//!
//! Lists the test scripts directly inside a directory. Discovery never fails:
//! whether the directory is usable is checked while validating the
//! configuration, so an unreadable directory here just yields nothing.
//!
//! 列出目录中直接包含的测试脚本。发现过程永不失败：
//! 目录是否可用在配置校验阶段检查，因此这里无法读取的目录只会返回空结果。

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::core::models::TestFile;

/// Builds a predicate matching names that end with `extension`, ignoring case.
///
/// 构建一个谓词，忽略大小写地匹配以 `extension` 结尾的文件名。
pub fn extension_predicate(extension: &str) -> impl Fn(&str) -> bool + use<> {
    let extension = extension.to_lowercase();
    move |name: &str| name.to_lowercase().ends_with(&extension)
}

/// Returns the regular files directly inside `directory` whose name satisfies
/// `predicate`, sorted by file name. Subdirectories are never descended into.
///
/// 返回 `directory` 中直接包含且文件名满足 `predicate` 的普通文件，按文件名排序。
/// 不会进入子目录。
pub fn list<P>(directory: &Path, predicate: P) -> Vec<TestFile>
where
    P: Fn(&str) -> bool,
{
    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(dir = %directory.display(), error = %e, "cannot read tests directory");
            return Vec::new();
        }
    };

    let mut files: Vec<TestFile> = entries
        .filter_map(Result::ok)
        .filter(|entry| predicate(entry.file_name().to_string_lossy().as_ref()))
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .map(|path| TestFile::new(std::path::absolute(&path).unwrap_or(path)))
        .collect();

    // Directory order is filesystem-dependent; sort so fail-fast is reproducible.
    files.sort_by(|a, b| a.name.cmp(&b.name));
    files
}
