//! # File System Helpers / 文件系统辅助函数
//!
//! Path utilities used while resolving the configuration.
//!
//! 解析配置时使用的路径工具函数。

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Checks if a path exists and is a directory.
///
/// # Arguments
/// * `path` - Path to check
///
/// # Returns
/// `true` if the path exists and is a directory, `false` otherwise
pub fn is_directory(path: &Path) -> bool {
    path.is_dir()
}

/// Gets the absolute, canonical form of an existing path.
///
/// # Arguments
/// * `path` - Path to canonicalize
///
/// # Returns
/// Canonicalized absolute path, or an error if the path doesn't exist
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).with_context(|| format!("Failed to resolve path: {}", path.display()))
}

/// Expands `~` and environment variables in a user-supplied path.
/// Falls back to the path as given when expansion fails.
pub fn expand_path(raw: &Path) -> PathBuf {
    let raw_str = raw.to_string_lossy();
    match shellexpand::full(&raw_str) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => raw.to_path_buf(),
    }
}

/// Creates the parent directory of `path` when it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }
    Ok(())
}
