//! 目录文件来源

use super::path::{join_logical, normalize_logical_path};
use app_core::{FileKind, Files, FilesError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// 目录文件子系统
///
/// - `Internal` 相对于资源根目录（开发模式）
/// - `External` 相对于用户数据目录
/// - `Absolute` 必须是平台绝对路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryFiles {
    internal_root: PathBuf,
    external_root: PathBuf,
}

impl DirectoryFiles {
    pub fn new(internal_root: impl Into<PathBuf>, external_root: impl Into<PathBuf>) -> Self {
        Self {
            internal_root: internal_root.into(),
            external_root: external_root.into(),
        }
    }

    /// 解析到文件系统路径
    pub fn resolve_path(&self, kind: FileKind, path: &str) -> Result<PathBuf, FilesError> {
        match kind {
            FileKind::Internal => Ok(self.internal_root.join(normalize_logical_path(path))),
            FileKind::External => Ok(self.external_root.join(normalize_logical_path(path))),
            FileKind::Absolute => {
                let absolute = PathBuf::from(path);
                if absolute.is_absolute() {
                    Ok(absolute)
                } else {
                    Err(FilesError::InvalidPath {
                        path: path.to_string(),
                        message: "不是绝对路径".to_string(),
                    })
                }
            }
        }
    }
}

/// 读取文件系统上的文件，区分“不存在”与其他 IO 错误
pub(crate) fn read_fs(full_path: &Path) -> Result<Vec<u8>, FilesError> {
    std::fs::read(full_path).map_err(|e| {
        let path = full_path.to_string_lossy().to_string();
        if e.kind() == ErrorKind::NotFound {
            FilesError::NotFound { path }
        } else {
            FilesError::LoadFailed {
                path,
                message: e.to_string(),
            }
        }
    })
}

impl Files for DirectoryFiles {
    fn read(&self, kind: FileKind, path: &str) -> Result<Vec<u8>, FilesError> {
        let full_path = self.resolve_path(kind, path)?;
        read_fs(&full_path)
    }

    fn exists(&self, kind: FileKind, path: &str) -> bool {
        self.resolve_path(kind, path)
            .map(|p| p.is_file())
            .unwrap_or(false)
    }

    fn list(&self, kind: FileKind, dir: &str) -> Vec<String> {
        let Ok(full_dir) = self.resolve_path(kind, dir) else {
            return Vec::new();
        };

        let mut files = Vec::new();
        if let Ok(entries) = std::fs::read_dir(&full_dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if !path.is_file() {
                    continue;
                }
                let name = entry.file_name().to_string_lossy().to_string();
                files.push(match kind {
                    FileKind::Absolute => path.to_string_lossy().to_string(),
                    _ => join_logical(dir, &name),
                });
            }
        }
        files.sort();
        files
    }

    fn resolve(&self, kind: FileKind, path: &str) -> String {
        match self.resolve_path(kind, path) {
            Ok(p) => p.to_string_lossy().to_string(),
            Err(_) => path.to_string(),
        }
    }
}
