//! ZIP 资源包文件来源
//!
//! 发布模式下内部资源打包在一个 ZIP 文件里；外部文件与绝对路径仍然走文件系统。

use super::directory::DirectoryFiles;
use super::path::{dir_prefix, normalize_logical_path};
use app_core::{FileKind, Files, FilesError};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use zip::ZipArchive;

/// ZIP 文件子系统
///
/// 文件索引在首次访问时构建，缓存只属于这个句柄。
#[derive(Debug)]
pub struct ArchiveFiles {
    archive_path: PathBuf,
    /// External / Absolute 的处理
    disk: DirectoryFiles,
    /// 文件索引缓存（逻辑路径 -> ZIP 内索引）
    index_cache: RefCell<Option<HashMap<String, usize>>>,
}

impl ArchiveFiles {
    pub fn new(archive_path: impl Into<PathBuf>, external_root: impl Into<PathBuf>) -> Self {
        let archive_path = archive_path.into();
        Self {
            disk: DirectoryFiles::new(PathBuf::new(), external_root),
            archive_path,
            index_cache: RefCell::new(None),
        }
    }

    fn open_archive(&self) -> Result<ZipArchive<File>, FilesError> {
        let archive_display = self.archive_path.to_string_lossy().to_string();
        let file = File::open(&self.archive_path).map_err(|e| FilesError::LoadFailed {
            path: archive_display.clone(),
            message: format!("无法打开 ZIP 文件: {e}"),
        })?;
        ZipArchive::new(file).map_err(|e| FilesError::LoadFailed {
            path: archive_display,
            message: format!("无法读取 ZIP 文件: {e}"),
        })
    }

    /// 构建文件索引
    fn build_index(&self) -> Result<HashMap<String, usize>, FilesError> {
        let mut archive = self.open_archive()?;

        let mut index = HashMap::new();
        for i in 0..archive.len() {
            if let Ok(entry) = archive.by_index(i)
                && !entry.is_dir()
            {
                index.insert(normalize_logical_path(entry.name()), i);
            }
        }
        Ok(index)
    }

    /// 查找条目在 ZIP 内的索引
    fn entry_index(&self, logical_path: &str) -> Result<Option<usize>, FilesError> {
        let mut cache = self.index_cache.borrow_mut();
        if cache.is_none() {
            *cache = Some(self.build_index()?);
        }
        Ok(cache
            .as_ref()
            .and_then(|index| index.get(logical_path).copied()))
    }

    fn internal_paths(&self) -> Vec<String> {
        let needs_index = self.index_cache.borrow().is_none();
        if needs_index {
            match self.build_index() {
                Ok(index) => *self.index_cache.borrow_mut() = Some(index),
                Err(_) => return Vec::new(),
            }
        }
        self.index_cache
            .borrow()
            .as_ref()
            .map(|index| index.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn read_internal(&self, path: &str) -> Result<Vec<u8>, FilesError> {
        let logical = normalize_logical_path(path);
        let index = self
            .entry_index(&logical)?
            .ok_or_else(|| FilesError::NotFound {
                path: logical.clone(),
            })?;

        let mut archive = self.open_archive()?;
        let mut entry = archive
            .by_index(index)
            .map_err(|e| FilesError::LoadFailed {
                path: logical.clone(),
                message: format!("无法读取 ZIP 条目: {e}"),
            })?;

        let mut buffer = Vec::new();
        entry
            .read_to_end(&mut buffer)
            .map_err(|e| FilesError::LoadFailed {
                path: logical.clone(),
                message: format!("读取 ZIP 条目失败: {e}"),
            })?;
        Ok(buffer)
    }
}

impl Files for ArchiveFiles {
    fn read(&self, kind: FileKind, path: &str) -> Result<Vec<u8>, FilesError> {
        match kind {
            FileKind::Internal => self.read_internal(path),
            FileKind::External | FileKind::Absolute => self.disk.read(kind, path),
        }
    }

    fn exists(&self, kind: FileKind, path: &str) -> bool {
        match kind {
            FileKind::Internal => matches!(
                self.entry_index(&normalize_logical_path(path)),
                Ok(Some(_))
            ),
            FileKind::External | FileKind::Absolute => self.disk.exists(kind, path),
        }
    }

    fn list(&self, kind: FileKind, dir: &str) -> Vec<String> {
        if kind != FileKind::Internal {
            return self.disk.list(kind, dir);
        }

        let prefix = dir_prefix(dir);
        let mut files: Vec<String> = self
            .internal_paths()
            .into_iter()
            .filter(|path| {
                path.strip_prefix(prefix.as_str())
                    .is_some_and(|rest| !rest.contains('/'))
            })
            .collect();
        files.sort();
        files
    }

    fn resolve(&self, kind: FileKind, path: &str) -> String {
        match kind {
            FileKind::Internal => format!(
                "zip://{}#{}",
                self.archive_path.display(),
                normalize_logical_path(path)
            ),
            FileKind::External | FileKind::Absolute => self.disk.resolve(kind, path),
        }
    }
}
