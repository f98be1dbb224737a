//! # Files 模块
//!
//! 文件子系统实现。
//!
//! - [`DirectoryFiles`]：从文件系统读取（开发模式）
//! - [`ArchiveFiles`]：内部资源从 ZIP 包读取（发布模式）
//!
//! 宿主只保存 [`FilesSource`] 这个廉价的描述，每次请求都用它构造新的句柄。

mod archive;
mod directory;
pub mod path;

pub use archive::ArchiveFiles;
pub use directory::DirectoryFiles;

use app_core::Files;
use std::path::PathBuf;

/// 文件来源描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilesSource {
    /// 内部资源位于目录中
    Directory {
        internal_root: PathBuf,
        external_root: PathBuf,
    },
    /// 内部资源位于 ZIP 包中
    Archive {
        archive: PathBuf,
        external_root: PathBuf,
    },
}

impl Default for FilesSource {
    fn default() -> Self {
        Self::Directory {
            internal_root: PathBuf::from("assets"),
            external_root: PathBuf::from("."),
        }
    }
}

impl FilesSource {
    /// 构造新的文件子系统句柄
    pub fn open(&self) -> Box<dyn Files> {
        match self {
            Self::Directory {
                internal_root,
                external_root,
            } => Box::new(DirectoryFiles::new(internal_root, external_root)),
            Self::Archive {
                archive,
                external_root,
            } => Box::new(ArchiveFiles::new(archive, external_root)),
        }
    }
}
