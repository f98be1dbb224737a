//! # Files 契约
//!
//! 文件子系统按逻辑路径解析并打开文件类资源。
//!
//! ## 路径约定
//!
//! - `Internal`：随应用发布的只读资源，路径相对于资源根
//! - `External`：用户数据目录下的文件
//! - `Absolute`：按原样使用的平台路径
//!
//! 逻辑路径统一使用 `/` 作为分隔符。

use crate::error::FilesError;

/// 文件类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Internal,
    External,
    Absolute,
}

/// 文件子系统
///
/// 实现是无状态（或只持有可丢弃缓存）的，宿主每次请求都会构造新的句柄。
pub trait Files {
    /// 读取全部字节
    fn read(&self, kind: FileKind, path: &str) -> Result<Vec<u8>, FilesError>;

    /// 读取 UTF-8 文本
    fn read_to_string(&self, kind: FileKind, path: &str) -> Result<String, FilesError> {
        let bytes = self.read(kind, path)?;
        String::from_utf8(bytes).map_err(|e| FilesError::LoadFailed {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    fn exists(&self, kind: FileKind, path: &str) -> bool;

    /// 列出目录下的直接子文件（逻辑路径）
    fn list(&self, kind: FileKind, dir: &str) -> Vec<String>;

    /// 解析出的完整路径（用于调试/日志）
    fn resolve(&self, kind: FileKind, path: &str) -> String;
}
