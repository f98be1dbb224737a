//! # Error 模块
//!
//! 定义宿主层使用的错误类型。
//!
//! 只有 [`HostInitializationError`] 属于宿主组合层本身；
//! [`AudioError`] 与 [`FilesError`] 是子系统内部错误，宿主不做转换或包装。

use std::fmt;
use thiserror::Error;

/// 子系统种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubsystemKind {
    Graphics,
    Input,
    Audio,
    Files,
}

impl SubsystemKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Graphics => "graphics",
            Self::Input => "input",
            Self::Audio => "audio",
            Self::Files => "files",
        }
    }
}

impl fmt::Display for SubsystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 宿主初始化错误
///
/// 构造失败时立即返回，不会产生任何部分可用的宿主对象。
/// 每个变体都标明失败的子系统，外围运行时据此决定降级重试还是终止启动。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostInitializationError {
    /// 宿主表面无法附着（已销毁、尺寸为零、不接受输入等）
    #[error("{subsystem} 子系统无法绑定宿主表面 {surface}: {reason}")]
    SurfaceUnusable {
        subsystem: SubsystemKind,
        /// 表面标识（用于日志）
        surface: String,
        reason: String,
    },

    /// 渲染能力协商失败
    #[error("{subsystem} 子系统能力协商失败: {reason}")]
    CapabilityNegotiation {
        subsystem: SubsystemKind,
        reason: String,
    },

    /// 设备不可用
    #[error("{subsystem} 子系统设备不可用: {reason}")]
    DeviceUnavailable {
        subsystem: SubsystemKind,
        reason: String,
    },
}

impl HostInitializationError {
    /// 失败的子系统
    pub fn subsystem(&self) -> SubsystemKind {
        match self {
            Self::SurfaceUnusable { subsystem, .. }
            | Self::CapabilityNegotiation { subsystem, .. }
            | Self::DeviceUnavailable { subsystem, .. } => *subsystem,
        }
    }
}

/// 音频子系统错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// 音频数据无法解码
    #[error("无法解码音频数据: {message}")]
    Decode { message: String },

    /// 未注册的音效
    #[error("音效 {id} 不存在")]
    UnknownSound { id: u32 },

    /// 同时播放的声部已达上限
    #[error("同时播放的声部已达上限 ({limit})")]
    VoiceLimit { limit: usize },
}

/// 文件子系统错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilesError {
    /// 文件未找到
    #[error("文件未找到: {path}")]
    NotFound { path: String },

    /// 文件读取失败
    #[error("读取文件失败: {path} - {message}")]
    LoadFailed { path: String, message: String },

    /// 路径无效
    #[error("无效的路径: {path} - {message}")]
    InvalidPath { path: String, message: String },
}
