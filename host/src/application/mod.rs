//! # Application 模块
//!
//! 具体的宿主环境。
//!
//! - [`EmbeddedApplication`]：嵌入宿主 UI 提供的表面（页面内画布、原生视图等）
//! - [`HeadlessApplication`]：无表面，用于测试与服务端运行
//!
//! 两者都实现 [`app_core::Application`]，外围运行时在启动时选定其一。

mod embedded;
mod headless;

pub use embedded::EmbeddedApplication;
pub use headless::HeadlessApplication;

use crate::audio::AudioBackend;
use crate::config::{ConfigError, HostConfig};
use crate::files::FilesSource;
use app_core::{HostInitializationError, HostType, SharedListener, SharedLogSink, default_sink};
use thiserror::Error;

/// 从配置构造宿主时的错误
#[derive(Error, Debug)]
pub enum HostError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Initialization(#[from] HostInitializationError),
}

/// 宿主构造选项
#[derive(Clone)]
pub struct HostOptions {
    /// 表面支持时使用高级渲染接口
    pub prefer_advanced_api: bool,
    /// 低精度数值模式（节省内存）
    pub use_reduced_precision: bool,
    pub host_type: HostType,
    /// 文件子系统来源
    pub files: FilesSource,
    /// 诊断输出接收端
    pub log_sink: SharedLogSink,
    /// 初始主音量
    pub master_volume: f32,
    /// 音频输出后端（无头宿主总是静音）
    pub audio: AudioBackend,
}

impl Default for HostOptions {
    fn default() -> Self {
        Self {
            prefer_advanced_api: true,
            use_reduced_precision: false,
            host_type: HostType::Embedded,
            files: FilesSource::default(),
            log_sink: default_sink(),
            master_volume: 1.0,
            audio: AudioBackend::default(),
        }
    }
}

impl std::fmt::Debug for HostOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostOptions")
            .field("prefer_advanced_api", &self.prefer_advanced_api)
            .field("use_reduced_precision", &self.use_reduced_precision)
            .field("host_type", &self.host_type)
            .field("files", &self.files)
            .field("master_volume", &self.master_volume)
            .field("audio", &self.audio)
            .finish_non_exhaustive()
    }
}

impl HostOptions {
    /// 从配置构造选项（打开日志目标可能失败）
    pub fn from_config(config: &HostConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            prefer_advanced_api: config.prefer_advanced_api,
            use_reduced_precision: config.use_reduced_precision,
            host_type: config.host_type,
            files: config.files_source(),
            log_sink: config.open_log_sink()?,
            master_volume: config.audio.master_volume,
            audio: config.audio.backend,
        })
    }
}

/// 两种宿主共用的非子系统状态
struct HostState {
    host_type: HostType,
    files: FilesSource,
    log_sink: SharedLogSink,
    listener: Option<SharedListener>,
}

impl HostState {
    fn new(options: &HostOptions) -> Self {
        Self {
            host_type: options.host_type,
            files: options.files.clone(),
            log_sink: options.log_sink.clone(),
            listener: None,
        }
    }

    fn log(&self, tag: &str, message: &str) {
        self.log_sink
            .write_line(&app_core::format_log_line(tag, message));
    }
}
