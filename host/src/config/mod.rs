//! # Config 模块
//!
//! 宿主配置管理，集中管理所有配置项。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (config.json)
//! 3. 默认值（最低）

use crate::audio::AudioBackend;
use crate::files::FilesSource;
use crate::graphics::{MAX_BACK_BUFFER_BYTES, back_buffer_bytes};
use crate::surface::{HostSurface, SurfaceCapabilities, SurfaceId};
use app_core::{HostType, SharedLogSink, StdoutSink, WriterSink};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{Level, info, warn};

/// 文件来源类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FilesSourceType {
    /// 文件系统（开发模式）
    #[default]
    Fs,
    /// ZIP 文件（发布模式）
    Zip,
}

/// 诊断输出目标
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogTarget {
    #[default]
    Stdout,
    Stderr,
    File,
}

/// 宿主配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostConfig {
    /// 表面支持时使用高级渲染接口
    #[serde(default = "default_prefer_advanced_api")]
    pub prefer_advanced_api: bool,

    /// 低精度数值模式（节省内存）
    #[serde(default)]
    pub use_reduced_precision: bool,

    /// 宿主类型
    #[serde(default)]
    pub host_type: HostType,

    /// 表面配置
    #[serde(default)]
    pub surface: SurfaceConfig,

    /// 文件配置
    #[serde(default)]
    pub files: FilesConfig,

    /// 音频配置
    #[serde(default)]
    pub audio: AudioConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 表面配置
///
/// 描述宿主 UI 提供的表面；真实环境中由宿主 UI 报告。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SurfaceConfig {
    #[serde(default = "default_surface_width")]
    pub width: u32,

    #[serde(default = "default_surface_height")]
    pub height: u32,

    #[serde(default = "default_true")]
    pub baseline_api: bool,

    #[serde(default = "default_true")]
    pub advanced_api: bool,

    #[serde(default = "default_true")]
    pub input_capture: bool,
}

/// 文件配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilesConfig {
    /// 内部资源来源类型（fs/zip）
    #[serde(default)]
    pub source: FilesSourceType,

    /// 内部资源根目录（仅 Fs 模式使用）
    #[serde(default = "default_internal_root")]
    pub internal_root: PathBuf,

    /// 外部文件根目录
    #[serde(default = "default_external_root")]
    pub external_root: PathBuf,

    /// ZIP 文件路径（仅 Zip 模式使用）
    #[serde(default)]
    pub archive: Option<PathBuf>,
}

/// 音频配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AudioConfig {
    /// 主音量 (0.0 - 1.0)
    #[serde(default = "default_master_volume")]
    pub master_volume: f32,

    /// 输出后端（device/silent）
    #[serde(default)]
    pub backend: AudioBackend,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogConfig {
    /// 应用日志（`Application::log`）的输出目标
    #[serde(default)]
    pub target: LogTarget,

    /// 输出文件（仅 File 目标使用）
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// 宿主内部 tracing 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_true() -> bool {
    true
}

fn default_prefer_advanced_api() -> bool {
    true
}

fn default_surface_width() -> u32 {
    640
}

fn default_surface_height() -> u32 {
    480
}

fn default_internal_root() -> PathBuf {
    PathBuf::from("assets")
}

fn default_external_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_master_volume() -> f32 {
    1.0
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            prefer_advanced_api: default_prefer_advanced_api(),
            use_reduced_precision: false,
            host_type: HostType::default(),
            surface: SurfaceConfig::default(),
            files: FilesConfig::default(),
            audio: AudioConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: default_surface_width(),
            height: default_surface_height(),
            baseline_api: true,
            advanced_api: true,
            input_capture: true,
        }
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            source: FilesSourceType::default(),
            internal_root: default_internal_root(),
            external_root: default_external_root(),
            archive: None,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            master_volume: default_master_volume(),
            backend: AudioBackend::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            target: LogTarget::default(),
            file: None,
            level: default_log_level(),
        }
    }
}

impl SurfaceConfig {
    pub fn capabilities(&self) -> SurfaceCapabilities {
        SurfaceCapabilities {
            baseline_api: self.baseline_api,
            advanced_api: self.advanced_api,
            input_capture: self.input_capture,
        }
    }
}

impl HostConfig {
    /// 加载配置文件
    ///
    /// 如果文件不存在或解析失败，返回默认配置并输出警告。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            warn!(path = ?path, "配置文件不存在，使用默认配置");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => {
                    info!(path = ?path, "配置文件加载成功");
                    config
                }
                Err(e) => {
                    warn!(path = ?path, error = %e, "配置文件解析失败，使用默认配置");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(path = ?path, error = %e, "配置文件读取失败，使用默认配置");
                Self::default()
            }
        }
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        fs::write(path, json).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.surface.width == 0 || self.surface.height == 0 {
            return Err(ConfigError::ValidationFailed(format!(
                "表面尺寸无效: {}x{}",
                self.surface.width, self.surface.height
            )));
        }
        if back_buffer_bytes(self.surface.width, self.surface.height).is_none() {
            return Err(ConfigError::ValidationFailed(format!(
                "表面尺寸过大: {}x{}（后备缓冲上限 {MAX_BACK_BUFFER_BYTES} 字节）",
                self.surface.width, self.surface.height
            )));
        }

        if self.files.source == FilesSourceType::Zip {
            let archive = self.files.archive.as_ref().ok_or_else(|| {
                ConfigError::ValidationFailed("Zip 模式必须配置 files.archive".to_string())
            })?;
            if !archive.exists() {
                return Err(ConfigError::ValidationFailed(format!(
                    "ZIP 文件不存在: {}",
                    archive.display()
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.audio.master_volume) {
            return Err(ConfigError::ValidationFailed(
                "主音量必须在 0.0 - 1.0 之间".to_string(),
            ));
        }

        if self.log.target == LogTarget::File && self.log.file.is_none() {
            return Err(ConfigError::ValidationFailed(
                "File 日志目标必须配置 log.file".to_string(),
            ));
        }

        Ok(())
    }

    /// 按表面配置构造表面描述
    pub fn build_surface(&self, id: SurfaceId) -> HostSurface {
        HostSurface::new(id, self.surface.width, self.surface.height)
            .with_capabilities(self.surface.capabilities())
    }

    /// 文件来源描述
    ///
    /// Zip 模式缺少 `files.archive` 时退回目录模式（`validate` 会提前报告这种配置）。
    pub fn files_source(&self) -> FilesSource {
        match (self.files.source, &self.files.archive) {
            (FilesSourceType::Zip, Some(archive)) => FilesSource::Archive {
                archive: archive.clone(),
                external_root: self.files.external_root.clone(),
            },
            _ => FilesSource::Directory {
                internal_root: self.files.internal_root.clone(),
                external_root: self.files.external_root.clone(),
            },
        }
    }

    /// 打开应用日志的输出目标
    pub fn open_log_sink(&self) -> Result<SharedLogSink, ConfigError> {
        match self.log.target {
            LogTarget::Stdout => Ok(Arc::new(StdoutSink)),
            LogTarget::Stderr => Ok(Arc::new(WriterSink::new(std::io::stderr()))),
            LogTarget::File => {
                let path = self.log.file.as_ref().ok_or_else(|| {
                    ConfigError::ValidationFailed("File 日志目标必须配置 log.file".to_string())
                })?;
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.display())))?;
                Ok(Arc::new(WriterSink::new(file)))
            }
        }
    }

    /// 宿主内部 tracing 日志级别，无法识别时使用 INFO
    pub fn tracing_level(&self) -> Level {
        self.log.level.parse().unwrap_or(Level::INFO)
    }
}

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// 序列化失败
    #[error("配置序列化失败: {0}")]
    SerializationFailed(String),
    /// IO 错误
    #[error("配置 IO 错误: {0}")]
    IoError(String),
    /// 验证失败
    #[error("配置验证失败: {0}")]
    ValidationFailed(String),
}
