//! # Host 层
//!
//! `app-core` 契约的具体宿主实现。
//!
//! ## 架构说明
//!
//! Host 层负责：
//! - 附着到宿主 UI 提供的表面（图形 + 输入共用同一渲染区域）
//! - 音频解码与声部管理
//! - 内部/外部文件访问（目录或 ZIP 资源包）
//! - 配置加载
//! - 按生命周期驱动应用监听器
//!
//! Host 层不包含应用逻辑，应用逻辑通过 [`app_core::ApplicationListener`] 注册进来。

pub mod application;
pub mod audio;
pub mod config;
pub mod files;
pub mod graphics;
pub mod input;
pub mod lifecycle;
pub mod surface;

pub use application::{EmbeddedApplication, HeadlessApplication, HostError, HostOptions};
pub use audio::{AudioBackend, MAX_VOICES, MixerAudio, SoundInfo, decode_sound};
pub use config::{
    AudioConfig, ConfigError, FilesConfig, FilesSourceType, HostConfig, LogConfig, LogTarget,
    SurfaceConfig,
};
pub use files::{ArchiveFiles, DirectoryFiles, FilesSource};
pub use graphics::{
    FrameTiming, HeadlessGraphics, MAX_BACK_BUFFER_BYTES, SurfaceGraphics, back_buffer_bytes,
    negotiate_render_api,
};
pub use input::{HeadlessInput, SurfaceInput};
pub use lifecycle::{LifecycleDriver, LifecycleState};
pub use surface::{HostSurface, SurfaceBinding, SurfaceCapabilities, SurfaceId};
