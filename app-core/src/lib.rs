//! # App Core
//!
//! 应用宿主的契约层。
//!
//! ## 架构概述
//!
//! `app-core` 只定义接口，不包含任何平台 IO。
//! 每种宿主环境（桌面窗口、嵌入式页面表面、移动端外壳、无头模式）各自实现一次
//! [`Application`]，平台无关的应用主体（[`ApplicationListener`]）只依赖这里的契约：
//!
//! ```text
//! Runtime                         Application (宿主)
//!   │                                  │
//!   │── set_application_listener ─────►│
//!   │◄── application_listener ─────────│
//!   │                                  │
//!   │   listener.render(&dyn Application)
//!   │        │── graphics() / input() / audio() / files()
//!   │        │── log(tag, message)
//! ```
//!
//! ## 模块结构
//!
//! - [`application`]：`Application` trait
//! - [`listener`]：应用监听器与共享引用
//! - [`host_type`]：宿主类型标识
//! - [`graphics`] / [`input`] / [`audio`] / [`files`]：子系统契约
//! - [`log`]：诊断输出接收端
//! - [`error`]：错误类型定义

pub mod application;
pub mod audio;
pub mod error;
pub mod files;
pub mod graphics;
pub mod host_type;
pub mod input;
pub mod listener;
pub mod log;

// 重导出核心类型
pub use application::Application;
pub use audio::{Audio, PlaybackOptions, SoundId, VoiceId};
pub use error::{AudioError, FilesError, HostInitializationError, SubsystemKind};
pub use files::{FileKind, Files};
pub use graphics::{Color, Graphics, RenderApi};
pub use host_type::HostType;
pub use input::{Input, InputEvent, KeyCode, PointerButton};
pub use listener::{ApplicationListener, SharedListener, shared_listener};
pub use log::{
    LogSink, MemorySink, SharedLogSink, StdoutSink, WriterSink, default_sink, format_log_line,
};
