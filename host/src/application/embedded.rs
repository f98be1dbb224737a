//! 嵌入式宿主
//!
//! 附着到宿主 UI 提供的表面上。图形与输入共用同一个渲染区域。

use super::{HostError, HostOptions, HostState};
use crate::audio::MixerAudio;
use crate::config::HostConfig;
use crate::graphics::SurfaceGraphics;
use crate::input::SurfaceInput;
use crate::surface::HostSurface;
use app_core::{
    Application, Audio, Files, Graphics, HostInitializationError, HostType, Input,
    SharedListener, SharedLogSink,
};
use tracing::info;

/// 嵌入式宿主
pub struct EmbeddedApplication {
    graphics: SurfaceGraphics,
    input: SurfaceInput,
    audio: MixerAudio,
    state: HostState,
}

impl EmbeddedApplication {
    /// 附着到表面并初始化所有子系统
    ///
    /// # 参数
    ///
    /// - `prefer_advanced_api`: 表面支持时使用高级渲染接口，不支持时降级到基础接口
    /// - `use_reduced_precision`: 启用低精度数值模式以节省内存
    pub fn new(
        surface: &HostSurface,
        prefer_advanced_api: bool,
        use_reduced_precision: bool,
    ) -> Result<Self, HostInitializationError> {
        Self::with_options(
            surface,
            HostOptions {
                prefer_advanced_api,
                use_reduced_precision,
                ..HostOptions::default()
            },
        )
    }

    /// 按选项初始化
    ///
    /// 初始化顺序为 图形 → 输入 → 音频，第一个失败直接返回。
    pub fn with_options(
        surface: &HostSurface,
        options: HostOptions,
    ) -> Result<Self, HostInitializationError> {
        let graphics = SurfaceGraphics::attach(
            surface,
            options.prefer_advanced_api,
            options.use_reduced_precision,
        )?;
        let input = SurfaceInput::bind(&graphics)?;
        let audio = MixerAudio::new(options.audio)?;
        audio.set_master_volume(options.master_volume);

        info!(
            surface = %surface.id(),
            host_type = %options.host_type,
            "宿主初始化完成"
        );

        Ok(Self {
            graphics,
            input,
            audio,
            state: HostState::new(&options),
        })
    }

    /// 按配置初始化
    pub fn from_config(surface: &HostSurface, config: &HostConfig) -> Result<Self, HostError> {
        let options = HostOptions::from_config(config)?;
        Ok(Self::with_options(surface, options)?)
    }

    /// 具体图形子系统（宿主 UI 用它报告尺寸变化、读取后备缓冲）
    pub fn surface_graphics(&self) -> &SurfaceGraphics {
        &self.graphics
    }

    /// 具体输入子系统（宿主 UI 的事件循环向它提交事件）
    pub fn surface_input(&self) -> &SurfaceInput {
        &self.input
    }

    pub fn mixer_audio(&self) -> &MixerAudio {
        &self.audio
    }
}

impl Application for EmbeddedApplication {
    fn graphics(&self) -> &dyn Graphics {
        &self.graphics
    }

    fn input(&self) -> &dyn Input {
        &self.input
    }

    fn audio(&self) -> &dyn Audio {
        &self.audio
    }

    fn files(&self) -> Box<dyn Files> {
        self.state.files.open()
    }

    fn set_application_listener(&mut self, listener: SharedListener) {
        self.state.listener = Some(listener);
    }

    fn application_listener(&self) -> Option<SharedListener> {
        self.state.listener.clone()
    }

    fn log(&self, tag: &str, message: &str) {
        self.state.log(tag, message);
    }

    fn log_sink(&self) -> SharedLogSink {
        self.state.log_sink.clone()
    }

    fn host_type(&self) -> HostType {
        self.state.host_type
    }
}
