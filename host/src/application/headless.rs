//! 无头宿主
//!
//! 没有表面，构造不会失败。用于自动化测试与服务端运行应用逻辑。

use super::{HostOptions, HostState};
use crate::audio::MixerAudio;
use crate::graphics::HeadlessGraphics;
use crate::input::HeadlessInput;
use app_core::{
    Application, Audio, Files, Graphics, HostType, Input, SharedListener, SharedLogSink,
};
use tracing::info;

/// 无头宿主
pub struct HeadlessApplication {
    graphics: HeadlessGraphics,
    input: HeadlessInput,
    audio: MixerAudio,
    state: HostState,
}

impl Default for HeadlessApplication {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessApplication {
    pub fn new() -> Self {
        Self::with_options(HostOptions::default())
    }

    /// 按选项初始化
    ///
    /// 忽略渲染与音频后端选项；宿主类型固定为 `Headless`，音频总是静音。
    pub fn with_options(options: HostOptions) -> Self {
        let audio = MixerAudio::silent();
        audio.set_master_volume(options.master_volume);

        let mut state = HostState::new(&options);
        state.host_type = HostType::Headless;

        info!("无头宿主初始化完成");
        Self {
            graphics: HeadlessGraphics::new(),
            input: HeadlessInput,
            audio,
            state,
        }
    }

    pub fn mixer_audio(&self) -> &MixerAudio {
        &self.audio
    }
}

impl Application for HeadlessApplication {
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

#[cfg(test)]
mod tests {
    use super::*;
    use app_core::{ApplicationListener, RenderApi, shared_listener};
    use std::time::{Duration, Instant};

    struct Noop;
    impl ApplicationListener for Noop {}

    #[test]
    fn test_headless_subsystems() {
        let app = HeadlessApplication::new();
        assert_eq!(app.host_type(), HostType::Headless);
        assert_eq!(app.graphics().render_api(), RenderApi::Baseline);
        assert_eq!((app.graphics().width(), app.graphics().height()), (0, 0));
        assert_eq!(app.input().pending_events(), 0);
        assert!(app.input().drain_events().is_empty());

        let start = Instant::now();
        app.graphics().begin_frame(start);
        app.graphics().begin_frame(start + Duration::from_millis(16));
        assert_eq!(app.graphics().frame_id(), 2);
    }

    #[test]
    fn test_host_type_is_forced_to_headless() {
        let app = HeadlessApplication::with_options(HostOptions {
            host_type: HostType::Desktop,
            ..HostOptions::default()
        });
        assert_eq!(app.host_type(), HostType::Headless);
    }

    #[test]
    fn test_listener_registration() {
        let mut app = HeadlessApplication::new();
        assert!(app.application_listener().is_none());
        app.set_application_listener(shared_listener(Noop));
        assert!(app.application_listener().is_some());
    }
}
