//! 音频设备输出
//!
//! 启用 `playback` 特性时，每个声部对应一个 rodio `Sink`，挂在默认输出设备的混音器上。
//! 未启用时 [`DeviceOutput`] 无法构造，打开设备总是失败。

use super::Voice;
use app_core::{AudioError, VoiceId};
use std::collections::BTreeMap;
use std::sync::Arc;

#[cfg(feature = "playback")]
pub(super) use device::DeviceOutput;

#[cfg(not(feature = "playback"))]
pub(super) use unavailable::DeviceOutput;

#[cfg(feature = "playback")]
mod device {
    use super::*;
    use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
    use std::collections::HashMap;
    use std::fmt;
    use std::io::Cursor;

    /// 默认输出设备
    pub(in crate::audio) struct DeviceOutput {
        /// 输出流（必须保持存活）
        stream: OutputStream,
        sinks: HashMap<VoiceId, Sink>,
    }

    impl DeviceOutput {
        pub(in crate::audio) fn open() -> Result<Self, String> {
            let mut stream = OutputStreamBuilder::open_default_stream()
                .map_err(|e| format!("无法初始化音频输出: {e}"))?;
            stream.log_on_drop(false);
            Ok(Self {
                stream,
                sinks: HashMap::new(),
            })
        }

        /// 为声部创建播放器并开始播放
        pub(in crate::audio) fn start(
            &mut self,
            voice: VoiceId,
            data: Arc<[u8]>,
            volume: f32,
            looping: bool,
            paused: bool,
        ) -> Result<(), AudioError> {
            let source = Decoder::new(Cursor::new(data)).map_err(|e| AudioError::Decode {
                message: e.to_string(),
            })?;

            let sink = Sink::connect_new(self.stream.mixer());
            sink.set_volume(volume);
            if looping {
                sink.append(source.repeat_infinite());
            } else {
                sink.append(source);
            }
            if paused {
                sink.pause();
            }
            self.sinks.insert(voice, sink);
            Ok(())
        }

        /// 与声部表同步：停止已结束的声部，刷新其余声部的音量
        pub(in crate::audio) fn sync(
            &mut self,
            voices: &BTreeMap<VoiceId, Voice>,
            master_volume: f32,
        ) {
            self.sinks.retain(|id, sink| match voices.get(id) {
                Some(voice) => {
                    sink.set_volume(voice.volume * master_volume);
                    true
                }
                None => {
                    sink.stop();
                    false
                }
            });
        }

        pub(in crate::audio) fn set_paused(&self, paused: bool) {
            for sink in self.sinks.values() {
                if paused {
                    sink.pause();
                } else {
                    sink.play();
                }
            }
        }
    }

    impl fmt::Debug for DeviceOutput {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("DeviceOutput")
                .field("sinks", &self.sinks.len())
                .finish_non_exhaustive()
        }
    }
}

#[cfg(not(feature = "playback"))]
mod unavailable {
    use super::*;

    /// 未启用 `playback` 特性：没有可用的输出设备
    #[derive(Debug)]
    pub(in crate::audio) enum DeviceOutput {}

    impl DeviceOutput {
        pub(in crate::audio) fn open() -> Result<Self, String> {
            Err("未启用 playback 特性，无法打开音频设备".to_string())
        }

        pub(in crate::audio) fn start(
            &mut self,
            _voice: VoiceId,
            _data: Arc<[u8]>,
            _volume: f32,
            _looping: bool,
            _paused: bool,
        ) -> Result<(), AudioError> {
            match *self {}
        }

        pub(in crate::audio) fn sync(
            &mut self,
            _voices: &BTreeMap<VoiceId, Voice>,
            _master_volume: f32,
        ) {
            match *self {}
        }

        pub(in crate::audio) fn set_paused(&self, _paused: bool) {
            match *self {}
        }
    }
}
