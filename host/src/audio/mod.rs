//! # Audio 模块
//!
//! 音频子系统实现，使用 rodio 的解码器。
//! 支持 MP3, WAV, FLAC, OGG 格式。
//!
//! ## 功能特性
//!
//! - 音效注册：解码校验并记录声道数、采样率、时长
//! - 声部管理：循环/单次播放、淡出停止、全局暂停
//! - 音量控制：主音量与声部音量分离，统一截断到 0.0 - 1.0
//!
//! ## 输出后端
//!
//! - [`AudioBackend::Device`]：打开系统默认输出设备（需要 `playback` 特性）
//! - [`AudioBackend::Silent`]：不输出声音，只维护播放状态（测试、无设备环境）

mod output;

use app_core::{
    Audio, AudioError, HostInitializationError, PlaybackOptions, SoundId, SubsystemKind, VoiceId,
};
use output::DeviceOutput;
use rodio::{Decoder, Source};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// 同时播放的声部上限
pub const MAX_VOICES: usize = 32;

/// 音频输出后端
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AudioBackend {
    /// 系统默认输出设备
    Device,
    /// 静音：只维护播放状态
    Silent,
}

impl Default for AudioBackend {
    /// 启用 `playback` 特性时默认输出到设备
    fn default() -> Self {
        if cfg!(feature = "playback") {
            Self::Device
        } else {
            Self::Silent
        }
    }
}

/// 已解码音效的元数据
#[derive(Debug, Clone, PartialEq)]
pub struct SoundInfo {
    pub channels: u16,
    pub sample_rate: u32,
    /// 时长；无法确定时为 None（声部不会自然结束）
    pub duration: Option<Duration>,
}

/// 解码音频数据并提取元数据
pub fn decode_sound(data: &[u8]) -> Result<SoundInfo, AudioError> {
    let decoder = Decoder::new(Cursor::new(data.to_vec())).map_err(|e| AudioError::Decode {
        message: e.to_string(),
    })?;

    let channels = u16::from(decoder.channels());
    let sample_rate = u32::from(decoder.sample_rate());
    let duration = match decoder.total_duration() {
        Some(duration) => Some(duration),
        None => {
            // 容器没有记录时长时，逐个采样计数
            let samples = decoder.count() as u64;
            let frames_per_second = channels as u64 * sample_rate as u64;
            (frames_per_second > 0)
                .then(|| Duration::from_secs_f64(samples as f64 / frames_per_second as f64))
        }
    };

    Ok(SoundInfo {
        channels,
        sample_rate,
        duration,
    })
}

/// 淡入淡出状态
#[derive(Debug, Clone, Copy, PartialEq)]
enum FadeState {
    /// 无淡入淡出
    None,
    /// 淡出中，完成后停止
    FadeOut {
        /// 每秒减少的音量
        rate: f32,
    },
}

#[derive(Debug, Clone)]
struct Sound {
    info: SoundInfo,
    /// 原始数据（设备播放时重新解码）
    data: Arc<[u8]>,
}

#[derive(Debug, Clone)]
struct Voice {
    sound: SoundId,
    volume: f32,
    looping: bool,
    /// 播放位置（秒）
    position: f32,
    fade: FadeState,
}

#[derive(Debug)]
struct MixerState {
    sounds: HashMap<SoundId, Sound>,
    voices: BTreeMap<VoiceId, Voice>,
    output: Option<DeviceOutput>,
    next_sound: u32,
    next_voice: u32,
    master_volume: f32,
    paused: bool,
}

/// 混音器音频子系统
#[derive(Debug)]
pub struct MixerAudio {
    state: RefCell<MixerState>,
}

impl Default for MixerAudio {
    fn default() -> Self {
        Self::silent()
    }
}

impl MixerAudio {
    /// 按后端创建音频子系统
    ///
    /// 设备后端无法打开输出设备时返回 `DeviceUnavailable`。
    pub fn new(backend: AudioBackend) -> Result<Self, HostInitializationError> {
        let output = match backend {
            AudioBackend::Silent => None,
            AudioBackend::Device => Some(DeviceOutput::open().map_err(|reason| {
                warn!(reason = %reason, "音频设备不可用");
                HostInitializationError::DeviceUnavailable {
                    subsystem: SubsystemKind::Audio,
                    reason,
                }
            })?),
        };

        info!(max_voices = MAX_VOICES, backend = ?backend, "音频子系统初始化完成");
        Ok(Self::with_output(output))
    }

    /// 静音音频子系统（不会失败）
    pub fn silent() -> Self {
        Self::with_output(None)
    }

    fn with_output(output: Option<DeviceOutput>) -> Self {
        Self {
            state: RefCell::new(MixerState {
                sounds: HashMap::new(),
                voices: BTreeMap::new(),
                output,
                next_sound: 0,
                next_voice: 0,
                master_volume: 1.0,
                paused: false,
            }),
        }
    }

    /// 是否输出到设备
    pub fn has_device(&self) -> bool {
        self.state.borrow().output.is_some()
    }

    /// 音效元数据
    pub fn sound_info(&self, sound: SoundId) -> Option<SoundInfo> {
        self.state
            .borrow()
            .sounds
            .get(&sound)
            .map(|s| s.info.clone())
    }

    /// 声部是否仍在播放（含暂停、淡出中）
    pub fn is_playing(&self, voice: VoiceId) -> bool {
        self.state.borrow().voices.contains_key(&voice)
    }

    /// 声部的有效音量（考虑主音量）
    pub fn effective_volume(&self, voice: VoiceId) -> Option<f32> {
        let state = self.state.borrow();
        state
            .voices
            .get(&voice)
            .map(|v| v.volume * state.master_volume)
    }

    pub fn is_paused(&self) -> bool {
        self.state.borrow().paused
    }
}

impl MixerState {
    /// 把声部表的变化同步到设备输出
    fn sync_output(&mut self) {
        if let Some(output) = &mut self.output {
            output.sync(&self.voices, self.master_volume);
        }
    }
}

impl Audio for MixerAudio {
    fn new_sound(&self, data: &[u8]) -> Result<SoundId, AudioError> {
        let info = decode_sound(data)?;
        let mut state = self.state.borrow_mut();
        let id = SoundId(state.next_sound);
        state.next_sound += 1;
        debug!(
            sound = id.0,
            channels = info.channels,
            sample_rate = info.sample_rate,
            duration = ?info.duration,
            "注册音效"
        );
        state.sounds.insert(
            id,
            Sound {
                info,
                data: Arc::from(data),
            },
        );
        Ok(id)
    }

    fn play(&self, sound: SoundId, options: PlaybackOptions) -> Result<VoiceId, AudioError> {
        let mut state = self.state.borrow_mut();
        let MixerState {
            sounds,
            voices,
            output,
            next_voice,
            master_volume,
            paused,
            ..
        } = &mut *state;

        let data = sounds
            .get(&sound)
            .map(|s| Arc::clone(&s.data))
            .ok_or(AudioError::UnknownSound { id: sound.0 })?;
        if voices.len() >= MAX_VOICES {
            return Err(AudioError::VoiceLimit { limit: MAX_VOICES });
        }

        let id = VoiceId(*next_voice);
        let volume = options.volume.clamp(0.0, 1.0);
        if let Some(output) = output {
            output.start(id, data, volume * *master_volume, options.looping, *paused)?;
        }
        *next_voice += 1;
        voices.insert(
            id,
            Voice {
                sound,
                volume,
                looping: options.looping,
                position: 0.0,
                fade: FadeState::None,
            },
        );
        debug!(sound = sound.0, voice = id.0, looping = options.looping, "开始播放");
        Ok(id)
    }

    fn stop(&self, voice: VoiceId, fade_out: Option<f32>) {
        let mut state = self.state.borrow_mut();

        if let Some(duration) = fade_out
            && duration > 0.0
            && let Some(v) = state.voices.get_mut(&voice)
            && v.volume > 0.0
        {
            v.fade = FadeState::FadeOut {
                rate: v.volume / duration,
            };
            debug!(voice = voice.0, duration, "声部淡出中");
            return;
        }

        if state.voices.remove(&voice).is_some() {
            state.sync_output();
            debug!(voice = voice.0, "声部已停止");
        }
    }

    fn pause_all(&self) {
        let mut state = self.state.borrow_mut();
        state.paused = true;
        if let Some(output) = &state.output {
            output.set_paused(true);
        }
        info!("音频已暂停");
    }

    fn resume_all(&self) {
        let mut state = self.state.borrow_mut();
        state.paused = false;
        if let Some(output) = &state.output {
            output.set_paused(false);
        }
        info!("音频已恢复");
    }

    fn set_master_volume(&self, volume: f32) {
        let mut state = self.state.borrow_mut();
        state.master_volume = volume.clamp(0.0, 1.0);
        state.sync_output();
    }

    fn master_volume(&self) -> f32 {
        self.state.borrow().master_volume
    }

    fn active_voices(&self) -> usize {
        self.state.borrow().voices.len()
    }

    fn update(&self, dt: f32) {
        let mut state = self.state.borrow_mut();
        if state.paused || dt <= 0.0 {
            return;
        }

        let MixerState { sounds, voices, .. } = &mut *state;
        voices.retain(|_, voice| {
            if let FadeState::FadeOut { rate } = voice.fade {
                voice.volume -= rate * dt;
                if voice.volume <= 0.0 {
                    return false;
                }
            }

            voice.position += dt;
            let length = sounds
                .get(&voice.sound)
                .and_then(|s| s.info.duration)
                .map(|d| d.as_secs_f32());
            match length {
                Some(length) if voice.position >= length => {
                    if voice.looping && length > 0.0 {
                        voice.position %= length;
                        true
                    } else {
                        false
                    }
                }
                _ => true,
            }
        });
        state.sync_output();
    }
}
