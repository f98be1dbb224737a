//! # Audio 契约
//!
//! 音频子系统拥有声音设备资源，对外提供播放操作。

use crate::error::AudioError;

/// 已注册音效的标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundId(pub u32);

/// 一次播放（声部）的标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VoiceId(pub u32);

/// 播放参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackOptions {
    /// 声部音量 (0.0 - 1.0)
    pub volume: f32,
    /// 是否循环
    pub looping: bool,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            volume: 1.0,
            looping: false,
        }
    }
}

impl PlaybackOptions {
    pub fn looping() -> Self {
        Self {
            looping: true,
            ..Self::default()
        }
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }
}

/// 音频子系统
pub trait Audio {
    /// 注册一段编码后的音频数据
    fn new_sound(&self, data: &[u8]) -> Result<SoundId, AudioError>;

    /// 开始播放
    fn play(&self, sound: SoundId, options: PlaybackOptions) -> Result<VoiceId, AudioError>;

    /// 停止声部
    ///
    /// - `fade_out`: 淡出时长（秒），None 表示立即停止
    fn stop(&self, voice: VoiceId, fade_out: Option<f32>);

    fn pause_all(&self);

    fn resume_all(&self);

    /// 设置主音量（截断到 0.0 - 1.0）
    fn set_master_volume(&self, volume: f32);

    fn master_volume(&self) -> f32;

    /// 正在播放或暂停中的声部数
    fn active_voices(&self) -> usize;

    /// 推进播放状态（每帧调用）
    fn update(&self, dt: f32);
}
