//! # Graphics 契约
//!
//! 图形子系统拥有渲染表面与渲染上下文，对外提供能力查询和帧时间数据。

use std::time::Instant;

/// 协商得到的渲染接口
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderApi {
    /// 基础（传统）渲染接口
    Baseline,
    /// 高级渲染接口
    Advanced,
}

/// RGBA 颜色，分量范围 0.0 - 1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// 转换为 8 位分量（超出范围的值会被截断）
    pub fn to_rgba8(self) -> [u8; 4] {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b), channel(self.a)]
    }
}

/// 图形子系统
///
/// 所有方法以 `&self` 调用：句柄由宿主持有，帧时间等可变状态由实现内部维护。
pub trait Graphics {
    /// 渲染区域宽度（像素）
    fn width(&self) -> u32;

    /// 渲染区域高度（像素）
    fn height(&self) -> u32;

    /// 初始化时协商得到的渲染接口
    fn render_api(&self) -> RenderApi;

    /// 高级渲染接口是否可用
    ///
    /// 请求了高级接口但表面不支持时，初始化以降级模式成功，调用方必须通过这里查询。
    fn is_advanced_api_available(&self) -> bool {
        self.render_api() == RenderApi::Advanced
    }

    /// 是否启用了低精度数值模式
    fn uses_reduced_precision(&self) -> bool;

    /// 上一帧到本帧的间隔（秒）
    fn delta_time(&self) -> f32;

    /// 最近一整秒内的帧数
    fn frames_per_second(&self) -> u32;

    /// 已开始的帧数
    fn frame_id(&self) -> u64;

    /// 开始新的一帧，更新帧时间数据
    fn begin_frame(&self, now: Instant);

    /// 用单一颜色清空渲染区域
    fn clear(&self, color: Color);
}
