//! # Surface 模块
//!
//! 宿主 UI 表面的句柄，以及图形与输入共同绑定的渲染区域。
//!
//! 表面的显示、缩放、销毁事件由宿主 UI 负责，这里只描述附着时需要的信息。

use std::cell::Cell;
use std::fmt;

/// 表面标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

/// 表面能力
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceCapabilities {
    /// 支持基础渲染接口
    pub baseline_api: bool,
    /// 支持高级渲染接口
    pub advanced_api: bool,
    /// 可以采集输入事件
    pub input_capture: bool,
}

impl Default for SurfaceCapabilities {
    fn default() -> Self {
        Self {
            baseline_api: true,
            advanced_api: true,
            input_capture: true,
        }
    }
}

/// 宿主提供的 UI 表面
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostSurface {
    id: SurfaceId,
    width: u32,
    height: u32,
    capabilities: SurfaceCapabilities,
    destroyed: bool,
}

impl HostSurface {
    pub fn new(id: SurfaceId, width: u32, height: u32) -> Self {
        Self {
            id,
            width,
            height,
            capabilities: SurfaceCapabilities::default(),
            destroyed: false,
        }
    }

    pub fn with_capabilities(mut self, capabilities: SurfaceCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn capabilities(&self) -> SurfaceCapabilities {
        self.capabilities
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// 标记为已销毁（宿主 UI 回收了表面）
    pub fn destroy(&mut self) {
        self.destroyed = true;
    }

    /// 检查是否可以附着渲染上下文
    pub fn check_attachable(&self) -> Result<(), String> {
        if self.destroyed {
            return Err("表面已销毁".to_string());
        }
        if self.width == 0 || self.height == 0 {
            return Err(format!("表面尺寸无效: {}x{}", self.width, self.height));
        }
        Ok(())
    }
}

/// 渲染区域绑定
///
/// 图形子系统渲染进这块区域，输入子系统只接受落在这块区域内的事件。
/// 两者共享同一个绑定（`Rc`），尺寸变化对两边同时生效。
#[derive(Debug)]
pub struct SurfaceBinding {
    surface: SurfaceId,
    width: Cell<u32>,
    height: Cell<u32>,
    input_capture: bool,
}

impl SurfaceBinding {
    pub(crate) fn new(surface: &HostSurface) -> Self {
        let (width, height) = surface.size();
        Self {
            surface: surface.id(),
            width: Cell::new(width),
            height: Cell::new(height),
            input_capture: surface.capabilities().input_capture,
        }
    }

    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width.get(), self.height.get())
    }

    pub fn accepts_input(&self) -> bool {
        self.input_capture
    }

    /// 坐标是否落在渲染区域内
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let (width, height) = self.size();
        x >= 0 && y >= 0 && (x as i64) < width as i64 && (y as i64) < height as i64
    }

    /// 把坐标截断到渲染区域内
    pub fn clamp(&self, x: i32, y: i32) -> (i32, i32) {
        let (width, height) = self.size();
        let max_x = i32::try_from(width.saturating_sub(1)).unwrap_or(i32::MAX);
        let max_y = i32::try_from(height.saturating_sub(1)).unwrap_or(i32::MAX);
        (x.clamp(0, max_x), y.clamp(0, max_y))
    }

    pub(crate) fn resize(&self, width: u32, height: u32) {
        self.width.set(width);
        self.height.set(height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_attachable() {
        let mut surface = HostSurface::new(SurfaceId(1), 320, 240);
        assert!(surface.check_attachable().is_ok());

        surface.destroy();
        assert!(surface.check_attachable().is_err());

        let empty = HostSurface::new(SurfaceId(2), 0, 240);
        assert!(empty.check_attachable().is_err());
    }

    #[test]
    fn test_binding_contains() {
        let surface = HostSurface::new(SurfaceId(1), 100, 50);
        let binding = SurfaceBinding::new(&surface);

        assert!(binding.contains(0, 0));
        assert!(binding.contains(99, 49));
        assert!(!binding.contains(100, 10));
        assert!(!binding.contains(-1, 10));

        binding.resize(200, 100);
        assert!(binding.contains(150, 75));
    }

    #[test]
    fn test_binding_clamp() {
        let surface = HostSurface::new(SurfaceId(1), 100, 50);
        let binding = SurfaceBinding::new(&surface);

        assert_eq!(binding.clamp(500, -3), (99, 0));
        assert_eq!(binding.clamp(20, 30), (20, 30));
    }

    #[test]
    fn test_surface_id_display() {
        assert_eq!(SurfaceId(7).to_string(), "surface#7");
    }
}
