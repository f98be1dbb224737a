//! # Listener 模块
//!
//! 平台无关的应用主体。
//!
//! 宿主只保存监听器的共享引用，生命周期回调由外围运行时调用，
//! 宿主自己从不调用 `dispose`。

use crate::application::Application;
use std::cell::RefCell;
use std::rc::Rc;

/// 应用监听器
///
/// 所有回调默认为空操作。
pub trait ApplicationListener {
    /// 宿主准备就绪后调用一次
    fn create(&mut self, _app: &dyn Application) {}

    /// 渲染区域尺寸变化
    fn resize(&mut self, _width: u32, _height: u32) {}

    /// 每帧调用
    fn render(&mut self, _app: &dyn Application) {}

    fn pause(&mut self) {}

    fn resume(&mut self) {}

    /// 运行时结束前调用一次
    fn dispose(&mut self) {}
}

/// 监听器共享引用
///
/// 单线程模型：宿主与外围运行时在同一控制线程上访问监听器。
pub type SharedListener = Rc<RefCell<dyn ApplicationListener>>;

/// 包装为共享引用
pub fn shared_listener<L: ApplicationListener + 'static>(listener: L) -> SharedListener {
    Rc::new(RefCell::new(listener))
}
