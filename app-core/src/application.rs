//! # Application 模块
//!
//! 宿主的统一接口。
//!
//! 每种宿主环境实现一次 [`Application`]；构造（初始化）由具体类型自己提供，
//! 因为初始化参数是平台相关的。外围运行时在启动时选定实现，之后只通过这里的接口访问宿主。

use crate::audio::Audio;
use crate::files::Files;
use crate::graphics::Graphics;
use crate::host_type::HostType;
use crate::input::Input;
use crate::listener::SharedListener;
use crate::log::SharedLogSink;

/// 应用宿主
///
/// 构造成功后，`graphics` / `input` / `audio` 在宿主整个生命周期内都可用；
/// 这些访问器都是纯读取，不会失败。
pub trait Application {
    /// 图形子系统
    fn graphics(&self) -> &dyn Graphics;

    /// 输入子系统（与图形子系统绑定在同一表面上）
    fn input(&self) -> &dyn Input;

    /// 音频子系统
    fn audio(&self) -> &dyn Audio;

    /// 文件子系统
    ///
    /// 每次调用都构造新的句柄，不做缓存；不同句柄之间没有共享的可变状态。
    fn files(&self) -> Box<dyn Files>;

    /// 注册应用监听器
    ///
    /// 替换（而不是排队）之前注册的监听器，不做任何校验。
    /// 必须在运行时开始分发回调之前调用，或由调用方自行同步。
    fn set_application_listener(&mut self, listener: SharedListener);

    /// 当前注册的监听器
    fn application_listener(&self) -> Option<SharedListener>;

    /// 向诊断输出写入一行 `"<tag>: <message>"`
    ///
    /// 永不失败。
    fn log(&self, tag: &str, message: &str);

    /// 诊断输出接收端（可交给后台线程使用）
    fn log_sink(&self) -> SharedLogSink;

    /// 宿主类型，构造后不再改变
    fn host_type(&self) -> HostType;
}
