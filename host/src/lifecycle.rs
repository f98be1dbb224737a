//! # 生命周期驱动
//!
//! 外围运行时的最小实现：持有宿主，按状态机把生命周期回调分发给已注册的监听器。
//!
//! ```text
//! Created ──start──► Running ◄──resume── Paused
//!                      │   └────pause────►  │
//!                      └──────stop──────────┴──► Stopped
//! ```
//!
//! 监听器必须在 `start` 之前注册；没有监听器时只推进状态，不分发回调。

use app_core::{Application, SharedListener};
use std::time::Instant;
use tracing::{debug, info, warn};

/// 运行状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Created,
    Running,
    Paused,
    Stopped,
}

/// 生命周期驱动器
pub struct LifecycleDriver<A: Application> {
    app: A,
    state: LifecycleState,
}

impl<A: Application> LifecycleDriver<A> {
    pub fn new(app: A) -> Self {
        Self {
            app,
            state: LifecycleState::Created,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    /// 可变访问宿主（用于在 `start` 之前注册监听器）
    pub fn app_mut(&mut self) -> &mut A {
        &mut self.app
    }

    pub fn into_inner(self) -> A {
        self.app
    }

    fn listener(&self) -> Option<SharedListener> {
        self.app.application_listener()
    }

    /// 启动：`create` 后紧跟一次 `resize`
    pub fn start(&mut self) {
        if self.state != LifecycleState::Created {
            warn!(state = ?self.state, "忽略重复的启动请求");
            return;
        }

        if let Some(listener) = self.listener() {
            let mut listener = listener.borrow_mut();
            listener.create(&self.app);
            let graphics = self.app.graphics();
            listener.resize(graphics.width(), graphics.height());
        }
        self.state = LifecycleState::Running;
        info!(host_type = %self.app.host_type(), "应用已启动");
    }

    /// 推进一帧
    ///
    /// 只在运行状态下生效；返回这一帧是否被渲染。
    pub fn frame(&mut self, now: Instant) -> bool {
        if self.state != LifecycleState::Running {
            debug!(state = ?self.state, "非运行状态，跳过帧");
            return false;
        }

        self.app.graphics().begin_frame(now);
        if let Some(listener) = self.listener() {
            listener.borrow_mut().render(&self.app);
        }
        true
    }

    /// 渲染区域尺寸变化（在宿主子系统已更新尺寸后调用）
    pub fn resize(&mut self, width: u32, height: u32) {
        if !matches!(self.state, LifecycleState::Running | LifecycleState::Paused) {
            warn!(state = ?self.state, width, height, "应用未启动，忽略尺寸变化");
            return;
        }
        if let Some(listener) = self.listener() {
            listener.borrow_mut().resize(width, height);
        }
    }

    pub fn pause(&mut self) {
        if self.state != LifecycleState::Running {
            warn!(state = ?self.state, "非运行状态，忽略暂停请求");
            return;
        }
        self.app.audio().pause_all();
        if let Some(listener) = self.listener() {
            listener.borrow_mut().pause();
        }
        self.state = LifecycleState::Paused;
        info!("应用已暂停");
    }

    pub fn resume(&mut self) {
        if self.state != LifecycleState::Paused {
            warn!(state = ?self.state, "非暂停状态，忽略恢复请求");
            return;
        }
        self.app.audio().resume_all();
        if let Some(listener) = self.listener() {
            listener.borrow_mut().resume();
        }
        self.state = LifecycleState::Running;
        info!("应用已恢复");
    }

    /// 停止：运行中先暂停，然后 `dispose`
    ///
    /// 从未启动过的应用直接进入停止状态，不调用 `dispose`。
    pub fn stop(&mut self) {
        match self.state {
            LifecycleState::Stopped => {
                warn!("应用已停止，忽略重复的停止请求");
                return;
            }
            LifecycleState::Created => {
                self.state = LifecycleState::Stopped;
                return;
            }
            LifecycleState::Running => self.pause(),
            LifecycleState::Paused => {}
        }

        if let Some(listener) = self.listener() {
            listener.borrow_mut().dispose();
        }
        self.state = LifecycleState::Stopped;
        info!("应用已停止");
    }
}
