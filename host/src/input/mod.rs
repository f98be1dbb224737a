//! # Input 模块
//!
//! 输入子系统实现。
//!
//! ## 设计说明
//!
//! - 宿主 UI 的事件循环把已映射的事件通过 [`SurfaceInput::submit`] 交给输入子系统
//! - 只接受落在渲染区域内的指针事件，与图形子系统渲染的区域完全一致
//! - 按键/指针状态即时更新，事件按到达顺序排队，供应用轮询取走

use crate::graphics::SurfaceGraphics;
use crate::surface::SurfaceBinding;
use app_core::{
    HostInitializationError, Input, InputEvent, KeyCode, PointerButton, SubsystemKind,
};
use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;
use tracing::{debug, info, warn};

/// 待处理事件上限，超出时丢弃最早的事件
const MAX_PENDING_EVENTS: usize = 1024;

#[derive(Debug, Default)]
struct InputState {
    pointer: (i32, i32),
    buttons: HashSet<PointerButton>,
    keys: HashSet<KeyCode>,
    queue: VecDeque<InputEvent>,
}

impl InputState {
    fn enqueue(&mut self, event: InputEvent) {
        if self.queue.len() >= MAX_PENDING_EVENTS {
            self.queue.pop_front();
            warn!(limit = MAX_PENDING_EVENTS, "输入事件积压，丢弃最早的事件");
        }
        self.queue.push_back(event);
    }
}

/// 表面输入子系统
#[derive(Debug)]
pub struct SurfaceInput {
    binding: Rc<SurfaceBinding>,
    state: RefCell<InputState>,
}

impl SurfaceInput {
    /// 绑定到图形子系统所渲染的区域
    pub fn bind(graphics: &SurfaceGraphics) -> Result<Self, HostInitializationError> {
        let binding = graphics.binding();
        if !binding.accepts_input() {
            return Err(HostInitializationError::SurfaceUnusable {
                subsystem: SubsystemKind::Input,
                surface: binding.surface().to_string(),
                reason: "表面不接受输入事件".to_string(),
            });
        }

        info!(surface = %binding.surface(), "输入子系统初始化完成");
        Ok(Self {
            binding,
            state: RefCell::new(InputState::default()),
        })
    }

    /// 提交一个来自宿主 UI 的事件
    ///
    /// 返回事件是否被接受。渲染区域外的指针事件会被丢弃，
    /// 只有松开一个已按下的按键时例外（坐标截断到区域边缘后入队）。
    pub fn submit(&self, event: InputEvent) -> bool {
        let mut state = self.state.borrow_mut();

        match event {
            InputEvent::PointerDown { x, y, button } => {
                if !self.binding.contains(x, y) {
                    debug!(x, y, "指针按下位于渲染区域外，已忽略");
                    return false;
                }
                state.pointer = (x, y);
                state.buttons.insert(button);
            }
            InputEvent::PointerUp { x, y, button } => {
                // 区域外松开也要释放按键，并以截断后的坐标入队，保证按下/松开成对出现
                if !self.binding.contains(x, y) {
                    if !state.buttons.remove(&button) {
                        debug!(x, y, "指针松开位于渲染区域外，已忽略");
                        return false;
                    }
                    let (x, y) = self.binding.clamp(x, y);
                    state.enqueue(InputEvent::PointerUp { x, y, button });
                    return true;
                }
                state.buttons.remove(&button);
                state.pointer = (x, y);
            }
            InputEvent::PointerMoved { x, y } => {
                if !self.binding.contains(x, y) {
                    return false;
                }
                state.pointer = (x, y);
            }
            InputEvent::KeyDown(key) => {
                state.keys.insert(key);
            }
            InputEvent::KeyUp(key) => {
                state.keys.remove(&key);
            }
            InputEvent::KeyTyped(_) | InputEvent::Scrolled { .. } => {}
        }

        state.enqueue(event);
        true
    }

    /// 清空所有状态（表面失去焦点时调用）
    pub fn reset(&self) {
        *self.state.borrow_mut() = InputState::default();
    }
}

impl Input for SurfaceInput {
    fn pointer_position(&self) -> (i32, i32) {
        self.state.borrow().pointer
    }

    fn is_touched(&self) -> bool {
        !self.state.borrow().buttons.is_empty()
    }

    fn is_button_pressed(&self, button: PointerButton) -> bool {
        self.state.borrow().buttons.contains(&button)
    }

    fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.state.borrow().keys.contains(&key)
    }

    fn pending_events(&self) -> usize {
        self.state.borrow().queue.len()
    }

    fn drain_events(&self) -> Vec<InputEvent> {
        self.state.borrow_mut().queue.drain(..).collect()
    }
}

/// 无头输入子系统：永远没有输入
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessInput;

impl Input for HeadlessInput {
    fn pointer_position(&self) -> (i32, i32) {
        (0, 0)
    }

    fn is_touched(&self) -> bool {
        false
    }

    fn is_button_pressed(&self, _button: PointerButton) -> bool {
        false
    }

    fn is_key_pressed(&self, _key: KeyCode) -> bool {
        false
    }

    fn pending_events(&self) -> usize {
        0
    }

    fn drain_events(&self) -> Vec<InputEvent> {
        Vec::new()
    }
}
