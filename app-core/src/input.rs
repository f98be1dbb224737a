//! # Input 契约
//!
//! 输入子系统从宿主表面采集原始事件，对外只提供轮询查询。

/// 键码
///
/// 数值与具体平台无关，由宿主在提交事件前完成映射。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const ENTER: KeyCode = KeyCode(13);
    pub const ESCAPE: KeyCode = KeyCode(27);
    pub const SPACE: KeyCode = KeyCode(32);
    pub const LEFT: KeyCode = KeyCode(37);
    pub const UP: KeyCode = KeyCode(38);
    pub const RIGHT: KeyCode = KeyCode(39);
    pub const DOWN: KeyCode = KeyCode(40);
}

/// 指针按键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

/// 已被接受的输入事件
///
/// 坐标相对于渲染区域左上角。
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    KeyTyped(char),
    PointerDown { x: i32, y: i32, button: PointerButton },
    PointerUp { x: i32, y: i32, button: PointerButton },
    PointerMoved { x: i32, y: i32 },
    Scrolled { amount: i32 },
}

/// 输入子系统
pub trait Input {
    /// 指针最后一次位于渲染区域内的位置
    fn pointer_position(&self) -> (i32, i32);

    /// 是否有指针按键处于按下状态
    fn is_touched(&self) -> bool;

    fn is_button_pressed(&self, button: PointerButton) -> bool;

    fn is_key_pressed(&self, key: KeyCode) -> bool;

    /// 尚未取走的事件数
    fn pending_events(&self) -> usize;

    /// 按到达顺序取走所有待处理事件
    fn drain_events(&self) -> Vec<InputEvent>;
}
