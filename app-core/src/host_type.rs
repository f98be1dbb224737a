//! # HostType 模块
//!
//! 宿主环境的固定身份标识。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 宿主类型
///
/// 在宿主构造时确定，之后不再改变。外围运行时据此做环境相关的分支判断。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostType {
    /// 桌面窗口
    Desktop,
    /// 嵌入到外部页面/容器中的表面
    #[default]
    Embedded,
    /// 移动端外壳
    Mobile,
    /// 浏览器画布
    Web,
    /// 无头模式（无表面、无设备）
    Headless,
}

impl HostType {
    /// 返回稳定的字符串标识，用于诊断输出
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Embedded => "embedded",
            Self::Mobile => "mobile",
            Self::Web => "web",
            Self::Headless => "headless",
        }
    }

    /// 是否拥有可见的渲染表面
    pub const fn has_surface(self) -> bool {
        !matches!(self, Self::Headless)
    }
}

impl fmt::Display for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
