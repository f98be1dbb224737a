//! # 路径规范化模块
//!
//! 所有文件子系统实现共用的逻辑路径处理。
//!
//! ## 约定
//!
//! - 逻辑路径使用 `/` 作为分隔符（跨平台统一）
//! - 逻辑路径总是相对于某个根目录，不会越过根目录

/// 规范化逻辑路径
///
/// 处理路径组件，包括：
/// - 统一使用 `/` 分隔符
/// - 跳过空组件与 `.`
/// - 处理 `..`（到达根目录后不再向上）
///
/// # 示例
///
/// ```ignore
/// assert_eq!(normalize_logical_path("data/../sprites/hero.png"), "sprites/hero.png");
/// assert_eq!(normalize_logical_path("../../etc/passwd"), "etc/passwd");
/// ```
pub fn normalize_logical_path(path: &str) -> String {
    let unified = path.replace('\\', "/");

    let mut components: Vec<&str> = Vec::new();
    for component in unified.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                components.pop();
            }
            _ => components.push(component),
        }
    }

    components.join("/")
}

/// 拼接目录与文件名并规范化
pub fn join_logical(dir: &str, name: &str) -> String {
    let dir = normalize_logical_path(dir);
    if dir.is_empty() {
        normalize_logical_path(name)
    } else {
        normalize_logical_path(&format!("{dir}/{name}"))
    }
}

/// 目录前缀（用于在扁平索引中做前缀匹配），根目录为空串
pub fn dir_prefix(dir: &str) -> String {
    let dir = normalize_logical_path(dir);
    if dir.is_empty() { dir } else { format!("{dir}/") }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        assert_eq!(normalize_logical_path("sprites/hero.png"), "sprites/hero.png");
        assert_eq!(normalize_logical_path("./sprites/hero.png"), "sprites/hero.png");
        assert_eq!(normalize_logical_path("sprites\\hero.png"), "sprites/hero.png");
        assert_eq!(normalize_logical_path("sprites//hero.png"), "sprites/hero.png");
    }

    #[test]
    fn test_normalize_with_dotdot() {
        assert_eq!(
            normalize_logical_path("data/../sprites/hero.png"),
            "sprites/hero.png"
        );
        assert_eq!(normalize_logical_path("a/b/../../c/d.png"), "c/d.png");
    }

    #[test]
    fn test_normalize_never_escapes_root() {
        assert_eq!(normalize_logical_path("../../etc/passwd"), "etc/passwd");
        assert_eq!(normalize_logical_path("/abs/path.txt"), "abs/path.txt");
        assert_eq!(normalize_logical_path(".."), "");
    }

    #[test]
    fn test_join_and_prefix() {
        assert_eq!(join_logical("levels", "one.json"), "levels/one.json");
        assert_eq!(join_logical("", "one.json"), "one.json");
        assert_eq!(join_logical("levels/", "../one.json"), "one.json");
        assert_eq!(dir_prefix("levels"), "levels/");
        assert_eq!(dir_prefix("./"), "");
    }
}
