//! # 路径工具函数
//!
//! 提供与数据目录相关的工具函数，包括：
//! - 获取 Caslink 数据目录路径（默认 `~/.caslink/`）
//! - 获取配置文件路径（`<数据目录>/config.json`）
//! - 校验存储键名，防止键名被解释为路径

use std::path::{Path, PathBuf};

/// 覆盖默认数据目录的环境变量
pub const DATA_DIR_ENV: &str = "CASLINK_DATA_DIR";

/// 获取 Caslink 数据目录的绝对路径
///
/// 优先使用环境变量 `CASLINK_DATA_DIR`，否则使用用户主目录下的 `.caslink` 文件夹。
/// 使用 `dirs` crate 获取跨平台的主目录路径。
///
/// # 错误
/// 未设置环境变量且无法确定用户主目录时返回错误信息。
///
/// # 示例
/// - Windows: `C:\Users\username\.caslink`
/// - Linux/macOS: `/home/username/.caslink`
pub fn get_data_path() -> Result<PathBuf, String> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().ok_or_else(|| "无法获取用户主目录".to_string())?;
    Ok(home.join(".caslink"))
}

/// 获取配置文件路径
pub fn get_config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.json")
}

/// 校验存储键名
///
/// 键名直接映射为数据目录下的文件名，只允许 ASCII 字母、数字、`_` 和 `-`，
/// 从而排除 `..`、路径分隔符等可能逃逸出数据目录的写法。
pub fn is_valid_storage_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_validation() {
        assert!(is_valid_storage_key("caslink_orders"));
        assert!(is_valid_storage_key("caslink-lang"));
        assert!(!is_valid_storage_key(""));
        assert!(!is_valid_storage_key("../orders"));
        assert!(!is_valid_storage_key("a/b"));
        assert!(!is_valid_storage_key("orders.json"));
    }

    #[test]
    fn test_config_path() {
        let dir = Path::new("data");
        assert_eq!(get_config_path(dir), dir.join("config.json"));
    }
}
