//! # 应用配置加载
//!
//! 从 `<数据目录>/config.json` 加载 `AppConfig`。
//! 文件不存在或解析失败时静默使用默认配置（AI 助手使用内置模型与温度）。

use std::path::Path;

use crate::models::settings::AppConfig;
use crate::utils::path;

/// 读取配置文件，任何失败都返回默认配置
pub fn load_config(data_dir: &Path) -> AppConfig {
    let config_path = path::get_config_path(data_dir);

    if !config_path.exists() {
        return AppConfig::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("解析配置文件 {} 失败，使用默认配置: {}", config_path.display(), e);
            AppConfig::default()
        }),
        Err(e) => {
            log::warn!("读取配置文件 {} 失败: {}", config_path.display(), e);
            AppConfig::default()
        }
    }
}
