//! # 设置 Tauri Commands
//!
//! - `get_data_path` - 获取当前使用的数据目录
//! - `read_config` - 读取生效中的应用配置（只读，修改需编辑 `config.json` 后重启）

use tauri::State;

use crate::models::settings::AppConfig;
use crate::services::state::AppState;

/// 获取数据目录的绝对路径
///
/// 数据目录在启动时确定：`config.json` 中的 `dataDir`，否则为
/// `$CASLINK_DATA_DIR`，否则为 `~/.caslink/`。
///
/// # 返回值
/// 订单与语言偏好所在目录的绝对路径字符串
#[tauri::command]
pub async fn get_data_path(state: State<'_, AppState>) -> Result<String, String> {
    Ok(state.data_dir().to_string_lossy().to_string())
}

/// 读取生效中的应用配置
///
/// API 密钥不属于配置内容，只从环境变量读取，因此不会出现在返回值中。
///
/// # 返回值
/// 启动时加载的配置；配置文件缺失或损坏时为默认配置
#[tauri::command]
pub async fn read_config(state: State<'_, AppState>) -> Result<AppConfig, String> {
    Ok(state.config().clone())
}
