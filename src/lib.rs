//! # Caslink 物流追踪系统 - 应用核心
//!
//! 订单的列表、搜索筛选、新建、编辑、删除，以及把用户提问连同当前订单列表
//! 转发给生成式 AI 的物流助手。数据保存在本地数据目录中。
//!
//! ## 模块结构
//! - `commands/` - Tauri command 处理函数（IPC 接口层，`desktop` feature）
//! - `models/` - 数据模型（对应前端 TypeScript 类型）
//! - `services/` - 核心业务逻辑（存储、筛选、编辑、AI 助手、聊天会话）
//! - `utils/` - 通用工具函数
//!
//! 桌面端入口为 `run()`；终端界面见 `src/bin/caslink_cli.rs`。

#[cfg(feature = "desktop")]
mod commands;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(feature = "desktop")]
use tauri::Manager;

#[cfg(feature = "desktop")]
use services::state::AppState;

// 移动端（Android/iOS）编译时，此属性将 `run()` 标记为 Tauri 移动端入口点；
// 桌面端由 `main.rs` 直接调用。
#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
/// Tauri 应用启动函数
///
/// 1. 注册日志插件（仅调试构建）
/// 2. 在 `setup` 钩子中加载配置与本地数据，注册 `AppState`
/// 3. 注册所有自定义 Tauri commands
/// 4. 生成应用上下文并启动主事件循环
///
/// # Panics
/// Tauri 应用启动失败（例如配置文件缺失或窗口创建失败）时 panic。
pub fn run() {
    tauri::Builder::default()
        .invoke_handler(tauri::generate_handler![
            // 订单 commands
            commands::orders::list_orders,
            commands::orders::get_order,
            commands::orders::new_order_draft,
            commands::orders::save_order,
            commands::orders::delete_order,
            commands::orders::get_language,
            commands::orders::set_language,
            // AI 助手 commands
            commands::chat::get_chat,
            commands::chat::open_chat,
            commands::chat::close_chat,
            commands::chat::toggle_chat_minimized,
            commands::chat::send_chat_message,
            // 设置 commands
            commands::settings::get_data_path,
            commands::settings::read_config,
        ])
        .setup(|app| {
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }

            let data_dir = utils::path::get_data_path()?;
            let state = AppState::initialize(data_dir)?;
            app.manage(state);
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
