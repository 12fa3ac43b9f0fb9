//! # Tauri Command 处理模块
//!
//! 本模块包含所有注册到 Tauri 的 command 处理函数。
//! 每个子模块对应一个功能域：
//! - `orders` - 订单列表、表单提交、删除与语言偏好
//! - `chat` - AI 助手聊天窗口
//! - `settings` - 数据目录与配置

pub mod chat;
pub mod orders;
pub mod settings;
