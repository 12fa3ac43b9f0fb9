//! # 数据模型模块
//!
//! 定义了与前端 TypeScript 类型一一对应的 Rust 数据结构。
//! 所有结构体均派生 `Serialize` / `Deserialize`，用于 Tauri IPC 传输和本地持久化。
//! - `order` - 订单、订单状态、状态筛选和种子数据
//! - `chat` - AI 助手聊天消息与窗口状态
//! - `settings` - 语言偏好与应用配置

pub mod chat;
pub mod order;
pub mod settings;
