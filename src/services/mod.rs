//! # 业务逻辑服务模块
//!
//! 包含核心业务逻辑的实现，与 Tauri command 层和终端界面解耦：
//! - `storage` - 持久化端口与文件/内存实现
//! - `store` - 订单存储：订单列表与语言偏好的增删改查和持久化
//! - `filter` - 订单搜索与状态筛选
//! - `editor` - 订单表单草稿的校验与提交
//! - `assistant` - AI 物流助手桥接（Gemini 客户端）
//! - `chat` - 聊天窗口状态机
//! - `config` - 配置文件加载
//! - `i18n` - 业务层产生的本地化文本
//! - `state` - 组合以上服务的应用全局状态

pub mod assistant;
pub mod chat;
pub mod config;
pub mod editor;
pub mod filter;
pub mod i18n;
pub mod state;
pub mod storage;
pub mod store;
