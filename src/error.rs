//! # 错误类型
//!
//! 业务层使用类型化错误，由调用方（Tauri command 或终端界面）决定如何呈现：
//! - `OrderError` - 订单校验失败、订单编号重复（可本地化为用户提示）
//! - `StorageError` - 本地持久化读写失败
//! - `AssistantError` - AI 远程调用失败（在 `AssistantBridge` 内部被完全吸收）
//! - `ChatError` - 聊天会话状态不允许发送

use thiserror::Error;

use crate::models::settings::Language;
use crate::services::i18n::{self, Text};

/// 订单必填字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Id,
    CustomerName,
}

impl RequiredField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::CustomerName => "customerName",
        }
    }
}

/// 订单编辑与写入错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// 必填字段为空（去除首尾空白后）
    #[error("缺少必填字段: {}", .field.as_str())]
    Validation { field: RequiredField },

    /// 新建订单的编号与已有订单冲突
    #[error("订单编号已存在: {0}")]
    DuplicateId(String),
}

impl OrderError {
    /// 面向用户的本地化提示文本
    pub fn localized(&self, lang: Language) -> &'static str {
        match self {
            Self::Validation { .. } => i18n::text(Text::RequiredFields, lang),
            Self::DuplicateId(_) => i18n::text(Text::DuplicateId, lang),
        }
    }
}

/// 本地键值存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("非法的存储键: {0:?}")]
    InvalidKey(String),

    #[error("存储读写失败: {0}")]
    Io(#[from] std::io::Error),
}

/// AI 远程调用错误
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("未配置 API 密钥（环境变量 {0}）")]
    MissingApiKey(String),

    #[error("HTTP 请求失败: {0}")]
    Http(String),

    #[error("远程接口返回错误: {0}")]
    Response(String),

    #[error("响应解析失败: {0}")]
    Serialization(String),
}

/// 聊天会话错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("上一条消息仍在发送中")]
    Busy,

    #[error("消息内容为空")]
    EmptyMessage,

    #[error("聊天窗口未展开")]
    NotOpen,
}
