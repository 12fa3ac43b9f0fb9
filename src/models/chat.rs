//! # 聊天消息数据模型
//!
//! AI 助手聊天窗口中的消息与窗口可见状态。
//! 消息只追加、不修改，仅在重新启动应用时清空。

use serde::{Deserialize, Serialize};

/// 消息发送方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// 单条聊天消息
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface Message {
///   role: 'user' | 'model';
///   text: string;
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}

/// 聊天窗口可见状态：`Closed → Open ⇄ Minimized`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChatVisibility {
    #[default]
    Closed,
    Open,
    Minimized,
}

/// 聊天窗口快照，通过 IPC 整体返回给前端渲染
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSnapshot {
    pub visibility: ChatVisibility,
    /// 为 `true` 时前端禁用输入框与发送按钮
    pub sending: bool,
    pub messages: Vec<ChatMessage>,
}
