//! # AI 助手聊天会话
//!
//! 维护聊天窗口的可见状态、消息记录和发送中标志：
//!
//! ```text
//! Closed ──open──▶ Open ◀──toggle_minimized──▶ Minimized
//!   ▲                │                            │
//!   └─────close──────┴────────────close───────────┘
//! ```
//!
//! `begin_send` 进入发送中状态后，直到 `finish_send` 之前拒绝新的发送，
//! 保证同一会话任意时刻最多只有一个进行中的远程请求。
//! 远程调用本身不在此处执行，调用方在两次调用之间完成请求且不持有会话锁。

use crate::error::ChatError;
use crate::models::chat::{ChatMessage, ChatSnapshot, ChatVisibility};
use crate::models::settings::Language;
use crate::services::i18n::{self, Text};

#[derive(Debug, Clone)]
pub struct ChatSession {
    visibility: ChatVisibility,
    messages: Vec<ChatMessage>,
    sending: bool,
}

impl ChatSession {
    /// 创建会话，首条消息为对应语言的欢迎语
    pub fn new(lang: Language) -> Self {
        Self {
            visibility: ChatVisibility::Closed,
            messages: vec![ChatMessage::model(i18n::text(Text::AssistantWelcome, lang))],
            sending: false,
        }
    }

    pub fn visibility(&self) -> ChatVisibility {
        self.visibility
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn open(&mut self) {
        self.visibility = ChatVisibility::Open;
    }

    /// 关闭窗口；消息记录保留，进行中的请求仍会在完成后追加回复
    pub fn close(&mut self) {
        self.visibility = ChatVisibility::Closed;
    }

    /// 在展开与最小化之间切换；窗口关闭时无效果
    pub fn toggle_minimized(&mut self) {
        self.visibility = match self.visibility {
            ChatVisibility::Open => ChatVisibility::Minimized,
            ChatVisibility::Minimized => ChatVisibility::Open,
            ChatVisibility::Closed => ChatVisibility::Closed,
        };
    }

    /// 开始发送一条用户消息
    ///
    /// # 返回值
    /// 追加到记录中的用户消息原文，调用方用它发起远程请求
    ///
    /// # 错误
    /// - `NotOpen` - 窗口未展开（关闭或最小化时没有输入框）
    /// - `Busy` - 上一条消息仍在发送中
    /// - `EmptyMessage` - 消息去除空白后为空
    pub fn begin_send(&mut self, text: &str) -> Result<String, ChatError> {
        if self.visibility != ChatVisibility::Open {
            return Err(ChatError::NotOpen);
        }
        if self.sending {
            return Err(ChatError::Busy);
        }
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        self.messages.push(ChatMessage::user(text));
        self.sending = true;
        Ok(text.to_string())
    }

    /// 结束发送，追加模型回复并恢复输入
    pub fn finish_send(&mut self, reply: impl Into<String>) {
        self.messages.push(ChatMessage::model(reply));
        self.sending = false;
    }

    pub fn snapshot(&self) -> ChatSnapshot {
        ChatSnapshot {
            visibility: self.visibility,
            sending: self.sending,
            messages: self.messages.clone(),
        }
    }
}
