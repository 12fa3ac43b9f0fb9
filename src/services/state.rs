//! # 应用全局状态
//!
//! 桌面端通过 Tauri 的 `manage()` 注册，所有 command 函数通过 `State<AppState>` 访问；
//! 终端界面直接持有同一个结构。
//!
//! ## 线程安全
//! 订单存储与聊天会话分别由 `std::sync::Mutex` 保护。
//! AI 远程调用期间不持有任何锁：发送前在会话中登记发送中状态，
//! 拷贝一份订单快照后释放锁，远程调用完成后再加锁写回回复。

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::error::{ChatError, OrderError};
use crate::models::chat::ChatSnapshot;
use crate::models::order::{Order, StatusFilter};
use crate::models::settings::{AppConfig, Language};
use crate::services::assistant::{AssistantBridge, CompletionClient, GeminiClient};
use crate::services::chat::ChatSession;
use crate::services::config;
use crate::services::editor::{self, EditTarget, OrderDraft};
use crate::services::filter::filter_orders;
use crate::services::i18n::{self, Text};
use crate::services::storage::FileStore;
use crate::services::store::OrderStore;

pub struct AppState<C = GeminiClient> {
    store: Mutex<OrderStore>,
    chat: Mutex<ChatSession>,
    bridge: AssistantBridge<C>,
    data_dir: PathBuf,
    config: AppConfig,
}

/// 获取锁；锁中毒时仍取回内部数据，单个失败的操作不应使整个会话不可用
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// 进行中的聊天请求
///
/// 发送 future 在回复到达前被丢弃时，写入致歉回复并清除发送中标志，
/// 否则会话会一直停留在发送中状态。
struct PendingSend<'a> {
    chat: &'a Mutex<ChatSession>,
    lang: Language,
    settled: bool,
}

impl PendingSend<'_> {
    fn settle(mut self, reply: String) -> ChatSnapshot {
        self.settled = true;
        let mut chat = lock(self.chat);
        chat.finish_send(reply);
        chat.snapshot()
    }
}

impl Drop for PendingSend<'_> {
    fn drop(&mut self) {
        if !self.settled {
            log::warn!("聊天请求在回复到达前被取消");
            lock(self.chat).finish_send(i18n::text(Text::AssistantUnavailable, self.lang));
        }
    }
}

impl AppState<GeminiClient> {
    /// 按数据目录初始化完整的应用状态
    ///
    /// 读取配置文件（配置中的 `dataDir` 优先于传入目录），打开文件存储，
    /// 加载订单和语言偏好，并创建 Gemini 客户端。
    pub fn initialize(data_dir: PathBuf) -> Result<Self, String> {
        let config = config::load_config(&data_dir);
        let data_dir = match &config.data_dir {
            Some(redirect) => {
                log::info!(
                    "config.json 指定了 dataDir，数据目录由 {} 改为 {}",
                    data_dir.display(),
                    redirect.display()
                );
                redirect.clone()
            }
            None => data_dir,
        };

        let storage =
            FileStore::open(&data_dir).map_err(|e| format!("打开数据目录失败: {}", e))?;
        let store = OrderStore::load(Box::new(storage));

        let client = GeminiClient::from_env(&config.assistant)
            .map_err(|e| format!("创建 AI 客户端失败: {}", e))?;
        let bridge = AssistantBridge::new(client, config.assistant.clone());

        log::info!("数据目录: {}", data_dir.display());
        Ok(Self::new(store, bridge, data_dir, config))
    }
}

impl<C: CompletionClient> AppState<C> {
    pub fn new(
        store: OrderStore,
        bridge: AssistantBridge<C>,
        data_dir: PathBuf,
        config: AppConfig,
    ) -> Self {
        let chat = ChatSession::new(store.language());
        Self {
            store: Mutex::new(store),
            chat: Mutex::new(chat),
            bridge,
            data_dir,
            config,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    // ======== 订单 ========

    /// 搜索并筛选订单
    pub fn list_orders(&self, query: &str, status: StatusFilter) -> Vec<Order> {
        filter_orders(lock(&self.store).list(), query, status)
    }

    pub fn get_order(&self, id: &str) -> Option<Order> {
        lock(&self.store).get(id).cloned()
    }

    /// 新建表单的初始草稿
    pub fn new_order_draft(&self) -> OrderDraft {
        OrderDraft::blank()
    }

    /// 提交订单表单
    pub fn save_order(&self, target: &EditTarget, draft: &OrderDraft) -> Result<Order, OrderError> {
        editor::submit(target, draft, &mut lock(&self.store))
    }

    pub fn delete_order(&self, id: &str) -> bool {
        let removed = lock(&self.store).remove(id);
        if removed {
            log::info!("已删除订单 {}", id);
        }
        removed
    }

    pub fn language(&self) -> Language {
        lock(&self.store).language()
    }

    pub fn set_language(&self, lang: Language) {
        lock(&self.store).set_language(lang);
    }

    // ======== 聊天 ========

    pub fn chat_snapshot(&self) -> ChatSnapshot {
        lock(&self.chat).snapshot()
    }

    pub fn open_chat(&self) -> ChatSnapshot {
        let mut chat = lock(&self.chat);
        chat.open();
        chat.snapshot()
    }

    pub fn close_chat(&self) -> ChatSnapshot {
        let mut chat = lock(&self.chat);
        chat.close();
        chat.snapshot()
    }

    pub fn toggle_chat_minimized(&self) -> ChatSnapshot {
        let mut chat = lock(&self.chat);
        chat.toggle_minimized();
        chat.snapshot()
    }

    /// 发送一条聊天消息并等待 AI 回复
    ///
    /// 远程失败不会返回错误（回复为致歉文本）；只有会话状态不允许发送时才返回 `ChatError`。
    pub async fn send_chat_message(&self, text: &str) -> Result<ChatSnapshot, ChatError> {
        let message = lock(&self.chat).begin_send(text)?;

        let (orders, lang) = {
            let store = lock(&self.store);
            (store.list().to_vec(), store.language())
        };

        let pending = PendingSend {
            chat: &self.chat,
            lang,
            settled: false,
        };
        let reply = self.bridge.ask(&message, &orders, lang).await;
        Ok(pending.settle(reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssistantError;
    use crate::models::chat::{ChatRole, ChatVisibility};
    use crate::models::order::OrderStatus;
    use crate::models::settings::AssistantConfig;
    use crate::services::assistant::CompletionRequest;
    use crate::services::storage::MemoryStore;

    /// 把系统提示词中是否包含新订单作为回复返回
    struct EchoClient;

    impl CompletionClient for EchoClient {
        async fn complete(&self, request: CompletionRequest) -> Result<String, AssistantError> {
            Ok(format!(
                "{} / knows ORD-NEW: {}",
                request.user,
                request.system.contains("ORD-NEW")
            ))
        }
    }

    struct DownClient;

    impl CompletionClient for DownClient {
        async fn complete(&self, _request: CompletionRequest) -> Result<String, AssistantError> {
            Err(AssistantError::Http("connection refused".to_string()))
        }
    }

    /// 永远不返回的远程调用
    struct HangingClient;

    impl CompletionClient for HangingClient {
        async fn complete(&self, _request: CompletionRequest) -> Result<String, AssistantError> {
            std::future::pending().await
        }
    }

    fn state_with<C: CompletionClient>(client: C) -> AppState<C> {
        let store = OrderStore::load(Box::new(MemoryStore::new()));
        let bridge = AssistantBridge::new(client, AssistantConfig::default());
        AppState::new(store, bridge, PathBuf::from("unused"), AppConfig::default())
    }

    #[tokio::test]
    async fn test_chat_turn_uses_current_order_snapshot() {
        let state = state_with(EchoClient);

        let mut draft = state.new_order_draft();
        draft.id = "ORD-NEW".to_string();
        draft.customer_name = "Acme".to_string();
        state.save_order(&EditTarget::New, &draft).unwrap();

        state.open_chat();
        let snapshot = state.send_chat_message("status?").await.unwrap();

        assert!(!snapshot.sending);
        let last = snapshot.messages.last().unwrap();
        assert_eq!(last.role, ChatRole::Model);
        assert_eq!(last.text, "status? / knows ORD-NEW: true");
    }

    #[tokio::test]
    async fn test_remote_failure_is_absorbed_into_chat() {
        let state = state_with(DownClient);
        state.set_language(Language::En);
        state.open_chat();

        let snapshot = state.send_chat_message("hello").await.unwrap();
        assert_eq!(snapshot.messages.len(), 3);
        assert!(snapshot.messages[2].text.starts_with("I'm sorry"));
        assert!(!snapshot.sending);
    }

    #[tokio::test]
    async fn test_chat_requires_open_window() {
        let state = state_with(EchoClient);
        assert_eq!(
            state.send_chat_message("hi").await,
            Err(ChatError::NotOpen)
        );
        assert_eq!(state.toggle_chat_minimized().visibility, ChatVisibility::Closed);
    }

    #[tokio::test]
    async fn test_cancelled_send_releases_session() {
        let state = state_with(HangingClient);
        state.open_chat();

        // 轮询一次后丢弃发送 future
        tokio::select! {
            biased;
            _ = state.send_chat_message("one") => panic!("request should still be pending"),
            _ = std::future::ready(()) => {}
        }

        let snapshot = state.chat_snapshot();
        assert!(!snapshot.sending);
        assert_eq!(snapshot.messages.len(), 3);
        assert_eq!(snapshot.messages[1].text, "one");
        assert_eq!(
            snapshot.messages[2].text,
            i18n::text(Text::AssistantUnavailable, Language::Zh)
        );

        tokio::select! {
            biased;
            result = state.send_chat_message("two") => panic!("unexpected result: {:?}", result),
            _ = std::future::ready(()) => {}
        }
        let snapshot = state.chat_snapshot();
        assert_eq!(snapshot.messages[3].text, "two");
        assert!(!snapshot.sending);
    }

    #[test]
    fn test_order_operations_through_state() {
        let state = state_with(EchoClient);

        let processing = state.list_orders("", StatusFilter::Only(OrderStatus::Processing));
        assert_eq!(processing.len(), 2);

        assert!(state.delete_order("ORD-2024-001"));
        assert!(!state.delete_order("ORD-2024-001"));
        assert!(state.get_order("ORD-2024-001").is_none());
        assert_eq!(state.list_orders("", StatusFilter::All).len(), 3);

        let original = state.get_order("ORD-2024-012").unwrap();
        let mut draft = OrderDraft::from_order(&original);
        draft.status = OrderStatus::Delivered;
        let saved = state
            .save_order(&EditTarget::Existing(original.id.clone()), &draft)
            .unwrap();
        assert_eq!(saved.status, OrderStatus::Delivered);
        assert_eq!(state.list_orders("", StatusFilter::All).len(), 3);
    }

    #[test]
    fn test_initialize_from_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::initialize(dir.path().to_path_buf()).unwrap();
        assert_eq!(state.list_orders("", StatusFilter::All).len(), 4);

        state.set_language(Language::Ms);
        assert!(state.delete_order("ORD-2024-009"));

        let reopened = AppState::initialize(dir.path().to_path_buf()).unwrap();
        assert_eq!(reopened.language(), Language::Ms);
        assert_eq!(reopened.list_orders("", StatusFilter::All).len(), 3);
    }

    #[test]
    fn test_config_data_dir_redirects_storage() {
        let dir = tempfile::tempdir().unwrap();
        let redirect = dir.path().join("shared");
        let config = serde_json::json!({ "dataDir": redirect });
        std::fs::write(dir.path().join("config.json"), config.to_string()).unwrap();

        let state = AppState::initialize(dir.path().to_path_buf()).unwrap();
        assert_eq!(state.data_dir(), redirect.as_path());

        state.set_language(Language::En);
        assert!(redirect.join("caslink_lang").exists());
        assert!(!dir.path().join("caslink_lang").exists());
    }
}
