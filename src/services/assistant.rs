//! # AI 物流助手桥接服务
//!
//! 把用户的一条聊天消息连同当前完整的订单列表发送给 Gemini 文本生成接口，返回文本回复。
//!
//! ## 系统提示词
//! 每次请求都会重新构造系统提示词，包含：
//! - 助手角色说明
//! - 目标回复语言（由界面语言一一映射）
//! - 订单列表的完整 JSON 序列化（缩进 2 空格）
//!
//! 订单列表不做检索或摘要，默认整体嵌入，请求体积随订单数量线性增长。
//! 可通过 `maxContextOrders` 配置限制嵌入的订单数量（取列表头部，即最新订单）。
//!
//! ## 失败处理
//! 任何传输或接口错误都在 `AssistantBridge::ask` 内部被吸收，
//! 转换为与界面语言对应的致歉文本返回，调用方不会收到错误。

use std::future::Future;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::error::AssistantError;
use crate::models::order::Order;
use crate::models::settings::{AssistantConfig, Language};
use crate::services::i18n::{self, Text};

/// 远程接口返回空文本时使用的占位回复
pub const EMPTY_REPLY: &str = "...";

/// 环境变量中未找到配置的密钥时，再尝试读取的变量名
pub const FALLBACK_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// 一次文本生成请求
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// 系统提示词
    pub system: String,
    /// 用户消息
    pub user: String,
    pub model: String,
    pub temperature: f32,
}

/// 文本生成接口
///
/// 生产环境由 `GeminiClient` 实现；测试中替换为本地实现，不需要网络。
pub trait CompletionClient: Send + Sync {
    fn complete(
        &self,
        request: CompletionRequest,
    ) -> impl Future<Output = Result<String, AssistantError>> + Send;
}

/// Gemini 客户端
pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    api_key_env: String,
}

impl GeminiClient {
    /// 根据配置创建客户端，API 密钥从环境变量读取
    ///
    /// 密钥缺失不会导致创建失败：此时每次请求都返回 `MissingApiKey`，
    /// 由 `AssistantBridge` 转换为致歉回复。
    pub fn from_env(config: &AssistantConfig) -> Result<Self, AssistantError> {
        let api_key = read_api_key(&config.api_key_env);
        if api_key.is_none() {
            log::warn!(
                "未在环境变量 {} / {} 中找到 API 密钥，AI 助手将不可用",
                config.api_key_env,
                FALLBACK_API_KEY_ENV
            );
        }
        Self::new(config, api_key)
    }

    pub fn new(config: &AssistantConfig, api_key: Option<String>) -> Result<Self, AssistantError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| AssistantError::Http(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key,
            api_key_env: config.api_key_env.clone(),
        })
    }

    fn build_url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, model)
    }
}

/// 读取 API 密钥：先读配置的环境变量，再读 `GEMINI_API_KEY`
fn read_api_key(env_name: &str) -> Option<String> {
    [env_name, FALLBACK_API_KEY_ENV]
        .into_iter()
        .filter_map(|name| std::env::var(name).ok())
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

// ============ Gemini 请求/响应结构 ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    system_instruction: GeminiSystemInstruction,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: &'static str,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiSystemInstruction {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    error: Option<GeminiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContentResponse>,
}

#[derive(Debug, Deserialize)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

/// 解析 Gemini 响应体，拼接首个候选的全部文本片段
///
/// 没有候选或候选没有内容时返回空字符串（由上层替换为占位回复）。
fn parse_response(body: &str) -> Result<String, AssistantError> {
    let parsed: GeminiResponse =
        serde_json::from_str(body).map_err(|e| AssistantError::Serialization(e.to_string()))?;

    if let Some(error) = parsed.error {
        return Err(AssistantError::Response(error.message));
    }

    let text = parsed
        .candidates
        .and_then(|c| c.into_iter().next())
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    Ok(text)
}

impl CompletionClient for GeminiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, AssistantError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AssistantError::MissingApiKey(self.api_key_env.clone()))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key).map_err(|e| AssistantError::Http(e.to_string()))?,
        );

        let body = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiPart { text: request.user }],
            }],
            system_instruction: GeminiSystemInstruction {
                parts: vec![GeminiPart {
                    text: request.system,
                }],
            },
            generation_config: GeminiGenerationConfig {
                temperature: request.temperature,
            },
        };

        let response = self
            .client
            .post(self.build_url(&request.model))
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| AssistantError::Http(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AssistantError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(AssistantError::Response(format!("HTTP {}: {}", status, text)));
        }

        parse_response(&text)
    }
}

// ============ 助手桥接 ============

/// AI 助手桥接
pub struct AssistantBridge<C> {
    client: C,
    config: AssistantConfig,
}

impl<C: CompletionClient> AssistantBridge<C> {
    pub fn new(client: C, config: AssistantConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// 构造系统提示词
    pub fn build_system_instruction(&self, orders: &[Order], lang: Language) -> String {
        let context = match self.config.max_context_orders {
            Some(limit) if orders.len() > limit => {
                log::debug!("订单上下文已截断：{} → {}", orders.len(), limit);
                &orders[..limit]
            }
            _ => orders,
        };

        // 序列化失败时退化为空数组
        let database = serde_json::to_string_pretty(context).unwrap_or_else(|e| {
            log::error!("序列化订单上下文失败: {}", e);
            "[]".to_string()
        });

        let language = lang.display_name();
        format!(
            "You are the logistics assistant for Caslink, a furniture and door logistics company.\n\
             The user's preferred language is {language}. Always reply in {language}.\n\
             \n\
             Current order database ({count} orders, newest first):\n\
             {database}\n\
             \n\
             Guidelines:\n\
             1. Keep answers short, accurate and professional.\n\
             2. When the user mentions an order ID, customer, product or style code, look it up in the database and report its status, date, dimensions and location.\n\
             3. If no matching order exists, say so and ask the user to double-check the tracking ID.\n\
             4. General logistics questions (shipping times, handling of large dimensions) may be answered from general knowledge.\n\
             5. Address the user as a customer support associate.",
            count = context.len(),
        )
    }

    /// 发送一轮对话
    ///
    /// # 返回值
    /// - 远程回复文本；回复为空时返回 `"..."`
    /// - 任何失败时返回与 `lang` 对应的致歉文本
    pub async fn ask(&self, user_text: &str, orders: &[Order], lang: Language) -> String {
        let request = CompletionRequest {
            system: self.build_system_instruction(orders, lang),
            user: user_text.to_string(),
            model: self.config.model.clone(),
            temperature: self.config.temperature,
        };

        match self.client.complete(request).await {
            Ok(reply) if reply.is_empty() => EMPTY_REPLY.to_string(),
            Ok(reply) => reply,
            Err(e) => {
                log::error!("AI 助手调用失败: {}", e);
                i18n::text(Text::AssistantUnavailable, lang).to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::models::order::seed_orders;

    /// 固定返回结果并记录收到的请求
    struct ScriptedClient {
        reply: Result<String, String>,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedClient {
        fn ok(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl CompletionClient for ScriptedClient {
        async fn complete(&self, request: CompletionRequest) -> Result<String, AssistantError> {
            self.seen.lock().unwrap().push(request);
            self.reply.clone().map_err(AssistantError::Http)
        }
    }

    #[tokio::test]
    async fn test_ask_returns_reply_and_sends_fixed_parameters() {
        let bridge = AssistantBridge::new(
            ScriptedClient::ok("ORD-2024-001 is processing."),
            AssistantConfig::default(),
        );
        let reply = bridge.ask("Where is ORD-2024-001?", &seed_orders(), Language::En).await;
        assert_eq!(reply, "ORD-2024-001 is processing.");

        let seen = bridge.client.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].user, "Where is ORD-2024-001?");
        assert_eq!(seen[0].model, "gemini-3-flash-preview");
        assert_eq!(seen[0].temperature, 0.7);
    }

    #[tokio::test]
    async fn test_empty_reply_becomes_placeholder() {
        let bridge = AssistantBridge::new(ScriptedClient::ok(""), AssistantConfig::default());
        assert_eq!(bridge.ask("hi", &[], Language::Zh).await, EMPTY_REPLY);
    }

    #[tokio::test]
    async fn test_failure_resolves_to_localized_apology() {
        let bridge = AssistantBridge::new(
            ScriptedClient::failing("quota exceeded"),
            AssistantConfig::default(),
        );
        for lang in Language::ALL {
            let reply = bridge.ask("hello", &seed_orders(), lang).await;
            assert_eq!(reply, i18n::text(Text::AssistantUnavailable, lang));
        }
    }

    #[tokio::test]
    async fn test_missing_api_key_resolves_to_apology() {
        let config = AssistantConfig {
            api_key_env: "CASLINK_TEST_UNSET_KEY".to_string(),
            ..Default::default()
        };
        let client = GeminiClient::new(&config, None).unwrap();
        let bridge = AssistantBridge::new(client, config);
        let reply = bridge.ask("hello", &[], Language::Ms).await;
        assert!(reply.starts_with("Maaf"));
    }

    #[test]
    fn test_system_instruction_embeds_language_and_full_orders() {
        let bridge = AssistantBridge::new(ScriptedClient::ok("x"), AssistantConfig::default());
        let orders = seed_orders();
        let prompt = bridge.build_system_instruction(&orders, Language::Ms);

        assert!(prompt.contains("Always reply in Malay"));
        for order in &orders {
            assert!(prompt.contains(&order.id));
        }
        assert!(prompt.contains("\"styleCode\": \"CSL-WN-404\""));
        assert!(prompt.contains("\"status\": \"READY TO PICK UP\""));
    }

    #[test]
    fn test_context_limit_keeps_newest_orders() {
        let config = AssistantConfig {
            max_context_orders: Some(2),
            ..Default::default()
        };
        let bridge = AssistantBridge::new(ScriptedClient::ok("x"), config);
        let prompt = bridge.build_system_instruction(&seed_orders(), Language::En);

        assert!(prompt.contains("ORD-2024-001"));
        assert!(prompt.contains("ORD-2024-005"));
        assert!(!prompt.contains("ORD-2024-009"));
        assert!(prompt.contains("(2 orders, newest first)"));
    }

    #[test]
    fn test_parse_response_joins_parts() {
        let body = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Hello "},{"text":"there"}]}}]}"#;
        assert_eq!(parse_response(body).unwrap(), "Hello there");
    }

    #[test]
    fn test_parse_response_without_candidates_is_empty() {
        assert_eq!(parse_response(r#"{"candidates":[]}"#).unwrap(), "");
        assert_eq!(parse_response(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap(), "");
    }

    #[test]
    fn test_parse_response_error_and_garbage() {
        let body = r#"{"error":{"code":403,"message":"API key not valid"}}"#;
        let err = parse_response(body).unwrap_err();
        assert!(matches!(err, AssistantError::Response(msg) if msg == "API key not valid"));
        assert!(matches!(parse_response("<html>"), Err(AssistantError::Serialization(_))));
    }

    #[test]
    fn test_build_url() {
        let config = AssistantConfig {
            endpoint: "https://example.test/v1beta/".to_string(),
            ..Default::default()
        };
        let client = GeminiClient::new(&config, Some("k".to_string())).unwrap();
        assert_eq!(
            client.build_url("gemini-3-flash-preview"),
            "https://example.test/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[tokio::test]
    #[ignore = "requires live GEMINI_API_KEY and network"]
    async fn test_live_gemini_round_trip() {
        let config = AssistantConfig {
            api_key_env: FALLBACK_API_KEY_ENV.to_string(),
            timeout_secs: Some(30),
            ..Default::default()
        };
        let client = GeminiClient::from_env(&config).expect("client should initialize");
        let bridge = AssistantBridge::new(client, config);
        let reply = bridge
            .ask("What is the status of ORD-2024-005?", &seed_orders(), Language::En)
            .await;
        assert!(!reply.trim().is_empty());
    }
}
