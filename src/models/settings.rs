//! # 语言偏好与应用配置数据模型
//!
//! - `Language` - 界面语言偏好（zh / en / ms），独立于订单单独持久化
//! - `AppConfig` / `AssistantConfig` - 从 `~/.caslink/config.json` 加载的可选配置
//!
//! 配置文件缺失或解析失败时一律使用内置默认值，不影响应用启动。

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 界面语言偏好
///
/// 持久化为 2 字母语言代码。对应前端 TypeScript 类型：`'zh' | 'en' | 'ms'`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// 中文（默认）
    #[default]
    Zh,
    /// 英文
    En,
    /// 马来文
    Ms,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Zh, Language::En, Language::Ms];

    /// 语言代码（持久化值）
    pub fn code(self) -> &'static str {
        match self {
            Self::Zh => "zh",
            Self::En => "en",
            Self::Ms => "ms",
        }
    }

    /// 写入 AI 系统提示词的语言名称
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Zh => "Chinese",
            Self::En => "English",
            Self::Ms => "Malay",
        }
    }

    /// 宽松解析语言代码（忽略大小写与首尾空白）
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == normalized)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::parse(s).ok_or_else(|| format!("不支持的语言代码: {}（可选 zh / en / ms）", s))
    }
}

/// AI 助手配置
///
/// 对应配置文件中的 `assistant` 字段：
/// ```json
/// {
///   "assistant": {
///     "model": "gemini-3-flash-preview",
///     "temperature": 0.7,
///     "apiKeyEnv": "API_KEY",
///     "timeoutSecs": 30,
///     "maxContextOrders": 200
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssistantConfig {
    /// 模型标识
    pub model: String,

    /// 接口基础地址
    pub endpoint: String,

    /// 采样温度
    pub temperature: f32,

    /// 读取 API 密钥的环境变量名；密钥本身从不写入配置文件
    pub api_key_env: String,

    /// 远程调用超时（秒）。为 `None` 时不设超时
    pub timeout_secs: Option<u64>,

    /// 嵌入系统提示词的订单数量上限。为 `None` 时嵌入完整订单列表
    pub max_context_orders: Option<usize>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: "gemini-3-flash-preview".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            temperature: 0.7,
            api_key_env: "API_KEY".to_string(),
            timeout_secs: None,
            max_context_orders: None,
        }
    }
}

/// 应用配置
///
/// 配置文件路径：`~/.caslink/config.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// 订单与语言偏好的存储目录
    ///
    /// 为 `None` 时使用读取配置文件的目录（`--data-dir`、`$CASLINK_DATA_DIR` 或 `~/.caslink/`）；
    /// 设置后改为写入该目录，配置文件本身仍从原目录读取。
    pub data_dir: Option<PathBuf>,

    /// AI 助手配置
    pub assistant: AssistantConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_parse() {
        assert_eq!(Language::parse("EN"), Some(Language::En));
        assert_eq!(Language::parse(" ms "), Some(Language::Ms));
        assert_eq!(Language::parse("fr"), None);
        assert_eq!(Language::default(), Language::Zh);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"assistant":{"maxContextOrders":50}}"#).unwrap();
        assert_eq!(config.assistant.max_context_orders, Some(50));
        assert_eq!(config.assistant.temperature, 0.7);
        assert_eq!(config.assistant.model, "gemini-3-flash-preview");
        assert_eq!(config.data_dir, None);
    }
}
