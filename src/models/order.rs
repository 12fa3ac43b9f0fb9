//! # 订单数据模型
//!
//! 定义物流订单（Order）、订单状态（OrderStatus）和列表状态筛选（StatusFilter）。
//!
//! 序列化格式与前端 TypeScript 类型保持一致（camelCase 字段名），
//! 同时也是本地持久化的存储格式。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::settings::Language;

/// 订单物流状态
///
/// 生命周期：PROCESSING → READY TO PICK UP / SHIPPED → DELIVERED。
///
/// 对应前端 TypeScript 枚举：
/// ```typescript
/// enum OrderStatus {
///   PROCESSING = 'PROCESSING',
///   READY_TO_PICK_UP = 'READY TO PICK UP',
///   DELIVERED = 'DELIVERED',
///   SHIPPED = 'SHIPPED'
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "PROCESSING")]
    Processing,
    /// 存储值中含空格，与已有的持久化数据兼容
    #[serde(rename = "READY TO PICK UP")]
    ReadyToPickUp,
    #[serde(rename = "SHIPPED")]
    Shipped,
    #[serde(rename = "DELIVERED")]
    Delivered,
}

impl OrderStatus {
    /// 按界面展示顺序排列的全部状态
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Processing,
        OrderStatus::ReadyToPickUp,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
    ];

    /// 持久化使用的原始字符串值
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Processing => "PROCESSING",
            Self::ReadyToPickUp => "READY TO PICK UP",
            Self::Shipped => "SHIPPED",
            Self::Delivered => "DELIVERED",
        }
    }

    /// 本地化的状态标签
    pub fn label(self, lang: Language) -> &'static str {
        match (self, lang) {
            (Self::Processing, Language::Zh) => "处理中",
            (Self::Processing, Language::En) => "Processing",
            (Self::Processing, Language::Ms) => "Sedang Diproses",
            (Self::ReadyToPickUp, Language::Zh) => "待提货",
            (Self::ReadyToPickUp, Language::En) => "Ready to Pick Up",
            (Self::ReadyToPickUp, Language::Ms) => "Sedia Diambil",
            (Self::Shipped, Language::Zh) => "已发货",
            (Self::Shipped, Language::En) => "Shipped",
            (Self::Shipped, Language::Ms) => "Telah Dihantar",
            (Self::Delivered, Language::Zh) => "已送达",
            (Self::Delivered, Language::En) => "Delivered",
            (Self::Delivered, Language::Ms) => "Telah Diterima",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    /// 宽松解析：忽略大小写，`_` `-` 与空格等价（终端输入 `ready_to_pick_up` 亦可）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['_', '-'], " ");
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| format!("未知的订单状态: {}", s))
    }
}

/// 物流订单
///
/// `id` 由用户指定，是整个订单集合的主键，必须唯一；
/// `id` 与 `customer_name` 不能为空。其余文本字段可为空字符串。
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface Order {
///   id: string;
///   customerName: string;
///   productName: string;
///   styleCode: string;
///   date: string;
///   dimensions: string;
///   status: OrderStatus;
///   location?: string;
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// 订单编号（主键）
    pub id: String,

    /// 客户名称
    pub customer_name: String,

    /// 产品名称
    #[serde(default)]
    pub product_name: String,

    /// 款式编码（如 "CSL-DX-101"）
    #[serde(default)]
    pub style_code: String,

    /// 业务日期（YYYY-MM-DD）
    #[serde(default)]
    pub date: String,

    /// 尺寸规格，自由文本（如 "2100 x 900 x 45 MM"）
    #[serde(default)]
    pub dimensions: String,

    /// 物流状态
    pub status: OrderStatus,

    /// 当前位置（可选）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// 订单列表的状态筛选
///
/// 序列化为 `"ALL"` 或具体的状态值，与前端 `OrderStatus | 'ALL'` 类型一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    #[serde(rename = "ALL")]
    All,
    #[serde(untagged)]
    Only(OrderStatus),
}

impl StatusFilter {
    /// 判断订单状态是否通过筛选
    pub fn matches(self, status: OrderStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

/// 内置种子订单列表
///
/// 本地存储中没有有效数据时（首次启动、数据损坏）使用。
pub fn seed_orders() -> Vec<Order> {
    #[allow(clippy::too_many_arguments)]
    fn seed(
        id: &str,
        customer_name: &str,
        product_name: &str,
        style_code: &str,
        date: &str,
        dimensions: &str,
        status: OrderStatus,
        location: &str,
    ) -> Order {
        Order {
            id: id.to_string(),
            customer_name: customer_name.to_string(),
            product_name: product_name.to_string(),
            style_code: style_code.to_string(),
            date: date.to_string(),
            dimensions: dimensions.to_string(),
            status,
            location: Some(location.to_string()),
        }
    }

    vec![
        seed(
            "ORD-2024-001",
            "Global Design Inc.",
            "CLASSIC OAK",
            "CSL-DX-101",
            "2024-11-10",
            "2100 x 900 x 45 MM",
            OrderStatus::Processing,
            "Warehouse A",
        ),
        seed(
            "ORD-2024-005",
            "Modern Spaces Ltd.",
            "MODERN SLATE",
            "CSL-MD-202",
            "2024-11-12",
            "2400 x 1200 x 55 MM",
            OrderStatus::ReadyToPickUp,
            "Loading Dock 4",
        ),
        seed(
            "ORD-2024-009",
            "Secure Homes Co.",
            "FROSTED SECURITY",
            "CSL-GL-303",
            "2024-11-08",
            "2050 x 850 x 40 MM",
            OrderStatus::Delivered,
            "Customer Premise",
        ),
        seed(
            "ORD-2024-012",
            "Aesthetic Arts",
            "WALNUT VENEEER",
            "CSL-WN-404",
            "2024-12-01",
            "1800 x 700 x 30 MM",
            OrderStatus::Processing,
            "Factory Floor 2",
        ),
    ]
}
