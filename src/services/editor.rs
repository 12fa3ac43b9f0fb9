//! # 订单编辑器
//!
//! 把用户在表单中输入的草稿（`OrderDraft`）校验为一条完整的订单记录，
//! 并按新建或编辑两种方式写回订单存储。
//!
//! 校验失败以 `Result` 返回，由界面层决定如何提示（对话框、行内文字、终端输出）。

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{OrderError, RequiredField};
use crate::models::order::{Order, OrderStatus};
use crate::services::store::{OrderStore, UpsertMode};

/// 订单表单草稿
///
/// 字段与 `Order` 一致，但不保证满足任何约束。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub id: String,
    pub customer_name: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub style_code: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub dimensions: String,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub location: String,
}

impl OrderDraft {
    /// 新建订单的空白草稿
    ///
    /// 预填临时编号（`ORD-` + 5 位随机数字）、当天日期（UTC）和 `PROCESSING` 状态，
    /// 用户可以在提交前修改编号。
    pub fn blank() -> Self {
        Self {
            id: provisional_id(),
            customer_name: String::new(),
            product_name: String::new(),
            style_code: String::new(),
            date: Utc::now().format("%Y-%m-%d").to_string(),
            dimensions: String::new(),
            status: OrderStatus::Processing,
            location: String::new(),
        }
    }

    /// 以已有订单为初始内容的编辑草稿
    pub fn from_order(order: &Order) -> Self {
        Self {
            id: order.id.clone(),
            customer_name: order.customer_name.clone(),
            product_name: order.product_name.clone(),
            style_code: order.style_code.clone(),
            date: order.date.clone(),
            dimensions: order.dimensions.clone(),
            status: order.status,
            location: order.location.clone().unwrap_or_default(),
        }
    }
}

/// 生成临时订单编号，如 `ORD-04217`
pub fn provisional_id() -> String {
    let n: u32 = rand::thread_rng().gen_range(0..100_000);
    format!("ORD-{:05}", n)
}

/// 校验草稿并生成订单记录
///
/// 订单编号和客户名称去除首尾空白后不能为空。编号以去除空白后的值保存，
/// 其余字段原样保留；空的位置字段保存为 `None`。
pub fn validate(draft: &OrderDraft) -> Result<Order, OrderError> {
    let id = draft.id.trim();
    if id.is_empty() {
        return Err(OrderError::Validation {
            field: RequiredField::Id,
        });
    }
    if draft.customer_name.trim().is_empty() {
        return Err(OrderError::Validation {
            field: RequiredField::CustomerName,
        });
    }

    Ok(Order {
        id: id.to_string(),
        customer_name: draft.customer_name.clone(),
        product_name: draft.product_name.clone(),
        style_code: draft.style_code.clone(),
        date: draft.date.clone(),
        dimensions: draft.dimensions.clone(),
        status: draft.status,
        location: Some(draft.location.clone()).filter(|l| !l.trim().is_empty()),
    })
}

/// 编辑目标
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "id")]
pub enum EditTarget {
    /// 新建订单
    New,
    /// 编辑已有订单，携带原始编号
    Existing(String),
}

/// 一次表单编辑会话：编辑目标 + 草稿
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderEditor {
    target: EditTarget,
    pub draft: OrderDraft,
}

impl OrderEditor {
    /// 打开新建表单
    pub fn create() -> Self {
        Self {
            target: EditTarget::New,
            draft: OrderDraft::blank(),
        }
    }

    /// 打开编辑表单
    pub fn edit(order: &Order) -> Self {
        Self {
            target: EditTarget::Existing(order.id.clone()),
            draft: OrderDraft::from_order(order),
        }
    }

    pub fn target(&self) -> &EditTarget {
        &self.target
    }

    /// 提交表单
    ///
    /// - 新建：编号已存在时返回 `DuplicateId`，存储保持不变
    /// - 编辑：订单身份固定为原始编号，草稿中对编号的修改被忽略，
    ///   编辑后的字段整体替换原记录
    pub fn submit(&self, store: &mut OrderStore) -> Result<Order, OrderError> {
        submit(&self.target, &self.draft, store)
    }
}

/// 校验草稿并按编辑目标写入存储
pub fn submit(
    target: &EditTarget,
    draft: &OrderDraft,
    store: &mut OrderStore,
) -> Result<Order, OrderError> {
    let mut order = validate(draft)?;
    let mode = match target {
        EditTarget::New => UpsertMode::Create,
        EditTarget::Existing(original_id) => {
            order.id = original_id.clone();
            UpsertMode::Replace {
                id: original_id.clone(),
            }
        }
    };

    store.upsert(order.clone(), mode)?;
    log::info!("已保存订单 {}", order.id);
    Ok(order)
}
