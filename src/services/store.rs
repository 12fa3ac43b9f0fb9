//! # 订单存储服务
//!
//! 持有订单列表和界面语言偏好，并通过注入的 `KeyValueStore` 端口持久化。
//!
//! ## 持久化策略
//! - 每次修改（新建、编辑、删除、切换语言）后同步写入完整数据
//! - 启动加载时，订单数据缺失、无法解析或违反约束（编号为空/重复、客户名称为空），
//!   一律回退到内置种子列表；语言值无效时回退到默认语言。两种情况都不会中断启动
//! - 写入失败只记录日志，内存中的修改保留，会话继续运行
//!
//! ## 顺序约定
//! 新建的订单插入列表头部（最新在前）；编辑保持原位置。

use std::collections::HashSet;

use crate::error::OrderError;
use crate::models::order::{seed_orders, Order};
use crate::models::settings::Language;
use crate::services::storage::KeyValueStore;

/// 订单列表的存储键
pub const ORDERS_KEY: &str = "caslink_orders";

/// 语言偏好的存储键
pub const LANG_KEY: &str = "caslink_lang";

/// 写入方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertMode {
    /// 新建订单：编号冲突时失败
    Create,
    /// 替换编号为 `id` 的订单；该编号不存在时按新订单插入头部
    Replace { id: String },
}

/// 写入结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Replaced,
}

/// 订单存储
///
/// 应用启动时构造一次，以引用传递给各个界面组件。
pub struct OrderStore {
    orders: Vec<Order>,
    language: Language,
    storage: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for OrderStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderStore")
            .field("orders", &self.orders.len())
            .field("language", &self.language)
            .finish()
    }
}

impl OrderStore {
    /// 从持久化存储加载订单和语言偏好
    ///
    /// 永不失败：任何读取或解析问题都会回退到默认值并记录警告日志。
    pub fn load(storage: Box<dyn KeyValueStore>) -> Self {
        let orders = load_orders(storage.as_ref());
        let language = load_language(storage.as_ref());
        log::info!("已加载 {} 条订单，界面语言 {}", orders.len(), language);
        Self {
            orders,
            language,
            storage,
        }
    }

    /// 全部订单，最新创建的在前
    pub fn list(&self) -> &[Order] {
        &self.orders
    }

    /// 按编号查询订单
    pub fn get(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// 写入订单
    ///
    /// - `Create`：编号已存在时返回 `DuplicateId`，列表保持不变；否则插入头部
    /// - `Replace { id }`：找到编号为 `id` 的订单则原位替换；否则插入头部。
    ///   如果新记录改用了另一个已被占用的编号，同样返回 `DuplicateId`
    pub fn upsert(&mut self, order: Order, mode: UpsertMode) -> Result<UpsertOutcome, OrderError> {
        let outcome = match mode {
            UpsertMode::Create => {
                if self.contains(&order.id) {
                    return Err(OrderError::DuplicateId(order.id));
                }
                self.orders.insert(0, order);
                UpsertOutcome::Inserted
            }
            UpsertMode::Replace { id } => {
                if order.id != id && self.contains(&order.id) {
                    return Err(OrderError::DuplicateId(order.id));
                }
                match self.orders.iter().position(|o| o.id == id) {
                    Some(index) => {
                        self.orders[index] = order;
                        UpsertOutcome::Replaced
                    }
                    None => {
                        self.orders.insert(0, order);
                        UpsertOutcome::Inserted
                    }
                }
            }
        };

        self.persist_orders();
        Ok(outcome)
    }

    /// 删除订单，编号不存在时为空操作
    ///
    /// # 返回值
    /// 是否确实删除了订单
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.orders.len();
        self.orders.retain(|o| o.id != id);
        let removed = self.orders.len() != before;
        if removed {
            self.persist_orders();
        }
        removed
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// 切换界面语言并立即持久化
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        if let Err(e) = self.storage.set(LANG_KEY, language.code()) {
            log::error!("保存语言偏好失败: {}", e);
        }
    }

    fn persist_orders(&self) {
        let content = match serde_json::to_string(&self.orders) {
            Ok(content) => content,
            Err(e) => {
                log::error!("序列化订单失败: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set(ORDERS_KEY, &content) {
            log::error!("保存订单失败: {}", e);
        }
    }
}

/// 读取订单列表，任何问题都回退到种子列表
fn load_orders(storage: &dyn KeyValueStore) -> Vec<Order> {
    let content = match storage.get(ORDERS_KEY) {
        Ok(Some(content)) => content,
        Ok(None) => return seed_orders(),
        Err(e) => {
            log::warn!("读取订单数据失败，使用种子数据: {}", e);
            return seed_orders();
        }
    };

    match serde_json::from_str::<Vec<Order>>(&content) {
        Ok(orders) if is_consistent(&orders) => orders,
        Ok(_) => {
            log::warn!("订单数据违反约束（编号为空、重复或客户名称为空），使用种子数据");
            seed_orders()
        }
        Err(e) => {
            log::warn!("解析订单数据失败，使用种子数据: {}", e);
            seed_orders()
        }
    }
}

/// 检查订单集合约束：编号非空且唯一，客户名称非空
fn is_consistent(orders: &[Order]) -> bool {
    let mut seen = HashSet::with_capacity(orders.len());
    orders.iter().all(|o| {
        !o.id.trim().is_empty() && !o.customer_name.trim().is_empty() && seen.insert(o.id.as_str())
    })
}

fn load_language(storage: &dyn KeyValueStore) -> Language {
    match storage.get(LANG_KEY) {
        Ok(Some(code)) => Language::parse(&code).unwrap_or_else(|| {
            log::warn!("无效的语言偏好 {:?}，使用默认语言", code);
            Language::default()
        }),
        Ok(None) => Language::default(),
        Err(e) => {
            log::warn!("读取语言偏好失败: {}", e);
            Language::default()
        }
    }
}
