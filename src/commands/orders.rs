//! # 订单 Tauri Commands
//!
//! 提供订单列表、表单与语言偏好相关的 command 处理函数：
//! - `list_orders` - 按搜索词和状态筛选订单
//! - `get_order` - 按编号查询订单
//! - `new_order_draft` - 获取新建表单的初始草稿（临时编号 + 当天日期）
//! - `save_order` - 提交新建或编辑表单
//! - `delete_order` - 删除订单
//! - `get_language` / `set_language` - 读写界面语言偏好
//!
//! 校验失败和编号重复以本地化提示文本作为错误返回，前端直接展示即可。

use tauri::State;

use crate::models::order::{Order, StatusFilter};
use crate::models::settings::Language;
use crate::services::editor::{EditTarget, OrderDraft};
use crate::services::state::AppState;

/// 按搜索词和状态筛选订单
///
/// 前端在搜索框输入或切换状态下拉框时调用，返回结果保持存储中的顺序（最新在前）。
///
/// # 参数
/// - `query` - 搜索词，匹配订单编号、客户名称、款式编码和产品名称；缺省为空（匹配全部）
/// - `status_filter` - `"ALL"` 或具体状态值；缺省为 `"ALL"`
/// - `state` - Tauri managed state
///
/// # 返回值
/// 筛选后的订单列表
#[tauri::command]
pub async fn list_orders(
    query: Option<String>,
    status_filter: Option<StatusFilter>,
    state: State<'_, AppState>,
) -> Result<Vec<Order>, String> {
    Ok(state.list_orders(
        query.as_deref().unwrap_or_default(),
        status_filter.unwrap_or_default(),
    ))
}

/// 按编号查询订单
///
/// # 参数
/// - `id` - 订单编号（精确匹配）
///
/// # 返回值
/// 找到时返回订单，否则返回 `null`
#[tauri::command]
pub async fn get_order(id: String, state: State<'_, AppState>) -> Result<Option<Order>, String> {
    Ok(state.get_order(&id))
}

/// 获取新建表单的初始草稿
///
/// # 返回值
/// 临时编号（`ORD-xxxxx`）、当天日期、状态为 `PROCESSING` 的空白草稿
#[tauri::command]
pub async fn new_order_draft(state: State<'_, AppState>) -> Result<OrderDraft, String> {
    Ok(state.new_order_draft())
}

/// 提交订单表单
///
/// 新建时编号不能与已有订单重复；编辑时编号固定为原始编号，
/// 表单内容整体替换原记录。成功后立即持久化。
///
/// # 参数
/// - `target` - `{ kind: "new" }` 或 `{ kind: "existing", id: 原始编号 }`
/// - `draft` - 表单内容
/// - `state` - Tauri managed state
///
/// # 返回值
/// 实际写入的订单
///
/// # 错误
/// 必填字段为空或新建编号重复时，返回当前界面语言的提示文本
#[tauri::command]
pub async fn save_order(
    target: EditTarget,
    draft: OrderDraft,
    state: State<'_, AppState>,
) -> Result<Order, String> {
    state.save_order(&target, &draft).map_err(|e| {
        log::warn!("保存订单被拒绝: {}", e);
        e.localized(state.language()).to_string()
    })
}

/// 删除订单
///
/// # 参数
/// - `id` - 订单编号
///
/// # 返回值
/// 删除成功返回 `true`；编号不存在时返回 `false`，不视为错误
#[tauri::command]
pub async fn delete_order(id: String, state: State<'_, AppState>) -> Result<bool, String> {
    Ok(state.delete_order(&id))
}

/// 获取界面语言偏好
#[tauri::command]
pub async fn get_language(state: State<'_, AppState>) -> Result<Language, String> {
    Ok(state.language())
}

/// 切换界面语言并立即持久化
///
/// # 参数
/// - `lang` - `"zh"`、`"en"` 或 `"ms"`
#[tauri::command]
pub async fn set_language(lang: Language, state: State<'_, AppState>) -> Result<(), String> {
    state.set_language(lang);
    Ok(())
}
