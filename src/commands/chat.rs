//! # AI 助手 Tauri Commands
//!
//! 聊天窗口的所有操作都返回完整的 `ChatSnapshot`，前端整体替换渲染状态。

use tauri::State;

use crate::models::chat::ChatSnapshot;
use crate::services::state::AppState;

/// 获取聊天窗口当前状态
///
/// # 返回值
/// 可见状态、发送中标志和全部消息记录
#[tauri::command]
pub async fn get_chat(state: State<'_, AppState>) -> Result<ChatSnapshot, String> {
    Ok(state.chat_snapshot())
}

/// 展开聊天窗口
#[tauri::command]
pub async fn open_chat(state: State<'_, AppState>) -> Result<ChatSnapshot, String> {
    Ok(state.open_chat())
}

/// 关闭聊天窗口
///
/// 消息记录保留；进行中的请求完成后回复仍会追加到记录中。
#[tauri::command]
pub async fn close_chat(state: State<'_, AppState>) -> Result<ChatSnapshot, String> {
    Ok(state.close_chat())
}

/// 在展开与最小化之间切换，窗口关闭时无效果
#[tauri::command]
pub async fn toggle_chat_minimized(state: State<'_, AppState>) -> Result<ChatSnapshot, String> {
    Ok(state.toggle_chat_minimized())
}

/// 发送一条聊天消息
///
/// 在远程调用完成前返回的 Promise 保持等待状态，前端应依据 `sending`
/// 禁用输入。AI 调用失败时回复为致歉文本，不会返回错误。
///
/// # 参数
/// - `text` - 用户输入的消息原文
/// - `state` - Tauri managed state
///
/// # 返回值
/// 追加了用户消息和模型回复之后的聊天状态
///
/// # 错误
/// 上一条消息仍在发送、消息为空或窗口未展开时返回错误信息
#[tauri::command]
pub async fn send_chat_message(
    text: String,
    state: State<'_, AppState>,
) -> Result<ChatSnapshot, String> {
    state
        .send_chat_message(&text)
        .await
        .map_err(|e| e.to_string())
}
