//! # Caslink - Cargo 构建脚本
//!
//! 仅在启用 `desktop` feature 时调用 Tauri 的构建前处理，
//! 终端版本（`caslink-cli`）不需要任何构建期代码生成。

fn main() {
  // Tauri 根据 `tauri.conf.json` 生成资源绑定代码和平台清单
  #[cfg(feature = "desktop")]
  tauri_build::build()
}
