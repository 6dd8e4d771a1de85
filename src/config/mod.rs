//! 配置管理
//!
//! 加载顺序：`config.toml` → `config.{APP_ENV}.toml` → `PORTAL_*` 环境变量 → 直接覆盖变量。

mod r#impl;
mod structs;

pub use structs::*;
