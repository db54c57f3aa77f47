//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义顶层统一的 `AppError` 枚举，替代各调用点中分散的
//! `.map_err(|e| e.to_string())`、`format!(...)`、`expect()` 等不一致模式。
//!
//! 命令行入口统一返回 `Result<T, AppError>`，
//! 失败时以带阶段标签的消息输出并返回非零退出码。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `IconError` 提供 `From` 转换，无需手动 map。
//! - 流水线内部错误自带阶段前缀（光栅化 / 打包 / 写入），此处只透传。

use crate::icon_builder::IconError;

/// 应用级统一错误类型
///
/// 命令行入口均返回此类型，确保调用方收到一致的错误格式。
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 图标生成流水线错误（光栅化 / 打包 / 写入）
    #[error("{0}")]
    Icon(#[from] IconError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 命令行参数错误
    #[error("参数错误: {0}")]
    Usage(String),
}
