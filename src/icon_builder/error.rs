//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载图标流水线中的所有错误来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。
//! 每个分支对应流水线的一个阶段，错误消息自带阶段标签。

/// 图标生成统一错误类型。
///
/// 该类型会在命令行层被上转为 `AppError`，最终决定进程退出码。
/// 任一阶段出错即终止整次转换，不产生部分输出，也不重试。
#[derive(Debug, thiserror::Error)]
pub enum IconError {
    /// 来源不可读、SVG 不合法或目标尺寸非法。
    #[error("光栅化失败：{0}")]
    Rasterize(String),

    /// 尺寸列表非法、超出容器上限或载荷编码失败。
    #[error("打包失败：{0}")]
    Pack(String),

    /// 临时文件创建、写入或原子替换失败。
    #[error("写入失败：{0}")]
    Write(String),

    /// 配置取值超出允许范围。
    #[error("配置错误：{0}")]
    Config(String),
}
