//! # svg2ico — SVG 转多分辨率 ICO 图标工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    命令行 (main.rs)                       │
//! │                                                          │
//! │  cli ─── 参数解析（--input / --output / --sizes …）       │
//! │   │        （统一错误处理 + 退出码约定）                   │
//! └───┼──────────────────────────────────────────────────────┘
//!     ↕ Result<IconSummary, AppError>
//! ┌───┼──────────────────────────────────────────────────────┐
//!     ↕              核心库 (Rust)
//! │                                                          │
//! │  ┌─ error ──────── AppError (顶层统一错误类型)            │
//! │  │                                                       │
//! │  └─ icon_builder   SVG → ICO 转换流水线                   │
//! │      ├─ loader       SVG 来源读取 + 体积/签名校验          │
//! │      ├─ rasterizer   usvg 解析 + tiny-skia 光栅化          │
//! │      ├─ resizer      fast_image_resize 降采样             │
//! │      ├─ container    ICO 容器编码 / 解码                  │
//! │      └─ writer       临时文件 + 原子替换落盘               │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 顶层错误类型 `AppError`，命令行入口的返回类型 |
//! | [`cli`] | clap 参数定义与尺寸列表解析 |
//! | [`icon_builder`] | 从 SVG 来源生成多分辨率 ICO 的完整流水线 |

pub mod cli;
pub mod error;
pub mod icon_builder;
