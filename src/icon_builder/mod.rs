//! # 图标生成模块（icon_builder）
//!
//! ## 设计思路
//!
//! 该模块将“SVG 来源读取 → 光栅化 → 按尺寸派生 → ICO 容器打包 → 原子落盘”
//! 按职责拆分为多个子模块，避免单文件膨胀与耦合。
//!
//! - `handler`：编排整条转换流水线
//! - `loader`：负责文件/内存来源加载与体积、签名校验
//! - `rasterizer`：负责 SVG 解析与定尺寸光栅化
//! - `resizer`：负责基准位图的高质量降采样
//! - `container`：负责 ICO 容器的编码与校验解码
//! - `writer`：负责临时文件写入与原子替换
//! - `config/error/source`：配置、错误、中间数据模型
//!
//! ## 实现思路
//!
//! 对外仅暴露必要类型与入口函数，内部细节保持 `mod` 私有。
//! 单次转换内使用同一配置快照，保证流水线参数一致。
//!
//! ## 新同事快速上手
//!
//! 可以按下面顺序理解调用链：
//!
//! ```text
//! 调用方 convert
//!    ↓
//! handler.rs（统一编排 + 阶段耗时日志）
//!    ├─ loader.rs（来源加载 + 体积/SVG 签名校验）
//!    ├─ rasterizer.rs（usvg 解析 + tiny-skia 渲染 + 还原直通 alpha）
//!    ├─ resizer.rs（fast_image_resize 降采样 + image 回退）
//!    ├─ container.rs（BMP/PNG 载荷编码 + 目录组装）
//!    └─ writer.rs（临时文件 + persist 原子替换）
//!    ↓
//! 返回 IconSummary / IconError 给调用方
//! ```
//!
//! ## 分层职责建议
//!
//! - 对外接口变更（入参/返回值）优先改 `handler.rs`
//! - 配置与策略变更优先改 `config.rs`
//! - 容器格式细节（目录项/载荷布局）只改 `container.rs`
//! - 单阶段行为优化分别改 `loader/rasterizer/resizer/writer`

mod config;
mod container;
mod error;
mod handler;
mod loader;
mod rasterizer;
mod resizer;
mod source;
mod writer;

pub use config::{IconConfig, RenderStrategy};
pub use container::{
    CLASSIC_MAX_DIMENSION, DecodedEntry, IconContainer, MAX_ENTRY_DIMENSION, decode_entries,
};
pub use error::IconError;
pub use handler::IconBuilder;
pub use source::{IconSummary, SizeSpec, VectorSource};
