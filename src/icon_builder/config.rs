//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `IconConfig`，保证运行时行为可观测、可调整、可测试。
//! 其中渲染策略（downsample / rerender）作为高层语义，决定光栅化次数与
//! 小尺寸保真度之间的取舍。
//!
//! ## 实现思路
//!
//! - `Default` 提供与原始工具一致的配置（1024 基准渲染 + Lanczos3 降采样）。
//! - `RenderStrategy` 负责策略字符串解析与反向输出。
//! - `validate` 在构建 `IconBuilder` 时做范围校验，拒绝越界取值。

use image::imageops::FilterType;

use super::IconError;

/// 图标生成配置。
///
/// 字段覆盖了来源读取、光栅化与降采样三个阶段；
/// 同一 `SizeSpec` 与同一配置下输出字节完全确定。
#[derive(Debug, Clone)]
pub struct IconConfig {
    /// 读取 SVG 来源时允许的最大体积（字节）。
    pub max_file_size: u64,
    /// downsample 策略下的基准渲染单边尺寸（像素）。
    ///
    /// 实际渲染尺寸取该值与请求最大尺寸中的较大者，
    /// 保证任何条目都不会被放大。
    pub base_dimension: u32,
    /// 渲染策略。
    pub strategy: RenderStrategy,
    /// 降采样滤镜策略。
    pub resize_filter: FilterType,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            max_file_size: 16 * 1024 * 1024,
            base_dimension: 1024,
            strategy: RenderStrategy::Downsample,
            resize_filter: FilterType::Lanczos3,
        }
    }
}

/// 渲染策略（面向调用方语义）。
///
/// - `Downsample`：以基准分辨率渲染一次，再降采样到各目标尺寸；
///   大尺寸条目更锐利，只光栅化一次。
/// - `Rerender`：对每个目标尺寸各渲染一次；
///   小尺寸条目矢量保真度最高，代价是重复光栅化。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStrategy {
    Downsample,
    Rerender,
}

impl RenderStrategy {
    /// 从外部字符串解析策略。
    ///
    /// # 示例
    /// ```rust,ignore
    /// use svg2ico::icon_builder::RenderStrategy;
    ///
    /// let s = RenderStrategy::from_str("downsample")?;
    /// assert_eq!(s.as_str(), "downsample");
    /// # Ok::<(), svg2ico::icon_builder::IconError>(())
    /// ```
    pub fn from_str(strategy: &str) -> Result<Self, IconError> {
        match strategy.trim().to_lowercase().as_str() {
            "downsample" => Ok(Self::Downsample),
            "rerender" => Ok(Self::Rerender),
            other => Err(IconError::Config(format!(
                "未知渲染策略：{}（可选：downsample / rerender）",
                other
            ))),
        }
    }

    /// 将策略输出为稳定字符串，供日志与帮助信息使用。
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Downsample => "downsample",
            Self::Rerender => "rerender",
        }
    }
}

impl IconConfig {
    /// 范围校验，在构建 `IconBuilder` 时调用。
    pub(super) fn validate(&self) -> Result<(), IconError> {
        if self.max_file_size < 1024 {
            return Err(IconError::Config("max_file_size 不能小于 1KB".to_string()));
        }
        if !(16..=4096).contains(&self.base_dimension) {
            return Err(IconError::Config(
                "base_dimension 必须在 16~4096 像素之间".to_string(),
            ));
        }
        Ok(())
    }
}
