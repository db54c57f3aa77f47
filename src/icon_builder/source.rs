//! # 数据源与中间模型
//!
//! ## 设计思路
//!
//! 将“外部输入类型”和“流水线中间结果”解耦：
//! - `VectorSource` 表示外部矢量图来源语义
//! - `SizeSpec` 表示去重后的目标尺寸列表
//! - `RasterImage` 表示已光栅化的直通 alpha RGBA 位图
//! - `IconSummary` 表示转换成功后的结果摘要

use std::collections::HashSet;
use std::path::PathBuf;

use super::IconError;

/// 矢量图输入来源。
///
/// 来源本身在整条流水线中只读，不会被修改。
pub enum VectorSource {
    /// 本地 SVG 文件路径来源。
    FilePath(PathBuf),
    /// 内存中的 SVG 字节来源。
    Bytes(Vec<u8>),
}

/// 目标尺寸列表：有序、去重、非空的正整数 (宽, 高) 对。
///
/// 只能通过 [`SizeSpec::new`] 构造，重复尺寸保留首次出现的位置。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeSpec(Vec<(u32, u32)>);

impl SizeSpec {
    /// 构造尺寸列表。
    ///
    /// 重复项按首次出现位置去重；出现零宽/零高或列表为空时报错。
    pub fn new<I>(sizes: I) -> Result<Self, IconError>
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();

        for (width, height) in sizes {
            if width == 0 || height == 0 {
                return Err(IconError::Pack(format!(
                    "尺寸必须为正整数：{}x{}",
                    width, height
                )));
            }
            if seen.insert((width, height)) {
                unique.push((width, height));
            }
        }

        if unique.is_empty() {
            return Err(IconError::Pack("尺寸列表不能为空".to_string()));
        }

        Ok(Self(unique))
    }

    /// 原始脚本使用的全尺寸集合（16 ~ 512），作为默认输出规格。
    pub fn default_icon_sizes() -> Self {
        Self(vec![
            (16, 16),
            (24, 24),
            (32, 32),
            (48, 48),
            (64, 64),
            (128, 128),
            (256, 256),
            (512, 512),
        ])
    }

    /// 去重后的尺寸列表（保持调用方给定顺序）。
    pub fn entries(&self) -> &[(u32, u32)] {
        &self.0
    }

    /// 列表中出现的最大单边尺寸。
    pub fn max_dimension(&self) -> u32 {
        self.0
            .iter()
            .map(|&(width, height)| width.max(height))
            .max()
            .unwrap_or(0)
    }
}

/// 光栅化阶段输出：定尺寸的直通 alpha RGBA 位图。
///
/// 字节长度恒为 `width * height * 4`，构造时校验。
#[derive(Debug, Clone)]
pub(super) struct RasterImage {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl RasterImage {
    /// 从 RGBA 字节构造位图，校验字节长度一致性。
    pub(super) fn from_rgba(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self, IconError> {
        let expected_len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or_else(|| IconError::Rasterize("位图尺寸导致内存溢出风险".to_string()))?;

        if bytes.len() != expected_len {
            return Err(IconError::Rasterize(format!(
                "像素数据长度异常：期望 {} 字节，实际 {} 字节",
                expected_len,
                bytes.len()
            )));
        }

        Ok(Self {
            width,
            height,
            bytes,
        })
    }

    pub(super) fn width(&self) -> u32 {
        self.width
    }

    pub(super) fn height(&self) -> u32 {
        self.height
    }

    /// RGBA 字节数组（`width * height * 4`）。
    pub(super) fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// 转换成功后的结果摘要。
#[derive(Debug, Clone)]
pub struct IconSummary {
    /// 最终输出文件路径。
    pub dest: PathBuf,
    /// 容器内各条目的 (宽, 高)，与请求顺序一致。
    pub entries: Vec<(u32, u32)>,
    /// 落盘字节数。
    pub bytes_written: u64,
}
