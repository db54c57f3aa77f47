//! # ICO 容器模块
//!
//! ## 设计思路
//!
//! 自行编码 ICO 二进制布局，而不是依赖只支持单一载荷类型的封装：
//! 256 像素及以下的条目使用经典 32 位 DIB 载荷（老读取器兼容），
//! 256 像素以上、512 像素及以下的条目使用 PNG 内嵌载荷。
//!
//! ## 实现思路
//!
//! 布局依次为：6 字节 ICONDIR 头（保留位 / 类型 / 条目数）、
//! 每条目 16 字节目录项（宽高字节 0 表示 ≥256）、连续排布的载荷。
//! DIB 载荷为 BITMAPINFOHEADER（高度翻倍）+ 自底向上 BGRA 行 + 全零 AND 掩码。
//!
//! 同时提供 `decode_entries` 反向解析，用于输出校验与测试。

use std::collections::HashSet;
use std::io::Cursor;

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba};

use super::IconError;
use super::source::RasterImage;

/// 经典 DIB 条目允许的最大单边尺寸。
pub const CLASSIC_MAX_DIMENSION: u32 = 256;
/// 容器允许的最大单边尺寸（更大尺寸以 PNG 内嵌载荷表达）。
pub const MAX_ENTRY_DIMENSION: u32 = 512;

const ICONDIR_SIZE: usize = 6;
const ICONDIRENTRY_SIZE: usize = 16;
const BITMAPINFOHEADER_SIZE: usize = 40;
const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// 打包完成的 ICO 容器。
///
/// 组装后只读；`bytes` 即最终落盘内容。
#[derive(Debug, Clone)]
pub struct IconContainer {
    bytes: Vec<u8>,
    entries: Vec<(u32, u32)>,
}

impl IconContainer {
    /// 容器完整字节。
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// 各条目的 (宽, 高)，与打包顺序一致。
    pub fn entries(&self) -> &[(u32, u32)] {
        &self.entries
    }
}

/// 将位图列表打包为 ICO 容器。
///
/// 列表需非空、尺寸互不重复且单边不超过 [`MAX_ENTRY_DIMENSION`]。
pub(super) fn pack(frames: &[RasterImage]) -> Result<IconContainer, IconError> {
    if frames.is_empty() {
        return Err(IconError::Pack("尺寸列表不能为空".to_string()));
    }

    let mut seen = HashSet::new();
    for frame in frames {
        if frame.width() > MAX_ENTRY_DIMENSION || frame.height() > MAX_ENTRY_DIMENSION {
            return Err(IconError::Pack(format!(
                "条目尺寸超出容器上限：{}x{}（上限：{} 像素）",
                frame.width(),
                frame.height(),
                MAX_ENTRY_DIMENSION
            )));
        }
        if !seen.insert((frame.width(), frame.height())) {
            return Err(IconError::Pack(format!(
                "条目尺寸重复：{}x{}",
                frame.width(),
                frame.height()
            )));
        }
    }

    let mut payloads = Vec::with_capacity(frames.len());
    for frame in frames {
        payloads.push(encode_payload(frame)?);
    }

    let directory_end = ICONDIR_SIZE + ICONDIRENTRY_SIZE * frames.len();
    let total_len = directory_end + payloads.iter().map(Vec::len).sum::<usize>();
    let mut bytes = Vec::with_capacity(total_len);

    // ICONDIR：保留位、资源类型（1 = 图标）、条目数
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&(frames.len() as u16).to_le_bytes());

    let mut offset = directory_end as u32;
    for (frame, payload) in frames.iter().zip(&payloads) {
        bytes.push(dimension_byte(frame.width()));
        bytes.push(dimension_byte(frame.height()));
        bytes.push(0); // 调色板颜色数
        bytes.push(0); // 保留位
        bytes.extend_from_slice(&1u16.to_le_bytes()); // 颜色平面数
        bytes.extend_from_slice(&32u16.to_le_bytes()); // 位深
        bytes.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        bytes.extend_from_slice(&offset.to_le_bytes());
        offset += payload.len() as u32;
    }

    for payload in &payloads {
        bytes.extend_from_slice(payload);
    }

    Ok(IconContainer {
        bytes,
        entries: frames
            .iter()
            .map(|frame| (frame.width(), frame.height()))
            .collect(),
    })
}

/// 目录项宽高字节：0 表示 256 及以上（实际尺寸由载荷自述）。
fn dimension_byte(dimension: u32) -> u8 {
    if dimension >= 256 { 0 } else { dimension as u8 }
}

fn encode_payload(frame: &RasterImage) -> Result<Vec<u8>, IconError> {
    if frame.width() <= CLASSIC_MAX_DIMENSION && frame.height() <= CLASSIC_MAX_DIMENSION {
        Ok(encode_dib(frame))
    } else {
        encode_png(frame)
    }
}

/// 32 位 DIB 载荷：BITMAPINFOHEADER + 自底向上 BGRA + AND 掩码。
fn encode_dib(frame: &RasterImage) -> Vec<u8> {
    let width = frame.width() as usize;
    let height = frame.height() as usize;
    let xor_row = width * 4;
    let xor_size = xor_row * height;
    // AND 掩码每行 1 位/像素，按 32 位对齐
    let and_row = (width + 31) / 32 * 4;
    let and_size = and_row * height;

    let mut out = Vec::with_capacity(BITMAPINFOHEADER_SIZE + xor_size + and_size);
    out.extend_from_slice(&(BITMAPINFOHEADER_SIZE as u32).to_le_bytes());
    out.extend_from_slice(&(frame.width() as i32).to_le_bytes());
    // 高度翻倍：XOR 位图与 AND 掩码共用同一头
    out.extend_from_slice(&((frame.height() * 2) as i32).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&32u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // 无压缩
    out.extend_from_slice(&((xor_size + and_size) as u32).to_le_bytes());
    out.extend_from_slice(&[0u8; 16]); // 分辨率与调色板字段全零

    let rgba = frame.bytes();
    for row in (0..height).rev() {
        let start = row * xor_row;
        for pixel in rgba[start..start + xor_row].chunks_exact(4) {
            out.extend_from_slice(&[pixel[2], pixel[1], pixel[0], pixel[3]]);
        }
    }

    // 32 位载荷的透明度由 alpha 通道承载，掩码保持全零
    out.resize(out.len() + and_size, 0);
    out
}

fn encode_png(frame: &RasterImage) -> Result<Vec<u8>, IconError> {
    let buffer = ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(
        frame.width(),
        frame.height(),
        frame.bytes().to_vec(),
    )
    .ok_or_else(|| IconError::Pack("PNG 编码输入缓冲长度异常".to_string()))?;

    let mut cursor = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(buffer)
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|e| IconError::Pack(format!("PNG 编码失败：{}", e)))?;
    Ok(cursor.into_inner())
}

/// 解码后的单个容器条目。
#[derive(Debug, Clone)]
pub struct DecodedEntry {
    /// 载荷自述的像素宽度。
    pub width: u32,
    /// 载荷自述的像素高度。
    pub height: u32,
    /// 载荷是否为 PNG 内嵌格式。
    pub png_payload: bool,
    /// 直通 alpha RGBA 像素（`width * height * 4`）。
    pub rgba: Vec<u8>,
}

/// 解析 ICO 容器字节，返回按目录顺序排列的条目。
///
/// 用于输出校验与测试；仅支持本模块产出的两种载荷
/// （32 位 DIB 与 PNG 内嵌）。
pub fn decode_entries(bytes: &[u8]) -> Result<Vec<DecodedEntry>, IconError> {
    if bytes.len() < ICONDIR_SIZE {
        return Err(IconError::Pack("容器过短，缺少 ICONDIR 头".to_string()));
    }
    if bytes[0..2] != [0, 0] || bytes[2..4] != [1, 0] {
        return Err(IconError::Pack("ICONDIR 头格式不正确".to_string()));
    }

    let count = u16::from_le_bytes([bytes[4], bytes[5]]) as usize;
    let directory_end = ICONDIR_SIZE + ICONDIRENTRY_SIZE * count;
    if bytes.len() < directory_end {
        return Err(IconError::Pack("容器过短，目录项不完整".to_string()));
    }

    let mut entries = Vec::with_capacity(count);
    for index in 0..count {
        let entry = &bytes[ICONDIR_SIZE + ICONDIRENTRY_SIZE * index..][..ICONDIRENTRY_SIZE];
        let payload_len = u32::from_le_bytes([entry[8], entry[9], entry[10], entry[11]]) as usize;
        let payload_offset =
            u32::from_le_bytes([entry[12], entry[13], entry[14], entry[15]]) as usize;

        let payload = bytes
            .get(payload_offset..payload_offset + payload_len)
            .ok_or_else(|| {
                IconError::Pack(format!("目录项 {} 的载荷越界", index))
            })?;

        entries.push(decode_payload(payload, index)?);
    }

    Ok(entries)
}

fn decode_payload(payload: &[u8], index: usize) -> Result<DecodedEntry, IconError> {
    if payload.starts_with(&PNG_MAGIC) {
        let decoded = image::load_from_memory(payload)
            .map_err(|e| IconError::Pack(format!("目录项 {} 的 PNG 载荷解码失败：{}", index, e)))?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        return Ok(DecodedEntry {
            width,
            height,
            png_payload: true,
            rgba: rgba.into_raw(),
        });
    }

    if payload.len() < BITMAPINFOHEADER_SIZE {
        return Err(IconError::Pack(format!(
            "目录项 {} 的 DIB 载荷过短",
            index
        )));
    }

    let width = i32::from_le_bytes([payload[4], payload[5], payload[6], payload[7]]);
    let doubled_height = i32::from_le_bytes([payload[8], payload[9], payload[10], payload[11]]);
    let bit_count = u16::from_le_bytes([payload[14], payload[15]]);

    if width <= 0 || doubled_height <= 0 || doubled_height % 2 != 0 {
        return Err(IconError::Pack(format!(
            "目录项 {} 的 DIB 尺寸字段非法",
            index
        )));
    }
    if bit_count != 32 {
        return Err(IconError::Pack(format!(
            "目录项 {} 的 DIB 位深不受支持：{}",
            index, bit_count
        )));
    }

    let width = width as usize;
    let height = (doubled_height / 2) as usize;
    let xor_row = width * 4;
    let xor_end = BITMAPINFOHEADER_SIZE + xor_row * height;
    if payload.len() < xor_end {
        return Err(IconError::Pack(format!(
            "目录项 {} 的 XOR 位图数据不完整",
            index
        )));
    }

    let mut rgba = vec![0u8; xor_row * height];
    for row in 0..height {
        let src_start = BITMAPINFOHEADER_SIZE + (height - 1 - row) * xor_row;
        let dst_start = row * xor_row;
        for (src, dst) in payload[src_start..src_start + xor_row]
            .chunks_exact(4)
            .zip(rgba[dst_start..dst_start + xor_row].chunks_exact_mut(4))
        {
            dst.copy_from_slice(&[src[2], src[1], src[0], src[3]]);
        }
    }

    Ok(DecodedEntry {
        width: width as u32,
        height: height as u32,
        png_payload: false,
        rgba,
    })
}
