//! # 降采样模块
//!
//! ## 设计思路
//!
//! downsample 策略下，从基准位图派生各目标尺寸。
//! 优先使用 `fast_image_resize` 的卷积算法保证缩放质量，
//! 失败时回退 `image::imageops::resize`，保证流程可完成。
//!
//! ## 实现思路
//!
//! 1. 目标尺寸与基准一致时直接复用，不做重采样
//! 2. 构建 U8x4 源/目标缓冲，按配置滤镜执行卷积缩放
//! 3. 回退路径走 `image` crate 的同名滤镜

use fast_image_resize as fr;
use image::{ImageBuffer, Rgba, imageops};

use super::IconError;
use super::source::RasterImage;

/// 将基准位图重采样到目标尺寸。
pub(super) fn downsample(
    base: &RasterImage,
    width: u32,
    height: u32,
    filter: imageops::FilterType,
) -> Result<RasterImage, IconError> {
    if width == base.width() && height == base.height() {
        return Ok(base.clone());
    }

    match resize_with_fast_image_resize(base, width, height, filter) {
        Ok(resized) => Ok(resized),
        Err(err) => {
            log::warn!("⚠️ fast_image_resize 缩放失败，回退 image::imageops::resize：{}", err);
            resize_with_imageops(base, width, height, filter)
        }
    }
}

fn resize_with_fast_image_resize(
    base: &RasterImage,
    target_width: u32,
    target_height: u32,
    filter: imageops::FilterType,
) -> Result<RasterImage, IconError> {
    let src_image = fr::images::Image::from_vec_u8(
        base.width(),
        base.height(),
        base.bytes().to_vec(),
        fr::PixelType::U8x4,
    )
    .map_err(|e| IconError::Pack(format!("构建源图像缓冲失败：{}", e)))?;

    let mut dst_image = fr::images::Image::new(target_width, target_height, fr::PixelType::U8x4);

    let mut resizer = fr::Resizer::new();
    let options =
        fr::ResizeOptions::new().resize_alg(fr::ResizeAlg::Convolution(to_fast_filter(filter)));

    resizer
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|e| IconError::Pack(format!("fast_image_resize 执行失败：{}", e)))?;

    RasterImage::from_rgba(target_width, target_height, dst_image.into_vec())
}

fn resize_with_imageops(
    base: &RasterImage,
    target_width: u32,
    target_height: u32,
    filter: imageops::FilterType,
) -> Result<RasterImage, IconError> {
    let buffer = ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(
        base.width(),
        base.height(),
        base.bytes().to_vec(),
    )
    .ok_or_else(|| IconError::Pack("基准图像缓冲长度异常".to_string()))?;

    let resized = imageops::resize(&buffer, target_width, target_height, filter);
    RasterImage::from_rgba(target_width, target_height, resized.into_raw())
}

fn to_fast_filter(filter: imageops::FilterType) -> fr::FilterType {
    match filter {
        imageops::FilterType::Nearest => fr::FilterType::Box,
        imageops::FilterType::Triangle => fr::FilterType::Bilinear,
        imageops::FilterType::CatmullRom => fr::FilterType::CatmullRom,
        imageops::FilterType::Gaussian => fr::FilterType::Mitchell,
        imageops::FilterType::Lanczos3 => fr::FilterType::Lanczos3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> RasterImage {
        let bytes = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        RasterImage::from_rgba(width, height, bytes).expect("test image should build")
    }

    #[test]
    fn identity_dimensions_skip_resampling() {
        let base = solid(64, 64, [10, 20, 30, 255]);
        let out = downsample(&base, 64, 64, imageops::FilterType::Lanczos3)
            .expect("downsample should succeed");
        assert_eq!(out.bytes(), base.bytes());
    }

    #[test]
    fn downsample_produces_requested_dimensions() {
        let base = solid(128, 128, [200, 100, 50, 255]);
        let out = downsample(&base, 16, 16, imageops::FilterType::Lanczos3)
            .expect("downsample should succeed");
        assert_eq!(out.width(), 16);
        assert_eq!(out.height(), 16);
        assert_eq!(out.bytes().len(), 16 * 16 * 4);
    }

    #[test]
    fn uniform_input_stays_uniform() {
        let base = solid(256, 256, [0, 0, 255, 255]);
        let out = downsample(&base, 32, 32, imageops::FilterType::Lanczos3)
            .expect("downsample should succeed");
        for pixel in out.bytes().chunks_exact(4) {
            assert_eq!(pixel, &[0, 0, 255, 255]);
        }
    }
}
