//! # 光栅化模块
//!
//! ## 设计思路
//!
//! 将“SVG 字节 → 定尺寸 RGBA 位图”的过程集中管理。
//! 缩放保持纵横比（取两轴缩放的较小值）并在画布内居中，
//! 画布像素尺寸恒等于请求尺寸，非正方形 viewBox 会留边而不是拉伸。
//!
//! ## 实现思路
//!
//! 1. 校验目标尺寸为正
//! 2. `usvg` 解析（共享一次性加载的系统字体库，保证 `<text>` 可渲染）
//! 3. 计算等比缩放 + 居中平移，`resvg` 渲染到 `tiny-skia` 画布
//! 4. 预乘 alpha 还原为直通 RGBA，并校验字节长度一致性

use std::sync::Arc;

use once_cell::sync::Lazy;

use super::IconError;
use super::source::RasterImage;

/// 进程级共享字体库。系统字体只扫描一次，后续解析全部复用。
static FONTDB: Lazy<Arc<usvg::fontdb::Database>> = Lazy::new(|| {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    Arc::new(db)
});

/// 将 SVG 字节渲染为指定尺寸的位图。
///
/// 同一来源与同一尺寸下输出字节完全确定。来源本身不会被修改。
pub(super) fn rasterize(
    svg_bytes: &[u8],
    width: u32,
    height: u32,
) -> Result<RasterImage, IconError> {
    if width == 0 || height == 0 {
        return Err(IconError::Rasterize(format!(
            "目标尺寸必须为正整数：{}x{}",
            width, height
        )));
    }

    let mut options = usvg::Options::default();
    options.fontdb = FONTDB.clone();

    let tree = usvg::Tree::from_data(svg_bytes, &options)
        .map_err(|e| IconError::Rasterize(format!("SVG 解析失败：{}", e)))?;

    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        IconError::Rasterize(format!("无法创建 {}x{} 渲染画布", width, height))
    })?;

    let svg_size = tree.size();
    let scale = (width as f32 / svg_size.width()).min(height as f32 / svg_size.height());
    let offset_x = (width as f32 - svg_size.width() * scale) / 2.0;
    let offset_y = (height as f32 - svg_size.height() * scale) / 2.0;
    let transform = tiny_skia::Transform::from_scale(scale, scale).post_translate(offset_x, offset_y);

    resvg::render(&tree, transform, &mut pixmap.as_mut());

    // tiny-skia 输出预乘 alpha，ICO 载荷需要直通 alpha
    let mut bytes = Vec::with_capacity(width as usize * height as usize * 4);
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        bytes.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }

    RasterImage::from_rgba(width, height, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED_SQUARE: &[u8] =
        br##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64"><rect width="64" height="64" fill="#ff0000"/></svg>"##;

    #[test]
    fn renders_exact_dimensions() {
        let image = rasterize(RED_SQUARE, 32, 32).expect("rasterize should succeed");
        assert_eq!(image.width(), 32);
        assert_eq!(image.height(), 32);
        assert_eq!(image.bytes().len(), 32 * 32 * 4);
    }

    #[test]
    fn full_canvas_rect_fills_every_pixel() {
        let image = rasterize(RED_SQUARE, 16, 16).expect("rasterize should succeed");
        for pixel in image.bytes().chunks_exact(4) {
            assert_eq!(pixel, &[255, 0, 0, 255]);
        }
    }

    #[test]
    fn non_square_viewbox_letterboxes() {
        let wide =
            br##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="32"><rect width="64" height="32" fill="#00ff00"/></svg>"##;
        let image = rasterize(wide, 64, 64).expect("rasterize should succeed");

        // 顶部留边透明，中部为内容
        let top_left = &image.bytes()[0..4];
        assert_eq!(top_left[3], 0);
        let center_offset = (32 * 64 + 32) * 4;
        let center = &image.bytes()[center_offset..center_offset + 4];
        assert_eq!(center, &[0, 255, 0, 255]);
    }

    #[test]
    fn rejects_zero_dimension() {
        assert!(matches!(
            rasterize(RED_SQUARE, 0, 32),
            Err(IconError::Rasterize(_))
        ));
    }

    #[test]
    fn rejects_malformed_svg() {
        assert!(matches!(
            rasterize(b"<svg not really", 16, 16),
            Err(IconError::Rasterize(_))
        ));
    }
}
