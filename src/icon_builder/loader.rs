//! # 来源加载模块
//!
//! ## 设计思路
//!
//! 在进入光栅化之前完成全部来源侧校验：存在性、体积上限、SVG 签名。
//! 恶意或误传入的超大文件在读取前即被体积上限拦截。
//!
//! ## 实现思路
//!
//! 1. 文件来源先查元数据体积，再整体读入
//! 2. 内存来源只做体积校验
//! 3. 统一做一次轻量 SVG 标记检查，尽早给出可读错误
//!
//! 按阶段归属，这里的所有失败都属于光栅化阶段（来源不可读/不合法）。

use std::path::Path;

use super::{IconConfig, IconError, VectorSource};

/// 加载 SVG 来源字节并完成体积与签名校验。
pub(super) fn load(source: &VectorSource, config: &IconConfig) -> Result<Vec<u8>, IconError> {
    let bytes = match source {
        VectorSource::FilePath(path) => load_from_file(path, config)?,
        VectorSource::Bytes(bytes) => {
            check_size(bytes.len() as u64, config)?;
            bytes.clone()
        }
    };

    validate_svg_signature(&bytes)?;
    Ok(bytes)
}

fn load_from_file(path: &Path, config: &IconConfig) -> Result<Vec<u8>, IconError> {
    log::info!("📁 开始读取 SVG 来源 - 路径: {}", path.display());

    if !path.exists() {
        return Err(IconError::Rasterize(format!(
            "文件不存在：{}",
            path.display()
        )));
    }

    let metadata = std::fs::metadata(path)
        .map_err(|e| IconError::Rasterize(format!("无法读取文件信息：{}", e)))?;
    check_size(metadata.len(), config)?;

    std::fs::read(path).map_err(|e| IconError::Rasterize(format!("无法读取 SVG 文件：{}", e)))
}

fn check_size(len: u64, config: &IconConfig) -> Result<(), IconError> {
    if len > config.max_file_size {
        return Err(IconError::Rasterize(format!(
            "来源过大：{:.2} MB（限制：{:.2} MB）",
            len as f64 / 1024.0 / 1024.0,
            config.max_file_size as f64 / 1024.0 / 1024.0
        )));
    }
    Ok(())
}

/// 轻量 SVG 标记检查。
///
/// 与完整解析相比只看文本特征：内容需包含 `<svg`，
/// 或以 `<?xml` 开头且后续出现 `<svg`。
fn validate_svg_signature(bytes: &[u8]) -> Result<(), IconError> {
    let text = String::from_utf8_lossy(bytes);
    let trimmed = text.trim_start();

    if trimmed.contains("<svg") || (trimmed.starts_with("<?xml") && text.contains("<svg")) {
        Ok(())
    } else {
        Err(IconError::Rasterize(
            "内容不是有效的 SVG 标记（缺少 <svg 元素）".to_string(),
        ))
    }
}
