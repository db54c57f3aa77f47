//! # 命令行参数模块
//!
//! ## 设计思路
//!
//! 只做参数定义与尺寸列表解析，不承载业务逻辑；
//! 解析结果直接映射到 `IconConfig` / `SizeSpec`。

use std::path::PathBuf;

use crate::error::AppError;
use crate::icon_builder::SizeSpec;

/// 将 SVG 矢量图转换为 Windows 多分辨率 ICO 图标。
#[derive(clap::Parser)]
#[command(name = "svg2ico", version)]
pub struct Cli {
    /// 输入 SVG 文件路径
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// 输出 ICO 文件路径
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// 目标尺寸列表，逗号分隔；单值表示正方形（如 16,32,48x48）。
    /// 省略时使用 16~512 的默认全集
    #[arg(short, long, value_name = "SIZES")]
    pub sizes: Option<String>,

    /// 渲染策略（downsample / rerender）
    #[arg(long, value_name = "STRATEGY")]
    pub strategy: Option<String>,

    /// downsample 策略下的基准渲染分辨率（像素）
    #[arg(long, value_name = "PIXELS")]
    pub base_dimension: Option<u32>,
}

/// 解析 `--sizes` 参数。
///
/// 支持 `16,32,48` 与 `32x32` 两种写法混用；空白与空项忽略。
pub fn parse_sizes(raw: &str) -> Result<SizeSpec, AppError> {
    let mut sizes = Vec::new();

    for token in raw.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        let (width, height) = match token.split_once(['x', 'X']) {
            Some((width, height)) => (parse_dimension(width)?, parse_dimension(height)?),
            None => {
                let dimension = parse_dimension(token)?;
                (dimension, dimension)
            }
        };
        sizes.push((width, height));
    }

    Ok(SizeSpec::new(sizes)?)
}

fn parse_dimension(raw: &str) -> Result<u32, AppError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| AppError::Usage(format!("无法解析尺寸：{}", raw.trim())))
}
