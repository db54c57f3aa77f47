//! # svg2ico — 应用入口
//!
//! 本文件仅负责日志初始化、参数解析与流水线调用。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use clap::Parser;

use svg2ico::cli::{self, Cli};
use svg2ico::error::AppError;
use svg2ico::icon_builder::{IconBuilder, IconConfig, RenderStrategy, SizeSpec, VectorSource};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        log::error!("❌ 图标生成失败: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = IconConfig::default();
    if let Some(strategy) = cli.strategy.as_deref() {
        config.strategy = RenderStrategy::from_str(strategy)?;
    }
    if let Some(base_dimension) = cli.base_dimension {
        config.base_dimension = base_dimension;
    }

    let sizes = match cli.sizes.as_deref() {
        Some(raw) => cli::parse_sizes(raw)?,
        None => SizeSpec::default_icon_sizes(),
    };

    let builder = IconBuilder::new(config)?;
    let summary = builder.convert(
        &VectorSource::FilePath(cli.input.clone()),
        &sizes,
        &cli.output,
    )?;

    log::info!(
        "✅ 已生成 {}（{} 个尺寸，{} 字节）",
        summary.dest.display(),
        summary.entries.len(),
        summary.bytes_written
    );

    Ok(())
}
