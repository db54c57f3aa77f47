//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `IconBuilder` 只负责流程编排与配置管理，不感知命令行。
//! 处理链路固定为：
//! 1. 读取配置快照
//! 2. 按来源加载 SVG 字节
//! 3. 按策略光栅化 / 派生各尺寸位图
//! 4. 打包 ICO 容器
//! 5. 原子写入目标路径
//!
//! ## 实现思路
//!
//! - 配置通过 `Arc<RwLock<IconConfig>>` 支持运行时动态调整。
//! - 单次转换内使用“同一配置快照”，避免处理中途配置漂移。
//! - 记录 `load/raster/pack/write/total` 阶段耗时，便于性能诊断。

use std::path::Path;
use std::sync::{Arc, RwLock};
use std::time::Instant;

use super::source::RasterImage;
use super::{
    IconConfig, IconError, IconSummary, RenderStrategy, SizeSpec, VectorSource, container, loader,
    rasterizer, resizer, writer,
};

/// 图标生成器。
///
/// 封装了配置状态，并编排各子模块实现完整流程。
pub struct IconBuilder {
    config: Arc<RwLock<IconConfig>>,
}

impl IconBuilder {
    /// 根据初始配置创建生成器，配置越界时报错。
    ///
    /// # 示例
    /// ```rust,ignore
    /// use svg2ico::icon_builder::{IconBuilder, IconConfig};
    ///
    /// let builder = IconBuilder::new(IconConfig::default())?;
    /// # Ok::<(), svg2ico::icon_builder::IconError>(())
    /// ```
    pub fn new(config: IconConfig) -> Result<Self, IconError> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(RwLock::new(config)),
        })
    }

    /// 获取配置快照。
    ///
    /// 作用：保证单次转换链路使用一致参数。
    fn config_snapshot(&self) -> Result<IconConfig, IconError> {
        self.config
            .read()
            .map(|config| config.clone())
            .map_err(|_| IconError::Config("配置读取锁已中毒".to_string()))
    }

    /// 设置渲染策略。
    pub fn set_render_strategy(&self, strategy: RenderStrategy) -> Result<(), IconError> {
        let mut config = self
            .config
            .write()
            .map_err(|_| IconError::Config("配置写入锁已中毒".to_string()))?;
        config.strategy = strategy;

        log::info!(
            "⚙️ 已切换渲染策略：{}（base_dimension={}, filter={:?}）",
            strategy.as_str(),
            config.base_dimension,
            config.resize_filter
        );

        Ok(())
    }

    /// 获取当前生效策略。
    pub fn get_render_strategy(&self) -> Result<RenderStrategy, IconError> {
        Ok(self.config_snapshot()?.strategy)
    }

    /// 设置基准渲染分辨率，范围与构建时校验一致。
    pub fn set_base_dimension(&self, base_dimension: u32) -> Result<(), IconError> {
        let mut config = self
            .config
            .write()
            .map_err(|_| IconError::Config("配置写入锁已中毒".to_string()))?;

        let mut updated = config.clone();
        updated.base_dimension = base_dimension;
        updated.validate()?;
        *config = updated;

        Ok(())
    }

    /// 转换主入口：从 SVG 来源生成多分辨率 ICO 文件。
    ///
    /// 成功时目标路径为完整容器文件；任一阶段失败则目标路径
    /// 保持调用前状态，并返回携带阶段标签的错误。
    ///
    /// # 示例
    /// ```rust,ignore
    /// use svg2ico::icon_builder::{IconBuilder, IconConfig, SizeSpec, VectorSource};
    ///
    /// let builder = IconBuilder::new(IconConfig::default())?;
    /// let summary = builder.convert(
    ///     &VectorSource::FilePath("logo.svg".into()),
    ///     &SizeSpec::default_icon_sizes(),
    ///     "logo.ico".as_ref(),
    /// )?;
    /// println!("{}", summary.dest.display());
    /// # Ok::<(), svg2ico::icon_builder::IconError>(())
    /// ```
    pub fn convert(
        &self,
        source: &VectorSource,
        sizes: &SizeSpec,
        dest: &Path,
    ) -> Result<IconSummary, IconError> {
        let config = self.config_snapshot()?;
        let total_start = Instant::now();

        let load_start = Instant::now();
        let svg_bytes = loader::load(source, &config)?;
        let load_elapsed = load_start.elapsed();

        let raster_start = Instant::now();
        let frames = self.render_frames(&svg_bytes, sizes, &config)?;
        let raster_elapsed = raster_start.elapsed();

        let pack_start = Instant::now();
        let icon_container = container::pack(&frames)?;
        let pack_elapsed = pack_start.elapsed();

        let write_start = Instant::now();
        let bytes_written = writer::write_atomic(&icon_container, dest)?;
        let write_elapsed = write_start.elapsed();

        let total_elapsed = total_start.elapsed();
        log::info!(
            "✅ 图标生成完成 - load={}ms raster={}ms pack={}ms write={}ms total={}ms 输出: {}",
            load_elapsed.as_millis(),
            raster_elapsed.as_millis(),
            pack_elapsed.as_millis(),
            write_elapsed.as_millis(),
            total_elapsed.as_millis(),
            dest.display()
        );

        Ok(IconSummary {
            dest: dest.to_path_buf(),
            entries: icon_container.entries().to_vec(),
            bytes_written,
        })
    }

    /// 按策略产出与尺寸列表一一对应的位图。
    fn render_frames(
        &self,
        svg_bytes: &[u8],
        sizes: &SizeSpec,
        config: &IconConfig,
    ) -> Result<Vec<RasterImage>, IconError> {
        match config.strategy {
            RenderStrategy::Downsample => {
                // 基准分辨率不低于请求最大尺寸，条目永不放大
                let base_dimension = config.base_dimension.max(sizes.max_dimension());
                let base = rasterizer::rasterize(svg_bytes, base_dimension, base_dimension)?;
                sizes
                    .entries()
                    .iter()
                    .map(|&(width, height)| {
                        resizer::downsample(&base, width, height, config.resize_filter)
                    })
                    .collect()
            }
            RenderStrategy::Rerender => sizes
                .entries()
                .iter()
                .map(|&(width, height)| rasterizer::rasterize(svg_bytes, width, height))
                .collect(),
        }
    }
}
