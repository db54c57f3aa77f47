//! # 落盘模块
//!
//! ## 设计思路
//!
//! 输出必须原子可见：目标路径要么是完整有效的容器文件，
//! 要么保持写入前的状态，任何失败都不留下半成品或临时残留。
//!
//! ## 实现思路
//!
//! 1. 在目标同目录创建随机命名的临时文件（跨调用不会冲突）
//! 2. 写入并 flush 全部容器字节
//! 3. `persist` 原子替换到目标路径
//!
//! 临时文件由 RAII 守护，显式清理失败只记日志，绝不覆盖主错误。

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use super::IconError;
use super::container::IconContainer;

/// 将容器原子写入目标路径，返回落盘字节数。
pub(super) fn write_atomic(container: &IconContainer, dest: &Path) -> Result<u64, IconError> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)
        .map_err(|e| IconError::Write(format!("创建临时文件失败：{}", e)))?;

    if let Err(e) = write_all_flushed(&mut temp, container.as_bytes()) {
        let primary = IconError::Write(format!("写入临时文件失败：{}", e));
        cleanup_temp(temp);
        return Err(primary);
    }

    match temp.persist(dest) {
        Ok(_) => Ok(container.as_bytes().len() as u64),
        Err(persist_error) => {
            let primary = IconError::Write(format!(
                "原子替换目标文件失败：{}",
                persist_error.error
            ));
            cleanup_temp(persist_error.file);
            Err(primary)
        }
    }
}

fn write_all_flushed(temp: &mut NamedTempFile, bytes: &[u8]) -> std::io::Result<()> {
    temp.write_all(bytes)?;
    temp.flush()
}

/// 显式清理临时文件；失败只告警，不影响主错误。
fn cleanup_temp(temp: NamedTempFile) {
    if let Err(err) = temp.close() {
        log::warn!("⚠️ 清理临时文件失败: {err}");
    }
}
