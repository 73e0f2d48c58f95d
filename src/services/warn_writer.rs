//! 警告写入服务 - 业务能力层
//!
//! 只负责"写 warn.txt"能力，不关心流程

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use tracing::debug;

use crate::error::QuestionWarning;
use crate::utils::logging::truncate_text;
use crate::workflow::VariantCtx;

/// 警告写入服务
///
/// 职责：
/// - 将答案卡上需要人工复核的题目写入 warn.txt
/// - 只处理单个题目的警告
/// - 不关心流程顺序
pub struct WarnWriter {
    warn_file_path: String,
}

impl WarnWriter {
    /// 使用指定文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            warn_file_path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.warn_file_path
    }

    /// 清空上一次运行留下的警告
    pub fn reset(&self) -> Result<()> {
        fs::write(&self.warn_file_path, "")
            .with_context(|| format!("无法清空警告文件: {}", self.warn_file_path))
    }

    /// 写入警告信息
    ///
    /// # 参数
    /// - `ctx`: 变体上下文
    /// - `position`: 题目在变体中的位置（从1开始）
    /// - `warning`: 警告内容
    /// - `stem`: 题干内容
    pub fn write(
        &self,
        ctx: &VariantCtx,
        position: usize,
        warning: &QuestionWarning,
        stem: &str,
    ) -> Result<()> {
        debug!(
            "写入警告: {} | 题目 {} | 题干长度: {}",
            ctx,
            position,
            stem.len()
        );

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.warn_file_path)
            .with_context(|| format!("无法打开警告文件: {}", self.warn_file_path))?;

        let warn_msg = format!(
            "{} | 题目 {} | {} | 题干: {}\n",
            ctx,
            position,
            warning,
            truncate_text(stem, 80)
        );

        file.write_all(warn_msg.as_bytes())?;

        Ok(())
    }
}
