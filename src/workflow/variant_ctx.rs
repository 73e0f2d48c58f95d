//! 变体处理上下文
//!
//! 封装"我正在组第几份卷子"这一信息

use std::fmt::Display;

/// 变体上下文（仅用于日志和警告记录）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantCtx {
    /// 变体序号（从1开始）
    pub variant_number: usize,
}

impl VariantCtx {
    pub fn new(variant_number: usize) -> Self {
        Self { variant_number }
    }
}

impl Display for VariantCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[变体 {:03}]", self.variant_number)
    }
}
