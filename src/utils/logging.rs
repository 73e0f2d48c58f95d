use anyhow::{Context, Result};
/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use std::fs::{self, OpenOptions};
use std::io::Write;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::question::QuestionBank;
use crate::models::variant_spec::VariantSpec;

/// 初始化 tracing 日志
///
/// `RUST_LOG` 优先；未设置时按 `verbose` 选择 debug / info。重复调用不会报错。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n变体生成日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)
        .with_context(|| format!("无法初始化日志文件: {}", log_file_path))?;
    Ok(())
}

/// 向日志文件追加一行
pub fn append_log_line(log_file_path: &str, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)
        .with_context(|| format!("无法打开日志文件: {}", log_file_path))?;
    writeln!(file, "{}", line)?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 试卷变体生成");
    info!("📁 题库目录: {}", config.bank_folder);
    info!("⚙️ 组卷参数: {}", config.run_config_file);
    info!("{}", "=".repeat(60));
}

/// 记录题库加载信息
pub fn log_bank_loaded(bank: &QuestionBank) {
    info!(
        "✓ 题库加载完成: {} 个分组，共 {} 道题",
        bank.group_count(),
        bank.total_records()
    );
    for (index, group) in bank.groups().iter().enumerate() {
        info!("  {}. {} ({} 道)", index + 1, group.name, group.len());
    }
}

/// 记录组卷参数
pub fn log_spec(spec: &VariantSpec, seed: u64) {
    info!(
        "📋 每份 {} 道题 = 前 {} 个分组各 {} 道 + 附加 {} 道",
        spec.total_questions, spec.group_count, spec.per_group_quota, spec.overflow_count
    );
    info!(
        "📦 生成 {} 份变体 | 放回抽样: {} | 随机种子: {}",
        spec.variant_count,
        if spec.sample_with_replacement_on_shortfall {
            "开启"
        } else {
            "关闭"
        },
        seed
    );
}

/// 生成统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub variants: usize,
    pub questions: usize,
    pub warnings: usize,
    pub unresolved: usize,
}

/// 打印最终统计信息
///
/// # 参数
/// - `stats`: 统计数据
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(stats: &RunStats, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部生成完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 变体: {} 份，共 {} 道题", stats.variants, stats.questions);
    info!("⚠️ 警告: {}", stats.warnings);
    info!("❓ 答案留空: {}", stats.unresolved);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
