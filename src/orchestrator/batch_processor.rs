//! 批量变体处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一次完整的生成任务。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：初始化日志文件、输出启动信息
//! 2. **加载输入**：读取题库目录和组卷参数文件
//! 3. **准入校验**：校验失败时列出全部问题，不写任何文件
//! 4. **逐份生成**：消费 `GenerationDriver`，每份变体立即写出试卷册和答案卡
//! 5. **警告落盘**：单题警告写入 warn.txt 供人工复核
//! 6. **全局统计**：汇总生成结果并写出清单
//!
//! ## 设计特点
//!
//! - **唯一持有随机数源**：种子来自配置或随机生成，并写入日志以便复现
//! - **向下委托**：组卷交给 `GenerationDriver`，写文件交给 `DocumentWriter`

use crate::config::Config;
use crate::error::AppError;
use crate::models::question::QuestionBank;
use crate::models::variant::GeneratedVariant;
use crate::models::variant_spec::VariantSpec;
use crate::orchestrator::generation_driver::GenerationDriver;
use crate::services::{DocumentWriter, ManifestEntry, WarnWriter};
use crate::utils::logging::{
    append_log_line, init_log_file, log_bank_loaded, log_spec, log_startup, print_final_stats,
    RunStats,
};
use crate::workflow::VariantCtx;
use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    writer: DocumentWriter,
    warn_writer: WarnWriter,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)?;

        log_startup(&config);

        let writer = DocumentWriter::new(
            &config.variants_folder,
            &config.keys_folder,
            config.program_name.clone(),
        );
        let warn_writer = WarnWriter::with_path(config.warn_file.clone());

        Ok(Self {
            config,
            writer,
            warn_writer,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<RunStats> {
        let bank = self.load_bank().await?;
        let spec = self.load_spec().await?;

        let seed = self.config.random_seed.unwrap_or_else(rand::random);
        log_spec(&spec, seed);
        append_log_line(&self.config.output_log_file, &format!("随机种子: {}", seed))?;

        let mut rng = StdRng::seed_from_u64(seed);
        let driver = match GenerationDriver::new(&bank, &spec, &mut rng) {
            Ok(driver) => driver,
            Err(errors) => {
                error!("❌ 题库校验未通过，共 {} 个问题：", errors.len());
                for e in errors.iter() {
                    error!("  - {}", e);
                    append_log_line(&self.config.output_log_file, &e.to_string())?;
                }
                return Err(AppError::Validation(errors).into());
            }
        };

        self.writer.prepare_folders()?;
        self.warn_writer.reset()?;

        let total = driver.len();
        let mut stats = RunStats::default();
        let mut manifest = Vec::with_capacity(total);

        for generated in driver {
            self.write_variant(&generated, total, &mut stats)?;
            manifest.push(ManifestEntry::from_generated(&generated));
        }

        let manifest_path = self.writer.write_manifest(&manifest)?;
        info!("🗂️ 清单已写入: {}", manifest_path.display());

        if stats.warnings > 0 {
            warn!(
                "⚠️ 共有 {} 条单题警告，详见 {}",
                stats.warnings,
                self.warn_writer.path()
            );
        }

        print_final_stats(&stats, &self.config.output_log_file);

        Ok(stats)
    }

    /// 加载题库
    async fn load_bank(&self) -> Result<QuestionBank> {
        info!("\n📁 正在加载题库...");
        let bank = crate::models::load_question_bank(&self.config.bank_folder).await?;
        log_bank_loaded(&bank);
        Ok(bank)
    }

    /// 加载组卷参数
    async fn load_spec(&self) -> Result<VariantSpec> {
        crate::models::load_variant_spec(Path::new(&self.config.run_config_file)).await
    }

    /// 写出一份变体
    fn write_variant(
        &self,
        generated: &GeneratedVariant,
        total: usize,
        stats: &mut RunStats,
    ) -> Result<()> {
        let variant = &generated.variant;
        let ctx = VariantCtx::new(variant.variant_number);

        self.writer.write_booklet(variant)?;
        self.writer.write_answer_key(variant, &generated.answer_key)?;

        for (index, question) in variant.questions.iter().enumerate() {
            for warning in &question.warnings {
                self.warn_writer
                    .write(&ctx, index + 1, warning, &question.text)?;
            }
        }

        stats.variants += 1;
        stats.questions += variant.questions.len();
        stats.warnings += variant.warning_count();
        stats.unresolved += generated.answer_key.unresolved_count();

        let line = format!(
            "变体 {:03} 已生成 | 试卷册编号 {} | {} 道题",
            variant.variant_number,
            variant.booklet_id,
            variant.questions.len()
        );
        info!("{} ✓ {}/{} {}", ctx, stats.variants, total, line);
        append_log_line(&self.config.output_log_file, &line)?;

        Ok(())
    }
}
