//! # Exam Variant Generator
//!
//! 从按分组整理的选择题题库中随机组卷，生成多份互不相同的试卷变体及其答案卡
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构，数据只向下流动：
//!
//! ### ① 数据层（Models）
//! - `models/` - 题库、组卷参数、变体与答案卡，构建后不可变
//! - `models/loaders` - 从 TOML 文件加载题库和组卷参数
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单道题或单份变体
//! - `validator` - 生成前的唯一准入关卡
//! - `option_shuffler` - 打乱选项并找回正确答案
//! - `answer_key` - 按位置生成答案卡
//! - `DocumentWriter` / `WarnWriter` - 写试卷册、答案卡和 warn.txt
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一份卷子"的完整组装流程
//! - `VariantAssembler` - 配额抽题 → 附加抽题 → 打乱顺序 → 打乱选项 → 编号
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/generation_driver` - 校验一次，惰性逐份产出变体
//! - `orchestrator/batch_processor` - 应用入口，负责加载、输出与统计
//!
//! 随机数源由调用方显式传入，种子相同时整个生成过程完全可复现。
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, QuestionWarning, ValidationError, ValidationErrors};
pub use models::{
    AnswerKey, AssembledQuestion, GeneratedVariant, OptionLabel, QuestionBank, QuestionRecord,
    SourceGroup, Variant, VariantSpec,
};
pub use orchestrator::{run, App, GenerationDriver};
pub use services::{build_key, shuffle, validate};
pub use workflow::{assemble, VariantAssembler};
