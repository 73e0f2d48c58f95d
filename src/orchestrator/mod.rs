//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量生成和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `generation_driver` - 变体生成器
//! - 生成前运行一次校验
//! - 惰性地逐份产出 `(Variant, AnswerKey)`
//! - 只持有随机数源和序号，不做 I/O
//!
//! ### `batch_processor` - 批量变体处理器
//! - 管理应用生命周期（初始化、运行）
//! - 加载题库和组卷参数
//! - 写出试卷册、答案卡、警告和清单
//! - 输出全局统计信息
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 N 份变体 + 文件输出)
//!     ↓
//! generation_driver (校验 + 逐份生成)
//!     ↓
//! workflow::VariantAssembler (组装单份变体)
//!     ↓
//! services (能力层：validator / option_shuffler / answer_key / writers)
//!     ↓
//! models (题库、组卷参数、变体)
//! ```

pub mod batch_processor;
pub mod generation_driver;

// 重新导出主要类型
pub use batch_processor::App;
pub use generation_driver::{run, GenerationDriver};
