//! 变体生成器 - 编排层
//!
//! ## 职责
//!
//! 1. **准入校验**：构造时运行一次 `validator::validate`，有错误则拒绝生成
//! 2. **逐个组卷**：作为迭代器按序号 1..=N 惰性产出 `(Variant, AnswerKey)`
//! 3. **不做 I/O**：只持有随机数源和序号计数器，渲染交给调用方
//!
//! 调用方可以在任意两次 `next()` 之间停止消费，没有副作用。
//! 迭代器不可重启；相同种子重新构造才能复现同样的序列。

use rand::Rng;
use std::iter::FusedIterator;
use tracing::warn;

use crate::error::ValidationErrors;
use crate::models::question::QuestionBank;
use crate::models::variant::GeneratedVariant;
use crate::models::variant_spec::VariantSpec;
use crate::services::{answer_key, validator};
use crate::workflow::VariantAssembler;

/// 变体生成器
pub struct GenerationDriver<'a, R: Rng + ?Sized> {
    assembler: VariantAssembler<'a>,
    rng: &'a mut R,
    next_number: usize,
    variant_count: usize,
}

impl<'a, R: Rng + ?Sized> GenerationDriver<'a, R> {
    /// 校验题库并创建生成器
    ///
    /// # 返回
    /// 校验失败时返回全部错误，不会产出任何变体
    pub fn new(
        bank: &'a QuestionBank,
        spec: &'a VariantSpec,
        rng: &'a mut R,
    ) -> Result<Self, ValidationErrors> {
        let errors = validator::validate(bank, spec);
        if !errors.is_empty() {
            return Err(ValidationErrors::new(errors));
        }

        for shortfall in validator::shortfall_warnings(bank, spec) {
            warn!("⚠️ {}，将放回抽样（同一变体内可能出现重复题目）", shortfall);
        }

        Ok(Self {
            assembler: VariantAssembler::new(bank, spec),
            rng,
            next_number: 1,
            variant_count: spec.variant_count,
        })
    }

    /// 尚未产出的变体数量
    pub fn remaining(&self) -> usize {
        self.variant_count.saturating_sub(self.next_number - 1)
    }
}

impl<R: Rng + ?Sized> Iterator for GenerationDriver<'_, R> {
    type Item = GeneratedVariant;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_number > self.variant_count {
            return None;
        }

        let variant = self.assembler.assemble(&mut *self.rng, self.next_number);
        let answer_key = answer_key::build_key(&variant);
        self.next_number += 1;

        Some(GeneratedVariant {
            variant,
            answer_key,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<R: Rng + ?Sized> ExactSizeIterator for GenerationDriver<'_, R> {}

impl<R: Rng + ?Sized> FusedIterator for GenerationDriver<'_, R> {}

/// 校验并返回惰性的变体序列
pub fn run<'a, R: Rng + ?Sized>(
    bank: &'a QuestionBank,
    spec: &'a VariantSpec,
    rng: &'a mut R,
) -> Result<GenerationDriver<'a, R>, ValidationErrors> {
    GenerationDriver::new(bank, spec, rng)
}
