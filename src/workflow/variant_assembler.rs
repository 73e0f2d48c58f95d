//! 变体组卷流程 - 流程层
//!
//! 核心职责：定义"一份卷子"的完整组装流程
//!
//! 流程顺序（随机数消耗顺序固定，种子相同则结果相同）：
//! 1. 配额分组按顺序各抽 `per_group_quota` 道
//! 2. 从整个题库抽 `overflow_count` 道附加题
//! 3. 整体打乱题目顺序
//! 4. 逐题打乱选项
//! 5. 生成试卷册编号

use rand::seq::{index, SliceRandom};
use rand::Rng;
use tracing::{debug, warn};

use crate::models::question::{QuestionBank, QuestionRecord};
use crate::models::variant::{AssembledQuestion, Variant};
use crate::models::variant_spec::VariantSpec;
use crate::services::option_shuffler;
use crate::workflow::variant_ctx::VariantCtx;

/// 变体组装器
///
/// - 只读借用题库和组卷参数
/// - 不持有随机数源，由调用方逐次传入
/// - 不做校验，调用前应先通过 `validator::validate`
pub struct VariantAssembler<'a> {
    bank: &'a QuestionBank,
    spec: &'a VariantSpec,
}

impl<'a> VariantAssembler<'a> {
    pub fn new(bank: &'a QuestionBank, spec: &'a VariantSpec) -> Self {
        Self { bank, spec }
    }

    /// 组装第 `variant_number` 份卷子
    pub fn assemble<R: Rng + ?Sized>(&self, rng: &mut R, variant_number: usize) -> Variant {
        let ctx = VariantCtx::new(variant_number);
        let spec = self.spec;

        // ========== 1. 配额题 ==========
        let mut selected: Vec<&QuestionRecord> = Vec::new();
        for group in self.bank.quota_groups(spec.group_count) {
            let picks = draw_indices(rng, group.len(), spec.per_group_quota);
            if group.len() < spec.per_group_quota {
                debug!(
                    "{} 分组 '{}' 题目不足，放回抽样 {} 道",
                    ctx, group.name, spec.per_group_quota
                );
            }
            selected.extend(picks.into_iter().map(|i| &group.records[i]));
        }

        // ========== 2. 附加题（与配额题相互独立，可能重复） ==========
        let pool = self.bank.flat_pool();
        let picks = draw_indices(rng, pool.len(), spec.overflow_count);
        selected.extend(picks.into_iter().map(|i| pool[i]));

        // ========== 3. 打乱题目顺序 ==========
        selected.shuffle(rng);
        selected.truncate(spec.total_questions);

        // ========== 4. 打乱选项 ==========
        let questions = selected
            .into_iter()
            .enumerate()
            .map(|(position, record)| {
                let shuffled = option_shuffler::shuffle(record, &mut *rng);
                for warning in &shuffled.warnings {
                    warn!("{} 第 {} 题: {}", ctx, position + 1, warning);
                }
                AssembledQuestion {
                    text: record.text.clone(),
                    options: shuffled.options,
                    correct_label: shuffled.correct_label,
                    warnings: shuffled.warnings,
                }
            })
            .collect::<Vec<_>>();

        // ========== 5. 试卷册编号 ==========
        let booklet_id = generate_booklet_id(rng, spec.booklet_id_len);
        debug!("{} 共 {} 道题，试卷册编号 {}", ctx, questions.len(), booklet_id);

        Variant {
            variant_number,
            booklet_id,
            questions,
        }
    }
}

/// 组装单个变体
pub fn assemble<R: Rng + ?Sized>(
    bank: &QuestionBank,
    spec: &VariantSpec,
    rng: &mut R,
    variant_number: usize,
) -> Variant {
    VariantAssembler::new(bank, spec).assemble(rng, variant_number)
}

/// 从 `len` 个元素中抽取 `count` 个下标
///
/// 数量足够时不放回抽样（结果互不相同）；不足时放回抽样；`len` 为 0 时返回空。
fn draw_indices<R: Rng + ?Sized>(rng: &mut R, len: usize, count: usize) -> Vec<usize> {
    if count == 0 || len == 0 {
        return Vec::new();
    }
    if len >= count {
        index::sample(rng, len, count).into_vec()
    } else {
        (0..count).map(|_| rng.gen_range(0..len)).collect()
    }
}

/// 生成指定位数的随机数字编号（各位独立均匀分布）
pub fn generate_booklet_id<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::{OptionLabel, SourceGroup};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn bank(groups: usize, rows: usize) -> QuestionBank {
        QuestionBank::new(
            (0..groups)
                .map(|g| {
                    SourceGroup::new(
                        format!("g{}", g + 1),
                        (0..rows)
                            .map(|r| {
                                QuestionRecord::new(
                                    format!("g{}-q{}", g + 1, r + 1),
                                    ["甲", "乙", "丙", "丁"],
                                    Some(OptionLabel::A),
                                )
                            })
                            .collect(),
                    )
                })
                .collect(),
        )
    }

    fn group_of(text: &str) -> &str {
        text.split('-').next().unwrap_or_default()
    }

    #[test]
    fn test_variant_has_total_questions() {
        let bank = bank(8, 10);
        let spec = VariantSpec::new(6, 8, 2, 50, 1);
        let mut rng = StdRng::seed_from_u64(42);

        let variant = assemble(&bank, &spec, &mut rng, 3);
        assert_eq!(variant.questions.len(), 50);
        assert_eq!(variant.variant_number, 3);
    }

    #[test]
    fn test_quota_draws_are_distinct_per_group() {
        let bank = bank(3, 5);
        let spec = VariantSpec::new(5, 3, 0, 15, 1);
        let mut rng = StdRng::seed_from_u64(9);

        let variant = assemble(&bank, &spec, &mut rng, 1);
        let texts: HashSet<_> = variant.questions.iter().map(|q| q.text.as_str()).collect();
        // 每组 5 道题全部抽中且不重复
        assert_eq!(texts.len(), 15);
    }

    #[test]
    fn test_quota_counts_per_group() {
        let bank = bank(4, 10);
        let spec = VariantSpec::new(3, 2, 0, 6, 1);
        let mut rng = StdRng::seed_from_u64(17);

        let variant = assemble(&bank, &spec, &mut rng, 1);
        let from_g1 = variant.questions.iter().filter(|q| group_of(&q.text) == "g1").count();
        let from_g2 = variant.questions.iter().filter(|q| group_of(&q.text) == "g2").count();
        assert_eq!((from_g1, from_g2), (3, 3));
    }

    #[test]
    fn test_shortfall_with_replacement_fills_quota() {
        let bank = bank(1, 2);
        let spec = VariantSpec::new(5, 1, 0, 5, 1).with_replacement_on_shortfall(true);
        let mut rng = StdRng::seed_from_u64(4);

        let variant = assemble(&bank, &spec, &mut rng, 1);
        assert_eq!(variant.questions.len(), 5);
        let distinct: HashSet<_> = variant.questions.iter().map(|q| q.text.as_str()).collect();
        assert!(distinct.len() <= 2);
    }

    #[test]
    fn test_overflow_can_come_from_non_quota_groups() {
        let bank = bank(2, 3);
        let spec = VariantSpec::new(0, 0, 6, 6, 1);
        let mut rng = StdRng::seed_from_u64(21);

        let variant = assemble(&bank, &spec, &mut rng, 1);
        let groups: HashSet<_> = variant.questions.iter().map(|q| group_of(&q.text)).collect();
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_same_seed_same_variant() {
        let bank = bank(4, 10);
        let spec = VariantSpec::new(3, 4, 4, 16, 1);

        let a = assemble(&bank, &spec, &mut StdRng::seed_from_u64(123), 1);
        let b = assemble(&bank, &spec, &mut StdRng::seed_from_u64(123), 1);
        assert_eq!(a, b);
    }

    #[test]
    fn test_rng_draw_order_is_fixed() {
        let bank = bank(3, 6);
        let spec = VariantSpec::new(2, 3, 2, 8, 1);
        let variant = assemble(&bank, &spec, &mut StdRng::seed_from_u64(77), 1);

        // 按固定顺序手工重放：配额 → 附加 → 题序 → 选项 → 编号
        let mut rng = StdRng::seed_from_u64(77);
        let mut selected: Vec<&QuestionRecord> = Vec::new();
        for group in bank.quota_groups(3) {
            let picks = index::sample(&mut rng, group.len(), 2).into_vec();
            selected.extend(picks.into_iter().map(|i| &group.records[i]));
        }
        let pool = bank.flat_pool();
        let picks = index::sample(&mut rng, pool.len(), 2).into_vec();
        selected.extend(picks.into_iter().map(|i| pool[i]));
        selected.shuffle(&mut rng);

        let options: Vec<_> = selected
            .iter()
            .map(|record| option_shuffler::shuffle(record, &mut rng).options)
            .collect();
        let booklet_id = generate_booklet_id(&mut rng, spec.booklet_id_len);

        let texts: Vec<_> = selected.iter().map(|r| r.text.as_str()).collect();
        let assembled: Vec<_> = variant.questions.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(assembled, texts);
        let assembled_options: Vec<_> = variant.questions.iter().map(|q| q.options.clone()).collect();
        assert_eq!(assembled_options, options);
        assert_eq!(variant.booklet_id, booklet_id);
    }

    #[test]
    fn test_correct_text_survives_assembly() {
        let bank = bank(2, 6);
        let spec = VariantSpec::new(3, 2, 2, 8, 1);
        let mut rng = StdRng::seed_from_u64(8);

        let variant = assemble(&bank, &spec, &mut rng, 1);
        for question in &variant.questions {
            assert_eq!(question.correct_text(), Some("甲"));
        }
    }

    #[test]
    fn test_booklet_id_digits() {
        let mut rng = StdRng::seed_from_u64(0);
        let id = generate_booklet_id(&mut rng, 7);
        assert_eq!(id.len(), 7);
        assert!(id.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(generate_booklet_id(&mut rng, 0), "");
    }
}
