//! 题库校验服务 - 业务能力层
//!
//! 生成开始前唯一的准入关卡：收集题库与组卷参数之间的所有问题，
//! 一次性返回给用户，而不是遇到第一个错误就停止。

use crate::error::{MalformedReason, ValidationError};
use crate::models::question::{QuestionBank, QuestionRecord, OPTION_COUNT};
use crate::models::variant_spec::VariantSpec;

/// 校验题库与组卷参数
///
/// 无副作用，对同一输入重复调用结果相同。返回空列表表示可以生成。
pub fn validate(bank: &QuestionBank, spec: &VariantSpec) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_spec_values(spec, &mut errors);
    check_arithmetic(spec, &mut errors);
    check_quota_groups(bank, spec, &mut errors);
    check_overflow_pool(bank, spec, &mut errors);
    check_records(bank, &mut errors);

    errors
}

/// 放回抽样策略下可以容忍的题目不足（仅用于日志警告）
pub fn shortfall_warnings(bank: &QuestionBank, spec: &VariantSpec) -> Vec<ValidationError> {
    if !spec.sample_with_replacement_on_shortfall {
        return Vec::new();
    }

    let mut warnings: Vec<ValidationError> = bank
        .quota_groups(spec.group_count)
        .iter()
        .filter(|group| !group.is_empty() && group.len() < spec.per_group_quota)
        .map(|group| ValidationError::InsufficientGroupRows {
            group: group.name.clone(),
            have: group.len(),
            need: spec.per_group_quota,
        })
        .collect();

    let pool = bank.total_records();
    if pool > 0 && pool < spec.overflow_count {
        warnings.push(ValidationError::InsufficientPoolRows {
            have: pool,
            need: spec.overflow_count,
        });
    }

    warnings
}

fn check_spec_values(spec: &VariantSpec, errors: &mut Vec<ValidationError>) {
    if spec.total_questions == 0 {
        errors.push(ValidationError::InvalidSpecValue {
            field: "total_questions",
            reason: "每个变体至少需要 1 道题".to_string(),
        });
    }
    if spec.variant_count == 0 {
        errors.push(ValidationError::InvalidSpecValue {
            field: "variant_count",
            reason: "至少需要生成 1 个变体".to_string(),
        });
    }
    if spec.booklet_id_len == 0 {
        errors.push(ValidationError::InvalidSpecValue {
            field: "booklet_id_len",
            reason: "试卷册编号至少 1 位".to_string(),
        });
    }
}

fn check_arithmetic(spec: &VariantSpec, errors: &mut Vec<ValidationError>) {
    if spec.drawn_total() != Some(spec.total_questions) {
        errors.push(ValidationError::ConfigMismatch {
            per_group_quota: spec.per_group_quota,
            group_count: spec.group_count,
            overflow_count: spec.overflow_count,
            total_questions: spec.total_questions,
        });
    }
}

fn check_quota_groups(bank: &QuestionBank, spec: &VariantSpec, errors: &mut Vec<ValidationError>) {
    if bank.group_count() < spec.group_count {
        errors.push(ValidationError::MissingQuotaGroups {
            have: bank.group_count(),
            need: spec.group_count,
        });
    }

    for group in bank.quota_groups(spec.group_count) {
        let have = group.len();
        let need = spec.per_group_quota;
        // 空分组即使允许放回抽样也无题可抽
        if have < need && (!spec.sample_with_replacement_on_shortfall || have == 0) {
            errors.push(ValidationError::InsufficientGroupRows {
                group: group.name.clone(),
                have,
                need,
            });
        }
    }
}

fn check_overflow_pool(bank: &QuestionBank, spec: &VariantSpec, errors: &mut Vec<ValidationError>) {
    let have = bank.total_records();
    let need = spec.overflow_count;
    if have < need && (!spec.sample_with_replacement_on_shortfall || have == 0) {
        errors.push(ValidationError::InsufficientPoolRows { have, need });
    }
}

fn check_records(bank: &QuestionBank, errors: &mut Vec<ValidationError>) {
    for group in bank.groups() {
        for (index, record) in group.records.iter().enumerate() {
            for reason in record_problems(record) {
                errors.push(ValidationError::MalformedRecord {
                    group: group.name.clone(),
                    row: index + 1,
                    reason,
                });
            }
        }
    }
}

fn record_problems(record: &QuestionRecord) -> Vec<MalformedReason> {
    let mut reasons = Vec::new();
    if record.text.trim().is_empty() {
        reasons.push(MalformedReason::EmptyText);
    }
    if record.correct_text().is_none() {
        reasons.push(MalformedReason::UnresolvedCorrectLabel);
    }
    let option_count = record.non_empty_option_count();
    if option_count < OPTION_COUNT {
        reasons.push(MalformedReason::TooFewOptions(option_count));
    }
    reasons
}
