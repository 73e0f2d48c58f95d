//! 选项打乱服务 - 业务能力层
//!
//! 只负责"把一道题的选项打乱并找回正确答案"，不关心题目从哪来

use crate::error::QuestionWarning;
use crate::models::question::{OptionLabel, QuestionRecord, OPTION_COUNT};
use crate::services::matching_service::{find_correct_option, MatchKind};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// 打乱结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffledOptions {
    /// 新的 A..D 排列，空槽位补在末尾
    pub options: [String; OPTION_COUNT],
    /// 新排列下的正确标签
    pub correct_label: Option<OptionLabel>,
    pub warnings: Vec<QuestionWarning>,
}

/// 打乱一道题的选项
///
/// 有效选项少于 2 个时原样返回（不消耗随机数），并附带 `DegenerateOptionSet` 警告。
/// 找不到正确答案时标签为 `None`，并附带 `UnresolvedCorrectLabel` 警告。
pub fn shuffle<R: Rng + ?Sized>(record: &QuestionRecord, rng: &mut R) -> ShuffledOptions {
    let mut present: Vec<&str> = record.non_empty_options().map(|(_, text)| text).collect();

    if present.len() < 2 {
        let mut warnings = vec![QuestionWarning::DegenerateOptionSet {
            non_empty: present.len(),
        }];
        // 原标签只有指向非空选项时才保留
        let correct_label = record.correct_text().and(record.correct_label);
        if correct_label.is_none() {
            warnings.push(QuestionWarning::UnresolvedCorrectLabel {
                correct_text: None,
            });
        }
        return ShuffledOptions {
            options: record.options.clone(),
            correct_label,
            warnings,
        };
    }

    present.shuffle(rng);

    let mut options: [String; OPTION_COUNT] = Default::default();
    for (slot, text) in options.iter_mut().zip(present) {
        *slot = text.to_string();
    }

    let correct_text = record.correct_text();
    let found = correct_text.and_then(|text| find_correct_option(&options, text));
    if let Some(m) = found {
        if m.kind == MatchKind::Substring {
            debug!(
                "正确答案通过子串匹配定位: {:?} -> {}",
                correct_text.unwrap_or_default(),
                m.label
            );
        }
    }

    let correct_label = found.map(|m| m.label);
    let warnings = match correct_label {
        Some(_) => Vec::new(),
        None => vec![QuestionWarning::UnresolvedCorrectLabel {
            correct_text: correct_text.map(str::to_owned),
        }],
    };

    ShuffledOptions {
        options,
        correct_label,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn capital_record() -> QuestionRecord {
        QuestionRecord::new(
            "法国的首都是？",
            ["Paris", "Rome", "", "Berlin"],
            Some(OptionLabel::A),
        )
    }

    #[test]
    fn test_shuffle_keeps_correct_text() {
        let record = capital_record();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let shuffled = shuffle(&record, &mut rng);

            let label = shuffled.correct_label.expect("正确答案应能定位");
            assert_eq!(shuffled.options[label.index()], "Paris");
            assert!(shuffled.warnings.is_empty());
        }
    }

    #[test]
    fn test_shuffle_pads_empty_slots_at_end() {
        let record = capital_record();
        let mut rng = StdRng::seed_from_u64(7);
        let shuffled = shuffle(&record, &mut rng);

        assert_eq!(shuffled.options[3], "");
        let mut present: Vec<_> = shuffled.options[..3].iter().map(String::as_str).collect();
        present.sort();
        assert_eq!(present, vec!["Berlin", "Paris", "Rome"]);
    }

    #[test]
    fn test_shuffle_reaches_every_position() {
        let record = QuestionRecord::new("q", ["a", "b", "c", "d"], Some(OptionLabel::A));
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; OPTION_COUNT];
        for _ in 0..200 {
            let label = shuffle(&record, &mut rng).correct_label.unwrap();
            seen[label.index()] = true;
        }
        assert_eq!(seen, [true; OPTION_COUNT]);
    }

    #[test]
    fn test_degenerate_option_set_is_left_untouched() {
        let record = QuestionRecord::new("q", ["", "only", "", ""], Some(OptionLabel::B));
        let mut rng = StdRng::seed_from_u64(1);
        let shuffled = shuffle(&record, &mut rng);

        assert_eq!(shuffled.options, record.options);
        assert_eq!(shuffled.correct_label, Some(OptionLabel::B));
        assert_eq!(
            shuffled.warnings,
            vec![QuestionWarning::DegenerateOptionSet { non_empty: 1 }]
        );

        // 标签指向空槽位：答案卡必须留空，不能给出不存在的选项
        let dangling = QuestionRecord::new("q", ["only", "", "", ""], Some(OptionLabel::C));
        let shuffled = shuffle(&dangling, &mut rng);
        assert_eq!(shuffled.options, dangling.options);
        assert_eq!(shuffled.correct_label, None);
        assert_eq!(
            shuffled.warnings,
            vec![
                QuestionWarning::DegenerateOptionSet { non_empty: 1 },
                QuestionWarning::UnresolvedCorrectLabel { correct_text: None },
            ]
        );
    }

    #[test]
    fn test_degenerate_option_set_does_not_consume_rng() {
        let record = QuestionRecord::new("q", ["only"], Some(OptionLabel::A));
        let mut a = StdRng::seed_from_u64(3);
        let mut b = StdRng::seed_from_u64(3);
        shuffle(&record, &mut a);
        assert_eq!(a.gen::<u64>(), b.gen::<u64>());
    }

    #[test]
    fn test_unresolved_label_is_reported() {
        let record = QuestionRecord::new("q", ["Paris", "Rome", "Berlin", "Madrid"], None);
        let mut rng = StdRng::seed_from_u64(5);
        let shuffled = shuffle(&record, &mut rng);

        assert_eq!(shuffled.correct_label, None);
        assert_eq!(
            shuffled.warnings,
            vec![QuestionWarning::UnresolvedCorrectLabel { correct_text: None }]
        );
    }
}
