//! 答案卡生成

use crate::models::variant::{AnswerKey, Variant};

/// 按题目顺序取出每道题的正确标签
///
/// 未解析的标签保留为空位，交给渲染端显示为空白。
pub fn build_key(variant: &Variant) -> AnswerKey {
    AnswerKey {
        entries: variant.questions.iter().map(|q| q.correct_label).collect(),
    }
}
