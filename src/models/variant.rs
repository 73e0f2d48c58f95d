use crate::error::QuestionWarning;
use crate::models::question::{OptionLabel, OPTION_COUNT};
use serde::Serialize;

/// 某个变体中的一道题（选项已打乱）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssembledQuestion {
    pub text: String,
    /// 打乱后的 A..D，空选项补在末尾
    pub options: [String; OPTION_COUNT],
    /// 当前排列下的正确标签，无法定位时为 `None`
    pub correct_label: Option<OptionLabel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<QuestionWarning>,
}

impl AssembledQuestion {
    pub fn option(&self, label: OptionLabel) -> &str {
        &self.options[label.index()]
    }

    /// 正确标签当前指向的选项原文
    pub fn correct_text(&self) -> Option<&str> {
        self.correct_label.map(|label| self.option(label))
    }
}

/// 一份完整的随机试卷
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variant {
    /// 变体序号（从 1 开始）
    pub variant_number: usize,
    /// 试卷册编号，仅用于人工核对试卷与答案卡，不保证唯一
    pub booklet_id: String,
    pub questions: Vec<AssembledQuestion>,
}

impl Variant {
    pub fn warning_count(&self) -> usize {
        self.questions.iter().map(|q| q.warnings.len()).sum()
    }
}

/// 答案卡：与题目顺序一一对应的正确标签
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnswerKey {
    pub entries: Vec<Option<OptionLabel>>,
}

impl AnswerKey {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<Option<OptionLabel>> {
        self.entries.get(position).copied()
    }

    /// 答案文本，未解析的位置为空字符串
    pub fn label_text(&self, position: usize) -> String {
        self.get(position)
            .flatten()
            .map(|label| label.to_string())
            .unwrap_or_default()
    }

    pub fn unresolved_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_none()).count()
    }
}

/// 生成器每次产出的一组结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedVariant {
    pub variant: Variant,
    pub answer_key: AnswerKey,
}
