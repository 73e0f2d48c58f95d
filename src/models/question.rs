use serde::{Deserialize, Serialize};
use std::fmt;

/// 每道题最多的选项数量（A..D）
pub const OPTION_COUNT: usize = 4;

/// 选项标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    /// 按位置排列的全部标签
    pub const ALL: [OptionLabel; OPTION_COUNT] =
        [OptionLabel::A, OptionLabel::B, OptionLabel::C, OptionLabel::D];

    /// 标签对应的槽位（0-based）
    pub fn index(self) -> usize {
        self as usize
    }

    /// 从槽位解析标签
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// 获取标签字符
    pub fn as_char(self) -> char {
        match self {
            OptionLabel::A => 'A',
            OptionLabel::B => 'B',
            OptionLabel::C => 'C',
            OptionLabel::D => 'D',
        }
    }

    /// 从字符解析标签（不区分大小写）
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(OptionLabel::A),
            'B' => Some(OptionLabel::B),
            'C' => Some(OptionLabel::C),
            'D' => Some(OptionLabel::D),
            _ => None,
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// 题库中的一道题（按录入时的样子）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// 题干
    pub text: String,
    /// A..D 四个槽位，空字符串表示该槽位没有选项
    pub options: [String; OPTION_COUNT],
    /// 正确答案标签，`None` 表示源数据无法对应到任何标签
    pub correct_label: Option<OptionLabel>,
}

impl QuestionRecord {
    /// 创建题目，多于 4 个的选项会被丢弃，不足的补空
    pub fn new<I, S>(text: impl Into<String>, options: I, correct_label: Option<OptionLabel>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut slots: [String; OPTION_COUNT] = Default::default();
        for (slot, option) in slots.iter_mut().zip(options) {
            *slot = option.into();
        }
        Self {
            text: text.into(),
            options: slots,
            correct_label,
        }
    }

    pub fn option(&self, label: OptionLabel) -> &str {
        &self.options[label.index()]
    }

    /// 正确选项的原文；标签未解析或指向空槽位时返回 `None`
    pub fn correct_text(&self) -> Option<&str> {
        self.correct_label
            .map(|label| self.option(label))
            .filter(|text| !text.trim().is_empty())
    }

    /// 非空选项（去除首尾空白后非空），保持原标签
    pub fn non_empty_options(&self) -> impl Iterator<Item = (OptionLabel, &str)> + '_ {
        OptionLabel::ALL
            .iter()
            .map(move |&label| (label, self.option(label)))
            .filter(|(_, text)| !text.trim().is_empty())
    }

    pub fn non_empty_option_count(&self) -> usize {
        self.non_empty_options().count()
    }
}

/// 一个题目分组（对应一个知识点 / 原表格中的一个 sheet）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceGroup {
    pub name: String,
    pub records: Vec<QuestionRecord>,
}

impl SourceGroup {
    pub fn new(name: impl Into<String>, records: Vec<QuestionRecord>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// 题库：按录入顺序保存的分组集合，构建后不可变
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuestionBank {
    groups: Vec<SourceGroup>,
}

impl QuestionBank {
    pub fn new(groups: Vec<SourceGroup>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[SourceGroup] {
        &self.groups
    }

    /// 按名称查找分组
    pub fn group(&self, name: &str) -> Option<&SourceGroup> {
        self.groups.iter().find(|group| group.name == name)
    }

    /// 前 `count` 个分组（即配额分组）；分组不足时返回全部
    pub fn quota_groups(&self, count: usize) -> &[SourceGroup] {
        &self.groups[..count.min(self.groups.len())]
    }

    /// 所有分组首尾拼接后的题目池
    pub fn flat_pool(&self) -> Vec<&QuestionRecord> {
        self.groups
            .iter()
            .flat_map(|group| group.records.iter())
            .collect()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn total_records(&self) -> usize {
        self.groups.iter().map(SourceGroup::len).sum()
    }
}
