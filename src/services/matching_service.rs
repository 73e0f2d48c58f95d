/// 正确答案匹配服务
///
/// 负责在打乱后的选项中找回原正确选项的位置
use crate::models::question::{OptionLabel, OPTION_COUNT};

/// 匹配方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// 去除首尾空白、忽略大小写后完全相同
    Exact,
    /// 一方包含另一方（兜底）
    Substring,
}

/// 匹配结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionMatch {
    pub label: OptionLabel,
    pub kind: MatchKind,
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// 在选项中查找正确答案
///
/// 先做精确匹配；找不到时退回到子串包含匹配（原文包含候选或候选包含原文），
/// 用于应付表格里答案列与选项列之间标点、备注不一致的情况。
///
/// # 参数
/// - `options`: 打乱后的 A..D 选项
/// - `correct_text`: 原正确选项的文本
///
/// # 返回
/// 第一个命中的标签及匹配方式；空槽位永远不会命中
pub fn find_correct_option(
    options: &[String; OPTION_COUNT],
    correct_text: &str,
) -> Option<OptionMatch> {
    let wanted = normalize(correct_text);
    if wanted.is_empty() {
        return None;
    }

    let candidates: Vec<(OptionLabel, String)> = OptionLabel::ALL
        .iter()
        .map(|&label| (label, normalize(&options[label.index()])))
        .filter(|(_, text)| !text.is_empty())
        .collect();

    if let Some((label, _)) = candidates.iter().find(|(_, text)| *text == wanted) {
        return Some(OptionMatch {
            label: *label,
            kind: MatchKind::Exact,
        });
    }

    candidates
        .iter()
        .find(|(_, text)| text.contains(wanted.as_str()) || wanted.contains(text.as_str()))
        .map(|(label, _)| OptionMatch {
            label: *label,
            kind: MatchKind::Substring,
        })
}
