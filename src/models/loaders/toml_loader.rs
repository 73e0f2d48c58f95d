use crate::models::question::{OptionLabel, QuestionBank, QuestionRecord, SourceGroup, OPTION_COUNT};
use crate::models::variant_spec::{VariantSpec, DEFAULT_BOOKLET_ID_LEN};
use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tokio::fs;

/// 题库文件格式：一个 TOML 文件对应一个分组
#[derive(Debug, Deserialize)]
struct GroupFile {
    name: Option<String>,
    #[serde(default)]
    questions: Vec<QuestionEntry>,
}

#[derive(Debug, Deserialize)]
struct QuestionEntry {
    #[serde(default)]
    text: String,
    #[serde(default)]
    options: Vec<String>,
    /// 标签（`B`、`b)`、`C.`）或正确选项原文；缺省时第一个选项为正确答案
    answer: Option<String>,
}

/// 组卷参数文件格式
#[derive(Debug, Deserialize)]
struct RunSpecFile {
    per_group_quota: usize,
    group_count: usize,
    overflow_count: Option<usize>,
    total_questions: usize,
    variant_count: usize,
    #[serde(default)]
    sample_with_replacement_on_shortfall: bool,
    booklet_id_len: Option<usize>,
}

fn label_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*\(?\s*([A-Da-d])\s*[).:]?\s*$").expect("标签正则表达式无效")
    })
}

/// 解析题目的正确答案标签
///
/// # 参数
/// - `options`: A..D 槽位
/// - `answer`: 源数据中的答案列
///
/// # 返回
/// 能对应到某个标签时返回该标签，否则返回 `None`
pub fn resolve_correct_label(
    options: &[String; OPTION_COUNT],
    answer: Option<&str>,
) -> Option<OptionLabel> {
    let Some(answer) = answer else {
        // 原表格约定：第一列选项就是正确答案
        return Some(OptionLabel::A);
    };

    if let Some(captures) = label_pattern().captures(answer) {
        return captures[1].chars().next().and_then(OptionLabel::from_char);
    }

    let wanted = answer.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }
    options
        .iter()
        .position(|option| option.trim().to_lowercase() == wanted)
        .and_then(OptionLabel::from_index)
}

/// 解析单个分组文件的内容
pub fn parse_source_group(content: &str, fallback_name: &str) -> Result<SourceGroup> {
    let file: GroupFile = toml::from_str(content).context("无法解析题库TOML内容")?;
    let name = file
        .name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| fallback_name.to_string());

    let records = file
        .questions
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            if entry.options.len() > OPTION_COUNT {
                tracing::warn!(
                    "分组 '{}' 第 {} 题有 {} 个选项，只保留前 {} 个",
                    name,
                    index + 1,
                    entry.options.len(),
                    OPTION_COUNT
                );
            }
            let record = QuestionRecord::new(entry.text, entry.options, None);
            let correct_label = resolve_correct_label(&record.options, entry.answer.as_deref());
            QuestionRecord {
                correct_label,
                ..record
            }
        })
        .collect();

    Ok(SourceGroup::new(name, records))
}

/// 从 TOML 文件加载一个分组，分组名缺省为文件名
pub async fn load_source_group(toml_file_path: &Path) -> Result<SourceGroup> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取题库文件: {}", toml_file_path.display()))?;

    let fallback_name = toml_file_path
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    parse_source_group(&content, &fallback_name)
        .with_context(|| format!("无法解析题库文件: {}", toml_file_path.display()))
}

/// 从文件夹中加载所有 TOML 文件组成题库
///
/// 文件按文件名排序，排序结果决定分组顺序（前 N 个为配额分组）。
/// 任何一个文件解析失败都会中止加载。
pub async fn load_question_bank(folder_path: &str) -> Result<QuestionBank> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path);
    }

    let mut toml_files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml_files.push(path);
        }
    }
    toml_files.sort();

    if toml_files.is_empty() {
        tracing::warn!("在文件夹 {} 中没有找到 TOML 文件", folder_path);
    }

    let mut seen = HashSet::new();
    let mut groups = Vec::with_capacity(toml_files.len());
    for path in &toml_files {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );
        let group = load_source_group(path).await?;
        if !seen.insert(group.name.clone()) {
            anyhow::bail!("分组名称重复: '{}' ({})", group.name, path.display());
        }
        tracing::info!("分组 '{}' 成功加载 {} 个题目", group.name, group.len());
        groups.push(group);
    }

    Ok(QuestionBank::new(groups))
}

/// 解析组卷参数；未填写 `overflow_count` 时按题目总数自动推算
pub fn parse_variant_spec(content: &str) -> Result<VariantSpec> {
    let file: RunSpecFile = toml::from_str(content).context("无法解析组卷参数")?;

    let overflow_count = file.overflow_count.unwrap_or_else(|| {
        let auto = VariantSpec::auto_overflow(
            file.total_questions,
            file.per_group_quota,
            file.group_count,
        );
        tracing::debug!("附加题数量未配置，自动计算为 {}", auto);
        auto
    });

    Ok(VariantSpec {
        per_group_quota: file.per_group_quota,
        group_count: file.group_count,
        overflow_count,
        total_questions: file.total_questions,
        variant_count: file.variant_count,
        sample_with_replacement_on_shortfall: file.sample_with_replacement_on_shortfall,
        booklet_id_len: file.booklet_id_len.unwrap_or(DEFAULT_BOOKLET_ID_LEN),
    })
}

/// 从 TOML 文件加载组卷参数
pub async fn load_variant_spec(path: &Path) -> Result<VariantSpec> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取组卷参数文件: {}", path.display()))?;

    parse_variant_spec(&content)
        .with_context(|| format!("无法解析组卷参数文件: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(texts: [&str; 4]) -> [String; OPTION_COUNT] {
        texts.map(String::from)
    }

    #[test]
    fn test_resolve_label_forms() {
        let opts = options(["Paris", "Rome", "Madrid", "Berlin"]);
        assert_eq!(resolve_correct_label(&opts, None), Some(OptionLabel::A));
        assert_eq!(resolve_correct_label(&opts, Some("B")), Some(OptionLabel::B));
        assert_eq!(resolve_correct_label(&opts, Some(" c) ")), Some(OptionLabel::C));
        assert_eq!(resolve_correct_label(&opts, Some("(D)")), Some(OptionLabel::D));
        assert_eq!(resolve_correct_label(&opts, Some("  berlin ")), Some(OptionLabel::D));
        assert_eq!(resolve_correct_label(&opts, Some("London")), None);
        assert_eq!(resolve_correct_label(&opts, Some("   ")), None);
    }

    #[test]
    fn test_parse_source_group() {
        let content = r#"
name = "地理"

[[questions]]
text = "法国的首都是？"
options = ["Paris", "Rome", "", "Berlin"]

[[questions]]
text = "意大利的首都是？"
options = ["Paris", "Rome", "Madrid", "Berlin", "Lisbon"]
answer = "rome"
"#;
        let group = parse_source_group(content, "fallback").unwrap();
        assert_eq!(group.name, "地理");
        assert_eq!(group.len(), 2);
        assert_eq!(group.records[0].correct_label, Some(OptionLabel::A));
        assert_eq!(group.records[0].options[2], "");
        assert_eq!(group.records[1].correct_label, Some(OptionLabel::B));
        assert_eq!(group.records[1].options[3], "Berlin");
    }

    #[test]
    fn test_parse_source_group_uses_fallback_name() {
        let group = parse_source_group("questions = []", "历史").unwrap();
        assert_eq!(group.name, "历史");
        assert!(group.is_empty());
    }

    #[test]
    fn test_parse_variant_spec_auto_overflow() {
        let spec = parse_variant_spec(
            r#"
per_group_quota = 6
group_count = 8
total_questions = 50
variant_count = 3
"#,
        )
        .unwrap();
        assert_eq!(spec.overflow_count, 2);
        assert_eq!(spec.booklet_id_len, DEFAULT_BOOKLET_ID_LEN);
        assert!(!spec.sample_with_replacement_on_shortfall);
    }

    #[test]
    fn test_parse_variant_spec_keeps_explicit_overflow() {
        let spec = parse_variant_spec(
            r#"
per_group_quota = 7
group_count = 8
overflow_count = 2
total_questions = 50
variant_count = 1
sample_with_replacement_on_shortfall = true
booklet_id_len = 5
"#,
        )
        .unwrap();
        assert_eq!(spec.overflow_count, 2);
        assert_eq!(spec.booklet_id_len, 5);
        assert!(spec.sample_with_replacement_on_shortfall);
    }
}
