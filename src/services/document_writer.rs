//! 文档输出服务 - 业务能力层
//!
//! 把组好的变体写成纯文本试卷册和答案卡，并记录一份 JSON 清单。
//! 排版只做到"可打印、可人工核对"为止。

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::question::OptionLabel;
use crate::models::variant::{AnswerKey, GeneratedVariant, Variant};

/// 答案卡列数
const KEY_COLUMNS: usize = 4;
/// 答案卡单元格宽度（字符）
const KEY_CELL_WIDTH: usize = 10;
const SEPARATOR: &str = "---------------------------------";
const MANIFEST_FILE: &str = "manifest.json";

/// 清单中的一条记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    pub variant_number: usize,
    pub booklet_id: String,
    pub question_count: usize,
    /// 答案序列，未解析的位置为空字符串
    pub answers: Vec<String>,
    pub warning_count: usize,
}

impl ManifestEntry {
    pub fn from_generated(generated: &GeneratedVariant) -> Self {
        let variant = &generated.variant;
        let key = &generated.answer_key;
        Self {
            variant_number: variant.variant_number,
            booklet_id: variant.booklet_id.clone(),
            question_count: variant.questions.len(),
            answers: (0..key.len()).map(|i| key.label_text(i)).collect(),
            warning_count: variant.warning_count(),
        }
    }
}

pub fn booklet_file_name(variant_number: usize) -> String {
    format!("Variant_{:03}.txt", variant_number)
}

pub fn answer_key_file_name(variant_number: usize) -> String {
    format!("Variant_{:03}_Answers.txt", variant_number)
}

/// 渲染试卷册
pub fn render_booklet(program_name: &str, variant: &Variant) -> String {
    let mut lines = vec![
        format!("试卷册编号: {}", variant.booklet_id),
        format!("专业方向: {}", program_name),
        "考生编号: _____________    班级: _____________".to_string(),
        "_______________________________    ______________".to_string(),
        "   （姓名）                            （签名）".to_string(),
        String::new(),
        "答题前请先检查试卷册是否完整！".to_string(),
        String::new(),
        format!("题目数量: {} 道", variant.questions.len()),
    ];

    for (index, question) in variant.questions.iter().enumerate() {
        lines.push(SEPARATOR.to_string());
        lines.push(format!("{}. {}", index + 1, question.text));
        for label in OptionLabel::ALL {
            let text = question.option(label);
            if !text.trim().is_empty() {
                lines.push(format!("{}) {}", label, text));
            }
        }
    }

    lines.join("\n") + "\n"
}

/// 渲染答案卡
///
/// 答案按列优先排成 4 列：第一列是 1..rows，第二列接着往下。
/// 未解析的答案留空，方便人工发现。
pub fn render_answer_key(variant: &Variant, key: &AnswerKey) -> String {
    let mut out = format!(
        "变体 {:03} 答案，试卷册编号: {}\n",
        variant.variant_number, variant.booklet_id
    );

    if key.is_empty() {
        out.push_str("无答案\n");
        return out;
    }

    let total = key.len();
    let rows = total.div_ceil(KEY_COLUMNS);
    for row in 0..rows {
        let line = (0..KEY_COLUMNS)
            .map(|col| col * rows + row)
            .filter(|&index| index < total)
            .map(|index| {
                format!(
                    "{:<width$}",
                    format!("{}) {}", index + 1, key.label_text(index)),
                    width = KEY_CELL_WIDTH
                )
            })
            .collect::<String>();
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

/// 文档输出服务
pub struct DocumentWriter {
    variants_folder: PathBuf,
    keys_folder: PathBuf,
    program_name: String,
}

impl DocumentWriter {
    pub fn new(
        variants_folder: impl Into<PathBuf>,
        keys_folder: impl Into<PathBuf>,
        program_name: impl Into<String>,
    ) -> Self {
        Self {
            variants_folder: variants_folder.into(),
            keys_folder: keys_folder.into(),
            program_name: program_name.into(),
        }
    }

    /// 创建输出目录
    pub fn prepare_folders(&self) -> AppResult<()> {
        for folder in [&self.variants_folder, &self.keys_folder] {
            fs::create_dir_all(folder)
                .map_err(|e| AppError::create_dir_failed(folder.display().to_string(), e))?;
        }
        Ok(())
    }

    /// 写入试卷册
    pub fn write_booklet(&self, variant: &Variant) -> AppResult<PathBuf> {
        let path = self
            .variants_folder
            .join(booklet_file_name(variant.variant_number));
        write_file(&path, &render_booklet(&self.program_name, variant))?;
        Ok(path)
    }

    /// 写入答案卡
    pub fn write_answer_key(&self, variant: &Variant, key: &AnswerKey) -> AppResult<PathBuf> {
        let path = self
            .keys_folder
            .join(answer_key_file_name(variant.variant_number));
        write_file(&path, &render_answer_key(variant, key))?;
        Ok(path)
    }

    /// 在答案卡目录下写入本次生成的清单
    pub fn write_manifest(&self, entries: &[ManifestEntry]) -> AppResult<PathBuf> {
        let path = self.keys_folder.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(entries)?;
        write_file(&path, &json)?;
        Ok(path)
    }
}

fn write_file(path: &Path, content: &str) -> AppResult<()> {
    debug!("写入文件: {} ({} 字节)", path.display(), content.len());
    fs::write(path, content).map_err(|e| AppError::file_write_failed(path.display().to_string(), e))
}
