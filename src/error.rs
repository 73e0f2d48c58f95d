use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 题库 / 组卷参数校验失败
    #[error("校验错误: {0}")]
    Validation(#[from] ValidationErrors),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 创建目录失败
    #[error("创建目录失败 ({path}): {source}")]
    CreateDirFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// JSON 序列化失败
    #[error("JSON序列化失败: {0}")]
    JsonSerializeFailed(#[from] serde_json::Error),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

// ========== 校验错误（致命，阻止生成） ==========

/// 题目质量问题的具体原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("题干为空")]
    EmptyText,
    #[error("缺少正确答案")]
    UnresolvedCorrectLabel,
    #[error("有效选项不足 4 个 (实际 {0} 个)")]
    TooFewOptions(usize),
}

/// 校验错误，任何一条都会阻止生成
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 配额题 + 附加题 ≠ 题目总数
    #[error(
        "题目数量不一致: {per_group_quota} × {group_count} + {overflow_count} ≠ {total_questions}"
    )]
    ConfigMismatch {
        per_group_quota: usize,
        group_count: usize,
        overflow_count: usize,
        total_questions: usize,
    },
    /// 参数取值非法
    #[error("参数 {field} 无效: {reason}")]
    InvalidSpecValue { field: &'static str, reason: String },
    /// 题库分组数少于配额分组数
    #[error("题库只有 {have} 个分组，但需要 {need} 个配额分组")]
    MissingQuotaGroups { have: usize, need: usize },
    /// 配额分组题目不足
    #[error("分组 '{group}' 题目不足 ({have} < {need})")]
    InsufficientGroupRows {
        group: String,
        have: usize,
        need: usize,
    },
    /// 整个题库不足以抽取附加题
    #[error("题库总题数不足以抽取附加题 ({have} < {need})")]
    InsufficientPoolRows { have: usize, need: usize },
    /// 题目本身不合格
    #[error("{group} [第 {row} 题]: {reason}")]
    MalformedRecord {
        group: String,
        /// 分组内的题目序号（从 1 开始）
        row: usize,
        reason: MalformedReason,
    },
}

/// 收集到的全部校验错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<ValidationError> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "共 {} 个问题", self.0.len())?;
        for error in &self.0 {
            write!(f, "\n  - {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// ========== 单题警告（非致命，继续生成） ==========

/// 单题数据问题，附加在组好的题目上，答案卡对应位置留空
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionWarning {
    /// 打乱后找不到正确选项
    #[error("无法定位正确答案 (原答案: {})", .correct_text.as_deref().unwrap_or("<缺失>"))]
    UnresolvedCorrectLabel { correct_text: Option<String> },
    /// 有效选项少于 2 个，未打乱
    #[error("有效选项少于 2 个 (实际 {non_empty} 个)，未打乱选项")]
    DegenerateOptionSet { non_empty: usize },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建目录错误
    pub fn create_dir_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::CreateDirFailed {
            path: path.into(),
            source,
        })
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::File(FileError::JsonSerializeFailed(err))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_display_lists_every_error() {
        let errors = ValidationErrors::new(vec![
            ValidationError::InsufficientGroupRows {
                group: "代数".to_string(),
                have: 4,
                need: 6,
            },
            ValidationError::MalformedRecord {
                group: "代数".to_string(),
                row: 2,
                reason: MalformedReason::EmptyText,
            },
        ]);

        let text = errors.to_string();
        assert!(text.starts_with("共 2 个问题"));
        assert!(text.contains("分组 '代数' 题目不足 (4 < 6)"));
        assert!(text.contains("代数 [第 2 题]: 题干为空"));
    }

    #[test]
    fn test_unresolved_warning_display() {
        let warning = QuestionWarning::UnresolvedCorrectLabel { correct_text: None };
        assert!(warning.to_string().contains("<缺失>"));
    }
}
