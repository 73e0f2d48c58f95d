use crate::error::{AppResult, ConfigError};
use std::str::FromStr;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 题库 TOML 文件目录（每个文件一个分组）
    pub bank_folder: String,
    /// 组卷参数文件
    pub run_config_file: String,
    /// 试卷册输出目录
    pub variants_folder: String,
    /// 答案卡输出目录
    pub keys_folder: String,
    /// 专业方向（印在试卷册上）
    pub program_name: String,
    /// 随机种子，未设置时随机生成并写入日志
    pub random_seed: Option<u64>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 单题警告文件
    pub warn_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bank_folder: "question_bank".to_string(),
            run_config_file: "variant_spec.toml".to_string(),
            variants_folder: "variants".to_string(),
            keys_folder: "keys".to_string(),
            program_name: String::new(),
            random_seed: None,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            warn_file: "warn.txt".to_string(),
        }
    }
}

impl Config {
    /// 从环境变量读取配置，未设置的项使用默认值
    ///
    /// 已设置但无法解析的数值会返回错误，而不是悄悄回退到默认值。
    pub fn from_env() -> AppResult<Self> {
        let default = Self::default();
        Ok(Self {
            bank_folder: std::env::var("BANK_FOLDER").unwrap_or(default.bank_folder),
            run_config_file: std::env::var("RUN_CONFIG_FILE").unwrap_or(default.run_config_file),
            variants_folder: std::env::var("VARIANTS_FOLDER").unwrap_or(default.variants_folder),
            keys_folder: std::env::var("KEYS_FOLDER").unwrap_or(default.keys_folder),
            program_name: std::env::var("PROGRAM_NAME").unwrap_or(default.program_name),
            random_seed: parse_env("RANDOM_SEED", "u64")?.or(default.random_seed),
            verbose_logging: parse_env("VERBOSE_LOGGING", "bool")?
                .unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            warn_file: std::env::var("WARN_FILE").unwrap_or(default.warn_file),
        })
    }
}

fn parse_env<T: FromStr>(var_name: &str, expected_type: &str) -> AppResult<Option<T>> {
    match std::env::var(var_name) {
        Ok(value) => parse_value(var_name, &value, expected_type).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_value<T: FromStr>(var_name: &str, value: &str, expected_type: &str) -> AppResult<T> {
    value.trim().parse().map_err(|_| {
        ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value: value.to_string(),
            expected_type: expected_type.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value::<u64>("RANDOM_SEED", " 42 ", "u64").unwrap(), 42);
        assert!(parse_value::<bool>("VERBOSE_LOGGING", "true", "bool").unwrap());

        let err = parse_value::<u64>("RANDOM_SEED", "abc", "u64").unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::EnvVarParseFailed { ref var_name, .. }) if var_name == "RANDOM_SEED"
        ));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bank_folder, "question_bank");
        assert_eq!(config.random_seed, None);
        assert!(!config.verbose_logging);
    }
}
