use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// 纠错策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// 纯规则：参考词 / 直接 / 逐字 / 同音字
    #[default]
    Rules,
    /// 先请求序列标注服务，再走规则兜底
    Labeler,
    /// 交给大模型直接输出纠正后的文本
    Llm,
}

impl std::str::FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rules" => Ok(StrategyKind::Rules),
            "labeler" => Ok(StrategyKind::Labeler),
            "llm" => Ok(StrategyKind::Llm),
            _ => Err(format!("未知策略: {s}（可选 rules / labeler / llm）")),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub strategy: StrategyKind,
    #[serde(default)]
    pub labeler: LabelerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    /// 额外同音字，如 "在" = ["再", "載"]，启动时并入内置表
    #[serde(default)]
    pub homophones: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelerConfig {
    /// 序列标注服务地址
    #[serde(default = "default_labeler_url")]
    pub url: String,
    /// 请求超时（毫秒），超时后退回规则定位
    #[serde(default = "default_labeler_timeout")]
    pub timeout_ms: u64,
    /// 原文与指令之间的分隔符
    #[serde(default = "default_separator")]
    pub separator: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// OpenAI 兼容接口地址
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    /// 存放 API Key 的环境变量名
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// 请求超时（毫秒）
    #[serde(default = "default_llm_timeout")]
    pub timeout_ms: u64,
}

fn default_labeler_url() -> String {
    "http://127.0.0.1:8000/label".to_string()
}
fn default_labeler_timeout() -> u64 {
    3000
}
fn default_separator() -> String {
    "[SEP]".to_string()
}
fn default_llm_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_llm_model() -> String {
    "gpt-4o-mini".to_string()
}
fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}
fn default_llm_timeout() -> u64 {
    15000
}

impl Default for LabelerConfig {
    fn default() -> Self {
        Self {
            url: default_labeler_url(),
            timeout_ms: default_labeler_timeout(),
            separator: default_separator(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            model: default_llm_model(),
            api_key_env: default_api_key_env(),
            timeout_ms: default_llm_timeout(),
        }
    }
}

/// 获取配置文件路径
pub fn config_path() -> PathBuf {
    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("voice-correction");
    config_dir.join("config.toml")
}

/// 加载默认路径下的配置，文件不存在则创建默认配置
pub fn load_config() -> Result<AppConfig, String> {
    load_config_from(&config_path())
}

/// 从指定路径加载配置，文件不存在则写入默认配置
pub fn load_config_from(path: &Path) -> Result<AppConfig, String> {
    if path.exists() {
        let content = fs::read_to_string(path).map_err(|e| format!("读取配置失败: {e}"))?;
        parse_config(&content)
    } else {
        let config = AppConfig::default();
        save_config_to(&config, path)?;
        Ok(config)
    }
}

pub fn parse_config(content: &str) -> Result<AppConfig, String> {
    toml::from_str(content).map_err(|e| format!("解析配置失败: {e}"))
}

/// 保存配置到默认路径
pub fn save_config(config: &AppConfig) -> Result<(), String> {
    save_config_to(config, &config_path())
}

pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| format!("创建配置目录失败: {e}"))?;
    }
    let content = toml::to_string_pretty(config).map_err(|e| format!("序列化配置失败: {e}"))?;
    fs::write(path, content).map_err(|e| format!("写入配置失败: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.strategy, StrategyKind::Rules);
        assert_eq!(config.labeler.timeout_ms, 3000);
        assert_eq!(config.labeler.separator, "[SEP]");
        assert_eq!(config.llm.api_key_env, "OPENAI_API_KEY");
        assert!(config.homophones.is_empty());
    }

    #[test]
    fn parses_sections() {
        let config = parse_config(
            r#"
strategy = "labeler"

[labeler]
url = "http://10.0.0.2:9000/predict"
timeout_ms = 500

[homophones]
"在" = ["再", "載"]
"#,
        )
        .unwrap();
        assert_eq!(config.strategy, StrategyKind::Labeler);
        assert_eq!(config.labeler.url, "http://10.0.0.2:9000/predict");
        assert_eq!(config.labeler.timeout_ms, 500);
        assert_eq!(config.labeler.separator, "[SEP]");
        assert_eq!(config.homophones["在"], vec!["再", "載"]);
    }

    #[test]
    fn rejects_unknown_strategy() {
        assert!(parse_config(r#"strategy = "magic""#).is_err());
        assert_eq!("LLM".parse::<StrategyKind>(), Ok(StrategyKind::Llm));
        assert!("magic".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn save_then_load_round_trip() {
        let path = std::env::temp_dir()
            .join(format!("voice-correction-test-{}", std::process::id()))
            .join("config.toml");
        let _ = fs::remove_file(&path);

        // 不存在时写入默认配置
        let created = load_config_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created.strategy, StrategyKind::Rules);

        let mut config = created;
        config.strategy = StrategyKind::Llm;
        config.llm.model = "qwen-plus".to_string();
        save_config_to(&config, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.strategy, StrategyKind::Llm);
        assert_eq!(loaded.llm.model, "qwen-plus");

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
