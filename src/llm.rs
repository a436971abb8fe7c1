//! 大模型纠错：把原文和口述指令交给 OpenAI 兼容接口，直接拿回纠正后的全文。
//!
//! 这是与规则定位并列的另一条顶层路径，走这条路时不经过定位和编辑。
use crate::config::LlmConfig;
use crate::editor::char_len;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const PROMPT_TEMPLATE: &str = "你是中文文字校正助手。使用者透過語音下指令修改一段文字。

## 「X的Y」格式
語音輸入時，使用者會用「參考詞的字」指明要哪個同音字：
- 「天氣的氣」= 用「氣」，「天氣」只是幫助辨識發音
- 「器材的器」= 用「器」

## 指令格式
1. 「把A的B改成C的D」：在原文找到 B，換成 D
2. 「把X改成Y」：把 X 換成 Y
3. 「把X刪除」：刪除 X
4. 「在X前面/後面加Y」：插入 Y

## 範例
原始：今天天氣很好
指令：把天氣的氣改成器材的氣
結果：今天天器很好

原始：我很高興
指令：把高興的興改成欣賞的欣
結果：我很高欣

原始：天氣好
指令：在好前面加很
結果：天氣很好

## 請處理
原始文字：{original}
語音指令：{command}

只輸出修改後的文字，不要解釋：";

const ANSWER_PREFIXES: &[&str] = &["修改後：", "結果：", "答案：", "輸出："];
const QUOTES: &[char] = &['"', '\'', '“', '”', '‘', '’', '「', '」'];

static FENCE_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^```[^\n]*\n?").unwrap());
static FENCE_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n?```$").unwrap());

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// 填充提示词
pub fn build_prompt(original: &str, command: &str) -> String {
    PROMPT_TEMPLATE
        .replace("{original}", original)
        .replace("{command}", command)
}

/// 去掉模型回复里的代码块、引号和「結果：」之类的前缀
pub fn clean_response(response: &str) -> String {
    let text = response.trim();
    let text = FENCE_OPEN.replace(text, "");
    let text = FENCE_CLOSE.replace(&text, "");
    let mut text = text.trim().trim_matches(QUOTES);

    for prefix in ANSWER_PREFIXES {
        if let Some(rest) = text.strip_prefix(prefix) {
            text = rest;
        }
    }
    text.trim().to_string()
}

/// 合理性检查：空结果或比原文长三倍以上都视为无效
pub fn is_plausible(result: &str, original: &str) -> bool {
    let len = char_len(result);
    len > 0 && len <= char_len(original) * 3
}

/// OpenAI 兼容接口的纠错客户端
pub struct LlmCorrector {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl LlmCorrector {
    pub fn new(config: &LlmConfig) -> Result<Self, String> {
        let api_key = std::env::var(&config.api_key_env).ok().filter(|k| !k.is_empty());
        if api_key.is_none() {
            log::warn!("环境变量 {} 未设置，将以无鉴权方式请求", config.api_key_env);
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| format!("创建大模型客户端失败: {e}"))?;
        Ok(Self {
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            api_key,
            client,
        })
    }

    async fn complete(&self, prompt: &str) -> Result<String, String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.0,
        };

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| format!("大模型请求失败: {e}"))?;

        if !resp.status().is_success() {
            return Err(format!("大模型返回错误状态: {}", resp.status()));
        }

        let body: ChatResponse = resp
            .json()
            .await
            .map_err(|e| format!("解析大模型响应失败: {e}"))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| "大模型响应中无内容".to_string())
    }

    /// 让模型直接输出纠正后的文本，返回 (文本, 是否按指令处理)。
    ///
    /// - 请求失败：`(原文, false)`
    /// - 结果不合理：`(原文, true)`
    pub async fn correct(&self, original: &str, command: &str) -> (String, bool) {
        log::info!("大模型纠错: 原文={original} 指令={command}");
        let raw = match self.complete(&build_prompt(original, command)).await {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("{e}");
                return (original.to_string(), false);
            }
        };

        let result = clean_response(&raw);
        if !is_plausible(&result, original) {
            log::warn!("大模型结果不合理 {result:?}，保留原文");
            return (original.to_string(), true);
        }

        log::info!("大模型结果: {result}");
        (result, true)
    }
}
