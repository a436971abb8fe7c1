use crate::config::LabelerConfig;
use crate::editor::char_len;
use crate::labels::{model_input, LabelSequence};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct LabelRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct LabelResponse {
    labels: Option<LabelSequence>,
    error: Option<String>,
}

/// 序列标注服务客户端（BERT+CRF 等模型部署在服务端）
pub struct HttpLabeler {
    url: String,
    separator: String,
    client: reqwest::Client,
}

impl HttpLabeler {
    pub fn new(config: &LabelerConfig) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| format!("创建标注客户端失败: {e}"))?;
        Ok(Self {
            url: config.url.clone(),
            separator: config.separator.clone(),
            client,
        })
    }

    /// 调用标注服务，返回与「原文 + 指令」逐字对齐的标签
    pub async fn predict(&self, original: &str, command: &str) -> Result<LabelSequence, String> {
        let input = model_input(original, command, &self.separator);

        let resp = self
            .client
            .post(&self.url)
            .json(&LabelRequest { text: &input })
            .send()
            .await
            .map_err(|e| format!("标注请求失败: {e}"))?;

        if !resp.status().is_success() {
            return Err(format!("标注服务返回错误状态: {}", resp.status()));
        }

        let body: LabelResponse = resp
            .json()
            .await
            .map_err(|e| format!("解析标注响应失败: {e}"))?;

        if let Some(err) = body.error {
            return Err(format!("标注服务错误: {err}"));
        }

        body.labels
            .ok_or_else(|| "标注响应中无 labels 字段".to_string())
    }

    /// 原文内的 B-Modify 位置。服务不可用或超时时返回空列表，
    /// 调用方无需区分，定位会自动退回规则层。
    pub async fn modify_positions(&self, original: &str, command: &str) -> Vec<usize> {
        match self.predict(original, command).await {
            Ok(labels) => {
                let original_len = char_len(original);
                let positions = labels.modify_positions(original_len);
                log::debug!(
                    "标注结果: modify={:?} filling={:?}",
                    positions,
                    labels.filling_positions(original_len)
                );
                positions
            }
            Err(e) => {
                log::warn!("{e}，退回规则定位");
                Vec::new()
            }
        }
    }
}
