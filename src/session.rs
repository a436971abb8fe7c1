//! 听写会话：只记住最近一次输出的文本，作为下一条纠错指令的作用对象。
use crate::processor::CorrectionProcessor;

/// 一次输入的处理结果，交给文本注入方执行
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// 空输入，忽略
    Ignored,
    /// 普通听写（或无法应用的指令），直接输入这段文本
    Typed(String),
    /// 纠错成功：用 `after` 替换 `before`
    Corrected { before: String, after: String },
}

pub struct Session {
    processor: CorrectionProcessor,
    last_text: String,
}

impl Session {
    pub fn new(processor: CorrectionProcessor) -> Self {
        Self {
            processor,
            last_text: String::new(),
        }
    }

    /// 最近一次输出的文本
    pub fn last_text(&self) -> &str {
        &self.last_text
    }

    pub fn processor(&self) -> &CorrectionProcessor {
        &self.processor
    }

    pub async fn handle(&mut self, spoken: &str) -> SessionOutcome {
        self.handle_with_selection(spoken, None).await
    }

    /// 有选中文本时纠正选中文本，否则纠正上一次输出
    pub async fn handle_with_selection(
        &mut self,
        spoken: &str,
        selection: Option<&str>,
    ) -> SessionOutcome {
        let spoken = spoken.trim();
        if spoken.is_empty() {
            return SessionOutcome::Ignored;
        }

        if !self.processor.is_command(spoken) {
            log::info!("听写输入: {spoken}");
            self.last_text = spoken.to_string();
            return SessionOutcome::Typed(self.last_text.clone());
        }

        let before = selection
            .filter(|s| !s.is_empty())
            .unwrap_or(self.last_text.as_str())
            .to_string();
        let (result, was_command) = self.processor.process(spoken, &before).await;

        if was_command && !before.is_empty() {
            self.last_text = result.clone();
            SessionOutcome::Corrected {
                before,
                after: result,
            }
        } else {
            log::warn!("指令未能应用，按普通文本输入: {spoken}");
            self.last_text = spoken.to_string();
            SessionOutcome::Typed(self.last_text.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(CorrectionProcessor::rules())
    }

    #[tokio::test]
    async fn dictation_then_corrections() {
        let mut s = session();
        assert_eq!(
            s.handle("今天天氣很好").await,
            SessionOutcome::Typed("今天天氣很好".to_string())
        );
        assert_eq!(
            s.handle("把氣改成器").await,
            SessionOutcome::Corrected {
                before: "今天天氣很好".to_string(),
                after: "今天天器很好".to_string(),
            }
        );
        // 第二条指令作用在更新后的文本上
        assert_eq!(
            s.handle("刪除很").await,
            SessionOutcome::Corrected {
                before: "今天天器很好".to_string(),
                after: "今天天器好".to_string(),
            }
        );
        assert_eq!(s.last_text(), "今天天器好");
    }

    #[tokio::test]
    async fn blank_input_ignored() {
        let mut s = session();
        assert_eq!(s.handle("   ").await, SessionOutcome::Ignored);
        assert_eq!(s.last_text(), "");
    }

    #[tokio::test]
    async fn unresolvable_command_is_typed() {
        let mut s = session();
        s.handle("今天天氣很好").await;
        assert_eq!(
            s.handle("刪除雨").await,
            SessionOutcome::Typed("刪除雨".to_string())
        );
        assert_eq!(s.last_text(), "刪除雨");
    }

    #[tokio::test]
    async fn command_with_no_history_is_typed() {
        let mut s = session();
        assert_eq!(
            s.handle("刪除很").await,
            SessionOutcome::Typed("刪除很".to_string())
        );
    }

    #[tokio::test]
    async fn selection_overrides_last_text() {
        let mut s = session();
        s.handle("今天天氣很好").await;
        assert_eq!(
            s.handle_with_selection("在好前面加很", Some("天氣好")).await,
            SessionOutcome::Corrected {
                before: "天氣好".to_string(),
                after: "天氣很好".to_string(),
            }
        );
        assert_eq!(s.last_text(), "天氣很好");
    }
}
