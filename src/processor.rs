//! 纠错处理器：判断口述是否为指令，并按所选策略得出纠正结果。
use crate::config::{AppConfig, StrategyKind};
use crate::engine::CorrectionEngine;
use crate::homophones::{HomophoneKb, BUILTIN_KB};
use crate::labeler::HttpLabeler;
use crate::llm::LlmCorrector;
use std::sync::Arc;

/// 纠错策略
pub enum Strategy {
    /// 只用规则层定位
    Rules,
    /// 先取标注服务的位置，失败时自动退回规则层
    Labeler(HttpLabeler),
    /// 大模型直接输出全文，不经过定位/编辑
    Llm(LlmCorrector),
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Rules => "规则",
            Strategy::Labeler(_) => "序列标注 + 规则",
            Strategy::Llm(_) => "大模型",
        }
    }
}

pub struct CorrectionProcessor {
    engine: CorrectionEngine,
    strategy: Strategy,
}

impl CorrectionProcessor {
    pub fn new(engine: CorrectionEngine, strategy: Strategy) -> Self {
        log::info!("纠错策略: {}", strategy.name());
        Self { engine, strategy }
    }

    /// 只用规则、内置同音字表
    pub fn rules() -> Self {
        Self::new(CorrectionEngine::default(), Strategy::Rules)
    }

    /// 按配置构建：合并额外同音字，创建对应的外部服务客户端
    pub fn from_config(config: &AppConfig) -> Result<Self, String> {
        let mut kb = HomophoneKb::clone(&BUILTIN_KB);
        kb.merge_extra(&config.homophones);
        let engine = CorrectionEngine::new(Arc::new(kb));

        let strategy = match config.strategy {
            StrategyKind::Rules => Strategy::Rules,
            StrategyKind::Labeler => Strategy::Labeler(HttpLabeler::new(&config.labeler)?),
            StrategyKind::Llm => Strategy::Llm(LlmCorrector::new(&config.llm)?),
        };
        Ok(Self::new(engine, strategy))
    }

    pub fn engine(&self) -> &CorrectionEngine {
        &self.engine
    }

    pub fn is_command(&self, text: &str) -> bool {
        self.engine.parser().is_command(text)
    }

    /// 处理一次口述，返回 (要输出的文本, 是否应用了纠错)。
    ///
    /// - 非指令：原样返回口述
    /// - 没有可纠正的上一段文本：原样返回口述
    /// - 指令但无法定位：返回原文，`false`
    pub async fn process(&self, spoken: &str, last_typed: &str) -> (String, bool) {
        if !self.is_command(spoken) {
            return (spoken.to_string(), false);
        }
        if last_typed.is_empty() {
            log::warn!("没有上一段文本，无法应用指令: {}", spoken.trim());
            return (spoken.to_string(), false);
        }

        match &self.strategy {
            Strategy::Rules => self.engine.correct(last_typed, spoken, &[]).into_pair(),
            Strategy::Labeler(labeler) => {
                let positions = labeler.modify_positions(last_typed, spoken.trim()).await;
                self.engine.correct(last_typed, spoken, &positions).into_pair()
            }
            Strategy::Llm(llm) => llm.correct(last_typed, spoken.trim()).await,
        }
    }
}
