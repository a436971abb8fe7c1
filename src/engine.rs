//! 纠错引擎：解析 → 定位 → 编辑，整体是一个无状态纯函数。
use crate::command_parser::{CommandParser, ParsedCommand};
use crate::editor::apply_edit;
use crate::homophones::{HomophoneKb, BUILTIN_KB};
use crate::resolver::{resolve, ResolvedEdit};
use std::sync::Arc;

/// 一次纠错的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    /// 纠正后的文本；未应用时即原文
    pub text: String,
    /// 是否真正应用了一次编辑
    pub applied: bool,
    pub command: ParsedCommand,
    pub edit: Option<ResolvedEdit>,
}

impl Correction {
    pub fn into_pair(self) -> (String, bool) {
        (self.text, self.applied)
    }
}

/// 纠错引擎。知识库只读共享，可在多个线程上并发调用。
#[derive(Clone)]
pub struct CorrectionEngine {
    parser: Arc<CommandParser>,
    kb: Arc<HomophoneKb>,
}

impl Default for CorrectionEngine {
    fn default() -> Self {
        Self::new(Arc::new(HomophoneKb::clone(&BUILTIN_KB)))
    }
}

impl CorrectionEngine {
    pub fn new(kb: Arc<HomophoneKb>) -> Self {
        Self {
            parser: Arc::new(CommandParser::new()),
            kb,
        }
    }

    pub fn parser(&self) -> &CommandParser {
        &self.parser
    }

    pub fn kb(&self) -> &HomophoneKb {
        &self.kb
    }

    /// 对 `original` 应用口述指令 `spoken`。
    ///
    /// `modify_positions` 是标注服务给出的原文内 B-Modify 下标，
    /// 服务不可用时传空切片即可，解析会自动退回到文本匹配。
    /// 非指令或无法定位时原文原样返回，`applied = false`。
    pub fn correct(&self, original: &str, spoken: &str, modify_positions: &[usize]) -> Correction {
        let command = self.parser.parse(spoken);
        self.correct_parsed(original, command, modify_positions)
    }

    pub fn correct_parsed(
        &self,
        original: &str,
        command: ParsedCommand,
        modify_positions: &[usize],
    ) -> Correction {
        if !command.is_command() {
            return Correction {
                text: original.to_string(),
                applied: false,
                command,
                edit: None,
            };
        }

        let Some(edit) = resolve(original, &command, modify_positions, &self.kb) else {
            log::warn!("无法定位指令目标 {:?}，原文保持不变", command.target);
            return Correction {
                text: original.to_string(),
                applied: false,
                command,
                edit: None,
            };
        };

        let text = apply_edit(original, command.kind, edit.position, edit.span, &edit.replacement);
        log::info!(
            "应用纠错 [{}/{}]: {} → {}",
            command.kind.as_str(),
            edit.tier.as_str(),
            original,
            text
        );
        Correction {
            text,
            applied: true,
            command,
            edit: Some(edit),
        }
    }
}
