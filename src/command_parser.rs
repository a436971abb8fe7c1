//! 纠错指令解析：把口述短语分类为编辑意图，并抽取目标/替换文本。
//!
//! 匹配表是「意图 → 有序正则列表」的有序映射。意图按 Delete、Replace、
//! InsertBefore、InsertAfter 的顺序尝试，同一意图内按列表顺序尝试，
//! 第一条完整匹配（trim 后）即胜出，靠前的条目会遮蔽靠后的条目。
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// 编辑意图
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    /// 刪除X
    Delete,
    /// 把X改成Y
    Replace,
    /// 在X前面新增Y
    InsertBefore,
    /// 在X後面新增Y
    InsertAfter,
    /// 不是指令，按普通听写处理
    None,
}

impl CommandKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::Delete => "delete",
            CommandKind::Replace => "replace",
            CommandKind::InsertBefore => "insert_before",
            CommandKind::InsertAfter => "insert_after",
            CommandKind::None => "none",
        }
    }
}

/// 解析结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedCommand {
    pub kind: CommandKind,
    /// 要找的文本（已做「X的Y」抽取）
    pub target: String,
    /// 替换/插入的文本（已做「X的Y」抽取）
    pub replacement: String,
    /// 目标的参考词，如「高興的興」中的「高興」
    pub target_context: Option<String>,
    /// 替换内容的参考词
    pub replacement_context: Option<String>,
    /// trim 后的原始口述
    pub raw: String,
}

impl ParsedCommand {
    /// 非指令
    pub fn none(raw: &str) -> Self {
        Self {
            kind: CommandKind::None,
            target: String::new(),
            replacement: String::new(),
            target_context: None,
            replacement_context: None,
            raw: raw.to_string(),
        }
    }

    pub fn is_command(&self) -> bool {
        self.kind != CommandKind::None
    }
}

static REFERENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+)的(.+)$").unwrap());

/// 解析「X的Y」同音字参考写法，返回 (字, 参考词)。
///
/// - Y 出现在 X 中：取 Y
/// - 否则认为 Y 被识别错了，取 X 的第一个字
/// - 没有「的」：原样返回，无参考词
pub fn extract_reference(phrase: &str) -> (String, Option<String>) {
    let Some(caps) = REFERENCE_RE.captures(phrase) else {
        return (phrase.to_string(), None);
    };
    let reference = &caps[1];
    let stated = &caps[2];

    if reference.contains(stated) {
        return (stated.to_string(), Some(reference.to_string()));
    }

    let first = reference.chars().next().map(String::from).unwrap_or_default();
    (first, Some(reference.to_string()))
}

/// 一个意图及其有序正则列表
struct PatternFamily {
    kind: CommandKind,
    patterns: Vec<Regex>,
}

fn compile(kind: CommandKind, sources: &[&str]) -> PatternFamily {
    PatternFamily {
        kind,
        patterns: sources.iter().map(|s| Regex::new(s).unwrap()).collect(),
    }
}

static PATTERN_TABLE: Lazy<Vec<PatternFamily>> = Lazy::new(|| {
    vec![
        compile(
            CommandKind::Delete,
            &[
                r"^刪除(.+)$",
                r"^刪掉(.+)$",
                r"^把(.+)刪掉$",
                r"^把(.+)刪除$",
            ],
        ),
        compile(
            CommandKind::Replace,
            &[r"^把(.+)改成(.+)$", r"^把(.+)換成(.+)$"],
        ),
        compile(
            CommandKind::InsertBefore,
            &[
                r"^(?:請)?在(.+)前面新增(.+)$",
                r"^(?:請)?在(.+)前面加入(.+)$",
                r"^(?:請)?在(.+)前面加上(.+)$",
                r"^(?:請)?在(.+)前面加(.+)$",
            ],
        ),
        compile(
            CommandKind::InsertAfter,
            &[
                r"^(?:請)?在(.+)後面新增(.+)$",
                r"^(?:請)?在(.+)後面加入(.+)$",
                r"^(?:請)?在(.+)後面加上(.+)$",
                r"^(?:請)?在(.+)後面加(.+)$",
            ],
        ),
    ]
});

/// 纠错指令解析器
pub struct CommandParser {
    table: &'static [PatternFamily],
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandParser {
    pub fn new() -> Self {
        Self {
            table: PATTERN_TABLE.as_slice(),
        }
    }

    /// 是否像一条纠错指令
    pub fn is_command(&self, text: &str) -> bool {
        let trimmed = text.trim();
        self.table
            .iter()
            .flat_map(|family| family.patterns.iter())
            .any(|re| re.is_match(trimmed))
    }

    /// 解析指令；未匹配时返回 `CommandKind::None`
    pub fn parse(&self, text: &str) -> ParsedCommand {
        let trimmed = text.trim();

        for family in self.table {
            for re in &family.patterns {
                let Some(caps) = re.captures(trimmed) else {
                    continue;
                };

                let mut command = ParsedCommand::none(trimmed);
                command.kind = family.kind;

                match family.kind {
                    CommandKind::Delete => {
                        let (target, context) = extract_reference(caps[1].trim());
                        command.target = target;
                        command.target_context = context;
                    }
                    _ => {
                        let (target, target_context) = extract_reference(&caps[1]);
                        let (replacement, replacement_context) = extract_reference(&caps[2]);
                        command.target = target;
                        command.target_context = target_context;
                        command.replacement = replacement;
                        command.replacement_context = replacement_context;
                    }
                }

                log::debug!(
                    "指令解析: {} → {} target={:?} replacement={:?}",
                    trimmed,
                    command.kind.as_str(),
                    command.target,
                    command.replacement
                );
                return command;
            }
        }

        ParsedCommand::none(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_reference_word() {
        assert_eq!(
            extract_reference("欣賞的欣"),
            ("欣".to_string(), Some("欣賞".to_string()))
        );
        // 心 不在 欣賞 中，退回参考词首字
        assert_eq!(
            extract_reference("欣賞的心"),
            ("欣".to_string(), Some("欣賞".to_string()))
        );
        assert_eq!(extract_reference("心"), ("心".to_string(), None));
        assert_eq!(
            extract_reference("氣候的氣"),
            ("氣".to_string(), Some("氣候".to_string()))
        );
    }

    #[test]
    fn detects_commands() {
        let parser = CommandParser::new();
        for cmd in [
            "刪除錯字",
            "把錯改成對",
            "在好前面新增很",
            "請在天後面新增氣",
            "把氣器改成氣候的氣",
            "  把擱淺的擱刪除 ",
        ] {
            assert!(parser.is_command(cmd), "{cmd} 应识别为指令");
        }
        for text in ["今天天氣很好", "你好", "這是一段普通的文字", ""] {
            assert!(!parser.is_command(text), "{text} 不应识别为指令");
        }
    }

    #[test]
    fn parses_each_kind() {
        let parser = CommandParser::new();

        let parsed = parser.parse("刪除錯字");
        assert_eq!(parsed.kind, CommandKind::Delete);
        assert_eq!(parsed.target, "錯字");
        assert_eq!(parsed.target_context, None);

        let parsed = parser.parse("把錯改成對");
        assert_eq!(parsed.kind, CommandKind::Replace);
        assert_eq!(parsed.target, "錯");
        assert_eq!(parsed.replacement, "對");

        let parsed = parser.parse("請在好前面新增很");
        assert_eq!(parsed.kind, CommandKind::InsertBefore);
        assert_eq!(parsed.target, "好");
        assert_eq!(parsed.replacement, "很");

        let parsed = parser.parse("在天後面新增氣");
        assert_eq!(parsed.kind, CommandKind::InsertAfter);
        assert_eq!(parsed.target, "天");
        assert_eq!(parsed.replacement, "氣");

        let parsed = parser.parse("今天天氣很好");
        assert_eq!(parsed.kind, CommandKind::None);
        assert_eq!(parsed.raw, "今天天氣很好");
    }

    #[test]
    fn earlier_patterns_shadow_later_ones() {
        let parser = CommandParser::new();
        // 「加上」排在「加」前面，替换内容不会带上「上」
        let parsed = parser.parse("在好後面加上吧");
        assert_eq!(parsed.kind, CommandKind::InsertAfter);
        assert_eq!(parsed.replacement, "吧");

        // 「把X刪除」属于 Delete，先于 Replace 尝试
        let parsed = parser.parse("把改成刪除");
        assert_eq!(parsed.kind, CommandKind::Delete);
        assert_eq!(parsed.target, "改成");
    }

    #[test]
    fn reference_phrases_are_extracted() {
        let parser = CommandParser::new();
        let parsed = parser.parse("把高興的興改成欣賞的心");
        assert_eq!(parsed.kind, CommandKind::Replace);
        assert_eq!(parsed.target, "興");
        assert_eq!(parsed.target_context.as_deref(), Some("高興"));
        assert_eq!(parsed.replacement, "欣");
        assert_eq!(parsed.replacement_context.as_deref(), Some("欣賞"));

        let parsed = parser.parse("把擱淺的擱刪除");
        assert_eq!(parsed.kind, CommandKind::Delete);
        assert_eq!(parsed.target, "擱");
        assert_eq!(parsed.target_context.as_deref(), Some("擱淺"));
    }
}
