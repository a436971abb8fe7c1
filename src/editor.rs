//! 纯函数编辑：按字符（而非字节）位置对文本做一次删除/替换/插入。
use crate::command_parser::CommandKind;

/// 字符下标 → 字节偏移，越界时截到文本末尾
fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// 文本的字符数
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// `needle` 在 `haystack` 中第一次出现的字符下标
pub fn char_find(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    haystack
        .find(needle)
        .map(|byte| haystack[..byte].chars().count())
}

/// 取 `[position, position + span)` 范围内的字符
pub fn char_slice(text: &str, position: usize, span: usize) -> &str {
    let start = byte_offset(text, position);
    let end = byte_offset(text, position.saturating_add(span));
    &text[start..end]
}

/// 在单个位置上应用编辑，返回新文本。
///
/// `position`/`span` 以字符计；越界部分会被截断到文本范围内。
pub fn apply_edit(
    text: &str,
    kind: CommandKind,
    position: usize,
    span: usize,
    replacement: &str,
) -> String {
    let start = byte_offset(text, position);
    let end = byte_offset(text, position.saturating_add(span));

    match kind {
        CommandKind::Delete => [&text[..start], &text[end..]].concat(),
        CommandKind::Replace => [&text[..start], replacement, &text[end..]].concat(),
        CommandKind::InsertBefore => [&text[..start], replacement, &text[start..]].concat(),
        CommandKind::InsertAfter => [&text[..end], replacement, &text[end..]].concat(),
        CommandKind::None => text.to_string(),
    }
}
