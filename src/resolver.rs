//! 编辑位置解析：按固定顺序逐层尝试，第一层命中即返回。
//!
//! 1. 模型：标注服务给出的原文内 B-Modify 位置
//! 2. 参考词：「X的Y」中的 X 在原文中的位置（含繁简互换重试）
//! 3. 直接匹配：目标文本第一次出现的位置
//! 4. 逐字匹配：多字目标中第一个能在原文找到的字
//! 5. 同音字替换：知识库中目标的易混淆字
use crate::command_parser::ParsedCommand;
use crate::editor::{char_find, char_len, char_slice};
use crate::homophones::HomophoneKb;

/// 命中的解析层
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Model,
    Context,
    Direct,
    CharWise,
    Homophone,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Model => "model",
            Tier::Context => "context",
            Tier::Direct => "direct",
            Tier::CharWise => "char_wise",
            Tier::Homophone => "homophone",
        }
    }
}

/// 解析出的编辑位置，只在一次解析调用内存在
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEdit {
    /// 原文中的字符下标
    pub position: usize,
    /// 被编辑的字符数
    pub span: usize,
    /// 原文中实际命中的文本
    pub target: String,
    pub replacement: String,
    pub tier: Tier,
}

/// 解析编辑位置；所有层都失败时返回 `None`（正常结果，不是错误）
pub fn resolve(
    text: &str,
    command: &ParsedCommand,
    modify_positions: &[usize],
    kb: &HomophoneKb,
) -> Option<ResolvedEdit> {
    let edit = by_model(text, command, modify_positions)
        .or_else(|| by_context(text, command, kb))
        .or_else(|| by_direct(text, command))
        .or_else(|| by_char_wise(text, command))
        .or_else(|| by_homophone(text, command, kb));

    match &edit {
        Some(e) => log::debug!(
            "定位成功 [{}]: pos={} span={} target={:?}",
            e.tier.as_str(),
            e.position,
            e.span,
            e.target
        ),
        None => log::debug!("定位失败: target={:?} 在 {:?} 中无匹配", command.target, text),
    }
    edit
}

fn hit(text: &str, command: &ParsedCommand, position: usize, span: usize, tier: Tier) -> ResolvedEdit {
    ResolvedEdit {
        position,
        span,
        target: char_slice(text, position, span).to_string(),
        replacement: command.replacement.clone(),
        tier,
    }
}

/// 第一个落在原文内的模型位置，该位置上的字取代解析出的目标
fn by_model(text: &str, command: &ParsedCommand, modify_positions: &[usize]) -> Option<ResolvedEdit> {
    let len = char_len(text);
    let position = modify_positions.iter().copied().find(|&p| p < len);
    if position.is_none() && !modify_positions.is_empty() {
        log::debug!("模型位置 {modify_positions:?} 全部越界");
    }
    position.map(|p| hit(text, command, p, 1, Tier::Model))
}

fn by_context(text: &str, command: &ParsedCommand, kb: &HomophoneKb) -> Option<ResolvedEdit> {
    let context = command.target_context.as_deref()?;
    if command.target.is_empty() {
        return None;
    }

    let (context_pos, matched) = match char_find(text, context) {
        Some(pos) => (pos, context.to_string()),
        None => kb
            .variant_forms(context)
            .into_iter()
            .find_map(|form| char_find(text, &form).map(|pos| (pos, form)))?,
    };

    // 参考词可能被繁简转换过，目标也跟着尝试异体写法
    let offset = char_find(&matched, &command.target).or_else(|| {
        kb.variant_forms(&command.target)
            .iter()
            .find_map(|form| char_find(&matched, form))
    })?;

    Some(hit(
        text,
        command,
        context_pos + offset,
        char_len(&command.target),
        Tier::Context,
    ))
}

fn by_direct(text: &str, command: &ParsedCommand) -> Option<ResolvedEdit> {
    let position = char_find(text, &command.target)?;
    Some(hit(text, command, position, char_len(&command.target), Tier::Direct))
}

fn by_char_wise(text: &str, command: &ParsedCommand) -> Option<ResolvedEdit> {
    if char_len(&command.target) <= 1 {
        return None;
    }
    command.target.chars().find_map(|c| {
        let mut buf = [0u8; 4];
        char_find(text, c.encode_utf8(&mut buf)).map(|p| hit(text, command, p, 1, Tier::CharWise))
    })
}

fn by_homophone(text: &str, command: &ParsedCommand, kb: &HomophoneKb) -> Option<ResolvedEdit> {
    kb.confusables(&command.target).iter().find_map(|&c| {
        let mut buf = [0u8; 4];
        char_find(text, c.encode_utf8(&mut buf)).map(|p| hit(text, command, p, 1, Tier::Homophone))
    })
}
