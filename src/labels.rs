//! 序列标注结果：逐字标签，与「原文 + 指令」拼接串一一对齐（不含分隔符）。
use serde::de::{self, Deserializer};
use serde::Deserialize;

/// 单字标签
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    /// O
    Outside,
    /// B-Modify：原文中需要修改的字
    Modify,
    /// B-Filling：指令中的替换/插入内容
    Filling,
}

/// 标注服务可能返回字符串标签或数字 id
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLabel {
    Tag(String),
    Id(u8),
}

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawLabel::deserialize(deserializer)? {
            RawLabel::Tag(tag) => Label::from_tag(&tag)
                .ok_or_else(|| de::Error::custom(format!("未知标签: {tag}"))),
            RawLabel::Id(id) => {
                Label::from_id(id).ok_or_else(|| de::Error::custom(format!("未知标签 id: {id}")))
            }
        }
    }
}

impl Label {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "O" => Some(Label::Outside),
            "B-Modify" => Some(Label::Modify),
            "B-Filling" => Some(Label::Filling),
            _ => None,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Label::Outside),
            1 => Some(Label::Modify),
            2 => Some(Label::Filling),
            _ => None,
        }
    }
}

/// 整串标签
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct LabelSequence(pub Vec<Label>);

impl LabelSequence {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 原文区间内被标为 B-Modify 的下标
    pub fn modify_positions(&self, original_len: usize) -> Vec<usize> {
        self.positions(Label::Modify)
            .filter(|&i| i < original_len)
            .collect()
    }

    /// 指令区间内被标为 B-Filling 的下标（相对指令起点）
    pub fn filling_positions(&self, original_len: usize) -> Vec<usize> {
        self.positions(Label::Filling)
            .filter_map(|i| i.checked_sub(original_len))
            .collect()
    }

    fn positions(&self, wanted: Label) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(move |(_, label)| **label == wanted)
            .map(|(i, _)| i)
    }
}

/// 标注模型输入：`原文 [SEP] 指令`
pub fn model_input(original: &str, command: &str, separator: &str) -> String {
    format!("{original} {separator} {command}")
}
