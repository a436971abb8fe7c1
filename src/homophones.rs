//! 同音字知识库：字 → 易混淆字列表，外加一张繁简异体对照表。
//!
//! 进程级只读配置：启动时构建一次，之后只按引用共享，运行期不再修改。
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// 内置同音/近音字表（语音识别最常见的替换错误）
const BUILTIN_HOMOPHONES: &[(char, &[char])] = &[
    ('的', &['得', '地']),
    ('得', &['的', '地']),
    ('地', &['的', '得']),
    ('在', &['再']),
    ('再', &['在']),
    ('做', &['作']),
    ('作', &['做']),
    ('他', &['她', '它', '祂']),
    ('她', &['他', '它']),
    ('它', &['他', '她']),
    ('那', &['哪', '拿']),
    ('哪', &['那']),
    ('已', &['以', '亦']),
    ('以', &['已', '亦']),
    ('像', &['象', '相']),
    ('象', &['像', '相']),
    ('相', &['像', '象']),
    ('須', &['需']),
    ('需', &['須']),
    ('即', &['既', '及']),
    ('既', &['即', '及']),
    ('及', &['即', '既']),
    ('坐', &['座', '做']),
    ('座', &['坐']),
    ('帳', &['賬', '張']),
    ('賬', &['帳']),
    ('歷', &['曆', '力']),
    ('曆', &['歷']),
    ('欣', &['新', '心', '辛', '薪']),
    ('新', &['欣', '心', '辛', '薪']),
    ('心', &['欣', '新', '辛', '薪']),
    ('辛', &['欣', '新', '心', '薪']),
    ('薪', &['欣', '新', '心', '辛']),
    ('興', &['星', '腥', '惺']),
    ('氣', &['器', '棄', '汽', '泣']),
    ('器', &['氣', '棄', '汽', '泣']),
    ('棄', &['氣', '器', '汽']),
    ('汽', &['氣', '器']),
    ('擱', &['歌', '哥', '鴿', '割']),
    ('歌', &['擱', '哥', '鴿', '割']),
    ('哥', &['擱', '歌', '鴿', '割']),
];

/// 繁体 → 简体对照（只收录纠错场景里常见的字）
const VARIANT_PAIRS: &[(char, char)] = &[
    ('刪', '删'),
    ('換', '换'),
    ('後', '后'),
    ('請', '请'),
    ('興', '兴'),
    ('氣', '气'),
    ('賞', '赏'),
    ('擱', '搁'),
    ('淺', '浅'),
    ('帳', '帐'),
    ('賬', '账'),
    ('歷', '历'),
    ('曆', '历'),
    ('須', '须'),
    ('棄', '弃'),
    ('鴿', '鸽'),
    ('張', '张'),
    ('錢', '钱'),
    ('錯', '错'),
    ('對', '对'),
    ('這', '这'),
    ('個', '个'),
    ('們', '们'),
    ('說', '说'),
    ('話', '话'),
    ('時', '时'),
    ('間', '间'),
    ('報', '报'),
    ('謝', '谢'),
    ('語', '语'),
    ('書', '书'),
    ('學', '学'),
    ('會', '会'),
    ('來', '来'),
    ('發', '发'),
    ('現', '现'),
    ('處', '处'),
    ('應', '应'),
    ('還', '还'),
    ('開', '开'),
    ('關', '关'),
    ('長', '长'),
    ('東', '东'),
    ('車', '车'),
    ('電', '电'),
    ('腦', '脑'),
    ('為', '为'),
    ('與', '与'),
    ('麼', '么'),
];

/// 内置知识库，全进程共享
pub static BUILTIN_KB: Lazy<HomophoneKb> = Lazy::new(HomophoneKb::builtin);

/// 同音字知识库
#[derive(Debug, Clone, Default)]
pub struct HomophoneKb {
    /// 字 → 易混淆字（顺序即尝试顺序）
    homophones: HashMap<char, Vec<char>>,
    /// 繁 → 简
    to_simplified: HashMap<char, char>,
    /// 简 → 繁（一简对多繁时取表中第一个）
    to_traditional: HashMap<char, char>,
}

impl HomophoneKb {
    /// 由内置表构建
    pub fn builtin() -> Self {
        let homophones = BUILTIN_HOMOPHONES
            .iter()
            .map(|(c, list)| (*c, list.to_vec()))
            .collect();

        let mut to_simplified = HashMap::new();
        let mut to_traditional = HashMap::new();
        for &(trad, simp) in VARIANT_PAIRS {
            to_simplified.entry(trad).or_insert(simp);
            to_traditional.entry(simp).or_insert(trad);
        }

        Self {
            homophones,
            to_simplified,
            to_traditional,
        }
    }

    /// 合并配置中的额外条目：追加到已有列表末尾并去重。
    /// 键必须是单个字，否则跳过。
    pub fn merge_extra(&mut self, extra: &HashMap<String, Vec<String>>) {
        let mut keys: Vec<&String> = extra.keys().collect();
        keys.sort();
        for key in keys {
            let Some(ch) = single_char(key) else {
                log::warn!("同音字配置键 {key:?} 不是单个字，已跳过");
                continue;
            };
            let list = self.homophones.entry(ch).or_default();
            for value in &extra[key] {
                match single_char(value) {
                    Some(v) if v != ch && !list.contains(&v) => list.push(v),
                    Some(_) => {}
                    None => log::warn!("同音字配置 {key} 的候选 {value:?} 不是单个字，已跳过"),
                }
            }
        }
    }

    /// 查询易混淆字；只有单字目标才会命中
    pub fn confusables(&self, target: &str) -> &[char] {
        single_char(target)
            .and_then(|c| self.homophones.get(&c))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 词的繁简异体写法（不含原词本身，去重，先简后繁）
    pub fn variant_forms(&self, word: &str) -> Vec<String> {
        let simplified: String = word
            .chars()
            .map(|c| *self.to_simplified.get(&c).unwrap_or(&c))
            .collect();
        let traditional: String = word
            .chars()
            .map(|c| *self.to_traditional.get(&c).unwrap_or(&c))
            .collect();

        let mut forms = Vec::new();
        for form in [simplified, traditional] {
            if form != word && !forms.contains(&form) {
                forms.push(form);
            }
        }
        forms
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
