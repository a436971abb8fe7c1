use voice_correction_lib::command_parser::{extract_reference, CommandKind, CommandParser};
use voice_correction_lib::editor::apply_edit;
use voice_correction_lib::engine::CorrectionEngine;
use voice_correction_lib::labels::{Label, LabelSequence};
use voice_correction_lib::processor::CorrectionProcessor;
use voice_correction_lib::resolver::Tier;
use voice_correction_lib::session::{Session, SessionOutcome};

#[test]
fn reference_extraction() {
    let xinshang = Some("欣賞".to_string());
    assert_eq!(extract_reference("欣賞的欣"), ("欣".to_string(), xinshang.clone()));
    assert_eq!(extract_reference("欣賞的心"), ("欣".to_string(), xinshang));
    assert_eq!(extract_reference("心"), ("心".to_string(), None));
}

#[test]
fn applier_examples() {
    let text = "今天天氣很好";
    assert_eq!(apply_edit(text, CommandKind::Delete, 4, 1, ""), "今天天氣好");
    assert_eq!(apply_edit(text, CommandKind::Replace, 3, 1, "器"), "今天天器很好");
    assert_eq!(apply_edit(text, CommandKind::InsertBefore, 5, 1, "非常"), "今天天氣很非常好");
    assert_eq!(apply_edit(text, CommandKind::InsertAfter, 2, 2, "真的"), "今天天氣真的很好");
}

#[test]
fn labels_drive_the_edit_site() {
    let original = "新報氣流站";
    let spoken = "把站立的站改成斬斷的斬";
    // 标注服务标出原文第 4 个字；指令区间里的标签不参与定位
    let mut labels = vec![Label::Outside; 5 + 11];
    labels[4] = Label::Modify;
    labels[9] = Label::Modify;
    let positions = LabelSequence(labels).modify_positions(original.chars().count());
    assert_eq!(positions, vec![4]);

    let correction = CorrectionEngine::default().correct(original, spoken, &positions);
    assert_eq!(correction.text, "新報氣流斬");
    assert_eq!(correction.edit.map(|e| e.tier), Some(Tier::Model));
}

#[test]
fn non_commands_never_edit() {
    let engine = CorrectionEngine::default();
    let parser = CommandParser::new();
    for spoken in ["你好", "這是一段普通的文字", "今天天氣很好", ""] {
        assert!(!parser.is_command(spoken));
        for original in ["", "今天天氣很好", "abc"] {
            assert_eq!(
                engine.correct(original, spoken, &[0]).into_pair(),
                (original.to_string(), false)
            );
        }
    }
}

#[tokio::test]
async fn dictation_session() {
    let mut session = Session::new(CorrectionProcessor::rules());
    session.handle("這首擱淺的歌").await;
    assert_eq!(
        session.handle("把擱淺的擱刪除").await,
        SessionOutcome::Corrected {
            before: "這首擱淺的歌".into(),
            after: "這首淺的歌".into(),
        }
    );
    assert_eq!(
        session.handle("請在歌前面加上好聽").await,
        SessionOutcome::Corrected {
            before: "這首淺的歌".into(),
            after: "這首淺的好聽歌".into(),
        }
    );
}
