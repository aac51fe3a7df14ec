//! Keyword intent classification.

use crate::model::IntentKind;

/// Trigger keywords per intent. Earlier rows win when several match.
pub const INTENT_KEYWORDS: &[(IntentKind, &[&str])] = &[
    (IntentKind::Start, &["いつから", "開始", "始まる"]),
    (IntentKind::End, &["いつまで", "終了", "終わる", "まだ"]),
    (IntentKind::Reward, &["報酬", "もらえる", "何が"]),
    (IntentKind::Content, &["内容", "どんな", "何する"]),
    (IntentKind::Active, &["今", "現在"]),
];

/// Classify a normalized question by keyword containment.
pub fn detect_intent(question: &str) -> Option<IntentKind> {
    INTENT_KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| question.contains(w)))
        .map(|(kind, _)| *kind)
}
