//! Reply templates and fixed phrases.

use chrono::NaiveDateTime;

use crate::error::Result;
use crate::model::{Event, IntentKind};
use crate::ports::RandomPort;

use super::activity::is_active;

/// Answer for an `active` question when the window contains now.
pub const ACTIVE_PHRASE: &str = "開催中です！";
/// Answer for an `active` question otherwise.
pub const INACTIVE_PHRASE: &str = "現在は開催していません。";
/// Reply when an event matched but no intent did.
pub const CLARIFY_REPLY: &str = "どの情報を知りたいですか？";
/// Header of the global listing.
pub const ACTIVE_LISTING_HEADER: &str = "現在開催中:";
/// Reply to the global listing when nothing is running.
pub const NO_ACTIVE_REPLY: &str = "現在開催中のイベントはありません。";

/// The value that answers `intent` for `event`.
///
/// Only `Active` consults the clock, and only `Active` can fail.
pub fn answer_for(event: &Event, intent: IntentKind, now: NaiveDateTime) -> Result<String> {
    Ok(match intent {
        IntentKind::Start => event.start.clone(),
        IntentKind::End => event.end.clone(),
        IntentKind::Reward => event.reward.clone(),
        IntentKind::Content => event.content.clone(),
        IntentKind::Active => {
            if is_active(event, now)? {
                ACTIVE_PHRASE.to_string()
            } else {
                INACTIVE_PHRASE.to_string()
            }
        }
    })
}

/// Fill the three reply templates and pick one.
///
/// Every intent shares the same template set.
pub fn compose(event: &Event, _intent: IntentKind, answer: &str, rng: &dyn RandomPort) -> String {
    let mut candidates = templates(&event.name, answer);
    let index = rng.pick(candidates.len());
    candidates.swap_remove(index)
}

/// All candidate replies, in selection-index order.
pub fn templates(name: &str, answer: &str) -> Vec<String> {
    vec![
        format!("{name}の情報です：{answer}"),
        format!("{answer}です！"),
        format!("{name}は{answer}になっています。"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewEvent;
    use crate::ports::FixedRandom;

    fn spring() -> Event {
        NewEvent::new("Spring Fest", "2024-03-01", "2024-03-31")
            .content("collect tokens")
            .reward("badge")
            .build()
    }

    fn noon(date: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{date} 12:00:00"), "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn fixed_index_selects_each_template() {
        let event = spring();
        assert_eq!(
            compose(&event, IntentKind::End, "2024-03-31", &FixedRandom(0)),
            "Spring Festの情報です：2024-03-31"
        );
        assert_eq!(
            compose(&event, IntentKind::End, "2024-03-31", &FixedRandom(1)),
            "2024-03-31です！"
        );
        assert_eq!(
            compose(&event, IntentKind::End, "2024-03-31", &FixedRandom(2)),
            "Spring Festは2024-03-31になっています。"
        );
    }

    #[test]
    fn answers_come_from_event_fields() {
        let event = spring();
        let now = noon("2024-03-15");
        assert_eq!(answer_for(&event, IntentKind::Start, now).unwrap(), "2024-03-01");
        assert_eq!(answer_for(&event, IntentKind::End, now).unwrap(), "2024-03-31");
        assert_eq!(answer_for(&event, IntentKind::Reward, now).unwrap(), "badge");
        assert_eq!(answer_for(&event, IntentKind::Content, now).unwrap(), "collect tokens");
    }

    #[test]
    fn active_answer_depends_on_window() {
        let event = spring();
        assert_eq!(
            answer_for(&event, IntentKind::Active, noon("2024-03-15")).unwrap(),
            ACTIVE_PHRASE
        );
        assert_eq!(
            answer_for(&event, IntentKind::Active, noon("2024-05-01")).unwrap(),
            INACTIVE_PHRASE
        );
    }

    #[test]
    fn non_active_intents_ignore_bad_dates() {
        let event = NewEvent::new("Broken", "soon", "later").reward("gem").build();
        assert_eq!(
            answer_for(&event, IntentKind::Reward, noon("2024-03-15")).unwrap(),
            "gem"
        );
        assert_eq!(
            answer_for(&event, IntentKind::Start, noon("2024-03-15")).unwrap(),
            "soon"
        );
    }
}
