//! Alias lookup: find the event a question refers to.

use crate::model::Event;

/// Return the first event, in collection order, with an alias contained
/// in `question`.
///
/// `question` is expected to be normalized already. Aliases are lower-cased
/// before the containment check; empty aliases never match.
pub fn find_event<'a>(question: &str, events: &'a [Event]) -> Option<&'a Event> {
    events.iter().find(|event| {
        event
            .aliases
            .iter()
            .any(|alias| !alias.is_empty() && question.contains(&alias.to_lowercase()))
    })
}
