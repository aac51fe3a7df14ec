//! Text normalization applied before any matching.

/// Punctuation removed wherever it appears.
const STRIPPED: &[char] = &['！', '？', '!', '?', '．', '.', '。'];

/// Lower-case `text` and drop question marks, exclamation marks and periods.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| !STRIPPED.contains(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_case_and_punctuation() {
        assert_eq!(normalize("A？"), normalize("a"));
        assert_eq!(normalize("Spring!?"), "spring");
    }

    #[test]
    fn strips_punctuation_in_the_middle() {
        assert_eq!(normalize("春！いつまで？です。"), "春いつまでです");
        assert_eq!(normalize("v1.2"), "v12");
        assert_eq!(normalize("春．いつまで"), "春いつまで");
        assert_eq!(normalize("a．"), normalize("a"));
    }

    #[test]
    fn is_idempotent() {
        for input in ["春イベントいつまで？", "HELLO World!!", "", "...", "ＡＢＣ！"] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input {input:?}");
        }
    }

    #[test]
    fn leaves_kana_and_kanji_alone() {
        assert_eq!(normalize("今やってる"), "今やってる");
    }
}
