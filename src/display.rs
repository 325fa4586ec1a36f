use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Language {
    English,
    Japanese,
    #[default]
    Both,
}

/// Picks one half of an `"english/japanese"` string.
///
/// Text without a `/` is returned as is, whatever the language.
pub(crate) fn localize(text: &str, language: Language) -> &str {
    let Some((english, japanese)) = text.split_once('/') else {
        return text;
    };

    match language {
        Language::English => english,
        Language::Japanese => japanese,
        Language::Both => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_first_slash() {
        assert_eq!(localize("Book/本", Language::English), "Book");
        assert_eq!(localize("Book/本", Language::Japanese), "本");
        assert_eq!(localize("Book/本", Language::Both), "Book/本");
        assert_eq!(localize("A/B/C", Language::Japanese), "B/C");
    }

    #[test]
    fn text_without_slash_is_untouched() {
        assert_eq!(localize("alice", Language::English), "alice");
        assert_eq!(localize("alice", Language::Japanese), "alice");
        assert_eq!(localize("", Language::Japanese), "");
    }
}
