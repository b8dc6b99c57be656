//! Display-name extraction from self-introductions.

use anyhow::{Context, Result};
use regex::Regex;

use crate::guard::vocabulary::NON_NAME_WORDS;
use crate::guard::Vocabulary;

/// Introduction phrases, tried in order. Each captures the text that follows
/// the phrase up to the next sentence boundary or punctuation mark.
const INTRODUCTION_PHRASES: &[&str] = &[
    r"(?i)\b(?:i am|i'm)\s+(?P<span>[^.,!?;:()\n]*)",
    r"(?i)\bmy name is\s+(?P<span>[^.,!?;:()\n]*)",
    r"(?i)\bcall me\s+(?P<span>[^.,!?;:()\n]*)",
    r"(?i)\bthis is\s+(?P<span>[^.,!?;:()\n]*)",
    r"(?i)^\s*(?:(?:hi|hello|hey)\s*,?\s+)?(?P<span>\p{L}[\p{L}'-]*)\s+here\b",
];

/// Upper bound on words taken into a multi-word name ("Maria Lopez").
const MAX_NAME_WORDS: usize = 3;

/// Pulls a display name out of free text such as "Hi, I'm Alex".
///
/// Absence of a name is a normal outcome; extraction never fails.
pub struct NameExtractor {
    phrases: Vec<Regex>,
    vocabulary: Vocabulary,
}

impl NameExtractor {
    pub fn new() -> Result<Self> {
        Self::with_vocabulary(Vocabulary::default())
    }

    /// Use a custom vocabulary, e.g. one extended from config, so that
    /// configured chess terms are never mistaken for names.
    pub fn with_vocabulary(vocabulary: Vocabulary) -> Result<Self> {
        let phrases = INTRODUCTION_PHRASES
            .iter()
            .map(|p| Regex::new(p).with_context(|| format!("invalid introduction pattern: {p}")))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            phrases,
            vocabulary,
        })
    }

    /// Extract a title-cased name. The first phrase whose capture looks like
    /// a name wins.
    pub fn extract(&self, text: &str) -> Option<String> {
        let normalized = text.replace('’', "'");
        self.phrases.iter().find_map(|re| {
            re.captures_iter(&normalized)
                .filter_map(|caps| caps.name("span"))
                .find_map(|span| self.name_from_span(span.as_str()))
        })
    }

    fn name_from_span(&self, span: &str) -> Option<String> {
        let mut words = span
            .split_whitespace()
            .map(|w| w.trim_matches(['\'', '-', '"']))
            .peekable();

        let first = words.next()?;
        if !self.is_name_word(first) {
            return None;
        }
        // An untitled word only counts when the clause ends right after it
        // ("i'm alex"), otherwise it is a state or activity ("i'm down a pawn").
        if !starts_uppercase(first)
            && (words.peek().is_some() || first.to_lowercase().ends_with("ing"))
        {
            return None;
        }

        let mut parts = vec![title_case(first)];
        for word in words {
            if parts.len() >= MAX_NAME_WORDS || !starts_uppercase(word) || !self.is_name_word(word)
            {
                break;
            }
            parts.push(title_case(word));
        }

        let name = parts.join(" ");
        if self.vocabulary.contains_word(&name) {
            return None;
        }
        Some(name)
    }

    fn is_name_word(&self, word: &str) -> bool {
        let mut chars = word.chars();
        let starts_with_letter = chars.next().is_some_and(char::is_alphabetic);
        let rest_ok = word
            .chars()
            .all(|c| c.is_alphabetic() || matches!(c, '\'' | '-'));
        if !starts_with_letter || !rest_ok {
            return false;
        }

        let lowered = word.to_lowercase();
        !NON_NAME_WORDS.contains(&lowered.as_str()) && !self.vocabulary.contains_word(&lowered)
    }
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

/// "mARIA" -> "Maria".
fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> NameExtractor {
        NameExtractor::new().unwrap()
    }

    fn extract(text: &str) -> Option<String> {
        extractor().extract(text)
    }

    #[test]
    fn extracts_name_before_comma() {
        assert_eq!(
            extract("Hi, I'm Alex, what's a good opening?").as_deref(),
            Some("Alex")
        );
    }

    #[test]
    fn extracts_name_before_period() {
        assert_eq!(extract("My name is Maria.").as_deref(), Some("Maria"));
    }

    #[test]
    fn title_cases_lowercase_input() {
        assert_eq!(extract("i'm alex").as_deref(), Some("Alex"));
        assert_eq!(extract("call me SAM please").as_deref(), Some("Sam"));
    }

    #[test]
    fn activity_after_i_am_is_not_a_name() {
        let name = extract("I am playing against Bob");
        assert_ne!(name.as_deref(), Some("Playing"));
        assert!(name.is_none());
    }

    #[test]
    fn chess_terms_are_not_names() {
        assert!(extract("I'm Rook").is_none());
        assert!(extract("call me grandmaster").is_none());
        assert!(extract("this is the Sicilian, right?").is_none());
    }

    #[test]
    fn articles_and_adjectives_are_not_names() {
        assert!(extract("I am a beginner").is_none());
        assert!(extract("I'm new to chess").is_none());
        assert!(extract("I am 25 years old").is_none());
    }

    #[test]
    fn multi_word_names_need_capitals() {
        assert_eq!(
            extract("My name is Maria Lopez and I love chess").as_deref(),
            Some("Maria Lopez")
        );
        assert_eq!(
            extract("I'm Alex and I want to learn").as_deref(),
            Some("Alex")
        );
    }

    #[test]
    fn player_surname_is_not_folded_into_name() {
        assert_eq!(extract("I am Magnus Carlsen").as_deref(), Some("Magnus"));
    }

    #[test]
    fn here_introduction() {
        assert_eq!(extract("Alex here").as_deref(), Some("Alex"));
        assert_eq!(extract("hey, jo here").as_deref(), Some("Jo"));
        assert!(extract("Anyone here play the French?").is_none());
    }

    #[test]
    fn later_phrase_used_when_earlier_is_rejected() {
        assert_eq!(
            extract("I am learning openings, my name is Tom").as_deref(),
            Some("Tom")
        );
    }

    #[test]
    fn untitled_word_needs_clause_to_end() {
        assert!(extract("I'm down a pawn in the endgame, what now?").is_none());
        assert!(extract("I'm up an exchange, how do I convert?").is_none());
        assert!(extract("i'm stuck in a bad bishop ending").is_none());
        assert_eq!(extract("call me sam.").as_deref(), Some("Sam"));
        assert_eq!(extract("hi, i'm alex").as_deref(), Some("Alex"));
    }

    #[test]
    fn side_colours_are_not_names() {
        assert!(extract("I am White in this position, best move?").is_none());
        assert!(extract("I'm Black.").is_none());
        assert!(extract("I'm down.").is_none());
    }

    #[test]
    fn curly_apostrophe_is_normalised() {
        assert_eq!(extract("I’m Zoë").as_deref(), Some("Zoë"));
    }

    #[test]
    fn no_introduction_yields_none() {
        assert!(extract("What is the best reply to e4?").is_none());
        assert!(extract("").is_none());
        assert!(extract("my name is").is_none());
    }

    #[test]
    fn custom_vocabulary_blocks_configured_terms() {
        let vocab = Vocabulary::with_extra(&["hikaru"]);
        let extractor = NameExtractor::with_vocabulary(vocab).unwrap();
        assert!(extractor.extract("call me Hikaru").is_none());
        assert_eq!(extract("call me Hikaru").as_deref(), Some("Hikaru"));
    }

    #[test]
    fn title_case_helper() {
        assert_eq!(title_case("mARIA"), "Maria");
        assert_eq!(title_case(""), "");
    }
}
