//! Light personalisation: name extraction and canned social replies.

pub mod extractor;

pub use extractor::NameExtractor;

use crate::guard::vocabulary::SIMPLE_GREETINGS;

/// Whether the message is nothing but a salutation ("hi", "Good morning!").
pub fn is_simple_greeting(text: &str) -> bool {
    let normalized = text
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace())
        .to_lowercase();
    SIMPLE_GREETINGS.contains(&normalized.as_str())
}

/// Reply to a bare greeting.
pub fn greeting_response(user_name: Option<&str>) -> String {
    match user_name {
        Some(name) => format!("Hello again, {name}! 👋 How can I help you with chess today?"),
        None => "Hello! 👋 Welcome to the Chess Q&A Bot! Feel free to introduce yourself \
                 or ask me any chess-related questions!"
            .to_string(),
    }
}

/// Reply to an introduction that carries no chess question.
pub fn introduction_response(user_name: Option<&str>) -> String {
    match user_name {
        Some(name) => format!(
            "Nice to meet you, {name}! ♟️ Ask me anything about chess: rules, openings, \
             strategy, famous players or tournament history."
        ),
        None => greeting_response(None),
    }
}

/// Reply to thanks or a farewell.
pub fn courtesy_response(user_name: Option<&str>) -> String {
    match user_name {
        Some(name) => {
            format!("You're welcome, {name}! Come back any time you have a chess question.")
        }
        None => "You're welcome! Come back any time you have a chess question.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_greetings_are_detected() {
        assert!(is_simple_greeting("hi"));
        assert!(is_simple_greeting("  Hello!  "));
        assert!(is_simple_greeting("Good morning."));
        assert!(is_simple_greeting("yo"));
    }

    #[test]
    fn greetings_with_content_are_not_simple() {
        assert!(!is_simple_greeting("hi, what is a gambit?"));
        assert!(!is_simple_greeting("hello I'm Alex"));
        assert!(!is_simple_greeting(""));
    }

    #[test]
    fn greeting_response_is_personalised_when_name_known() {
        assert!(greeting_response(Some("Maria")).contains("Hello again, Maria!"));
        assert!(greeting_response(None).contains("Welcome"));
    }

    #[test]
    fn introduction_response_uses_name() {
        assert!(introduction_response(Some("Alex")).starts_with("Nice to meet you, Alex!"));
        assert_eq!(introduction_response(None), greeting_response(None));
    }

    #[test]
    fn courtesy_response_variants() {
        assert!(courtesy_response(Some("Sam")).contains("Sam"));
        assert!(!courtesy_response(None).contains(','));
    }
}
