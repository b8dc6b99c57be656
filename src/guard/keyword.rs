//! Table-driven keyword and notation guard.

use anyhow::{Context, Result};
use regex::Regex;

use super::traits::{GuardDecision, GuardSignal, TopicGuard};
use super::vocabulary::{
    stem, tokenize, CHESS_TERMS, COURTESY_PATTERNS, GREETING_PATTERNS, INTRODUCTION_PATTERNS,
    NOTATION_PATTERNS,
};

/// Chess vocabulary as pre-tokenised term sequences.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    terms: Vec<Vec<String>>,
}

impl Vocabulary {
    /// Built-in table plus any extra terms (case-insensitive).
    pub fn with_extra<S: AsRef<str>>(extra: &[S]) -> Self {
        let terms = CHESS_TERMS
            .iter()
            .copied()
            .chain(extra.iter().map(AsRef::as_ref))
            .map(tokenize)
            .filter(|tokens| !tokens.is_empty())
            .collect();
        Self { terms }
    }

    /// First term found in `tokens`, scanning left to right.
    pub fn find_in(&self, tokens: &[String]) -> Option<String> {
        for start in 0..tokens.len() {
            for term in &self.terms {
                let end = start + term.len();
                if end > tokens.len() {
                    continue;
                }
                let window = &tokens[start..end];
                if window
                    .iter()
                    .zip(term)
                    .all(|(token, expected)| token == expected || stem(token) == expected)
                {
                    return Some(term.join(" "));
                }
            }
        }
        None
    }

    /// Whether a single word (or short phrase) is itself chess vocabulary.
    pub fn contains_word(&self, word: &str) -> bool {
        let tokens = tokenize(word);
        !tokens.is_empty()
            && self.terms.iter().any(|term| {
                term.len() == tokens.len()
                    && term
                        .iter()
                        .zip(&tokens)
                        .all(|(expected, token)| token == expected || stem(token) == expected)
            })
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::with_extra::<&str>(&[])
    }
}

fn compile_all(patterns: &[&str]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| Regex::new(p).with_context(|| format!("invalid guard pattern: {p}")))
        .collect()
}

/// Guard that allows a message when it mentions chess vocabulary, contains
/// move notation, or is a greeting, introduction or courtesy turn.
///
/// Recall is favoured over precision: one chess term anywhere in a mixed
/// message is enough.
pub struct KeywordTopicGuard {
    vocabulary: Vocabulary,
    notation: Vec<(&'static str, Regex)>,
    greetings: Vec<Regex>,
    introductions: Vec<Regex>,
    courtesies: Vec<Regex>,
}

impl KeywordTopicGuard {
    pub fn new() -> Result<Self> {
        Self::with_extra_keywords::<&str>(&[])
    }

    pub fn with_extra_keywords<S: AsRef<str>>(extra: &[S]) -> Result<Self> {
        let notation = NOTATION_PATTERNS
            .iter()
            .map(|(name, p)| {
                Regex::new(p)
                    .map(|re| (*name, re))
                    .with_context(|| format!("invalid notation pattern {name}"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            vocabulary: Vocabulary::with_extra(extra),
            notation,
            greetings: compile_all(GREETING_PATTERNS)?,
            introductions: compile_all(INTRODUCTION_PATTERNS)?,
            courtesies: compile_all(COURTESY_PATTERNS)?,
        })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    fn chess_signal(&self, text: &str) -> Option<GuardSignal> {
        let tokens = tokenize(text);
        if let Some(term) = self.vocabulary.find_in(&tokens) {
            return Some(GuardSignal::Keyword(term));
        }

        self.notation.iter().find_map(|(name, re)| {
            re.find(text).map(|m| GuardSignal::Notation {
                pattern: (*name).to_string(),
                matched: m.as_str().trim().to_string(),
            })
        })
    }

    fn social_signal(&self, text: &str) -> Option<GuardSignal> {
        let lowered = text.to_lowercase().replace('’', "'");
        if self.introductions.iter().any(|re| re.is_match(&lowered)) {
            return Some(GuardSignal::Introduction);
        }
        if self.greetings.iter().any(|re| re.is_match(&lowered)) {
            return Some(GuardSignal::Greeting);
        }
        if self.courtesies.iter().any(|re| re.is_match(&lowered)) {
            return Some(GuardSignal::Courtesy);
        }
        None
    }
}

impl TopicGuard for KeywordTopicGuard {
    fn classify(&self, text: &str) -> GuardDecision {
        if text.trim().is_empty() {
            return GuardDecision::reject("empty message carries no chess signal");
        }

        if let Some(signal) = self.chess_signal(text) {
            return GuardDecision::allow(signal);
        }

        if let Some(signal) = self.social_signal(text) {
            return GuardDecision::allow(signal);
        }

        GuardDecision::reject("no chess vocabulary or move notation found")
    }

    fn name(&self) -> &str {
        "keyword"
    }
}
