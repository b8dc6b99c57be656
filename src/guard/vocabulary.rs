//! Static chess vocabulary and pattern tables.
//!
//! Everything the guard and the name extractor match against lives here so
//! the lists can grow without touching matching code.

/// Chess terms and phrases, lower-case. Multi-word entries are matched as
/// contiguous token runs.
pub const CHESS_TERMS: &[&str] = &[
    // game and outcomes
    "chess",
    "checkmate",
    "mate",
    "check",
    "stalemate",
    "draw",
    "resign",
    "zugzwang",
    "perpetual check",
    "threefold repetition",
    "fifty-move rule",
    // pieces
    "pawn",
    "knight",
    "bishop",
    "rook",
    "queen",
    "king",
    "piece",
    // rules and moves
    "castling",
    "castle",
    "en passant",
    "promotion",
    "underpromotion",
    "capture",
    "move",
    "board",
    "square",
    "rank",
    "file",
    "diagonal",
    "position",
    "game",
    "notation",
    "algebraic notation",
    "touch-move",
    "time control",
    "blitz",
    "bullet",
    "rapid",
    // phases and strategy
    "opening",
    "middlegame",
    "endgame",
    "gambit",
    "defense",
    "defence",
    "fianchetto",
    "outpost",
    "tempo",
    "initiative",
    "pawn structure",
    "passed pawn",
    "isolated pawn",
    "doubled pawns",
    "opposition",
    // tactics
    "fork",
    "pin",
    "skewer",
    "sacrifice",
    "exchange",
    "discovered attack",
    "double check",
    "tactic",
    "strategy",
    "combination",
    "blunder",
    "swindle",
    // named openings
    "sicilian",
    "caro-kann",
    "ruy lopez",
    "italian game",
    "king's indian",
    "nimzo-indian",
    "grunfeld",
    "queen's gambit",
    "london system",
    "french defense",
    "scandinavian",
    "english opening",
    "dutch defense",
    "pirc",
    // competition and ratings
    "grandmaster",
    "fide",
    "elo",
    "rating",
    "tournament",
    "olympiad",
    "candidates",
    "world championship",
    // engines and sites
    "stockfish",
    "alphazero",
    "leela",
    "lichess",
    "chess.com",
    // players
    "carlsen",
    "kasparov",
    "fischer",
    "karpov",
    "tal",
    "capablanca",
    "alekhine",
    "botvinnik",
    "morphy",
    "anand",
    "kramnik",
    "polgar",
    "nakamura",
    "caruana",
    "ding liren",
    "gukesh",
    "nepomniachtchi",
];

/// Named regular expressions for move notation. Applied to the original,
/// case-preserving text because piece letters are upper-case.
pub const NOTATION_PATTERNS: &[(&str, &str)] = &[
    (
        "move_number",
        r"\b\d{1,3}\.(?:\.\.)?\s*(?:[KQRBN][a-h]?[1-8]?x?[a-h][1-8]|[a-h](?:x[a-h])?[1-8]|O-O(?:-O)?)",
    ),
    ("piece_move", r"\b[KQRBN][a-h]?[1-8]?x?[a-h][1-8]\b"),
    ("pawn_capture", r"\b[a-h]x[a-h][1-8]\b"),
    ("castling", r"\bO-O(?:-O)?\b"),
    ("square", r"\b[a-h][1-8]\b"),
];

/// Opening salutations. Matched at the start of lower-cased text.
pub const GREETING_PATTERNS: &[&str] = &[
    r"^\s*(?:hi|hello|hey|greetings|howdy|hiya|good morning|good afternoon|good evening)\b",
];

/// Self-introductions. Matched anywhere in lower-cased text.
pub const INTRODUCTION_PATTERNS: &[&str] = &[
    r"\b(?:i am|i'm|my name is|this is|call me)\s+\p{L}+",
    r"^\s*\p{L}+\s+here\b",
];

/// Thanks and farewells. Matched at the start of lower-cased text.
pub const COURTESY_PATTERNS: &[&str] =
    &[r"^\s*(?:thank you|thanks|thx|cheers|bye|goodbye|see you)\b"];

/// Messages that are nothing but a salutation.
pub const SIMPLE_GREETINGS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "greetings",
    "good morning",
    "good afternoon",
    "good evening",
    "howdy",
    "hiya",
    "yo",
];

/// Words that follow an introduction phrase but are not names.
pub const NON_NAME_WORDS: &[&str] = &[
    "a",
    "an",
    "the",
    "here",
    "there",
    "player",
    "learning",
    "playing",
    "looking",
    "trying",
    "going",
    "new",
    "not",
    "just",
    "so",
    "very",
    "really",
    "also",
    "still",
    "interested",
    "curious",
    "wondering",
    "confused",
    "stuck",
    "sure",
    "ready",
    "back",
    "beginner",
    "intermediate",
    "advanced",
    "rated",
    "about",
    "from",
    "in",
    "at",
    "on",
    "your",
    "my",
    "it",
    "that",
    "what",
    "how",
    "why",
    "fine",
    "good",
    "great",
    "ok",
    "okay",
    "sorry",
    "glad",
    "happy",
    "hungry",
    "tired",
    "done",
    "well",
    "anyone",
    "anybody",
    "someone",
    "somebody",
    "nobody",
    "everyone",
    "who",
    "is",
    "white",
    "black",
    "up",
    "down",
    "ahead",
    "behind",
    "winning",
    "losing",
];

/// Split text into lower-case word tokens.
///
/// Tokens keep inner apostrophes, hyphens and dots ("king's", "caro-kann",
/// "chess.com"); a trailing possessive `'s` is dropped so "queen's" also
/// yields "queen" when matched as a single word.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || matches!(c, '\'' | '’' | '-' | '.')))
        .map(|raw| raw.trim_matches(|c: char| matches!(c, '\'' | '’' | '-' | '.')))
        .filter(|token| !token.is_empty())
        .map(|token| token.replace('’', "'"))
        .collect()
}

/// Strip a trailing possessive or plural suffix for single-word matching.
pub fn stem(token: &str) -> &str {
    if let Some(base) = token.strip_suffix("'s") {
        return base;
    }
    if let Some(base) = token.strip_suffix("es") {
        if base.len() > 2 && (base.ends_with("ch") || base.ends_with("sh") || base.ends_with('x'))
        {
            return base;
        }
    }
    if token.len() > 3 {
        if let Some(base) = token.strip_suffix('s') {
            if !base.ends_with('s') {
                return base;
            }
        }
    }
    token
}
