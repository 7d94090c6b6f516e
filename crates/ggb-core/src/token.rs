//! Token extraction: `$TICKER` mentions, base58 addresses and bare words.

use std::sync::LazyLock;

use regex::Regex;

static TICKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$([A-Za-z0-9_]{2,20})").expect("valid regex"));

static ADDRESS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[1-9A-HJ-NP-Za-km-z]{25,64}").expect("valid regex"));

static BARE_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]{2,20}$").expect("valid regex"));

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Ticker,
    Address,
}

impl TokenKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Ticker => "TICKER",
            Self::Address => "ADDRESS",
        }
    }
}

/// A classified token. Tickers are upper-cased; addresses keep their case.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    kind: TokenKind,
    value: String,
}

impl Token {
    pub(crate) fn ticker(value: &str) -> Self {
        Self {
            kind: TokenKind::Ticker,
            value: value.to_uppercase(),
        }
    }

    pub(crate) fn address(value: &str) -> Self {
        Self {
            kind: TokenKind::Address,
            value: value.to_string(),
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_ticker(&self) -> bool {
        self.kind == TokenKind::Ticker
    }
}

/// One matcher in the classification cascade.
struct Rule {
    name: &'static str,
    /// Only consulted when the caller allows bare words (explicit `/scan`-style arguments).
    bare_word_only: bool,
    matcher: fn(&str) -> Option<Token>,
}

const RULES: &[Rule] = &[
    Rule {
        name: "dollar-ticker",
        bare_word_only: false,
        matcher: match_dollar_ticker,
    },
    Rule {
        name: "base58-address",
        bare_word_only: false,
        matcher: match_address,
    },
    Rule {
        name: "bare-word",
        bare_word_only: true,
        matcher: match_bare_word,
    },
];

fn match_dollar_ticker(text: &str) -> Option<Token> {
    let caps = TICKER_RE.captures(text)?;
    Some(Token::ticker(caps.get(1)?.as_str()))
}

fn match_address(text: &str) -> Option<Token> {
    ADDRESS_RE.find(text).map(|m| Token::address(m.as_str()))
}

fn match_bare_word(text: &str) -> Option<Token> {
    let trimmed = text.trim();
    BARE_WORD_RE
        .is_match(trimmed)
        .then(|| Token::ticker(trimmed))
}

/// Classify free text into a token; first matching rule wins.
pub fn classify(text: &str, allow_bare_word: bool) -> Option<Token> {
    classify_with_rule(text, allow_bare_word).map(|(_, token)| token)
}

fn classify_with_rule(text: &str, allow_bare_word: bool) -> Option<(&'static str, Token)> {
    RULES
        .iter()
        .filter(|rule| allow_bare_word || !rule.bare_word_only)
        .find_map(|rule| (rule.matcher)(text).map(|token| (rule.name, token)))
}

/// Auto-detection for ordinary chat messages.
///
/// Bare words never count here, and a ticker is only accepted when its literal
/// `$VALUE` form appears in the text.
pub fn detect_mention(text: &str) -> Option<Token> {
    let token = classify(text, false)?;
    if token.is_ticker() && !has_dollar_form(text, token.value()) {
        return None;
    }
    Some(token)
}

/// `$value` must appear whole: a capture cut short at 20 chars doesn't count.
fn has_dollar_form(text: &str, value: &str) -> bool {
    TICKER_RE.captures_iter(text).any(|caps| {
        let Some(m) = caps.get(1) else {
            return false;
        };
        let runs_on = matches!(
            text[m.end()..].chars().next(),
            Some(c) if c.is_alphanumeric() || c == '_'
        );
        !runs_on && m.as_str().eq_ignore_ascii_case(value)
    })
}
