//! Flavor lines for a few well-known tickers.

use crate::token::Token;

const EGGS: &[(&str, &str)] = &[
    ("GORBOY", "👑 The trash king himself. Bow to the bin."),
    ("GGT", "🛰 Guard Terminal online. The field is watching."),
    ("TRASH", "🗑 One bin's trash is another bin's 100x."),
    ("SOL", "☀️ Big brother chain spotted. Still DYOR."),
];

/// Returns the flavor line for `token`, or an empty string.
pub fn annotate(token: &Token) -> &'static str {
    if !token.is_ticker() {
        return "";
    }
    EGGS.iter()
        .find(|(symbol, _)| *symbol == token.value())
        .map(|(_, line)| *line)
        .unwrap_or("")
}
