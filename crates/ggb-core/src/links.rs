//! Deterministic DYOR link bundles for classified tokens.

use crate::token::{Token, TokenKind};

pub const TRASHSCAN_BASE: &str = "https://trashscan.xyz";
pub const GGT_BASE: &str = "https://ggt.wtf";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkBundle {
    pub title: String,
    /// Trashscan search link.
    pub primary_url: String,
    /// GGT terminal scan link.
    pub secondary_url: String,
    pub note: Option<String>,
}

struct Override {
    symbol: &'static str,
    title: &'static str,
    note: &'static str,
}

const OVERRIDES: &[Override] = &[
    Override {
        symbol: "GORBOY",
        title: "$GORBOY · King of the Bin",
        note: "Home token of the GORBOY universe. Still meme, still DYOR.",
    },
    Override {
        symbol: "GGT",
        title: "$GGT · Guard Terminal",
        note: "The terminal scans, you decide. No signal is financial advice.",
    },
    Override {
        symbol: "GOR",
        title: "$GOR · Gorbagana gas",
        note: "Native gas of the trash chain. Check the real mint before you ape.",
    },
];

fn lookup_override(token: &Token) -> Option<&'static Override> {
    if token.kind() != TokenKind::Ticker {
        return None;
    }
    OVERRIDES.iter().find(|o| o.symbol == token.value())
}

/// Build the link bundle for a token. Total and side-effect free.
pub fn build_links(token: &Token) -> LinkBundle {
    let encoded = urlencoding::encode(token.value());
    let primary_url = format!("{TRASHSCAN_BASE}/search?query={encoded}");

    let secondary_url = match token.kind() {
        TokenKind::Ticker => format!("{GGT_BASE}/scan?ticker={encoded}"),
        TokenKind::Address => format!("{GGT_BASE}/scan/{encoded}"),
    };

    let (title, note) = match (lookup_override(token), token.kind()) {
        (Some(o), _) => (o.title.to_string(), Some(o.note.to_string())),
        (None, TokenKind::Ticker) => (format!("${}", token.value()), None),
        (None, TokenKind::Address) => (token.value().to_string(), None),
    };

    LinkBundle {
        title,
        primary_url,
        secondary_url,
        note,
    }
}
