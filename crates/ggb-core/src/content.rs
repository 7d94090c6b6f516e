//! Everything the bot says: canned command replies and the templates that
//! wrap link bundles.

use std::borrow::Cow;

use crate::{
    easter::annotate,
    formatting::{code, escape_html},
    links::{build_links, LinkBundle},
    messaging::types::{InlineArticle, InlineButton, InlineKeyboard, ReplyPayload},
    token::Token,
};

pub const SITE_URL: &str = "https://www.gorboy.wtf";
pub const GGT_URL: &str = "https://ggt.wtf";
pub const GAME_URL: &str = "https://flappy-gorboy-mini-app.vercel.app";
pub const TRASHSCAN_URL: &str = "https://trashscan.xyz";

const DISCLAIMER_FOOTER: &str = "⚠️ This is just a shortcut.\nAlways do your own research.";

// ============== Static commands ==============

const INTRO: &str = "⚡ GORBOY GUARD BOT ONLINE\n\n\
What I can do right now:\n\
• /help — list commands\n\
• /scan $ticker — DYOR links for a ticker or address\n\
• /mind your question — ask the trash oracle\n\
• /links — all GORBOY links\n\
• Drop a $ticker or a contract address — I reply with DYOR links (Trashscan + GGT)\n\n\
0$ budget · html/css/js · vercel\n\
Meme.Build.Repeat.";

const HELP: &str = "🧾 GORBOY GUARD — COMMANDS\n\n\
/start — restart the intro\n\
/help — this menu\n\
/scan &lt;ticker|address&gt; — DYOR snapshot\n\
/mind &lt;text&gt; — oracle verdict\n\
/links — every GORBOY link in one place\n\
/site — main GORBOY site\n\
/ggt — Guard Terminal (web)\n\
/game — Flappy GORBOY mini-app\n\
/status — bot status\n\
/patterns — scam patterns to watch\n\
/disclaimer — read this before aping\n\
/about — what is this thing\n\n\
DYOR:\n\
• Type <code>$GORBOY</code> or <code>$trashcoin</code>\n\
• Or just paste a contract address\n\
→ you get a quick set of links.\n\n\
Inline: type <code>@bot gorboy</code> in any chat.";

const SITE: &str = "🌐 GORBOY SITE:\nhttps://www.gorboy.wtf";

const GGT: &str = "🛰 GORBOY GUARD TERMINAL (web demo):\n\
https://ggt.wtf\n\n\
Paste mint → Hit SCAN → Watch the field react.";

const GAME: &str = "🎮 FLAPPY GORBOY MINI-APP:\n\
https://flappy-gorboy-mini-app.vercel.app\n\n\
Tap to start. Don’t crash into trash.";

const STATUS: &str = "🟢 GORBOY GUARD BOT — STATUS\n\n\
Router: online\n\
Mode: webhook\n\
Cooldown: 5s per user per chat\n\
Data: links only, no on-chain reads\n\
Memory: none, every restart is a fresh bin.";

const PATTERNS: &str = "🚨 TRASH PATTERNS TO WATCH\n\n\
• Mint authority still enabled\n\
• Freeze authority still enabled\n\
• One wallet holds most of the supply\n\
• Liquidity not locked or burned\n\
• Fresh deployer wallet funded minutes ago\n\
• Copycat ticker of a trending coin\n\
• \"Guaranteed 100x\" in the chat\n\n\
Seeing two or more? Walk away from the bin.";

const DISCLAIMER: &str = "⚠️ DISCLAIMER\n\n\
GORBOY GUARD BOT builds links, nothing more.\n\
No audits. No price data. No financial advice.\n\
Memecoins can go to zero in one candle.\n\
Always do your own research.";

const ABOUT: &str = "💀 ABOUT GORBOY GUARD\n\n\
A tiny webhook bot from the GORBOY universe.\n\
Paste a ticker or a mint and it hands you Trashscan + GGT links.\n\
Built with a 0$ budget and too much coffee.\n\n\
https://www.gorboy.wtf";

fn links_keyboard() -> InlineKeyboard {
    InlineKeyboard::new(vec![
        vec![
            InlineButton::url("🌐 Site", SITE_URL),
            InlineButton::url("🛰 GGT", GGT_URL),
        ],
        vec![
            InlineButton::url("🔍 Trashscan", TRASHSCAN_URL),
            InlineButton::url("🎮 Game", GAME_URL),
        ],
    ])
}

/// `/start` reply, optionally extended with a mini-scan of a deep-linked token.
pub fn start(deep_link: Option<&Token>) -> ReplyPayload {
    let mut text = INTRO.to_string();
    if let Some(token) = deep_link {
        text.push_str("\n\n");
        text.push_str(&mini_scan(token));
    }
    ReplyPayload::html(text)
        .with_keyboard(links_keyboard())
        .without_preview()
}

pub fn help() -> ReplyPayload {
    ReplyPayload::html(HELP)
}

pub fn links() -> ReplyPayload {
    ReplyPayload::plain("🔗 GORBOY LINKS\n\nEverything in one bin:")
        .with_keyboard(links_keyboard())
}

pub fn site() -> ReplyPayload {
    ReplyPayload::plain(SITE)
}

pub fn ggt() -> ReplyPayload {
    ReplyPayload::plain(GGT)
}

pub fn game() -> ReplyPayload {
    ReplyPayload::plain(GAME)
}

pub fn status() -> ReplyPayload {
    ReplyPayload::plain(STATUS)
}

pub fn patterns() -> ReplyPayload {
    ReplyPayload::plain(PATTERNS)
}

pub fn disclaimer() -> ReplyPayload {
    ReplyPayload::plain(DISCLAIMER)
}

pub fn about() -> ReplyPayload {
    ReplyPayload::plain(ABOUT)
}

// ============== Token replies ==============

pub const MINI_SCAN_HEADER: &str = "🔎 MINI-SCAN";

fn mini_scan(token: &Token) -> String {
    let bundle = build_links(token);
    format!(
        "{MINI_SCAN_HEADER}: {}\n• Trashscan: {}\n• GGT: {}",
        code(&bundle.title),
        escape_html(&bundle.primary_url),
        escape_html(&bundle.secondary_url),
    )
}

fn bundle_keyboard(bundle: &LinkBundle) -> InlineKeyboard {
    InlineKeyboard::new(vec![vec![
        InlineButton::url("🔍 Trashscan", bundle.primary_url.clone()),
        InlineButton::url("🛰 GGT Terminal", bundle.secondary_url.clone()),
    ]])
}

fn snapshot_text(token: &Token, bundle: &LinkBundle, egg: &str) -> String {
    let mut text = format!(
        "🔍 GORBOY DYOR SNAPSHOT\n\nTarget: {}\nType: {}\n",
        code(&bundle.title),
        token.kind().label()
    );
    if let Some(note) = &bundle.note {
        text.push_str(&format!("\n{}\n", escape_html(note)));
    }
    text.push_str(&format!(
        "\nLinks:\n• Trashscan: {}\n• GGT Terminal: {}\n\n",
        escape_html(&bundle.primary_url),
        escape_html(&bundle.secondary_url),
    ));
    if !egg.is_empty() {
        text.push_str(egg);
        text.push_str("\n\n");
    }
    text.push_str(DISCLAIMER_FOOTER);
    text
}

/// Full DYOR snapshot used by `/scan` and raw mentions.
pub fn snapshot(token: &Token) -> ReplyPayload {
    let bundle = build_links(token);
    ReplyPayload::html(snapshot_text(token, &bundle, annotate(token)))
        .with_keyboard(bundle_keyboard(&bundle))
        .without_preview()
}

pub fn scan_usage() -> ReplyPayload {
    ReplyPayload::html(
        "Usage: <code>/scan $TICKER</code>, <code>/scan ticker</code> or <code>/scan &lt;address&gt;</code>",
    )
}

pub fn inline_article(token: &Token) -> InlineArticle {
    let bundle = build_links(token);
    let body = ReplyPayload::html(snapshot_text(token, &bundle, ""))
        .with_keyboard(bundle_keyboard(&bundle))
        .without_preview();
    InlineArticle {
        id: "dyor".to_string(),
        title: format!("DYOR: {}", bundle.title),
        description: format!("{} · Trashscan + GGT links", token.kind().label()),
        body,
    }
}

pub fn inline_usage() -> InlineArticle {
    InlineArticle {
        id: "usage".to_string(),
        title: "Type a $ticker or an address".to_string(),
        description: "e.g. gorboy, $GGT or a mint address".to_string(),
        body: ReplyPayload::plain(
            "🔍 GORBOY GUARD inline: type a ticker or paste an address after the bot name to get DYOR links.",
        ),
    }
}

// ============== Other gated replies ==============

/// Verdicts for `/mind`, in priority order. The last entry has no keywords and
/// is the default.
const VERDICTS: &[(&[&str], &str)] = &[
    (
        &["safe", "guarantee"],
        "Nothing in the bin is safe and nothing is guaranteed. Size your bags like it can go to zero.",
    ),
    (
        &["pump", "moon"],
        "Moon talk detected. Check liquidity and holders before the rocket emoji.",
    ),
    (
        &["hold", "diamond"],
        "Diamond hands only work if you know what you are holding. Re-read the chart.",
    ),
    (
        &["gorboy", "ggt"],
        "You summoned the trash king. The king says: scan it yourself.",
    ),
    (&[], "The bin has heard you. The answer, as always: DYOR."),
];

pub fn mind_verdict(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    VERDICTS
        .iter()
        .find(|(keywords, _)| keywords.is_empty() || keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, verdict)| *verdict)
        .unwrap_or("DYOR.")
}

pub fn mind(text: &str) -> ReplyPayload {
    ReplyPayload::plain(format!("🧠 GORBOY MIND\n\n{}", mind_verdict(text)))
}

pub fn mind_usage() -> ReplyPayload {
    ReplyPayload::plain("Usage: /mind <your question>\nExample: /mind will it pump?")
}

pub fn promo() -> ReplyPayload {
    ReplyPayload::plain(
        "👑 Somebody said GORBOY?\n\n\
Site: https://www.gorboy.wtf\n\
Terminal: https://ggt.wtf\n\n\
Drop a $ticker or a mint and I'll hand you DYOR links.",
    )
    .with_keyboard(links_keyboard())
    .without_preview()
}

/// Echo cap in UTF-16 units, leaving room for the frame inside Telegram's 4096.
const MAX_ECHO_UNITS: usize = 3900;

/// Private-chat fallback: echo the text back with a hint.
pub fn hint(text: &str) -> ReplyPayload {
    let echo = clip_echo(text);
    ReplyPayload::plain(format!(
        "💀 GORBOY ECHO:\n{echo}\n\nTip: send a $ticker, a contract address or /help."
    ))
}

fn clip_echo(text: &str) -> Cow<'_, str> {
    let mut units = 0;
    for (i, c) in text.char_indices() {
        units += c.len_utf16();
        if units > MAX_ECHO_UNITS {
            return Cow::Owned(format!("{}…", &text[..i]));
        }
    }
    Cow::Borrowed(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::classify;

    #[test]
    fn mind_first_matching_set_wins() {
        assert!(mind_verdict("is it SAFE?").contains("Nothing in the bin is safe"));
        // "guarantee" outranks "moon".
        assert!(mind_verdict("moon guaranteed").contains("Nothing in the bin is safe"));
        assert!(mind_verdict("wen moon").contains("Moon talk"));
        assert!(mind_verdict("should I hold").contains("Diamond hands"));
        assert!(mind_verdict("what is ggt").contains("trash king"));
        assert!(mind_verdict("hello").contains("DYOR"));
    }

    #[test]
    fn snapshot_carries_links_note_and_egg() {
        let token = classify("$GORBOY", false).unwrap();
        let p = snapshot(&token);
        assert!(p.formatted);
        assert!(p.text.contains("Type: TICKER"));
        assert!(p.text.contains("King of the Bin"));
        assert!(p.text.contains("trash king himself"));
        assert!(p.text.contains("https://ggt.wtf/scan?ticker=GORBOY"));
        let urls: Vec<_> = p.keyboard.unwrap().buttons().map(|b| b.url.clone()).collect();
        assert_eq!(
            urls,
            vec![
                "https://trashscan.xyz/search?query=GORBOY".to_string(),
                "https://ggt.wtf/scan?ticker=GORBOY".to_string(),
            ]
        );
    }

    #[test]
    fn start_without_deep_link_has_no_mini_scan() {
        assert!(!start(None).text.contains(MINI_SCAN_HEADER));
        let token = classify("$GGT", false).unwrap();
        assert!(start(Some(&token)).text.contains(MINI_SCAN_HEADER));
    }

    #[test]
    fn inline_article_has_no_egg() {
        let token = classify("$GORBOY", false).unwrap();
        let a = inline_article(&token);
        assert!(a.title.contains("GORBOY"));
        assert!(!a.body.text.contains("trash king himself"));
    }

    #[test]
    fn hint_echoes_short_text_verbatim() {
        let p = hint("gm <b>frens</b>");
        assert!(!p.formatted);
        assert!(p.text.contains("\ngm <b>frens</b>\n"));
    }

    #[test]
    fn hint_stays_within_telegram_limit() {
        for long in ["a".repeat(10_000), "💀".repeat(5_000)] {
            let p = hint(&long);
            assert!(p.text.encode_utf16().count() <= 4096);
            assert!(p.text.contains("…\n\nTip:"));
        }
    }
}
