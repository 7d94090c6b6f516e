//! Intent dispatch: one inbound event in, at most one reply out.
//!
//! Rules are evaluated in a fixed order and the first match wins. Transport
//! concerns (HTTP method, missing token) are handled by the webhook before an
//! event ever reaches this module.

use std::{
    sync::{Arc, LazyLock},
    time::Instant,
};

use regex::Regex;
use tracing::debug;

use crate::{
    content,
    cooldown::{CooldownGate, CooldownKey},
    domain::{ChatId, UserId},
    event::{IncomingInlineQuery, IncomingMessage, InboundEvent},
    messaging::types::{Outbound, ReplyPayload},
    token::{classify, detect_mention, Token},
};

static BRAND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:gorboy|ggt)\b").expect("valid regex"));

const DEEP_LINK_SCAN_PREFIX: &str = "scan_";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Links,
    Site,
    Ggt,
    Game,
    Status,
    Patterns,
    Disclaimer,
    About,
    Mind,
    Scan,
}

/// Command names in matching order. Matching is by prefix, so `/helpme`
/// counts as `/help` and `/scan$GGT` as `/scan $GGT`.
const COMMANDS: &[(&str, Command)] = &[
    ("start", Command::Start),
    ("help", Command::Help),
    ("links", Command::Links),
    ("site", Command::Site),
    ("ggt", Command::Ggt),
    ("game", Command::Game),
    ("status", Command::Status),
    ("patterns", Command::Patterns),
    ("disclaimer", Command::Disclaimer),
    ("about", Command::About),
    ("mind", Command::Mind),
    ("scan", Command::Scan),
];

/// Which rule handled the event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    /// No text, or an update kind the bot does not handle.
    Ignored,
    InlineQuery,
    Command(Command),
    /// `/mind` or `/scan` without a usable argument.
    Usage(Command),
    TokenMention,
    BrandKeyword,
    Hint,
    GroupSilence,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub intent: Intent,
    pub reply: Option<Outbound>,
    /// The rule produced a reply but the cooldown swallowed it.
    pub throttled: bool,
}

impl Outcome {
    fn silent(intent: Intent) -> Self {
        Self {
            intent,
            reply: None,
            throttled: false,
        }
    }

    fn reply(intent: Intent, outbound: Outbound) -> Self {
        Self {
            intent,
            reply: Some(outbound),
            throttled: false,
        }
    }

    fn throttled(intent: Intent) -> Self {
        Self {
            intent,
            reply: None,
            throttled: true,
        }
    }
}

/// Match a known command name at the start of `text` (case-insensitive).
///
/// Returns the command and the untrimmed remainder, with an optional
/// `@botname` suffix removed.
fn parse_command(text: &str) -> Option<(Command, &str)> {
    let body = text.trim_start().strip_prefix('/')?;
    let (cmd, rest) = COMMANDS.iter().find_map(|(name, cmd)| {
        let head = body.get(..name.len())?;
        head.eq_ignore_ascii_case(name)
            .then(|| (*cmd, &body[name.len()..]))
    })?;

    let rest = match rest.strip_prefix('@') {
        Some(suffixed) => suffixed
            .find(char::is_whitespace)
            .map(|i| &suffixed[i..])
            .unwrap_or(""),
        None => rest,
    };
    Some((cmd, rest))
}

/// Decode a `/start` payload into a token, if it names one.
///
/// Telegram always separates the payload with a space; text glued to the
/// command (`/starting`) is not a payload.
fn deep_link_token(rest: &str) -> Option<Token> {
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let payload = rest.trim();
    if payload.is_empty() {
        return None;
    }
    let stripped = payload
        .strip_prefix(DEEP_LINK_SCAN_PREFIX)
        .unwrap_or(payload);
    let decoded = urlencoding::decode(stripped)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| stripped.to_string());
    classify(&decoded, true)
}

pub struct Dispatcher {
    cooldown: Arc<dyn CooldownGate>,
}

impl Dispatcher {
    pub fn new(cooldown: Arc<dyn CooldownGate>) -> Self {
        Self { cooldown }
    }

    pub fn dispatch(&self, event: &InboundEvent) -> Outcome {
        self.dispatch_at(event, Instant::now())
    }

    pub fn dispatch_at(&self, event: &InboundEvent, now: Instant) -> Outcome {
        let outcome = match event {
            InboundEvent::InlineQuery(q) => self.on_inline_query(q),
            InboundEvent::Message(m) | InboundEvent::EditedMessage(m) => self.on_message(m, now),
            InboundEvent::Unsupported => Outcome::silent(Intent::Ignored),
        };
        debug!(intent = ?outcome.intent, throttled = outcome.throttled, "dispatched event");
        outcome
    }

    fn on_inline_query(&self, q: &IncomingInlineQuery) -> Outcome {
        let article = match classify(&q.query, true) {
            Some(token) => content::inline_article(&token),
            None => content::inline_usage(),
        };
        Outcome::reply(
            Intent::InlineQuery,
            Outbound::InlineAnswer {
                query_id: q.id.clone(),
                results: vec![article],
            },
        )
    }

    fn on_message(&self, m: &IncomingMessage, now: Instant) -> Outcome {
        let Some(text) = m.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
            return Outcome::silent(Intent::Ignored);
        };

        if let Some((cmd, rest)) = parse_command(text) {
            return self.on_command(m, cmd, rest, now);
        }

        if let Some(token) = detect_mention(text) {
            return self.gated(m, now, Intent::TokenMention, content::snapshot(&token));
        }

        if BRAND_RE.is_match(text) {
            return self.gated(m, now, Intent::BrandKeyword, content::promo());
        }

        if m.chat_kind.is_group_like() {
            return Outcome::silent(Intent::GroupSilence);
        }
        self.gated(m, now, Intent::Hint, content::hint(text))
    }

    fn on_command(&self, m: &IncomingMessage, cmd: Command, rest: &str, now: Instant) -> Outcome {
        let args = rest.trim();
        let payload = match cmd {
            Command::Start => content::start(deep_link_token(rest).as_ref()),
            Command::Help => content::help(),
            Command::Links => content::links(),
            Command::Site => content::site(),
            Command::Ggt => content::ggt(),
            Command::Game => content::game(),
            Command::Status => content::status(),
            Command::Patterns => content::patterns(),
            Command::Disclaimer => content::disclaimer(),
            Command::About => content::about(),
            Command::Mind => {
                if args.is_empty() {
                    return self.ungated(m, Intent::Usage(cmd), content::mind_usage());
                }
                return self.gated(m, now, Intent::Command(cmd), content::mind(args));
            }
            Command::Scan => {
                let Some(token) = classify(args, true) else {
                    return self.ungated(m, Intent::Usage(cmd), content::scan_usage());
                };
                return self.gated(m, now, Intent::Command(cmd), content::snapshot(&token));
            }
        };
        self.ungated(m, Intent::Command(cmd), payload)
    }

    fn ungated(&self, m: &IncomingMessage, intent: Intent, payload: ReplyPayload) -> Outcome {
        Outcome::reply(
            intent,
            Outbound::Message {
                chat_id: m.chat_id,
                payload,
            },
        )
    }

    fn gated(
        &self,
        m: &IncomingMessage,
        now: Instant,
        intent: Intent,
        payload: ReplyPayload,
    ) -> Outcome {
        if !self.allow(m.chat_id, m.user_id, now) {
            debug!(chat_id = m.chat_id.0, ?intent, "reply suppressed by cooldown");
            return Outcome::throttled(intent);
        }
        self.ungated(m, intent, payload)
    }

    /// Senders without an identity are never on cooldown.
    fn allow(&self, chat_id: ChatId, user_id: Option<UserId>, now: Instant) -> bool {
        match user_id {
            Some(user_id) => self.cooldown.allow(&CooldownKey { chat_id, user_id }, now),
            None => true,
        }
    }
}
