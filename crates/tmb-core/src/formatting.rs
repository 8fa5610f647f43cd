//! Reply rendering (Telegram HTML plus a plain-text twin for each reply).

use chrono::{DateTime, Utc};

use crate::{mail::types::MailMessage, messaging::reply::Reply, otp::detect_otp};

const TRUNCATION_SUFFIX: &str = "... (truncated)";

/// Telegram's cap on message text, counted in UTF-16 code units.
pub const TELEGRAM_TEXT_LIMIT: usize = 4096;
/// Header fields of a relayed message are cut to this many chars.
pub const HEADER_FIELD_LIMIT: usize = 200;

/// Escape HTML special characters for Telegram HTML parse mode.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Cut `body` to at most `limit` chars, marking the cut.
pub fn truncate_body(body: &str, limit: usize) -> String {
    match body.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{TRUNCATION_SUFFIX}", &body[..cut]),
        None => body.to_string(),
    }
}

fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Cut `body` so that it, suffix included, fits in `max_units` UTF-16 code
/// units.
pub fn truncate_utf16(body: &str, max_units: usize) -> String {
    if utf16_len(body) <= max_units {
        return body.to_string();
    }
    let budget = max_units.saturating_sub(utf16_len(TRUNCATION_SUFFIX));
    let mut used = 0;
    let mut cut = 0;
    for (idx, c) in body.char_indices() {
        used += c.len_utf16();
        if used > budget {
            break;
        }
        cut = idx + c.len_utf8();
    }
    format!("{}{TRUNCATION_SUFFIX}", &body[..cut])
}

/// `2026-10-19T09:01:00+00:00` -> `2026-10-19 09:01 UTC`.
pub fn format_received(created_at: Option<&str>) -> Option<String> {
    let dt = DateTime::parse_from_rfc3339(created_at?).ok()?;
    Some(dt.with_timezone(&Utc).format("%Y-%m-%d %H:%M UTC").to_string())
}

pub fn help_reply() -> Reply {
    Reply::new(
        "📧 <b>Temporary Email Bot</b>\n\n\
/new – Create temp email\n\
/read – Read inbox\n\
/repair &lt;token&gt; – Recover inbox\n\n\
⚠️ Save your recovery token carefully.",
        "📧 Temporary Email Bot\n\n\
/new – Create temp email\n\
/read – Read inbox\n\
/repair <token> – Recover inbox\n\n\
⚠️ Save your recovery token carefully.",
    )
}

pub fn created_reply(address: &str, recovery_token: &str) -> Reply {
    let html = format!(
        "✅ <b>Temp Email Created</b>\n\n\
📮 <code>{}</code>\n\n\
🔑 <b>Permanent Recovery Token</b>\n\
<code>{}</code>\n\n\
Use <code>/repair &lt;token&gt;</code> if bot restarts.",
        escape_html(address),
        escape_html(recovery_token),
    );
    let plain = format!(
        "✅ Temp Email Created\n\n\
📮 {address}\n\n\
🔑 Permanent Recovery Token\n\
{recovery_token}\n\n\
Use /repair <token> if bot restarts."
    );
    Reply::new(html, plain)
}

pub fn recovered_reply(address: &str) -> Reply {
    Reply::new(
        format!(
            "♻️ <b>Inbox recovered successfully</b>\n\n📮 <code>{}</code>",
            escape_html(address)
        ),
        format!("♻️ Inbox recovered successfully\n\n📮 {address}"),
    )
}

/// One relayed inbox message. The OTP is looked for in the full body, before
/// truncation.
pub fn relay_reply(msg: &MailMessage, body_limit: usize) -> Reply {
    let from = truncate_body(msg.from_address().unwrap_or("Unknown"), HEADER_FIELD_LIMIT);
    let subject = truncate_body(
        msg.subject
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("No Subject"),
        HEADER_FIELD_LIMIT,
    );
    let full_body = msg
        .text
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or("No text content");
    let otp = detect_otp(full_body);
    let received = format_received(msg.created_at.as_deref());

    let mut html = format!(
        "📨 <b>From</b>: {}\n📝 <b>Subject</b>: {}\n",
        escape_html(&from),
        escape_html(&subject)
    );
    let mut plain = format!("📨 From: {from}\n📝 Subject: {subject}\n");
    if let Some(ts) = &received {
        html.push_str(&format!("🕒 <b>Received</b>: {ts}\n"));
        plain.push_str(&format!("🕒 Received: {ts}\n"));
    }
    html.push_str("📜 <b>Message</b>:\n");
    plain.push_str("📜 Message:\n");

    let (html_otp, plain_otp) = match otp {
        Some(code) => (
            format!("\n🔐 <b>OTP</b>: <code>{code}</code>"),
            format!("\n🔐 OTP: {code}"),
        ),
        None => (String::new(), String::new()),
    };

    // Telegram measures the text after entity parsing, which is the plain
    // rendering; the body gets whatever room the other lines leave.
    let room = TELEGRAM_TEXT_LIMIT.saturating_sub(utf16_len(&plain) + utf16_len(&plain_otp));
    let body = truncate_utf16(&truncate_body(full_body, body_limit), room);

    html.push_str(&escape_html(&body));
    html.push_str(&html_otp);
    plain.push_str(&body);
    plain.push_str(&plain_otp);

    Reply::new(html, plain)
}
