use std::sync::OnceLock;

use regex::Regex;

static OTP_RE: OnceLock<Regex> = OnceLock::new();

/// First standalone run of 4 to 8 digits in `text`, if any.
///
/// A heuristic for one-time codes: it does not know whether the digits are
/// actually a code, only that they look like one.
pub fn detect_otp(text: &str) -> Option<&str> {
    if text.is_empty() {
        return None;
    }
    let re = OTP_RE.get_or_init(|| Regex::new(r"\b\d{4,8}\b").expect("valid regex"));
    re.find(text).map(|m| m.as_str())
}
