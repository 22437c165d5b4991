//! Single-line rendering of HTTP requests and responses

use super::log_level::LogLevel;

/// Tag given to request and response entries
pub const NETWORK_TAG: &str = "Network";

const MAX_BODY_CHARS: usize = 1024;

pub const SUCCESS_GLYPH: &str = "✅";
pub const REDIRECT_GLYPH: &str = "↪️";
pub const CLIENT_ERROR_GLYPH: &str = "⚠️";
pub const SERVER_ERROR_GLYPH: &str = "🔥";
pub const UNKNOWN_GLYPH: &str = "❓";

/// Glyph for the status class of `status`
pub fn status_glyph(status: u16) -> &'static str {
    match status {
        200..=299 => SUCCESS_GLYPH,
        300..=399 => REDIRECT_GLYPH,
        400..=499 => CLIENT_ERROR_GLYPH,
        500..=599 => SERVER_ERROR_GLYPH,
        _ => UNKNOWN_GLYPH,
    }
}

/// Responses with status 400 and above are logged as warnings
pub fn response_level(status: u16) -> LogLevel {
    if status >= 400 {
        LogLevel::Warning
    } else {
        LogLevel::Debug
    }
}

fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(MAX_BODY_CHARS) {
        Some((cut, _)) => format!("{}…", &body[..cut]),
        None => body.to_string(),
    }
}

/// `🌐 → GET https://… | headers: {Accept: json} | body: …`
pub fn format_request(
    method: &str,
    url: &str,
    headers: Option<&[(&str, &str)]>,
    body: Option<&str>,
) -> String {
    let mut line = format!("🌐 → {} {}", method.to_uppercase(), url);

    if let Some(headers) = headers.filter(|h| !h.is_empty()) {
        let rendered: Vec<String> = headers
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect();
        line.push_str(&format!(" | headers: {{{}}}", rendered.join(", ")));
    }
    if let Some(body) = body.filter(|b| !b.is_empty()) {
        line.push_str(&format!(" | body: {}", truncate_body(body)));
    }
    line
}

/// `⚠️ ← 404 https://… (120ms) | body: …`
pub fn format_response(url: &str, status: u16, elapsed_ms: u64, body: Option<&str>) -> String {
    let mut line = format!(
        "{} ← {} {} ({}ms)",
        status_glyph(status),
        status,
        url,
        elapsed_ms
    );
    if let Some(body) = body.filter(|b| !b.is_empty()) {
        line.push_str(&format!(" | body: {}", truncate_body(body)));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_glyphs() {
        assert_eq!(status_glyph(204), SUCCESS_GLYPH);
        assert_eq!(status_glyph(301), REDIRECT_GLYPH);
        assert_eq!(status_glyph(404), CLIENT_ERROR_GLYPH);
        assert_eq!(status_glyph(503), SERVER_ERROR_GLYPH);
        assert_eq!(status_glyph(101), UNKNOWN_GLYPH);
        assert_eq!(status_glyph(700), UNKNOWN_GLYPH);
    }

    #[test]
    fn test_response_level() {
        assert_eq!(response_level(399), LogLevel::Debug);
        assert_eq!(response_level(400), LogLevel::Warning);
        assert_eq!(response_level(500), LogLevel::Warning);
    }

    #[test]
    fn test_format_request() {
        let line = format_request(
            "post",
            "https://api.example.com/cart",
            Some(&[("Accept", "application/json"), ("X-Trace", "42")][..]),
            Some(r#"{"sku":"A1"}"#),
        );
        assert_eq!(
            line,
            "🌐 → POST https://api.example.com/cart \
             | headers: {Accept: application/json, X-Trace: 42} | body: {\"sku\":\"A1\"}"
        );

        assert_eq!(
            format_request("GET", "https://x", Some(&[][..]), None),
            "🌐 → GET https://x"
        );
    }

    #[test]
    fn test_format_response() {
        let line = format_response("https://x/items", 404, 120, Some("not found"));
        assert_eq!(line, "⚠️ ← 404 https://x/items (120ms) | body: not found");
    }

    #[test]
    fn test_long_body_is_truncated() {
        let body = "é".repeat(MAX_BODY_CHARS + 10);
        let line = format_response("https://x", 200, 1, Some(&body));
        assert!(line.ends_with('…'));
        assert_eq!(line.matches('é').count(), MAX_BODY_CHARS);
    }
}
