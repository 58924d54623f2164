use crate::error::ProviderError;
use std::borrow::Cow;

const MAX_API_ERROR_CHARS: usize = 200;

// Markers whose following token is a credential.
const SECRET_MARKERS: [&str; 8] = [
    "Authorization: Bearer ",
    "authorization: bearer ",
    "Authorization: Basic ",
    "authorization: basic ",
    "\"api_key\":\"",
    "\"auth_token\":\"",
    "api_key=",
    "auth_token=",
];

// Telnyx v2 API keys start with `KEY0`.
const SECRET_PREFIXES: [&str; 1] = ["KEY0"];

fn is_secret_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '+' | '/' | '=')
}

fn token_end(input: &str, from: usize) -> usize {
    input[from..]
        .char_indices()
        .find(|&(_, c)| !is_secret_char(c))
        .map_or(input.len(), |(i, _)| from + i)
}

fn redact_after(scrubbed: &mut String, marker: &str, keep_marker: bool) {
    let mut search_from = 0;
    while let Some(rel) = scrubbed[search_from..].find(marker) {
        let start = search_from + rel;
        let content_start = start + marker.len();
        let end = token_end(scrubbed, content_start);

        if end == content_start {
            search_from = content_start;
            continue;
        }

        let redact_from = if keep_marker { content_start } else { start };
        scrubbed.replace_range(redact_from..end, "[REDACTED]");
        search_from = redact_from + "[REDACTED]".len();
    }
}

/// Redact credentials that providers sometimes echo back in error bodies.
pub fn scrub_secret_patterns(input: &str) -> Cow<'_, str> {
    let hit = SECRET_MARKERS
        .iter()
        .chain(SECRET_PREFIXES.iter())
        .any(|pattern| input.contains(pattern));
    if !hit {
        return Cow::Borrowed(input);
    }

    let mut scrubbed = input.to_string();
    for marker in SECRET_MARKERS {
        redact_after(&mut scrubbed, marker, true);
    }
    for prefix in SECRET_PREFIXES {
        redact_after(&mut scrubbed, prefix, false);
    }
    Cow::Owned(scrubbed)
}

/// Scrub secrets and cap the length of a provider error body.
pub fn sanitize_api_error(input: &str) -> String {
    let scrubbed = scrub_secret_patterns(input);
    match scrubbed.char_indices().nth(MAX_API_ERROR_CHARS) {
        Some((idx, _)) => format!("{}...", &scrubbed[..idx]),
        None => scrubbed.into_owned(),
    }
}

/// Build a provider error from a non-success HTTP response.
pub async fn api_error(provider: &'static str, response: reqwest::Response) -> ProviderError {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read provider error body>".to_string());
    let sanitized = sanitize_api_error(&body);
    tracing::error!(provider, %status, body = %sanitized, "provider rejected send request");

    if matches!(status.as_u16(), 401 | 403) {
        ProviderError::Auth { provider }
    } else {
        ProviderError::Request {
            provider,
            message: format!("HTTP {status}: {sanitized}"),
        }
    }
}
