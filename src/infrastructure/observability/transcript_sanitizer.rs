const MAX_VISIBLE_CHARS: usize = 80;

const SECRET_MARKERS: [&str; 4] = ["Bearer ", "api_key=", "password=", "token="];

/// Renders transcript text for log lines: one line, truncated on a character
/// boundary, with credentials redacted.
pub fn sanitize_transcript(text: &str) -> String {
    let flattened = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flattened.is_empty() {
        return String::from("[EMPTY]");
    }

    let total_chars = flattened.chars().count();
    let visible = if total_chars > MAX_VISIBLE_CHARS {
        let head: String = flattened.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{head}... ({total_chars} chars total)")
    } else {
        flattened
    };

    SECRET_MARKERS
        .iter()
        .fold(visible, |acc, marker| redact_after(&acc, marker))
}

fn redact_after(text: &str, marker: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(idx) = rest.find(marker) {
        let value_start = idx + marker.len();
        result.push_str(&rest[..value_start]);
        result.push_str("[REDACTED]");
        let value_len = rest[value_start..]
            .find(|c: char| c.is_whitespace() || c == '&' || c == '"')
            .unwrap_or(rest.len() - value_start);
        rest = &rest[value_start + value_len..];
    }
    result.push_str(rest);
    result
}
