/// Windows-safe export filename: `{sanitized_prefix}-{timestamp}.{extension}`.
///
/// The timestamp is whatever the caller stamps the run with (the host
/// supplies wall-clock time); colons and dots inside it are folded into
/// dashes so the result stays portable.
pub fn export_filename(prefix: &str, timestamp_utc: &str, extension: &str) -> String {
    let prefix = sanitize(prefix, "export");
    let timestamp = sanitize(&timestamp_utc.replace([':', '.'], "-"), "0");
    format!("{prefix}-{timestamp}.{extension}")
}

fn sanitize(input: &str, fallback: &str) -> String {
    let cleaned: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim_matches(&['_', ' ', '.'][..]);

    // Collapse runs of underscores left behind by replacement.
    let mut compacted = String::with_capacity(cleaned.len());
    let mut prev_underscore = false;
    for c in cleaned.chars() {
        if c == '_' {
            if !prev_underscore {
                compacted.push(c);
            }
            prev_underscore = true;
        } else {
            compacted.push(c);
            prev_underscore = false;
        }
    }

    if compacted.is_empty() {
        compacted = fallback.to_string();
    }
    if compacted.len() > 80 {
        compacted.truncate(80);
    }
    if is_reserved_windows_name(&compacted) {
        compacted.push('_');
    }
    compacted
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}
