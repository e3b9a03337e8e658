pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// `1234567` → `1,234,567`
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Medium date for an ISO timestamp, `—` when absent or unparsable.
pub fn format_date(iso: Option<&str>) -> String {
    iso.and_then(|raw| chrono::DateTime::parse_from_rfc3339(raw).ok())
        .map(|dt| dt.format("%d %b %Y").to_string())
        .unwrap_or_else(|| "—".to_string())
}

/// External link attributes shared by every outbound anchor.
pub fn external_link(href: &str, class: &str, inner_html: &str) -> String {
    format!(
        r#"<a class="{class}" href="{href}" target="_blank" rel="noopener">{inner_html}</a>"#,
        class = class,
        href = html_escape(href),
        inner_html = inner_html,
    )
}
