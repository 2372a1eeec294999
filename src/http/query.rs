use url::form_urlencoded;

/// Re-escapes every query value so payload characters cannot corrupt the
/// request line. Keys, the path, and pairs that are not exactly `key=value`
/// are left untouched.
#[must_use]
pub fn escape_url_query(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_owned();
    };

    let mut escaped = String::with_capacity(url.len().saturating_add(16));
    escaped.push_str(base);
    escaped.push('?');
    for (idx, pair) in query.split('&').enumerate() {
        if idx > 0 {
            escaped.push('&');
        }
        let mut parts = pair.split('=');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(key), Some(value), None) => {
                escaped.push_str(key);
                escaped.push('=');
                escaped.push_str(&escape_query_value(value));
            }
            _ => escaped.push_str(pair),
        }
    }
    escaped
}

// form_urlencoded writes spaces as '+' and a literal '+' as %2B, so every
// remaining '+' is a space.
fn escape_query_value(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
