/// Parse a Link header and extract the URL for the given rel.
///
/// Format: `<https://host/api/v1/courses?page=2>; rel="next", <...>; rel="last"`.
/// A rel attribute may hold several space-separated relation types.
pub fn parse_link_header(header: &str, target_rel: &str) -> Option<String> {
    for entry in header.split(',') {
        let mut url = None;
        let mut matches_rel = false;

        for segment in entry.split(';').map(str::trim) {
            if let Some(inner) = segment
                .strip_prefix('<')
                .and_then(|s| s.strip_suffix('>'))
            {
                url = Some(inner.trim());
            } else if let Some((key, value)) = segment.split_once('=') {
                if key.trim().eq_ignore_ascii_case("rel") {
                    let value = value.trim().trim_matches('"').trim_matches('\'');
                    matches_rel = value
                        .split_whitespace()
                        .any(|rel| rel.eq_ignore_ascii_case(target_rel));
                }
            }
        }

        if let (Some(u), true) = (url, matches_rel) {
            if !u.is_empty() {
                return Some(u.to_string());
            }
        }
    }

    None
}
