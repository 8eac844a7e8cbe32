//! Inline SVG favicon colored by the run status.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

const OK_COLOR: &str = "#2e7d32";
const ERROR_COLOR: &str = "#c62828";

fn svg(all_ok: bool) -> String {
    let color = if all_ok { OK_COLOR } else { ERROR_COLOR };
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 16 16"><circle cx="8" cy="8" r="7" fill="{color}"/></svg>"#
    )
}

/// `data:` URL of the favicon.
pub fn data_url(all_ok: bool) -> String {
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg(all_ok)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_encodes_status_color() {
        let url = data_url(false);
        let encoded = url.strip_prefix("data:image/svg+xml;base64,").unwrap();
        let decoded = String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap();
        assert!(decoded.contains(ERROR_COLOR));
        assert_ne!(data_url(true), url);
    }
}
