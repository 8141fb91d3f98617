use std::borrow::Cow;

const SCRIPT_SCHEME: &str = "javascript:";

/// Strip markup, `javascript:` schemes and control characters from a
/// user-supplied text field, then trim surrounding whitespace.
///
/// Returns `Cow::Borrowed` when nothing needed removing.
#[must_use]
pub fn sanitize_text(input: &str) -> Cow<'_, str> {
    if !needs_sanitization(input) {
        return Cow::Borrowed(input.trim());
    }

    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    for c in input.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            '>' => {}
            c if c.is_control() => {}
            c => out.push(c),
        }
    }

    let out = remove_script_schemes(&out);
    Cow::Owned(out.trim().to_string())
}

fn needs_sanitization(input: &str) -> bool {
    input
        .chars()
        .any(|c| c == '<' || c == '>' || c.is_control())
        || input.to_ascii_lowercase().contains(SCRIPT_SCHEME)
}

fn remove_script_schemes(text: &str) -> String {
    let mut out = text.to_string();
    while let Some(pos) = out.to_ascii_lowercase().find(SCRIPT_SCHEME) {
        out.replace_range(pos..pos + SCRIPT_SCHEME.len(), "");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_is_borrowed() {
        assert!(matches!(sanitize_text("Whitefield"), Cow::Borrowed("Whitefield")));
        assert!(matches!(sanitize_text("  HSR Layout "), Cow::Borrowed("HSR Layout")));
    }

    #[test]
    fn test_strips_script_tags() {
        assert_eq!(sanitize_text("<script>alert('xss')</script>Koramangala"), "alert('xss')Koramangala");
        assert_eq!(sanitize_text("<b>Jayanagar</b>"), "Jayanagar");
    }

    #[test]
    fn test_strips_script_scheme_any_case() {
        assert_eq!(sanitize_text("JavaScript:void(0)"), "void(0)");
        assert_eq!(sanitize_text("javascript:javascript:x"), "x");
    }

    #[test]
    fn test_strips_control_characters() {
        assert_eq!(sanitize_text("Hebbal\u{0}\u{1b}[2J"), "Hebbal[2J");
    }

    #[test]
    fn test_unicode_survives() {
        assert_eq!(sanitize_text("Bengaluru ₹ <i>नगर</i>"), "Bengaluru ₹ नगर");
    }
}
