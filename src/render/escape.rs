/// Escape the HTML-special characters in `input`.
///
/// Applied to every article-derived value before it reaches a template
/// slot, so article data can never inject markup.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_all_specials() {
        assert_eq!(
            escape_html(r#"<a href="x" y='z'>&"#),
            "&lt;a href=&quot;x&quot; y=&#39;z&#39;&gt;&amp;"
        );
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(escape_html("plain text 123"), "plain text 123");
    }

    #[test]
    fn test_ampersand_escaped_first_not_double_escaped() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn test_script_tag_neutralized() {
        let escaped = escape_html("<script>alert(1)</script>");
        assert!(!escaped.contains("<script>"));
        assert!(escaped.contains("&lt;script&gt;"));
    }
}
