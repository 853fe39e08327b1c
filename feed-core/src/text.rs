//! Plain-text rendering of post markup.
//!
//! List rows and previews show post titles and bodies as plain text. The
//! remote delivers both as rendered HTML, so this module strips tags,
//! decodes the entities WordPress commonly emits, and normalizes
//! whitespace. It is a lenient single-pass scanner, not an HTML parser:
//! malformed markup degrades to readable text instead of failing.

/// Longest entity body we bother scanning, e.g. `#1114111` in `&#1114111;`.
const MAX_ENTITY_LEN: usize = 12;

/// Render markup down to a single line of plain text.
///
/// Tags are removed, known entities are decoded, whitespace runs collapse
/// to a single space, and the result is trimmed. Unknown entities and
/// bare ampersands pass through verbatim.
///
/// ```
/// use feedsync_core::strip_markup;
///
/// assert_eq!(strip_markup("<p>Hello <b>World</b></p>"), "Hello World");
/// ```
pub fn strip_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_space = false;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '<' => {
                // Skip the tag body. A dangling '<' with no closing '>'
                // swallows the rest of the input, like lenient renderers do.
                for c in chars.by_ref() {
                    if c == '>' {
                        break;
                    }
                }
            }
            '&' => {
                let mut name = String::new();
                let mut terminated = false;
                while let Some(&c) = chars.peek() {
                    if c == ';' {
                        chars.next();
                        terminated = true;
                        break;
                    }
                    if name.len() >= MAX_ENTITY_LEN || c == '&' || c == '<' || c.is_whitespace() {
                        break;
                    }
                    name.push(c);
                    chars.next();
                }

                match decode_entity(&name) {
                    Some(decoded) if terminated => {
                        push_plain(&mut out, &mut pending_space, decoded);
                    }
                    _ => {
                        // Not a recognizable entity: emit what we consumed.
                        push_plain(&mut out, &mut pending_space, '&');
                        for c in name.chars() {
                            push_plain(&mut out, &mut pending_space, c);
                        }
                        if terminated {
                            push_plain(&mut out, &mut pending_space, ';');
                        }
                    }
                }
            }
            c => push_plain(&mut out, &mut pending_space, c),
        }
    }

    out
}

/// Append one character, collapsing whitespace runs and trimming the ends.
fn push_plain(out: &mut String, pending_space: &mut bool, c: char) {
    if c.is_whitespace() {
        *pending_space = !out.is_empty();
        return;
    }
    if *pending_space {
        out.push(' ');
        *pending_space = false;
    }
    out.push(c);
}

/// Decode one entity body (the text between `&` and `;`).
fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        "hellip" => Some('\u{2026}'),
        _ => {
            let body = name.strip_prefix('#')?;
            let code = match body.strip_prefix('x').or_else(|| body.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => body.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_nested_tags() {
        assert_eq!(strip_markup("<p>Hello <b>World</b></p>"), "Hello World");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(strip_markup("Hello World"), "Hello World");
    }

    #[test]
    fn collapses_whitespace_and_trims() {
        assert_eq!(strip_markup("  Hello\n\n\t World  "), "Hello World");
    }

    #[test]
    fn block_markup_with_newlines_reads_naturally() {
        assert_eq!(strip_markup("<p>One</p>\n<p>Two</p>"), "One Two");
    }

    #[test]
    fn drops_tag_attributes() {
        assert_eq!(
            strip_markup(r#"<a href="https://example.com" rel="nofollow">link</a>"#),
            "link"
        );
    }

    #[test]
    fn decodes_named_entities() {
        assert_eq!(strip_markup("Fish &amp; Chips &lt;fresh&gt;"), "Fish & Chips <fresh>");
        assert_eq!(strip_markup("&quot;sure&quot; &apos;ok&apos;"), "\"sure\" 'ok'");
    }

    #[test]
    fn nbsp_collapses_like_a_space() {
        assert_eq!(strip_markup("a&nbsp;&nbsp;b"), "a b");
        assert_eq!(strip_markup("&nbsp;edge&nbsp;"), "edge");
    }

    #[test]
    fn decodes_numeric_entities() {
        assert_eq!(strip_markup("It&#8217;s done"), "It\u{2019}s done");
        assert_eq!(strip_markup("more&#x2026;"), "more\u{2026}");
        assert_eq!(strip_markup("more&hellip;"), "more\u{2026}");
    }

    #[test]
    fn unknown_entities_pass_through() {
        assert_eq!(strip_markup("&copy; 2024"), "&copy; 2024");
    }

    #[test]
    fn bare_ampersand_passes_through() {
        assert_eq!(strip_markup("AT&T works"), "AT&T works");
        assert_eq!(strip_markup("fish & chips"), "fish & chips");
    }

    #[test]
    fn invalid_numeric_entities_pass_through() {
        assert_eq!(strip_markup("&#xZZ;"), "&#xZZ;");
        assert_eq!(strip_markup("&#99999999;"), "&#99999999;");
    }

    #[test]
    fn unterminated_tag_swallows_the_rest() {
        assert_eq!(strip_markup("Hello <a href="), "Hello");
    }

    #[test]
    fn markup_only_input_renders_empty() {
        assert_eq!(strip_markup("<p></p><br/>"), "");
        assert_eq!(strip_markup(""), "");
    }
}
