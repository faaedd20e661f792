//! Forgiving tag-soup tokenizer with a constrained ASCII tag-name character set.
//!
//! Supported tag/attribute-name characters: `[A-Za-z0-9:_-]`. This is not an
//! HTML5 state machine; the editor only needs a tree faithful enough to
//! target and mutate, so spec-grade error recovery is out of scope.

use crate::types::Token;
use memchr::memchr;

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";

pub(crate) fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn is_name_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-' || c == b'_' || c == b':'
}

fn starts_with_ignore_ascii_case_at(haystack: &[u8], start: usize, needle: &[u8]) -> bool {
    haystack.len() >= start + needle.len()
        && haystack[start..start + needle.len()].eq_ignore_ascii_case(needle)
}

/// Find the close tag of a rawtext element (`</script` / `</style`) starting
/// anywhere in `haystack`. Returns (body_end, resume_index).
fn find_rawtext_close(haystack: &str, name: &str) -> Option<(usize, usize)> {
    let bytes = haystack.as_bytes();
    let len = bytes.len();
    let mut i = 0;
    while i < len {
        let rel = memchr(b'<', &bytes[i..])?;
        i += rel;
        if i + 2 + name.len() > len {
            return None;
        }
        if bytes[i + 1] == b'/' && starts_with_ignore_ascii_case_at(bytes, i + 2, name.as_bytes()) {
            let mut k = i + 2 + name.len();
            while k < len && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k < len && bytes[k] == b'>' {
                return Some((i, k + 1));
            }
        }
        i += 1;
    }
    None
}

/// Tokenize markup into a flat token list. Tag and attribute names are
/// lower-cased; text and attribute values are kept verbatim.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let bytes = input.as_bytes();
    let mut i = 0;
    // Slice endpoints are always ASCII structural bytes, so they stay on
    // UTF-8 char boundaries.
    while i < bytes.len() {
        if bytes[i] != b'<' {
            let start = i;
            match memchr(b'<', &bytes[i..]) {
                Some(rel) => i += rel,
                None => i = bytes.len(),
            }
            let text = &input[start..i];
            if !text.is_empty() {
                out.push(Token::Text(text.to_string()));
            }
            continue;
        }
        if input[i..].starts_with(COMMENT_START) {
            let body_start = i + COMMENT_START.len();
            if let Some(end) = input[body_start..].find(COMMENT_END) {
                out.push(Token::Comment(input[body_start..body_start + end].to_string()));
                i = body_start + end + COMMENT_END.len();
            } else {
                out.push(Token::Comment(input[body_start..].to_string()));
                i = bytes.len();
            }
            continue;
        }
        if starts_with_ignore_ascii_case_at(bytes, i, b"<!doctype") {
            let rest = &input[i + 2..];
            if let Some(end) = rest.find('>') {
                out.push(Token::Doctype(rest[..end].trim().to_string()));
                i += 2 + end + 1;
                continue;
            }
            break;
        }
        if i + 2 <= bytes.len() && bytes[i + 1] == b'/' {
            let start = i + 2;
            let mut j = start;
            while j < bytes.len() && is_name_char(bytes[j]) {
                j += 1;
            }
            let name = input[start..j].to_ascii_lowercase();
            while j < bytes.len() && bytes[j] != b'>' {
                j += 1;
            }
            if j < bytes.len() {
                j += 1;
            }
            if !name.is_empty() {
                out.push(Token::EndTag(name));
            }
            i = j;
            continue;
        }
        // start tag
        let start = i + 1;
        let mut j = start;
        while j < bytes.len() && is_name_char(bytes[j]) {
            j += 1;
        }
        if j == start {
            // stray '<': treat as text
            out.push(Token::Text("<".to_string()));
            i += 1;
            continue;
        }
        let name = input[start..j].to_ascii_lowercase();
        let len = bytes.len();
        let mut k = j;
        let mut attributes: Vec<(String, Option<String>)> = Vec::new();
        let mut self_closing = false;

        loop {
            while k < len && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k >= len {
                break;
            }
            if bytes[k] == b'>' {
                k += 1;
                break;
            }
            if bytes[k] == b'/' {
                if k + 1 < len && bytes[k + 1] == b'>' {
                    self_closing = true;
                    k += 2;
                    break;
                }
                k += 1;
                continue;
            }
            let name_start = k;
            while k < len && is_name_char(bytes[k]) {
                k += 1;
            }
            if name_start == k {
                k += 1;
                continue;
            }
            let attribute_name = input[name_start..k].to_ascii_lowercase();

            while k < len && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            let value: Option<String> = if k < len && bytes[k] == b'=' {
                k += 1;
                while k < len && bytes[k].is_ascii_whitespace() {
                    k += 1;
                }
                if k < len && (bytes[k] == b'"' || bytes[k] == b'\'') {
                    let quote = bytes[k];
                    k += 1;
                    let vstart = k;
                    while k < len && bytes[k] != quote {
                        k += 1;
                    }
                    let raw = input[vstart..k].to_string();
                    if k < len {
                        k += 1;
                    }
                    Some(raw)
                } else {
                    let vstart = k;
                    while k < len && !bytes[k].is_ascii_whitespace() && bytes[k] != b'>' {
                        if bytes[k] == b'/' && k + 1 < len && bytes[k + 1] == b'>' {
                            break;
                        }
                        k += 1;
                    }
                    Some(input[vstart..k].to_string())
                }
            } else {
                None
            };
            attributes.push((attribute_name, value));
        }

        if is_void_element(&name) {
            self_closing = true;
        }

        let rawtext = (name == "script" || name == "style") && !self_closing;
        out.push(Token::StartTag {
            name: name.clone(),
            attributes,
            self_closing,
        });

        if rawtext {
            match find_rawtext_close(&input[k..], &name) {
                Some((body_end, resume)) => {
                    if body_end > 0 {
                        out.push(Token::Text(input[k..k + body_end].to_string()));
                    }
                    out.push(Token::EndTag(name));
                    i = k + resume;
                }
                None => {
                    if k < len {
                        out.push(Token::Text(input[k..].to_string()));
                    }
                    out.push(Token::EndTag(name));
                    i = len;
                }
            }
            continue;
        }

        i = k;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_lowercases_tag_and_attribute_names() {
        let tokens = tokenize(r#"<DiV ID="a" Class=b></DIV>"#);
        assert!(matches!(
            &tokens[0],
            Token::StartTag { name, attributes, .. }
                if name == "div"
                    && attributes[0] == ("id".to_string(), Some("a".to_string()))
                    && attributes[1] == ("class".to_string(), Some("b".to_string()))
        ));
        assert!(matches!(&tokens[1], Token::EndTag(name) if name == "div"));
    }

    #[test]
    fn tokenize_preserves_utf8_text() {
        let tokens = tokenize("<p>120\u{d7}32</p>");
        assert!(tokens
            .iter()
            .any(|t| matches!(t, Token::Text(s) if s == "120\u{d7}32")));
    }

    #[test]
    fn tokenize_marks_void_elements_self_closing() {
        let tokens = tokenize("<br><img src=x>");
        assert!(tokens
            .iter()
            .all(|t| matches!(t, Token::StartTag { self_closing, .. } if *self_closing)));
    }

    #[test]
    fn tokenize_keeps_style_rawtext_intact() {
        let tokens = tokenize("<style>a { color: red; } /* < not a tag */</style>");
        assert!(matches!(
            &tokens[1],
            Token::Text(body) if body == "a { color: red; } /* < not a tag */"
        ));
        assert!(matches!(&tokens[2], Token::EndTag(name) if name == "style"));
    }

    #[test]
    fn tokenize_closes_unterminated_rawtext() {
        let tokens = tokenize("<script>let x = 1;");
        assert!(matches!(&tokens[2], Token::EndTag(name) if name == "script"));
    }

    #[test]
    fn tokenize_handles_comments_and_doctype() {
        let tokens = tokenize("<!DOCTYPE html><!-- hi --><p>x</p>");
        assert!(matches!(&tokens[0], Token::Doctype(s) if s == "DOCTYPE html"));
        assert!(matches!(&tokens[1], Token::Comment(s) if s == " hi "));
    }

    #[test]
    fn tokenize_handles_unquoted_and_bare_attributes() {
        let tokens = tokenize("<input type=checkbox checked>");
        assert!(matches!(
            &tokens[0],
            Token::StartTag { attributes, .. }
                if attributes[0] == ("type".to_string(), Some("checkbox".to_string()))
                    && attributes[1] == ("checked".to_string(), None)
        ));
    }
}
