//! Nesting-aware splitting of comma-separated lists
//!
//! Shared by the signature parser (parameter lists) and the value
//! converter (array/tuple literals). Parenthesis and bracket depth are
//! tracked independently; quoted runs pass everything through until the
//! matching unescaped quote.

use super::error::AbiError;

/// Split `input` on top-level commas, trimming each part.
///
/// A comma splits only when both the `()` and `[]` depths are zero and no
/// quote is open. A quote preceded by a backslash does not close the
/// string. Empty input yields an empty vec; a trailing comma does not
/// produce a trailing empty entry.
pub fn split_top_level(input: &str) -> Result<Vec<String>, AbiError> {
    let mut out = Vec::new();
    let mut buf = String::new();

    let mut depth_paren = 0usize;
    let mut depth_brack = 0usize;
    let mut in_str: Option<char> = None;
    let mut prev: Option<char> = None;

    for c in input.chars() {
        if let Some(quote) = in_str {
            buf.push(c);
            if c == quote && prev != Some('\\') {
                in_str = None;
            }
            prev = Some(c);
            continue;
        }

        match c {
            '"' | '\'' => {
                in_str = Some(c);
                buf.push(c);
            }
            '(' => {
                depth_paren += 1;
                buf.push(c);
            }
            ')' => {
                if depth_paren == 0 {
                    return Err(AbiError::MalformedInput(format!(
                        "unbalanced ')' in {input:?}"
                    )));
                }
                depth_paren -= 1;
                buf.push(c);
            }
            '[' => {
                depth_brack += 1;
                buf.push(c);
            }
            ']' => {
                if depth_brack == 0 {
                    return Err(AbiError::MalformedInput(format!(
                        "unbalanced ']' in {input:?}"
                    )));
                }
                depth_brack -= 1;
                buf.push(c);
            }
            ',' if depth_paren == 0 && depth_brack == 0 => {
                out.push(buf.trim().to_string());
                buf.clear();
            }
            _ => buf.push(c),
        }
        prev = Some(c);
    }

    if in_str.is_some() {
        return Err(AbiError::MalformedInput(format!(
            "unclosed string in {input:?}"
        )));
    }
    if depth_paren != 0 || depth_brack != 0 {
        return Err(AbiError::MalformedInput(format!(
            "unbalanced nesting in {input:?}"
        )));
    }

    let last = buf.trim();
    if !last.is_empty() {
        out.push(last.to_string());
    }
    Ok(out)
}

/// Parse `[a,b,...]` into its top-level items.
pub fn bracket_list(input: &str) -> Result<Vec<String>, AbiError> {
    enclosed_list(input, '[', ']')
}

/// Parse `(a,b,...)` into its top-level items.
pub fn paren_list(input: &str) -> Result<Vec<String>, AbiError> {
    enclosed_list(input, '(', ')')
}

fn enclosed_list(input: &str, open: char, close: char) -> Result<Vec<String>, AbiError> {
    let s = input.trim();
    if s.len() < 2 || !s.starts_with(open) || !s.ends_with(close) {
        return Err(AbiError::MalformedInput(format!(
            "expected {open}...{close} around {input:?}"
        )));
    }
    let inner = s[open.len_utf8()..s.len() - close.len_utf8()].trim();
    if inner.is_empty() {
        return Ok(Vec::new());
    }
    split_top_level(inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_flat() {
        assert_eq!(split_top_level("a,b,c").unwrap(), vec!["a", "b", "c"]);
        assert_eq!(split_top_level(" a , b ").unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_split_empty_is_empty_vec() {
        assert!(split_top_level("").unwrap().is_empty());
        assert!(split_top_level("   ").unwrap().is_empty());
    }

    #[test]
    fn test_split_respects_nesting() {
        assert_eq!(split_top_level("(a,b),c").unwrap(), vec!["(a,b)", "c"]);
        assert_eq!(
            split_top_level("[1,2],(3,[4,5]),6").unwrap(),
            vec!["[1,2]", "(3,[4,5])", "6"]
        );
    }

    #[test]
    fn test_split_respects_quotes() {
        assert_eq!(
            split_top_level(r#""a,b",c"#).unwrap(),
            vec![r#""a,b""#, "c"]
        );
        assert_eq!(
            split_top_level(r#"'x]y',"(",z"#).unwrap(),
            vec!["'x]y'", r#""(""#, "z"]
        );
        // escaped quote stays inside the string
        assert_eq!(
            split_top_level(r#""a\",b",c"#).unwrap(),
            vec![r#""a\",b""#, "c"]
        );
    }

    #[test]
    fn test_split_unbalanced() {
        assert!(matches!(
            split_top_level("a)b"),
            Err(AbiError::MalformedInput(_))
        ));
        assert!(matches!(
            split_top_level("(a,b"),
            Err(AbiError::MalformedInput(_))
        ));
        assert!(matches!(
            split_top_level("a]b"),
            Err(AbiError::MalformedInput(_))
        ));
        assert!(matches!(
            split_top_level("\"abc"),
            Err(AbiError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_split_trailing_comma() {
        assert_eq!(split_top_level("a,b,").unwrap(), vec!["a", "b"]);
        // interior empty slots are preserved
        assert_eq!(split_top_level("a,,b").unwrap(), vec!["a", "", "b"]);
    }

    #[test]
    fn test_bracket_list() {
        assert_eq!(bracket_list("[1,2,3]").unwrap(), vec!["1", "2", "3"]);
        assert_eq!(
            bracket_list("[(a,b),[c,d]]").unwrap(),
            vec!["(a,b)", "[c,d]"]
        );
        assert!(bracket_list("[]").unwrap().is_empty());
        assert!(bracket_list("1,2").is_err());
    }

    #[test]
    fn test_paren_list() {
        assert_eq!(paren_list("(x, y)").unwrap(), vec!["x", "y"]);
        assert!(paren_list("x,y").is_err());
    }
}
