//! Function signature parsing
//!
//! Two input shapes are accepted: a bare `name(type,type,...)` signature,
//! and a full Solidity declaration (anything containing the `function`
//! keyword), possibly spanning lines and carrying comments, parameter
//! names, data-location qualifiers and a returns clause.

use super::error::AbiError;
use super::lexer;
use super::types::TypeDescriptor;

/// A parsed function head: name plus ordered parameter types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    pub name: String,
    pub params: Vec<TypeDescriptor>,
}

impl FunctionSignature {
    /// Parse either input shape; the Solidity path is taken whenever the
    /// `function` keyword appears.
    pub fn parse(input: &str) -> Result<Self, AbiError> {
        let trimmed = input.trim();
        if trimmed.contains("function") {
            Self::parse_declaration(trimmed)
        } else {
            Self::parse_bare(trimmed)
        }
    }

    /// Canonical string form, `name(type1,type2,...)`.
    pub fn canonical(&self) -> String {
        let types: Vec<String> = self.params.iter().map(TypeDescriptor::canonical).collect();
        format!("{}({})", self.name, types.join(","))
    }

    fn parse_bare(signature: &str) -> Result<Self, AbiError> {
        let open = signature
            .find('(')
            .ok_or_else(|| AbiError::InvalidSignature(signature.to_string()))?;
        if !signature.ends_with(')') {
            return Err(AbiError::InvalidSignature(signature.to_string()));
        }
        let name = &signature[..open];
        if !is_identifier(name) {
            return Err(AbiError::InvalidSignature(signature.to_string()));
        }
        let inside = signature[open + 1..signature.len() - 1].trim();
        let params = if inside.is_empty() {
            Vec::new()
        } else {
            lexer::split_top_level(inside)?
                .iter()
                .map(|item| TypeDescriptor::parse(item))
                .collect::<Result<Vec<_>, _>>()?
        };
        Ok(FunctionSignature {
            name: name.to_string(),
            params,
        })
    }

    fn parse_declaration(def: &str) -> Result<Self, AbiError> {
        let stripped = strip_comments(def);
        let (name, after_paren) = find_function_head(&stripped)
            .ok_or_else(|| AbiError::InvalidDeclaration(def.to_string()))?;
        let raw_params = take_until_matching_paren(after_paren)
            .ok_or_else(|| AbiError::InvalidDeclaration(def.to_string()))?;

        let raw_params = raw_params.trim();
        let params = if raw_params.is_empty() {
            Vec::new()
        } else {
            lexer::split_top_level(raw_params)?
                .iter()
                .map(|p| parameter_type_string(p).and_then(|t| TypeDescriptor::parse(&t)))
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(FunctionSignature { name, params })
    }
}

/// Reduce one declaration parameter (`uint256 amount`, `bytes memory data`,
/// `(address,uint96)[] calldata pairs`) to its bare type string.
pub fn parameter_type_string(param: &str) -> Result<String, AbiError> {
    let trimmed = param.trim();
    if trimmed.is_empty() {
        return Err(AbiError::EmptyParameter(param.to_string()));
    }

    // collapse whitespace and drop location/mutability qualifier tokens
    let tokens: Vec<&str> = trimmed
        .split_whitespace()
        .filter(|t| !matches!(*t, "memory" | "calldata" | "storage" | "payable"))
        .collect();
    if tokens.is_empty() {
        return Err(AbiError::EmptyParameter(param.to_string()));
    }
    let collapsed = tokens.join(" ");

    if collapsed.starts_with('(') {
        return take_tuple_type(&collapsed)
            .ok_or_else(|| AbiError::UnsupportedType(param.to_string()));
    }

    // otherwise the first token is the type, a trailing name is discarded
    Ok(tokens[0].to_string())
}

/// Strip `/* ... */` (best-effort: an unterminated block truncates the
/// rest) and `// ...` line comments.
fn strip_comments(s: &str) -> String {
    let mut out = s.to_string();
    while let Some(start) = out.find("/*") {
        match out[start + 2..].find("*/") {
            Some(end) => out.replace_range(start..start + 2 + end + 2, ""),
            None => {
                out.truncate(start);
                break;
            }
        }
    }
    out.lines()
        .map(|line| match line.find("//") {
            Some(idx) => &line[..idx],
            None => line,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Locate `function <name> (` and return the name plus the text after the
/// opening parenthesis.
fn find_function_head(s: &str) -> Option<(String, &str)> {
    let mut search_from = 0;
    while let Some(rel) = s[search_from..].find("function") {
        let at = search_from + rel;
        search_from = at + "function".len();

        // keyword boundary on the left
        if at > 0 {
            let before = s[..at].chars().next_back().unwrap();
            if before.is_alphanumeric() || before == '_' {
                continue;
            }
        }
        let rest = &s[at + "function".len()..];
        if !rest.starts_with(char::is_whitespace) {
            continue;
        }
        let rest = rest.trim_start();
        let name_end = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        let name = &rest[..name_end];
        if !is_identifier(name) {
            continue;
        }
        let after_name = rest[name_end..].trim_start();
        if let Some(after_paren) = after_name.strip_prefix('(') {
            return Some((name.to_string(), after_paren));
        }
    }
    None
}

/// With the opening parenthesis already consumed, return the content up to
/// its matching close, honoring quotes.
fn take_until_matching_paren(s: &str) -> Option<&str> {
    let mut depth = 1usize;
    let mut in_str: Option<char> = None;
    let mut prev: Option<char> = None;

    for (i, c) in s.char_indices() {
        if let Some(quote) = in_str {
            if c == quote && prev != Some('\\') {
                in_str = None;
            }
            prev = Some(c);
            continue;
        }
        match c {
            '"' | '\'' => in_str = Some(c),
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[..i]);
                }
            }
            _ => {}
        }
        prev = Some(c);
    }
    None
}

/// Take a leading balanced `(...)` span plus any immediate `[..]` suffixes.
fn take_tuple_type(s: &str) -> Option<String> {
    let mut depth = 0usize;
    let mut end = None;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    end = Some(i + 1);
                    break;
                }
            }
            _ => {}
        }
    }
    let mut end = end?;
    let bytes = s.as_bytes();
    while end < s.len() && bytes[end] == b'[' {
        let close = s[end..].find(']')?;
        end += close + 1;
    }
    Some(s[..end].trim().to_string())
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
