//! Structural type descriptors for Solidity-style type strings

use std::fmt;

use super::error::AbiError;
use super::lexer;

/// Resolved form of a type string such as `uint256`, `address[]` or
/// `(address,uint256)[3]`.
///
/// `Array` is the fixed-length form, `Slice` the dynamic one. Tuple fields
/// keep declaration order; the order drives both the encoding layout and
/// positional argument matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    Address,
    Bool,
    String,
    Bytes,
    /// `bytesN`, width in 1..=32.
    FixedBytes(usize),
    /// `intN`, bit width in 8..=256 and divisible by 8.
    Int(usize),
    /// `uintN`, same width rule as `Int`.
    Uint(usize),
    Array(Box<TypeDescriptor>, usize),
    Slice(Box<TypeDescriptor>),
    Tuple(Vec<TypeDescriptor>),
}

impl TypeDescriptor {
    /// Resolve a single canonical type string.
    ///
    /// Bare `uint`/`int` are accepted as the 256-bit widths; the canonical
    /// rendering always carries the explicit width.
    pub fn parse(input: &str) -> Result<Self, AbiError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(AbiError::UnsupportedType(input.to_string()));
        }

        // Trailing array suffix binds last: `T[]` / `T[N]`.
        if s.ends_with(']') {
            let open = s
                .rfind('[')
                .ok_or_else(|| AbiError::UnsupportedType(input.to_string()))?;
            let elem = Self::parse(&s[..open])?;
            let len = s[open + 1..s.len() - 1].trim();
            if len.is_empty() {
                return Ok(TypeDescriptor::Slice(Box::new(elem)));
            }
            let n: usize = len
                .parse()
                .map_err(|_| AbiError::UnsupportedType(input.to_string()))?;
            if n == 0 {
                return Err(AbiError::UnsupportedType(input.to_string()));
            }
            return Ok(TypeDescriptor::Array(Box::new(elem), n));
        }

        if s.starts_with('(') && s.ends_with(')') {
            let items = lexer::paren_list(s)?;
            if items.is_empty() {
                return Err(AbiError::UnsupportedType(input.to_string()));
            }
            let fields = items
                .iter()
                .map(|item| Self::parse(item))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(TypeDescriptor::Tuple(fields));
        }

        match s {
            "address" => return Ok(TypeDescriptor::Address),
            "bool" => return Ok(TypeDescriptor::Bool),
            "string" => return Ok(TypeDescriptor::String),
            "bytes" => return Ok(TypeDescriptor::Bytes),
            _ => {}
        }

        if let Some(width) = s.strip_prefix("bytes") {
            let n: usize = width
                .parse()
                .map_err(|_| AbiError::UnsupportedType(input.to_string()))?;
            if !(1..=32).contains(&n) {
                return Err(AbiError::UnsupportedType(input.to_string()));
            }
            return Ok(TypeDescriptor::FixedBytes(n));
        }
        if let Some(width) = s.strip_prefix("uint") {
            return Ok(TypeDescriptor::Uint(parse_bit_width(width, input)?));
        }
        if let Some(width) = s.strip_prefix("int") {
            return Ok(TypeDescriptor::Int(parse_bit_width(width, input)?));
        }

        Err(AbiError::UnsupportedType(input.to_string()))
    }

    /// Canonical ABI notation, e.g. `(address,uint256)[]`.
    pub fn canonical(&self) -> String {
        match self {
            TypeDescriptor::Address => "address".to_string(),
            TypeDescriptor::Bool => "bool".to_string(),
            TypeDescriptor::String => "string".to_string(),
            TypeDescriptor::Bytes => "bytes".to_string(),
            TypeDescriptor::FixedBytes(n) => format!("bytes{n}"),
            TypeDescriptor::Int(bits) => format!("int{bits}"),
            TypeDescriptor::Uint(bits) => format!("uint{bits}"),
            TypeDescriptor::Array(elem, n) => format!("{}[{n}]", elem.canonical()),
            TypeDescriptor::Slice(elem) => format!("{}[]", elem.canonical()),
            TypeDescriptor::Tuple(fields) => {
                let inner: Vec<String> = fields.iter().map(TypeDescriptor::canonical).collect();
                format!("({})", inner.join(","))
            }
        }
    }

    /// Whether the encoding of this type lives in the tail region.
    pub fn is_dynamic(&self) -> bool {
        match self {
            TypeDescriptor::String | TypeDescriptor::Bytes | TypeDescriptor::Slice(_) => true,
            TypeDescriptor::Array(elem, _) => elem.is_dynamic(),
            TypeDescriptor::Tuple(fields) => fields.iter().any(TypeDescriptor::is_dynamic),
            _ => false,
        }
    }

    /// Size in bytes this type occupies in the head of its enclosing tuple.
    pub(crate) fn head_size(&self) -> usize {
        if self.is_dynamic() {
            return 32;
        }
        match self {
            TypeDescriptor::Array(elem, n) => n * elem.head_size(),
            TypeDescriptor::Tuple(fields) => fields.iter().map(TypeDescriptor::head_size).sum(),
            _ => 32,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

fn parse_bit_width(width: &str, original: &str) -> Result<usize, AbiError> {
    if width.is_empty() {
        return Ok(256);
    }
    let bits: usize = width
        .parse()
        .map_err(|_| AbiError::UnsupportedType(original.to_string()))?;
    if bits == 0 || bits > 256 || bits % 8 != 0 {
        return Err(AbiError::UnsupportedType(original.to_string()));
    }
    Ok(bits)
}
