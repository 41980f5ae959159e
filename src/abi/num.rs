//! Integer literal parsing
//!
//! Accepts plain decimal (`123`, `-45`), hex (`0xff`) and scientific
//! notation (`1e18`, `1.5e18`, `2e-1` only if it scales to an integer).
//! A `_` digit separator is display-only and stripped everywhere.

use alloy_primitives::U256;

use super::error::AbiError;

/// Sign/magnitude pair covering the full 256-bit word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigInt {
    pub negative: bool,
    pub magnitude: U256,
}

impl BigInt {
    fn new(negative: bool, magnitude: U256) -> Self {
        // normalize so zero is never negative
        BigInt {
            negative: negative && !magnitude.is_zero(),
            magnitude,
        }
    }
}

/// Parse an integer literal. With `unsigned`, any negative result is
/// rejected as `NegativeUnsigned`.
pub fn parse_integer(literal: &str, unsigned: bool) -> Result<BigInt, AbiError> {
    let trimmed = literal.trim();
    if trimmed.is_empty() {
        return Err(AbiError::InvalidInt(literal.to_string()));
    }
    let s: String = trimmed.chars().filter(|&c| c != '_').collect();

    let value = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        parse_hex(hex, literal)?
    } else if s.contains(['e', 'E']) {
        parse_scientific(&s, literal)?
    } else {
        parse_decimal(&s, literal)?
    };

    if unsigned && value.negative {
        return Err(AbiError::NegativeUnsigned(literal.to_string()));
    }
    Ok(value)
}

fn parse_hex(digits: &str, literal: &str) -> Result<BigInt, AbiError> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(AbiError::InvalidHex(literal.to_string()));
    }
    let magnitude = U256::from_str_radix(digits, 16)
        .map_err(|_| AbiError::IntegerOverflow(literal.to_string()))?;
    Ok(BigInt::new(false, magnitude))
}

fn parse_decimal(s: &str, literal: &str) -> Result<BigInt, AbiError> {
    let (negative, digits) = split_sign(s);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(AbiError::InvalidInt(literal.to_string()));
    }
    let magnitude = U256::from_str_radix(digits, 10)
        .map_err(|_| AbiError::IntegerOverflow(literal.to_string()))?;
    Ok(BigInt::new(negative, magnitude))
}

fn parse_scientific(s: &str, literal: &str) -> Result<BigInt, AbiError> {
    let lower = s.to_ascii_lowercase();
    let (mantissa, exponent) = lower
        .split_once('e')
        .ok_or_else(|| AbiError::InvalidInt(literal.to_string()))?;
    let mantissa = mantissa.trim();
    let exponent = exponent.trim();
    if mantissa.is_empty() || exponent.is_empty() || exponent.contains('e') {
        return Err(AbiError::InvalidInt(literal.to_string()));
    }

    let exp: i64 = exponent
        .parse()
        .map_err(|_| AbiError::InvalidInt(literal.to_string()))?;

    // The mantissa is a decimal rational; fold its fractional digits into
    // the exponent so the whole thing is integer arithmetic.
    let (negative, mantissa) = split_sign(mantissa);
    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(AbiError::InvalidInt(literal.to_string()));
    }
    let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) || frac_part.contains('.') {
        return Err(AbiError::InvalidInt(literal.to_string()));
    }

    let digits = format!("{int_part}{frac_part}");
    let magnitude = U256::from_str_radix(&digits, 10)
        .map_err(|_| AbiError::IntegerOverflow(literal.to_string()))?;
    let scale = exp - frac_part.len() as i64;

    let scaled = if scale >= 0 {
        pow10(scale as u32)
            .and_then(|p| magnitude.checked_mul(p))
            .ok_or_else(|| AbiError::IntegerOverflow(literal.to_string()))?
    } else {
        match pow10(-scale as u32) {
            Some(divisor) => {
                if magnitude % divisor != U256::ZERO {
                    return Err(AbiError::NonIntegerScientific(literal.to_string()));
                }
                magnitude / divisor
            }
            // divisor exceeds 2^256: only an exact zero survives
            None if magnitude.is_zero() => U256::ZERO,
            None => return Err(AbiError::NonIntegerScientific(literal.to_string())),
        }
    };

    Ok(BigInt::new(negative, scaled))
}

fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        (false, rest)
    } else {
        (false, s)
    }
}

fn pow10(exp: u32) -> Option<U256> {
    U256::from(10u8).checked_pow(U256::from(exp))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uint(s: &str) -> U256 {
        let v = parse_integer(s, true).unwrap();
        assert!(!v.negative);
        v.magnitude
    }

    #[test]
    fn test_plain_decimal() {
        assert_eq!(uint("0"), U256::ZERO);
        assert_eq!(uint("123"), U256::from(123u64));
        let v = parse_integer("-42", false).unwrap();
        assert!(v.negative);
        assert_eq!(v.magnitude, U256::from(42u64));
    }

    #[test]
    fn test_hex() {
        assert_eq!(uint("0xff"), U256::from(255u64));
        assert_eq!(uint("0XFF"), U256::from(255u64));
        assert!(matches!(
            parse_integer("0x", true),
            Err(AbiError::InvalidHex(_))
        ));
        assert!(matches!(
            parse_integer("0xzz", true),
            Err(AbiError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_scientific() {
        assert_eq!(uint("1e18"), U256::from(10u64).pow(U256::from(18u8)));
        assert_eq!(uint("1.5e18"), U256::from(15u64) * U256::from(10u64).pow(U256::from(17u8)));
        assert_eq!(uint("2e0"), U256::from(2u64));
        assert_eq!(uint("2500e-2"), U256::from(25u64));
        assert_eq!(uint("1E3"), U256::from(1000u64));
        let v = parse_integer("-1e2", false).unwrap();
        assert!(v.negative);
        assert_eq!(v.magnitude, U256::from(100u64));
    }

    #[test]
    fn test_scientific_non_integer() {
        assert!(matches!(
            parse_integer("1.5e0", true),
            Err(AbiError::NonIntegerScientific(_))
        ));
        assert!(matches!(
            parse_integer("1e-1", true),
            Err(AbiError::NonIntegerScientific(_))
        ));
        // zero is an integer no matter how far it is scaled down
        assert_eq!(uint("0e-100"), U256::ZERO);
    }

    #[test]
    fn test_underscores() {
        assert_eq!(uint("1_000_000"), U256::from(1_000_000u64));
        assert_eq!(uint("1_000e3"), U256::from(1_000_000u64));
        assert_eq!(uint("0xff_ff"), U256::from(0xffffu64));
    }

    #[test]
    fn test_negative_unsigned() {
        assert!(matches!(
            parse_integer("-1", true),
            Err(AbiError::NegativeUnsigned(_))
        ));
        assert!(matches!(
            parse_integer("-1e18", true),
            Err(AbiError::NegativeUnsigned(_))
        ));
        // negative zero collapses to plain zero
        assert_eq!(uint("-0"), U256::ZERO);
    }

    #[test]
    fn test_overflow() {
        // 2^256 does not fit
        let too_big = "115792089237316195423570985008687907853269984665640564039457584007913129639936";
        assert!(matches!(
            parse_integer(too_big, true),
            Err(AbiError::IntegerOverflow(_))
        ));
        assert!(matches!(
            parse_integer("1e100", true),
            Err(AbiError::IntegerOverflow(_))
        ));
        // U256::MAX itself is fine
        let max = "115792089237316195423570985008687907853269984665640564039457584007913129639935";
        assert_eq!(uint(max), U256::MAX);
    }

    #[test]
    fn test_garbage() {
        for bad in ["", "  ", "abc", "1.2", "--1", "1e", "e5", "1e2e3", "1.2.3e4"] {
            assert!(parse_integer(bad, false).is_err(), "expected error for {bad:?}");
        }
    }
}
