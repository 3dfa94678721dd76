//! Exact ordering of JSON number tokens.
//!
//! Numbers keep the text they were written with, so comparisons work on
//! that text directly. Nothing is rounded through `f64`; `0.30000000000000001`
//! sorts above `0.3` and `1e400` sorts above every finite `f64`.

use std::cmp::Ordering;

use serde_json::Number;

/// A number in the form `±0.DIGITS × 10^exponent`, with `DIGITS` free of
/// leading and trailing zeros. Zero has no digits.
#[derive(Debug, PartialEq, Eq)]
struct Decimal {
    negative: bool,
    digits: Vec<u8>,
    exponent: i64,
}

impl Decimal {
    fn parse(token: &str) -> Option<Self> {
        let (negative, unsigned) = match token.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, token),
        };

        let (mantissa, exponent) = match unsigned.find(|c: char| c == 'e' || c == 'E') {
            Some(at) => {
                let written = &unsigned[at + 1..];
                let written = written.strip_prefix('+').unwrap_or(written);
                (&unsigned[..at], written.parse::<i64>().ok()?)
            }
            None => (unsigned, 0),
        };

        let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if integer.is_empty() {
            return None;
        }

        let mut digits = Vec::with_capacity(integer.len() + fraction.len());
        for byte in integer.bytes().chain(fraction.bytes()) {
            if !byte.is_ascii_digit() {
                return None;
            }
            digits.push(byte - b'0');
        }

        let leading = digits.iter().take_while(|&&d| d == 0).count();
        digits.drain(..leading);
        while digits.last() == Some(&0) {
            digits.pop();
        }

        if digits.is_empty() {
            return Some(Self {
                negative: false,
                digits,
                exponent: 0,
            });
        }

        let shift = if leading <= integer.len() {
            i64::try_from(integer.len() - leading).ok()?
        } else {
            // Leading zeros ran into the fraction.
            -i64::try_from(leading - integer.len()).ok()?
        };
        let exponent = exponent.checked_add(shift)?;

        Some(Self {
            negative,
            digits,
            exponent,
        })
    }

    fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    fn cmp_magnitude(&self, other: &Self) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self
                .exponent
                .cmp(&other.exponent)
                .then_with(|| self.digits.cmp(&other.digits)),
        }
    }

    fn sign(&self) -> i8 {
        match (self.is_zero(), self.negative) {
            (true, _) => 0,
            (false, true) => -1,
            (false, false) => 1,
        }
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.sign().cmp(&other.sign()) {
            Ordering::Equal if self.negative => other.cmp_magnitude(self),
            Ordering::Equal => self.cmp_magnitude(other),
            unequal => unequal,
        }
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Orders two numbers by their exact written value.
///
/// Returns `None` only when a token's exponent is too large to track.
pub(crate) fn compare(a: &Number, b: &Number) -> Option<Ordering> {
    let a = Decimal::parse(&a.to_string())?;
    let b = Decimal::parse(&b.to_string())?;
    Some(a.cmp(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(a: &str, b: &str) -> Option<Ordering> {
        Some(Decimal::parse(a)?.cmp(&Decimal::parse(b)?))
    }

    #[test]
    fn test_equal_spellings() {
        assert_eq!(order("0.10", "0.1"), Some(Ordering::Equal));
        assert_eq!(order("100", "1e2"), Some(Ordering::Equal));
        assert_eq!(order("1.5E+1", "15"), Some(Ordering::Equal));
        assert_eq!(order("-0", "0.000"), Some(Ordering::Equal));
        assert_eq!(order("0.05", "5e-2"), Some(Ordering::Equal));
    }

    #[test]
    fn test_digits_beyond_f64_precision() {
        assert_eq!(order("0.30000000000000001", "0.3"), Some(Ordering::Greater));
        assert_eq!(order("20.000000000000001", "20"), Some(Ordering::Greater));
        assert_eq!(
            order("18446744073709551616", "18446744073709551615"),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn test_exponents_beyond_f64_range() {
        assert_eq!(order("1e400", "20"), Some(Ordering::Greater));
        assert_eq!(order("-1e400", "-20"), Some(Ordering::Less));
        assert_eq!(order("1e-400", "0"), Some(Ordering::Greater));
        assert_eq!(order("1e-400", "1e-399"), Some(Ordering::Less));
    }

    #[test]
    fn test_signs() {
        assert_eq!(order("-5", "3"), Some(Ordering::Less));
        assert_eq!(order("-5", "-3"), Some(Ordering::Less));
        assert_eq!(order("-0.5", "0"), Some(Ordering::Less));
        assert_eq!(order("0", "0.001"), Some(Ordering::Less));
    }

    #[test]
    fn test_fraction_with_leading_zeros() {
        assert_eq!(order("0.0012", "0.012"), Some(Ordering::Less));
        assert_eq!(order("0.0012", "1.2e-3"), Some(Ordering::Equal));
    }

    #[test]
    fn test_unmanageable_exponent() {
        assert!(Decimal::parse("1e99999999999999999999").is_none());
        assert!(Decimal::parse("1e9223372036854775807").is_none());
        assert!(Decimal::parse("abc").is_none());
    }

    #[test]
    fn test_compare_numbers() {
        let small: Number = serde_json::from_str("0.3").unwrap();
        let large: Number = serde_json::from_str("0.30000000000000001").unwrap();
        assert_eq!(compare(&small, &large), Some(Ordering::Less));
    }
}
