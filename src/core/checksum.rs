//! Check-digit routines shared by the country generators and validators.

/// Weighted modulo-11 check digit.
///
/// Computes `sum(digit[i] * weight[i]) mod 11` and maps the remainder to a
/// check digit: `0` stays `0`, everything else becomes `11 - remainder`.
/// A result of `10` has no single-digit encoding, so `None` is returned and
/// the caller has to pick a different candidate.
pub fn weighted_mod11<const N: usize>(digits: &[u8; N], weights: &[u8; N]) -> Option<u8> {
    let sum: u32 = digits
        .iter()
        .zip(weights)
        .map(|(&d, &w)| u32::from(d) * u32::from(w))
        .sum();

    match sum % 11 {
        0 => Some(0),
        1 => None,
        r => Some((11 - r) as u8),
    }
}

/// Luhn (mod 10) check digit, doubling digits at even indices.
///
/// Index 0 is doubled, index 1 is not, and so on. Doubled values above 9 have
/// 9 subtracted. The check digit is `(10 - sum mod 10) mod 10`.
pub fn luhn_check_digit(digits: &[u8]) -> u8 {
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| {
            let d = u32::from(d);
            if i % 2 == 0 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();

    ((10 - sum % 10) % 10) as u8
}

/// Convert an ASCII digit string into its digit values.
///
/// Returns `None` if any character is not `0-9`.
pub fn parse_digits(s: &str) -> Option<Vec<u8>> {
    s.bytes()
        .map(|b| b.is_ascii_digit().then(|| b - b'0'))
        .collect()
}

/// Write a non-negative number as exactly `width` digits, most significant first.
pub(crate) fn push_digits(out: &mut Vec<u8>, value: u32, width: u32) {
    for exp in (0..width).rev() {
        out.push(((value / 10u32.pow(exp)) % 10) as u8);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mod11_zero_remainder_is_zero() {
        // 1*1 + 10*1 = 11 → remainder 0
        assert_eq!(weighted_mod11(&[1, 1], &[1, 10]), Some(0));
    }

    #[test]
    fn mod11_remainder_one_is_invalid() {
        assert_eq!(weighted_mod11(&[1], &[1]), None);
        assert_eq!(weighted_mod11(&[4, 0], &[3, 7]), None);
    }

    #[test]
    fn mod11_regular_value() {
        // 5 → 11 - 5 = 6
        assert_eq!(weighted_mod11(&[5], &[1]), Some(6));
        // 10 → 11 - 10 = 1
        assert_eq!(weighted_mod11(&[2, 2], &[3, 2]), Some(1));
    }

    #[test]
    fn mod11_fodselsnummer_example() {
        // 140590 001 → k1 0, k2 2
        let first = [1, 4, 0, 5, 9, 0, 0, 0, 1];
        let k1 = weighted_mod11(&first, &[3, 7, 6, 1, 8, 9, 4, 5, 2]).unwrap();
        assert_eq!(k1, 0);
        let second = [1, 4, 0, 5, 9, 0, 0, 0, 1, k1];
        let k2 = weighted_mod11(&second, &[5, 4, 3, 2, 7, 6, 5, 4, 3, 2]).unwrap();
        assert_eq!(k2, 2);
    }

    #[test]
    fn luhn_known_personnummer() {
        // 811218-987 → check digit 6 (Skatteverket's documented example)
        assert_eq!(luhn_check_digit(&[8, 1, 1, 2, 1, 8, 9, 8, 7]), 6);
    }

    #[test]
    fn luhn_all_zero() {
        assert_eq!(luhn_check_digit(&[0; 9]), 0);
    }

    #[test]
    fn luhn_doubles_even_positions() {
        // [5]: 5*2 = 10 → 1 → check 9
        assert_eq!(luhn_check_digit(&[5]), 9);
        // [0, 5]: index 1 not doubled → 5 → check 5
        assert_eq!(luhn_check_digit(&[0, 5]), 5);
    }

    #[test]
    fn parse_digits_rejects_non_digits() {
        assert_eq!(parse_digits("0123"), Some(vec![0, 1, 2, 3]));
        assert_eq!(parse_digits("12a4"), None);
        assert_eq!(parse_digits(""), Some(vec![]));
    }

    #[test]
    fn push_digits_zero_pads() {
        let mut out = Vec::new();
        push_digits(&mut out, 7, 3);
        push_digits(&mut out, 1990, 2);
        assert_eq!(out, vec![0, 0, 7, 9, 0]);
    }
}
