// 🪪 CPF - Brazilian national identifier
// Validation (two-pass mod-11 checksum) and display formatting
//
//   529.982.247-25
//   └─ 9 base ─┘ └┴─ check digits (computed from everything to their left)

/// Number of digits in a bare CPF
pub const CPF_LENGTH: usize = 11;

// ============================================================================
// CHECKSUM
// ============================================================================

fn parse_digits(input: &str) -> Option<Vec<u8>> {
    input
        .bytes()
        .map(|b| if b.is_ascii_digit() { Some(b - b'0') } else { None })
        .collect()
}

/// Weighted mod-11 digit: weights run from `top_weight` down to 2.
fn check_digit(digits: &[u8], top_weight: u32) -> u8 {
    let sum: u32 = digits
        .iter()
        .zip((2..=top_weight).rev())
        .map(|(&digit, weight)| u32::from(digit) * weight)
        .sum();

    let remainder = sum % 11;
    if remainder < 2 {
        0
    } else {
        (11 - remainder) as u8
    }
}

/// Compute both check digits for the nine base digits of a CPF.
///
/// Returns `None` unless `base` is exactly nine ASCII digits.
///
/// # Example
/// ```
/// assert_eq!(bank_ledger::cpf::check_digits("529982247"), Some((2, 5)));
/// ```
pub fn check_digits(base: &str) -> Option<(u8, u8)> {
    let mut digits = parse_digits(base)?;
    if digits.len() != CPF_LENGTH - 2 {
        return None;
    }

    let first = check_digit(&digits, 10);
    digits.push(first);
    let second = check_digit(&digits, 11);

    Some((first, second))
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Validate a bare 11-digit CPF.
///
/// Malformed input (wrong length, separators, non-digits) is simply invalid,
/// and so are the eleven repeated-digit sequences that happen to satisfy the
/// checksum.
pub fn validate(cpf: &str) -> bool {
    if cpf.len() != CPF_LENGTH {
        return false;
    }

    let Some(digits) = parse_digits(cpf) else {
        return false;
    };

    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    check_digit(&digits[..9], 10) == digits[9] && check_digit(&digits[..10], 11) == digits[10]
}

/// Format as `ddd.ddd.ddd-dd`. Anything that is not exactly 11 characters
/// long comes back unchanged.
pub fn format(cpf: &str) -> String {
    let chars: Vec<char> = cpf.chars().collect();
    if chars.len() != CPF_LENGTH {
        return cpf.to_string();
    }

    let group = |range: std::ops::Range<usize>| chars[range].iter().collect::<String>();
    format!(
        "{}.{}.{}-{}",
        group(0..3),
        group(3..6),
        group(6..9),
        group(9..11)
    )
}

/// Remove the `.` and `-` separators added by [`format`].
pub fn strip(formatted: &str) -> String {
    formatted.chars().filter(|c| *c != '.' && *c != '-').collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Straight transcription of the published algorithm, kept separate from
    /// the implementation above so the two can be compared.
    fn reference_validate(cpf: &str) -> bool {
        let chars: Vec<char> = cpf.chars().collect();
        if chars.len() != 11 || !chars.iter().all(|c| c.is_ascii_digit()) {
            return false;
        }
        if chars.iter().all(|c| *c == chars[0]) {
            return false;
        }
        let d: Vec<u32> = chars.iter().map(|c| c.to_digit(10).unwrap()).collect();

        let mut sum = 0;
        for i in 0..9 {
            sum += d[i] * (10 - i as u32);
        }
        let r = sum % 11;
        let first = if r < 2 { 0 } else { 11 - r };

        let mut sum = 0;
        for i in 0..10 {
            sum += d[i] * (11 - i as u32);
        }
        let r = sum % 11;
        let second = if r < 2 { 0 } else { 11 - r };

        first == d[9] && second == d[10]
    }

    #[test]
    fn test_valid_cpfs() {
        assert!(validate("52998224725"));
        assert!(validate("98765432100"));
        assert!(validate("11144477735"));
    }

    #[test]
    fn test_wrong_check_digits() {
        assert!(!validate("12345678901"));
        assert!(!validate("52998224724"));
        assert!(!validate("52998224715"));
    }

    #[test]
    fn test_repeated_digits_rejected() {
        // 111.111.111-11 satisfies the checksum but is a known placeholder
        for d in 0..=9 {
            let cpf = d.to_string().repeat(11);
            assert!(!validate(&cpf), "{} should be rejected", cpf);
        }
    }

    #[test]
    fn test_malformed_input() {
        assert!(!validate(""));
        assert!(!validate("5299822472"));
        assert!(!validate("529982247250"));
        assert!(!validate("529.982.247-25"));
        assert!(!validate("5299822472a"));
        assert!(!validate("5299822472５"));
    }

    #[test]
    fn test_check_digits() {
        assert_eq!(check_digits("529982247"), Some((2, 5)));
        assert_eq!(check_digits("987654321"), Some((0, 0)));
        assert_eq!(check_digits("12345678"), None);
        assert_eq!(check_digits("12345678x"), None);
    }

    #[test]
    fn test_format() {
        assert_eq!(format("52998224725"), "529.982.247-25");
        assert_eq!(format("123"), "123");
        assert_eq!(format(""), "");
        assert_eq!(format("529.982.247-25"), "529.982.247-25");
    }

    #[test]
    fn test_strip() {
        assert_eq!(strip("529.982.247-25"), "52998224725");
        assert_eq!(strip("52998224725"), "52998224725");
    }

    proptest! {
        #[test]
        fn prop_matches_reference(cpf in "[0-9]{11}") {
            prop_assert_eq!(validate(&cpf), reference_validate(&cpf));
        }

        #[test]
        fn prop_generated_cpfs_validate(base in "[0-9]{9}") {
            let (first, second) = check_digits(&base).unwrap();
            let cpf = format!("{}{}{}", base, first, second);
            let repeated = cpf.chars().all(|c| c == cpf.as_bytes()[0] as char);
            prop_assert_eq!(validate(&cpf), !repeated);
            prop_assert_eq!(reference_validate(&cpf), !repeated);
        }

        #[test]
        fn prop_format_strip_roundtrip(base in "[0-9]{9}") {
            let (first, second) = check_digits(&base).unwrap();
            let cpf = format!("{}{}{}", base, first, second);
            prop_assert_eq!(strip(&format(&cpf)), cpf);
        }

        #[test]
        fn prop_wrong_length_never_valid(cpf in "[0-9]{0,10}|[0-9]{12,14}") {
            prop_assert!(!validate(&cpf));
            prop_assert_eq!(format(&cpf), cpf);
        }
    }
}
