//! Advisory password strength scoring
//!
//! The same heuristic the desktop and mobile clients show their users. It
//! never blocks encryption; the only hard rule is the length minimum
//! enforced by [`crate::envelope`].

use std::fmt;

const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Strength {
    VeryWeak,
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Strength::VeryWeak => "Very Weak",
            Strength::Weak => "Weak",
            Strength::Moderate => "Moderate",
            Strength::Strong => "Strong",
            Strength::VeryStrong => "Very Strong",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrengthReport {
    /// 0 to 6: two points for length, one per character class.
    pub score: u32,
    pub strength: Strength,
    pub entropy_bits: f64,
    pub recommendations: Vec<String>,
}

struct CharClasses {
    lower: bool,
    upper: bool,
    digit: bool,
    special: bool,
}

impl CharClasses {
    fn of(password: &str) -> Self {
        Self {
            lower: password.chars().any(|c| c.is_ascii_lowercase()),
            upper: password.chars().any(|c| c.is_ascii_uppercase()),
            digit: password.chars().any(|c| c.is_ascii_digit()),
            special: password.chars().any(|c| SPECIAL_CHARS.contains(c)),
        }
    }
}

/// Estimated entropy: length times log2 of the size of the character
/// classes in use.
pub fn entropy_bits(password: &str) -> f64 {
    let classes = CharClasses::of(password);
    let charset: u32 = [
        (classes.lower, 26u32),
        (classes.upper, 26),
        (classes.digit, 10),
        (classes.special, 23),
    ]
    .iter()
    .filter(|(present, _)| *present)
    .map(|(_, size)| size)
    .sum();

    if charset == 0 {
        return 0.0;
    }
    password.chars().count() as f64 * f64::from(charset).log2()
}

/// Score `password` and list what would improve it.
pub fn check(password: &str) -> StrengthReport {
    if password.is_empty() {
        return StrengthReport {
            score: 0,
            strength: Strength::VeryWeak,
            entropy_bits: 0.0,
            recommendations: vec!["Password cannot be empty".to_string()],
        };
    }

    let mut score = 0;
    let mut recommendations = Vec::new();

    match password.chars().count() {
        0..=7 => recommendations.push("Use at least 8 characters (12+ recommended)".to_string()),
        8..=11 => {
            recommendations.push("Consider using 12+ characters for better security".to_string());
            score += 1;
        }
        _ => score += 2,
    }

    let classes = CharClasses::of(password);
    for (present, advice) in [
        (classes.lower, "Add lowercase letters"),
        (classes.upper, "Add uppercase letters"),
        (classes.digit, "Add numbers"),
        (classes.special, "Add special characters (!@#$%^&*)"),
    ] {
        if present {
            score += 1;
        } else {
            recommendations.push(advice.to_string());
        }
    }

    let entropy_bits = entropy_bits(password);
    let strength = if score >= 6 && entropy_bits >= 70.0 {
        Strength::VeryStrong
    } else if score >= 5 && entropy_bits >= 60.0 {
        Strength::Strong
    } else if score >= 4 && entropy_bits >= 50.0 {
        Strength::Moderate
    } else if score >= 2 {
        Strength::Weak
    } else {
        Strength::VeryWeak
    };

    StrengthReport {
        score,
        strength,
        entropy_bits,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let report = check("");
        assert_eq!(report.score, 0);
        assert_eq!(report.strength, Strength::VeryWeak);
        assert_eq!(report.recommendations, vec!["Password cannot be empty"]);
        assert_eq!(entropy_bits(""), 0.0);
    }

    #[test]
    fn test_short_lowercase() {
        let report = check("abc");
        assert_eq!(report.score, 1);
        assert_eq!(report.strength, Strength::VeryWeak);
        assert_eq!(
            report.recommendations[0],
            "Use at least 8 characters (12+ recommended)"
        );
    }

    #[test]
    fn test_minimum_length_lowercase() {
        let report = check("password");
        assert_eq!(report.score, 2);
        assert_eq!(report.strength, Strength::Weak);
        assert!((report.entropy_bits - 8.0 * 26f64.log2()).abs() < 1e-9);
        assert_eq!(
            report.recommendations,
            vec![
                "Consider using 12+ characters for better security",
                "Add uppercase letters",
                "Add numbers",
                "Add special characters (!@#$%^&*)",
            ]
        );
    }

    #[test]
    fn test_moderate() {
        // 11 chars, lower + upper + digit: score 4, entropy 11 * log2(62) ~ 65.5
        let report = check("Password123");
        assert_eq!(report.score, 4);
        assert_eq!(report.strength, Strength::Moderate);
    }

    #[test]
    fn test_strong() {
        // 10 chars, all classes: score 5, entropy 10 * log2(85) ~ 64.1
        let report = check("Pass-word1");
        assert_eq!(report.score, 5);
        assert_eq!(report.strength, Strength::Strong);
    }

    #[test]
    fn test_very_strong() {
        let report = check("SecurePassword123!");
        assert_eq!(report.score, 6);
        assert_eq!(report.strength, Strength::VeryStrong);
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_long_digits_only() {
        // score 3: length 2 + digits 1
        let report = check("123456789012345");
        assert_eq!(report.score, 3);
        assert_eq!(report.strength, Strength::Weak);
    }

    #[test]
    fn test_unclassified_characters_have_no_entropy() {
        assert_eq!(entropy_bits("ééééé"), 0.0);
        assert_eq!(entropy_bits("     "), 0.0);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(Strength::VeryWeak.to_string(), "Very Weak");
        assert_eq!(Strength::VeryStrong.to_string(), "Very Strong");
    }
}
