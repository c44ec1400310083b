//! Plain-text rendering: framing, banner, metrics, message, footer.
//!
//! Rendering builds `String`s rather than printing, so the exact output can
//! be asserted in tests.  All user-visible text lives here.

use hibi_core::calendar::LifeFacts;

const SEPARATOR: &str = "────────────────────────────────────────";

/// Static framing shown once at startup.
pub fn header() -> String {
    [
        "🎂 Thank you for being born",
        SEPARATOR,
        "Do you know how many days you have lived, from the day you were born until today?",
        "",
        "Enter your birth date and this tool counts the days you have lived",
        "and delivers a little celebratory message just for you ✨",
        SEPARATOR,
        "📅 Tell us your birth date (YYYY-MM-DD, \"quit\" to leave)",
    ]
    .join("\n")
}

/// One rendered result: optional anniversary banner, the day count and the
/// generated (or warning/diagnostic) message.
pub fn results(facts: &LifeFacts, message: &str) -> String {
    let mut out = String::new();
    out.push_str(SEPARATOR);
    out.push('\n');

    if facts.is_anniversary {
        out.push_str("🎊 Happy Birthday! 🎊\n");
        if let Some(age) = facts.age_years {
            out.push_str(&format!("Today you turn {age}. Happy Birthday! 🎂\n"));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "Days you have lived: {} days\n",
        format_thousands(facts.days_lived)
    ));
    out.push_str("Every single one of them irreplaceable ✨\n\n");

    out.push_str("💌 A message for you\n");
    out.push_str(message);
    out.push('\n');

    out.push_str(SEPARATOR);
    out.push('\n');
    out.push_str("Thank you for living.\nYour being here makes someone else happy.");
    out
}

/// Shown once on exit.
pub fn footer() -> String {
    format!("{SEPARATOR}\n💝 This tool exists to celebrate your life 💝")
}

/// Format a non-negative count with thousands separators: `8766` → `"8,766"`.
pub fn format_thousands(n: i64) -> String {
    let raw = n.to_string();
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000), "1,000");
        assert_eq!(format_thousands(8_766), "8,766");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn anniversary_results_carry_the_banner_and_age() {
        let facts = LifeFacts {
            days_lived: 8766,
            is_anniversary: true,
            age_years: Some(24),
        };
        let out = results(&facts, "congrats!");

        assert!(out.contains("Happy Birthday"));
        assert!(out.contains("turn 24"));
        assert!(out.contains("8,766 days"));
        assert!(out.contains("congrats!"));
    }

    #[test]
    fn ordinary_results_skip_the_banner() {
        let facts = LifeFacts {
            days_lived: 12,
            is_anniversary: false,
            age_years: None,
        };
        let out = results(&facts, "msg");

        assert!(!out.contains("Happy Birthday"));
        assert!(out.contains("12 days"));
    }
}
