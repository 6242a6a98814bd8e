//! Cardinal spelling of monetary amounts, used for the amount-in-words
//! cell on the invoice's closing row.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Numbering convention for the spelled-out amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    /// Indian grouping: hundred, thousand, lakh, crore.
    EnglishIndia,
    /// Western grouping: thousand, million, billion, trillion.
    English,
}

const UNITS: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight",
    "nine", "ten", "eleven", "twelve", "thirteen", "fourteen", "fifteen",
    "sixteen", "seventeen", "eighteen", "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy",
    "eighty", "ninety",
];

/// Spell a non-negative amount as a capitalized cardinal number, e.g.
/// `100 -> "One hundred"`, `350.50 -> "Three hundred and fifty point
/// five"`. The fractional part is spelled digit by digit after "point",
/// with trailing fraction zeros dropped. The caller appends the
/// currency-unit phrase. Pure and deterministic.
pub fn amount_in_words(amount: Decimal, locale: Locale) -> String {
    let amount = amount.abs().normalize();
    let integer = amount.trunc().to_u128().unwrap_or(0);

    let mut words = spell_integer(integer, locale);

    let text = amount.to_string();
    if let Some(fraction) = text.split('.').nth(1) {
        words.push_str(" point");
        for digit in fraction.chars() {
            let d = digit.to_digit(10).unwrap_or(0) as usize;
            words.push(' ');
            words.push_str(UNITS[d]);
        }
    }

    capitalize(&words)
}

fn spell_integer(n: u128, locale: Locale) -> String {
    if n == 0 {
        return UNITS[0].to_string();
    }
    match locale {
        Locale::EnglishIndia => spell_indian(n),
        Locale::English => spell_western(n),
    }
}

/// Indian system: groups of two digits above the first three, recursing
/// above crore so crore-of-crore magnitudes spell without truncation.
fn spell_indian(n: u128) -> String {
    const THOUSAND: u128 = 1_000;
    const LAKH: u128 = 100_000;
    const CRORE: u128 = 10_000_000;

    if n >= CRORE {
        return join(spell_indian(n / CRORE) + " crore", n % CRORE, spell_indian);
    }
    if n >= LAKH {
        return join(spell_indian(n / LAKH) + " lakh", n % LAKH, spell_indian);
    }
    if n >= THOUSAND {
        return join(
            spell_indian(n / THOUSAND) + " thousand",
            n % THOUSAND,
            spell_indian,
        );
    }
    spell_hundreds(n)
}

/// Western system: groups of three digits with short-scale names.
fn spell_western(n: u128) -> String {
    const SCALES: [(u128, &str); 5] = [
        (1_000_000_000_000_000, "quadrillion"),
        (1_000_000_000_000, "trillion"),
        (1_000_000_000, "billion"),
        (1_000_000, "million"),
        (1_000, "thousand"),
    ];
    for (scale, name) in SCALES {
        if n >= scale {
            return join(
                spell_western(n / scale) + " " + name,
                n % scale,
                spell_western,
            );
        }
    }
    spell_hundreds(n)
}

fn join(head: String, rest: u128, spell: fn(u128) -> String) -> String {
    if rest == 0 {
        head
    } else {
        head + " " + &spell(rest)
    }
}

fn spell_hundreds(n: u128) -> String {
    debug_assert!(n < 1_000);
    if n >= 100 {
        let head = format!("{} hundred", UNITS[(n / 100) as usize]);
        if n % 100 == 0 {
            head
        } else {
            format!("{} and {}", head, spell_tens(n % 100))
        }
    } else {
        spell_tens(n)
    }
}

fn spell_tens(n: u128) -> String {
    debug_assert!(n < 100);
    if n < 20 {
        UNITS[n as usize].to_string()
    } else if n % 10 == 0 {
        TENS[(n / 10) as usize].to_string()
    } else {
        format!("{}-{}", TENS[(n / 10) as usize], UNITS[(n % 10) as usize])
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn zero_and_small_numbers() {
        assert_eq!(amount_in_words(dec("0"), Locale::EnglishIndia), "Zero");
        assert_eq!(amount_in_words(dec("7"), Locale::EnglishIndia), "Seven");
        assert_eq!(amount_in_words(dec("56"), Locale::EnglishIndia), "Fifty-six");
    }

    #[test]
    fn one_hundred_is_capitalized() {
        assert_eq!(
            amount_in_words(dec("100"), Locale::EnglishIndia),
            "One hundred",
        );
    }

    #[test]
    fn hundreds_take_and() {
        assert_eq!(
            amount_in_words(dec("350"), Locale::EnglishIndia),
            "Three hundred and fifty",
        );
    }

    #[test]
    fn indian_grouping() {
        assert_eq!(
            amount_in_words(dec("123456"), Locale::EnglishIndia),
            "One lakh twenty-three thousand four hundred and fifty-six",
        );
        assert_eq!(
            amount_in_words(dec("10000000"), Locale::EnglishIndia),
            "One crore",
        );
        assert_eq!(
            amount_in_words(dec("25000000"), Locale::EnglishIndia),
            "Two crore fifty lakh",
        );
    }

    #[test]
    fn crore_of_crore_does_not_truncate() {
        assert_eq!(
            amount_in_words(dec("200000000000000"), Locale::EnglishIndia),
            "Two crore crore",
        );
    }

    #[test]
    fn western_grouping() {
        assert_eq!(
            amount_in_words(dec("1234567"), Locale::English),
            "One million two hundred and thirty-four thousand five hundred and sixty-seven",
        );
        assert_eq!(
            amount_in_words(dec("2000000000"), Locale::English),
            "Two billion",
        );
    }

    #[test]
    fn fraction_spelled_from_exact_value() {
        // Trailing fraction zeros are not spelled: 350.50 -> point five.
        assert_eq!(
            amount_in_words(dec("350.50"), Locale::EnglishIndia),
            "Three hundred and fifty point five",
        );
        assert_eq!(
            amount_in_words(dec("100.25"), Locale::EnglishIndia),
            "One hundred point two five",
        );
    }

    #[test]
    fn deterministic_across_invocations() {
        let a = amount_in_words(dec("98765.43"), Locale::EnglishIndia);
        let b = amount_in_words(dec("98765.43"), Locale::EnglishIndia);
        assert_eq!(a, b);
    }
}
