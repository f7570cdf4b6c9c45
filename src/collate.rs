//! Case-insensitive, alphabet-aware string ordering for the catalog's two
//! display languages. Plain code-point comparison misplaces the Ukrainian
//! letters `ґ`, `є`, `і` and `ї`, which Unicode parks outside the main
//! Cyrillic run; titles mixing them would interleave wrongly in a sorted
//! table. Characters are therefore ranked by alphabet position first, with
//! the raw text as a final tiebreak so equal-ranked strings still order
//! deterministically.

use std::cmp::Ordering;

/// The Ukrainian alphabet in dictionary order. The index of a letter in this
/// string is its primary sort rank.
const UKRAINIAN_ALPHABET: &str = "абвгґдеєжзиіїйклмнопрстуфхцчшщьюя";

/// Sort key for one character: a script class followed by a rank within the
/// class. Non-letters come first, then Latin, then Cyrillic, matching how
/// mixed English/Ukrainian shelves are usually listed.
fn char_key(c: char) -> (u8, u32) {
    let folded = c.to_lowercase().next().unwrap_or(c);
    if folded.is_ascii_lowercase() {
        return (1, folded as u32 - 'a' as u32);
    }
    if let Some(position) = UKRAINIAN_ALPHABET.chars().position(|letter| letter == folded) {
        return (2, position as u32);
    }
    if ('\u{0400}'..='\u{04FF}').contains(&folded) {
        // Cyrillic outside the Ukrainian alphabet keeps code-point order,
        // after the ranked letters.
        return (2, 0x100 + folded as u32);
    }
    (0, folded as u32)
}

/// Compare two strings with the locale-aware ordering described above.
pub fn compare(a: &str, b: &str) -> Ordering {
    match a.chars().map(char_key).cmp(b.chars().map(char_key)) {
        Ordering::Equal => a.cmp(b),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin_titles_sort_case_insensitively() {
        assert_eq!(compare("Ant", "Zoo"), Ordering::Less);
        assert_eq!(compare("ant", "Zoo"), Ordering::Less);
        assert_eq!(compare("zoo", "Ant"), Ordering::Greater);
    }

    #[test]
    fn test_equal_folded_strings_break_ties_deterministically() {
        assert_eq!(compare("Ant", "Ant"), Ordering::Equal);
        assert_eq!(compare("Ant", "ant"), "Ant".cmp("ant"));
    }

    #[test]
    fn test_ukrainian_letters_use_alphabet_positions() {
        // `є` follows `е` in the alphabet but not in code-point order.
        assert_eq!("єва".cmp("жук"), Ordering::Greater);
        assert_eq!(compare("єва", "жук"), Ordering::Less);

        // `і` precedes `й` in the alphabet despite the higher code point.
        assert_eq!("іван".cmp("йосип"), Ordering::Greater);
        assert_eq!(compare("іван", "йосип"), Ordering::Less);

        assert_eq!(compare("Зима", "Іскра"), Ordering::Less);
        assert_eq!(compare("Іскра", "Їжак"), Ordering::Less);
    }

    #[test]
    fn test_digits_and_punctuation_sort_before_letters() {
        assert_eq!(compare("1984", "Animal Farm"), Ordering::Less);
        assert_eq!(compare("...", "1984"), Ordering::Less);
    }

    #[test]
    fn test_latin_sorts_before_cyrillic() {
        assert_eq!(compare("Zoo", "Абетка"), Ordering::Less);
    }

    #[test]
    fn test_prefix_sorts_before_extension() {
        assert_eq!(compare("Кобзар", "Кобзарик"), Ordering::Less);
    }
}
