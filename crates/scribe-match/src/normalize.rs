//! Text canonicalization shared by every matcher.
//!
//! Student answers arrive from many keyboards and editors, so the same sentence
//! can show up with curly quotes, acute accents used as apostrophes, or doubled
//! spaces. The functions here are total, allocate a fresh `String`, and never
//! touch shared state.

/// Unify quotation glyphs.
///
/// * `“` and `”` become `"`
/// * `´`, `` ` ``, `‘` and `’` become `'`
/// * the low single comma quotation mark `‚` becomes `,`
///
/// Everything else passes through untouched, so the function is idempotent.
pub fn normalize(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\u{201C}' | '\u{201D}' => '"',
            '\u{00B4}' | '\u{0060}' | '\u{2018}' | '\u{2019}' => '\'',
            '\u{201A}' => ',',
            other => other,
        })
        .collect()
}

/// Strip every character outside `[A-Za-z0-9\s]`.
pub fn remove_punctuation(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect()
}

/// Strip all whitespace.
pub fn remove_spaces(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Trim both ends and collapse internal whitespace runs to a single space.
///
/// A lone tab or newline between two words is left as-is; only runs of two or
/// more whitespace characters are folded.
pub fn collapse_whitespace(s: &str) -> String {
    let trimmed = s.trim();
    let mut out = String::with_capacity(trimmed.len());
    let mut run = String::new();

    for c in trimmed.chars() {
        if c.is_whitespace() {
            run.push(c);
            continue;
        }
        match run.chars().count() {
            0 => {}
            1 => out.push_str(&run),
            _ => out.push(' '),
        }
        run.clear();
        out.push(c);
    }

    out
}

/// Number of whitespace-delimited words. The empty string has none.
pub fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}

/// Flexible comparison key: quotes unified, punctuation gone, lowercased.
pub fn flexible(s: &str) -> String {
    remove_punctuation(&normalize(s)).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_quotes() {
        assert_eq!(normalize("\u{201C}Hi\u{201D}"), "\"Hi\"");
        assert_eq!(normalize("don\u{2019}t"), "don't");
        assert_eq!(normalize("don\u{2018}t"), "don't");
        assert_eq!(normalize("don\u{00B4}t"), "don't");
        assert_eq!(normalize("don`t"), "don't");
        assert_eq!(normalize("a\u{201A} b"), "a, b");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "",
            "plain text",
            "\u{201C}Quoted\u{201D} and \u{2018}single\u{2019}",
            "mixed ´ ` \u{201A} glyphs",
            "café \u{00E9}tude",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn test_remove_punctuation() {
        assert_eq!(remove_punctuation("The dog, ran!"), "The dog ran");
        assert_eq!(remove_punctuation("it's 42."), "its 42");
        assert_eq!(remove_punctuation("¡Hola!"), "Hola");
        assert_eq!(remove_punctuation(""), "");
    }

    #[test]
    fn test_remove_spaces() {
        assert_eq!(remove_spaces(" a b\tc\n"), "abc");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  The   dog  ran. "), "The dog ran.");
        assert_eq!(collapse_whitespace("one two"), "one two");
        assert_eq!(collapse_whitespace("   "), "");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("one"), 1);
        assert_eq!(word_count("The dog ran quickly."), 4);
    }

    #[test]
    fn test_flexible_key() {
        assert_eq!(flexible("The Dog\u{2019}s bone."), "the dogs bone");
    }
}
