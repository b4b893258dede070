//! Character-level normalization applied before splitting.
//!
//! Two mutually exclusive modes are supported:
//!
//! - **Transliteration**: every non-ASCII character is replaced by its closest
//!   ASCII approximation through a [`Transliterate`] implementation. The result is
//!   best-effort and lossy (`"Café Zürich"` becomes `"Cafe Zurich"`, symbols with no
//!   Latin reading may disappear or expand to several letters).
//! - **Stripping**: every non-ASCII character is dropped, except the en-dash
//!   (U+2013) which is kept so that ranges like `1990–2000` survive.

/// The en-dash survives [`remove_non_ascii`].
pub const EN_DASH: char = '\u{2013}';

/// Unicode to ASCII transliteration.
///
/// Implementations must return ASCII-only text for any input and must be
/// deterministic. Exact output is implementation defined.
pub trait Transliterate: Send + Sync {
    fn transliterate(&self, text: &str) -> String;
}

/// Default transliteration backed by the `deunicode` tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct Deunicode;

impl Transliterate for Deunicode {
    fn transliterate(&self, text: &str) -> String {
        deunicode::deunicode(text)
    }
}

impl<F> Transliterate for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn transliterate(&self, text: &str) -> String {
        self(text)
    }
}

/// Drop every character outside the ASCII range, keeping [`EN_DASH`].
pub fn remove_non_ascii(text: &str) -> String {
    text.chars()
        .filter(|&c| c.is_ascii() || c == EN_DASH)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deunicode_accents() {
        assert_eq!(Deunicode.transliterate("Café Zürich"), "Cafe Zurich");
    }

    #[test]
    fn test_deunicode_keeps_ascii() {
        let text = "plain ascii, 42!";
        assert_eq!(Deunicode.transliterate(text), text);
    }

    #[test]
    fn test_closure_transliterator() {
        let upper = |s: &str| s.to_ascii_uppercase();
        assert_eq!(upper.transliterate("abc"), "ABC");
    }

    #[test]
    fn test_remove_non_ascii() {
        assert_eq!(remove_non_ascii("naïve café"), "nave caf");
        assert_eq!(remove_non_ascii("1990\u{2013}2000"), "1990\u{2013}2000");
        assert_eq!(remove_non_ascii("日本語"), "");
    }
}
