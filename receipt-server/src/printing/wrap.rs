//! Greedy word wrapping for receipt text
//!
//! Breaks on whitespace and never splits a word: a single word longer than
//! the width stands alone on its own (over-long) line rather than being cut.

/// Wrap `text` into lines of at most `width` characters
///
/// Consecutive whitespace collapses to a single space; leading/trailing
/// whitespace is dropped. A width of 0 is clamped to 1.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_single_line() {
        assert_eq!(wrap("Buy milk", 44), vec!["Buy milk"]);
    }

    #[test]
    fn test_wraps_at_width() {
        let lines = wrap("one two three four five six", 10);
        for line in &lines {
            assert!(line.chars().count() <= 10, "line too long: {:?}", line);
        }
        assert_eq!(lines, vec!["one two", "three four", "five six"]);
    }

    #[test]
    fn test_never_splits_words() {
        let lines = wrap("short supercalifragilistic short", 10);
        // The over-long word stands alone, exceeding the width
        assert_eq!(lines, vec!["short", "supercalifragilistic", "short"]);
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(wrap("  a   b \t c  ", 10), vec!["a b c"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(wrap("", 10).is_empty());
        assert!(wrap("   ", 10).is_empty());
    }

    #[test]
    fn test_exact_fit() {
        assert_eq!(wrap("ab cd", 5), vec!["ab cd"]);
        assert_eq!(wrap("ab cde", 5), vec!["ab", "cde"]);
    }
}
