/// Reflow `text` so no line is longer than `width` characters.
///
/// Breaks only at whitespace; a single word longer than `width` keeps its own
/// line. Existing line breaks are kept (CRLF and CR become LF), blank lines
/// between paragraphs survive, and leading/trailing blank lines are dropped.
pub fn wrap_text(text: &str, width: usize) -> String {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

    let lines: Vec<String> = normalized
        .split('\n')
        .flat_map(|line| wrap_line(line, width))
        .collect();

    let start = lines.iter().position(|l| !l.is_empty());
    let end = lines.iter().rposition(|l| !l.is_empty());
    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}

fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in line.split_whitespace() {
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

    // A whitespace-only input line still counts as a (blank) line.
    lines.push(current);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_unchanged() {
        assert_eq!(wrap_text("fix the parser", 100), "fix the parser");
    }

    #[test]
    fn breaks_at_whitespace_within_width() {
        let wrapped = wrap_text("aaa bbb ccc ddd", 7);
        assert_eq!(wrapped, "aaa bbb\nccc ddd");
    }

    #[test]
    fn long_word_keeps_its_own_line() {
        let wrapped = wrap_text("a verylongwordthatdoesnotfit b", 10);
        assert_eq!(wrapped, "a\nverylongwordthatdoesnotfit\nb");
    }

    #[test]
    fn keeps_paragraph_breaks_and_normalizes_crlf() {
        let wrapped = wrap_text("first line\r\n\r\nsecond   line  \r", 100);
        assert_eq!(wrapped, "first line\n\nsecond line");
    }

    #[test]
    fn drops_surrounding_blank_lines() {
        assert_eq!(wrap_text("\n\n  body \n\n", 100), "body");
        assert_eq!(wrap_text("   \n  ", 100), "");
    }

    #[test]
    fn no_line_exceeds_width() {
        let text = "lorem ipsum dolor sit amet ".repeat(20);
        for line in wrap_text(&text, 30).lines() {
            assert!(line.chars().count() <= 30, "line too long: {line:?}");
            assert_eq!(line, line.trim_end());
        }
    }
}
