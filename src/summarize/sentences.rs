//! Sentence splitting and character-bounded truncation.

/// Split text into sentences at whitespace that follows `.`, `!` or `?`.
///
/// Terminal punctuation stays with its sentence and the separating
/// whitespace run is dropped. Text with no such boundary is one sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c.is_whitespace() && matches!(prev, Some('.' | '!' | '?')) {
            let mut end = i + c.len_utf8();
            while let Some(&(j, next)) = chars.peek() {
                if !next.is_whitespace() {
                    break;
                }
                end = j + next.len_utf8();
                chars.next();
            }
            sentences.push(&text[start..i]);
            start = end;
            prev = None;
            continue;
        }
        prev = Some(c);
    }

    sentences.push(&text[start..]);
    sentences
}

/// The first `n` sentences joined by single spaces, trimmed.
pub fn first_sentences(text: &str, n: usize) -> String {
    split_sentences(text)
        .into_iter()
        .take(n)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// At most `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}
