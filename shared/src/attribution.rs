//! Inline source attribution for description text.
//!
//! Sources are handed out one per sentence, in order, and never repeated.
//! Sentences left over after the sources run out stay bare. When there are
//! more sources than sentences the surplus lands on the last sentence, and a
//! one-sentence text carries every source at its end.

use crate::model::Source;

/// A sentence and the sources cited after it.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributedSentence<'a> {
    /// Sentence text, trimmed, terminal punctuation included.
    pub text: &'a str,
    /// Sources cited after the sentence.
    pub sources: Vec<&'a Source>,
}

/// Splits at `.`, `!` or `?` followed by whitespace or the end of the text.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((index, ch)) = chars.next() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        let boundary = match chars.peek() {
            None => true,
            Some((_, next)) => next.is_whitespace(),
        };
        if boundary {
            let end = index + ch.len_utf8();
            push_trimmed(&mut sentences, &text[start..end]);
            start = end;
        }
    }
    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, piece: &'a str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        sentences.push(piece);
    }
}

/// Pairs the sentences of `text` with `sources`.
pub fn attribute<'a>(text: &'a str, sources: &'a [Source]) -> Vec<AttributedSentence<'a>> {
    let mut sentences: Vec<AttributedSentence<'a>> = split_sentences(text)
        .into_iter()
        .map(|text| AttributedSentence {
            text,
            sources: Vec::new(),
        })
        .collect();

    let Some(last) = sentences.len().checked_sub(1) else {
        return sentences;
    };
    for (index, source) in sources.iter().enumerate() {
        sentences[index.min(last)].sources.push(source);
    }
    sentences
}

/// Renders attributed sentences as plain text, citations in parentheses.
pub fn render_plain(sentences: &[AttributedSentence<'_>]) -> String {
    sentences
        .iter()
        .map(|sentence| {
            if sentence.sources.is_empty() {
                sentence.text.to_string()
            } else {
                let cites: Vec<String> = sentence.sources.iter().map(|source| source.citation()).collect();
                format!("{} ({})", sentence.text, cites.join("; "))
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
