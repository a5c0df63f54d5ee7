//! Field chunker - split one long description into display-sized chunks.
//!
//! Splits hierarchically at the coarsest boundary that still fits:
//! sentences, then phrases, then words. Pure function, no I/O.

/// Split granularity, coarsest first.
#[derive(Debug, Clone, Copy)]
enum Granularity {
    Sentence,
    Phrase,
    Word,
}

/// Split a description into chunks of at most `max_len` characters.
///
/// A description already under the budget is returned trimmed as the sole
/// chunk. Chunks are non-empty and trimmed; a single word longer than
/// `max_len` passes through whole. No content is dropped: re-joining the
/// chunks preserves every word of the original in order.
pub fn chunk_field(description: &str, max_len: usize) -> Vec<String> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if trimmed.len() <= max_len {
        return vec![trimmed.to_string()];
    }

    let mut chunks = Vec::new();
    let mut acc = String::new();
    for sentence in split_after(trimmed, &['.', '!', '?']) {
        accumulate(&mut chunks, &mut acc, sentence, max_len, Granularity::Sentence);
    }
    flush(&mut chunks, &mut acc);
    chunks
}

/// Fold one unit into the accumulator, flushing when it would overflow
/// and recursing to a finer granularity when the unit alone overflows.
fn accumulate(
    chunks: &mut Vec<String>,
    acc: &mut String,
    unit: &str,
    max_len: usize,
    level: Granularity,
) {
    if unit.len() > max_len {
        // The unit alone overflows: flush what we have and sub-split.
        flush(chunks, acc);
        match level {
            Granularity::Sentence => {
                for phrase in split_after(unit, &[',', ';']) {
                    accumulate(chunks, acc, phrase, max_len, Granularity::Phrase);
                }
            }
            Granularity::Phrase => {
                for word in unit.split(' ').filter(|w| !w.is_empty()) {
                    accumulate(chunks, acc, word, max_len, Granularity::Word);
                }
            }
            Granularity::Word => {
                // Unsplittable token: passes through whole.
                chunks.push(unit.trim().to_string());
            }
        }
        return;
    }

    let sep = match level {
        Granularity::Word if !acc.is_empty() => 1,
        _ => 0,
    };
    if acc.len() + sep + unit.len() > max_len && !acc.is_empty() {
        flush(chunks, acc);
    }
    if matches!(level, Granularity::Word) && !acc.is_empty() {
        acc.push(' ');
    }
    acc.push_str(unit);
}

fn flush(chunks: &mut Vec<String>, acc: &mut String) {
    let trimmed = acc.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
    acc.clear();
}

/// Split `text` into segments, each ending right after a run of
/// terminator characters plus the whitespace that follows them. The
/// delimiters stay attached to the preceding segment, so concatenating
/// the segments reproduces `text` exactly.
fn split_after<'a>(text: &'a str, terminators: &[char]) -> Vec<&'a str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut iter = text.char_indices().peekable();

    while let Some((_, ch)) = iter.next() {
        if !terminators.contains(&ch) {
            continue;
        }
        // Absorb consecutive terminators ("..", "?!")
        while let Some(&(_, next)) = iter.peek() {
            if terminators.contains(&next) {
                iter.next();
            } else {
                break;
            }
        }
        // Only a boundary if whitespace follows (avoids "1.1", "25.50")
        match iter.peek() {
            Some(&(_, next)) if next.is_whitespace() => {
                let mut end = text.len();
                while let Some(&(k, w)) = iter.peek() {
                    if w.is_whitespace() {
                        end = k + w.len_utf8();
                        iter.next();
                    } else {
                        end = k;
                        break;
                    }
                }
                parts.push(&text[start..end]);
                start = end;
            }
            _ => {}
        }
    }

    if start < text.len() {
        parts.push(&text[start..]);
    }
    parts
}
