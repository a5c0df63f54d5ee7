//! Segmenter - split raw document text into model-sized chunks.
//!
//! Splits on line boundaries, preferring natural breaks (blank lines,
//! section headers, decorative rules) over arbitrary mid-paragraph cuts.
//! Pure function, no I/O.

use regex::Regex;

/// How many lines to scan backward for a natural break before hard-cutting.
const BREAK_SCAN_WINDOW: usize = 50;

/// A natural break is only taken if the resulting chunk stays under this
/// fraction of the chunk budget.
const NATURAL_BREAK_RATIO: f64 = 0.8;

/// Policy table of natural-break heuristics.
///
/// The default rules are tuned for Spanish/English construction budgets
/// (chapter markers, measurement keywords, decorative rules). Swap in a
/// custom table via [`segment_with_rules`] for other document classes.
#[derive(Debug, Clone)]
pub struct BreakRules {
    /// Chapter/section prefixes: `1.`, `1.1`, `CHAPTER 2`, `CAPÍTULO 3`
    section_prefix: Regex,

    /// Domain keyword lines: TOTAL, SUBTOTAL, RESUMEN, PRESUPUESTO, ...
    keyword_prefix: Regex,

    /// Decorative separators: 3+ repeated `=`, `-`, `_`, `*`
    decorative_rule: Regex,

    /// Page markers: PÁGINA, PAGE, form feed
    page_marker: Regex,

    /// Lines at or above this length never count as heuristic headers
    max_header_len: usize,
}

impl Default for BreakRules {
    fn default() -> Self {
        Self {
            section_prefix: Regex::new(
                r"(?i)^(\d+\.?\s|\d+\.\d+\.?\s|CHAPTER\s+\d+|CAPÍTULO\s+\d+|CAP\.\s*\d+)",
            )
            .unwrap(),
            keyword_prefix: Regex::new(
                r"(?i)^(OBRA|PARTIDA|UNIDAD|MEDICIÓN|RESUMEN|TOTAL|SUBTOTAL|PRESUPUESTO)",
            )
            .unwrap(),
            decorative_rule: Regex::new(r"^[=\-_*]{3,}$").unwrap(),
            page_marker: Regex::new(r"^(PÁGINA|PAGE|\f)").unwrap(),
            max_header_len: 100,
        }
    }
}

impl BreakRules {
    /// Create the default rule table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the chapter/section prefix pattern.
    pub fn with_section_prefix(mut self, pattern: Regex) -> Self {
        self.section_prefix = pattern;
        self
    }

    /// Replace the domain keyword pattern.
    pub fn with_keyword_prefix(mut self, pattern: Regex) -> Self {
        self.keyword_prefix = pattern;
        self
    }

    /// Replace the page marker pattern.
    pub fn with_page_marker(mut self, pattern: Regex) -> Self {
        self.page_marker = pattern;
        self
    }

    /// Set the maximum length for heuristic all-caps headers.
    pub fn with_max_header_len(mut self, len: usize) -> Self {
        self.max_header_len = len;
        self
    }

    /// Does this line look like a section boundary?
    pub fn is_natural_break(&self, line: &str) -> bool {
        let trimmed = line.trim();

        // Empty lines are natural breaks
        if trimmed.is_empty() {
            return true;
        }

        if self.section_prefix.is_match(trimmed) {
            return true;
        }

        // Short all-caps lines with no punctuation are likely headers
        if trimmed == trimmed.to_uppercase()
            && trimmed.len() < self.max_header_len
            && !trimmed.contains(['.', ',', ':', ';'])
        {
            return true;
        }

        if self.keyword_prefix.is_match(trimmed) {
            return true;
        }

        if self.decorative_rule.is_match(trimmed) {
            return true;
        }

        if self.page_marker.is_match(trimmed) {
            return true;
        }

        false
    }
}

/// Split `text` into chunks of at most `max_chunk_size` characters using
/// the default break rules.
///
/// Order is preserved and no non-blank line is dropped: re-joining the
/// chunks with newlines reconstructs the original non-blank content. A
/// chunk exceeds the budget only when a single line is itself longer.
pub fn segment(text: &str, max_chunk_size: usize) -> Vec<String> {
    segment_with_rules(text, max_chunk_size, &BreakRules::default())
}

/// Split `text` into chunks using a custom break-rule table.
pub fn segment_with_rules(text: &str, max_chunk_size: usize, rules: &BreakRules) -> Vec<String> {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut chunks = Vec::new();
    let mut current = String::new();
    // Index of the first line accumulated into `current`
    let mut chunk_start = 0usize;

    for (i, line) in lines.iter().enumerate() {
        let joined_len = if current.is_empty() {
            line.len()
        } else {
            current.len() + 1 + line.len()
        };

        if joined_len > max_chunk_size && !current.is_empty() {
            match find_natural_break(&lines, chunk_start, i, max_chunk_size, rules) {
                Some(break_at) => {
                    // Flush through the break line, replay the rest into
                    // the next chunk together with the current line.
                    flush(&mut chunks, &lines[chunk_start..=break_at].join("\n"));
                    current = lines[break_at + 1..=i].join("\n");
                    chunk_start = break_at + 1;
                }
                None => {
                    // Hard cut at the current line
                    flush(&mut chunks, &current);
                    current = (*line).to_string();
                    chunk_start = i;
                }
            }
        } else if current.is_empty() {
            current = (*line).to_string();
            chunk_start = i;
        } else {
            current.push('\n');
            current.push_str(line);
        }
    }

    flush(&mut chunks, &current);
    chunks
}

/// Scan backward (up to [`BREAK_SCAN_WINDOW`] lines before `current`) for
/// the earliest natural break that keeps the flushed chunk under the soft
/// target. Returns the break line's index, or `None` to hard-cut.
fn find_natural_break(
    lines: &[&str],
    chunk_start: usize,
    current: usize,
    max_chunk_size: usize,
    rules: &BreakRules,
) -> Option<usize> {
    let scan_from = current.saturating_sub(BREAK_SCAN_WINDOW).max(chunk_start);
    let soft_limit = (max_chunk_size as f64 * NATURAL_BREAK_RATIO) as usize;

    // Joined length of lines[chunk_start..=i], maintained incrementally
    // with one newline per line (subtract the trailing one on compare).
    let mut joined: usize = lines[chunk_start..scan_from]
        .iter()
        .map(|l| l.len() + 1)
        .sum();

    for i in scan_from..current {
        joined += lines[i].len() + 1;
        if rules.is_natural_break(lines[i]) && joined - 1 < soft_limit {
            return Some(i);
        }
    }

    None
}

fn flush(chunks: &mut Vec<String>, chunk: &str) {
    let trimmed = chunk.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}
