//! Comment stripping
//!
//! Runs over the whole source before tokenization. `/* ... */` blocks are
//! closed by the first `*/` (no nesting) and `//` comments run to the end of
//! the line. An unterminated `/*` is left untouched. String literals are
//! copied as they are, so `"http://x"` keeps its slashes; a literal runs to
//! the next `"` exactly as the tokenizer reads it.
//!
//! Newlines inside a removed block comment are kept, so the locations the
//! tokenizer reports still match the source file.

/// What starts the next span that is not plain code
#[derive(Debug, Clone, Copy)]
enum Marker {
    Quote,
    Block,
    Line,
}

/// Position and kind of the first quote or comment opener in `text`
fn next_marker(text: &str) -> Option<(usize, Marker)> {
    [
        text.find('"').map(|at| (at, Marker::Quote)),
        text.find("/*").map(|at| (at, Marker::Block)),
        text.find("//").map(|at| (at, Marker::Line)),
    ]
    .into_iter()
    .flatten()
    .min_by_key(|&(at, _)| at)
}

/// Remove block and line comments from `source`.
pub fn strip_comments(source: &str) -> String {
    let mut output = String::with_capacity(source.len());
    let mut rest = source;

    while let Some((at, marker)) = next_marker(rest) {
        output.push_str(&rest[..at]);
        rest = &rest[at..];

        match marker {
            Marker::Quote => match rest[1..].find('"') {
                Some(close) => {
                    output.push_str(&rest[..close + 2]);
                    rest = &rest[close + 2..];
                }
                // the tokenizer reports the unterminated literal
                None => {
                    output.push_str(rest);
                    return output;
                }
            },
            Marker::Block => match rest[2..].find("*/") {
                Some(end) => {
                    let comment = &rest[..end + 4];
                    output.extend(comment.chars().filter(|&c| c == '\n'));
                    rest = &rest[end + 4..];
                }
                None => {
                    output.push_str(rest);
                    return output;
                }
            },
            Marker::Line => match rest.find('\n') {
                Some(nl) => rest = &rest[nl..],
                None => return output,
            },
        }
    }

    output.push_str(rest);
    output
}
