//! Comment-stripping preprocessor.

/// Streaming filter that removes every `/* ... */` span from a character
/// source before tokenization.
///
/// One character of lookahead re-emits a `/` that is not followed by `*`.
/// Comments do not nest, and an unterminated comment silently consumes the
/// rest of the input. The filter is forward-only and consumed once.
///
/// Quoting is not considered here: a comment opener inside a quoted value
/// is stripped all the same.
pub struct CommentStripper<I: Iterator<Item = char>> {
    input: I,
    /// Lookahead character pulled while testing for a comment opener.
    pending: Option<char>,
}

impl<I: Iterator<Item = char>> CommentStripper<I> {
    /// Wrap a character source.
    pub fn new(input: I) -> Self {
        Self {
            input,
            pending: None,
        }
    }
}

impl<I: Iterator<Item = char>> Iterator for CommentStripper<I> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        loop {
            let ch = match self.pending.take() {
                Some(pending) => pending,
                None => self.input.next()?,
            };
            if ch != '/' {
                return Some(ch);
            }
            match self.input.next() {
                Some('*') => {
                    // Consume through the closing `*/`, or to end of input.
                    let mut star = false;
                    for inner in self.input.by_ref() {
                        if star && inner == '/' {
                            break;
                        }
                        star = inner == '*';
                    }
                }
                other => {
                    self.pending = other;
                    return Some('/');
                }
            }
        }
    }
}
