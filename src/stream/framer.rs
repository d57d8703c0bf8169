//! Newline framing over decoded text.

/// Splits decoded text into complete `\n`-terminated lines.
///
/// The text after the last newline is buffered and re-prefixed to the next
/// push, so chunk boundaries never have to line up with line boundaries.
#[derive(Debug, Default, Clone)]
pub struct LineFramer {
    pending: String,
}

impl LineFramer {
    /// Create a framer with an empty pending fragment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append decoded text and return every line it completes, in order.
    ///
    /// Returned lines do not include the `\n` terminator.
    pub fn push(&mut self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        self.pending.push_str(text);

        let Some(last_newline) = self.pending.rfind('\n') else {
            return Vec::new();
        };

        let fragment = self.pending.split_off(last_newline + 1);
        let mut complete = std::mem::replace(&mut self.pending, fragment);
        complete.pop(); // trailing '\n'

        complete.split('\n').map(str::to_owned).collect()
    }

    /// The unterminated text carried to the next push.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// End of stream: discard the dangling fragment.
    ///
    /// Returns the discarded text when it was non-empty so callers can log it.
    pub fn finish(&mut self) -> Option<String> {
        let fragment = std::mem::take(&mut self.pending);
        (!fragment.is_empty()).then_some(fragment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_complete_line() {
        let mut framer = LineFramer::new();
        assert_eq!(framer.push("data: a\n"), vec!["data: a"]);
        assert_eq!(framer.pending(), "");
    }

    #[test]
    fn test_partial_line_is_buffered() {
        let mut framer = LineFramer::new();
        assert!(framer.push("data: {\"con").is_empty());
        assert_eq!(framer.pending(), "data: {\"con");

        assert_eq!(
            framer.push("tent\":\"Hi\"}\n"),
            vec!["data: {\"content\":\"Hi\"}"]
        );
        assert_eq!(framer.pending(), "");
    }

    #[test]
    fn test_multiple_lines_and_trailing_fragment() {
        let mut framer = LineFramer::new();
        let lines = framer.push("one\n\ntwo\nthr");
        assert_eq!(lines, vec!["one", "", "two"]);
        assert_eq!(framer.pending(), "thr");

        assert_eq!(framer.push("ee\n"), vec!["three"]);
    }

    #[test]
    fn test_newline_only_chunk_completes_pending() {
        let mut framer = LineFramer::new();
        framer.push("data: x");
        assert_eq!(framer.push("\n"), vec!["data: x"]);
    }

    #[test]
    fn test_carriage_returns_are_left_for_the_parser() {
        let mut framer = LineFramer::new();
        assert_eq!(framer.push("data: x\r\n"), vec!["data: x\r"]);
    }

    #[test]
    fn test_empty_push_is_noop() {
        let mut framer = LineFramer::new();
        framer.push("abc");
        assert!(framer.push("").is_empty());
        assert_eq!(framer.pending(), "abc");
    }

    #[test]
    fn test_finish_discards_dangling_fragment() {
        let mut framer = LineFramer::new();
        framer.push("data: {\"content\":\"lost\"}");
        assert_eq!(
            framer.finish(),
            Some("data: {\"content\":\"lost\"}".to_string())
        );
        assert_eq!(framer.pending(), "");
        assert_eq!(framer.finish(), None);
    }
}
