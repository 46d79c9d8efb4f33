use super::Scanner;

/// Iterating a scanner decodes from the cursor and advances it: the
/// scanner is its own iterator, so iteration can stop at any point and
/// resume after further scanning. Restarting from the window start is a
/// clone away.
impl Iterator for Scanner {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        self.character().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Remaining bytes bound the code-point count: at most one code
        // point per byte, at least one per four bytes.
        let bytes = self.remaining();
        (bytes.div_ceil(4), Some(bytes))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::compat::{String, Vec};

    #[test]
    fn test_collect_restores_text() {
        let s = Scanner::new("añ😀—z");
        let collected: String = s.clone().collect();
        assert_eq!(collected, s.as_str());
    }

    #[test]
    fn test_iteration_advances_the_scanner() {
        let mut s = Scanner::new("ab—");
        assert_eq!(s.next(), Some('a'));
        assert_eq!(s.offset(), 1);
        assert_eq!(s.next(), Some('b'));
        assert_eq!(s.next(), Some('—'));
        assert_eq!(s.next(), None);
        assert!(s.is_at_end());
    }

    #[test]
    fn test_iteration_resumes_after_scanning() {
        let mut s = Scanner::new("ab?cd");
        assert_eq!(s.next(), Some('a'));
        s.read_until('?').unwrap();
        s.advance(1).unwrap();
        let rest: String = s.collect();
        assert_eq!(rest, "cd");
    }

    #[test]
    fn test_size_hint_brackets_count() {
        for text in ["", "ascii", "añ😀—z", "———"] {
            let s = Scanner::new(text);
            let (lower, upper) = s.size_hint();
            let count = s.clone().count();
            assert!(lower <= count, "lower bound for {text:?}");
            assert!(count <= text.len());
            assert_eq!(upper, Some(text.len()));
        }
    }

    #[test]
    fn test_clone_restarts_iteration() {
        let s = Scanner::new("xyz");
        let first: Vec<char> = s.clone().collect();
        let second: Vec<char> = s.collect();
        assert_eq!(first, second);
    }
}
