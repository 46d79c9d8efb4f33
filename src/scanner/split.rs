use memchr::memchr_iter;

use super::Scanner;
use crate::compat::Vec;
use crate::unicode::utf8;

impl Scanner {
    /// Split the remaining window on `separator`, consuming it.
    ///
    /// Segments are sub-scanners; nothing is copied. The semantics match
    /// `str::split` with one exception: an empty window yields no
    /// segments rather than one empty segment. Consecutive separators
    /// yield empty segments between them, and a trailing separator
    /// yields a final empty segment.
    ///
    /// For an ASCII separator, occurrences are counted in one raw byte
    /// pass first so the segment list is sized exactly.
    ///
    /// ```
    /// use textscan::Scanner;
    ///
    /// let mut scanner = Scanner::new("/test?a=1&b=2");
    /// scanner.read_until('?').unwrap();
    /// scanner.advance(1).unwrap();
    /// let pairs = scanner.split('&');
    /// let views: Vec<&str> = pairs.iter().map(|p| p.as_str()).collect();
    /// assert_eq!(views, ["a=1", "b=2"]);
    /// ```
    pub fn split(&mut self, separator: char) -> Vec<Self> {
        if self.is_at_end() {
            return Vec::new();
        }
        let mut segments = if separator.is_ascii() {
            let count = memchr_iter(separator as u8, self.as_bytes()).count();
            Vec::with_capacity(count + 1)
        } else {
            Vec::new()
        };
        loop {
            let (segment, found) = self.read_until_or_end(separator);
            segments.push(segment);
            if !found {
                break;
            }
            // Step over the separator itself
            self.cursor += utf8::sequence_len(self.buffer.as_bytes()[self.cursor]);
            if self.is_at_end() {
                segments.push(self.sub_scanner(self.cursor, self.cursor));
                break;
            }
        }
        segments
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn views(segments: &[Scanner]) -> Vec<&str> {
        segments.iter().map(Scanner::as_str).collect()
    }

    #[test]
    fn test_split_query_pairs() {
        let mut s = Scanner::new("/test?a=1&b=2");
        s.read_until('?').unwrap();
        s.advance(1).unwrap();
        let pairs = s.split('&');
        assert_eq!(views(&pairs), ["a=1", "b=2"]);
        assert!(s.is_at_end());
    }

    #[test]
    fn test_split_empty_window_yields_nothing() {
        let mut s = Scanner::new("");
        assert!(s.split('&').is_empty());

        let mut s = Scanner::new("ab");
        s.advance(2).unwrap();
        assert!(s.split('&').is_empty());
    }

    #[test]
    fn test_split_no_separator_is_single_segment() {
        let mut s = Scanner::new("alone");
        assert_eq!(views(&s.split('&')), ["alone"]);
    }

    #[test]
    fn test_split_empty_segments() {
        let mut s = Scanner::new("a&&b");
        assert_eq!(views(&s.split('&')), ["a", "", "b"]);

        let mut s = Scanner::new("&a");
        assert_eq!(views(&s.split('&')), ["", "a"]);

        let mut s = Scanner::new("a&");
        assert_eq!(views(&s.split('&')), ["a", ""]);

        let mut s = Scanner::new("&");
        assert_eq!(views(&s.split('&')), ["", ""]);
    }

    #[test]
    fn test_split_matches_str_split_on_non_empty_input() {
        for text in ["a=1&b=2", "a&&b&", "&&", "x", "a=1&b=2&c=3&d=4"] {
            let mut s = Scanner::new(text);
            let ours = s.split('&');
            let std: Vec<&str> = text.split('&').collect();
            assert_eq!(views(&ours), std, "split of {text:?}");
        }
    }

    #[test]
    fn test_split_non_ascii_separator() {
        let mut s = Scanner::new("one—two—three");
        assert_eq!(views(&s.split('—')), ["one", "two", "three"]);
    }

    #[test]
    fn test_split_sub_scanner_stays_in_window() {
        let mut s = Scanner::new("a=1&b=2#frag");
        let mut query = s.read_until('#').unwrap();
        let pairs = query.split('&');
        assert_eq!(views(&pairs), ["a=1", "b=2"]);
        // Segment windows never leak past the parent window
        assert_eq!(pairs[1].remaining(), 3);
    }

    #[test]
    fn test_split_segments_scan_independently() {
        let mut s = Scanner::new("this=true&that=false");
        let pairs = s.split('&');
        let mut first = pairs[0].clone();
        let key = first.read_until('=').unwrap();
        assert_eq!(key.as_str(), "this");
        assert_eq!(pairs[0].offset(), 0);
    }
}
