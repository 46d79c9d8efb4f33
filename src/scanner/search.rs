use memchr::{memchr, memchr2, memchr3, memmem};

use super::Scanner;
use crate::error::{Result, ScanError};
use crate::unicode::utf8;

/// Needles at most this many bytes long are matched inline with a
/// first-byte scan; longer ones go through `memmem`.
const INLINE_NEEDLE_MAX: usize = 8;

impl Scanner {
    /// Read up to (not including) `delimiter`.
    ///
    /// The returned sub-scanner spans from the cursor to the match, and
    /// the cursor is left on the delimiter so the caller decides whether
    /// to consume it. Finding the delimiter at the cursor is a valid,
    /// empty match.
    ///
    /// ASCII delimiters are searched as raw bytes with `memchr`.
    ///
    /// ```
    /// use textscan::Scanner;
    ///
    /// let mut scanner = Scanner::new("this=true&that=false");
    /// let pair = scanner.read_until('&').unwrap();
    /// assert_eq!(pair.as_str(), "this=true");
    /// assert_eq!(scanner.peek(), Some('&'));
    /// ```
    ///
    /// # Errors
    ///
    /// [`ScanError::Overflow`] when the delimiter does not occur; the
    /// cursor stays put.
    pub fn read_until(&mut self, delimiter: char) -> Result<Self> {
        let hit = self.find_scalar(delimiter);
        self.span_to(hit)
    }

    /// Non-failing form of [`read_until`](Self::read_until).
    ///
    /// Returns the sub-scanner plus whether the delimiter was found.
    /// When it was not, the view covers the rest of the window and the
    /// cursor lands at the end.
    pub fn read_until_or_end(&mut self, delimiter: char) -> (Self, bool) {
        let hit = self.find_scalar(delimiter);
        self.span_to_or_end(hit)
    }

    /// Read up to the first code point contained in `delimiters`.
    ///
    /// Sets of at most four ASCII members are searched as raw bytes;
    /// anything else decodes code point by code point. An empty set
    /// never matches.
    ///
    /// # Errors
    ///
    /// [`ScanError::Overflow`] when no member occurs; the cursor stays
    /// put.
    pub fn read_until_any(&mut self, delimiters: &[char]) -> Result<Self> {
        let hit = self.find_any(delimiters);
        self.span_to(hit)
    }

    /// Non-failing form of [`read_until_any`](Self::read_until_any).
    pub fn read_until_any_or_end(&mut self, delimiters: &[char]) -> (Self, bool) {
        let hit = self.find_any(delimiters);
        self.span_to_or_end(hit)
    }

    /// Read up to the first code point for which `predicate` is true.
    ///
    /// Always decodes; arbitrary predicates have no byte-level shortcut.
    ///
    /// # Errors
    ///
    /// [`ScanError::Overflow`] when the predicate never matches; the
    /// cursor stays put.
    pub fn read_until_matching(
        &mut self,
        mut predicate: impl FnMut(char) -> bool,
    ) -> Result<Self> {
        let hit = self.find_matching(&mut predicate);
        self.span_to(hit)
    }

    /// Non-failing form of
    /// [`read_until_matching`](Self::read_until_matching).
    pub fn read_until_matching_or_end(
        &mut self,
        mut predicate: impl FnMut(char) -> bool,
    ) -> (Self, bool) {
        let hit = self.find_matching(&mut predicate);
        self.span_to_or_end(hit)
    }

    /// Read up to the first occurrence of `needle`.
    ///
    /// The cursor is left on the first byte of the match. Needles of at
    /// most eight bytes use an inline first-byte scan; longer ones use
    /// `memmem`.
    ///
    /// # Errors
    ///
    /// [`ScanError::EmptyString`] for an empty needle;
    /// [`ScanError::Overflow`] when the needle does not occur (the
    /// cursor stays put).
    pub fn read_until_str(&mut self, needle: &str) -> Result<Self> {
        if needle.is_empty() {
            return Err(ScanError::EmptyString);
        }
        let hit = self.find_str(needle.as_bytes());
        self.span_to(hit)
    }

    /// Non-failing form of [`read_until_str`](Self::read_until_str):
    /// a missing needle yields the rest of the window instead of an
    /// overflow.
    ///
    /// # Errors
    ///
    /// [`ScanError::EmptyString`] for an empty needle.
    pub fn read_until_str_or_end(&mut self, needle: &str) -> Result<(Self, bool)> {
        if needle.is_empty() {
            return Err(ScanError::EmptyString);
        }
        let hit = self.find_str(needle.as_bytes());
        Ok(self.span_to_or_end(hit))
    }

    /// Like [`read_until_str`](Self::read_until_str), but the cursor
    /// skips past the needle. The returned view still excludes it.
    ///
    /// ```
    /// use textscan::Scanner;
    ///
    /// let mut scanner = Scanner::new("https://example.com:8080/test");
    /// let scheme = scanner.read_through_str("://").unwrap();
    /// assert_eq!(scheme.as_str(), "https");
    /// assert_eq!(scanner.as_str(), "example.com:8080/test");
    /// ```
    ///
    /// # Errors
    ///
    /// [`ScanError::EmptyString`] for an empty needle;
    /// [`ScanError::Overflow`] when the needle does not occur (the
    /// cursor stays put).
    pub fn read_through_str(&mut self, needle: &str) -> Result<Self> {
        if needle.is_empty() {
            return Err(ScanError::EmptyString);
        }
        let hit = self.find_str(needle.as_bytes());
        let span = self.span_to(hit)?;
        self.cursor += needle.len();
        Ok(span)
    }

    /// Skip a run of `c`, returning how many were consumed.
    /// A zero-length run is not an error.
    pub fn read_while_char(&mut self, c: char) -> usize {
        if c.is_ascii() {
            let key = c as u8;
            let rest = self.as_bytes();
            let run = rest.iter().position(|&b| b != key).unwrap_or(rest.len());
            self.cursor += run;
            run
        } else {
            let bytes = self.buffer.as_bytes();
            let mut pos = self.cursor;
            let mut run = 0;
            while pos < self.end {
                let (ch, next) = utf8::decode(bytes, pos);
                if ch != c {
                    break;
                }
                pos = next;
                run += 1;
            }
            self.cursor = pos;
            run
        }
    }

    /// Consume code points while `predicate` holds, returning the run
    /// as a sub-scanner. Never fails; an empty run is an empty view.
    pub fn read_while(&mut self, mut predicate: impl FnMut(char) -> bool) -> Self {
        let bytes = self.buffer.as_bytes();
        let mut pos = self.cursor;
        while pos < self.end {
            let (c, next) = utf8::decode(bytes, pos);
            if !predicate(c) {
                break;
            }
            pos = next;
        }
        let span = self.sub_scanner(self.cursor, pos);
        self.cursor = pos;
        span
    }

    /// Consume code points while they are members of `set`, returning
    /// the run as a sub-scanner. Small ASCII sets scan raw bytes, which
    /// always stops at a multi-byte lead.
    pub fn read_while_any(&mut self, set: &[char]) -> Self {
        let stop = if let Some(keys) = AsciiKeys::extract(set) {
            let rest = self.as_bytes();
            let run = rest
                .iter()
                .position(|&b| !keys.contains(b))
                .unwrap_or(rest.len());
            self.cursor + run
        } else {
            let bytes = self.buffer.as_bytes();
            let mut pos = self.cursor;
            while pos < self.end {
                let (c, next) = utf8::decode(bytes, pos);
                if !set.contains(&c) {
                    break;
                }
                pos = next;
            }
            pos
        };
        let span = self.sub_scanner(self.cursor, stop);
        self.cursor = stop;
        span
    }

    /// Absolute index of the next `delimiter`, or `None`.
    fn find_scalar(&self, delimiter: char) -> Option<usize> {
        if delimiter.is_ascii() {
            // Raw byte search cannot land inside a multi-byte sequence:
            // every non-ASCII byte has the high bit set.
            memchr(delimiter as u8, self.as_bytes()).map(|i| self.cursor + i)
        } else {
            let bytes = self.buffer.as_bytes();
            let mut pos = self.cursor;
            while pos < self.end {
                let (c, next) = utf8::decode(bytes, pos);
                if c == delimiter {
                    return Some(pos);
                }
                pos = next;
            }
            None
        }
    }

    /// Absolute index of the next member of `set`, or `None`.
    fn find_any(&self, set: &[char]) -> Option<usize> {
        if let Some(keys) = AsciiKeys::extract(set) {
            keys.find(self.as_bytes()).map(|i| self.cursor + i)
        } else {
            let bytes = self.buffer.as_bytes();
            let mut pos = self.cursor;
            while pos < self.end {
                let (c, next) = utf8::decode(bytes, pos);
                if set.contains(&c) {
                    return Some(pos);
                }
                pos = next;
            }
            None
        }
    }

    /// Absolute index of the next code point matching `predicate`, or
    /// `None`.
    fn find_matching(&self, predicate: &mut impl FnMut(char) -> bool) -> Option<usize> {
        let bytes = self.buffer.as_bytes();
        let mut pos = self.cursor;
        while pos < self.end {
            let (c, next) = utf8::decode(bytes, pos);
            if predicate(c) {
                return Some(pos);
            }
            pos = next;
        }
        None
    }

    /// Absolute index of the next occurrence of `needle`, or `None`.
    /// The needle must be non-empty.
    fn find_str(&self, needle: &[u8]) -> Option<usize> {
        let rest = self.as_bytes();
        let at = if needle.len() <= INLINE_NEEDLE_MAX {
            let mut from = 0;
            loop {
                let i = from + memchr(needle[0], &rest[from..])?;
                if rest[i..].starts_with(needle) {
                    break i;
                }
                from = i + 1;
            }
        } else {
            memmem::find(rest, needle)?
        };
        Some(self.cursor + at)
    }

    /// Frame `[cursor, hit)` and park the cursor on the hit.
    fn span_to(&mut self, hit: Option<usize>) -> Result<Self> {
        match hit {
            Some(at) => {
                let span = self.sub_scanner(self.cursor, at);
                self.cursor = at;
                Ok(span)
            }
            None => Err(ScanError::Overflow),
        }
    }

    /// Like [`span_to`](Self::span_to), but a miss frames the rest of
    /// the window and parks the cursor at the end.
    fn span_to_or_end(&mut self, hit: Option<usize>) -> (Self, bool) {
        let (at, found) = match hit {
            Some(at) => (at, true),
            None => (self.end, false),
        };
        let span = self.sub_scanner(self.cursor, at);
        self.cursor = at;
        (span, found)
    }
}

/// Set members extracted as raw ASCII bytes, when every member is ASCII
/// and there are at most four. One to three keys dispatch to the
/// corresponding `memchr` routine; four use a short comparison chain.
#[derive(Clone, Copy)]
struct AsciiKeys {
    keys: [u8; 4],
    len: usize,
}

impl AsciiKeys {
    fn extract(set: &[char]) -> Option<Self> {
        if set.is_empty() || set.len() > 4 {
            return None;
        }
        let mut keys = [0u8; 4];
        for (slot, &c) in keys.iter_mut().zip(set) {
            if !c.is_ascii() {
                return None;
            }
            *slot = c as u8;
        }
        Some(Self {
            keys,
            len: set.len(),
        })
    }

    fn find(self, haystack: &[u8]) -> Option<usize> {
        let [a, b, c, d] = self.keys;
        match self.len {
            1 => memchr(a, haystack),
            2 => memchr2(a, b, haystack),
            3 => memchr3(a, b, c, haystack),
            _ => haystack
                .iter()
                .position(|&x| x == a || x == b || x == c || x == d),
        }
    }

    fn contains(self, byte: u8) -> bool {
        self.keys[..self.len].contains(&byte)
    }
}
