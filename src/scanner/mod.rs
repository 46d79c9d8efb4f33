mod iter;
mod search;
mod split;

use crate::buffer::Buffer;
use crate::compat::Cow;
use crate::error::{Result, ScanError};
use crate::unicode::{percent, utf8};

/// Zero-copy scanner over a shared, immutable, UTF-8 byte buffer.
///
/// A scanner is a small descriptor: a reference-counted buffer handle, a
/// `[start, end)` window restricting what it may see, and a cursor. Every
/// match operation returns a new scanner framing the matched sub-range:
/// a view into the same storage, never a copy. Cloning is equally cheap,
/// which is also how a parse position is saved for backtracking.
///
/// The buffer is validated (or comes from `str`) at construction, so scan
/// operations decode without rechecking and single-byte ASCII delimiters
/// are searched as raw bytes.
///
/// ```
/// use textscan::Scanner;
///
/// let mut scanner = Scanner::new("/test/path?this=true#end");
/// let path = scanner.read_until('?').unwrap();
/// assert_eq!(path.as_str(), "/test/path");
/// assert_eq!(scanner.offset(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct Scanner {
    buffer: Buffer,
    /// Window edges: absolute byte indexes, always code-point boundaries
    start: usize,
    end: usize,
    /// Absolute byte index, `start <= cursor <= end`, always a boundary
    cursor: usize,
}

impl Scanner {
    /// Create a scanner over `text`.
    ///
    /// The type already guarantees well-formed UTF-8, so no validation
    /// pass runs. The text is copied into shared storage once; everything
    /// afterwards is a view.
    pub fn new(text: &str) -> Self {
        Self::trusted(Buffer::from(text))
    }

    /// Create a scanner over arbitrary bytes, validating them as UTF-8.
    ///
    /// This is the entry point for decoded protocol text whose encoding
    /// is not yet trusted. The validation pass is O(n) and runs exactly
    /// once; scan operations rely on it afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidUtf8`] if the bytes are malformed
    /// (truncated sequences, bad continuation bytes, overlong forms,
    /// surrogates, values above U+10FFFF).
    pub fn from_utf8(bytes: impl Into<Buffer>) -> Result<Self> {
        let buffer = bytes.into();
        if !utf8::validate(buffer.as_bytes()) {
            return Err(ScanError::InvalidUtf8);
        }
        Ok(Self::trusted(buffer))
    }

    fn trusted(buffer: Buffer) -> Self {
        let end = buffer.len();
        Self {
            buffer,
            start: 0,
            end,
            cursor: 0,
        }
    }

    /// Check if the cursor has reached the end of the window
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.cursor >= self.end
    }

    /// Byte offset of the cursor from the window start
    #[inline]
    pub fn offset(&self) -> usize {
        self.cursor - self.start
    }

    /// Number of bytes between the cursor and the window end
    #[inline]
    pub fn remaining(&self) -> usize {
        self.end - self.cursor
    }

    /// Decode the code point at the cursor without advancing
    pub fn peek(&self) -> Option<char> {
        if self.is_at_end() {
            return None;
        }
        let (c, _) = utf8::decode(self.buffer.as_bytes(), self.cursor);
        Some(c)
    }

    /// Raw bytes between the cursor and the window end.
    /// This is the range handed to collaborators that work below the
    /// text level, such as percent decoding.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer.as_bytes()[self.cursor..self.end]
    }

    /// Text between the cursor and the window end (zero-copy).
    /// For a scanner returned by a match operation this is the matched
    /// text.
    #[inline]
    pub fn as_str(&self) -> &str {
        // Window edges and the cursor only ever land on code-point
        // boundaries of a buffer validated at construction.
        unsafe { core::str::from_utf8_unchecked(self.as_bytes()) }
    }

    /// Percent-decode the remaining window.
    ///
    /// Delegates to the `percent-encoding` collaborator over the raw byte
    /// range; returns `None` when the decoded bytes are not valid UTF-8.
    /// Borrows when nothing needed decoding.
    ///
    /// ```
    /// use textscan::Scanner;
    ///
    /// let scanner = Scanner::new("a%20b");
    /// assert_eq!(scanner.percent_decode().as_deref(), Some("a b"));
    /// ```
    pub fn percent_decode(&self) -> Option<Cow<'_, str>> {
        percent::decode(self.as_bytes())
    }

    /// Decode the code point at the cursor and advance past it.
    ///
    /// # Errors
    ///
    /// [`ScanError::Overflow`] at the window end; the cursor stays put.
    pub fn character(&mut self) -> Result<char> {
        if self.is_at_end() {
            return Err(ScanError::Overflow);
        }
        let (c, next) = utf8::decode(self.buffer.as_bytes(), self.cursor);
        self.cursor = next;
        Ok(c)
    }

    /// Read one code point if it equals `expected`.
    ///
    /// Returns whether it matched; on a mismatch the cursor is restored.
    ///
    /// # Errors
    ///
    /// [`ScanError::Overflow`] at the window end.
    pub fn read_char(&mut self, expected: char) -> Result<bool> {
        let saved = self.cursor;
        let c = self.character()?;
        if c == expected {
            Ok(true)
        } else {
            self.cursor = saved;
            Ok(false)
        }
    }

    /// Read one code point if it is a member of `set`.
    ///
    /// Returns whether it matched; on a mismatch the cursor is restored.
    ///
    /// # Errors
    ///
    /// [`ScanError::Overflow`] at the window end.
    pub fn read_any(&mut self, set: &[char]) -> Result<bool> {
        let saved = self.cursor;
        let c = self.character()?;
        if set.contains(&c) {
            Ok(true)
        } else {
            self.cursor = saved;
            Ok(false)
        }
    }

    /// Read `literal` if the window continues with it.
    ///
    /// Attempts a fixed read of the literal's code-point count, then
    /// compares. Returns whether it matched; on a mismatch the cursor is
    /// restored.
    ///
    /// # Errors
    ///
    /// [`ScanError::EmptyString`] for a zero-length literal;
    /// [`ScanError::Overflow`] when fewer code points remain than the
    /// literal holds.
    pub fn read_literal(&mut self, literal: &str) -> Result<bool> {
        if literal.is_empty() {
            return Err(ScanError::EmptyString);
        }
        let saved = self.cursor;
        let span = self.read_count(literal.chars().count())?;
        if span.as_str() == literal {
            Ok(true)
        } else {
            self.cursor = saved;
            Ok(false)
        }
    }

    /// Advance exactly `count` code points, returning the traversed
    /// sub-scanner.
    ///
    /// # Errors
    ///
    /// [`ScanError::Overflow`] if fewer than `count` code points remain;
    /// the cursor stays put.
    pub fn read_count(&mut self, count: usize) -> Result<Self> {
        let bytes = self.buffer.as_bytes();
        let mut pos = self.cursor;
        for _ in 0..count {
            if pos >= self.end {
                return Err(ScanError::Overflow);
            }
            pos += utf8::sequence_len(bytes[pos]);
        }
        let span = self.sub_scanner(self.cursor, pos);
        self.cursor = pos;
        Ok(span)
    }

    /// Move the cursor forward by `count` code points.
    ///
    /// # Errors
    ///
    /// [`ScanError::Overflow`] if fewer than `count` code points remain;
    /// the cursor stays put.
    pub fn advance(&mut self, count: usize) -> Result<()> {
        let bytes = self.buffer.as_bytes();
        let mut pos = self.cursor;
        for _ in 0..count {
            if pos >= self.end {
                return Err(ScanError::Overflow);
            }
            pos += utf8::sequence_len(bytes[pos]);
        }
        self.cursor = pos;
        Ok(())
    }

    /// Move the cursor backward by `count` code points.
    ///
    /// # Errors
    ///
    /// [`ScanError::Overflow`] when that would cross the window start;
    /// the cursor stays put.
    pub fn retreat(&mut self, count: usize) -> Result<()> {
        let bytes = self.buffer.as_bytes();
        let mut pos = self.cursor;
        for _ in 0..count {
            if pos <= self.start {
                return Err(ScanError::Overflow);
            }
            pos = utf8::step_back(bytes, pos);
        }
        self.cursor = pos;
        Ok(())
    }

    /// Consume the rest of the window, returning it as a sub-scanner.
    /// Never fails; at the end of the window the view is empty.
    pub fn read_to_end(&mut self) -> Self {
        let span = self.sub_scanner(self.cursor, self.end);
        self.cursor = self.end;
        span
    }

    /// View over `[start, end)` of this scanner's buffer (absolute byte
    /// indexes). The new scanner shares the buffer; its cursor sits at
    /// the window start.
    ///
    /// Edges must lie inside the current window on code-point
    /// boundaries. A violation is a bug in range computation (search
    /// operations only ever produce boundary-valid edges), so it aborts
    /// instead of returning an error. The checks also keep the
    /// `as_str` window views sound.
    pub(crate) fn sub_scanner(&self, start: usize, end: usize) -> Self {
        assert!(
            self.start <= start && start <= end && end <= self.end,
            "sub-window out of range"
        );
        let bytes = self.buffer.as_bytes();
        assert!(
            boundary_at(bytes, start) && boundary_at(bytes, end),
            "sub-window edge inside a code point"
        );
        Self {
            buffer: self.buffer.clone(),
            start,
            end,
            cursor: start,
        }
    }
}

impl From<&str> for Scanner {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl core::fmt::Display for Scanner {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check if absolute index `at` falls on a code-point boundary
/// (one past the last byte counts).
#[inline]
fn boundary_at(bytes: &[u8], at: usize) -> bool {
    at == bytes.len() || utf8::is_boundary(bytes[at])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_validates() {
        assert!(Scanner::from_utf8(b"plain ascii").is_ok());
        assert!(Scanner::from_utf8("päth😀".as_bytes()).is_ok());
        // Lead byte present, continuation missing
        assert_eq!(
            Scanner::from_utf8(b"a\xC3".as_slice()).err(),
            Some(ScanError::InvalidUtf8)
        );
        assert_eq!(
            Scanner::from_utf8(b"\xE2\x80".as_slice()).err(),
            Some(ScanError::InvalidUtf8)
        );
    }

    #[test]
    fn test_character_walks_code_points() {
        let mut s = Scanner::new("a—b");
        assert_eq!(s.character().unwrap(), 'a');
        assert_eq!(s.character().unwrap(), '—');
        assert_eq!(s.offset(), 4);
        assert_eq!(s.character().unwrap(), 'b');
        assert_eq!(s.character(), Err(ScanError::Overflow));
        // Failed read leaves the cursor at the end
        assert_eq!(s.offset(), 5);
    }

    #[test]
    fn test_read_char_restores_on_mismatch() {
        let mut s = Scanner::new("xy");
        assert_eq!(s.read_char('a'), Ok(false));
        assert_eq!(s.offset(), 0);
        assert_eq!(s.read_char('x'), Ok(true));
        assert_eq!(s.offset(), 1);
    }

    #[test]
    fn test_read_any_set() {
        let mut s = Scanner::new("+5");
        assert_eq!(s.read_any(&['-', '+']), Ok(true));
        assert_eq!(s.read_any(&['a', 'b']), Ok(false));
        assert_eq!(s.offset(), 1);
    }

    #[test]
    fn test_read_literal() {
        let mut s = Scanner::new("GET /index");
        assert_eq!(s.read_literal(""), Err(ScanError::EmptyString));
        assert_eq!(s.read_literal("POST"), Ok(false));
        assert_eq!(s.offset(), 0);
        assert_eq!(s.read_literal("GET "), Ok(true));
        assert_eq!(s.offset(), 4);
        // Longer than the rest of the window
        assert_eq!(s.read_literal("/index.html"), Err(ScanError::Overflow));
        assert_eq!(s.offset(), 4);
    }

    #[test]
    fn test_read_literal_multibyte() {
        let mut s = Scanner::new("—–x");
        assert_eq!(s.read_literal("—–"), Ok(true));
        assert_eq!(s.peek(), Some('x'));
    }

    #[test]
    fn test_read_count_exact_and_overflow() {
        let mut s = Scanner::new("añ😀");
        let span = s.read_count(2).unwrap();
        assert_eq!(span.as_str(), "añ");
        assert_eq!(s.read_count(2).err(), Some(ScanError::Overflow));
        assert_eq!(s.as_str(), "😀");
        let rest = s.read_count(1).unwrap();
        assert_eq!(rest.as_str(), "😀");
        assert!(s.is_at_end());
    }

    #[test]
    fn test_advance_and_retreat() {
        let mut s = Scanner::new("a—b");
        s.advance(2).unwrap();
        assert_eq!(s.peek(), Some('b'));
        s.retreat(1).unwrap();
        assert_eq!(s.peek(), Some('—'));
        s.retreat(1).unwrap();
        assert_eq!(s.offset(), 0);
        assert_eq!(s.retreat(1), Err(ScanError::Overflow));
        assert_eq!(s.advance(4), Err(ScanError::Overflow));
        assert_eq!(s.offset(), 0);
    }

    #[test]
    fn test_read_to_end() {
        let mut s = Scanner::new("abc");
        s.advance(1).unwrap();
        let rest = s.read_to_end();
        assert_eq!(rest.as_str(), "bc");
        assert!(s.is_at_end());
        assert_eq!(s.read_to_end().as_str(), "");
    }

    #[test]
    fn test_views_are_independent() {
        let mut parent = Scanner::new("one two");
        let child = parent.read_count(3).unwrap();
        parent.advance(1).unwrap();
        // Parent movement does not affect the child view
        assert_eq!(child.as_str(), "one");
        assert_eq!(child.offset(), 0);
        // And the child cannot see past its window
        assert_eq!(child.remaining(), 3);
    }

    #[test]
    fn test_peek_does_not_advance() {
        let s = Scanner::new("é");
        assert_eq!(s.peek(), Some('é'));
        assert_eq!(s.offset(), 0);
        let empty = Scanner::new("");
        assert_eq!(empty.peek(), None);
    }

    #[test]
    fn test_display_renders_remaining() {
        let mut s = Scanner::new("key=value");
        s.advance(4).unwrap();
        assert_eq!(s.to_string(), "value");
    }

    #[test]
    fn test_percent_decode() {
        let s = Scanner::new("hello%20world");
        assert_eq!(s.percent_decode().as_deref(), Some("hello world"));
    }
}
