use crate::compat::Cow;

/// Decode percent-encoded bytes to text.
///
/// The scanner only supplies the raw byte window; which bytes form escape
/// sequences and how `%XX` is interpreted is the `percent-encoding`
/// crate's policy. Returns `None` when the decoded bytes are not valid
/// UTF-8, and borrows the input when nothing needed decoding.
pub(crate) fn decode(bytes: &[u8]) -> Option<Cow<'_, str>> {
    percent_encoding::percent_decode(bytes).decode_utf8().ok()
}
