use crate::compat::{Arc, String, Vec};

/// Immutable byte storage shared by every scanner that views it.
///
/// The bytes are copied exactly once, at construction; cloning a `Buffer`
/// only bumps a reference count. Storage is released when the last scanner
/// referencing it is dropped. Scanners never mutate buffer contents, so a
/// buffer may be read from any number of threads at once.
#[derive(Debug, Clone)]
pub struct Buffer {
    bytes: Arc<[u8]>,
}

impl Buffer {
    /// Full backing storage, ignoring any scanner's window
    #[inline]
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.bytes.len()
    }
}

impl From<&[u8]> for Buffer {
    fn from(bytes: &[u8]) -> Self {
        Self {
            bytes: Arc::from(bytes),
        }
    }
}

impl<const N: usize> From<&[u8; N]> for Buffer {
    fn from(bytes: &[u8; N]) -> Self {
        Self::from(bytes.as_slice())
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Arc::from(bytes),
        }
    }
}

impl From<&str> for Buffer {
    fn from(text: &str) -> Self {
        Self::from(text.as_bytes())
    }
}

impl From<String> for Buffer {
    fn from(text: String) -> Self {
        Self::from(text.into_bytes())
    }
}
