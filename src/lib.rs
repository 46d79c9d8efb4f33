#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Compatibility layer for std/no_std
mod compat;

// Internal modules (not public API)
mod buffer;
mod error;
mod scanner;
mod unicode;

// Public API
pub use buffer::Buffer;
pub use error::ScanError;
pub use scanner::Scanner;

pub type Result<T> = core::result::Result<T, ScanError>;
