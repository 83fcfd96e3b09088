//! Static shared data structures

pub mod binary_extensions;
pub mod signatures;

pub use binary_extensions::{is_binary_extension, BINARY_EXTENSIONS};
pub use signatures::{matches_signature, SIGNATURES};
