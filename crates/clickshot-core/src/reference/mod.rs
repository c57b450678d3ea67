mod errors;
mod library;

pub use errors::ReferenceError;
pub use library::{REFERENCE_EXTENSIONS, ReferenceLibrary};
