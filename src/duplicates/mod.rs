pub mod grouper;
pub mod hasher;

pub use grouper::{delete_from_group, DuplicateFile, DuplicateGroup, DuplicateScanner};
pub use hasher::{full_hash, quick_hash};
