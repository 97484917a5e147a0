pub mod file_finder;

pub use file_finder::{safe_read_to_string, DirectoryFileFinder};
