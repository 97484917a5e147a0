pub mod error;
pub mod result;

pub use error::{DepscoutError, ExitCode};
pub use result::Result;
