pub mod events;
pub mod filesystem;
pub mod process;
