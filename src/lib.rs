pub mod app;
pub mod cli;
pub mod file;
pub mod script;
pub mod util;

pub use app::{config::Config, state::App};
pub use file::{FileError, FileManager, FilesServiceProvider, files};
