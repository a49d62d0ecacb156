//! CLI command handlers, one per file.

mod completions;
mod download;
mod file_name;
mod man;

pub use completions::run_completions;
pub use download::{run_download, DownloadArgs};
pub use file_name::run_file_name;
pub use man::run_man;
