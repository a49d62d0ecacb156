//! `cfgdl file-name <name>` – print the archive name for a cluster name.

use cfgdl_core::naming::project_file_name;

pub fn run_file_name(name: &str) {
    println!("{}", project_file_name(name));
}
