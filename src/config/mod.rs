//! Configuration for generation runs.
//!
//! Defaults can be saved in a JSON file, either next to the project
//! (`.secrules.json`) or in the user's configuration directory. They are
//! combined with command-line flags and project detection into the
//! [`RunConfiguration`] that drives a single run.

pub mod io;
pub mod path;
pub mod run;
pub mod structure;

pub use io::{load_config, load_config_from_file, save_config_to_file};
pub use path::{get_config_file_path, project_config_path};
pub use run::{resolve, Overrides, RunConfiguration};
pub use structure::Config;
