//! A Rust library for generating security rules for AI coding assistants.
//!
//! This library renders a catalog of security rule templates into the files
//! each assistant reads (`CLAUDE.md`, `GEMINI.md`, `AGENTS.md`,
//! `.github/copilot-instructions.md`, `.cursor/rules/`, `.windsurf/rules/`).
//! Generated content in shared files lives inside a marked region that is
//! replaced on every run, so user-written content around it is preserved and
//! repeated runs are idempotent.
//!
//! # Example
//!
//! ```no_run
//! use secrules::{generate, RunConfiguration, TargetId, EmbeddedStore};
//! use secrules::templates::all_category_ids;
//!
//! let run = RunConfiguration::new(vec![TargetId::Claude], all_category_ids());
//! let report = generate(".", &run, &EmbeddedStore)?;
//! println!("{} file(s) written", report.file_count());
//! # Ok::<(), secrules::Error>(())
//! ```

pub mod adapters;
pub mod config;
pub mod constants;
pub mod detect;
pub mod error;
pub mod generate;
pub mod logging;
pub mod prompt;
pub mod region;
pub mod templates;

pub use adapters::{adapter_for, Adapter, OutputMode, RenderOptions, TargetId};
pub use config::{
    get_config_file_path, load_config, load_config_from_file, project_config_path, resolve,
    save_config_to_file, Config, Overrides, RunConfiguration,
};
pub use detect::{detect_framework, detect_targets};
pub use error::{Error, Result};
pub use generate::{
    generate, remove, Action, FileChange, GenerationReport, RemovalReport, TargetFailure,
};
pub use region::RegionError;
pub use templates::{DirectoryStore, EmbeddedStore, TemplateStore};
