//! Offset Sync: keeps hard-coded offsets in Rust sources in line with an
//! offsets table.
//!
//! Given a table of `constexpr uint64_t Name = 0x...;` declarations, the
//! crate rewrites, in a fixed set of source files:
//!
//! - constants tagged with a trailing `// Name` comment
//! - a keyed constant array filled from `Prefix0..PrefixN`
//! - `#[field(offset = ..)]` attributes, via a static struct/field map
//! - `#[raw_struct(size = ..)]` attributes, inferred from the field layout
//!
//! # Architecture
//!
//! Every rewriter compiles down to a list of [`Edit`]s, verified byte-span
//! replacements over an in-memory text. Only literals are replaced, in the
//! radix and width they were written in, and a file is only written when
//! its text actually changed.
//!
//! # Example
//!
//! ```no_run
//! use offset_sync::{sync_workspace, DiskFs, SyncConfig};
//!
//! let config = SyncConfig::new("/path/to/workspace");
//! match sync_workspace(&config, &DiskFs) {
//!     Ok(report) => println!("updated {} files", report.updated.len()),
//!     Err(e) => eprintln!("sync failed: {}", e),
//! }
//! ```

pub mod config;
pub mod edit;
pub mod fs;
pub mod literal;
pub mod plan;
pub mod rewrite;
pub mod sync;
pub mod table;
pub mod validate;

// Re-exports
pub use config::{resolve_workspace, ConfigError, SyncConfig};
pub use edit::{apply_edits, Edit, EditError, EditVerification};
pub use fs::{write_if_changed, DiskFs, FileSystem};
pub use literal::{Literal, Radix};
pub use plan::{default_targets, Target};
pub use rewrite::{apply_passes, ArraySpec, Pass};
pub use sync::{load_table, sync_with_table, sync_workspace, SyncError, SyncReport};
pub use table::{parse_table, OffsetTable};
pub use validate::ValidationError;
