//! # printmend: restore logging calls around orphaned string literals
//!
//! Bulk edits sometimes strip the macro wrapper off logging calls and leave
//! bare string-literal statements behind:
//!
//! ```text
//!     "Deposited {} into {}",
//!         amount,
//!         pool_id);
//! ```
//!
//! printmend walks a source tree, spots those lines with a lexical heuristic
//! and wraps them back into a macro call (`ic_cdk::println!` by default).
//! Files are only written when the rewrite changed them.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌─────────────┐   ┌──────────────┐   ┌─────────────┐
//! │  MendConfig  │ → │  Discovery  │ → │   Rewriter   │ → │ SourceStore │
//! │ (YAML/CLI)   │   │ (walk+glob) │   │ (line scan)  │   │ (disk/mem)  │
//! └──────────────┘   └─────────────┘   └──────────────┘   └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use printmend::{run, DiskStore, MendConfig, RunOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = MendConfig::default();
//!     config.discovery.root = "backend/src".into();
//!
//!     let summary = run(&config, RunOptions::default(), &mut DiskStore, &mut ())?;
//!     println!("Fixed {} files", summary.fixed_count());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Core rewrite engine modules
pub mod core {
    //! Discovery, classification, rewriting and run orchestration.

    pub mod config;
    pub mod discovery;
    pub mod errors;
    pub mod rewriter;
    pub mod runner;
    pub mod store;
}

// Re-export primary types for convenience
pub use crate::core::config::{DiscoveryConfig, MendConfig, RewriteConfig};
pub use crate::core::errors::{MendError, Result, ResultExt};
pub use crate::core::rewriter::{LineKind, Rewrite, Rewriter};
pub use crate::core::runner::{
    process_file, run, FileFailure, FileReport, FileStatus, RunOptions, RunReporter, RunSummary,
};
pub use crate::core::store::{DiskStore, MemoryStore, SourceStore};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
