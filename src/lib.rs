//! # link_resolve
//! The symbol-resolution stage of a static linker: given an ordered list of
//! relocatable object modules and static archives, it partitions program
//! symbols into *defined* and *undefined*, enforces strong/weak/common
//! precedence, detects multiple-definition conflicts, and decides which
//! archive members the link needs.
//!
//! The engine resolves names only; relocation, address binding, and code
//! emission are out of scope. Reading raw symbol records and unpacking
//! archives are external collaborators behind the [`SymbolSource`] and
//! [`ArchiveStore`] traits, with production implementations backed by the
//! system `nm` and `ar` utilities.
//!
//! ## Example
//! ```no_run
//! use link_resolve::Resolver;
//! use std::path::PathBuf;
//!
//! let outcome = Resolver::new()
//!     .run(&[PathBuf::from("main.o"), PathBuf::from("libhelper.a")])
//!     .unwrap();
//! assert!(outcome.is_clean());
//! ```

pub mod archive;
mod classify;
mod driver;
mod error;
mod resolver;
pub mod set;
pub mod source;
mod symbol;

pub use archive::{ArExtractor, ArchiveStore, Workspace};
pub use classify::{Diagnostic, InputKind, LinkState};
pub use driver::{LinkOutcome, Resolver};
pub use error::{Error, Result};
pub use resolver::{resolve_archive, resolve_object};
pub use set::SymbolSet;
pub use source::{NmSource, SymbolSource};
pub use symbol::{MAX_NAME_LEN, Symbol, SymbolKind, SymbolRecord};
