//! The resolution driver
//!
//! [`Resolver`] walks the input file list in argument order, dispatches each
//! input to the object or archive resolver, and performs the end-of-run
//! checks. It is generic over its two external collaborators so the whole
//! engine can run against in-memory fakes in tests.

use crate::archive::{ArExtractor, ArchiveStore};
use crate::classify::{Diagnostic, InputKind, LinkState};
use crate::error::Result;
use crate::resolver::{resolve_archive, resolve_object};
use crate::source::{NmSource, SymbolSource};
use crate::symbol::Symbol;
use std::path::{Path, PathBuf};

/// The result of one resolution run.
///
/// Diagnostics appear in occurrence order: per-input findings as the inputs
/// were processed, then the end-of-run entry-point and undefined-reference
/// findings.
#[derive(Debug)]
pub struct LinkOutcome {
    /// All findings, in occurrence order.
    pub diagnostics: Vec<Diagnostic>,
    /// The final defined table, in insertion order.
    pub defined: Vec<Symbol>,
}

impl LinkOutcome {
    /// Whether the link resolved cleanly: no multiple definition, no
    /// unresolved reference, and an entry point present.
    pub fn is_clean(&self) -> bool {
        !self.diagnostics.iter().any(Diagnostic::is_link_error)
    }
}

/// The symbol-resolution driver.
///
/// # Examples
/// ```no_run
/// use link_resolve::Resolver;
/// use std::path::PathBuf;
///
/// let outcome = Resolver::new()
///     .run(&[PathBuf::from("main.o"), PathBuf::from("libm.a")])
///     .unwrap();
/// for diag in &outcome.diagnostics {
///     println!("{diag}");
/// }
/// ```
pub struct Resolver<S, A>
where
    S: SymbolSource,
    A: ArchiveStore,
{
    source: S,
    store: A,
}

impl Resolver<NmSource, ArExtractor> {
    /// Creates a resolver backed by the system `nm` and `ar` utilities.
    pub fn new() -> Self {
        Resolver {
            source: NmSource,
            store: ArExtractor,
        }
    }
}

impl Default for Resolver<NmSource, ArExtractor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> Resolver<S, A>
where
    S: SymbolSource,
    A: ArchiveStore,
{
    /// Creates a resolver over the given collaborators.
    pub fn with_collaborators(source: S, store: A) -> Self {
        Resolver { source, store }
    }

    /// Resolves the inputs in argument order and reports the outcome.
    ///
    /// Nonexistent and unrecognized inputs are diagnosed and skipped; a
    /// collaborator failure aborts the run.
    pub fn run(&self, inputs: &[PathBuf]) -> Result<LinkOutcome> {
        let mut state = LinkState::new();
        let mut diagnostics = Vec::new();

        for input in inputs {
            self.dispatch(&mut state, input, &mut diagnostics)?;
        }

        diagnostics.extend(state.final_diagnostics());
        Ok(LinkOutcome {
            diagnostics,
            defined: state.defined().to_symbols(),
        })
    }

    fn dispatch(
        &self,
        state: &mut LinkState,
        input: &Path,
        diags: &mut Vec<Diagnostic>,
    ) -> Result<()> {
        if !input.exists() {
            diags.push(Diagnostic::FileNotFound {
                path: input.to_path_buf(),
            });
            return Ok(());
        }
        match InputKind::of(input) {
            InputKind::Object => {
                log::debug!("input {}: object module", input.display());
                resolve_object(state, &self.source, input, diags)
            }
            InputKind::Archive => {
                log::debug!("input {}: archive", input.display());
                resolve_archive(state, &self.source, &self.store, input, diags)
            }
            InputKind::Unrecognized => {
                diags.push(Diagnostic::UnrecognizedFileType {
                    path: input.to_path_buf(),
                });
                Ok(())
            }
        }
    }
}
