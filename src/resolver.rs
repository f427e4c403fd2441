//! Object and archive resolvers
//!
//! The object resolver feeds every record of one module through the
//! classifier in emission order. The archive resolver implements the classic
//! repeated-scan rule on top of it: a member is pulled into the link only if
//! it currently satisfies a need, and members are re-probed until a full
//! pass commits nothing.

use crate::archive::{ArchiveStore, Workspace};
use crate::classify::{Diagnostic, LinkState};
use crate::error::Result;
use crate::source::SymbolSource;
use crate::symbol::{SymbolKind, SymbolRecord};
use std::path::Path;

/// Resolves one ordinary object module.
///
/// Every record the source reports for `module` is classified in order;
/// conflict diagnostics are appended to `diags`. A source failure aborts the
/// whole run.
pub fn resolve_object(
    state: &mut LinkState,
    source: &impl SymbolSource,
    module: &Path,
    diags: &mut Vec<Diagnostic>,
) -> Result<()> {
    let records = source.list(module)?;
    log::debug!("{}: {} symbol records", module.display(), records.len());
    commit_records(state, &records, diags);
    Ok(())
}

fn commit_records(state: &mut LinkState, records: &[SymbolRecord], diags: &mut Vec<Diagnostic>) {
    for record in records {
        if let Some(diag) = state.classify(record) {
            diags.push(diag);
        }
    }
}

/// Probe predicate: would committing this member satisfy a current need?
///
/// A member qualifies if it defines a name that is currently an outstanding
/// reference, or carries a strong definition that would promote an existing
/// common/weak one. Probing never mutates the state.
fn member_qualifies(state: &LinkState, records: &[SymbolRecord]) -> bool {
    records.iter().any(|record| {
        if record.kind.is_definition() && state.undefined().contains(&record.name) {
            return true;
        }
        record.kind.is_strong()
            && state.defined().search(&record.name) == Some(SymbolKind::CommonWeak)
    })
}

/// Resolves a static archive by fixed-point iteration over its members.
///
/// The archive is unpacked into a scoped workspace that is removed on every
/// exit path. Each pass probes the not-yet-committed members and commits the
/// qualifying ones through the object-resolution logic; the loop ends when a
/// full pass commits nothing. Committing a member only ever adds to
/// `defined` or removes from `undefined`, so the iteration terminates within
/// at most one pass per member.
pub fn resolve_archive(
    state: &mut LinkState,
    source: &impl SymbolSource,
    store: &impl ArchiveStore,
    archive: &Path,
    diags: &mut Vec<Diagnostic>,
) -> Result<()> {
    let workspace = Workspace::create()?;
    let members = store.unpack(archive, workspace.path())?;
    log::debug!("{}: {} members", archive.display(), members.len());

    let mut committed = vec![false; members.len()];
    loop {
        let mut changed = false;
        for (idx, member) in members.iter().enumerate() {
            if committed[idx] {
                continue;
            }
            let records = source.list(member)?;
            if member_qualifies(state, &records) {
                log::debug!("committing archive member {}", member.display());
                commit_records(state, &records, diags);
                committed[idx] = true;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    Ok(())
}
