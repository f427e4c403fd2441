//! Symbol classification
//!
//! [`LinkState`] owns the two process-wide symbol sets of a resolution run
//! plus the local-static rename counter, and implements the precedence state
//! machine that keeps them consistent: at any point a name lives in at most
//! one of `defined` and `undefined`.

use crate::set::SymbolSet;
use crate::symbol::{SymbolKind, SymbolRecord};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// A user-facing finding produced during resolution.
///
/// Diagnostics never abort the run; they are collected in occurrence order
/// and reported by the driver. The `Display` strings are the engine's output
/// contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// An input path does not exist; the input is skipped.
    FileNotFound { path: PathBuf },
    /// An input path has neither a `.o` nor a `.a` suffix; skipped.
    UnrecognizedFileType { path: PathBuf },
    /// A second strong definition of a name was rejected; the first
    /// definition stays in force.
    MultipleDefinition { name: String },
    /// A name was still unresolved after all inputs were consumed.
    UndefinedReference { name: String },
    /// No `main` symbol was ever defined.
    MissingEntryPoint,
}

impl Diagnostic {
    /// Whether this finding makes the link unsound (and the process exit
    /// status nonzero). Skipped inputs are reported but do not by
    /// themselves fail the run.
    pub fn is_link_error(&self) -> bool {
        matches!(
            self,
            Diagnostic::MultipleDefinition { .. }
                | Diagnostic::UndefinedReference { .. }
                | Diagnostic::MissingEntryPoint
        )
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::FileNotFound { path } => {
                write!(f, "{}: file not found", path.display())
            }
            Diagnostic::UnrecognizedFileType { path } => {
                write!(f, "{}: file not recognized", path.display())
            }
            Diagnostic::MultipleDefinition { name } => {
                write!(f, ": multiple definition of {name}")
            }
            Diagnostic::UndefinedReference { name } => {
                write!(f, "{name}: undefined reference to {name}")
            }
            Diagnostic::MissingEntryPoint => write!(f, ": undefined reference to main"),
        }
    }
}

/// The shared mutable state of one resolution run.
///
/// Created empty at the start of a run and torn down at its end, after all
/// reporting has read it. The rename counter is part of the state rather
/// than a hidden static so that runs are independently reproducible.
#[derive(Debug, Default)]
pub struct LinkState {
    defined: SymbolSet,
    undefined: SymbolSet,
    /// Monotonic suffix for local-static renames.
    local_suffix: u32,
}

impl LinkState {
    pub fn new() -> Self {
        LinkState {
            defined: SymbolSet::new(),
            undefined: SymbolSet::new(),
            local_suffix: 0,
        }
    }

    /// The set of names with a definition so far.
    #[inline]
    pub fn defined(&self) -> &SymbolSet {
        &self.defined
    }

    /// The set of names referenced but not yet defined.
    #[inline]
    pub fn undefined(&self) -> &SymbolSet {
        &self.undefined
    }

    /// Classifies one symbol record, applying the precedence rules to the
    /// two sets and returning a diagnostic when the record conflicts with
    /// an existing definition.
    pub fn classify(&mut self, record: &SymbolRecord) -> Option<Diagnostic> {
        let name = record.name.as_str();
        match record.kind {
            SymbolKind::Undefined => {
                // Idempotent: a reference already satisfied or already
                // pending needs no second entry.
                if !self.defined.contains(name) && !self.undefined.contains(name) {
                    self.undefined.insert(name, SymbolKind::Undefined);
                }
                None
            }
            SymbolKind::CommonWeak => {
                // First common wins over later commons.
                if !self.defined.contains(name) {
                    self.defined.insert(name, SymbolKind::CommonWeak);
                }
                self.undefined.remove(name);
                None
            }
            SymbolKind::LocalStatic => {
                // Local symbols are not globally addressable; the rename
                // gives every instance a unique slot in `defined`.
                let renamed = format!("{}.{}", name, self.local_suffix);
                self.local_suffix += 1;
                self.defined.insert(renamed, SymbolKind::LocalStatic);
                None
            }
            SymbolKind::StrongText | SymbolKind::StrongData => {
                let diag = match self.defined.search(name) {
                    Some(existing) if existing.is_strong() => {
                        // First strong definition wins; the duplicate is
                        // rejected, not overwritten.
                        log::debug!("rejecting duplicate strong definition of `{name}`");
                        Some(Diagnostic::MultipleDefinition {
                            name: name.to_string(),
                        })
                    }
                    Some(SymbolKind::CommonWeak) => {
                        // Strong always outranks common.
                        self.defined.update(name, record.kind);
                        None
                    }
                    Some(_) => None,
                    None => {
                        self.defined.insert(name, record.kind);
                        None
                    }
                };
                self.undefined.remove(name);
                diag
            }
        }
    }

    /// Runs the end-of-link checks: a missing `main` entry point, then one
    /// diagnostic per surviving undefined name, in insertion order.
    pub fn final_diagnostics(&self) -> Vec<Diagnostic> {
        let mut diags = Vec::new();
        if !self.defined.contains("main") {
            diags.push(Diagnostic::MissingEntryPoint);
        }
        for (name, _) in self.undefined.iter() {
            diags.push(Diagnostic::UndefinedReference {
                name: name.to_string(),
            });
        }
        diags
    }
}

/// Classifies an input path by suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// A relocatable object module (`.o`).
    Object,
    /// A static archive (`.a`).
    Archive,
    /// Anything else; not a linkable input.
    Unrecognized,
}

impl InputKind {
    pub fn of(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("o") => InputKind::Object,
            Some("a") => InputKind::Archive,
            _ => InputKind::Unrecognized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(name: &str, kind: SymbolKind) -> SymbolRecord {
        SymbolRecord::new(name, kind)
    }

    /// No name may sit in both sets after any classification step.
    fn assert_mutual_exclusion(state: &LinkState) {
        for (name, _) in state.defined().iter() {
            assert!(
                !state.undefined().contains(name),
                "`{name}` is in both sets"
            );
        }
    }

    #[test]
    fn undefined_is_idempotent() {
        let mut state = LinkState::new();
        assert!(state.classify(&rec("foo", SymbolKind::Undefined)).is_none());
        assert!(state.classify(&rec("foo", SymbolKind::Undefined)).is_none());
        assert_eq!(state.undefined().len(), 1);
        assert_mutual_exclusion(&state);
    }

    #[test]
    fn undefined_after_definition_is_noop() {
        let mut state = LinkState::new();
        state.classify(&rec("foo", SymbolKind::StrongText));
        state.classify(&rec("foo", SymbolKind::Undefined));
        assert!(state.undefined().is_empty());
        assert_eq!(state.defined().search("foo"), Some(SymbolKind::StrongText));
    }

    #[test]
    fn strong_strong_collision_keeps_first() {
        let mut state = LinkState::new();
        assert!(state.classify(&rec("foo", SymbolKind::StrongText)).is_none());
        let diag = state.classify(&rec("foo", SymbolKind::StrongData));
        assert_eq!(
            diag,
            Some(Diagnostic::MultipleDefinition {
                name: "foo".to_string()
            })
        );
        assert_eq!(state.defined().search("foo"), Some(SymbolKind::StrongText));
        assert_mutual_exclusion(&state);
    }

    #[test]
    fn weak_to_strong_upgrade() {
        let mut state = LinkState::new();
        assert!(state.classify(&rec("foo", SymbolKind::CommonWeak)).is_none());
        assert!(state.classify(&rec("foo", SymbolKind::StrongData)).is_none());
        assert_eq!(state.defined().search("foo"), Some(SymbolKind::StrongData));
    }

    #[test]
    fn first_common_wins_over_later_commons() {
        let mut state = LinkState::new();
        state.classify(&rec("buf", SymbolKind::CommonWeak));
        state.classify(&rec("buf", SymbolKind::CommonWeak));
        assert_eq!(state.defined().search("buf"), Some(SymbolKind::CommonWeak));
        assert_eq!(state.defined().len(), 1);
    }

    #[test]
    fn common_satisfies_outstanding_reference() {
        let mut state = LinkState::new();
        state.classify(&rec("buf", SymbolKind::Undefined));
        assert!(state.undefined().contains("buf"));
        state.classify(&rec("buf", SymbolKind::CommonWeak));
        assert!(!state.undefined().contains("buf"));
        assert!(state.defined().contains("buf"));
        assert_mutual_exclusion(&state);
    }

    #[test]
    fn strong_satisfies_outstanding_reference() {
        let mut state = LinkState::new();
        state.classify(&rec("helper", SymbolKind::Undefined));
        state.classify(&rec("helper", SymbolKind::StrongText));
        assert!(!state.undefined().contains("helper"));
        assert_eq!(
            state.defined().search("helper"),
            Some(SymbolKind::StrongText)
        );
    }

    #[test]
    fn local_statics_are_renamed_uniquely() {
        let mut state = LinkState::new();
        state.classify(&rec("counter", SymbolKind::LocalStatic));
        state.classify(&rec("counter", SymbolKind::LocalStatic));
        assert!(state.defined().contains("counter.0"));
        assert!(state.defined().contains("counter.1"));
        assert!(!state.defined().contains("counter"));
        assert_eq!(state.defined().len(), 2);
    }

    #[test]
    fn final_diagnostics_report_main_then_undefined() {
        let mut state = LinkState::new();
        state.classify(&rec("foo", SymbolKind::Undefined));
        state.classify(&rec("bar", SymbolKind::Undefined));
        let diags = state.final_diagnostics();
        assert_eq!(diags[0], Diagnostic::MissingEntryPoint);
        assert_eq!(
            diags[1],
            Diagnostic::UndefinedReference {
                name: "foo".to_string()
            }
        );
        assert_eq!(
            diags[2],
            Diagnostic::UndefinedReference {
                name: "bar".to_string()
            }
        );
    }

    #[test]
    fn final_diagnostics_clean_when_main_defined() {
        let mut state = LinkState::new();
        state.classify(&rec("main", SymbolKind::StrongText));
        assert!(state.final_diagnostics().is_empty());
    }

    #[test]
    fn input_kind_by_suffix() {
        assert_eq!(InputKind::of(Path::new("main.o")), InputKind::Object);
        assert_eq!(InputKind::of(Path::new("libm.a")), InputKind::Archive);
        assert_eq!(InputKind::of(Path::new("main.c")), InputKind::Unrecognized);
        assert_eq!(InputKind::of(Path::new("main")), InputKind::Unrecognized);
    }

    #[test]
    fn diagnostic_display_strings() {
        assert_eq!(
            Diagnostic::MultipleDefinition {
                name: "foo".to_string()
            }
            .to_string(),
            ": multiple definition of foo"
        );
        assert_eq!(
            Diagnostic::UndefinedReference {
                name: "foo".to_string()
            }
            .to_string(),
            "foo: undefined reference to foo"
        );
        assert_eq!(
            Diagnostic::MissingEntryPoint.to_string(),
            ": undefined reference to main"
        );
        assert_eq!(
            Diagnostic::FileNotFound {
                path: PathBuf::from("a.o")
            }
            .to_string(),
            "a.o: file not found"
        );
    }
}
