//! Symbol sources
//!
//! A [`SymbolSource`] abstracts the external utility that extracts raw symbol
//! records from a compiled module. The resolution engine never spawns
//! processes itself, which keeps it testable against an in-memory fake. The
//! production implementation, [`NmSource`], shells out to the system `nm`.

use crate::error::{Result, collaborator_error};
use crate::symbol::{MAX_NAME_LEN, SymbolKind, SymbolRecord};
use std::path::Path;
use std::process::Command;

/// A capability that lists the symbol records of one module.
pub trait SymbolSource {
    /// Lists the `(name, kind)` records of the module at `module`, in the
    /// module's emission order.
    ///
    /// # Errors
    /// Fails with [`Error::Collaborator`](crate::Error::Collaborator) if the
    /// underlying utility cannot be launched or read; the caller treats that
    /// as fatal for the whole resolution run.
    fn list(&self, module: &Path) -> Result<Vec<SymbolRecord>>;
}

/// Parses one `nm` output line into a symbol record.
///
/// Accepted shapes are `<kind> <name>` (undefined symbols carry no address
/// column) and `<addr> <kind> <name>`. Lines whose kind character does not
/// name a linkable symbol, and lines of any other shape, yield `None`.
pub fn parse_nm_line(line: &str) -> Option<SymbolRecord> {
    let mut fields = line.split_whitespace();
    let (kind_field, name) = match (fields.next(), fields.next(), fields.next(), fields.next()) {
        (Some(kind), Some(name), None, _) => (kind, name),
        (Some(_addr), Some(kind), Some(name), None) => (kind, name),
        _ => return None,
    };
    let mut chars = kind_field.chars();
    let kind_char = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    let kind = SymbolKind::from_nm_char(kind_char)?;
    Some(SymbolRecord::new(truncate_name(name), kind))
}

/// Caps a symbol name at [`MAX_NAME_LEN`] bytes, on a char boundary.
fn truncate_name(name: &str) -> &str {
    if name.len() <= MAX_NAME_LEN {
        return name;
    }
    let mut end = MAX_NAME_LEN;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

/// A symbol source backed by the system `nm` utility.
///
/// # Examples
/// ```no_run
/// use link_resolve::{NmSource, SymbolSource};
/// use std::path::Path;
///
/// let records = NmSource::default().list(Path::new("main.o")).unwrap();
/// ```
#[derive(Debug, Default, Clone)]
pub struct NmSource;

impl SymbolSource for NmSource {
    fn list(&self, module: &Path) -> Result<Vec<SymbolRecord>> {
        log::debug!("running nm on {}", module.display());
        let output = Command::new("nm")
            .arg(module)
            .output()
            .map_err(|err| collaborator_error(format!("failed to launch nm: {err}")))?;
        if !output.status.success() {
            return Err(collaborator_error(format!(
                "nm failed on {}: {}",
                module.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().filter_map(parse_nm_line).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defined_symbol_line() {
        let rec = parse_nm_line("0000000000001129 T main").unwrap();
        assert_eq!(rec.name, "main");
        assert_eq!(rec.kind, SymbolKind::StrongText);
    }

    #[test]
    fn parses_undefined_symbol_line() {
        let rec = parse_nm_line("                 U printf").unwrap();
        assert_eq!(rec.name, "printf");
        assert_eq!(rec.kind, SymbolKind::Undefined);
    }

    #[test]
    fn parses_local_static_line() {
        let rec = parse_nm_line("0000000000004030 b counter").unwrap();
        assert_eq!(rec.kind, SymbolKind::LocalStatic);
        let rec = parse_nm_line("0000000000004028 d table").unwrap();
        assert_eq!(rec.kind, SymbolKind::LocalStatic);
    }

    #[test]
    fn skips_unlinkable_kinds() {
        assert!(parse_nm_line("0000000000002000 r ro_data").is_none());
        assert!(parse_nm_line("0000000000000000 a crtstuff.c").is_none());
        assert!(parse_nm_line("w __cxa_finalize").is_none());
    }

    #[test]
    fn skips_malformed_lines() {
        assert!(parse_nm_line("").is_none());
        assert!(parse_nm_line("main.o:").is_none());
        assert!(parse_nm_line("0000 T too many fields").is_none());
    }

    #[test]
    fn truncates_long_names() {
        let long = "x".repeat(40);
        let line = format!("0000000000001129 T {long}");
        let rec = parse_nm_line(&line).unwrap();
        assert_eq!(rec.name.len(), MAX_NAME_LEN);
    }
}
