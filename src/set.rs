//! Insertion-ordered symbol sets
//!
//! Two instances of [`SymbolSet`] exist per resolution run: `defined` and
//! `undefined`. The set pairs a hashbrown map for average O(1) lookup with an
//! explicit order list so that iteration for diagnostics is deterministic in
//! insertion order.

use crate::symbol::{Symbol, SymbolKind};
use hashbrown::{DefaultHashBuilder, HashMap};

/// An ordered, name-keyed collection of symbols.
///
/// Names are unique within a set. Every operation is atomic with respect to a
/// single name: a failed call leaves the set untouched.
#[derive(Debug, Default)]
pub struct SymbolSet {
    /// Hash map from symbol names to their current kind.
    map: HashMap<String, SymbolKind>,
    /// Names in insertion order, kept in lockstep with `map`.
    order: Vec<String>,
}

impl SymbolSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        SymbolSet {
            map: HashMap::with_hasher(DefaultHashBuilder::default()),
            order: Vec::new(),
        }
    }

    /// Inserts a symbol.
    ///
    /// Returns `false` and leaves the set unchanged if the name is already
    /// present; inserting over an existing entry is a caller error.
    pub fn insert(&mut self, name: impl Into<String>, kind: SymbolKind) -> bool {
        let name = name.into();
        if self.map.contains_key(&name) {
            return false;
        }
        self.order.push(name.clone());
        self.map.insert(name, kind);
        true
    }

    /// Looks up a symbol's kind by name.
    #[inline]
    pub fn search(&self, name: &str) -> Option<SymbolKind> {
        self.map.get(name).copied()
    }

    /// Whether the set contains the name.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Replaces the kind of an existing symbol in place.
    ///
    /// Returns `false` if the name is absent. The symbol keeps its original
    /// position in the iteration order.
    pub fn update(&mut self, name: &str, kind: SymbolKind) -> bool {
        match self.map.get_mut(name) {
            Some(slot) => {
                *slot = kind;
                true
            }
            None => false,
        }
    }

    /// Removes a symbol by name.
    ///
    /// Returns `false` if the name is absent.
    pub fn remove(&mut self, name: &str) -> bool {
        if self.map.remove(name).is_none() {
            return false;
        }
        // The order list scan is O(n); symbol tables at link scale make
        // that a non-issue and it keeps the map entry trivial.
        let pos = self
            .order
            .iter()
            .position(|n| n == name)
            .unwrap_or_else(|| unreachable!("order list out of sync for `{name}`"));
        self.order.remove(pos);
        true
    }

    /// Number of symbols in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterates the symbols in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, SymbolKind)> {
        self.order
            .iter()
            .map(|name| (name.as_str(), self.map[name]))
    }

    /// Clones the contents into owned symbols, in insertion order.
    pub fn to_symbols(&self) -> Vec<Symbol> {
        self.iter()
            .map(|(name, kind)| Symbol::new(name, kind))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_rejects_duplicates() {
        let mut set = SymbolSet::new();
        assert!(set.insert("foo", SymbolKind::StrongText));
        assert!(!set.insert("foo", SymbolKind::StrongData));
        assert_eq!(set.search("foo"), Some(SymbolKind::StrongText));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn update_and_remove_require_presence() {
        let mut set = SymbolSet::new();
        assert!(!set.update("missing", SymbolKind::StrongText));
        assert!(!set.remove("missing"));
        set.insert("foo", SymbolKind::CommonWeak);
        assert!(set.update("foo", SymbolKind::StrongData));
        assert_eq!(set.search("foo"), Some(SymbolKind::StrongData));
        assert!(set.remove("foo"));
        assert!(set.is_empty());
    }

    #[test]
    fn iteration_is_insertion_order() {
        let mut set = SymbolSet::new();
        set.insert("c", SymbolKind::StrongText);
        set.insert("a", SymbolKind::CommonWeak);
        set.insert("b", SymbolKind::StrongData);
        let names: Vec<_> = set.iter().map(|(n, _)| n.to_string()).collect();
        assert_eq!(names, ["c", "a", "b"]);
    }

    #[test]
    fn remove_preserves_order_of_survivors() {
        let mut set = SymbolSet::new();
        set.insert("a", SymbolKind::StrongText);
        set.insert("b", SymbolKind::StrongText);
        set.insert("c", SymbolKind::StrongText);
        set.remove("b");
        let names: Vec<_> = set.iter().map(|(n, _)| n.to_string()).collect();
        assert_eq!(names, ["a", "c"]);
        // Re-insertion goes to the back.
        set.insert("b", SymbolKind::CommonWeak);
        let names: Vec<_> = set.iter().map(|(n, _)| n.to_string()).collect();
        assert_eq!(names, ["a", "c", "b"]);
    }

    #[test]
    fn update_keeps_position() {
        let mut set = SymbolSet::new();
        set.insert("a", SymbolKind::CommonWeak);
        set.insert("b", SymbolKind::StrongText);
        set.update("a", SymbolKind::StrongData);
        let first = set.iter().next().unwrap();
        assert_eq!(first, ("a", SymbolKind::StrongData));
    }
}
