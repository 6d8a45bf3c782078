//! Classpath assembly: turn public part references into classpath entries.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::PathBuf;

use serde::Serialize;

use crate::core::id;
use crate::core::layout::{LocationResolver, ResolutionError};
use crate::core::reference::PublicPartKey;

/// Archives picked up from a public part location.
pub const JAR_INCLUDE: &str = "*.jar";

/// One referenced public part on the classpath.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClasspathEntry {
    /// `vendor~component~part`
    pub id: String,
    /// Directory holding the part's archives
    pub location: PathBuf,
    /// Ant include pattern inside `location`
    pub include: String,
}

/// Assembled classpath, keyed by reference and sorted by entry id.
///
/// Entry ids are unique: a reference whose id is already taken by another
/// reference is kept out and reported as unresolved.
#[derive(Debug, Clone, Default)]
pub struct Classpath {
    entries: BTreeMap<PublicPartKey, ClasspathEntry>,
    unresolved: Vec<ResolutionError>,
}

impl Classpath {
    /// Entries in id order.
    pub fn entries(&self) -> impl Iterator<Item = &ClasspathEntry> {
        let mut entries: Vec<_> = self.entries.values().collect();
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        entries.into_iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for a reference, if it resolved.
    pub fn get(&self, key: &PublicPartKey) -> Option<&ClasspathEntry> {
        self.entries.get(key)
    }

    /// Entries for the given references, in id order. References that did
    /// not resolve are left out.
    pub fn select<'a, I>(&self, keys: I) -> Vec<ClasspathEntry>
    where
        I: IntoIterator<Item = &'a PublicPartKey>,
    {
        let keys: BTreeSet<&PublicPartKey> = keys.into_iter().collect();
        let mut selected: Vec<ClasspathEntry> = keys
            .into_iter()
            .filter_map(|key| self.entries.get(key))
            .cloned()
            .collect();
        selected.sort_by(|a, b| a.id.cmp(&b.id));
        selected
    }

    /// References that could not be resolved.
    pub fn unresolved(&self) -> &[ResolutionError] {
        &self.unresolved
    }
}

/// Maps public part references to classpath entries.
pub struct PathsAssembler<'a> {
    resolver: &'a dyn LocationResolver,
}

impl<'a> PathsAssembler<'a> {
    pub fn new(resolver: &'a dyn LocationResolver) -> Self {
        PathsAssembler { resolver }
    }

    /// Classpath entry for one reference.
    pub fn entry(&self, key: &PublicPartKey) -> Result<ClasspathEntry, ResolutionError> {
        let location = self.resolver.resolve(key)?;
        Ok(ClasspathEntry {
            id: id::part_id(key),
            location,
            include: JAR_INCLUDE.to_string(),
        })
    }

    /// One entry per reference, sorted by id.
    ///
    /// A reference that fails to resolve is logged and skipped; the error
    /// is kept on the returned classpath for reporting.
    pub fn assemble<'k, I>(&self, keys: I) -> Classpath
    where
        I: IntoIterator<Item = &'k PublicPartKey>,
    {
        let mut classpath = Classpath::default();
        let mut owners: HashMap<String, PublicPartKey> = HashMap::new();

        for key in keys {
            if classpath.entries.contains_key(key) {
                continue;
            }

            let resolved = self.entry(key).and_then(|entry| match owners.get(&entry.id) {
                Some(existing) => Err(ResolutionError::IdClash {
                    key: key.clone(),
                    existing: existing.clone(),
                    id: entry.id,
                }),
                None => Ok(entry),
            });

            match resolved {
                Ok(entry) => {
                    tracing::debug!("Classpath entry {} -> {}", entry.id, entry.location.display());
                    owners.insert(entry.id.clone(), key.clone());
                    classpath.entries.insert(key.clone(), entry);
                }
                Err(e) => {
                    tracing::warn!("Skipping classpath entry for {}: {}", key, e);
                    classpath.unresolved.push(e);
                }
            }
        }

        classpath
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::layout::DtcLayout;

    #[test]
    fn test_entries_sorted_by_id() {
        let layout = DtcLayout::new("/ws");
        let keys = [
            PublicPartKey::new("vendor.com", "dc1", "assembly"),
            PublicPartKey::new("vendor.com", "dc1", "api"),
        ];

        let classpath = PathsAssembler::new(&layout).assemble(&keys);
        let ids: Vec<_> = classpath.entries().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["vendor.com~dc1~api", "vendor.com~dc1~assembly"]);
        assert!(classpath.entries().all(|e| e.include == "*.jar"));
        assert!(classpath.unresolved().is_empty());
    }

    #[test]
    fn test_unresolvable_reference_is_skipped() {
        let layout = DtcLayout::new("/ws");
        let keys = [
            PublicPartKey::new("vendor.com", "dc1", "api"),
            PublicPartKey::new("vendor.com", "dc1", ".."),
        ];

        let classpath = PathsAssembler::new(&layout).assemble(&keys);
        assert_eq!(classpath.len(), 1);
        assert_eq!(classpath.unresolved().len(), 1);
        assert_eq!(classpath.unresolved()[0].key(), keys[1]);
    }

    #[test]
    fn test_nested_and_flat_names_stay_distinct() {
        let layout = DtcLayout::new("/ws");
        let nested = PublicPartKey::new("sap.com", "tc/bl", "api");
        let flat = PublicPartKey::new("sap.com", "tc~bl", "api");

        let classpath = PathsAssembler::new(&layout).assemble([&nested, &flat]);
        assert_eq!(classpath.len(), 2);
        assert!(classpath.unresolved().is_empty());
        assert_eq!(
            classpath.get(&nested).map(|e| e.location.clone()),
            Some(PathBuf::from(
                "/ws/.dtc/DCs/sap.com/tc/bl/_comp/gen/default/public/api/lib/java"
            ))
        );
        assert_eq!(
            classpath.get(&flat).map(|e| e.location.clone()),
            Some(PathBuf::from(
                "/ws/.dtc/DCs/sap.com/tc~bl/_comp/gen/default/public/api/lib/java"
            ))
        );
    }

    #[test]
    fn test_clashing_ids_are_reported() {
        let layout = DtcLayout::new("/ws");
        let first = PublicPartKey::new("a", "b~c", "d");
        let second = PublicPartKey::new("a~b", "c", "d");

        let classpath = PathsAssembler::new(&layout).assemble([&first, &second]);
        assert_eq!(classpath.len(), 1);
        assert!(classpath.get(&first).is_some());
        assert!(matches!(
            &classpath.unresolved()[..],
            [ResolutionError::IdClash { key, existing, .. }] if *key == second && *existing == first
        ));
    }

    #[test]
    fn test_select_subset() {
        let layout = DtcLayout::new("/ws");
        let api = PublicPartKey::new("vendor.com", "dc1", "api");
        let assembly = PublicPartKey::new("vendor.com", "dc1", "assembly");
        let missing = PublicPartKey::new("vendor.com", "dc9", "api");

        let classpath = PathsAssembler::new(&layout).assemble([&api, &assembly]);
        let selected = classpath.select([&assembly, &missing]);

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, "vendor.com~dc1~assembly");
        assert_eq!(
            classpath.get(&api).map(|e| e.location.clone()),
            Some(PathBuf::from(
                "/ws/.dtc/DCs/vendor.com/dc1/_comp/gen/default/public/api/lib/java"
            ))
        );
    }

    #[test]
    fn test_assembly_is_repeatable() {
        let layout = DtcLayout::new("/ws");
        let keys = [
            PublicPartKey::new("vendor.com", "dc2", "api"),
            PublicPartKey::new("vendor.com", "dc1", "api"),
        ];
        let assembler = PathsAssembler::new(&layout);

        let first: Vec<_> = assembler.assemble(&keys).entries().cloned().collect();
        let second: Vec<_> = assembler.assemble(&keys).entries().cloned().collect();
        assert_eq!(first, second);
    }
}
