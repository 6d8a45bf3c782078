//! Collect the public parts a set of components needs at build time.

use std::collections::BTreeSet;

use crate::core::component::DevelopmentComponent;
use crate::core::reference::PublicPartKey;

/// Distinct build-time references over all given components.
///
/// Run-time-only references and references without any flag are dropped.
/// Duplicates are removed by (vendor, component, part), so the result size
/// is the number of distinct build-time triples.
pub fn collect_build_time_references<'a, I>(components: I) -> BTreeSet<PublicPartKey>
where
    I: IntoIterator<Item = &'a DevelopmentComponent>,
{
    components
        .into_iter()
        .flat_map(build_time_references)
        .collect()
}

/// Build-time references of a single component.
pub fn build_time_references(
    component: &DevelopmentComponent,
) -> impl Iterator<Item = PublicPartKey> + '_ {
    component
        .used_references()
        .iter()
        .filter(|reference| reference.is_at_build_time())
        .map(|reference| reference.key().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reference::PublicPartReference;
    use proptest::prelude::*;

    fn dc(name: &str, refs: Vec<PublicPartReference>) -> DevelopmentComponent {
        refs.into_iter()
            .fold(DevelopmentComponent::new("vendor.com", name), |dc, r| {
                dc.with_reference(r)
            })
    }

    #[test]
    fn test_empty_input() {
        let none: Vec<DevelopmentComponent> = Vec::new();
        assert!(collect_build_time_references(&none).is_empty());
    }

    #[test]
    fn test_shared_references_are_deduplicated() {
        let api = PublicPartReference::new("vendor.com", "dc1", "api").build_time();
        let components = vec![
            dc("dc2", vec![api.clone()]),
            dc("dc3", vec![api.clone().run_time()]),
        ];

        let keys = collect_build_time_references(&components);
        assert_eq!(keys.len(), 1);
        assert!(keys.contains(api.key()));
    }

    #[test]
    fn test_run_time_only_and_flagless_dropped() {
        let components = vec![dc(
            "dc3",
            vec![
                PublicPartReference::new("vendor.com", "dc1", "defLib").run_time(),
                PublicPartReference::new("vendor.com", "dc1", "unused"),
                PublicPartReference::new("vendor.com", "dc1", "api").build_time(),
            ],
        )];

        let keys: Vec<_> = collect_build_time_references(&components)
            .into_iter()
            .map(|k| k.part)
            .collect();
        assert_eq!(keys, vec!["api"]);
    }

    fn reference_strategy() -> impl Strategy<Value = PublicPartReference> {
        ("[ab]", "dc[0-3]", "(api|assembly|defLib)", any::<bool>(), any::<bool>()).prop_map(
            |(vendor, component, part, build, run)| {
                let mut r = PublicPartReference::new(vendor, component, part);
                if build {
                    r = r.build_time();
                }
                if run {
                    r = r.run_time();
                }
                r
            },
        )
    }

    proptest! {
        #[test]
        fn prop_count_matches_distinct_build_time_triples(
            refs in prop::collection::vec(reference_strategy(), 0..24)
        ) {
            let expected: BTreeSet<_> = refs
                .iter()
                .filter(|r| r.is_at_build_time())
                .map(|r| r.key().clone())
                .collect();

            let (left, right) = refs.split_at(refs.len() / 2);
            let components = vec![dc("x", left.to_vec()), dc("y", right.to_vec())];
            let keys = collect_build_time_references(&components);

            prop_assert_eq!(keys.len(), expected.len());
            for r in refs.iter().filter(|r| !r.is_at_build_time()) {
                if !expected.contains(r.key()) {
                    prop_assert!(!keys.contains(r.key()));
                }
            }
        }
    }
}
