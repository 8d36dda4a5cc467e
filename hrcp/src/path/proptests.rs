//! Property-based tests for path relationships.
//!
//! Note: The normalize module already has property tests for normalization.
//! This module focuses on relationship laws.

use super::normalize::join;
use super::relationship::PathRelationship;
use proptest::prelude::*;

fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,8}"
}

fn path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(segment_strategy(), 1..6).prop_map(|parts| join(&parts))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // A path is always the same as itself
    #[test]
    fn path_relationship_reflexive(path in path_strategy()) {
        prop_assert_eq!(PathRelationship::between(&path, &path), PathRelationship::Same);
    }

    // Appending segments always yields a descendant
    #[test]
    fn appended_segments_are_descendants(
        base in path_strategy(),
        extra in prop::collection::vec(segment_strategy(), 1..4),
    ) {
        let child = format!("{base}{}", join(&extra));
        prop_assert_eq!(PathRelationship::between(&base, &child), PathRelationship::Ancestor);
        prop_assert_eq!(PathRelationship::between(&child, &base), PathRelationship::Descendant);
        prop_assert!(PathRelationship::is_within(&child, &base));
    }

    // Relationship symmetry: if A is ancestor of B, then B is descendant of A
    #[test]
    fn path_relationship_symmetric(path1 in path_strategy(), path2 in path_strategy()) {
        let rel_12 = PathRelationship::between(&path1, &path2);
        let rel_21 = PathRelationship::between(&path2, &path1);

        let is_symmetric = matches!(
            (rel_12, rel_21),
            (PathRelationship::Ancestor, PathRelationship::Descendant)
                | (PathRelationship::Descendant, PathRelationship::Ancestor)
                | (PathRelationship::Same, PathRelationship::Same)
                | (PathRelationship::Unrelated, PathRelationship::Unrelated)
        );

        prop_assert!(is_symmetric, "Invalid symmetry: {:?} <-> {:?}", rel_12, rel_21);
    }
}
