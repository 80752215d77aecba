//! Search filter builder and executor.
//!
//! [`SearchFilter`] holds an AND-list of [`FilterConstraint`]s and applies
//! them to search candidates.

use serde::{Deserialize, Serialize};

use crate::clause::{ConstraintOutcome, FilterConstraint};
use crate::op::Comparator;
use crate::property::{same_key, PropertyStore};
use crate::traits::HasSessionProperties;
use crate::value::TypedValue;

/// A set of constraints every surviving candidate must satisfy.
///
/// Matching rules:
///
/// ```text
/// keep = for every constraint:
///          key absent from the candidate      -> constraint skipped
///          key present, comparator succeeds   -> continue
///          key present, comparator fails      -> drop (stop evaluating)
/// ```
///
/// Setting names and string values match ignoring ASCII case. An empty
/// filter keeps everything. Survivors keep their relative order.
///
/// # Example
///
/// ```
/// use sessionseek::{PropertyEntry, SearchCandidate, SearchFilter};
///
/// let candidates = vec![
///     SearchCandidate::new("c1", vec![PropertyEntry::string("Region", "NA"), PropertyEntry::int("Slots", 4)]),
///     SearchCandidate::new("c2", vec![PropertyEntry::string("Region", "EU"), PropertyEntry::int("Slots", 8)]),
///     SearchCandidate::new("c3", vec![PropertyEntry::int("Slots", 1)]),
/// ];
///
/// let filter = SearchFilter::new()
///     .eq("Region", "NA")
///     .gte("Slots", 2)
///     .build();
///
/// let ids: Vec<_> = filter.filter(&candidates).iter().map(|c| c.id.as_str()).collect();
/// assert_eq!(ids, ["c1"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchFilter {
    constraints: Vec<FilterConstraint>,
}

impl SearchFilter {
    /// Creates a new empty filter.
    ///
    /// An empty filter matches all candidates.
    pub fn new() -> Self {
        SearchFilter::default()
    }

    // ========================================================================
    // Builders
    // ========================================================================

    /// Adds a constraint.
    pub fn constraint(mut self, constraint: FilterConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Adds a constraint built from parts.
    pub fn with(self, key: &str, op: Comparator, value: impl Into<TypedValue>) -> Self {
        self.constraint(FilterConstraint::new(key, op, value))
    }

    /// Sets the constraint for a key, replacing the comparator and value of
    /// an existing constraint on the same key, or appending a new one. Keys
    /// match ignoring ASCII case.
    pub fn set(mut self, constraint: FilterConstraint) -> Self {
        let mut found = false;
        for existing in self
            .constraints
            .iter_mut()
            .filter(|c| same_key(&c.key, &constraint.key))
        {
            existing.op = constraint.op;
            existing.value = constraint.value.clone();
            found = true;
        }
        if !found {
            self.constraints.push(constraint);
        }
        self
    }

    pub fn eq(self, key: &str, value: impl Into<TypedValue>) -> Self {
        self.with(key, Comparator::Equals, value)
    }

    pub fn ne(self, key: &str, value: impl Into<TypedValue>) -> Self {
        self.with(key, Comparator::NotEquals, value)
    }

    pub fn gt(self, key: &str, value: impl Into<TypedValue>) -> Self {
        self.with(key, Comparator::GreaterThan, value)
    }

    pub fn gte(self, key: &str, value: impl Into<TypedValue>) -> Self {
        self.with(key, Comparator::GreaterThanEquals, value)
    }

    pub fn lt(self, key: &str, value: impl Into<TypedValue>) -> Self {
        self.with(key, Comparator::LessThan, value)
    }

    pub fn lte(self, key: &str, value: impl Into<TypedValue>) -> Self {
        self.with(key, Comparator::LessThanEquals, value)
    }

    /// Finalizes the filter.
    ///
    /// Present for builder symmetry; the filter is usable without it.
    pub fn build(self) -> Self {
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    pub fn constraints(&self) -> &[FilterConstraint] {
        &self.constraints
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn into_constraints(self) -> Vec<FilterConstraint> {
        self.constraints
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Tests a single property store against every constraint.
    pub fn matches_store(&self, store: &PropertyStore) -> bool {
        for constraint in &self.constraints {
            if constraint.evaluate(store) == ConstraintOutcome::Failed {
                tracing::trace!(%constraint, "candidate rejected");
                return false;
            }
        }
        true
    }

    /// Tests a single candidate.
    pub fn matches<T: HasSessionProperties + ?Sized>(&self, item: &T) -> bool {
        self.matches_store(item.session_properties())
    }

    /// Filters a slice, returning references to surviving candidates in order.
    pub fn filter<'a, T: HasSessionProperties>(&self, items: &'a [T]) -> Vec<&'a T> {
        let results: Vec<&'a T> = items.iter().filter(|item| self.matches(*item)).collect();
        tracing::debug!(
            candidates = items.len(),
            kept = results.len(),
            constraints = self.constraints.len(),
            "filtered search candidates"
        );
        results
    }

    /// Filters and clones surviving candidates.
    pub fn filter_cloned<T: HasSessionProperties + Clone>(&self, items: &[T]) -> Vec<T> {
        self.filter(items).into_iter().cloned().collect()
    }

    /// Filters a vector in place, keeping only surviving candidates.
    pub fn filter_mut<T: HasSessionProperties>(&self, items: &mut Vec<T>) {
        items.retain(|item| self.matches(item));
    }

    /// Counts the surviving candidates.
    pub fn count<T: HasSessionProperties>(&self, items: &[T]) -> usize {
        items.iter().filter(|item| self.matches(*item)).count()
    }

    /// Returns `true` if any candidate survives.
    pub fn any<T: HasSessionProperties>(&self, items: &[T]) -> bool {
        items.iter().any(|item| self.matches(item))
    }

    /// Finds the first surviving candidate.
    pub fn find<'a, T: HasSessionProperties>(&self, items: &'a [T]) -> Option<&'a T> {
        items.iter().find(|item| self.matches(*item))
    }

    /// Finds the index of the first surviving candidate.
    pub fn position<T: HasSessionProperties>(&self, items: &[T]) -> Option<usize> {
        items.iter().position(|item| self.matches(item))
    }
}

impl From<Vec<FilterConstraint>> for SearchFilter {
    fn from(constraints: Vec<FilterConstraint>) -> Self {
        SearchFilter { constraints }
    }
}

impl FromIterator<FilterConstraint> for SearchFilter {
    fn from_iter<I: IntoIterator<Item = FilterConstraint>>(iter: I) -> Self {
        SearchFilter {
            constraints: iter.into_iter().collect(),
        }
    }
}

/// Keeps the candidates that satisfy every constraint.
///
/// Owned counterpart of [`SearchFilter::filter`]; relative order is kept.
pub fn filter_candidates<T: HasSessionProperties>(
    mut candidates: Vec<T>,
    constraints: &[FilterConstraint],
) -> Vec<T> {
    if constraints.is_empty() {
        return candidates;
    }
    let filter = SearchFilter::from(constraints.to_vec());
    filter.filter_mut(&mut candidates);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropertyEntry;
    use crate::traits::SearchCandidate;

    fn sample() -> Vec<SearchCandidate> {
        vec![
            SearchCandidate::new(
                "c1",
                vec![
                    PropertyEntry::string("Region", "NA"),
                    PropertyEntry::int("Slots", 4),
                ],
            ),
            SearchCandidate::new(
                "c2",
                vec![
                    PropertyEntry::string("Region", "EU"),
                    PropertyEntry::int("Slots", 2),
                ],
            ),
            SearchCandidate::new(
                "c3",
                vec![
                    PropertyEntry::string("Region", "NA"),
                    PropertyEntry::int("Slots", 0),
                    PropertyEntry::bool("Ranked", true),
                ],
            ),
            SearchCandidate::new("c4", vec![PropertyEntry::double("Version", 1.2)]),
        ]
    }

    fn ids<T: std::borrow::Borrow<SearchCandidate>>(items: &[T]) -> Vec<&str> {
        items.iter().map(|c| c.borrow().id.as_str()).collect()
    }

    #[test]
    fn empty_filter_keeps_all() {
        let candidates = sample();
        let filter = SearchFilter::new().build();
        assert!(filter.is_empty());
        assert_eq!(filter.filter(&candidates).len(), candidates.len());
    }

    #[test]
    fn absent_key_does_not_disqualify() {
        let candidates = sample();
        let filter = SearchFilter::new().eq("Ranked", true).build();
        assert_eq!(ids(&filter.filter(&candidates)), ["c1", "c2", "c3", "c4"]);

        let filter = SearchFilter::new().eq("Ranked", false).build();
        assert_eq!(ids(&filter.filter(&candidates)), ["c1", "c2", "c4"]);
    }

    #[test]
    fn stable_removal_of_middle_candidate() {
        let candidates = sample();
        let filter = SearchFilter::new().ne("Region", "EU").build();
        assert_eq!(ids(&filter.filter(&candidates)), ["c1", "c3", "c4"]);
    }

    #[test]
    fn all_constraints_must_pass() {
        let candidates = sample();
        let filter = SearchFilter::new().eq("Region", "NA").gte("Slots", 1).build();
        assert_eq!(ids(&filter.filter(&candidates)), ["c1", "c4"]);
    }

    #[test]
    fn kind_mismatch_disqualifies_when_present() {
        let candidates = sample();
        // Slots is stored as Int32; an Int64 expectation never matches it.
        let filter = SearchFilter::new().ne("Slots", 100u64).build();
        assert_eq!(ids(&filter.filter(&candidates)), ["c4"]);
    }

    #[test]
    fn set_replaces_existing_key() {
        let filter = SearchFilter::new()
            .eq("Slots", 4)
            .set(FilterConstraint::new("Slots", Comparator::LessThan, 3))
            .set(FilterConstraint::new("Region", Comparator::Equals, "EU"))
            .build();

        assert_eq!(filter.len(), 2);
        assert_eq!(filter.constraints()[0].op, Comparator::LessThan);
        assert_eq!(filter.constraints()[0].value, TypedValue::Int32(3));
        assert_eq!(ids(&filter.filter(&sample())), ["c2", "c4"]);
    }

    #[test]
    fn keys_and_strings_match_ignoring_case() {
        let candidates = sample();

        let filter = SearchFilter::new().eq("region", "na").build();
        assert_eq!(ids(&filter.filter(&candidates)), ["c1", "c3", "c4"]);

        // A differently cased key still applies the constraint.
        let filter = SearchFilter::new().eq("REGION", "EU").build();
        assert_eq!(ids(&filter.filter(&candidates)), ["c2", "c4"]);
    }

    #[test]
    fn set_replaces_key_ignoring_case() {
        let filter = SearchFilter::new()
            .gte("Slots", 1)
            .set(FilterConstraint::new("SLOTS", Comparator::LessThan, 3));

        assert_eq!(filter.len(), 1);
        assert_eq!(filter.constraints()[0].key, "Slots");
        assert_eq!(filter.constraints()[0].op, Comparator::LessThan);
    }

    #[test]
    fn end_to_end_scenario() {
        let candidate = SearchCandidate::new(
            "lobby",
            vec![
                PropertyEntry::string("Region", "NA"),
                PropertyEntry::int("Slots", 4),
            ],
        );

        assert!(SearchFilter::new().eq("Region", "NA").matches(&candidate));
        assert!(!SearchFilter::new().eq("Region", "EU").matches(&candidate));
        assert!(!SearchFilter::new().eq("region", "EU").matches(&candidate));
        assert!(SearchFilter::new().eq("Region", "na").matches(&candidate));
        assert!(SearchFilter::new().lt("Ping", 50).matches(&candidate));
    }

    #[test]
    fn owned_filter_function() {
        let kept = filter_candidates(
            sample(),
            &[FilterConstraint::new("Region", Comparator::Equals, "EU")],
        );
        assert_eq!(ids(&kept), ["c2", "c4"]);

        assert_eq!(filter_candidates(sample(), &[]).len(), 4);
        assert!(filter_candidates(Vec::<SearchCandidate>::new(), &[]).is_empty());
    }

    #[test]
    fn helpers() {
        let candidates = sample();
        let filter = SearchFilter::new().eq("Region", "EU").build();

        assert_eq!(filter.count(&candidates), 2);
        assert!(filter.any(&candidates));
        assert_eq!(filter.find(&candidates).map(|c| c.id.as_str()), Some("c2"));
        assert_eq!(filter.position(&candidates), Some(1));
        assert_eq!(ids(&filter.filter_cloned(&candidates)), ["c2", "c4"]);

        let mut owned = candidates.clone();
        filter.filter_mut(&mut owned);
        assert_eq!(ids(&owned), ["c2", "c4"]);

        let none = SearchFilter::new().eq("Region", "APAC").gt("Slots", 100).build();
        assert_eq!(none.position(&candidates[..3]), None);
    }

    #[test]
    fn filter_over_plain_stores() {
        let stores: Vec<PropertyStore> = vec![
            vec![PropertyEntry::int("Slots", 1)].into(),
            vec![PropertyEntry::int("Slots", 9)].into(),
        ];
        let filter = SearchFilter::new().lte("Slots", 5).build();
        assert_eq!(filter.filter(&stores).len(), 1);
    }

    #[test]
    fn serde_is_a_plain_list() {
        let filter = SearchFilter::new().eq("Region", "NA").build();
        let json = serde_json::to_value(&filter).unwrap();
        assert!(json.is_array());

        let back: SearchFilter = serde_json::from_value(json).unwrap();
        assert_eq!(back, filter);
    }
}
