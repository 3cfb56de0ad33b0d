//! One-pass selection of facts by a fixed three-relation allow-list.

use crate::fact::Fact;

/// Default allow-list: the final occurrence relations of a deduced fact set.
pub const DEFAULT_RELATIONS: [&str; 3] = ["<occursIn>", "<occursSince>", "<occursUntil>"];

/// Forwards exactly the facts whose relation is one of three fixed
/// identifiers, preserving relative order. No deduplication beyond relation
/// membership, no failure modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationFilter {
    relations: [String; 3],
}

impl RelationFilter {
    /// Builds a filter over exactly three relation identifiers.
    pub fn new(relations: [String; 3]) -> Self {
        Self { relations }
    }

    /// The allow-listed relations.
    pub fn relations(&self) -> &[String; 3] {
        &self.relations
    }

    /// Whether a single fact passes the filter.
    pub fn matches(&self, fact: &Fact) -> bool {
        self.relations.iter().any(|r| *r == fact.relation)
    }

    /// Lazily selects the matching subsequence of `facts`.
    pub fn select<'a, I>(&'a self, facts: I) -> impl Iterator<Item = Fact> + 'a
    where
        I: IntoIterator<Item = Fact>,
        I::IntoIter: 'a,
    {
        facts.into_iter().filter(move |fact| self.matches(fact))
    }
}

impl Default for RelationFilter {
    fn default() -> Self {
        Self::new(DEFAULT_RELATIONS.map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn selects_the_matching_subsequence_in_order() {
        let filter = RelationFilter::default();
        let input = vec![
            Fact::new("<e1>", "<occursIn>", "<Berlin>"),
            Fact::new("<e1>", "<happenedOnDate>", "\"1990\""),
            Fact::new("<e2>", "<occursSince>", "\"1990\""),
            Fact::new("<e2>", "<occursIn>", "<Paris>"),
            Fact::new("<e3>", "<occursUntil>", "\"2000\""),
        ];
        let selected: Vec<_> = filter.select(input.clone()).collect();
        assert_eq!(
            selected,
            vec![
                input[0].clone(),
                input[2].clone(),
                input[3].clone(),
                input[4].clone()
            ]
        );
    }

    #[test]
    fn duplicates_pass_through_untouched() {
        let filter = RelationFilter::default();
        let fact = Fact::new("<e>", "<occursIn>", "<Rome>");
        let selected: Vec<_> = filter.select(vec![fact.clone(), fact.clone()]).collect();
        assert_eq!(selected, vec![fact.clone(), fact]);
    }

    #[test]
    fn custom_allow_list_replaces_the_default() {
        let filter = RelationFilter::new([
            "<a>".to_string(),
            "<b>".to_string(),
            "<c>".to_string(),
        ]);
        assert!(filter.matches(&Fact::new("<s>", "<b>", "<o>")));
        assert!(!filter.matches(&Fact::new("<s>", "<occursIn>", "<o>")));
    }
}
