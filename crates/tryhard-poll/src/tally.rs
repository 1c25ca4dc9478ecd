//! Reaction tallying into the three fixed vote buckets.

/// The three vote affordances, in display order.
pub const POLL_CHOICES: [&str; 3] = ["✅", "❌", "🤔"];

/// Per-choice collection of voter display names, built at close time.
///
/// Names are kept in the order they were recorded. A voter who reacted to
/// several recognized choices appears in each of their buckets; the tally
/// performs no cross-choice deduplication.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactionTally {
    buckets: [Vec<String>; 3],
}

impl ReactionTally {
    /// Creates an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a voter under a choice. Returns `false` (and records
    /// nothing) when the emoji is not one of the recognized choices.
    pub fn record(&mut self, emoji: &str, display_name: impl Into<String>) -> bool {
        match POLL_CHOICES.iter().position(|choice| *choice == emoji) {
            Some(index) => {
                self.buckets[index].push(display_name.into());
                true
            }
            None => false,
        }
    }

    /// Voter names recorded under a choice, in recording order.
    pub fn names(&self, emoji: &str) -> &[String] {
        POLL_CHOICES
            .iter()
            .position(|choice| *choice == emoji)
            .map_or(&[], |index| self.buckets[index].as_slice())
    }

    /// Number of voters recorded under a choice.
    pub fn count(&self, emoji: &str) -> usize {
        self.names(emoji).len()
    }

    /// True when nobody voted on any choice.
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Iterates the choices with their voter lists, in display order.
    pub fn iter<'a>(&'a self) -> impl Iterator<Item = (&'static str, &'a [String])> + 'a {
        POLL_CHOICES
            .iter()
            .zip(self.buckets.iter())
            .map(|(choice, names)| (*choice, names.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_name_lists() {
        let mut tally = ReactionTally::new();
        assert!(tally.record("✅", "A"));
        assert!(tally.record("✅", "B"));
        assert!(tally.record("❌", "C"));

        assert_eq!(tally.count("✅"), 2);
        assert_eq!(tally.count("❌"), 1);
        assert_eq!(tally.count("🤔"), 0);
        assert_eq!(tally.names("✅"), ["A", "B"]);
        assert_eq!(tally.names("❌"), ["C"]);
        assert!(tally.names("🤔").is_empty());
        assert!(!tally.is_empty());
    }

    #[test]
    fn test_unrecognized_emoji_is_ignored() {
        let mut tally = ReactionTally::new();
        assert!(!tally.record("🎉", "A"));
        assert!(tally.is_empty());
        assert!(tally.names("🎉").is_empty());
        assert_eq!(tally.count("🎉"), 0);
    }

    #[test]
    fn test_voter_can_appear_in_several_buckets() {
        let mut tally = ReactionTally::new();
        tally.record("✅", "A");
        tally.record("🤔", "A");

        assert_eq!(tally.names("✅"), ["A"]);
        assert_eq!(tally.names("🤔"), ["A"]);
    }

    #[test]
    fn test_iteration_order_is_display_order() {
        let mut tally = ReactionTally::new();
        tally.record("🤔", "A");
        tally.record("✅", "B");

        let choices: Vec<&str> = tally.iter().map(|(choice, _)| choice).collect();
        assert_eq!(choices, ["✅", "❌", "🤔"]);
    }

    #[test]
    fn test_empty_tally() {
        let tally = ReactionTally::new();
        assert!(tally.is_empty());
        assert!(tally.iter().all(|(_, names)| names.is_empty()));
    }
}
