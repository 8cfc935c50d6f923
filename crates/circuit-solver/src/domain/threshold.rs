//! Threshold decision rule.
//!
//! And, Or, GreaterThan and LessThan all compare the number of true children
//! against an integer threshold:
//!
//! | Gate | Comparison | Threshold |
//! |------|------------|-----------|
//! | `AND(n)` | `count > k` | `n - 1` |
//! | `OR` | `count > k` | `0` |
//! | `GT(k)` | `count > k` | `k` |
//! | `LT(k)` | `count < k` | `k` |
//!
//! While children resolve, the outcome becomes fixed as soon as the
//! unresolved remainder can no longer change it.

/// Direction of the comparison against the threshold
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    /// `true_count > threshold`
    Greater,
    /// `true_count < threshold`
    Less,
}

/// Comparison of a true-count against a threshold
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThresholdRule {
    pub threshold: i64,
    pub comparison: Comparison,
}

impl ThresholdRule {
    pub fn greater_than(threshold: i64) -> Self {
        Self {
            threshold,
            comparison: Comparison::Greater,
        }
    }

    pub fn less_than(threshold: i64) -> Self {
        Self {
            threshold,
            comparison: Comparison::Less,
        }
    }

    /// Every one of `arity` inputs true. Zero arity gives `count > -1`.
    pub fn all_of(arity: usize) -> Self {
        Self::greater_than(arity as i64 - 1)
    }

    /// At least one input true.
    pub fn any_of() -> Self {
        Self::greater_than(0)
    }

    /// Outcome if it no longer depends on the `remaining` unresolved inputs.
    pub fn decide(&self, true_count: usize, remaining: usize) -> Option<bool> {
        let got = true_count as i64;
        let best = got + remaining as i64;
        let k = self.threshold;

        match self.comparison {
            Comparison::Greater if got > k => Some(true),
            Comparison::Greater if best <= k => Some(false),
            Comparison::Less if got >= k => Some(false),
            Comparison::Less if best < k => Some(true),
            _ => None,
        }
    }

    /// Outcome once every input has resolved.
    pub fn outcome(&self, true_count: usize) -> bool {
        let got = true_count as i64;
        match self.comparison {
            Comparison::Greater => got > self.threshold,
            Comparison::Less => got < self.threshold,
        }
    }
}

/// Running count for one gate evaluation.
#[derive(Clone, Debug)]
pub struct ThresholdTally {
    rule: ThresholdRule,
    true_count: usize,
    remaining: usize,
}

impl ThresholdTally {
    pub fn new(rule: ThresholdRule, arity: usize) -> Self {
        Self {
            rule,
            true_count: 0,
            remaining: arity,
        }
    }

    /// Decision available with the inputs seen so far.
    pub fn decision(&self) -> Option<bool> {
        self.rule.decide(self.true_count, self.remaining)
    }

    /// Account for one resolved input and re-check the rule.
    ///
    /// Always returns `Some` once the last input is recorded.
    pub fn record(&mut self, value: bool) -> Option<bool> {
        self.remaining = self.remaining.saturating_sub(1);
        if value {
            self.true_count += 1;
        }
        self.decision()
    }

    pub fn true_count(&self) -> usize {
        self.true_count
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Final comparison, ignoring any unresolved inputs.
    pub fn outcome(&self) -> bool {
        self.rule.outcome(self.true_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally_all(rule: ThresholdRule, values: &[bool]) -> bool {
        let mut tally = ThresholdTally::new(rule, values.len());
        if let Some(decided) = tally.decision() {
            return decided;
        }
        for &value in values {
            if let Some(decided) = tally.record(value) {
                return decided;
            }
        }
        tally.outcome()
    }

    #[test]
    fn test_and_decides_false_on_first_false() {
        let mut tally = ThresholdTally::new(ThresholdRule::all_of(3), 3);
        assert_eq!(tally.decision(), None);
        assert_eq!(tally.record(false), Some(false));
        assert_eq!(tally.remaining(), 2);
    }

    #[test]
    fn test_and_needs_every_input_for_true() {
        let mut tally = ThresholdTally::new(ThresholdRule::all_of(3), 3);
        assert_eq!(tally.record(true), None);
        assert_eq!(tally.record(true), None);
        assert_eq!(tally.record(true), Some(true));
    }

    #[test]
    fn test_or_decides_true_on_first_true() {
        let mut tally = ThresholdTally::new(ThresholdRule::any_of(), 4);
        assert_eq!(tally.record(false), None);
        assert_eq!(tally.record(true), Some(true));
        assert_eq!(tally.true_count(), 1);
    }

    #[test]
    fn test_zero_arity_boundaries() {
        assert_eq!(ThresholdRule::all_of(0).decide(0, 0), Some(true));
        assert_eq!(ThresholdRule::any_of().decide(0, 0), Some(false));
        assert_eq!(ThresholdRule::less_than(0).decide(0, 0), Some(false));
        assert_eq!(ThresholdRule::less_than(1).decide(0, 0), Some(true));
    }

    #[test]
    fn test_decided_before_any_input() {
        // GT with negative threshold is true regardless of inputs
        assert_eq!(ThresholdRule::greater_than(-1).decide(0, 5), Some(true));
        // GT above the arity can never be reached
        assert_eq!(ThresholdRule::greater_than(5).decide(0, 5), Some(false));
        // LT(0) is always false, LT above arity always true
        assert_eq!(ThresholdRule::less_than(0).decide(0, 3), Some(false));
        assert_eq!(ThresholdRule::less_than(4).decide(0, 3), Some(true));
        // Undecided in between
        assert_eq!(ThresholdRule::less_than(2).decide(0, 3), None);
    }

    #[test]
    fn test_less_than_decides_false_at_threshold() {
        let mut tally = ThresholdTally::new(ThresholdRule::less_than(2), 4);
        assert_eq!(tally.record(true), None);
        assert_eq!(tally.record(true), Some(false));
    }

    #[test]
    fn test_less_than_decides_true_when_unreachable() {
        let mut tally = ThresholdTally::new(ThresholdRule::less_than(2), 3);
        assert_eq!(tally.record(false), None);
        assert_eq!(tally.record(false), Some(true));
    }

    #[test]
    fn test_rule_matches_plain_count_for_all_inputs() {
        // Every input vector up to length 4, every threshold from -2 to 6
        for n in 0..=4usize {
            for mask in 0..(1u32 << n) {
                let values: Vec<bool> = (0..n).map(|i| mask & (1 << i) != 0).collect();
                let count = values.iter().filter(|&&v| v).count() as i64;
                for k in -2..=6i64 {
                    assert_eq!(
                        tally_all(ThresholdRule::greater_than(k), &values),
                        count > k,
                        "GT({k}) over {values:?}"
                    );
                    assert_eq!(
                        tally_all(ThresholdRule::less_than(k), &values),
                        count < k,
                        "LT({k}) over {values:?}"
                    );
                }
                assert_eq!(
                    tally_all(ThresholdRule::all_of(n), &values),
                    values.iter().all(|&v| v)
                );
                assert_eq!(
                    tally_all(ThresholdRule::any_of(), &values),
                    values.iter().any(|&v| v)
                );
            }
        }
    }

    #[test]
    fn test_last_record_always_decides() {
        let mut tally = ThresholdTally::new(ThresholdRule::greater_than(1), 2);
        tally.record(true);
        assert!(tally.record(false).is_some());
        assert_eq!(tally.remaining(), 0);
    }
}
