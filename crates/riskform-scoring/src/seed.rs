//! Score derivation for seeded questions.
//!
//! Seed rows label exactly one option per question ("Үгүй" = no, "Тийм" =
//! yes) with a 0/1 score; the opposite option is implied. This module turns
//! that single labeled option into the full (no_score, yes_score) pair.

/// Seed label for the NO option.
pub const LABEL_NO: &str = "Үгүй";
/// Seed label for the YES option.
pub const LABEL_YES: &str = "Тийм";

/// Derive the (no_score, yes_score) pair from one labeled option.
///
/// Inverse scoring: when one option scores 1 the other scores 0; a labeled
/// score of 0 leaves both at 0.
pub fn option_scores(option_text: &str, score: i64) -> (i64, i64) {
    if option_text == LABEL_NO && score == 1 {
        (1, 0)
    } else if option_text == LABEL_YES && score == 1 {
        (0, 1)
    } else {
        (0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labeled_no_scores_inversely() {
        assert_eq!(option_scores(LABEL_NO, 1), (1, 0));
    }

    #[test]
    fn labeled_yes_scores_directly() {
        assert_eq!(option_scores(LABEL_YES, 1), (0, 1));
    }

    #[test]
    fn zero_score_stays_zero_for_both() {
        assert_eq!(option_scores(LABEL_NO, 0), (0, 0));
        assert_eq!(option_scores(LABEL_YES, 0), (0, 0));
    }
}
