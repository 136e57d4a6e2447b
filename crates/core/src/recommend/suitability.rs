//! Use-case suitability aggregation.

use crate::domain::use_case::{ProductUseCaseScore, UseCaseCode};

use super::types::{MatchedUseCase, Suitability};

/// Aggregate a product's fit for the requested use cases.
///
/// Each requested code is looked up in the product's score rows; rows that
/// exist become matched entries, missing ones contribute nothing. The total
/// is the sum of matched scores divided by the REQUESTED count, rounded half
/// away from zero: asking for a use case a product has no data for drags
/// that product's total down. `matched` comes back sorted by descending
/// score so the strongest fit leads.
pub fn aggregate_score(scores: &[ProductUseCaseScore], requested: &[UseCaseCode]) -> Suitability {
    let mut matched: Vec<MatchedUseCase> = requested
        .iter()
        .filter_map(|code| scores.iter().find(|row| &row.code == code))
        .map(|row| MatchedUseCase { code: row.code.clone(), name: row.name.clone(), score: row.score })
        .collect();

    let total_score = if requested.is_empty() {
        0
    } else {
        let sum: u32 = matched.iter().map(|entry| u32::from(entry.score)).sum();
        (f64::from(sum) / requested.len() as f64).round() as u8
    };

    matched.sort_by(|a, b| b.score.cmp(&a.score));

    Suitability { total_score, matched }
}

#[cfg(test)]
mod tests {
    use crate::domain::use_case::{ProductUseCaseScore, UseCaseCode};
    use crate::recommend::MAX_SCORE;

    use super::aggregate_score;

    fn score_row(code: &str, name: &str, score: u8) -> ProductUseCaseScore {
        ProductUseCaseScore {
            code: UseCaseCode::new(code),
            name: name.to_string(),
            score,
            reasoning: None,
        }
    }

    fn codes(values: &[&str]) -> Vec<UseCaseCode> {
        values.iter().map(|value| UseCaseCode::new(*value)).collect()
    }

    #[test]
    fn average_is_taken_over_the_requested_count() {
        let scores = [score_row("computer_work", "Làm việc máy tính", 100)];

        let suitability = aggregate_score(&scores, &codes(&["computer_work", "driving"]));

        assert_eq!(suitability.total_score, 50);
        assert_eq!(suitability.matched.len(), 1);
        assert_eq!(suitability.matched[0].score, 100);
    }

    #[test]
    fn half_values_round_away_from_zero() {
        let scores =
            [score_row("computer_work", "Làm việc máy tính", 70), score_row("driving", "Lái xe", 65)];

        let suitability = aggregate_score(&scores, &codes(&["computer_work", "driving"]));

        assert_eq!(suitability.total_score, 68);
    }

    #[test]
    fn matched_entries_come_back_in_descending_score_order() {
        let scores = [
            score_row("computer_work", "Làm việc máy tính", 60),
            score_row("driving", "Lái xe", 95),
            score_row("reading", "Đọc sách", 75),
        ];

        let suitability =
            aggregate_score(&scores, &codes(&["computer_work", "driving", "reading"]));

        let ordered: Vec<u8> = suitability.matched.iter().map(|entry| entry.score).collect();
        assert_eq!(ordered, vec![95, 75, 60]);
        assert_eq!(suitability.total_score, 77);
    }

    #[test]
    fn empty_request_scores_zero_with_no_matches() {
        let scores = [score_row("computer_work", "Làm việc máy tính", 90)];

        let suitability = aggregate_score(&scores, &[]);

        assert_eq!(suitability.total_score, 0);
        assert!(suitability.matched.is_empty());
    }

    #[test]
    fn unscored_requests_contribute_no_matched_entry() {
        let scores = [score_row("computer_work", "Làm việc máy tính", 80)];

        let suitability =
            aggregate_score(&scores, &codes(&["computer_work", "driving", "outdoor"]));

        assert_eq!(suitability.matched.len(), 1);
        // 80 spread over three requested cases.
        assert_eq!(suitability.total_score, 27);
    }

    #[test]
    fn full_marks_on_every_requested_case_hits_the_ceiling() {
        let scores =
            [score_row("computer_work", "Làm việc máy tính", 100), score_row("driving", "Lái xe", 100)];

        let suitability = aggregate_score(&scores, &codes(&["computer_work", "driving"]));

        assert_eq!(suitability.total_score, MAX_SCORE);
    }
}
