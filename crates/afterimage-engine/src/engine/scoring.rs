use crate::core::CellSet;

/// Points awarded per level for a perfect reproduction.
const POINTS_PER_LEVEL: u64 = 100;

/// Result of comparing a submitted selection against the target shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundScore {
    /// Jaccard overlap between target and selection, in `[0, 1]`.
    pub accuracy: f64,
    /// Only an exact reproduction passes; partial credit is display-only.
    pub passed: bool,
    /// `level * 100 * accuracy`, floored. Zero unless passed.
    pub points: u64,
}

/// Scores a submitted selection against the target shape.
///
/// Accuracy is `|target ∩ selection| / |target ∪ selection|`, so both
/// omissions and extra picks pull the score below `1.0`. The sets are equal
/// exactly when the intersection and union have the same length, which makes
/// the passing accuracy exactly `1.0`.
#[must_use]
#[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn evaluate(level: u32, target: &CellSet, selections: &CellSet) -> RoundScore {
    let union = target.union_len(selections);
    if union == 0 {
        return RoundScore {
            accuracy: 0.0,
            passed: false,
            points: 0,
        };
    }
    let intersection = target.intersection_len(selections);
    let accuracy = intersection as f64 / union as f64;
    let passed = intersection == union;
    let points = if passed {
        ((u64::from(level) * POINTS_PER_LEVEL) as f64 * accuracy).floor() as u64
    } else {
        0
    };
    RoundScore {
        accuracy,
        passed,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Cell;

    fn set(cells: &[(u8, u8)]) -> CellSet {
        cells.iter().map(|&(x, y)| Cell::new(x, y)).collect()
    }

    #[test]
    fn test_exact_match_passes_with_full_points() {
        let target = set(&[(1, 1), (1, 2), (2, 2), (3, 2), (3, 3)]);
        let score = evaluate(3, &target, &target);
        assert!(score.passed);
        assert!((score.accuracy - 1.0).abs() < f64::EPSILON);
        assert_eq!(score.points, 300);
    }

    #[test]
    fn test_subset_scores_below_one_and_fails() {
        let target = set(&[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
        let subset = set(&[(0, 0), (1, 0)]);
        let score = evaluate(3, &target, &subset);
        assert!(!score.passed);
        assert!((score.accuracy - 0.4).abs() < 1e-12);
        assert_eq!(score.points, 0);
    }

    #[test]
    fn test_superset_scores_below_one_and_fails() {
        let target = set(&[(0, 0), (1, 0)]);
        let superset = set(&[(0, 0), (1, 0), (2, 0)]);
        let score = evaluate(5, &target, &superset);
        assert!(!score.passed);
        assert!(score.accuracy < 1.0);
        assert_eq!(score.points, 0);
    }

    #[test]
    fn test_empty_selection_scores_zero() {
        let target = set(&[(0, 0), (1, 0)]);
        let score = evaluate(1, &target, &CellSet::new());
        assert!(!score.passed);
        assert!(score.accuracy.abs() < f64::EPSILON);
        assert_eq!(score.points, 0);
    }

    #[test]
    fn test_disjoint_selection_scores_zero() {
        let target = set(&[(0, 0)]);
        let wrong = set(&[(5, 5)]);
        let score = evaluate(1, &target, &wrong);
        assert!(!score.passed);
        assert!(score.accuracy.abs() < f64::EPSILON);
    }
}
