use serde::Serialize;

/// Where a spread sits relative to the common final margins
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KeyNumberAnalysis {
    pub spread: f64,
    pub abs_spread: f64,
    pub nearest_key_number: f64,
    pub distance_from_key: f64,
    /// Within half a point of a key number
    pub is_key_number: bool,
    /// Between half a point and a point away
    pub at_risk_of_push: bool,
}

/// Does moving from `market` by `edge` points pass through a key number?
///
/// Checks both directions from the absolute market spread, inclusive.
pub fn crosses_key_number(market: f64, edge: f64, key_numbers: &[f64]) -> bool {
    let m = market.abs();
    key_numbers
        .iter()
        .any(|&k| (m <= k && k <= m + edge) || (m >= k && k >= m - edge))
}

/// Nearest key number to a spread. Ties go to the earlier entry in
/// `key_numbers`, which is listed by importance.
pub fn analyze_key_numbers(spread: f64, key_numbers: &[f64]) -> KeyNumberAnalysis {
    let abs_spread = spread.abs();
    let nearest = key_numbers
        .iter()
        .copied()
        .fold(None, |best: Option<f64>, k| match best {
            Some(b) if (b - abs_spread).abs() <= (k - abs_spread).abs() => Some(b),
            _ => Some(k),
        })
        .unwrap_or(abs_spread);
    let distance = (abs_spread - nearest).abs();

    KeyNumberAnalysis {
        spread,
        abs_spread,
        nearest_key_number: nearest,
        distance_from_key: distance,
        is_key_number: distance < 0.5,
        at_risk_of_push: (0.5..1.0).contains(&distance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CROSSING: [f64; 2] = [3.0, 7.0];
    const ANALYSIS: [f64; 6] = [3.0, 7.0, 10.0, 6.0, 4.0, 14.0];

    #[test]
    fn test_small_edge_near_three_crosses() {
        // 3.2 - 0.4 = 2.8 <= 3 <= 3.2
        assert!(crosses_key_number(3.2, 0.4, &CROSSING));
        assert!(crosses_key_number(-3.2, 0.4, &CROSSING));
    }

    #[test]
    fn test_landing_exactly_on_key_counts() {
        assert!(crosses_key_number(3.0, 0.0, &CROSSING));
        assert!(crosses_key_number(6.0, 1.0, &CROSSING));
    }

    #[test]
    fn test_far_from_keys_does_not_cross() {
        assert!(!crosses_key_number(4.5, 1.0, &CROSSING));
        assert!(!crosses_key_number(10.0, 2.0, &CROSSING));
    }

    #[test]
    fn test_analysis_nearest_and_flags() {
        let a = analyze_key_numbers(-3.5, &ANALYSIS);
        // 3 and 4 are both half a point away; 3 comes first
        assert_eq!(a.nearest_key_number, 3.0);
        assert!(!a.is_key_number);
        assert!(a.at_risk_of_push);

        let a = analyze_key_numbers(6.8, &ANALYSIS);
        assert_eq!(a.nearest_key_number, 7.0);
        assert!(a.is_key_number);

        let a = analyze_key_numbers(12.0, &ANALYSIS);
        assert_eq!(a.nearest_key_number, 10.0);
        assert!(!a.is_key_number && !a.at_risk_of_push);
    }
}
