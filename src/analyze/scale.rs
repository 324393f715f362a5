pub const TEAL: &str = "#26A69A";
pub const GREEN: &str = "#66BB6A";
pub const YELLOW: &str = "#FFEB3B";
pub const ORANGE: &str = "#FFA726";
pub const RED: &str = "#FF5252";

/// Class 1 (best) to 5 (worst) for a 0-100 index, inclusive at each breakpoint.
pub fn five_band_class(index: f64) -> u8 {
    if index >= 80.0 {
        1
    } else if index >= 60.0 {
        2
    } else if index >= 40.0 {
        3
    } else if index >= 20.0 {
        4
    } else {
        5
    }
}

pub fn five_band_color(class: u8) -> &'static str {
    match class {
        1 => TEAL,
        2 => GREEN,
        3 => YELLOW,
        4 => ORANGE,
        _ => RED,
    }
}

/// Class, label and color for a 0-100 index given the five labels best-first.
pub fn grade_index(index: f64, labels: &[&'static str; 5]) -> (u8, &'static str, &'static str) {
    let class = five_band_class(index);
    (class, labels[usize::from(class - 1)], five_band_color(class))
}

pub fn weighted_mean(pairs: impl IntoIterator<Item = (f64, f64)>) -> Option<f64> {
    let (sum, weight) = pairs
        .into_iter()
        .fold((0.0, 0.0), |(sum, total), (score, weight)| {
            (sum + score * weight, total + weight)
        });
    (weight > 0.0).then(|| sum / weight)
}

/// Rounds halves toward positive infinity.
pub fn round_index(index: f64) -> f64 {
    (index + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoints_are_inclusive() {
        assert_eq!(five_band_class(80.0), 1);
        assert_eq!(five_band_class(79.999), 2);
        assert_eq!(five_band_class(60.0), 2);
        assert_eq!(five_band_class(59.999), 3);
        assert_eq!(five_band_class(40.0), 3);
        assert_eq!(five_band_class(20.0), 4);
        assert_eq!(five_band_class(19.999), 5);
        assert_eq!(five_band_class(0.0), 5);
    }

    #[test]
    fn grade_index_pairs_labels_with_colors() {
        let labels = ["a", "b", "c", "d", "e"];
        assert_eq!(grade_index(100.0, &labels), (1, "a", TEAL));
        assert_eq!(grade_index(45.0, &labels), (3, "c", YELLOW));
        assert_eq!(grade_index(3.0, &labels), (5, "e", RED));
    }

    #[test]
    fn weighted_mean_ignores_empty_input() {
        assert_eq!(weighted_mean(Vec::new()), None);
        let mean = weighted_mean(vec![(1.0, 1.0), (0.0, 3.0)]).expect("non-empty");
        assert!((mean - 0.25).abs() < 1e-12);
    }

    #[test]
    fn round_index_rounds_halves_up() {
        assert_eq!(round_index(69.5), 70.0);
        assert_eq!(round_index(69.4999), 69.0);
        assert_eq!(round_index(-0.5), 0.0);
    }
}
