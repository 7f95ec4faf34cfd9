use num::{Float, NumCast};

/// Round `value` to `places` decimal places (half away from zero).
///
/// # Arguments
/// * `value` - value to round
/// * `places` - number of decimal places to keep
#[inline]
pub fn round_to<F>(value: F, places: i32) -> F
where
    F: Float,
{
    let Some(factor) = <F as NumCast>::from(10f64.powi(places)) else {
        return value;
    };
    (value * factor).round() / factor
}

/// Arithmetic mean of a sequence of counts.
/// Returns `None` for an empty sequence.
#[inline]
pub fn mean<F, I>(values: I) -> Option<F>
where
    F: Float,
    I: IntoIterator<Item = usize>,
{
    let (sum, n) = values
        .into_iter()
        .fold((0usize, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        return None;
    }
    Some(<F as NumCast>::from(sum)? / <F as NumCast>::from(n)?)
}

/// `numerator / denominator` as a float ratio, 0.0 when the denominator is 0.
#[inline]
pub fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_two_places() {
        assert_eq!(round_to(3.14159f64, 2), 3.14);
        assert_eq!(round_to(2.675f64 + 1e-9, 2), 2.68);
        assert_eq!(round_to(4.0f32, 2), 4.0);
        assert_eq!(round_to(-1.006f64, 2), -1.01);
    }

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean::<f64, _>(Vec::new()), None);
        assert_eq!(mean::<f64, _>(vec![3, 3, 6]), Some(4.0));
    }

    #[test]
    fn ratio_guards_zero_denominator() {
        assert_eq!(ratio(3, 0), 0.0);
        assert_eq!(ratio(1, 4), 0.25);
    }
}
