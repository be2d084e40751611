//! Integer score helpers shared by the metric and ranking code.

/// Round to the nearest integer and clamp into `[0, 100]`. Non-finite → 0.
#[inline]
pub(crate) fn to_score(x: f64) -> u8 {
    if !x.is_finite() {
        return 0;
    }
    x.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::to_score;

    #[test]
    fn rounds_and_clamps() {
        assert_eq!(to_score(49.5), 50);
        assert_eq!(to_score(49.49), 49);
        assert_eq!(to_score(-3.0), 0);
        assert_eq!(to_score(180.0), 100);
        assert_eq!(to_score(f64::NAN), 0);
    }
}
