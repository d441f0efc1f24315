/// Converts decibels to a linear gain factor, treating anything at or below
/// -120 dB as silence.
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    if db <= -120.0 {
        0.0
    } else {
        10.0f32.powf(db * 0.05)
    }
}

/// Maps a 0..=1 fraction onto `min..=max` with logarithmic spacing.
///
/// Frequency controls live in log space: the octave from 100 to 200 Hz takes
/// as much of the control range as the one from 5 to 10 kHz.
#[inline]
pub fn log_interp(min: f32, max: f32, frac: f32) -> f32 {
    let factor = f32::log2(max / min);
    f32::powf(2.0, frac * factor + min.log2())
}

/// Inverse of [`log_interp`]: the fraction of `min..=max` at which `value`
/// sits in log space.
#[inline]
pub fn log_frac(min: f32, max: f32, value: f32) -> f32 {
    let factor = f32::log2(max / min);
    (f32::log2(value) - min.log2()) / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_conversions() {
        assert!((db_to_linear(0.0) - 1.0).abs() < 1e-6);
        assert!((db_to_linear(6.0) - 1.9953).abs() < 1e-3);
        assert_eq!(db_to_linear(-180.0), 0.0);
    }

    #[test]
    fn log_interp_endpoints_and_midpoint() {
        assert!((log_interp(20.0, 20_000.0, 0.0) - 20.0).abs() < 1e-3);
        assert!((log_interp(20.0, 20_000.0, 1.0) - 20_000.0).abs() < 1.0);
        // Geometric mean sits halfway in log space.
        let mid = log_interp(20.0, 20_000.0, 0.5);
        assert!((mid - (20.0f32 * 20_000.0).sqrt()).abs() < 1.0);
    }

    #[test]
    fn log_frac_inverts_interp() {
        for frac in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let value = log_interp(20.0, 20_000.0, frac);
            assert!((log_frac(20.0, 20_000.0, value) - frac).abs() < 1e-5);
        }
    }
}
