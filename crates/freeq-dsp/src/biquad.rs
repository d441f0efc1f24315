use std::f32::consts::PI;
use std::fmt;

use num_complex::Complex32;
use serde::{Deserialize, Serialize};

/// The filter designs available per equalizer band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterKind {
    LowPass,
    LowPass2,
    LowShelf,
    HighPass,
    HighPass2,
    HighShelf,
    Peak,
    Notch,
}

impl FilterKind {
    pub const COUNT: u32 = 8;

    pub fn id(&self) -> u32 {
        match self {
            FilterKind::LowPass => 0,
            FilterKind::LowPass2 => 1,
            FilterKind::LowShelf => 2,
            FilterKind::HighPass => 3,
            FilterKind::HighPass2 => 4,
            FilterKind::HighShelf => 5,
            FilterKind::Peak => 6,
            FilterKind::Notch => 7,
        }
    }

    pub fn from_id(id: u32) -> Option<FilterKind> {
        match id {
            0 => Some(FilterKind::LowPass),
            1 => Some(FilterKind::LowPass2),
            2 => Some(FilterKind::LowShelf),
            3 => Some(FilterKind::HighPass),
            4 => Some(FilterKind::HighPass2),
            5 => Some(FilterKind::HighShelf),
            6 => Some(FilterKind::Peak),
            7 => Some(FilterKind::Notch),
            _ => None,
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            FilterKind::LowPass => "LP",
            FilterKind::LowPass2 => "LP2",
            FilterKind::LowShelf => "LS",
            FilterKind::HighPass => "HP",
            FilterKind::HighPass2 => "HP2",
            FilterKind::HighShelf => "HS",
            FilterKind::Peak => "PK",
            FilterKind::Notch => "NT",
        }
    }

    /// Whether the gain parameter affects this design. Pass and notch
    /// filters ignore gain entirely.
    pub fn uses_gain(&self) -> bool {
        matches!(
            self,
            FilterKind::LowShelf | FilterKind::HighShelf | FilterKind::Peak
        )
    }

    pub fn next(&self) -> FilterKind {
        FilterKind::from_id((self.id() + 1) % Self::COUNT).unwrap_or(FilterKind::Peak)
    }

    pub fn prev(&self) -> FilterKind {
        FilterKind::from_id((self.id() + Self::COUNT - 1) % Self::COUNT)
            .unwrap_or(FilterKind::Peak)
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterKind::LowPass => "Low Pass",
            FilterKind::LowPass2 => "Low Pass 2",
            FilterKind::LowShelf => "Low Shelf",
            FilterKind::HighPass => "High Pass",
            FilterKind::HighPass2 => "High Pass 2",
            FilterKind::HighShelf => "High Shelf",
            FilterKind::Peak => "Peak",
            FilterKind::Notch => "Notch",
        };
        f.write_str(name)
    }
}

/// Normalized biquad coefficients (a0 divided out).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoeffs {
    pub b0: f32,
    pub b1: f32,
    pub b2: f32,
    pub a1: f32,
    pub a2: f32,
}

impl BiquadCoeffs {
    /// Pass-through coefficients.
    #[inline]
    pub fn identity() -> Self {
        Self {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
        }
    }

    /// Designs the filter for the given parameters. The first-order pass
    /// filters use a tan pre-warp; the second-order designs follow the RBJ
    /// cookbook with `A = 10^(gain/40)` for the shelf and peak kinds.
    pub fn design(kind: FilterKind, freq: f32, gain_db: f32, q: f32, sample_rate: f32) -> Self {
        let sr = sample_rate.max(1.0);
        let q = q.max(0.01);
        // A = 10^(gain/40), i.e. the square root of the linear gain.
        let a = crate::utils::db_to_linear(gain_db).sqrt();

        let w0 = 2.0 * PI * freq / sr;
        let cos_w0 = w0.cos();

        let (b0, b1, b2, a0, a1, a2);
        match kind {
            FilterKind::LowPass => {
                let warped = f32::tan(w0 / 2.0);

                b0 = warped;
                b1 = warped;
                b2 = 0.0;
                a0 = warped + 1.0;
                a1 = warped - 1.0;
                a2 = 0.0;
            }
            FilterKind::LowPass2 => {
                let alpha = w0.sin() / (2.0 * q);

                b0 = (1.0 - cos_w0) / 2.0;
                b1 = 1.0 - cos_w0;
                b2 = (1.0 - cos_w0) / 2.0;
                a0 = 1.0 + alpha;
                a1 = -2.0 * cos_w0;
                a2 = 1.0 - alpha;
            }
            FilterKind::LowShelf => {
                let alpha = w0.sin() / 2.0 * (1.0 / q);
                let beta = 2.0 * a.sqrt() * alpha;

                b0 = a * ((a + 1.0) - (a - 1.0) * cos_w0 + beta);
                b1 = 2.0 * a * ((a - 1.0) - (a + 1.0) * cos_w0);
                b2 = a * ((a + 1.0) - (a - 1.0) * cos_w0 - beta);
                a0 = (a + 1.0) + (a - 1.0) * cos_w0 + beta;
                a1 = -2.0 * ((a - 1.0) + (a + 1.0) * cos_w0);
                a2 = (a + 1.0) + (a - 1.0) * cos_w0 - beta;
            }
            FilterKind::HighPass => {
                let warped = f32::tan(w0 / 2.0);

                b0 = 1.0;
                b1 = -1.0;
                b2 = 0.0;
                a0 = warped + 1.0;
                a1 = warped - 1.0;
                a2 = 0.0;
            }
            FilterKind::HighPass2 => {
                let alpha = w0.sin() / (2.0 * q);

                b0 = (1.0 + cos_w0) / 2.0;
                b1 = -(1.0 + cos_w0);
                b2 = (1.0 + cos_w0) / 2.0;
                a0 = 1.0 + alpha;
                a1 = -2.0 * cos_w0;
                a2 = 1.0 - alpha;
            }
            FilterKind::HighShelf => {
                let alpha = w0.sin() / 2.0 * (1.0 / q);
                let beta = 2.0 * a.sqrt() * alpha;

                b0 = a * ((a + 1.0) + (a - 1.0) * cos_w0 + beta);
                b1 = -2.0 * a * ((a - 1.0) + (a + 1.0) * cos_w0);
                b2 = a * ((a + 1.0) + (a - 1.0) * cos_w0 - beta);
                a0 = (a + 1.0) - (a - 1.0) * cos_w0 + beta;
                a1 = 2.0 * ((a - 1.0) - (a + 1.0) * cos_w0);
                a2 = (a + 1.0) - (a - 1.0) * cos_w0 - beta;
            }
            FilterKind::Peak => {
                let alpha = w0.sin() / (2.0 * q);

                b0 = 1.0 + alpha * a;
                b1 = -2.0 * cos_w0;
                b2 = 1.0 - alpha * a;
                a0 = 1.0 + alpha / a;
                a1 = -2.0 * cos_w0;
                a2 = 1.0 - alpha / a;
            }
            FilterKind::Notch => {
                let alpha = w0.sin() / (2.0 * q);

                b0 = 1.0;
                b1 = -2.0 * cos_w0;
                b2 = 1.0;
                a0 = 1.0 + alpha;
                a1 = -2.0 * cos_w0;
                a2 = 1.0 - alpha;
            }
        }

        let inv_a0 = 1.0 / a0;
        Self {
            b0: b0 * inv_a0,
            b1: b1 * inv_a0,
            b2: b2 * inv_a0,
            a1: a1 * inv_a0,
            a2: a2 * inv_a0,
        }
    }

    /// Magnitude of `H(z)` evaluated on the unit circle at `freq`.
    pub fn magnitude(&self, freq: f32, sample_rate: f32) -> f32 {
        let w = 2.0 * PI * freq / sample_rate.max(1.0);
        let z1 = Complex32::new(0.0, -w).exp();
        let z2 = Complex32::new(0.0, -2.0 * w).exp();

        let num = self.b0 + self.b1 * z1 + self.b2 * z2;
        let den = Complex32::new(1.0, 0.0) + self.a1 * z1 + self.a2 * z2;

        (num / den).norm()
    }

    /// Magnitude response in dB at `freq`.
    pub fn magnitude_db(&self, freq: f32, sample_rate: f32) -> f32 {
        20.0 * self.magnitude(freq, sample_rate).log10()
    }
}

/// Transposed direct-form II processing state for one biquad.
#[derive(Debug, Clone, Copy, Default)]
pub struct BiquadState {
    z1: f32,
    z2: f32,
}

impl BiquadState {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn process(&mut self, input: f32, coeffs: &BiquadCoeffs) -> f32 {
        let output = coeffs.b0 * input + self.z1;
        self.z1 = coeffs.b1 * input - coeffs.a1 * output + self.z2;
        self.z2 = coeffs.b2 * input - coeffs.a2 * output;
        output
    }

    #[inline]
    pub fn reset(&mut self) {
        self.z1 = 0.0;
        self.z2 = 0.0;
    }
}
