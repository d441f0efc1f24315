use serde::{Deserialize, Serialize};
use thiserror::Error;

use freeq_dsp::utils::{log_frac, log_interp};
use freeq_dsp::FilterKind;

/// Number of equalizer bands.
pub const BAND_COUNT: usize = 10;

#[derive(Debug, Error)]
pub enum ParamError {
    #[error("band index {0} outside of 0..{BAND_COUNT}")]
    BandIndex(usize),
    #[error("{name} value {value} outside of range {min}..={max}")]
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

/// Parameters of a single equalizer band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandParams {
    pub freq: f32,
    pub gain_db: f32,
    pub q: f32,
    pub kind: FilterKind,
}

impl BandParams {
    pub const FREQ_MIN: f32 = 20.0;
    pub const FREQ_MAX: f32 = 20_000.0;
    pub const GAIN_MIN: f32 = -18.0;
    pub const GAIN_MAX: f32 = 18.0;
    pub const Q_MIN: f32 = 0.1;
    pub const Q_MAX: f32 = 10.0;

    /// Default parameters for band `index` of `count`. Frequencies are
    /// distributed over 20 Hz..20 kHz with logarithmic spacing; the edge
    /// bands default to broad shelves, the inner bands to peaks.
    pub fn new(index: usize, count: usize) -> Self {
        let frac = (index as f32 + 0.5) / count as f32;
        let freq = log_interp(Self::FREQ_MIN, Self::FREQ_MAX, frac);

        let q = if index == 0 || index == count - 1 {
            0.5
        } else {
            2.0
        };

        let kind = match index {
            0 => FilterKind::LowShelf,
            _ if index == count - 1 => FilterKind::HighShelf,
            _ => FilterKind::Peak,
        };

        Self {
            freq,
            gain_db: 0.0,
            q,
            kind,
        }
    }

    pub fn set_freq(&mut self, freq: f32) -> Result<(), ParamError> {
        check_range("frequency", freq, Self::FREQ_MIN, Self::FREQ_MAX)?;
        self.freq = freq;
        Ok(())
    }

    pub fn set_gain_db(&mut self, gain_db: f32) -> Result<(), ParamError> {
        check_range("gain", gain_db, Self::GAIN_MIN, Self::GAIN_MAX)?;
        self.gain_db = if self.kind.uses_gain() { gain_db } else { 0.0 };
        Ok(())
    }

    pub fn set_q(&mut self, q: f32) -> Result<(), ParamError> {
        check_range("q", q, Self::Q_MIN, Self::Q_MAX)?;
        self.q = q;
        Ok(())
    }

    /// Switching to a kind without a gain control zeroes the stored gain so
    /// switching back starts from flat.
    pub fn set_kind(&mut self, kind: FilterKind) {
        self.kind = kind;
        if !kind.uses_gain() {
            self.gain_db = 0.0;
        }
    }
}

fn check_range(name: &'static str, value: f32, min: f32, max: f32) -> Result<(), ParamError> {
    if value < min || value > max || !value.is_finite() {
        return Err(ParamError::OutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// The full parameter state of the plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EqParams {
    pub bands: [BandParams; BAND_COUNT],
}

impl Default for EqParams {
    fn default() -> Self {
        let bands = std::array::from_fn(|index| BandParams::new(index, BAND_COUNT));
        Self { bands }
    }
}

impl EqParams {
    pub fn band(&self, index: usize) -> Result<&BandParams, ParamError> {
        self.bands.get(index).ok_or(ParamError::BandIndex(index))
    }

    pub fn band_mut(&mut self, index: usize) -> Result<&mut BandParams, ParamError> {
        self.bands
            .get_mut(index)
            .ok_or(ParamError::BandIndex(index))
    }

    /// Restores a band to its defaults.
    pub fn reset_band(&mut self, index: usize) -> Result<(), ParamError> {
        *self.band_mut(index)? = BandParams::new(index, BAND_COUNT);
        Ok(())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Host-facing description of one automatable parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamDescriptor {
    pub name: String,
    pub unit: &'static str,
    pub min: f32,
    pub max: f32,
    pub default: f32,
    /// Number of discrete steps, for stepped parameters.
    pub steps: Option<u32>,
    /// Whether the control maps its range logarithmically.
    pub log_skew: bool,
}

impl ParamDescriptor {
    /// Maps a plain value into 0..=1 for automation.
    pub fn normalize(&self, plain: f32) -> f32 {
        let plain = plain.clamp(self.min, self.max);
        if self.log_skew {
            log_frac(self.min, self.max, plain)
        } else {
            (plain - self.min) / (self.max - self.min)
        }
    }

    /// Maps a normalized 0..=1 value back into the plain range.
    pub fn plain(&self, normalized: f32) -> f32 {
        let normalized = normalized.clamp(0.0, 1.0);
        if self.log_skew {
            log_interp(self.min, self.max, normalized)
        } else {
            self.min + normalized * (self.max - self.min)
        }
    }
}

/// Descriptors for every automatable parameter, four per band, in band
/// order: frequency, gain, q, kind.
pub fn parameter_descriptors() -> Vec<ParamDescriptor> {
    let defaults = EqParams::default();
    let mut descriptors = Vec::with_capacity(BAND_COUNT * 4);
    for (index, band) in defaults.bands.iter().enumerate() {
        descriptors.push(ParamDescriptor {
            name: format!("Frequency ({index})"),
            unit: "Hz",
            min: BandParams::FREQ_MIN,
            max: BandParams::FREQ_MAX,
            default: band.freq,
            steps: None,
            log_skew: true,
        });
        descriptors.push(ParamDescriptor {
            name: format!("Gain ({index})"),
            unit: "dB",
            min: BandParams::GAIN_MIN,
            max: BandParams::GAIN_MAX,
            default: band.gain_db,
            steps: None,
            log_skew: false,
        });
        descriptors.push(ParamDescriptor {
            name: format!("Q ({index})"),
            unit: "",
            min: BandParams::Q_MIN,
            max: BandParams::Q_MAX,
            default: band.q,
            steps: None,
            log_skew: false,
        });
        descriptors.push(ParamDescriptor {
            name: format!("Kind ({index})"),
            unit: "",
            min: 0.0,
            max: (FilterKind::COUNT - 1) as f32,
            default: band.kind.id() as f32,
            steps: Some(FilterKind::COUNT),
            log_skew: false,
        });
    }
    descriptors
}
