use freeq_dsp::utils::log_interp;
use freeq_dsp::{AudioBuffer, BiquadCoeffs, BiquadState, BufferConfig, FilterKind};

use crate::params::{BandParams, EqParams, ParamError, BAND_COUNT};

/// The equalizer processor: ten bands run in series over every channel.
#[derive(Debug, Clone)]
pub struct Equalizer {
    sample_rate: f32,
    params: EqParams,
    coeffs: [BiquadCoeffs; BAND_COUNT],
    states: Vec<[BiquadState; BAND_COUNT]>,
    dirty: bool,
}

impl Default for Equalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Equalizer {
    pub fn new() -> Self {
        Self {
            sample_rate: 48_000.0,
            params: EqParams::default(),
            coeffs: [BiquadCoeffs::identity(); BAND_COUNT],
            states: Vec::new(),
            dirty: true,
        }
    }

    /// Allocates per-channel filter state and recomputes coefficients for
    /// the configured sample rate.
    pub fn prepare(&mut self, config: &BufferConfig) {
        self.sample_rate = config.sample_rate.max(1.0);
        self.states = (0..config.layout.channels() as usize)
            .map(|_| [BiquadState::new(); BAND_COUNT])
            .collect();
        self.dirty = true;
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn params(&self) -> &EqParams {
        &self.params
    }

    /// Replaces the full parameter state, e.g. after preset load.
    pub fn set_params(&mut self, params: EqParams) {
        self.params = params;
        self.dirty = true;
    }

    pub fn band(&self, index: usize) -> Result<&BandParams, ParamError> {
        self.params.band(index)
    }

    /// Applies `edit` to one band and marks coefficients for recompute.
    pub fn edit_band(
        &mut self,
        index: usize,
        edit: impl FnOnce(&mut BandParams) -> Result<(), ParamError>,
    ) -> Result<(), ParamError> {
        edit(self.params.band_mut(index)?)?;
        self.dirty = true;
        Ok(())
    }

    pub fn set_band_kind(&mut self, index: usize, kind: FilterKind) -> Result<(), ParamError> {
        self.params.band_mut(index)?.set_kind(kind);
        self.dirty = true;
        Ok(())
    }

    pub fn reset_band(&mut self, index: usize) -> Result<(), ParamError> {
        self.params.reset_band(index)?;
        self.dirty = true;
        Ok(())
    }

    /// Clears all filter history without touching parameters.
    pub fn reset(&mut self) {
        for chain in &mut self.states {
            for state in chain.iter_mut() {
                state.reset();
            }
        }
    }

    fn refresh_coefficients(&mut self) {
        for (band, coeffs) in self.params.bands.iter().zip(self.coeffs.iter_mut()) {
            *coeffs = BiquadCoeffs::design(
                band.kind,
                band.freq,
                band.gain_db,
                band.q,
                self.sample_rate,
            );
        }
        self.dirty = false;
    }

    /// Processes the buffer in place. Every band is applied in series to
    /// every channel, matching the band order of the parameter state.
    pub fn process(&mut self, buffer: &mut AudioBuffer) {
        if self.dirty {
            self.refresh_coefficients();
        }
        for (channel, chain) in buffer.channels_mut().zip(self.states.iter_mut()) {
            for sample in channel.iter_mut() {
                for (state, coeffs) in chain.iter_mut().zip(self.coeffs.iter()) {
                    *sample = state.process(*sample, coeffs);
                }
            }
        }
    }

    /// Combined magnitude response of all bands at `freq`, in dB.
    pub fn response_db(&mut self, freq: f32) -> f32 {
        if self.dirty {
            self.refresh_coefficients();
        }
        self.coeffs
            .iter()
            .map(|coeffs| coeffs.magnitude_db(freq, self.sample_rate))
            .sum()
    }

    /// Samples the combined response at `points` log-spaced frequencies
    /// across the audible range. Returns `(freq, db)` pairs.
    pub fn response_curve(&mut self, points: usize) -> Vec<(f32, f32)> {
        let points = points.max(2);
        (0..points)
            .map(|i| {
                let frac = i as f32 / (points - 1) as f32;
                let freq = log_interp(BandParams::FREQ_MIN, BandParams::FREQ_MAX, frac);
                (freq, self.response_db(freq))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::TAU;

    use freeq_dsp::ChannelLayout;

    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    fn sine_buffer(freq: f32, channels: usize, frames: usize) -> AudioBuffer {
        let mut buffer = AudioBuffer::new(channels, frames);
        for channel in buffer.channels_mut() {
            for (i, sample) in channel.iter_mut().enumerate() {
                *sample = (TAU * freq * i as f32 / SAMPLE_RATE).sin() * 0.5;
            }
        }
        buffer
    }

    fn rms(samples: &[f32]) -> f32 {
        (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt()
    }

    #[test]
    fn prepare_sizes_state_per_channel() {
        let mut eq = Equalizer::new();
        eq.prepare(&BufferConfig::new(SAMPLE_RATE, 256, ChannelLayout::Stereo));
        assert_eq!(eq.states.len(), 2);
        eq.prepare(&BufferConfig::new(SAMPLE_RATE, 256, ChannelLayout::Mono));
        assert_eq!(eq.states.len(), 1);
    }

    #[test]
    fn flat_settings_pass_audio_through() {
        let mut eq = Equalizer::new();
        eq.prepare(&BufferConfig::new(SAMPLE_RATE, 512, ChannelLayout::Stereo));

        let reference = sine_buffer(1_000.0, 2, 512);
        let mut buffer = reference.clone();
        eq.process(&mut buffer);

        for (processed, original) in buffer.as_slice()[0]
            .iter()
            .zip(reference.as_slice()[0].iter())
        {
            assert!(
                (processed - original).abs() < 0.05,
                "flat EQ altered the signal: {processed} vs {original}"
            );
        }
    }

    #[test]
    fn cutting_band_attenuates_its_frequency() {
        let mut eq = Equalizer::new();
        eq.prepare(&BufferConfig::new(SAMPLE_RATE, 4_096, ChannelLayout::Mono));
        let target = eq.band(4).unwrap().freq;
        eq.edit_band(4, |band| band.set_gain_db(-18.0)).unwrap();

        let mut buffer = sine_buffer(target, 1, 4_096);
        let before = rms(&buffer.as_slice()[0]);
        eq.process(&mut buffer);
        // Skip the transient at the head of the block.
        let after = rms(&buffer.as_slice()[0][1_024..]);

        assert!(
            after < before * 0.35,
            "cut band left too much energy: {after} vs {before}"
        );
    }

    #[test]
    fn response_matches_band_gain_at_center() {
        let mut eq = Equalizer::new();
        eq.prepare(&BufferConfig::new(SAMPLE_RATE, 256, ChannelLayout::Stereo));
        let center = eq.band(5).unwrap().freq;
        eq.edit_band(5, |band| band.set_gain_db(6.0)).unwrap();

        let db = eq.response_db(center);
        assert!((db - 6.0).abs() < 1.0, "response at center was {db} dB");
    }

    #[test]
    fn response_curve_is_log_spaced_and_flat_by_default() {
        let mut eq = Equalizer::new();
        eq.prepare(&BufferConfig::new(SAMPLE_RATE, 256, ChannelLayout::Stereo));
        let curve = eq.response_curve(64);
        assert_eq!(curve.len(), 64);
        assert!((curve[0].0 - BandParams::FREQ_MIN).abs() < 0.1);
        assert!((curve[63].0 - BandParams::FREQ_MAX).abs() < 2.0);
        for (freq, db) in curve {
            assert!(db.abs() < 0.1, "default curve not flat at {freq} Hz: {db}");
        }
    }

    #[test]
    fn edit_band_rejects_bad_values_without_dirtying_params() {
        let mut eq = Equalizer::new();
        let before = eq.params().clone();
        assert!(eq.edit_band(2, |band| band.set_freq(5.0)).is_err());
        assert_eq!(eq.params(), &before);
    }
}
