//! Audio feature snapshot produced by the upstream FFT/mel pipeline.
//!
//! The microphone task owns sample capture, the FFT and beat detection; this
//! crate only consumes the most recent [`AudioFeatures`].

/// Mel bands per snapshot: one per matrix column.
pub const BAND_COUNT: usize = 40;

/// Bands averaged into [`AudioFeatures::bass`].
pub const LOW_BANDS: usize = 13;

/// Bands averaged into [`AudioFeatures::mids`].
pub const MID_BANDS: usize = 14;

/// Bands averaged into [`AudioFeatures::highs`].
pub const HIGH_BANDS: usize = BAND_COUNT - LOW_BANDS - MID_BANDS;

/// Normalised spectral features for one audio frame, each 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AudioFeatures {
    pub bands: [u8; BAND_COUNT],
    pub bass: u8,
    pub mids: u8,
    pub highs: u8,
    pub volume: u8,
    /// Set for the frame in which a beat was detected.
    pub beat: bool,
}

impl AudioFeatures {
    /// Silence: every band at zero and no beat.
    pub const SILENT: Self = Self {
        bands: [0; BAND_COUNT],
        bass: 0,
        mids: 0,
        highs: 0,
        volume: 0,
        beat: false,
    };

    /// Derive the bass/mid/high/volume averages from the band energies.
    pub fn from_bands(bands: [u8; BAND_COUNT], beat: bool) -> Self {
        let (low, rest) = bands.split_at(LOW_BANDS);
        let (mid, high) = rest.split_at(MID_BANDS);
        Self {
            bands,
            bass: average(low),
            mids: average(mid),
            highs: average(high),
            volume: average(&bands),
            beat,
        }
    }

    /// Energy of band `i`, zero past the last band.
    pub fn band(&self, i: usize) -> u8 {
        self.bands.get(i).copied().unwrap_or(0)
    }
}

impl Default for AudioFeatures {
    fn default() -> Self {
        Self::SILENT
    }
}

fn average(bands: &[u8]) -> u8 {
    if bands.is_empty() {
        return 0;
    }
    let sum: u32 = bands.iter().map(|&b| u32::from(b)).sum();
    (sum / bands.len() as u32) as u8
}
