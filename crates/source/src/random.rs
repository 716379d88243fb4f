use pulse_core::{PulseError, Result, ValueSource};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Largest supported number of decimal places.
const MAX_PRECISION: u32 = 12;

/// Uniform random values in `[min, max]`, rounded to `precision` decimals.
///
/// Simulates a live sensor; the defaults mirror a city temperature feed
/// (67–76 °C, one decimal place).
#[derive(Debug)]
pub struct RandomSource {
    min:       f64,
    max:       f64,
    precision: u32,
    rng:       StdRng,
}

impl RandomSource {
    pub fn new(min: f64, max: f64, precision: u32) -> Result<Self> {
        Self::with_rng(min, max, precision, StdRng::from_entropy())
    }

    /// Deterministic variant for reproducible runs.
    pub fn seeded(min: f64, max: f64, precision: u32, seed: u64) -> Result<Self> {
        Self::with_rng(min, max, precision, StdRng::seed_from_u64(seed))
    }

    fn with_rng(min: f64, max: f64, precision: u32, rng: StdRng) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(PulseError::Config(format!(
                "random source bounds must be finite (min={min}, max={max})"
            )));
        }
        if min > max {
            return Err(PulseError::Config(format!(
                "random source min ({min}) exceeds max ({max})"
            )));
        }
        // The sampler scales by the width, so leave headroom below f64::MAX.
        let width = max - min;
        if !width.is_finite() || width > f64::MAX / 2.0 {
            return Err(PulseError::Config(format!(
                "random source range [{min}, {max}] is too wide to sample"
            )));
        }
        if precision > MAX_PRECISION {
            return Err(PulseError::Config(format!(
                "random source precision {precision} exceeds {MAX_PRECISION}"
            )));
        }
        Ok(Self { min, max, precision, rng })
    }
}

impl ValueSource for RandomSource {
    fn name(&self) -> &str {
        "random"
    }

    fn next_value(&mut self) -> Result<f64> {
        let raw = self.rng.gen_range(self.min..=self.max);
        Ok(round_to(raw, self.precision).clamp(self.min, self.max))
    }
}

/// Round `value` to `places` decimal places.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
