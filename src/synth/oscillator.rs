use std::f32::consts::TAU;

/// A free-running sine oscillator.
///
/// Phase is kept in radians in `[0, 2π)` and only ever advances; changing
/// the frequency changes the increment, never the current position.
#[derive(Clone, Debug, Default)]
pub struct Oscillator {
    phase: f32,
    frequency: f32,
    sample_rate: Option<f32>,
}

impl Oscillator {
    pub fn new(frequency: f32) -> Self {
        Self {
            frequency,
            ..Self::default()
        }
    }

    /// Sets the rate used for the phase increment. `rate` must be positive.
    pub fn set_sample_rate(&mut self, rate: f32) {
        assert!(rate > 0.0, "sample rate must be positive, got {}", rate);
        self.sample_rate = Some(rate);
    }

    /// Takes effect on the next `tick`. No range check: zero gives a constant,
    /// negative frequencies run the phase backwards.
    pub fn set_frequency(&mut self, frequency: f32) {
        self.frequency = frequency;
    }

    /// Advances one sample and returns `sin(phase)`.
    ///
    /// Returns silence without moving the phase until a sample rate is set.
    pub fn tick(&mut self) -> f32 {
        let Some(sample_rate) = self.sample_rate else {
            return 0.0;
        };
        let phase_increment = TAU * self.frequency / sample_rate;
        // rem_euclid can round up to exactly TAU for tiny negative inputs
        let phase = (self.phase + phase_increment).rem_euclid(TAU);
        self.phase = if phase >= TAU { 0.0 } else { phase };
        self.phase.sin()
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn sample_rate(&self) -> Option<f32> {
        self.sample_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn configured(sample_rate: f32, frequency: f32) -> Oscillator {
        let mut osc = Oscillator::new(frequency);
        osc.set_sample_rate(sample_rate);
        osc
    }

    #[test]
    fn silent_until_sample_rate_is_set() {
        let mut osc = Oscillator::new(440.0);
        for _ in 0..64 {
            assert_eq!(osc.tick(), 0.0);
        }
        assert_eq!(osc.phase(), 0.0);
    }

    #[test]
    fn one_period_matches_sine() {
        // 1 kHz at 48 kHz is exactly 48 samples per period
        let mut osc = configured(48_000.0, 1_000.0);
        let period: Vec<f32> = (0..48).map(|_| osc.tick()).collect();

        let peak = period.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
        assert!((peak - 1.0).abs() < 1e-4, "peak was {}", peak);

        // sample n (1-based) is sin(2π·n/48): zero at n = 24 and n = 48
        assert!(period[23].abs() < 1e-4, "half-period sample {}", period[23]);
        assert!(period[47].abs() < 1e-4, "full-period sample {}", period[47]);
        assert!((period[11] - 1.0).abs() < 1e-4);
        assert!((period[35] + 1.0).abs() < 1e-4);

        for (i, sample) in period.iter().enumerate() {
            let expected = (TAU * (i + 1) as f32 / 48.0).sin();
            assert!((sample - expected).abs() < 1e-4, "sample {} off", i);
        }
    }

    #[test]
    fn frequency_change_preserves_phase() {
        let mut osc = configured(44_100.0, 261.63);
        for _ in 0..1000 {
            osc.tick();
        }
        let before = osc.phase();
        osc.set_frequency(392.0);
        assert_eq!(osc.phase(), before);

        // next sample continues from the same position with the new increment
        let expected = (before + TAU * 392.0 / 44_100.0).rem_euclid(TAU).sin();
        assert!((osc.tick() - expected).abs() < 1e-6);
    }

    #[test]
    fn setting_same_frequency_twice_is_idempotent() {
        let mut once = configured(44_100.0, 1000.0);
        let mut twice = configured(44_100.0, 1000.0);
        once.set_frequency(329.63);
        twice.set_frequency(329.63);
        twice.set_frequency(329.63);
        for _ in 0..512 {
            assert_eq!(once.tick(), twice.tick());
        }
    }

    #[test]
    fn negative_frequency_stays_in_range() {
        let mut osc = configured(48_000.0, -440.0);
        for _ in 0..10_000 {
            let sample = osc.tick();
            assert!(sample.is_finite());
            assert!((0.0..TAU).contains(&osc.phase()));
        }
    }

    #[test]
    #[should_panic(expected = "sample rate must be positive")]
    fn zero_sample_rate_is_rejected() {
        Oscillator::new(440.0).set_sample_rate(0.0);
    }

    proptest! {
        #[test]
        fn phase_stays_wrapped_and_output_bounded(
            sample_rate in 8_000.0f32..192_000.0,
            frequency in 20.0f32..20_000.0,
            steps in 1usize..4096,
        ) {
            let mut osc = configured(sample_rate, frequency);
            for _ in 0..steps {
                let sample = osc.tick();
                prop_assert!(sample.is_finite());
                prop_assert!((-1.0..=1.0).contains(&sample));
                prop_assert!((0.0..TAU).contains(&osc.phase()));
            }
        }
    }
}
