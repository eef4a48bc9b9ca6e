//! Lock-free parameter hand-off between the control thread and the audio thread.
//!
//! Every parameter is an `f32` bit-cast into an `AtomicU32`. Writes happen
//! inside a sequence-counted section (a seqlock): the counter is odd while a
//! write is in progress and even otherwise. The audio thread copies all
//! values once per block and keeps the copy only if the counter was even and
//! unchanged across the read, so multi-value updates such as a chord change
//! are seen all-or-nothing. Neither side ever blocks.

use super::config::NUM_VOICES;
use std::sync::atomic::{fence, AtomicBool, AtomicU32, Ordering};

/// A consistent copy of every shared parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamSnapshot {
    pub frequencies: [f32; NUM_VOICES],
    pub gains: [f32; NUM_VOICES],
    pub enabled: bool,
    /// Requested sample rate, `0.0` until `configure` is called.
    pub sample_rate: f32,
}

#[derive(Debug)]
pub struct SharedParams {
    sequence: AtomicU32,
    frequencies: [AtomicU32; NUM_VOICES],
    gains: [AtomicU32; NUM_VOICES],
    enabled: AtomicBool,
    sample_rate: AtomicU32,
}

impl SharedParams {
    pub fn new(frequency: f32, gain: f32) -> Self {
        Self {
            sequence: AtomicU32::new(0),
            frequencies: std::array::from_fn(|_| AtomicU32::new(frequency.to_bits())),
            gains: std::array::from_fn(|_| AtomicU32::new(gain.to_bits())),
            enabled: AtomicBool::new(false),
            sample_rate: AtomicU32::new(0.0f32.to_bits()),
        }
    }

    /// Runs `update` inside one write section.
    ///
    /// Only one thread may write at a time; `SynthControl` guarantees this by
    /// owning the write side and taking `&mut self`.
    pub(crate) fn write<F>(&self, update: F)
    where
        F: FnOnce(&ParamWriter<'_>),
    {
        let sequence = self.sequence.load(Ordering::Relaxed);
        self.sequence
            .store(sequence.wrapping_add(1), Ordering::Relaxed);
        fence(Ordering::Release);

        update(&ParamWriter { params: self });

        self.sequence
            .store(sequence.wrapping_add(2), Ordering::Release);
    }

    /// Current write generation. Changes after every completed write.
    pub fn version(&self) -> u32 {
        self.sequence.load(Ordering::Acquire)
    }

    /// Copies all parameters, or returns `None` if a write overlapped the read.
    ///
    /// Never waits: a caller that gets `None` keeps its previous snapshot and
    /// tries again on the next block.
    pub fn try_snapshot(&self) -> Option<(u32, ParamSnapshot)> {
        let before = self.sequence.load(Ordering::Acquire);
        if before & 1 == 1 {
            return None;
        }

        let snapshot = ParamSnapshot {
            frequencies: std::array::from_fn(|i| load_f32(&self.frequencies[i])),
            gains: std::array::from_fn(|i| load_f32(&self.gains[i])),
            enabled: self.enabled.load(Ordering::Relaxed),
            sample_rate: load_f32(&self.sample_rate),
        };

        fence(Ordering::Acquire);
        let after = self.sequence.load(Ordering::Relaxed);
        (before == after).then_some((before, snapshot))
    }
}

/// Write access handed out for the duration of one write section.
pub(crate) struct ParamWriter<'a> {
    params: &'a SharedParams,
}

impl ParamWriter<'_> {
    pub fn set_frequency(&self, index: usize, frequency: f32) {
        store_f32(&self.params.frequencies[index], frequency);
    }

    pub fn set_gain(&self, index: usize, gain: f32) {
        store_f32(&self.params.gains[index], gain);
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.params.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn set_sample_rate(&self, sample_rate: f32) {
        store_f32(&self.params.sample_rate, sample_rate);
    }
}

#[inline]
fn load_f32(cell: &AtomicU32) -> f32 {
    f32::from_bits(cell.load(Ordering::Relaxed))
}

#[inline]
fn store_f32(cell: &AtomicU32, value: f32) {
    cell.store(value.to_bits(), Ordering::Relaxed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::chord::CHORDS;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    #[test]
    fn snapshot_reflects_completed_writes() {
        let params = SharedParams::new(1000.0, 0.5);
        let (_, initial) = params.try_snapshot().unwrap();
        assert_eq!(initial.frequencies, [1000.0; NUM_VOICES]);
        assert_eq!(initial.gains, [0.5; NUM_VOICES]);
        assert!(!initial.enabled);
        assert_eq!(initial.sample_rate, 0.0);

        params.write(|w| {
            w.set_frequency(1, 440.0);
            w.set_gain(2, 0.25);
            w.set_enabled(true);
            w.set_sample_rate(48_000.0);
        });

        let (_, snapshot) = params.try_snapshot().unwrap();
        assert_eq!(snapshot.frequencies, [1000.0, 440.0, 1000.0]);
        assert_eq!(snapshot.gains, [0.5, 0.5, 0.25]);
        assert!(snapshot.enabled);
        assert_eq!(snapshot.sample_rate, 48_000.0);
    }

    #[test]
    fn version_advances_per_write() {
        let params = SharedParams::new(1000.0, 0.5);
        let v0 = params.version();
        params.write(|w| w.set_gain(0, 0.1));
        let v1 = params.version();
        assert_ne!(v0, v1);
        assert_eq!(v1 & 1, 0);
        assert_eq!(params.try_snapshot().unwrap().0, v1);
    }

    #[test]
    fn concurrent_chord_changes_are_never_torn() {
        let params = Arc::new(SharedParams::new(CHORDS[0].frequencies[0], 1.0));
        params.write(|w| {
            for (i, f) in CHORDS[0].frequencies.iter().enumerate() {
                w.set_frequency(i, *f);
            }
        });
        let done = Arc::new(AtomicBool::new(false));

        let writer = {
            let params = Arc::clone(&params);
            let done = Arc::clone(&done);
            std::thread::spawn(move || {
                for round in 0..20_000 {
                    let chord = &CHORDS[round % CHORDS.len()];
                    params.write(|w| {
                        for (i, f) in chord.frequencies.iter().enumerate() {
                            w.set_frequency(i, *f);
                        }
                    });
                }
                done.store(true, Ordering::SeqCst);
            })
        };

        while !done.load(Ordering::SeqCst) {
            if let Some((_, snapshot)) = params.try_snapshot() {
                assert!(
                    CHORDS.iter().any(|c| c.frequencies == snapshot.frequencies),
                    "torn chord observed: {:?}",
                    snapshot.frequencies
                );
            }
        }
        writer.join().unwrap();
        assert!(params.try_snapshot().is_some());
    }
}
