//! ADC sampling loop
//!
//! Repeatedly reads the five-channel sample window and decodes the
//! selected channels. Exposed as an iterator of [`SampleBatch`]es that ends
//! only when the cancellation flag is observed at the top of a pass.

use core::iter::FusedIterator;
use core::sync::atomic::{AtomicBool, Ordering};

use compctl_core::adc::{decode_window, SampleBatch, SampleMode};
use compctl_core::ChannelMask;
use compctl_hal::I2cBus;
use compctl_protocol::regmap::{ADC_CHANNEL_WINDOW, ADC_WINDOW_LEN};
use embedded_hal::delay::DelayNs;
use log::warn;

use crate::bus::RegisterBus;

/// Pause between passes in milliseconds
pub const SAMPLE_INTERVAL_MS: u32 = 100;

/// Cancellable sampling loop
///
/// Each call to `next` performs, in order: the pause left over from the
/// previous pass, the cancellation check, and one window read. A failed
/// read is logged and the pass skipped; the loop keeps going until
/// cancelled. No transaction is interrupted mid-flight.
pub struct AdcSampler<'a, B, D> {
    bus: &'a mut RegisterBus<B>,
    mask: ChannelMask,
    mode: SampleMode,
    cancel: &'a AtomicBool,
    delay: D,
    iteration: u32,
    pending_pause: bool,
    finished: bool,
}

impl<'a, B: I2cBus, D: DelayNs> AdcSampler<'a, B, D> {
    /// Create a sampler over `bus`
    pub fn new(
        bus: &'a mut RegisterBus<B>,
        mask: ChannelMask,
        mode: SampleMode,
        cancel: &'a AtomicBool,
        delay: D,
    ) -> Self {
        Self {
            bus,
            mask,
            mode,
            cancel,
            delay,
            iteration: 0,
            pending_pause: false,
            finished: false,
        }
    }

    /// Number of passes attempted so far
    pub fn passes(&self) -> u32 {
        self.iteration
    }
}

impl<B: I2cBus, D: DelayNs> Iterator for AdcSampler<'_, B, D> {
    type Item = SampleBatch;

    fn next(&mut self) -> Option<SampleBatch> {
        if self.finished {
            return None;
        }

        loop {
            if self.pending_pause {
                self.delay.delay_ms(SAMPLE_INTERVAL_MS);
            }
            self.pending_pause = true;

            if self.cancel.load(Ordering::Acquire) {
                self.finished = true;
                return None;
            }

            let iteration = self.iteration;
            self.iteration = self.iteration.wrapping_add(1);

            match self.bus.read_array::<ADC_WINDOW_LEN>(ADC_CHANNEL_WINDOW) {
                Ok(window) => {
                    return Some(decode_window(&window, self.mask, self.mode, iteration));
                }
                Err(e) => {
                    warn!("ADC pass {} failed: {}", iteration, e);
                }
            }
        }
    }
}

impl<B: I2cBus, D: DelayNs> FusedIterator for AdcSampler<'_, B, D> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{RecordingDelay, SimBus, Transaction};
    use std::sync::Arc;

    /// Store channel samples into the simulated window (channel 4 first)
    fn load_window(sim: &mut SimBus, samples: [u16; 5]) {
        let base = ADC_CHANNEL_WINDOW.get() as usize;
        for (ch, s) in samples.iter().enumerate() {
            let at = base + (4 - ch) * 2;
            sim.memory[at..at + 2].copy_from_slice(&s.to_le_bytes());
        }
    }

    #[test]
    fn test_reads_window_and_scales() {
        let mut sim = SimBus::new();
        load_window(&mut sim, [1023, 0, 0, 0, 0]);
        let mut bus = RegisterBus::new(sim);
        let cancel = AtomicBool::new(false);
        let mut delay = RecordingDelay::default();

        let mask = ChannelMask::parse("0-2,4").unwrap();
        let batch = bus
            .sampler(mask, SampleMode::Millivolts, &cancel, &mut delay)
            .next()
            .unwrap();

        let values: Vec<(u8, u32)> = batch.readings.iter().map(|r| (r.channel, r.value)).collect();
        assert_eq!(values, [(0, 5000), (1, 0), (2, 0), (4, 0)]);
        assert_eq!(
            bus.inner().log[0],
            Transaction::WriteRead {
                address: 0x54,
                pointer: vec![0x05, 0x0E],
                len: 10,
                acked: true,
            }
        );
        // No pause before the first pass
        assert!(delay.calls.is_empty());
    }

    #[test]
    fn test_pause_between_passes() {
        let mut bus = RegisterBus::new(SimBus::new());
        let cancel = AtomicBool::new(false);
        let mut delay = RecordingDelay::default();

        let batches: Vec<_> = bus
            .sampler(ChannelMask::ALL, SampleMode::Raw, &cancel, &mut delay)
            .take(3)
            .collect();

        assert_eq!(batches.len(), 3);
        assert_eq!(batches[2].iteration, 2);
        assert_eq!(delay.calls, [SAMPLE_INTERVAL_MS, SAMPLE_INTERVAL_MS]);
    }

    #[test]
    fn test_cancel_stops_at_next_boundary() {
        let mut bus = RegisterBus::new(SimBus::new());
        let cancel = AtomicBool::new(false);
        let mut delay = RecordingDelay::default();

        {
            let mut sampler = bus.sampler(ChannelMask::ALL, SampleMode::Raw, &cancel, &mut delay);
            assert!(sampler.next().is_some());

            cancel.store(true, Ordering::Release);
            assert!(sampler.next().is_none());
            assert!(sampler.next().is_none());
        }

        // One read, one pause, nothing after the flag was seen
        assert_eq!(bus.inner().log.len(), 1);
        assert_eq!(delay.calls.len(), 1);
    }

    #[test]
    fn test_cancel_during_pause_prevents_read() {
        let mut bus = RegisterBus::new(SimBus::new());
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = cancel.clone();
        let mut delay = RecordingDelay {
            on_delay: Some(Box::new(move |n| {
                if n == 2 {
                    flag.store(true, Ordering::Release);
                }
            })),
            ..Default::default()
        };

        let count = bus
            .sampler(ChannelMask::ALL, SampleMode::Raw, &cancel, &mut delay)
            .count();

        assert_eq!(count, 2);
        assert_eq!(bus.inner().log.len(), 2);
    }

    #[test]
    fn test_cancelled_before_start() {
        let mut bus = RegisterBus::new(SimBus::new());
        let cancel = AtomicBool::new(true);
        let mut delay = RecordingDelay::default();

        assert!(bus
            .sampler(ChannelMask::ALL, SampleMode::Raw, &cancel, &mut delay)
            .next()
            .is_none());
        assert!(bus.inner().log.is_empty());
    }

    #[test]
    fn test_failed_pass_is_skipped() {
        let mut sim = SimBus::new();
        load_window(&mut sim, [0, 0, 0, 300, 0]);
        sim.fail_next(1);
        let mut bus = RegisterBus::new(sim);
        let cancel = AtomicBool::new(false);
        let mut delay = RecordingDelay::default();

        let mut sampler =
            bus.sampler(ChannelMask::parse("3").unwrap(), SampleMode::Raw, &cancel, &mut delay);
        let batch = sampler.next().unwrap();
        assert_eq!(sampler.passes(), 2);

        // The failed pass consumed iteration 0 and one pause
        assert_eq!(batch.iteration, 1);
        assert_eq!(batch.readings[0].value, 300);
        assert_eq!(delay.calls.len(), 1);
        assert_eq!(bus.inner().log.len(), 2);
    }

    #[test]
    fn test_repeated_values_not_filtered() {
        let mut sim = SimBus::new();
        load_window(&mut sim, [42, 0, 0, 0, 0]);
        let mut bus = RegisterBus::new(sim);
        let cancel = AtomicBool::new(false);
        let mut delay = RecordingDelay::default();

        let raws: Vec<u16> = bus
            .sampler(ChannelMask::parse("0").unwrap(), SampleMode::Raw, &cancel, &mut delay)
            .take(2)
            .map(|b| b.readings[0].raw)
            .collect();
        assert_eq!(raws, [42, 42]);
    }
}
