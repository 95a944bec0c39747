use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use meadow_common::TimeUniform;

/// Source of wall-clock samples, in seconds on an arbitrary timeline.
pub trait TimeSource {
    fn now(&mut self) -> f64;
}

/// Monotonic wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemTimeSource {
    origin: Instant,
}

impl SystemTimeSource {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemTimeSource {
    fn now(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Scripted clock. Clones share the same timeline, so a caller can keep one
/// copy and advance time while the clock owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualTimeSource {
    now: Rc<Cell<f64>>,
}

impl ManualTimeSource {
    pub fn new(start: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, seconds: f64) {
        self.now.set(seconds);
    }

    pub fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&mut self) -> f64 {
        self.now.get()
    }
}

/// Host-writable region that a GPU-side consumer reads the time uniform from.
///
/// Writes are plain stores into memory the consumer can already see. No
/// fence or barrier is issued around them.
pub trait TimeMirror {
    /// What the consumer binds to read the region.
    type Handle: ?Sized;

    /// Copy `time` byte-for-byte into the region.
    fn write(&mut self, time: &TimeUniform);

    /// Stable reference to the region; never reallocated while the mirror lives.
    fn handle(&self) -> &Self::Handle;
}

/// Simulation clock mirrored into GPU-visible memory.
///
/// Mutated once per frame by the owning thread. The mirror is written at
/// construction and after every [`update`](Self::update).
pub struct ClockState<M: TimeMirror> {
    time: TimeUniform,
    last_sample: f64,
    source: Box<dyn TimeSource>,
    mirror: M,
}

impl<M: TimeMirror> ClockState<M> {
    /// Clock driven by the system wall clock.
    pub fn new(mirror: M) -> Self {
        Self::with_source(mirror, Box::new(SystemTimeSource::new()))
    }

    /// Clock driven by `source`. The first sample becomes the start time.
    pub fn with_source(mut mirror: M, mut source: Box<dyn TimeSource>) -> Self {
        let time = TimeUniform::default();
        mirror.write(&time);
        let last_sample = source.now();
        Self {
            time,
            last_sample,
            source,
            mirror,
        }
    }

    /// Sample the clock, advance delta and total time, and refresh the mirror.
    ///
    /// A sample earlier than the previous one yields a zero delta and becomes
    /// the new baseline, so total time never decreases. A non-finite sample
    /// also yields a zero delta but is never adopted as the baseline.
    pub fn update(&mut self) {
        let now = self.source.now();
        let delta = if !now.is_finite() {
            tracing::warn!(now, "clock sample is not finite; keeping previous baseline");
            0.0
        } else {
            let delta = now - self.last_sample;
            let previous = std::mem::replace(&mut self.last_sample, now);
            if !previous.is_finite() {
                tracing::warn!(previous, now, "no finite baseline; restarting from this sample");
                0.0
            } else if delta < 0.0 {
                tracing::warn!(previous, now, "clock went backwards; clamping delta to zero");
                0.0
            } else {
                delta
            }
        };

        self.time.delta_time = delta as f32;
        self.time.total_time += self.time.delta_time;
        self.mirror.write(&self.time);

        tracing::trace!(
            delta = self.time.delta_time,
            total = self.time.total_time,
            "clock updated"
        );
    }

    /// Current time values.
    pub fn time(&self) -> TimeUniform {
        self.time
    }

    pub fn buffer_handle(&self) -> &M::Handle {
        self.mirror.handle()
    }

    pub fn mirror(&self) -> &M {
        &self.mirror
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostMirror;

    fn manual_clock(start: f64) -> (ClockState<HostMirror>, ManualTimeSource) {
        let source = ManualTimeSource::new(start);
        let clock = ClockState::with_source(HostMirror::new(), Box::new(source.clone()));
        (clock, source)
    }

    #[test]
    fn starts_at_zero_and_mirrors_it() {
        let (clock, _) = manual_clock(12.0);
        assert_eq!(clock.time(), TimeUniform::default());
        assert_eq!(clock.buffer_handle(), &[0u8; 8]);
    }

    #[test]
    fn total_is_sum_of_deltas() {
        let (mut clock, source) = manual_clock(100.0);
        let samples = [100.016, 100.05, 100.051, 100.2, 101.0, 103.5];
        for t in samples {
            source.set(t);
            clock.update();
        }
        let expected = (samples[samples.len() - 1] - 100.0) as f32;
        assert!((clock.time().total_time - expected).abs() < 1e-4);
        assert!((clock.time().delta_time - 2.5).abs() < 1e-4);
    }

    #[test]
    fn many_frames_accumulate() {
        let (mut clock, source) = manual_clock(0.0);
        for _ in 0..600 {
            source.advance(1.0 / 60.0);
            clock.update();
        }
        assert!((clock.time().total_time - 10.0).abs() < 1e-3);
    }

    #[test]
    fn mirror_holds_latest_bytes() {
        let (mut clock, source) = manual_clock(0.0);
        source.advance(0.5);
        clock.update();
        source.advance(0.25);
        clock.update();

        let mirrored: TimeUniform = bytemuck::pod_read_unaligned(clock.buffer_handle());
        assert_eq!(mirrored, clock.time());
        assert_eq!(mirrored.delta_time, 0.25);
        assert_eq!(mirrored.total_time, 0.75);
        assert_eq!(clock.mirror().writes(), 3);
    }

    #[test]
    fn backwards_clock_clamps_to_zero() {
        let (mut clock, source) = manual_clock(10.0);
        source.set(11.0);
        clock.update();
        source.set(10.5);
        clock.update();
        assert_eq!(clock.time().delta_time, 0.0);
        assert_eq!(clock.time().total_time, 1.0);

        // The rewound sample is the new baseline.
        source.set(10.75);
        clock.update();
        assert_eq!(clock.time().delta_time, 0.25);
        assert_eq!(clock.time().total_time, 1.25);
    }

    #[test]
    fn non_finite_sample_is_skipped() {
        let (mut clock, source) = manual_clock(1.0);
        source.set(1.5);
        clock.update();
        source.set(f64::NAN);
        clock.update();
        assert_eq!(clock.time().delta_time, 0.0);
        assert_eq!(clock.time().total_time, 0.5);

        // The next finite sample measures from the last finite one.
        source.set(2.0);
        clock.update();
        assert_eq!(clock.time().delta_time, 0.5);
        assert_eq!(clock.time().total_time, 1.0);
    }

    #[test]
    fn non_finite_start_rebaselines_on_first_finite_sample() {
        let (mut clock, source) = manual_clock(f64::INFINITY);
        source.set(3.0);
        clock.update();
        assert_eq!(clock.time(), TimeUniform::default());
        source.set(3.25);
        clock.update();
        assert_eq!(clock.time().delta_time, 0.25);
    }

    #[test]
    fn stalled_clock_gives_zero_delta() {
        let (mut clock, _source) = manual_clock(5.0);
        clock.update();
        clock.update();
        assert_eq!(clock.time(), TimeUniform::default());
    }

    #[test]
    fn system_clock_is_monotonic() {
        let mut clock = ClockState::new(HostMirror::new());
        let mut previous = 0.0;
        for _ in 0..100 {
            clock.update();
            let t = clock.time();
            assert!(t.delta_time >= 0.0);
            assert!(t.total_time >= previous);
            previous = t.total_time;
        }
    }
}
