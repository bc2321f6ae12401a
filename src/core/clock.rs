use std::{
    cell::Cell,
    rc::Rc,
    time::{Duration, Instant},
};

use crate::config;

/// Shared stop flag for a [`FixedRateTimer`]. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    cancelled: Rc<Cell<bool>>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Repeating schedule polled from a single-threaded loop. Fires at most once
/// per poll; a late poll reschedules from `now` instead of bursting.
#[derive(Debug)]
pub struct FixedRateTimer {
    interval: Duration,
    next_due: Instant,
    cancel: CancelHandle,
}

const MIN_INTERVAL: Duration = Duration::from_micros(1);
const MAX_INTERVAL: Duration = Duration::from_secs(3600);

impl FixedRateTimer {
    pub fn new(interval: Duration, now: Instant) -> Self {
        let interval = interval.clamp(MIN_INTERVAL, MAX_INTERVAL);
        Self {
            interval,
            next_due: now + interval,
            cancel: CancelHandle::default(),
        }
    }

    /// Rates outside `MIN_TICK_HZ..=MAX_TICK_HZ` (NaN included) fall back to
    /// the legacy 60 Hz.
    pub fn from_hz(hz: f32, now: Instant) -> Self {
        let hz = if (config::MIN_TICK_HZ..=config::MAX_TICK_HZ).contains(&hz) {
            hz
        } else {
            config::LEGACY_TICK_HZ
        };
        let interval = Duration::try_from_secs_f32(1.0 / hz).unwrap_or(MAX_INTERVAL);
        Self::new(interval, now)
    }

    #[cfg(test)]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        if self.is_cancelled() || now < self.next_due {
            return false;
        }
        self.next_due += self.interval;
        if self.next_due <= now {
            self.next_due = now + self.interval;
        }
        true
    }

    pub fn time_until_next(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }
}

/// Frames counted between once-per-second samples.
#[derive(Debug)]
pub struct FpsCounter {
    frames: u32,
    last_sample: Instant,
    fps: f32,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        Self {
            frames: 0,
            last_sample: now,
            fps: 0.0,
        }
    }

    pub fn record_frame(&mut self) {
        self.frames = self.frames.saturating_add(1);
    }

    /// Updates the rate once a full sampling window has elapsed.
    pub fn sample(&mut self, now: Instant) -> Option<f32> {
        let elapsed = now.saturating_duration_since(self.last_sample);
        if elapsed.as_secs_f32() < config::FPS_SAMPLE_SECS {
            return None;
        }
        self.fps = self.frames as f32 / elapsed.as_secs_f32();
        self.frames = 0;
        self.last_sample = now;
        Some(self.fps)
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[cfg(test)]
    pub fn frames(&self) -> u32 {
        self.frames
    }
}
