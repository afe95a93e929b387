//! Audio notification sink
//!
//! The simulation emits `GameEvent` tags; a sink turns them into sound.
//! `AudioManager` renders each tag as a short synthesized tone clip for the
//! host to drain and play.

use std::collections::VecDeque;

use crate::clamp_finite;
use crate::sim::GameEvent;

/// Receiver of fire-and-forget notifications.
///
/// Errors are reported back only so the caller can log them; the simulation
/// never waits on or retries a notification.
pub trait AudioSink {
    fn play(&mut self, event: GameEvent) -> anyhow::Result<()>;
}

/// Records events in order (useful for replays and tests)
impl AudioSink for Vec<GameEvent> {
    fn play(&mut self, event: GameEvent) -> anyhow::Result<()> {
        self.push(event);
        Ok(())
    }
}

/// A decaying sine beep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Hz
    pub frequency: f32,
    /// Seconds
    pub duration: f32,
    /// 0.0 - 1.0
    pub volume: f32,
}

impl Tone {
    /// Tone for a notification
    pub fn for_event(event: GameEvent) -> Self {
        let (frequency, duration, volume) = match event {
            GameEvent::Impulse => (330.0, 0.08, 0.4),
            GameEvent::Score => (523.0, 0.15, 0.5),
            GameEvent::Death => (165.0, 0.4, 0.5),
            GameEvent::LevelUp => (659.0, 0.25, 0.6),
        };
        Self {
            frequency,
            duration,
            volume,
        }
    }

    /// Synthesize mono samples in [-1, 1]: 10 ms fade-in, exponential decay
    pub fn render(&self, sample_rate: u32, gain: f32) -> Vec<f32> {
        const FADE_IN: f32 = 0.01;
        let count = (sample_rate as f32 * self.duration) as usize;
        (0..count)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                let decay = (-5.0 * t / self.duration).exp();
                let fade_in = (t / FADE_IN).min(1.0);
                (std::f32::consts::TAU * self.frequency * t).sin()
                    * decay
                    * fade_in
                    * self.volume
                    * gain
            })
            .collect()
    }
}

/// Maximum buffered clips before the oldest is dropped
pub const MAX_QUEUED_CLIPS: usize = 16;

/// Synthesizing sink; the host audio device drains rendered clips
pub struct AudioManager {
    sample_rate: u32,
    volume: f32,
    muted: bool,
    queue: VecDeque<Vec<f32>>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(44_100)
    }
}

impl AudioManager {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            volume: 0.8,
            muted: false,
            queue: VecDeque::with_capacity(MAX_QUEUED_CLIPS),
        }
    }

    /// Output gain in [0, 1]; NaN silences
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = clamp_finite(vol, 0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Gain applied to rendered clips
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }

    /// Take every clip rendered since the last call
    pub fn drain(&mut self) -> Vec<Vec<f32>> {
        self.queue.drain(..).collect()
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, event: GameEvent) -> anyhow::Result<()> {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return Ok(());
        }
        if self.sample_rate == 0 {
            anyhow::bail!("audio device has no sample rate");
        }

        let tone = Tone::for_event(event);
        log::debug!("♪ {:?} {} Hz", event, tone.frequency);
        if self.queue.len() == MAX_QUEUED_CLIPS {
            self.queue.pop_front();
        }
        self.queue.push_back(tone.render(self.sample_rate, vol));
        Ok(())
    }
}
