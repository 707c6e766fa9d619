//! Feature sources: where the per-tick loudness sample comes from.
//!
//! The core never touches raw audio. It polls a [`FeatureSource`] once per
//! tick and receives either a frame or `None` ("no new reading"), in which
//! case every state machine holds still. Easy Mode is a decorator at this
//! boundary ([`Amplified`]) rather than a second growth implementation.

use std::collections::VecDeque;

/// One tick's worth of extracted audio features.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioFrame {
    /// Loudness in [0, 1].
    pub volume: f32,
    /// Average spectrum magnitude in [0, 1]. Only forwarded to rendering.
    pub frequency_average: f32,
}

impl AudioFrame {
    /// Build a frame from host readings. Non-finite volume means the reading
    /// is unusable and is treated as missing.
    pub fn new(volume: f32, frequency_average: f32) -> Option<Self> {
        if !volume.is_finite() {
            return None;
        }
        let frequency_average = if frequency_average.is_finite() {
            frequency_average.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Some(Self {
            volume: volume.clamp(0.0, 1.0),
            frequency_average,
        })
    }

    /// Frame carrying only a volume reading.
    pub fn volume(volume: f32) -> Option<Self> {
        Self::new(volume, 0.0)
    }

    /// Volume multiplied by `gain`, saturating at 1.
    pub fn amplified(self, gain: f32) -> Self {
        Self {
            volume: amplify_volume(self.volume, gain),
            ..self
        }
    }
}

/// Multiply a volume by `gain`, clamped to [0, 1].
pub fn amplify_volume(volume: f32, gain: f32) -> f32 {
    (volume * gain).clamp(0.0, 1.0)
}

/// Anything that yields at most one feature frame per tick.
pub trait FeatureSource {
    /// Next tick's frame, or `None` when no new reading is available.
    fn poll(&mut self) -> Option<AudioFrame>;
}

impl<S: FeatureSource + ?Sized> FeatureSource for &mut S {
    fn poll(&mut self) -> Option<AudioFrame> {
        (**self).poll()
    }
}

/// Single-slot source fed by the host once per frame.
/// A frame is handed out once; polling again yields `None` until refilled.
#[derive(Debug, Default, Clone)]
pub struct FrameSlot {
    pending: Option<AudioFrame>,
}

impl FrameSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pending frame (`None` clears it).
    pub fn offer(&mut self, frame: Option<AudioFrame>) {
        self.pending = frame;
    }
}

impl FeatureSource for FrameSlot {
    fn poll(&mut self) -> Option<AudioFrame> {
        self.pending.take()
    }
}

/// Wraps a source and amplifies its volume (Easy Mode).
pub struct Amplified<S> {
    inner: S,
    gain: f32,
}

impl<S: FeatureSource> Amplified<S> {
    pub fn new(inner: S, gain: f32) -> Self {
        Self { inner, gain }
    }
}

impl<S: FeatureSource> FeatureSource for Amplified<S> {
    fn poll(&mut self) -> Option<AudioFrame> {
        self.inner.poll().map(|frame| frame.amplified(self.gain))
    }
}

/// Replays a recorded tick sequence. `None` entries are ticks without a
/// reading; once exhausted the source only yields `None`.
#[derive(Debug, Clone, Default)]
pub struct ReplaySource {
    frames: VecDeque<Option<AudioFrame>>,
}

impl ReplaySource {
    pub fn new(frames: impl IntoIterator<Item = Option<AudioFrame>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// One frame per volume value, every tick carrying a reading.
    pub fn from_volumes(volumes: impl IntoIterator<Item = f32>) -> Self {
        Self::new(volumes.into_iter().map(AudioFrame::volume))
    }

    /// Constant volume for `ticks` ticks.
    pub fn constant(volume: f32, ticks: usize) -> Self {
        Self::from_volumes(std::iter::repeat(volume).take(ticks))
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FeatureSource for ReplaySource {
    fn poll(&mut self) -> Option<AudioFrame> {
        self.frames.pop_front().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_clamps_and_rejects_nan() {
        let frame = AudioFrame::new(1.4, -0.2).unwrap();
        assert_eq!(frame.volume, 1.0);
        assert_eq!(frame.frequency_average, 0.0);
        assert!(AudioFrame::new(f32::NAN, 0.5).is_none());
    }

    #[test]
    fn slot_hands_out_each_frame_once() {
        let mut slot = FrameSlot::new();
        slot.offer(AudioFrame::volume(0.2));
        assert_eq!(slot.poll().map(|f| f.volume), Some(0.2));
        assert!(slot.poll().is_none());
    }

    #[test]
    fn amplified_saturates_at_one() {
        let mut source = Amplified::new(ReplaySource::from_volumes([0.01, 0.05, 0.5]), 10.0);
        let got: Vec<f32> = (0..3).filter_map(|_| source.poll()).map(|f| f.volume).collect();
        assert!((got[0] - 0.1).abs() < 1e-6);
        assert!((got[1] - 0.5).abs() < 1e-6);
        assert_eq!(got[2], 1.0);
    }

    #[test]
    fn amplified_passes_missing_ticks_through() {
        let mut source = Amplified::new(ReplaySource::new([None, AudioFrame::volume(0.02)]), 10.0);
        assert!(source.poll().is_none());
        assert!(source.poll().is_some());
    }

    #[test]
    fn replay_exhausts_to_none() {
        let mut source = ReplaySource::constant(0.3, 2);
        assert!(source.poll().is_some());
        assert!(source.poll().is_some());
        assert_eq!(source.remaining(), 0);
        assert!(source.poll().is_none());
    }

    #[test]
    fn decorator_works_through_mut_reference() {
        let mut slot = FrameSlot::new();
        slot.offer(AudioFrame::volume(0.03));
        let mut easy = Amplified::new(&mut slot, 10.0);
        let frame = easy.poll().unwrap();
        assert!((frame.volume - 0.3).abs() < 1e-6);
    }
}
