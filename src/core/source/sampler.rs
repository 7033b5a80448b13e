use crate::core::error::AnalysisError;
use crate::core::vision::Frame;
use log::{debug, warn};
use std::collections::VecDeque;
use std::iter::FusedIterator;

/// Sequential frame decoder. `Ok(None)` means the stream ended normally.
pub trait FrameDecoder {
    fn next_frame(&mut self) -> Result<Option<Frame>, AnalysisError>;
}

impl<D: FrameDecoder + ?Sized> FrameDecoder for Box<D> {
    fn next_frame(&mut self) -> Result<Option<Frame>, AnalysisError> {
        (**self).next_frame()
    }
}

/// Why a sampled stream stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEnd {
    Exhausted,
    /// The decoder failed mid-stream. Callers only see a shorter sequence;
    /// this is the one place the difference is kept.
    DecodeFailed(String),
}

/// Lazy `(index, frame)` sequence keeping every `stride`-th decoded frame.
///
/// Indices are positions in the source stream (0, stride, 2 * stride, ...).
/// The sequence ends at end-of-stream or at the first decode failure,
/// whichever comes first, and cannot be restarted.
pub struct SampledFrames<D> {
    decoder: D,
    stride: u64,
    position: u64,
    end: Option<StreamEnd>,
}

impl<D: FrameDecoder> SampledFrames<D> {
    pub fn new(decoder: D, stride: u64) -> Self {
        Self {
            decoder,
            stride: stride.max(1),
            position: 0,
            end: None,
        }
    }

    pub fn stride(&self) -> u64 {
        self.stride
    }

    /// Number of frames pulled from the decoder so far, sampled or not.
    pub fn frames_decoded(&self) -> u64 {
        self.position
    }

    /// `None` while the stream is still running.
    pub fn end_reason(&self) -> Option<&StreamEnd> {
        self.end.as_ref()
    }
}

impl<D: FrameDecoder> Iterator for SampledFrames<D> {
    type Item = (u64, Frame);

    fn next(&mut self) -> Option<Self::Item> {
        if self.end.is_some() {
            return None;
        }

        loop {
            match self.decoder.next_frame() {
                Ok(Some(frame)) => {
                    let index = self.position;
                    self.position += 1;
                    if index % self.stride == 0 {
                        return Some((index, frame.with_frame_number(index)));
                    }
                }
                Ok(None) => {
                    debug!("🎬 Stream exhausted after {} frames", self.position);
                    self.end = Some(StreamEnd::Exhausted);
                    return None;
                }
                Err(e) => {
                    warn!(
                        "⚠️ Decode failed at frame {}, stopping early: {}",
                        self.position, e
                    );
                    self.end = Some(StreamEnd::DecodeFailed(e.to_string()));
                    return None;
                }
            }
        }
    }
}

impl<D: FrameDecoder> FusedIterator for SampledFrames<D> {}

/// Replays a fixed list of decode results.
pub struct MemoryDecoder {
    items: VecDeque<Result<Frame, String>>,
}

impl MemoryDecoder {
    pub fn new(items: Vec<Result<Frame, String>>) -> Self {
        Self {
            items: items.into(),
        }
    }

    pub fn from_frames(frames: Vec<Frame>) -> Self {
        Self::new(frames.into_iter().map(Ok).collect())
    }

    pub fn remaining(&self) -> usize {
        self.items.len()
    }
}

impl FrameDecoder for MemoryDecoder {
    fn next_frame(&mut self) -> Result<Option<Frame>, AnalysisError> {
        match self.items.pop_front() {
            Some(Ok(frame)) => Ok(Some(frame)),
            Some(Err(reason)) => Err(AnalysisError::Decode(reason)),
            None => Ok(None),
        }
    }
}
