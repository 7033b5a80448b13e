//! ffmpeg 子进程解码 - 输出 rgb24 原始帧
//!
//! Decoding is delegated to the `ffmpeg`/`ffprobe` binaries. Frames are read
//! synchronously from the child's stdout on the calling thread.

use crate::core::error::AnalysisError;
use crate::core::source::sampler::FrameDecoder;
use crate::core::vision::Frame;
use log::{debug, info};
use serde::Deserialize;
use std::io::{ErrorKind, Read};
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Stdio};

/// Stream metadata reported by `ffprobe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoInfo {
    pub width: u32,
    pub height: u32,
    /// Container-reported frame count; informational only, may be absent.
    pub frame_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    width: Option<u32>,
    height: Option<u32>,
    nb_frames: Option<String>,
}

pub fn probe(path: &Path) -> Result<VideoInfo, AnalysisError> {
    let output = Command::new("ffprobe")
        .arg("-v")
        .arg("error")
        .arg("-select_streams")
        .arg("v:0")
        .arg("-show_entries")
        .arg("stream=width,height,nb_frames")
        .arg("-of")
        .arg("json")
        .arg(path)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| AnalysisError::Decode(format!("failed to run ffprobe: {}", e)))?;

    if !output.status.success() {
        return Err(AnalysisError::Decode(format!(
            "ffprobe exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    parse_probe_output(&String::from_utf8_lossy(&output.stdout))
}

pub(crate) fn parse_probe_output(json: &str) -> Result<VideoInfo, AnalysisError> {
    let probe: ProbeOutput = serde_json::from_str(json)?;
    let stream = probe
        .streams
        .into_iter()
        .next()
        .ok_or_else(|| AnalysisError::Decode("no video stream found".to_string()))?;

    match (stream.width, stream.height) {
        (Some(width), Some(height)) if width > 0 && height > 0 => Ok(VideoInfo {
            width,
            height,
            frame_count: stream.nb_frames.and_then(|n| n.trim().parse().ok()),
        }),
        (width, height) => Err(AnalysisError::Decode(format!(
            "invalid video dimensions {:?}x{:?}",
            width, height
        ))),
    }
}

/// Raw rgb24 decode of the first video stream. Auto-rotation stays off so
/// every frame keeps the coded size `probe` reported.
fn decode_command(path: &Path) -> Command {
    let mut cmd = Command::new("ffmpeg");
    cmd.arg("-hide_banner")
        .arg("-loglevel")
        .arg("error")
        .arg("-noautorotate")
        .arg("-i")
        .arg(path)
        .arg("-an")
        .arg("-f")
        .arg("rawvideo")
        .arg("-pix_fmt")
        .arg("rgb24")
        .arg("-")
        .stderr(Stdio::inherit());
    cmd
}

pub struct FfmpegDecoder {
    child: Child,
    stdout: ChildStdout,
    info: VideoInfo,
    buffer: Vec<u8>,
}

impl FfmpegDecoder {
    pub fn open(path: &Path) -> Result<Self, AnalysisError> {
        let info = probe(path)?;
        info!(
            "🎬 Opening video {} ({}x{}, {} frames reported)",
            path.display(),
            info.width,
            info.height,
            info.frame_count
                .map(|n| n.to_string())
                .unwrap_or_else(|| "?".to_string())
        );

        Self::spawn(decode_command(path), info)
    }

    /// Runs `cmd`, which must write packed rgb24 frames of `info`'s size to
    /// stdout.
    pub(crate) fn spawn(mut cmd: Command, info: VideoInfo) -> Result<Self, AnalysisError> {
        let mut child = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| AnalysisError::Decode(format!("failed to spawn ffmpeg: {}", e)))?;
        let stdout = match child.stdout.take() {
            Some(stdout) => stdout,
            None => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(AnalysisError::Decode(
                    "failed to capture ffmpeg stdout".to_string(),
                ));
            }
        };

        let frame_bytes = info.width as usize * info.height as usize * 3;
        Ok(Self {
            child,
            stdout,
            info,
            buffer: vec![0u8; frame_bytes],
        })
    }

    pub fn info(&self) -> &VideoInfo {
        &self.info
    }

    /// Fills the frame buffer; returns how many bytes arrived before EOF.
    fn fill_buffer(&mut self) -> std::io::Result<usize> {
        let mut filled = 0;
        while filled < self.buffer.len() {
            match self.stdout.read(&mut self.buffer[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}

impl FrameDecoder for FfmpegDecoder {
    fn next_frame(&mut self) -> Result<Option<Frame>, AnalysisError> {
        let filled = self
            .fill_buffer()
            .map_err(|e| AnalysisError::Decode(format!("ffmpeg read failed: {}", e)))?;

        if filled == 0 {
            let status = self
                .child
                .wait()
                .map_err(|e| AnalysisError::Decode(format!("ffmpeg wait failed: {}", e)))?;
            if !status.success() {
                return Err(AnalysisError::Decode(format!(
                    "ffmpeg exited with {}",
                    status
                )));
            }
            return Ok(None);
        }
        if filled < self.buffer.len() {
            return Err(AnalysisError::Decode(format!(
                "truncated frame: {} of {} bytes",
                filled,
                self.buffer.len()
            )));
        }

        Frame::new(self.info.width, self.info.height, self.buffer.clone(), 0).map(Some)
    }
}

impl Drop for FfmpegDecoder {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
        debug!("🗑️ FfmpegDecoder: released");
    }
}
