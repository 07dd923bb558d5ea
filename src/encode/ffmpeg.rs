use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{HeroflowError, HeroflowResult};
use crate::foundation::math::mul_div255_u16;
use crate::surface::cpu::FrameRGBA;
use std::io::{Read as _, Write as _};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

/// Running `ffmpeg` process fed through its stdin.
struct Encoder {
    child: Child,
    stdin: ChildStdin,
    stderr: JoinHandle<std::io::Result<Vec<u8>>>,
}

/// Sink that encodes frames to an H.264 MP4 with the system `ffmpeg`.
///
/// Frames are flattened over [`SinkConfig::backdrop`] before encoding since the video has no
/// alpha channel. Odd dimensions are cropped by one pixel to satisfy `yuv420p`. The parent
/// directory of the output must already exist.
pub struct FfmpegSink {
    out_path: PathBuf,
    encoder: Option<Encoder>,
    cfg: Option<SinkConfig>,
    next_idx: u64,
    opaque: Vec<u8>,
}

impl FfmpegSink {
    /// Sink writing to `out_path`, overwriting any existing file.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            encoder: None,
            cfg: None,
            next_idx: 0,
            opaque: Vec::new(),
        }
    }

    fn spawn(&self, cfg: &SinkConfig) -> HeroflowResult<Encoder> {
        let mut cmd = Command::new("ffmpeg");
        cmd.args(["-y", "-loglevel", "error"])
            .args(["-f", "rawvideo", "-pix_fmt", "rgba"])
            .args(["-s", &format!("{}x{}", cfg.width, cfg.height)])
            .args(["-r", &format!("{}/{}", cfg.fps.num, cfg.fps.den)])
            .args(["-i", "pipe:0", "-an"]);
        if let Some(filter) = even_crop_filter(cfg.width, cfg.height) {
            cmd.args(["-vf", &filter]);
        }
        cmd.args(["-c:v", "libx264", "-pix_fmt", "yuv420p", "-movflags", "+faststart"])
            .arg(&self.out_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                HeroflowError::encode("ffmpeg is required for MP4 output but is not on PATH")
            }
            _ => HeroflowError::encode(format!("failed to spawn ffmpeg: {e}")),
        })?;
        let (Some(stdin), Some(mut stderr)) = (child.stdin.take(), child.stderr.take()) else {
            return Err(HeroflowError::encode("ffmpeg pipes were not captured"));
        };
        // Drain stderr so a chatty ffmpeg never blocks on a full pipe.
        let stderr = std::thread::spawn(move || {
            let mut buf = Vec::new();
            stderr.read_to_end(&mut buf)?;
            Ok(buf)
        });
        Ok(Encoder {
            child,
            stdin,
            stderr,
        })
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> HeroflowResult<()> {
        if cfg.width < 2 || cfg.height < 2 {
            return Err(HeroflowError::validation(format!(
                "mp4 output needs at least 2x2 pixels, got {}x{}",
                cfg.width, cfg.height
            )));
        }
        let encoder = self.spawn(&cfg)?;
        tracing::debug!(
            width = cfg.width,
            height = cfg.height,
            out = %self.out_path.display(),
            "ffmpeg started"
        );
        self.opaque = vec![0; cfg.width as usize * cfg.height as usize * 4];
        self.encoder = Some(encoder);
        self.cfg = Some(cfg);
        self.next_idx = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> HeroflowResult<()> {
        let (Some(cfg), Some(encoder)) = (self.cfg.as_ref(), self.encoder.as_mut()) else {
            return Err(HeroflowError::encode("ffmpeg sink is not running"));
        };
        if idx.0 < self.next_idx {
            return Err(HeroflowError::encode(format!(
                "frame {} pushed after frame {}",
                idx.0,
                self.next_idx - 1
            )));
        }
        if (frame.width, frame.height) != (cfg.width, cfg.height)
            || frame.data.len() != self.opaque.len()
        {
            return Err(HeroflowError::validation(format!(
                "frame is {}x{}, sink expects {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        self.next_idx = idx.0 + 1;

        flatten_over(&mut self.opaque, &frame.data, cfg.backdrop);
        encoder
            .stdin
            .write_all(&self.opaque)
            .map_err(|e| HeroflowError::encode(format!("ffmpeg stdin write failed: {e}")))
    }

    fn end(&mut self) -> HeroflowResult<()> {
        let Encoder {
            mut child,
            stdin,
            stderr,
        } = self
            .encoder
            .take()
            .ok_or_else(|| HeroflowError::encode("ffmpeg sink is not running"))?;
        self.cfg = None;
        drop(stdin);

        let status = child
            .wait()
            .map_err(|e| HeroflowError::encode(format!("waiting for ffmpeg failed: {e}")))?;
        let log = stderr
            .join()
            .map_err(|_| HeroflowError::encode("ffmpeg stderr reader panicked"))?
            .unwrap_or_default();
        if !status.success() {
            return Err(HeroflowError::encode(format!(
                "ffmpeg exited with {status}: {}",
                String::from_utf8_lossy(&log).trim()
            )));
        }
        tracing::debug!(frames = self.next_idx, "ffmpeg finished");
        Ok(())
    }
}

/// `yuv420p` needs even dimensions; crop the odd row/column instead of rejecting the size.
fn even_crop_filter(width: u32, height: u32) -> Option<String> {
    (width % 2 == 1 || height % 2 == 1).then(|| format!("crop={}:{}:0:0", width & !1, height & !1))
}

/// Composite premultiplied `src` over an opaque `backdrop` into `dst`.
fn flatten_over(dst: &mut [u8], src: &[u8], backdrop: [u8; 4]) {
    for (out, px) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let uncovered = 255 - u16::from(px[3]);
        for c in 0..3 {
            let under = mul_div255_u16(u16::from(backdrop[c]), uncovered);
            out[c] = (u16::from(px[c]) + under).min(255) as u8;
        }
        out[3] = 255;
    }
}
