//! Animated sprite assets.
//!
//! An [`AnimatedSprite`] is one visual asset used as the source of key effect
//! sprites. It is decoded from a GIF, a WebP (still or animated) or any other
//! still image format understood by the `image` crate, resampled to a fixed
//! 64×64 thumbnail and converted frame by frame into renderable handles via a
//! [`FrameUploader`].
//!
//! # Format policy
//!
//! | extension | frames | per-frame duration |
//! |-----------|--------|--------------------|
//! | `.gif`    | all    | fixed 0.1 s (source timing is not read); 0 for a single frame |
//! | `.webp`   | all if the container is animated, else one | container timing, ms → s |
//! | other     | one    | 0 (never advances) |
//!
//! Loading is all-or-nothing: if any frame fails to upload, every frame that
//! was already uploaded for that attempt is dropped (which releases it) and
//! the sprite stays empty.
//!
//! # Playback
//!
//! [`AnimatedSprite::advance`] performs a single threshold check per call, so
//! a delta spanning several frame durations still steps exactly one frame.
//! All effects referencing the same sprite share its clock.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use image::codecs::gif::GifDecoder;
use image::codecs::webp::WebPDecoder;
use image::imageops::FilterType;
use image::{AnimationDecoder, DynamicImage, Frame, ImageReader, RgbaImage};
use thiserror::Error;

/// Edge length, in pixels, every decoded frame is resampled to.
pub const THUMBNAIL_SIZE: u32 = 64;
/// Display time of every GIF frame in seconds.
pub const GIF_FRAME_SECONDS: f32 = 0.1;

/// Why a sprite could not be loaded.
#[derive(Debug, Error)]
pub enum SpriteLoadError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot decode '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("'{path}' contains no frames")]
    NoFrames { path: PathBuf },
    #[error("cannot upload frame {index} of '{path}': {reason}")]
    Upload {
        path: PathBuf,
        index: usize,
        reason: String,
    },
}

/// A renderable frame handle with known dimensions.
///
/// Handles own their graphics resource and release it on drop.
pub trait SpriteFrame {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
}

/// Turns decoded RGBA pixels into renderable frame handles.
pub trait FrameUploader {
    type Frame: SpriteFrame;

    fn upload(&mut self, pixels: &RgbaImage) -> Result<Self::Frame, String>;
}

/// Container format, chosen from the file extension (case-insensitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteFormat {
    Gif,
    WebP,
    Still,
}

impl SpriteFormat {
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match ext.as_deref() {
            Some("gif") => SpriteFormat::Gif,
            Some("webp") => SpriteFormat::WebP,
            _ => SpriteFormat::Still,
        }
    }
}

/// CPU-side result of decoding a sprite file, before upload.
#[derive(Debug, Clone)]
pub struct DecodedSprite {
    /// Frames already resampled to [`THUMBNAIL_SIZE`].
    pub frames: Vec<RgbaImage>,
    /// Display time of each frame in seconds, parallel to `frames`.
    pub durations: Vec<f32>,
}

impl DecodedSprite {
    fn still(image: DynamicImage) -> Self {
        Self {
            frames: vec![thumbnail(&image.to_rgba8())],
            durations: vec![0.0],
        }
    }

    fn animated(frames: Vec<Frame>, duration: impl Fn(&Frame) -> f32) -> Self {
        let durations = frames.iter().map(&duration).collect();
        let frames = frames
            .into_iter()
            .map(|frame| thumbnail(&frame.into_buffer()))
            .collect();
        Self { frames, durations }
    }
}

/// Decode a sprite file into resampled RGBA frames and their durations.
pub fn decode_sprite(path: &Path) -> Result<DecodedSprite, SpriteLoadError> {
    let decoded = match SpriteFormat::from_path(path) {
        SpriteFormat::Gif => decode_gif(path)?,
        SpriteFormat::WebP => decode_webp(path)?,
        SpriteFormat::Still => decode_still(path)?,
    };
    if decoded.frames.is_empty() {
        return Err(SpriteLoadError::NoFrames {
            path: path.to_path_buf(),
        });
    }
    Ok(decoded)
}

fn open(path: &Path) -> Result<BufReader<File>, SpriteLoadError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| SpriteLoadError::Io {
            path: path.to_path_buf(),
            source,
        })
}

fn decode_error(path: &Path) -> impl FnOnce(image::ImageError) -> SpriteLoadError + '_ {
    move |source| SpriteLoadError::Decode {
        path: path.to_path_buf(),
        source,
    }
}

fn decode_gif(path: &Path) -> Result<DecodedSprite, SpriteLoadError> {
    let decoder = GifDecoder::new(open(path)?).map_err(decode_error(path))?;
    let frames = decoder
        .into_frames()
        .collect_frames()
        .map_err(decode_error(path))?;
    let duration = if frames.len() > 1 { GIF_FRAME_SECONDS } else { 0.0 };
    Ok(DecodedSprite::animated(frames, |_| duration))
}

fn decode_webp(path: &Path) -> Result<DecodedSprite, SpriteLoadError> {
    let decoder = WebPDecoder::new(open(path)?).map_err(decode_error(path))?;
    if !decoder.has_animation() {
        let image = DynamicImage::from_decoder(decoder).map_err(decode_error(path))?;
        return Ok(DecodedSprite::still(image));
    }
    let frames = decoder
        .into_frames()
        .collect_frames()
        .map_err(decode_error(path))?;
    Ok(DecodedSprite::animated(frames, |frame| {
        let (numer, denom) = frame.delay().numer_denom_ms();
        numer as f32 / denom.max(1) as f32 / 1000.0
    }))
}

fn decode_still(path: &Path) -> Result<DecodedSprite, SpriteLoadError> {
    let image = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|source| SpriteLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?
        .decode()
        .map_err(decode_error(path))?;
    Ok(DecodedSprite::still(image))
}

fn thumbnail(image: &RgbaImage) -> RgbaImage {
    image::imageops::resize(image, THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::CatmullRom)
}

/// A loaded still or looping sprite and its playback state.
#[derive(Debug)]
pub struct AnimatedSprite<F> {
    source: PathBuf,
    frames: Vec<F>,
    durations: Vec<f32>,
    current: usize,
    frame_time: f32,
    animated: bool,
}

impl<F> Default for AnimatedSprite<F> {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            frames: Vec::new(),
            durations: Vec::new(),
            current: 0,
            frame_time: 0.0,
            animated: false,
        }
    }
}

impl<F: SpriteFrame> AnimatedSprite<F> {
    /// Create an empty, unloaded sprite.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `path` and upload every frame through `uploader`.
    pub fn from_file<U>(path: impl AsRef<Path>, uploader: &mut U) -> Result<Self, SpriteLoadError>
    where
        U: FrameUploader<Frame = F>,
    {
        let mut sprite = Self::new();
        sprite.load_from_file(path, uploader)?;
        Ok(sprite)
    }

    /// Build a sprite from already-uploaded frames and their durations.
    ///
    /// The sprite is multi-frame when more than one frame is given.
    pub fn from_frames(frames: Vec<(F, f32)>) -> Self {
        let (frames, durations): (Vec<F>, Vec<f32>) = frames.into_iter().unzip();
        Self {
            animated: frames.len() > 1,
            frames,
            durations,
            ..Self::default()
        }
    }

    /// Replace the contents of this sprite with the frames decoded from `path`.
    ///
    /// Frames held before the call are released first. On error the sprite
    /// is left empty and [`is_loaded`](Self::is_loaded) reports `false`.
    pub fn load_from_file<U>(
        &mut self,
        path: impl AsRef<Path>,
        uploader: &mut U,
    ) -> Result<(), SpriteLoadError>
    where
        U: FrameUploader<Frame = F>,
    {
        let path = path.as_ref();
        self.unload();
        self.source = path.to_path_buf();

        let decoded = decode_sprite(path)?;
        // Collecting into a Result drops the frames uploaded so far on the
        // first failure.
        let frames = decoded
            .frames
            .iter()
            .enumerate()
            .map(|(index, pixels)| {
                uploader
                    .upload(pixels)
                    .map_err(|reason| SpriteLoadError::Upload {
                        path: path.to_path_buf(),
                        index,
                        reason,
                    })
            })
            .collect::<Result<Vec<F>, _>>()?;

        self.animated = frames.len() > 1;
        self.frames = frames;
        self.durations = decoded.durations;
        Ok(())
    }

    /// Advance playback by `delta` seconds.
    pub fn advance(&mut self, delta: f32) {
        if !self.animated || self.frames.is_empty() {
            return;
        }
        self.frame_time += delta;
        if self.frame_time >= self.durations[self.current] {
            self.frame_time = 0.0;
            self.current = (self.current + 1) % self.frames.len();
        }
    }

    /// Frame to draw right now, if any frame is loaded.
    pub fn current_frame(&self) -> Option<&F> {
        self.frames.get(self.current)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[F] {
        &self.frames
    }

    /// Display time of each frame in seconds.
    pub fn durations(&self) -> &[f32] {
        &self.durations
    }

    pub fn is_animated(&self) -> bool {
        self.animated
    }

    pub fn is_loaded(&self) -> bool {
        !self.frames.is_empty()
    }

    /// Path of the last load attempt.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn width(&self) -> i32 {
        self.frames.first().map_or(0, |frame| frame.width())
    }

    pub fn height(&self) -> i32 {
        self.frames.first().map_or(0, |frame| frame.height())
    }

    fn unload(&mut self) {
        self.frames.clear();
        self.durations.clear();
        self.current = 0;
        self.frame_time = 0.0;
        self.animated = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::gif::GifEncoder;
    use image::codecs::webp::WebPEncoder;
    use image::{Delay, ExtendedColorType, ImageEncoder, Rgba};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountedFrame {
        w: i32,
        h: i32,
        live: Arc<AtomicUsize>,
    }

    impl SpriteFrame for CountedFrame {
        fn width(&self) -> i32 {
            self.w
        }
        fn height(&self) -> i32 {
            self.h
        }
    }

    impl Drop for CountedFrame {
        fn drop(&mut self) {
            self.live.fetch_sub(1, Ordering::SeqCst);
        }
    }

    #[derive(Default)]
    struct CountingUploader {
        live: Arc<AtomicUsize>,
        fail_at: Option<usize>,
        calls: usize,
    }

    impl FrameUploader for CountingUploader {
        type Frame = CountedFrame;

        fn upload(&mut self, pixels: &RgbaImage) -> Result<CountedFrame, String> {
            let call = self.calls;
            self.calls += 1;
            if self.fail_at == Some(call) {
                return Err("texture upload failed".to_string());
            }
            self.live.fetch_add(1, Ordering::SeqCst);
            Ok(CountedFrame {
                w: pixels.width() as i32,
                h: pixels.height() as i32,
                live: Arc::clone(&self.live),
            })
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("keyflare-sprite-{}-{}", std::process::id(), name))
    }

    fn write_gif(path: &Path, frames: u8) {
        let file = File::create(path).unwrap();
        let mut encoder = GifEncoder::new(file);
        let frames = (0..frames).map(|i| {
            Frame::from_parts(
                RgbaImage::from_pixel(16, 8, Rgba([i * 60, 200, 10, 255])),
                0,
                0,
                Delay::from_numer_denom_ms(250, 1),
            )
        });
        encoder.encode_frames(frames).unwrap();
    }

    fn lossless_webp(image: &RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        WebPEncoder::new_lossless(&mut bytes)
            .write_image(image.as_raw(), image.width(), image.height(), ExtendedColorType::Rgba8)
            .unwrap();
        bytes
    }

    fn riff_chunk(out: &mut Vec<u8>, fourcc: &[u8; 4], payload: &[u8]) {
        out.extend_from_slice(fourcc);
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        out.extend_from_slice(payload);
        if payload.len() % 2 == 1 {
            out.push(0);
        }
    }

    fn push_u24(out: &mut Vec<u8>, value: u32) {
        out.extend_from_slice(&value.to_le_bytes()[..3]);
    }

    /// The `VP8L` chunk, header and padding included, of a lossless WebP file.
    fn vp8l_chunk(file: &[u8]) -> Vec<u8> {
        let mut pos = 12;
        while pos + 8 <= file.len() {
            let len = u32::from_le_bytes(file[pos + 4..pos + 8].try_into().unwrap()) as usize;
            let end = (pos + 8 + len + len % 2).min(file.len());
            if &file[pos..pos + 4] == b"VP8L" {
                return file[pos..end].to_vec();
            }
            pos = end;
        }
        panic!("no VP8L chunk");
    }

    /// Animated WebP of 16x8 opaque frames, one per entry of `durations_ms`.
    fn write_animated_webp(path: &Path, durations_ms: &[u32]) {
        let (w, h) = (16u32, 8u32);
        let mut body = Vec::new();

        // Alpha and animation flags, then the canvas size minus one.
        let mut vp8x = vec![0x10 | 0x02, 0, 0, 0];
        push_u24(&mut vp8x, w - 1);
        push_u24(&mut vp8x, h - 1);
        riff_chunk(&mut body, b"VP8X", &vp8x);

        // Background color, loop forever.
        let mut anim = vec![0u8; 4];
        anim.extend_from_slice(&0u16.to_le_bytes());
        riff_chunk(&mut body, b"ANIM", &anim);

        for (i, ms) in durations_ms.iter().enumerate() {
            let pixels = RgbaImage::from_pixel(w, h, Rgba([i as u8 * 60, 200, 10, 255]));
            let mut anmf = Vec::new();
            push_u24(&mut anmf, 0);
            push_u24(&mut anmf, 0);
            push_u24(&mut anmf, w - 1);
            push_u24(&mut anmf, h - 1);
            push_u24(&mut anmf, *ms);
            // Do not blend, no disposal.
            anmf.push(0x02);
            anmf.extend_from_slice(&vp8l_chunk(&lossless_webp(&pixels)));
            riff_chunk(&mut body, b"ANMF", &anmf);
        }

        let mut file = b"RIFF".to_vec();
        file.extend_from_slice(&((body.len() + 4) as u32).to_le_bytes());
        file.extend_from_slice(b"WEBP");
        file.extend_from_slice(&body);
        std::fs::write(path, file).unwrap();
    }

    fn counted(n: usize, duration: f32) -> AnimatedSprite<CountedFrame> {
        let live = Arc::new(AtomicUsize::new(n));
        AnimatedSprite::from_frames(
            (0..n)
                .map(|_| {
                    (
                        CountedFrame {
                            w: 64,
                            h: 64,
                            live: Arc::clone(&live),
                        },
                        duration,
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn test_format_from_extension_is_case_insensitive() {
        assert_eq!(SpriteFormat::from_path(Path::new("a/fire.GIF")), SpriteFormat::Gif);
        assert_eq!(SpriteFormat::from_path(Path::new("fire.WebP")), SpriteFormat::WebP);
        assert_eq!(SpriteFormat::from_path(Path::new("fire.png")), SpriteFormat::Still);
        assert_eq!(SpriteFormat::from_path(Path::new("fire")), SpriteFormat::Still);
    }

    #[test]
    fn test_four_frames_wrap_after_four_steps() {
        let mut sprite = counted(4, 0.1);
        for expected in [1, 2, 3, 0] {
            sprite.advance(0.1);
            assert_eq!(sprite.current_index(), expected);
        }
    }

    #[test]
    fn test_partial_deltas_accumulate_before_stepping() {
        let mut sprite = counted(3, 0.5);
        sprite.advance(0.25);
        assert_eq!(sprite.current_index(), 0);
        sprite.advance(0.25);
        assert_eq!(sprite.current_index(), 1);
    }

    #[test]
    fn test_large_delta_steps_only_one_frame() {
        let mut sprite = counted(4, 0.1);
        sprite.advance(10.0);
        assert_eq!(sprite.current_index(), 1);
    }

    #[test]
    fn test_single_frame_never_advances() {
        let mut sprite = counted(1, 0.0);
        assert!(!sprite.is_animated());
        for delta in [0.0, 0.1, 5.0, 1000.0] {
            sprite.advance(delta);
            assert_eq!(sprite.current_index(), 0);
        }
        assert!(sprite.current_frame().is_some());
    }

    #[test]
    fn test_empty_sprite_has_no_current_frame() {
        let mut sprite: AnimatedSprite<CountedFrame> = AnimatedSprite::new();
        sprite.advance(1.0);
        assert!(sprite.current_frame().is_none());
        assert!(!sprite.is_loaded());
        assert_eq!(sprite.width(), 0);
    }

    #[test]
    fn test_three_frame_gif_loads_as_thumbnails() {
        let path = temp_path("three.gif");
        write_gif(&path, 3);
        let mut uploader = CountingUploader::default();

        let sprite = AnimatedSprite::from_file(&path, &mut uploader).unwrap();

        assert_eq!(sprite.frame_count(), 3);
        assert!(sprite.is_animated());
        assert_eq!(sprite.durations(), &[GIF_FRAME_SECONDS; 3]);
        for frame in sprite.frames() {
            assert_eq!((frame.width(), frame.height()), (64, 64));
        }
        assert_eq!(sprite.current_index(), 0);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_single_frame_gif_is_static() {
        let path = temp_path("one.gif");
        write_gif(&path, 1);
        let sprite = AnimatedSprite::from_file(&path, &mut CountingUploader::default()).unwrap();
        assert_eq!(sprite.frame_count(), 1);
        assert_eq!(sprite.durations(), &[0.0]);
        assert!(!sprite.is_animated());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_static_webp_loads_one_frame_with_zero_duration() {
        let path = temp_path("still.webp");
        let pixels = RgbaImage::from_pixel(10, 30, Rgba([40, 90, 200, 255]));
        std::fs::write(&path, lossless_webp(&pixels)).unwrap();

        let sprite = AnimatedSprite::from_file(&path, &mut CountingUploader::default()).unwrap();

        assert_eq!(sprite.frame_count(), 1);
        assert_eq!(sprite.durations(), &[0.0]);
        assert_eq!((sprite.width(), sprite.height()), (64, 64));
        assert!(!sprite.is_animated());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_animated_webp_uses_container_timing() {
        let path = temp_path("anim.webp");
        write_animated_webp(&path, &[250, 40, 1000]);

        let mut sprite = AnimatedSprite::from_file(&path, &mut CountingUploader::default()).unwrap();

        assert_eq!(sprite.frame_count(), 3);
        assert_eq!(sprite.durations(), &[0.25, 0.04, 1.0]);
        assert!(sprite.is_animated());
        assert_eq!((sprite.width(), sprite.height()), (64, 64));

        sprite.advance(0.125);
        assert_eq!(sprite.current_index(), 0);
        sprite.advance(0.125);
        assert_eq!(sprite.current_index(), 1);
        sprite.advance(0.04);
        assert_eq!(sprite.current_index(), 2);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_still_png_loads_one_frame_with_zero_duration() {
        let path = temp_path("still.png");
        RgbaImage::from_pixel(10, 30, Rgba([1, 2, 3, 255]))
            .save(&path)
            .unwrap();
        let sprite = AnimatedSprite::from_file(&path, &mut CountingUploader::default()).unwrap();
        assert_eq!(sprite.frame_count(), 1);
        assert_eq!(sprite.durations(), &[0.0]);
        assert_eq!((sprite.width(), sprite.height()), (64, 64));
        assert!(!sprite.is_animated());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_missing_file_leaves_sprite_empty() {
        let mut sprite: AnimatedSprite<CountedFrame> = AnimatedSprite::new();
        let result = sprite.load_from_file(temp_path("missing.gif"), &mut CountingUploader::default());
        assert!(matches!(result, Err(SpriteLoadError::Io { .. })));
        assert_eq!(sprite.frame_count(), 0);
        assert!(!sprite.is_loaded());
    }

    #[test]
    fn test_corrupt_file_leaves_sprite_empty() {
        let path = temp_path("corrupt.webp");
        std::fs::write(&path, b"RIFF\x10\x00\x00\x00WEBPnot really").unwrap();
        let mut sprite: AnimatedSprite<CountedFrame> = AnimatedSprite::new();
        assert!(sprite.load_from_file(&path, &mut CountingUploader::default()).is_err());
        assert_eq!(sprite.frame_count(), 0);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_upload_failure_releases_uploaded_frames() {
        let path = temp_path("upload-fail.gif");
        write_gif(&path, 3);
        let mut uploader = CountingUploader {
            fail_at: Some(2),
            ..Default::default()
        };
        let mut sprite = AnimatedSprite::new();

        let result = sprite.load_from_file(&path, &mut uploader);

        assert!(matches!(result, Err(SpriteLoadError::Upload { index: 2, .. })));
        assert_eq!(sprite.frame_count(), 0);
        assert_eq!(uploader.live.load(Ordering::SeqCst), 0);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_reload_releases_previous_frames() {
        let path = temp_path("reload.gif");
        write_gif(&path, 2);
        let mut uploader = CountingUploader::default();
        let mut sprite = AnimatedSprite::from_file(&path, &mut uploader).unwrap();
        sprite.advance(0.1);
        assert_eq!(uploader.live.load(Ordering::SeqCst), 2);

        sprite.load_from_file(&path, &mut uploader).unwrap();

        assert_eq!(uploader.live.load(Ordering::SeqCst), 2);
        assert_eq!(sprite.current_index(), 0);
        drop(sprite);
        assert_eq!(uploader.live.load(Ordering::SeqCst), 0);
        let _ = std::fs::remove_file(path);
    }
}
