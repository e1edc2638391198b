//! raylib-backed sprite frames.
//!
//! [`RaylibUploader`] turns decoded RGBA frames into GPU textures. Textures
//! are released when the owning [`Texture2D`] is dropped, so replacing or
//! dropping an [`AnimatedSprite`](crate::resources::animatedsprite::AnimatedSprite)
//! frees its frames.

use image::RgbaImage;
use raylib::ffi;
use raylib::prelude::{Image, RaylibHandle, RaylibThread, Texture2D};

use crate::resources::animatedsprite::{FrameUploader, SpriteFrame};

impl SpriteFrame for Texture2D {
    fn width(&self) -> i32 {
        let raw: &ffi::Texture2D = self.as_ref();
        raw.width
    }

    fn height(&self) -> i32 {
        let raw: &ffi::Texture2D = self.as_ref();
        raw.height
    }
}

/// Copy RGBA8 pixels into a raylib-owned [`Image`].
fn rgba_image(pixels: &RgbaImage) -> Result<Image, String> {
    let bytes = pixels.as_raw();
    let len = u32::try_from(bytes.len()).map_err(|_| "frame too large".to_string())?;
    // SAFETY: the buffer comes from raylib's allocator and holds exactly
    // width * height RGBA8 pixels; the returned Image frees it on drop.
    unsafe {
        let data = ffi::MemAlloc(len) as *mut u8;
        if data.is_null() {
            return Err("out of memory for frame pixels".to_string());
        }
        std::ptr::copy_nonoverlapping(bytes.as_ptr(), data, bytes.len());
        Ok(Image::from_raw(ffi::Image {
            data: data.cast(),
            width: pixels.width() as i32,
            height: pixels.height() as i32,
            mipmaps: 1,
            format: ffi::PixelFormat::PIXELFORMAT_UNCOMPRESSED_R8G8B8A8 as i32,
        }))
    }
}

/// Uploads frames through the main raylib handle. Must run on the main thread.
pub struct RaylibUploader<'a> {
    rl: &'a mut RaylibHandle,
    thread: &'a RaylibThread,
}

impl<'a> RaylibUploader<'a> {
    pub fn new(rl: &'a mut RaylibHandle, thread: &'a RaylibThread) -> Self {
        Self { rl, thread }
    }
}

impl FrameUploader for RaylibUploader<'_> {
    type Frame = Texture2D;

    fn upload(&mut self, pixels: &RgbaImage) -> Result<Texture2D, String> {
        let image = rgba_image(pixels)?;
        self.rl
            .load_texture_from_image(self.thread, &image)
            .map_err(|e| e.to_string())
    }
}
