//! Key effect rendering.
//!
//! [`render_key_effects`] runs inside raylib's drawing scope after the update
//! schedule, the same way the frame is drawn from the `World` directly rather
//! than from a system. Drawing goes through the [`EffectCanvas`] trait so the
//! compositing rules can run against a recording canvas in tests.
//!
//! Per effect, in spawn order:
//!
//! - with a sprite frame: an additive glow pass then a normal alpha pass,
//!   both tinted and scaled, stretched horizontally when the label is wider
//!   than the scaled sprite;
//! - without a sprite: a tinted circle;
//! - then the label, white, centred on the effect position.

use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::keyeffect::{KeyEffect, SpriteSource};
use crate::components::tint::{Tint, fade};
use crate::resources::animatedsprite::SpriteFrame;
use crate::resources::labelfont::LabelFont;
use crate::resources::spriteassets::SpriteAssets;

/// Label font size at scale 1.
pub const LABEL_BASE_SIZE: f32 = 48.0;
pub const LABEL_SPACING: f32 = 2.0;
/// Peak alpha of the additive glow pass.
pub const GLOW_ALPHA: f32 = 180.0;
pub const SOLID_ALPHA: f32 = 255.0;
pub const CIRCLE_RADIUS: f32 = 30.0;
pub const CIRCLE_ALPHA: f32 = 200.0;
/// Extra horizontal room when a sprite is stretched to fit its label.
pub const STRETCH_FACTOR: f32 = 1.2;

/// Compositing rule of one sprite draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendPass {
    Additive,
    Alpha,
}

/// Drawing operations needed to composite key effects.
pub trait EffectCanvas {
    type Frame: SpriteFrame + Send + Sync + 'static;

    /// Size of `text` drawn at `size` with [`LABEL_SPACING`].
    fn measure_label(&mut self, text: &str, size: f32) -> Vector2;
    fn draw_label(&mut self, text: &str, position: Vector2, size: f32, color: Color);
    /// Draw the whole `frame` scaled into `dest`.
    fn draw_sprite(&mut self, frame: &Self::Frame, dest: Rectangle, tint: Color, pass: BlendPass);
    fn draw_circle(&mut self, center: Vector2, radius: f32, color: Color);
}

/// Label font size for an effect scale; whole pixels only.
pub fn label_size(scale: f32) -> f32 {
    (LABEL_BASE_SIZE * scale).trunc()
}

/// Destination rectangle of a sprite frame centred on `position`.
///
/// The frame is scaled uniformly by `scale`, except that when `label_width`
/// exceeds the scaled frame width the horizontal scale becomes
/// `label_width / frame_width * STRETCH_FACTOR`.
pub fn sprite_dest(
    frame_width: f32,
    frame_height: f32,
    label_width: f32,
    position: Vector2,
    scale: f32,
) -> Rectangle {
    let scale_x = if label_width > frame_width * scale {
        label_width / frame_width * STRETCH_FACTOR
    } else {
        scale
    };
    let width = frame_width * scale_x;
    let height = frame_height * scale;
    Rectangle {
        x: position.x - width / 2.0,
        y: position.y - height / 2.0,
        width,
        height,
    }
}

/// Draw every live key effect, oldest first.
pub fn render_key_effects<C: EffectCanvas>(world: &mut World, canvas: &mut C) {
    let mut effects: Vec<KeyEffect> = {
        let mut q = world.query::<&KeyEffect>();
        q.iter(world)
            .filter(|effect| !effect.is_expired())
            .cloned()
            .collect()
    };
    effects.sort_by_key(|effect| effect.seq);

    let tint = world.get_resource::<Tint>().copied().unwrap_or_default();
    // A missing pool draws like an empty one.
    let assets = world.get_resource::<SpriteAssets<C::Frame>>();

    for effect in effects.iter() {
        draw_effect(canvas, assets, tint, effect);
    }
}

fn draw_effect<C: EffectCanvas>(
    canvas: &mut C,
    assets: Option<&SpriteAssets<C::Frame>>,
    tint: Tint,
    effect: &KeyEffect,
) {
    let size = label_size(effect.scale);
    let text_size = canvas.measure_label(&effect.label, size);

    match effect.sprite {
        SpriteSource::Asset(index) => {
            // An index without a drawable frame still gets its label.
            let frame = assets
                .and_then(|assets| assets.get(index))
                .and_then(|sprite| sprite.current_frame())
                .filter(|frame| frame.width() > 0 && frame.height() > 0);
            if let Some(frame) = frame {
                let dest = sprite_dest(
                    frame.width() as f32,
                    frame.height() as f32,
                    text_size.x,
                    effect.position,
                    effect.scale,
                );
                canvas.draw_sprite(
                    frame,
                    dest,
                    tint.faded(effect.opacity, GLOW_ALPHA),
                    BlendPass::Additive,
                );
                canvas.draw_sprite(
                    frame,
                    dest,
                    tint.faded(effect.opacity, SOLID_ALPHA),
                    BlendPass::Alpha,
                );
            }
        }
        SpriteSource::NoSprite => {
            canvas.draw_circle(
                effect.position,
                CIRCLE_RADIUS * effect.scale,
                tint.faded(effect.opacity, CIRCLE_ALPHA),
            );
        }
    }

    let label_pos = Vector2 {
        x: effect.position.x - text_size.x / 2.0,
        y: effect.position.y - text_size.y / 2.0,
    };
    canvas.draw_label(
        &effect.label,
        label_pos,
        size,
        fade(Color::WHITE, effect.opacity, SOLID_ALPHA),
    );
}

/// [`EffectCanvas`] drawing through a raylib draw handle.
pub struct RaylibCanvas<'a, D: RaylibDraw> {
    d: &'a mut D,
    font: &'a LabelFont,
}

impl<'a, D: RaylibDraw> RaylibCanvas<'a, D> {
    pub fn new(d: &'a mut D, font: &'a LabelFont) -> Self {
        Self { d, font }
    }
}

impl<D: RaylibDraw> EffectCanvas for RaylibCanvas<'_, D> {
    type Frame = Texture2D;

    fn measure_label(&mut self, text: &str, size: f32) -> Vector2 {
        measure_text_ex(self.font, text, size, LABEL_SPACING)
    }

    fn draw_label(&mut self, text: &str, position: Vector2, size: f32, color: Color) {
        self.d
            .draw_text_ex(self.font, text, position, size, LABEL_SPACING, color);
    }

    fn draw_sprite(&mut self, frame: &Texture2D, dest: Rectangle, tint: Color, pass: BlendPass) {
        let mode = match pass {
            BlendPass::Additive => BlendMode::BLEND_ADDITIVE,
            BlendPass::Alpha => BlendMode::BLEND_ALPHA,
        };
        let source = Rectangle {
            x: 0.0,
            y: 0.0,
            width: SpriteFrame::width(frame) as f32,
            height: SpriteFrame::height(frame) as f32,
        };
        let mut blend = self.d.begin_blend_mode(mode);
        blend.draw_texture_pro(frame, source, dest, Vector2::zero(), 0.0, tint);
    }

    fn draw_circle(&mut self, center: Vector2, radius: f32, color: Color) {
        self.d.draw_circle_v(center, radius, color);
    }
}
