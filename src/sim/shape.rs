//! Collidable shapes
//!
//! A shape is an opacity mask covering an entity's bounding box. Shapes come
//! from an external provider once at load time; a sprite without a shape
//! collides as its full bounding box.

use std::collections::HashMap;

use glam::{IVec2, Vec2};

use super::entity::SpriteId;
use super::geom::Rect;
use crate::tuning::Tuning;

/// Alpha at or above which a pixel counts as opaque
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 127;

/// Per-pixel opacity mask
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    width: u32,
    height: u32,
    opaque: Vec<bool>,
}

impl Shape {
    /// Build from a row-major alpha channel. `None` when the buffer length
    /// does not match the dimensions.
    pub fn from_alpha(width: u32, height: u32, alpha: &[u8], threshold: u8) -> Option<Self> {
        if alpha.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            width,
            height,
            opaque: alpha.iter().map(|&a| a >= threshold).collect(),
        })
    }

    /// Fully opaque mask
    pub fn solid(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            opaque: vec![true; (width as usize) * (height as usize)],
        }
    }

    /// Opaque disc inscribed in the mask
    pub fn disc(width: u32, height: u32) -> Self {
        let center = Vec2::new(width as f32, height as f32) / 2.0;
        let radius = width.min(height) as f32 / 2.0;
        let mut opaque = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                opaque.push(p.distance(center) <= radius);
            }
        }
        Self {
            width,
            height,
            opaque,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Out-of-range coordinates are transparent
    #[inline]
    pub fn is_opaque(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.opaque[(y as u32 * self.width + x as u32) as usize]
    }
}

/// Supplies collidable shapes for sprites
pub trait ShapeProvider {
    /// `None` when the shape is unavailable (missing or undecodable asset)
    fn shape(&self, sprite: SpriteId) -> Option<Shape>;
}

/// Provider with no shape data; everything collides as a bounding box
#[derive(Debug, Clone, Copy, Default)]
pub struct NoShapes;

impl ShapeProvider for NoShapes {
    fn shape(&self, _sprite: SpriteId) -> Option<Shape> {
        None
    }
}

impl ShapeProvider for HashMap<SpriteId, Shape> {
    fn shape(&self, sprite: SpriteId) -> Option<Shape> {
        self.get(&sprite).cloned()
    }
}

/// Shapes resolved once per run
#[derive(Debug, Clone, Default)]
pub struct ShapeSet {
    shapes: HashMap<SpriteId, Shape>,
}

impl ShapeSet {
    /// Bounding boxes for every sprite
    pub fn bounding_boxes() -> Self {
        Self::default()
    }

    /// Ask the provider for every sprite. Missing shapes, and shapes whose
    /// dimensions disagree with the sprite's extent, fall back to the
    /// bounding box.
    pub fn resolve(provider: &dyn ShapeProvider, tuning: &Tuning) -> Self {
        let mut shapes = HashMap::new();
        for sprite in SpriteId::ALL {
            let extent = nominal_extent(sprite, tuning);
            match provider.shape(sprite) {
                Some(shape) if shape.size() == extent.round() => {
                    shapes.insert(sprite, shape);
                }
                Some(shape) => {
                    log::warn!(
                        "Shape for {:?} is {}x{}, expected {}; using bounding box",
                        sprite,
                        shape.width(),
                        shape.height(),
                        extent
                    );
                }
                None => {
                    log::warn!("No shape for {:?}; using {} bounding box", sprite, extent);
                }
            }
        }
        Self { shapes }
    }

    pub fn get(&self, sprite: SpriteId) -> Option<&Shape> {
        self.shapes.get(&sprite)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// Extent a sprite is drawn and collided at
pub fn nominal_extent(sprite: SpriteId, tuning: &Tuning) -> Vec2 {
    match sprite {
        SpriteId::Player => tuning.player_size,
        SpriteId::StraightZombie | SpriteId::TrackingZombie => tuning.zombie_size,
        SpriteId::Meteorite(_) => tuning.meteorite_size,
    }
}

/// Non-empty overlap of opaque regions
///
/// Without shape data on either side this is exactly bounding-box overlap.
/// With a mask on at least one side, rectangles are snapped to whole pixels
/// and a side without a mask counts as fully opaque.
pub fn overlaps(a: &Rect, a_shape: Option<&Shape>, b: &Rect, b_shape: Option<&Shape>) -> bool {
    if !a.intersects(b) {
        return false;
    }
    if a_shape.is_none() && b_shape.is_none() {
        return true;
    }

    let a_origin = a.pos.round().as_ivec2();
    let b_origin = b.pos.round().as_ivec2();
    let a_size = a_shape.map_or(a.size.round().as_ivec2(), |s| s.size().as_ivec2());
    let b_size = b_shape.map_or(b.size.round().as_ivec2(), |s| s.size().as_ivec2());

    // Overlap in `a`'s local pixel space
    let offset = b_origin - a_origin;
    let min = offset.max(IVec2::ZERO);
    let max = (offset + b_size).min(a_size);

    for y in min.y..max.y {
        for x in min.x..max.x {
            let a_hit = a_shape.is_none_or(|s| s.is_opaque(x, y));
            let b_hit = b_shape.is_none_or(|s| s.is_opaque(x - offset.x, y - offset.y));
            if a_hit && b_hit {
                return true;
            }
        }
    }
    false
}
