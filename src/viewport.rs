//! World <-> display surface coordinate mapping
//!
//! The world is a fixed logical rectangle with y pointing up. The display
//! surface uses CSS-style pixels with y pointing down, offset by the
//! surface's client origin. Display dimensions are pushed in explicitly
//! (resize adapter) rather than queried from a live surface.

use glam::Vec2;

/// Maps world units to display pixels for a responsive surface
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    world_width: f32,
    world_height: f32,
    /// Display pixels per world unit
    scale: f32,
    /// Client-space position of the surface's top-left corner
    origin: Vec2,
    /// Backing-store pixels per display pixel (>= 1)
    device_pixel_ratio: f32,
    display_size: Vec2,
}

impl Viewport {
    /// Viewport with a 1:1 scale until the first `set_display_size`
    pub fn new(world_width: f32, world_height: f32) -> Self {
        Self {
            world_width,
            world_height,
            scale: 1.0,
            origin: Vec2::ZERO,
            device_pixel_ratio: 1.0,
            display_size: Vec2::new(world_width, world_height),
        }
    }

    /// Recompute the scale for a new display size
    pub fn set_display_size(&mut self, width_px: f32, height_px: f32) {
        if !(width_px > 0.0 && width_px.is_finite() && height_px.is_finite()) {
            log::warn!("Ignoring invalid display size {}x{}", width_px, height_px);
            return;
        }
        self.scale = width_px / self.world_width;
        self.display_size = Vec2::new(width_px, height_px.max(0.0));
    }

    /// Client offset of the surface (e.g. canvas bounding rect left/top)
    pub fn set_origin(&mut self, left: f32, top: f32) {
        self.origin = Vec2::new(left, top);
    }

    pub fn set_device_pixel_ratio(&mut self, dpr: f32) {
        // Anything below 1 (or NaN) renders as a plain 1:1 surface
        self.device_pixel_ratio = if dpr.is_finite() { dpr.max(1.0) } else { 1.0 };
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[inline]
    pub fn device_pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio
    }

    pub fn display_size(&self) -> Vec2 {
        self.display_size
    }

    /// Backing-store size in physical pixels
    pub fn backing_size(&self) -> (u32, u32) {
        let size = (self.display_size * self.device_pixel_ratio).round();
        (size.x as u32, size.y as u32)
    }

    #[inline]
    pub fn world_to_screen_x(&self, x: f32) -> f32 {
        self.origin.x + x * self.scale
    }

    /// World y=0 maps to the bottom edge of the drawn world
    #[inline]
    pub fn world_to_screen_y(&self, y: f32) -> f32 {
        self.origin.y + (self.world_height - y) * self.scale
    }

    pub fn world_to_screen(&self, p: Vec2) -> Vec2 {
        Vec2::new(self.world_to_screen_x(p.x), self.world_to_screen_y(p.y))
    }

    /// Inverse of `world_to_screen`
    pub fn screen_to_world(&self, client_x: f32, client_y: f32) -> Vec2 {
        Vec2::new(
            (client_x - self.origin.x) / self.scale,
            self.world_height - (client_y - self.origin.y) / self.scale,
        )
    }

    /// Scale a world length (radius, block size) into display pixels
    #[inline]
    pub fn world_length_to_screen(&self, len: f32) -> f32 {
        len * self.scale
    }

    /// World point in backing-store pixels, relative to the surface itself
    pub fn world_to_backing(&self, p: Vec2) -> Vec2 {
        (self.world_to_screen(p) - self.origin) * self.device_pixel_ratio
    }
}
