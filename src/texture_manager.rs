use std::collections::HashMap;
use egui::{Context, TextureHandle, TextureId, ColorImage, TextureOptions};
use image::RgbaImage;
use image::imageops::{self, FilterType};
use thiserror::Error;

use crate::error::CaptureError;

/// Errors that can occur during texture generation
#[derive(Error, Debug)]
pub enum TextureGenerationError {
    #[error("Failed to read frame: {0}")]
    Frame(#[from] CaptureError),
    #[error("Invalid texture dimensions")]
    InvalidDimensions,
}

/// What a cached texture shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    /// The live video surface
    Surface,
    /// The most recent captured still
    Capture,
}

impl TextureSlot {
    fn name(&self) -> &'static str {
        match self {
            TextureSlot::Surface => "surface",
            TextureSlot::Capture => "capture",
        }
    }
}

/// Converts frame pixels into an egui image no larger than `max_side` on either axis.
///
/// Larger frames are downscaled for display only; captures read the frame itself.
pub fn color_image(frame: &RgbaImage, max_side: usize) -> Result<ColorImage, TextureGenerationError> {
    let (width, height) = frame.dimensions();
    if width == 0 || height == 0 || max_side == 0 {
        return Err(TextureGenerationError::InvalidDimensions);
    }

    let longest = width.max(height) as usize;
    if longest <= max_side {
        return Ok(ColorImage::from_rgba_unmultiplied(
            [width as usize, height as usize],
            frame.as_raw(),
        ));
    }

    let scale = max_side as f64 / longest as f64;
    let fit = |side: u32| ((side as f64 * scale).round() as usize).clamp(1, max_side) as u32;
    let (fit_w, fit_h) = (fit(width), fit(height));
    log::debug!("Downscaling {}x{} frame to {}x{} for display", width, height, fit_w, fit_h);
    let scaled = imageops::resize(frame, fit_w, fit_h, FilterType::Triangle);
    Ok(ColorImage::from_rgba_unmultiplied(
        [fit_w as usize, fit_h as usize],
        scaled.as_raw(),
    ))
}

/// Manages textures for the surface and captures, keyed by content version
pub struct TextureManager {
    /// Cache of textures by (slot, version)
    texture_cache: HashMap<(TextureSlot, u64), TextureHandle>,
    /// Tracks when each texture was last used
    last_used: HashMap<(TextureSlot, u64), u64>,
    /// Current frame counter for LRU tracking
    current_frame: u64,
    /// Maximum number of textures to cache
    max_cache_size: usize,
}

impl TextureManager {
    /// Creates a new texture manager with the specified cache size
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            texture_cache: HashMap::new(),
            last_used: HashMap::new(),
            current_frame: 0,
            max_cache_size,
        }
    }

    /// Increments the frame counter, should be called at the start of each frame
    pub fn begin_frame(&mut self) {
        self.current_frame += 1;
    }

    /// Gets or creates the texture for `slot` at `version`
    pub fn get_or_create_texture<F>(
        &mut self,
        slot: TextureSlot,
        version: u64,
        generator: F,
        ctx: &Context,
    ) -> Result<TextureId, TextureGenerationError>
    where
        F: FnOnce() -> Result<ColorImage, TextureGenerationError>,
    {
        let cache_key = (slot, version);

        if let Some(handle) = self.texture_cache.get(&cache_key) {
            self.last_used.insert(cache_key, self.current_frame);
            return Ok(handle.id());
        }

        let image = generator()?;

        let name = format!("{}_v{}", slot.name(), version);
        let handle = ctx.load_texture(&name, image, TextureOptions::LINEAR);

        self.texture_cache.insert(cache_key, handle.clone());
        self.last_used.insert(cache_key, self.current_frame);

        self.prune_cache_if_needed();

        Ok(handle.id())
    }

    /// Invalidates all textures for a slot
    pub fn invalidate(&mut self, slot: TextureSlot) {
        self.texture_cache.retain(|(s, _), _| *s != slot);
        self.last_used.retain(|(s, _), _| *s != slot);
    }

    /// Prunes the cache if it exceeds the maximum size
    fn prune_cache_if_needed(&mut self) {
        if self.texture_cache.len() <= self.max_cache_size {
            return;
        }

        let mut entries: Vec<((TextureSlot, u64), u64)> = self.last_used
            .iter()
            .map(|(k, v)| (*k, *v))
            .collect();

        // Oldest first; ties broken by version so older frames go first
        entries.sort_by_key(|((_, version), frame)| (*frame, *version));

        let to_remove = entries.len() - self.max_cache_size;
        for (key, _) in entries.iter().take(to_remove) {
            self.texture_cache.remove(key);
            self.last_used.remove(key);
        }
    }

    /// Returns the number of textures currently in the cache
    pub fn cache_size(&self) -> usize {
        self.texture_cache.len()
    }

    #[cfg(test)]
    pub fn get_texture(&self, slot: TextureSlot, version: u64) -> Option<&TextureHandle> {
        self.texture_cache.get(&(slot, version))
    }
}
