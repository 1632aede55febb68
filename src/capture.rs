//! Produces still images from a frame source.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use base64::{Engine, engine::general_purpose::STANDARD};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, RgbaImage};
use uuid::Uuid;

use crate::error::CaptureError;
use crate::geometry::SelectionRect;
use crate::media::FrameSource;

/// Supported output encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 2] = [OutputFormat::Png, OutputFormat::Jpeg];

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpeg",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }

    fn image_format(&self) -> ImageFormat {
        match self {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Jpeg => ImageFormat::Jpeg,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = CaptureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpeg" => Ok(OutputFormat::Jpeg),
            _ => Err(CaptureError::UnsupportedFormat(s.to_owned())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An encoded still. Always a fresh artifact; the source is never touched.
#[derive(Clone)]
pub struct CapturedImage {
    id: Uuid,
    format: OutputFormat,
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl std::fmt::Debug for CapturedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapturedImage")
            .field("id", &self.id)
            .field("format", &self.format)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &format!("<{} bytes>", self.bytes.len()))
            .finish()
    }
}

impl CapturedImage {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// `data:image/<format>;base64,...`
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.format.mime_type(), STANDARD.encode(&self.bytes))
    }

    /// Decodes the encoded bytes back into pixels, e.g. for display.
    pub fn decode(&self) -> Result<RgbaImage, CaptureError> {
        Ok(image::load_from_memory_with_format(&self.bytes, self.format.image_format())?.to_rgba8())
    }

    /// Writes `capture-<id>.<ext>` into `dir` and returns the path.
    pub fn save_to_dir(&self, dir: impl AsRef<Path>) -> std::io::Result<PathBuf> {
        let path = dir
            .as_ref()
            .join(format!("capture-{}.{}", self.id, self.format.extension()));
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Largest output side a selection may ask for.
pub const MAX_CAPTURE_SIDE: f32 = 16384.0;

/// Captures the current frame of `source`.
///
/// `declared` is the surface size the selection was made against. An empty
/// `selection` yields the whole frame at exactly `declared` size; otherwise
/// the output is exactly the selection's size, filled from the matching
/// native pixels. Parts of the selection beyond the frame stay transparent.
pub fn capture_frame(
    source: &dyn FrameSource,
    selection: SelectionRect,
    declared: (u32, u32),
    format: OutputFormat,
) -> Result<CapturedImage, CaptureError> {
    if !selection.is_empty() && !is_capturable(&selection) {
        return Err(CaptureError::InvalidSelection(selection));
    }

    let frame = source.current_frame()?;
    let (native_w, native_h) = source.native_size();
    if frame.dimensions() != (native_w, native_h) {
        return Err(CaptureError::media(
            "InvalidStateError",
            format!(
                "frame is {}x{} but the source reports {}x{}",
                frame.width(),
                frame.height(),
                native_w,
                native_h
            ),
        ));
    }

    let pixels = if selection.is_empty() {
        full_frame(&frame, declared)
    } else {
        crop_region(&frame, selection, declared)
    };
    encode(pixels, format)
}

fn is_capturable(selection: &SelectionRect) -> bool {
    let finite = [selection.x, selection.y, selection.w, selection.h]
        .iter()
        .all(|v| v.is_finite());
    finite && (0.0..=MAX_CAPTURE_SIDE).contains(&selection.w) && (0.0..=MAX_CAPTURE_SIDE).contains(&selection.h)
}

fn full_frame(frame: &RgbaImage, (width, height): (u32, u32)) -> RgbaImage {
    if frame.dimensions() == (width, height) {
        frame.clone()
    } else {
        imageops::resize(frame, width, height, FilterType::Triangle)
    }
}

fn crop_region(frame: &RgbaImage, selection: SelectionRect, (declared_w, declared_h): (u32, u32)) -> RgbaImage {
    let out_w = (selection.w.round() as u32).max(1);
    let out_h = (selection.h.round() as u32).max(1);
    let mut out = RgbaImage::new(out_w, out_h);

    let (native_w, native_h) = frame.dimensions();
    let scale_x = native_w as f32 / declared_w.max(1) as f32;
    let scale_y = native_h as f32 / declared_h.max(1) as f32;

    // Selection edges in native pixels, then clipped to the frame.
    let x0 = selection.x * scale_x;
    let y0 = selection.y * scale_y;
    let x1 = (selection.x + selection.w) * scale_x;
    let y1 = (selection.y + selection.h) * scale_y;

    let src_x0 = x0.max(0.0).round() as u32;
    let src_y0 = y0.max(0.0).round() as u32;
    let src_x1 = (x1.round().max(0.0) as u32).min(native_w);
    let src_y1 = (y1.round().max(0.0) as u32).min(native_h);
    if src_x1 <= src_x0 || src_y1 <= src_y0 {
        return out;
    }

    // Where the clipped source lands in the output, back in surface units.
    let dst_x = ((src_x0 as f32 - x0) / scale_x).round() as u32;
    let dst_y = ((src_y0 as f32 - y0) / scale_y).round() as u32;
    let dst_w = (((src_x1 - src_x0) as f32 / scale_x).round() as u32).clamp(1, out_w.saturating_sub(dst_x).max(1));
    let dst_h = (((src_y1 - src_y0) as f32 / scale_y).round() as u32).clamp(1, out_h.saturating_sub(dst_y).max(1));

    let region = imageops::crop_imm(frame, src_x0, src_y0, src_x1 - src_x0, src_y1 - src_y0).to_image();
    let region = if region.dimensions() == (dst_w, dst_h) {
        region
    } else {
        imageops::resize(&region, dst_w, dst_h, FilterType::Triangle)
    };
    imageops::replace(&mut out, &region, dst_x as i64, dst_y as i64);
    out
}

fn encode(pixels: RgbaImage, format: OutputFormat) -> Result<CapturedImage, CaptureError> {
    let (width, height) = pixels.dimensions();
    let image = match format {
        OutputFormat::Png => DynamicImage::ImageRgba8(pixels),
        // The JPEG encoder has no alpha channel.
        OutputFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(pixels).to_rgb8()),
    };

    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), format.image_format())?;

    Ok(CapturedImage {
        id: Uuid::new_v4(),
        format,
        width,
        height,
        bytes,
    })
}
