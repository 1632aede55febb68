use std::path::PathBuf;

use egui::{Context, LayerId, Rect, TextureId};

use crate::capture::CapturedImage;
use crate::config::CameraConfig;
use crate::geometry::{LayoutNode, ScrollOffset};
use crate::input::InputHandler;
use crate::media::{FrameSource, StillFrameSource, TestPatternSource};
use crate::panels;
use crate::renderer::Renderer;
use crate::session::CaptureSession;
use crate::texture_manager::{TextureManager, TextureSlot, color_image};

const TEXTURE_CACHE_SIZE: usize = 4;

pub struct CameraApp {
    session: CaptureSession,
    input: InputHandler,
    source: Box<dyn FrameSource>,
    textures: TextureManager,
    renderer: Renderer,
    last_capture: Option<CapturedImage>,
    status: Option<String>,
    save_dir: PathBuf,
}

impl CameraApp {
    /// Called once before the first frame.
    ///
    /// An explicit `config` wins over the one persisted by eframe. Without a
    /// readable `source_path` the app shows a test pattern.
    pub fn new(cc: &eframe::CreationContext<'_>, config: Option<CameraConfig>, source_path: Option<PathBuf>) -> Self {
        let config = config
            .or_else(|| cc.storage.and_then(|storage| eframe::get_value(storage, eframe::APP_KEY)))
            .unwrap_or_default();

        let mut status = None;
        let source: Box<dyn FrameSource> = match source_path.map(StillFrameSource::open) {
            Some(Ok(still)) => Box::new(still),
            Some(Err(err)) => {
                log::error!("{}", err);
                status = Some(err.to_string());
                Box::new(TestPatternSource::new(config.width, config.height))
            }
            None => Box::new(TestPatternSource::new(config.width, config.height)),
        };

        let mut app = Self::with_source(config, source);
        app.status = status;
        app
    }

    pub fn with_source(config: CameraConfig, source: Box<dyn FrameSource>) -> Self {
        Self {
            session: CaptureSession::new(config),
            input: InputHandler::new(),
            source,
            textures: TextureManager::new(TEXTURE_CACHE_SIZE),
            renderer: Renderer::new(),
            last_capture: None,
            status: None,
            save_dir: std::env::current_dir().unwrap_or_default(),
        }
    }

    pub fn session(&self) -> &CaptureSession {
        &self.session
    }

    pub fn config(&self) -> &CameraConfig {
        self.session.config()
    }

    pub fn set_config(&mut self, config: CameraConfig) {
        log::info!("Config changed: {:?}", config);
        self.session.set_config(config);
    }

    /// Native pixel size of the frames behind the surface
    pub fn source_size(&self) -> (u32, u32) {
        self.source.native_size()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn last_capture(&self) -> Option<&CapturedImage> {
        self.last_capture.as_ref()
    }

    pub fn dismiss_capture(&mut self) {
        self.last_capture = None;
        self.textures.invalidate(TextureSlot::Capture);
    }

    /// Paints the surface and, on top of it, the selection overlay
    pub fn paint_surface(&mut self, painter: &egui::Painter, surface_rect: Rect, texture: Option<TextureId>) {
        self.renderer.render_surface(painter, surface_rect, texture);
        self.renderer.render_overlay(painter, surface_rect, self.session.overlay());
    }

    pub fn set_controls_rect(&mut self, rect: Rect) {
        self.input.set_controls_rect(rect);
    }

    /// Records where the surface was laid out this frame, for next frame's input.
    pub fn set_surface_layout(&mut self, layout: LayoutNode, scroll: ScrollOffset) {
        self.session.set_layout(layout);
        self.session.set_scroll(scroll);
    }

    /// The on-screen region, and the layer, where presses count as landing on the surface.
    pub fn set_surface_hit_area(&mut self, visible_rect: Rect, layer: LayerId) {
        self.input.set_surface_rect(visible_rect, layer);
    }

    /// Feeds this frame's pointer events to the session
    pub fn handle_input(&mut self, ctx: &Context) {
        let events = self.input.process_input(ctx);
        self.session.handle_events(&events);
    }

    pub fn take(&mut self) {
        match self.session.take(self.source.as_ref()) {
            Ok(image) => {
                self.textures.invalidate(TextureSlot::Capture);
                self.last_capture = Some(image);
                self.status = None;
            }
            Err(err) => {
                self.status = Some(err.to_string());
            }
        }
    }

    pub fn save_capture(&mut self) {
        let Some(capture) = &self.last_capture else {
            return;
        };
        match capture.save_to_dir(&self.save_dir) {
            Ok(path) => {
                log::info!("Saved capture to {}", path.display());
                self.status = Some(format!("Saved {}", path.display()));
            }
            Err(err) => {
                log::error!("Failed to save capture: {}", err);
                self.status = Some(format!("Failed to save capture: {err}"));
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.session.clear_selection();
    }

    pub fn flash_selection(&mut self) {
        self.session.flash();
    }

    pub fn surface_texture(&mut self, ctx: &Context) -> Option<TextureId> {
        let source = &self.source;
        let max_side = ctx.input(|i| i.max_texture_side);
        let result = self.textures.get_or_create_texture(
            TextureSlot::Surface,
            source.version(),
            || {
                let frame = source.current_frame()?;
                color_image(&frame, max_side)
            },
            ctx,
        );
        result.inspect_err(|err| log::debug!("No surface texture: {}", err)).ok()
    }

    pub fn capture_texture(&mut self, ctx: &Context) -> Option<TextureId> {
        let capture = self.last_capture.as_ref()?;
        let max_side = ctx.input(|i| i.max_texture_side);
        let result = self.textures.get_or_create_texture(
            TextureSlot::Capture,
            capture.id().as_u64_pair().0,
            || {
                let pixels = capture.decode()?;
                color_image(&pixels, max_side)
            },
            ctx,
        );
        result.inspect_err(|err| log::warn!("Cannot display capture: {}", err)).ok()
    }
}

impl eframe::App for CameraApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self.session.config());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.source.advance();
        self.textures.begin_frame();

        panels::controls_panel(self, ctx);
        panels::surface_panel(self, ctx);
        panels::capture_window(self, ctx);

        // The surface is live video.
        ctx.request_repaint();
    }
}
