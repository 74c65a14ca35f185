#![forbid(unsafe_code)]

//! Display surface manager.
//!
//! Owns the native window, the rendering context, and the presentable
//! surface, tracking each resource with its own created flag so teardown is
//! safe on every path (fatal-error exit, partial open failure, normal
//! close) and releases them in fixed order: surface, context, display
//! connection.

use std::fmt;

use padframe_core::flags::WindowFlags;
use padframe_core::framebuffer::Framebuffer;
use padframe_core::geometry::{Point, Size, Viewport, calc_scale, enforce_scale, letterbox};
use padframe_core::lifecycle::LifecycleState;
use padframe_core::platform::{ConfigAttribs, Gpu};

/// Backing dimensions of the native window. Fixed at the largest output
/// mode; display-mode changes adjust the crop, not the backing store.
pub const BACKING_SIZE: Size = Size::new(1920, 1080);

/// Surface configuration or creation failure. Always fatal: `Window::open`
/// routes these through the fatal-error reporter.
#[derive(Debug)]
pub enum SurfaceError {
    /// No native window was available.
    WindowUnavailable(String),
    /// The display connection could not be initialized.
    DisplayInit(String),
    /// The driver offered no framebuffer configuration at all.
    NoConfig,
    /// The window surface could not be created.
    SurfaceCreation(String),
    /// The rendering context could not be created.
    ContextCreation(String),
    /// Binding the surface and context current failed.
    BindFailed(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WindowUnavailable(detail) => write!(f, "no native window: {detail}"),
            Self::DisplayInit(detail) => write!(f, "display initialization failed: {detail}"),
            Self::NoConfig => write!(f, "no acceptable framebuffer configuration"),
            Self::SurfaceCreation(detail) => write!(f, "surface creation failed: {detail}"),
            Self::ContextCreation(detail) => write!(f, "context creation failed: {detail}"),
            Self::BindFailed(detail) => write!(f, "could not bind surface: {detail}"),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// Manager for the display surface and its logical-to-physical viewport.
#[derive(Debug)]
pub struct SurfaceManager {
    window_acquired: bool,
    display_ready: bool,
    config: Option<usize>,
    surface_created: bool,
    context_created: bool,
    viewport: Viewport,
    torn_down: bool,
}

impl SurfaceManager {
    /// Create the native window, display connection, surface, and context,
    /// and bind them current.
    ///
    /// On failure every resource created so far is released before the
    /// error is returned.
    pub fn open<G: Gpu>(
        gpu: &mut G,
        logical: Size,
        screen: Size,
        flags: WindowFlags,
    ) -> Result<Self, SurfaceError> {
        let mut manager = Self {
            window_acquired: false,
            display_ready: false,
            config: None,
            surface_created: false,
            context_created: false,
            viewport: Viewport::default(),
            torn_down: false,
        };
        match manager.setup(gpu, logical, screen, flags) {
            Ok(()) => Ok(manager),
            Err(err) => {
                tracing::error!(%err, "surface open failed; rolling back");
                manager.close(gpu);
                Err(err)
            }
        }
    }

    fn setup<G: Gpu>(
        &mut self,
        gpu: &mut G,
        logical: Size,
        screen: Size,
        flags: WindowFlags,
    ) -> Result<(), SurfaceError> {
        gpu.acquire_window()
            .map_err(|e| SurfaceError::WindowUnavailable(e.to_string()))?;
        self.window_acquired = true;
        gpu.set_window_dimensions(BACKING_SIZE);

        // The display connection is initialized at most once per manager;
        // reopening reuses it.
        if !self.display_ready {
            gpu.initialize_display()
                .map_err(|e| SurfaceError::DisplayInit(e.to_string()))?;
            self.display_ready = true;

            let configs = gpu
                .choose_configs()
                .map_err(|e| SurfaceError::DisplayInit(e.to_string()))?;
            self.config = Some(Self::pick_config(&configs).ok_or(SurfaceError::NoConfig)?);
        }
        let config = self.config.ok_or(SurfaceError::NoConfig)?;

        gpu.create_window_surface(config)
            .map_err(|e| SurfaceError::SurfaceCreation(e.to_string()))?;
        self.surface_created = true;

        gpu.create_context(config)
            .map_err(|e| SurfaceError::ContextCreation(e.to_string()))?;
        self.context_created = true;

        gpu.make_current()
            .map_err(|e| SurfaceError::BindFailed(e.to_string()))?;

        let scale = Self::initial_scale(logical, screen, flags);
        // AUTO windows track the screen and are never letterboxed.
        let position = if flags.contains(WindowFlags::AUTO) {
            Point::new(0, 0)
        } else {
            letterbox(logical, scale, screen)
        };
        self.viewport = Viewport::new(scale, position);
        tracing::debug!(scale, "surface ready");
        Ok(())
    }

    /// First exact 8-bit-RGB/zero-depth match wins; otherwise the first
    /// available configuration.
    fn pick_config(configs: &[ConfigAttribs]) -> Option<usize> {
        configs
            .iter()
            .position(|c| {
                c.red_bits == 8 && c.green_bits == 8 && c.blue_bits == 8 && c.depth_bits == 0
            })
            .or(if configs.is_empty() { None } else { Some(0) })
    }

    fn initial_scale(logical: Size, screen: Size, flags: WindowFlags) -> i32 {
        let scale = if flags.contains(WindowFlags::AUTO) {
            // AUTO tracks the screen at 1:1 pixels.
            1
        } else {
            calc_scale(logical, screen)
        };
        enforce_scale(scale, flags)
    }

    /// Apply a pending resize raised by the lifecycle monitor: re-crop the
    /// native window to the new physical dimensions. No-op (and idempotent)
    /// when nothing is pending.
    pub fn apply_pending_resize<G: Gpu>(&mut self, gpu: &mut G, state: &mut LifecycleState) {
        if !state.needs_resize() {
            return;
        }
        let screen = state.screen();
        tracing::debug!(
            width = screen.width,
            height = screen.height,
            "applying pending resize"
        );
        gpu.set_window_crop(screen);
        state.acknowledge_resize();
    }

    /// Re-derive the scale for the logical buffer (same rule as open).
    pub fn recompute_scale(&mut self, logical: Size, screen: Size, flags: WindowFlags) {
        self.viewport.scale = Self::initial_scale(logical, screen, flags);
    }

    /// Pin the scale directly (AUTO windows).
    pub fn set_scale(&mut self, scale: i32) {
        self.viewport.scale = scale;
    }

    /// Recompute the centering offset for the current scale.
    pub fn reposition(&mut self, logical: Size, screen: Size) {
        self.viewport.position = letterbox(logical, self.viewport.scale, screen);
    }

    /// The active logical-to-physical mapping.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Present the client framebuffer: bind, blit, swap, unbind.
    pub fn present<G: Gpu>(&mut self, gpu: &mut G, frame: &Framebuffer, target: Size) {
        if let Err(err) = gpu.make_current() {
            tracing::warn!(%err, "present skipped: could not bind surface");
            return;
        }
        gpu.present(frame, self.viewport, target);
        gpu.swap_buffers();
        gpu.release_current();
    }

    /// Release all owned resources in fixed order: surface, context,
    /// display connection. Safe to call at most once and from a fatal path
    /// with partially created resources; repeat calls are no-ops.
    pub fn close<G: Gpu>(&mut self, gpu: &mut G) {
        if self.torn_down {
            return;
        }
        tracing::debug!("tearing down surface");
        gpu.release_current();
        if self.surface_created {
            gpu.destroy_surface();
            self.surface_created = false;
        }
        if self.context_created {
            gpu.destroy_context();
            self.context_created = false;
        }
        if self.display_ready {
            gpu.terminate_display();
            self.display_ready = false;
        }
        self.window_acquired = false;
        self.config = None;
        self.torn_down = true;
    }
}
