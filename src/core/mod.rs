pub mod clock;

use std::time::Instant;

use crate::{
    config::RenderSettings,
    error::{LandscapeError, Result},
    render::{LandscapeDrawer, Surface},
    sky::ConstellationManager,
};

/// Owns the surface and its size, and drives the drawer once per tick.
///
/// The registry is borrowed for the controller's whole life; whoever builds
/// the controller owns it.
pub struct LandscapeController<'a, S: Surface> {
    width: u32,
    height: u32,
    registry: &'a ConstellationManager,
    settings: RenderSettings,
    surface: Option<S>,
    drawer: Option<LandscapeDrawer>,
    tick_count: u64,
}

impl<'a, S: Surface> LandscapeController<'a, S> {
    pub fn new(
        width: u32,
        height: u32,
        registry: &'a ConstellationManager,
        settings: RenderSettings,
    ) -> Self {
        Self {
            width,
            height,
            registry,
            settings,
            surface: None,
            drawer: None,
            tick_count: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    #[cfg(test)]
    pub fn drawer(&self) -> Option<&LandscapeDrawer> {
        self.drawer.as_ref()
    }

    pub fn drawer_mut(&mut self) -> Option<&mut LandscapeDrawer> {
        self.drawer.as_mut()
    }

    /// Takes ownership of the surface. Only one surface may ever be bound;
    /// a second call fails and leaves the first one in place.
    pub fn bind_surface(&mut self, surface: S) -> Result<()> {
        if self.surface.is_some() {
            return Err(LandscapeError::SurfaceAlreadyBound);
        }
        let mut surface = surface;
        surface.resize(self.width, self.height);

        let mut drawer = LandscapeDrawer::new(self.settings.clone());
        drawer.on_resize(self.width, self.height);

        log::info!("surface bound at {}x{}", self.width, self.height);
        self.surface = Some(surface);
        self.drawer = Some(drawer);
        Ok(())
    }

    /// Applies new dimensions and rebuilds the drawer caches before the next
    /// tick can see them.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        if let (Some(surface), Some(drawer)) = (self.surface.as_mut(), self.drawer.as_mut()) {
            surface.resize(width, height);
            drawer.on_resize(width, height);
        }
        log::debug!("resized to {width}x{height}");
    }

    /// Advances the frame counter and paints with it as the seed. Without a
    /// bound surface there is nothing to draw yet.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        if let (Some(surface), Some(drawer)) = (self.surface.as_mut(), self.drawer.as_mut()) {
            drawer.draw(surface, self.registry, self.tick_count);
        }
    }

    pub fn sample_fps(&mut self, now: Instant) -> Option<f32> {
        let fps = self.drawer.as_mut()?.sample_fps(now)?;
        log::trace!("fps {fps:.1}");
        Some(fps)
    }
}
