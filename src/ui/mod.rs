use std::{
    error::Error,
    io,
    path::Path,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event as CrosstermEvent, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::{
    config::{self, RenderSettings},
    core::{LandscapeController, clock::FixedRateTimer},
    error::{LandscapeError, Result},
    render::PixmapSurface,
    sky::ConstellationManager,
    types::Rgba,
};

/// Options for the interactive terminal view.
pub struct RunOptions {
    pub tick_hz: f32,
    pub supersample: u32,
    pub size_multiplier: f32,
}

type SkyController<'a> = LandscapeController<'a, PixmapSurface>;

/// Raster size backing a terminal of `cols x rows` cells. Each cell shows two
/// square blocks of `scale` pixels stacked vertically.
pub fn pixel_size(cols: u16, rows: u16, scale: u32) -> (u32, u32) {
    (cols as u32 * scale, rows as u32 * 2 * scale)
}

pub fn run(
    mut registry: ConstellationManager,
    settings: RenderSettings,
    options: &RunOptions,
    rng: &mut impl rand::Rng,
) -> std::result::Result<(), Box<dyn Error>> {
    let (cols, rows) = terminal::size()?;
    let (width, height) = pixel_size(cols, rows, options.supersample);
    registry.scatter(width, height, options.size_multiplier, rng);
    log::info!("{} constellations placed on {width}x{height}", registry.len());

    let mut controller = SkyController::new(width, height, &registry, settings);
    controller.bind_surface(PixmapSurface::new(width, height))?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = event_loop(&mut terminal, &mut controller, options);

    shutdown_terminal(&mut terminal)?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: &mut SkyController<'_>,
    options: &RunOptions,
) -> std::result::Result<(), Box<dyn Error>> {
    let now = Instant::now();
    let mut frames = FixedRateTimer::from_hz(options.tick_hz, now);
    let mut present = FixedRateTimer::from_hz(config::PRESENT_HZ, now);
    let mut fps_sampler =
        FixedRateTimer::new(Duration::from_secs_f32(config::FPS_SAMPLE_SECS), now);
    let cancel = frames.cancel_handle();

    while !cancel.is_cancelled() {
        let now = Instant::now();
        let timeout = frames
            .time_until_next(now)
            .min(present.time_until_next(now));

        // Input and resizes are applied before the next tick observes them.
        if event::poll(timeout)? {
            loop {
                match event::read()? {
                    CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                        let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL)
                            && key.code == KeyCode::Char('c');
                        match key.code {
                            KeyCode::Char('q') | KeyCode::Esc => cancel.cancel(),
                            _ if ctrl_c => cancel.cancel(),
                            KeyCode::Char('d') => {
                                if let Some(drawer) = controller.drawer_mut() {
                                    drawer.toggle_debug();
                                }
                            }
                            _ => {}
                        }
                    }
                    CrosstermEvent::Resize(cols, rows) => {
                        let (width, height) = pixel_size(cols, rows, options.supersample);
                        if (width, height) != (controller.width(), controller.height()) {
                            controller.resize(width, height);
                        }
                    }
                    _ => {}
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        let now = Instant::now();
        if fps_sampler.poll(now) {
            controller.sample_fps(now);
        }
        if frames.poll(now) {
            controller.tick();
        }
        if present.poll(now) {
            terminal.draw(|frame| {
                if let Some(surface) = controller.surface() {
                    frame.render_widget(SkyView::new(surface, options.supersample), frame.size());
                }
            })?;
        }
    }
    Ok(())
}

fn shutdown_terminal(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> std::result::Result<(), Box<dyn Error>> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Renders `frames` ticks without a terminal and writes the last one as PNG.
pub fn export(
    registry: &ConstellationManager,
    settings: RenderSettings,
    width: u32,
    height: u32,
    frames: u64,
    path: &Path,
) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(LandscapeError::EmptySurface);
    }
    let mut controller = LandscapeController::new(width, height, registry, settings);
    controller.bind_surface(PixmapSurface::new(width, height))?;
    for _ in 0..frames.max(1) {
        controller.tick();
    }
    let surface = controller.surface().ok_or(LandscapeError::EmptySurface)?;
    surface.save_png(path)?;
    log::info!(
        "wrote frame {} ({width}x{height}) to {}",
        controller.tick_count(),
        path.display()
    );
    Ok(())
}

/// Shows a [`PixmapSurface`] with upper-half-block cells. Each half-cell
/// takes the brightest pixel of its block so single stars survive the
/// downscale.
pub struct SkyView<'a> {
    surface: &'a PixmapSurface,
    scale: u32,
}

impl<'a> SkyView<'a> {
    pub fn new(surface: &'a PixmapSurface, scale: u32) -> Self {
        Self {
            surface,
            scale: scale.max(1),
        }
    }

    fn block(&self, col: u32, half_row: u32) -> Rgba {
        let (x0, y0) = (col * self.scale, half_row * self.scale);
        let mut best = Rgba::rgb(0, 0, 0);
        for y in y0..y0 + self.scale {
            for x in x0..x0 + self.scale {
                if let Some(pixel) = self.surface.pixel(x, y) {
                    if pixel.luminance() > best.luminance() {
                        best = pixel;
                    }
                }
            }
        }
        best
    }
}

impl Widget for SkyView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        for row in 0..area.height {
            for col in 0..area.width {
                let top = self.block(col as u32, row as u32 * 2);
                let bottom = self.block(col as u32, row as u32 * 2 + 1);
                buf.get_mut(area.x + col, area.y + row)
                    .set_char('▀')
                    .set_fg(color_for(top))
                    .set_bg(color_for(bottom));
            }
        }

        for label in self.surface.labels() {
            let col = (label.at.x / self.scale as f32) as u16;
            let row = (label.at.y / (2 * self.scale) as f32) as u16;
            if col >= area.width || row >= area.height {
                continue;
            }
            buf.set_string(
                area.x + col,
                area.y + row,
                &label.text,
                Style::default().fg(color_for(label.color)),
            );
        }
    }
}

fn color_for(color: Rgba) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        render::{Fill, Rect as SkyRect, Surface},
        sky::Catalog,
        types::Vec2,
    };

    mod pixel_size_fn {
        use super::*;

        #[test]
        fn doubles_rows() {
            assert_eq!(pixel_size(80, 24, 4), (320, 192));
        }

        #[test]
        fn zero_terminal_is_zero_raster() {
            assert_eq!(pixel_size(0, 0, 4), (0, 0));
        }
    }

    mod sky_view {
        use super::*;

        #[test]
        fn half_blocks_carry_both_colours() {
            let mut surface = PixmapSurface::new(2, 4);
            surface.fill_rect(SkyRect::new(0.0, 0.0, 2.0, 2.0), &Fill::Solid(Rgba::rgb(200, 0, 0)));
            surface.fill_rect(SkyRect::new(0.0, 2.0, 2.0, 2.0), &Fill::Solid(Rgba::rgb(0, 0, 200)));
            let area = Rect::new(0, 0, 1, 1);
            let mut buf = Buffer::empty(area);
            SkyView::new(&surface, 2).render(area, &mut buf);
            let cell = buf.get(0, 0);
            assert_eq!(cell.symbol(), "▀");
            assert_eq!(cell.fg, Color::Rgb(200, 0, 0));
            assert_eq!(cell.bg, Color::Rgb(0, 0, 200));
        }

        #[test]
        fn brightest_pixel_wins() {
            let mut surface = PixmapSurface::new(4, 8);
            surface.fill_rect(SkyRect::new(0.0, 0.0, 4.0, 8.0), &Fill::Solid(Rgba::rgb(0, 0, 40)));
            surface.fill_rect(SkyRect::new(3.0, 1.0, 1.0, 1.0), &Fill::Solid(Rgba::WHITE));
            let area = Rect::new(0, 0, 1, 1);
            let mut buf = Buffer::empty(area);
            SkyView::new(&surface, 4).render(area, &mut buf);
            assert_eq!(buf.get(0, 0).fg, Color::Rgb(255, 255, 255));
            assert_eq!(buf.get(0, 0).bg, Color::Rgb(0, 0, 40));
        }

        #[test]
        fn labels_are_printed() {
            let mut surface = PixmapSurface::new(40, 8);
            surface.fill_text("FPS: 60", Vec2::new(4.0, 0.0), Rgba::WHITE);
            let area = Rect::new(0, 0, 10, 1);
            let mut buf = Buffer::empty(area);
            SkyView::new(&surface, 4).render(area, &mut buf);
            assert_eq!(buf.get(1, 0).symbol(), "F");
            assert_eq!(buf.get(7, 0).symbol(), "0");
        }

        #[test]
        fn empty_area_is_ignored() {
            let surface = PixmapSurface::new(0, 0);
            let area = Rect::new(0, 0, 0, 0);
            let mut buf = Buffer::empty(area);
            SkyView::new(&surface, 4).render(area, &mut buf);
        }
    }

    mod export_fn {
        use super::*;

        #[test]
        fn writes_png() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("sky.png");
            let mut registry = ConstellationManager::new(Catalog::builtin());
            registry.place_by_name("Mora", 20.0, 20.0, 100.0).unwrap();

            export(&registry, RenderSettings::default(), 160, 120, 3, &path).unwrap();

            let bytes = std::fs::read(&path).unwrap();
            assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        }

        #[test]
        fn rejects_zero_size() {
            let dir = tempfile::tempdir().unwrap();
            let registry = ConstellationManager::new(Catalog::builtin());
            let err = export(
                &registry,
                RenderSettings::default(),
                0,
                120,
                1,
                &dir.path().join("none.png"),
            )
            .unwrap_err();
            assert!(matches!(err, LandscapeError::EmptySurface));
        }

        #[test]
        fn exported_frame_shows_sky_and_constellation() {
            let registry = {
                let mut r = ConstellationManager::new(Catalog::builtin());
                r.place_by_name("Mora", 20.0, 20.0, 100.0).unwrap();
                r
            };
            let settings = RenderSettings {
                star_density: 0.0,
                ..RenderSettings::default()
            };
            let mut controller = LandscapeController::new(160, 120, &registry, settings);
            controller.bind_surface(PixmapSurface::new(1, 1)).unwrap();
            controller.tick();
            let surface = controller.surface().unwrap();

            // Mora's first star is large, at (0.32, 0.31) * 100 + 20.
            let star = surface.pixel(52, 50).unwrap();
            assert!(star.luminance() > 200.0);
            let sky = surface.pixel(150, 110).unwrap();
            assert_eq!(sky.a, 255);
            assert!(sky.luminance() < 60.0);
            assert_eq!((surface.width(), surface.height()), (160, 120));
        }
    }
}
