use crate::{
    render::surface::{DrawStyle, Fill, LinearGradient, Rect, Surface},
    types::{Rgba, Vec2},
};

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Resize(u32, u32),
    Clear,
    FillRect(Rect, Fill),
    StrokeLine {
        from: Vec2,
        to: Vec2,
        gradient: LinearGradient,
    },
    Circle {
        center: Vec2,
        radius: f32,
        style: DrawStyle,
    },
    Square {
        center: Vec2,
        half_extent: f32,
        style: DrawStyle,
    },
    Text(String),
}

/// Test double that remembers every call instead of rasterizing.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<Command>,
    pub id: u32,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: u32) -> Self {
        self.id = id;
        self
    }

    pub fn lines(&self) -> Vec<&Command> {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::StrokeLine { .. }))
            .collect()
    }

    pub fn stars(&self) -> Vec<&Command> {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::Circle { .. } | Command::Square { .. }))
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.commands.push(Command::Resize(width, height));
    }

    fn clear(&mut self) {
        self.commands.push(Command::Clear);
    }

    fn fill_rect(&mut self, rect: Rect, fill: &Fill) {
        self.commands.push(Command::FillRect(rect, fill.clone()));
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, _width: f32, gradient: &LinearGradient) {
        self.commands.push(Command::StrokeLine {
            from,
            to,
            gradient: gradient.clone(),
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, style: &DrawStyle) {
        self.commands.push(Command::Circle {
            center,
            radius,
            style: *style,
        });
    }

    fn fill_square(&mut self, center: Vec2, half_extent: f32, style: &DrawStyle) {
        self.commands.push(Command::Square {
            center,
            half_extent,
            style: *style,
        });
    }

    fn fill_text(&mut self, text: &str, _at: Vec2, _color: Rgba) {
        self.commands.push(Command::Text(text.to_string()));
    }
}
