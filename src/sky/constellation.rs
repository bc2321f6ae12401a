use serde::{Deserialize, Serialize};

use crate::{config, types::Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StarSize {
    Small,
    Medium,
    Large,
}

impl StarSize {
    pub fn radius(self) -> f32 {
        match self {
            StarSize::Small => config::SMALL_STAR_RADIUS,
            StarSize::Medium => config::MEDIUM_STAR_RADIUS,
            StarSize::Large => config::LARGE_STAR_RADIUS,
        }
    }

    pub fn glow_radius(self) -> f32 {
        match self {
            StarSize::Small => config::SMALL_STAR_GLOW,
            StarSize::Medium => config::MEDIUM_STAR_GLOW,
            StarSize::Large => config::LARGE_STAR_GLOW,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstellationStar {
    pub size: StarSize,
    pub relative_position: Vec2,
}

impl ConstellationStar {
    pub fn new(size: StarSize, relative_position: Vec2) -> Self {
        Self {
            size,
            relative_position,
        }
    }
}

/// A link between two stars of the same constellation, stored as indices
/// into its star list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConstellationLine {
    pub start: usize,
    pub end: usize,
}

/// Raw connectivity as authored: a pair of star indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub star_index: usize,
    pub other_star_index: usize,
}

impl Connection {
    pub fn new(star_index: usize, other_star_index: usize) -> Self {
        Self {
            star_index,
            other_star_index,
        }
    }
}

/// Which star indices are drawn small or large. Everything else is medium.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeClassification {
    #[serde(default)]
    pub smalls: Vec<usize>,
    #[serde(default)]
    pub larges: Vec<usize>,
}

impl SizeClassification {
    pub fn size_of(&self, index: usize) -> StarSize {
        if self.smalls.contains(&index) {
            StarSize::Small
        } else if self.larges.contains(&index) {
            StarSize::Large
        } else {
            StarSize::Medium
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Constellation {
    name: String,
    stars: Vec<ConstellationStar>,
    lines: Vec<ConstellationLine>,
    width: f32,
    height: f32,
}

impl Constellation {
    /// Builds the constellation and its lines. Connections that reference a
    /// star index outside `stars` are skipped.
    pub fn new(
        name: impl Into<String>,
        stars: Vec<ConstellationStar>,
        connections: &[Connection],
    ) -> Self {
        let name = name.into();
        let mut lines = Vec::with_capacity(connections.len());
        for connection in connections {
            if connection.star_index >= stars.len() || connection.other_star_index >= stars.len() {
                log::debug!(
                    "{name}: dropping connection {} -> {} ({} stars)",
                    connection.star_index,
                    connection.other_star_index,
                    stars.len()
                );
                continue;
            }
            lines.push(ConstellationLine {
                start: connection.star_index,
                end: connection.other_star_index,
            });
        }

        let width = stars
            .iter()
            .fold(0.0_f32, |max, star| max.max(star.relative_position.x));
        let height = stars
            .iter()
            .fold(0.0_f32, |max, star| max.max(star.relative_position.y));

        Self {
            name,
            stars,
            lines,
            width,
            height,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stars(&self) -> &[ConstellationStar] {
        &self.stars
    }

    pub fn lines(&self) -> &[ConstellationLine] {
        &self.lines
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Both endpoints of `line`. Lines only ever hold in-range indices.
    pub fn endpoints(&self, line: ConstellationLine) -> (&ConstellationStar, &ConstellationStar) {
        (&self.stars[line.start], &self.stars[line.end])
    }
}

pub fn from_positions_array(
    name: impl Into<String>,
    positions: &[Vec2],
    connections: &[Connection],
    sizes: &SizeClassification,
) -> Constellation {
    let stars = positions
        .iter()
        .enumerate()
        .map(|(i, pos)| ConstellationStar::new(sizes.size_of(i), *pos))
        .collect();
    Constellation::new(name, stars, connections)
}
