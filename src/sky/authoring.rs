//! The JSON format produced when constellations are digitized from a
//! reference image, and the definition files read at startup.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    error::{LandscapeError, Result},
    sky::constellation::{Connection, Constellation, SizeClassification, from_positions_array},
    types::Vec2,
};

/// Scales raw click coordinates into `[0, 1]`.
///
/// Both axes share a single min/max taken over every coordinate, so the
/// aspect ratio of the recorded shape survives but the shorter axis does not
/// span the full unit range.
pub fn normalize_points(raw: &[Vec2]) -> Vec<Vec2> {
    if raw.is_empty() {
        return Vec::new();
    }
    let (min, max) = raw.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| {
        (lo.min(p.x).min(p.y), hi.max(p.x).max(p.y))
    });
    let span = max - min;
    if span <= 0.0 {
        return vec![Vec2::ZERO; raw.len()];
    }
    raw.iter()
        .map(|p| Vec2::new((p.x - min) / span, (p.y - min) / span))
        .collect()
}

pub fn positions_from_json(json: &str) -> Result<Vec<Vec2>> {
    Ok(serde_json::from_str(json)?)
}

pub fn positions_to_json(points: &[Vec2]) -> Result<String> {
    Ok(serde_json::to_string(points)?)
}

/// A constellation as written in a definition file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstellationDefinition {
    pub name: String,
    pub stars: Vec<Vec2>,
    #[serde(default)]
    pub lines: Vec<Connection>,
    #[serde(default)]
    pub sizes: SizeClassification,
}

impl ConstellationDefinition {
    pub fn into_constellation(self) -> Constellation {
        from_positions_array(self.name, &self.stars, &self.lines, &self.sizes)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DefinitionFile {
    Many(Vec<ConstellationDefinition>),
    One(ConstellationDefinition),
}

/// Accepts either a single definition object or an array of them.
pub fn definitions_from_json(json: &str) -> Result<Vec<ConstellationDefinition>> {
    Ok(match serde_json::from_str(json)? {
        DefinitionFile::Many(all) => all,
        DefinitionFile::One(one) => vec![one],
    })
}

pub fn load_definitions(path: &Path) -> Result<Vec<ConstellationDefinition>> {
    let json = read_file(path)?;
    let definitions = definitions_from_json(&json)?;
    log::info!(
        "loaded {} constellation definition(s) from {}",
        definitions.len(),
        path.display()
    );
    Ok(definitions)
}

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| LandscapeError::Io {
        path: path.to_path_buf(),
        source,
    })
}
