use std::collections::HashMap;

use rand::Rng;

use crate::{
    error::{LandscapeError, Result},
    sky::{
        catalog::{Catalog, ConstellationId},
        constellation::Constellation,
    },
    types::Vec2,
};

/// Where a constellation is drawn and how large.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub origin: Vec2,
    pub size_multiplier: f32,
}

impl Placement {
    pub fn new(x: f32, y: f32, size_multiplier: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size_multiplier,
        }
    }

    /// Absolute pixel position of a point given in constellation-local units.
    pub fn project(&self, relative: Vec2) -> Vec2 {
        self.origin + relative * self.size_multiplier
    }
}

/// Placed constellations, iterated in the order they were first added.
#[derive(Debug)]
pub struct ConstellationManager {
    catalog: Catalog,
    order: Vec<ConstellationId>,
    placements: HashMap<ConstellationId, Placement>,
}

impl ConstellationManager {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            order: Vec::new(),
            placements: HashMap::new(),
        }
    }

    #[cfg(test)]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Places `id`, replacing any earlier placement of the same constellation.
    pub fn add_constellation(&mut self, id: ConstellationId, x: f32, y: f32, size_multiplier: f32) {
        let placement = Placement::new(x, y, size_multiplier);
        if self.placements.insert(id, placement).is_none() {
            self.order.push(id);
        }
        log::info!(
            "placed constellation #{} at ({x}, {y}) x{size_multiplier}",
            id.index()
        );
    }

    pub fn place_by_name(
        &mut self,
        name: &str,
        x: f32,
        y: f32,
        size_multiplier: f32,
    ) -> Result<ConstellationId> {
        let id = self
            .catalog
            .id_of(name)
            .ok_or_else(|| LandscapeError::UnknownConstellation(name.to_string()))?;
        self.add_constellation(id, x, y, size_multiplier);
        Ok(id)
    }

    /// Places every catalog entry at a random origin that keeps a
    /// `size`-pixel box inside `width x height` where possible.
    pub fn scatter<R: Rng + ?Sized>(&mut self, width: u32, height: u32, size: f32, rng: &mut R) {
        let ids: Vec<ConstellationId> = self.catalog.ids().collect();
        let span_x = (width as f32 - size).max(0.0);
        let span_y = (height as f32 - size).max(0.0);
        for id in ids {
            let x = (rng.gen_range(0.0..1.0_f32) * span_x).round();
            let y = (rng.gen_range(0.0..1.0_f32) * span_y).round();
            self.add_constellation(id, x, y, size);
        }
    }

    #[cfg(test)]
    pub fn placement(&self, id: ConstellationId) -> Option<Placement> {
        self.placements.get(&id).copied()
    }

    /// Every placed constellation with its placement, in insertion order.
    pub fn placed(&self) -> impl Iterator<Item = (&Constellation, Placement)> + '_ {
        self.order.iter().filter_map(|id| {
            let constellation = self.catalog.get(*id)?;
            let placement = self.placements.get(id)?;
            Some((constellation, *placement))
        })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
