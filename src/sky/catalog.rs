use std::collections::HashMap;

use crate::{
    sky::constellation::{Connection, Constellation, SizeClassification, from_positions_array},
    types::Vec2,
};

/// Stable handle to a catalog entry, assigned on first insertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstellationId(usize);

impl ConstellationId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Named constellation definitions addressed by handle.
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<Constellation>,
    by_name: HashMap<String, ConstellationId>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The hard-coded constellations shipped with the binary.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.insert(mora());
        catalog
    }

    /// Adds a definition. A definition with an already known name replaces
    /// the old one and keeps its handle.
    pub fn insert(&mut self, constellation: Constellation) -> ConstellationId {
        if let Some(&id) = self.by_name.get(constellation.name()) {
            self.entries[id.0] = constellation;
            return id;
        }
        let id = ConstellationId(self.entries.len());
        self.by_name.insert(constellation.name().to_string(), id);
        self.entries.push(constellation);
        id
    }

    pub fn get(&self, id: ConstellationId) -> Option<&Constellation> {
        self.entries.get(id.0)
    }

    pub fn id_of(&self, name: &str) -> Option<ConstellationId> {
        self.by_name.get(name).copied()
    }

    pub fn ids(&self) -> impl Iterator<Item = ConstellationId> + '_ {
        (0..self.entries.len()).map(ConstellationId)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const MORA_STARS: [(f32, f32); 16] = [
    (0.320_537_43, 0.308_061_42),
    (0.456_813_82, 0.311_900_2),
    (0.466_410_75, 0.248_560_46),
    (0.450_095_97, 0.189_059_5),
    (0.405_950_1, 0.145_873_32),
    (0.577_735_1, 0.050_863_72),
    (0.788_867_56, 0.025_911_708),
    (1.0, 0.260_076_77),
    (0.738_003_84, 0.454_894_43),
    (0.523_992_3, 0.596_928_98),
    (0.352_207_3, 0.478_886_76),
    (0.203_454_9, 0.352_207_3),
    (0.104_606_53, 0.348_368_52),
    (0.004_798_464, 0.426_103_65),
    (0.0, 0.238_963_53),
    (0.567_178_5, 0.254_318_62),
];

const MORA_LINES: [(usize, usize); 15] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 8),
    (8, 9),
    (9, 10),
    (10, 0),
    (0, 11),
    (11, 12),
    (12, 13),
    (12, 14),
];

fn mora() -> Constellation {
    let positions: Vec<Vec2> = MORA_STARS.iter().map(|&(x, y)| Vec2::new(x, y)).collect();
    let lines: Vec<Connection> = MORA_LINES
        .iter()
        .map(|&(a, b)| Connection::new(a, b))
        .collect();
    let sizes = SizeClassification {
        smalls: vec![2, 3, 9, 10, 11],
        larges: vec![0, 7, 15],
    };
    from_positions_array("Mora", &positions, &lines, &sizes)
}
