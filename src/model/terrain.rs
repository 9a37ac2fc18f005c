use serde::{Deserialize, Serialize};

/// Resources a tile may carry. Each tile has an independent 1-in-N chance
/// (see `MapConfig::resource_chance`) of one of these, chosen uniformly.
pub const RESOURCES: [&str; 5] = ["wheat", "fish", "gold", "iron", "horses"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Terrain {
    Ocean,
    Plains,
    Desert,
    Mountains,
    Forest,
    Hills,
    Tundra,
    Jungle,
}

string_enum!(Terrain {
    Ocean => "ocean",
    Plains => "plains",
    Desert => "desert",
    Mountains => "mountains",
    Forest => "forest",
    Hills => "hills",
    Tundra => "tundra",
    Jungle => "jungle",
});

impl Terrain {
    /// Map generation draws uniformly from this list.
    pub const ALL: [Terrain; 8] = [
        Terrain::Ocean,
        Terrain::Plains,
        Terrain::Desert,
        Terrain::Mountains,
        Terrain::Forest,
        Terrain::Hills,
        Terrain::Tundra,
        Terrain::Jungle,
    ];

    /// Ocean and mountains can never hold a city or a unit.
    pub fn is_buildable(self) -> bool {
        !matches!(self, Terrain::Ocean | Terrain::Mountains)
    }

    /// Single-character map symbol for text front ends.
    pub fn symbol(self) -> char {
        match self {
            Terrain::Ocean => '~',
            Terrain::Plains => '.',
            Terrain::Desert => 'd',
            Terrain::Mountains => '^',
            Terrain::Forest => '*',
            Terrain::Hills => 'n',
            Terrain::Tundra => 't',
            Terrain::Jungle => 'j',
        }
    }
}
