use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum BuildingKind {
    Monument,
    Granary,
    Library,
    Temple,
    Barracks,
    Walls,
    University,
    Factory,
}

string_enum!(BuildingKind {
    Monument => "monument",
    Granary => "granary",
    Library => "library",
    Temple => "temple",
    Barracks => "barracks",
    Walls => "walls",
    University => "university",
    Factory => "factory",
});

impl BuildingKind {
    pub const ALL: [BuildingKind; 8] = [
        BuildingKind::Monument,
        BuildingKind::Granary,
        BuildingKind::Library,
        BuildingKind::Temple,
        BuildingKind::Barracks,
        BuildingKind::Walls,
        BuildingKind::University,
        BuildingKind::Factory,
    ];

    pub fn cost(self) -> u32 {
        match self {
            BuildingKind::Monument => 80,
            BuildingKind::Granary => 100,
            BuildingKind::Library => 120,
            BuildingKind::Temple => 150,
            BuildingKind::Barracks => 100,
            BuildingKind::Walls => 200,
            BuildingKind::University => 250,
            BuildingKind::Factory => 300,
        }
    }
}
