use serde::{Deserialize, Serialize};

/// Technologies in research order. The derived `Ord` follows declaration
/// order, so "lowest unknown" means the earliest entry not yet known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Tech {
    Agriculture,
    Pottery,
    Writing,
    Mathematics,
    Construction,
    Philosophy,
    Engineering,
    Education,
    Gunpowder,
    Industrialization,
}

string_enum!(Tech {
    Agriculture => "agriculture",
    Pottery => "pottery",
    Writing => "writing",
    Mathematics => "mathematics",
    Construction => "construction",
    Philosophy => "philosophy",
    Engineering => "engineering",
    Education => "education",
    Gunpowder => "gunpowder",
    Industrialization => "industrialization",
});

impl Tech {
    pub const ALL: [Tech; 10] = [
        Tech::Agriculture,
        Tech::Pottery,
        Tech::Writing,
        Tech::Mathematics,
        Tech::Construction,
        Tech::Philosophy,
        Tech::Engineering,
        Tech::Education,
        Tech::Gunpowder,
        Tech::Industrialization,
    ];

    /// Every player knows this from the start.
    pub const STARTING: Tech = Tech::Agriculture;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_sorted() {
        assert!(Tech::ALL.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(Tech::ALL[0], Tech::STARTING);
    }
}
