use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Civilization {
    Egypt,
    Greece,
    Rome,
    China,
    Persia,
    Inca,
    England,
    France,
}

string_enum!(Civilization {
    Egypt => "egypt",
    Greece => "greece",
    Rome => "rome",
    China => "china",
    Persia => "persia",
    Inca => "inca",
    England => "england",
    France => "france",
});

impl Civilization {
    /// Player `i` plays `ALL[i]`, which also caps the player count.
    pub const ALL: [Civilization; 8] = [
        Civilization::Egypt,
        Civilization::Greece,
        Civilization::Rome,
        Civilization::China,
        Civilization::Persia,
        Civilization::Inca,
        Civilization::England,
        Civilization::France,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Civilization::Egypt => "Egypt",
            Civilization::Greece => "Greece",
            Civilization::Rome => "Rome",
            Civilization::China => "China",
            Civilization::Persia => "Persia",
            Civilization::Inca => "Inca",
            Civilization::England => "England",
            Civilization::France => "France",
        }
    }
}
