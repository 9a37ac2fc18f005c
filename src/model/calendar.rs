use std::fmt;

use serde::{Deserialize, Serialize};

/// Calendar year. Negative values are BC, positive values AD; there is no
/// year zero in the display but the arithmetic is plain integer steps.
///
/// Natural `i32` ordering equals chronological ordering.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Year(i32);

impl Year {
    pub const fn new(year: i32) -> Self {
        Self(year)
    }

    pub fn value(self) -> i32 {
        self.0
    }

    pub fn is_bc(self) -> bool {
        self.0 < 0
    }

    pub fn advance(&mut self, step: i32) {
        self.0 += step;
    }
}

impl Default for Year {
    fn default() -> Self {
        Self(-4000)
    }
}

impl From<i32> for Year {
    fn from(year: i32) -> Self {
        Self(year)
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bc() {
            write!(f, "{} BC", -self.0)
        } else {
            write!(f, "{} AD", self.0)
        }
    }
}
