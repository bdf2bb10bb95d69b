use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Named aberrations of the first 15 OSA modes
///
/// The discriminant is the OSA index of the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, IntoStaticStr)]
#[strum(ascii_case_insensitive)]
pub enum Aberration {
    #[strum(serialize = "piston")]
    Piston = 0,
    #[strum(serialize = "vertical tilt")]
    VerticalTilt = 1,
    #[strum(serialize = "horizontal tilt")]
    HorizontalTilt = 2,
    #[strum(serialize = "oblique astigmatism")]
    ObliqueAstigmatism = 3,
    #[strum(serialize = "defocus")]
    Defocus = 4,
    #[strum(serialize = "vertical astigmatism")]
    VerticalAstigmatism = 5,
    #[strum(serialize = "vertical trefoil")]
    VerticalTrefoil = 6,
    #[strum(serialize = "vertical coma")]
    VerticalComa = 7,
    #[strum(serialize = "horizontal coma")]
    HorizontalComa = 8,
    #[strum(serialize = "oblique trefoil")]
    ObliqueTrefoil = 9,
    #[strum(serialize = "oblique quadrafoil")]
    ObliqueQuadrafoil = 10,
    #[strum(serialize = "oblique secondary astigmatism")]
    ObliqueSecondaryAstigmatism = 11,
    #[strum(serialize = "primary spherical")]
    PrimarySpherical = 12,
    #[strum(serialize = "vertical secondary astigmatism")]
    VerticalSecondaryAstigmatism = 13,
    #[strum(serialize = "vertical quadrafoil")]
    VerticalQuadrafoil = 14,
}
impl Aberration {
    /// OSA index
    pub fn index(self) -> usize {
        self as usize
    }
    /// Aberration of the OSA index `j`, if it has a name
    pub fn from_index(j: usize) -> Option<Self> {
        Self::iter().find(|a| a.index() == j)
    }
    /// Canonical lowercase name
    pub fn name(self) -> &'static str {
        self.into()
    }
    /// OSA index of the aberration `name`, regardless of its case
    pub fn lookup(name: &str) -> Option<usize> {
        Self::from_str(name).ok().map(Self::index)
    }
}
