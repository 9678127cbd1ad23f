use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The terrain shown on one half of a domino.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Terrain {
    #[serde(rename = "F")]
    Forest,
    #[serde(rename = "W")]
    Water,
    #[serde(rename = "C")]
    Crag,
}

/// The alphabet the tile supply draws from.
pub static TERRAINS: [Terrain; 3] = [Terrain::Forest, Terrain::Water, Terrain::Crag];

impl Terrain {
    pub fn letter(self) -> char {
        match self {
            Terrain::Forest => 'F',
            Terrain::Water => 'W',
            Terrain::Crag => 'C',
        }
    }

    /// The image a freshly drawn half of this terrain is drawn with.
    pub fn image(self) -> &'static str {
        match self {
            Terrain::Forest => "/cave-05.svg",
            Terrain::Water => "/swamp-02.svg",
            Terrain::Crag => "/mountains-01.svg",
        }
    }

    pub(crate) fn to_index(self) -> u8 {
        self as u8
    }

    pub(crate) fn from_index(idx: u8) -> Option<Self> {
        TERRAINS.get(usize::from(idx)).copied()
    }
}

impl std::fmt::Display for Terrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// The error type for the [`FromStr`] instance of [`Terrain`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerrainFromStrErr {
    Empty,
    MoreThanOneChar,
    InvalidLetter(char),
}

impl std::fmt::Display for TerrainFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerrainFromStrErr::Empty => write!(f, "Terrain code is empty"),
            TerrainFromStrErr::MoreThanOneChar => {
                write!(f, "Terrain code has more than one letter")
            }
            TerrainFromStrErr::InvalidLetter(c) => write!(f, "'{}' is not a terrain letter", c),
        }
    }
}

impl std::error::Error for TerrainFromStrErr {}

impl TryFrom<char> for Terrain {
    type Error = TerrainFromStrErr;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'F' => Ok(Terrain::Forest),
            'W' => Ok(Terrain::Water),
            'C' => Ok(Terrain::Crag),
            _ => Err(TerrainFromStrErr::InvalidLetter(c)),
        }
    }
}

impl FromStr for Terrain {
    type Err = TerrainFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let c = chars.next().ok_or(TerrainFromStrErr::Empty)?;
        if chars.next().is_some() {
            return Err(TerrainFromStrErr::MoreThanOneChar);
        }
        Terrain::try_from(c)
    }
}

/// Shorthand for creating a [`Half`](crate::Half) from its terrain letters
/// and an optional image.
///
/// Without an image, a single-letter half gets the default image of its
/// terrain, see [`Terrain::image()`].
/// ```
/// # use dominoes::{half, Terrain};
/// let h = half!("F");
/// assert!(h.terrain.contains(Terrain::Forest));
/// assert_eq!(h.image.as_str(), "/cave-05.svg");
///
/// let castle = half!("FWC", "/br.jpg");
/// assert_eq!(castle.terrain.len(), 3);
/// ```
#[macro_export]
macro_rules! half {
    ($letters:literal) => {
        <$crate::Half as std::str::FromStr>::from_str($letters)
            .expect("Invalid terrain code given to half! macro")
    };
    ($letters:literal, $image:literal) => {
        $crate::Half::new(
            <$crate::TerrainSet as std::str::FromStr>::from_str($letters)
                .expect("Invalid terrain code given to half! macro"),
            $crate::ImageRef::from($image),
        )
    };
}
// The import is for using the macro in other modules, see https://stackoverflow.com/a/31749071/1726797
#[allow(unused_imports)]
pub(crate) use half;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_round_trip_through_from_str() {
        for terrain in TERRAINS {
            assert_eq!(terrain.letter().to_string().parse::<Terrain>(), Ok(terrain));
        }
    }

    #[test]
    fn rejects_bad_codes() {
        assert_eq!("".parse::<Terrain>(), Err(TerrainFromStrErr::Empty));
        assert_eq!("FW".parse::<Terrain>(), Err(TerrainFromStrErr::MoreThanOneChar));
        assert_eq!(
            "x".parse::<Terrain>(),
            Err(TerrainFromStrErr::InvalidLetter('x'))
        );
    }

    #[test]
    fn serializes_as_letter() {
        assert_eq!(serde_json::to_string(&Terrain::Water).unwrap(), "\"W\"");
    }
}
