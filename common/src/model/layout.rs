//! Layout parameters of a print job: color mode and pages per sheet.
//!
//! Both travel as plain form fields (`color`, `npps`) between the frontend
//! and the backend, so each type knows how to parse itself from, and render
//! itself to, that wire form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Color mode requested for a document.
///
/// Only `"BW"` selects grayscale; every other value prints in color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ColorMode {
    #[serde(rename = "BW")]
    BlackAndWhite,
    #[default]
    #[serde(other, rename = "COLOR")]
    Color,
}

impl ColorMode {
    /// Wire form of the color mode.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::BlackAndWhite => "BW",
            ColorMode::Color => "COLOR",
        }
    }
}

impl FromStr for ColorMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s.trim() == "BW" {
            ColorMode::BlackAndWhite
        } else {
            ColorMode::Color
        })
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grid used to lay several source pages on one physical sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Imposition {
    pub columns: u32,
    pub rows: u32,
    pub landscape: bool,
}

impl Imposition {
    /// Argument for `pdfjam --nup`.
    pub fn nup_arg(&self) -> String {
        format!("{}x{}", self.columns, self.rows)
    }
}

/// Number of source pages printed per physical sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "u32", into = "u32")]
pub enum PagesPerSheet {
    #[default]
    One,
    Two,
    Four,
    Six,
    Nine,
}

impl PagesPerSheet {
    pub fn count(self) -> u32 {
        match self {
            PagesPerSheet::One => 1,
            PagesPerSheet::Two => 2,
            PagesPerSheet::Four => 4,
            PagesPerSheet::Six => 6,
            PagesPerSheet::Nine => 9,
        }
    }

    /// The N-up grid for this layout, or `None` when pages are printed as-is.
    ///
    /// Six pages per sheet is the only layout printed in landscape.
    pub fn imposition(self) -> Option<Imposition> {
        let (columns, rows, landscape) = match self {
            PagesPerSheet::One => return None,
            PagesPerSheet::Two => (1, 2, false),
            PagesPerSheet::Four => (2, 2, false),
            PagesPerSheet::Six => (3, 2, true),
            PagesPerSheet::Nine => (3, 3, false),
        };
        Some(Imposition {
            columns,
            rows,
            landscape,
        })
    }

    /// Number of physical sheets needed to print `pages` source pages.
    pub fn sheets_for(self, pages: u32) -> u32 {
        pages.div_ceil(self.count())
    }
}

impl TryFrom<u32> for PagesPerSheet {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PagesPerSheet::One),
            2 => Ok(PagesPerSheet::Two),
            4 => Ok(PagesPerSheet::Four),
            6 => Ok(PagesPerSheet::Six),
            9 => Ok(PagesPerSheet::Nine),
            other => Err(format!("unsupported pages per sheet: {}", other)),
        }
    }
}

impl From<PagesPerSheet> for u32 {
    fn from(value: PagesPerSheet) -> Self {
        value.count()
    }
}

impl FromStr for PagesPerSheet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u32 = s
            .trim()
            .parse()
            .map_err(|_| format!("invalid pages per sheet: {:?}", s))?;
        PagesPerSheet::try_from(value)
    }
}

impl fmt::Display for PagesPerSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}
