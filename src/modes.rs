//! Zernike mode requests
//!
//! A mode is requested either by its OSA index or by the name of its aberration,
//! and a [Select]ion tells which modes up to the requested one are computed.

use crate::error::{Result, ZernikeError};
use itertools::Itertools;
use log::{debug, warn};
use regex::Regex;
use std::{fmt, str::FromStr};

mod aberration;
mod osa;
pub use aberration::Aberration;
pub use osa::{enumerate_pairs, OsaPairs, ZernikePair};

const INTEGER: &str = r"^[+-]?\d+$";
const DECIMAL: &str = r"^[+-]?(\d+\.\d*|\.\d+|\d+(\.\d*)?[eE][+-]?\d+|inf|nan)$";

/// Zernike mode given by its OSA index or by its aberration name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Index(i64),
    Name(String),
}
impl From<i64> for Mode {
    fn from(value: i64) -> Self {
        Mode::Index(value)
    }
}
impl From<i32> for Mode {
    fn from(value: i32) -> Self {
        Mode::Index(value as i64)
    }
}
impl From<u32> for Mode {
    fn from(value: u32) -> Self {
        Mode::Index(value as i64)
    }
}
impl From<usize> for Mode {
    fn from(value: usize) -> Self {
        Mode::Index(value as i64)
    }
}
impl From<&str> for Mode {
    fn from(value: &str) -> Self {
        Mode::Name(value.to_string())
    }
}
impl From<String> for Mode {
    fn from(value: String) -> Self {
        Mode::Name(value)
    }
}
impl From<Aberration> for Mode {
    fn from(value: Aberration) -> Self {
        Mode::Index(value.index() as i64)
    }
}
impl TryFrom<f64> for Mode {
    type Error = ZernikeError;

    /// Only integral values are accepted
    fn try_from(value: f64) -> Result<Self> {
        if value.is_finite() && value.fract() == 0. {
            Ok(Mode::Index(value as i64))
        } else {
            Err(ZernikeError::NotIntegral(value.to_string()))
        }
    }
}
impl FromStr for Mode {
    type Err = ZernikeError;

    /// Integers are indices, decimal numbers are rejected and anything else is a name
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if Regex::new(INTEGER)?.is_match(s) {
            s.parse::<i64>()
                .map(Mode::Index)
                .map_err(|_| ZernikeError::NotIntegral(s.to_string()))
        } else if Regex::new(DECIMAL)?.is_match(&s.to_lowercase()) {
            Err(ZernikeError::NotIntegral(s.to_string()))
        } else {
            Ok(Mode::Name(s.to_string()))
        }
    }
}
impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Index(j) => write!(f, "{}", j),
            Mode::Name(name) => write!(f, "{}", name),
        }
    }
}

/// Selection of the modes up to the requested one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Select {
    /// only the requested mode
    #[default]
    Mode,
    /// all the modes from 0 to the requested one
    All,
    /// a list of modes, none above the requested one
    List(Vec<Mode>),
}
impl<T: Into<Mode>> From<Vec<T>> for Select {
    fn from(modes: Vec<T>) -> Self {
        Select::List(modes.into_iter().map(|mode| mode.into()).collect())
    }
}
impl<T: Into<Mode>> From<Option<Vec<T>>> for Select {
    fn from(modes: Option<Vec<T>>) -> Self {
        modes.map_or(Select::Mode, Select::from)
    }
}
impl FromStr for Select {
    type Err = ZernikeError;

    /// Parses "" (no selection), "all" or a comma separated list of modes
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            Ok(Select::Mode)
        } else if s.eq_ignore_ascii_case("all") {
            Ok(Select::All)
        } else {
            Ok(Select::List(
                s.split(',').map(Mode::from_str).collect::<Result<Vec<_>>>()?,
            ))
        }
    }
}

/// Returns the OSA index of the requested mode
pub fn validate_mode(mode: &Mode) -> Result<usize> {
    match mode {
        Mode::Index(j) if *j < 0 => Err(ZernikeError::NegativeMode(*j)),
        Mode::Index(j) => Ok(*j as usize),
        Mode::Name(name) => {
            Aberration::lookup(name).ok_or_else(|| ZernikeError::UnknownName(name.clone()))
        }
    }
}

/// Returns the ascending OSA indices selected up to the mode `top`
///
/// Repeated modes in [Select::List] are kept.
pub fn resolve_selection(top: usize, select: &Select) -> Result<Vec<usize>> {
    let selection = match select {
        Select::Mode => vec![top],
        Select::List(modes) if modes.is_empty() => vec![top],
        Select::All => (0..=top).collect(),
        Select::List(modes) => modes
            .iter()
            .map(|mode| {
                validate_mode(mode).and_then(|selected| {
                    if selected > top {
                        Err(ZernikeError::SelectionExceedsMode {
                            selected,
                            mode: top,
                        })
                    } else {
                        Ok(selected)
                    }
                })
            })
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .sorted()
            .collect(),
    };
    if selection.iter().dedup().count() < selection.len() {
        warn!("repeated modes in selection {:?}", selection);
    }
    debug!("mode {} selection: {:?}", top, selection);
    Ok(selection)
}
