//! Temperature classes and the shelf types they route to.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// The storage temperature an order has to be kept at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Temperature {
    Hot,
    Cold,
    Frozen,
}

impl Temperature {
    pub const ALL: [Temperature; 3] = [Temperature::Hot, Temperature::Cold, Temperature::Frozen];

    /// The temperature-specific shelf an order of this class belongs on.
    pub fn primary_shelf(self) -> ShelfType {
        match self {
            Temperature::Hot => ShelfType::Hot,
            Temperature::Cold => ShelfType::Cold,
            Temperature::Frozen => ShelfType::Frozen,
        }
    }
}

impl Display for Temperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Temperature::Hot => "HOT",
            Temperature::Cold => "COLD",
            Temperature::Frozen => "FROZEN",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown temperature: {0}")]
pub struct UnknownTemperature(pub String);

impl FromStr for Temperature {
    type Err = UnknownTemperature;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HOT" => Ok(Temperature::Hot),
            "COLD" => Ok(Temperature::Cold),
            "FROZEN" => Ok(Temperature::Frozen),
            _ => Err(UnknownTemperature(s.to_string())),
        }
    }
}

// Template files spell temperatures in lower case ("hot"), status output in upper case.
impl<'de> Deserialize<'de> for Temperature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One of the four shelves in a kitchen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShelfType {
    Hot,
    Cold,
    Frozen,
    Overflow,
}

impl ShelfType {
    pub const ALL: [ShelfType; 4] = [
        ShelfType::Hot,
        ShelfType::Cold,
        ShelfType::Frozen,
        ShelfType::Overflow,
    ];

    /// Number of orders a shelf of this type can hold.
    pub fn capacity(self) -> usize {
        match self {
            ShelfType::Overflow => 20,
            _ => 15,
        }
    }
}

impl Display for ShelfType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ShelfType::Hot => "HOT",
            ShelfType::Cold => "COLD",
            ShelfType::Frozen => "FROZEN",
            ShelfType::Overflow => "OVERFLOW",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_any_case() {
        assert_eq!("hot".parse::<Temperature>().unwrap(), Temperature::Hot);
        assert_eq!("Cold".parse::<Temperature>().unwrap(), Temperature::Cold);
        assert_eq!(" FROZEN ".parse::<Temperature>().unwrap(), Temperature::Frozen);
        assert!("lukewarm".parse::<Temperature>().is_err());
    }

    #[test]
    fn every_temperature_routes_to_a_temperature_shelf() {
        for temp in Temperature::ALL {
            assert_ne!(temp.primary_shelf(), ShelfType::Overflow);
            assert_eq!(temp.primary_shelf().to_string(), temp.to_string());
        }
    }

    #[test]
    fn overflow_is_larger() {
        assert_eq!(ShelfType::Hot.capacity(), 15);
        assert_eq!(ShelfType::Overflow.capacity(), 20);
    }
}
