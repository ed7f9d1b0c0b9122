//! Caller-supplied generation criteria.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PipelineError;

/// What the listener is doing. Drives the target loudness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    WorkingOut,
    Partying,
    Relaxing,
    Studying,
    Other,
}

impl Activity {
    /// Target loudness in dB.
    pub fn target_loudness(self) -> f64 {
        match self {
            Self::WorkingOut | Self::Partying => -4.0,
            Self::Relaxing | Self::Studying => -14.0,
            Self::Other => -7.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::WorkingOut => "working out",
            Self::Partying => "partying",
            Self::Relaxing => "relaxing",
            Self::Studying => "studying",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Activity {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "working out" | "working_out" | "workout" => Self::WorkingOut,
            "partying" => Self::Partying,
            "relaxing" => Self::Relaxing,
            "studying" => Self::Studying,
            _ => Self::Other,
        })
    }
}

/// Where the listener is. Drives the target danceability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Gym,
    Car,
    Home,
    Party,
    Other,
}

impl Environment {
    /// Target danceability in `[0, 1]`.
    pub fn target_danceability(self) -> f64 {
        match self {
            Self::Gym => 0.7,
            Self::Car => 0.6,
            Self::Home => 0.4,
            Self::Party => 0.9,
            Self::Other => 0.5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gym => "gym",
            Self::Car => "car",
            Self::Home => "home",
            Self::Party => "party",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "gym" => Self::Gym,
            "car" => Self::Car,
            "home" => Self::Home,
            "party" => Self::Party,
            _ => Self::Other,
        })
    }
}

/// Both enums travel as their lower-case words and parse through `FromStr`,
/// so JSON input gets the same case and spacing normalization.
macro_rules! string_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                match raw.parse() {
                    Ok(value) => Ok(value),
                    Err(never) => match never {},
                }
            }
        }
    };
}

string_serde!(Activity);
string_serde!(Environment);

/// Parameters of a generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    pub target_energy: f64,
    pub target_valence: f64,
    pub activity: Activity,
    pub environment: Environment,
    /// Maximum number of tracks to select.
    pub amount: usize,
}

impl Criteria {
    /// Reject criteria no selection could satisfy.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.amount == 0 {
            return Err(PipelineError::InvalidCriteria(
                "amount must be greater than zero".to_string(),
            ));
        }
        for (name, value) in [
            ("target_energy", self.target_energy),
            ("target_valence", self.target_valence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(PipelineError::InvalidCriteria(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
