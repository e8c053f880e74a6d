//! Tone and behaviour dials for the simulated customer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Industry {
    #[default]
    SaaS,
    Ecommerce,
    Fintech,
    Gaming,
}

impl Industry {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SaaS => "SaaS",
            Self::Ecommerce => "Ecommerce",
            Self::Fintech => "Fintech",
            Self::Gaming => "Gaming",
        }
    }
}

impl FromStr for Industry {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "saas" => Ok(Self::SaaS),
            "ecommerce" => Ok(Self::Ecommerce),
            "fintech" => Ok(Self::Fintech),
            "gaming" => Ok(Self::Gaming),
            other => Err(format!("unknown industry: {other}")),
        }
    }
}

/// Low/medium/high dial shared by tech-savviness and patience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    #[default]
    Medium,
    High,
}

impl Level {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("unknown level: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToneArc {
    #[default]
    CalmToFrustrated,
    SteadyCalm,
}

impl ToneArc {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CalmToFrustrated => "calm_to_frustrated",
            Self::SteadyCalm => "steady_calm",
        }
    }
}

impl FromStr for ToneArc {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "calm_to_frustrated" => Ok(Self::CalmToFrustrated),
            "steady_calm" => Ok(Self::SteadyCalm),
            other => Err(format!("unknown tone arc: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Timezone {
    #[default]
    #[serde(rename = "America/Los_Angeles")]
    LosAngeles,
    #[serde(rename = "America/New_York")]
    NewYork,
    #[serde(rename = "Europe/London")]
    London,
}

impl Timezone {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LosAngeles => "America/Los_Angeles",
            Self::NewYork => "America/New_York",
            Self::London => "Europe/London",
        }
    }

    /// Short label shown next to the zone name.
    #[must_use]
    pub const fn abbreviation(&self) -> &'static str {
        match self {
            Self::LosAngeles => "PT",
            Self::NewYork => "ET",
            Self::London => "GMT",
        }
    }
}

impl FromStr for Timezone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "America/Los_Angeles" | "PT" | "pt" => Ok(Self::LosAngeles),
            "America/New_York" | "ET" | "et" => Ok(Self::NewYork),
            "Europe/London" | "GMT" | "gmt" => Ok(Self::London),
            other => Err(format!("unknown timezone: {other}")),
        }
    }
}

/// Persona applied to the simulated customer's replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    pub industry: Industry,
    pub tech_savvy: Level,
    pub patience: Level,
    pub tone_arc: ToneArc,
    pub timezone: Timezone,
}

impl Persona {
    /// One-line human description.
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "A {} patience, {} tech-savvy customer from the {} industry",
            self.patience.as_str(),
            self.tech_savvy.as_str(),
            self.industry.as_str()
        )
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {} {})",
            self.describe(),
            self.tone_arc.as_str(),
            self.timezone.as_str(),
            self.timezone.abbreviation()
        )
    }
}
