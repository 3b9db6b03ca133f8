//! Rows and request bodies for heroes, powers and hero_powers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Hero {
    pub id: i64,
    pub name: String,
    pub super_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Power {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Strength rating of a hero for one power. Stored as the `hero_strength` enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, sqlx::Type)]
#[sqlx(type_name = "hero_strength")]
pub enum Strength {
    Strong,
    Weak,
    Average,
}

impl Strength {
    pub const ALL: [Strength; 3] = [Strength::Strong, Strength::Weak, Strength::Average];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strength::Strong => "Strong",
            Strength::Weak => "Weak",
            Strength::Average => "Average",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownStrength;

impl FromStr for Strength {
    type Err = UnknownStrength;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strength::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or(UnknownStrength)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct HeroPower {
    pub id: i64,
    pub strength: Strength,
    pub hero_id: i64,
    pub power_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A hero_power with both parents embedded. The parents never embed their hero_powers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HeroPowerDetail {
    #[serde(flatten)]
    pub hero_power: HeroPower,
    pub hero: Hero,
    pub power: Power,
}

/// GET /heroes/{id} body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HeroDetail {
    #[serde(flatten)]
    pub hero: Hero,
    pub hero_powers: Vec<HeroPowerDetail>,
}

/// PATCH /powers/{id} body. Absent fields are left untouched.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PowerPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// POST /hero_powers body. Fields are optional here so missing ones surface as validation errors.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewHeroPower {
    #[serde(default)]
    pub strength: Option<String>,
    #[serde(default)]
    pub hero_id: Option<i64>,
    #[serde(default)]
    pub power_id: Option<i64>,
}

/// Insert payload for heroes (seed and tests).
#[derive(Clone, Debug)]
pub struct NewHero {
    pub name: String,
    pub super_name: String,
}

/// Insert payload for powers (seed and tests).
#[derive(Clone, Debug)]
pub struct NewPower {
    pub name: String,
    pub description: String,
}
