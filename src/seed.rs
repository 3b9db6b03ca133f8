//! Demo data. Goes through HeroService so the usual validation applies.

use crate::error::AppError;
use crate::models::{NewHero, NewPower, Strength};
use crate::service::{HeroService, ValidHeroPower};
use sqlx::PgPool;

const HEROES: &[(&str, &str)] = &[
    ("Kamala Khan", "Ms. Marvel"),
    ("Doreen Green", "Squirrel Girl"),
    ("Gwen Stacy", "Spider-Gwen"),
    ("Janet Van Dyne", "The Wasp"),
    ("Wanda Maximoff", "Scarlet Witch"),
    ("Carol Danvers", "Captain Marvel"),
    ("Jean Grey", "Dark Phoenix"),
    ("Ororo Munroe", "Storm"),
    ("Kitty Pryde", "Shadowcat"),
    ("Elektra Natchios", "Elektra"),
];

const POWERS: &[(&str, &str)] = &[
    ("super strength", "gives the wielder super-human strengths"),
    ("flight", "gives the wielder the ability to fly through the skies at supersonic speed"),
    ("super human senses", "allows the wielder to use her senses at a super-human level"),
    ("elasticity", "can stretch the human body to extreme lengths"),
];

/// (hero index, power index, strength)
const HERO_POWERS: &[(usize, usize, Strength)] = &[
    (0, 1, Strength::Average),
    (0, 3, Strength::Strong),
    (1, 0, Strength::Strong),
    (2, 2, Strength::Average),
    (3, 1, Strength::Strong),
    (4, 2, Strength::Weak),
    (5, 0, Strength::Strong),
    (5, 1, Strength::Strong),
    (6, 2, Strength::Average),
    (7, 1, Strength::Average),
    (8, 3, Strength::Weak),
    (9, 0, Strength::Average),
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub heroes: usize,
    pub powers: usize,
    pub hero_powers: usize,
}

/// Insert the demo rows when the heroes table is empty; otherwise do nothing.
pub async fn seed_if_empty(pool: &PgPool) -> Result<SeedReport, AppError> {
    if HeroService::count_heroes(pool).await? > 0 {
        tracing::info!("heroes present, skipping seed");
        return Ok(SeedReport::default());
    }

    let mut heroes = Vec::with_capacity(HEROES.len());
    for (name, super_name) in HEROES {
        let new = NewHero {
            name: name.to_string(),
            super_name: super_name.to_string(),
        };
        heroes.push(HeroService::create_hero(pool, &new).await?);
    }

    let mut powers = Vec::with_capacity(POWERS.len());
    for (name, description) in POWERS {
        let new = NewPower {
            name: name.to_string(),
            description: description.to_string(),
        };
        powers.push(HeroService::create_power(pool, &new).await?);
    }

    let mut hero_powers = 0;
    for &(hero, power, strength) in HERO_POWERS {
        let valid = ValidHeroPower {
            strength,
            hero_id: heroes[hero].id,
            power_id: powers[power].id,
        };
        HeroService::create_hero_power(pool, valid).await?;
        hero_powers += 1;
    }

    let report = SeedReport {
        heroes: heroes.len(),
        powers: powers.len(),
        hero_powers,
    };
    tracing::info!(?report, "seeded demo data");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::MIN_DESCRIPTION_LEN;

    #[test]
    fn seed_powers_satisfy_description_rule() {
        for (name, description) in POWERS {
            assert!(
                description.chars().count() >= MIN_DESCRIPTION_LEN,
                "{} has a short description",
                name
            );
        }
    }

    #[test]
    fn seed_links_point_at_seed_rows() {
        for &(hero, power, _) in HERO_POWERS {
            assert!(hero < HEROES.len());
            assert!(power < POWERS.len());
        }
    }
}
