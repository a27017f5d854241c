//! Game constants — canonical resource kinds and session defaults.
//!
//! Both the logic crate and the headless simtest use these.

pub mod resources {
    pub const FOOD: &str = "food";
    pub const MATERIALS: &str = "materials";
    pub const PRODUCTION: &str = "production";
    pub const KNOWLEDGE: &str = "knowledge";
    pub const UNITY: &str = "unity";
    pub const GOLD: &str = "gold";

    /// Resource kinds every session starts with, seeded to zero.
    pub const CANONICAL: [&str; 6] = [FOOD, MATERIALS, PRODUCTION, KNOWLEDGE, UNITY, GOLD];
}

pub const DEFAULT_SEED: &str = "seed";
pub const DEFAULT_ERA: &str = "bronze";

/// Population of a freshly added sandbox city.
pub const DEFAULT_CITY_POPULATION: i32 = 5;
