//! City catalog
//!
//! The fixed list of cities a daily game draws from. Validated once when
//! loaded so that daily generation can never fail or loop forever.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// City difficulty tier (one target per tier per day)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Tiers in round order
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// A city on the globe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    /// Country name, revealed by the first hint
    #[serde(default)]
    pub country: String,
    pub lat: f64,
    pub lng: f64,
    pub difficulty: Difficulty,
}

impl City {
    pub fn new(name: &str, country: &str, lat: f64, lng: f64, difficulty: Difficulty) -> Self {
        Self {
            name: name.to_string(),
            country: country.to_string(),
            lat,
            lng,
            difficulty,
        }
    }

    /// Great-circle distance to a lat/lng point (km)
    pub fn distance_km(&self, lat: f64, lng: f64) -> f64 {
        crate::haversine_km(lat, lng, self.lat, self.lng)
    }
}

/// Built-in cities: (name, country, lat, lng, tier)
const BUILTIN_CITIES: &[(&str, &str, f64, f64, Difficulty)] = &[
    // Easy / major cities
    ("Tokyo", "Japan", 35.6762, 139.6503, Difficulty::Easy),
    ("New York", "United States", 40.7128, -74.0060, Difficulty::Easy),
    ("London", "United Kingdom", 51.5074, -0.1278, Difficulty::Easy),
    ("Paris", "France", 48.8566, 2.3522, Difficulty::Easy),
    ("Sydney", "Australia", -33.8688, 151.2093, Difficulty::Easy),
    ("Moscow", "Russia", 55.7558, 37.6173, Difficulty::Easy),
    ("Cairo", "Egypt", 30.0444, 31.2357, Difficulty::Easy),
    ("Rio de Janeiro", "Brazil", -22.9068, -43.1729, Difficulty::Easy),
    ("Beijing", "China", 39.9042, 116.4074, Difficulty::Easy),
    ("Los Angeles", "United States", 34.0522, -118.2437, Difficulty::Easy),
    // Medium
    ("Mumbai", "India", 19.0760, 72.8777, Difficulty::Medium),
    ("Istanbul", "Turkey", 41.0082, 28.9784, Difficulty::Medium),
    ("Buenos Aires", "Argentina", -34.6037, -58.3816, Difficulty::Medium),
    ("Cape Town", "South Africa", -33.9249, 18.4241, Difficulty::Medium),
    ("Singapore", "Singapore", 1.3521, 103.8198, Difficulty::Medium),
    ("Toronto", "Canada", 43.6510, -79.3470, Difficulty::Medium),
    ("Berlin", "Germany", 52.5200, 13.4050, Difficulty::Medium),
    ("Madrid", "Spain", 40.4168, -3.7038, Difficulty::Medium),
    ("Rome", "Italy", 41.9028, 12.4964, Difficulty::Medium),
    ("Bangkok", "Thailand", 13.7563, 100.5018, Difficulty::Medium),
    // Hard
    ("Reykjavik", "Iceland", 64.1466, -21.9426, Difficulty::Hard),
    ("Wellington", "New Zealand", -41.2865, 174.7762, Difficulty::Hard),
    ("Lima", "Peru", -12.0464, -77.0428, Difficulty::Hard),
    ("Nairobi", "Kenya", -1.2921, 36.8219, Difficulty::Hard),
    ("Ulaanbaatar", "Mongolia", 47.9181, 106.9176, Difficulty::Hard),
    ("Anchorage", "United States", 61.2181, -149.9003, Difficulty::Hard),
    ("Perth", "Australia", -31.9505, 115.8605, Difficulty::Hard),
    ("Casablanca", "Morocco", 33.5731, -7.5898, Difficulty::Hard),
    ("Helsinki", "Finland", 60.1699, 24.9384, Difficulty::Hard),
    ("Santiago", "Chile", -33.4489, -70.6693, Difficulty::Hard),
];

/// A validated city catalog
///
/// Every tier is non-empty and there are at least two distinct names, so a
/// reference city different from any target always exists.
#[derive(Debug, Clone)]
pub struct Catalog {
    cities: Vec<City>,
}

impl Catalog {
    /// Validate and wrap a list of cities
    pub fn new(cities: Vec<City>) -> Result<Self, ConfigError> {
        for city in &cities {
            let lat_ok = (-90.0..=90.0).contains(&city.lat);
            let lng_ok = (-180.0..=180.0).contains(&city.lng);
            if !lat_ok || !lng_ok {
                return Err(ConfigError::InvalidCoordinates {
                    name: city.name.clone(),
                    lat: city.lat,
                    lng: city.lng,
                });
            }
        }

        for tier in Difficulty::ALL {
            if !cities.iter().any(|c| c.difficulty == tier) {
                return Err(ConfigError::EmptyTier(tier.as_str()));
            }
        }

        let distinct = cities
            .iter()
            .map(|c| c.name.as_str())
            .collect::<HashSet<_>>()
            .len();
        if distinct < 2 {
            return Err(ConfigError::TooFewDistinctNames(distinct));
        }

        Ok(Self { cities })
    }

    /// The built-in 30-city catalog
    pub fn builtin() -> Result<Self, ConfigError> {
        let cities = BUILTIN_CITIES
            .iter()
            .map(|&(name, country, lat, lng, tier)| City::new(name, country, lat, lng, tier))
            .collect();
        Self::new(cities)
    }

    /// All cities in catalog order
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Cities of one tier, in catalog order
    pub fn tier(&self, difficulty: Difficulty) -> Vec<&City> {
        self.cities
            .iter()
            .filter(|c| c.difficulty == difficulty)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.len(), 30);
        for tier in Difficulty::ALL {
            assert_eq!(catalog.tier(tier).len(), 10);
        }
    }

    #[test]
    fn test_empty_tier_rejected() {
        let cities = vec![
            City::new("A", "X", 0.0, 0.0, Difficulty::Easy),
            City::new("B", "X", 1.0, 1.0, Difficulty::Medium),
        ];
        assert_eq!(
            Catalog::new(cities).unwrap_err(),
            ConfigError::EmptyTier("hard")
        );
    }

    #[test]
    fn test_single_distinct_name_rejected() {
        let cities = Difficulty::ALL
            .iter()
            .map(|&d| City::new("Same", "X", 0.0, 0.0, d))
            .collect();
        assert_eq!(
            Catalog::new(cities).unwrap_err(),
            ConfigError::TooFewDistinctNames(1)
        );
    }

    #[test]
    fn test_out_of_range_coordinates_rejected() {
        let cities = vec![
            City::new("A", "X", 0.0, 0.0, Difficulty::Easy),
            City::new("B", "X", 91.0, 0.0, Difficulty::Medium),
            City::new("C", "X", 0.0, 0.0, Difficulty::Hard),
        ];
        assert!(matches!(
            Catalog::new(cities),
            Err(ConfigError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn test_minimal_catalog_accepted() {
        let cities = vec![
            City::new("A", "X", 0.0, 0.0, Difficulty::Easy),
            City::new("B", "X", 1.0, 1.0, Difficulty::Medium),
            City::new("C", "X", 2.0, 2.0, Difficulty::Hard),
        ];
        assert!(Catalog::new(cities).is_ok());
    }
}
