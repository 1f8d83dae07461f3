use serde::{Deserialize, Serialize};

/// A single real-estate listing from the listings snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub price: f64,
    pub property_type: String,
    pub bedrooms: u32,
    #[serde(with = "flag")]
    pub school: bool,
    #[serde(with = "flag")]
    pub park: bool,
    #[serde(with = "flag")]
    pub supermarket: bool,
    #[serde(with = "flag")]
    pub furnished: bool,
    #[serde(with = "flag")]
    pub pet_friendly: bool,
    #[serde(with = "flag")]
    pub new_listing: bool,
    #[serde(with = "flag")]
    pub family_friendly: bool,
}

/// Average income for a profession
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeEntry {
    pub profession: String,
    pub avg_income: f64,
}

/// Public transport stop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitStop {
    pub stop_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Scored area returned to callers
///
/// `score` is normalized against the best candidate of the same request,
/// so scores from different requests are not comparable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredArea {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub price: f64,
    pub score: f64,
    #[serde(with = "flag")]
    pub school: bool,
    #[serde(with = "flag")]
    pub park: bool,
    #[serde(with = "flag")]
    pub supermarket: bool,
    pub property_type: String,
    pub bedrooms: u32,
    #[serde(with = "flag")]
    pub furnished: bool,
    #[serde(with = "flag")]
    pub pet_friendly: bool,
    #[serde(with = "flag")]
    pub new_listing: bool,
    #[serde(with = "flag")]
    pub family_friendly: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proximity: Option<f64>,
}

impl ScoredArea {
    pub fn from_listing(listing: &Listing, score: f64, proximity: Option<f64>) -> Self {
        Self {
            name: listing.location.clone(),
            latitude: listing.latitude,
            longitude: listing.longitude,
            price: listing.price,
            score,
            school: listing.school,
            park: listing.park,
            supermarket: listing.supermarket,
            property_type: listing.property_type.clone(),
            bedrooms: listing.bedrooms,
            furnished: listing.furnished,
            pet_friendly: listing.pet_friendly,
            new_listing: listing.new_listing,
            family_friendly: listing.family_friendly,
            proximity,
        }
    }
}

/// Preference scoring weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub amenity_bonus: f64,
    pub proximity_penalty: f64,
    pub family_bonus: f64,
    /// Family bonus applies to families strictly larger than this
    pub family_size_threshold: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            amenity_bonus: 0.1,
            proximity_penalty: 0.01,
            family_bonus: 0.05,
            family_size_threshold: 4,
        }
    }
}

/// Recommendation selector tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendationSettings {
    pub max_suggestions: usize,
    pub cluster_count: usize,
    /// Below this many candidates clustering is skipped
    pub min_candidates_for_clustering: usize,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            max_suggestions: 5,
            cluster_count: 3,
            min_candidates_for_clustering: 3,
        }
    }
}

/// Serde helper for 0/1 flag columns
pub mod flag {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bool(bool),
            Int(i64),
            Float(f64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Bool(b) => Ok(b),
            Raw::Int(0) => Ok(false),
            Raw::Int(1) => Ok(true),
            Raw::Float(f) if f == 0.0 => Ok(false),
            Raw::Float(f) if f == 1.0 => Ok(true),
            _ => Err(de::Error::custom("expected a 0/1 flag")),
        }
    }
}
