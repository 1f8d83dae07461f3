use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::{Amenity, AreaFilters, BedroomFilter, EngineError, EngineResult, SuggestionQuery};

/// Profession used when the affordability query names none
pub const DEFAULT_PROFESSION: &str = "Teacher";

/// Interpret a query-string flag
///
/// Empty, `0`, `false`, `no` and `off` are false; anything else is true.
pub fn is_truthy(raw: &str) -> bool {
    !matches!(
        raw.trim().to_lowercase().as_str(),
        "" | "0" | "false" | "no" | "off"
    )
}

fn flag_set(raw: &Option<String>) -> bool {
    raw.as_deref().map_or(false, is_truthy)
}

fn non_empty(raw: &Option<String>) -> Option<String> {
    raw.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Query parameters of the affordability endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AffordabilityQuery {
    pub profession: Option<String>,
    /// Comma-separated amenity names
    pub amenities: Option<String>,
    pub area: Option<String>,
    pub property_type: Option<String>,
    pub bedrooms: Option<String>,
    pub furnished: Option<String>,
    pub pet_friendly: Option<String>,
    pub new_listing: Option<String>,
    pub family_friendly: Option<String>,
}

impl AffordabilityQuery {
    pub fn profession(&self) -> String {
        non_empty(&self.profession).unwrap_or_else(|| DEFAULT_PROFESSION.to_string())
    }

    pub fn to_filters(&self) -> EngineResult<AreaFilters> {
        let amenities = self
            .amenities
            .as_deref()
            .map(|raw| Amenity::parse_list(raw.split(',')))
            .unwrap_or_default();

        let bedrooms = match self.bedrooms.as_deref() {
            Some(raw) => BedroomFilter::parse(raw)?,
            None => None,
        };

        Ok(AreaFilters {
            amenities,
            area: non_empty(&self.area),
            property_type: non_empty(&self.property_type),
            bedrooms,
            furnished: flag_set(&self.furnished),
            pet_friendly: flag_set(&self.pet_friendly),
            new_listing: flag_set(&self.new_listing),
            family_friendly: flag_set(&self.family_friendly),
        })
    }
}

/// Bedroom count given as a JSON number or string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BedroomsParam {
    Number(i64),
    Text(String),
}

impl BedroomsParam {
    pub fn to_filter(&self) -> EngineResult<Option<BedroomFilter>> {
        match self {
            BedroomsParam::Number(n) => u32::try_from(*n)
                .map(|count| Some(BedroomFilter::from_count(count)))
                .map_err(|_| EngineError::InvalidArgument(format!("invalid bedroom count: {}", n))),
            BedroomsParam::Text(raw) => BedroomFilter::parse(raw),
        }
    }
}

/// Flag given as a JSON bool, number or string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagParam {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FlagParam {
    pub fn is_set(&self) -> bool {
        match self {
            FlagParam::Bool(b) => *b,
            FlagParam::Number(n) => *n != 0.0,
            FlagParam::Text(raw) => is_truthy(raw),
        }
    }
}

fn flag_param_set(param: &Option<FlagParam>) -> bool {
    param.as_ref().map_or(false, FlagParam::is_set)
}

/// Body of the suggestion endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SuggestRequest {
    #[serde(default = "default_income")]
    #[validate(range(min = 0.0))]
    pub income: f64,
    #[serde(default = "default_family")]
    pub family: u32,
    #[serde(default)]
    pub amenities: Vec<String>,
    /// Maximum distance to the nearest transit stop, in kilometers
    #[serde(default = "default_proximity")]
    #[validate(range(min = 0.0))]
    pub proximity: f64,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub bedrooms: Option<BedroomsParam>,
    #[serde(default)]
    pub furnished: Option<FlagParam>,
    #[serde(default)]
    pub pet_friendly: Option<FlagParam>,
    #[serde(default)]
    pub new_listing: Option<FlagParam>,
    #[serde(default)]
    pub family_friendly: Option<FlagParam>,
}

fn default_income() -> f64 {
    100000.0
}

fn default_family() -> u32 {
    1
}

fn default_proximity() -> f64 {
    10.0
}

impl Default for SuggestRequest {
    fn default() -> Self {
        Self {
            income: default_income(),
            family: default_family(),
            amenities: Vec::new(),
            proximity: default_proximity(),
            area: None,
            property_type: None,
            bedrooms: None,
            furnished: None,
            pet_friendly: None,
            new_listing: None,
            family_friendly: None,
        }
    }
}

impl SuggestRequest {
    pub fn to_query(&self) -> EngineResult<SuggestionQuery> {
        let bedrooms = match &self.bedrooms {
            Some(param) => param.to_filter()?,
            None => None,
        };

        let filters = AreaFilters {
            amenities: Amenity::parse_list(&self.amenities),
            area: non_empty(&self.area),
            property_type: non_empty(&self.property_type),
            bedrooms,
            furnished: flag_param_set(&self.furnished),
            pet_friendly: flag_param_set(&self.pet_friendly),
            new_listing: flag_param_set(&self.new_listing),
            family_friendly: flag_param_set(&self.family_friendly),
        };

        Ok(SuggestionQuery {
            filters,
            income: self.income,
            family_size: self.family,
            max_proximity_km: self.proximity,
        })
    }
}
