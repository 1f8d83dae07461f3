use crate::core::error::{EngineError, EngineResult};
use crate::models::Listing;

/// Amenities a listing can be required to have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Amenity {
    School,
    Park,
    Supermarket,
}

impl Amenity {
    /// Parse an amenity name; unknown names yield `None`
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "school" => Some(Amenity::School),
            "park" => Some(Amenity::Park),
            "supermarket" => Some(Amenity::Supermarket),
            _ => None,
        }
    }

    /// Parse a list of names, silently dropping unrecognized ones
    pub fn parse_list<I, S>(names: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut amenities = Vec::new();
        for name in names {
            match Self::from_name(name.as_ref()) {
                Some(amenity) if !amenities.contains(&amenity) => amenities.push(amenity),
                Some(_) => {}
                None => tracing::debug!("Ignoring unknown amenity: {}", name.as_ref()),
            }
        }
        amenities
    }

    #[inline]
    pub fn is_available(self, listing: &Listing) -> bool {
        match self {
            Amenity::School => listing.school,
            Amenity::Park => listing.park,
            Amenity::Supermarket => listing.supermarket,
        }
    }
}

/// Bedroom count constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BedroomFilter {
    Exactly(u32),
    AtLeast(u32),
}

impl BedroomFilter {
    /// The value that means "this many or more"
    pub const OPEN_ENDED: u32 = 5;

    const OPEN_ENDED_LITERAL: &'static str = "5";

    /// Parse a raw bedroom parameter
    ///
    /// An empty value imposes no constraint and the literal `5` means five or
    /// more. Any other non-negative integer, including spellings such as `05`
    /// or `+5`, is an exact match.
    pub fn parse(raw: &str) -> EngineResult<Option<Self>> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        if raw == Self::OPEN_ENDED_LITERAL {
            return Ok(Some(BedroomFilter::AtLeast(Self::OPEN_ENDED)));
        }

        let count: u32 = raw
            .parse()
            .map_err(|_| EngineError::InvalidArgument(format!("invalid bedroom count: {:?}", raw)))?;

        Ok(Some(BedroomFilter::Exactly(count)))
    }

    pub fn from_count(count: u32) -> Self {
        if count == Self::OPEN_ENDED {
            BedroomFilter::AtLeast(count)
        } else {
            BedroomFilter::Exactly(count)
        }
    }

    #[inline]
    pub fn matches(self, bedrooms: u32) -> bool {
        match self {
            BedroomFilter::Exactly(n) => bedrooms == n,
            BedroomFilter::AtLeast(n) => bedrooms >= n,
        }
    }
}

/// Optional listing criteria, combined with AND semantics
///
/// Unset fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AreaFilters {
    pub amenities: Vec<Amenity>,
    pub area: Option<String>,
    pub property_type: Option<String>,
    pub bedrooms: Option<BedroomFilter>,
    pub furnished: bool,
    pub pet_friendly: bool,
    pub new_listing: bool,
    pub family_friendly: bool,
}

/// Check a listing against every criterion in `filters`
#[inline]
pub fn matches_filters(listing: &Listing, filters: &AreaFilters) -> bool {
    if !filters.amenities.iter().all(|a| a.is_available(listing)) {
        return false;
    }

    if let Some(area) = filters.area.as_deref().filter(|a| !a.is_empty()) {
        if !listing.location.to_lowercase().contains(&area.to_lowercase()) {
            return false;
        }
    }

    if let Some(property_type) = filters.property_type.as_deref().filter(|p| !p.is_empty()) {
        if listing.property_type != property_type {
            return false;
        }
    }

    if let Some(bedrooms) = filters.bedrooms {
        if !bedrooms.matches(listing.bedrooms) {
            return false;
        }
    }

    if filters.furnished && !listing.furnished {
        return false;
    }
    if filters.pet_friendly && !listing.pet_friendly {
        return false;
    }
    if filters.new_listing && !listing.new_listing {
        return false;
    }
    if filters.family_friendly && !listing.family_friendly {
        return false;
    }

    true
}

/// Filter listings, preserving dataset order
pub fn apply_filters<'a>(listings: &'a [Listing], filters: &AreaFilters) -> Vec<&'a Listing> {
    listings
        .iter()
        .filter(|listing| matches_filters(listing, filters))
        .collect()
}
