use serde::{Deserialize, Deserializer, Serialize};

use super::required_text;
use crate::pricing::{normalize_optional_price, PriceInput};
use crate::types::Money;
use crate::RealtyResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Listing category. Unknown categories are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyType {
    Villa,
    Land,
    Commercial,
    Other(String),
}

impl PropertyType {
    pub fn as_str(&self) -> &str {
        match self {
            PropertyType::Villa => "villa",
            PropertyType::Land => "land",
            PropertyType::Commercial => "commercial",
            PropertyType::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for PropertyType {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "villa" => PropertyType::Villa,
            "land" => PropertyType::Land,
            "commercial" => PropertyType::Commercial,
            _ => PropertyType::Other(s),
        }
    }
}

impl From<PropertyType> for String {
    fn from(t: PropertyType) -> Self {
        t.as_str().to_string()
    }
}

/// Construction stage of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyStatus {
    Ongoing,
    Completed,
    Upcoming,
    Other(String),
}

impl PropertyStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PropertyStatus::Ongoing => "ongoing",
            PropertyStatus::Completed => "completed",
            PropertyStatus::Upcoming => "upcoming",
            PropertyStatus::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for PropertyStatus {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "ongoing" => PropertyStatus::Ongoing,
            "completed" => PropertyStatus::Completed,
            "upcoming" => PropertyStatus::Upcoming,
            _ => PropertyStatus::Other(s),
        }
    }
}

impl From<PropertyStatus> for String {
    fn from(s: PropertyStatus) -> Self {
        s.as_str().to_string()
    }
}

/// A listing as the backend returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<String>,
    #[serde(default, deserialize_with = "deserialize_amenities")]
    pub amenities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PropertyStatus>,
    #[serde(default, deserialize_with = "deserialize_images")]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Create/update payload for a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDraft {
    pub title: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub location: String,
    pub price: String,
    #[serde(default)]
    pub features: String,
    #[serde(default, deserialize_with = "deserialize_amenities")]
    pub amenities: Vec<String>,
    pub status: PropertyStatus,
    #[serde(default, deserialize_with = "deserialize_images")]
    pub images: Vec<String>,
}

// ---------------------------------------------------------------------------
// Behaviour
// ---------------------------------------------------------------------------

impl Property {
    /// Normalized asking price; zero when the listing has none.
    pub fn price_amount(&self) -> Money {
        normalize_optional_price(self.price.as_ref())
    }

    /// Category key used for grouping: lower-cased, `other` when missing.
    pub fn type_key(&self) -> String {
        self.property_type
            .as_ref()
            .map(|t| t.as_str().to_lowercase())
            .unwrap_or_else(|| "other".to_string())
    }

    /// Status label in lower case, empty when missing.
    pub fn status_key(&self) -> String {
        self.status
            .as_ref()
            .map(|s| s.as_str().to_lowercase())
            .unwrap_or_default()
    }

    /// Opens the loan calculator against this listing's price.
    #[cfg(feature = "emi")]
    pub fn emi_calculator(&self) -> crate::emi::EmiCalculator {
        let price = self
            .price
            .clone()
            .unwrap_or_else(|| PriceInput::Text(String::new()));
        crate::emi::EmiCalculator::new(&price)
    }

    /// Lower-cased text the admin search box matches against.
    pub fn search_text(&self) -> String {
        let mut parts: Vec<String> = vec![self.title.clone()];
        if let Some(t) = &self.property_type {
            parts.push(t.as_str().to_string());
        }
        parts.push(self.location.clone());
        if let Some(s) = &self.status {
            parts.push(s.as_str().to_string());
        }
        if let Some(p) = &self.price {
            parts.push(p.to_string());
        }
        if let Some(f) = &self.features {
            parts.push(f.clone());
        }
        parts.extend(self.amenities.iter().cloned());

        parts
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}

impl PropertyDraft {
    /// Trim and check the fields the admin form marks as required.
    pub fn validate(self) -> RealtyResult<Self> {
        Ok(Self {
            title: required_text(&self.title, "title", "Title is required.")?,
            location: required_text(&self.location, "location", "Location is required.")?,
            price: required_text(&self.price, "price", "Price is required.")?,
            features: self.features.trim().to_string(),
            amenities: normalize_list(self.amenities),
            images: normalize_list(self.images),
            ..self
        })
    }
}

impl From<&Property> for PropertyDraft {
    /// Prefill an edit form from an existing listing.
    fn from(p: &Property) -> Self {
        Self {
            title: p.title.clone(),
            property_type: p.property_type.clone().unwrap_or(PropertyType::Villa),
            location: p.location.clone(),
            price: p.price.as_ref().map(|v| v.to_string()).unwrap_or_default(),
            features: p.features.clone().unwrap_or_default(),
            amenities: p.amenities.clone(),
            status: p.status.clone().unwrap_or(PropertyStatus::Completed),
            images: p.images.clone(),
        }
    }
}

/// Split a comma- or newline-separated amenities string into entries.
pub fn parse_amenities(text: &str) -> Vec<String> {
    text.split(|c: char| c == ',' || c == '\n')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn normalize_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AmenitiesWire {
    List(Vec<Option<String>>),
    Text(String),
}

fn deserialize_amenities<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let wire: Option<AmenitiesWire> = Option::deserialize(deserializer)?;
    Ok(match wire {
        Some(AmenitiesWire::List(items)) => normalize_list(items.into_iter().flatten().collect()),
        Some(AmenitiesWire::Text(text)) => parse_amenities(&text),
        None => Vec::new(),
    })
}

fn deserialize_images<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items: Option<Vec<Option<String>>> = Option::deserialize(deserializer)?;
    Ok(normalize_list(items.unwrap_or_default().into_iter().flatten().collect()))
}
