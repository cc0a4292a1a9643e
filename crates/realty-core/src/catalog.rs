//! List-view operations over fetched listings, enquiries and team members.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::RealtyError;
use crate::models::{Contact, Property, PropertyStatus, TeamMember};

/// Members shown in the public team section.
pub const SHOWCASE_TEAM_SIZE: usize = 2;

/// Status chip selection on the listings page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusFilter {
    All,
    Only(PropertyStatus),
}

impl Default for StatusFilter {
    /// The public listing opens on ongoing projects.
    fn default() -> Self {
        StatusFilter::Only(PropertyStatus::Ongoing)
    }
}

impl FromStr for StatusFilter {
    type Err = RealtyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        match key.as_str() {
            "" => Err(RealtyError::InvalidInput {
                field: "status".into(),
                reason: "status filter cannot be empty".into(),
            }),
            "all" => Ok(StatusFilter::All),
            _ => Ok(StatusFilter::Only(PropertyStatus::from(key))),
        }
    }
}

impl StatusFilter {
    pub fn matches(&self, property: &Property) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => property.status_key() == status.as_str().to_lowercase(),
        }
    }
}

/// Listings sharing a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyGroup {
    pub key: String,
    pub properties: Vec<Property>,
}

pub fn filter_by_status(properties: &[Property], filter: &StatusFilter) -> Vec<Property> {
    properties
        .iter()
        .filter(|p| filter.matches(p))
        .cloned()
        .collect()
}

/// Group by lower-cased category, groups in key order, listings in input order.
pub fn group_by_type(properties: &[Property]) -> Vec<PropertyGroup> {
    let mut groups: BTreeMap<String, Vec<Property>> = BTreeMap::new();
    for p in properties {
        groups.entry(p.type_key()).or_default().push(p.clone());
    }
    groups
        .into_iter()
        .map(|(key, properties)| PropertyGroup { key, properties })
        .collect()
}

pub fn search_properties(properties: &[Property], query: &str) -> Vec<Property> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return properties.to_vec();
    }
    properties
        .iter()
        .filter(|p| p.search_text().contains(&q))
        .cloned()
        .collect()
}

pub fn search_contacts(contacts: &[Contact], query: &str) -> Vec<Contact> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return contacts.to_vec();
    }
    contacts
        .iter()
        .filter(|c| c.search_text().contains(&q))
        .cloned()
        .collect()
}

/// The first `n` members, in backend order.
pub fn showcase_team(members: &[TeamMember], n: usize) -> Vec<TeamMember> {
    members.iter().take(n).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(id: &str, kind: Option<&str>, status: Option<&str>) -> Property {
        let mut value = serde_json::json!({ "_id": id, "title": format!("Listing {id}") });
        if let Some(k) = kind {
            value["type"] = k.into();
        }
        if let Some(s) = status {
            value["status"] = s.into();
        }
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_default_filter_is_ongoing() {
        let all = vec![
            listing("1", Some("villa"), Some("Ongoing")),
            listing("2", Some("land"), Some("completed")),
            listing("3", None, None),
        ];
        let shown = filter_by_status(&all, &StatusFilter::default());
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].id, "1");
    }

    #[test]
    fn test_all_filter_passes_everything() {
        let all = vec![listing("1", None, None), listing("2", None, Some("upcoming"))];
        assert_eq!(filter_by_status(&all, &StatusFilter::All).len(), 2);
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!("ALL".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "Completed".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(PropertyStatus::Completed)
        );
        assert!("  ".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn test_groups_sorted_by_key() {
        let all = vec![
            listing("1", Some("villa"), None),
            listing("2", Some("Commercial"), None),
            listing("3", None, None),
            listing("4", Some("villa"), None),
        ];
        let groups = group_by_type(&all);
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["commercial", "other", "villa"]);
        let villa_ids: Vec<&str> = groups[2].properties.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(villa_ids, vec!["1", "4"]);
    }

    #[test]
    fn test_empty_search_returns_all() {
        let all = vec![listing("1", None, None), listing("2", None, None)];
        assert_eq!(search_properties(&all, "   ").len(), 2);
        assert_eq!(search_properties(&all, "listing 2").len(), 1);
    }

    #[test]
    fn test_showcase_takes_leading_members() {
        let members: Vec<TeamMember> = (0..4)
            .map(|i| serde_json::from_value(serde_json::json!({"_id": i.to_string(), "name": "x"})).unwrap())
            .collect();
        let shown = showcase_team(&members, SHOWCASE_TEAM_SIZE);
        assert_eq!(shown.len(), 2);
        assert_eq!(shown[1].id, "1");
    }
}
