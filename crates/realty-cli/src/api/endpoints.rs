//! Backend routes, relative to the API base URL.

pub const LOGIN: &str = "api/admin/login";

pub const PROPERTIES: &str = "api/property/getProperties";
pub const PROPERTY: &str = "api/property/getProperty";
pub const CREATE_PROPERTY: &str = "api/property/createProperty";
pub const UPDATE_PROPERTY: &str = "api/property/updateProperty";
pub const DELETE_PROPERTY: &str = "api/property/deleteProperty";

pub const FAQS: &str = "api/faq/getfaqs";
pub const FAQ: &str = "api/faq/getfaq";
pub const CREATE_FAQ: &str = "api/faq/createfaq";
pub const UPDATE_FAQ: &str = "api/faq/updatefaq";
pub const DELETE_FAQ: &str = "api/faq/deletefaq";

pub const TEAM: &str = "api/team/getTeams";
// the backend route really is spelled this way
pub const CREATE_TEAM_MEMBER: &str = "api/team/cerateTeam";
pub const UPDATE_TEAM_MEMBER: &str = "api/team/updateTeam";

pub const CONTACTS: &str = "api/contact/getContacts";
pub const CONTACT: &str = "api/contact/getContact";
pub const CREATE_CONTACT: &str = "api/contact/createContact";
pub const DELETE_CONTACT: &str = "api/contact/deleteContact";

/// `route/{id}` with the id percent-safe for a path segment.
pub fn with_id(route: &str, id: &str) -> String {
    let encoded: String = id
        .trim()
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{b:02X}"),
        })
        .collect();
    format!("{route}/{encoded}")
}
