use serde::{Deserialize, Serialize};

use super::required_text;
use crate::error::RealtyError;
use crate::RealtyResult;

/// Admin sign-in form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn validate(self) -> RealtyResult<Self> {
        let email = required_text(&self.email, "email", "Email is required.")?;
        if self.password.is_empty() {
            return Err(RealtyError::required("password", "Password is required."));
        }
        Ok(Self {
            email,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminInfo {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Body of a login response. The token is the whole of the auth contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub admin: Option<AdminInfo>,
}

impl LoginResponse {
    /// The bearer token, or an error when the backend did not issue one.
    pub fn into_token(self) -> RealtyResult<(String, Option<AdminInfo>)> {
        match self.token.filter(|t| !t.trim().is_empty()) {
            Some(token) => Ok((token, self.admin)),
            None => Err(RealtyError::UnexpectedResponse(
                "No token returned".to_string(),
            )),
        }
    }
}
