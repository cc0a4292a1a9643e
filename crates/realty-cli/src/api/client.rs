use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};

use realty_core::envelope::{self, ApiMessage};
use realty_core::models::{
    Contact, ContactSubmission, Credentials, Faq, FaqDraft, LoginResponse, Property,
    PropertyDraft, TeamMember, TeamMemberDraft,
};

use super::endpoints::{self, with_id};
use super::error::ApiError;
use crate::config::ApiConfig;

pub type ApiResult<T> = Result<T, ApiError>;

/// Blocking client for the listings backend. One request at a time; admin
/// calls carry the bearer token it was built with.
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            token: None,
        })
    }

    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    // -- auth --------------------------------------------------------------

    pub fn login(&self, credentials: &Credentials) -> ApiResult<LoginResponse> {
        let body = self.send(Method::POST, endpoints::LOGIN, Some(credentials))?;
        Ok(serde_json::from_str(&body).map_err(realty_core::RealtyError::from)?)
    }

    // -- properties --------------------------------------------------------

    pub fn list_properties(&self) -> ApiResult<Vec<Property>> {
        self.fetch_list(endpoints::PROPERTIES)
    }

    pub fn get_property(&self, id: &str) -> ApiResult<Property> {
        self.fetch_item(&with_id(endpoints::PROPERTY, id))
    }

    pub fn create_property(&self, draft: &PropertyDraft) -> ApiResult<Property> {
        self.submit(Method::POST, endpoints::CREATE_PROPERTY, draft)
    }

    pub fn update_property(&self, id: &str, draft: &PropertyDraft) -> ApiResult<Property> {
        self.submit(Method::PUT, &with_id(endpoints::UPDATE_PROPERTY, id), draft)
    }

    pub fn delete_property(&self, id: &str) -> ApiResult<ApiMessage> {
        self.remove(&with_id(endpoints::DELETE_PROPERTY, id))
    }

    // -- faqs --------------------------------------------------------------

    pub fn list_faqs(&self) -> ApiResult<Vec<Faq>> {
        self.fetch_list(endpoints::FAQS)
    }

    pub fn get_faq(&self, id: &str) -> ApiResult<Faq> {
        self.fetch_item(&with_id(endpoints::FAQ, id))
    }

    pub fn create_faq(&self, draft: &FaqDraft) -> ApiResult<Faq> {
        self.submit(Method::POST, endpoints::CREATE_FAQ, draft)
    }

    pub fn update_faq(&self, id: &str, draft: &FaqDraft) -> ApiResult<Faq> {
        self.submit(Method::PUT, &with_id(endpoints::UPDATE_FAQ, id), draft)
    }

    pub fn delete_faq(&self, id: &str) -> ApiResult<ApiMessage> {
        self.remove(&with_id(endpoints::DELETE_FAQ, id))
    }

    // -- team --------------------------------------------------------------

    pub fn list_team(&self) -> ApiResult<Vec<TeamMember>> {
        self.fetch_list(endpoints::TEAM)
    }

    pub fn create_team_member(&self, draft: &TeamMemberDraft) -> ApiResult<TeamMember> {
        self.submit(Method::POST, endpoints::CREATE_TEAM_MEMBER, draft)
    }

    pub fn update_team_member(&self, id: &str, draft: &TeamMemberDraft) -> ApiResult<TeamMember> {
        self.submit(Method::PUT, &with_id(endpoints::UPDATE_TEAM_MEMBER, id), draft)
    }

    // -- contacts ----------------------------------------------------------

    pub fn submit_contact(&self, submission: &ContactSubmission) -> ApiResult<Contact> {
        self.submit(Method::POST, endpoints::CREATE_CONTACT, submission)
    }

    pub fn list_contacts(&self) -> ApiResult<Vec<Contact>> {
        self.fetch_list(endpoints::CONTACTS)
    }

    pub fn get_contact(&self, id: &str) -> ApiResult<Contact> {
        self.fetch_item(&with_id(endpoints::CONTACT, id))
    }

    pub fn delete_contact(&self, id: &str) -> ApiResult<ApiMessage> {
        self.remove(&with_id(endpoints::DELETE_CONTACT, id))
    }

    // -- plumbing ----------------------------------------------------------

    fn fetch_list<T: DeserializeOwned>(&self, path: &str) -> ApiResult<Vec<T>> {
        let body = self.send::<()>(Method::GET, path, None)?;
        Ok(envelope::decode_list(&body)?)
    }

    fn fetch_item<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let body = self.send::<()>(Method::GET, path, None)?;
        Ok(envelope::decode_item(&body)?)
    }

    fn submit<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        payload: &B,
    ) -> ApiResult<T> {
        let body = self.send(method, path, Some(payload))?;
        Ok(envelope::decode_item(&body)?)
    }

    fn remove(&self, path: &str) -> ApiResult<ApiMessage> {
        let body = self.send::<()>(Method::DELETE, path, None)?;
        Ok(envelope::decode_message(&body)?)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = join_url(&self.base_url, path);
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn send<B: Serialize>(&self, method: Method, path: &str, payload: Option<&B>) -> ApiResult<String> {
        let started = Instant::now();
        tracing::debug!(%method, path, authenticated = self.is_authenticated(), "sending request");

        let mut builder = self.request(method.clone(), path);
        if let Some(payload) = payload {
            builder = builder.json(payload);
        }

        let response = builder.send()?;
        let status = response.status();
        let body = response.text()?;

        tracing::info!(
            %method,
            path,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request complete"
        );

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), path, "request rejected");
            return Err(ApiError::from_status(status, &body));
        }
        Ok(body)
    }
}

/// Join the base URL and a route with exactly one `/` between them.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim().trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
