use std::path::PathBuf;

use crate::api::ApiClient;
use crate::config::SiteConfig;
use crate::session;

/// Shared state for one invocation: the loaded config and where the admin
/// session lives.
pub struct Context {
    pub config: SiteConfig,
    pub session_path: PathBuf,
}

impl Context {
    pub fn new(config: SiteConfig) -> Self {
        let session_path = config.session_path();
        Self {
            config,
            session_path,
        }
    }

    /// Client for the public pages; never sends a token.
    pub fn public_client(&self) -> Result<ApiClient, Box<dyn std::error::Error>> {
        Ok(ApiClient::new(&self.config.api)?)
    }

    /// Client for back-office calls. Fails before touching the network when
    /// nobody is signed in.
    pub fn admin_client(&self) -> Result<ApiClient, Box<dyn std::error::Error>> {
        let token = session::require_token(&self.session_path)?;
        Ok(ApiClient::new(&self.config.api)?.with_token(token))
    }
}
