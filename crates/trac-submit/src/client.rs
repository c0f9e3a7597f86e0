//! Blocking HTTP client for the tracking service.

use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use tracing::{debug, info};

use trac_model::Requestor;

use crate::error::{Result, SubmitError};
use crate::membership::first_member_name;

/// Base URL of the service API.
pub const DEFAULT_ENDPOINT: &str = "https://www.pivotaltracker.com/services/v3";

/// Header carrying the API token.
const TOKEN_HEADER: &str = "X-TrackerToken";

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Sink for single-story submissions.
pub trait StorySubmitter {
    /// Submit one XML story document.
    fn submit_story(&self, payload: &str) -> Result<()>;
}

/// Client bound to one project of the tracking service.
pub struct TrackerClient {
    client: Client,
    endpoint: String,
    api_token: String,
    project_id: u64,
}

impl fmt::Debug for TrackerClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackerClient")
            .field("endpoint", &self.endpoint)
            .field("api_token", &"<redacted>")
            .field("project_id", &self.project_id)
            .finish_non_exhaustive()
    }
}

impl TrackerClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_token: impl Into<String>,
        project_id: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(SubmitError::Client)?;
        let endpoint: String = endpoint.into();

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_token: api_token.into(),
            project_id,
        })
    }

    #[must_use]
    pub fn project_id(&self) -> u64 {
        self.project_id
    }

    /// `<endpoint>/projects/<id>`.
    #[must_use]
    pub fn project_url(&self) -> String {
        format!("{}/projects/{}", self.endpoint, self.project_id)
    }

    #[must_use]
    pub fn memberships_url(&self) -> String {
        format!("{}/memberships", self.project_url())
    }

    #[must_use]
    pub fn stories_url(&self) -> String {
        format!("{}/stories", self.project_url())
    }

    /// Name of the first project member, used as requestor for every story.
    ///
    /// Lookup failures are logged and yield [`Requestor::Unresolved`].
    pub fn fetch_default_requestor(&self) -> Requestor {
        match self.fetch_first_member() {
            Ok(Some(name)) => {
                info!(requestor = %name, "resolved default requestor");
                Requestor::Resolved(name)
            }
            Ok(None) => {
                debug!("membership roster is empty, requestor left unresolved");
                Requestor::Unresolved
            }
            Err(err) => {
                debug!(error = %err, "membership lookup failed, requestor left unresolved");
                Requestor::Unresolved
            }
        }
    }

    fn fetch_first_member(&self) -> Result<Option<String>> {
        let url = self.memberships_url();
        debug!(%url, "fetching project memberships");

        let response = self
            .client
            .get(&url)
            .header(TOKEN_HEADER, &self.api_token)
            .header(USER_AGENT, user_agent())
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        first_member_name(&body)
    }
}

impl StorySubmitter for TrackerClient {
    fn submit_story(&self, payload: &str) -> Result<()> {
        let response = self
            .client
            .post(self.stories_url())
            .header(TOKEN_HEADER, &self.api_token)
            .header(CONTENT_TYPE, "application/xml")
            .header(USER_AGENT, user_agent())
            .body(payload.to_owned())
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        debug!(status = status.as_u16(), "story accepted");
        Ok(())
    }
}

fn user_agent() -> String {
    format!("trac-migrate/{}", env!("CARGO_PKG_VERSION"))
}
