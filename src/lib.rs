pub mod cli;
pub mod commands;
pub mod error;
pub mod models;
pub mod output;
pub mod pagination;

use async_trait::async_trait;
use error::{Error, Result};
use models::{AccountRef, RawOrganization, RawUser};
use octocrab::{Octocrab, Page};
use pagination::MemberPage;
use reqwest::Url;

const NOT_FOUND_MESSAGE: &str = "Not Found";

/// Initialize a client instance with defaults and configuration
pub fn init(token: Option<String>) -> octocrab::Result<Octocrab> {
    with_token(octocrab::OctocrabBuilder::new(), token)
}

fn with_token(
    builder: octocrab::OctocrabBuilder,
    token: Option<String>,
) -> octocrab::Result<Octocrab> {
    match token {
        Some(value) => builder.personal_token(value).build(),
        None => builder.build(),
    }
}

/// Remote lookups needed to describe users and organizations
#[async_trait]
pub trait Directory {
    async fn user(&self, login: &str) -> Result<RawUser>;

    async fn organization(&self, login: &str) -> Result<RawOrganization>;

    /// A single page of an organization's members
    async fn member_page(
        &self,
        org: &str,
        page: u32,
        per_page: u8,
    ) -> Result<MemberPage<AccountRef>>;
}

/// The GitHub REST API
pub struct GitHub {
    instance: Octocrab,
    authenticated: bool,
}

impl GitHub {
    pub fn new(token: Option<String>) -> octocrab::Result<GitHub> {
        let authenticated = token.is_some();

        Ok(GitHub {
            instance: init(token)?,
            authenticated,
        })
    }

    /// Use an API root other than `https://api.github.com/` (e.g. GitHub Enterprise)
    pub fn with_base_url(base_url: &str, token: Option<String>) -> octocrab::Result<GitHub> {
        let authenticated = token.is_some();
        let builder = octocrab::OctocrabBuilder::new().base_url(base_url)?;

        Ok(GitHub {
            instance: with_token(builder, token)?,
            authenticated,
        })
    }

    /// Route for listing members, which includes concealed members only for authenticated requests
    fn members_route(&self, org: &str) -> String {
        if self.authenticated {
            format!("orgs/{}/members", org)
        } else {
            format!("orgs/{}/public_members", org)
        }
    }
}

fn not_found_or(login: &str, error: octocrab::Error) -> Error {
    match error {
        octocrab::Error::GitHub { source, .. } if source.message.contains(NOT_FOUND_MESSAGE) => {
            Error::NotFound(login.to_string())
        }
        other => Error::GitHub(other),
    }
}

#[async_trait]
impl Directory for GitHub {
    async fn user(&self, login: &str) -> Result<RawUser> {
        let route = format!("users/{}", login);

        self.instance
            .get::<RawUser, _, ()>(route, None)
            .await
            .map_err(|error| not_found_or(login, error))
    }

    async fn organization(&self, login: &str) -> Result<RawOrganization> {
        let route = format!("orgs/{}", login);

        self.instance
            .get::<RawOrganization, _, ()>(route, None)
            .await
            .map_err(|error| not_found_or(login, error))
    }

    async fn member_page(
        &self,
        org: &str,
        page: u32,
        per_page: u8,
    ) -> Result<MemberPage<AccountRef>> {
        let route = self.members_route(org);
        let opts = vec![("per_page", u32::from(per_page)), ("page", page)];

        let mut response = self
            .instance
            .get::<Page<AccountRef>, _, _>(route, Some(&opts))
            .await
            .map_err(|error| Error::PageFetchFailed {
                org: org.to_string(),
                page,
                source: Box::new(error),
            })?;

        let total_pages = last_page_number(response.last.as_ref()).unwrap_or(page);

        Ok(MemberPage {
            items: response.take_items(),
            total_pages,
        })
    }
}

/// Read the page number from a `rel="last"` link (e.g. `...?per_page=100&page=7`)
pub fn last_page_number(last: Option<&Url>) -> Option<u32> {
    last?
        .query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok())
}
