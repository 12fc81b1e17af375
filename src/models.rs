use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};

/// A user as returned by `/users/{username}`
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RawUser {
    pub login: Option<String>,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub blog: Option<String>,
    pub html_url: Option<String>,
    pub company: Option<String>,
    pub hireable: Option<bool>,
    pub public_repos: Option<u64>,
    pub public_gists: Option<u64>,
    pub followers: Option<u64>,
    pub following: Option<u64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// An organization as returned by `/orgs/{org}`
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RawOrganization {
    pub login: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub blog: Option<String>,
    pub html_url: Option<String>,
    pub email: Option<String>,
    pub public_repos: Option<u64>,
    pub public_gists: Option<u64>,
    pub followers: Option<u64>,
    pub following: Option<u64>,
}

/// One entry of an organization member page
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AccountRef {
    pub login: String,
}

impl From<AccountRef> for RawUser {
    fn from(account: AccountRef) -> Self {
        RawUser {
            login: Some(account.login),
            ..RawUser::default()
        }
    }
}

/// Profile fields shared by users and organizations
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Account {
    pub name: String,
    #[serde(rename = "username")]
    pub login: String,
    pub bio: String,
    pub location: String,
    pub website: String,
    #[serde(rename = "github_url")]
    pub profile_url: String,
    pub repos: u64,
    pub gists: u64,
    pub followers: u64,
    pub following: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct User {
    #[serde(flatten)]
    pub account: Account,
    #[serde(rename = "org")]
    pub company: String,
    pub hireable: bool,
    pub last_active: DateTime<Utc>,
    pub account_created: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Organization {
    #[serde(flatten)]
    pub account: Account,
    pub email: String,
    /// Unknown when the member list could not be fetched
    pub public_member_count: Option<usize>,
    /// Only populated when every member page was collected
    pub org_members: Option<Vec<User>>,
}

impl From<RawUser> for User {
    fn from(raw: RawUser) -> Self {
        User {
            account: Account {
                name: raw.name.unwrap_or_default(),
                login: raw.login.unwrap_or_default(),
                bio: raw.bio.unwrap_or_default(),
                location: raw.location.unwrap_or_default(),
                website: raw.blog.unwrap_or_default(),
                profile_url: raw.html_url.unwrap_or_default(),
                repos: raw.public_repos.unwrap_or_default(),
                gists: raw.public_gists.unwrap_or_default(),
                followers: raw.followers.unwrap_or_default(),
                following: raw.following.unwrap_or_default(),
            },
            company: raw.company.unwrap_or_default(),
            hireable: raw.hireable.unwrap_or_default(),
            // The default `DateTime<Utc>` is the Unix epoch
            last_active: raw.updated_at.unwrap_or_default(),
            account_created: raw.created_at.unwrap_or_default(),
        }
    }
}

impl From<RawOrganization> for Organization {
    fn from(raw: RawOrganization) -> Self {
        Organization {
            account: Account {
                name: raw.name.unwrap_or_default(),
                login: raw.login.unwrap_or_default(),
                bio: raw.description.unwrap_or_default(),
                location: raw.location.unwrap_or_default(),
                website: raw.blog.unwrap_or_default(),
                profile_url: raw.html_url.unwrap_or_default(),
                repos: raw.public_repos.unwrap_or_default(),
                gists: raw.public_gists.unwrap_or_default(),
                followers: raw.followers.unwrap_or_default(),
                following: raw.following.unwrap_or_default(),
            },
            email: raw.email.unwrap_or_default(),
            public_member_count: None,
            org_members: None,
        }
    }
}
