use crate::error::{Error, Result};
use crate::models::{Organization, RawUser, User};
use crate::pagination::{collect_pages, MEMBERS_PAGE_SIZE};
use crate::Directory;

/// Look up a user and map it for display
///
/// Any failure of the lookup itself is reported as [`Error::NotFound`].
pub async fn lookup_user<D: Directory + ?Sized>(directory: &D, login: &str) -> Result<User> {
    match directory.user(login).await {
        Ok(raw) => Ok(User::from(raw)),
        Err(error) => Err(as_not_found(login, error)),
    }
}

/// Look up an organization and its members
///
/// The first page of members is always requested to count them. With `collect_members` set,
/// every page is collected and each member is resolved to a full profile. A failed member
/// request leaves the count and member list unset but still returns the organization.
pub async fn lookup_organization<D: Directory + ?Sized>(
    directory: &D,
    login: &str,
    collect_members: bool,
) -> Result<Organization> {
    let mut org = match directory.organization(login).await {
        Ok(raw) => Organization::from(raw),
        Err(error) => return Err(as_not_found(login, error)),
    };

    let fetch_page = |page, per_page| directory.member_page(login, page, per_page);

    match collect_pages(fetch_page, MEMBERS_PAGE_SIZE, collect_members).await {
        Ok(refs) => {
            log::info!("Found {} members of {}", refs.len(), login);
            org.public_member_count = Some(refs.len());

            if collect_members {
                let mut members = Vec::with_capacity(refs.len());

                for member in refs {
                    log::info!("Loading member {}", member.login);
                    let raw = match directory.user(&member.login).await {
                        Ok(raw) => raw,
                        Err(error) => {
                            log::warn!("Could not load member {}: {}", member.login, error);
                            RawUser::from(member)
                        }
                    };
                    members.push(User::from(raw));
                }

                org.org_members = Some(members);
            }
        }
        Err(error) => log::error!("{}", error),
    }

    Ok(org)
}

fn as_not_found(login: &str, error: Error) -> Error {
    match error {
        Error::NotFound(_) => error,
        other => {
            log::warn!("Lookup of {} failed: {}", login, other);
            Error::NotFound(login.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountRef, RawOrganization};
    use crate::pagination::MemberPage;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::io;
    use std::sync::Mutex;

    /// In-memory directory that records every request
    #[derive(Default)]
    struct FakeDirectory {
        users: HashMap<String, RawUser>,
        orgs: HashMap<String, RawOrganization>,
        member_pages: Vec<Vec<String>>,
        failing_page: Option<u32>,
        user_calls: Mutex<Vec<String>>,
        page_calls: Mutex<Vec<u32>>,
    }

    impl FakeDirectory {
        fn with_user(mut self, login: &str, name: &str) -> Self {
            self.users.insert(
                login.to_string(),
                RawUser {
                    login: Some(login.to_string()),
                    name: Some(name.to_string()),
                    ..RawUser::default()
                },
            );
            self
        }

        fn with_org(mut self, login: &str) -> Self {
            self.orgs.insert(
                login.to_string(),
                RawOrganization {
                    login: Some(login.to_string()),
                    ..RawOrganization::default()
                },
            );
            self
        }

        fn with_members(mut self, pages: Vec<Vec<String>>) -> Self {
            self.member_pages = pages;
            self
        }

        fn failing_on(mut self, page: u32) -> Self {
            self.failing_page = Some(page);
            self
        }

        fn page_calls(&self) -> Vec<u32> {
            self.page_calls.lock().unwrap().clone()
        }

        fn user_calls(&self) -> Vec<String> {
            self.user_calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Directory for FakeDirectory {
        async fn user(&self, login: &str) -> Result<RawUser> {
            self.user_calls.lock().unwrap().push(login.to_string());
            self.users
                .get(login)
                .cloned()
                .ok_or_else(|| Error::NotFound(login.to_string()))
        }

        async fn organization(&self, login: &str) -> Result<RawOrganization> {
            self.orgs
                .get(login)
                .cloned()
                .ok_or_else(|| Error::NotFound(login.to_string()))
        }

        async fn member_page(
            &self,
            org: &str,
            page: u32,
            _per_page: u8,
        ) -> Result<MemberPage<AccountRef>> {
            self.page_calls.lock().unwrap().push(page);

            if self.failing_page == Some(page) {
                return Err(Error::PageFetchFailed {
                    org: org.to_string(),
                    page,
                    source: Box::new(io::Error::new(io::ErrorKind::Other, "connection reset")),
                });
            }

            let items = self
                .member_pages
                .get(page as usize - 1)
                .cloned()
                .unwrap_or_default()
                .into_iter()
                .map(|login| AccountRef { login })
                .collect();

            Ok(MemberPage {
                items,
                total_pages: self.member_pages.len() as u32,
            })
        }
    }

    fn logins(prefix: &str, count: usize) -> Vec<String> {
        (0..count).map(|i| format!("{}{}", prefix, i)).collect()
    }

    #[tokio::test]
    async fn user_is_mapped() {
        let directory = FakeDirectory::default().with_user("octocat", "The Octocat");

        let user = lookup_user(&directory, "octocat").await.unwrap();

        assert_eq!(user.account.login, "octocat");
        assert_eq!(user.account.name, "The Octocat");
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let directory = FakeDirectory::default();

        let result = lookup_user(&directory, "nobody").await;

        assert!(matches!(result, Err(Error::NotFound(login)) if login == "nobody"));
    }

    #[tokio::test]
    async fn missing_org_makes_no_member_requests() {
        let directory = FakeDirectory::default().with_members(vec![logins("m", 3)]);

        let result = lookup_organization(&directory, "nope", true).await;

        assert!(matches!(result, Err(Error::NotFound(login)) if login == "nope"));
        assert!(directory.page_calls().is_empty());
        assert!(directory.user_calls().is_empty());
    }

    #[tokio::test]
    async fn org_without_collection_counts_first_page() {
        let directory = FakeDirectory::default()
            .with_org("google")
            .with_members(vec![logins("a", 100), logins("b", 100)]);

        let org = lookup_organization(&directory, "google", false).await.unwrap();

        assert_eq!(org.public_member_count, Some(100));
        assert_eq!(org.org_members, None);
        assert_eq!(directory.page_calls(), vec![1]);
        assert!(directory.user_calls().is_empty());
    }

    #[tokio::test]
    async fn org_collection_resolves_every_member_in_order() {
        let directory = FakeDirectory::default()
            .with_org("google")
            .with_user("a0", "Ada")
            .with_members(vec![logins("a", 100), logins("b", 42)]);

        let org = lookup_organization(&directory, "google", true).await.unwrap();
        let members = org.org_members.unwrap();

        assert_eq!(org.public_member_count, Some(142));
        assert_eq!(members.len(), 142);
        assert_eq!(members[0].account.name, "Ada");
        // Members without a resolvable profile keep their login
        assert_eq!(members[1].account.login, "a1");
        assert_eq!(members[1].account.name, "");
        assert_eq!(members[141].account.login, "b41");
        assert_eq!(directory.page_calls(), vec![1, 2]);
        assert_eq!(directory.user_calls().len(), 142);
    }

    #[tokio::test]
    async fn failed_member_page_keeps_org_profile() {
        let directory = FakeDirectory::default()
            .with_org("google")
            .with_members(vec![logins("a", 100), logins("b", 100), logins("c", 3)])
            .failing_on(2);

        let org = lookup_organization(&directory, "google", true).await.unwrap();

        assert_eq!(org.account.login, "google");
        assert_eq!(org.public_member_count, None);
        assert_eq!(org.org_members, None);
        assert_eq!(directory.page_calls(), vec![1, 2]);
        assert!(directory.user_calls().is_empty());
    }

    #[tokio::test]
    async fn empty_org_collects_nothing() {
        let directory = FakeDirectory::default().with_org("tiny");

        let org = lookup_organization(&directory, "tiny", true).await.unwrap();

        assert_eq!(org.public_member_count, Some(0));
        assert_eq!(org.org_members, Some(vec![]));
        assert_eq!(directory.page_calls(), vec![1]);
    }
}
