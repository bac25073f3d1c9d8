//! Authorization strategies for command execution.
//!
//! Every turn goes through exactly one [`Authorizer`] before any parsing
//! happens. A rejected user gets no reply at all, so nothing leaks about
//! which commands exist.

use std::collections::HashSet;
use std::future::Future;

use async_trait::async_trait;

use crate::session::Identity;

/// Decides whether an identity may run commands.
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn is_authorized(&self, user: &Identity) -> bool;
}

/// Lets everyone through. Used when no authorizer is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

#[async_trait]
impl Authorizer for AllowAll {
    async fn is_authorized(&self, _user: &Identity) -> bool {
        true
    }
}

/// Admits identities whose id or display name is on a fixed list.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    allowed: HashSet<String>,
}

impl AllowList {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    pub fn permits(&self, user: &Identity) -> bool {
        self.allowed.contains(&user.id) || self.allowed.contains(&user.name)
    }
}

#[async_trait]
impl Authorizer for AllowList {
    async fn is_authorized(&self, user: &Identity) -> bool {
        self.permits(user)
    }
}

/// Wraps an async closure as an authorizer.
///
/// ```ignore
/// let auth = FnAuthorizer::new(|user: Identity| async move { user.name == "admin" });
/// ```
pub struct FnAuthorizer<F> {
    predicate: F,
}

impl<F> FnAuthorizer<F> {
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

#[async_trait]
impl<F, Fut> Authorizer for FnAuthorizer<F>
where
    F: Fn(Identity) -> Fut + Send + Sync,
    Fut: Future<Output = bool> + Send + 'static,
{
    async fn is_authorized(&self, user: &Identity) -> bool {
        (self.predicate)(user.clone()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn allow_all_admits_anyone() {
        assert!(AllowAll.is_authorized(&Identity::new("u1", "anyone")).await);
    }

    #[tokio::test]
    async fn allow_list_matches_id_or_name() {
        let list = AllowList::new(["user1", "U42"]);

        assert!(list.is_authorized(&Identity::new("x", "user1")).await);
        assert!(list.is_authorized(&Identity::new("U42", "someone")).await);
        assert!(!list.is_authorized(&Identity::new("U7", "user2")).await);
    }

    #[tokio::test]
    async fn empty_allow_list_denies_everyone() {
        let list = AllowList::default();
        assert!(!list.is_authorized(&Identity::new("user1", "user1")).await);
    }

    #[tokio::test]
    async fn closure_authorizer() {
        let auth = FnAuthorizer::new(|user: Identity| async move { user.name == "user1" });

        assert!(auth.is_authorized(&Identity::new("1", "user1")).await);
        assert!(!auth.is_authorized(&Identity::new("2", "user2")).await);
    }
}
