use std::sync::Arc;

use crate::domain::discussion::dto::update_discussion_request::UpdateDiscussionVariables;
use crate::domain::discussion::model::discussion::Discussion;
use crate::errors::ClientError;

pub type OnMutate = Arc<dyn Fn(&UpdateDiscussionVariables) + Send + Sync>;
pub type OnSuccess = Arc<dyn Fn(&Discussion, &UpdateDiscussionVariables) + Send + Sync>;
pub type OnError = Arc<dyn Fn(&ClientError, &UpdateDiscussionVariables) + Send + Sync>;
pub type OnSettled =
    Arc<dyn Fn(Option<&Discussion>, Option<&ClientError>, &UpdateDiscussionVariables) + Send + Sync>;

/// Caller overrides for the update mutation. The mutation function itself
/// is fixed and cannot be replaced here.
#[derive(Clone, Default)]
pub struct MutationConfig {
    pub on_mutate: Option<OnMutate>,
    /// Runs after the cache refresh has been requested
    pub on_success: Option<OnSuccess>,
    pub on_error: Option<OnError>,
    pub on_settled: Option<OnSettled>,
    /// Wait for the refetch to finish before `on_success` instead of running
    /// it in the background
    pub await_refresh: bool,
}

impl MutationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_mutate<F>(mut self, f: F) -> Self
    where
        F: Fn(&UpdateDiscussionVariables) + Send + Sync + 'static,
    {
        self.on_mutate = Some(Arc::new(f));
        self
    }

    pub fn on_success<F>(mut self, f: F) -> Self
    where
        F: Fn(&Discussion, &UpdateDiscussionVariables) + Send + Sync + 'static,
    {
        self.on_success = Some(Arc::new(f));
        self
    }

    pub fn on_error<F>(mut self, f: F) -> Self
    where
        F: Fn(&ClientError, &UpdateDiscussionVariables) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(f));
        self
    }

    pub fn on_settled<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<&Discussion>, Option<&ClientError>, &UpdateDiscussionVariables)
            + Send
            + Sync
            + 'static,
    {
        self.on_settled = Some(Arc::new(f));
        self
    }

    pub fn await_refresh(mut self, await_refresh: bool) -> Self {
        self.await_refresh = await_refresh;
        self
    }
}
