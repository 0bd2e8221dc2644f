use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, error, warn};

use crate::core::cache::query_cache_trait::QueryCache;
use crate::core::cache::query_key::QueryKey;
use crate::core::client::api_client_trait::ApiClient;
use crate::domain::discussion::dto::update_discussion_request::UpdateDiscussionVariables;
use crate::domain::discussion::model::discussion::Discussion;
use crate::domain::discussion::mutation::mutation_config::MutationConfig;
use crate::domain::discussion::mutation::mutation_state::MutationState;
use crate::domain::discussion::service::get_discussion_service::query_key_for;
use crate::domain::discussion::service::update_discussion_service::update_discussion;
use crate::errors::ClientError;

/// Update mutation wired to a query cache.
///
/// On success the cached discussion's refetch is requested before the
/// caller's `on_success` runs. Concurrent `mutate` calls are independent.
/// Without `await_refresh` the refetch is spawned, so a tokio runtime must
/// be running.
pub struct UpdateDiscussionMutation {
    api: Arc<dyn ApiClient>,
    cache: Arc<dyn QueryCache>,
    config: MutationConfig,
    state: watch::Sender<MutationState>,
}

pub fn use_update_discussion(
    api: Arc<dyn ApiClient>,
    cache: Arc<dyn QueryCache>,
    config: MutationConfig,
) -> UpdateDiscussionMutation {
    UpdateDiscussionMutation::new(api, cache, config)
}

impl UpdateDiscussionMutation {
    pub fn new(api: Arc<dyn ApiClient>, cache: Arc<dyn QueryCache>, config: MutationConfig) -> Self {
        let (state, _) = watch::channel(MutationState::Idle);
        Self {
            api,
            cache,
            config,
            state,
        }
    }

    pub fn state(&self) -> MutationState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<MutationState> {
        self.state.subscribe()
    }

    pub fn reset(&self) {
        self.state.send_replace(MutationState::Idle);
    }

    /// Always leaves the state at `Succeeded` or `Failed`. A panicking hook
    /// fails the mutation with `ClientError::Hook`.
    pub async fn mutate(&self, vars: UpdateDiscussionVariables) -> Result<Discussion, ClientError> {
        self.state.send_replace(MutationState::Pending);

        let outcome = self.execute(&vars).await;
        match &outcome {
            Ok(discussion) => {
                self.state
                    .send_replace(MutationState::Succeeded(discussion.clone()));
            }
            Err(err) => {
                debug!(discussion_id = %vars.discussion_id, error = %err, "discussion update failed");

                if let Some(on_error) = &self.config.on_error {
                    let _ = run_hook("on_error", || on_error(err, &vars));
                }
                if let Some(on_settled) = &self.config.on_settled {
                    let _ = run_hook("on_settled", || on_settled(None, Some(err), &vars));
                }

                self.state.send_replace(MutationState::Failed(err.clone()));
            }
        }
        outcome
    }

    async fn execute(&self, vars: &UpdateDiscussionVariables) -> Result<Discussion, ClientError> {
        if let Some(on_mutate) = &self.config.on_mutate {
            run_hook("on_mutate", || on_mutate(vars))?;
        }

        let discussion = update_discussion(self.api.as_ref(), &vars.discussion_id, &vars.data).await?;
        self.refresh(query_key_for(&discussion.id)).await;

        if let Some(on_success) = &self.config.on_success {
            run_hook("on_success", || on_success(&discussion, vars))?;
        }
        if let Some(on_settled) = &self.config.on_settled {
            run_hook("on_settled", || on_settled(Some(&discussion), None, vars))?;
        }

        Ok(discussion)
    }

    /// The refetch is requested here, before returning. Failures are logged
    /// and never fail the mutation.
    async fn refresh(&self, key: QueryKey) {
        let requested = self.cache.refetch(&key);
        let settle = async move {
            if let Err(err) = requested.await {
                warn!(%key, error = %err, "discussion refetch failed");
            }
        };

        if self.config.await_refresh {
            settle.await;
        } else {
            tokio::spawn(settle);
        }
    }
}

fn run_hook<F: FnOnce()>(hook: &'static str, f: F) -> Result<(), ClientError> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let message = panic_message(payload.as_ref());
        error!(hook, %message, "mutation hook panicked");
        ClientError::Hook {
            hook: hook.to_string(),
            message,
        }
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
