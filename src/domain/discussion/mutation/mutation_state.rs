use crate::domain::discussion::model::discussion::Discussion;
use crate::errors::ClientError;

/// Lifecycle of one update mutation as seen by a UI layer.
#[derive(Debug, Clone, Default)]
pub enum MutationState {
    #[default]
    Idle,
    Pending,
    Succeeded(Discussion),
    Failed(ClientError),
}

impl MutationState {
    pub fn is_idle(&self) -> bool {
        matches!(self, MutationState::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, MutationState::Pending)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, MutationState::Succeeded(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, MutationState::Failed(_))
    }

    pub fn data(&self) -> Option<&Discussion> {
        match self {
            MutationState::Succeeded(d) => Some(d),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ClientError> {
        match self {
            MutationState::Failed(e) => Some(e),
            _ => None,
        }
    }
}
