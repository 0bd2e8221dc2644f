use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `PATCH /discussions/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UpdateDiscussionInput {
    #[validate(length(min = 1, message = "Required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Required"))]
    pub body: String,
}

impl UpdateDiscussionInput {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Arguments of one update mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateDiscussionVariables {
    pub discussion_id: String,
    pub data: UpdateDiscussionInput,
}

impl UpdateDiscussionVariables {
    pub fn new(discussion_id: impl Into<String>, data: UpdateDiscussionInput) -> Self {
        Self {
            discussion_id: discussion_id.into(),
            data,
        }
    }
}
