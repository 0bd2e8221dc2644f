pub mod update_discussion_request;
