pub mod mutation_config;
pub mod mutation_state;
pub mod update_discussion_mutation;
