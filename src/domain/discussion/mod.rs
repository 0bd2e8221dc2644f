pub mod dto;
pub mod model;
pub mod mutation;
pub mod service;
