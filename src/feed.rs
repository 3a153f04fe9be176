pub mod api;
pub mod dto;
pub mod filter;
pub mod model;
pub mod query;
