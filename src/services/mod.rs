//! Downstream collaborator services

pub mod collaborators;
pub mod http;

pub use collaborators::{Collaborators, ValidationVerdict};
pub use http::HttpCollaborators;
