//! Program matching and question answering
//!
//! `BenefitsAssistant` calls the hosted functions when they are configured
//! and silently substitutes the local keyword matcher otherwise.

pub mod client;
pub mod local;
pub mod service;
pub mod traits;

pub use client::CloudFunctionClient;
pub use local::LocalAssistant;
pub use service::BenefitsAssistant;
pub use traits::{AssistantClientTrait, AssistantError};
