//! Shared fixtures and behaviour tests for the dispatch core.

mod behaviour;
pub(crate) mod support;
