//! Visit transcript store and medical summary relay.
//!
//! A summary request streams the upstream provider's output to the caller as
//! server-sent events. When the upstream fails the relay switches once to a
//! local fallback generator, so every stream ends with a `completed` or
//! `error` event.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
