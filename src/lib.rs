#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! Toast popups synthesized over a host's advancement subsystem.
//!
//! Hosts of this kind have no native "show a transient popup" primitive,
//! but they do show one when an achievement-like definition completes.
//! This crate registers a throwaway definition whose display fields are
//! the desired toast content, then grants and immediately revokes its
//! single impossible-to-trigger criterion for the target user. The user
//! sees the popup; their permanent record is left unchanged.
//!
//! Build content with [`content::ToastContent::builder`], then hand it to
//! [`dispatcher::ToastService::deliver`] together with the target user.

pub mod content;
pub mod definition;
pub mod dispatcher;
pub mod error;
pub mod host;
pub mod identity;
pub mod registry;
pub mod telemetry;
pub mod text;
pub mod types;

pub type Result<T> = std::result::Result<T, error::Error>;
