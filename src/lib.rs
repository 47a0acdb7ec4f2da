//! fileview: a sandboxed HTTP file server and the client that browses it.
//!
//! - [`server`] exposes directory listings, downloads and static assets.
//! - [`client`] fetches listings and renders text previews through a
//!   [`render::Renderer`].

pub mod client;
pub mod config;
pub mod files;
pub mod render;
pub mod server;

pub use client::{ClientError, FileClient, FileDescriptor, PreviewOutcome, PreviewRequest};
pub use config::Config;
pub use files::{FileInfo, FileStorage};
