//! Whereabouts - location resolution orchestration
//!
//! This library turns a raw geolocation fix into a server-confirmed location
//! record, reusing a cached result when the fix has not meaningfully moved,
//! and keeps the secondary "most popular" / "recently seen" panels refreshed
//! after every successful resolution.
//!
//! The remote services, the platform position source, the persistent store
//! and the progress indicator are all collaborator traits (see [`services`],
//! [`geolocation`], [`cache`], [`busy`]), so the orchestration logic in
//! [`workflow`] can be exercised against mocks or wired to a real backend.
//!
//! # High-Level API
//!
//! ```ignore
//! use whereabouts::workflow::LocationWorkflow;
//!
//! let workflow = LocationWorkflow::builder()
//!     .position_provider(provider)
//!     .lookup(backend.clone())
//!     .boundary_service(backend.clone())
//!     .summary_service(backend)
//!     .build()?;
//!
//! let result = workflow.locate().await?;
//! println!("resolved location {}", result.location.id);
//! ```

pub mod alert;
pub mod busy;
pub mod cache;
pub mod config;
pub mod coord;
pub mod geolocation;
pub mod services;
pub mod summary;
pub mod usage;
pub mod workflow;

/// Version of the Whereabouts library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
