//! # PFE Dashboard
//!
//! Trade and Potential Future Exposure (PFE) data service for the F22 and
//! QUIC pricing engines.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Domain Layer** (`domain`): Trades, PFE samples, horizons and engine identity
//! - **Application Layer** (`application`): Sessions, use cases and DTOs
//! - **Infrastructure Layer** (`infrastructure`): Postgres and in-memory repositories
//! - **API Layer** (`api`): REST handlers, routes and middleware
//!
//! Every operation runs once per engine from a single generic pipeline;
//! the [`Engine`](domain::value_objects::Engine) value selects tables and
//! key names.
//!
//! ## Example
//!
//! ```rust,ignore
//! use pfe_dashboard::application::use_cases::ListTradesUseCase;
//! use pfe_dashboard::domain::value_objects::Engine;
//!
//! let trades = ListTradesUseCase::new(sessions, repository, PagingPolicy::default())
//!     .execute(Engine::F22, &credentials, PageRequest::default())
//!     .await?;
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
