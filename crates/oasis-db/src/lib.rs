//! # oasis-db: Persistence Layer for Oasis POS
//!
//! This crate provides durable storage for the register state and the
//! `RegisterService` aggregate that wires the pure core to it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Oasis POS Data Flow                           │
//! │                                                                     │
//! │  Front-end action (register a sale, close the register, ...)        │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                    oasis-db (THIS CRATE)                      │  │
//! │  │                                                               │  │
//! │  │  ┌───────────────┐   ┌───────────────┐   ┌────────────────┐   │  │
//! │  │  │     Store     │   │  SliceStore   │   │   Migrations   │   │  │
//! │  │  │   (pool.rs)   │   │  (slices.rs)  │   │   (embedded)   │   │  │
//! │  │  │               │◄──│ load / save   │   │ 001_state_...  │   │  │
//! │  │  │  SqlitePool   │   │ whole slices  │   │                │   │  │
//! │  │  └───────────────┘   └───────▲───────┘   └────────────────┘   │  │
//! │  │                             │                                 │  │
//! │  │                   ┌─────────┴─────────┐                       │  │
//! │  │                   │  RegisterService  │ ◄── owns the core     │  │
//! │  │                   │   (register.rs)   │     aggregates and    │  │
//! │  │                   └───────────────────┘     supplies the clock│  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SQLite database: state_slices(slice PRIMARY KEY, value, updated_at)│
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Storage error types
//! - [`slices`] - The state-slice persistence adapter
//! - [`register`] - The register service (aggregate root)
//!
//! ## Durability Model
//!
//! Persistence is best effort: every mutation saves its slice, but a failed
//! save logs a warning and leaves the in-memory state authoritative for the
//! rest of the session. Nothing in this crate ever fails an operation
//! because storage misbehaved.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use oasis_db::{RegisterService, Store, StoreConfig};
//!
//! let store = Store::new(StoreConfig::new("./oasis.db")).await?;
//! let mut service = RegisterService::load(store.slices()).await;
//!
//! service.open_register().await;
//! let sale = service.register_sale(draft).await?;
//! let summary = service.close_register().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod register;
pub mod slices;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::StoreError;
pub use pool::{Store, StoreConfig};
pub use register::RegisterService;
pub use slices::SliceStore;
