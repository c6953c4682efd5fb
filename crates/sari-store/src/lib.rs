//! # sari-store: Persistence & Orchestration for Sari POS
//!
//! Everything stateful lives here: JSON key-value persistence, the
//! collection stores built on top of it, and the [`Pos`] facade that a
//! terminal front-end drives.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   sari-store (THIS CRATE)                               │
//! │                                                                         │
//! │   ┌──────────────────────────── Pos ────────────────────────────────┐  │
//! │   │  Catalog   SalesLedger   HeldQueue   UserStore   SettingsStore  │  │
//! │   └───────┬─────────┬────────────┬───────────┬────────────┬─────────┘  │
//! │           └─────────┴─────┬──────┴───────────┴────────────┘            │
//! │                           ▼                                            │
//! │                  KvStore (trait, JSON blobs)                           │
//! │              JsonFileStore  │  MemoryStore (tests)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//!                             │
//!                             ▼
//!                  sari-core (pure business logic)
//! ```
//!
//! Each store loads its whole collection at open, mutates in memory,
//! and writes the full collection back after every change. Simple and
//! correct for single-terminal scale, which is the scale this targets.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod held;
pub mod kv;
pub mod pos;
pub mod sales;
pub mod settings;
pub mod users;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use error::{StoreError, StoreResult};
pub use held::HeldQueue;
pub use kv::{JsonFileStore, KvStore, MemoryStore};
pub use pos::Pos;
pub use sales::SalesLedger;
pub use settings::SettingsStore;
pub use users::UserStore;
