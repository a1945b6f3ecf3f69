//! # Core Application Logic
//!
//! This module contains Sermon's monitoring logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │   Serial   │
//!     │  Adapter   │                          │   Reader   │
//!     │ (ratatui)  │                          │ (thread)   │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all monitoring state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`scrollback`]: Bounded line history
//! - [`line_assembler`]: Bytes to lines
//! - [`config`]: Layered settings

pub mod action;
pub mod config;
pub mod line_assembler;
pub mod scrollback;
pub mod state;
