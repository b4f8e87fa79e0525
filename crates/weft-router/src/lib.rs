// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interaction resolution and event dispatch for the Weft host SDK.
//!
//! The resolver turns an abstract interaction request into a flag-filtered,
//! priority-ordered handler chain; the router dispatches runtime events
//! through those chains with per-handler failure isolation and synchronous
//! re-entrancy.

pub mod resolver;
pub mod router;

pub use resolver::{InteractionResolver, ResolvedHandler, ResolvedHandlerChain};
pub use router::{DispatchEvent, DispatchOutcome, EventHandler, EventRouter};
