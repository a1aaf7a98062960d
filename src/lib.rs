//! # WarmeLeads - Scripted Sales Chat Engine
//!
//! **warmeleads** drives the sales chatbot of the WarmeLeads lead-generation platform.
//! A conversation is a directed graph of named nodes; each node shows a message,
//! optionally offers reply buttons, may record the answer in the visitor's profile,
//! and decides which node comes next.
//!
//! ## Core Workflow
//!
//! 1.  **Build a graph**: Use the built-in chat ([`flow::warmeleads_flow`]), compile a
//!     declarative [`script::ScriptDefinition`], or assemble nodes yourself with
//!     [`dialogue::GraphBuilder`]. Building validates that every transition lands on a
//!     real node or on the terminal `end`.
//! 2.  **Create an engine**: [`dialogue::DialogueEngine`] wraps the graph and can be
//!     shared by any number of conversations.
//! 3.  **Advance**: For every reply, call `advance(current_node, reply, &mut profile)`.
//!     The engine updates the profile and returns the next message, or `None` when
//!     the conversation is over.
//! 4.  **Hand off**: Once the profile is complete, build a [`handoff::CheckoutRequest`]
//!     or [`handoff::ContactSubmission`] for your payment or CRM integration.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use warmeleads::prelude::*;
//! use std::sync::Arc;
//!
//! fn main() -> Result<()> {
//!     let pricing = Arc::new(PricingTable::default());
//!     let engine = DialogueEngine::new(warmeleads_flow(pricing)?);
//!
//!     let mut profile = UserProfile::default();
//!     let welcome = engine.start(&profile).expect("start node exists");
//!     println!("{}", welcome.message);
//!
//!     // The host sends back the label (or id) of the button the visitor clicked.
//!     if let Some(next) = engine.advance(&welcome.id, "Ja, absoluut!", &mut profile) {
//!         println!("-> {}: {}", next.id, next.message);
//!         for option in next.labels() {
//!             println!("   [{}]", option);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dialogue;
pub mod error;
pub mod flow;
pub mod handoff;
pub mod prelude;
pub mod pricing;
pub mod profile;
pub mod script;
pub mod visualizer;
