//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the warmeleads
//! crate. Import this module to get access to the core functionality without having
//! to import each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use warmeleads::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! // Load and compile a script
//! let script_json = std::fs::read_to_string("path/to/script.json")?;
//! let graph = ScriptDefinition::from_json(&script_json)?.compile()?;
//!
//! // Drive a conversation
//! let engine = DialogueEngine::new(graph);
//! let mut chat = Conversation::new(&engine);
//! chat.start();
//! let reply = chat.reply("Ja, absoluut!");
//!
//! println!("Bot: {:?}", reply.map(|m| m.message));
//! # Ok(())
//! # }
//! ```

// Dialogue engine
pub use crate::dialogue::{
    Action, Choice, Conversation, ConversationNode, DEFAULT_DELAY_MS, DialogueEngine,
    DialogueGraph, GraphBuilder, IntentOverride, Matcher, NextMessage, Resolvable, Route, Router,
    TERMINAL, Transition,
};

// Built-in chat and its data
pub use crate::flow::warmeleads_flow;
pub use crate::pricing::{LeadKind, PricingTable, order_summary};
pub use crate::profile::{ContactInfo, ProfileField, UserProfile};

// Scripts, configuration and handoff
pub use crate::config::EngineConfig;
pub use crate::handoff::{CheckoutRequest, ContactSubmission};
pub use crate::script::{IntoScript, ScriptDefinition};

// Error types
pub use crate::error::{ConfigError, GraphError, GraphIssue, HandoffError, ScriptError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
