//! The conversation state machine: nodes, transitions, the graph that holds them,
//! and the engine that walks it.

pub mod conversation;
pub mod engine;
pub mod graph;
pub mod node;
pub mod transition;

pub use conversation::{Conversation, Turn};
pub use engine::{DEFAULT_DELAY_MS, DialogueEngine, IntentOverride, NextMessage};
pub use graph::{DEFAULT_START, DialogueGraph, GraphBuilder};
pub use node::{Action, Choice, ConversationNode, Reply, Resolvable, TERMINAL};
pub use transition::{Arm, Matcher, Route, Router, Transition};
