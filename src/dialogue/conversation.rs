use super::engine::{DialogueEngine, NextMessage};
use crate::profile::UserProfile;

/// One line of the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    Bot { node: String, message: String },
    User { text: String },
}

/// A single chat session on top of a shared engine.
///
/// Owns what the host UI would otherwise keep: the profile, the current position
/// and the message history. Timers and typing indicators stay with the caller.
#[derive(Debug, Clone)]
pub struct Conversation<'e> {
    engine: &'e DialogueEngine,
    profile: UserProfile,
    current: Option<String>,
    transcript: Vec<Turn>,
}

impl<'e> Conversation<'e> {
    pub fn new(engine: &'e DialogueEngine) -> Self {
        Self::with_profile(engine, UserProfile::default())
    }

    /// Continues with answers that are already known, e.g. from a previous visit.
    pub fn with_profile(engine: &'e DialogueEngine, profile: UserProfile) -> Self {
        Self {
            engine,
            profile,
            current: None,
            transcript: Vec::new(),
        }
    }

    /// Shows the opening message. Calling it again restarts from the start node but
    /// keeps the profile and transcript.
    pub fn start(&mut self) -> Option<NextMessage> {
        let message = self.engine.start(&self.profile);
        self.record(message.as_ref());
        message
    }

    /// Sends a reply and returns the bot's answer. After the conversation finished
    /// every reply returns `None`.
    pub fn reply(&mut self, text: &str) -> Option<NextMessage> {
        let current = self.current.take()?;
        self.transcript.push(Turn::User {
            text: text.to_string(),
        });
        let message = self.engine.advance(&current, text, &mut self.profile);
        self.record(message.as_ref());
        message
    }

    fn record(&mut self, message: Option<&NextMessage>) {
        match message {
            Some(message) => {
                self.transcript.push(Turn::Bot {
                    node: message.id.clone(),
                    message: message.message.clone(),
                });
                self.current = Some(message.id.clone());
            }
            None => self.current = None,
        }
    }

    pub fn current_node(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn is_finished(&self) -> bool {
        self.current.is_none() && !self.transcript.is_empty()
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn into_profile(self) -> UserProfile {
        self.profile
    }
}
