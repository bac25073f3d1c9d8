//! Host collaborator contract.
//!
//! The conversational host owns message receipt and reply delivery. For each
//! inbound message it hands the library a [`Session`] describing one turn.

use std::fmt;

/// A user or bot account on the chat platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    pub id: String,
    pub name: String,
}

impl Identity {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.id == self.name {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.id)
        }
    }
}

/// One turn of a conversation, as seen by the library.
pub trait Session: Send {
    /// Raw inbound message text.
    fn text(&self) -> &str;

    /// Who sent the message.
    fn user(&self) -> &Identity;

    /// The bot the message was addressed to.
    fn bot(&self) -> &Identity;

    /// Send a reply without ending the turn.
    fn send(&mut self, text: &str);

    /// End the turn. No further replies are expected afterwards.
    fn end_turn(&mut self);

    /// Send a final reply and end the turn.
    fn end_turn_with(&mut self, text: &str) {
        self.send(text);
        self.end_turn();
    }
}
