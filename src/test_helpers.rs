#[cfg(test)]
use crate::session::{Identity, Session};

/// In-memory session that records every reply.
#[cfg(test)]
pub struct MockSession {
    pub text: String,
    pub user: Identity,
    pub bot: Identity,
    pub replies: Vec<String>,
    pub ended: bool,
}

#[cfg(test)]
impl MockSession {
    pub fn new(text: &str) -> Self {
        Self::from_user(text, "user1")
    }

    pub fn from_user(text: &str, user: &str) -> Self {
        Self {
            text: text.to_string(),
            user: Identity::new(user, user),
            bot: Identity::new("bot", "testbot"),
            replies: Vec::new(),
            ended: false,
        }
    }

    /// The only reply sent, panicking if there were zero or several.
    pub fn single_reply(&self) -> &str {
        assert_eq!(self.replies.len(), 1, "replies: {:?}", self.replies);
        &self.replies[0]
    }
}

#[cfg(test)]
impl Session for MockSession {
    fn text(&self) -> &str {
        &self.text
    }

    fn user(&self) -> &Identity {
        &self.user
    }

    fn bot(&self) -> &Identity {
        &self.bot
    }

    fn send(&mut self, text: &str) {
        self.replies.push(text.to_string());
    }

    fn end_turn(&mut self) {
        self.ended = true;
    }
}
