//! Console host: each line typed at the prompt is one turn.

use std::io::{self, Write};

use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};

use crate::session::{Identity, Session};

/// Session printing replies to a writer, colored with crossterm.
pub struct ConsoleSession<W: Write + Send = io::Stdout> {
    text: String,
    user: Identity,
    bot: Identity,
    out: W,
    replies: usize,
    ended: bool,
}

impl ConsoleSession {
    pub fn new(text: impl Into<String>, user: Identity, bot: Identity) -> Self {
        Self::with_writer(text, user, bot, io::stdout())
    }
}

impl<W: Write + Send> ConsoleSession<W> {
    pub fn with_writer(text: impl Into<String>, user: Identity, bot: Identity, out: W) -> Self {
        Self {
            text: text.into(),
            user,
            bot,
            out,
            replies: 0,
            ended: false,
        }
    }

    /// Number of replies sent during the turn.
    pub fn reply_count(&self) -> usize {
        self.replies
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn into_writer(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Session for ConsoleSession<W> {
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
        if self.ended {
            return;
        }
        self.replies += 1;
        print_colored(&mut self.out, &format!("{}\n", text.trim_end()), Color::Green);
    }

    fn end_turn(&mut self) {
        self.ended = true;
    }
}

/// Write `message` in `color`. Output errors are ignored; the console is best-effort.
pub fn print_colored<W: Write>(out: &mut W, message: &str, color: Color) {
    let _ = execute!(out, SetForegroundColor(color), Print(message), ResetColor);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(text: &str) -> ConsoleSession<Vec<u8>> {
        ConsoleSession::with_writer(
            text,
            Identity::new("u1", "user1"),
            Identity::new("b1", "bot"),
            Vec::new(),
        )
    }

    #[test]
    fn replies_are_written() {
        let mut s = session("cmd status");
        s.send("all good\n\n");

        assert_eq!(s.reply_count(), 1);
        let output = String::from_utf8(s.into_writer()).unwrap();
        assert!(output.contains("all good\n"));
    }

    #[test]
    fn nothing_written_after_turn_ends() {
        let mut s = session("cmd status");
        s.end_turn_with("done");
        s.send("late");

        assert!(s.is_ended());
        assert_eq!(s.reply_count(), 1);
        let output = String::from_utf8(s.into_writer()).unwrap();
        assert!(!output.contains("late"));
    }
}
