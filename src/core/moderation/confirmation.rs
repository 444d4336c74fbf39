// Interactive confirmation flow.
//
// Several commands ask the invoker for a follow-up (a reason, a description,
// a ✅/❌ reaction) and give up after a timeout. The Discord layer feeds
// collector results in as events; this type decides what they mean.

/// Where a prompt currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationState {
    AwaitingInput,
    /// The user answered. Holds the reply text or the confirming emoji.
    Confirmed(String),
    Cancelled,
    TimedOut,
}

impl ConfirmationState {
    pub fn is_finished(&self) -> bool {
        !matches!(self, ConfirmationState::AwaitingInput)
    }
}

/// Something that happened while waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptEvent<'a> {
    Reply(&'a str),
    Reaction(&'a str),
    Timeout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PromptKind {
    /// Any reply confirms, unless it equals the cancel word.
    FreeText { cancel_word: Option<String> },
    /// Only the two given emoji matter.
    Reaction { confirm: String, cancel: String },
}

#[derive(Debug, Clone)]
pub struct ConfirmationFlow {
    kind: PromptKind,
    state: ConfirmationState,
}

impl ConfirmationFlow {
    /// Wait for a free-text reply. A reply equal to `cancel_word`
    /// (case-insensitive) cancels.
    pub fn free_text(cancel_word: Option<&str>) -> Self {
        Self {
            kind: PromptKind::FreeText {
                cancel_word: cancel_word.map(str::to_string),
            },
            state: ConfirmationState::AwaitingInput,
        }
    }

    /// Wait for one of two reactions.
    pub fn reaction(confirm: &str, cancel: &str) -> Self {
        Self {
            kind: PromptKind::Reaction {
                confirm: confirm.to_string(),
                cancel: cancel.to_string(),
            },
            state: ConfirmationState::AwaitingInput,
        }
    }

    pub fn state(&self) -> &ConfirmationState {
        &self.state
    }

    pub fn into_state(self) -> ConfirmationState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Apply an event. Once finished, further events are ignored.
    pub fn handle(&mut self, event: PromptEvent<'_>) -> &ConfirmationState {
        if self.is_finished() {
            return &self.state;
        }

        let next = match (&self.kind, event) {
            (_, PromptEvent::Timeout) => Some(ConfirmationState::TimedOut),
            (PromptKind::FreeText { cancel_word }, PromptEvent::Reply(text)) => {
                let cancelled = cancel_word
                    .as_deref()
                    .is_some_and(|word| text.trim().eq_ignore_ascii_case(word));
                if cancelled {
                    Some(ConfirmationState::Cancelled)
                } else {
                    Some(ConfirmationState::Confirmed(text.to_string()))
                }
            }
            (PromptKind::Reaction { confirm, cancel }, PromptEvent::Reaction(emoji)) => {
                if emoji == confirm {
                    Some(ConfirmationState::Confirmed(emoji.to_string()))
                } else if emoji == cancel {
                    Some(ConfirmationState::Cancelled)
                } else {
                    None
                }
            }
            // Events of the wrong kind don't move the prompt.
            _ => None,
        };

        if let Some(next) = next {
            self.state = next;
        }
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_text_reply_confirms() {
        let mut flow = ConfirmationFlow::free_text(Some("no"));
        assert_eq!(flow.state(), &ConfirmationState::AwaitingInput);

        flow.handle(PromptEvent::Reply("repeated spam"));
        assert_eq!(
            flow.state(),
            &ConfirmationState::Confirmed("repeated spam".to_string())
        );
    }

    #[test]
    fn test_free_text_cancel_word_is_case_insensitive() {
        let mut flow = ConfirmationFlow::free_text(Some("no"));
        flow.handle(PromptEvent::Reply(" NO "));
        assert_eq!(flow.into_state(), ConfirmationState::Cancelled);
    }

    #[test]
    fn test_free_text_without_cancel_word() {
        let mut flow = ConfirmationFlow::free_text(None);
        flow.handle(PromptEvent::Reply("no"));
        assert_eq!(flow.into_state(), ConfirmationState::Confirmed("no".to_string()));
    }

    #[test]
    fn test_timeout() {
        let mut flow = ConfirmationFlow::free_text(None);
        flow.handle(PromptEvent::Timeout);
        assert_eq!(flow.state(), &ConfirmationState::TimedOut);
    }

    #[test]
    fn test_reaction_flow() {
        let mut flow = ConfirmationFlow::reaction("✅", "❌");

        // Unrelated reactions and replies are ignored
        flow.handle(PromptEvent::Reaction("🎉"));
        flow.handle(PromptEvent::Reply("yes"));
        assert!(!flow.is_finished());

        flow.handle(PromptEvent::Reaction("✅"));
        assert_eq!(flow.state(), &ConfirmationState::Confirmed("✅".to_string()));

        let mut flow = ConfirmationFlow::reaction("✅", "❌");
        flow.handle(PromptEvent::Reaction("❌"));
        assert_eq!(flow.state(), &ConfirmationState::Cancelled);
    }

    #[test]
    fn test_finished_flow_ignores_events() {
        let mut flow = ConfirmationFlow::reaction("✅", "❌");
        flow.handle(PromptEvent::Reaction("❌"));
        flow.handle(PromptEvent::Reaction("✅"));
        flow.handle(PromptEvent::Timeout);
        assert_eq!(flow.state(), &ConfirmationState::Cancelled);
    }
}
