// Moderation domain models - actions, mod-log entries, announcements, autoroles.
//
// These are pure domain types with no Discord dependencies.
// The Discord layer will convert these to embeds and API calls.

use chrono::{DateTime, Utc};

/// Reason recorded when a moderator declines to give one.
pub const REASON_NOT_SPECIFIED: &str = "<Not specified>";

/// Suffix that asks an announcement to ping the announcement role.
const PING_SUFFIX: &str = " ping";

/// A moderation action that gets written to the mod log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModAction {
    Kick,
    Ban,
    Unban,
    Mute,
    Unmute,
}

impl ModAction {
    /// Embed title for this action.
    pub fn title(&self) -> &'static str {
        match self {
            ModAction::Kick => "Member kicked",
            ModAction::Ban => "Member banned",
            ModAction::Unban => "User unbanned",
            ModAction::Mute => "Member muted",
            ModAction::Unmute => "User unmuted",
        }
    }

    /// Whether the action carries a reason.
    pub fn takes_reason(&self) -> bool {
        matches!(self, ModAction::Kick | ModAction::Ban | ModAction::Mute)
    }
}

impl std::fmt::Display for ModAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModAction::Kick => write!(f, "kick"),
            ModAction::Ban => write!(f, "ban"),
            ModAction::Unban => write!(f, "unban"),
            ModAction::Mute => write!(f, "mute"),
            ModAction::Unmute => write!(f, "unmute"),
        }
    }
}

/// One mod-log record, posted both in the invoking channel and the log channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ModLogEntry {
    pub action: ModAction,
    /// Display name (or tag, for users no longer in the guild) of the target.
    pub target: String,
    pub reason: Option<String>,
    /// Mention of the moderator who ran the command.
    pub moderator: String,
}

impl ModLogEntry {
    pub fn new(action: ModAction, target: impl Into<String>, moderator: impl Into<String>) -> Self {
        Self {
            action,
            target: target.into(),
            reason: None,
            moderator: moderator.into(),
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Embed fields in display order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("Name", self.target.clone())];
        if self.action.takes_reason() {
            let reason = self
                .reason
                .clone()
                .unwrap_or_else(|| REASON_NOT_SPECIFIED.to_string());
            fields.push(("Reason", reason));
        }
        fields.push(("Done by", self.moderator.clone()));
        fields
    }
}

/// Who an announcement is from, which decides how it is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnouncementKind {
    /// Posted by a bot owner.
    BotUpdate,
    /// Posted by server staff.
    ServerUpdate,
}

impl AnnouncementKind {
    pub fn for_author(is_owner: bool) -> Self {
        if is_owner {
            AnnouncementKind::BotUpdate
        } else {
            AnnouncementKind::ServerUpdate
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AnnouncementKind::BotUpdate => "Bot update!",
            AnnouncementKind::ServerUpdate => "Server update!",
        }
    }
}

/// A parsed announcement request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub body: String,
    /// Whether the announcement role should be pinged.
    pub ping: bool,
}

impl Announcement {
    /// Parse the raw command argument. Returns `None` when there is nothing
    /// to announce.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let raw = raw?;
        let (body, ping) = match raw.strip_suffix(PING_SUFFIX) {
            Some(body) => (body, true),
            None => (raw, false),
        };

        let body = body.trim();
        if body.is_empty() {
            return None;
        }

        Some(Self {
            body: body.to_string(),
            ping,
        })
    }
}

/// An emoji reaction that grants a role.
#[derive(Debug, Clone, PartialEq)]
pub struct Autorole {
    /// Emoji as typed: a unicode emoji or `<:name:id>` for custom emoji.
    pub emoji: String,
    pub role_id: u64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Autorole {
    /// Line used in the autorole listing.
    pub fn list_line(&self) -> String {
        format!("{}: <@&{}>", self.emoji, self.role_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kick_entry_fields() {
        let entry = ModLogEntry::new(ModAction::Kick, "Spammer", "<@1>").with_reason("spam");
        assert_eq!(
            entry.fields(),
            vec![
                ("Name", "Spammer".to_string()),
                ("Reason", "spam".to_string()),
                ("Done by", "<@1>".to_string()),
            ]
        );
        assert_eq!(entry.action.title(), "Member kicked");
    }

    #[test]
    fn test_missing_reason_is_not_specified() {
        let entry = ModLogEntry::new(ModAction::Mute, "Loud", "<@1>");
        assert_eq!(entry.fields()[1], ("Reason", REASON_NOT_SPECIFIED.to_string()));
    }

    #[test]
    fn test_unban_and_unmute_have_no_reason_field() {
        for action in [ModAction::Unban, ModAction::Unmute] {
            let entry = ModLogEntry::new(action, "Someone", "<@1>").with_reason("ignored");
            let names: Vec<_> = entry.fields().into_iter().map(|(n, _)| n).collect();
            assert_eq!(names, vec!["Name", "Done by"]);
        }
    }

    #[test]
    fn test_announcement_parse() {
        assert_eq!(Announcement::parse(None), None);
        assert_eq!(Announcement::parse(Some("   ")), None);
        assert_eq!(Announcement::parse(Some(" ping")), None);

        let plain = Announcement::parse(Some("Server restart at 5")).unwrap();
        assert_eq!(plain.body, "Server restart at 5");
        assert!(!plain.ping);

        let ping = Announcement::parse(Some("New event! ping")).unwrap();
        assert_eq!(ping.body, "New event!");
        assert!(ping.ping);

        // Only the exact suffix counts
        let not_ping = Announcement::parse(Some("stopping")).unwrap();
        assert!(!not_ping.ping);
    }

    #[test]
    fn test_bare_ping_is_not_an_announcement() {
        assert_eq!(Announcement::parse(Some(" ping")), None);
        assert_eq!(Announcement::parse(Some("   ping")), None);

        let padded = Announcement::parse(Some("  Maintenance tonight ping")).unwrap();
        assert_eq!(padded.body, "Maintenance tonight");
        assert!(padded.ping);

        // Without the leading space "ping" is the message itself
        let word = Announcement::parse(Some("ping")).unwrap();
        assert_eq!(word.body, "ping");
        assert!(!word.ping);
    }

    #[test]
    fn test_announcement_kind_by_author() {
        assert_eq!(AnnouncementKind::for_author(true).title(), "Bot update!");
        assert_eq!(AnnouncementKind::for_author(false).title(), "Server update!");
    }

    #[test]
    fn test_autorole_list_line() {
        let autorole = Autorole {
            emoji: "🎮".to_string(),
            role_id: 42,
            description: "Gamers".to_string(),
            created_at: Utc::now(),
        };
        assert_eq!(autorole.list_line(), "🎮: <@&42>");
    }
}
