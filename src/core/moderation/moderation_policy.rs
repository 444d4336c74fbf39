// Small moderation rules shared by the command handlers.

/// Whether the invoker may use staff-only commands (announcements, autoroles).
///
/// Bot owners always may. Everyone else needs one of the configured staff roles.
pub fn has_staff_capability(author_roles: &[u64], staff_roles: &[u64], is_owner: bool) -> bool {
    is_owner || author_roles.iter().any(|r| staff_roles.contains(r))
}

/// Parse a raw user id argument. Only plain digits are accepted.
pub fn parse_user_id(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok().filter(|id| *id != 0)
}

/// Discord returns at most this many bans per request.
pub const BAN_PAGE_SIZE: usize = 1000;

/// Cursor for the next page of the ban list, or `None` once a short page
/// shows the list is exhausted.
pub fn next_ban_page(page_len: usize, last_user_id: Option<u64>) -> Option<u64> {
    if page_len < BAN_PAGE_SIZE {
        return None;
    }
    last_user_id
}

/// Capitalise the first letter of every word and lowercase the rest.
/// A "word" is any run of letters, so `rust-fans` becomes `Rust-Fans`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Name of the autorole message embed field describing a binding.
pub fn autorole_field_name(emoji: &str, role_name: &str) -> String {
    format!("{} {}", emoji, title_case(role_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staff_capability() {
        let staff = [100, 200];
        assert!(has_staff_capability(&[1, 200], &staff, false));
        assert!(!has_staff_capability(&[1, 2], &staff, false));
        assert!(has_staff_capability(&[], &staff, true));
        assert!(!has_staff_capability(&[100], &[], false));
    }

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("123456789012345678"), Some(123456789012345678));
        assert_eq!(parse_user_id(" 42 "), Some(42));
        assert_eq!(parse_user_id("<@42>"), None);
        assert_eq!(parse_user_id("-42"), None);
        assert_eq!(parse_user_id(""), None);
        assert_eq!(parse_user_id("0"), None);
        // Too large for a snowflake
        assert_eq!(parse_user_id("99999999999999999999999"), None);
    }

    #[test]
    fn test_ban_pages_continue_until_short() {
        assert_eq!(next_ban_page(BAN_PAGE_SIZE, Some(77)), Some(77));
        assert_eq!(next_ban_page(BAN_PAGE_SIZE - 1, Some(77)), None);
        assert_eq!(next_ban_page(0, None), None);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("mod team"), "Mod Team");
        assert_eq!(title_case("DJ"), "Dj");
        assert_eq!(title_case("rust-fans"), "Rust-Fans");
        assert_eq!(title_case("level 10 club"), "Level 10 Club");
    }

    #[test]
    fn test_autorole_field_name() {
        assert_eq!(autorole_field_name("🎮", "game night"), "🎮 Game Night");
    }
}
