use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

#[derive(Clone)]
pub struct User {
    pub email: String,
    password: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: String, password: String) -> Self {
        Self {
            email,
            password,
            created_at: Utc::now(),
        }
    }

    // Stored as given; there is no hashing in this system.
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }

    pub fn public_view(&self) -> PublicUser {
        PublicUser {
            email: self.email.clone(),
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// The only user fields ever sent back to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub email: String,
}

/// One prompt/response exchange in a user's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatEntry {
    /// Milliseconds since the Unix epoch at creation; unique within a history.
    pub id: i64,
    pub user_message: String,
    pub bot_response: String,
    #[serde(serialize_with = "serialize_millis")]
    pub created_at: DateTime<Utc>,
}

fn serialize_millis<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&crate::rfc3339_millis(*ts))
}

impl ChatEntry {
    pub fn new(user_message: String, bot_response: String) -> Self {
        let now = Utc::now();
        Self {
            id: now.timestamp_millis(),
            user_message,
            bot_response,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_password_check() {
        let user = User::new("a@x.com".into(), "pw1".into());
        assert!(user.password_matches("pw1"));
        assert!(!user.password_matches("pw2"));
        assert!(!user.password_matches(""));
    }

    #[test]
    fn test_debug_redacts_password() {
        let user = User::new("a@x.com".into(), "hunter2".into());
        let debug = format!("{:?}", user);
        assert!(debug.contains("a@x.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_chat_entry_wire_shape() {
        let entry = ChatEntry::new("Hello".into(), "Hi there".into());
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["id"], entry.id);
        assert_eq!(json["user_message"], "Hello");
        assert_eq!(json["bot_response"], "Hi there");
        assert!(DateTime::parse_from_rfc3339(json["created_at"].as_str().unwrap()).is_ok());
    }

    #[test]
    fn test_created_at_uses_millisecond_precision() {
        let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 45).unwrap()
            + chrono::Duration::nanoseconds(123_456_789);
        let entry = ChatEntry {
            id: created_at.timestamp_millis(),
            user_message: "Hello".into(),
            bot_response: "Hi there".into(),
            created_at,
        };
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["created_at"], "2024-05-01T12:30:45.123Z");
        assert_eq!(json["created_at"], crate::rfc3339_millis(entry.created_at));
    }
}
