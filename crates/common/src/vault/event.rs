use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// A committed vault event, as reported by the vault's list endpoint
///
/// Created by the service once a write has been ingested. The client
/// never mutates events; `cid` is unique within its vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Content identifier assigned by the vault on ingestion
    pub cid: String,
    /// Submission time in unix seconds
    pub timestamp: i64,
    /// Whether the content has been promoted from cache to cold storage
    pub is_archived: bool,
    /// When the cached copy expires (ISO-8601)
    pub cache_expiry: String,
}

impl Event {
    /// Parsed `cache_expiry`, or `None` if the service sent something
    /// that isn't RFC 3339.
    pub fn cache_expires_at(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::parse(&self.cache_expiry, &Rfc3339).ok()
    }

    /// Submission time, if `timestamp` is in range
    pub fn submitted_at(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp(self.timestamp).ok()
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "  CID: {}\n  Timestamp: {}\n  IsArchived: {}\n  CacheExpiry: {}",
            self.cid, self.timestamp, self.is_archived, self.cache_expiry
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_decode_event_list() {
        let body = r#"[{"cid":"bafy123","timestamp":1700000000,"is_archived":false,"cache_expiry":"2024-01-01T00:00:00Z"}]"#;
        let events: Vec<Event> = serde_json::from_str(body).unwrap();
        assert_eq!(
            events,
            vec![Event {
                cid: "bafy123".into(),
                timestamp: 1700000000,
                is_archived: false,
                cache_expiry: "2024-01-01T00:00:00Z".into(),
            }]
        );
    }

    #[test]
    fn test_cache_expiry_parsing() {
        let mut event = Event {
            cid: "bafy123".into(),
            timestamp: 1700000000,
            is_archived: true,
            cache_expiry: "2024-01-01T00:00:00Z".into(),
        };
        let expiry = event.cache_expires_at().unwrap();
        assert_eq!(expiry.unix_timestamp(), 1704067200);
        assert_eq!(event.submitted_at().unwrap().unix_timestamp(), 1700000000);

        event.cache_expiry = "soon".into();
        assert!(event.cache_expires_at().is_none());
    }

    #[test]
    fn test_missing_field_fails() {
        let body = r#"[{"cid":"bafy123","timestamp":1700000000}]"#;
        assert!(serde_json::from_str::<Vec<Event>>(body).is_err());
    }
}
