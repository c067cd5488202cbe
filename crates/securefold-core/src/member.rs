//! Member records.
//!
//! A member is an account that may be granted view access to folders.
//! Only the identifier matters to permission resolution; the display
//! attributes exist for administrative listings.

use serde::{Deserialize, Serialize};

use crate::types::MemberId;

/// A member account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// The member's identifier.
    pub id: MemberId,

    /// Display name.
    pub name: String,

    /// Contact address, if known.
    pub email: Option<String>,

    /// When the member record was created (Unix ms).
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_json_roundtrip() {
        let member = Member {
            id: MemberId::from_raw(3),
            name: "Ada".into(),
            email: Some("ada@example.org".into()),
            created_at: 1_700_000_000_000,
        };
        let json = serde_json::to_string(&member).unwrap();
        let recovered: Member = serde_json::from_str(&json).unwrap();
        assert_eq!(member, recovered);
    }
}
