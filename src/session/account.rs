//! Account identity returned by `/api/me`.

use serde::{Deserialize, Serialize};

/// The logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub email: String,
    /// Root of the user's own files.
    pub personal_folder_id: i64,
    /// Root of deleted files.
    pub trash_folder_id: i64,
    pub max_upload_mb: u64,
    pub max_storage_mb: u64,
}

impl User {
    /// Largest accepted upload in bytes.
    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_mb.saturating_mul(1_000_000)
    }

    /// Total storage quota in bytes.
    pub fn max_storage_bytes(&self) -> u64 {
        self.max_storage_mb.saturating_mul(1_000_000)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    pub(crate) fn user_json() -> serde_json::Value {
        json!({
            "username": "alice_01",
            "email": "alice@example.com",
            "personalFolderId": 10,
            "trashFolderId": 11,
            "maxUploadMb": 50,
            "maxStorageMb": 1000,
        })
    }

    pub(crate) fn user() -> User {
        serde_json::from_value(user_json()).unwrap()
    }

    #[test]
    fn test_user_from_json() {
        let u = user();
        assert_eq!(u.username, "alice_01");
        assert_eq!(u.personal_folder_id, 10);
        assert_eq!(u.trash_folder_id, 11);
        assert_eq!(u.max_upload_bytes(), 50_000_000);
        assert_eq!(u.max_storage_bytes(), 1_000_000_000);
    }
}
