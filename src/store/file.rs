// ABOUTME: Credential store backed by a JSON users file re-read on every lookup
// ABOUTME: Edits to the file take effect on the next login; read failures surface as store outages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! The users file is a JSON array of entries:
//!
//! ```json
//! [
//!   { "username": "admin", "password_hash": "$2b$12$...", "role": "admin" },
//!   { "username": "user",  "password": "user123",        "role": "user" }
//! ]
//! ```
//!
//! Plaintext `password` entries are accepted for compatibility but logged as a
//! warning; use `rolegate-server hash-password` to produce hashes.

use super::CredentialStore;
use crate::errors::AuthError;
use crate::models::{CredentialRecord, CredentialSource, SourceSecret};
use crate::password::hash_password;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::{fs, task};

/// Credential store reading a JSON users file
#[derive(Debug, Clone)]
pub struct JsonFileCredentialStore {
    path: PathBuf,
    bcrypt_cost: u32,
}

impl JsonFileCredentialStore {
    /// Create a store over `path`; the file is not read until first use
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, bcrypt_cost: u32) -> Self {
        Self {
            path: path.into(),
            bcrypt_cost,
        }
    }

    /// Read and validate every entry
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::StoreUnavailable`] if the file cannot be read or parsed,
    /// or if any entry is malformed
    pub async fn load_all(&self) -> Result<Vec<CredentialSource>, AuthError> {
        let raw = fs::read_to_string(&self.path).await.map_err(|e| {
            AuthError::store_unavailable(format!(
                "failed to read users file {}: {e}",
                self.path.display()
            ))
        })?;
        let sources: Vec<CredentialSource> = serde_json::from_str(&raw).map_err(|e| {
            AuthError::store_unavailable(format!(
                "failed to parse users file {}: {e}",
                self.path.display()
            ))
        })?;
        for source in &sources {
            source.secret()?;
        }
        Ok(sources)
    }

    async fn to_record(&self, source: CredentialSource) -> Result<CredentialRecord, AuthError> {
        let password_hash = match source.secret()? {
            SourceSecret::Hash(hash) => hash.to_owned(),
            SourceSecret::Plaintext(plain) => {
                tracing::warn!(
                    username = %source.username,
                    file = %self.path.display(),
                    "users file stores a plaintext password"
                );
                let plain = plain.to_owned();
                let cost = self.bcrypt_cost;
                task::spawn_blocking(move || hash_password(&plain, cost))
                    .await
                    .map_err(|e| {
                        AuthError::store_unavailable(format!("password hashing task failed: {e}"))
                    })??
            }
        };
        Ok(CredentialRecord::new(source.username, password_hash, source.role))
    }
}

#[async_trait]
impl CredentialStore for JsonFileCredentialStore {
    async fn lookup(&self, username: &str) -> Result<Option<CredentialRecord>, AuthError> {
        let sources = self.load_all().await?;
        let mut matches = sources.into_iter().filter(|s| s.username == username);
        let Some(found) = matches.next() else {
            return Ok(None);
        };
        if matches.next().is_some() {
            return Err(AuthError::store_unavailable(format!(
                "users file {} lists '{username}' more than once",
                self.path.display()
            )));
        }
        self.to_record(found).await.map(Some)
    }

    async fn probe(&self) -> Result<(), AuthError> {
        self.load_all().await.map(|_| ())
    }

    fn backend_name(&self) -> &'static str {
        "json-file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::password::MIN_COST;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn users_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_lookup_reads_plaintext_and_hashed_entries() {
        let hash = hash_password("admin123", MIN_COST).unwrap();
        let file = users_file(&format!(
            r#"[
                {{"username": "admin", "password_hash": "{hash}", "role": "admin"}},
                {{"username": "user", "password": "user123", "role": "user"}}
            ]"#
        ));
        let store = JsonFileCredentialStore::new(file.path(), MIN_COST);

        let admin = store.lookup("admin").await.unwrap().unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.password_hash, hash);

        let user = store.lookup("user").await.unwrap().unwrap();
        assert_eq!(user.role, Role::User);
        assert!(user.password_hash.starts_with("$2"));

        assert!(store.lookup("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_file_is_unavailable_not_empty() {
        let store = JsonFileCredentialStore::new("/nonexistent/rolegate/users.json", MIN_COST);
        let err = store.lookup("admin").await.unwrap_err();
        assert!(matches!(err, AuthError::StoreUnavailable { .. }));
        assert!(store.probe().await.is_err());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_unavailable() {
        let file = users_file("{ not json");
        let store = JsonFileCredentialStore::new(file.path(), MIN_COST);
        assert!(store.load_all().await.is_err());
    }

    #[tokio::test]
    async fn test_duplicate_entry_is_unavailable() {
        let file = users_file(
            r#"[
                {"username": "a", "password": "x", "role": "user"},
                {"username": "a", "password": "y", "role": "admin"}
            ]"#,
        );
        let store = JsonFileCredentialStore::new(file.path(), MIN_COST);
        let err = store.lookup("a").await.unwrap_err();
        assert!(matches!(err, AuthError::StoreUnavailable { .. }));
    }
}
