// ABOUTME: Immutable in-memory credential store built once at startup
// ABOUTME: Hashes legacy plaintext entries on load and rejects duplicate usernames
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::CredentialStore;
use crate::errors::AuthError;
use crate::models::{CredentialRecord, CredentialSource, SourceSecret};
use crate::password::hash_password;
use async_trait::async_trait;
use std::collections::HashMap;

/// Credential table loaded once; safe to share between any number of readers
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    records: HashMap<String, CredentialRecord>,
}

impl InMemoryCredentialStore {
    /// Build from already-hashed records
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::StoreUnavailable`] if two records share a username
    pub fn from_records(
        records: impl IntoIterator<Item = CredentialRecord>,
    ) -> Result<Self, AuthError> {
        let mut table = HashMap::new();
        for record in records {
            if table.contains_key(&record.username) {
                return Err(AuthError::store_unavailable(format!(
                    "duplicate username '{}' in credential table",
                    record.username
                )));
            }
            table.insert(record.username.clone(), record);
        }
        Ok(Self { records: table })
    }

    /// Build from users-file entries, hashing plaintext passwords with `bcrypt_cost`
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::StoreUnavailable`] on malformed entries, duplicates, or
    /// hashing failures
    pub fn from_sources(
        sources: &[CredentialSource],
        bcrypt_cost: u32,
    ) -> Result<Self, AuthError> {
        let mut records = Vec::with_capacity(sources.len());
        for source in sources {
            let password_hash = match source.secret()? {
                SourceSecret::Plaintext(plain) => {
                    tracing::warn!(
                        username = %source.username,
                        "plaintext password in credential source; hashing on load"
                    );
                    hash_password(plain, bcrypt_cost)?
                }
                SourceSecret::Hash(hash) => hash.to_owned(),
            };
            records.push(CredentialRecord::new(
                source.username.clone(),
                password_hash,
                source.role,
            ));
        }
        Self::from_records(records)
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn lookup(&self, username: &str) -> Result<Option<CredentialRecord>, AuthError> {
        Ok(self.records.get(username).cloned())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::password::MIN_COST;
    use crate::store::demo_users;

    #[tokio::test]
    async fn test_lookup_is_exact_and_case_sensitive() {
        let store = InMemoryCredentialStore::from_sources(&demo_users(), MIN_COST).unwrap();
        assert_eq!(store.len(), 2);

        let admin = store.lookup("admin").await.unwrap().unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert_ne!(admin.password_hash, "admin123");

        assert!(store.lookup("Admin").await.unwrap().is_none());
        assert!(store.lookup("admin ").await.unwrap().is_none());
        assert!(store.lookup("nobody").await.unwrap().is_none());
    }

    #[test]
    fn test_duplicate_usernames_rejected() {
        let records = vec![
            CredentialRecord::new("dup", "h1", Role::User),
            CredentialRecord::new("dup", "h2", Role::Admin),
        ];
        let err = InMemoryCredentialStore::from_records(records).unwrap_err();
        assert!(matches!(err, AuthError::StoreUnavailable { .. }));
    }
}
