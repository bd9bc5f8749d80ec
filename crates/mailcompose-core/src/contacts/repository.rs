//! Contact storage repository.

use mailcompose_address::AddressList;
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use tracing::debug;

use super::model::Contact;
use crate::directory::{DirectoryLookup, DirectoryMatch};
use crate::{Error, Result};

/// Maximum number of contacts returned by a directory search.
pub const DEFAULT_SEARCH_LIMIT: u32 = 25;

/// Smallest directory search limit that can still report an ambiguous match.
pub const MIN_SEARCH_LIMIT: u32 = 2;

/// Repository for contact storage and retrieval.
pub struct ContactRepository {
    pool: SqlitePool,
    search_limit: u32,
}

impl ContactRepository {
    /// Create a new repository with the given database path.
    ///
    /// Creates the database and tables if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn new(database_path: &str) -> Result<Self> {
        let url = format!("sqlite:{database_path}?mode=rwc");
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await?;

        let repo = Self {
            pool,
            search_limit: DEFAULT_SEARCH_LIMIT,
        };
        repo.initialize().await?;
        Ok(repo)
    }

    /// Create an in-memory repository for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let repo = Self {
            pool,
            search_limit: DEFAULT_SEARCH_LIMIT,
        };
        repo.initialize().await?;
        Ok(repo)
    }

    /// Sets how many candidates a directory search may return.
    ///
    /// Values below [`MIN_SEARCH_LIMIT`] are raised to it.
    #[must_use]
    pub const fn with_search_limit(mut self, limit: u32) -> Self {
        self.search_limit = if limit < MIN_SEARCH_LIMIT {
            MIN_SEARCH_LIMIT
        } else {
            limit
        };
        self
    }

    /// Initialize database schema.
    async fn initialize(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS contacts (
                email TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL DEFAULT '',
                use_count INTEGER NOT NULL DEFAULT 1,
                last_used TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_contacts_name ON contacts(name COLLATE NOCASE)
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Record a contact (insert or update use count).
    ///
    /// If the contact already exists, increments the use count and updates `last_used`.
    /// A non-empty name replaces the stored one.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn record(&self, email: &str, name: &str) -> Result<()> {
        let email_normalized = email.trim().to_lowercase();
        let name_trimmed = name.trim();

        sqlx::query(
            r"
            INSERT INTO contacts (email, name, use_count, last_used)
            VALUES (?, ?, 1, CURRENT_TIMESTAMP)
            ON CONFLICT(email) DO UPDATE SET
                name = CASE
                    WHEN excluded.name != '' THEN excluded.name
                    ELSE contacts.name
                END,
                use_count = contacts.use_count + 1,
                last_used = CURRENT_TIMESTAMP
            ",
        )
        .bind(&email_normalized)
        .bind(name_trimmed)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Records every complete address of a recipient list.
    ///
    /// Fragments are skipped. Returns the number of contacts recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn record_list(&self, list: &AddressList) -> Result<usize> {
        let mut recorded = 0;
        for address in list.iter().filter(|address| address.is_complete()) {
            self.record(&address.bare_address(), address.personal().unwrap_or_default())
                .await?;
            recorded += 1;
        }
        debug!(recorded, "recorded recipients as contacts");
        Ok(recorded)
    }

    /// Search contacts matching a query string.
    ///
    /// Returns contacts where email or name contains the query (case-insensitive).
    /// `%` and `_` in the query match literally.
    /// Results are ordered by `use_count` descending (most used first).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn search(&self, query: &str, limit: u32) -> Result<Vec<Contact>> {
        let query_pattern = format!("%{}%", escape_like(&query.trim().to_lowercase()));

        let rows = sqlx::query(
            r"
            SELECT email, name, use_count
            FROM contacts
            WHERE LOWER(email) LIKE ? ESCAPE '\' OR LOWER(name) LIKE ? ESCAPE '\'
            ORDER BY use_count DESC, last_used DESC, email ASC
            LIMIT ?
            ",
        )
        .bind(&query_pattern)
        .bind(&query_pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(contact_from_row).collect())
    }

    /// Get all contacts ordered by use count.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, limit: u32) -> Result<Vec<Contact>> {
        let rows = sqlx::query(
            r"
            SELECT email, name, use_count
            FROM contacts
            ORDER BY use_count DESC, last_used DESC, email ASC
            LIMIT ?
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(contact_from_row).collect())
    }

    /// Delete a contact.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn delete(&self, email: &str) -> Result<()> {
        sqlx::query("DELETE FROM contacts WHERE email = ?")
            .bind(email.trim().to_lowercase())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

impl DirectoryLookup for ContactRepository {
    async fn search(&self, fragment: &str) -> Result<Vec<DirectoryMatch>> {
        let contacts = Self::search(self, fragment, self.search_limit)
            .await
            .map_err(|e| Error::DirectoryUnavailable(e.to_string()))?;

        Ok(contacts.iter().filter_map(Contact::to_match).collect())
    }
}

/// Escapes `LIKE` wildcards so the text matches literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn contact_from_row(row: &SqliteRow) -> Contact {
    Contact {
        email: row.get("email"),
        name: row.get("name"),
        use_count: row.get::<i64, _>("use_count") as u32,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use mailcompose_address::ParseOptions;

    use super::*;

    #[tokio::test]
    async fn test_record_and_search() {
        let repo = ContactRepository::in_memory().await.unwrap();

        repo.record("alice@example.com", "Alice Smith")
            .await
            .unwrap();
        repo.record("bob@example.com", "Bob Jones").await.unwrap();

        let results = repo.search("alice", 10).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].email, "alice@example.com");
        assert_eq!(results[0].name, "Alice Smith");
    }

    #[tokio::test]
    async fn test_increment_use_count() {
        let repo = ContactRepository::in_memory().await.unwrap();

        repo.record("test@example.com", "Test User").await.unwrap();
        repo.record("test@example.com", "").await.unwrap();
        repo.record("test@example.com", "").await.unwrap();

        let results = repo.search("test", 10).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].use_count, 3);
        // Name should be preserved
        assert_eq!(results[0].name, "Test User");
    }

    #[tokio::test]
    async fn test_case_insensitive_search() {
        let repo = ContactRepository::in_memory().await.unwrap();

        repo.record("Test@Example.COM", "Test User").await.unwrap();

        let results = repo.search("TEST", 10).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].email, "test@example.com");
    }

    #[tokio::test]
    async fn test_order_by_use_count() {
        let repo = ContactRepository::in_memory().await.unwrap();

        repo.record("rare@example.com", "Rare").await.unwrap();
        repo.record("frequent@example.com", "Frequent")
            .await
            .unwrap();
        repo.record("frequent@example.com", "").await.unwrap();

        let results = repo.search("example", 10).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].email, "frequent@example.com");
        assert_eq!(results[1].email, "rare@example.com");
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = ContactRepository::in_memory().await.unwrap();

        repo.record("gone@example.com", "").await.unwrap();
        repo.delete("GONE@example.com").await.unwrap();

        assert!(repo.list(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_record_list_skips_fragments() {
        let repo = ContactRepository::in_memory().await.unwrap();
        let list = AddressList::parse(
            "Alice <alice@example.com>, bob@example.com, car",
            &ParseOptions::default(),
        )
        .unwrap();

        assert_eq!(repo.record_list(&list).await.unwrap(), 2);

        let contacts = repo.list(10).await.unwrap();
        assert_eq!(contacts.len(), 2);
        assert!(contacts.iter().any(|c| c.name == "Alice"));
    }

    #[tokio::test]
    async fn test_directory_lookup_respects_limit() {
        let repo = ContactRepository::in_memory()
            .await
            .unwrap()
            .with_search_limit(2);

        for email in ["a1@x.com", "a2@x.com", "a3@x.com"] {
            repo.record(email, "").await.unwrap();
        }

        let matches = DirectoryLookup::search(&repo, "x.com").await.unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].host, "x.com");
    }

    #[tokio::test]
    async fn test_search_wildcards_match_literally() {
        let repo = ContactRepository::in_memory().await.unwrap();
        repo.record("john_doe@x.com", "").await.unwrap();
        repo.record("johnxdoe@x.com", "").await.unwrap();
        repo.record("fifty@x.com", "100% Fifty").await.unwrap();

        let results = repo.search("john_doe", 10).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].email, "john_doe@x.com");

        let results = repo.search("%", 10).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].email, "fifty@x.com");

        assert!(repo.search("\\", 10).await.unwrap().is_empty());
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("a_b%c\\d"), "a\\_b\\%c\\\\d");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[tokio::test]
    async fn test_search_limit_never_below_two() {
        let repo = ContactRepository::in_memory()
            .await
            .unwrap()
            .with_search_limit(1);
        repo.record("john@x.com", "").await.unwrap();
        repo.record("joe@x.com", "").await.unwrap();

        let matches = DirectoryLookup::search(&repo, "jo").await.unwrap();
        assert_eq!(matches.len(), 2);
    }

    #[tokio::test]
    async fn test_directory_lookup_backend_failure() {
        let repo = ContactRepository::in_memory().await.unwrap();
        repo.pool.close().await;

        let err = DirectoryLookup::search(&repo, "a").await.unwrap_err();
        assert!(matches!(err, Error::DirectoryUnavailable(_)));
    }
}
