//! PostgreSQL implementation of the contact repository.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::sync::Arc;

use crate::domain::entities::{Contact, ContactPatch, NewContact};
use crate::domain::repositories::{ContactFilter, ContactRepository};
use crate::error::AppError;
use crate::utils::like_pattern::contains_pattern;

/// PostgreSQL repository for contact storage and retrieval.
///
/// Dynamic filters and partial updates are assembled with [`QueryBuilder`],
/// so every user-supplied value is sent as a bound parameter.
pub struct PgContactRepository {
    pool: Arc<PgPool>,
}

impl PgContactRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Appends the `WHERE` clause for a contact filter.
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: ContactFilter) {
    builder.push(" WHERE TRUE");

    if let Some(favorite) = filter.favorite {
        builder.push(" AND favorite = ").push_bind(favorite);
    }

    if let Some(name) = filter.name {
        builder
            .push(" AND name ILIKE ")
            .push_bind(contains_pattern(&name));
    }
}

#[async_trait]
impl ContactRepository for PgContactRepository {
    async fn create(&self, new_contact: NewContact) -> Result<Contact, AppError> {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            INSERT INTO contacts (name, email, address, phone, favorite, avatar)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, email, address, phone, favorite, avatar
            "#,
        )
        .bind(new_contact.name)
        .bind(new_contact.email)
        .bind(new_contact.address)
        .bind(new_contact.phone)
        .bind(new_contact.favorite)
        .bind(new_contact.avatar)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(contact)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Contact>, AppError> {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            SELECT id, name, email, address, phone, favorite, avatar
            FROM contacts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(contact)
    }

    async fn list(
        &self,
        filter: ContactFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Contact>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT id, name, email, address, phone, favorite, avatar FROM contacts",
        );
        push_filter(&mut builder, filter);
        builder
            .push(" ORDER BY id ASC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let contacts = builder
            .build_query_as::<Contact>()
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(contacts)
    }

    async fn count(&self, filter: ContactFilter) -> Result<i64, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM contacts");
        push_filter(&mut builder, filter);

        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn update(&self, id: i64, patch: ContactPatch) -> Result<Option<Contact>, AppError> {
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE contacts SET ");
        let mut fields = builder.separated(", ");

        if let Some(name) = patch.name {
            fields.push("name = ").push_bind_unseparated(name);
        }
        if let Some(email) = patch.email {
            fields.push("email = ").push_bind_unseparated(email);
        }
        if let Some(address) = patch.address {
            fields.push("address = ").push_bind_unseparated(address);
        }
        if let Some(phone) = patch.phone {
            fields.push("phone = ").push_bind_unseparated(phone);
        }
        if let Some(favorite) = patch.favorite {
            fields.push("favorite = ").push_bind_unseparated(favorite);
        }
        if let Some(avatar) = patch.avatar {
            fields.push("avatar = ").push_bind_unseparated(avatar);
        }

        builder
            .push(" WHERE id = ")
            .push_bind(id)
            .push(" RETURNING id, name, email, address, phone, favorite, avatar");

        let contact = builder
            .build_query_as::<Contact>()
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(contact)
    }

    async fn delete(&self, id: i64) -> Result<Option<Contact>, AppError> {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            DELETE FROM contacts
            WHERE id = $1
            RETURNING id, name, email, address, phone, favorite, avatar
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(contact)
    }

    async fn delete_all(&self) -> Result<Vec<Contact>, AppError> {
        let contacts = sqlx::query_as::<_, Contact>(
            "DELETE FROM contacts RETURNING id, name, email, address, phone, favorite, avatar",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(contacts)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
