use mongodb::{
    Collection, Database,
    bson::{DateTime, Document, doc},
};

use super::{collect, search_any, search_term};
use crate::dto::user::{UpdateUserRequest, UserFilter};
use crate::error::{Result, StorageError};
use crate::models::{User, UserRole, new_id};

pub const COLLECTION: &str = "users";

const DUPLICATE_EMAIL: &str = "Email already registered";

/// Fields of a new account. The password is already hashed.
pub struct NewUser<'r> {
    pub email: &'r str,
    pub name: &'r str,
    pub surname: &'r str,
    pub role: UserRole,
    pub password_hash: String,
}

pub struct UserRepository<'a> {
    db: &'a Database,
}

impl<'a> UserRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<User> {
        self.db.collection(COLLECTION)
    }

    pub async fn list(&self, filter: &UserFilter) -> Result<(Vec<User>, u64)> {
        let query = filter_document(filter);
        let pagination = filter.pagination();

        let total = self.collection().count_documents(query.clone()).await?;
        let cursor = self
            .collection()
            .find(query)
            .sort(doc! { "surname": 1, "name": 1 })
            .skip(pagination.offset())
            .limit(pagination.limit())
            .await?;

        Ok((collect(cursor).await?, total))
    }

    pub async fn find_by_id(&self, id: &str) -> Result<User> {
        self.collection()
            .find_one(doc! { "_id": id })
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Emails are stored lowercase, so lookups are case-insensitive
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .collection()
            .find_one(doc! { "email": normalize_email(email) })
            .await?)
    }

    pub async fn create(&self, new_user: NewUser<'_>) -> Result<User> {
        let now = DateTime::now();
        let user = User {
            id: new_id(),
            email: normalize_email(new_user.email),
            name: new_user.name.trim().to_string(),
            surname: new_user.surname.trim().to_string(),
            role: new_user.role,
            associated_team_id: None,
            permissions: Vec::new(),
            password_hash: new_user.password_hash,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        self.collection()
            .insert_one(&user)
            .await
            .map_err(|e| StorageError::from(e).on_duplicate(DUPLICATE_EMAIL))?;

        Ok(user)
    }

    pub async fn update(&self, existing: &User, req: &UpdateUserRequest) -> Result<User> {
        let mut user = existing.clone();

        if let Some(name) = &req.name {
            user.name = name.trim().to_string();
        }
        if let Some(surname) = &req.surname {
            user.surname = surname.trim().to_string();
        }
        if let Some(role) = req.role {
            user.role = role;
        }
        if let Some(team_id) = &req.associated_team_id {
            user.associated_team_id = team_id.clone();
        }
        if let Some(permissions) = &req.permissions {
            user.permissions = permissions.clone();
        }
        if let Some(is_active) = req.is_active {
            user.is_active = is_active;
        }
        user.updated_at = DateTime::now();

        let result = self
            .collection()
            .replace_one(doc! { "_id": user.id.as_str() }, &user)
            .await?;

        if result.matched_count == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(user)
    }

    /// Swap in a new hash, used when a legacy password is upgraded at login
    pub async fn update_password_hash(&self, id: &str, password_hash: &str) -> Result<()> {
        self.collection()
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "passwordHash": password_hash, "updatedAt": DateTime::now() } },
            )
            .await?;

        Ok(())
    }

    /// Soft delete
    pub async fn deactivate(&self, id: &str) -> Result<()> {
        let result = self
            .collection()
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "isActive": false, "updatedAt": DateTime::now() } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub(crate) fn filter_document(filter: &UserFilter) -> Document {
    let mut query = Document::new();

    if let Some(role) = filter.role {
        query.insert("role", role.as_str());
    }
    if let Some(term) = search_term(&filter.search) {
        query.extend(search_any(&["name", "surname", "email"], term));
    }

    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Pedro@Example.COM "), "pedro@example.com");
    }

    #[test]
    fn test_filter_by_role() {
        let filter = UserFilter {
            role: Some(UserRole::Coach),
            ..Default::default()
        };
        assert_eq!(filter_document(&filter), doc! { "role": "COACH" });
    }
}
