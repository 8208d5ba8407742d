//! User service

use chrono::NaiveDateTime;

use super::{Store, meta_or_empty};
use crate::core::{Error, ExternalId, Result, SelectBuilder};
use crate::model::{MetaRecord, UserRecord};

const USER_COLUMNS: &str = "ID, user_login, user_pass, user_nicename, user_email, \
     user_url, user_registered, user_activation_key, user_status, display_name";

/// Public lookup field → physical column, in allow-list order.
const LOOKUP_COLUMNS: &[(&str, &str)] = &[
    ("id", "ID"),
    ("email", "user_email"),
    ("slug", "user_nicename"),
    ("username", "user_login"),
];

type UserRow = (
    i64,
    String,
    String,
    String,
    String,
    String,
    NaiveDateTime,
    String,
    i32,
    String,
);

/// Optional equality filters for [`UserService::find`], applied in
/// declaration order.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub id: Option<ExternalId>,
    pub email: Option<String>,
    pub slug: Option<String>,
    pub login: Option<String>,
}

pub struct UserService {
    store: Store,
}

impl UserService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    fn select(&self, filter: &UserFilter) -> SelectBuilder {
        let mut select = SelectBuilder::new(format!(
            "SELECT {} FROM {} WHERE 1 = 1",
            USER_COLUMNS,
            self.store.table("users"),
        ));
        if let Some(id) = filter.id {
            select.and_eq("ID", id.as_i64());
        }
        if let Some(email) = &filter.email {
            select.and_eq("user_email", email.clone());
        }
        if let Some(slug) = &filter.slug {
            select.and_eq("user_nicename", slug.clone());
        }
        if let Some(login) = &filter.login {
            select.and_eq("user_login", login.clone());
        }
        select
    }

    /// Users matching every present filter field; all users when none are
    /// present.
    pub async fn find(&self, filter: &UserFilter) -> Result<Vec<UserRecord>> {
        let (sql, arguments) = self.select(filter).build()?;
        let rows = sqlx::query_as_with::<_, UserRow, _>(&sql, arguments)
            .fetch_all(self.store.pool())
            .await?;

        let mut users = Vec::with_capacity(rows.len());
        for row in rows {
            let id = ExternalId::from_internal(row.0);
            let meta = meta_or_empty(&self.store, "usermeta", "umeta_id", "user_id", &id).await;
            users.push(row_to_user(row, meta));
        }
        Ok(users)
    }

    /// Single-row lookup through the public field allow-list.
    ///
    /// `field` must be one of `id`, `email`, `slug`, `username`; anything
    /// else fails with [`Error::UnsupportedField`] before a statement is
    /// built. Zero matching rows is [`Error::NotFound`].
    pub async fn find_by_field(&self, field: &str, value: &str) -> Result<UserRecord> {
        let column = lookup_column(field)?;
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ?",
            USER_COLUMNS,
            self.store.table("users"),
            column,
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(self.store.pool())
            .await?
            .ok_or_else(|| Error::NotFound {
                entity: "user",
                id: value.to_string(),
            })?;

        let id = ExternalId::from_internal(row.0);
        let meta = meta_or_empty(&self.store, "usermeta", "umeta_id", "user_id", &id).await;
        Ok(row_to_user(row, meta))
    }

    /// Meta rows for one user.
    pub async fn find_meta(&self, user: &ExternalId) -> Result<Vec<MetaRecord>> {
        super::fetch_meta(&self.store, "usermeta", "umeta_id", "user_id", user).await
    }
}

fn lookup_column(field: &str) -> Result<&'static str> {
    LOOKUP_COLUMNS
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, column)| *column)
        .ok_or_else(|| Error::UnsupportedField {
            field: field.to_string(),
        })
}

fn row_to_user(row: UserRow, meta: Vec<MetaRecord>) -> UserRecord {
    let (id, login, pass, nice_name, email, url, registered, activation_key, status, display_name) =
        row;
    UserRecord {
        id: ExternalId::from_internal(id),
        login,
        pass,
        nice_name,
        email,
        url,
        registered,
        activation_key,
        status,
        display_name,
        meta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Bind;

    fn test_service() -> UserService {
        let pool = sqlx::MySqlPool::connect_lazy("mysql://root@localhost/wp").unwrap();
        UserService::new(Store::new(pool, "wpa_"))
    }

    // -----------------------------------------------------------------------
    // Filter → statement composition
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn empty_filter_is_a_full_scan() {
        let service = test_service();
        let select = service.select(&UserFilter::default());
        assert!(select.sql().ends_with("FROM wpa_users WHERE 1 = 1"));
        assert!(select.binds().is_empty());
    }

    #[tokio::test]
    async fn present_fields_append_predicates_in_declaration_order() {
        let service = test_service();
        let filter = UserFilter {
            id: Some(ExternalId::from_internal(3)),
            email: None,
            slug: None,
            login: Some("admin".to_string()),
        };
        let select = service.select(&filter);
        assert!(select.sql().ends_with("WHERE 1 = 1 AND ID = ? AND user_login = ?"));
        assert_eq!(
            select.binds(),
            &[Bind::Int(3), Bind::Text("admin".to_string())]
        );
    }

    #[tokio::test]
    async fn single_email_filter_binds_only_the_email() {
        let service = test_service();
        let filter = UserFilter {
            email: Some("a@b.c".to_string()),
            ..Default::default()
        };
        let select = service.select(&filter);
        assert!(select.sql().ends_with("AND user_email = ?"));
        assert_eq!(select.binds(), &[Bind::Text("a@b.c".to_string())]);
    }

    // -----------------------------------------------------------------------
    // Lookup allow-list
    // -----------------------------------------------------------------------

    #[test]
    fn lookup_maps_public_names_to_columns() {
        assert_eq!(lookup_column("id").unwrap(), "ID");
        assert_eq!(lookup_column("email").unwrap(), "user_email");
        assert_eq!(lookup_column("slug").unwrap(), "user_nicename");
        assert_eq!(lookup_column("username").unwrap(), "user_login");
    }

    #[test]
    fn lookup_rejects_fields_outside_the_allow_list() {
        for bad in ["pass", "user_pass", "ID", "display_name", ""] {
            let err = lookup_column(bad).unwrap_err();
            assert_eq!(err.error_code(), "UNSUPPORTED_FIELD", "field: {:?}", bad);
        }
    }

    #[tokio::test]
    async fn find_by_field_fails_before_touching_the_database() {
        // The lazy pool has no server behind it: an UnsupportedField error
        // proves the allow-list check ran before query execution.
        let service = test_service();
        let err = service.find_by_field("user_pass", "x").await.unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_FIELD");
    }
}
