use chrono::{DateTime, Utc};
use locshare_storage::{
    AccessGrant, AccessGrantStore, AccessLevel, CreateLocationParams, CreateUserParams, GrantId,
    Location, LocationId, LocationStore, SaveAccessGrantParams, Store, StoreError, Transaction,
    User, UserId, UserStore,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool};
use std::str::FromStr;
use std::time::Duration;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

const GRANT_SELECT: &str = "SELECT g.id, g.access_level, g.created_at, g.updated_at,
        u.id AS user_id, u.email AS user_email, u.name AS user_name,
        u.created_at AS user_created_at,
        l.id AS location_id, l.name AS location_name, l.address AS location_address,
        l.owner_id AS location_owner_id, l.created_at AS location_created_at
   FROM access_grants g
   JOIN users u ON u.id = g.user_id
   JOIN locations l ON l.id = g.location_id";

pub struct SqliteStore {
    pool: SqlitePool,
}

/// A live SQLite transaction. Dropping it without `commit` rolls back.
pub struct SqliteTxn {
    tx: sqlx::Transaction<'static, Sqlite>,
}

impl SqliteStore {
    /// `~/.locshare/store.db` (creates dir with 0700 perms on unix)
    pub async fn open_default() -> Result<Self, StoreError> {
        let dir = dirs::home_dir()
            .ok_or_else(|| StoreError::Backend("no home dir".into()))?
            .join(".locshare");
        std::fs::create_dir_all(&dir).map_err(|e| StoreError::Backend(e.to_string()))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o700))
                .map_err(|e| StoreError::Backend(e.to_string()))?;
        }
        let path = dir.join("store.db");
        let url = format!("sqlite://{}", path.to_string_lossy());
        Self::open(&url).await
    }

    pub async fn open_in_memory() -> Result<Self, StoreError> {
        // Every in-memory connection is its own database, so stay on one.
        Self::open_with_max_connections("sqlite::memory:", 1).await
    }

    pub async fn open(url: &str) -> Result<Self, StoreError> {
        Self::open_with_max_connections(url, 1).await
    }

    pub async fn open_with_max_connections(
        url: &str,
        max_connections: u32,
    ) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        MIGRATOR
            .run(&pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        tracing::debug!(url, max_connections, "sqlite store ready");
        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl Store for SqliteStore {
    type Txn = SqliteTxn;

    async fn begin_txn(&self) -> Result<Self::Txn, StoreError> {
        let tx = self.pool.begin().await.map_err(backend)?;
        Ok(SqliteTxn { tx })
    }
}

#[async_trait::async_trait]
impl Transaction for SqliteTxn {
    async fn commit(self) -> Result<(), StoreError> {
        self.tx.commit().await.map_err(backend)
    }

    async fn rollback(self) -> Result<(), StoreError> {
        self.tx.rollback().await.map_err(backend)
    }
}

// ───────────────────────────── Row mapping ─────────────────────────────

fn backend(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

/// Map insert/update failures: unique violations and dangling references get their own variants.
fn write_error(e: sqlx::Error) -> StoreError {
    let s = e.to_string();
    if s.contains("UNIQUE") {
        StoreError::AlreadyExists
    } else if s.contains("FOREIGN KEY") {
        StoreError::NotFound
    } else {
        StoreError::Backend(s)
    }
}

fn timestamp(secs: i64) -> Result<DateTime<Utc>, StoreError> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| StoreError::Backend(format!("invalid timestamp: {}", secs)))
}

fn parse_level(s: &str) -> Result<AccessLevel, StoreError> {
    s.parse::<AccessLevel>()
        .map_err(|e| StoreError::Backend(e.to_string()))
}

type UserRow = (i64, String, String, i64);
type LocationRow = (i64, String, String, i64, i64);

fn user_from_row((id, email, name, created_at): UserRow) -> Result<User, StoreError> {
    Ok(User {
        id: UserId(id),
        email,
        name,
        created_at: timestamp(created_at)?,
    })
}

fn location_from_row(
    (id, name, address, owner_id, created_at): LocationRow,
) -> Result<Location, StoreError> {
    Ok(Location {
        id: LocationId(id),
        name,
        address,
        owner_id: UserId(owner_id),
        created_at: timestamp(created_at)?,
    })
}

#[derive(sqlx::FromRow)]
struct GrantRow {
    id: i64,
    access_level: String,
    created_at: i64,
    updated_at: i64,
    user_id: i64,
    user_email: String,
    user_name: String,
    user_created_at: i64,
    location_id: i64,
    location_name: String,
    location_address: String,
    location_owner_id: i64,
    location_created_at: i64,
}

impl TryFrom<GrantRow> for AccessGrant {
    type Error = StoreError;

    fn try_from(row: GrantRow) -> Result<Self, Self::Error> {
        Ok(AccessGrant {
            id: GrantId(row.id),
            user: User {
                id: UserId(row.user_id),
                email: row.user_email,
                name: row.user_name,
                created_at: timestamp(row.user_created_at)?,
            },
            location: Location {
                id: LocationId(row.location_id),
                name: row.location_name,
                address: row.location_address,
                owner_id: UserId(row.location_owner_id),
                created_at: timestamp(row.location_created_at)?,
            },
            access_level: parse_level(&row.access_level)?,
            created_at: timestamp(row.created_at)?,
            updated_at: timestamp(row.updated_at)?,
        })
    }
}

fn grants_from_rows(rows: Vec<GrantRow>) -> Result<Vec<AccessGrant>, StoreError> {
    rows.into_iter().map(AccessGrant::try_from).collect()
}

// ───────────────────────────── Users ─────────────────────────────

#[async_trait::async_trait]
impl UserStore for SqliteTxn {
    async fn create_user(&mut self, params: &CreateUserParams) -> Result<User, StoreError> {
        let now = Utc::now().timestamp();
        let id = sqlx::query("INSERT INTO users(email, name, created_at) VALUES(?, ?, ?)")
            .bind(&params.email)
            .bind(&params.name)
            .bind(now)
            .execute(&mut *self.tx)
            .await
            .map_err(write_error)?
            .last_insert_rowid();

        Ok(User {
            id: UserId(id),
            email: params.email.clone(),
            name: params.name.clone(),
            created_at: timestamp(now)?,
        })
    }

    async fn get_user_by_email(&mut self, email: &str) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, name, created_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(backend)?;

        row.map(user_from_row).unwrap_or(Err(StoreError::NotFound))
    }

    async fn get_user_by_id(&mut self, user_id: &UserId) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, name, created_at FROM users WHERE id = ?",
        )
        .bind(user_id.0)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(backend)?;

        row.map(user_from_row).unwrap_or(Err(StoreError::NotFound))
    }

    async fn user_exists_by_email(&mut self, email: &str) -> Result<bool, StoreError> {
        let (exists,) =
            sqlx::query_as::<_, (i64,)>("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)")
                .bind(email)
                .fetch_one(&mut *self.tx)
                .await
                .map_err(backend)?;
        Ok(exists != 0)
    }

    async fn list_users(&mut self) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, name, created_at FROM users ORDER BY id",
        )
        .fetch_all(&mut *self.tx)
        .await
        .map_err(backend)?;

        rows.into_iter().map(user_from_row).collect()
    }
}

// ───────────────────────────── Locations ─────────────────────────────

#[async_trait::async_trait]
impl LocationStore for SqliteTxn {
    async fn create_location(
        &mut self,
        params: &CreateLocationParams,
    ) -> Result<Location, StoreError> {
        let now = Utc::now().timestamp();
        let id = sqlx::query(
            "INSERT INTO locations(name, address, owner_id, created_at) VALUES(?, ?, ?, ?)",
        )
        .bind(&params.name)
        .bind(&params.address)
        .bind(params.owner_id.0)
        .bind(now)
        .execute(&mut *self.tx)
        .await
        .map_err(write_error)?
        .last_insert_rowid();

        Ok(Location {
            id: LocationId(id),
            name: params.name.clone(),
            address: params.address.clone(),
            owner_id: params.owner_id,
            created_at: timestamp(now)?,
        })
    }

    async fn get_location(&mut self, location_id: &LocationId) -> Result<Location, StoreError> {
        let row = sqlx::query_as::<_, LocationRow>(
            "SELECT id, name, address, owner_id, created_at FROM locations WHERE id = ?",
        )
        .bind(location_id.0)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(backend)?;

        row.map(location_from_row)
            .unwrap_or(Err(StoreError::NotFound))
    }

    async fn get_location_by_address(&mut self, address: &str) -> Result<Location, StoreError> {
        let row = sqlx::query_as::<_, LocationRow>(
            "SELECT id, name, address, owner_id, created_at FROM locations WHERE address = ?",
        )
        .bind(address)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(backend)?;

        row.map(location_from_row)
            .unwrap_or(Err(StoreError::NotFound))
    }

    async fn location_exists_by_address(&mut self, address: &str) -> Result<bool, StoreError> {
        let (exists,) = sqlx::query_as::<_, (i64,)>(
            "SELECT EXISTS(SELECT 1 FROM locations WHERE address = ?)",
        )
        .bind(address)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(backend)?;
        Ok(exists != 0)
    }

    async fn list_locations(&mut self) -> Result<Vec<Location>, StoreError> {
        let rows = sqlx::query_as::<_, LocationRow>(
            "SELECT id, name, address, owner_id, created_at FROM locations ORDER BY id",
        )
        .fetch_all(&mut *self.tx)
        .await
        .map_err(backend)?;

        rows.into_iter().map(location_from_row).collect()
    }
}

// ───────────────────────────── Access grants ─────────────────────────────

#[async_trait::async_trait]
impl AccessGrantStore for SqliteTxn {
    async fn save_grant(
        &mut self,
        params: &SaveAccessGrantParams,
    ) -> Result<AccessGrant, StoreError> {
        let now = Utc::now().timestamp();
        let id = match params.id {
            None => sqlx::query(
                "INSERT INTO access_grants(user_id, location_id, access_level, created_at, updated_at)
                 VALUES(?, ?, ?, ?, ?)",
            )
            .bind(params.user_id.0)
            .bind(params.location_id.0)
            .bind(params.access_level.as_str())
            .bind(now)
            .bind(now)
            .execute(&mut *self.tx)
            .await
            .map_err(write_error)?
            .last_insert_rowid(),
            Some(id) => {
                let result = sqlx::query(
                    "UPDATE access_grants
                        SET user_id = ?, location_id = ?, access_level = ?, updated_at = ?
                      WHERE id = ?",
                )
                .bind(params.user_id.0)
                .bind(params.location_id.0)
                .bind(params.access_level.as_str())
                .bind(now)
                .bind(id.0)
                .execute(&mut *self.tx)
                .await
                .map_err(write_error)?;

                if result.rows_affected() == 0 {
                    return Err(StoreError::NotFound);
                }
                id.0
            }
        };

        self.get_grant(&GrantId(id)).await
    }

    async fn get_grant(&mut self, grant_id: &GrantId) -> Result<AccessGrant, StoreError> {
        let sql = format!("{} WHERE g.id = ?", GRANT_SELECT);
        let row = sqlx::query_as::<_, GrantRow>(&sql)
            .bind(grant_id.0)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(backend)?;

        row.map(AccessGrant::try_from)
            .unwrap_or(Err(StoreError::NotFound))
    }

    async fn get_grant_for(
        &mut self,
        location_id: &LocationId,
        user_id: &UserId,
    ) -> Result<AccessGrant, StoreError> {
        let sql = format!(
            "{} WHERE g.location_id = ? AND g.user_id = ? ORDER BY g.id LIMIT 1",
            GRANT_SELECT
        );
        let row = sqlx::query_as::<_, GrantRow>(&sql)
            .bind(location_id.0)
            .bind(user_id.0)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(backend)?;

        row.map(AccessGrant::try_from)
            .unwrap_or(Err(StoreError::NotFound))
    }

    async fn list_grants(&mut self) -> Result<Vec<AccessGrant>, StoreError> {
        let sql = format!("{} ORDER BY g.id", GRANT_SELECT);
        let rows = sqlx::query_as::<_, GrantRow>(&sql)
            .fetch_all(&mut *self.tx)
            .await
            .map_err(backend)?;
        grants_from_rows(rows)
    }

    async fn list_grants_for_user(
        &mut self,
        user_id: &UserId,
    ) -> Result<Vec<AccessGrant>, StoreError> {
        let sql = format!("{} WHERE g.user_id = ? ORDER BY g.id", GRANT_SELECT);
        let rows = sqlx::query_as::<_, GrantRow>(&sql)
            .bind(user_id.0)
            .fetch_all(&mut *self.tx)
            .await
            .map_err(backend)?;
        grants_from_rows(rows)
    }

    async fn list_grants_for_location(
        &mut self,
        location_id: &LocationId,
    ) -> Result<Vec<AccessGrant>, StoreError> {
        let sql = format!("{} WHERE g.location_id = ? ORDER BY g.id", GRANT_SELECT);
        let rows = sqlx::query_as::<_, GrantRow>(&sql)
            .bind(location_id.0)
            .fetch_all(&mut *self.tx)
            .await
            .map_err(backend)?;
        grants_from_rows(rows)
    }
}
