//! libSQL backend — async `ProfileStore` implementation.
//!
//! Supports local file and in-memory databases. The two list fields are
//! stored as JSON text columns; timestamps are RFC 3339 strings.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::DatabaseError;
use crate::profile::{Profile, StoredProfile};
use crate::store::traits::ProfileStore;

/// libSQL database backend.
///
/// Holds a single connection reused for all operations.
/// `libsql::Connection` is `Send + Sync` and safe for concurrent async use.
pub struct LibSqlBackend {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlBackend {
    /// Open (or create) a local database file and initialize the schema.
    pub async fn new_local(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Pool(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DatabaseError::Pool(format!("Failed to open libSQL database: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;

        let backend = Self {
            db: Arc::new(db),
            conn,
        };
        backend.init_schema().await?;
        info!(path = %path.display(), "Database opened");
        Ok(backend)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, DatabaseError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                DatabaseError::Pool(format!("Failed to create in-memory database: {e}"))
            })?;

        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;

        let backend = Self {
            db: Arc::new(db),
            conn,
        };
        backend.init_schema().await?;
        Ok(backend)
    }

    async fn init_schema(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS profiles (
                    id TEXT PRIMARY KEY,
                    name TEXT NOT NULL,
                    email TEXT NOT NULL,
                    age INTEGER NOT NULL,
                    sex TEXT NOT NULL,
                    phone TEXT,
                    address TEXT,
                    weight REAL NOT NULL,
                    weight_unit TEXT NOT NULL,
                    activity_level TEXT NOT NULL,
                    fitness_goal TEXT NOT NULL,
                    allergies TEXT NOT NULL DEFAULT '[]',
                    health_conditions TEXT NOT NULL DEFAULT '[]',
                    spice_level INTEGER NOT NULL,
                    frequent_meal TEXT NOT NULL,
                    best_food TEXT NOT NULL,
                    worst_food TEXT NOT NULL,
                    created_at TEXT NOT NULL
                );
                CREATE INDEX IF NOT EXISTS idx_profiles_email ON profiles(email);
                CREATE INDEX IF NOT EXISTS idx_profiles_created_at ON profiles(created_at);",
            )
            .await
            .map_err(|e| DatabaseError::Migration(e.to_string()))?;

        debug!("Profile schema ready");
        Ok(())
    }
}

// ── Helper functions ────────────────────────────────────────────────

/// Parse an RFC 3339 or SQLite datetime string into DateTime<Utc>.
fn parse_datetime(s: &str) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return ndt.and_utc();
    }
    DateTime::<Utc>::MIN_UTC
}

/// Parse a JSON string-array column into a Vec<String>.
fn parse_string_list(s: &str) -> Result<Vec<String>, DatabaseError> {
    serde_json::from_str(s)
        .map_err(|e| DatabaseError::Serialization(format!("Bad list column: {e}")))
}

/// Parse an enum column via the domain type's FromStr.
fn parse_enum<T: std::str::FromStr<Err = String>>(s: &str) -> Result<T, DatabaseError> {
    s.parse().map_err(DatabaseError::Serialization)
}

/// Map a libsql row to a StoredProfile.
///
/// Column order matches PROFILE_COLUMNS.
fn row_to_profile(row: &libsql::Row) -> Result<StoredProfile, DatabaseError> {
    let q = |e: libsql::Error| DatabaseError::Query(e.to_string());

    let id_str: String = row.get(0).map_err(q)?;
    let name: String = row.get(1).map_err(q)?;
    let email: String = row.get(2).map_err(q)?;
    let age: i64 = row.get(3).map_err(q)?;
    let sex_str: String = row.get(4).map_err(q)?;
    let phone: Option<String> = row.get(5).ok();
    let address: Option<String> = row.get(6).ok();
    let weight: f64 = row.get(7).map_err(q)?;
    let unit_str: String = row.get(8).map_err(q)?;
    let activity_str: String = row.get(9).map_err(q)?;
    let goal_str: String = row.get(10).map_err(q)?;
    let allergies_str: String = row.get(11).map_err(q)?;
    let conditions_str: String = row.get(12).map_err(q)?;
    let spice_level: i64 = row.get(13).map_err(q)?;
    let frequent_meal: String = row.get(14).map_err(q)?;
    let best_food: String = row.get(15).map_err(q)?;
    let worst_food: String = row.get(16).map_err(q)?;
    let created_str: String = row.get(17).map_err(q)?;

    let id = Uuid::parse_str(&id_str)
        .map_err(|e| DatabaseError::Serialization(format!("Bad id column: {e}")))?;

    Ok(StoredProfile {
        id,
        profile: Profile {
            name,
            email,
            age: age as u32,
            sex: parse_enum(&sex_str)?,
            phone,
            address,
            weight,
            weight_unit: parse_enum(&unit_str)?,
            activity_level: parse_enum(&activity_str)?,
            fitness_goal: parse_enum(&goal_str)?,
            allergies: parse_string_list(&allergies_str)?,
            health_conditions: parse_string_list(&conditions_str)?,
            spice_level: spice_level as u8,
            frequent_meal,
            best_food,
            worst_food,
        },
        created_at: parse_datetime(&created_str),
    })
}

const PROFILE_COLUMNS: &str = "id, name, email, age, sex, phone, address, weight, weight_unit, \
     activity_level, fitness_goal, allergies, health_conditions, spice_level, \
     frequent_meal, best_food, worst_food, created_at";

#[async_trait]
impl ProfileStore for LibSqlBackend {
    async fn insert_profile(&self, profile: &Profile) -> Result<StoredProfile, DatabaseError> {
        let id = Uuid::new_v4();
        let created_at = Utc::now();

        let allergies = serde_json::to_string(&profile.allergies)
            .map_err(|e| DatabaseError::Serialization(e.to_string()))?;
        let conditions = serde_json::to_string(&profile.health_conditions)
            .map_err(|e| DatabaseError::Serialization(e.to_string()))?;

        self.conn
            .execute(
                &format!(
                    "INSERT INTO profiles ({PROFILE_COLUMNS}) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)"
                ),
                params![
                    id.to_string(),
                    profile.name.clone(),
                    profile.email.clone(),
                    profile.age as i64,
                    profile.sex.as_str(),
                    profile.phone.clone(),
                    profile.address.clone(),
                    profile.weight,
                    profile.weight_unit.as_str(),
                    profile.activity_level.as_str(),
                    profile.fitness_goal.as_str(),
                    allergies,
                    conditions,
                    profile.spice_level as i64,
                    profile.frequent_meal.clone(),
                    profile.best_food.clone(),
                    profile.worst_food.clone(),
                    created_at.to_rfc3339(),
                ],
            )
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?;

        debug!(id = %id, "Profile inserted");
        Ok(StoredProfile {
            id,
            profile: profile.clone(),
            created_at,
        })
    }

    async fn list_profiles(&self) -> Result<Vec<StoredProfile>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY created_at DESC"),
                (),
            )
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?;

        let mut profiles = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?
        {
            profiles.push(row_to_profile(&row)?);
        }
        Ok(profiles)
    }
}
