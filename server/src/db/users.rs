use std::sync::{Arc, Mutex, MutexGuard};

use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use crate::{
    error::StoreError,
    models::user::{User, UserSummary},
};

use super::{name_matches, same_email, UserStore};

const CREATE_USERS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS users (
        pk INTEGER PRIMARY KEY AUTOINCREMENT,
        id TEXT NOT NULL UNIQUE,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        password TEXT NOT NULL
    );";

#[derive(Clone, Debug)]
pub struct SqliteStore {
    db_conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path`. `:memory:` gives a private
    /// in-memory database.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(CREATE_USERS_TABLE)?;
        debug!("users table ready in {}", path);
        Ok(SqliteStore {
            db_conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.db_conn.lock().map_err(|_| StoreError::Poisoned)
    }
}

fn parse_id(raw: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(raw).map_err(|_| StoreError::Corrupt(format!("invalid user id {:?}", raw)))
}

fn read_user(row: &Row) -> rusqlite::Result<(String, String, String, String)> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn select_user(conn: &Connection, id: &Uuid) -> Result<Option<User>, StoreError> {
    let row = conn
        .query_row(
            "SELECT id, name, email, password FROM users WHERE id = ?1",
            params![id.to_string()],
            read_user,
        )
        .optional()?;

    match row {
        None => Ok(None),
        Some((id, name, email, password)) => Ok(Some(User {
            id: parse_id(&id)?,
            name,
            email,
            password,
        })),
    }
}

impl UserStore for SqliteStore {
    fn list(&self, name_filter: Option<&str>) -> Result<Vec<UserSummary>, StoreError> {
        let conn = self.conn()?;
        let mut prepared = conn.prepare("SELECT id, name FROM users ORDER BY pk")?;
        let rows = prepared
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .filter(|(_, name)| name_matches(name, name_filter))
            .map(|(id, name)| {
                Ok(UserSummary {
                    id: parse_id(&id)?,
                    name,
                })
            })
            .collect()
    }

    fn find(&self, id: &Uuid) -> Result<Option<User>, StoreError> {
        let conn = self.conn()?;
        select_user(&conn, id)
    }

    fn insert(&self, user: &User) -> Result<(), StoreError> {
        self.conn()?.execute(
            "INSERT INTO users (id, name, email, password) VALUES (?1, ?2, ?3, ?4)",
            params![user.id.to_string(), user.name, user.email, user.password],
        )?;
        Ok(())
    }

    fn update(&self, id: &Uuid, name: &str, email: &str) -> Result<Option<User>, StoreError> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE users SET name = ?1, email = ?2 WHERE id = ?3",
            params![name, email, id.to_string()],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        select_user(&conn, id)
    }

    fn delete(&self, id: &Uuid) -> Result<Option<User>, StoreError> {
        let conn = self.conn()?;
        let user = match select_user(&conn, id)? {
            Some(u) => u,
            None => return Ok(None),
        };
        conn.execute("DELETE FROM users WHERE id = ?1", params![id.to_string()])?;
        Ok(Some(user))
    }

    fn email_taken(&self, email: &str) -> Result<bool, StoreError> {
        let conn = self.conn()?;
        let mut prepared = conn.prepare("SELECT email FROM users")?;
        let emails = prepared
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(emails.iter().any(|stored| same_email(stored, email)))
    }

    fn ping(&self) -> Result<(), StoreError> {
        self.conn()?.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
    }
}
