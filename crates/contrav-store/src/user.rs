// SPDX-License-Identifier: Apache-2.0

use crate::{now_stamp, row_exists, DeleteOutcome, Store, StoreError};
use contrav_model::{normalize_str, NewUser, User, UserPatch};
use rusqlite::{params, types::Value as SqlValue, OptionalExtension, Row};

const SELECT: &str = "SELECT id, nom, prenom, tel, role, login, created_at, updated_at FROM users";

fn from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        nom: row.get(1)?,
        prenom: row.get(2)?,
        tel: row.get(3)?,
        role: row.get(4)?,
        login: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

impl Store {
    pub async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!("{SELECT} ORDER BY id"))?;
        let rows = stmt.query_map([], from_row)?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    pub async fn get_user(&self, id: i64) -> Result<Option<User>, StoreError> {
        let conn = self.conn.lock().await;
        Ok(conn
            .query_row(&format!("{SELECT} WHERE id = ?1"), [id], from_row)
            .optional()?)
    }

    pub async fn create_user(&self, new: NewUser) -> Result<User, StoreError> {
        let conn = self.conn.lock().await;
        let now = now_stamp();
        conn.execute(
            "INSERT INTO users (nom, prenom, tel, role, login, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
            params![
                normalize_str(&new.nom),
                normalize_str(&new.prenom),
                normalize_str(&new.tel),
                normalize_str(&new.role),
                normalize_str(&new.login),
                now,
            ],
        )?;
        let id = conn.last_insert_rowid();
        Ok(conn.query_row(&format!("{SELECT} WHERE id = ?1"), [id], from_row)?)
    }

    pub async fn update_user(&self, id: i64, patch: UserPatch) -> Result<Option<User>, StoreError> {
        let conn = self.conn.lock().await;
        if !row_exists(&conn, "users", id)? {
            return Ok(None);
        }
        let mut sets: Vec<&'static str> = Vec::new();
        let mut args: Vec<SqlValue> = Vec::new();
        if let Some(nom) = &patch.nom {
            sets.push("nom");
            args.push(SqlValue::Text(normalize_str(nom)));
        }
        if let Some(prenom) = &patch.prenom {
            sets.push("prenom");
            args.push(SqlValue::Text(normalize_str(prenom)));
        }
        if let Some(tel) = &patch.tel {
            sets.push("tel");
            args.push(SqlValue::Text(normalize_str(tel)));
        }
        if let Some(role) = &patch.role {
            sets.push("role");
            args.push(SqlValue::Text(normalize_str(role)));
        }
        if let Some(login) = &patch.login {
            sets.push("login");
            args.push(SqlValue::Text(normalize_str(login)));
        }
        if !sets.is_empty() {
            args.push(SqlValue::Text(now_stamp()));
            args.push(SqlValue::Integer(id));
            let assignments: Vec<String> = sets
                .iter()
                .enumerate()
                .map(|(i, col)| format!("{col} = ?{}", i + 1))
                .collect();
            let sql = format!(
                "UPDATE users SET {}, updated_at = ?{} WHERE id = ?{}",
                assignments.join(", "),
                sets.len() + 1,
                sets.len() + 2,
            );
            conn.execute(&sql, rusqlite::params_from_iter(args))?;
        }
        Ok(conn
            .query_row(&format!("{SELECT} WHERE id = ?1"), [id], from_row)
            .optional()?)
    }

    /// Users sit outside the infraction graph; no guard applies.
    pub async fn delete_user(&self, id: i64) -> Result<DeleteOutcome, StoreError> {
        let conn = self.conn.lock().await;
        if !row_exists(&conn, "users", id)? {
            return Ok(DeleteOutcome::NotFound);
        }
        conn.execute("DELETE FROM users WHERE id = ?1", [id])?;
        Ok(DeleteOutcome::Deleted)
    }

    pub async fn user_login_taken(
        &self,
        login: &str,
        exclude: Option<i64>,
    ) -> Result<bool, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT 1 FROM users WHERE login = ?1 AND (?2 IS NULL OR id <> ?2) LIMIT 1",
        )?;
        Ok(stmt.exists(params![normalize_str(login), exclude])?)
    }
}
