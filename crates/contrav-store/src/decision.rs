// SPDX-License-Identifier: Apache-2.0

use crate::{now_stamp, row_exists, DeleteOutcome, Store, StoreError};
use contrav_model::{normalize_str, Decision, DecisionPatch, NewDecision};
use rusqlite::{params, types::Value as SqlValue, OptionalExtension, Row};

const SELECT: &str =
    "SELECT id, date, decisionprise, infraction_id, created_at, updated_at FROM decision";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Decision> {
    Ok(Decision {
        id: row.get(0)?,
        date: row.get(1)?,
        decisionprise: row.get(2)?,
        infraction_id: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

impl Store {
    pub async fn list_decisions(&self) -> Result<Vec<Decision>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!("{SELECT} ORDER BY id"))?;
        let rows = stmt.query_map([], from_row)?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    pub async fn get_decision(&self, id: i64) -> Result<Option<Decision>, StoreError> {
        let conn = self.conn.lock().await;
        Ok(conn
            .query_row(&format!("{SELECT} WHERE id = ?1"), [id], from_row)
            .optional()?)
    }

    pub async fn create_decision(&self, new: NewDecision) -> Result<Decision, StoreError> {
        let conn = self.conn.lock().await;
        let now = now_stamp();
        conn.execute(
            "INSERT INTO decision (date, decisionprise, infraction_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)",
            params![
                new.date,
                normalize_str(&new.decisionprise),
                new.infraction_id,
                now,
            ],
        )?;
        let id = conn.last_insert_rowid();
        Ok(conn.query_row(&format!("{SELECT} WHERE id = ?1"), [id], from_row)?)
    }

    pub async fn update_decision(
        &self,
        id: i64,
        patch: DecisionPatch,
    ) -> Result<Option<Decision>, StoreError> {
        let conn = self.conn.lock().await;
        if !row_exists(&conn, "decision", id)? {
            return Ok(None);
        }
        let mut sets: Vec<&'static str> = Vec::new();
        let mut args: Vec<SqlValue> = Vec::new();
        if let Some(date) = &patch.date {
            sets.push("date");
            args.push(SqlValue::Text(date.clone()));
        }
        if let Some(text) = &patch.decisionprise {
            sets.push("decisionprise");
            args.push(SqlValue::Text(normalize_str(text)));
        }
        if let Some(v) = patch.infraction_id {
            sets.push("infraction_id");
            args.push(SqlValue::Integer(v));
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
                "UPDATE decision SET {}, updated_at = ?{} WHERE id = ?{}",
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

    /// Leaf entity: no dependents, deletes unconditionally once found.
    pub async fn delete_decision(&self, id: i64) -> Result<DeleteOutcome, StoreError> {
        let conn = self.conn.lock().await;
        if !row_exists(&conn, "decision", id)? {
            return Ok(DeleteOutcome::NotFound);
        }
        conn.execute("DELETE FROM decision WHERE id = ?1", [id])?;
        Ok(DeleteOutcome::Deleted)
    }
}
