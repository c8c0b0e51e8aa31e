// SPDX-License-Identifier: Apache-2.0

use crate::guard::{first_infraction_referencing, InfractionFk};
use crate::{now_stamp, row_exists, DeleteOutcome, Store, StoreError};
use contrav_model::{normalize_cin, normalize_str, NewViolant, Violant, ViolantPatch};
use rusqlite::{params, types::Value as SqlValue, OptionalExtension, Row};

const SELECT: &str = "SELECT id, nom, prenom, cin, created_at, updated_at FROM violant";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Violant> {
    Ok(Violant {
        id: row.get(0)?,
        nom: row.get(1)?,
        prenom: row.get(2)?,
        cin: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

impl Store {
    pub async fn list_violants(&self) -> Result<Vec<Violant>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!("{SELECT} ORDER BY id"))?;
        let rows = stmt.query_map([], from_row)?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    pub async fn get_violant(&self, id: i64) -> Result<Option<Violant>, StoreError> {
        let conn = self.conn.lock().await;
        Ok(conn
            .query_row(&format!("{SELECT} WHERE id = ?1"), [id], from_row)
            .optional()?)
    }

    pub async fn create_violant(&self, new: NewViolant) -> Result<Violant, StoreError> {
        let conn = self.conn.lock().await;
        let now = now_stamp();
        conn.execute(
            "INSERT INTO violant (nom, prenom, cin, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)",
            params![
                normalize_str(&new.nom),
                normalize_str(&new.prenom),
                normalize_cin(&new.cin),
                now,
            ],
        )?;
        let id = conn.last_insert_rowid();
        Ok(conn.query_row(&format!("{SELECT} WHERE id = ?1"), [id], from_row)?)
    }

    pub async fn update_violant(
        &self,
        id: i64,
        patch: ViolantPatch,
    ) -> Result<Option<Violant>, StoreError> {
        let conn = self.conn.lock().await;
        if !row_exists(&conn, "violant", id)? {
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
        if let Some(cin) = &patch.cin {
            sets.push("cin");
            args.push(SqlValue::Text(normalize_cin(cin)));
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
                "UPDATE violant SET {}, updated_at = ?{} WHERE id = ?{}",
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

    pub async fn delete_violant(&self, id: i64) -> Result<DeleteOutcome, StoreError> {
        let conn = self.conn.lock().await;
        if !row_exists(&conn, "violant", id)? {
            return Ok(DeleteOutcome::NotFound);
        }
        if let Some(infraction_id) =
            first_infraction_referencing(&conn, InfractionFk::Violant, id)?
        {
            return Ok(DeleteOutcome::Referenced(infraction_id));
        }
        conn.execute("DELETE FROM violant WHERE id = ?1", [id])?;
        Ok(DeleteOutcome::Deleted)
    }

    pub async fn violant_cin_taken(
        &self,
        cin: &str,
        exclude: Option<i64>,
    ) -> Result<bool, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT 1 FROM violant WHERE cin = ?1 AND (?2 IS NULL OR id <> ?2) LIMIT 1",
        )?;
        Ok(stmt.exists(params![normalize_cin(cin), exclude])?)
    }

    pub async fn violant_exists(&self, id: i64) -> Result<bool, StoreError> {
        let conn = self.conn.lock().await;
        Ok(row_exists(&conn, "violant", id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn cin_is_uppercased_on_write() {
        let store = Store::open_in_memory().expect("open");
        let violant = store
            .create_violant(NewViolant {
                nom: "Alaoui".to_string(),
                prenom: "Sara".to_string(),
                // The validator only admits uppercase; the store normalizes
                // regardless so the invariant does not depend on the caller.
                cin: " k4532199 ".to_string(),
            })
            .await
            .expect("create");
        assert_eq!(violant.cin, "K4532199");

        assert!(store
            .violant_cin_taken("k4532199", None)
            .await
            .expect("probe"));
    }

    #[tokio::test]
    async fn update_can_change_cin_with_normalization() {
        let store = Store::open_in_memory().expect("open");
        let violant = store
            .create_violant(NewViolant {
                nom: "Alaoui".to_string(),
                prenom: "Sara".to_string(),
                cin: "K4532199".to_string(),
            })
            .await
            .expect("create");
        let updated = store
            .update_violant(
                violant.id,
                ViolantPatch {
                    cin: Some(" j9000001 ".to_string()),
                    ..ViolantPatch::default()
                },
            )
            .await
            .expect("update")
            .expect("present");
        assert_eq!(updated.cin, "J9000001");
        assert_ne!(updated.updated_at, violant.updated_at);
    }
}
