// SPDX-License-Identifier: Apache-2.0

use crate::guard::{first_infraction_referencing, InfractionFk};
use crate::{now_stamp, row_exists, DeleteOutcome, Store, StoreError};
use contrav_model::{normalize_str, Commune, CommunePatch, NewCommune};
use rusqlite::{params, types::Value as SqlValue, OptionalExtension, Row};

const SELECT: &str = "SELECT id, \"pachalik-circon\", caidat, nom, latitude, longitude, \
                      created_at, updated_at FROM commune";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Commune> {
    Ok(Commune {
        id: row.get(0)?,
        pachalik_circon: row.get(1)?,
        caidat: row.get(2)?,
        nom: row.get(3)?,
        latitude: row.get(4)?,
        longitude: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

impl Store {
    pub async fn list_communes(&self) -> Result<Vec<Commune>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!("{SELECT} ORDER BY id"))?;
        let rows = stmt.query_map([], from_row)?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    pub async fn get_commune(&self, id: i64) -> Result<Option<Commune>, StoreError> {
        let conn = self.conn.lock().await;
        Ok(conn
            .query_row(&format!("{SELECT} WHERE id = ?1"), [id], from_row)
            .optional()?)
    }

    pub async fn create_commune(&self, new: NewCommune) -> Result<Commune, StoreError> {
        let conn = self.conn.lock().await;
        let now = now_stamp();
        conn.execute(
            "INSERT INTO commune (\"pachalik-circon\", caidat, nom, latitude, longitude, \
             created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
            params![
                normalize_str(&new.pachalik_circon),
                normalize_str(&new.caidat),
                normalize_str(&new.nom),
                new.latitude,
                new.longitude,
                now,
            ],
        )?;
        let id = conn.last_insert_rowid();
        Ok(conn.query_row(&format!("{SELECT} WHERE id = ?1"), [id], from_row)?)
    }

    pub async fn update_commune(
        &self,
        id: i64,
        patch: CommunePatch,
    ) -> Result<Option<Commune>, StoreError> {
        let conn = self.conn.lock().await;
        if !row_exists(&conn, "commune", id)? {
            return Ok(None);
        }
        let mut sets: Vec<&'static str> = Vec::new();
        let mut args: Vec<SqlValue> = Vec::new();
        if let Some(v) = &patch.pachalik_circon {
            sets.push("\"pachalik-circon\"");
            args.push(SqlValue::Text(normalize_str(v)));
        }
        if let Some(v) = &patch.caidat {
            sets.push("caidat");
            args.push(SqlValue::Text(normalize_str(v)));
        }
        if let Some(v) = &patch.nom {
            sets.push("nom");
            args.push(SqlValue::Text(normalize_str(v)));
        }
        if let Some(v) = patch.latitude {
            sets.push("latitude");
            args.push(SqlValue::Real(v));
        }
        if let Some(v) = patch.longitude {
            sets.push("longitude");
            args.push(SqlValue::Real(v));
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
                "UPDATE commune SET {}, updated_at = ?{} WHERE id = ?{}",
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

    pub async fn delete_commune(&self, id: i64) -> Result<DeleteOutcome, StoreError> {
        let conn = self.conn.lock().await;
        if !row_exists(&conn, "commune", id)? {
            return Ok(DeleteOutcome::NotFound);
        }
        if let Some(infraction_id) =
            first_infraction_referencing(&conn, InfractionFk::Commune, id)?
        {
            return Ok(DeleteOutcome::Referenced(infraction_id));
        }
        conn.execute("DELETE FROM commune WHERE id = ?1", [id])?;
        Ok(DeleteOutcome::Deleted)
    }

    pub async fn commune_exists(&self, id: i64) -> Result<bool, StoreError> {
        let conn = self.conn.lock().await;
        Ok(row_exists(&conn, "commune", id)?)
    }
}
