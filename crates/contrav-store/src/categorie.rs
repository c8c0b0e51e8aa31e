// SPDX-License-Identifier: Apache-2.0

use crate::guard::{first_infraction_referencing, InfractionFk};
use crate::{now_stamp, row_exists, DeleteOutcome, Store, StoreError};
use contrav_model::{normalize_str, Categorie, CategoriePatch, NewCategorie};
use rusqlite::{params, types::Value as SqlValue, OptionalExtension, Row};

const SELECT: &str = "SELECT id, nom, degre, created_at, updated_at FROM categorie";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Categorie> {
    Ok(Categorie {
        id: row.get(0)?,
        nom: row.get(1)?,
        degre: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

impl Store {
    pub async fn list_categories(&self) -> Result<Vec<Categorie>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!("{SELECT} ORDER BY id"))?;
        let rows = stmt.query_map([], from_row)?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    pub async fn get_categorie(&self, id: i64) -> Result<Option<Categorie>, StoreError> {
        let conn = self.conn.lock().await;
        Ok(conn
            .query_row(&format!("{SELECT} WHERE id = ?1"), [id], from_row)
            .optional()?)
    }

    pub async fn create_categorie(&self, new: NewCategorie) -> Result<Categorie, StoreError> {
        let conn = self.conn.lock().await;
        let now = now_stamp();
        conn.execute(
            "INSERT INTO categorie (nom, degre, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
            params![normalize_str(&new.nom), new.degre, now],
        )?;
        let id = conn.last_insert_rowid();
        Ok(conn.query_row(&format!("{SELECT} WHERE id = ?1"), [id], from_row)?)
    }

    pub async fn update_categorie(
        &self,
        id: i64,
        patch: CategoriePatch,
    ) -> Result<Option<Categorie>, StoreError> {
        let conn = self.conn.lock().await;
        if !row_exists(&conn, "categorie", id)? {
            return Ok(None);
        }
        let mut sets: Vec<&'static str> = Vec::new();
        let mut args: Vec<SqlValue> = Vec::new();
        if let Some(nom) = &patch.nom {
            sets.push("nom");
            args.push(SqlValue::Text(normalize_str(nom)));
        }
        if let Some(degre) = patch.degre {
            sets.push("degre");
            args.push(SqlValue::Integer(degre));
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
                "UPDATE categorie SET {}, updated_at = ?{} WHERE id = ?{}",
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

    pub async fn delete_categorie(&self, id: i64) -> Result<DeleteOutcome, StoreError> {
        let conn = self.conn.lock().await;
        if !row_exists(&conn, "categorie", id)? {
            return Ok(DeleteOutcome::NotFound);
        }
        if let Some(infraction_id) =
            first_infraction_referencing(&conn, InfractionFk::Categorie, id)?
        {
            return Ok(DeleteOutcome::Referenced(infraction_id));
        }
        conn.execute("DELETE FROM categorie WHERE id = ?1", [id])?;
        Ok(DeleteOutcome::Deleted)
    }

    pub async fn categorie_exists(&self, id: i64) -> Result<bool, StoreError> {
        let conn = self.conn.lock().await;
        Ok(row_exists(&conn, "categorie", id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn degre_round_trips_as_integer() {
        let store = Store::open_in_memory().expect("open");
        let cat = store
            .create_categorie(NewCategorie {
                nom: "Traffic".to_string(),
                degre: 3,
            })
            .await
            .expect("create");
        assert_eq!(cat.degre, 3);

        let updated = store
            .update_categorie(
                cat.id,
                CategoriePatch {
                    degre: Some(5),
                    ..CategoriePatch::default()
                },
            )
            .await
            .expect("update")
            .expect("present");
        assert_eq!(updated.degre, 5);
        assert_eq!(updated.nom, "Traffic");
    }
}
