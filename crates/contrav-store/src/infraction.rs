// SPDX-License-Identifier: Apache-2.0

use crate::guard::first_decision_referencing;
use crate::{now_stamp, row_exists, DeleteOutcome, Store, StoreError};
use contrav_model::{normalize_str, Infraction, InfractionPatch, NewInfraction};
use rusqlite::{params, types::Value as SqlValue, OptionalExtension, Row};

const SELECT: &str = "SELECT id, nom, date, adresse, commune_id, violant_id, agent_id, \
                      categorie_id, latitude, longitude, created_at, updated_at FROM infraction";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Infraction> {
    Ok(Infraction {
        id: row.get(0)?,
        nom: row.get(1)?,
        date: row.get(2)?,
        adresse: row.get(3)?,
        commune_id: row.get(4)?,
        violant_id: row.get(5)?,
        agent_id: row.get(6)?,
        categorie_id: row.get(7)?,
        latitude: row.get(8)?,
        longitude: row.get(9)?,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}

impl Store {
    pub async fn list_infractions(&self) -> Result<Vec<Infraction>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!("{SELECT} ORDER BY id"))?;
        let rows = stmt.query_map([], from_row)?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    pub async fn get_infraction(&self, id: i64) -> Result<Option<Infraction>, StoreError> {
        let conn = self.conn.lock().await;
        Ok(conn
            .query_row(&format!("{SELECT} WHERE id = ?1"), [id], from_row)
            .optional()?)
    }

    /// Caller has already validated the foreign keys; the schema constraints
    /// are the last line of defense.
    pub async fn create_infraction(&self, new: NewInfraction) -> Result<Infraction, StoreError> {
        let conn = self.conn.lock().await;
        let now = now_stamp();
        conn.execute(
            "INSERT INTO infraction (nom, date, adresse, commune_id, violant_id, agent_id, \
             categorie_id, latitude, longitude, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
            params![
                normalize_str(&new.nom),
                new.date,
                normalize_str(&new.adresse),
                new.commune_id,
                new.violant_id,
                new.agent_id,
                new.categorie_id,
                new.latitude,
                new.longitude,
                now,
            ],
        )?;
        let id = conn.last_insert_rowid();
        Ok(conn.query_row(&format!("{SELECT} WHERE id = ?1"), [id], from_row)?)
    }

    pub async fn update_infraction(
        &self,
        id: i64,
        patch: InfractionPatch,
    ) -> Result<Option<Infraction>, StoreError> {
        let conn = self.conn.lock().await;
        if !row_exists(&conn, "infraction", id)? {
            return Ok(None);
        }
        let mut sets: Vec<&'static str> = Vec::new();
        let mut args: Vec<SqlValue> = Vec::new();
        if let Some(nom) = &patch.nom {
            sets.push("nom");
            args.push(SqlValue::Text(normalize_str(nom)));
        }
        if let Some(date) = &patch.date {
            sets.push("date");
            args.push(SqlValue::Text(date.clone()));
        }
        if let Some(adresse) = &patch.adresse {
            sets.push("adresse");
            args.push(SqlValue::Text(normalize_str(adresse)));
        }
        if let Some(v) = patch.commune_id {
            sets.push("commune_id");
            args.push(SqlValue::Integer(v));
        }
        if let Some(v) = patch.violant_id {
            sets.push("violant_id");
            args.push(SqlValue::Integer(v));
        }
        if let Some(v) = patch.agent_id {
            sets.push("agent_id");
            args.push(SqlValue::Integer(v));
        }
        if let Some(v) = patch.categorie_id {
            sets.push("categorie_id");
            args.push(SqlValue::Integer(v));
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
                "UPDATE infraction SET {}, updated_at = ?{} WHERE id = ?{}",
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

    pub async fn delete_infraction(&self, id: i64) -> Result<DeleteOutcome, StoreError> {
        let conn = self.conn.lock().await;
        if !row_exists(&conn, "infraction", id)? {
            return Ok(DeleteOutcome::NotFound);
        }
        if let Some(decision_id) = first_decision_referencing(&conn, id)? {
            return Ok(DeleteOutcome::Referenced(decision_id));
        }
        conn.execute("DELETE FROM infraction WHERE id = ?1", [id])?;
        Ok(DeleteOutcome::Deleted)
    }

    pub async fn infraction_exists(&self, id: i64) -> Result<bool, StoreError> {
        let conn = self.conn.lock().await;
        Ok(row_exists(&conn, "infraction", id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contrav_model::{NewAgent, NewCategorie, NewCommune, NewDecision, NewViolant};

    pub(crate) async fn seed_graph(store: &Store) -> NewInfraction {
        let commune = store
            .create_commune(NewCommune {
                pachalik_circon: "Pachalik de Rabat".to_string(),
                caidat: "Caidat Agdal".to_string(),
                nom: "Agdal".to_string(),
                latitude: 33.9716,
                longitude: -6.8498,
            })
            .await
            .expect("commune");
        let violant = store
            .create_violant(NewViolant {
                nom: "Alaoui".to_string(),
                prenom: "Sara".to_string(),
                cin: "K4532199".to_string(),
            })
            .await
            .expect("violant");
        let agent = store
            .create_agent(NewAgent {
                nom: "Smith".to_string(),
                prenom: "John".to_string(),
                tel: "1234567890".to_string(),
                cin: "AB123456".to_string(),
            })
            .await
            .expect("agent");
        let categorie = store
            .create_categorie(NewCategorie {
                nom: "Traffic".to_string(),
                degre: 2,
            })
            .await
            .expect("categorie");
        NewInfraction {
            nom: "Speeding".to_string(),
            date: "2023-12-01".to_string(),
            adresse: "123 Main Street".to_string(),
            commune_id: commune.id,
            violant_id: violant.id,
            agent_id: agent.id,
            categorie_id: categorie.id,
            latitude: 45.5017,
            longitude: -73.5673,
        }
    }

    #[tokio::test]
    async fn create_and_fetch_infraction() {
        let store = Store::open_in_memory().expect("open");
        let new = seed_graph(&store).await;
        let infraction = store.create_infraction(new).await.expect("create");
        assert_eq!(infraction.nom, "Speeding");
        assert_eq!(infraction.date, "2023-12-01");

        let fetched = store
            .get_infraction(infraction.id)
            .await
            .expect("get")
            .expect("present");
        assert_eq!(fetched, infraction);
    }

    #[tokio::test]
    async fn referenced_parent_deletes_are_blocked_until_infraction_goes() {
        let store = Store::open_in_memory().expect("open");
        let new = seed_graph(&store).await;
        let commune_id = new.commune_id;
        let violant_id = new.violant_id;
        let agent_id = new.agent_id;
        let categorie_id = new.categorie_id;
        let infraction = store.create_infraction(new).await.expect("create");

        assert_eq!(
            store.delete_commune(commune_id).await.expect("delete"),
            DeleteOutcome::Referenced(infraction.id)
        );
        assert_eq!(
            store.delete_violant(violant_id).await.expect("delete"),
            DeleteOutcome::Referenced(infraction.id)
        );
        assert_eq!(
            store.delete_agent(agent_id).await.expect("delete"),
            DeleteOutcome::Referenced(infraction.id)
        );
        assert_eq!(
            store.delete_categorie(categorie_id).await.expect("delete"),
            DeleteOutcome::Referenced(infraction.id)
        );

        assert_eq!(
            store
                .delete_infraction(infraction.id)
                .await
                .expect("delete"),
            DeleteOutcome::Deleted
        );
        assert_eq!(
            store.delete_commune(commune_id).await.expect("delete"),
            DeleteOutcome::Deleted
        );
    }

    #[tokio::test]
    async fn infraction_delete_blocked_by_decision() {
        let store = Store::open_in_memory().expect("open");
        let new = seed_graph(&store).await;
        let infraction = store.create_infraction(new).await.expect("create");
        let decision = store
            .create_decision(NewDecision {
                date: "2023-12-10".to_string(),
                decisionprise: "Amende de 500 DH".to_string(),
                infraction_id: infraction.id,
            })
            .await
            .expect("decision");

        assert_eq!(
            store
                .delete_infraction(infraction.id)
                .await
                .expect("delete"),
            DeleteOutcome::Referenced(decision.id)
        );

        assert_eq!(
            store.delete_decision(decision.id).await.expect("delete"),
            DeleteOutcome::Deleted
        );
        assert_eq!(
            store
                .delete_infraction(infraction.id)
                .await
                .expect("delete"),
            DeleteOutcome::Deleted
        );
    }
}
