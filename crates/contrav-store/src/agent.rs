// SPDX-License-Identifier: Apache-2.0

use crate::guard::{first_infraction_referencing, InfractionFk};
use crate::{now_stamp, row_exists, DeleteOutcome, Store, StoreError};
use contrav_model::{normalize_cin, normalize_str, Agent, AgentPatch, NewAgent};
use rusqlite::{params, types::Value as SqlValue, OptionalExtension, Row};

const SELECT: &str = "SELECT id, nom, prenom, tel, cin, created_at, updated_at FROM agent";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Agent> {
    Ok(Agent {
        id: row.get(0)?,
        nom: row.get(1)?,
        prenom: row.get(2)?,
        tel: row.get(3)?,
        cin: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

impl Store {
    pub async fn list_agents(&self) -> Result<Vec<Agent>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!("{SELECT} ORDER BY id"))?;
        let rows = stmt.query_map([], from_row)?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    pub async fn get_agent(&self, id: i64) -> Result<Option<Agent>, StoreError> {
        let conn = self.conn.lock().await;
        Ok(conn
            .query_row(&format!("{SELECT} WHERE id = ?1"), [id], from_row)
            .optional()?)
    }

    pub async fn create_agent(&self, new: NewAgent) -> Result<Agent, StoreError> {
        let conn = self.conn.lock().await;
        let now = now_stamp();
        conn.execute(
            "INSERT INTO agent (nom, prenom, tel, cin, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![
                normalize_str(&new.nom),
                normalize_str(&new.prenom),
                normalize_str(&new.tel),
                normalize_cin(&new.cin),
                now,
            ],
        )?;
        let id = conn.last_insert_rowid();
        Ok(conn.query_row(&format!("{SELECT} WHERE id = ?1"), [id], from_row)?)
    }

    pub async fn update_agent(
        &self,
        id: i64,
        patch: AgentPatch,
    ) -> Result<Option<Agent>, StoreError> {
        let conn = self.conn.lock().await;
        if !row_exists(&conn, "agent", id)? {
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
                "UPDATE agent SET {}, updated_at = ?{} WHERE id = ?{}",
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

    pub async fn delete_agent(&self, id: i64) -> Result<DeleteOutcome, StoreError> {
        let conn = self.conn.lock().await;
        if !row_exists(&conn, "agent", id)? {
            return Ok(DeleteOutcome::NotFound);
        }
        if let Some(infraction_id) = first_infraction_referencing(&conn, InfractionFk::Agent, id)? {
            return Ok(DeleteOutcome::Referenced(infraction_id));
        }
        conn.execute("DELETE FROM agent WHERE id = ?1", [id])?;
        Ok(DeleteOutcome::Deleted)
    }

    /// Uniqueness probe over the normalized value; `exclude` skips the row
    /// being updated.
    pub async fn agent_tel_taken(
        &self,
        tel: &str,
        exclude: Option<i64>,
    ) -> Result<bool, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT 1 FROM agent WHERE tel = ?1 AND (?2 IS NULL OR id <> ?2) LIMIT 1",
        )?;
        Ok(stmt.exists(params![normalize_str(tel), exclude])?)
    }

    pub async fn agent_cin_taken(
        &self,
        cin: &str,
        exclude: Option<i64>,
    ) -> Result<bool, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT 1 FROM agent WHERE cin = ?1 AND (?2 IS NULL OR id <> ?2) LIMIT 1",
        )?;
        Ok(stmt.exists(params![normalize_cin(cin), exclude])?)
    }

    pub async fn agent_exists(&self, id: i64) -> Result<bool, StoreError> {
        let conn = self.conn.lock().await;
        Ok(row_exists(&conn, "agent", id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_agent(tel: &str, cin: &str) -> NewAgent {
        NewAgent {
            nom: "Smith".to_string(),
            prenom: "John".to_string(),
            tel: tel.to_string(),
            cin: cin.to_string(),
        }
    }

    #[tokio::test]
    async fn create_normalizes_and_assigns_id() {
        let store = Store::open_in_memory().expect("open");
        let agent = store
            .create_agent(NewAgent {
                nom: "  Smith  ".to_string(),
                prenom: "John".to_string(),
                tel: "1234567890".to_string(),
                cin: "AB123456".to_string(),
            })
            .await
            .expect("create");
        assert_eq!(agent.id, 1);
        assert_eq!(agent.nom, "Smith");
        assert_eq!(agent.cin, "AB123456");
        assert!(!agent.created_at.is_empty());
        assert_eq!(agent.created_at, agent.updated_at);
    }

    #[tokio::test]
    async fn get_and_list_round_trip() {
        let store = Store::open_in_memory().expect("open");
        let created = store
            .create_agent(new_agent("1234567890", "AB123456"))
            .await
            .expect("create");
        let fetched = store
            .get_agent(created.id)
            .await
            .expect("get")
            .expect("present");
        assert_eq!(fetched, created);
        assert!(store.get_agent(999).await.expect("get").is_none());
        assert_eq!(store.list_agents().await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn update_touches_only_present_fields() {
        let store = Store::open_in_memory().expect("open");
        let created = store
            .create_agent(new_agent("1234567890", "AB123456"))
            .await
            .expect("create");
        let updated = store
            .update_agent(
                created.id,
                AgentPatch {
                    nom: Some("Durand".to_string()),
                    ..AgentPatch::default()
                },
            )
            .await
            .expect("update")
            .expect("present");
        assert_eq!(updated.nom, "Durand");
        assert_eq!(updated.tel, "1234567890");
        assert_eq!(updated.created_at, created.created_at);

        let missing = store
            .update_agent(999, AgentPatch::default())
            .await
            .expect("update");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn uniqueness_probe_excludes_own_row() {
        let store = Store::open_in_memory().expect("open");
        let a = store
            .create_agent(new_agent("1111111111", "AA111111"))
            .await
            .expect("create a");
        store
            .create_agent(new_agent("2222222222", "BB222222"))
            .await
            .expect("create b");

        assert!(store
            .agent_tel_taken("1111111111", None)
            .await
            .expect("probe"));
        assert!(!store
            .agent_tel_taken("1111111111", Some(a.id))
            .await
            .expect("probe"));
        assert!(store
            .agent_cin_taken(" aa111111 ", None)
            .await
            .expect("probe normalizes before comparing"));
    }

    #[tokio::test]
    async fn delete_outcomes() {
        let store = Store::open_in_memory().expect("open");
        let agent = store
            .create_agent(new_agent("1234567890", "AB123456"))
            .await
            .expect("create");
        assert_eq!(
            store.delete_agent(999).await.expect("delete"),
            DeleteOutcome::NotFound
        );
        assert_eq!(
            store.delete_agent(agent.id).await.expect("delete"),
            DeleteOutcome::Deleted
        );
        assert!(store.get_agent(agent.id).await.expect("get").is_none());
    }
}
