// SPDX-License-Identifier: Apache-2.0

use rusqlite::Connection;

/// Idempotent schema bootstrap. Foreign keys are RESTRICT on delete: the
/// application guard is the policy of record and the schema backs it rather
/// than declaring a cascade the guard would never let fire.
pub(crate) fn bootstrap(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS agent (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          nom TEXT NOT NULL,
          prenom TEXT NOT NULL,
          tel TEXT NOT NULL UNIQUE,
          cin TEXT NOT NULL UNIQUE,
          created_at TEXT NOT NULL,
          updated_at TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS violant (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          nom TEXT NOT NULL,
          prenom TEXT NOT NULL,
          cin TEXT NOT NULL UNIQUE,
          created_at TEXT NOT NULL,
          updated_at TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS commune (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          \"pachalik-circon\" TEXT NOT NULL,
          caidat TEXT NOT NULL,
          nom TEXT NOT NULL,
          latitude REAL NOT NULL,
          longitude REAL NOT NULL,
          created_at TEXT NOT NULL,
          updated_at TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS categorie (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          nom TEXT NOT NULL,
          degre INTEGER NOT NULL,
          created_at TEXT NOT NULL,
          updated_at TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS infraction (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          nom TEXT NOT NULL,
          date TEXT NOT NULL,
          adresse TEXT NOT NULL,
          commune_id INTEGER NOT NULL REFERENCES commune(id) ON DELETE RESTRICT,
          violant_id INTEGER NOT NULL REFERENCES violant(id) ON DELETE RESTRICT,
          agent_id INTEGER NOT NULL REFERENCES agent(id) ON DELETE RESTRICT,
          categorie_id INTEGER NOT NULL REFERENCES categorie(id) ON DELETE RESTRICT,
          latitude REAL NOT NULL,
          longitude REAL NOT NULL,
          created_at TEXT NOT NULL,
          updated_at TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS decision (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          date TEXT NOT NULL,
          decisionprise TEXT NOT NULL,
          infraction_id INTEGER NOT NULL REFERENCES infraction(id) ON DELETE RESTRICT,
          created_at TEXT NOT NULL,
          updated_at TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS users (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          nom TEXT NOT NULL,
          prenom TEXT NOT NULL,
          tel TEXT NOT NULL,
          role TEXT NOT NULL,
          login TEXT NOT NULL UNIQUE,
          created_at TEXT NOT NULL,
          updated_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_infraction_commune_id ON infraction(commune_id);
        CREATE INDEX IF NOT EXISTS idx_infraction_violant_id ON infraction(violant_id);
        CREATE INDEX IF NOT EXISTS idx_infraction_agent_id ON infraction(agent_id);
        CREATE INDEX IF NOT EXISTS idx_infraction_categorie_id ON infraction(categorie_id);
        CREATE INDEX IF NOT EXISTS idx_decision_infraction_id ON decision(infraction_id);
        ",
    )
}
