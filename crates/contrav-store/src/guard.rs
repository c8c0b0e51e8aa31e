// SPDX-License-Identifier: Apache-2.0

//! Referential guard probes. Each returns the lowest-id dependent row so the
//! conflict response can name it.

use rusqlite::{Connection, OptionalExtension};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InfractionFk {
    Commune,
    Violant,
    Agent,
    Categorie,
}

impl InfractionFk {
    const fn column(self) -> &'static str {
        match self {
            Self::Commune => "commune_id",
            Self::Violant => "violant_id",
            Self::Agent => "agent_id",
            Self::Categorie => "categorie_id",
        }
    }
}

pub(crate) fn first_infraction_referencing(
    conn: &Connection,
    fk: InfractionFk,
    id: i64,
) -> Result<Option<i64>, rusqlite::Error> {
    conn.query_row(
        &format!(
            "SELECT id FROM infraction WHERE {} = ?1 ORDER BY id LIMIT 1",
            fk.column()
        ),
        [id],
        |row| row.get(0),
    )
    .optional()
}

pub(crate) fn first_decision_referencing(
    conn: &Connection,
    infraction_id: i64,
) -> Result<Option<i64>, rusqlite::Error> {
    conn.query_row(
        "SELECT id FROM decision WHERE infraction_id = ?1 ORDER BY id LIMIT 1",
        [infraction_id],
        |row| row.get(0),
    )
    .optional()
}
