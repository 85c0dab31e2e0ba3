//! SQLite-backed record store

use crate::{IngestReport, StoreError};
use caselink_domain::traits::{CaseRecords, LinkIngest, LinkQuery, UpsertOutcome};
use caselink_domain::{
    Case, CaseId, CasePair, Evidence, EvidenceId, EvidenceKind, Link, LinkId, LinkStrength,
    LinkType, Person, PersonId, PersonRole, RecordSet,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use tracing::debug;

/// SQLite-based implementation of `CaseRecords` and `LinkIngest`
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// SqliteStore instance, or load a [`crate::MemoryStore`] snapshot to share.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Write a whole record set in one transaction
    pub fn ingest(&mut self, records: RecordSet) -> Result<IngestReport, StoreError> {
        let tx = self.conn.transaction()?;
        let mut report = IngestReport::default();

        for case in &records.cases {
            tx.execute(
                "INSERT INTO cases (id, case_number, case_type, province) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(id) DO UPDATE SET
                 case_number = excluded.case_number, case_type = excluded.case_type, province = excluded.province",
                params![to_sql_id(case.id.value())?, case.case_number, case.case_type, case.province],
            )?;
            report.cases += 1;
        }

        for person in &records.persons {
            tx.execute(
                "INSERT INTO persons (id, name, role) VALUES (?1, ?2, ?3)
                 ON CONFLICT(id) DO UPDATE SET name = excluded.name, role = excluded.role",
                params![
                    to_sql_id(person.id.value())?,
                    person.name,
                    person.role.map(|r| r.as_str()),
                ],
            )?;
            report.persons += 1;
        }

        for involvement in &records.involvements {
            report.involvements += tx.execute(
                "INSERT OR IGNORE INTO case_persons (case_id, person_id) VALUES (?1, ?2)",
                params![
                    to_sql_id(involvement.case_id.value())?,
                    to_sql_id(involvement.person_id.value())?,
                ],
            )?;
        }

        for evidence in &records.evidence {
            tx.execute(
                "INSERT INTO evidence (id, case_id, kind, label, color) VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(id) DO UPDATE SET
                 case_id = excluded.case_id, kind = excluded.kind, label = excluded.label, color = excluded.color",
                params![
                    to_sql_id(evidence.id.value())?,
                    to_sql_id(evidence.case_id.value())?,
                    evidence.kind.as_str(),
                    evidence.label,
                    evidence.color,
                ],
            )?;
            report.evidence += 1;
        }

        for link in records.links {
            match upsert_link_in(&tx, link)? {
                UpsertOutcome::Inserted(_) => report.links_inserted += 1,
                UpsertOutcome::Updated(_) => report.links_updated += 1,
            }
        }

        tx.commit()?;
        debug!("SQLite ingest: {}", report.summary());
        Ok(report)
    }

    fn query_links(&self, sql: &str, args: &[&dyn rusqlite::ToSql]) -> Result<Vec<Link>, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let links = stmt
            .query_map(args, link_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(links)
    }
}

impl LinkIngest for SqliteStore {
    type Error = StoreError;

    fn upsert_link(&mut self, link: Link) -> Result<UpsertOutcome, Self::Error> {
        upsert_link_in(&self.conn, link)
    }
}

fn upsert_link_in(conn: &Connection, link: Link) -> Result<UpsertOutcome, StoreError> {
    let case1 = to_sql_id(link.pair.first().value())?;
    let case2 = to_sql_id(link.pair.second().value())?;
    let link_type = link.link_type.as_str();

    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM links WHERE case1 = ?1 AND case2 = ?2 AND link_type = ?3",
            params![case1, case2, link_type],
            |row| row.get(0),
        )
        .optional()?;

    if let Some(existing) = existing {
        conn.execute(
            "UPDATE links SET link_strength = MAX(link_strength, ?1) WHERE id = ?2",
            params![link.strength.value(), existing],
        )?;
        let id = LinkId::new(from_sql_id(existing)?);
        debug!(link_id = %id, "Merged duplicate link, keeping the stronger strength");
        return Ok(UpsertOutcome::Updated(id));
    }

    let id_taken: bool = conn
        .query_row(
            "SELECT 1 FROM links WHERE id = ?1",
            params![to_sql_id(link.id.value())?],
            |_| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if id_taken {
        return Err(StoreError::Conflict(format!(
            "Link id {} is already used by another case pair or type",
            link.id
        )));
    }

    conn.execute(
        "INSERT INTO links (id, case1, case2, link_type, link_strength) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![to_sql_id(link.id.value())?, case1, case2, link_type, link.strength.value()],
    )?;
    Ok(UpsertOutcome::Inserted(link.id))
}

impl CaseRecords for SqliteStore {
    type Error = StoreError;

    fn links(&self, query: &LinkQuery) -> Result<Vec<Link>, Self::Error> {
        let mut sql = String::from(
            "SELECT id, case1, case2, link_type, link_strength FROM links WHERE 1=1",
        );
        let mut args: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(link_type) = query.link_type {
            sql.push_str(" AND link_type = ?");
            args.push(Box::new(link_type.as_str()));
        }

        if let Some(min_strength) = query.min_strength {
            sql.push_str(" AND link_strength >= ?");
            args.push(Box::new(min_strength.value()));
        }

        sql.push_str(" ORDER BY id");

        let arg_refs: Vec<&dyn rusqlite::ToSql> = args.iter().map(|a| a.as_ref()).collect();
        self.query_links(&sql, &arg_refs)
    }

    fn case(&self, id: CaseId) -> Result<Option<Case>, Self::Error> {
        let case = self
            .conn
            .query_row(
                "SELECT id, case_number, case_type, province FROM cases WHERE id = ?1",
                params![to_sql_id(id.value())?],
                case_from_row,
            )
            .optional()?;
        Ok(case)
    }

    fn person(&self, id: PersonId) -> Result<Option<Person>, Self::Error> {
        let person = self
            .conn
            .query_row(
                "SELECT id, name, role FROM persons WHERE id = ?1",
                params![to_sql_id(id.value())?],
                person_from_row,
            )
            .optional()?;
        Ok(person)
    }

    fn links_for_case(&self, id: CaseId) -> Result<Vec<Link>, Self::Error> {
        let id = to_sql_id(id.value())?;
        self.query_links(
            "SELECT id, case1, case2, link_type, link_strength FROM links
             WHERE case1 = ?1 OR case2 = ?1 ORDER BY id",
            &[&id as &dyn rusqlite::ToSql],
        )
    }

    fn persons_in_case(&self, id: CaseId) -> Result<Vec<Person>, Self::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT p.id, p.name, p.role FROM persons p
             JOIN case_persons cp ON cp.person_id = p.id
             WHERE cp.case_id = ?1 ORDER BY p.id",
        )?;
        let persons = stmt
            .query_map(params![to_sql_id(id.value())?], person_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(persons)
    }

    fn evidence_for_case(&self, id: CaseId) -> Result<Vec<Evidence>, Self::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, case_id, kind, label, color FROM evidence WHERE case_id = ?1 ORDER BY id",
        )?;
        let evidence = stmt
            .query_map(params![to_sql_id(id.value())?], evidence_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(evidence)
    }

    fn cases_for_person(&self, id: PersonId) -> Result<Vec<Case>, Self::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT c.id, c.case_number, c.case_type, c.province FROM cases c
             JOIN case_persons cp ON cp.case_id = c.id
             WHERE cp.person_id = ?1 ORDER BY c.id",
        )?;
        let cases = stmt
            .query_map(params![to_sql_id(id.value())?], case_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(cases)
    }
}

fn to_sql_id(value: u64) -> Result<i64, StoreError> {
    i64::try_from(value)
        .map_err(|_| StoreError::InvalidData(format!("Identifier {} does not fit in SQLite", value)))
}

fn from_sql_id(value: i64) -> Result<u64, StoreError> {
    u64::try_from(value)
        .map_err(|_| StoreError::InvalidData(format!("Negative identifier {} in database", value)))
}

/// Wrap a decoding failure so it can leave a row-mapping closure
fn conversion_error(column: usize, kind: rusqlite::types::Type, e: StoreError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, kind, Box::new(e))
}

fn id_column(row: &Row, column: usize) -> rusqlite::Result<u64> {
    from_sql_id(row.get(column)?)
        .map_err(|e| conversion_error(column, rusqlite::types::Type::Integer, e))
}

fn case_from_row(row: &Row) -> rusqlite::Result<Case> {
    Ok(Case {
        id: CaseId::new(id_column(row, 0)?),
        case_number: row.get(1)?,
        case_type: row.get(2)?,
        province: row.get(3)?,
    })
}

fn person_from_row(row: &Row) -> rusqlite::Result<Person> {
    let role: Option<String> = row.get(2)?;
    Ok(Person {
        id: PersonId::new(id_column(row, 0)?),
        name: row.get(1)?,
        role: role.as_deref().and_then(PersonRole::parse),
    })
}

fn evidence_from_row(row: &Row) -> rusqlite::Result<Evidence> {
    let kind: String = row.get(2)?;
    let kind = EvidenceKind::parse(&kind).ok_or_else(|| {
        conversion_error(
            2,
            rusqlite::types::Type::Text,
            StoreError::InvalidData(format!("Unknown evidence kind: {}", kind)),
        )
    })?;

    Ok(Evidence {
        id: EvidenceId::new(id_column(row, 0)?),
        case_id: CaseId::new(id_column(row, 1)?),
        kind,
        label: row.get(3)?,
        color: row.get(4)?,
    })
}

fn link_from_row(row: &Row) -> rusqlite::Result<Link> {
    let link_type: String = row.get(3)?;
    let link_type = LinkType::parse(&link_type).ok_or_else(|| {
        conversion_error(
            3,
            rusqlite::types::Type::Text,
            StoreError::InvalidData(format!("Unknown link type: {}", link_type)),
        )
    })?;

    let strength = LinkStrength::new(row.get(4)?).map_err(|e| {
        conversion_error(4, rusqlite::types::Type::Real, StoreError::InvalidData(e))
    })?;

    let case1 = CaseId::new(id_column(row, 1)?);
    let case2 = CaseId::new(id_column(row, 2)?);
    let pair = CasePair::new(case1, case2).map_err(|e| {
        conversion_error(1, rusqlite::types::Type::Integer, StoreError::InvalidData(e))
    })?;

    Ok(Link {
        id: LinkId::new(id_column(row, 0)?),
        pair,
        link_type,
        strength,
    })
}
