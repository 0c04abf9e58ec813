//! Template store contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/get/list/delete APIs over template storage.
//! - Keep SQL details and ordering behavior inside the repository boundary.
//!
//! # Invariants
//! - Item listing is deterministic: `sort_order ASC, item_uuid ASC`.
//! - A template is never created without at least one item.
//! - Deleting a template removes its item records with it.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::item::SourceId;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable template identifier.
pub type TemplateId = Uuid;

/// Result type used by template repository operations.
pub type TemplateRepoResult<T> = Result<T, TemplateRepoError>;

/// Errors from template repository operations.
#[derive(Debug)]
pub enum TemplateRepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Target template does not exist.
    NotFound(TemplateId),
    /// Template name is blank after trim.
    BlankName,
    /// Template creation needs at least one item.
    EmptyItems,
    /// Item payload at `index` carries a blank image reference.
    BlankImageUrl { index: usize },
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl Display for TemplateRepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "template not found: {id}"),
            Self::BlankName => write!(f, "template name must not be blank"),
            Self::EmptyItems => write!(f, "template needs at least one item"),
            Self::BlankImageUrl { index } => {
                write!(f, "template item {index} is missing an image url")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "template repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::InvalidData(message) => write!(f, "invalid template data: {message}"),
        }
    }
}

impl Error for TemplateRepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for TemplateRepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for TemplateRepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Template header read model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRecord {
    /// Stable template id.
    pub template_uuid: TemplateId,
    /// User-facing template name.
    pub name: String,
    /// Epoch ms creation timestamp.
    pub created_at: i64,
}

/// Template item read model, the source records of a catalog load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateItemRecord {
    /// Stable item source id.
    pub item_uuid: SourceId,
    /// Owning template.
    pub template_uuid: TemplateId,
    /// Display image reference.
    pub image_url: String,
    /// Stable order key within one template.
    pub sort_order: i64,
}

/// New item payload for template creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTemplateItem {
    pub image_url: String,
}

/// Repository interface for template store operations.
pub trait TemplateRepository {
    /// Creates one template with its ordered items.
    fn create_template(
        &self,
        name: &str,
        items: &[NewTemplateItem],
    ) -> TemplateRepoResult<TemplateRecord>;
    /// Loads one template header by id.
    fn get_template(&self, template_uuid: TemplateId)
        -> TemplateRepoResult<Option<TemplateRecord>>;
    /// Lists all template headers.
    fn list_templates(&self) -> TemplateRepoResult<Vec<TemplateRecord>>;
    /// Lists one template's items in stored order.
    fn list_template_items(
        &self,
        template_uuid: TemplateId,
    ) -> TemplateRepoResult<Vec<TemplateItemRecord>>;
    /// Deletes one template and its items.
    fn delete_template(&self, template_uuid: TemplateId) -> TemplateRepoResult<()>;
}

/// SQLite-backed template repository.
pub struct SqliteTemplateRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTemplateRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> TemplateRepoResult<Self> {
        ensure_template_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl TemplateRepository for SqliteTemplateRepository<'_> {
    fn create_template(
        &self,
        name: &str,
        items: &[NewTemplateItem],
    ) -> TemplateRepoResult<TemplateRecord> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TemplateRepoError::BlankName);
        }
        if items.is_empty() {
            return Err(TemplateRepoError::EmptyItems);
        }
        for (index, item) in items.iter().enumerate() {
            if item.image_url.trim().is_empty() {
                return Err(TemplateRepoError::BlankImageUrl { index });
            }
        }

        let template_uuid = Uuid::new_v4();
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO templates (template_uuid, name) VALUES (?1, ?2);",
            params![template_uuid.to_string(), name],
        )?;
        for (index, item) in items.iter().enumerate() {
            tx.execute(
                "INSERT INTO template_items (item_uuid, template_uuid, image_url, sort_order)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    Uuid::new_v4().to_string(),
                    template_uuid.to_string(),
                    item.image_url.trim(),
                    index as i64,
                ],
            )?;
        }
        tx.commit()?;

        load_required_template(self.conn, template_uuid)
    }

    fn get_template(
        &self,
        template_uuid: TemplateId,
    ) -> TemplateRepoResult<Option<TemplateRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT template_uuid, name, created_at
             FROM templates
             WHERE template_uuid = ?1;",
        )?;
        let mut rows = stmt.query([template_uuid.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_template_row(row)?));
        }
        Ok(None)
    }

    fn list_templates(&self) -> TemplateRepoResult<Vec<TemplateRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT template_uuid, name, created_at
             FROM templates
             ORDER BY created_at DESC, template_uuid ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut templates = Vec::new();
        while let Some(row) = rows.next()? {
            templates.push(parse_template_row(row)?);
        }
        Ok(templates)
    }

    fn list_template_items(
        &self,
        template_uuid: TemplateId,
    ) -> TemplateRepoResult<Vec<TemplateItemRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT item_uuid, template_uuid, image_url, sort_order
             FROM template_items
             WHERE template_uuid = ?1
             ORDER BY sort_order ASC, item_uuid ASC;",
        )?;
        let mut rows = stmt.query([template_uuid.to_string()])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_template_item_row(row)?);
        }
        Ok(items)
    }

    fn delete_template(&self, template_uuid: TemplateId) -> TemplateRepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM templates WHERE template_uuid = ?1;",
            [template_uuid.to_string()],
        )?;
        if changed == 0 {
            return Err(TemplateRepoError::NotFound(template_uuid));
        }
        Ok(())
    }
}

fn load_required_template(
    conn: &Connection,
    template_uuid: TemplateId,
) -> TemplateRepoResult<TemplateRecord> {
    let record = conn
        .query_row(
            "SELECT template_uuid, name, created_at
             FROM templates
             WHERE template_uuid = ?1;",
            [template_uuid.to_string()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            },
        )
        .optional()?;

    match record {
        Some((uuid_text, name, created_at)) => Ok(TemplateRecord {
            template_uuid: parse_uuid(&uuid_text, "templates.template_uuid")?,
            name,
            created_at,
        }),
        None => Err(TemplateRepoError::NotFound(template_uuid)),
    }
}

fn parse_template_row(row: &Row<'_>) -> TemplateRepoResult<TemplateRecord> {
    let uuid_text: String = row.get("template_uuid")?;
    Ok(TemplateRecord {
        template_uuid: parse_uuid(&uuid_text, "templates.template_uuid")?,
        name: row.get("name")?,
        created_at: row.get("created_at")?,
    })
}

fn parse_template_item_row(row: &Row<'_>) -> TemplateRepoResult<TemplateItemRecord> {
    let item_uuid_text: String = row.get("item_uuid")?;
    let template_uuid_text: String = row.get("template_uuid")?;
    Ok(TemplateItemRecord {
        item_uuid: parse_uuid(&item_uuid_text, "template_items.item_uuid")?,
        template_uuid: parse_uuid(&template_uuid_text, "template_items.template_uuid")?,
        image_url: row.get("image_url")?,
        sort_order: row.get("sort_order")?,
    })
}

fn parse_uuid(value: &str, column: &'static str) -> TemplateRepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| TemplateRepoError::InvalidData(format!("invalid uuid `{value}` in {column}")))
}

fn ensure_template_connection_ready(conn: &Connection) -> TemplateRepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(TemplateRepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in ["templates", "template_items"] {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(TemplateRepoError::InvalidData(format!(
                "required table `{table}` is missing"
            )));
        }
    }

    Ok(())
}
