use rusqlite::{params, Row};
use uuid::Uuid;

use crate::{ctx::BaseParams, db, Error, Result};

use super::{CreateNote, FindNotesResponse, Note, TogglePin, UpdateNote};

impl<'a> TryFrom<&Row<'a>> for Note {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'a>) -> std::result::Result<Self, Self::Error> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            is_pinned: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
            user_id: row.get(6)?,
        })
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::Validation("Title must not be empty".into()));
    }
    Ok(())
}

/// Pinned notes first, most recently updated first within each group. The
/// query produces this order; callers must not re-sort.
pub async fn find_notes(BaseParams { db, ctx }: BaseParams) -> Result<FindNotesResponse> {
    let user_id = ctx.require(|caps| caps.can_view)?.id;

    db.call(move |conn| {
        let notes = conn
            .prepare(
                r#"SELECT id, title, content, is_pinned, created_at, updated_at, user_id FROM notes
                WHERE user_id = ?
                ORDER BY is_pinned DESC, updated_at DESC"#,
            )?
            .query_map(params![user_id], |row| Note::try_from(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(FindNotesResponse { results: notes })
    })
    .await
    .map_err(db::Error::from)
    .map_err(Error::from)
}

pub async fn create_note(CreateNote { title, content }: CreateNote, BaseParams { db, ctx }: BaseParams) -> Result<Note> {
    let user_id = ctx.require(|caps| caps.can_create)?.id;
    validate_title(&title)?;

    let now = chrono::Utc::now();
    db.call(move |conn| {
        conn.query_row(
            r#"INSERT INTO notes (title, content, user_id, created_at, updated_at) VALUES (?, ?, ?, ?, ?)
            RETURNING id, title, content, is_pinned, created_at, updated_at, user_id"#,
            params![title, content, user_id, now, now],
            |row| Note::try_from(row),
        )
        .map_err(|e| e.into())
    })
    .await
    .map_err(db::Error::from)
    .map_err(Error::from)
}

pub async fn update_note(
    note_id: Uuid,
    UpdateNote { title, content }: UpdateNote,
    BaseParams { db, ctx }: BaseParams,
) -> Result<Note> {
    let user_id = ctx.require(|caps| caps.can_edit)?.id;
    validate_title(&title)?;

    db.call(move |conn| {
        conn.query_row(
            r#"UPDATE notes SET title = ?, content = ?, updated_at = ?
            WHERE id = ? AND user_id = ?
            RETURNING id, title, content, is_pinned, created_at, updated_at, user_id"#,
            params![title, content, chrono::Utc::now(), note_id, user_id],
            |row| Note::try_from(row),
        )
        .map_err(|e| e.into())
    })
    .await
    .map_err(db::Error::from)
    .map_err(|e| db::Error::not_found_message(e, "Note not found"))
    .map_err(Error::from)
}

/// Writes the flag unconditionally: setting it to its current value still
/// refreshes `updated_at`, so a (re)pinned note surfaces at the top of its
/// group. Pinning shares the update path with content edits on purpose.
pub async fn toggle_pin(
    note_id: Uuid,
    TogglePin { is_pinned }: TogglePin,
    BaseParams { db, ctx }: BaseParams,
) -> Result<Note> {
    let user_id = ctx.require(|caps| caps.can_toggle_pin)?.id;

    db.call(move |conn| {
        conn.query_row(
            r#"UPDATE notes SET is_pinned = ?, updated_at = ?
            WHERE id = ? AND user_id = ?
            RETURNING id, title, content, is_pinned, created_at, updated_at, user_id"#,
            params![is_pinned, chrono::Utc::now(), note_id, user_id],
            |row| Note::try_from(row),
        )
        .map_err(|e| e.into())
    })
    .await
    .map_err(db::Error::from)
    .map_err(|e| db::Error::not_found_message(e, "Note not found"))
    .map_err(Error::from)
}

pub async fn delete_note(note_id: Uuid, BaseParams { db, ctx }: BaseParams) -> Result<Note> {
    let user_id = ctx.require(|caps| caps.can_delete)?.id;

    db.call(move |conn| {
        conn.query_row(
            r#"DELETE FROM notes
            WHERE id = ? AND user_id = ?
            RETURNING id, title, content, is_pinned, created_at, updated_at, user_id"#,
            params![note_id, user_id],
            |row| Note::try_from(row),
        )
        .map_err(|e| e.into())
    })
    .await
    .map_err(db::Error::from)
    .map_err(|e| db::Error::not_found_message(e, "Note not found"))
    .map_err(Error::from)
}
