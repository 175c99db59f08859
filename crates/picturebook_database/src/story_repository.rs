//! PostgreSQL implementation of [`StoryRepository`].

use crate::conversions::{
    page_assets_to_new_rows, page_to_new_row, row_to_summary, rows_to_page, rows_to_story,
    story_to_new_row,
};
use crate::schema::{assets, pages, stories};
use crate::{AssetRow, DatabaseResult, PageRow, StoryRow, establish_connection, run_migrations};

use async_trait::async_trait;
use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use picturebook_core::{Page, Story, StoryStatus};
use picturebook_error::{DatabaseError, DatabaseErrorKind, PicturebookResult};
use picturebook_interface::{StoryFilter, StoryRepository, StorySession, StorySummary};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// PostgreSQL story store using Diesel.
///
/// Stories live in three tables: `stories`, `pages` (one row per page number)
/// and `assets` (image and audio rows per page).
///
/// # Example
/// ```no_run
/// use picturebook_database::PostgresStoryRepository;
/// use picturebook_interface::{StoryFilter, StoryRepository};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let repo = PostgresStoryRepository::connect(None)?;
/// let recent = repo.list_stories(&StoryFilter::newest(20)).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PostgresStoryRepository {
    conn: Arc<Mutex<PgConnection>>,
}

impl PostgresStoryRepository {
    /// Wrap an open connection.
    pub fn new(conn: PgConnection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Connect (see [`establish_connection`]) and apply pending migrations.
    pub fn connect(database_url: Option<&str>) -> DatabaseResult<Self> {
        let mut conn = establish_connection(database_url)?;
        run_migrations(&mut conn)?;
        Ok(Self::new(conn))
    }

    /// Share an existing connection.
    pub fn from_arc(conn: Arc<Mutex<PgConnection>>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl StoryRepository for PostgresStoryRepository {
    async fn open_session(&self) -> PicturebookResult<Box<dyn StorySession>> {
        tracing::debug!("Opening story session");
        Ok(Box::new(PostgresStorySession {
            conn: Arc::clone(&self.conn),
        }))
    }
}

/// Session over the shared connection. Each call runs in its own transaction.
pub struct PostgresStorySession {
    conn: Arc<Mutex<PgConnection>>,
}

fn upsert_story(conn: &mut PgConnection, story: &Story) -> QueryResult<()> {
    let row = story_to_new_row(story);
    diesel::insert_into(stories::table)
        .values(&row)
        .on_conflict(stories::id)
        .do_update()
        .set(&row)
        .execute(conn)?;
    Ok(())
}

/// Upsert the page row, then replace its assets.
fn write_page(conn: &mut PgConnection, story_id: &str, page: &Page) -> QueryResult<i32> {
    let row = page_to_new_row(story_id, page);
    let page_id: i32 = diesel::insert_into(pages::table)
        .values(&row)
        .on_conflict((pages::story_id, pages::page_number))
        .do_update()
        .set((
            pages::text.eq(&row.text),
            pages::illustration_prompt.eq(&row.illustration_prompt),
        ))
        .returning(pages::id)
        .get_result(conn)?;

    diesel::delete(assets::table.filter(assets::page_id.eq(page_id))).execute(conn)?;

    let asset_rows = page_assets_to_new_rows(page_id, page);
    if !asset_rows.is_empty() {
        diesel::insert_into(assets::table)
            .values(&asset_rows)
            .execute(conn)?;
    }
    Ok(page_id)
}

/// Keep `stories.total_pages` in step with the page rows.
fn refresh_page_count(conn: &mut PgConnection, story_id: &str) -> QueryResult<()> {
    let count: i64 = pages::table
        .filter(pages::story_id.eq(story_id))
        .count()
        .get_result(conn)?;
    diesel::update(stories::table.find(story_id))
        .set((
            stories::total_pages.eq(count as i32),
            stories::updated_at.eq(Utc::now().naive_utc()),
        ))
        .execute(conn)?;
    Ok(())
}

fn load_pages(conn: &mut PgConnection, story: &StoryRow) -> DatabaseResult<Vec<Page>> {
    let page_rows: Vec<PageRow> = PageRow::belonging_to(story)
        .select(PageRow::as_select())
        .order(pages::page_number.asc())
        .load(conn)?;

    let asset_rows: Vec<AssetRow> = AssetRow::belonging_to(&page_rows)
        .select(AssetRow::as_select())
        .load(conn)?;

    let assets_by_page =
        asset_rows
            .into_iter()
            .fold(HashMap::new(), |mut acc: HashMap<i32, Vec<AssetRow>>, asset| {
                acc.entry(asset.page_id).or_default().push(asset);
                acc
            });

    page_rows
        .iter()
        .map(|row| {
            let assets = assets_by_page.get(&row.id).map(Vec::as_slice).unwrap_or(&[]);
            rows_to_page(row, assets)
        })
        .collect()
}

fn find_story(conn: &mut PgConnection, story_id: &str) -> DatabaseResult<Option<StoryRow>> {
    Ok(stories::table
        .find(story_id)
        .select(StoryRow::as_select())
        .first(conn)
        .optional()?)
}

fn transaction_error(action: &str, story_id: &str, err: diesel::result::Error) -> DatabaseError {
    DatabaseError::new(DatabaseErrorKind::Query(format!(
        "{} for story {} failed: {}",
        action, story_id, err
    )))
}

#[async_trait]
impl StorySession for PostgresStorySession {
    #[tracing::instrument(skip(self, story), fields(story_id = %story.id()))]
    async fn create_story(&mut self, story: &Story) -> PicturebookResult<()> {
        let mut conn = self.conn.lock().await;
        upsert_story(&mut conn, story)
            .map_err(|e| transaction_error("Create", story.id(), e))?;
        tracing::debug!("Story record written");
        Ok(())
    }

    #[tracing::instrument(skip(self, page), fields(page_number = *page.page_number()))]
    async fn save_page(&mut self, story_id: &str, page: &Page) -> PicturebookResult<()> {
        let mut conn = self.conn.lock().await;
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            write_page(conn, story_id, page)?;
            refresh_page_count(conn, story_id)
        })
        .map_err(|e| transaction_error("Save page", story_id, e))?;
        Ok(())
    }

    #[tracing::instrument(skip(self, story), fields(story_id = %story.id(), pages = *story.total_pages()))]
    async fn save_complete_story(&mut self, story: &Story) -> PicturebookResult<()> {
        let mut conn = self.conn.lock().await;
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            upsert_story(conn, story)?;
            for page in story.pages() {
                write_page(conn, story.id(), page)?;
            }
            // Drop rows left over from a longer earlier version.
            diesel::delete(
                pages::table
                    .filter(pages::story_id.eq(story.id()))
                    .filter(pages::page_number.gt(*story.total_pages() as i32)),
            )
            .execute(conn)?;
            Ok(())
        })
        .map_err(|e| transaction_error("Save", story.id(), e))?;
        tracing::info!("Story saved");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn update_status(
        &mut self,
        story_id: &str,
        status: StoryStatus,
    ) -> PicturebookResult<bool> {
        let mut conn = self.conn.lock().await;
        let updated = diesel::update(stories::table.find(story_id))
            .set((
                stories::status.eq(status.as_str()),
                stories::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(&mut *conn)
            .map_err(DatabaseError::from)?;
        Ok(updated > 0)
    }

    #[tracing::instrument(skip(self))]
    async fn load_story(&mut self, story_id: &str) -> PicturebookResult<Option<Story>> {
        let mut conn = self.conn.lock().await;
        let Some(row) = find_story(&mut conn, story_id)? else {
            return Ok(None);
        };
        let pages = load_pages(&mut conn, &row)?;
        Ok(Some(rows_to_story(&row, pages)?))
    }

    #[tracing::instrument(skip(self))]
    async fn get_pages(&mut self, story_id: &str) -> PicturebookResult<Vec<Page>> {
        let mut conn = self.conn.lock().await;
        match find_story(&mut conn, story_id)? {
            Some(row) => Ok(load_pages(&mut conn, &row)?),
            None => Ok(Vec::new()),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list_stories(&mut self, filter: &StoryFilter) -> PicturebookResult<Vec<StorySummary>> {
        let mut conn = self.conn.lock().await;

        let mut query = stories::table.select(StoryRow::as_select()).into_boxed();

        if let Some(status) = filter.status() {
            query = query.filter(stories::status.eq(status.as_str()));
        }

        query = query.order(stories::created_at.desc());

        if let Some(offset) = filter.offset() {
            query = query.offset(*offset as i64);
        }
        if let Some(limit) = filter.limit() {
            query = query.limit(*limit as i64);
        }

        let rows: Vec<StoryRow> = query.load(&mut *conn).map_err(DatabaseError::from)?;
        let summaries = rows
            .iter()
            .map(row_to_summary)
            .collect::<DatabaseResult<Vec<_>>>()?;
        Ok(summaries)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_story(&mut self, story_id: &str) -> PicturebookResult<bool> {
        let mut conn = self.conn.lock().await;
        let deleted = diesel::delete(stories::table.find(story_id))
            .execute(&mut *conn)
            .map_err(DatabaseError::from)?;
        Ok(deleted > 0)
    }

    async fn close(self: Box<Self>) -> PicturebookResult<()> {
        tracing::debug!("Closing story session");
        Ok(())
    }
}
