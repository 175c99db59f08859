//! Diesel models for the story tables.

use crate::schema::{assets, pages, stories};
use chrono::NaiveDateTime;
use diesel::prelude::*;

/// Database row for the `stories` table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = stories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StoryRow {
    pub id: String,
    pub title: String,
    pub topic: String,
    pub age: f64,
    pub status: String,
    pub total_pages: i32,
    pub cover_image_path: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable story record; also the changeset applied on upsert.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = stories)]
pub struct NewStoryRow {
    pub id: String,
    pub title: String,
    pub topic: String,
    pub age: f64,
    pub status: String,
    pub total_pages: i32,
    pub cover_image_path: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database row for the `pages` table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Associations)]
#[diesel(belongs_to(StoryRow, foreign_key = story_id))]
#[diesel(table_name = pages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PageRow {
    pub id: i32,
    pub story_id: String,
    pub page_number: i32,
    pub text: String,
    pub illustration_prompt: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Insertable page record.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pages)]
pub struct NewPageRow {
    pub story_id: String,
    pub page_number: i32,
    pub text: String,
    pub illustration_prompt: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Database row for the `assets` table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Associations)]
#[diesel(belongs_to(PageRow, foreign_key = page_id))]
#[diesel(table_name = assets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AssetRow {
    pub id: i32,
    pub page_id: i32,
    pub asset_type: String,
    pub file_path: String,
    pub cloud_url: Option<String>,
    pub size_bytes: Option<i64>,
    pub content_hash: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Insertable asset record.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = assets)]
pub struct NewAssetRow {
    pub page_id: i32,
    pub asset_type: String,
    pub file_path: String,
    pub cloud_url: Option<String>,
    pub size_bytes: Option<i64>,
    pub content_hash: Option<String>,
    pub created_at: NaiveDateTime,
}
