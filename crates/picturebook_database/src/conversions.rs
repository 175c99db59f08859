//! Conversions between domain types and database rows.

use crate::{AssetRow, NewAssetRow, NewPageRow, NewStoryRow, PageRow, StoryRow};
use chrono::{DateTime, NaiveDateTime, Utc};
use picturebook_core::{AssetKind, AssetReference, Page, Story, StoryStatus};
use picturebook_error::{DatabaseError, DatabaseErrorKind};
use picturebook_interface::StorySummary;

use crate::DatabaseResult;

fn to_naive(at: &DateTime<Utc>) -> NaiveDateTime {
    at.naive_utc()
}

fn to_utc(at: NaiveDateTime) -> DateTime<Utc> {
    at.and_utc()
}

/// Convert a database string to a [`StoryStatus`].
pub fn string_to_status(s: &str) -> DatabaseResult<StoryStatus> {
    s.parse().map_err(|e| {
        DatabaseError::new(DatabaseErrorKind::Conversion(format!(
            "Invalid story status: {}",
            e
        )))
    })
}

fn string_to_asset_kind(s: &str) -> DatabaseResult<AssetKind> {
    s.parse().map_err(|e| {
        DatabaseError::new(DatabaseErrorKind::Conversion(format!(
            "Invalid asset type: {}",
            e
        )))
    })
}

/// Story record for insert or upsert.
pub fn story_to_new_row(story: &Story) -> NewStoryRow {
    NewStoryRow {
        id: story.id().clone(),
        title: story.title().clone(),
        topic: story.topic().clone(),
        age: *story.age(),
        status: story.status().as_str().to_string(),
        total_pages: *story.total_pages() as i32,
        cover_image_path: story
            .cover_image()
            .as_ref()
            .map(|cover| cover.as_path().to_string_lossy().into_owned()),
        created_at: to_naive(story.created_at()),
        updated_at: to_naive(story.updated_at()),
    }
}

/// Page record for insert.
pub fn page_to_new_row(story_id: &str, page: &Page) -> NewPageRow {
    NewPageRow {
        story_id: story_id.to_string(),
        page_number: *page.page_number() as i32,
        text: page.text().clone(),
        illustration_prompt: page.illustration_prompt().clone(),
        created_at: to_naive(page.created_at()),
    }
}

/// Asset records for whichever media the page carries.
///
/// Sizes that were not recorded at write time are read from disk.
pub fn page_assets_to_new_rows(page_id: i32, page: &Page) -> Vec<NewAssetRow> {
    [page.image(), page.audio()]
        .into_iter()
        .flatten()
        .map(|asset| NewAssetRow {
            page_id,
            asset_type: asset.kind().as_str().to_string(),
            file_path: asset.as_path().to_string_lossy().into_owned(),
            cloud_url: asset.cloud_url().clone(),
            size_bytes: asset.resolved_size_bytes().map(|size| size as i64),
            content_hash: asset.content_hash().clone(),
            created_at: to_naive(asset.created_at()),
        })
        .collect()
}

/// Rebuild an asset reference from its row.
pub fn row_to_asset(row: &AssetRow) -> DatabaseResult<AssetReference> {
    let kind = string_to_asset_kind(&row.asset_type)?;
    let mut asset = AssetReference::new(kind, &row.file_path).with_created_at(to_utc(row.created_at));
    if let Some(size) = row.size_bytes {
        asset = asset.with_size_bytes(size.max(0) as u64);
    }
    if let Some(hash) = &row.content_hash {
        asset = asset.with_content_hash(hash.clone());
    }
    if let Some(url) = &row.cloud_url {
        asset = asset.with_cloud_url(url.clone());
    }
    Ok(asset)
}

/// Rebuild a page and attach its image and audio.
///
/// When several rows of one kind exist the newest wins.
pub fn rows_to_page(row: &PageRow, assets: &[AssetRow]) -> DatabaseResult<Page> {
    let mut image = None;
    let mut audio = None;

    let mut ordered: Vec<&AssetRow> = assets.iter().collect();
    ordered.sort_by_key(|asset| (asset.created_at, asset.id));

    for asset_row in ordered {
        let asset = row_to_asset(asset_row)?;
        match asset.kind() {
            AssetKind::Image => image = Some(asset),
            AssetKind::Audio => audio = Some(asset),
            AssetKind::Cover => {
                tracing::debug!(page_id = row.id, "Ignoring cover asset attached to page");
            }
        }
    }

    Ok(Page::new(
        row.page_number.max(1) as u32,
        row.text.clone(),
        row.illustration_prompt.clone(),
    )
    .with_image(image)
    .with_audio(audio)
    .with_created_at(to_utc(row.created_at)))
}

/// Rebuild a full story from its rows. `pages` must be in page order.
pub fn rows_to_story(row: &StoryRow, pages: Vec<Page>) -> DatabaseResult<Story> {
    let status = string_to_status(&row.status)?;
    let cover = row
        .cover_image_path
        .as_ref()
        .map(|path| AssetReference::new(AssetKind::Cover, path));

    Ok(Story::restore(
        row.id.clone(),
        row.title.clone(),
        row.topic.clone(),
        row.age,
        status,
        pages,
        cover,
        to_utc(row.created_at),
        to_utc(row.updated_at),
    ))
}

/// Listing entry for a story row.
pub fn row_to_summary(row: &StoryRow) -> DatabaseResult<StorySummary> {
    Ok(StorySummary {
        id: row.id.clone(),
        title: row.title.clone(),
        topic: row.topic.clone(),
        age: row.age,
        status: string_to_status(&row.status)?,
        total_pages: row.total_pages.max(0) as usize,
        created_at: to_utc(row.created_at),
    })
}
