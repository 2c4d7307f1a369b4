//! Gated directory listing at the root path.
//!
//! Only reached once the session gate has granted access. A directory that
//! cannot be read renders the page with a warning flag instead of failing
//! the request; the page is also the place the user logs out from.

use axum::{extract::State, response::Html};
use serde::Serialize;
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;
use crate::templates::LISTING_TEMPLATE;

/// One entry in the served directory
#[derive(Debug, Serialize)]
struct FileEntry {
    name: String,
    is_dir: bool,
}

/// Read the served directory, sorted by name. Entries whose names are not
/// valid UTF-8 are skipped.
async fn read_entries(root: &str) -> std::io::Result<Vec<FileEntry>> {
    let mut entries = Vec::new();
    let mut dir = tokio::fs::read_dir(root).await?;

    while let Some(entry) = dir.next_entry().await? {
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        let is_dir = entry
            .file_type()
            .await
            .map(|kind| kind.is_dir())
            .unwrap_or(false);
        entries.push(FileEntry { name, is_dir });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Directory listing handler for the gated root.
#[instrument(name = "listing::index", skip_all)]
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let (files, show_warning) = match read_entries(&state.config.files.root).await {
        Ok(files) => (files, false),
        Err(err) => {
            tracing::error!(error = %err, root = %state.config.files.root, "Error reading directory");
            (Vec::new(), true)
        }
    };

    let mut context = tera::Context::new();
    context.insert("config", &state.config.ui);
    context.insert("files", &files);
    context.insert("show_warning", &show_warning);

    let html = state.tera.render(LISTING_TEMPLATE, &context)?;
    Ok(Html(html))
}
