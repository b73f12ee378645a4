//! Account export archives.
//!
//! An export is a zip file named after the account id. It holds `account.json`, which lists
//! every row stored for the player, and the stored file of each finished upload under `images/`.

use std::io::{Cursor, Write};

use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

use crate::{
    model::user::AccountExportDto,
    server::{error::Error, service::user::AccountExport},
};

pub const ACCOUNT_ENTRY: &str = "account.json";
pub const IMAGE_DIRECTORY: &str = "images";

/// A finished export, ready to be sent as a download
#[derive(Debug, Clone)]
pub struct ExportArchive {
    /// Suggested download name, `<user id>.zip`
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Packs the account rows and the stored image files into a zip archive
///
/// Image files that can no longer be read are logged and left out; their rows still appear in
/// `account.json`.
pub async fn build_archive(export: AccountExport) -> Result<ExportArchive, Error> {
    let user_id = export.user.id;

    let mut files = Vec::new();
    for image in &export.images {
        let Some(filepath) = &image.filepath else {
            continue;
        };

        match tokio::fs::read(filepath).await {
            Ok(bytes) => files.push((image_entry_name(image), bytes)),
            Err(e) => tracing::warn!(
                user_id = %user_id,
                image_id = %image.id,
                "Leaving unreadable image file {} out of export: {}",
                filepath,
                e
            ),
        }
    }

    let account = serde_json::to_vec_pretty(&AccountExportDto::from(export))?;

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    writer.start_file(ACCOUNT_ENTRY, options)?;
    writer.write_all(&account)?;

    for (name, bytes) in &files {
        writer.start_file(name.as_str(), options)?;
        writer.write_all(bytes)?;
    }

    let bytes = writer.finish()?.into_inner();

    tracing::debug!(
        user_id = %user_id,
        images = %files.len(),
        size = %bytes.len(),
        "Built account export"
    );

    Ok(ExportArchive {
        filename: format!("{}.zip", user_id),
        bytes,
    })
}

fn image_entry_name(image: &entity::image::Model) -> String {
    match &image.filename {
        Some(filename) => format!("{}/{}", IMAGE_DIRECTORY, filename),
        None => format!("{}/{}", IMAGE_DIRECTORY, image.id),
    }
}
