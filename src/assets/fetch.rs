//! Asset download and installation.
//!
//! Downloads the manifest assets into the model directory, skipping anything
//! whose destination already exists. Downloads run strictly sequentially; a
//! failed fetch aborts the whole run. There is no retry and no partial-file
//! cleanup — a truncated file satisfies the existence check on the next run,
//! so operators recover by deleting the destination.

use crate::assets::manifest::{ASSETS, AssetKind, AssetSpec};
use crate::error::{Result, VoxpipeError};
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Fetch every manifest asset into `model_dir`, in manifest order.
pub async fn fetch_all(model_dir: &Path, progress: bool) -> Result<()> {
    fs::create_dir_all(model_dir)?;
    for asset in ASSETS {
        fetch_asset(asset, model_dir, progress).await?;
    }
    Ok(())
}

/// Fetch a single asset unless its target already exists.
pub async fn fetch_asset(asset: &AssetSpec, model_dir: &Path, progress: bool) -> Result<()> {
    let target = model_dir.join(asset.target);
    if target.exists() {
        eprintln!("{} already installed at {}", asset.name, target.display());
        return Ok(());
    }

    match asset.kind {
        AssetKind::ZipArchive => {
            let archive_name = asset
                .url
                .rsplit('/')
                .next()
                .unwrap_or("download.zip");
            let archive_path = model_dir.join(archive_name);

            eprintln!("Downloading {}...", asset.name);
            download_to_path(asset.url, &archive_path, progress).await?;

            eprintln!("Extracting {}...", archive_path.display());
            extract_zip(&archive_path, model_dir)?;
            fs::remove_file(&archive_path)?;
            eprintln!("{} ready.", asset.name);
        }
        AssetKind::VoiceModel {
            config_url,
            config_target,
        } => {
            eprintln!("Downloading {}...", asset.name);
            download_to_path(asset.url, &target, progress).await?;
            download_to_path(config_url, &model_dir.join(config_target), progress).await?;
            eprintln!("{} ready.", asset.name);
        }
    }

    Ok(())
}

/// Core download: fetch the URL and write it verbatim to `output_path`.
///
/// Creates missing parent directories and reports the final size for
/// operator visibility.
async fn download_to_path(url: &str, output_path: &Path, progress: bool) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let client = reqwest::Client::new();
    let response = client.get(url).send().await.map_err(|e| VoxpipeError::Download {
        url: url.to_string(),
        message: format!("failed to start download: {e}"),
    })?;

    if !response.status().is_success() {
        return Err(VoxpipeError::Download {
            url: url.to_string(),
            message: format!("server returned status {}", response.status()),
        });
    }

    let total_size = response.content_length().unwrap_or(0);

    let pb = if progress {
        let pb = ProgressBar::new(total_size);
        pb.set_style(
            // SAFETY: hardcoded template string — always valid
            #[allow(clippy::expect_used)]
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                .expect("hardcoded progress bar template")
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut stream = response.bytes_stream();
    let mut file = fs::File::create(output_path)?;
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| VoxpipeError::Download {
            url: url.to_string(),
            message: format!("failed to read download chunk: {e}"),
        })?;

        file.write_all(&chunk)?;
        written += chunk.len() as u64;

        if let Some(ref pb) = pb {
            pb.inc(chunk.len() as u64);
        }
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    eprintln!(
        "saved {} ({:.2} MB)",
        output_path.display(),
        written as f64 / (1024.0 * 1024.0)
    );

    Ok(())
}

/// Extract a zip archive into `dest_dir`.
fn extract_zip(archive_path: &Path, dest_dir: &Path) -> Result<()> {
    let file = fs::File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| VoxpipeError::Extraction {
        path: archive_path.to_string_lossy().to_string(),
        message: e.to_string(),
    })?;

    archive
        .extract(dest_dir)
        .map_err(|e| VoxpipeError::Extraction {
            path: archive_path.to_string_lossy().to_string(),
            message: e.to_string(),
        })?;

    Ok(())
}
