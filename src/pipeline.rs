use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::ExtractError;
use crate::extractor::SourceFactory;
use crate::language::LanguageGate;
use crate::models::{ExtractedDoc, RunReport};
use crate::ocr::OcrEngine;
use crate::text;
use crate::utils;

/// Knobs for one extraction run
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Extension filter applied to walked files; `None` keeps everything
    pub filetypes: Option<Vec<String>>,
    /// Attempt OCR when primary extraction yields nothing usable
    pub ocr: bool,
    /// Skip primary extraction and OCR everything
    pub force_ocr: bool,
    /// Record failures and keep going instead of aborting
    pub tolerant: bool,
    /// Transliterate extracted text to ASCII
    pub ascii: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            filetypes: Some(
                crate::constants::DEFAULT_FILETYPES
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            ),
            ocr: true,
            force_ocr: false,
            tolerant: true,
            ascii: false,
        }
    }
}

/// Drives extraction over a set of input files and directories
pub struct ExtractRunner {
    factory: SourceFactory,
    ocr: OcrEngine,
    gate: LanguageGate,
    opts: ExtractOptions,
}

impl ExtractRunner {
    pub fn new(
        factory: SourceFactory,
        ocr: OcrEngine,
        gate: LanguageGate,
        opts: ExtractOptions,
    ) -> Self {
        Self {
            factory,
            ocr,
            gate,
            opts,
        }
    }

    /// Extract cleaned text from one document, OCR fallback included.
    pub async fn extract_file(&self, path: &Path) -> Result<String, ExtractError> {
        let primary = if self.opts.force_ocr {
            Err(ExtractError::NoText)
        } else {
            self.primary_pass(path).await
        };

        let primary_err = match primary {
            Ok(cleaned) => return Ok(text::normalize_whitespace(&cleaned)),
            Err(err) => err,
        };

        if !self.opts.ocr && !self.opts.force_ocr {
            return Err(primary_err);
        }

        if !self.opts.force_ocr {
            debug!(
                "primary extraction failed for {} ({}), trying OCR",
                path.display(),
                primary_err
            );
        }

        match self.ocr_pass(path).await {
            Ok(raw) => {
                let cleaned = text::clean(&raw, self.opts.ascii);
                if cleaned.is_empty() {
                    // OCR came back blank; the primary failure is the one
                    // worth reporting
                    Err(primary_err)
                } else {
                    Ok(text::normalize_whitespace(&cleaned))
                }
            }
            Err(ocr_err) if self.opts.force_ocr => Err(ocr_err),
            Err(ocr_err) => {
                debug!("OCR fallback failed for {}: {}", path.display(), ocr_err);
                Err(primary_err)
            }
        }
    }

    /// Walk inputs, extract every candidate file, write outputs, report.
    pub async fn run(
        &self,
        inputs: &[PathBuf],
        output_dir: &Path,
        show_progress: bool,
    ) -> Result<RunReport> {
        let mut report = RunReport::default();
        let files = self.collect_files(inputs, &mut report);

        let pb = if show_progress {
            ProgressBar::new(files.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} files ({msg})")
                .unwrap()
                .progress_chars("#>-"),
        );

        let max_concurrent = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
            .min(8);

        let mut results = stream::iter(files)
            .map(|path| {
                let pb = pb.clone();
                async move {
                    pb.set_message(utils::file_name(&path).to_string());
                    let result = self.extract_file(&path).await;
                    pb.inc(1);
                    (path, result)
                }
            })
            .buffer_unordered(max_concurrent);

        while let Some((path, result)) = results.next().await {
            match result {
                Ok(extracted) => {
                    let out_path =
                        output_dir.join(format!("{}.txt", utils::file_name(&path)));
                    tokio::fs::write(&out_path, &extracted)
                        .await
                        .with_context(|| {
                            format!("Failed to write output: {}", out_path.display())
                        })?;
                    report
                        .extracted
                        .push(ExtractedDoc::new(path, out_path, extracted.len()));
                }
                Err(err) if err.is_benign() => {
                    debug!("skipping {}: {}", path.display(), err);
                    report.unreadable.push(path);
                }
                Err(err) => {
                    warn!("error reading {}: {}", path.display(), err);
                    if !self.opts.tolerant {
                        pb.abandon();
                        return Err(anyhow::Error::new(err)
                            .context(format!("Failed to extract {}", path.display())));
                    }
                    report.unreadable.push(path);
                }
            }
        }

        pb.finish_and_clear();
        Ok(report)
    }

    async fn primary_pass(&self, path: &Path) -> Result<String, ExtractError> {
        let source = self
            .factory
            .create(path.to_path_buf(), utils::get_extension(path));
        debug!(
            "extracting {} with the {} backend",
            path.display(),
            source.kind()
        );
        let raw = source.read_text().await?;
        let cleaned = text::clean(&raw, self.opts.ascii);
        if cleaned.is_empty() {
            return Err(ExtractError::NoText);
        }
        self.gate.check(&cleaned)?;
        Ok(cleaned)
    }

    async fn ocr_pass(&self, path: &Path) -> Result<String, ExtractError> {
        let ocr = self.ocr.clone();
        let path = path.to_path_buf();
        let is_pdf = utils::get_extension(&path).as_deref() == Some("pdf");
        tokio::task::spawn_blocking(move || {
            if is_pdf {
                ocr.ocr_pdf(&path)
            } else {
                ocr.ocr_image(&path)
            }
        })
        .await
        .map_err(|e| ExtractError::Other(anyhow::anyhow!("OCR task failed: {e}")))?
    }

    /// Expand directories recursively (sorted walk) and apply the extension
    /// filter; explicitly listed files go through the same filter.
    fn collect_files(&self, inputs: &[PathBuf], report: &mut RunReport) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for input in inputs {
            if input.is_file() {
                files.push(input.clone());
            } else {
                for entry in WalkDir::new(input).sort_by_file_name() {
                    match entry {
                        Ok(e) if e.path().is_file() => files.push(e.path().to_path_buf()),
                        Ok(_) => {}
                        Err(e) => warn!("error walking {}: {}", input.display(), e),
                    }
                }
            }
        }

        if let Some(filetypes) = &self.opts.filetypes {
            let before = files.len();
            files.retain(|path| {
                utils::get_extension(path)
                    .map(|ext| filetypes.iter().any(|ft| ft.eq_ignore_ascii_case(&ext)))
                    .unwrap_or(false)
            });
            report.filtered = before - files.len();
        }

        files
    }
}
