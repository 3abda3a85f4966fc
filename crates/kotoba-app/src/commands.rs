use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, bail};
use kotoba_lang_japanese::{JapaneseProcessor, now_ms};
use kotoba_types::TextSource;

use crate::cli::{ExportTarget, NotebookCommands};
use crate::output::entry_line;

/// Text from the argument, or from piped stdin
fn input_text(text: Option<String>) -> anyhow::Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    if atty::is(atty::Stream::Stdin) {
        bail!("No text given; pass TEXT or pipe it on stdin");
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read stdin")?;
    Ok(buffer)
}

pub fn extract(
    processor: &mut JapaneseProcessor,
    text: Option<String>,
    source: TextSource,
    dry_run: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let text = input_text(text)?;

    let entries = if dry_run {
        processor.preview(&text, source, now_ms())
    } else {
        processor.handle_text(&text, source, now_ms())
    };

    for entry in &entries {
        writeln!(out, "{}", entry_line(entry))?;
    }
    tracing::info!(
        "{} {} words",
        if dry_run { "Found" } else { "Recorded" },
        entries.len()
    );
    Ok(())
}

pub fn import(processor: &mut JapaneseProcessor, file: &Path, out: &mut impl Write) -> anyhow::Result<()> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let summary = processor
        .import(&text)
        .with_context(|| format!("Failed to import {}", file.display()))?;

    writeln!(
        out,
        "Imported: {} added, {} updated, {} total",
        summary.added, summary.updated, summary.total
    )?;
    Ok(())
}

pub fn export(
    processor: &JapaneseProcessor,
    target: ExportTarget,
    output: Option<&Path>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let csv = match target {
        ExportTarget::Dictionary => processor.dictionary().export_csv()?,
        ExportTarget::Notebook => processor.notebook().export_csv()?,
    };

    match output {
        Some(path) => {
            fs::write(path, csv).with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Exported {:?} to {}", target, path.display());
        }
        None => out.write_all(csv.as_bytes())?,
    }
    Ok(())
}

pub fn notebook(
    processor: &mut JapaneseProcessor,
    command: NotebookCommands,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        NotebookCommands::List { limit } => {
            let view = match limit {
                Some(limit) => processor.notebook().view(limit),
                None => processor.view(),
            };

            for entry in view.entries {
                writeln!(out, "{}", entry_line(entry))?;
            }
            if view.hidden > 0 {
                writeln!(out, "... {} more", view.hidden)?;
            }
        }
        NotebookCommands::Clear => {
            processor.notebook_mut().clear();
            writeln!(out, "Notebook cleared")?;
        }
        NotebookCommands::Dedupe => {
            let removed = processor.notebook_mut().dedupe();
            writeln!(out, "Removed {removed} duplicate entries")?;
        }
    }
    Ok(())
}
