//! Output formatting for load summaries.
//!
//! JSON and plain-text renderings of a [`LoadSummary`]. Colors belong to
//! whatever front end prints them.

use std::io::Write;

use crate::report::LoadSummary;

/// Format a `LoadSummary` as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(summary: &LoadSummary, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Format a `LoadSummary` as human-readable plain text to a writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(summary: &LoadSummary, writer: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer, "  SIGNER LOADER")?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer)?;
    writeln!(writer, "  Directory:   {}", summary.directory.display())?;
    writeln!(writer, "  Candidates:  {}", summary.candidates)?;
    writeln!(writer, "  Loaded:      {}", summary.loaded)?;
    writeln!(writer, "  Failed:      {}", summary.failed)?;
    writeln!(writer)?;

    if !summary.identifiers.is_empty() {
        writeln!(writer, "{}", "-".repeat(80))?;
        writeln!(writer, "  LOADED SIGNERS")?;
        writeln!(writer, "{}", "-".repeat(80))?;
        for identifier in &summary.identifiers {
            writeln!(writer, "  {identifier}")?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "{}", "=".repeat(80))?;
    if summary.candidates == 0 {
        writeln!(writer, "  No signer metadata files found")?;
    } else if summary.ok {
        writeln!(
            writer,
            "\u{2713} All {} signer metadata file(s) loaded",
            summary.candidates
        )?;
    } else {
        writeln!(
            writer,
            "\u{2717} {} of {} signer metadata file(s) failed to load; see the error log",
            summary.failed, summary.candidates
        )?;
    }
    writeln!(writer, "{}", "=".repeat(80))?;

    Ok(())
}
