use std::io::Write;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use super::aggregator::{RankedAuthor, Totals};
use crate::error::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    #[default]
    Tabular,
    Csv,
    Json,
    JsonLines,
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    name: &'a str,
    lines: usize,
    commits: usize,
    files: usize,
}

impl<'a> From<&'a RankedAuthor> for JsonEntry<'a> {
    fn from(a: &'a RankedAuthor) -> Self {
        JsonEntry {
            name: &a.name,
            lines: a.stats.lines,
            commits: a.stats.commits,
            files: a.stats.files,
        }
    }
}

pub fn write_report<W: Write>(
    out: &mut W,
    format: Format,
    authors: &[RankedAuthor],
    totals: &Totals,
) -> Result<()> {
    match format {
        Format::Tabular => write_table(out, authors, totals),
        Format::Csv => write_csv(out, authors),
        Format::Json => {
            let entries: Vec<JsonEntry> = authors.iter().map(JsonEntry::from).collect();
            serde_json::to_writer(&mut *out, &entries)?;
            writeln!(out)?;
            Ok(())
        }
        Format::JsonLines => {
            for author in authors {
                serde_json::to_writer(&mut *out, &JsonEntry::from(author))?;
                writeln!(out)?;
            }
            Ok(())
        }
    }
}

fn write_table<W: Write>(out: &mut W, authors: &[RankedAuthor], totals: &Totals) -> Result<()> {
    if authors.is_empty() {
        writeln!(out, "No authors found.")?;
        return Ok(());
    }

    let name_width = authors
        .iter()
        .map(|a| a.name.width())
        .max()
        .unwrap_or(4)
        .max(4);
    // 1 + name + 1 + lines(9) + 1 + commits(8) + 1 + files(6)
    let separator = "\u{2500}".repeat(name_width + 27);

    writeln!(
        out,
        " {} {:>9} {:>8} {:>6}",
        pad("Name", name_width),
        "Lines",
        "Commits",
        "Files"
    )?;
    writeln!(out, "{separator}")?;
    for a in authors {
        writeln!(
            out,
            " {} {:>9} {:>8} {:>6}",
            pad(&a.name, name_width),
            a.stats.lines,
            a.stats.commits,
            a.stats.files
        )?;
    }
    writeln!(out, "{separator}")?;
    writeln!(
        out,
        " Total: {} lines, {} commits, {} files",
        totals.lines, totals.commits, totals.files
    )?;
    Ok(())
}

/// Left-align by display width; `{:<w$}` counts chars, not columns.
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

fn write_csv<W: Write>(out: &mut W, authors: &[RankedAuthor]) -> Result<()> {
    writeln!(out, "Name,Lines,Commits,Files")?;
    for a in authors {
        writeln!(
            out,
            "{},{},{},{}",
            csv_field(&a.name),
            a.stats.lines,
            a.stats.commits,
            a.stats.files
        )?;
    }
    Ok(())
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
