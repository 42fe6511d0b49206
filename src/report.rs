//! Listing of registered applications for `avm-list`.
//!
//! The text layout is the fixed-width table users already script against:
//! 115-column rules around `Application`, `Version`, `Default`, and
//! `Executable` columns. Rows carry the raw `ExeFilePath`; no layout rewrites
//! or existence checks are applied when listing.

use crate::registry::Registry;
use serde::Serialize;
use tracing::debug;

const RULE_WIDTH: usize = 115;
const DEFAULT_MARK: &str = "*";

/// Which versions a listing includes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Selection {
    AllVersions,
    DefaultsOnly,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
/// One listed application version.
pub struct ReportRow {
    pub application: String,
    pub version: String,
    pub is_default: bool,
    pub executable: String,
    pub install_dir: String,
    pub platform: String,
}

/// Rows for `registry`, in document order.
pub fn collect_rows(registry: &Registry, selection: Selection) -> Vec<ReportRow> {
    let mut rows = Vec::new();
    for (name, entry) in registry.iter() {
        for record in entry.records() {
            if selection == Selection::DefaultsOnly && !record.is_default {
                debug!(
                    "Skipping non-default application/version '{name}'/'{}'",
                    record.version
                );
                continue;
            }
            rows.push(ReportRow {
                application: name.to_string(),
                version: record.version.to_string(),
                is_default: record.is_default,
                executable: record.exe_path.clone(),
                install_dir: record.install_dir.clone(),
                platform: record.platform.clone(),
            });
        }
    }
    rows
}

/// Render rows as the fixed-width text table.
pub fn render_table(rows: &[ReportRow]) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let mut lines = vec![
        heavy.clone(),
        table_line("Application", "Version", "Default", "Executable"),
        "-".repeat(RULE_WIDTH),
    ];
    lines.extend(rows.iter().map(|row| {
        let mark = if row.is_default { DEFAULT_MARK } else { "" };
        table_line(&row.application, &row.version, mark, &row.executable)
    }));
    lines.push(heavy);

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn table_line(application: &str, version: &str, default: &str, executable: &str) -> String {
    format!("{application:20} {version:10} {default:8} {executable}")
}
