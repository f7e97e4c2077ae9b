// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Plain-text approximations of paged and spreadsheet documents.

use super::{ReportFormatter, fit};
use crate::report::{label, ReportData};

const PAGE_WIDTH: usize = 80;
const INNER_WIDTH: usize = PAGE_WIDTH - 2;
const LABEL_WIDTH: usize = 30;
const VALUE_WIDTH: usize = 45;
const MIN_COLUMN: usize = 12;
const CELL_WIDTH: usize = 20;

/// Boxed, page-like layout saved with a `.pdf` extension.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfFormatter;

impl PdfFormatter {
    fn boxed_row(name: &str, value: &str) -> String {
        format!(
            "║ {} : {} ║",
            fit(name, LABEL_WIDTH),
            fit(value, VALUE_WIDTH)
        )
    }
}

impl ReportFormatter for PdfFormatter {
    fn format(&self, data: &ReportData) -> String {
        let rule = "═".repeat(INNER_WIDTH);
        let mut lines = vec![
            "%".repeat(PAGE_WIDTH),
            format!("%{}%", " ".repeat(INNER_WIDTH)),
            format!("% {:^76} %", data.title),
            format!("%{}%", " ".repeat(INNER_WIDTH)),
            "%".repeat(PAGE_WIDTH),
            String::new(),
        ];

        lines.push(format!("╔{rule}╗"));
        for (key, value) in data.info.iter() {
            lines.push(Self::boxed_row(&label(key), &value.to_string()));
        }
        lines.push(format!("╚{rule}╝"));
        lines.push(String::new());

        let headers = data.headers();
        if !headers.is_empty() {
            let width = MIN_COLUMN.max((INNER_WIDTH - 2) / headers.len());
            let border = |left: &str, mid: &str, right: &str| {
                let cells: Vec<String> = headers.iter().map(|_| "─".repeat(width)).collect();
                format!("{left}{}{right}", cells.join(mid))
            };

            lines.push(border("┌", "┬", "┐"));
            let cells: Vec<String> = headers.iter().map(|h| fit(h, width)).collect();
            lines.push(format!("│{}│", cells.join("│")));
            lines.push(border("├", "┼", "┤"));
            for row in &data.data {
                let cells: Vec<String> = headers
                    .iter()
                    .map(|h| fit(&row.get(h).map(ToString::to_string).unwrap_or_default(), width))
                    .collect();
                lines.push(format!("│{}│", cells.join("│")));
            }
            lines.push(border("└", "┴", "┘"));
        }

        if let Some(summary) = data.summary_entries() {
            lines.push(String::new());
            lines.push(format!("╔{rule}╗"));
            lines.push(format!("║ {:^76} ║", "EXECUTIVE SUMMARY"));
            lines.push(format!("╠{rule}╣"));
            for (key, value) in summary.iter() {
                lines.push(Self::boxed_row(&label(key), &value.as_currency()));
            }
            lines.push(format!("╚{rule}╝"));
        }

        lines.join("\n")
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn display_name(&self) -> &'static str {
        "PDF (Portable Document Format)"
    }
}

/// Sheet-per-section layout saved with a `.xlsx` extension.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExcelFormatter;

impl ReportFormatter for ExcelFormatter {
    fn format(&self, data: &ReportData) -> String {
        let heavy = "═".repeat(PAGE_WIDTH);
        let light = "─".repeat(PAGE_WIDTH);
        let mut lines = vec![
            heavy.clone(),
            format!("EXCEL FILE: {}", data.title),
            heavy.clone(),
            String::new(),
            "[SHEET 1: INFO]".to_string(),
            light.clone(),
        ];

        for (key, value) in data.info.iter() {
            lines.push(format!("  {} : {}", fit(&label(key), LABEL_WIDTH), value));
        }
        lines.push(String::new());

        let headers = data.headers();
        if !headers.is_empty() {
            lines.push("[SHEET 2: DETAIL]".to_string());
            lines.push(light.clone());

            let header_row = headers
                .iter()
                .map(|h| fit(h, CELL_WIDTH))
                .collect::<Vec<_>>()
                .join(" │ ");
            let underline = "─".repeat(header_row.chars().count());
            lines.push(header_row);
            lines.push(underline);

            for row in &data.data {
                let cells: Vec<String> = headers
                    .iter()
                    .map(|h| {
                        fit(
                            &row.get(h).map(ToString::to_string).unwrap_or_default(),
                            CELL_WIDTH,
                        )
                    })
                    .collect();
                lines.push(cells.join(" │ "));
            }
            lines.push(String::new());
        }

        if let Some(summary) = data.summary_entries() {
            lines.push("[SHEET 3: EXECUTIVE SUMMARY]".to_string());
            lines.push(light);
            for (key, value) in summary.iter() {
                lines.push(format!(
                    "  {} : {}",
                    fit(&label(key), LABEL_WIDTH),
                    value.as_currency()
                ));
            }
            lines.push(String::new());
        }

        lines.push(heavy);
        lines.join("\n")
    }

    fn extension(&self) -> &'static str {
        "xlsx"
    }

    fn display_name(&self) -> &'static str {
        "Excel (XLSX Spreadsheet)"
    }
}
