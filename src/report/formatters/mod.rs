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

//! Output formats for [`ReportData`].
//!
//! Formatting is pure and total: absent or empty `data` and `summary`
//! sections are left out, never an error.

mod html;
mod json;
mod tabular;
mod text;

pub use html::HtmlFormatter;
pub use json::JsonFormatter;
pub use tabular::CsvFormatter;
pub use text::{ExcelFormatter, PdfFormatter};

use super::ReportData;

pub trait ReportFormatter {
    fn format(&self, data: &ReportData) -> String;

    /// File extension without the dot.
    fn extension(&self) -> &'static str;

    fn display_name(&self) -> &'static str;
}

impl<F: ReportFormatter + ?Sized> ReportFormatter for Box<F> {
    fn format(&self, data: &ReportData) -> String {
        (**self).format(data)
    }

    fn extension(&self) -> &'static str {
        (**self).extension()
    }

    fn display_name(&self) -> &'static str {
        (**self).display_name()
    }
}

/// One instance of every built-in formatter.
pub fn all_formatters() -> Vec<Box<dyn ReportFormatter>> {
    vec![
        Box::new(CsvFormatter),
        Box::new(PdfFormatter),
        Box::new(ExcelFormatter),
        Box::new(HtmlFormatter),
        Box::new(JsonFormatter),
    ]
}

/// Truncates to `width` characters and pads with spaces.
fn fit(text: &str, width: usize) -> String {
    let truncated: String = text.chars().take(width).collect();
    format!("{truncated:<width$}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Fields, ReportData};

    #[test]
    fn fit_truncates_and_pads() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 3), "abc");
        assert_eq!(fit("año", 4), "año ");
    }

    #[test]
    fn extensions_are_distinct() {
        let formatters = all_formatters();
        let mut extensions: Vec<_> = formatters.iter().map(|f| f.extension()).collect();
        extensions.sort();
        assert_eq!(extensions, vec!["csv", "html", "json", "pdf", "xlsx"]);
    }

    /// Markers for the data and summary sections of each format.
    fn section_markers(extension: &str) -> (&'static str, &'static str) {
        match extension {
            "csv" => ("\nunits\n", "\nSUMMARY\n"),
            "pdf" => ("┌", "EXECUTIVE SUMMARY"),
            "xlsx" => ("[SHEET 2", "[SHEET 3"),
            "html" => ("<table>", "Executive Summary"),
            "json" => ("\"data\"", "\"summary\""),
            other => panic!("no markers for {other}"),
        }
    }

    #[test]
    fn header_only_report_omits_sections() {
        let mut header_only = ReportData::new("Empty Report");
        header_only.info.push("period", "March 2025");

        let mut full = header_only.clone();
        full.data.push(Fields::new().with("units", 5i64));
        full.summary = Some(Fields::new().with("total_units", 5i64));

        for formatter in all_formatters() {
            let name = formatter.display_name();
            let (data_marker, summary_marker) = section_markers(formatter.extension());

            let output = formatter.format(&full);
            assert!(output.contains(data_marker), "{name}: data marker missing");
            assert!(output.contains(summary_marker), "{name}: summary marker missing");

            let output = formatter.format(&header_only);
            assert!(output.contains("Empty Report"), "{name}");
            assert!(!output.contains(data_marker), "{name}: data section leaked");
            assert!(!output.contains(summary_marker), "{name}: summary section leaked");
        }
    }

    #[test]
    fn missing_cells_render_empty() {
        let mut data = ReportData::new("Ragged");
        data.data.push(Fields::new().with("a", "1").with("b", "2"));
        data.data.push(Fields::new().with("a", "3"));

        let csv = CsvFormatter.format(&data);
        assert!(csv.contains("\n3,\n") || csv.ends_with("\n3,"));
    }
}
