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

use super::ReportFormatter;
use crate::report::{label, ReportData};
use csv::{Terminator, WriterBuilder};

/// Comma separated values.
///
/// Title is a `#` comment line, info and summary are `LABEL,value` rows, and
/// the detail table follows its header row.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvFormatter;

impl CsvFormatter {
    /// Encodes one record, quoting fields that need it.
    fn record<I, T>(fields: I) -> String
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let mut writer = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        // Writing into a Vec cannot fail.
        if writer.write_record(fields).is_err() {
            return String::new();
        }
        let bytes = writer.into_inner().unwrap_or_default();
        let mut line = String::from_utf8_lossy(&bytes).into_owned();
        line.truncate(line.trim_end_matches('\n').len());
        line
    }
}

impl ReportFormatter for CsvFormatter {
    fn format(&self, data: &ReportData) -> String {
        let mut lines = vec![format!("# {}", data.title), String::new()];

        for (key, value) in data.info.iter() {
            lines.push(Self::record([label(key), value.to_string()]));
        }
        lines.push(String::new());

        let headers = data.headers();
        if !headers.is_empty() {
            lines.push(Self::record(&headers));
            for row in &data.data {
                lines.push(Self::record(headers.iter().map(|h| {
                    row.get(h).map(ToString::to_string).unwrap_or_default()
                })));
            }
        }

        if let Some(summary) = data.summary_entries() {
            lines.push(String::new());
            lines.push("SUMMARY".to_string());
            for (key, value) in summary.iter() {
                lines.push(Self::record([label(key), value.to_string()]));
            }
        }

        lines.join("\n")
    }

    fn extension(&self) -> &'static str {
        "csv"
    }

    fn display_name(&self) -> &'static str {
        "CSV (Comma Separated Values)"
    }
}
