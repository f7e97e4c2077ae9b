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
use crate::report::ReportData;

/// Pretty-printed JSON object: title, info fields, `data` and `summary`.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFormatter;

impl ReportFormatter for JsonFormatter {
    fn format(&self, data: &ReportData) -> String {
        // Only string keys and plain values are emitted, so this cannot fail.
        serde_json::to_string_pretty(data).unwrap_or_default()
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn display_name(&self) -> &'static str {
        "JSON (JavaScript Object Notation)"
    }
}
