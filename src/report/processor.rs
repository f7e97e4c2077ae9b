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

use super::{DataGenerator, ReportData, ReportFormatter, ReportKind};
use crate::sink::ArtifactSink;
use crate::PipelineError;
use std::path::PathBuf;

/// Fetches report data and hands it to a formatter.
///
/// The processor never looks at the concrete formatter; any
/// [`ReportFormatter`] works.
#[derive(Debug, Clone)]
pub struct ReportProcessor {
    generator: DataGenerator,
}

impl ReportProcessor {
    pub fn new(generator: DataGenerator) -> Self {
        Self { generator }
    }

    /// Looks up the data for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::UnknownKind`] for anything other than
    /// `sales`, `inventory`, `customer` or `summary`.
    pub fn data(&self, kind: &str) -> Result<ReportData, PipelineError> {
        let kind: ReportKind = kind.parse()?;
        Ok(self.generator.generate(kind))
    }

    pub fn generate_report(
        &self,
        formatter: &dyn ReportFormatter,
        kind: &str,
    ) -> Result<String, PipelineError> {
        let data = self.data(kind)?;
        tracing::debug!(%kind, format = formatter.extension(), "formatting report");
        Ok(formatter.format(&data))
    }

    /// Renders the same data with every formatter, keyed by display name.
    pub fn generate_multi_format<F: ReportFormatter>(
        &self,
        formatters: &[F],
        kind: &str,
    ) -> Result<Vec<(&'static str, String)>, PipelineError> {
        let data = self.data(kind)?;
        Ok(formatters
            .iter()
            .map(|f| (f.display_name(), f.format(&data)))
            .collect())
    }

    /// Renders a report and stores it as `{basename}.{extension}`.
    ///
    /// A failed write is logged and yields `Ok(None)`; it is not an error for
    /// the caller.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::UnknownKind`] for an unrecognized kind.
    pub fn save_report(
        &self,
        formatter: &dyn ReportFormatter,
        sink: &dyn ArtifactSink,
        basename: &str,
        kind: &str,
    ) -> Result<Option<PathBuf>, PipelineError> {
        let report = self.generate_report(formatter, kind)?;
        let filename = format!("{basename}.{}", formatter.extension());

        match sink.save(&filename, report.as_bytes()) {
            Ok(path) => {
                tracing::info!(path = %path.display(), "report saved");
                Ok(Some(path))
            }
            Err(e) => {
                tracing::warn!(%filename, error = %e, "report not saved");
                Ok(None)
            }
        }
    }

    pub fn available_formats<F: ReportFormatter>(formatters: &[F]) -> Vec<&'static str> {
        formatters.iter().map(|f| f.display_name()).collect()
    }
}
