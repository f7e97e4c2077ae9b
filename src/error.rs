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

//! Error types shared by every pipeline.

use rust_decimal::Decimal;
use std::path::Path;
use thiserror::Error;

/// Pipeline errors.
///
/// Validation and limit errors are normal business rejections: the payment
/// processor stores them in its history instead of returning them. The other
/// kinds are returned to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Strategy configuration is malformed or the amount is not positive
    #[error("validation failed: {0}")]
    Validation(String),

    /// Amount is above the ceiling of the selected strategy
    #[error("{method} limit exceeded: {amount} > {limit}")]
    LimitExceeded {
        method: String,
        limit: Decimal,
        amount: Decimal,
    },

    /// The role does not hold the capability required by the action
    #[error("role '{role}' cannot {action}")]
    PermissionDenied { role: String, action: String },

    /// Unrecognized report or data kind
    #[error("unknown kind: {0}")]
    UnknownKind(String),

    /// A delivery channel refused the message
    #[error("{channel} delivery failed: {reason}")]
    Delivery { channel: String, reason: String },

    /// Artifact could not be persisted
    #[error("failed to write {path}: {message}")]
    Io { path: String, message: String },
}

impl PipelineError {
    pub(crate) fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }

    pub(crate) fn delivery(channel: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Delivery {
            channel: channel.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: &Path, error: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            message: error.to_string(),
        }
    }

    /// Returns `true` for rejections that belong in a payment history rather
    /// than being raised.
    pub fn is_business_rejection(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::LimitExceeded { .. })
    }
}
