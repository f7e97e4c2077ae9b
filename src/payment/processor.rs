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

use super::PaymentMethod;
use crate::base::TransactionId;
use crate::PipelineError;
use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeStruct, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TransactionStatus {
    Succeeded,
    Failed,
}

/// One `process_payment` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    pub id: TransactionId,
    pub description: String,
    pub amount: Decimal,
    /// Name of the method active when the payment was attempted.
    pub method: String,
    pub status: TransactionStatus,
    /// Why the payment failed, `None` on success.
    pub reason: Option<PipelineError>,
}

impl TransactionRecord {
    const DECIMAL_PRECISION: u32 = 2;

    pub fn succeeded(&self) -> bool {
        self.status == TransactionStatus::Succeeded
    }
}

impl Serialize for TransactionRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("TransactionRecord", 6)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field(
            "amount",
            &self.amount.round_dp(TransactionRecord::DECIMAL_PRECISION),
        )?;
        state.serialize_field("method", &self.method)?;
        state.serialize_field("status", &self.status)?;
        state.serialize_field(
            "reason",
            &self.reason.as_ref().map(ToString::to_string).unwrap_or_default(),
        )?;
        state.end()
    }
}

/// Runs payments through the active method and keeps an append-only history.
///
/// The processor owns its method and its history; share it across threads
/// only behind external synchronization.
pub struct PaymentProcessor {
    method: Box<dyn PaymentMethod>,
    history: Vec<TransactionRecord>,
}

impl PaymentProcessor {
    pub fn new(method: impl PaymentMethod + 'static) -> Self {
        Self {
            method: Box::new(method),
            history: Vec::new(),
        }
    }

    /// Replaces the active method. Only later payments are affected.
    pub fn change_method(&mut self, method: impl PaymentMethod + 'static) {
        let previous = self.method.name();
        self.method = Box::new(method);
        tracing::info!(from = %previous, to = %self.method.name(), "payment method changed");
    }

    pub fn method_name(&self) -> String {
        self.method.name()
    }

    pub fn method(&self) -> &dyn PaymentMethod {
        self.method.as_ref()
    }

    /// Attempts a payment and records the attempt.
    ///
    /// # Steps
    ///
    /// | Step | Failure |
    /// |------|---------|
    /// | Validate method configuration | Validation |
    /// | Amount must be positive | Validation |
    /// | Method ceiling | LimitExceeded |
    /// | Charge | method specific |
    ///
    /// The checks run inside [`PaymentMethod::pay`], which calls
    /// [`PaymentMethod::authorize`] before charging.
    ///
    /// Failures never escape: they are stored on the history entry and the
    /// call returns `false`. Exactly one entry is appended per call, until
    /// the history holds `u32::MAX` entries; after that the payment is
    /// refused without charging and nothing is recorded.
    pub fn process_payment(&mut self, amount: Decimal, description: impl Into<String>) -> bool {
        let description = description.into();
        let method = self.method.name();

        let Some(id) = next_id(self.history.len()) else {
            tracing::error!(%amount, %method, %description, "payment history is full");
            return false;
        };
        tracing::debug!(%id, %amount, %method, %description, "processing payment");

        let outcome = self.method.pay(amount);

        let (status, reason) = match outcome {
            Ok(()) => {
                tracing::info!(%amount, %method, "payment succeeded");
                (TransactionStatus::Succeeded, None)
            }
            Err(e) => {
                tracing::warn!(%amount, %method, error = %e, "payment failed");
                (TransactionStatus::Failed, Some(e))
            }
        };

        self.history.push(TransactionRecord {
            id,
            description,
            amount,
            method,
            status,
            reason,
        });

        status == TransactionStatus::Succeeded
    }

    pub fn history(&self) -> &[TransactionRecord] {
        &self.history
    }

    pub fn last(&self) -> Option<&TransactionRecord> {
        self.history.last()
    }

    pub fn succeeded(&self) -> usize {
        self.history.iter().filter(|r| r.succeeded()).count()
    }

    pub fn failed(&self) -> usize {
        self.history.len() - self.succeeded()
    }

    /// Sum of the amounts that went through.
    pub fn total_paid(&self) -> Decimal {
        self.history
            .iter()
            .filter(|r| r.succeeded())
            .map(|r| r.amount)
            .sum()
    }
}

/// Id for the entry following `len` existing ones.
fn next_id(len: usize) -> Option<TransactionId> {
    len.checked_add(1)
        .and_then(|n| u32::try_from(n).ok())
        .map(TransactionId)
}
