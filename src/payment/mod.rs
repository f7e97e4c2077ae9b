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

//! Payment processing with interchangeable payment methods.
//!
//! A [`PaymentMethod`] validates its own configuration and enforces its own
//! ceiling. The [`PaymentProcessor`] runs one method at a time and records
//! every attempt, successful or not, in its history.

mod methods;
mod processor;

pub use methods::{BankTransferPayment, CreditCardPayment, CryptoPayment, PayPalPayment};
pub use processor::{PaymentProcessor, TransactionRecord, TransactionStatus};

use crate::PipelineError;
use rust_decimal::Decimal;
use serde::Serialize;

/// Display metadata for a payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentInfo {
    pub method: String,
    /// Ordered `(label, value)` pairs, e.g. masked card number.
    pub details: Vec<(String, String)>,
}

impl PaymentInfo {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            details: Vec::new(),
        }
    }

    pub fn with(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.push((label.into(), value.into()));
        self
    }

    pub fn detail(&self, label: &str) -> Option<&str> {
        self.details
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }
}

/// A way of paying.
pub trait PaymentMethod {
    /// Human-readable name stored in history entries.
    fn name(&self) -> String;

    /// Checks the method's configuration (card number, wallet, ...).
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Validation`] when the configuration is unusable.
    fn validate(&self) -> Result<(), PipelineError>;

    /// Largest amount a single payment may carry, if any.
    fn limit(&self) -> Option<Decimal> {
        None
    }

    /// Charges `amount`.
    ///
    /// Implementations call [`PaymentMethod::authorize`] first.
    fn pay(&mut self, amount: Decimal) -> Result<(), PipelineError>;

    fn info(&self) -> PaymentInfo;

    /// Runs the checks shared by every method: configuration, positive
    /// amount, ceiling.
    fn authorize(&self, amount: Decimal) -> Result<(), PipelineError> {
        self.validate()?;
        if amount <= Decimal::ZERO {
            return Err(PipelineError::validation("amount must be greater than zero"));
        }
        if let Some(limit) = self.limit() {
            if amount > limit {
                return Err(PipelineError::LimitExceeded {
                    method: self.name(),
                    limit,
                    amount,
                });
            }
        }
        Ok(())
    }
}

impl<M: PaymentMethod + ?Sized> PaymentMethod for Box<M> {
    fn name(&self) -> String {
        (**self).name()
    }

    fn validate(&self) -> Result<(), PipelineError> {
        (**self).validate()
    }

    fn limit(&self) -> Option<Decimal> {
        (**self).limit()
    }

    fn pay(&mut self, amount: Decimal) -> Result<(), PipelineError> {
        (**self).pay(amount)
    }

    fn info(&self) -> PaymentInfo {
        (**self).info()
    }
}
