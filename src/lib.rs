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

//! # SOLID Demo
//!
//! Five small business pipelines built on one shape: a service holds one or
//! more interchangeable strategies behind a trait and never branches on the
//! concrete type. All external effects (documents, e-mail, banks, chains) are
//! simulated and reported through `tracing`.
//!
//! ## Core Components
//!
//! - [`billing::BillingService`]: generate → save → send for invoices
//! - [`payment::PaymentProcessor`]: validated payments with a swappable method
//!   and an append-only history
//! - [`notification::MultiChannelNotificationService`]: best-effort fan-out
//!   over delivery channels
//! - [`report::ReportProcessor`]: report data rendered by any formatter
//! - [`permission`]: capability checks for role-based use cases
//! - [`PipelineError`]: error kinds shared by every pipeline
//!
//! ## Example
//!
//! ```
//! use solid_demo_rs::payment::{BankTransferPayment, CreditCardPayment, PaymentProcessor};
//! use rust_decimal_macros::dec;
//!
//! let mut processor = PaymentProcessor::new(CreditCardPayment::default());
//! assert!(processor.process_payment(dec!(230.00), "Laptop"));
//!
//! // Swap the method; history keeps the old name.
//! processor.change_method(BankTransferPayment::default());
//! assert!(!processor.process_payment(dec!(15000.00), "Over the transfer limit"));
//!
//! assert_eq!(processor.history()[0].method, "Credit card");
//! assert_eq!(processor.failed(), 1);
//! ```
//!
//! ## Thread Safety
//!
//! Services are single-owner values. Strategies that keep state (the payment
//! history, the in-memory invoice table) mutate it only through their owning
//! service; wrap a service in a lock or give it to one task if it must be
//! shared.

mod base;
pub mod billing;
pub mod error;
pub mod notification;
pub mod payment;
pub mod permission;
pub mod report;
pub mod sink;

pub use base::{InvoiceId, TransactionId};
pub use error::PipelineError;
