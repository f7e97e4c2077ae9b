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

//! Invoice billing: generate a document, persist it, send it.
//!
//! [`BillingService`] only knows the three capability traits, so the
//! document format, storage backend and delivery channel can be swapped
//! independently.

use crate::base::InvoiceId;
use crate::sink::ArtifactSink;
use crate::PipelineError;
use chrono::NaiveDate;
use dashmap::DashMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub customer_email: String,
    pub customer_name: String,
    pub amount: Decimal,
    pub issued_on: NaiveDate,
}

/// A rendered invoice document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub filename: String,
    pub content: Vec<u8>,
}

pub trait InvoiceGenerator {
    fn generate(&self, invoice: &Invoice) -> Result<GeneratedDocument, PipelineError>;
}

pub trait InvoiceRepository {
    fn save(&self, invoice: &Invoice, document: &GeneratedDocument) -> Result<(), PipelineError>;
}

pub trait InvoiceSender {
    /// Channel name used in traces and receipts.
    fn channel(&self) -> &'static str;

    fn send(&self, invoice: &Invoice, document: &GeneratedDocument) -> Result<(), PipelineError>;
}

/// Renders invoices as plain-text "PDF" documents.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfInvoiceGenerator;

impl InvoiceGenerator for PdfInvoiceGenerator {
    fn generate(&self, invoice: &Invoice) -> Result<GeneratedDocument, PipelineError> {
        let filename = format!("invoice_{}.pdf", invoice.id);
        let body = format!(
            "INVOICE {}\nCustomer: {}\nDate: {}\nTotal: {}\n",
            invoice.id, invoice.customer_name, invoice.issued_on, invoice.amount
        );
        tracing::debug!(invoice = %invoice.id, %filename, "invoice document generated");
        Ok(GeneratedDocument {
            filename,
            content: body.into_bytes(),
        })
    }
}

#[derive(Debug, Clone)]
struct StoredInvoice {
    invoice: Invoice,
    filename: String,
}

/// In-memory invoice table keyed by invoice ID.
///
/// Saving an invoice twice replaces the earlier row.
#[derive(Debug, Default)]
pub struct DatabaseInvoiceRepository {
    rows: DashMap<InvoiceId, StoredInvoice>,
}

impl DatabaseInvoiceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Document filename stored for `id`.
    pub fn document_for(&self, id: &InvoiceId) -> Option<String> {
        self.rows.get(id).map(|row| row.filename.clone())
    }

    pub fn invoice(&self, id: &InvoiceId) -> Option<Invoice> {
        self.rows.get(id).map(|row| row.invoice.clone())
    }
}

impl InvoiceRepository for DatabaseInvoiceRepository {
    fn save(&self, invoice: &Invoice, document: &GeneratedDocument) -> Result<(), PipelineError> {
        tracing::info!(
            invoice = %invoice.id,
            document = %document.filename,
            "[DB] saving invoice"
        );
        self.rows.insert(
            invoice.id.clone(),
            StoredInvoice {
                invoice: invoice.clone(),
                filename: document.filename.clone(),
            },
        );
        Ok(())
    }
}

/// Writes invoice documents through an [`ArtifactSink`].
pub struct FileInvoiceRepository<S> {
    sink: S,
}

impl<S: ArtifactSink> FileInvoiceRepository<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S: ArtifactSink> InvoiceRepository for FileInvoiceRepository<S> {
    fn save(&self, _invoice: &Invoice, document: &GeneratedDocument) -> Result<(), PipelineError> {
        let path = self.sink.save(&document.filename, &document.content)?;
        tracing::info!(path = %path.display(), "[File] invoice document stored");
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EmailInvoiceSender;

impl InvoiceSender for EmailInvoiceSender {
    fn channel(&self) -> &'static str {
        "Email"
    }

    fn send(&self, invoice: &Invoice, document: &GeneratedDocument) -> Result<(), PipelineError> {
        if !invoice.customer_email.contains('@') {
            return Err(PipelineError::delivery(
                self.channel(),
                format!("invalid email address '{}'", invoice.customer_email),
            ));
        }
        tracing::info!(
            to = %invoice.customer_email,
            customer = %invoice.customer_name,
            "[Email] sending {}",
            document.filename
        );
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct WhatsAppInvoiceSender;

impl InvoiceSender for WhatsAppInvoiceSender {
    fn channel(&self) -> &'static str {
        "WhatsApp"
    }

    fn send(&self, invoice: &Invoice, document: &GeneratedDocument) -> Result<(), PipelineError> {
        tracing::info!(
            customer = %invoice.customer_name,
            "[WhatsApp] sending link to {}",
            document.filename
        );
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ApiInvoiceSender;

impl InvoiceSender for ApiInvoiceSender {
    fn channel(&self) -> &'static str {
        "API"
    }

    fn send(&self, invoice: &Invoice, document: &GeneratedDocument) -> Result<(), PipelineError> {
        tracing::info!("[API] POST /invoices -> {} with {}", invoice.id, document.filename);
        Ok(())
    }
}

/// What happened to one invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingReceipt {
    pub invoice_id: InvoiceId,
    pub document: String,
    /// `false` when the repository failed; the invoice was still sent.
    pub persisted: bool,
    pub channel: &'static str,
}

/// Runs generate → save → send for each invoice.
pub struct BillingService {
    generator: Box<dyn InvoiceGenerator>,
    repository: Box<dyn InvoiceRepository>,
    sender: Box<dyn InvoiceSender>,
}

impl BillingService {
    pub fn new(
        generator: impl InvoiceGenerator + 'static,
        repository: impl InvoiceRepository + 'static,
        sender: impl InvoiceSender + 'static,
    ) -> Self {
        Self {
            generator: Box::new(generator),
            repository: Box::new(repository),
            sender: Box::new(sender),
        }
    }

    /// Processes one invoice.
    ///
    /// A repository failure is logged and reflected in
    /// [`BillingReceipt::persisted`]; sending still happens. Nothing is rolled
    /// back when a later step fails.
    ///
    /// # Errors
    ///
    /// Returns the generator's or the sender's error.
    pub fn process_invoice(&self, invoice: &Invoice) -> Result<BillingReceipt, PipelineError> {
        let document = self.generator.generate(invoice)?;

        let persisted = match self.repository.save(invoice, &document) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(invoice = %invoice.id, error = %e, "invoice not persisted");
                false
            }
        };

        self.sender.send(invoice, &document)?;

        Ok(BillingReceipt {
            invoice_id: invoice.id.clone(),
            document: document.filename,
            persisted,
            channel: self.sender.channel(),
        })
    }
}

/// Shared handles let callers inspect a strategy after handing it to a
/// service.
impl<R: InvoiceRepository + ?Sized> InvoiceRepository for Arc<R> {
    fn save(&self, invoice: &Invoice, document: &GeneratedDocument) -> Result<(), PipelineError> {
        (**self).save(invoice, document)
    }
}

impl<T: InvoiceSender + ?Sized> InvoiceSender for Arc<T> {
    fn channel(&self) -> &'static str {
        (**self).channel()
    }

    fn send(&self, invoice: &Invoice, document: &GeneratedDocument) -> Result<(), PipelineError> {
        (**self).send(invoice, document)
    }
}
