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

//! Billing service integration tests.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use solid_demo_rs::billing::{
    ApiInvoiceSender, BillingService, DatabaseInvoiceRepository, EmailInvoiceSender,
    FileInvoiceRepository, GeneratedDocument, Invoice, InvoiceGenerator, PdfInvoiceGenerator,
    WhatsAppInvoiceSender,
};
use solid_demo_rs::sink::{FsSink, MemorySink};
use solid_demo_rs::{InvoiceId, PipelineError};
use std::fs;
use std::sync::Arc;

fn invoice(id: &str, email: &str) -> Invoice {
    Invoice {
        id: InvoiceId::new(id),
        customer_email: email.to_string(),
        customer_name: "Ana Torres".to_string(),
        amount: dec!(1250.50),
        issued_on: NaiveDate::from_ymd_opt(2025, 5, 2).unwrap(),
    }
}

struct BrokenGenerator;

impl InvoiceGenerator for BrokenGenerator {
    fn generate(&self, _invoice: &Invoice) -> Result<GeneratedDocument, PipelineError> {
        Err(PipelineError::Validation("template missing".into()))
    }
}

#[test]
fn database_and_email() {
    let repository = Arc::new(DatabaseInvoiceRepository::new());
    let service = BillingService::new(
        PdfInvoiceGenerator,
        Arc::clone(&repository),
        EmailInvoiceSender,
    );

    let receipt = service.process_invoice(&invoice("A-1", "ana@mail.com")).unwrap();

    assert_eq!(receipt.document, "invoice_A-1.pdf");
    assert_eq!(receipt.channel, "Email");
    assert!(receipt.persisted);
    assert_eq!(
        repository.document_for(&InvoiceId::new("A-1")).as_deref(),
        Some("invoice_A-1.pdf")
    );
}

#[test]
fn file_repository_writes_document() {
    let tmp = tempfile::tempdir().unwrap();
    let service = BillingService::new(
        PdfInvoiceGenerator,
        FileInvoiceRepository::new(FsSink::new(tmp.path())),
        WhatsAppInvoiceSender,
    );

    let receipt = service.process_invoice(&invoice("B-7", "ana@mail.com")).unwrap();
    assert_eq!(receipt.channel, "WhatsApp");

    let content = fs::read_to_string(tmp.path().join("invoice_B-7.pdf")).unwrap();
    assert!(content.starts_with("INVOICE B-7\n"));
    assert!(content.contains("Customer: Ana Torres"));
    assert!(content.contains("Total: 1250.50"));
}

#[test]
fn unwritable_directory_still_sends() {
    let tmp = tempfile::tempdir().unwrap();
    let blocker = tmp.path().join("not-a-dir");
    fs::write(&blocker, b"file").unwrap();

    let service = BillingService::new(
        PdfInvoiceGenerator,
        FileInvoiceRepository::new(FsSink::new(&blocker)),
        ApiInvoiceSender,
    );

    let receipt = service.process_invoice(&invoice("C-3", "ana@mail.com")).unwrap();

    assert!(!receipt.persisted);
    assert_eq!(receipt.channel, "API");
}

#[test]
fn generator_failure_stops_pipeline() {
    let repository = Arc::new(DatabaseInvoiceRepository::new());
    let service = BillingService::new(
        BrokenGenerator,
        Arc::clone(&repository),
        EmailInvoiceSender,
    );

    let err = service.process_invoice(&invoice("D-1", "ana@mail.com")).unwrap_err();

    assert!(matches!(err, PipelineError::Validation(_)));
    assert!(repository.is_empty());
}

#[test]
fn sender_failure_keeps_saved_invoice() {
    let repository = Arc::new(DatabaseInvoiceRepository::new());
    let service = BillingService::new(
        PdfInvoiceGenerator,
        Arc::clone(&repository),
        EmailInvoiceSender,
    );

    let err = service.process_invoice(&invoice("E-9", "no-at-sign")).unwrap_err();

    assert!(matches!(err, PipelineError::Delivery { .. }));
    assert_eq!(repository.len(), 1);
}

#[test]
fn same_components_compose_freely() {
    let sink = Arc::new(MemorySink::new());
    let first = BillingService::new(
        PdfInvoiceGenerator,
        FileInvoiceRepository::new(Arc::clone(&sink)),
        EmailInvoiceSender,
    );
    let second = BillingService::new(
        PdfInvoiceGenerator,
        FileInvoiceRepository::new(Arc::clone(&sink)),
        ApiInvoiceSender,
    );

    first.process_invoice(&invoice("F-1", "a@b.c")).unwrap();
    second.process_invoice(&invoice("F-2", "a@b.c")).unwrap();

    assert_eq!(sink.names(), vec!["invoice_F-1.pdf", "invoice_F-2.pdf"]);
}
