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

use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use csv::{ReaderBuilder, Trim, Writer};
use rust_decimal::Decimal;
use serde::Deserialize;
use solid_demo_rs::billing::{
    ApiInvoiceSender, BillingService, DatabaseInvoiceRepository, EmailInvoiceSender,
    FileInvoiceRepository, Invoice, PdfInvoiceGenerator, WhatsAppInvoiceSender,
};
use solid_demo_rs::notification::{
    EmailNotifier, MultiChannelNotificationService, NotificationService, Notifier, PushNotifier,
    SlackNotifier, SmsNotifier,
};
use solid_demo_rs::payment::{
    BankTransferPayment, CreditCardPayment, CryptoPayment, PayPalPayment, PaymentMethod,
    PaymentProcessor,
};
use solid_demo_rs::permission::{self, Role, User};
use solid_demo_rs::report::{
    CsvFormatter, DataGenerator, ExcelFormatter, HtmlFormatter, JsonFormatter, PdfFormatter,
    ReportFormatter, ReportProcessor, all_formatters,
};
use solid_demo_rs::sink::{FsSink, MemorySink};
use solid_demo_rs::{InvoiceId, PipelineError};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "solid-demo")]
#[command(about = "Strategy pipelines for billing, payments, notifications, reports and roles", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Process a demo invoice with three service compositions
    Billing {
        /// Directory for the file repository (kept in memory when omitted)
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },
    /// Run payments and print the transaction history as CSV
    Payments {
        /// CSV with columns method,amount,description
        ///
        /// method is one of: card, paypal, bank, crypto
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },
    /// Send a notification
    Notify {
        #[arg(long)]
        to: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        #[arg(long, value_enum, default_value_t = Channel::All)]
        channel: Channel,
    },
    /// Render a business report
    Report {
        /// sales, inventory, customer or summary
        #[arg(long, default_value = "sales")]
        kind: String,
        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,
        /// Seed for the sample data
        #[arg(long)]
        seed: Option<u64>,
        /// Also save the report(s) in this directory
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },
    /// Exercise the role permission gate
    Permissions,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Channel {
    Email,
    Sms,
    Push,
    Slack,
    All,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Csv,
    Pdf,
    Excel,
    Html,
    Json,
    All,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let result = match args.command {
        Command::Billing { out_dir } => run_billing(out_dir),
        Command::Payments { input } => run_payments(input),
        Command::Notify {
            to,
            title,
            body,
            channel,
        } => run_notify(&to, &title, &body, channel),
        Command::Report {
            kind,
            format,
            seed,
            out_dir,
        } => run_report(&kind, format, seed, out_dir),
        Command::Permissions => {
            run_permissions();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_billing(out_dir: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let invoice = Invoice {
        id: InvoiceId::new("A-1001"),
        customer_email: "client@email.com".to_string(),
        customer_name: "Demo Client".to_string(),
        amount: Decimal::new(250_000, 0),
        issued_on: Local::now().date_naive(),
    };

    let services = [
        BillingService::new(PdfInvoiceGenerator, DatabaseInvoiceRepository::new(), EmailInvoiceSender),
        BillingService::new(
            PdfInvoiceGenerator,
            DatabaseInvoiceRepository::new(),
            WhatsAppInvoiceSender,
        ),
        match out_dir {
            Some(dir) => BillingService::new(
                PdfInvoiceGenerator,
                FileInvoiceRepository::new(FsSink::new(dir)),
                ApiInvoiceSender,
            ),
            None => BillingService::new(
                PdfInvoiceGenerator,
                FileInvoiceRepository::new(MemorySink::new()),
                ApiInvoiceSender,
            ),
        },
    ];

    for service in &services {
        let receipt = service.process_invoice(&invoice)?;
        println!(
            "{} -> {} via {} (persisted: {})",
            receipt.invoice_id, receipt.document, receipt.channel, receipt.persisted
        );
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct CsvPayment {
    method: String,
    amount: Decimal,
    #[serde(default)]
    description: String,
}

fn parse_method(name: &str) -> Result<Box<dyn PaymentMethod>, PipelineError> {
    match name.to_lowercase().as_str() {
        "card" => Ok(Box::new(CreditCardPayment::default())),
        "paypal" => Ok(Box::new(PayPalPayment::default())),
        "bank" => Ok(Box::new(BankTransferPayment::default())),
        "crypto" => Ok(Box::new(CryptoPayment::default())),
        other => Err(PipelineError::UnknownKind(other.to_string())),
    }
}

/// Runs every row through one processor, swapping the method when it changes.
pub fn process_payments<R: Read>(reader: R) -> Result<PaymentProcessor, csv::Error> {
    let mut processor: Option<PaymentProcessor> = None;
    let mut current = String::new();

    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    for result in rdr.deserialize::<CsvPayment>() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed row");
                continue;
            }
        };

        let name = record.method.to_lowercase();
        if processor.is_none() || name != current {
            let method = match parse_method(&name) {
                Ok(method) => method,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping row with unknown method");
                    continue;
                }
            };
            match processor.as_mut() {
                Some(p) => p.change_method(method),
                None => processor = Some(PaymentProcessor::new(method)),
            }
            current = name;
        }

        if let Some(p) = processor.as_mut() {
            p.process_payment(record.amount, record.description);
        }
    }

    Ok(processor.unwrap_or_else(|| PaymentProcessor::new(CreditCardPayment::default())))
}

fn demo_payments() -> PaymentProcessor {
    let mut processor = PaymentProcessor::new(CreditCardPayment::new("****-****-****-4532", "Juan García"));
    processor.process_payment(Decimal::new(23_000, 2), "Laptop purchase");

    processor.change_method(PayPalPayment::new("client@gmail.com"));
    processor.process_payment(Decimal::new(9_999, 2), "Software purchase");

    processor.change_method(BankTransferPayment::default());
    processor.process_payment(Decimal::new(150_000, 2), "Supplier payment");

    processor.change_method(CryptoPayment::new("0x1A2B3C4D5E6F7G8H...", "Bitcoin"));
    processor.process_payment(Decimal::new(50_000, 2), "Digital assets");

    processor.change_method(CreditCardPayment::new("123", "User"));
    processor.process_payment(Decimal::new(10_000, 2), "Invalid card attempt");

    processor.change_method(CreditCardPayment::default());
    processor.process_payment(Decimal::new(-5_000, 2), "Negative amount attempt");

    processor.change_method(BankTransferPayment::default());
    processor.process_payment(Decimal::new(1_500_000, 2), "Over the transfer limit");

    processor
}

pub fn write_history<W: Write>(processor: &PaymentProcessor, writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);
    for record in processor.history() {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

fn run_payments(input: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let processor = match input {
        Some(path) => {
            let file = File::open(&path)
                .map_err(|e| format!("opening '{}': {}", path.display(), e))?;
            process_payments(BufReader::new(file))?
        }
        None => demo_payments(),
    };

    write_history(&processor, std::io::stdout())?;
    tracing::info!(
        succeeded = processor.succeeded(),
        failed = processor.failed(),
        total = %processor.total_paid(),
        "payments processed"
    );
    Ok(())
}

fn run_notify(to: &str, title: &str, body: &str, channel: Channel) -> Result<(), Box<dyn std::error::Error>> {
    let notifier: Box<dyn Notifier> = match channel {
        Channel::Email => Box::new(EmailNotifier),
        Channel::Sms => Box::new(SmsNotifier),
        Channel::Push => Box::new(PushNotifier),
        Channel::Slack => Box::new(SlackNotifier),
        Channel::All => {
            let report = MultiChannelNotificationService::all_channels().notify_all(to, title, body);
            println!("delivered: {}", report.delivered.join(", "));
            for (channel, error) in &report.failed {
                println!("failed: {channel}: {error}");
            }
            return Ok(());
        }
    };

    NotificationService::new(notifier).notify(to, title, body)?;
    println!("delivered");
    Ok(())
}

fn run_report(
    kind: &str,
    format: Format,
    seed: Option<u64>,
    out_dir: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let generator = match seed {
        Some(seed) => DataGenerator::new(Local::now().naive_local(), seed),
        None => DataGenerator::default(),
    };
    let processor = ReportProcessor::new(generator);

    let formatters: Vec<Box<dyn ReportFormatter>> = match format {
        Format::Csv => vec![Box::new(CsvFormatter)],
        Format::Pdf => vec![Box::new(PdfFormatter)],
        Format::Excel => vec![Box::new(ExcelFormatter)],
        Format::Html => vec![Box::new(HtmlFormatter)],
        Format::Json => vec![Box::new(JsonFormatter)],
        Format::All => all_formatters(),
    };

    for (name, report) in processor.generate_multi_format(&formatters, kind)? {
        println!("== {name}");
        println!("{report}");
    }

    if let Some(dir) = out_dir {
        let sink = FsSink::new(dir);
        for formatter in &formatters {
            processor.save_report(formatter.as_ref(), &sink, kind, kind)?;
        }
    }
    Ok(())
}

fn run_permissions() {
    let users = [
        User::new("alice", Role::admin()),
        User::new("bob", Role::client()),
        User::new("carol", Role::guest()),
        User::new("dave", Role::moderator()),
    ];
    let [admin, client, guest, moderator] = &users;

    let attempts = [
        permission::show_catalog(admin),
        permission::show_catalog(client),
        permission::show_catalog(guest),
        permission::show_catalog(moderator),
        permission::create_user(admin, "new_user"),
        permission::purchase(client, "P-001", 2),
        permission::purchase(guest, "P-002", 1),
        permission::delete_user(moderator, "spam_user"),
        permission::create_user(moderator, "other_user"),
        permission::purchase(moderator, "P-999", 1),
    ];

    for attempt in attempts {
        match attempt {
            Ok(message) => println!("{message}"),
            Err(e) => println!("Permission denied: {e}"),
        }
    }
}
