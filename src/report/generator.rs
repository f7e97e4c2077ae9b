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

use super::{Fields, ReportData, ReportKind};
use chrono::{Duration, Local, NaiveDateTime};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

const PRODUCTS: [&str; 5] = ["Laptop", "Monitor", "Keyboard", "Mouse", "Webcam"];
const REGIONS: [&str; 3] = ["Region A", "Region B", "Region C"];
const SALES_ROWS: i64 = 10;
const CUSTOMER_ROWS: i64 = 8;

/// Builds sample business data for reports.
///
/// Output depends only on the report date and the seed: the same generator
/// returns the same data for a kind every time, so a summary agrees with the
/// individual reports it aggregates.
#[derive(Debug, Clone)]
pub struct DataGenerator {
    report_date: NaiveDateTime,
    company_name: String,
    seed: u64,
}

impl DataGenerator {
    pub const DEFAULT_COMPANY: &'static str = "TechCorp Solutions";

    pub fn new(report_date: NaiveDateTime, seed: u64) -> Self {
        Self {
            report_date,
            company_name: Self::DEFAULT_COMPANY.to_string(),
            seed,
        }
    }

    pub fn with_company(mut self, company_name: impl Into<String>) -> Self {
        self.company_name = company_name.into();
        self
    }

    pub fn report_date(&self) -> NaiveDateTime {
        self.report_date
    }

    pub fn generate(&self, kind: ReportKind) -> ReportData {
        match kind {
            ReportKind::Sales => self.sales(),
            ReportKind::Inventory => self.inventory(),
            ReportKind::Customer => self.customers(),
            ReportKind::Summary => self.summary(),
        }
    }

    fn rng(&self, kind: ReportKind) -> StdRng {
        StdRng::seed_from_u64(self.seed.wrapping_add(kind as u64))
    }

    fn period(&self) -> String {
        self.report_date.format("%B %Y").to_string()
    }

    fn sales(&self) -> ReportData {
        let mut rng = self.rng(ReportKind::Sales);
        let mut report = ReportData::new("Sales Report");
        let mut total = Decimal::ZERO;

        for i in 1..=SALES_ROWS {
            let amount = Decimal::new(rng.gen_range(10_000..=500_000), 2);
            let product = PRODUCTS.choose(&mut rng).copied().unwrap_or(PRODUCTS[0]);
            let date = self.report_date - Duration::days(SALES_ROWS - i);
            total += amount;
            report.data.push(
                Fields::new()
                    .with("date", date.format("%Y-%m-%d").to_string())
                    .with("product", product)
                    .with("amount", amount)
                    .with("customer", format!("Customer {i}")),
            );
        }

        report.info.push("period", self.period());
        report.info.push("total_sales", total);
        report.info.push("total_transactions", SALES_ROWS);
        report
    }

    fn inventory(&self) -> ReportData {
        let mut rng = self.rng(ReportKind::Inventory);
        let catalog: [(&str, i64, i64, Decimal); 5] = [
            ("Laptop Dell", 5, 50, Decimal::new(89_999, 2)),
            ("Monitor LG", 10, 100, Decimal::new(29_999, 2)),
            ("Keyboard Logitech", 20, 200, Decimal::new(7_999, 2)),
            ("Mouse Razer", 30, 300, Decimal::new(4_999, 2)),
            ("Webcam HD", 15, 150, Decimal::new(5_999, 2)),
        ];

        let mut report = ReportData::new("Inventory Report");
        let mut total_items = 0;
        let mut total_value = Decimal::ZERO;

        for (name, min, max, price) in catalog {
            let quantity = rng.gen_range(min..=max);
            total_items += quantity;
            total_value += Decimal::from(quantity) * price;
            report.data.push(
                Fields::new()
                    .with("name", name)
                    .with("quantity", quantity)
                    .with("price", price),
            );
        }

        report.info.push("date", self.report_date.format("%Y-%m-%d").to_string());
        report.info.push("total_items", total_items);
        report.info.push("total_value", total_value.round_dp(2));
        report
    }

    fn customers(&self) -> ReportData {
        let mut rng = self.rng(ReportKind::Customer);
        let mut report = ReportData::new("Customer Report");
        let mut total_spent = Decimal::ZERO;

        for i in 1..=CUSTOMER_ROWS {
            let spent = Decimal::new(rng.gen_range(50_000..=1_500_000), 2);
            let region = REGIONS.choose(&mut rng).copied().unwrap_or(REGIONS[0]);
            total_spent += spent;
            report.data.push(
                Fields::new()
                    .with("id", format!("C{}", 1000 + i))
                    .with("name", format!("Customer {i}"))
                    .with("email", format!("customer{i}@example.com"))
                    .with("region", region)
                    .with("purchases", rng.gen_range(1..=50i64))
                    .with("total_spent", spent),
            );
        }

        report.info.push(
            "generated_at",
            self.report_date.format("%Y-%m-%d %H:%M:%S").to_string(),
        );
        report.info.push("total_customers", CUSTOMER_ROWS);
        report.info.push("total_spent", total_spent);
        report
    }

    fn summary(&self) -> ReportData {
        let sales = self.sales();
        let inventory = self.inventory();
        let customers = self.customers();
        let pick = |data: &ReportData, key: &str| data.info.get(key).cloned();

        let mut summary = Fields::new();
        for (key, value) in [
            ("total_sales", pick(&sales, "total_sales")),
            ("total_transactions", pick(&sales, "total_transactions")),
            ("inventory_value", pick(&inventory, "total_value")),
            ("total_customers", pick(&customers, "total_customers")),
            ("customer_revenue", pick(&customers, "total_spent")),
        ] {
            if let Some(value) = value {
                summary.push(key, value);
            }
        }

        let mut report = ReportData::new("Executive Summary");
        report.info.push("company", self.company_name.clone());
        report.info.push("period", self.period());
        report.summary = Some(summary);
        report
    }
}

impl Default for DataGenerator {
    fn default() -> Self {
        Self::new(Local::now().naive_local(), rand::random())
    }
}
