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

//! Business reports: data generation separated from output format.
//!
//! [`DataGenerator`] builds a [`ReportData`] for a [`ReportKind`]; any
//! [`ReportFormatter`] turns it into text. [`ReportProcessor`] wires the two
//! together and optionally persists the result.

mod formatters;
mod generator;
mod processor;

pub use formatters::{
    CsvFormatter, ExcelFormatter, HtmlFormatter, JsonFormatter, PdfFormatter, ReportFormatter,
    all_formatters,
};
pub use generator::DataGenerator;
pub use processor::ReportProcessor;

use crate::PipelineError;
use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Sales,
    Inventory,
    Customer,
    Summary,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [Self::Sales, Self::Inventory, Self::Customer, Self::Summary];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Inventory => "inventory",
            Self::Customer => "customer",
            Self::Summary => "summary",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sales" => Ok(Self::Sales),
            "inventory" => Ok(Self::Inventory),
            "customer" => Ok(Self::Customer),
            "summary" => Ok(Self::Summary),
            other => Err(PipelineError::UnknownKind(other.to_string())),
        }
    }
}

/// A single cell or info value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Money(Decimal),
}

impl Value {
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Self::Text(_))
    }

    /// Renders numbers as `$1,234.56`; text is returned unchanged.
    pub fn as_currency(&self) -> String {
        let amount = match self {
            Self::Text(text) => return text.clone(),
            Self::Integer(n) => Decimal::from(*n),
            Self::Money(m) => *m,
        };
        format_currency(amount)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Money(m) => write!(f, "{m}"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Self::Money(value)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Integer(n) => serializer.serialize_i64(*n),
            Self::Money(m) => Serialize::serialize(m, serializer),
        }
    }
}

fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}${grouped}.{fraction}")
}

/// Ordered `key → value` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields(Vec<(String, Value)>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(key, value);
        self
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.push((key.into(), value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Fields {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Everything a formatter needs to render one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportData {
    pub title: String,
    /// General information shown under the title.
    pub info: Fields,
    /// Detail rows; column order comes from the first row.
    pub data: Vec<Fields>,
    pub summary: Option<Fields>,
}

impl ReportData {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            info: Fields::new(),
            data: Vec::new(),
            summary: None,
        }
    }

    /// Column headers, taken from the first row.
    pub fn headers(&self) -> Vec<&str> {
        self.data
            .first()
            .map(|row| row.keys().collect())
            .unwrap_or_default()
    }

    /// Summary entries, if there are any.
    pub fn summary_entries(&self) -> Option<&Fields> {
        self.summary.as_ref().filter(|s| !s.is_empty())
    }
}

impl Serialize for ReportData {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("title", &self.title)?;
        for (key, value) in self.info.iter() {
            map.serialize_entry(key, value)?;
        }
        if !self.data.is_empty() {
            map.serialize_entry("data", &self.data)?;
        }
        if let Some(summary) = self.summary_entries() {
            map.serialize_entry("summary", summary)?;
        }
        map.end()
    }
}

/// `total_sales` → `TOTAL SALES`.
pub(crate) fn label(key: &str) -> String {
    key.to_uppercase().replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn kind_parsing() {
        for kind in ReportKind::ALL {
            assert_eq!(kind.as_str().parse::<ReportKind>().unwrap(), kind);
        }
        assert_eq!(
            "foobar".parse::<ReportKind>(),
            Err(PipelineError::UnknownKind("foobar".into()))
        );
        assert!("Sales".parse::<ReportKind>().is_err());
    }

    #[test]
    fn currency_formatting() {
        assert_eq!(Value::Money(dec!(1234.5)).as_currency(), "$1,234.50");
        assert_eq!(Value::Money(dec!(1234567.891)).as_currency(), "$1,234,567.89");
        assert_eq!(Value::Money(dec!(999)).as_currency(), "$999.00");
        assert_eq!(Value::Integer(10).as_currency(), "$10.00");
        assert_eq!(Value::Money(dec!(-1500)).as_currency(), "-$1,500.00");
        assert_eq!(Value::from("Acme").as_currency(), "Acme");
    }

    #[test]
    fn labels_are_upper_case_with_spaces() {
        assert_eq!(label("total_sales"), "TOTAL SALES");
        assert_eq!(label("period"), "PERIOD");
    }

    #[test]
    fn headers_come_from_first_row() {
        let mut data = ReportData::new("T");
        assert!(data.headers().is_empty());

        data.data.push(Fields::new().with("name", "a").with("qty", 1i64));
        data.data.push(Fields::new().with("qty", 2i64));
        assert_eq!(data.headers(), vec!["name", "qty"]);
    }

    #[test]
    fn serializes_as_flat_object() {
        let mut data = ReportData::new("Sales");
        data.info.push("period", "March 2025");
        data.data.push(Fields::new().with("amount", dec!(10.50)).with("units", 3i64));
        data.summary = Some(Fields::new());

        let json: serde_json::Value = serde_json::to_value(&data).unwrap();

        assert_eq!(json["title"], "Sales");
        assert_eq!(json["period"], "March 2025");
        assert_eq!(json["data"][0]["amount"], "10.50");
        assert_eq!(json["data"][0]["units"], 3);
        // Empty summary is left out.
        assert!(json.get("summary").is_none());
    }

    #[test]
    fn money_serializes_as_string() {
        let json = serde_json::to_value(Value::Money(dec!(1234.50))).unwrap();
        assert_eq!(json, serde_json::json!("1234.50"));

        let json = serde_json::to_value(Value::Integer(-7)).unwrap();
        assert_eq!(json, serde_json::json!(-7));
    }
}
