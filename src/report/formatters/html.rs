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

use super::ReportFormatter;
use crate::report::{label, ReportData};
use html_escape::encode_text;

const STYLE: &str = "\
        body { font-family: Arial, sans-serif; margin: 20px; background: #f5f5f5; }
        .container { max-width: 900px; margin: 0 auto; background: white; padding: 20px; }
        h1 { color: #333; border-bottom: 3px solid #007bff; padding-bottom: 10px; }
        .info { background: #e7f3ff; padding: 15px; margin: 20px 0; }
        table { width: 100%; border-collapse: collapse; margin: 20px 0; }
        th { background: #007bff; color: white; padding: 10px; text-align: left; }
        td { padding: 10px; border-bottom: 1px solid #ddd; }
        .summary { background: #fff3cd; padding: 15px; margin: 20px 0; }";

/// Standalone HTML page. All text is escaped.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlFormatter;

impl ReportFormatter for HtmlFormatter {
    fn format(&self, data: &ReportData) -> String {
        let title = encode_text(&data.title);
        let mut lines = vec![
            "<!DOCTYPE html>".to_string(),
            "<html lang=\"en\">".to_string(),
            "<head>".to_string(),
            "    <meta charset=\"UTF-8\">".to_string(),
            format!("    <title>{title}</title>"),
            "    <style>".to_string(),
            STYLE.to_string(),
            "    </style>".to_string(),
            "</head>".to_string(),
            "<body>".to_string(),
            "    <div class=\"container\">".to_string(),
            format!("        <h1>{title}</h1>"),
            "        <div class=\"info\">".to_string(),
        ];

        for (key, value) in data.info.iter() {
            lines.push(format!(
                "            <p><strong>{}:</strong> {}</p>",
                encode_text(&label(key)),
                encode_text(&value.to_string())
            ));
        }
        lines.push("        </div>".to_string());

        let headers = data.headers();
        if !headers.is_empty() {
            lines.push("        <table>".to_string());
            lines.push("            <thead>".to_string());
            lines.push("                <tr>".to_string());
            for header in &headers {
                lines.push(format!("                    <th>{}</th>", encode_text(&label(header))));
            }
            lines.push("                </tr>".to_string());
            lines.push("            </thead>".to_string());
            lines.push("            <tbody>".to_string());
            for row in &data.data {
                lines.push("                <tr>".to_string());
                for header in &headers {
                    let cell = row.get(header).map(ToString::to_string).unwrap_or_default();
                    lines.push(format!("                    <td>{}</td>", encode_text(&cell)));
                }
                lines.push("                </tr>".to_string());
            }
            lines.push("            </tbody>".to_string());
            lines.push("        </table>".to_string());
        }

        if let Some(summary) = data.summary_entries() {
            lines.push("        <div class=\"summary\">".to_string());
            lines.push("            <h2>Executive Summary</h2>".to_string());
            for (key, value) in summary.iter() {
                lines.push(format!(
                    "            <p><strong>{}:</strong> {}</p>",
                    encode_text(&label(key)),
                    encode_text(&value.as_currency())
                ));
            }
            lines.push("        </div>".to_string());
        }

        lines.push("    </div>".to_string());
        lines.push("</body>".to_string());
        lines.push("</html>".to_string());
        lines.join("\n")
    }

    fn extension(&self) -> &'static str {
        "html"
    }

    fn display_name(&self) -> &'static str {
        "HTML (HyperText Markup Language)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Fields;

    #[test]
    fn escapes_markup() {
        let mut data = ReportData::new("<b>\"A&B\"</b>");
        data.data.push(Fields::new().with("note", "x < y && y > z"));

        let output = HtmlFormatter.format(&data);

        assert!(output.contains("<h1>&lt;b&gt;\"A&amp;B\"&lt;/b&gt;</h1>"));
        assert!(output.contains("<td>x &lt; y &amp;&amp; y &gt; z</td>"));
        assert!(!output.contains("<b>"));
    }

    #[test]
    fn renders_table_and_summary() {
        let mut data = ReportData::new("Customers <Q1>");
        data.info.push("total_customers", 2i64);
        data.data.push(Fields::new().with("name", "Ann").with("region", "Region A"));
        data.summary = Some(Fields::new().with("customer_revenue", 1500i64));

        let output = HtmlFormatter.format(&data);

        assert!(output.starts_with("<!DOCTYPE html>"));
        assert!(output.contains("<title>Customers &lt;Q1&gt;</title>"));
        assert!(output.contains("<p><strong>TOTAL CUSTOMERS:</strong> 2</p>"));
        assert!(output.contains("<th>REGION</th>"));
        assert!(output.contains("<td>Ann</td>"));
        assert!(output.contains("<p><strong>CUSTOMER REVENUE:</strong> $1,500.00</p>"));
        assert!(output.ends_with("</html>"));
    }

    #[test]
    fn no_table_without_rows() {
        let output = HtmlFormatter.format(&ReportData::new("Empty"));
        assert!(!output.contains("<table>"));
        assert!(!output.contains("Executive Summary"));
    }
}
