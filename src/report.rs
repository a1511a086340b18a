use chrono::{DateTime, Utc};

pub const REPORT_FILENAME: &str = "fraud-analysis-report.txt";

const RULE_WIDTH: usize = 45;
const FOOTER: &str = "This is a demo report.";

#[derive(Clone, Debug, PartialEq)]
pub struct ReportData {
    pub timestamp: DateTime<Utc>,
    pub amount: String,
    pub distance: String,
    pub method: String,
    pub result: String,
    pub confidence: String,
    pub fraud_risk: String,
}

pub fn render(data: &ReportData) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!(
        "FRAUDSHIELD TRANSACTION ANALYSIS REPORT
{rule}

Analysis Date: {timestamp}

TRANSACTION DETAILS
-------------------
Amount: ${amount}
Distance from Home: {distance} km
Transaction Method: {method}

ANALYSIS RESULTS
----------------
Result: {result}
Confidence Level: {confidence}
Fraud Risk Score: {fraud_risk}

{rule}
{footer}
",
        rule = rule,
        timestamp = data.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
        amount = data.amount,
        distance = data.distance,
        method = data.method,
        result = data.result,
        confidence = data.confidence,
        fraud_risk = data.fraud_risk,
        footer = FOOTER,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn data() -> ReportData {
        ReportData {
            timestamp: Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap(),
            amount: "1250".to_string(),
            distance: "320.5".to_string(),
            method: "ATM Withdrawal".to_string(),
            result: "High Fraud Risk Detected".to_string(),
            confidence: "91.3%".to_string(),
            fraud_risk: "91.3%".to_string(),
        }
    }

    #[test]
    fn report_lists_details_and_results() {
        let report = render(&data());
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "FRAUDSHIELD TRANSACTION ANALYSIS REPORT");
        assert_eq!(lines[1], "=".repeat(45));
        assert_eq!(lines[3], "Analysis Date: 2026-03-14 09:26:53 UTC");
        assert!(lines.contains(&"Amount: $1250"));
        assert!(lines.contains(&"Distance from Home: 320.5 km"));
        assert!(lines.contains(&"Transaction Method: ATM Withdrawal"));
        assert!(lines.contains(&"Result: High Fraud Risk Detected"));
        assert!(lines.contains(&"Confidence Level: 91.3%"));
        assert!(lines.contains(&"Fraud Risk Score: 91.3%"));
    }

    #[test]
    fn report_is_framed_by_rules() {
        let report = render(&data());
        let rules = report.lines().filter(|l| *l == "=".repeat(45)).count();
        assert_eq!(rules, 2);
        assert!(report.ends_with('\n'));
    }

    #[test]
    fn report_ends_with_demo_notice() {
        let report = render(&data());
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[lines.len() - 2], "=".repeat(45));
        assert_eq!(lines[lines.len() - 1], "This is a demo report.");
        assert!(!report.contains("PDF"));
    }
}
