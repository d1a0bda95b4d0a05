//! Plain-text and JSON rendering of batch results.

use std::collections::HashMap;

use buybox_core::{BatchSummary, ClassificationStatus, ClassifiedRecord, ProductId};
use serde::Serialize;

/// Records in submission order, restricted to `statuses` when non-empty.
pub(crate) fn ordered_records<'a>(
    ids: &[ProductId],
    results: &'a HashMap<ProductId, ClassifiedRecord>,
    statuses: &[ClassificationStatus],
) -> Vec<&'a ClassifiedRecord> {
    ids.iter()
        .filter_map(|id| results.get(id))
        .filter(|record| statuses.is_empty() || statuses.contains(&record.status()))
        .collect()
}

pub(crate) fn render_table(rows: &[&ClassifiedRecord], summary: &BatchSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<12}{:<32}{:<32}STATUS\n",
        "ID", "SELLER", "SHIPPER"
    ));
    for record in rows {
        out.push_str(&format!(
            "{:<12}{:<32}{:<32}{}\n",
            record.id().as_str(),
            record.seller().to_string(),
            record.shipper().to_string(),
            record.status()
        ));
    }
    out.push('\n');
    out.push_str(&summary_line(summary));
    out.push('\n');

    let reprocess: Vec<&str> = rows
        .iter()
        .filter(|record| record.status() == ClassificationStatus::NeedsReprocess)
        .map(|record| record.id().as_str())
        .collect();
    if !reprocess.is_empty() {
        out.push_str(&format!("resubmit: {}\n", reprocess.join(" ")));
    }
    out
}

pub(crate) fn summary_line(summary: &BatchSummary) -> String {
    format!(
        "total {} | operator FO {} | third-party {} ({:.1}%) | no offer {} | reprocess {} | read time {} ({:.2}s/id)",
        summary.total,
        summary.operator_fulfilled,
        summary.third_party,
        summary.third_party_pct(),
        summary.no_offer,
        summary.needs_reprocess,
        summary.read_time(),
        summary.secs_per_identifier()
    )
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    records: &'a [&'a ClassifiedRecord],
    summary: &'a BatchSummary,
    read_time: String,
}

pub(crate) fn render_json(
    rows: &[&ClassifiedRecord],
    summary: &BatchSummary,
) -> anyhow::Result<String> {
    let report = JsonReport {
        records: rows,
        summary,
        read_time: summary.read_time(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use buybox_core::{MerchantInfo, Party};

    use super::*;

    fn pid(raw: &str) -> ProductId {
        ProductId::parse(raw).expect("valid test id")
    }

    fn fixture() -> (Vec<ProductId>, HashMap<ProductId, ClassifiedRecord>) {
        let ids = vec![pid("B000000003"), pid("B000000001"), pid("B000000002")];
        let records = [
            ClassifiedRecord::new(
                pid("B000000001"),
                MerchantInfo::new(
                    Party::Named("Amazon".to_owned()),
                    Party::Named("Amazon".to_owned()),
                ),
                ClassificationStatus::OperatorFulfilled,
            ),
            ClassifiedRecord::no_offer(pid("B000000002")),
            ClassifiedRecord::needs_reprocess(pid("B000000003")),
        ];
        let map = records
            .into_iter()
            .map(|record| (record.id().clone(), record))
            .collect();
        (ids, map)
    }

    #[test]
    fn rows_follow_submission_order() {
        let (ids, results) = fixture();
        let rows = ordered_records(&ids, &results, &[]);
        let order: Vec<&str> = rows.iter().map(|r| r.id().as_str()).collect();
        assert_eq!(order, ["B000000003", "B000000001", "B000000002"]);
    }

    #[test]
    fn status_filter_keeps_matching_rows_only() {
        let (ids, results) = fixture();
        let rows = ordered_records(&ids, &results, &[ClassificationStatus::NoOffer]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id().as_str(), "B000000002");
    }

    #[test]
    fn table_lists_reprocess_ids_for_resubmission() {
        let (ids, results) = fixture();
        let rows = ordered_records(&ids, &results, &[]);
        let summary = BatchSummary::from_records(results.values(), Duration::from_secs(65));
        let table = render_table(&rows, &summary);

        assert!(table.starts_with("ID"));
        assert!(table.contains("Operator FO"));
        assert!(table.contains("read time 1m 5s"));
        assert!(table.contains("resubmit: B000000003"));
    }

    #[test]
    fn table_rows_are_column_aligned() {
        let (ids, results) = fixture();
        let rows = ordered_records(&ids, &results, &[]);
        let summary = BatchSummary::from_records(results.values(), Duration::from_secs(1));
        let table = render_table(&rows, &summary);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 7);
        assert_eq!(
            lines[2],
            format!("{:<12}{:<32}{:<32}Operator FO", "B000000001", "Amazon", "Amazon")
        );
        assert_eq!(
            lines[3],
            format!("{:<12}{:<32}{:<32}No Offer", "B000000002", "No Offer", "No Offer")
        );
        assert!(lines[4].is_empty());
    }

    #[test]
    fn json_report_carries_records_and_summary() {
        let (ids, results) = fixture();
        let rows = ordered_records(&ids, &results, &[]);
        let summary = BatchSummary::from_records(results.values(), Duration::from_secs(3));
        let json = render_json(&rows, &summary).expect("serializes");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

        assert_eq!(value["records"].as_array().map(Vec::len), Some(3));
        assert_eq!(value["summary"]["total"], 3);
        assert_eq!(value["summary"]["needs_reprocess"], 1);
        assert_eq!(value["read_time"], "3s");
    }
}
