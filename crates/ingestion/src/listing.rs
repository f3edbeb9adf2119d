//! Listed-company record normalization.

use crate::normalizer::coerce_text;
use quotebar_core::{ListedStock, RawListedRecord, StockDirectory};

/// Normalize one listed-company record.
pub fn normalize_listed(record: &RawListedRecord) -> ListedStock {
    ListedStock {
        code: coerce_text(record.code.as_ref()).unwrap_or_default(),
        name: coerce_text(record.company_name.as_ref()),
        market: coerce_text(record.market_code_name.as_ref()),
        industry: coerce_text(record.sector17_code_name.as_ref()),
    }
}

/// Normalize a batch of listed-company records into a directory.
pub fn build_directory(records: &[RawListedRecord]) -> StockDirectory {
    StockDirectory::new(records.iter().map(normalize_listed).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_listed() {
        let record: RawListedRecord = serde_json::from_value(json!({
            "Code": "72030",
            "CompanyName": "トヨタ自動車",
            "MarketCodeName": "プライム",
            "Sector17CodeName": "自動車・輸送機",
            "ScaleCategory": "TOPIX Core30"
        }))
        .unwrap();

        let stock = normalize_listed(&record);
        assert_eq!(stock.code, "72030");
        assert_eq!(stock.name.as_deref(), Some("トヨタ自動車"));
        assert_eq!(stock.market.as_deref(), Some("プライム"));
        assert_eq!(stock.industry.as_deref(), Some("自動車・輸送機"));
    }

    #[test]
    fn test_missing_fields() {
        let directory = build_directory(&[RawListedRecord::default(), RawListedRecord::default()]);
        assert_eq!(directory.count, 2);
        assert_eq!(directory.items[0].code, "");
        assert!(directory.items[0].name.is_none());
    }
}
