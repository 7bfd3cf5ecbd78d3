// JSON output contract: field names and shapes scripts depend on.

use restock_cli::output;
use restock_engine::mapping::ColumnMapping;
use restock_engine::suggest::compute_suggestions;
use restock_engine::summary::Summary;
use restock_engine::table::Table;
use restock_engine::value::Scalar;

fn sample_entries() -> (Vec<restock_engine::suggest::SuggestionEntry>, Summary) {
    let table = Table::from_grid(vec![
        vec![
            Scalar::from_input("Product"),
            Scalar::from_input("Stock"),
            Scalar::from_input("Sold"),
            Scalar::from_input("Cost"),
        ],
        vec![
            Scalar::from_input("Widget"),
            Scalar::from_input("3"),
            Scalar::from_input("10"),
            Scalar::from_input("2.5"),
        ],
        vec![
            Scalar::from_input("Bolt"),
            Scalar::from_input("6"),
            Scalar::from_input("10"),
            Scalar::from_input("0.1"),
        ],
    ])
    .unwrap();

    let mapping = ColumnMapping {
        product_column: "Product".to_string(),
        stock_column: "Stock".to_string(),
        sold_column: "Sold".to_string(),
        cost_column: Some("Cost".to_string()),
        ..ColumnMapping::default()
    };

    let entries = compute_suggestions(&table, &mapping).unwrap();
    let summary = Summary::from_entries(&entries);
    (entries, summary)
}

#[test]
fn json_document_shape_is_stable() {
    let (entries, summary) = sample_entries();
    let out = output::render_json(&entries, &summary).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&out).unwrap();

    let suggestions = doc["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 2);

    // Critical row sorts first
    let first = &suggestions[0];
    assert_eq!(first["product"], "Widget");
    assert_eq!(first["estimated_demand"], 12);
    assert_eq!(first["suggested_purchase"], 14);
    assert_eq!(first["total_value"], 35.0);
    assert_eq!(first["status"], "critical");
    assert_eq!(first["priority"], "high");

    for key in [
        "product",
        "current_stock",
        "units_sold",
        "estimated_demand",
        "suggested_purchase",
        "unit_cost",
        "total_value",
        "status",
        "priority",
    ] {
        assert!(first.get(key).is_some(), "missing key {}", key);
    }

    let summary = &doc["summary"];
    assert_eq!(summary["products"], 2);
    assert_eq!(summary["high_priority"], 1);
    assert_eq!(summary["medium_priority"], 1);
    assert_eq!(summary["low_priority"], 0);
}

#[test]
fn csv_output_matches_entry_field_order() {
    let (entries, _) = sample_entries();
    let out = output::render_csv(&entries).unwrap();
    let mut lines = out.lines();
    assert_eq!(
        lines.next().unwrap(),
        "product,current_stock,units_sold,estimated_demand,suggested_purchase,unit_cost,total_value,status,priority"
    );
    assert_eq!(lines.next().unwrap(), "Widget,3,10,12,14,2.50,35.00,critical,high");
    assert_eq!(lines.next().unwrap(), "Bolt,6,10,12,11,0.10,1.10,restock,medium");
}
