//! Builds a paginated customer report and its count query.
//!
//! Run with: cargo run --example report_query -p sqlweave

use sqlweave::prelude::*;

fn main() -> SqlResult<()> {
    let qb = QueryBuilder::for_driver("pgsql")?;

    let report = Select::new()
        .columns(["c.id", "c.name"])
        .columns(("orders", "COUNT(o.id)"))
        .columns(("revenue", Expression::new("COALESCE(SUM(o.total), 0)")))
        .from(("c", "customer"))
        .left_join("orders o", "o.customer_id = c.id")
        .and_where(filter::like("c.name", "*Doe*"))
        .and_where(filter::equal("c.region", vec!["EU", "UK"]))
        .not_where(filter::is_null("c.verified_at"))
        .group_by("c.id")
        .having(("COUNT(o.id) >= ?", 3))
        .order_by([("revenue", "DESC"), ("c.name", "ASC")])
        .paginate(25, 50);

    // ============================================
    // Page query
    // ============================================
    println!("=== page ===");
    let (sql, params) = qb.assemble(&report)?.into_parts();
    println!("{sql}");
    println!("params: {}", serde_json::to_string(&params).unwrap_or_default());

    // ============================================
    // Total count
    // ============================================
    println!("\n=== count ===");
    let (sql, params) = qb.assemble(&report.count_query())?.into_parts();
    println!("{sql}");
    println!("params: {}", serde_json::to_string(&params).unwrap_or_default());

    // ============================================
    // Archive the same customers
    // ============================================
    println!("\n=== archive ===");
    let source = report
        .clone()
        .reset_columns()
        .columns(["c.id", "c.name"])
        .reset_order_by()
        .reset_limit()
        .reset_offset();
    let archive = Insert::new()
        .into("customer_archive")
        .columns(["id", "name"])
        .select(source);
    let (sql, params) = qb.assemble(&archive)?.into_parts();
    println!("{sql}");
    println!("params: {}", params.len());

    Ok(())
}
