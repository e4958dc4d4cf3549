//! Renders one statement for every supported driver.
//!
//! Run with: cargo run --example dialects -p sqlweave

use sqlweave::prelude::*;

fn main() -> SqlResult<()> {
    let q = Select::new()
        .distinct()
        .columns(["a", "b"])
        .from("t")
        .and_where(("a IN (?)", vec![1, 2, 3]))
        .group_by("a")
        .order_by("b")
        .limit(10)
        .offset(20);

    for driver in ["ansi", "mysql", "pgsql", "mssql", "oracle", "sqlite"] {
        let qb = QueryBuilder::for_driver(driver)?;
        let built = qb.assemble(&q)?;
        println!("{driver:>7}: {}", built.sql);
        println!("{:>7}  {}", "", qb.quote_identifier("public.t.a"));
    }

    if let Err(err) = QueryBuilder::for_driver("db2") {
        println!("\n{err}");
    }

    Ok(())
}
