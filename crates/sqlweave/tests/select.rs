use sqlweave::prelude::*;
use sqlweave::{Column, JoinKind};

fn assemble(q: &Select) -> (String, Vec<Value>) {
    QueryBuilder::default().assemble(q).unwrap().into_parts()
}

fn count_active() -> Select {
    Select::new()
        .columns("COUNT(*)")
        .from("table2")
        .and_where(("active = ?", 1))
}

#[test]
fn distinct() {
    let q = Select::new().distinct();
    assert!(q.is_distinct());
    assert_eq!(assemble(&q).0, "SELECT DISTINCT");
}

#[test]
fn columns() {
    assert_eq!(assemble(&Select::new().columns("a")).0, "SELECT a");
    assert_eq!(assemble(&Select::new().columns(("b", "a"))).0, "SELECT a AS b");
    assert_eq!(assemble(&Select::new().columns(["a", "b"])).0, "SELECT a, b");
    assert_eq!(
        assemble(&Select::new().columns([("c", "a"), ("d", "b")])).0,
        "SELECT a AS c, b AS d"
    );
}

#[test]
fn column_expression_and_subquery() {
    let q = Select::new().columns(("three", Expression::with_values("? + ?", [1, 2])));
    assert_eq!(assemble(&q), ("SELECT (? + ?) AS three".to_string(), vec![Value::Int(1), Value::Int(2)]));

    let q = Select::new().columns(("cnt", count_active()));
    let (sql, values) = assemble(&q);
    assert_eq!(
        sql,
        "SELECT (SELECT COUNT(*) FROM table2 WHERE active = ?) AS cnt"
    );
    assert_eq!(values, vec![Value::Int(1)]);
}

#[test]
fn from() {
    assert_eq!(assemble(&Select::new().from("table")).0, "SELECT FROM table");
    assert_eq!(
        assemble(&Select::new().from(("t1", "table"))).0,
        "SELECT FROM table t1"
    );
    assert_eq!(
        assemble(&Select::new().from([("t1", "table1"), ("t2", "table2")])).0,
        "SELECT FROM table1 t1, table2 t2"
    );

    let q = Select::new().columns("*").from((
        "t1",
        Select::new()
            .columns("*")
            .from("table")
            .and_where(("ctime > ?", 1_000_000i64)),
    ));
    let (sql, values) = assemble(&q);
    assert_eq!(sql, "SELECT * FROM (SELECT * FROM table WHERE ctime > ?) t1");
    assert_eq!(values, vec![Value::Int(1_000_000)]);
}

#[test]
fn join_conditions() {
    let q = Select::new().join(
        "table2",
        vec![
            Condition::from("table2.table1_id = table1.id"),
            Condition::from("table2.table3_id = 42"),
        ],
    );
    assert_eq!(
        assemble(&q).0,
        "INNER JOIN table2 ON (table2.table1_id = table1.id) AND (table2.table3_id = 42)"
    );

    let q = Select::new().left_join(
        "table2",
        Condition::any(["table2.table1_id = table1.id", "table2.table3_id = 42"]),
    );
    assert_eq!(
        assemble(&q).0,
        "LEFT JOIN table2 ON (table2.table1_id = table1.id) OR (table2.table3_id = 42)"
    );

    let q = Select::new().right_join(
        "table2",
        vec![
            Condition::from("table2.table1_id = table1.id"),
            Condition::from(("table2.table3_id = ?", 42)),
        ],
    );
    let (sql, values) = assemble(&q);
    assert_eq!(
        sql,
        "RIGHT JOIN table2 ON (table2.table1_id = table1.id) AND (table2.table3_id = ?)"
    );
    assert_eq!(values, vec![Value::Int(42)]);
}

#[test]
fn join_with_subquery_source_and_conditions() {
    let table2 = Select::new()
        .columns("*")
        .from("table2")
        .and_where(("active = ?", 1));
    let (sql, values) = assemble(&Select::new().join(("t2", table2), "t2.table1_id = t1.id"));
    assert_eq!(
        sql,
        "INNER JOIN (SELECT * FROM table2 WHERE active = ?) t2 ON t2.table1_id = t1.id"
    );
    assert_eq!(values, vec![Value::Int(1)]);

    let q = Select::new().join("table2", Expression::with_values("t2.table1_id = ?", [1]));
    assert_eq!(assemble(&q).0, "INNER JOIN table2 ON t2.table1_id = ?");

    let q = Select::new().join("table2", count_active());
    assert_eq!(
        assemble(&q).0,
        "INNER JOIN table2 ON (SELECT COUNT(*) FROM table2 WHERE active = ?)"
    );
}

#[test]
fn join_accessors() {
    let q = Select::new()
        .from("a")
        .full_join(("bb", "b"), "bb.a = a.id");
    let joins = q.join_list();
    assert_eq!(joins.len(), 1);
    assert_eq!(joins[0].kind, JoinKind::Full);
    assert_eq!(joins[0].alias.as_deref(), Some("bb"));
    assert_eq!(assemble(&q).0, "SELECT FROM a FULL JOIN b bb ON bb.a = a.id");
}

#[test]
fn group_by() {
    let q = Select::new().group_by(["a", "b"]);
    assert_eq!(q.group_by_list(), &[Column::from("a"), Column::from("b")]);
    assert_eq!(assemble(&q).0, "GROUP BY a, b");

    let q = Select::new().group_by(Expression::with_values("x = ?", [1]));
    assert_eq!(assemble(&q), ("GROUP BY x = ?".to_string(), vec![Value::Int(1)]));

    let q = Select::new().group_by(count_active());
    assert_eq!(
        assemble(&q).0,
        "GROUP BY (SELECT COUNT(*) FROM table2 WHERE active = ?)"
    );
}

#[test]
fn order_by() {
    let q = Select::new().order_by([("a", "DESC"), ("b", "ASC")]);
    assert_eq!(assemble(&q).0, "ORDER BY a DESC, b ASC");

    let q = Select::new().order_by((Expression::with_values("x = ?", [1]), "DESC"));
    assert_eq!(assemble(&q), ("ORDER BY x = ? DESC".to_string(), vec![Value::Int(1)]));

    let q = Select::new().order_by((count_active(), "DESC"));
    assert_eq!(
        assemble(&q).0,
        "ORDER BY (SELECT COUNT(*) FROM table2 WHERE active = ?) DESC"
    );
}

#[test]
fn invalid_order_direction_fails_assembly() {
    let q = Select::new().from("t").order_by(("a", "DESC; DROP TABLE t"));
    let err = QueryBuilder::default().assemble(&q).unwrap_err();
    assert_eq!(err, SqlError::InvalidDirection("DESC; DROP TABLE t".to_string()));
}

#[test]
fn element_order() {
    let q = Select::new()
        .distinct()
        .columns(["c.id", "c.name"])
        .columns(("orders", "COUNT(o.customer)"))
        .from(("c", "customer"))
        .left_join("order o", "o.customer = c.id")
        .and_where(("c.name LIKE ?", "%Doe%"))
        .or_where(("c.name LIKE ?", "%Deo%"))
        .group_by("c.id")
        .having(("COUNT(o.customer) >= ?", 42))
        .or_having(("COUNT(o.customer) <= ?", 3))
        .order_by(["COUNT(o.customer)", "c.name"])
        .offset(75)
        .limit(25)
        .union_all(
            Select::new()
                .columns(("id", -1))
                .columns(("name", "''"))
                .columns(("orders", -1)),
        );

    let (sql, values) = assemble(&q);
    assert_eq!(
        sql,
        "(SELECT DISTINCT c.id, c.name, COUNT(o.customer) AS orders \
         FROM customer c LEFT JOIN order o ON o.customer = c.id \
         WHERE (c.name LIKE ?) OR (c.name LIKE ?) \
         GROUP BY c.id HAVING (COUNT(o.customer) >= ?) OR (COUNT(o.customer) <= ?) \
         ORDER BY COUNT(o.customer), c.name LIMIT 25 OFFSET 75) \
         UNION ALL (SELECT -1 AS id, '' AS name, -1 AS orders)"
    );
    assert_eq!(
        values,
        vec![
            Value::from("%Doe%"),
            Value::from("%Deo%"),
            Value::Int(42),
            Value::Int(3),
        ]
    );
}

#[test]
fn rollup() {
    let base = Select::new()
        .columns([
            ("division", "di.name"),
            ("department", "de.name"),
            ("employees", "COUNT(e.id)"),
        ])
        .from(("e", "employee"))
        .right_join("department de", "de.id = e.department")
        .right_join("division di", "di.id = de.division");

    let prefix = "SELECT di.name AS division, de.name AS department, COUNT(e.id) AS employees \
                  FROM employee e \
                  RIGHT JOIN department de ON de.id = e.department \
                  RIGHT JOIN division di ON di.id = de.division";

    let mysql = base.clone().group_by(["di.id", "de.id WITH ROLLUP"]);
    assert_eq!(
        assemble(&mysql).0,
        format!("{prefix} GROUP BY di.id, de.id WITH ROLLUP")
    );

    let pgsql = base.group_by("ROLLUP (di.id, de.id)");
    assert_eq!(
        assemble(&pgsql).0,
        format!("{prefix} GROUP BY ROLLUP (di.id, de.id)")
    );
}

#[test]
fn unions() {
    let union1 = Select::new()
        .columns("a")
        .from("table1")
        .and_where(("b < ?", 1));
    let union2 = Select::new()
        .columns("a")
        .from("table2")
        .and_where(("b > ?", 2));

    let q = Select::new().union_all(union1.clone()).union_all(union2.clone());
    let (sql, values) = assemble(&q);
    assert_eq!(
        sql,
        "(SELECT a FROM table1 WHERE b < ?) UNION ALL (SELECT a FROM table2 WHERE b > ?)"
    );
    assert_eq!(values, vec![Value::Int(1), Value::Int(2)]);

    let q = Select::new()
        .from("table3")
        .columns("a")
        .union_all(union1)
        .union_all(union2);
    assert_eq!(
        assemble(&q).0,
        "(SELECT a FROM table3) \
         UNION ALL (SELECT a FROM table1 WHERE b < ?) \
         UNION ALL (SELECT a FROM table2 WHERE b > ?)"
    );
    assert_eq!(q.union_list().len(), 2);
    assert!(q.union_list().iter().all(|u| u.all));
}

#[test]
fn order_and_limit_apply_to_whole_union() {
    let a = Select::new().columns("a").from("t1");
    let c = Select::new().columns("a").from("t2").and_where(("a > ?", 3));
    let q = Select::new()
        .union(a)
        .union_all(c)
        .order_by(("a", "DESC"))
        .limit(10);

    let (sql, values) = assemble(&q);
    assert_eq!(
        sql,
        "(SELECT a FROM t1) UNION ALL (SELECT a FROM t2 WHERE a > ?) ORDER BY a DESC LIMIT 10"
    );
    assert_eq!(values, vec![Value::Int(3)]);

    let mssql = QueryBuilder::for_driver("mssql").unwrap();
    assert_eq!(
        mssql.assemble(&q.reset_order_by()).unwrap().sql,
        "(SELECT a FROM t1) UNION ALL (SELECT a FROM t2 WHERE a > ?) \
         ORDER BY 1 OFFSET 0 ROWS FETCH NEXT 10 ROWS ONLY"
    );
}

#[test]
fn order_direction_is_rendered_trimmed() {
    let q = Select::new()
        .columns("a")
        .from("t")
        .order_by([("a", " ASC "), ("b", "  ")]);
    assert_eq!(assemble(&q).0, "SELECT a FROM t ORDER BY a ASC, b");
}

#[test]
fn values_follow_placeholder_order_across_clauses() {
    let q = Select::new()
        .with(Select::new().columns("id").from("t").and_where(("k = ?", 0)), "w")
        .columns(("x", Expression::with_values("?", [1])))
        .from(("s", Select::new().from("u").and_where(("k = ?", 2))))
        .join("v", ("v.k = ?", 3))
        .and_where(("a = ?", 4))
        .group_by(Expression::with_values("b + ?", [5]))
        .having(("c > ?", 6))
        .order_by(Expression::with_values("d - ?", [7]))
        .union(Select::new().columns("1").from("z").and_where(("e = ?", 8)));

    let built = QueryBuilder::default().assemble(&q).unwrap();
    assert_eq!(built.placeholder_count(), built.params.len());
    assert_eq!(
        built.params,
        (0..=8).map(Value::Int).collect::<Vec<_>>()
    );
}

#[test]
fn assembly_is_deterministic() {
    let q = Select::new()
        .columns(["a", "b"])
        .from("t")
        .and_where(("a IN (?)", vec![1, 2, 3]))
        .order_by(("b", "desc"))
        .paginate(10, 20);
    let qb = QueryBuilder::default();
    assert_eq!(qb.assemble(&q).unwrap(), qb.assemble(&q).unwrap());
}
