//! Example building statements for the classic Singers/Albums schema.
//!
//! Run with:
//!   cargo run --example singers -p spanql
//!
//! Set `RUST_LOG=spanql=debug` to see the rendered statements as tracing events.

use chrono::NaiveDate;
use spanql::prelude::*;
use spanql::{InsertStmt, delete, insert, select, update};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Record)]
#[spanner(rename_all = "PascalCase")]
struct Singer {
    singer_id: i64,
    first_name: String,
    last_name: Option<String>,
    birth_date: Option<NaiveDate>,
    #[spanner(skip)]
    albums_loaded: bool,
}

#[derive(Debug)]
struct Filters {
    last_name: Option<String>,
    born_after: Option<NaiveDate>,
    exclude_ids: Vec<i64>,
    page: u64,
    per_page: u64,
}

fn list_singers_sql(filters: &Filters) -> SqlResult<String> {
    let mut conds = Vec::new();
    if let Some(last_name) = &filters.last_name {
        conds.push(eq(ident(["LastName"]), last_name.as_str()));
    }
    if let Some(born_after) = filters.born_after {
        conds.push(gt(ident(["BirthDate"]), born_after));
    }
    if !filters.exclude_ids.is_empty() {
        conds.push(not_in(ident(["SingerId"]), filters.exclude_ids.iter().copied()));
    }

    select("Singers", ["SingerId", "FirstName", "LastName"])
        .and_where_all(conds)
        .order_by("LastName", Direction::Asc)
        .order_by("FirstName", Direction::Asc)
        .paginate(filters.page, filters.per_page)
        .sql()
}

fn main() -> SqlResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let singers = vec![
        Singer {
            singer_id: 1,
            first_name: "Marc".into(),
            last_name: Some("Richards".into()),
            birth_date: NaiveDate::from_ymd_opt(1970, 9, 3),
            albums_loaded: false,
        },
        Singer {
            singer_id: 2,
            first_name: "Catalina".into(),
            last_name: Some("Smith".into()),
            birth_date: None,
            albums_loaded: false,
        },
    ];

    let pending = singers.iter().filter(|s| !s.albums_loaded).count();
    println!("-- insert records ({pending} without albums loaded)");
    println!("{}", InsertStmt::for_record::<Singer>("Singers").values(&singers).sql()?);

    println!("-- insert tuples");
    println!(
        "{}",
        insert("Albums", ["SingerId", "AlbumId", "AlbumTitle"])
            .values([(1, 1, "Total Junk"), (1, 2, "Go, Go, Go")])
            .sql()?
    );

    println!("-- filtered select");
    let filters = Filters {
        last_name: Some("Richards".into()),
        born_after: NaiveDate::from_ymd_opt(1960, 1, 1),
        exclude_ids: vec![3, 4],
        page: 2,
        per_page: 20,
    };
    println!("{}", list_singers_sql(&filters)?);

    println!("-- update with a parameter");
    let base = update("Singers").set("LastName", param("last_name"));
    println!(
        "{}",
        base.clone()
            .and_where(eq(ident(["SingerId"]), param("id")))
            .sql()?
    );

    println!("-- guarded statements");
    match base.sql() {
        Ok(sql) => println!("unexpected: {sql}"),
        Err(err) => println!("update without WHERE refused: {err}"),
    }
    match delete("Singers").sql() {
        Ok(sql) => println!("unexpected: {sql}"),
        Err(err) => println!("delete without WHERE refused: {err}"),
    }

    println!("-- explicit full-table delete");
    println!("{}", delete("Singers").and_where(bool_lit(true)).sql()?);

    Ok(())
}
