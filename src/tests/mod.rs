use crate::catalog::{Catalog, Product};
use crate::output::{self, table};
use crate::pagination::Paginator;

fn catalog_body(popularities: &[&str]) -> String {
    let entries: Vec<String> = popularities
        .iter()
        .enumerate()
        .map(|(i, pop)| {
            format!(
                r#""{}": {{"subcategory": "mobile", "title": "item({pop})", "price": "{}", "popularity": "{pop}"}}"#,
                1000 + i,
                100 + i
            )
        })
        .collect();
    format!(r#"{{"count": {}, "products": {{{}}}}}"#, popularities.len(), entries.join(","))
}

fn load(body: &str) -> Paginator<Product> {
    let mut pager = Paginator::new(10);
    pager.set_records(Catalog::from_json(body).unwrap().products);
    pager
}

#[test]
fn fetch_sort_reset_display() {
    let pager = load(&catalog_body(&["3", "1", "2"]));
    assert_eq!(pager.current_page(), 1);
    let titles: Vec<&str> = pager.records().iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["item(3)", "item(2)", "item(1)"]);
    assert_eq!(pager.visible_page_buttons(3), vec![1]);
}

#[test]
fn twenty_five_records_third_page() {
    let pops: Vec<String> = (0..25).map(|i| (1000 - i).to_string()).collect();
    let refs: Vec<&str> = pops.iter().map(String::as_str).collect();
    let mut pager = load(&catalog_body(&refs));
    assert_eq!(pager.total_pages(), 3);
    assert!(pager.go_to_page(3));
    assert_eq!(pager.visible_slice().len(), 5);
    assert_eq!(pager.visible_slice()[0].title, "item(980)");

    let rows = table::table_rows(&pager);
    assert_eq!(rows.first().map(|r| r.position), Some(21));
    let c = table::controls(&pager, 3);
    assert!(!c.next_enabled);
    assert!(c.prev_enabled);

    let report = output::build_report(&pager);
    assert_eq!(report.products.len(), 5);
    assert_eq!(report.products[4].rank, 25);
}

#[test]
fn page_walk_stays_in_range() {
    let pops: Vec<String> = (0..95).map(|i| i.to_string()).collect();
    let refs: Vec<&str> = pops.iter().map(String::as_str).collect();
    let mut pager = load(&catalog_body(&refs));
    let total = pager.total_pages();
    assert_eq!(total, 10);

    let mut visited = vec![pager.current_page()];
    while pager.next_page() {
        visited.push(pager.current_page());
        let buttons = pager.visible_page_buttons(3);
        assert_eq!(buttons.len(), 3);
        assert!(buttons.contains(&pager.current_page()));
    }
    assert_eq!(visited, (1..=total).collect::<Vec<_>>());
    assert_eq!(pager.visible_slice().len(), 5);

    while pager.prev_page() {}
    assert_eq!(pager.current_page(), 1);
}

#[test]
fn empty_catalog_shows_nothing() {
    let pager = load(r#"{"count": 0, "products": {}}"#);
    assert_eq!(pager.total_pages(), 0);
    assert!(table::table_rows(&pager).is_empty());
    let c = table::controls(&pager, 3);
    assert!(c.buttons.is_empty());
    assert!(!c.prev_enabled);
    assert!(!c.next_enabled);
}
