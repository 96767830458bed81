use std::io::Cursor;

use fortia_grid::grid::{FilterSpec, ResultPresenter, Row, SortSpec, TableSurface};
use fortia_grid::views::vacancies::{DEPT, STATE};
use fortia_grid::views::{SnapshotFormat, ViewKind};

const SNAPSHOT: &str = r#"[
    {"id": "v1", "position": "Backend Engineer", "dept": "Tecnología", "recruiter": "Lucía", "state": "CERRADA", "apps": 4, "publishedDays": 40},
    {"id": "v2", "position": "Data Analyst", "dept": "Finanzas", "recruiter": "Mario", "state": "ACTIVA", "apps": 12, "publishedDays": 2},
    {"id": "v3", "position": "Diseñador UX", "dept": "Tecnología", "recruiter": "Mario", "state": "PAUSADA", "apps": 0, "publishedDays": 15},
    {"id": "v4", "position": "QA Tester", "dept": "Tecnología", "recruiter": "Lucía", "state": "BORRADOR", "apps": "7", "publishedDays": 1}
]"#;

fn load() -> Vec<Row> {
    ViewKind::Vacancies
        .load_reader(Cursor::new(SNAPSHOT), SnapshotFormat::Json)
        .expect("snapshot loads")
}

fn ids(rows: &[&Row]) -> Vec<String> {
    rows.iter().map(|row| row.id().to_string()).collect()
}

#[test]
fn estado_sort_orders_by_lifecycle_weight() {
    let rows = load();
    let result = ViewKind::Vacancies.schema().engine().evaluate(
        &rows,
        &FilterSpec::empty(),
        &SortSpec::Key("estado".to_string()),
    );

    let states: Vec<_> = result
        .visible
        .iter()
        .map(|row| row.text(STATE).into_owned())
        .collect();
    assert_eq!(states, ["ACTIVA", "BORRADOR", "PAUSADA", "CERRADA"]);
}

#[test]
fn empty_result_shows_placeholder_and_zero_counter() {
    let rows = load();
    let engine = ViewKind::Vacancies.schema().engine();
    let filter = FilterSpec::builder()
        .search("tecnologia")
        .require(DEPT, "Finanzas")
        .build();
    let result = engine.evaluate(&rows, &filter, &SortSpec::Unsorted);

    let surface = TableSurface::with_rows(rows.iter().map(Row::id));
    let mut presenter = ResultPresenter::new(surface.clone());
    let summary = presenter.present(&result).expect("surface attached");

    assert!(summary.is_empty);
    assert_eq!(surface.counter().as_deref(), Some("Showing 0 of 4"));
    assert!(surface.placeholder_visible());
    assert!(surface.placeholder_is_last());
    assert_eq!(surface.placeholder_count(), 1);
    assert!(surface.visible_order().is_empty());
}

#[test]
fn presenting_twice_keeps_a_single_placeholder() {
    let rows = load();
    let engine = ViewKind::Vacancies.schema().engine();
    let surface = TableSurface::with_rows(rows.iter().map(Row::id));
    let mut presenter = ResultPresenter::new(surface.clone());

    let none = FilterSpec::builder().search("zzz").build();
    let all = FilterSpec::empty();
    for filter in [&none, &none, &all, &none] {
        let result = engine.evaluate(&rows, filter, &SortSpec::Key("apps".to_string()));
        presenter.present(&result).expect("surface attached");
    }

    assert_eq!(surface.placeholder_count(), 1);
    assert!(surface.placeholder_is_last());
}

#[test]
fn presented_order_follows_the_sort() {
    let rows = load();
    let engine = ViewKind::Vacancies.schema().engine();
    let result = engine.evaluate(&rows, &FilterSpec::empty(), &SortSpec::Key("fecha".to_string()));

    let surface = TableSurface::with_rows(rows.iter().map(Row::id));
    let mut presenter = ResultPresenter::new(surface.clone());
    presenter.present(&result).expect("surface attached");

    let order: Vec<String> = surface
        .visible_order()
        .into_iter()
        .map(|id| id.to_string())
        .collect();
    assert_eq!(order, ["v4", "v2", "v3", "v1"]);
    assert_eq!(ids(&result.visible), order);
    assert_eq!(surface.counter().as_deref(), Some("Showing 4 of 4"));
    assert!(!surface.placeholder_visible());
}
