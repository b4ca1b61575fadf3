use gbrowse_lib::error::SourceError;
use gbrowse_lib::filter::QuickJump;
use gbrowse_lib::model::{Cell, Column};
use gbrowse_lib::order::Direction;
use gbrowse_lib::page::PageAction;
use gbrowse_lib::query::{QueryTemplate, RowSource, SqliteSource};
use gbrowse_lib::state::{MemoryStore, StateProvider};
use gbrowse_lib::{AssembledPayload, BrowserConfig, BrowserRequest, GenericBrowser};
use rusqlite::Connection;

// Lowercase ASCII names keep SQL collation and in-memory folding in step.
const CITIES: [(&str, &str); 12] = [
    ("oslo", "norway"),
    ("paris", "france"),
    ("rome", "italy"),
    ("bergen", "norway"),
    ("lyon", "france"),
    ("turin", "italy"),
    ("nice", "france"),
    ("milan", "italy"),
    ("bodo", "norway"),
    ("2nd city", "nowhere"),
    ("lille", "france"),
    ("genoa", "italy"),
];

fn columns() -> Vec<Column> {
    vec![
        Column::new("City").search("name").order("name").quickjump("name"),
        Column::new("Country").search("country").order("country"),
    ]
}

fn connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE cities (name TEXT NOT NULL, country TEXT NOT NULL)")
        .unwrap();
    for (name, country) in CITIES {
        conn.execute("INSERT INTO cities VALUES (?1, ?2)", [name, country]).unwrap();
    }
    conn
}

fn template() -> QueryTemplate {
    QueryTemplate::new(
        "SELECT name, country FROM cities WHERE {where}",
        "SELECT COUNT(*) FROM cities WHERE {where}",
    )
}

fn open(provider: &StateProvider, instance: &str) -> GenericBrowser {
    let mut browser = GenericBrowser::open(instance, provider.clone(), BrowserConfig::default()).unwrap();
    browser.set_columns(columns()).unwrap();
    browser.set_default_order([("City", Direction::Asc)], false).unwrap();
    browser
}

fn in_memory(requests: &[BrowserRequest]) -> AssembledPayload {
    let provider = StateProvider::new(MemoryStore::new());
    let mut payload = None;
    for request in requests {
        let mut browser = open(&provider, "memory");
        browser.handle_request(request).unwrap();
        browser.add_rows(CITIES.iter().map(|(n, c)| [*n, *c])).unwrap();
        payload = Some(browser.render(None).unwrap());
    }
    payload.unwrap()
}

fn queried(conn: &Connection, requests: &[BrowserRequest]) -> AssembledPayload {
    let provider = StateProvider::new(MemoryStore::new());
    let mut payload = None;
    for request in requests {
        let mut browser = open(&provider, "query");
        browser.handle_request(request).unwrap();
        let rows = browser
            .query_order_limit(&mut SqliteSource::new(conn), &template())
            .unwrap();
        browser.add_rows(rows).unwrap();
        payload = Some(browser.render(None).unwrap());
    }
    payload.unwrap()
}

fn values(payload: &AssembledPayload) -> Vec<(String, String)> {
    payload
        .rows
        .iter()
        .map(|r| (r.cells[0].value.clone(), r.cells[1].value.clone()))
        .collect()
}

fn assert_same_page(requests: &[BrowserRequest]) {
    let conn = connection();
    let memory = in_memory(requests);
    let query = queried(&conn, requests);
    assert_eq!(values(&memory), values(&query));
    assert_eq!(memory.window, query.window);
    assert_eq!(memory.summary, query.summary);
}

#[test]
fn test_first_page_matches() {
    assert_same_page(&[BrowserRequest::new()]);
}

#[test]
fn test_paging_matches() {
    assert_same_page(&[
        BrowserRequest::new(),
        BrowserRequest::new().page(PageAction::Next),
        BrowserRequest::new().page(PageAction::Next),
    ]);
    assert_same_page(&[BrowserRequest::new().page(PageAction::Last)]);
}

#[test]
fn test_descending_order_matches() {
    assert_same_page(&[BrowserRequest::new().toggle("City"), BrowserRequest::new().page(PageAction::Next)]);
}

#[test]
fn test_keyword_matches() {
    assert_same_page(&[BrowserRequest::new().search("france")]);
    assert_same_page(&[BrowserRequest::new().search("li")]);
    assert_same_page(&[BrowserRequest::new().search("zzz")]);
}

#[test]
fn test_quickjump_matches() {
    assert_same_page(&[BrowserRequest::new().quickjump(QuickJump::Letter('B'))]);
    assert_same_page(&[BrowserRequest::new().quickjump(QuickJump::Digits)]);
    assert_same_page(&[BrowserRequest::new().search("o").quickjump(QuickJump::Letter('B'))]);
}

#[test]
fn test_like_wildcards_are_literal() {
    assert_same_page(&[BrowserRequest::new().search("%")]);
    assert_same_page(&[BrowserRequest::new().search("_")]);
}

#[test]
fn test_search_clause_and_order_clause() {
    let mut browser = open(&StateProvider::new(MemoryStore::new()), "clauses");
    assert_eq!(browser.search_clause().unwrap(), None);
    assert_eq!(browser.order_clause(Some("pinned DESC")), "ORDER BY pinned DESC, name ASC");

    browser.handle_request(&BrowserRequest::new().search("it")).unwrap();
    let clause = browser.search_clause().unwrap().unwrap();
    assert!(clause.contains("LOWER(name) LIKE '%it%'"));
    assert!(clause.contains("LOWER(country) LIKE '%it%'"));
}

struct Failing;

impl RowSource for Failing {
    fn count(&mut self, _sql: &str) -> Result<usize, SourceError> {
        Err(SourceError::message("connection lost"))
    }

    fn fetch(&mut self, _sql: &str, _limit: usize, _offset: usize) -> Result<Vec<Vec<Cell>>, SourceError> {
        Err(SourceError::message("connection lost"))
    }
}

#[test]
fn test_failing_source_yields_empty_page() {
    let mut browser = open(&StateProvider::new(MemoryStore::new()), "failing");
    let rows = browser.query_order_limit(&mut Failing, &template()).unwrap();
    assert!(rows.is_empty());
    let payload = browser.render(None).unwrap();
    assert_eq!(payload.window.total_rows, 0);
    assert_eq!(payload.summary.to_string(), "No records found");
}
