//! The browser instance: configuration, row intake, request handling and
//! assembly.

use crate::config::BrowserConfig;
use crate::error::ConfigError;
use crate::error::Error;
use crate::filter::Filter;
use crate::filter::search_filter;
use crate::model::Cell;
use crate::model::Column;
use crate::model::ColumnRegistry;
use crate::model::Row;
use crate::model::RowAction;
use crate::model::push_action;
use crate::order::Direction;
use crate::order::OrderEntry;
use crate::order::OrderStack;
use crate::order::apply_order;
use crate::page::PageAction;
use crate::page::Window;
use crate::payload;
use crate::payload::AssembledPayload;
use crate::payload::PerPageChoice;
use crate::query::QueryTemplate;
use crate::query::RowSource;
use crate::query::sql;
use crate::request::BrowserRequest;
use crate::state::StateProvider;
use crate::state::ViewState;

/// A sortable, searchable, paged table over caller-supplied rows.
///
/// A browser is opened per request under a caller-chosen instance name.
/// Opening loads the instance's [`ViewState`]; [`GenericBrowser::render`]
/// stores it back.
///
/// # Example
///
/// ```
/// use gbrowse_lib::{BrowserConfig, BrowserRequest, GenericBrowser};
/// use gbrowse_lib::model::Column;
/// use gbrowse_lib::order::Direction;
/// use gbrowse_lib::state::{MemoryStore, StateProvider};
///
/// let provider = StateProvider::new(MemoryStore::new());
/// let mut browser = GenericBrowser::open("people", provider, BrowserConfig::default()).unwrap();
/// browser
///     .set_columns([Column::new("Name").search("name").order("name").quickjump("name")])
///     .unwrap();
/// browser.set_default_order([("Name", Direction::Asc)], false).unwrap();
/// browser.handle_request(&BrowserRequest::new().search("a")).unwrap();
/// for name in ["bob", "Ann", "Alice"] {
///     browser.add_row([name]).unwrap();
/// }
///
/// let payload = browser.render(None).unwrap();
/// let names: Vec<_> = payload.rows.iter().map(|r| r.cells[0].value.as_str()).collect();
/// assert_eq!(names, ["Alice", "Ann"]);
/// assert_eq!(payload.summary.to_string(), "Records 1 to 2 of 2");
/// ```
pub struct GenericBrowser {
    instance: String,
    provider: StateProvider,
    config: BrowserConfig,
    state: ViewState,
    registry: Option<ColumnRegistry>,
    rows: Vec<Row>,
    forced_page_size: Option<usize>,
    pending_page: Option<PageAction>,
    external_window: Option<Window>,
    custom_label: Option<String>,
}

impl GenericBrowser {
    /// Opens the browser instance `instance`, loading its view state.
    pub fn open(instance: impl Into<String>, provider: StateProvider, config: BrowserConfig) -> Result<Self, Error> {
        let instance = instance.into();
        let state = provider.load(&instance)?;
        Ok(Self {
            instance,
            provider,
            config,
            state,
            registry: None,
            rows: Vec::new(),
            forced_page_size: None,
            pending_page: None,
            external_window: None,
            custom_label: None,
        })
    }

    pub fn instance(&self) -> &str {
        &self.instance
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Current view state, including changes not yet stored.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Current order stack.
    pub fn order(&self) -> &OrderStack {
        &self.state.order
    }

    /// Registers the columns. Rows added before are discarded.
    pub fn set_columns<I, C>(&mut self, columns: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = C>,
        C: Into<Column>,
    {
        let registry = ColumnRegistry::new(columns.into_iter().map(Into::into).collect())?;
        if self.registry.is_some() {
            log::warn!("columns of '{}' replaced, {} rows dropped", self.instance, self.rows.len());
        }
        self.registry = Some(registry);
        self.rows.clear();
        Ok(())
    }

    /// The registered columns.
    pub fn registry(&self) -> Result<&ColumnRegistry, ConfigError> {
        self.registry.as_ref().ok_or(ConfigError::MissingColumns)
    }

    /// Seeds the order stack from column labels.
    ///
    /// Only takes effect before the instance's first render unless `force`
    /// is set. A label starting with `:` is a raw order key not bound to a
    /// column. The seeded stack is remembered for reset requests.
    pub fn set_default_order<I, S>(&mut self, order: I, force: bool) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (S, Direction)>,
        S: AsRef<str>,
    {
        let order: Vec<(S, Direction)> = order.into_iter().collect();
        if order.is_empty() || (self.state.first_display && !force) {
            return Ok(());
        }

        let registry = self.registry()?;
        let mut entries = Vec::with_capacity(order.len());
        for (label, direction) in &order {
            let label = label.as_ref();
            let key = match label.strip_prefix(':') {
                Some(raw) => raw,
                None => registry.order_key(label)?,
            };
            entries.push(OrderEntry::new(label, key, *direction));
        }

        let stack = OrderStack::new(entries);
        log::debug!("default order of '{}': {}", self.instance, stack.describe());
        self.state.order = stack.clone();
        self.state.default_order = Some(stack);
        Ok(())
    }

    /// Sets the page size. A size outside the allowed set becomes the
    /// default page size.
    pub fn set_per_page(&mut self, size: usize) {
        self.state.per_page = Some(self.config.sanitize_page_size(size));
    }

    /// Fixes the page size to any positive value and hides the selector.
    ///
    /// The forced size lasts for this browser only; the page size stored in
    /// the view state is left alone.
    pub fn force_per_page(&mut self, size: usize) -> Result<(), ConfigError> {
        if size == 0 {
            return Err(ConfigError::InvalidPerPage(size));
        }
        self.forced_page_size = Some(size);
        Ok(())
    }

    /// Label shown by the renderer above the table.
    pub fn set_custom_label(&mut self, label: impl Into<String>) {
        self.custom_label = Some(label.into());
    }

    /// Applies one request's user interaction.
    ///
    /// Order, search, quick-jump and page size changes take effect at once;
    /// the page action is applied by the next window computation.
    pub fn handle_request(&mut self, request: &BrowserRequest) -> Result<(), ConfigError> {
        if request.reset_order {
            self.state.order = self.state.default_order.clone().unwrap_or_default();
            log::debug!("order of '{}' reset to: {}", self.instance, self.state.order.describe());
        }

        if let Some(label) = &request.change_order {
            let key = self.registry()?.order_key(label)?.to_string();
            self.state.order.toggle(label, &key);
        }

        if let Some(keyword) = &request.keyword {
            let keyword = Some(keyword.clone()).filter(|k| !k.is_empty());
            if keyword != self.state.keyword {
                self.state.keyword = keyword;
                self.state.offset = 0;
            }
        }

        if let Some(target) = request.quickjump {
            if target != self.state.quickjump {
                self.state.quickjump = target;
                self.state.offset = 0;
            }
        }

        if let Some(size) = request.per_page {
            if self.forced_page_size.is_some() {
                log::debug!("page size of '{}' is forced, ignoring {}", self.instance, size);
            } else {
                self.set_per_page(size);
            }
        }

        if request.page.is_some() {
            self.pending_page = request.page;
        }
        Ok(())
    }

    /// Starts a row with builder access to its actions and side channels.
    pub fn new_row(&mut self) -> RowBuilder<'_> {
        RowBuilder {
            browser: self,
            cells: Vec::new(),
            actions: Vec::new(),
            attributes: None,
            scripts: Vec::new(),
            actions_enabled: true,
        }
    }

    /// Adds a row of cells, one per column in registry order.
    pub fn add_row<I, C>(&mut self, cells: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        self.new_row().cells(cells).add().map(|_| ())
    }

    /// Adds several rows.
    pub fn add_rows<R, I, C>(&mut self, rows: R) -> Result<(), ConfigError>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        rows.into_iter().try_for_each(|row| self.add_row(row))
    }

    fn push_row(&mut self, mut row: Row) -> Result<usize, ConfigError> {
        let expected = self.registry()?.len();
        if row.cells.len() != expected {
            return Err(ConfigError::RowArity {
                expected,
                actual: row.cells.len(),
            });
        }
        if let Some(window) = self.external_window {
            if self.rows.len() >= window.page_size {
                return Err(ConfigError::TooManyRows {
                    limit: window.page_size,
                });
            }
        }

        row.index = self.rows.len();
        self.rows.push(row);
        Ok(self.rows.len() - 1)
    }

    /// The search predicate for the current view state.
    pub fn search_filter(&self) -> Result<Option<Filter>, ConfigError> {
        Ok(search_filter(
            self.registry()?,
            self.state.keyword.as_deref(),
            self.state.quickjump,
            self.config.split_keywords,
        ))
    }

    /// The search predicate as a SQL expression, `None` when nothing is
    /// searched.
    pub fn search_clause(&self) -> Result<Option<String>, ConfigError> {
        Ok(self.search_filter()?.as_ref().map(sql::filter_to_sql))
    }

    /// The `ORDER BY` clause for the current order, led by `forced`.
    pub fn order_clause(&self, forced: Option<&str>) -> String {
        sql::order_to_sql(&self.state.order, forced)
    }

    /// Computes the page window for `total` externally counted rows.
    ///
    /// Switches the browser to externally paged mode: rows added afterwards
    /// are the page itself and are rendered without filtering, sorting or
    /// slicing.
    pub fn limit(&mut self, total: usize) -> Window {
        let window = window_for(
            &mut self.state,
            &self.config,
            self.forced_page_size,
            self.pending_page.take(),
            total,
        );
        self.external_window = Some(window);
        window
    }

    /// Fetches the current page through `source`.
    ///
    /// Fills the template's `{where}` with the search predicate, counts,
    /// computes the window and fetches at most one page in the current
    /// order. A failing source is logged and treated as returning no rows.
    /// The caller adds the returned rows, with their actions, before
    /// rendering.
    pub fn query_order_limit<S>(&mut self, source: &mut S, template: &QueryTemplate) -> Result<Vec<Vec<Cell>>, Error>
    where
        S: RowSource + ?Sized,
    {
        let filter = self.search_filter()?;

        let total = match source.count(&template.count_sql(filter.as_ref())) {
            Ok(total) => total,
            Err(e) => {
                log::error!("row count for '{}' failed: {}", self.instance, e);
                0
            }
        };

        let window = self.limit(total);
        if total == 0 {
            return Ok(Vec::new());
        }

        let select = template.select_sql(filter.as_ref(), &self.state.order);
        log::trace!("'{}' fetching {:?}: {}", self.instance, window, select);
        let mut rows = match source.fetch(&select, window.page_size, window.offset) {
            Ok(rows) => rows,
            Err(e) => {
                log::error!("row fetch for '{}' failed: {}", self.instance, e);
                Vec::new()
            }
        };
        if rows.len() > window.page_size {
            log::warn!(
                "row source returned {} rows for a page of {}, truncating",
                rows.len(),
                window.page_size
            );
            rows.truncate(window.page_size);
        }
        Ok(rows)
    }

    /// Builds the page from plain headers and a data matrix.
    ///
    /// Every column sorts by its own position; `default_order` names a
    /// header.
    pub fn simple_table<H, R, I, C>(
        &mut self,
        headers: H,
        data: R,
        default_order: Option<(&str, Direction)>,
    ) -> Result<AssembledPayload, Error>
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        let columns = headers
            .into_iter()
            .enumerate()
            .map(|(position, name)| Column::new(name).order(position.to_string()));
        self.set_columns(columns)?;
        if let Some(order) = default_order {
            self.set_default_order([order], false)?;
        }
        self.add_rows(data)?;
        self.render(None)
    }

    /// Assembles the current page and stores the view state.
    ///
    /// In memory mode the submitted rows are filtered, sorted and sliced;
    /// in externally paged mode they are taken as the page.
    pub fn render(&mut self, template: Option<&str>) -> Result<AssembledPayload, Error> {
        let registry = self.registry.as_ref().ok_or(ConfigError::MissingColumns)?;

        let (window, rows) = match self.external_window {
            Some(window) => {
                let rows = self.rows.iter().map(|row| payload::render_row(registry, row)).collect();
                (window, rows)
            }
            None => {
                let filter = search_filter(
                    registry,
                    self.state.keyword.as_deref(),
                    self.state.quickjump,
                    self.config.split_keywords,
                );
                let mut matching: Vec<Row> = self
                    .rows
                    .iter()
                    .filter(|row| filter.as_ref().is_none_or(|f| f.matches_row(registry, row)))
                    .cloned()
                    .collect();
                apply_order(registry, &self.state.order, &mut matching);

                let window = window_for(
                    &mut self.state,
                    &self.config,
                    self.forced_page_size,
                    self.pending_page.take(),
                    matching.len(),
                );
                let rows = matching
                    .get(window.range())
                    .unwrap_or_default()
                    .iter()
                    .map(|row| payload::render_row(registry, row))
                    .collect();
                (window, rows)
            }
        };
        log::trace!(
            "'{}' rendering {:?} of {} submitted rows",
            self.instance,
            window,
            self.rows.len()
        );

        self.state.first_display = true;
        self.provider.store(&self.instance, &self.state)?;

        Ok(AssembledPayload {
            id: self.instance.clone(),
            template: template.map(str::to_string),
            custom_label: self.custom_label.clone(),
            columns: payload::column_headers(registry, &self.state.order),
            rows,
            summary: payload::summary(&window, self.config.show_no_records_message),
            window,
            links: payload::page_links(&window),
            page_picker: payload::page_picker(&window, self.config.page_picker_threshold),
            per_page: self.forced_page_size.is_none().then(|| PerPageChoice {
                choices: self.config.allowed_page_sizes.clone(),
                selected: window.page_size,
            }),
            search: registry
                .has_search()
                .then(|| self.state.keyword.clone().unwrap_or_default()),
            quickjump: registry
                .has_quickjump()
                .then(|| payload::quickjump_bar(self.state.quickjump)),
            order_history: self.config.order_history.then(|| self.state.order.describe()),
            action_width: self.rows.iter().map(Row::action_width).max().unwrap_or(0),
            actions_enabled: self.rows.iter().any(|row| !row.actions().is_empty()),
        })
    }
}

/// Resolves the page size and computes the window.
///
/// The offset is always persisted; the page size only when it is not forced.
fn window_for(
    state: &mut ViewState,
    config: &BrowserConfig,
    forced: Option<usize>,
    action: Option<PageAction>,
    total: usize,
) -> Window {
    let page_size = match (forced, state.per_page) {
        (Some(size), _) => size,
        (None, Some(size)) => config.sanitize_page_size(size),
        (None, None) => config.fallback_page_size(),
    };

    let window = Window::compute(state.offset, page_size, total, action);
    log::debug!("window {:?} after {:?}", window, action);
    state.offset = window.offset;
    if forced.is_none() {
        state.per_page = Some(window.page_size);
    }
    window
}

/// Builder for one row, returned by [`GenericBrowser::new_row`].
pub struct RowBuilder<'a> {
    browser: &'a mut GenericBrowser,
    cells: Vec<Cell>,
    actions: Vec<RowAction>,
    attributes: Option<String>,
    scripts: Vec<String>,
    actions_enabled: bool,
}

impl RowBuilder<'_> {
    /// Appends cells.
    pub fn cells<I, C>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        self.cells.extend(cells.into_iter().map(Into::into));
        self
    }

    /// Attaches an action. An action of the same kind is replaced.
    pub fn action(mut self, action: RowAction) -> Self {
        push_action(&mut self.actions, action);
        self
    }

    /// Sets attributes of the whole row.
    pub fn attributes(mut self, attributes: impl Into<String>) -> Self {
        self.attributes = Some(attributes.into());
        self
    }

    /// Attaches a client-side script hook.
    pub fn script(mut self, script: impl AsRef<str>) -> Self {
        let script = script.as_ref().trim_end_matches(';');
        if !script.is_empty() {
            self.scripts.push(script.to_string());
        }
        self
    }

    /// Hides the action column for this row.
    pub fn no_actions(mut self) -> Self {
        self.actions_enabled = false;
        self
    }

    /// Adds the row, returning its submission index.
    pub fn add(self) -> Result<usize, ConfigError> {
        let mut row = Row::new(0, self.cells.into_iter().map(Cell::into_rich).collect());
        row.actions = self.actions;
        row.attributes = self.attributes;
        row.scripts = self.scripts;
        row.actions_enabled = self.actions_enabled;
        self.browser.push_row(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ActionKind;
    use crate::state::MemoryStore;

    fn browser() -> GenericBrowser {
        let provider = StateProvider::new(MemoryStore::new());
        let mut browser = GenericBrowser::open("test", provider, BrowserConfig::default()).unwrap();
        browser
            .set_columns([
                Column::new("Name").search("name").order("name"),
                Column::new("Age").order("age"),
            ])
            .unwrap();
        browser
    }

    #[test]
    fn test_rows_before_columns_fail() {
        let provider = StateProvider::new(MemoryStore::new());
        let mut browser = GenericBrowser::open("x", provider, BrowserConfig::default()).unwrap();
        assert!(matches!(browser.add_row(["a"]), Err(ConfigError::MissingColumns)));
        assert!(matches!(
            browser.render(None),
            Err(Error::Config(ConfigError::MissingColumns))
        ));
    }

    #[test]
    fn test_row_arity_checked() {
        let mut browser = browser();
        assert!(matches!(
            browser.add_row(["only one"]),
            Err(ConfigError::RowArity { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_unknown_order_label_fails() {
        let mut browser = browser();
        assert!(matches!(
            browser.set_default_order([("Missing", Direction::Asc)], false),
            Err(ConfigError::UnknownColumn { .. })
        ));
        assert!(matches!(
            browser.handle_request(&BrowserRequest::new().toggle("Missing")),
            Err(ConfigError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn test_raw_default_order_key() {
        let mut browser = browser();
        browser
            .set_default_order([(":pinned", Direction::Desc), ("Name", Direction::Asc)], false)
            .unwrap();
        assert_eq!(browser.order_clause(None), "ORDER BY pinned DESC, name ASC");
    }

    #[test]
    fn test_force_per_page_rejects_zero() {
        let mut browser = browser();
        assert!(matches!(browser.force_per_page(0), Err(ConfigError::InvalidPerPage(0))));
        browser.force_per_page(7).unwrap();
        browser.handle_request(&BrowserRequest::new().per_page(10)).unwrap();
        browser.add_rows((0..9).map(|i| vec![format!("n{i}"), i.to_string()])).unwrap();
        let payload = browser.render(None).unwrap();
        assert_eq!(payload.window.page_size, 7);
        assert!(payload.per_page.is_none());
        assert_eq!(browser.state().per_page, None);
    }

    #[test]
    fn test_row_builder_side_channels() {
        let mut browser = browser();
        let index = browser
            .new_row()
            .cells(["Zed", "40"])
            .action(RowAction::new(ActionKind::Delete, "Delete"))
            .action(RowAction::new(ActionKind::View, "View").size(2))
            .attributes("data-id=\"9\"")
            .script("highlight(9);")
            .add()
            .unwrap();
        assert_eq!(index, 0);
        browser.new_row().cells(["Amy", "30"]).no_actions().add().unwrap();
        browser.handle_request(&BrowserRequest::new().toggle("Name")).unwrap();

        let payload = browser.render(None).unwrap();
        assert_eq!(payload.rows[0].index, 1);
        assert!(!payload.rows[0].actions_enabled);
        let zed = &payload.rows[1];
        assert_eq!(zed.index, 0);
        assert_eq!(zed.actions[0].label, "View");
        assert_eq!(zed.actions[1].label, "Delete");
        assert_eq!(zed.attributes.as_deref(), Some("data-id=\"9\""));
        assert_eq!(zed.scripts, ["highlight(9)"]);
        assert_eq!(payload.action_width, 3);
        assert!(payload.actions_enabled);
    }

    #[test]
    fn test_external_mode_caps_rows() {
        let mut browser = browser();
        let window = browser.limit(12);
        assert_eq!((window.offset, window.page_size), (0, 5));
        browser.add_rows((0..5).map(|i| vec![format!("n{i}"), i.to_string()])).unwrap();
        assert!(matches!(
            browser.add_row(["extra", "1"]),
            Err(ConfigError::TooManyRows { limit: 5 })
        ));
        let payload = browser.render(None).unwrap();
        assert_eq!(payload.rows.len(), 5);
        assert_eq!(payload.summary.to_string(), "Records 1 to 5 of 12");
    }

    #[test]
    fn test_keyword_change_resets_offset() {
        let mut browser = browser();
        browser.add_rows((0..12).map(|i| vec![format!("n{i}"), i.to_string()])).unwrap();
        browser.handle_request(&BrowserRequest::new().page(PageAction::Last)).unwrap();
        assert_eq!(browser.render(None).unwrap().window.offset, 10);

        browser.handle_request(&BrowserRequest::new().search("n1")).unwrap();
        assert_eq!(browser.state().offset, 0);
        browser.handle_request(&BrowserRequest::new().search("n1")).unwrap();
        assert_eq!(browser.state().keyword.as_deref(), Some("n1"));
    }

    #[test]
    fn test_simple_table() {
        let provider = StateProvider::new(MemoryStore::new());
        let mut browser = GenericBrowser::open("simple", provider, BrowserConfig::default()).unwrap();
        let payload = browser
            .simple_table(
                ["Fruit", "Count"],
                [["pear", "3"], ["apple", "9"], ["fig", "1"]],
                Some(("Fruit", Direction::Asc)),
            )
            .unwrap();
        let fruits: Vec<_> = payload.rows.iter().map(|r| r.cells[0].value.as_str()).collect();
        assert_eq!(fruits, ["apple", "fig", "pear"]);
        assert_eq!(payload.columns[0].sort, Some(Direction::Asc));
    }
}
