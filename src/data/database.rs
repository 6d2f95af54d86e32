use std::time::Duration;

use log::{debug, info, warn};

use super::model::{CellValue, TabularData};
use super::source::{DatabaseParams, Secret, SourceKind};
use crate::config::DatabaseConfig;
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Driver seam
// ---------------------------------------------------------------------------

/// What a driver needs to open a connection. Borrowed for the connect call only.
#[derive(Debug)]
pub struct ConnectRequest<'a> {
    pub host: &'a str,
    /// Explicit port from a `host:port` entry; the driver's default otherwise.
    pub port: Option<u16>,
    pub user: &'a str,
    pub password: &'a Secret,
    pub database: &'a str,
}

/// An open connection to one engine.
pub trait DatabaseConnection {
    /// Run `query` exactly as given and materialise the first result set.
    fn execute(&mut self, query: &str) -> Result<TabularData, LoadError>;

    /// Release the connection.
    fn close(self: Box<Self>) -> Result<(), LoadError>;
}

pub trait DatabaseDriver {
    fn connect(&self, request: &ConnectRequest<'_>)
        -> Result<Box<dyn DatabaseConnection>, LoadError>;
}

/// One driver per database kind.
pub struct DriverRegistry {
    local: Box<dyn DatabaseDriver>,
    mysql: Box<dyn DatabaseDriver>,
    postgres: Box<dyn DatabaseDriver>,
}

impl DriverRegistry {
    pub fn new(
        local: Box<dyn DatabaseDriver>,
        mysql: Box<dyn DatabaseDriver>,
        postgres: Box<dyn DatabaseDriver>,
    ) -> Self {
        Self {
            local,
            mysql,
            postgres,
        }
    }

    /// Registry backed by rusqlite, mysql and postgres.
    pub fn native(cfg: &DatabaseConfig) -> Self {
        let timeout = Duration::from_secs(cfg.connect_timeout_secs);
        Self::new(
            Box::new(SqliteDriver),
            Box::new(MySqlDriver {
                default_port: cfg.mysql_port,
                timeout,
            }),
            Box::new(PostgresDriver {
                default_port: cfg.postgres_port,
                timeout,
            }),
        )
    }

    pub fn driver_for(&self, kind: SourceKind) -> Result<&dyn DatabaseDriver, LoadError> {
        match kind {
            SourceKind::LocalDatabase => Ok(self.local.as_ref()),
            SourceKind::MySqlDatabase => Ok(self.mysql.as_ref()),
            SourceKind::PostgresDatabase => Ok(self.postgres.as_ref()),
            SourceKind::DelimitedFile | SourceKind::Spreadsheet => Err(
                LoadError::UnsupportedSource(format!("{kind} is not a database source")),
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Scoped acquisition
// ---------------------------------------------------------------------------

/// Owns an open connection and closes it exactly once: through
/// [`ScopedConnection::close`] or, on any early exit, in `Drop`.
pub struct ScopedConnection {
    kind: SourceKind,
    inner: Option<Box<dyn DatabaseConnection>>,
}

impl ScopedConnection {
    pub fn open(
        kind: SourceKind,
        driver: &dyn DatabaseDriver,
        request: &ConnectRequest<'_>,
    ) -> Result<Self, LoadError> {
        let inner = driver.connect(request)?;
        debug!("Opened {kind} connection to {:?}", request.database);
        Ok(Self {
            kind,
            inner: Some(inner),
        })
    }

    pub fn execute(&mut self, query: &str) -> Result<TabularData, LoadError> {
        match self.inner.as_mut() {
            Some(conn) => conn.execute(query),
            None => Err(LoadError::ConnectionFailed(
                "connection already closed".to_string(),
            )),
        }
    }

    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(conn) = self.inner.take() {
            match conn.close() {
                Ok(()) => debug!("Closed {} connection", self.kind),
                Err(e) => warn!("Closing {} connection reported: {e}", self.kind),
            }
        }
    }
}

impl Drop for ScopedConnection {
    fn drop(&mut self) {
        self.release();
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Connect, run the query verbatim, materialise the rows and disconnect.
///
/// The password is invalidated before returning, whatever the outcome.
pub fn load_database(
    drivers: &DriverRegistry,
    kind: SourceKind,
    params: DatabaseParams,
) -> Result<TabularData, LoadError> {
    let DatabaseParams {
        host,
        user,
        mut password,
        database,
        query,
    } = params;

    let result = drivers.driver_for(kind).and_then(|driver| {
        let (host, port) = split_host_port(&host);
        let request = ConnectRequest {
            host,
            port,
            user: &user,
            password: &password,
            database: &database,
        };
        let mut conn = ScopedConnection::open(kind, driver, &request)?;
        debug!("Executing query on {kind}: {query}");
        let table = conn.execute(&query);
        conn.close();
        table
    });

    password.invalidate();

    if let Ok(table) = &result {
        info!(
            "Loaded {} rows x {} columns from {kind}",
            table.row_count(),
            table.column_count()
        );
    }
    result
}

/// Split `host:port`. Anything whose suffix is not a port stays a plain host.
fn split_host_port(host: &str) -> (&str, Option<u16>) {
    match host.rsplit_once(':') {
        Some((name, port)) if !name.is_empty() && !name.contains(':') => match port.parse() {
            Ok(port) => (name, Some(port)),
            Err(_) => (host, None),
        },
        _ => (host, None),
    }
}

fn connection_failed(err: impl std::fmt::Display) -> LoadError {
    LoadError::ConnectionFailed(err.to_string())
}

fn query_failed(err: impl std::fmt::Display) -> LoadError {
    LoadError::QueryFailed(err.to_string())
}

// ---------------------------------------------------------------------------
// SQLite (local, file-backed)
// ---------------------------------------------------------------------------

/// Opens the `database` field as a file path. Host and credentials are unused.
pub struct SqliteDriver;

struct SqliteConnection {
    conn: rusqlite::Connection,
}

impl DatabaseDriver for SqliteDriver {
    fn connect(
        &self,
        request: &ConnectRequest<'_>,
    ) -> Result<Box<dyn DatabaseConnection>, LoadError> {
        use rusqlite::OpenFlags;

        // No CREATE flag: a mistyped path must not leave an empty database behind.
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = rusqlite::Connection::open_with_flags(request.database, flags)
            .map_err(connection_failed)?;
        Ok(Box::new(SqliteConnection { conn }))
    }
}

impl DatabaseConnection for SqliteConnection {
    fn execute(&mut self, query: &str) -> Result<TabularData, LoadError> {
        let mut stmt = self.conn.prepare(query).map_err(query_failed)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let width = columns.len();

        let mut rows = Vec::new();
        let mut cursor = stmt.query([]).map_err(query_failed)?;
        while let Some(row) = cursor.next().map_err(query_failed)? {
            let mut cells = Vec::with_capacity(width);
            for idx in 0..width {
                cells.push(sqlite_value(row.get_ref(idx).map_err(query_failed)?));
            }
            rows.push(cells);
        }
        drop(cursor);

        TabularData::new(columns, rows)
    }

    fn close(self: Box<Self>) -> Result<(), LoadError> {
        let this = *self;
        this.conn.close().map_err(|(_, e)| connection_failed(e))
    }
}

fn sqlite_value(value: rusqlite::types::ValueRef<'_>) -> CellValue {
    use rusqlite::types::ValueRef;
    match value {
        ValueRef::Null => CellValue::Null,
        ValueRef::Integer(i) => CellValue::Integer(i),
        ValueRef::Real(f) => CellValue::Float(f),
        ValueRef::Text(t) | ValueRef::Blob(t) => {
            CellValue::Text(String::from_utf8_lossy(t).into_owned())
        }
    }
}

// ---------------------------------------------------------------------------
// MySQL
// ---------------------------------------------------------------------------

pub struct MySqlDriver {
    default_port: u16,
    timeout: Duration,
}

struct MySqlConnection {
    conn: mysql::Conn,
}

impl DatabaseDriver for MySqlDriver {
    fn connect(
        &self,
        request: &ConnectRequest<'_>,
    ) -> Result<Box<dyn DatabaseConnection>, LoadError> {
        let opts = mysql::OptsBuilder::new()
            .ip_or_hostname(Some(request.host))
            .tcp_port(request.port.unwrap_or(self.default_port))
            .user(Some(request.user))
            .pass(Some(request.password.expose()))
            .db_name(Some(request.database))
            .tcp_connect_timeout(Some(self.timeout));
        let conn = mysql::Conn::new(opts).map_err(connection_failed)?;
        Ok(Box::new(MySqlConnection { conn }))
    }
}

impl DatabaseConnection for MySqlConnection {
    fn execute(&mut self, query: &str) -> Result<TabularData, LoadError> {
        use mysql::prelude::Queryable;

        let mut result = self.conn.query_iter(query).map_err(query_failed)?;
        let Some(set) = result.iter() else {
            return TabularData::new(Vec::new(), Vec::new());
        };

        let columns: Vec<String> = set
            .columns()
            .as_ref()
            .iter()
            .map(|c| c.name_str().into_owned())
            .collect();

        let mut rows = Vec::new();
        for row in set {
            let row = row.map_err(query_failed)?;
            rows.push(row.unwrap().into_iter().map(mysql_value).collect());
        }

        TabularData::new(columns, rows)
    }

    fn close(self: Box<Self>) -> Result<(), LoadError> {
        // The driver sends COM_QUIT when the connection is dropped.
        let this = *self;
        drop(this.conn);
        Ok(())
    }
}

fn mysql_value(value: mysql::Value) -> CellValue {
    use mysql::Value;
    match value {
        Value::NULL => CellValue::Null,
        // Text protocol rows arrive as bytes.
        Value::Bytes(b) => CellValue::infer(&String::from_utf8_lossy(&b)),
        Value::Int(i) => CellValue::Integer(i),
        Value::UInt(u) => match i64::try_from(u) {
            Ok(i) => CellValue::Integer(i),
            Err(_) => CellValue::Float(u as f64),
        },
        Value::Float(f) => CellValue::Float(f as f64),
        Value::Double(f) => CellValue::Float(f),
        Value::Date(y, mo, d, h, mi, s, us) => CellValue::Text(format!(
            "{y:04}-{mo:02}-{d:02} {h:02}:{mi:02}:{s:02}.{us:06}"
        )),
        Value::Time(neg, days, h, mi, s, us) => CellValue::Text(format!(
            "{}{} days {h:02}:{mi:02}:{s:02}.{us:06}",
            if neg { "-" } else { "" },
            days
        )),
    }
}

// ---------------------------------------------------------------------------
// PostgreSQL
// ---------------------------------------------------------------------------

pub struct PostgresDriver {
    default_port: u16,
    timeout: Duration,
}

struct PostgresConnection {
    client: postgres::Client,
}

impl DatabaseDriver for PostgresDriver {
    fn connect(
        &self,
        request: &ConnectRequest<'_>,
    ) -> Result<Box<dyn DatabaseConnection>, LoadError> {
        let mut config = postgres::Config::new();
        config
            .host(request.host)
            .port(request.port.unwrap_or(self.default_port))
            .user(request.user)
            .password(request.password.expose())
            .dbname(request.database)
            .connect_timeout(self.timeout);
        let client = config
            .connect(postgres::NoTls)
            .map_err(connection_failed)?;
        Ok(Box::new(PostgresConnection { client }))
    }
}

/// One simple-query protocol message, reduced to what the table needs.
enum SimpleEvent {
    Columns(Vec<String>),
    Row(Vec<String>, Vec<CellValue>),
    Complete,
}

/// Fold the message stream into the first result set. A statement that
/// describes columns but returns no rows keeps its columns.
fn first_result_set<I>(events: I) -> Result<TabularData, LoadError>
where
    I: IntoIterator<Item = SimpleEvent>,
{
    let mut columns: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for event in events {
        match event {
            SimpleEvent::Columns(names) => {
                if columns.is_some() {
                    break;
                }
                columns = Some(names);
            }
            SimpleEvent::Row(names, cells) => {
                columns.get_or_insert(names);
                rows.push(cells);
            }
            SimpleEvent::Complete if columns.is_some() => break,
            SimpleEvent::Complete => {}
        }
    }
    TabularData::new(columns.unwrap_or_default(), rows)
}

impl DatabaseConnection for PostgresConnection {
    fn execute(&mut self, query: &str) -> Result<TabularData, LoadError> {
        use postgres::SimpleQueryMessage;

        // The simple query protocol sends the text as-is and returns text cells.
        let messages = self.client.simple_query(query).map_err(query_failed)?;

        let events = messages.into_iter().filter_map(|message| match message {
            SimpleQueryMessage::RowDescription(description) => Some(SimpleEvent::Columns(
                description.iter().map(|c| c.name().to_string()).collect(),
            )),
            SimpleQueryMessage::Row(row) => {
                let names = row.columns().iter().map(|c| c.name().to_string()).collect();
                let cells = (0..row.len())
                    .map(|idx| row.get(idx).map_or(CellValue::Null, CellValue::infer))
                    .collect();
                Some(SimpleEvent::Row(names, cells))
            }
            SimpleQueryMessage::CommandComplete(_) => Some(SimpleEvent::Complete),
            _ => None,
        });
        first_result_set(events)
    }

    fn close(self: Box<Self>) -> Result<(), LoadError> {
        let this = *self;
        this.client.close().map_err(connection_failed)
    }
}

// ---------------------------------------------------------------------------
// In-memory fake used by tests across the crate
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod fake {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    /// Counters shared between a fake driver and the test holding it.
    #[derive(Debug, Default)]
    pub struct Calls {
        pub connects: usize,
        pub closes: usize,
        pub queries: Vec<String>,
        pub last_host: Option<(String, Option<u16>)>,
        pub password_seen: Option<String>,
    }

    pub enum Behaviour {
        Rows(TabularData),
        RefuseConnection(&'static str),
        FailQuery(&'static str),
    }

    pub struct FakeDriver {
        pub calls: Rc<RefCell<Calls>>,
        behaviour: Rc<Behaviour>,
    }

    impl FakeDriver {
        pub fn new(behaviour: Behaviour) -> (Self, Rc<RefCell<Calls>>) {
            let calls = Rc::new(RefCell::new(Calls::default()));
            (
                Self {
                    calls: Rc::clone(&calls),
                    behaviour: Rc::new(behaviour),
                },
                calls,
            )
        }
    }

    struct FakeConnection {
        calls: Rc<RefCell<Calls>>,
        behaviour: Rc<Behaviour>,
    }

    impl DatabaseDriver for FakeDriver {
        fn connect(
            &self,
            request: &ConnectRequest<'_>,
        ) -> Result<Box<dyn DatabaseConnection>, LoadError> {
            let mut calls = self.calls.borrow_mut();
            calls.last_host = Some((request.host.to_string(), request.port));
            calls.password_seen = Some(request.password.expose().to_string());
            if let Behaviour::RefuseConnection(msg) = &*self.behaviour {
                return Err(LoadError::ConnectionFailed(msg.to_string()));
            }
            calls.connects += 1;
            Ok(Box::new(FakeConnection {
                calls: Rc::clone(&self.calls),
                behaviour: Rc::clone(&self.behaviour),
            }))
        }
    }

    impl DatabaseConnection for FakeConnection {
        fn execute(&mut self, query: &str) -> Result<TabularData, LoadError> {
            self.calls.borrow_mut().queries.push(query.to_string());
            match &*self.behaviour {
                Behaviour::Rows(table) => Ok(table.clone()),
                Behaviour::FailQuery(msg) => Err(LoadError::QueryFailed(msg.to_string())),
                Behaviour::RefuseConnection(_) => unreachable!("never connected"),
            }
        }

        fn close(self: Box<Self>) -> Result<(), LoadError> {
            self.calls.borrow_mut().closes += 1;
            Ok(())
        }
    }

    pub struct Unreachable;

    impl DatabaseDriver for Unreachable {
        fn connect(
            &self,
            _request: &ConnectRequest<'_>,
        ) -> Result<Box<dyn DatabaseConnection>, LoadError> {
            panic!("this driver must not be used")
        }
    }

    /// Registry where only `kind` is backed by `driver`.
    pub fn registry_with(kind: SourceKind, driver: FakeDriver) -> DriverRegistry {
        let boxed: Box<dyn DatabaseDriver> = Box::new(driver);
        match kind {
            SourceKind::LocalDatabase => {
                DriverRegistry::new(boxed, Box::new(Unreachable), Box::new(Unreachable))
            }
            SourceKind::MySqlDatabase => {
                DriverRegistry::new(Box::new(Unreachable), boxed, Box::new(Unreachable))
            }
            _ => DriverRegistry::new(Box::new(Unreachable), Box::new(Unreachable), boxed),
        }
    }

    pub fn params(host: &str, query: &str) -> DatabaseParams {
        DatabaseParams {
            host: host.to_string(),
            user: "analyst".to_string(),
            password: Secret::new("s3cret"),
            database: "shop".to_string(),
            query: query.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::*;
    use super::*;
    use tempfile::TempDir;

    fn people() -> TabularData {
        TabularData::new(
            vec!["id".into(), "name".into()],
            vec![
                vec![CellValue::Integer(1), CellValue::Text("Ada".into())],
                vec![CellValue::Integer(2), CellValue::Text("Linus".into())],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_split_host_port() {
        assert_eq!(split_host_port("db.local"), ("db.local", None));
        assert_eq!(split_host_port("db.local:5433"), ("db.local", Some(5433)));
        assert_eq!(split_host_port("db.local:abc"), ("db.local:abc", None));
        assert_eq!(split_host_port("::1"), ("::1", None));
        assert_eq!(split_host_port(""), ("", None));
    }

    #[test]
    fn test_success_closes_once_and_passes_query_verbatim() {
        let (driver, calls) = FakeDriver::new(Behaviour::Rows(people()));
        let drivers = registry_with(SourceKind::MySqlDatabase, driver);
        let query = "SELECT * FROM people WHERE name = 'Ada' OR 1=1; -- raw";

        let table = load_database(
            &drivers,
            SourceKind::MySqlDatabase,
            params("db:3307", query),
        )
        .unwrap();

        assert_eq!(table, people());
        let calls = calls.borrow();
        assert_eq!(calls.connects, 1);
        assert_eq!(calls.closes, 1);
        assert_eq!(calls.queries, vec![query.to_string()]);
        assert_eq!(calls.last_host, Some(("db".to_string(), Some(3307))));
        assert_eq!(calls.password_seen.as_deref(), Some("s3cret"));
    }

    #[test]
    fn test_query_failure_still_closes_connection() {
        let (driver, calls) = FakeDriver::new(Behaviour::FailQuery("syntax error at or near \"SELEC\""));
        let drivers = registry_with(SourceKind::PostgresDatabase, driver);

        let err = load_database(
            &drivers,
            SourceKind::PostgresDatabase,
            params("localhost", "SELEC 1"),
        )
        .unwrap_err();

        assert_eq!(
            err,
            LoadError::QueryFailed("syntax error at or near \"SELEC\"".to_string())
        );
        let calls = calls.borrow();
        assert_eq!(calls.connects, 1);
        assert_eq!(calls.closes, 1);
    }

    #[test]
    fn test_refused_connection_never_executes() {
        let (driver, calls) = FakeDriver::new(Behaviour::RefuseConnection("Access denied for user"));
        let drivers = registry_with(SourceKind::MySqlDatabase, driver);

        let err = load_database(&drivers, SourceKind::MySqlDatabase, params("db", "SELECT 1"))
            .unwrap_err();

        assert_eq!(
            err,
            LoadError::ConnectionFailed("Access denied for user".to_string())
        );
        let calls = calls.borrow();
        assert_eq!(calls.connects, 0);
        assert_eq!(calls.closes, 0);
        assert!(calls.queries.is_empty());
    }

    #[test]
    fn test_file_kind_is_not_a_database() {
        let (driver, _calls) = FakeDriver::new(Behaviour::Rows(people()));
        let drivers = registry_with(SourceKind::LocalDatabase, driver);
        let err = load_database(&drivers, SourceKind::Spreadsheet, params("", "SELECT 1"))
            .unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedSource(_)));
    }

    #[test]
    fn test_scoped_connection_closes_on_drop() {
        let (driver, calls) = FakeDriver::new(Behaviour::Rows(people()));
        let secret = Secret::new("pw");
        let request = ConnectRequest {
            host: "h",
            port: None,
            user: "u",
            password: &secret,
            database: "d",
        };
        {
            let mut conn = ScopedConnection::open(SourceKind::MySqlDatabase, &driver, &request).unwrap();
            conn.execute("SELECT 1").unwrap();
        }
        assert_eq!(calls.borrow().closes, 1);
    }

    fn sqlite_fixture(dir: &TempDir) -> String {
        let path = dir.path().join("shop.db");
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE items (id INTEGER, name TEXT, price REAL, note TEXT);
             INSERT INTO items VALUES (1, 'pen', 1.5, NULL);
             INSERT INTO items VALUES (2, 'ink', 12.0, 'blue');",
        )
        .unwrap();
        path.to_string_lossy().into_owned()
    }

    fn sqlite_params(database: String, query: &str) -> DatabaseParams {
        DatabaseParams {
            host: String::new(),
            user: String::new(),
            password: Secret::default(),
            database,
            query: query.to_string(),
        }
    }

    #[test]
    fn test_sqlite_roundtrip() {
        let dir = TempDir::new().unwrap();
        let db = sqlite_fixture(&dir);
        let drivers = DriverRegistry::native(&DatabaseConfig::default());

        let table = load_database(
            &drivers,
            SourceKind::LocalDatabase,
            sqlite_params(db, "SELECT id, name, price, note FROM items ORDER BY id"),
        )
        .unwrap();

        assert_eq!(table.columns(), &["id", "name", "price", "note"]);
        assert_eq!(
            table.rows()[0],
            vec![
                CellValue::Integer(1),
                CellValue::Text("pen".into()),
                CellValue::Float(1.5),
                CellValue::Null,
            ]
        );
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_sqlite_bad_query_is_query_failed() {
        let dir = TempDir::new().unwrap();
        let db = sqlite_fixture(&dir);
        let drivers = DriverRegistry::native(&DatabaseConfig::default());

        let err = load_database(
            &drivers,
            SourceKind::LocalDatabase,
            sqlite_params(db, "SELECT * FROM missing"),
        )
        .unwrap_err();

        match err {
            LoadError::QueryFailed(msg) => assert!(msg.contains("no such table")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_sqlite_missing_file_is_connection_failed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.db");
        let drivers = DriverRegistry::native(&DatabaseConfig::default());

        let err = load_database(
            &drivers,
            SourceKind::LocalDatabase,
            sqlite_params(path.to_string_lossy().into_owned(), "SELECT 1"),
        )
        .unwrap_err();

        assert!(matches!(err, LoadError::ConnectionFailed(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_mysql_value_mapping() {
        assert_eq!(mysql_value(mysql::Value::NULL), CellValue::Null);
        assert_eq!(
            mysql_value(mysql::Value::Bytes(b"42".to_vec())),
            CellValue::Integer(42)
        );
        assert_eq!(
            mysql_value(mysql::Value::Bytes(b"Ada".to_vec())),
            CellValue::Text("Ada".into())
        );
        assert_eq!(
            mysql_value(mysql::Value::UInt(u64::MAX)),
            CellValue::Float(u64::MAX as f64)
        );
        assert_eq!(
            mysql_value(mysql::Value::Date(2024, 2, 29, 13, 5, 0, 0)),
            CellValue::Text("2024-02-29 13:05:00.000000".into())
        );
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_zero_row_result_keeps_columns() {
        let table = first_result_set([
            SimpleEvent::Columns(names(&["id", "name"])),
            SimpleEvent::Complete,
        ])
        .unwrap();
        assert_eq!(table.columns(), &["id", "name"]);
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_only_first_result_set_is_kept() {
        let table = first_result_set([
            SimpleEvent::Complete,
            SimpleEvent::Columns(names(&["a"])),
            SimpleEvent::Complete,
            SimpleEvent::Columns(names(&["b"])),
            SimpleEvent::Row(names(&["b"]), vec![CellValue::Integer(2)]),
            SimpleEvent::Complete,
        ])
        .unwrap();
        assert_eq!(table.columns(), &["a"]);
        assert_eq!(table.row_count(), 0);

        let table = first_result_set([
            SimpleEvent::Columns(names(&["n"])),
            SimpleEvent::Row(names(&["n"]), vec![CellValue::Integer(1)]),
            SimpleEvent::Complete,
            SimpleEvent::Columns(names(&["m"])),
            SimpleEvent::Row(names(&["m"]), vec![CellValue::Integer(9)]),
        ])
        .unwrap();
        assert_eq!(table.columns(), &["n"]);
        assert_eq!(table.rows(), &[vec![CellValue::Integer(1)]]);
    }

    #[test]
    fn test_statement_without_result_set_is_empty() {
        let table = first_result_set([SimpleEvent::Complete]).unwrap();
        assert_eq!(table.column_count(), 0);
        assert_eq!(table.row_count(), 0);
    }
}
