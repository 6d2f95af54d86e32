use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// SourceKind – where the data comes from
// ---------------------------------------------------------------------------

/// The closed set of supported origins, in the order they are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    DelimitedFile,
    Spreadsheet,
    LocalDatabase,
    MySqlDatabase,
    PostgresDatabase,
}

impl SourceKind {
    pub const ALL: [SourceKind; 5] = [
        SourceKind::DelimitedFile,
        SourceKind::Spreadsheet,
        SourceKind::LocalDatabase,
        SourceKind::MySqlDatabase,
        SourceKind::PostgresDatabase,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SourceKind::DelimitedFile => "CSV",
            SourceKind::Spreadsheet => "Spreadsheet",
            SourceKind::LocalDatabase => "SQLite",
            SourceKind::MySqlDatabase => "MySQL",
            SourceKind::PostgresDatabase => "PostgreSQL",
        }
    }

    pub fn is_database(self) -> bool {
        matches!(
            self,
            SourceKind::LocalDatabase | SourceKind::MySqlDatabase | SourceKind::PostgresDatabase
        )
    }

    /// Extension filters offered by the file chooser, `None` for databases.
    pub fn file_filters(self) -> Option<&'static [FileFilter]> {
        match self {
            SourceKind::DelimitedFile => Some(&[FileFilter {
                name: "CSV Files",
                extensions: &["csv"],
            }]),
            SourceKind::Spreadsheet => Some(&[
                FileFilter {
                    name: "Excel Files",
                    extensions: &["xls", "xlsx"],
                },
                FileFilter {
                    name: "CSV Files",
                    extensions: &["csv"],
                },
            ]),
            SourceKind::LocalDatabase
            | SourceKind::MySqlDatabase
            | SourceKind::PostgresDatabase => None,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One named group of extensions for the file chooser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
}

// ---------------------------------------------------------------------------
// Secret – a password that only lives for one load call
// ---------------------------------------------------------------------------

/// Holds a credential. Never printed, wiped on [`Secret::invalidate`] and on drop.
#[derive(Default)]
pub struct Secret {
    value: String,
    invalidated: bool,
}

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            invalidated: false,
        }
    }

    pub fn expose(&self) -> &str {
        &self.value
    }

    pub fn is_invalidated(&self) -> bool {
        self.invalidated
    }

    /// Overwrite the stored bytes and empty the value.
    pub fn invalidate(&mut self) {
        wipe(&mut self.value);
        self.invalidated = true;
    }
}

fn wipe(s: &mut String) {
    let mut bytes = std::mem::take(s).into_bytes();
    bytes.fill(0);
    std::hint::black_box(&bytes);
}

impl Drop for Secret {
    fn drop(&mut self) {
        wipe(&mut self.value);
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

// ---------------------------------------------------------------------------
// SourceParameters – what each kind needs to be read
// ---------------------------------------------------------------------------

/// Connection fields gathered for the three database kinds.
#[derive(Debug)]
pub struct DatabaseParams {
    pub host: String,
    pub user: String,
    pub password: Secret,
    pub database: String,
    /// Executed verbatim.
    pub query: String,
}

#[derive(Debug)]
pub enum SourceParameters {
    File { path: PathBuf },
    Database(DatabaseParams),
}

impl SourceParameters {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        SourceParameters::File { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_order_is_fixed() {
        let labels: Vec<_> = SourceKind::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(
            labels,
            vec!["CSV", "Spreadsheet", "SQLite", "MySQL", "PostgreSQL"]
        );
    }

    #[test]
    fn test_file_filters() {
        let csv = SourceKind::DelimitedFile.file_filters().unwrap();
        assert_eq!(csv[0].extensions, &["csv"]);
        let sheet = SourceKind::Spreadsheet.file_filters().unwrap();
        assert_eq!(sheet[0].extensions, &["xls", "xlsx"]);
        assert_eq!(sheet[1].extensions, &["csv"]);
        assert!(SourceKind::PostgresDatabase.file_filters().is_none());
    }

    #[test]
    fn test_secret_is_redacted_and_invalidated() {
        let mut secret = Secret::new("hunter2");
        assert_eq!(format!("{secret:?}"), "Secret(***)");
        assert_eq!(secret.expose(), "hunter2");

        secret.invalidate();
        assert!(secret.is_invalidated());
        assert_eq!(secret.expose(), "");
    }

    #[test]
    fn test_database_params_debug_hides_password() {
        let params = DatabaseParams {
            host: "localhost".into(),
            user: "root".into(),
            password: Secret::new("topsecret"),
            database: "shop".into(),
            query: "SELECT 1".into(),
        };
        let dbg = format!("{params:?}");
        assert!(!dbg.contains("topsecret"));
        assert!(dbg.contains("localhost"));
    }
}
