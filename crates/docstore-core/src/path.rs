//! Document root prefix and path resolution.

use std::fmt;

/// Prefix that turns a relative document path into an absolute name.
///
/// Resolution is plain concatenation: paths are neither validated nor
/// normalized here; the server rejects malformed names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRoot {
    prefix: String,
}

impl DocumentRoot {
    /// Root of a database: `projects/{project}/databases/{database}/documents/`.
    pub fn new(project_id: &str, database_id: &str) -> Self {
        Self {
            prefix: format!("projects/{project_id}/databases/{database_id}/documents/"),
        }
    }

    /// The prefix string.
    pub fn as_str(&self) -> &str {
        &self.prefix
    }

    /// Absolute name of a relative path.
    pub fn resolve(&self, path: &str) -> String {
        let mut name = String::with_capacity(self.prefix.len() + path.len());
        name.push_str(&self.prefix);
        name.push_str(path);
        name
    }
}

impl fmt::Display for DocumentRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix)
    }
}
