use std::path::PathBuf;

/// Storage configuration shared by every front end.
///
/// Front ends fill this from their flags and config file, then pass it to
/// storage initialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceConfig {
    /// Directory holding the database file.
    pub data_dir: Option<PathBuf>,

    /// Path to the redb database file.
    /// Defaults to `{data_dir}/fabdesk.redb` if not specified.
    pub db_path: Option<PathBuf>,

    /// Keep everything in memory; nothing is written to disk.
    pub in_memory: bool,
}

impl ServiceConfig {
    /// Resolve the redb database path, falling back to `{data_dir}/fabdesk.redb`.
    pub fn resolve_db_path(&self) -> PathBuf {
        self.db_path.clone().unwrap_or_else(|| {
            self.data_dir
                .as_ref()
                .map(|d| d.join("fabdesk.redb"))
                .unwrap_or_else(|| PathBuf::from("fabdesk.redb"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let config = ServiceConfig {
            data_dir: Some(PathBuf::from("/data")),
            ..Default::default()
        };
        assert_eq!(config.resolve_db_path(), PathBuf::from("/data/fabdesk.redb"));

        assert_eq!(
            ServiceConfig::default().resolve_db_path(),
            PathBuf::from("fabdesk.redb")
        );
    }

    #[test]
    fn explicit_db_wins() {
        let config = ServiceConfig {
            data_dir: Some(PathBuf::from("/data")),
            db_path: Some(PathBuf::from("/elsewhere/x.redb")),
            in_memory: false,
        };
        assert_eq!(config.resolve_db_path(), PathBuf::from("/elsewhere/x.redb"));
    }
}
