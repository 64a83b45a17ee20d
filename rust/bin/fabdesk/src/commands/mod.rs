pub mod records;
pub mod report;
pub mod schedule;

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use fabdesk_core::ServiceConfig;
use fabdesk_kv::{KVStore, MemoryKV, RedbStore};
use fabdesk_registry::{Registry, Seed};
use tracing::info;

/// Open the storage backend the configuration points at.
pub fn open_kv(config: &ServiceConfig) -> Result<Arc<dyn KVStore>> {
    if config.in_memory {
        info!("Using in-memory storage; nothing will be saved");
        return Ok(Arc::new(MemoryKV::new()));
    }
    let path = config.resolve_db_path();
    info!("Opening {}", path.display());
    Ok(Arc::new(RedbStore::open(&path)?))
}

/// Hydrate the registry. A fresh database gets the demo records.
pub fn open_registry(kv: Arc<dyn KVStore>) -> Result<Registry> {
    Ok(Registry::open(kv, Seed::demo())?)
}

/// Storage location and the size of every stored collection.
pub fn status(out: &mut dyn Write, config: &ServiceConfig, kv: &dyn KVStore) -> Result<()> {
    if config.in_memory {
        writeln!(out, "Storage:   memory")?;
    } else {
        writeln!(out, "Storage:   {}", config.resolve_db_path().display())?;
    }
    for (key, value) in kv.scan("")? {
        let size = if key.ends_with(":seq") {
            format!("next after {}", String::from_utf8_lossy(&value))
        } else {
            let records = serde_json::from_slice::<Vec<serde_json::Value>>(&value)
                .map(|v| v.len().to_string())
                .unwrap_or_else(|_| "unreadable".to_string());
            format!("{} records, {} bytes", records, value.len())
        };
        writeln!(out, "  {:<24}{}", key, size)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_database_is_seeded_and_listed() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServiceConfig {
            data_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let kv = open_kv(&config).unwrap();
        let reg = open_registry(kv.clone()).unwrap();
        assert!(dir.path().join("fabdesk.redb").exists());
        assert!(reg.counts().iter().all(|(_, n)| *n > 0));

        let mut buf = Vec::new();
        status(&mut buf, &config, kv.as_ref()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("fabdesk.redb"));
        assert!(text.contains("customers               2 records"));
        assert!(text.contains("customers:seq"));
    }
}
