use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use super::{AccountRepository, InMemoryAccountRepository};

/// Backend names accepted by configuration, reported in unknown-name errors.
pub const SUPPORTED_BACKENDS: [&str; 3] = ["memory", "database", "redis"];

/// Storage backend selectable by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Memory,
    Database,
    Redis,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BackendKind::Memory => "memory",
            BackendKind::Database => "database",
            BackendKind::Redis => "redis",
        };
        f.write_str(name)
    }
}

impl FromStr for BackendKind {
    type Err = BackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(BackendKind::Memory),
            "database" | "db" | "postgres" | "postgresql" => Ok(BackendKind::Database),
            "redis" | "cache" => Ok(BackendKind::Redis),
            _ => Err(BackendError::Unknown {
                name: s.to_string(),
                supported: SUPPORTED_BACKENDS,
            }),
        }
    }
}

/// Selector-level configuration errors. Fatal at startup, never expected at
/// request time.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{backend} repository not yet implemented; {guidance}")]
    Unimplemented {
        backend: BackendKind,
        guidance: &'static str,
    },

    #[error("unknown repository backend '{name}'; supported backends: {supported:?}")]
    Unknown {
        name: String,
        supported: [&'static str; 3],
    },
}

/// Translates a backend kind into a concrete store implementation.
pub struct RepositoryFactory;

impl RepositoryFactory {
    pub fn create(kind: BackendKind) -> Result<Arc<dyn AccountRepository>, BackendError> {
        match kind {
            BackendKind::Memory => Ok(Arc::new(InMemoryAccountRepository::new())),
            BackendKind::Database => Err(BackendError::Unimplemented {
                backend: kind,
                guidance: "for production deployment, implement a PostgreSQL repository",
            }),
            BackendKind::Redis => Err(BackendError::Unimplemented {
                backend: kind,
                guidance: "for a caching layer, implement a Redis repository",
            }),
        }
    }

    /// Parses the configured name and builds the matching store.
    pub fn create_from_name(name: &str) -> Result<Arc<dyn AccountRepository>, BackendError> {
        Self::create(name.parse()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_backend_aliases_case_insensitively() {
        for name in ["memory", "mem", "MEM", "Memory"] {
            assert_eq!(name.parse::<BackendKind>().unwrap(), BackendKind::Memory);
        }
        for name in ["database", "db", "postgres", "PostgreSQL"] {
            assert_eq!(name.parse::<BackendKind>().unwrap(), BackendKind::Database);
        }
        for name in ["redis", "cache"] {
            assert_eq!(name.parse::<BackendKind>().unwrap(), BackendKind::Redis);
        }
    }

    #[test]
    fn unknown_name_error_carries_rejected_value() {
        let err = "bogus".parse::<BackendKind>().unwrap_err();
        match err {
            BackendError::Unknown { name, supported } => {
                assert_eq!(name, "bogus");
                assert_eq!(supported, SUPPORTED_BACKENDS);
            }
            other => panic!("expected Unknown, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn memory_backend_builds_a_working_store() {
        let repo = RepositoryFactory::create_from_name("MEM").unwrap();
        assert!(repo.get_all(true).await.is_empty());
    }

    #[test]
    fn deferred_backends_fail_with_unimplemented() {
        for name in ["database", "redis"] {
            let err = RepositoryFactory::create_from_name(name).unwrap_err();
            assert!(
                matches!(err, BackendError::Unimplemented { .. }),
                "expected Unimplemented for {name}, got {err:?}"
            );
        }
    }

    #[test]
    fn unknown_backend_fails_construction() {
        let err = RepositoryFactory::create_from_name("bogus").unwrap_err();
        assert!(err.to_string().contains("bogus"));
    }
}
