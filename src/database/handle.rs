//! Process-wide database handle

use crate::auth::{AuthConfig, ServiceAccountKey};
use crate::config::{Settings, DEFAULT_EMULATOR_PROJECT};
use crate::error::{Error, Result, ResultExt};
use crate::firestore::{FirestoreClient, FirestoreConfig};
use crate::store::DocumentStore;
use crate::types::JobRecord;
use async_trait::async_trait;
use once_cell::sync::OnceCell;
use tracing::{error, info};

static SHARED: OnceCell<DatabaseHandle> = OnceCell::new();

/// Initialize the process-wide handle on first call and return it.
///
/// Later calls return the same handle and ignore `settings`.
pub fn shared(settings: &Settings) -> &'static DatabaseHandle {
    SHARED.get_or_init(|| DatabaseHandle::initialize(settings))
}

#[derive(Debug)]
enum HandleState {
    Ready(FirestoreClient),
    Uninitialized { reason: String },
}

/// A Firestore client, or the reason one could not be built
#[derive(Debug)]
pub struct DatabaseHandle {
    state: HandleState,
}

impl DatabaseHandle {
    /// Build a handle from settings. Never fails: problems are logged and
    /// kept so that every later write reports them.
    pub fn initialize(settings: &Settings) -> Self {
        if let Some(host) = settings.emulator_host.as_deref() {
            return match connect_emulator(settings, host) {
                Ok(client) => {
                    info!(
                        "[OK] Firebase initialized against emulator at {host} (project '{}').",
                        client.project_id()
                    );
                    Self::ready(client)
                }
                Err(e) => {
                    error!("[X] Failed to initialize Firebase: {e}");
                    Self::uninitialized(e.to_string())
                }
            };
        }

        let path = &settings.credentials_path;
        if !path.exists() {
            let file_name = path
                .file_name()
                .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
            error!("[X] Error: '{file_name}' not found at {}", path.display());
            error!(
                "   -> Did you download it from Firebase Console and place it in '{}'?",
                settings.app_root.display()
            );
            return Self::uninitialized(format!(
                "credentials file not found at {}",
                path.display()
            ));
        }

        match connect_service_account(settings) {
            Ok(client) => {
                info!("[OK] Firebase initialized successfully.");
                Self::ready(client)
            }
            Err(e) => {
                error!("[X] Failed to initialize Firebase: {e}");
                Self::uninitialized(e.to_string())
            }
        }
    }

    /// Wrap an already built client
    pub fn ready(client: FirestoreClient) -> Self {
        Self {
            state: HandleState::Ready(client),
        }
    }

    /// A handle that rejects every operation with `reason`
    pub fn uninitialized(reason: impl Into<String>) -> Self {
        Self {
            state: HandleState::Uninitialized {
                reason: reason.into(),
            },
        }
    }

    /// Whether a client was built
    pub fn is_initialized(&self) -> bool {
        matches!(self.state, HandleState::Ready(_))
    }

    /// The client, or `ClientNotInitialized`
    pub fn client(&self) -> Result<&FirestoreClient> {
        match &self.state {
            HandleState::Ready(client) => Ok(client),
            HandleState::Uninitialized { reason } => Err(Error::not_initialized(reason.clone())),
        }
    }
}

fn connect_service_account(settings: &Settings) -> Result<FirestoreClient> {
    let key = ServiceAccountKey::from_file(&settings.credentials_path)?;
    let project_id = settings
        .project_id
        .clone()
        .unwrap_or_else(|| key.project_id.clone());

    let config = FirestoreConfig::new(project_id, AuthConfig::service_account(key))
        .with_timeout(settings.write_timeout);
    FirestoreClient::new(config)
}

fn connect_emulator(settings: &Settings, host: &str) -> Result<FirestoreClient> {
    let project_id = settings
        .project_id
        .clone()
        .unwrap_or_else(|| DEFAULT_EMULATOR_PROJECT.to_string());

    let config = FirestoreConfig::emulator(project_id, host).with_timeout(settings.write_timeout);
    FirestoreClient::new(config).with_context(|| format!("emulator at {host}"))
}

#[async_trait]
impl DocumentStore for DatabaseHandle {
    fn ensure_ready(&self) -> Result<()> {
        self.client().map(|_| ())
    }

    async fn set(&self, collection: &str, key: &str, record: &JobRecord) -> Result<()> {
        self.client()?.set_document(collection, key, record).await
    }

    async fn add(&self, collection: &str, record: &JobRecord) -> Result<String> {
        self.client()?.add_document(collection, record).await
    }
}
