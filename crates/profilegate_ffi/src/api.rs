//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the intake/browse flows to Dart via FRB over one process-wide
//!   app instance.
//! - Return full view snapshots so the UI never has to track core state.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every stateful call returns an [`AppSnapshot`]; failures are reported in
//!   `AppSnapshot::message`, never thrown.
//! - Sync calls never touch the network. The record read runs in
//!   [`browse_load_records`] with the app lock released.

use log::{error, warn};
use profilegate_core::db::open_db;
use profilegate_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    run_fetch, App, BannerSlot, CoreConfig, EpochMs, FetchCompletion, FetchResult, FetchState,
    HttpRecordSource, IdentityField, Key, KeyValueStore, NotificationKind, RecordSource,
    SqliteKeyValueStore,
};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

const STORE_DB_FILE_NAME: &str = "profilegate_store.sqlite3";
const DB_PATH_ENV: &str = "PROFILEGATE_DB_PATH";
const RECORDS_URL_ENV: &str = "PROFILEGATE_RECORDS_URL";
const INITIAL_PATH: &str = "/";

static STORE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static CORE_CONFIG: OnceLock<CoreConfig> = OnceLock::new();
static APP: Mutex<Option<App<SqliteKeyValueStore>>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive);
///   empty selects the build-mode default.
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Intake form values and per-field error flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub name_error: bool,
    pub phone_number_error: bool,
    pub email_error: bool,
}

/// One visible banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerItem {
    /// `entry_success|validation_error`.
    pub slot: String,
    /// `success|error`.
    pub kind: String,
    pub title: String,
    pub messages: Vec<String>,
    /// Epoch milliseconds at which the banner auto-dismisses.
    pub visible_until: i64,
}

/// One table row of the browse list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRow {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub body: String,
}

/// Browse view state for the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseSnapshot {
    pub query: String,
    /// `not_started|in_flight|loaded|failed`.
    pub fetch_status: String,
    /// Present only when `fetch_status == "failed"`.
    pub fetch_error: Option<String>,
    pub rows: Vec<RecordRow>,
    pub page_index: u32,
    pub page_count: u32,
    /// Row count after filtering.
    pub total_rows: u32,
}

/// Full UI state after one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSnapshot {
    /// Current route including any success marker, e.g. `/second?success=true`.
    pub route: String,
    /// Redirect origin attached to the current history entry.
    pub redirected_from: Option<String>,
    /// Blocking alerts to show before anything else, in order.
    pub alerts: Vec<String>,
    pub form: Option<FormSnapshot>,
    pub browse: Option<BrowseSnapshot>,
    pub banners: Vec<BannerItem>,
    /// The browse view is waiting for [`browse_load_records`].
    pub records_pending: bool,
    /// Empty on success; diagnostic text otherwise.
    pub message: String,
}

/// Opens `path` (pushing it onto history), starting the app if needed.
///
/// Entering the browse route leaves the list `in_flight` with
/// `records_pending` set.
#[flutter_rust_bridge::frb(sync)]
pub fn app_open(path: String) -> AppSnapshot {
    with_app(|app, now| {
        app.navigate(path.trim(), now)
            .map_err(|err| err.to_string())
    })
}

/// Re-mounts the current route as a page reload would.
#[flutter_rust_bridge::frb(sync)]
pub fn app_reload() -> AppSnapshot {
    with_app(|app, now| {
        app.reload(now);
        Ok(())
    })
}

/// Navigates one history entry back.
#[flutter_rust_bridge::frb(sync)]
pub fn app_back() -> AppSnapshot {
    with_app(|app, now| {
        if !app.back(now) {
            return Err("already at the first history entry".to_string());
        }
        Ok(())
    })
}

/// Advances banner timers and re-checks the session gate.
///
/// The UI calls this on a periodic timer and after resuming.
#[flutter_rust_bridge::frb(sync)]
pub fn app_tick() -> AppSnapshot {
    with_app(|app, now| {
        app.tick(now);
        Ok(())
    })
}

/// Assigns one intake field (`name|phoneNumber|email`).
#[flutter_rust_bridge::frb(sync)]
pub fn intake_update_field(field: String, value: String) -> AppSnapshot {
    with_app(|app, _| {
        let field = parse_field(&field)?;
        app.update_field(field, value);
        Ok(())
    })
}

/// Forwards a key press on one intake field; `Enter` submits.
#[flutter_rust_bridge::frb(sync)]
pub fn intake_key_pressed(field: String, key: String) -> AppSnapshot {
    with_app(|app, now| {
        let field = parse_field(&field)?;
        let key = if key.eq_ignore_ascii_case("enter") {
            Key::Enter
        } else {
            Key::Other
        };
        app.key_pressed(field, key, now)
            .map(|_| ())
            .map_err(|err| format!("intake submit failed: {err}"))
    })
}

/// Validates and submits the intake form.
#[flutter_rust_bridge::frb(sync)]
pub fn intake_submit() -> AppSnapshot {
    with_app(|app, now| {
        app.submit(now)
            .map(|_| ())
            .map_err(|err| format!("intake submit failed: {err}"))
    })
}

/// Closes a banner by slot (`entry_success|validation_error`).
#[flutter_rust_bridge::frb(sync)]
pub fn banner_dismiss(slot: String) -> AppSnapshot {
    with_app(|app, _| {
        app.dismiss_banner(parse_slot(&slot)?);
        Ok(())
    })
}

/// Replaces the live search query.
#[flutter_rust_bridge::frb(sync)]
pub fn browse_search(query: String) -> AppSnapshot {
    with_app(|app, _| {
        app.set_query(query);
        Ok(())
    })
}

/// Jumps to a zero-based page; out-of-range values clamp.
#[flutter_rust_bridge::frb(sync)]
pub fn browse_go_to_page(index: u32) -> AppSnapshot {
    with_app(|app, _| {
        app.go_to_page(index as usize);
        Ok(())
    })
}

/// Retries a failed record fetch.
#[flutter_rust_bridge::frb(sync)]
pub fn browse_retry() -> AppSnapshot {
    with_app(|app, _| {
        if !app.retry_fetch() {
            return Err("record fetch is not in a failed state".to_string());
        }
        Ok(())
    })
}

/// Runs the browse view's pending record read.
///
/// # FFI contract
/// - Async on the Dart side; call it whenever a snapshot reports
///   `records_pending`.
/// - The app lock is released while the request is in flight, so sync calls
///   keep answering. A view torn down meanwhile drops the result.
pub fn browse_load_records() -> AppSnapshot {
    load_records_with(&APP, HttpRecordSource::new);
    with_app(|_, _| Ok(()))
}

/// Takes the pending ticket under the lock, reads without it, then re-locks
/// to apply the completion.
fn load_records_with<S, R, F>(cell: &Mutex<Option<App<S>>>, make_source: F)
where
    S: KeyValueStore,
    R: RecordSource,
    F: FnOnce(&CoreConfig) -> FetchResult<R>,
{
    let pending = lock(cell).as_mut().and_then(|app| {
        app.take_fetch_ticket()
            .map(|ticket| (ticket, app.config().clone()))
    });
    let Some((ticket, config)) = pending else {
        return;
    };

    let completion = match make_source(&config) {
        Ok(source) => run_fetch(&source, ticket),
        Err(err) => {
            error!("event=records_fetch module=ffi status=error error={err}");
            FetchCompletion {
                ticket,
                result: Err(err),
            }
        }
    };
    if let Some(app) = lock(cell).as_mut() {
        app.complete_fetch(completion);
    }
}

fn with_app(
    f: impl FnOnce(&mut App<SqliteKeyValueStore>, EpochMs) -> Result<(), String>,
) -> AppSnapshot {
    let now = now_epoch_ms();
    let mut guard = lock(&APP);
    if guard.is_none() {
        match start_app(now) {
            Ok(app) => *guard = Some(app),
            Err(message) => return AppSnapshot::failure(message),
        }
    }
    let Some(app) = guard.as_mut() else {
        return AppSnapshot::failure("app is not initialized");
    };

    let message = match f(app, now) {
        Ok(()) => String::new(),
        Err(message) => {
            warn!("event=ffi_call module=ffi status=error");
            message
        }
    };
    snapshot(app, message)
}

fn lock<T>(cell: &Mutex<T>) -> MutexGuard<'_, T> {
    // Poisoned only if an earlier call panicked mid-update; keep serving.
    cell.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn start_app(now: EpochMs) -> Result<App<SqliteKeyValueStore>, String> {
    let conn = open_db(resolve_store_db_path()).map_err(|err| format!("store open failed: {err}"))?;
    App::start(
        SqliteKeyValueStore::new(conn),
        resolve_core_config().clone(),
        INITIAL_PATH,
        now,
    )
    .map_err(|err| err.to_string())
}

fn snapshot<S: KeyValueStore>(app: &mut App<S>, message: String) -> AppSnapshot {
    let form = app.intake().map(|form| {
        let values = form.values();
        let errors = form.errors();
        FormSnapshot {
            name: values.name.clone(),
            phone_number: values.phone_number.clone(),
            email: values.email.clone(),
            name_error: errors.name,
            phone_number_error: errors.phone_number,
            email_error: errors.email,
        }
    });

    let browse = app.browse().map(|view| {
        let page = view.current_page();
        let (fetch_status, fetch_error) = match view.fetch_state() {
            FetchState::NotStarted => ("not_started", None),
            FetchState::InFlight => ("in_flight", None),
            FetchState::Loaded => ("loaded", None),
            FetchState::Failed(message) => ("failed", Some(message.clone())),
        };
        BrowseSnapshot {
            query: view.query().to_string(),
            fetch_status: fetch_status.to_string(),
            fetch_error,
            rows: page
                .rows
                .into_iter()
                .map(|record| RecordRow {
                    id: record.id,
                    owner_id: record.owner_id,
                    title: record.title,
                    body: record.body,
                })
                .collect(),
            page_index: saturating_u32(page.index),
            page_count: saturating_u32(page.page_count),
            total_rows: saturating_u32(page.total_rows),
        }
    });

    let banners = [BannerSlot::EntrySuccess, BannerSlot::ValidationError]
        .into_iter()
        .filter_map(|slot| {
            app.banner(slot).map(|banner| BannerItem {
                slot: slot_label(slot).to_string(),
                kind: match banner.kind {
                    NotificationKind::Success => "success",
                    NotificationKind::Error => "error",
                }
                .to_string(),
                title: banner.title.to_string(),
                messages: banner.messages.clone(),
                visible_until: banner.visible_until,
            })
        })
        .collect();

    AppSnapshot {
        route: app.current_route().to_string(),
        redirected_from: app.nav_state().from.clone(),
        alerts: app.take_alerts(),
        form,
        browse,
        banners,
        records_pending: app.has_pending_fetch(),
        message,
    }
}

impl AppSnapshot {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            route: INITIAL_PATH.to_string(),
            redirected_from: None,
            alerts: Vec::new(),
            form: None,
            browse: None,
            banners: Vec::new(),
            records_pending: false,
            message: message.into(),
        }
    }
}

fn parse_field(value: &str) -> Result<IdentityField, String> {
    IdentityField::ALL
        .into_iter()
        .find(|field| field.as_str() == value.trim())
        .ok_or_else(|| format!("unknown intake field `{value}`"))
}

fn parse_slot(value: &str) -> Result<BannerSlot, String> {
    match value.trim() {
        "entry_success" => Ok(BannerSlot::EntrySuccess),
        "validation_error" => Ok(BannerSlot::ValidationError),
        other => Err(format!("unknown banner slot `{other}`")),
    }
}

fn slot_label(slot: BannerSlot) -> &'static str {
    match slot {
        BannerSlot::EntrySuccess => "entry_success",
        BannerSlot::ValidationError => "validation_error",
    }
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn now_epoch_ms() -> EpochMs {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

fn resolve_store_db_path() -> PathBuf {
    STORE_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(STORE_DB_FILE_NAME)
        })
        .clone()
}

fn resolve_core_config() -> &'static CoreConfig {
    CORE_CONFIG.get_or_init(|| match std::env::var(RECORDS_URL_ENV) {
        Ok(url) => CoreConfig::with_records_url(url),
        Err(_) => CoreConfig::default(),
    })
}
