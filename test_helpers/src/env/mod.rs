//! Environment mutation for tests that exercise environment-backed sources.
//!
//! Every mutation runs under a process-wide re-entrant mutex and hands back a
//! guard that puts the variable back the way it found it. Guards for the same
//! key restore in LIFO order. Tests that need a consistent view across many
//! variables (a whole `TEST_*` data set, say) should build an [`EnvScope`],
//! which keeps the lock held until the scope and all of its guards drop.
//!
//! Pair these helpers with `serial_test` when other tests read the same keys
//! without going through this module.
//!
//! # Examples
//!
//! ```
//! use configify_test_helpers::env;
//!
//! let _scope = env::scope_with(|lock| {
//!     let mut guards = lock.clear_prefixed("DEMO_");
//!     guards.push(lock.set_var("DEMO_PORT", "8080"));
//!     guards
//! });
//! assert_eq!(std::env::var("DEMO_PORT").as_deref(), Ok("8080"));
//! ```

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

type Held = ReentrantMutexGuard<'static, ()>;

/// Record `key`'s current value, then apply `mutate` to it.
///
/// The caller proves it holds the lock by lending the guard.
fn record_then<F>(key: String, mutate: F, _held: &Held) -> EnvVarGuard
where
    F: FnOnce(&str),
{
    let original = env::var_os(&key);
    mutate(&key);
    EnvVarGuard { key, original }
}

fn write(key: &str, value: &OsStr, _held: &Held) {
    // SAFETY: callers hold `ENV_MUTEX`, serialising every write made
    // through this module.
    unsafe { env::set_var(key, value) };
}

fn erase(key: &str, _held: &Held) {
    // SAFETY: callers hold `ENV_MUTEX`, serialising every write made
    // through this module.
    unsafe { env::remove_var(key) };
}

/// RAII guard restoring one environment variable on drop.
///
/// A variable that did not exist before the mutation is removed again.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl EnvVarGuard {
    /// The variable this guard restores.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let held = ENV_MUTEX.lock();
        match self.original.take() {
            Some(value) => write(&self.key, &value, &held),
            None => erase(&self.key, &held),
        }
    }
}

/// Holds the environment lock so several mutations apply atomically with
/// respect to other users of this module.
#[must_use = "dropping releases the environment lock"]
pub struct EnvVarLock {
    held: Held,
}

impl fmt::Debug for EnvVarLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EnvVarLock")
    }
}

impl EnvVarLock {
    /// Set `key` to `value`.
    pub fn set_var<K, V>(&self, key: K, value: V) -> EnvVarGuard
    where
        K: Into<String>,
        V: AsRef<OsStr>,
    {
        record_then(key.into(), |k| write(k, value.as_ref(), &self.held), &self.held)
    }

    /// Remove `key`.
    pub fn remove_var<K>(&self, key: K) -> EnvVarGuard
    where
        K: Into<String>,
    {
        record_then(key.into(), |k| erase(k, &self.held), &self.held)
    }

    /// Set every `(key, value)` pair, returning one guard per pair.
    pub fn set_vars<I, K, V>(&self, pairs: I) -> Vec<EnvVarGuard>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<OsStr>,
    {
        pairs
            .into_iter()
            .map(|(key, value)| self.set_var(key, value))
            .collect()
    }

    /// Remove every variable whose name starts with `prefix`.
    ///
    /// Lets a test assume nothing it did not set is visible under a
    /// namespace, whatever the surrounding shell exported.
    pub fn clear_prefixed(&self, prefix: &str) -> Vec<EnvVarGuard> {
        let doomed: Vec<String> = env::vars_os()
            .filter_map(|(key, _)| key.into_string().ok())
            .filter(|key| key.starts_with(prefix))
            .collect();
        doomed.into_iter().map(|key| self.remove_var(key)).collect()
    }
}

/// Keeps the environment lock for as long as it holds its guards.
///
/// Guards are restored before the lock is released.
#[must_use = "dropping releases the environment lock and restores guards"]
pub struct EnvScope {
    guards: Vec<EnvVarGuard>,
    _lock: EnvVarLock,
}

impl fmt::Debug for EnvScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvScope")
            .field("guards", &self.guards)
            .finish_non_exhaustive()
    }
}

impl EnvScope {
    /// Number of variables this scope will restore.
    #[must_use]
    pub fn len(&self) -> usize {
        self.guards.len()
    }

    /// Whether the scope restores nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }
}

/// Set an environment variable, restoring it when the guard drops.
///
/// # Examples
/// ```
/// use configify_test_helpers::env;
///
/// let _g = env::set_var("CONFIGIFY_DOC_SET", "bar");
/// assert_eq!(std::env::var("CONFIGIFY_DOC_SET").as_deref(), Ok("bar"));
/// ```
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    lock().set_var(key, value)
}

/// Remove an environment variable, restoring it when the guard drops.
///
/// # Examples
/// ```
/// use configify_test_helpers::env;
///
/// let _g = env::remove_var("CONFIGIFY_DOC_REMOVED");
/// assert!(std::env::var("CONFIGIFY_DOC_REMOVED").is_err());
/// ```
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    lock().remove_var(key)
}

/// Acquire the global environment lock for the lifetime of the guard.
pub fn lock() -> EnvVarLock {
    EnvVarLock {
        held: ENV_MUTEX.lock(),
    }
}

/// Run `builder` under the lock and keep holding it, with the guards it
/// returned, until the scope drops.
pub fn scope_with<F>(builder: F) -> EnvScope
where
    F: FnOnce(&EnvVarLock) -> Vec<EnvVarGuard>,
{
    let held = lock();
    let guards = builder(&held);
    EnvScope {
        guards,
        _lock: held,
    }
}
