use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

static ENV_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Every variable read by `Config::apply_env_overrides`.
const OVERRIDE_KEYS: &[&str] = &[
    "MANSITE_PROVIDER",
    "MESSAGING_PROVIDER",
    "TELNYX_API_KEY",
    "TELNYX_PHONE_NUMBER",
    "TELNYX_MESSAGING_PROFILE_ID",
    "TWILIO_ACCOUNT_SID",
    "TWILIO_AUTH_TOKEN",
    "TWILIO_PHONE_NUMBER",
    "MANSITE_DATABASE_URL",
    "DATABASE_URL",
    "MANSITE_GATEWAY_PORT",
    "PORT",
    "MANSITE_GATEWAY_HOST",
    "HOST",
];

/// Holds the env lock with every override variable cleared, restoring the
/// previous values on drop.
pub(super) struct ScopedEnv {
    saved: Vec<(&'static str, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl ScopedEnv {
    pub(super) fn clean() -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let saved = OVERRIDE_KEYS
            .iter()
            .map(|&key| (key, std::env::var(key).ok()))
            .collect();
        for key in OVERRIDE_KEYS {
            // SAFETY: Test-only. ENV_LOCK serializes every test that touches
            // these variables.
            unsafe {
                std::env::remove_var(key);
            }
        }
        Self { saved, _lock: lock }
    }

    pub(super) fn set(&mut self, key: &'static str, value: &str) -> &mut Self {
        debug_assert!(OVERRIDE_KEYS.contains(&key), "{key} is not restored on drop");
        // SAFETY: Test-only. ENV_LOCK is held for the lifetime of `self`.
        unsafe {
            std::env::set_var(key, value);
        }
        self
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (key, previous) in &self.saved {
            // SAFETY: Test-only restoration while ENV_LOCK is still held.
            unsafe {
                match previous {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}
