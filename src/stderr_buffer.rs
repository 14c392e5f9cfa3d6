//! Holds back stderr diagnostics while the dashboard owns the terminal.

use std::sync::{Mutex, MutexGuard};

static HELD: Mutex<Option<Vec<String>>> = Mutex::new(None);

fn held() -> MutexGuard<'static, Option<Vec<String>>> {
    HELD.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Start holding messages instead of printing them.
pub fn hold() {
    *held() = Some(Vec::new());
}

/// Stop holding and return everything collected, oldest first.
pub fn release() -> Vec<String> {
    held().take().unwrap_or_default()
}

/// Print a diagnostic to stderr, or keep it if messages are being held.
pub fn emit(msg: String) {
    let mut guard = held();
    match guard.as_mut() {
        Some(messages) => messages.push(msg),
        None => {
            drop(guard);
            eprintln!("{}", msg);
        }
    }
}

/// Like `eprintln!`, but routed through [`emit`].
#[macro_export]
macro_rules! buffered_eprintln {
    ($($arg:tt)*) => {
        $crate::stderr_buffer::emit(format!($($arg)*))
    };
}
