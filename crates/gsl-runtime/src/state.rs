//! Per-thread runtime state.
//!
//! Each thread that calls into the runtime owns one [`Heap`] and one pool of
//! returned C strings. Both are created on first use and replaced wholesale
//! by [`reset`]; handles and string pointers issued before a reset must not
//! be used afterwards.

use std::cell::RefCell;
use std::ffi::{c_char, CStr, CString};

use gsl_core::{CoreError, Heap};

use crate::config::RuntimeConfig;

pub(crate) struct Runtime {
    pub(crate) heap: Heap,
    strings: Vec<CString>,
}

impl Runtime {
    fn new(config: &RuntimeConfig) -> Self {
        Runtime {
            heap: Heap::with_config(config.heap),
            strings: Vec::new(),
        }
    }

    /// Moves `s` into the pool and returns a pointer valid until reset.
    pub(crate) fn intern(&mut self, s: Vec<u8>) -> Result<*const c_char, CoreError> {
        let s = CString::new(s).map_err(|_| CoreError::InvalidOperand {
            op: "string result",
            reason: "contains an interior NUL byte".to_string(),
        })?;
        self.strings
            .try_reserve(1)
            .map_err(|_| CoreError::ResourceExhausted { what: "string pool" })?;
        let ptr = s.as_ptr();
        self.strings.push(s);
        Ok(ptr)
    }

    #[cfg(test)]
    pub(crate) fn pooled_strings(&self) -> usize {
        self.strings.len()
    }
}

thread_local! {
    static RUNTIME: RefCell<Option<Runtime>> = const { RefCell::new(None) };
}

/// Runs `f` against this thread's runtime, creating it from the environment
/// on first use.
pub(crate) fn with_runtime<T>(f: impl FnOnce(&mut Runtime) -> T) -> T {
    RUNTIME.with(|cell| {
        let mut slot = cell.borrow_mut();
        let runtime = slot.get_or_insert_with(|| Runtime::new(&RuntimeConfig::from_env()));
        f(runtime)
    })
}

/// Replaces this thread's runtime with a fresh one built from `config`.
pub(crate) fn reset(config: &RuntimeConfig) {
    RUNTIME.with(|cell| {
        *cell.borrow_mut() = Some(Runtime::new(config));
    });
}

/// Applies the runtime's failure policy to the outcome of `op`.
///
/// Resource exhaustion aborts the process. Any other error is logged and
/// reported to generated code as the type's null value.
pub(crate) fn settle<T: Default>(op: &'static str, result: Result<T, CoreError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) if err.is_fatal() => {
            tracing::error!(op, error = %err, "fatal runtime error, aborting");
            std::process::abort()
        }
        Err(err) => {
            tracing::error!(op, error = %err, "runtime operation failed");
            T::default()
        }
    }
}

/// Runs a heap operation under the failure policy of [`settle`].
pub(crate) fn run<T: Default>(
    op: &'static str,
    f: impl FnOnce(&mut Heap) -> Result<T, CoreError>,
) -> T {
    settle(op, with_runtime(|rt| f(&mut rt.heap)))
}

/// Hands a string result to generated code. Null if it cannot be pooled.
pub(crate) fn return_str(op: &'static str, s: Vec<u8>) -> *const c_char {
    settle(op, with_runtime(|rt| rt.intern(s)).map(Some)).unwrap_or(std::ptr::null())
}

/// Reads a C string argument as its bytes, without the terminating NUL.
/// Null is the language's absent string.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that stays valid
/// for the duration of the call.
pub(crate) unsafe fn read_str(ptr: *const c_char) -> Option<Vec<u8>> {
    if ptr.is_null() {
        return None;
    }
    // SAFETY: guaranteed by the caller.
    let s = unsafe { CStr::from_ptr(ptr) };
    Some(s.to_bytes().to_vec())
}
