//! FFI bindings for Synheart Workout
//!
//! This module provides C-compatible functions for calling Workout from other languages.
//! All functions use C strings (null-terminated) and return allocated memory that
//! must be freed by the caller using `workout_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;
use std::slice;

use crate::input::InputFormat;
use crate::pipeline::{summarize_package, WorkoutProcessor};

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Borrow `len` doubles from `params`; a null pointer is only valid for `len == 0`
unsafe fn params_slice<'a>(params: *const f64, len: usize) -> Option<&'a [f64]> {
    if len == 0 {
        return Some(&[] as &[f64]);
    }
    if params.is_null() {
        return None;
    }
    Some(slice::from_raw_parts(params, len))
}

unsafe fn summarize_args(
    code: *const c_char,
    params: *const f64,
    len: usize,
) -> Option<crate::types::SummaryRecord> {
    let code_str = match cstr_to_string(code) {
        Some(s) => s,
        None => {
            set_last_error("Invalid workout code string pointer");
            return None;
        }
    };

    let values = match params_slice(params, len) {
        Some(v) => v,
        None => {
            set_last_error("Null parameter array pointer");
            return None;
        }
    };

    match summarize_package(&code_str, values) {
        Ok(summary) => Some(summary),
        Err(e) => {
            set_last_error(&e.to_string());
            None
        }
    }
}

// ============================================================================
// Single package API
// ============================================================================

/// Summarize one workout and return its message line.
///
/// # Safety
/// - `code` must be a valid null-terminated C string.
/// - `params` must point to `len` doubles (may be NULL when `len` is 0).
/// - Returns a newly allocated string that must be freed with `workout_free_string`.
/// - Returns NULL on error; call `workout_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn workout_summary_message(
    code: *const c_char,
    params: *const f64,
    len: usize,
) -> *mut c_char {
    clear_last_error();

    match summarize_args(code, params, len) {
        Some(summary) => string_to_cstr(&summary.message()),
        None => ptr::null_mut(),
    }
}

/// Summarize one workout and return the summary record as JSON.
///
/// # Safety
/// Same contract as `workout_summary_message`.
#[no_mangle]
pub unsafe extern "C" fn workout_summary_json(
    code: *const c_char,
    params: *const f64,
    len: usize,
) -> *mut c_char {
    clear_last_error();

    let summary = match summarize_args(code, params, len) {
        Some(summary) => summary,
        None => return ptr::null_mut(),
    };

    match serde_json::to_string(&summary) {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Batch API
// ============================================================================

/// Process a batch of records and return the batch report as JSON.
///
/// Failing records are listed in the report's `errors`; they do not make the
/// call fail.
///
/// # Safety
/// - `input` and `format` must be valid null-terminated C strings.
/// - `format` is "csv" or "ndjson".
/// - Returns a newly allocated string that must be freed with `workout_free_string`.
/// - Returns NULL on error; call `workout_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn workout_process_batch(
    input: *const c_char,
    format: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let input_str = match cstr_to_string(input) {
        Some(s) => s,
        None => {
            set_last_error("Invalid input string pointer");
            return ptr::null_mut();
        }
    };

    let format = match cstr_to_string(format).map(|f| InputFormat::parse(&f)) {
        Some(Ok(format)) => format,
        Some(Err(e)) => {
            set_last_error(&e.to_string());
            return ptr::null_mut();
        }
        None => {
            set_last_error("Invalid format string pointer");
            return ptr::null_mut();
        }
    };

    let mut processor = WorkoutProcessor::new();
    let report = processor.process_text(&input_str, format);

    match serde_json::to_string(&report) {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by Workout functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a Workout function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn workout_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next Workout function call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn workout_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

// ============================================================================
// Version Information
// ============================================================================

/// Get the Workout library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn workout_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    #[test]
    fn test_ffi_summary_message() {
        let code = CString::new("RUN").unwrap();
        let params = [15000.0, 1.0, 75.0];

        unsafe {
            let result = workout_summary_message(code.as_ptr(), params.as_ptr(), params.len());
            assert!(!result.is_null());

            let message = CStr::from_ptr(result).to_str().unwrap();
            assert!(message.starts_with("Activity type: Running;"));
            assert!(message.ends_with("Calories burned: 797.805."));

            workout_free_string(result);
        }
    }

    #[test]
    fn test_ffi_summary_json() {
        let code = CString::new("SWM").unwrap();
        let params = [720.0, 1.0, 80.0, 25.0, 40.0];

        unsafe {
            let result = workout_summary_json(code.as_ptr(), params.as_ptr(), params.len());
            assert!(!result.is_null());

            let json: serde_json::Value =
                serde_json::from_str(CStr::from_ptr(result).to_str().unwrap()).unwrap();
            assert_eq!(json["activity_name"], "Swimming");
            assert_eq!(json["mean_speed_kmh"], 1.0);

            workout_free_string(result);
        }
    }

    #[test]
    fn test_ffi_batch() {
        let input = CString::new("RUN,15000,1,75\nXYZ,1,2,3\n").unwrap();
        let format = CString::new("csv").unwrap();

        unsafe {
            let result = workout_process_batch(input.as_ptr(), format.as_ptr());
            assert!(!result.is_null());

            let json: serde_json::Value =
                serde_json::from_str(CStr::from_ptr(result).to_str().unwrap()).unwrap();
            assert_eq!(json["total_records"], 2);
            assert_eq!(json["errors"][0]["line"], 2);

            workout_free_string(result);
        }
    }

    #[test]
    fn test_ffi_error_handling() {
        let code = CString::new("XYZ").unwrap();
        let params = [1.0, 1.0, 1.0];

        unsafe {
            let result = workout_summary_message(code.as_ptr(), params.as_ptr(), params.len());
            assert!(result.is_null());

            let error = workout_last_error();
            assert!(!error.is_null());

            let error_str = CStr::from_ptr(error).to_str().unwrap();
            assert!(error_str.contains("XYZ"));

            // null parameter array with a non-zero length
            let result = workout_summary_message(code.as_ptr(), ptr::null(), 3);
            assert!(result.is_null());
            assert!(!workout_last_error().is_null());
        }
    }

    #[test]
    fn test_ffi_bad_format() {
        let input = CString::new("RUN,15000,1,75").unwrap();
        let format = CString::new("xml").unwrap();

        unsafe {
            let result = workout_process_batch(input.as_ptr(), format.as_ptr());
            assert!(result.is_null());
            assert!(!workout_last_error().is_null());
        }
    }

    #[test]
    fn test_ffi_version() {
        unsafe {
            let version = workout_version();
            assert!(!version.is_null());

            let version_str = CStr::from_ptr(version).to_str().unwrap();
            assert!(!version_str.is_empty());
        }
    }
}
