//! FFI bindings for the nutrition engine
//!
//! This module provides C-compatible functions for calling the engine from other
//! languages. All functions take C strings (null-terminated) and return allocated
//! JSON strings that must be freed by the caller using `nutri_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::error::ComputeError;
use crate::normalizer::normalize_target;
use crate::pipeline::{calculate_targets_json, process_complete_json, NutritionProcessor};
use crate::score::score_food;
use crate::types::{parse_date, FoodNutritionTotals};

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Set the last error message
fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Clear the last error message
fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string; NULL is `None`, invalid UTF-8 an error
unsafe fn cstr_to_string(ptr: *const c_char, name: &str) -> Result<Option<String>, ComputeError> {
    if ptr.is_null() {
        return Ok(None);
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map(|s| Some(s.to_string()))
        .map_err(|e| ComputeError::ParseError(format!("{name} is not valid UTF-8: {e}")))
}

/// Helper for arguments that must be present
unsafe fn required_arg(ptr: *const c_char, name: &str) -> Result<String, ComputeError> {
    cstr_to_string(ptr, name)?
        .ok_or_else(|| ComputeError::MissingField(format!("{name} string pointer")))
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Hand a result back across the boundary, recording the error on failure
fn into_c_result(result: Result<String, ComputeError>) -> *mut c_char {
    match result {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Targets
// ============================================================================

/// Calculate nutrition targets from profile JSON.
///
/// # Safety
/// - `profile_json` must be a valid null-terminated C string.
/// - `today` may be NULL (current UTC date) or a `YYYY-MM-DD` C string.
/// - Returns a newly allocated string that must be freed with `nutri_free_string`.
/// - Returns NULL on error; call `nutri_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn nutri_calculate_targets(
    profile_json: *const c_char,
    today: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let result = required_arg(profile_json, "profile").and_then(|profile| {
        let today = match cstr_to_string(today, "today")? {
            Some(raw) => parse_date(&raw)?,
            None => NutritionProcessor::new().reference_date(),
        };
        calculate_targets_json(&profile, today)
    });

    into_c_result(result)
}

/// Normalize a stored target (canonical, legacy flat, or unknown) to the canonical shape.
///
/// # Safety
/// - `target_json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `nutri_free_string`.
/// - Returns NULL on error; call `nutri_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn nutri_normalize_target(target_json: *const c_char) -> *mut c_char {
    clear_last_error();

    let result = required_arg(target_json, "target").and_then(|raw| {
        let value: serde_json::Value = serde_json::from_str(&raw)?;
        Ok(serde_json::to_string(&normalize_target(&value))?)
    });

    into_c_result(result)
}

// ============================================================================
// Foods
// ============================================================================

/// Run the full food pipeline on a raw recognition result.
///
/// # Safety
/// - `food_json` must be a valid null-terminated C string.
/// - `target_json` and `meal_type` may be NULL (default target, default meal).
/// - Returns a newly allocated string that must be freed with `nutri_free_string`.
/// - Returns NULL on error; call `nutri_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn nutri_process_complete(
    food_json: *const c_char,
    target_json: *const c_char,
    meal_type: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let result = required_arg(food_json, "food").and_then(|food| {
        let target = cstr_to_string(target_json, "target")?;
        let meal = cstr_to_string(meal_type, "meal type")?.unwrap_or_default();
        process_complete_json(&food, target.as_deref(), &meal)
    });

    into_c_result(result)
}

/// Score food totals against a target.
///
/// # Safety
/// - `totals_json` must be a valid null-terminated C string holding
///   `FoodNutritionTotals`.
/// - `target_json` may be NULL (default target).
/// - Returns a newly allocated string that must be freed with `nutri_free_string`.
/// - Returns NULL on error; call `nutri_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn nutri_score(
    totals_json: *const c_char,
    target_json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let result = required_arg(totals_json, "totals").and_then(|raw| {
        let totals: FoodNutritionTotals = serde_json::from_str(&raw)?;
        let target = match cstr_to_string(target_json, "target")? {
            Some(raw_target) => {
                let value: serde_json::Value = serde_json::from_str(&raw_target)?;
                normalize_target(&value)
            }
            None => Default::default(),
        };
        Ok(serde_json::to_string(&score_food(&totals, &target))?)
    });

    into_c_result(result)
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by engine functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by an engine function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn nutri_free_string(ptr: *mut c_char) {
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
/// - The returned pointer is valid until the next engine call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn nutri_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

// ============================================================================
// Version Information
// ============================================================================

/// Get the engine library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn nutri_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
