//! FFI interface for C/C++ hosts
//!
//! Mirrors the scrape and export operations over a C ABI. Every request and
//! response is passed as JSON for simplicity and type safety.

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use serde::{Deserialize, Serialize};

use crate::export::{export_csv, export_file_name, ExportOptions, Sport};
use crate::model::RosterRecord;

/// Result struct returned to the host
/// Both pointers are owned by Rust and must be freed via free_scrape_result
#[repr(C)]
pub struct ScrapeResultFFI {
    /// JSON-serialized result (null-terminated)
    pub json_ptr: *mut c_char,
    /// Error message if the call failed (null-terminated), or null on success
    pub error_ptr: *mut c_char,
}

/// Successful scrape payload
#[derive(Debug, Serialize)]
pub struct ScrapeResponse {
    pub success: bool,
    pub data: RosterRecord,
}

/// CSV export request
#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub roster_data: RosterRecord,
    #[serde(default)]
    pub sport: Option<String>,
    #[serde(default)]
    pub export_options: ExportOptions,
}

/// CSV export payload
#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub file_name: String,
    pub csv: String,
}

/// Extract a roster from HTML.
///
/// # Arguments
/// * `html_ptr` - Pointer to HTML content (UTF-8, not necessarily null-terminated)
/// * `html_len` - Length of HTML content in bytes
/// * `base_url` - Page URL for resolving photo links (null-terminated), may be null
///
/// # Returns
/// ScrapeResultFFI with json_ptr holding `{"success": true, "data": {...}}`
///
/// # Safety
/// - `html_ptr` must point to valid memory of at least `html_len` bytes
/// - `base_url` must be null or a valid null-terminated C string
/// - Caller must free the result via `free_scrape_result`
#[no_mangle]
pub unsafe extern "C" fn scrape_html_ffi(
    html_ptr: *const c_char,
    html_len: usize,
    base_url: *const c_char,
) -> ScrapeResultFFI {
    let html = match read_html(html_ptr, html_len) {
        Ok(h) => h,
        Err(msg) => return make_error_result(msg),
    };

    let base_url = if base_url.is_null() {
        ""
    } else {
        match CStr::from_ptr(base_url).to_str() {
            Ok(s) => s,
            Err(_) => return make_error_result("Invalid UTF-8 in base URL"),
        }
    };

    let roster = crate::scrape_from_html(&html, base_url);
    make_json_result(&ScrapeResponse {
        success: true,
        data: roster,
    })
}

/// Fetch a page and extract its roster.
///
/// # Safety
/// - `url` must be a valid null-terminated C string
/// - Caller must free the result via `free_scrape_result`
#[no_mangle]
pub unsafe extern "C" fn scrape_url_ffi(url: *const c_char) -> ScrapeResultFFI {
    let url = if url.is_null() {
        return make_error_result("URL is null");
    } else {
        match CStr::from_ptr(url).to_str() {
            Ok(s) => s,
            Err(_) => return make_error_result("Invalid UTF-8 in URL"),
        }
    };

    match crate::scrape_from_url(url) {
        Ok(roster) => make_json_result(&ScrapeResponse {
            success: true,
            data: roster,
        }),
        Err(e) => make_error_result(&e.to_string()),
    }
}

/// Render a roster as CSV.
///
/// `request_json` is `{"roster_data": {...}, "sport": "basketball", "export_options": {...}}`;
/// the result JSON is `{"file_name": "...", "csv": "..."}`.
///
/// # Safety
/// - `request_json` must be a valid null-terminated C string
/// - Caller must free the result via `free_scrape_result`
#[no_mangle]
pub unsafe extern "C" fn export_csv_ffi(request_json: *const c_char) -> ScrapeResultFFI {
    let request_str = if request_json.is_null() {
        return make_error_result("Request JSON is null");
    } else {
        match CStr::from_ptr(request_json).to_str() {
            Ok(s) => s,
            Err(_) => return make_error_result("Invalid UTF-8 in request JSON"),
        }
    };

    let request: ExportRequest = match serde_json::from_str(request_str) {
        Ok(r) => r,
        Err(e) => return make_error_result(&format!("Failed to parse request JSON: {}", e)),
    };

    let sport = request
        .sport
        .as_deref()
        .map(Sport::from_name)
        .unwrap_or_default();

    match export_csv(&request.roster_data, sport, &request.export_options) {
        Ok(csv) => make_json_result(&ExportResponse {
            file_name: export_file_name(&request.roster_data, sport),
            csv,
        }),
        Err(e) => make_error_result(&e.to_string()),
    }
}

/// Free a ScrapeResultFFI returned by any function in this module
///
/// # Safety
/// - `result` must have been returned by a function in this module
/// - Must only be called once per result
#[no_mangle]
pub unsafe extern "C" fn free_scrape_result(result: ScrapeResultFFI) {
    if !result.json_ptr.is_null() {
        drop(CString::from_raw(result.json_ptr));
    }
    if !result.error_ptr.is_null() {
        drop(CString::from_raw(result.error_ptr));
    }
}

unsafe fn read_html(html_ptr: *const c_char, html_len: usize) -> Result<String, &'static str> {
    if html_ptr.is_null() || html_len == 0 {
        return Ok(String::new());
    }
    let slice = std::slice::from_raw_parts(html_ptr as *const u8, html_len);
    std::str::from_utf8(slice)
        .map(str::to_string)
        .map_err(|_| "Invalid UTF-8 in HTML content")
}

fn make_json_result<T: Serialize>(value: &T) -> ScrapeResultFFI {
    match serde_json::to_string(value) {
        Ok(json) => match CString::new(json) {
            Ok(cstr) => ScrapeResultFFI {
                json_ptr: cstr.into_raw(),
                error_ptr: ptr::null_mut(),
            },
            Err(_) => make_error_result("Result JSON contains null bytes"),
        },
        Err(e) => make_error_result(&format!("Failed to serialize result: {}", e)),
    }
}

// Helper to create error result
fn make_error_result(msg: &str) -> ScrapeResultFFI {
    tracing::debug!(error = msg, "ffi call failed");
    let error_cstr = CString::new(msg).unwrap_or_else(|_| CString::new("Unknown error").unwrap());
    ScrapeResultFFI {
        json_ptr: ptr::null_mut(),
        error_ptr: error_cstr.into_raw(),
    }
}
