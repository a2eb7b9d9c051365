// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Marshaling of C strings and null-terminated string lists
//!
//! Everything read from native memory is copied into owned Rust values before
//! the native call that produced it returns control to the caller.

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_void};
use std::ptr::null_mut;

use crate::error::Result;
use crate::gdal_dyn_bindgen::GdalApi;

/// Copy a nul-terminated native string, returning `None` for a null pointer
///
/// # Safety
///
/// `ptr` must be null or point to a nul-terminated string that stays valid
/// for the duration of this call.
pub(crate) unsafe fn string_from_ptr(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        None
    } else {
        Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
    }
}

/// Copy a null-terminated array of native strings
///
/// The length is found by scanning for the terminating null entry. A null
/// `list` is an empty list.
///
/// # Safety
///
/// `list` must be null or point to an array of string pointers terminated by
/// a null entry, valid for the duration of this call.
pub(crate) unsafe fn string_list_from_ptr(list: *const *mut c_char) -> Vec<String> {
    if list.is_null() {
        return vec![];
    }

    let mut count = 0;
    while !(*list.add(count)).is_null() {
        count += 1;
    }

    (0..count)
        .filter_map(|i| string_from_ptr(*list.add(i)))
        .collect()
}

/// Copy a native string allocated by GDAL and free it with `VSIFree`
///
/// # Safety
///
/// `ptr` must be null or a string allocated with GDAL's allocator that the
/// caller owns.
pub(crate) unsafe fn take_native_string(api: &GdalApi, ptr: *mut c_char) -> Option<String> {
    let out = string_from_ptr(ptr);
    if !ptr.is_null() {
        if let Some(free_fn) = api.VSIFree {
            free_fn(ptr as *mut c_void);
        }
    }
    out
}

/// Convert an optional argument into an optional C string
pub(crate) fn opt_cstring(value: Option<&str>) -> Result<Option<CString>> {
    Ok(value.map(CString::new).transpose()?)
}

/// Pointer for an optional C string (null when absent)
pub(crate) fn opt_ptr(value: &Option<CString>) -> *const c_char {
    value.as_ref().map_or(std::ptr::null(), |s| s.as_ptr())
}

/// A null-terminated list of C strings built from Rust strings (a `CSLConstList`)
///
/// The native side only reads the list; GDAL copies whatever it keeps.
pub(crate) struct CStringList {
    _strings: Vec<CString>,
    ptrs: Vec<*mut c_char>,
}

impl CStringList {
    pub(crate) fn try_new<S: AsRef<str>>(values: &[S]) -> Result<Self> {
        let strings = values
            .iter()
            .map(|value| CString::new(value.as_ref()))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let mut ptrs = strings
            .iter()
            .map(|s| s.as_ptr() as *mut c_char)
            .collect::<Vec<_>>();
        ptrs.push(null_mut());
        Ok(Self {
            _strings: strings,
            ptrs,
        })
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.ptrs.len() - 1
    }

    pub(crate) fn as_ptr(&self) -> *mut *mut c_char {
        self.ptrs.as_ptr() as *mut *mut c_char
    }
}
