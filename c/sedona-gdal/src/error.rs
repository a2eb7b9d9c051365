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

use std::ffi::NulError;
use std::os::raw::c_int;

use crate::gdal_dyn_bindgen::{
    OGRERR_CORRUPT_DATA, OGRERR_FAILURE, OGRERR_INVALID_HANDLE, OGRERR_NONE,
    OGRERR_NON_EXISTING_FEATURE, OGRERR_NOT_ENOUGH_DATA, OGRERR_NOT_ENOUGH_MEMORY,
    OGRERR_UNSUPPORTED_GEOMETRY_TYPE, OGRERR_UNSUPPORTED_OPERATION, OGRERR_UNSUPPORTED_SRS,
};

#[derive(Debug, thiserror::Error)]
pub enum SedonaGdalError {
    /// A native call left a pending `CE_Failure` or `CE_Fatal` error behind
    #[error("GDAL error {code}: {message}")]
    NativeOperationFailed { code: i32, message: String },

    /// Release was requested for a class whose native destructor is not public
    #[error("Native destructor of {0} does not have public access")]
    DisposalRejected(&'static str),

    /// The proxy (or the parent its view depends on) was already disposed
    #[error("Attempt to use a disposed {0} handle")]
    InvalidHandle(&'static str),

    #[error("GDAL library error: {0}")]
    LibraryError(String),

    #[error("Argument contains an interior nul byte: {0}")]
    NulError(#[from] NulError),
}

impl SedonaGdalError {
    /// Build a [SedonaGdalError::NativeOperationFailed] from a native error
    /// number and message
    pub fn native(code: i32, message: impl Into<String>) -> Self {
        Self::NativeOperationFailed {
            code,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SedonaGdalError>;

/// Convert an `OGRErr` return code into a `Result`
pub(crate) fn ogr_result(err: c_int) -> Result<()> {
    let message = match err {
        OGRERR_NONE => return Ok(()),
        OGRERR_NOT_ENOUGH_DATA => "Not enough data",
        OGRERR_NOT_ENOUGH_MEMORY => "Not enough memory",
        OGRERR_UNSUPPORTED_GEOMETRY_TYPE => "Unsupported geometry type",
        OGRERR_UNSUPPORTED_OPERATION => "Unsupported operation",
        OGRERR_CORRUPT_DATA => "Corrupt data",
        OGRERR_FAILURE => "General failure",
        OGRERR_UNSUPPORTED_SRS => "Unsupported SRS",
        OGRERR_INVALID_HANDLE => "Invalid handle",
        OGRERR_NON_EXISTING_FEATURE => "Non existing feature",
        _ => "Unknown error",
    };
    Err(SedonaGdalError::native(err, format!("OGR Error: {message}")))
}
