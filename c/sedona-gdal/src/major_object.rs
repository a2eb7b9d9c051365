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

//! Description and metadata shared by drivers, datasets and bands

use std::ffi::CString;
use std::os::raw::c_int;
use std::sync::Arc;

use crate::error::{Result, SedonaGdalError};
use crate::gdal_dyn_bindgen::{
    CPLErr_CE_Debug, CPLErr_CE_Failure, CPLErr_CE_Fatal, CPLErr_CE_None, CPLErr_CE_Warning,
    GdalApi,
};
use crate::handle::{native_wrapper, NativeHandle, NativeKind, NativeProxy};
use crate::library::GdalLibrary;
use crate::strings::{opt_cstring, opt_ptr, string_from_ptr, string_list_from_ptr, CStringList};

/// Status returned by metadata setters (`CPLErr`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CplErr {
    None,
    Debug,
    Warning,
    Failure,
    Fatal,
    /// A status code GDAL does not define
    Other(c_int),
}

impl From<c_int> for CplErr {
    #[allow(non_upper_case_globals)]
    fn from(value: c_int) -> Self {
        match value {
            CPLErr_CE_None => CplErr::None,
            CPLErr_CE_Debug => CplErr::Debug,
            CPLErr_CE_Warning => CplErr::Warning,
            CPLErr_CE_Failure => CplErr::Failure,
            CPLErr_CE_Fatal => CplErr::Fatal,
            other => CplErr::Other(other),
        }
    }
}

impl From<CplErr> for c_int {
    fn from(value: CplErr) -> Self {
        match value {
            CplErr::None => CPLErr_CE_None,
            CplErr::Debug => CPLErr_CE_Debug,
            CplErr::Warning => CPLErr_CE_Warning,
            CplErr::Failure => CPLErr_CE_Failure,
            CplErr::Fatal => CPLErr_CE_Fatal,
            CplErr::Other(other) => other,
        }
    }
}

pub struct MajorObjectKind;

impl NativeKind for MajorObjectKind {
    const NAME: &'static str = "MajorObject";

    /// Major objects are destroyed through the object that created them
    /// (e.g., closing a dataset), never directly.
    fn release(_api: &GdalApi, _handle: NativeHandle) -> Result<()> {
        Err(SedonaGdalError::DisposalRejected(Self::NAME))
    }
}

/// A GDAL object carrying a description and domain-keyed metadata
pub struct MajorObject {
    proxy: Arc<NativeProxy<MajorObjectKind>>,
}

native_wrapper!(MajorObject, MajorObjectKind);

impl MajorObject {
    pub fn description(&self) -> Result<String> {
        self.proxy.with_handle(|api, handle| {
            let get_fn = api_fn!(api, GDALGetDescription);
            Ok(unsafe { string_from_ptr(get_fn(handle.as_ptr())) }.unwrap_or_default())
        })
    }

    pub fn set_description(&self, description: &str) -> Result<()> {
        let description = CString::new(description)?;
        self.proxy.with_handle(|api, handle| {
            let set_fn = api_fn!(api, GDALSetDescription);
            unsafe { set_fn(handle.as_ptr(), description.as_ptr()) };
            Ok(())
        })
    }

    /// `KEY=VALUE` entries for a metadata domain (the default domain when
    /// `None`); an unknown domain has no entries
    pub fn metadata(&self, domain: Option<&str>) -> Result<Vec<String>> {
        let domain = opt_cstring(domain)?;
        self.proxy.with_handle(|api, handle| {
            let get_fn = api_fn!(api, GDALGetMetadata);
            Ok(unsafe { string_list_from_ptr(get_fn(handle.as_ptr(), opt_ptr(&domain))) })
        })
    }

    /// Replace the entries of a metadata domain
    pub fn set_metadata<S: AsRef<str>>(&self, entries: &[S], domain: Option<&str>) -> Result<CplErr> {
        let entries = CStringList::try_new(entries)?;
        let domain = opt_cstring(domain)?;
        self.proxy.with_handle(|api, handle| {
            let set_fn = api_fn!(api, GDALSetMetadata);
            let status = unsafe { set_fn(handle.as_ptr(), entries.as_ptr(), opt_ptr(&domain)) };
            Ok(status.into())
        })
    }

    /// Replace the entries of a metadata domain with a single entry
    pub fn set_metadata_string(&self, entry: &str, domain: Option<&str>) -> Result<CplErr> {
        self.set_metadata(&[entry], domain)
    }

    pub fn metadata_item(&self, name: &str, domain: Option<&str>) -> Result<Option<String>> {
        let name = CString::new(name)?;
        let domain = opt_cstring(domain)?;
        self.proxy.with_handle(|api, handle| {
            let get_fn = api_fn!(api, GDALGetMetadataItem);
            Ok(unsafe {
                string_from_ptr(get_fn(handle.as_ptr(), name.as_ptr(), opt_ptr(&domain)))
            })
        })
    }

    pub fn set_metadata_item(&self, name: &str, value: &str, domain: Option<&str>) -> Result<CplErr> {
        let name = CString::new(name)?;
        let value = CString::new(value)?;
        let domain = opt_cstring(domain)?;
        self.proxy.with_handle(|api, handle| {
            let set_fn = api_fn!(api, GDALSetMetadataItem);
            let status = unsafe {
                set_fn(
                    handle.as_ptr(),
                    name.as_ptr(),
                    value.as_ptr(),
                    opt_ptr(&domain),
                )
            };
            Ok(status.into())
        })
    }
}

/// Entry point for the drivers registered with GDAL
///
/// Drivers belong to GDAL's driver manager, so the returned objects are views.
#[derive(Debug, Clone)]
pub struct DriverManager {
    library: Arc<GdalLibrary>,
}

impl DriverManager {
    pub fn new(library: Arc<GdalLibrary>) -> Self {
        Self { library }
    }

    pub fn register_all(&self) -> Result<()> {
        self.library.call(|api| {
            let register_fn = api_fn!(api, GDALAllRegister);
            unsafe { register_fn() };
            Ok(())
        })
    }

    pub fn driver_by_name(&self, name: &str) -> Result<Option<MajorObject>> {
        let name = CString::new(name)?;
        self.library.call(|api| {
            let get_fn = api_fn!(api, GDALGetDriverByName);
            let handle = NativeHandle::from_raw(unsafe { get_fn(name.as_ptr()) });
            Ok(MajorObject::from_view(&self.library, handle, None))
        })
    }
}
