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
use std::ffi::CString;
use std::os::raw::c_int;
use std::ptr::null_mut;
use std::sync::Arc;

use crate::error::{ogr_result, Result, SedonaGdalError};
use crate::gdal_dyn_bindgen::{GdalApi, CPLE_AppDefined, CPLE_IllegalArg};
use crate::handle::{native_wrapper, AsNativeProxy, NativeHandle, NativeKind, NativeProxy};
use crate::library::GdalLibrary;
use crate::strings::take_native_string;

pub struct SpatialReferenceKind;

impl NativeKind for SpatialReferenceKind {
    const NAME: &'static str = "SpatialReference";

    fn release(api: &GdalApi, handle: NativeHandle) -> Result<()> {
        let destroy_fn = api_fn!(api, OSRDestroySpatialReference);
        unsafe { destroy_fn(handle.as_ptr()) };
        Ok(())
    }
}

/// A coordinate reference system (`OGRSpatialReferenceH`)
pub struct SpatialReference {
    proxy: Arc<NativeProxy<SpatialReferenceKind>>,
}

native_wrapper!(SpatialReference, SpatialReferenceKind);

impl SpatialReference {
    /// An empty spatial reference
    pub fn new(library: &Arc<GdalLibrary>) -> Result<Self> {
        Self::create(library, None)
    }

    pub fn from_wkt(library: &Arc<GdalLibrary>, wkt: &str) -> Result<Self> {
        Self::create(library, Some(CString::new(wkt)?))
    }

    pub fn from_epsg(library: &Arc<GdalLibrary>, code: u32) -> Result<Self> {
        let code = c_int::try_from(code).map_err(|_| {
            SedonaGdalError::native(CPLE_IllegalArg, format!("Invalid EPSG code: {code}"))
        })?;
        let srs = Self::new(library)?;
        srs.proxy.with_handle(|api, handle| {
            let import_fn = api_fn!(api, OSRImportFromEPSG);
            ogr_result(unsafe { import_fn(handle.as_ptr(), code) })
        })?;
        Ok(srs)
    }

    /// Accepts anything `OSRSetFromUserInput()` does (e.g., `EPSG:4326`,
    /// WKT, or a PROJ string)
    pub fn from_user_input(library: &Arc<GdalLibrary>, definition: &str) -> Result<Self> {
        let definition = CString::new(definition)?;
        let srs = Self::new(library)?;
        srs.proxy.with_handle(|api, handle| {
            let set_fn = api_fn!(api, OSRSetFromUserInput);
            ogr_result(unsafe { set_fn(handle.as_ptr(), definition.as_ptr()) })
        })?;
        Ok(srs)
    }

    fn create(library: &Arc<GdalLibrary>, wkt: Option<CString>) -> Result<Self> {
        library.call(|api| {
            let new_fn = api_fn!(api, OSRNewSpatialReference);
            let wkt_ptr = wkt.as_ref().map_or(std::ptr::null(), |wkt| wkt.as_ptr());
            let handle = NativeHandle::from_raw(unsafe { new_fn(wkt_ptr) });
            Self::from_owned(library, handle).ok_or_else(|| {
                SedonaGdalError::native(CPLE_AppDefined, "OSRNewSpatialReference failed")
            })
        })
    }

    pub fn to_wkt(&self) -> Result<String> {
        self.proxy.with_handle(|api, handle| {
            let export_fn = api_fn!(api, OSRExportToWkt);
            let mut wkt = null_mut();
            let err = unsafe { export_fn(handle.as_ptr(), &mut wkt) };
            let out = unsafe { take_native_string(api, wkt) };
            ogr_result(err)?;
            Ok(out.unwrap_or_default())
        })
    }

    pub fn is_same(&self, other: &SpatialReference) -> Result<bool> {
        let other_handle = other.handle();
        self.proxy.with_handle(|api, handle| {
            let is_same_fn = api_fn!(api, OSRIsSame);
            Ok(unsafe { is_same_fn(handle.as_ptr(), other_handle.as_ptr()) } != 0)
        })
    }

    /// A new, independently owned copy
    pub fn try_clone(&self) -> Result<SpatialReference> {
        self.proxy.with_handle(|api, handle| {
            let clone_fn = api_fn!(api, OSRClone);
            let cloned = NativeHandle::from_raw(unsafe { clone_fn(handle.as_ptr()) });
            Self::from_owned(self.proxy.library(), cloned).ok_or_else(|| {
                SedonaGdalError::native(CPLE_AppDefined, "OSRClone failed")
            })
        })
    }
}
