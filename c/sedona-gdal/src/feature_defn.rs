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
use std::sync::Arc;

use crate::error::{Result, SedonaGdalError};
use crate::field_defn::FieldDefn;
use crate::gdal_dyn_bindgen::{GdalApi, CPLE_AppDefined};
use crate::handle::{native_wrapper, AsNativeProxy, NativeHandle, NativeKind, NativeProxy};
use crate::library::GdalLibrary;
use crate::strings::string_from_ptr;

pub struct FeatureDefnKind;

impl NativeKind for FeatureDefnKind {
    const NAME: &'static str = "FeatureDefn";

    /// Feature definitions are reference counted natively; this drops the
    /// reference taken when the proxy was created.
    fn release(api: &GdalApi, handle: NativeHandle) -> Result<()> {
        let release_fn = api_fn!(api, OGR_FD_Release);
        unsafe { release_fn(handle.as_ptr()) };
        Ok(())
    }
}

/// Schema shared by a set of features
pub struct FeatureDefn {
    proxy: Arc<NativeProxy<FeatureDefnKind>>,
}

native_wrapper!(FeatureDefn, FeatureDefnKind);

impl FeatureDefn {
    pub fn new(library: &Arc<GdalLibrary>, name: &str) -> Result<Self> {
        let name = CString::new(name)?;
        library.call(|api| {
            let create_fn = api_fn!(api, OGR_FD_Create);
            let reference_fn = api_fn!(api, OGR_FD_Reference);
            let handle = NativeHandle::from_raw(unsafe { create_fn(name.as_ptr()) });
            if !handle.is_null() {
                unsafe { reference_fn(handle.as_ptr()) };
            }
            Self::from_owned(library, handle)
                .ok_or_else(|| SedonaGdalError::native(CPLE_AppDefined, "OGR_FD_Create failed"))
        })
    }

    pub fn name(&self) -> Result<String> {
        self.proxy.with_handle(|api, handle| {
            let name_fn = api_fn!(api, OGR_FD_GetName);
            Ok(unsafe { string_from_ptr(name_fn(handle.as_ptr())) }.unwrap_or_default())
        })
    }

    pub fn field_count(&self) -> Result<i32> {
        self.proxy.with_handle(|api, handle| {
            let count_fn = api_fn!(api, OGR_FD_GetFieldCount);
            Ok(unsafe { count_fn(handle.as_ptr()) })
        })
    }

    /// A view of the field definition at `index`, kept valid by this object
    pub fn field_defn(&self, index: i32) -> Result<FieldDefn> {
        self.proxy.with_handle(|api, handle| {
            let get_fn = api_fn!(api, OGR_FD_GetFieldDefn);
            let field = NativeHandle::from_raw(unsafe { get_fn(handle.as_ptr(), index) });
            FieldDefn::from_view(self.proxy.library(), field, Some(self.keep_alive())).ok_or_else(
                || SedonaGdalError::native(CPLE_AppDefined, format!("Invalid index : {index}")),
            )
        })
    }

    /// Append a copy of `field`; the caller keeps ownership of `field`
    pub fn add_field_defn(&self, field: &FieldDefn) -> Result<()> {
        let field_handle = field.handle();
        self.proxy.with_handle(|api, handle| {
            let add_fn = api_fn!(api, OGR_FD_AddFieldDefn);
            unsafe { add_fn(handle.as_ptr(), field_handle.as_ptr()) };
            Ok(())
        })
    }

    /// Index of the field called `name`, or `None` if there is no such field
    pub fn field_index(&self, name: &str) -> Result<Option<i32>> {
        let name = CString::new(name)?;
        self.proxy.with_handle(|api, handle| {
            let index_fn = api_fn!(api, OGR_FD_GetFieldIndex);
            let index = unsafe { index_fn(handle.as_ptr(), name.as_ptr()) };
            Ok((index >= 0).then_some(index))
        })
    }
}
