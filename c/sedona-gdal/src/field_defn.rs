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
use crate::gdal_dyn_bindgen::*;
use crate::handle::{native_wrapper, NativeHandle, NativeKind, NativeProxy};
use crate::library::GdalLibrary;
use crate::strings::string_from_ptr;

/// Attribute field type (`OGRFieldType`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    IntegerList,
    Real,
    RealList,
    String,
    StringList,
    WideString,
    WideStringList,
    Binary,
    Date,
    Time,
    DateTime,
    Integer64,
    Integer64List,
    Other(OGRFieldType),
}

impl From<OGRFieldType> for FieldType {
    #[allow(non_upper_case_globals)]
    fn from(value: OGRFieldType) -> Self {
        match value {
            OGRFieldType_OFTInteger => FieldType::Integer,
            OGRFieldType_OFTIntegerList => FieldType::IntegerList,
            OGRFieldType_OFTReal => FieldType::Real,
            OGRFieldType_OFTRealList => FieldType::RealList,
            OGRFieldType_OFTString => FieldType::String,
            OGRFieldType_OFTStringList => FieldType::StringList,
            OGRFieldType_OFTWideString => FieldType::WideString,
            OGRFieldType_OFTWideStringList => FieldType::WideStringList,
            OGRFieldType_OFTBinary => FieldType::Binary,
            OGRFieldType_OFTDate => FieldType::Date,
            OGRFieldType_OFTTime => FieldType::Time,
            OGRFieldType_OFTDateTime => FieldType::DateTime,
            OGRFieldType_OFTInteger64 => FieldType::Integer64,
            OGRFieldType_OFTInteger64List => FieldType::Integer64List,
            other => FieldType::Other(other),
        }
    }
}

impl From<FieldType> for OGRFieldType {
    fn from(value: FieldType) -> Self {
        match value {
            FieldType::Integer => OGRFieldType_OFTInteger,
            FieldType::IntegerList => OGRFieldType_OFTIntegerList,
            FieldType::Real => OGRFieldType_OFTReal,
            FieldType::RealList => OGRFieldType_OFTRealList,
            FieldType::String => OGRFieldType_OFTString,
            FieldType::StringList => OGRFieldType_OFTStringList,
            FieldType::WideString => OGRFieldType_OFTWideString,
            FieldType::WideStringList => OGRFieldType_OFTWideStringList,
            FieldType::Binary => OGRFieldType_OFTBinary,
            FieldType::Date => OGRFieldType_OFTDate,
            FieldType::Time => OGRFieldType_OFTTime,
            FieldType::DateTime => OGRFieldType_OFTDateTime,
            FieldType::Integer64 => OGRFieldType_OFTInteger64,
            FieldType::Integer64List => OGRFieldType_OFTInteger64List,
            FieldType::Other(other) => other,
        }
    }
}

pub struct FieldDefnKind;

impl NativeKind for FieldDefnKind {
    const NAME: &'static str = "FieldDefn";

    fn release(api: &GdalApi, handle: NativeHandle) -> Result<()> {
        let destroy_fn = api_fn!(api, OGR_Fld_Destroy);
        unsafe { destroy_fn(handle.as_ptr()) };
        Ok(())
    }
}

/// Definition of one attribute field
///
/// Field definitions read from a feature or a feature definition are views;
/// `FieldDefn::new` creates an owned one that can be added to a
/// [FeatureDefn](crate::feature_defn::FeatureDefn) (which copies it).
pub struct FieldDefn {
    proxy: Arc<NativeProxy<FieldDefnKind>>,
}

native_wrapper!(FieldDefn, FieldDefnKind);

impl FieldDefn {
    pub fn new(library: &Arc<GdalLibrary>, name: &str, field_type: FieldType) -> Result<Self> {
        let name = CString::new(name)?;
        library.call(|api| {
            let create_fn = api_fn!(api, OGR_Fld_Create);
            let handle =
                NativeHandle::from_raw(unsafe { create_fn(name.as_ptr(), field_type.into()) });
            Self::from_owned(library, handle)
                .ok_or_else(|| SedonaGdalError::native(CPLE_AppDefined, "OGR_Fld_Create failed"))
        })
    }

    pub fn name(&self) -> Result<String> {
        self.proxy.with_handle(|api, handle| {
            let name_fn = api_fn!(api, OGR_Fld_GetNameRef);
            Ok(unsafe { string_from_ptr(name_fn(handle.as_ptr())) }.unwrap_or_default())
        })
    }

    pub fn field_type(&self) -> Result<FieldType> {
        self.proxy.with_handle(|api, handle| {
            let type_fn = api_fn!(api, OGR_Fld_GetType);
            Ok(unsafe { type_fn(handle.as_ptr()) }.into())
        })
    }

    pub fn width(&self) -> Result<i32> {
        self.proxy.with_handle(|api, handle| {
            let width_fn = api_fn!(api, OGR_Fld_GetWidth);
            Ok(unsafe { width_fn(handle.as_ptr()) })
        })
    }

    pub fn set_width(&self, width: i32) -> Result<()> {
        self.proxy.with_handle(|api, handle| {
            let set_fn = api_fn!(api, OGR_Fld_SetWidth);
            unsafe { set_fn(handle.as_ptr(), width) };
            Ok(())
        })
    }

    pub fn precision(&self) -> Result<i32> {
        self.proxy.with_handle(|api, handle| {
            let precision_fn = api_fn!(api, OGR_Fld_GetPrecision);
            Ok(unsafe { precision_fn(handle.as_ptr()) })
        })
    }

    pub fn set_precision(&self, precision: i32) -> Result<()> {
        self.proxy.with_handle(|api, handle| {
            let set_fn = api_fn!(api, OGR_Fld_SetPrecision);
            unsafe { set_fn(handle.as_ptr(), precision) };
            Ok(())
        })
    }
}
