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

//! Vector features: a geometry plus attribute values described by a
//! [FeatureDefn]
//!
//! A feature owns its geometry and shares its definition. Everything read
//! back out of a feature as an object ([Feature::geometry_ref],
//! [Feature::field_defn_ref], [Feature::defn_ref]) is a view that keeps the
//! feature alive; [Feature::steal_geometry] and [Feature::try_clone] return
//! owned objects.

use std::ffi::CString;
use std::os::raw::c_int;
use std::ptr::null_mut;
use std::sync::Arc;

use crate::error::{ogr_result, Result, SedonaGdalError};
use crate::feature_defn::FeatureDefn;
use crate::field_defn::{FieldDefn, FieldType};
use crate::gdal_dyn_bindgen::{
    GdalApi, CPLE_AppDefined, CPLE_IllegalArg, OGRNullFID, OGRERR_NONE,
};
use crate::geometry::Geometry;
use crate::handle::{
    get_handle, native_wrapper, AsNativeProxy, Handoff, NativeHandle, NativeKind, NativeProxy,
};
use crate::strings::{string_from_ptr, string_list_from_ptr, CStringList};

/// A field addressed either by position or by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId<'a> {
    Index(i32),
    Name(&'a str),
}

impl From<i32> for FieldId<'_> {
    fn from(value: i32) -> Self {
        FieldId::Index(value)
    }
}

impl<'a> From<&'a str> for FieldId<'a> {
    fn from(value: &'a str) -> Self {
        FieldId::Name(value)
    }
}

/// Broken-down date and time of a date/time field
///
/// `tz_flag` follows GDAL: 0 unknown, 1 local time, 100 GMT, and other
/// values are offsets from GMT in 15 minute increments around 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateTime {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
    pub tz_flag: i32,
}

pub struct FeatureKind;

impl NativeKind for FeatureKind {
    const NAME: &'static str = "Feature";

    fn release(api: &GdalApi, handle: NativeHandle) -> Result<()> {
        let destroy_fn = api_fn!(api, OGR_F_Destroy);
        unsafe { destroy_fn(handle.as_ptr()) };
        Ok(())
    }
}

pub struct Feature {
    proxy: Arc<NativeProxy<FeatureKind>>,
}

native_wrapper!(Feature, FeatureKind);

impl Feature {
    /// A feature with every field unset and no geometry
    ///
    /// The feature takes its own native reference to `defn`, so `defn` may be
    /// dropped first.
    pub fn new(defn: &FeatureDefn) -> Result<Self> {
        let library = defn.proxy().library();
        let defn_handle = defn.handle();
        library.call(|api| {
            let create_fn = api_fn!(api, OGR_F_Create);
            let handle = NativeHandle::from_raw(unsafe { create_fn(defn_handle.as_ptr()) });
            Self::from_owned(library, handle)
                .ok_or_else(|| SedonaGdalError::native(CPLE_AppDefined, "OGR_F_Create failed"))
        })
    }

    /// A view of this feature's definition
    pub fn defn_ref(&self) -> Result<FeatureDefn> {
        self.proxy.with_handle(|api, handle| {
            let get_fn = api_fn!(api, OGR_F_GetDefnRef);
            let defn = NativeHandle::from_raw(unsafe { get_fn(handle.as_ptr()) });
            FeatureDefn::from_view(self.proxy.library(), defn, Some(self.keep_alive()))
                .ok_or_else(|| SedonaGdalError::native(CPLE_AppDefined, "Feature has no definition"))
        })
    }

    /// Replace the geometry with a copy of `geometry` (or clear it with
    /// `None`); the caller keeps ownership of `geometry`
    ///
    /// Views of the previous geometry become invalid.
    pub fn set_geometry(&self, geometry: Option<&Geometry>) -> Result<()> {
        let geometry_handle = get_handle(geometry.map(|g| g.proxy().as_ref()));
        self.proxy.with_handle_mut(|api, handle| {
            let set_fn = api_fn!(api, OGR_F_SetGeometry);
            ogr_result(unsafe { set_fn(handle.as_ptr(), geometry_handle.as_ptr()) })
        })
    }

    /// Hand `geometry` over to this feature without copying it
    ///
    /// Afterwards `geometry` is a view into this feature: it is never released
    /// through its own proxy, keeps this feature alive, and becomes invalid
    /// once the feature replaces or gives away its geometry. GDAL destroys
    /// `geometry` when it rejects it, so a failure leaves it disposed.
    pub fn set_geometry_directly(&self, geometry: Option<&Geometry>) -> Result<()> {
        let Some(geometry) = geometry else {
            return self.set_geometry(None);
        };

        geometry.proxy().transfer(|geometry_handle, handoff| {
            self.proxy.with_handle_mut(|api, handle| {
                let set_fn = api_fn!(api, OGR_F_SetGeometryDirectly);
                let err = unsafe { set_fn(handle.as_ptr(), geometry_handle.as_ptr()) };
                *handoff = if err == OGRERR_NONE {
                    Handoff::Adopted(self.proxy.generation_keep_alive())
                } else {
                    Handoff::Consumed
                };
                ogr_result(err)
            })
        })
    }

    /// A view of the current geometry, if any
    pub fn geometry_ref(&self) -> Result<Option<Geometry>> {
        self.proxy.with_handle(|api, handle| {
            let get_fn = api_fn!(api, OGR_F_GetGeometryRef);
            let geometry = NativeHandle::from_raw(unsafe { get_fn(handle.as_ptr()) });
            Ok(Geometry::from_view(
                self.proxy.library(),
                geometry,
                Some(self.proxy.generation_keep_alive()),
            ))
        })
    }

    /// Detach the geometry from this feature and take ownership of it
    ///
    /// Existing views of the geometry become invalid; only the returned proxy
    /// refers to it from now on.
    pub fn steal_geometry(&self) -> Result<Option<Geometry>> {
        self.proxy.with_handle_mut(|api, handle| {
            let steal_fn = api_fn!(api, OGR_F_StealGeometry);
            let geometry = NativeHandle::from_raw(unsafe { steal_fn(handle.as_ptr()) });
            Ok(Geometry::from_owned(self.proxy.library(), geometry))
        })
    }

    /// A new, independently owned copy including the geometry
    pub fn try_clone(&self) -> Result<Feature> {
        self.proxy.with_handle(|api, handle| {
            let clone_fn = api_fn!(api, OGR_F_Clone);
            let cloned = NativeHandle::from_raw(unsafe { clone_fn(handle.as_ptr()) });
            Self::from_owned(self.proxy.library(), cloned)
                .ok_or_else(|| SedonaGdalError::native(CPLE_AppDefined, "OGR_F_Clone failed"))
        })
    }

    /// Whether both features have the same definition, field values, geometry
    /// and FID
    pub fn equal(&self, other: &Feature) -> Result<bool> {
        let other_handle = other.handle();
        self.proxy.with_handle(|api, handle| {
            let equal_fn = api_fn!(api, OGR_F_Equal);
            Ok(unsafe { equal_fn(handle.as_ptr(), other_handle.as_ptr()) } != 0)
        })
    }

    pub fn field_count(&self) -> Result<i32> {
        self.proxy.with_handle(|api, handle| {
            let count_fn = api_fn!(api, OGR_F_GetFieldCount);
            Ok(unsafe { count_fn(handle.as_ptr()) })
        })
    }

    /// A view of a field definition, kept valid by this feature
    pub fn field_defn_ref<'a>(&self, id: impl Into<FieldId<'a>>) -> Result<FieldDefn> {
        self.with_field(id.into(), |api, handle, index| {
            let get_fn = api_fn!(api, OGR_F_GetFieldDefnRef);
            let field = NativeHandle::from_raw(unsafe { get_fn(handle.as_ptr(), index) });
            FieldDefn::from_view(self.proxy.library(), field, Some(self.keep_alive())).ok_or_else(
                || SedonaGdalError::native(CPLE_AppDefined, format!("Invalid index : {index}")),
            )
        })
    }

    pub fn field_type<'a>(&self, id: impl Into<FieldId<'a>>) -> Result<FieldType> {
        self.with_field(id.into(), |api, handle, index| {
            let get_fn = api_fn!(api, OGR_F_GetFieldDefnRef);
            let type_fn = api_fn!(api, OGR_Fld_GetType);
            let field = unsafe { get_fn(handle.as_ptr(), index) };
            if field.is_null() {
                return Err(SedonaGdalError::native(
                    CPLE_AppDefined,
                    format!("Invalid index : {index}"),
                ));
            }
            Ok(unsafe { type_fn(field) }.into())
        })
    }

    /// Index of the field called `name`, or `None` if there is no such field
    pub fn field_index(&self, name: &str) -> Result<Option<i32>> {
        let name = CString::new(name)?;
        self.proxy.with_handle(|api, handle| {
            let index_fn = api_fn!(api, OGR_F_GetFieldIndex);
            let index = unsafe { index_fn(handle.as_ptr(), name.as_ptr()) };
            Ok((index >= 0).then_some(index))
        })
    }

    pub fn is_field_set<'a>(&self, id: impl Into<FieldId<'a>>) -> Result<bool> {
        self.with_field(id.into(), |api, handle, index| {
            let is_set_fn = api_fn!(api, OGR_F_IsFieldSet);
            Ok(unsafe { is_set_fn(handle.as_ptr(), index) } != 0)
        })
    }

    pub fn unset_field<'a>(&self, id: impl Into<FieldId<'a>>) -> Result<()> {
        self.with_field(id.into(), |api, handle, index| {
            let unset_fn = api_fn!(api, OGR_F_UnsetField);
            unsafe { unset_fn(handle.as_ptr(), index) };
            Ok(())
        })
    }

    pub fn field_as_string<'a>(&self, id: impl Into<FieldId<'a>>) -> Result<String> {
        self.with_field(id.into(), |api, handle, index| {
            let get_fn = api_fn!(api, OGR_F_GetFieldAsString);
            Ok(unsafe { string_from_ptr(get_fn(handle.as_ptr(), index)) }.unwrap_or_default())
        })
    }

    pub fn field_as_integer<'a>(&self, id: impl Into<FieldId<'a>>) -> Result<i32> {
        self.with_field(id.into(), |api, handle, index| {
            let get_fn = api_fn!(api, OGR_F_GetFieldAsInteger);
            Ok(unsafe { get_fn(handle.as_ptr(), index) })
        })
    }

    pub fn field_as_double<'a>(&self, id: impl Into<FieldId<'a>>) -> Result<f64> {
        self.with_field(id.into(), |api, handle, index| {
            let get_fn = api_fn!(api, OGR_F_GetFieldAsDouble);
            Ok(unsafe { get_fn(handle.as_ptr(), index) })
        })
    }

    /// The value of a date, time or date/time field, or `None` if the field
    /// does not hold one
    pub fn field_as_date_time<'a>(&self, id: impl Into<FieldId<'a>>) -> Result<Option<DateTime>> {
        self.with_field(id.into(), |api, handle, index| {
            let get_fn = api_fn!(api, OGR_F_GetFieldAsDateTime);
            let mut out = DateTime::default();
            let ok = unsafe {
                get_fn(
                    handle.as_ptr(),
                    index,
                    &mut out.year,
                    &mut out.month,
                    &mut out.day,
                    &mut out.hour,
                    &mut out.minute,
                    &mut out.second,
                    &mut out.tz_flag,
                )
            };
            Ok((ok != 0).then_some(out))
        })
    }

    pub fn field_as_integer_list<'a>(&self, id: impl Into<FieldId<'a>>) -> Result<Vec<i32>> {
        self.with_field(id.into(), |api, handle, index| {
            let get_fn = api_fn!(api, OGR_F_GetFieldAsIntegerList);
            let mut count: c_int = 0;
            let values = unsafe { get_fn(handle.as_ptr(), index, &mut count) };
            if values.is_null() || count <= 0 {
                return Ok(vec![]);
            }
            Ok(unsafe { std::slice::from_raw_parts(values, count as usize) }.to_vec())
        })
    }

    pub fn field_as_double_list<'a>(&self, id: impl Into<FieldId<'a>>) -> Result<Vec<f64>> {
        self.with_field(id.into(), |api, handle, index| {
            let get_fn = api_fn!(api, OGR_F_GetFieldAsDoubleList);
            let mut count: c_int = 0;
            let values = unsafe { get_fn(handle.as_ptr(), index, &mut count) };
            if values.is_null() || count <= 0 {
                return Ok(vec![]);
            }
            Ok(unsafe { std::slice::from_raw_parts(values, count as usize) }.to_vec())
        })
    }

    pub fn field_as_string_list<'a>(&self, id: impl Into<FieldId<'a>>) -> Result<Vec<String>> {
        self.with_field(id.into(), |api, handle, index| {
            let get_fn = api_fn!(api, OGR_F_GetFieldAsStringList);
            Ok(unsafe { string_list_from_ptr(get_fn(handle.as_ptr(), index)) })
        })
    }

    pub fn set_field_string<'a>(&self, id: impl Into<FieldId<'a>>, value: &str) -> Result<()> {
        let value = CString::new(value)?;
        self.with_field(id.into(), |api, handle, index| {
            let set_fn = api_fn!(api, OGR_F_SetFieldString);
            unsafe { set_fn(handle.as_ptr(), index, value.as_ptr()) };
            Ok(())
        })
    }

    pub fn set_field_integer<'a>(&self, id: impl Into<FieldId<'a>>, value: i32) -> Result<()> {
        self.with_field(id.into(), |api, handle, index| {
            let set_fn = api_fn!(api, OGR_F_SetFieldInteger);
            unsafe { set_fn(handle.as_ptr(), index, value) };
            Ok(())
        })
    }

    pub fn set_field_double<'a>(&self, id: impl Into<FieldId<'a>>, value: f64) -> Result<()> {
        self.with_field(id.into(), |api, handle, index| {
            let set_fn = api_fn!(api, OGR_F_SetFieldDouble);
            unsafe { set_fn(handle.as_ptr(), index, value) };
            Ok(())
        })
    }

    pub fn set_field_date_time<'a>(
        &self,
        id: impl Into<FieldId<'a>>,
        value: &DateTime,
    ) -> Result<()> {
        self.with_field(id.into(), |api, handle, index| {
            let set_fn = api_fn!(api, OGR_F_SetFieldDateTime);
            unsafe {
                set_fn(
                    handle.as_ptr(),
                    index,
                    value.year,
                    value.month,
                    value.day,
                    value.hour,
                    value.minute,
                    value.second,
                    value.tz_flag,
                )
            };
            Ok(())
        })
    }

    pub fn set_field_integer_list<'a>(
        &self,
        id: impl Into<FieldId<'a>>,
        values: &[i32],
    ) -> Result<()> {
        let count = list_len(values.len())?;
        self.with_field(id.into(), |api, handle, index| {
            let set_fn = api_fn!(api, OGR_F_SetFieldIntegerList);
            unsafe { set_fn(handle.as_ptr(), index, count, values.as_ptr()) };
            Ok(())
        })
    }

    pub fn set_field_double_list<'a>(
        &self,
        id: impl Into<FieldId<'a>>,
        values: &[f64],
    ) -> Result<()> {
        let count = list_len(values.len())?;
        self.with_field(id.into(), |api, handle, index| {
            let set_fn = api_fn!(api, OGR_F_SetFieldDoubleList);
            unsafe { set_fn(handle.as_ptr(), index, count, values.as_ptr()) };
            Ok(())
        })
    }

    pub fn set_field_string_list<'a, S: AsRef<str>>(
        &self,
        id: impl Into<FieldId<'a>>,
        values: &[S],
    ) -> Result<()> {
        let values = CStringList::try_new(values)?;
        self.with_field(id.into(), |api, handle, index| {
            let set_fn = api_fn!(api, OGR_F_SetFieldStringList);
            unsafe { set_fn(handle.as_ptr(), index, values.as_ptr()) };
            Ok(())
        })
    }

    /// The feature id, or `None` if it has not been assigned
    pub fn fid(&self) -> Result<Option<i64>> {
        self.proxy.with_handle(|api, handle| {
            let get_fn = api_fn!(api, OGR_F_GetFID);
            let fid = unsafe { get_fn(handle.as_ptr()) };
            Ok((fid != OGRNullFID).then_some(fid))
        })
    }

    pub fn set_fid(&self, fid: i64) -> Result<()> {
        self.proxy.with_handle(|api, handle| {
            let set_fn = api_fn!(api, OGR_F_SetFID);
            ogr_result(unsafe { set_fn(handle.as_ptr(), fid) })
        })
    }

    /// Print a human readable description of this feature to stdout
    pub fn dump_readable(&self) -> Result<()> {
        self.proxy.with_handle(|api, handle| {
            let dump_fn = api_fn!(api, OGR_F_DumpReadable);
            unsafe { dump_fn(handle.as_ptr(), null_mut()) };
            Ok(())
        })
    }

    /// Copy the geometry, style and same-named field values of `other`
    ///
    /// Unless `forgiving`, a field of `other` with no counterpart here fails
    /// the whole copy.
    pub fn set_from(&self, other: &Feature, forgiving: bool) -> Result<()> {
        let other_handle = other.handle();
        // Copies the geometry over ours
        self.proxy.with_handle_mut(|api, handle| {
            let set_fn = api_fn!(api, OGR_F_SetFrom);
            ogr_result(unsafe {
                set_fn(handle.as_ptr(), other_handle.as_ptr(), forgiving as c_int)
            })
        })
    }

    pub fn style_string(&self) -> Result<Option<String>> {
        self.proxy.with_handle(|api, handle| {
            let get_fn = api_fn!(api, OGR_F_GetStyleString);
            Ok(unsafe { string_from_ptr(get_fn(handle.as_ptr())) })
        })
    }

    pub fn set_style_string(&self, style: &str) -> Result<()> {
        let style = CString::new(style)?;
        self.proxy.with_handle(|api, handle| {
            let set_fn = api_fn!(api, OGR_F_SetStyleString);
            unsafe { set_fn(handle.as_ptr(), style.as_ptr()) };
            Ok(())
        })
    }

    /// Resolve `id` to an index and run a native call with it
    fn with_field<R>(
        &self,
        id: FieldId,
        func: impl FnOnce(&GdalApi, NativeHandle, c_int) -> Result<R>,
    ) -> Result<R> {
        self.proxy.with_handle(|api, handle| {
            let index = resolve_field_index(api, handle, id)?;
            func(api, handle, index)
        })
    }
}

fn resolve_field_index(api: &GdalApi, handle: NativeHandle, id: FieldId) -> Result<c_int> {
    match id {
        FieldId::Index(index) => Ok(index),
        FieldId::Name(name) => {
            let c_name = CString::new(name)?;
            let index_fn = api_fn!(api, OGR_F_GetFieldIndex);
            let index = unsafe { index_fn(handle.as_ptr(), c_name.as_ptr()) };
            if index < 0 {
                Err(SedonaGdalError::native(
                    CPLE_AppDefined,
                    format!("No such field: '{name}'"),
                ))
            } else {
                Ok(index)
            }
        }
    }
}

fn list_len(len: usize) -> Result<c_int> {
    c_int::try_from(len)
        .map_err(|_| SedonaGdalError::native(CPLE_IllegalArg, "List value is too long"))
}
