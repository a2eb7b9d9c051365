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
use std::os::raw::c_char;
use std::ptr::null_mut;
use std::sync::Arc;

use crate::coordinate_transformation::CoordinateTransformation;
use crate::error::{ogr_result, Result, SedonaGdalError};
use crate::gdal_dyn_bindgen::*;
use crate::handle::{native_wrapper, AsNativeProxy, NativeHandle, NativeKind, NativeProxy};
use crate::library::GdalLibrary;
use crate::strings::take_native_string;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryType {
    Unknown,
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
    LinearRing,
    /// Any other `OGRwkbGeometryType` value (e.g., Z/M variants)
    Other(OGRwkbGeometryType),
}

impl From<OGRwkbGeometryType> for GeometryType {
    #[allow(non_upper_case_globals)]
    fn from(value: OGRwkbGeometryType) -> Self {
        match value {
            OGRwkbGeometryType_wkbUnknown => GeometryType::Unknown,
            OGRwkbGeometryType_wkbPoint => GeometryType::Point,
            OGRwkbGeometryType_wkbLineString => GeometryType::LineString,
            OGRwkbGeometryType_wkbPolygon => GeometryType::Polygon,
            OGRwkbGeometryType_wkbMultiPoint => GeometryType::MultiPoint,
            OGRwkbGeometryType_wkbMultiLineString => GeometryType::MultiLineString,
            OGRwkbGeometryType_wkbMultiPolygon => GeometryType::MultiPolygon,
            OGRwkbGeometryType_wkbGeometryCollection => GeometryType::GeometryCollection,
            OGRwkbGeometryType_wkbLinearRing => GeometryType::LinearRing,
            other => GeometryType::Other(other),
        }
    }
}

impl From<GeometryType> for OGRwkbGeometryType {
    fn from(value: GeometryType) -> Self {
        match value {
            GeometryType::Unknown => OGRwkbGeometryType_wkbUnknown,
            GeometryType::Point => OGRwkbGeometryType_wkbPoint,
            GeometryType::LineString => OGRwkbGeometryType_wkbLineString,
            GeometryType::Polygon => OGRwkbGeometryType_wkbPolygon,
            GeometryType::MultiPoint => OGRwkbGeometryType_wkbMultiPoint,
            GeometryType::MultiLineString => OGRwkbGeometryType_wkbMultiLineString,
            GeometryType::MultiPolygon => OGRwkbGeometryType_wkbMultiPolygon,
            GeometryType::GeometryCollection => OGRwkbGeometryType_wkbGeometryCollection,
            GeometryType::LinearRing => OGRwkbGeometryType_wkbLinearRing,
            GeometryType::Other(other) => other,
        }
    }
}

pub struct GeometryKind;

impl NativeKind for GeometryKind {
    const NAME: &'static str = "Geometry";

    fn release(api: &GdalApi, handle: NativeHandle) -> Result<()> {
        let destroy_fn = api_fn!(api, OGR_G_DestroyGeometry);
        unsafe { destroy_fn(handle.as_ptr()) };
        Ok(())
    }
}

/// An OGR geometry
///
/// Geometries obtained from a feature with `geometry_ref()` are views into
/// the feature; everything else is owned.
pub struct Geometry {
    proxy: Arc<NativeProxy<GeometryKind>>,
}

native_wrapper!(Geometry, GeometryKind);

impl Geometry {
    /// An empty geometry of the given type
    pub fn create(library: &Arc<GdalLibrary>, geometry_type: GeometryType) -> Result<Self> {
        library.call(|api| {
            let create_fn = api_fn!(api, OGR_G_CreateGeometry);
            let handle = NativeHandle::from_raw(unsafe { create_fn(geometry_type.into()) });
            Self::from_owned(library, handle).ok_or_else(|| {
                SedonaGdalError::native(
                    OGRERR_UNSUPPORTED_GEOMETRY_TYPE,
                    format!("Can't create geometry of type {geometry_type:?}"),
                )
            })
        })
    }

    pub fn from_wkt(library: &Arc<GdalLibrary>, wkt: &str) -> Result<Self> {
        let wkt = CString::new(wkt)?;
        library.call(|api| {
            let create_fn = api_fn!(api, OGR_G_CreateFromWkt);
            // GDAL advances this pointer past the consumed text
            let mut text = wkt.as_ptr() as *mut c_char;
            let mut out = null_mut();
            let err = unsafe { create_fn(&mut text, null_mut(), &mut out) };
            let geometry = Self::from_owned(library, NativeHandle::from_raw(out));
            ogr_result(err)?;
            geometry.ok_or_else(|| SedonaGdalError::native(OGRERR_CORRUPT_DATA, "Empty WKT"))
        })
    }

    pub fn to_wkt(&self) -> Result<String> {
        self.proxy.with_handle(|api, handle| {
            let export_fn = api_fn!(api, OGR_G_ExportToWkt);
            let mut wkt = null_mut();
            let err = unsafe { export_fn(handle.as_ptr(), &mut wkt) };
            let out = unsafe { take_native_string(api, wkt) };
            ogr_result(err)?;
            Ok(out.unwrap_or_default())
        })
    }

    pub fn geometry_type(&self) -> Result<GeometryType> {
        self.proxy.with_handle(|api, handle| {
            let type_fn = api_fn!(api, OGR_G_GetGeometryType);
            Ok(unsafe { type_fn(handle.as_ptr()) }.into())
        })
    }

    pub fn add_point_2d(&self, x: f64, y: f64) -> Result<()> {
        self.proxy.with_handle(|api, handle| {
            let add_fn = api_fn!(api, OGR_G_AddPoint_2D);
            unsafe { add_fn(handle.as_ptr(), x, y) };
            Ok(())
        })
    }

    pub fn add_point(&self, x: f64, y: f64, z: f64) -> Result<()> {
        self.proxy.with_handle(|api, handle| {
            let add_fn = api_fn!(api, OGR_G_AddPoint);
            unsafe { add_fn(handle.as_ptr(), x, y, z) };
            Ok(())
        })
    }

    pub fn point_count(&self) -> Result<usize> {
        self.proxy.with_handle(|api, handle| {
            let count_fn = api_fn!(api, OGR_G_GetPointCount);
            Ok(unsafe { count_fn(handle.as_ptr()) }.max(0) as usize)
        })
    }

    /// A new, independently owned copy
    pub fn try_clone(&self) -> Result<Geometry> {
        self.proxy.with_handle(|api, handle| {
            let clone_fn = api_fn!(api, OGR_G_Clone);
            let cloned = NativeHandle::from_raw(unsafe { clone_fn(handle.as_ptr()) });
            Self::from_owned(self.proxy.library(), cloned)
                .ok_or_else(|| SedonaGdalError::native(CPLE_AppDefined, "OGR_G_Clone failed"))
        })
    }

    pub fn equals(&self, other: &Geometry) -> Result<bool> {
        let other_handle = other.handle();
        self.proxy.with_handle(|api, handle| {
            let equals_fn = api_fn!(api, OGR_G_Equals);
            Ok(unsafe { equals_fn(handle.as_ptr(), other_handle.as_ptr()) } != 0)
        })
    }

    /// Reproject the coordinates of this geometry in place
    pub fn transform(&self, transformation: &CoordinateTransformation) -> Result<()> {
        let transformation_handle = transformation.handle();
        self.proxy.with_handle(|api, handle| {
            let transform_fn = api_fn!(api, OGR_G_Transform);
            ogr_result(unsafe { transform_fn(handle.as_ptr(), transformation_handle.as_ptr()) })
        })
    }
}
