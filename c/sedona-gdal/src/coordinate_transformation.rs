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
use std::os::raw::c_int;
use std::ptr::null_mut;
use std::sync::Arc;

use crate::error::{Result, SedonaGdalError};
use crate::gdal_dyn_bindgen::{GdalApi, CPLE_AppDefined, CPLE_IllegalArg};
use crate::handle::{native_wrapper, AsNativeProxy, NativeHandle, NativeKind, NativeProxy};
use crate::library::GdalLibrary;
use crate::spatial_reference::SpatialReference;

pub struct CoordinateTransformationKind;

impl NativeKind for CoordinateTransformationKind {
    const NAME: &'static str = "CoordinateTransformation";

    fn release(api: &GdalApi, handle: NativeHandle) -> Result<()> {
        let destroy_fn = api_fn!(api, OCTDestroyCoordinateTransformation);
        unsafe { destroy_fn(handle.as_ptr()) };
        Ok(())
    }
}

/// A transformation between two spatial references
///
/// GDAL copies both references when the transformation is created, so they
/// may be dropped independently of it.
pub struct CoordinateTransformation {
    proxy: Arc<NativeProxy<CoordinateTransformationKind>>,
}

native_wrapper!(CoordinateTransformation, CoordinateTransformationKind);

impl CoordinateTransformation {
    pub fn new(
        library: &Arc<GdalLibrary>,
        source: &SpatialReference,
        target: &SpatialReference,
    ) -> Result<Self> {
        let source_handle = source.handle();
        let target_handle = target.handle();
        library.call(|api| {
            let new_fn = api_fn!(api, OCTNewCoordinateTransformation);
            let handle = NativeHandle::from_raw(unsafe {
                new_fn(source_handle.as_ptr(), target_handle.as_ptr())
            });
            Self::from_owned(library, handle).ok_or_else(|| {
                SedonaGdalError::native(
                    CPLE_AppDefined,
                    "Failed to create coordinate transformation",
                )
            })
        })
    }

    /// Transform a single `[x, y, z]` coordinate in place
    pub fn transform_point(&self, point: &mut [f64; 3]) -> Result<()> {
        let [x, y, z] = point;
        self.transform(
            std::slice::from_mut(x),
            std::slice::from_mut(y),
            Some(std::slice::from_mut(z)),
        )
    }

    pub fn transform_point_xyz(&self, x: f64, y: f64, z: f64) -> Result<[f64; 3]> {
        let mut point = [x, y, z];
        self.transform_point(&mut point)?;
        Ok(point)
    }

    /// Transform coordinate arrays in place
    ///
    /// `z` may be omitted for 2D coordinates; all provided slices must have
    /// the same length.
    pub fn transform_points(
        &self,
        x: &mut [f64],
        y: &mut [f64],
        z: Option<&mut [f64]>,
    ) -> Result<()> {
        self.transform(x, y, z)
    }

    fn transform(&self, x: &mut [f64], y: &mut [f64], z: Option<&mut [f64]>) -> Result<()> {
        let count = x.len();
        if y.len() != count || z.as_ref().is_some_and(|z| z.len() != count) {
            return Err(SedonaGdalError::native(
                CPLE_IllegalArg,
                "Coordinate arrays must have the same length",
            ));
        }
        let count = c_int::try_from(count).map_err(|_| {
            SedonaGdalError::native(CPLE_IllegalArg, "Too many coordinates to transform")
        })?;
        let z_ptr = z.map_or(null_mut(), |z| z.as_mut_ptr());

        self.proxy.with_handle(|api, handle| {
            let transform_fn = api_fn!(api, OCTTransform);
            let ok =
                unsafe { transform_fn(handle.as_ptr(), count, x.as_mut_ptr(), y.as_mut_ptr(), z_ptr) };
            if ok == 0 {
                return Err(SedonaGdalError::native(
                    CPLE_AppDefined,
                    "Failed to transform coordinates",
                ));
            }
            Ok(())
        })
    }
}
