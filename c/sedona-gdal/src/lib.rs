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

//! Ownership-tracked proxies for GDAL/OGR objects
//!
//! GDAL is loaded at runtime (see [GdalLibraryBuilder]) and every wrapped
//! object is a [NativeProxy] that knows whether Rust is responsible for
//! releasing the native object, or whether it is a view into state owned by
//! another object (or by GDAL itself).

/// Fetch a function pointer from a [GdalApi](crate::gdal_dyn_bindgen::GdalApi)
/// or return a [SedonaGdalError::LibraryError] naming the missing symbol
macro_rules! api_fn {
    ($api:expr, $name:ident) => {
        $api.$name.ok_or_else(|| {
            $crate::error::SedonaGdalError::LibraryError(format!(
                "GDAL symbol {} is not available",
                stringify!($name)
            ))
        })?
    };
}

pub mod coordinate_transformation;
mod dyn_load;
pub mod error;
pub mod feature;
pub mod feature_defn;
pub mod field_defn;
pub mod gdal_dyn_bindgen;
pub mod geometry;
pub mod handle;
pub mod library;
pub mod major_object;
pub mod spatial_reference;
mod strings;

#[cfg(test)]
mod fake_gdal;

pub use coordinate_transformation::CoordinateTransformation;
pub use error::{Result, SedonaGdalError};
pub use feature::{DateTime, Feature, FieldId};
pub use feature_defn::FeatureDefn;
pub use field_defn::{FieldDefn, FieldType};
pub use geometry::{Geometry, GeometryType};
pub use handle::{AsNativeProxy, Binding, KeepAlive, Lifeline, NativeHandle, NativeKind, NativeProxy};
pub use library::{
    configure_global_gdal_library, global_gdal_library, GdalLibrary, GdalLibraryBuilder,
    GDAL_LIBRARY_ENV_VAR,
};
pub use major_object::{CplErr, DriverManager, MajorObject};
pub use spatial_reference::SpatialReference;
