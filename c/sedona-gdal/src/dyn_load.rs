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

//! Dynamic loader for the GDAL C API using `libloading`.
//!
//! Nothing links against GDAL at build time: every entry point used by the
//! handle proxies is resolved from a shared library when a
//! [`GdalLibrary`](crate::library::GdalLibrary) is built.

use std::ffi::OsStr;

use libloading::Library;

use crate::error::SedonaGdalError;
use crate::gdal_dyn_bindgen::GdalApi;

/// Load a single symbol from the library and write it into the given field.
///
/// The symbol is read as a raw `*const ()` and transmuted to the field's
/// function pointer type, which `Library::get` cannot express generically
/// because each field has a different signature.
macro_rules! load_fn {
    ($lib:expr, $api:expr, $name:ident) => {
        // The target types here are too verbose to annotate for each call site
        #[allow(clippy::missing_transmute_annotations)]
        {
            $api.$name = Some(unsafe {
                let sym = $lib
                    .get::<*const ()>(concat!(stringify!($name), "\0").as_bytes())
                    .map_err(|e| {
                        SedonaGdalError::LibraryError(format!(
                            "Failed to load symbol {}: {}",
                            stringify!($name),
                            e
                        ))
                    })?;
                std::mem::transmute(sym.into_raw().into_raw())
            });
        }
    };
}

/// Populate every function-pointer field of [`GdalApi`] from the given
/// [`Library`] handle.
fn load_all_symbols(lib: &Library, api: &mut GdalApi) -> Result<(), SedonaGdalError> {
    load_fn!(lib, api, CPLErrorReset);
    load_fn!(lib, api, CPLGetLastErrorType);
    load_fn!(lib, api, CPLGetLastErrorNo);
    load_fn!(lib, api, CPLGetLastErrorMsg);
    load_fn!(lib, api, VSIFree);

    load_fn!(lib, api, GDALAllRegister);
    load_fn!(lib, api, GDALGetDriverByName);
    load_fn!(lib, api, GDALGetDescription);
    load_fn!(lib, api, GDALSetDescription);
    load_fn!(lib, api, GDALGetMetadata);
    load_fn!(lib, api, GDALSetMetadata);
    load_fn!(lib, api, GDALGetMetadataItem);
    load_fn!(lib, api, GDALSetMetadataItem);

    load_fn!(lib, api, OSRNewSpatialReference);
    load_fn!(lib, api, OSRDestroySpatialReference);
    load_fn!(lib, api, OSRImportFromEPSG);
    load_fn!(lib, api, OSRSetFromUserInput);
    load_fn!(lib, api, OSRExportToWkt);
    load_fn!(lib, api, OSRIsSame);
    load_fn!(lib, api, OSRClone);
    load_fn!(lib, api, OCTNewCoordinateTransformation);
    load_fn!(lib, api, OCTDestroyCoordinateTransformation);
    load_fn!(lib, api, OCTTransform);

    load_fn!(lib, api, OGR_G_CreateGeometry);
    load_fn!(lib, api, OGR_G_CreateFromWkt);
    load_fn!(lib, api, OGR_G_ExportToWkt);
    load_fn!(lib, api, OGR_G_DestroyGeometry);
    load_fn!(lib, api, OGR_G_Clone);
    load_fn!(lib, api, OGR_G_Equals);
    load_fn!(lib, api, OGR_G_GetGeometryType);
    load_fn!(lib, api, OGR_G_AddPoint_2D);
    load_fn!(lib, api, OGR_G_AddPoint);
    load_fn!(lib, api, OGR_G_GetPointCount);
    load_fn!(lib, api, OGR_G_Transform);

    load_fn!(lib, api, OGR_Fld_Create);
    load_fn!(lib, api, OGR_Fld_Destroy);
    load_fn!(lib, api, OGR_Fld_GetNameRef);
    load_fn!(lib, api, OGR_Fld_GetType);
    load_fn!(lib, api, OGR_Fld_GetWidth);
    load_fn!(lib, api, OGR_Fld_SetWidth);
    load_fn!(lib, api, OGR_Fld_GetPrecision);
    load_fn!(lib, api, OGR_Fld_SetPrecision);

    load_fn!(lib, api, OGR_FD_Create);
    load_fn!(lib, api, OGR_FD_Reference);
    load_fn!(lib, api, OGR_FD_Release);
    load_fn!(lib, api, OGR_FD_GetName);
    load_fn!(lib, api, OGR_FD_GetFieldCount);
    load_fn!(lib, api, OGR_FD_GetFieldDefn);
    load_fn!(lib, api, OGR_FD_GetFieldIndex);
    load_fn!(lib, api, OGR_FD_AddFieldDefn);

    load_fn!(lib, api, OGR_F_Create);
    load_fn!(lib, api, OGR_F_Destroy);
    load_fn!(lib, api, OGR_F_GetDefnRef);
    load_fn!(lib, api, OGR_F_SetGeometry);
    load_fn!(lib, api, OGR_F_SetGeometryDirectly);
    load_fn!(lib, api, OGR_F_GetGeometryRef);
    load_fn!(lib, api, OGR_F_StealGeometry);
    load_fn!(lib, api, OGR_F_Clone);
    load_fn!(lib, api, OGR_F_Equal);
    load_fn!(lib, api, OGR_F_GetFieldCount);
    load_fn!(lib, api, OGR_F_GetFieldDefnRef);
    load_fn!(lib, api, OGR_F_GetFieldIndex);
    load_fn!(lib, api, OGR_F_IsFieldSet);
    load_fn!(lib, api, OGR_F_UnsetField);
    load_fn!(lib, api, OGR_F_GetFieldAsString);
    load_fn!(lib, api, OGR_F_GetFieldAsInteger);
    load_fn!(lib, api, OGR_F_GetFieldAsDouble);
    load_fn!(lib, api, OGR_F_GetFieldAsDateTime);
    load_fn!(lib, api, OGR_F_GetFieldAsIntegerList);
    load_fn!(lib, api, OGR_F_GetFieldAsDoubleList);
    load_fn!(lib, api, OGR_F_GetFieldAsStringList);
    load_fn!(lib, api, OGR_F_SetFieldString);
    load_fn!(lib, api, OGR_F_SetFieldInteger);
    load_fn!(lib, api, OGR_F_SetFieldDouble);
    load_fn!(lib, api, OGR_F_SetFieldDateTime);
    load_fn!(lib, api, OGR_F_SetFieldIntegerList);
    load_fn!(lib, api, OGR_F_SetFieldDoubleList);
    load_fn!(lib, api, OGR_F_SetFieldStringList);
    load_fn!(lib, api, OGR_F_GetFID);
    load_fn!(lib, api, OGR_F_SetFID);
    load_fn!(lib, api, OGR_F_DumpReadable);
    load_fn!(lib, api, OGR_F_SetFrom);
    load_fn!(lib, api, OGR_F_GetStyleString);
    load_fn!(lib, api, OGR_F_SetStyleString);

    Ok(())
}

/// Load a GDAL shared library from `path_or_name` and populate a [`GdalApi`] struct.
///
/// `path_or_name` may be an absolute path or a bare library name resolved by the
/// platform loader. Returns the `(Library, GdalApi)` pair. The caller is responsible
/// for keeping the `Library` alive for the lifetime of the function pointers.
pub(crate) fn load_gdal_from_path(
    path_or_name: &OsStr,
) -> Result<(Library, GdalApi), SedonaGdalError> {
    let lib = unsafe { Library::new(path_or_name) }.map_err(|e| {
        SedonaGdalError::LibraryError(format!(
            "Failed to load GDAL library from {}: {}",
            path_or_name.to_string_lossy(),
            e
        ))
    })?;

    let mut api = GdalApi::default();
    load_all_symbols(&lib, &mut api)?;
    Ok((lib, api))
}
