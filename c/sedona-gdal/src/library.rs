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
use std::ffi::{OsStr, OsString};
use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, RwLock};

use libloading::Library;

use crate::dyn_load::load_gdal_from_path;
use crate::error::{Result, SedonaGdalError};
use crate::gdal_dyn_bindgen::{
    CPLErr_CE_Fatal, CPLErr_CE_Failure, CPLErr_CE_Warning, GdalApi,
};
use crate::strings::string_from_ptr;

/// Environment variable consulted for the GDAL shared library location when
/// no explicit path was configured
pub const GDAL_LIBRARY_ENV_VAR: &str = "SEDONA_GDAL_LIBRARY";

/// A GDAL C API table and the shared library that backs it
///
/// Every native call made by a proxy goes through [GdalLibrary::call], which
/// resets the thread-local GDAL error state before the call and converts any
/// pending failure afterwards into a [SedonaGdalError::NativeOperationFailed].
pub struct GdalLibrary {
    api: GdalApi,
    source: String,
    // Must outlive the function pointers in `api`
    _library: Option<Library>,
}

impl Debug for GdalLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GdalLibrary")
            .field("source", &self.source)
            .finish()
    }
}

impl GdalLibrary {
    /// Load GDAL from a shared library path or platform library name
    pub fn try_new(path_or_name: impl AsRef<OsStr>) -> Result<Self> {
        let path_or_name = path_or_name.as_ref();
        let (library, api) = load_gdal_from_path(path_or_name)?;
        log::debug!("Loaded GDAL from {}", path_or_name.to_string_lossy());
        Ok(Self {
            api,
            source: path_or_name.to_string_lossy().into_owned(),
            _library: Some(library),
        })
    }

    /// Wrap an API table whose function pointers are already resolved (e.g.,
    /// from a statically linked GDAL)
    ///
    /// # Safety
    ///
    /// Every populated field of `api` must point to a function with the GDAL C
    /// API semantics of the same name, valid for the lifetime of the returned value.
    pub unsafe fn from_api(api: GdalApi, source: impl Into<String>) -> Self {
        Self {
            api,
            source: source.into(),
            _library: None,
        }
    }

    pub fn api(&self) -> &GdalApi {
        &self.api
    }

    /// Where this library was loaded from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Run `func` against the API table and translate the pending native error
    /// state into a `Result`
    ///
    /// A pending native failure takes precedence over an error returned by
    /// `func` because it carries GDAL's own message.
    pub(crate) fn call<R>(&self, func: impl FnOnce(&GdalApi) -> Result<R>) -> Result<R> {
        self.reset_error();
        let out = func(&self.api);
        self.check_pending_error()?;
        out
    }

    fn reset_error(&self) {
        if let Some(reset_fn) = self.api.CPLErrorReset {
            unsafe { reset_fn() }
        }
    }

    fn check_pending_error(&self) -> Result<()> {
        let Some(get_type_fn) = self.api.CPLGetLastErrorType else {
            return Ok(());
        };

        let error_type = unsafe { get_type_fn() };
        if error_type < CPLErr_CE_Warning {
            return Ok(());
        }

        let code = self
            .api
            .CPLGetLastErrorNo
            .map(|get_no_fn| unsafe { get_no_fn() })
            .unwrap_or(0);
        let message = self
            .api
            .CPLGetLastErrorMsg
            .and_then(|get_msg_fn| unsafe { string_from_ptr(get_msg_fn()) })
            .unwrap_or_else(|| "Unknown error (null error message)".to_string());
        self.reset_error();

        if error_type == CPLErr_CE_Failure || error_type == CPLErr_CE_Fatal {
            return Err(SedonaGdalError::native(code, message));
        }

        log::warn!("GDAL warning {code}: {message}");
        Ok(())
    }
}

/// Builder for a [GdalLibrary]
///
/// Candidate libraries are tried in order: the explicitly configured shared
/// library, the path named by [GDAL_LIBRARY_ENV_VAR], then the platform's
/// default GDAL library names.
#[derive(Debug, Clone)]
pub struct GdalLibraryBuilder {
    shared_library: Option<PathBuf>,
    register_drivers: bool,
}

impl Default for GdalLibraryBuilder {
    fn default() -> Self {
        Self {
            shared_library: None,
            register_drivers: true,
        }
    }
}

impl GdalLibraryBuilder {
    /// Load GDAL from this path instead of searching for it
    pub fn with_shared_library(self, path: impl Into<PathBuf>) -> Self {
        Self {
            shared_library: Some(path.into()),
            ..self
        }
    }

    /// Whether to call `GDALAllRegister()` after loading (defaults to true)
    pub fn with_register_drivers(self, register_drivers: bool) -> Self {
        Self {
            register_drivers,
            ..self
        }
    }

    pub fn build(&self) -> Result<GdalLibrary> {
        let mut attempts = Vec::new();
        for candidate in self.candidates() {
            match GdalLibrary::try_new(&candidate) {
                Ok(library) => {
                    if self.register_drivers {
                        library.call(|api| {
                            let register_fn = api_fn!(api, GDALAllRegister);
                            unsafe { register_fn() };
                            Ok(())
                        })?;
                    }
                    return Ok(library);
                }
                Err(e) => {
                    log::debug!("{e}");
                    attempts.push(candidate.to_string_lossy().into_owned());
                }
            }
        }

        Err(SedonaGdalError::LibraryError(format!(
            "Can't find a GDAL shared library (tried {}). Set {GDAL_LIBRARY_ENV_VAR} to its location",
            attempts.join(", ")
        )))
    }

    fn candidates(&self) -> Vec<OsString> {
        if let Some(path) = &self.shared_library {
            return vec![path.clone().into_os_string()];
        }

        if let Some(path) = std::env::var_os(GDAL_LIBRARY_ENV_VAR) {
            if !path.is_empty() {
                return vec![path];
            }
        }

        default_library_names()
            .iter()
            .map(OsString::from)
            .collect()
    }
}

#[cfg(target_os = "macos")]
fn default_library_names() -> &'static [&'static str] {
    &["libgdal.dylib"]
}

#[cfg(target_os = "windows")]
fn default_library_names() -> &'static [&'static str] {
    &["gdal.dll"]
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn default_library_names() -> &'static [&'static str] {
    &[
        "libgdal.so",
        "libgdal.so.37",
        "libgdal.so.36",
        "libgdal.so.35",
        "libgdal.so.34",
        "libgdal.so.33",
        "libgdal.so.32",
    ]
}

/// Configure the global GDAL library
///
/// Provides an opportunity for a calling application to provide the
/// [GdalLibraryBuilder] whose `build()` method will be used the first time
/// [global_gdal_library] is called. The configuration can be replaced until
/// the library is loaded; afterwards it cannot be reconfigured.
pub fn configure_global_gdal_library(builder: GdalLibraryBuilder) -> Result<()> {
    let loaded = GDAL_LIBRARY.lock().map_err(|_| {
        SedonaGdalError::LibraryError("Global GDAL library mutex poisoned".to_string())
    })?;
    if loaded.is_some() {
        return Err(SedonaGdalError::LibraryError(
            "Global GDAL library is already loaded and can't be reconfigured".to_string(),
        ));
    }

    let mut global_builder = GDAL_LIBRARY_BUILDER.write().map_err(|_| {
        SedonaGdalError::LibraryError(
            "Failed to acquire write lock for global GDAL configuration".to_string(),
        )
    })?;
    global_builder.replace(builder);
    Ok(())
}

/// Get the global GDAL library, loading it if it has not already been loaded
///
/// If loading fails nothing is cached, so the configuration can be fixed and
/// the call retried.
pub fn global_gdal_library() -> Result<Arc<GdalLibrary>> {
    let mut loaded = GDAL_LIBRARY.lock().map_err(|_| {
        SedonaGdalError::LibraryError("Global GDAL library mutex poisoned".to_string())
    })?;

    if let Some(library) = loaded.as_ref() {
        return Ok(library.clone());
    }

    let maybe_builder = GDAL_LIBRARY_BUILDER.read().map_err(|_| {
        SedonaGdalError::LibraryError(
            "Failed to acquire read lock for global GDAL configuration".to_string(),
        )
    })?;

    let library = Arc::new(
        maybe_builder
            .as_ref()
            .unwrap_or(&GdalLibraryBuilder::default())
            .build()?,
    );
    *loaded = Some(library.clone());
    Ok(library)
}

/// Global builder. Normally set once on application start or never set to use
/// all default settings.
static GDAL_LIBRARY_BUILDER: RwLock<Option<GdalLibraryBuilder>> =
    RwLock::<Option<GdalLibraryBuilder>>::new(None);

static GDAL_LIBRARY: Mutex<Option<Arc<GdalLibrary>>> = Mutex::new(None);
