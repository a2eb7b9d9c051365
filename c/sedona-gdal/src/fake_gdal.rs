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

//! In-process stand-in for the GDAL C API used by unit tests
//!
//! Objects live in a process-wide heap keyed by address. Addresses are never
//! reused, so a release count can be read back for any handle after the object
//! is gone. Only enough behavior is modelled to exercise the proxies: the
//! coordinate transformation between two different references shifts x by
//! 1000 and y by 2000, and WKT support covers points and line strings.

#![allow(non_upper_case_globals)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_double, c_int, c_void};
use std::ptr::{null, null_mut};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;

use crate::gdal_dyn_bindgen::*;
use crate::handle::NativeHandle;
use crate::library::GdalLibrary;

#[derive(Debug, Clone, PartialEq)]
enum FakeValue {
    Unset,
    Integer(c_int),
    Double(f64),
    String(String),
    DateTime([c_int; 7]),
    IntegerList(Vec<c_int>),
    DoubleList(Vec<f64>),
    StringList(Vec<String>),
}

impl FakeValue {
    fn as_string(&self) -> String {
        match self {
            FakeValue::Unset => String::new(),
            FakeValue::Integer(v) => v.to_string(),
            FakeValue::Double(v) => v.to_string(),
            FakeValue::String(v) => v.clone(),
            FakeValue::DateTime([y, m, d, h, mi, s, _]) => {
                format!("{y:04}/{m:02}/{d:02} {h:02}:{mi:02}:{s:02}")
            }
            FakeValue::IntegerList(v) => list_string(v),
            FakeValue::DoubleList(v) => list_string(v),
            FakeValue::StringList(v) => list_string(v),
        }
    }

    fn as_integer(&self) -> c_int {
        match self {
            FakeValue::Integer(v) => *v,
            FakeValue::Double(v) => *v as c_int,
            FakeValue::String(v) => v.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }

    fn as_double(&self) -> f64 {
        match self {
            FakeValue::Integer(v) => *v as f64,
            FakeValue::Double(v) => *v,
            FakeValue::String(v) => v.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }
}

fn list_string<T: ToString>(values: &[T]) -> String {
    let items = values.iter().map(|v| v.to_string()).collect::<Vec<_>>();
    format!("({}:{})", values.len(), items.join(","))
}

#[derive(Debug, Clone)]
enum FakeObject {
    Opaque,
    Major {
        description: String,
        metadata: BTreeMap<String, Vec<String>>,
    },
    Srs {
        definition: String,
    },
    Transform {
        shift: bool,
    },
    Geometry {
        kind: OGRwkbGeometryType,
        points: Vec<[f64; 3]>,
        has_z: bool,
    },
    FieldDefn {
        name: String,
        kind: OGRFieldType,
        width: c_int,
        precision: c_int,
    },
    FeatureDefn {
        name: String,
        fields: Vec<usize>,
        refs: c_int,
    },
    Feature {
        defn: usize,
        values: Vec<FakeValue>,
        geometry: usize,
        fid: GIntBig,
        style: Option<String>,
    },
}

#[derive(Default)]
struct FakeHeap {
    objects: BTreeMap<usize, FakeObject>,
    releases: BTreeMap<usize, u32>,
    drivers: BTreeMap<String, usize>,
}

static HEAP: LazyLock<Mutex<FakeHeap>> = LazyLock::new(|| Mutex::new(FakeHeap::default()));

static NEXT_ADDRESS: AtomicUsize = AtomicUsize::new(0x1000);

impl FakeHeap {
    fn insert(&mut self, object: FakeObject) -> usize {
        let addr = NEXT_ADDRESS.fetch_add(16, Ordering::Relaxed);
        self.objects.insert(addr, object);
        addr
    }

    /// Explicit release of an object (counted)
    fn destroy(&mut self, addr: usize) {
        if addr == 0 {
            return;
        }
        *self.releases.entry(addr).or_default() += 1;
        self.remove(addr);
    }

    fn remove(&mut self, addr: usize) {
        match self.objects.remove(&addr) {
            Some(FakeObject::Feature { defn, geometry, .. }) => {
                self.destroy(geometry);
                self.dereference(defn);
            }
            Some(FakeObject::FeatureDefn { fields, .. }) => {
                for field in fields {
                    self.destroy(field);
                }
            }
            _ => {}
        }
    }

    fn dereference(&mut self, defn: usize) {
        let free = match self.objects.get_mut(&defn) {
            Some(FakeObject::FeatureDefn { refs, .. }) => {
                *refs -= 1;
                *refs <= 0
            }
            _ => false,
        };
        if free {
            self.remove(defn);
        }
    }

    fn reference(&mut self, defn: usize) -> c_int {
        match self.objects.get_mut(&defn) {
            Some(FakeObject::FeatureDefn { refs, .. }) => {
                *refs += 1;
                *refs
            }
            _ => 0,
        }
    }

    fn defn_fields(&self, defn: usize) -> Option<&Vec<usize>> {
        match self.objects.get(&defn) {
            Some(FakeObject::FeatureDefn { fields, .. }) => Some(fields),
            _ => None,
        }
    }

    fn feature_defn(&self, feature: usize) -> Option<usize> {
        match self.objects.get(&feature) {
            Some(FakeObject::Feature { defn, .. }) => Some(*defn),
            _ => None,
        }
    }

    fn field_name(&self, field: usize) -> Option<&str> {
        match self.objects.get(&field) {
            Some(FakeObject::FieldDefn { name, .. }) => Some(name),
            _ => None,
        }
    }

    fn field_kind(&self, field: usize) -> OGRFieldType {
        match self.objects.get(&field) {
            Some(FakeObject::FieldDefn { kind, .. }) => *kind,
            _ => OGRFieldType_OFTString,
        }
    }

    fn find_field(&self, defn: usize, name: &str) -> c_int {
        self.defn_fields(defn)
            .and_then(|fields| {
                fields.iter().position(|field| {
                    self.field_name(*field)
                        .is_some_and(|field_name| field_name.eq_ignore_ascii_case(name))
                })
            })
            .map_or(-1, |i| i as c_int)
    }

    /// Field definition address for a valid index, raising the native error otherwise
    fn checked_field(&self, defn: usize, i: c_int) -> Option<(usize, usize)> {
        let fields = self.defn_fields(defn)?;
        if i < 0 || i as usize >= fields.len() {
            raise(CPLErr_CE_Failure, CPLE_AppDefined, &format!("Invalid index : {i}"));
            return None;
        }
        Some((i as usize, fields[i as usize]))
    }

    fn field_value(&self, feature: usize, i: c_int) -> Option<FakeValue> {
        let (index, _) = self.checked_field(self.feature_defn(feature)?, i)?;
        match self.objects.get(&feature) {
            Some(FakeObject::Feature { values, .. }) => {
                Some(values.get(index).cloned().unwrap_or(FakeValue::Unset))
            }
            _ => None,
        }
    }

    fn set_field_value(
        &mut self,
        feature: usize,
        i: c_int,
        value: impl FnOnce(OGRFieldType) -> FakeValue,
    ) {
        let Some(defn) = self.feature_defn(feature) else {
            return;
        };
        let Some((index, field)) = self.checked_field(defn, i) else {
            return;
        };
        let value = value(self.field_kind(field));
        if let Some(FakeObject::Feature { values, .. }) = self.objects.get_mut(&feature) {
            if values.len() <= index {
                values.resize(index + 1, FakeValue::Unset);
            }
            values[index] = value;
        }
    }

    fn clone_object(&mut self, addr: usize) -> usize {
        match self.objects.get(&addr).cloned() {
            Some(object) => self.insert(object),
            None => 0,
        }
    }

    fn replace_geometry(&mut self, feature: usize, new_geometry: usize) {
        let old = match self.objects.get_mut(&feature) {
            Some(FakeObject::Feature { geometry, .. }) => std::mem::replace(geometry, new_geometry),
            _ => 0,
        };
        if old != new_geometry {
            self.destroy(old);
        }
    }

    fn geometry_equals(&self, a: usize, b: usize) -> bool {
        match (self.objects.get(&a), self.objects.get(&b)) {
            (
                Some(FakeObject::Geometry {
                    kind: kind_a,
                    points: points_a,
                    ..
                }),
                Some(FakeObject::Geometry {
                    kind: kind_b,
                    points: points_b,
                    ..
                }),
            ) => kind_a == kind_b && points_a == points_b,
            (None, None) => true,
            _ => false,
        }
    }
}

#[derive(Default)]
struct Scratch {
    strings: Vec<CString>,
    list: Vec<*mut c_char>,
    ints: Vec<c_int>,
    doubles: Vec<f64>,
}

thread_local! {
    static SCRATCH: RefCell<Scratch> = RefCell::new(Scratch::default());
    static LAST_ERROR: RefCell<(CPLErr, c_int, CString)> =
        RefCell::new((CPLErr_CE_None, 0, CString::default()));
}

/// Keep a string alive until the next string-returning call on this thread
fn scratch_str(value: &str) -> *const c_char {
    SCRATCH.with(|scratch| {
        let mut scratch = scratch.borrow_mut();
        scratch.strings = vec![CString::new(value).unwrap_or_default()];
        scratch.strings[0].as_ptr()
    })
}

fn scratch_list(values: &[String]) -> *mut *mut c_char {
    SCRATCH.with(|scratch| {
        let mut scratch = scratch.borrow_mut();
        scratch.strings = values
            .iter()
            .map(|v| CString::new(v.as_str()).unwrap_or_default())
            .collect();
        let mut list = scratch
            .strings
            .iter()
            .map(|s| s.as_ptr() as *mut c_char)
            .collect::<Vec<_>>();
        list.push(null_mut());
        scratch.list = list;
        scratch.list.as_mut_ptr()
    })
}

/// Simulate a native error report (`CPLError`)
pub(crate) fn raise(error_type: CPLErr, code: c_int, message: &str) {
    LAST_ERROR.with(|last| {
        *last.borrow_mut() = (error_type, code, CString::new(message).unwrap_or_default());
    });
}

unsafe fn read_str(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        None
    } else {
        Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
    }
}

unsafe fn read_list(list: *mut *mut c_char) -> Vec<String> {
    let mut out = Vec::new();
    if list.is_null() {
        return out;
    }
    let mut i = 0;
    while !(*list.add(i)).is_null() {
        out.extend(read_str(*list.add(i)));
        i += 1;
    }
    out
}

fn addr(handle: *mut c_void) -> usize {
    handle as usize
}

fn ptr(addr: usize) -> *mut c_void {
    addr as *mut c_void
}

fn alloc_native_string(value: String) -> *mut c_char {
    CString::new(value).unwrap_or_default().into_raw()
}

// cpl_error.h / cpl_vsi.h

unsafe extern "C" fn cpl_error_reset() {
    raise(CPLErr_CE_None, 0, "");
}

unsafe extern "C" fn cpl_get_last_error_type() -> CPLErr {
    LAST_ERROR.with(|last| last.borrow().0)
}

unsafe extern "C" fn cpl_get_last_error_no() -> c_int {
    LAST_ERROR.with(|last| last.borrow().1)
}

unsafe extern "C" fn cpl_get_last_error_msg() -> *const c_char {
    LAST_ERROR.with(|last| last.borrow().2.as_ptr())
}

unsafe extern "C" fn vsi_free(ptr: *mut c_void) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr as *mut c_char));
    }
}

// gdal.h

unsafe extern "C" fn gdal_all_register() {}

unsafe extern "C" fn gdal_get_driver_by_name(name: *const c_char) -> *mut c_void {
    let Some(name) = read_str(name) else {
        return null_mut();
    };
    if !["MEM", "GTiff", "ESRI Shapefile"].contains(&name.as_str()) {
        return null_mut();
    }

    let mut heap = HEAP.lock();
    if let Some(driver) = heap.drivers.get(&name) {
        return ptr(*driver);
    }

    let mut metadata = BTreeMap::new();
    metadata.insert(
        String::new(),
        vec![format!("DMD_LONGNAME={name} driver"), "DCAP_VECTOR=YES".to_string()],
    );
    let driver = heap.insert(FakeObject::Major {
        description: name.clone(),
        metadata,
    });
    heap.drivers.insert(name, driver);
    ptr(driver)
}

unsafe extern "C" fn gdal_get_description(h: *mut c_void) -> *const c_char {
    match HEAP.lock().objects.get(&addr(h)) {
        Some(FakeObject::Major { description, .. }) => scratch_str(description),
        _ => scratch_str(""),
    }
}

unsafe extern "C" fn gdal_set_description(h: *mut c_void, value: *const c_char) {
    if let Some(FakeObject::Major { description, .. }) = HEAP.lock().objects.get_mut(&addr(h)) {
        *description = read_str(value).unwrap_or_default();
    }
}

unsafe extern "C" fn gdal_get_metadata(h: *mut c_void, domain: *const c_char) -> *mut *mut c_char {
    let domain = read_str(domain).unwrap_or_default();
    match HEAP.lock().objects.get(&addr(h)) {
        Some(FakeObject::Major { metadata, .. }) => match metadata.get(&domain) {
            Some(entries) => scratch_list(entries),
            None => null_mut(),
        },
        _ => null_mut(),
    }
}

unsafe extern "C" fn gdal_set_metadata(
    h: *mut c_void,
    list: *mut *mut c_char,
    domain: *const c_char,
) -> CPLErr {
    let domain = read_str(domain).unwrap_or_default();
    let entries = read_list(list);
    match HEAP.lock().objects.get_mut(&addr(h)) {
        Some(FakeObject::Major { metadata, .. }) => {
            if list.is_null() {
                metadata.remove(&domain);
            } else {
                metadata.insert(domain, entries);
            }
            CPLErr_CE_None
        }
        _ => CPLErr_CE_Failure,
    }
}

unsafe extern "C" fn gdal_get_metadata_item(
    h: *mut c_void,
    name: *const c_char,
    domain: *const c_char,
) -> *const c_char {
    let domain = read_str(domain).unwrap_or_default();
    let Some(name) = read_str(name) else {
        return null();
    };
    let prefix = format!("{name}=");
    match HEAP.lock().objects.get(&addr(h)) {
        Some(FakeObject::Major { metadata, .. }) => metadata
            .get(&domain)
            .and_then(|entries| entries.iter().find_map(|e| e.strip_prefix(&prefix)))
            .map_or(null(), scratch_str),
        _ => null(),
    }
}

unsafe extern "C" fn gdal_set_metadata_item(
    h: *mut c_void,
    name: *const c_char,
    value: *const c_char,
    domain: *const c_char,
) -> CPLErr {
    let domain = read_str(domain).unwrap_or_default();
    let Some(name) = read_str(name) else {
        return CPLErr_CE_Failure;
    };
    let value = read_str(value);
    let prefix = format!("{name}=");
    match HEAP.lock().objects.get_mut(&addr(h)) {
        Some(FakeObject::Major { metadata, .. }) => {
            let entries = metadata.entry(domain).or_default();
            entries.retain(|e| !e.starts_with(&prefix));
            if let Some(value) = value {
                entries.push(format!("{prefix}{value}"));
            }
            CPLErr_CE_None
        }
        _ => CPLErr_CE_Failure,
    }
}

// ogr_srs_api.h

unsafe extern "C" fn osr_new_spatial_reference(wkt: *const c_char) -> *mut c_void {
    let definition = read_str(wkt).unwrap_or_default();
    ptr(HEAP.lock().insert(FakeObject::Srs { definition }))
}

unsafe extern "C" fn osr_destroy_spatial_reference(h: *mut c_void) {
    HEAP.lock().destroy(addr(h));
}

fn set_srs_definition(h: *mut c_void, value: String) -> OGRErr {
    match HEAP.lock().objects.get_mut(&addr(h)) {
        Some(FakeObject::Srs { definition }) => {
            *definition = value;
            OGRERR_NONE
        }
        _ => OGRERR_INVALID_HANDLE,
    }
}

unsafe extern "C" fn osr_import_from_epsg(h: *mut c_void, code: c_int) -> OGRErr {
    if code <= 0 {
        raise(
            CPLErr_CE_Failure,
            CPLE_AppDefined,
            &format!("PROJ: proj_create_from_database: crs not found: EPSG:{code}"),
        );
        return OGRERR_UNSUPPORTED_SRS;
    }
    set_srs_definition(h, format!("EPSG:{code}"))
}

unsafe extern "C" fn osr_set_from_user_input(h: *mut c_void, value: *const c_char) -> OGRErr {
    let value = read_str(value).unwrap_or_default();
    if value.is_empty() || value.contains("garbage") {
        raise(
            CPLErr_CE_Failure,
            CPLE_AppDefined,
            &format!("Failed to process SRS definition: {value}"),
        );
        return OGRERR_CORRUPT_DATA;
    }
    set_srs_definition(h, value)
}

unsafe extern "C" fn osr_export_to_wkt(h: *mut c_void, out: *mut *mut c_char) -> OGRErr {
    match HEAP.lock().objects.get(&addr(h)) {
        Some(FakeObject::Srs { definition }) => {
            *out = alloc_native_string(format!("FAKECRS[\"{definition}\"]"));
            OGRERR_NONE
        }
        _ => OGRERR_INVALID_HANDLE,
    }
}

unsafe extern "C" fn osr_is_same(a: *mut c_void, b: *mut c_void) -> c_int {
    let heap = HEAP.lock();
    match (heap.objects.get(&addr(a)), heap.objects.get(&addr(b))) {
        (Some(FakeObject::Srs { definition: a }), Some(FakeObject::Srs { definition: b })) => {
            (a == b) as c_int
        }
        _ => 0,
    }
}

unsafe extern "C" fn osr_clone(h: *mut c_void) -> *mut c_void {
    ptr(HEAP.lock().clone_object(addr(h)))
}

unsafe extern "C" fn oct_new_coordinate_transformation(
    src: *mut c_void,
    dst: *mut c_void,
) -> *mut c_void {
    let mut heap = HEAP.lock();
    let definitions = match (heap.objects.get(&addr(src)), heap.objects.get(&addr(dst))) {
        (Some(FakeObject::Srs { definition: a }), Some(FakeObject::Srs { definition: b })) => {
            Some(a != b)
        }
        _ => None,
    };

    match definitions {
        Some(shift) => ptr(heap.insert(FakeObject::Transform { shift })),
        None => {
            raise(
                CPLErr_CE_Failure,
                CPLE_AppDefined,
                "Cannot find coordinate operations from `' to `'",
            );
            null_mut()
        }
    }
}

unsafe extern "C" fn oct_destroy_coordinate_transformation(h: *mut c_void) {
    HEAP.lock().destroy(addr(h));
}

fn transform_shift(h: *mut c_void) -> Option<bool> {
    match HEAP.lock().objects.get(&addr(h)) {
        Some(FakeObject::Transform { shift }) => Some(*shift),
        _ => None,
    }
}

unsafe extern "C" fn oct_transform(
    h: *mut c_void,
    n: c_int,
    x: *mut c_double,
    y: *mut c_double,
    _z: *mut c_double,
) -> c_int {
    let Some(shift) = transform_shift(h) else {
        return 0;
    };
    if shift {
        for i in 0..n.max(0) as usize {
            *x.add(i) += 1000.0;
            *y.add(i) += 2000.0;
        }
    }
    1
}

// ogr_api.h: geometries

unsafe extern "C" fn ogr_g_create_geometry(kind: OGRwkbGeometryType) -> *mut c_void {
    ptr(HEAP.lock().insert(FakeObject::Geometry {
        kind,
        points: vec![],
        has_z: false,
    }))
}

fn parse_wkt(wkt: &str) -> Option<(OGRwkbGeometryType, Vec<[f64; 3]>, bool)> {
    let wkt = wkt.trim();
    let (kind, rest) = if let Some(rest) = wkt.strip_prefix("POINT") {
        (OGRwkbGeometryType_wkbPoint, rest)
    } else if let Some(rest) = wkt.strip_prefix("LINESTRING") {
        (OGRwkbGeometryType_wkbLineString, rest)
    } else {
        return None;
    };

    let rest = rest.trim();
    let rest = rest.strip_prefix('Z').map_or(rest, str::trim);
    if rest == "EMPTY" {
        return Some((kind, vec![], false));
    }

    let body = rest.strip_prefix('(')?.strip_suffix(')')?;
    let mut has_z = false;
    let mut points = Vec::new();
    for coords in body.split(',') {
        let values = coords
            .split_whitespace()
            .map(|v| v.parse::<f64>().ok())
            .collect::<Option<Vec<_>>>()?;
        match values.as_slice() {
            [x, y] => points.push([*x, *y, 0.0]),
            [x, y, z] => {
                has_z = true;
                points.push([*x, *y, *z]);
            }
            _ => return None,
        }
    }

    if kind == OGRwkbGeometryType_wkbPoint && points.len() != 1 {
        return None;
    }
    Some((kind, points, has_z))
}

unsafe extern "C" fn ogr_g_create_from_wkt(
    text: *mut *mut c_char,
    _srs: *mut c_void,
    out: *mut *mut c_void,
) -> OGRErr {
    *out = null_mut();
    let Some(wkt) = read_str(*text) else {
        return OGRERR_NOT_ENOUGH_DATA;
    };
    match parse_wkt(&wkt) {
        Some((kind, points, has_z)) => {
            *out = ptr(HEAP.lock().insert(FakeObject::Geometry {
                kind,
                points,
                has_z,
            }));
            *text = (*text).add(wkt.len());
            OGRERR_NONE
        }
        None => OGRERR_CORRUPT_DATA,
    }
}

unsafe extern "C" fn ogr_g_export_to_wkt(h: *mut c_void, out: *mut *mut c_char) -> OGRErr {
    let heap = HEAP.lock();
    let Some(FakeObject::Geometry {
        kind,
        points,
        has_z,
    }) = heap.objects.get(&addr(h))
    else {
        return OGRERR_INVALID_HANDLE;
    };

    let name = match *kind {
        OGRwkbGeometryType_wkbPoint => "POINT",
        OGRwkbGeometryType_wkbLineString => "LINESTRING",
        _ => "GEOMETRY",
    };
    let z_suffix = if *has_z { " Z" } else { "" };
    let wkt = if points.is_empty() {
        format!("{name} EMPTY")
    } else {
        let coords = points
            .iter()
            .map(|[x, y, z]| {
                if *has_z {
                    format!("{x} {y} {z}")
                } else {
                    format!("{x} {y}")
                }
            })
            .collect::<Vec<_>>();
        format!("{name}{z_suffix} ({})", coords.join(","))
    };
    *out = alloc_native_string(wkt);
    OGRERR_NONE
}

unsafe extern "C" fn ogr_g_destroy_geometry(h: *mut c_void) {
    HEAP.lock().destroy(addr(h));
}

unsafe extern "C" fn ogr_g_clone(h: *mut c_void) -> *mut c_void {
    ptr(HEAP.lock().clone_object(addr(h)))
}

unsafe extern "C" fn ogr_g_equals(a: *mut c_void, b: *mut c_void) -> c_int {
    if a.is_null() || b.is_null() {
        return 0;
    }
    HEAP.lock().geometry_equals(addr(a), addr(b)) as c_int
}

unsafe extern "C" fn ogr_g_get_geometry_type(h: *mut c_void) -> OGRwkbGeometryType {
    match HEAP.lock().objects.get(&addr(h)) {
        Some(FakeObject::Geometry { kind, .. }) => *kind,
        _ => OGRwkbGeometryType_wkbUnknown,
    }
}

fn add_point(h: *mut c_void, point: [f64; 3], z: bool) {
    if let Some(FakeObject::Geometry {
        kind,
        points,
        has_z,
    }) = HEAP.lock().objects.get_mut(&addr(h))
    {
        if *kind == OGRwkbGeometryType_wkbPoint {
            points.clear();
        }
        points.push(point);
        *has_z |= z;
    }
}

unsafe extern "C" fn ogr_g_add_point_2d(h: *mut c_void, x: c_double, y: c_double) {
    add_point(h, [x, y, 0.0], false);
}

unsafe extern "C" fn ogr_g_add_point(h: *mut c_void, x: c_double, y: c_double, z: c_double) {
    add_point(h, [x, y, z], true);
}

unsafe extern "C" fn ogr_g_get_point_count(h: *mut c_void) -> c_int {
    match HEAP.lock().objects.get(&addr(h)) {
        Some(FakeObject::Geometry { points, .. }) => points.len() as c_int,
        _ => 0,
    }
}

unsafe extern "C" fn ogr_g_transform(h: *mut c_void, ct: *mut c_void) -> OGRErr {
    let Some(shift) = transform_shift(ct) else {
        return OGRERR_FAILURE;
    };
    match HEAP.lock().objects.get_mut(&addr(h)) {
        Some(FakeObject::Geometry { points, .. }) => {
            if shift {
                for point in points.iter_mut() {
                    point[0] += 1000.0;
                    point[1] += 2000.0;
                }
            }
            OGRERR_NONE
        }
        _ => OGRERR_INVALID_HANDLE,
    }
}

// ogr_api.h: field definitions

unsafe extern "C" fn ogr_fld_create(name: *const c_char, kind: OGRFieldType) -> *mut c_void {
    ptr(HEAP.lock().insert(FakeObject::FieldDefn {
        name: read_str(name).unwrap_or_default(),
        kind,
        width: 0,
        precision: 0,
    }))
}

unsafe extern "C" fn ogr_fld_destroy(h: *mut c_void) {
    HEAP.lock().destroy(addr(h));
}

unsafe extern "C" fn ogr_fld_get_name_ref(h: *mut c_void) -> *const c_char {
    match HEAP.lock().objects.get(&addr(h)) {
        Some(FakeObject::FieldDefn { name, .. }) => scratch_str(name),
        _ => null(),
    }
}

unsafe extern "C" fn ogr_fld_get_type(h: *mut c_void) -> OGRFieldType {
    HEAP.lock().field_kind(addr(h))
}

unsafe extern "C" fn ogr_fld_get_width(h: *mut c_void) -> c_int {
    match HEAP.lock().objects.get(&addr(h)) {
        Some(FakeObject::FieldDefn { width, .. }) => *width,
        _ => 0,
    }
}

unsafe extern "C" fn ogr_fld_set_width(h: *mut c_void, value: c_int) {
    if let Some(FakeObject::FieldDefn { width, .. }) = HEAP.lock().objects.get_mut(&addr(h)) {
        *width = value.max(0);
    }
}

unsafe extern "C" fn ogr_fld_get_precision(h: *mut c_void) -> c_int {
    match HEAP.lock().objects.get(&addr(h)) {
        Some(FakeObject::FieldDefn { precision, .. }) => *precision,
        _ => 0,
    }
}

unsafe extern "C" fn ogr_fld_set_precision(h: *mut c_void, value: c_int) {
    if let Some(FakeObject::FieldDefn { precision, .. }) = HEAP.lock().objects.get_mut(&addr(h)) {
        *precision = value;
    }
}

// ogr_api.h: feature definitions

unsafe extern "C" fn ogr_fd_create(name: *const c_char) -> *mut c_void {
    ptr(HEAP.lock().insert(FakeObject::FeatureDefn {
        name: read_str(name).unwrap_or_default(),
        fields: vec![],
        refs: 0,
    }))
}

unsafe extern "C" fn ogr_fd_reference(h: *mut c_void) -> c_int {
    HEAP.lock().reference(addr(h))
}

unsafe extern "C" fn ogr_fd_release(h: *mut c_void) {
    let mut heap = HEAP.lock();
    *heap.releases.entry(addr(h)).or_default() += 1;
    heap.dereference(addr(h));
}

unsafe extern "C" fn ogr_fd_get_name(h: *mut c_void) -> *const c_char {
    match HEAP.lock().objects.get(&addr(h)) {
        Some(FakeObject::FeatureDefn { name, .. }) => scratch_str(name),
        _ => null(),
    }
}

unsafe extern "C" fn ogr_fd_get_field_count(h: *mut c_void) -> c_int {
    HEAP.lock()
        .defn_fields(addr(h))
        .map_or(0, |fields| fields.len() as c_int)
}

unsafe extern "C" fn ogr_fd_get_field_defn(h: *mut c_void, i: c_int) -> *mut c_void {
    HEAP.lock()
        .checked_field(addr(h), i)
        .map_or(null_mut(), |(_, field)| ptr(field))
}

unsafe extern "C" fn ogr_fd_get_field_index(h: *mut c_void, name: *const c_char) -> c_int {
    let name = read_str(name).unwrap_or_default();
    HEAP.lock().find_field(addr(h), &name)
}

unsafe extern "C" fn ogr_fd_add_field_defn(h: *mut c_void, field: *mut c_void) {
    let mut heap = HEAP.lock();
    if !matches!(heap.objects.get(&addr(field)), Some(FakeObject::FieldDefn { .. })) {
        return;
    }
    let copy = heap.clone_object(addr(field));
    if let Some(FakeObject::FeatureDefn { fields, .. }) = heap.objects.get_mut(&addr(h)) {
        fields.push(copy);
    }
}

// ogr_api.h: features

unsafe extern "C" fn ogr_f_create(defn: *mut c_void) -> *mut c_void {
    let mut heap = HEAP.lock();
    let Some(field_count) = heap.defn_fields(addr(defn)).map(|fields| fields.len()) else {
        raise(CPLErr_CE_Failure, CPLE_AppDefined, "Pointer 'hDefn' is NULL in 'OGR_F_Create'.");
        return null_mut();
    };
    heap.reference(addr(defn));
    ptr(heap.insert(FakeObject::Feature {
        defn: addr(defn),
        values: vec![FakeValue::Unset; field_count],
        geometry: 0,
        fid: OGRNullFID,
        style: None,
    }))
}

unsafe extern "C" fn ogr_f_destroy(h: *mut c_void) {
    HEAP.lock().destroy(addr(h));
}

unsafe extern "C" fn ogr_f_get_defn_ref(h: *mut c_void) -> *mut c_void {
    HEAP.lock().feature_defn(addr(h)).map_or(null_mut(), ptr)
}

unsafe extern "C" fn ogr_f_set_geometry(h: *mut c_void, geometry: *mut c_void) -> OGRErr {
    let mut heap = HEAP.lock();
    let copy = heap.clone_object(addr(geometry));
    heap.replace_geometry(addr(h), copy);
    OGRERR_NONE
}

unsafe extern "C" fn ogr_f_set_geometry_directly(h: *mut c_void, geometry: *mut c_void) -> OGRErr {
    HEAP.lock().replace_geometry(addr(h), addr(geometry));
    OGRERR_NONE
}

unsafe extern "C" fn ogr_f_get_geometry_ref(h: *mut c_void) -> *mut c_void {
    match HEAP.lock().objects.get(&addr(h)) {
        Some(FakeObject::Feature { geometry, .. }) => ptr(*geometry),
        _ => null_mut(),
    }
}

unsafe extern "C" fn ogr_f_steal_geometry(h: *mut c_void) -> *mut c_void {
    match HEAP.lock().objects.get_mut(&addr(h)) {
        Some(FakeObject::Feature { geometry, .. }) => ptr(std::mem::take(geometry)),
        _ => null_mut(),
    }
}

unsafe extern "C" fn ogr_f_clone(h: *mut c_void) -> *mut c_void {
    let mut heap = HEAP.lock();
    let Some(FakeObject::Feature {
        defn,
        values,
        geometry,
        fid,
        style,
    }) = heap.objects.get(&addr(h)).cloned()
    else {
        return null_mut();
    };
    heap.reference(defn);
    let geometry = heap.clone_object(geometry);
    ptr(heap.insert(FakeObject::Feature {
        defn,
        values,
        geometry,
        fid,
        style,
    }))
}

unsafe extern "C" fn ogr_f_equal(a: *mut c_void, b: *mut c_void) -> c_int {
    if a == b {
        return 1;
    }
    let heap = HEAP.lock();
    match (heap.objects.get(&addr(a)), heap.objects.get(&addr(b))) {
        (
            Some(FakeObject::Feature {
                defn: defn_a,
                values: values_a,
                geometry: geometry_a,
                fid: fid_a,
                ..
            }),
            Some(FakeObject::Feature {
                defn: defn_b,
                values: values_b,
                geometry: geometry_b,
                fid: fid_b,
                ..
            }),
        ) => (defn_a == defn_b
            && values_a == values_b
            && fid_a == fid_b
            && heap.geometry_equals(*geometry_a, *geometry_b)) as c_int,
        _ => 0,
    }
}

unsafe extern "C" fn ogr_f_get_field_count(h: *mut c_void) -> c_int {
    let heap = HEAP.lock();
    heap.feature_defn(addr(h))
        .and_then(|defn| heap.defn_fields(defn))
        .map_or(0, |fields| fields.len() as c_int)
}

unsafe extern "C" fn ogr_f_get_field_defn_ref(h: *mut c_void, i: c_int) -> *mut c_void {
    let heap = HEAP.lock();
    heap.feature_defn(addr(h))
        .and_then(|defn| heap.checked_field(defn, i))
        .map_or(null_mut(), |(_, field)| ptr(field))
}

unsafe extern "C" fn ogr_f_get_field_index(h: *mut c_void, name: *const c_char) -> c_int {
    let name = read_str(name).unwrap_or_default();
    let heap = HEAP.lock();
    heap.feature_defn(addr(h))
        .map_or(-1, |defn| heap.find_field(defn, &name))
}

unsafe extern "C" fn ogr_f_is_field_set(h: *mut c_void, i: c_int) -> c_int {
    HEAP.lock()
        .field_value(addr(h), i)
        .is_some_and(|value| value != FakeValue::Unset) as c_int
}

unsafe extern "C" fn ogr_f_unset_field(h: *mut c_void, i: c_int) {
    HEAP.lock().set_field_value(addr(h), i, |_| FakeValue::Unset);
}

unsafe extern "C" fn ogr_f_get_field_as_string(h: *mut c_void, i: c_int) -> *const c_char {
    let value = HEAP.lock().field_value(addr(h), i);
    value.map_or(null(), |value| scratch_str(&value.as_string()))
}

unsafe extern "C" fn ogr_f_get_field_as_integer(h: *mut c_void, i: c_int) -> c_int {
    let value = HEAP.lock().field_value(addr(h), i);
    value.map_or(0, |value| value.as_integer())
}

unsafe extern "C" fn ogr_f_get_field_as_double(h: *mut c_void, i: c_int) -> c_double {
    let value = HEAP.lock().field_value(addr(h), i);
    value.map_or(0.0, |value| value.as_double())
}

#[allow(clippy::too_many_arguments)]
unsafe extern "C" fn ogr_f_get_field_as_date_time(
    h: *mut c_void,
    i: c_int,
    year: *mut c_int,
    month: *mut c_int,
    day: *mut c_int,
    hour: *mut c_int,
    minute: *mut c_int,
    second: *mut c_int,
    tz_flag: *mut c_int,
) -> c_int {
    let value = HEAP.lock().field_value(addr(h), i);
    match value {
        Some(FakeValue::DateTime([y, m, d, hh, mi, s, tz])) => {
            *year = y;
            *month = m;
            *day = d;
            *hour = hh;
            *minute = mi;
            *second = s;
            *tz_flag = tz;
            1
        }
        _ => 0,
    }
}

unsafe extern "C" fn ogr_f_get_field_as_integer_list(
    h: *mut c_void,
    i: c_int,
    count: *mut c_int,
) -> *const c_int {
    let values = match HEAP.lock().field_value(addr(h), i) {
        Some(FakeValue::IntegerList(values)) => values,
        _ => vec![],
    };
    *count = values.len() as c_int;
    SCRATCH.with(|scratch| {
        let mut scratch = scratch.borrow_mut();
        scratch.ints = values;
        scratch.ints.as_ptr()
    })
}

unsafe extern "C" fn ogr_f_get_field_as_double_list(
    h: *mut c_void,
    i: c_int,
    count: *mut c_int,
) -> *const c_double {
    let values = match HEAP.lock().field_value(addr(h), i) {
        Some(FakeValue::DoubleList(values)) => values,
        _ => vec![],
    };
    *count = values.len() as c_int;
    SCRATCH.with(|scratch| {
        let mut scratch = scratch.borrow_mut();
        scratch.doubles = values;
        scratch.doubles.as_ptr()
    })
}

unsafe extern "C" fn ogr_f_get_field_as_string_list(h: *mut c_void, i: c_int) -> *mut *mut c_char {
    match HEAP.lock().field_value(addr(h), i) {
        Some(FakeValue::StringList(values)) => scratch_list(&values),
        _ => null_mut(),
    }
}

unsafe extern "C" fn ogr_f_set_field_string(h: *mut c_void, i: c_int, value: *const c_char) {
    let value = read_str(value).unwrap_or_default();
    HEAP.lock().set_field_value(addr(h), i, |kind| match kind {
        OGRFieldType_OFTInteger => FakeValue::Integer(value.trim().parse().unwrap_or(0)),
        OGRFieldType_OFTReal => FakeValue::Double(value.trim().parse().unwrap_or(0.0)),
        _ => FakeValue::String(value),
    });
}

unsafe extern "C" fn ogr_f_set_field_integer(h: *mut c_void, i: c_int, value: c_int) {
    HEAP.lock().set_field_value(addr(h), i, |kind| match kind {
        OGRFieldType_OFTReal => FakeValue::Double(value as f64),
        OGRFieldType_OFTString => FakeValue::String(value.to_string()),
        _ => FakeValue::Integer(value),
    });
}

unsafe extern "C" fn ogr_f_set_field_double(h: *mut c_void, i: c_int, value: c_double) {
    HEAP.lock().set_field_value(addr(h), i, |kind| match kind {
        OGRFieldType_OFTInteger => FakeValue::Integer(value as c_int),
        OGRFieldType_OFTString => FakeValue::String(value.to_string()),
        _ => FakeValue::Double(value),
    });
}

#[allow(clippy::too_many_arguments)]
unsafe extern "C" fn ogr_f_set_field_date_time(
    h: *mut c_void,
    i: c_int,
    year: c_int,
    month: c_int,
    day: c_int,
    hour: c_int,
    minute: c_int,
    second: c_int,
    tz_flag: c_int,
) {
    HEAP.lock().set_field_value(addr(h), i, |_| {
        FakeValue::DateTime([year, month, day, hour, minute, second, tz_flag])
    });
}

unsafe extern "C" fn ogr_f_set_field_integer_list(
    h: *mut c_void,
    i: c_int,
    n: c_int,
    values: *const c_int,
) {
    let values = if values.is_null() || n <= 0 {
        vec![]
    } else {
        std::slice::from_raw_parts(values, n as usize).to_vec()
    };
    HEAP.lock()
        .set_field_value(addr(h), i, |_| FakeValue::IntegerList(values));
}

unsafe extern "C" fn ogr_f_set_field_double_list(
    h: *mut c_void,
    i: c_int,
    n: c_int,
    values: *const c_double,
) {
    let values = if values.is_null() || n <= 0 {
        vec![]
    } else {
        std::slice::from_raw_parts(values, n as usize).to_vec()
    };
    HEAP.lock()
        .set_field_value(addr(h), i, |_| FakeValue::DoubleList(values));
}

unsafe extern "C" fn ogr_f_set_field_string_list(h: *mut c_void, i: c_int, values: *mut *mut c_char) {
    let values = read_list(values);
    HEAP.lock()
        .set_field_value(addr(h), i, |_| FakeValue::StringList(values));
}

unsafe extern "C" fn ogr_f_get_fid(h: *mut c_void) -> GIntBig {
    match HEAP.lock().objects.get(&addr(h)) {
        Some(FakeObject::Feature { fid, .. }) => *fid,
        _ => OGRNullFID,
    }
}

unsafe extern "C" fn ogr_f_set_fid(h: *mut c_void, value: GIntBig) -> OGRErr {
    match HEAP.lock().objects.get_mut(&addr(h)) {
        Some(FakeObject::Feature { fid, .. }) => {
            *fid = value;
            OGRERR_NONE
        }
        _ => OGRERR_INVALID_HANDLE,
    }
}

unsafe extern "C" fn ogr_f_dump_readable(h: *mut c_void, _fp: *mut c_void) {
    let heap = HEAP.lock();
    if let Some(FakeObject::Feature {
        defn, values, fid, ..
    }) = heap.objects.get(&addr(h))
    {
        let name = match heap.objects.get(defn) {
            Some(FakeObject::FeatureDefn { name, .. }) => name.as_str(),
            _ => "",
        };
        println!("OGRFeature({name}):{fid}");
        for (field, value) in heap.defn_fields(*defn).into_iter().flatten().zip(values) {
            println!(
                "  {} = {}",
                heap.field_name(*field).unwrap_or_default(),
                value.as_string()
            );
        }
    }
}

unsafe extern "C" fn ogr_f_set_from(h: *mut c_void, other: *mut c_void, forgiving: c_int) -> OGRErr {
    let mut heap = HEAP.lock();
    let (Some(dst_defn), Some(src_defn)) = (heap.feature_defn(addr(h)), heap.feature_defn(addr(other)))
    else {
        return OGRERR_INVALID_HANDLE;
    };
    let Some(FakeObject::Feature {
        values: src_values,
        geometry: src_geometry,
        style: src_style,
        ..
    }) = heap.objects.get(&addr(other)).cloned()
    else {
        return OGRERR_INVALID_HANDLE;
    };

    let src_fields = heap.defn_fields(src_defn).cloned().unwrap_or_default();
    let mut mapped = Vec::new();
    for (src_index, field) in src_fields.iter().enumerate() {
        let name = heap.field_name(*field).unwrap_or_default().to_string();
        let dst_index = heap.find_field(dst_defn, &name);
        if dst_index < 0 {
            if forgiving == 0 {
                return OGRERR_FAILURE;
            }
            continue;
        }
        let value = src_values.get(src_index).cloned().unwrap_or(FakeValue::Unset);
        mapped.push((dst_index, value));
    }

    for (dst_index, value) in mapped {
        heap.set_field_value(addr(h), dst_index, |_| value);
    }
    let geometry = heap.clone_object(src_geometry);
    heap.replace_geometry(addr(h), geometry);
    if let Some(FakeObject::Feature { style, .. }) = heap.objects.get_mut(&addr(h)) {
        *style = src_style;
    }
    OGRERR_NONE
}

unsafe extern "C" fn ogr_f_get_style_string(h: *mut c_void) -> *const c_char {
    match HEAP.lock().objects.get(&addr(h)) {
        Some(FakeObject::Feature {
            style: Some(style), ..
        }) => scratch_str(style),
        _ => null(),
    }
}

unsafe extern "C" fn ogr_f_set_style_string(h: *mut c_void, value: *const c_char) {
    if let Some(FakeObject::Feature { style, .. }) = HEAP.lock().objects.get_mut(&addr(h)) {
        *style = read_str(value);
    }
}

/// An API table backed entirely by the fake heap
pub(crate) fn fake_api() -> GdalApi {
    GdalApi {
        CPLErrorReset: Some(cpl_error_reset),
        CPLGetLastErrorType: Some(cpl_get_last_error_type),
        CPLGetLastErrorNo: Some(cpl_get_last_error_no),
        CPLGetLastErrorMsg: Some(cpl_get_last_error_msg),
        VSIFree: Some(vsi_free),

        GDALAllRegister: Some(gdal_all_register),
        GDALGetDriverByName: Some(gdal_get_driver_by_name),
        GDALGetDescription: Some(gdal_get_description),
        GDALSetDescription: Some(gdal_set_description),
        GDALGetMetadata: Some(gdal_get_metadata),
        GDALSetMetadata: Some(gdal_set_metadata),
        GDALGetMetadataItem: Some(gdal_get_metadata_item),
        GDALSetMetadataItem: Some(gdal_set_metadata_item),

        OSRNewSpatialReference: Some(osr_new_spatial_reference),
        OSRDestroySpatialReference: Some(osr_destroy_spatial_reference),
        OSRImportFromEPSG: Some(osr_import_from_epsg),
        OSRSetFromUserInput: Some(osr_set_from_user_input),
        OSRExportToWkt: Some(osr_export_to_wkt),
        OSRIsSame: Some(osr_is_same),
        OSRClone: Some(osr_clone),
        OCTNewCoordinateTransformation: Some(oct_new_coordinate_transformation),
        OCTDestroyCoordinateTransformation: Some(oct_destroy_coordinate_transformation),
        OCTTransform: Some(oct_transform),

        OGR_G_CreateGeometry: Some(ogr_g_create_geometry),
        OGR_G_CreateFromWkt: Some(ogr_g_create_from_wkt),
        OGR_G_ExportToWkt: Some(ogr_g_export_to_wkt),
        OGR_G_DestroyGeometry: Some(ogr_g_destroy_geometry),
        OGR_G_Clone: Some(ogr_g_clone),
        OGR_G_Equals: Some(ogr_g_equals),
        OGR_G_GetGeometryType: Some(ogr_g_get_geometry_type),
        OGR_G_AddPoint_2D: Some(ogr_g_add_point_2d),
        OGR_G_AddPoint: Some(ogr_g_add_point),
        OGR_G_GetPointCount: Some(ogr_g_get_point_count),
        OGR_G_Transform: Some(ogr_g_transform),

        OGR_Fld_Create: Some(ogr_fld_create),
        OGR_Fld_Destroy: Some(ogr_fld_destroy),
        OGR_Fld_GetNameRef: Some(ogr_fld_get_name_ref),
        OGR_Fld_GetType: Some(ogr_fld_get_type),
        OGR_Fld_GetWidth: Some(ogr_fld_get_width),
        OGR_Fld_SetWidth: Some(ogr_fld_set_width),
        OGR_Fld_GetPrecision: Some(ogr_fld_get_precision),
        OGR_Fld_SetPrecision: Some(ogr_fld_set_precision),

        OGR_FD_Create: Some(ogr_fd_create),
        OGR_FD_Reference: Some(ogr_fd_reference),
        OGR_FD_Release: Some(ogr_fd_release),
        OGR_FD_GetName: Some(ogr_fd_get_name),
        OGR_FD_GetFieldCount: Some(ogr_fd_get_field_count),
        OGR_FD_GetFieldDefn: Some(ogr_fd_get_field_defn),
        OGR_FD_GetFieldIndex: Some(ogr_fd_get_field_index),
        OGR_FD_AddFieldDefn: Some(ogr_fd_add_field_defn),

        OGR_F_Create: Some(ogr_f_create),
        OGR_F_Destroy: Some(ogr_f_destroy),
        OGR_F_GetDefnRef: Some(ogr_f_get_defn_ref),
        OGR_F_SetGeometry: Some(ogr_f_set_geometry),
        OGR_F_SetGeometryDirectly: Some(ogr_f_set_geometry_directly),
        OGR_F_GetGeometryRef: Some(ogr_f_get_geometry_ref),
        OGR_F_StealGeometry: Some(ogr_f_steal_geometry),
        OGR_F_Clone: Some(ogr_f_clone),
        OGR_F_Equal: Some(ogr_f_equal),
        OGR_F_GetFieldCount: Some(ogr_f_get_field_count),
        OGR_F_GetFieldDefnRef: Some(ogr_f_get_field_defn_ref),
        OGR_F_GetFieldIndex: Some(ogr_f_get_field_index),
        OGR_F_IsFieldSet: Some(ogr_f_is_field_set),
        OGR_F_UnsetField: Some(ogr_f_unset_field),
        OGR_F_GetFieldAsString: Some(ogr_f_get_field_as_string),
        OGR_F_GetFieldAsInteger: Some(ogr_f_get_field_as_integer),
        OGR_F_GetFieldAsDouble: Some(ogr_f_get_field_as_double),
        OGR_F_GetFieldAsDateTime: Some(ogr_f_get_field_as_date_time),
        OGR_F_GetFieldAsIntegerList: Some(ogr_f_get_field_as_integer_list),
        OGR_F_GetFieldAsDoubleList: Some(ogr_f_get_field_as_double_list),
        OGR_F_GetFieldAsStringList: Some(ogr_f_get_field_as_string_list),
        OGR_F_SetFieldString: Some(ogr_f_set_field_string),
        OGR_F_SetFieldInteger: Some(ogr_f_set_field_integer),
        OGR_F_SetFieldDouble: Some(ogr_f_set_field_double),
        OGR_F_SetFieldDateTime: Some(ogr_f_set_field_date_time),
        OGR_F_SetFieldIntegerList: Some(ogr_f_set_field_integer_list),
        OGR_F_SetFieldDoubleList: Some(ogr_f_set_field_double_list),
        OGR_F_SetFieldStringList: Some(ogr_f_set_field_string_list),
        OGR_F_GetFID: Some(ogr_f_get_fid),
        OGR_F_SetFID: Some(ogr_f_set_fid),
        OGR_F_DumpReadable: Some(ogr_f_dump_readable),
        OGR_F_SetFrom: Some(ogr_f_set_from),
        OGR_F_GetStyleString: Some(ogr_f_get_style_string),
        OGR_F_SetStyleString: Some(ogr_f_set_style_string),
    }
}

pub(crate) fn fake_library() -> Arc<GdalLibrary> {
    Arc::new(unsafe { GdalLibrary::from_api(fake_api(), "fake") })
}

/// Number of native releases recorded for a handle
pub(crate) fn release_count(handle: NativeHandle) -> u32 {
    HEAP.lock()
        .releases
        .get(&addr(handle.as_ptr()))
        .copied()
        .unwrap_or(0)
}

/// Whether the handle still refers to a live fake object
pub(crate) fn is_allocated(handle: NativeHandle) -> bool {
    HEAP.lock().objects.contains_key(&addr(handle.as_ptr()))
}

/// Native reference count of a feature definition
pub(crate) fn reference_count(handle: NativeHandle) -> c_int {
    match HEAP.lock().objects.get(&addr(handle.as_ptr())) {
        Some(FakeObject::FeatureDefn { refs, .. }) => *refs,
        _ => 0,
    }
}

/// Allocate an object with no behavior
pub(crate) fn alloc_opaque() -> NativeHandle {
    NativeHandle::from_raw(ptr(HEAP.lock().insert(FakeObject::Opaque)))
}

/// Allocate a major object that only Rust refers to
pub(crate) fn alloc_major_object(description: &str) -> NativeHandle {
    NativeHandle::from_raw(ptr(HEAP.lock().insert(FakeObject::Major {
        description: description.to_string(),
        metadata: BTreeMap::new(),
    })))
}

/// Release a fake object directly, counting the release
pub(crate) fn free(handle: NativeHandle) {
    HEAP.lock().destroy(addr(handle.as_ptr()));
}
