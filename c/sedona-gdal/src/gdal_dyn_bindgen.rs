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
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(non_upper_case_globals)]
#![allow(dead_code)]

use std::os::raw::{c_char, c_double, c_int, c_void};

pub type GDALMajorObjectH = *mut c_void;
pub type GDALDriverH = *mut c_void;
pub type OGRSpatialReferenceH = *mut c_void;
pub type OGRCoordinateTransformationH = *mut c_void;
pub type OGRGeometryH = *mut c_void;
pub type OGRFieldDefnH = *mut c_void;
pub type OGRFeatureDefnH = *mut c_void;
pub type OGRFeatureH = *mut c_void;
pub type GIntBig = i64;

pub type CPLErr = c_int;
pub const CPLErr_CE_None: CPLErr = 0;
pub const CPLErr_CE_Debug: CPLErr = 1;
pub const CPLErr_CE_Warning: CPLErr = 2;
pub const CPLErr_CE_Failure: CPLErr = 3;
pub const CPLErr_CE_Fatal: CPLErr = 4;

pub const CPLE_AppDefined: c_int = 1;
pub const CPLE_IllegalArg: c_int = 5;

pub type OGRErr = c_int;
pub const OGRERR_NONE: OGRErr = 0;
pub const OGRERR_NOT_ENOUGH_DATA: OGRErr = 1;
pub const OGRERR_NOT_ENOUGH_MEMORY: OGRErr = 2;
pub const OGRERR_UNSUPPORTED_GEOMETRY_TYPE: OGRErr = 3;
pub const OGRERR_UNSUPPORTED_OPERATION: OGRErr = 4;
pub const OGRERR_CORRUPT_DATA: OGRErr = 5;
pub const OGRERR_FAILURE: OGRErr = 6;
pub const OGRERR_UNSUPPORTED_SRS: OGRErr = 7;
pub const OGRERR_INVALID_HANDLE: OGRErr = 8;
pub const OGRERR_NON_EXISTING_FEATURE: OGRErr = 9;

pub type OGRFieldType = c_int;
pub const OGRFieldType_OFTInteger: OGRFieldType = 0;
pub const OGRFieldType_OFTIntegerList: OGRFieldType = 1;
pub const OGRFieldType_OFTReal: OGRFieldType = 2;
pub const OGRFieldType_OFTRealList: OGRFieldType = 3;
pub const OGRFieldType_OFTString: OGRFieldType = 4;
pub const OGRFieldType_OFTStringList: OGRFieldType = 5;
pub const OGRFieldType_OFTWideString: OGRFieldType = 6;
pub const OGRFieldType_OFTWideStringList: OGRFieldType = 7;
pub const OGRFieldType_OFTBinary: OGRFieldType = 8;
pub const OGRFieldType_OFTDate: OGRFieldType = 9;
pub const OGRFieldType_OFTTime: OGRFieldType = 10;
pub const OGRFieldType_OFTDateTime: OGRFieldType = 11;
pub const OGRFieldType_OFTInteger64: OGRFieldType = 12;
pub const OGRFieldType_OFTInteger64List: OGRFieldType = 13;

pub type OGRwkbGeometryType = c_int;
pub const OGRwkbGeometryType_wkbUnknown: OGRwkbGeometryType = 0;
pub const OGRwkbGeometryType_wkbPoint: OGRwkbGeometryType = 1;
pub const OGRwkbGeometryType_wkbLineString: OGRwkbGeometryType = 2;
pub const OGRwkbGeometryType_wkbPolygon: OGRwkbGeometryType = 3;
pub const OGRwkbGeometryType_wkbMultiPoint: OGRwkbGeometryType = 4;
pub const OGRwkbGeometryType_wkbMultiLineString: OGRwkbGeometryType = 5;
pub const OGRwkbGeometryType_wkbMultiPolygon: OGRwkbGeometryType = 6;
pub const OGRwkbGeometryType_wkbGeometryCollection: OGRwkbGeometryType = 7;
pub const OGRwkbGeometryType_wkbLinearRing: OGRwkbGeometryType = 101;

pub const OGRNullFID: GIntBig = -1;

#[repr(C)]
#[derive(Debug, Copy, Clone, Default)]
pub struct GdalApi {
    // cpl_error.h / cpl_vsi.h
    pub CPLErrorReset: Option<unsafe extern "C" fn()>,
    pub CPLGetLastErrorType: Option<unsafe extern "C" fn() -> CPLErr>,
    pub CPLGetLastErrorNo: Option<unsafe extern "C" fn() -> c_int>,
    pub CPLGetLastErrorMsg: Option<unsafe extern "C" fn() -> *const c_char>,
    pub VSIFree: Option<unsafe extern "C" fn(ptr: *mut c_void)>,

    // gdal.h
    pub GDALAllRegister: Option<unsafe extern "C" fn()>,
    pub GDALGetDriverByName: Option<unsafe extern "C" fn(name: *const c_char) -> GDALDriverH>,
    pub GDALGetDescription:
        Option<unsafe extern "C" fn(hObject: GDALMajorObjectH) -> *const c_char>,
    pub GDALSetDescription:
        Option<unsafe extern "C" fn(hObject: GDALMajorObjectH, pszNewDesc: *const c_char)>,
    pub GDALGetMetadata: Option<
        unsafe extern "C" fn(hObject: GDALMajorObjectH, pszDomain: *const c_char) -> *mut *mut c_char,
    >,
    pub GDALSetMetadata: Option<
        unsafe extern "C" fn(
            hObject: GDALMajorObjectH,
            papszMD: *mut *mut c_char,
            pszDomain: *const c_char,
        ) -> CPLErr,
    >,
    pub GDALGetMetadataItem: Option<
        unsafe extern "C" fn(
            hObject: GDALMajorObjectH,
            pszName: *const c_char,
            pszDomain: *const c_char,
        ) -> *const c_char,
    >,
    pub GDALSetMetadataItem: Option<
        unsafe extern "C" fn(
            hObject: GDALMajorObjectH,
            pszName: *const c_char,
            pszValue: *const c_char,
            pszDomain: *const c_char,
        ) -> CPLErr,
    >,

    // ogr_srs_api.h
    pub OSRNewSpatialReference:
        Option<unsafe extern "C" fn(pszWKT: *const c_char) -> OGRSpatialReferenceH>,
    pub OSRDestroySpatialReference: Option<unsafe extern "C" fn(hSRS: OGRSpatialReferenceH)>,
    pub OSRImportFromEPSG:
        Option<unsafe extern "C" fn(hSRS: OGRSpatialReferenceH, nCode: c_int) -> OGRErr>,
    pub OSRSetFromUserInput: Option<
        unsafe extern "C" fn(hSRS: OGRSpatialReferenceH, pszDef: *const c_char) -> OGRErr,
    >,
    pub OSRExportToWkt: Option<
        unsafe extern "C" fn(hSRS: OGRSpatialReferenceH, ppszReturn: *mut *mut c_char) -> OGRErr,
    >,
    pub OSRIsSame: Option<
        unsafe extern "C" fn(hSRS1: OGRSpatialReferenceH, hSRS2: OGRSpatialReferenceH) -> c_int,
    >,
    pub OSRClone: Option<unsafe extern "C" fn(hSRS: OGRSpatialReferenceH) -> OGRSpatialReferenceH>,
    pub OCTNewCoordinateTransformation: Option<
        unsafe extern "C" fn(
            hSourceSRS: OGRSpatialReferenceH,
            hTargetSRS: OGRSpatialReferenceH,
        ) -> OGRCoordinateTransformationH,
    >,
    pub OCTDestroyCoordinateTransformation:
        Option<unsafe extern "C" fn(hCT: OGRCoordinateTransformationH)>,
    pub OCTTransform: Option<
        unsafe extern "C" fn(
            hCT: OGRCoordinateTransformationH,
            nCount: c_int,
            x: *mut c_double,
            y: *mut c_double,
            z: *mut c_double,
        ) -> c_int,
    >,

    // ogr_api.h: geometries
    pub OGR_G_CreateGeometry:
        Option<unsafe extern "C" fn(eGeometryType: OGRwkbGeometryType) -> OGRGeometryH>,
    pub OGR_G_CreateFromWkt: Option<
        unsafe extern "C" fn(
            ppszData: *mut *mut c_char,
            hSRS: OGRSpatialReferenceH,
            phGeometry: *mut OGRGeometryH,
        ) -> OGRErr,
    >,
    pub OGR_G_ExportToWkt:
        Option<unsafe extern "C" fn(hGeom: OGRGeometryH, ppszSrcText: *mut *mut c_char) -> OGRErr>,
    pub OGR_G_DestroyGeometry: Option<unsafe extern "C" fn(hGeom: OGRGeometryH)>,
    pub OGR_G_Clone: Option<unsafe extern "C" fn(hGeom: OGRGeometryH) -> OGRGeometryH>,
    pub OGR_G_Equals:
        Option<unsafe extern "C" fn(hGeom: OGRGeometryH, hOther: OGRGeometryH) -> c_int>,
    pub OGR_G_GetGeometryType:
        Option<unsafe extern "C" fn(hGeom: OGRGeometryH) -> OGRwkbGeometryType>,
    pub OGR_G_AddPoint_2D:
        Option<unsafe extern "C" fn(hGeom: OGRGeometryH, dfX: c_double, dfY: c_double)>,
    pub OGR_G_AddPoint: Option<
        unsafe extern "C" fn(hGeom: OGRGeometryH, dfX: c_double, dfY: c_double, dfZ: c_double),
    >,
    pub OGR_G_GetPointCount: Option<unsafe extern "C" fn(hGeom: OGRGeometryH) -> c_int>,
    pub OGR_G_Transform: Option<
        unsafe extern "C" fn(hGeom: OGRGeometryH, hTransform: OGRCoordinateTransformationH) -> OGRErr,
    >,

    // ogr_api.h: field definitions
    pub OGR_Fld_Create:
        Option<unsafe extern "C" fn(pszName: *const c_char, eType: OGRFieldType) -> OGRFieldDefnH>,
    pub OGR_Fld_Destroy: Option<unsafe extern "C" fn(hDefn: OGRFieldDefnH)>,
    pub OGR_Fld_GetNameRef: Option<unsafe extern "C" fn(hDefn: OGRFieldDefnH) -> *const c_char>,
    pub OGR_Fld_GetType: Option<unsafe extern "C" fn(hDefn: OGRFieldDefnH) -> OGRFieldType>,
    pub OGR_Fld_GetWidth: Option<unsafe extern "C" fn(hDefn: OGRFieldDefnH) -> c_int>,
    pub OGR_Fld_SetWidth: Option<unsafe extern "C" fn(hDefn: OGRFieldDefnH, nNewWidth: c_int)>,
    pub OGR_Fld_GetPrecision: Option<unsafe extern "C" fn(hDefn: OGRFieldDefnH) -> c_int>,
    pub OGR_Fld_SetPrecision:
        Option<unsafe extern "C" fn(hDefn: OGRFieldDefnH, nPrecision: c_int)>,

    // ogr_api.h: feature definitions
    pub OGR_FD_Create: Option<unsafe extern "C" fn(pszName: *const c_char) -> OGRFeatureDefnH>,
    pub OGR_FD_Reference: Option<unsafe extern "C" fn(hDefn: OGRFeatureDefnH) -> c_int>,
    pub OGR_FD_Release: Option<unsafe extern "C" fn(hDefn: OGRFeatureDefnH)>,
    pub OGR_FD_GetName: Option<unsafe extern "C" fn(hDefn: OGRFeatureDefnH) -> *const c_char>,
    pub OGR_FD_GetFieldCount: Option<unsafe extern "C" fn(hDefn: OGRFeatureDefnH) -> c_int>,
    pub OGR_FD_GetFieldDefn:
        Option<unsafe extern "C" fn(hDefn: OGRFeatureDefnH, iField: c_int) -> OGRFieldDefnH>,
    pub OGR_FD_GetFieldIndex: Option<
        unsafe extern "C" fn(hDefn: OGRFeatureDefnH, pszFieldName: *const c_char) -> c_int,
    >,
    pub OGR_FD_AddFieldDefn:
        Option<unsafe extern "C" fn(hDefn: OGRFeatureDefnH, hNewField: OGRFieldDefnH)>,

    // ogr_api.h: features
    pub OGR_F_Create: Option<unsafe extern "C" fn(hDefn: OGRFeatureDefnH) -> OGRFeatureH>,
    pub OGR_F_Destroy: Option<unsafe extern "C" fn(hFeat: OGRFeatureH)>,
    pub OGR_F_GetDefnRef: Option<unsafe extern "C" fn(hFeat: OGRFeatureH) -> OGRFeatureDefnH>,
    pub OGR_F_SetGeometry:
        Option<unsafe extern "C" fn(hFeat: OGRFeatureH, hGeom: OGRGeometryH) -> OGRErr>,
    pub OGR_F_SetGeometryDirectly:
        Option<unsafe extern "C" fn(hFeat: OGRFeatureH, hGeom: OGRGeometryH) -> OGRErr>,
    pub OGR_F_GetGeometryRef: Option<unsafe extern "C" fn(hFeat: OGRFeatureH) -> OGRGeometryH>,
    pub OGR_F_StealGeometry: Option<unsafe extern "C" fn(hFeat: OGRFeatureH) -> OGRGeometryH>,
    pub OGR_F_Clone: Option<unsafe extern "C" fn(hFeat: OGRFeatureH) -> OGRFeatureH>,
    pub OGR_F_Equal:
        Option<unsafe extern "C" fn(hFeat: OGRFeatureH, hOtherFeat: OGRFeatureH) -> c_int>,
    pub OGR_F_GetFieldCount: Option<unsafe extern "C" fn(hFeat: OGRFeatureH) -> c_int>,
    pub OGR_F_GetFieldDefnRef:
        Option<unsafe extern "C" fn(hFeat: OGRFeatureH, i: c_int) -> OGRFieldDefnH>,
    pub OGR_F_GetFieldIndex:
        Option<unsafe extern "C" fn(hFeat: OGRFeatureH, pszName: *const c_char) -> c_int>,
    pub OGR_F_IsFieldSet: Option<unsafe extern "C" fn(hFeat: OGRFeatureH, iField: c_int) -> c_int>,
    pub OGR_F_UnsetField: Option<unsafe extern "C" fn(hFeat: OGRFeatureH, iField: c_int)>,
    pub OGR_F_GetFieldAsString:
        Option<unsafe extern "C" fn(hFeat: OGRFeatureH, iField: c_int) -> *const c_char>,
    pub OGR_F_GetFieldAsInteger:
        Option<unsafe extern "C" fn(hFeat: OGRFeatureH, iField: c_int) -> c_int>,
    pub OGR_F_GetFieldAsDouble:
        Option<unsafe extern "C" fn(hFeat: OGRFeatureH, iField: c_int) -> c_double>,
    pub OGR_F_GetFieldAsDateTime: Option<
        unsafe extern "C" fn(
            hFeat: OGRFeatureH,
            iField: c_int,
            pnYear: *mut c_int,
            pnMonth: *mut c_int,
            pnDay: *mut c_int,
            pnHour: *mut c_int,
            pnMinute: *mut c_int,
            pnSecond: *mut c_int,
            pnTZFlag: *mut c_int,
        ) -> c_int,
    >,
    pub OGR_F_GetFieldAsIntegerList: Option<
        unsafe extern "C" fn(hFeat: OGRFeatureH, iField: c_int, pnCount: *mut c_int) -> *const c_int,
    >,
    pub OGR_F_GetFieldAsDoubleList: Option<
        unsafe extern "C" fn(
            hFeat: OGRFeatureH,
            iField: c_int,
            pnCount: *mut c_int,
        ) -> *const c_double,
    >,
    pub OGR_F_GetFieldAsStringList:
        Option<unsafe extern "C" fn(hFeat: OGRFeatureH, iField: c_int) -> *mut *mut c_char>,
    pub OGR_F_SetFieldString:
        Option<unsafe extern "C" fn(hFeat: OGRFeatureH, iField: c_int, pszValue: *const c_char)>,
    pub OGR_F_SetFieldInteger:
        Option<unsafe extern "C" fn(hFeat: OGRFeatureH, iField: c_int, nValue: c_int)>,
    pub OGR_F_SetFieldDouble:
        Option<unsafe extern "C" fn(hFeat: OGRFeatureH, iField: c_int, dfValue: c_double)>,
    pub OGR_F_SetFieldDateTime: Option<
        unsafe extern "C" fn(
            hFeat: OGRFeatureH,
            iField: c_int,
            nYear: c_int,
            nMonth: c_int,
            nDay: c_int,
            nHour: c_int,
            nMinute: c_int,
            nSecond: c_int,
            nTZFlag: c_int,
        ),
    >,
    pub OGR_F_SetFieldIntegerList: Option<
        unsafe extern "C" fn(hFeat: OGRFeatureH, iField: c_int, nCount: c_int, panValues: *const c_int),
    >,
    pub OGR_F_SetFieldDoubleList: Option<
        unsafe extern "C" fn(
            hFeat: OGRFeatureH,
            iField: c_int,
            nCount: c_int,
            padfValues: *const c_double,
        ),
    >,
    pub OGR_F_SetFieldStringList: Option<
        unsafe extern "C" fn(hFeat: OGRFeatureH, iField: c_int, papszValues: *mut *mut c_char),
    >,
    pub OGR_F_GetFID: Option<unsafe extern "C" fn(hFeat: OGRFeatureH) -> GIntBig>,
    pub OGR_F_SetFID: Option<unsafe extern "C" fn(hFeat: OGRFeatureH, nFID: GIntBig) -> OGRErr>,
    pub OGR_F_DumpReadable: Option<unsafe extern "C" fn(hFeat: OGRFeatureH, fpOut: *mut c_void)>,
    pub OGR_F_SetFrom: Option<
        unsafe extern "C" fn(hFeat: OGRFeatureH, hOtherFeat: OGRFeatureH, bForgiving: c_int) -> OGRErr,
    >,
    pub OGR_F_GetStyleString: Option<unsafe extern "C" fn(hFeat: OGRFeatureH) -> *const c_char>,
    pub OGR_F_SetStyleString:
        Option<unsafe extern "C" fn(hFeat: OGRFeatureH, pszStyle: *const c_char)>,
}
