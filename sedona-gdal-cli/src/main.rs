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

use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use sedona_gdal::{
    configure_global_gdal_library, global_gdal_library, CoordinateTransformation,
    GdalLibraryBuilder, SedonaGdalError, SpatialReference,
};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Gdal(#[from] SedonaGdalError),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

#[derive(Debug, Parser, PartialEq)]
#[clap(author, version, about = "Transform coordinates read from stdin", long_about = None)]
struct Args {
    #[clap(
        short = 's',
        long = "s-srs",
        help = "Source coordinate reference system (e.g. EPSG:4326, WKT, or a PROJ string)"
    )]
    s_srs: String,

    #[clap(
        short = 't',
        long = "t-srs",
        help = "Target coordinate reference system (e.g. EPSG:3857, WKT, or a PROJ string)"
    )]
    t_srs: String,

    #[clap(
        short = 'l',
        long,
        help = "Path to the GDAL shared library (defaults to $SEDONA_GDAL_LIBRARY or the system GDAL)"
    )]
    library: Option<PathBuf>,
}

/// Calls [`main_inner`], then handles printing errors and returning the correct exit code
fn main() -> ExitCode {
    if let Err(e) = main_inner() {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn main_inner() -> Result<(), CliError> {
    env_logger::init();

    let args = Args::parse();

    let mut builder = GdalLibraryBuilder::default();
    if let Some(path) = args.library {
        builder = builder.with_shared_library(path);
    }
    configure_global_gdal_library(builder)?;
    let library = global_gdal_library()?;
    log::debug!("Using GDAL from {}", library.source());

    let source = SpatialReference::from_user_input(&library, &args.s_srs)?;
    let target = SpatialReference::from_user_input(&library, &args.t_srs)?;
    let transformation = CoordinateTransformation::new(&library, &source, &target)?;

    let stdin = io::stdin();
    let mut out = BufWriter::new(io::stdout().lock());
    for (i, line) in stdin.lock().lines().enumerate() {
        let line = line?;
        let Some(mut point) = parse_coordinate_line(&line).map_err(|message| CliError::Parse {
            line: i + 1,
            message,
        })?
        else {
            continue;
        };

        transformation.transform_point(&mut point)?;
        writeln!(out, "{} {} {}", point[0], point[1], point[2])?;
    }

    out.flush()?;
    Ok(())
}

/// Parse `x y [z]` separated by whitespace; blank lines yield `None`
fn parse_coordinate_line(line: &str) -> Result<Option<[f64; 3]>, String> {
    let values = line
        .split_whitespace()
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| format!("Invalid coordinate '{token}'"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    match values.as_slice() {
        [] => Ok(None),
        [x, y] => Ok(Some([*x, *y, 0.0])),
        [x, y, z] => Ok(Some([*x, *y, *z])),
        _ => Err(format!(
            "Expected 2 or 3 coordinates but got {}",
            values.len()
        )),
    }
}
