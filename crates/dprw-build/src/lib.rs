#![deny(missing_docs)]
#![doc = "Declarative construction of measurements from YAML. Each capability has a registry of named variants with ordered parameter lists; the builder decodes a document against them, substituting `!option` references from the command line and recursing into nested components."]

pub mod builder;
pub mod catalog;
pub mod document;
pub mod options;
pub mod registry;

use std::path::Path;

use dprw_core::DprwError;
use dprw_engine::Measurement;
use serde_yaml::Value;

pub use builder::{build_erased, Builder, Capability, MAX_SUBSTITUTION_DEPTH, OPTION_TAG};
pub use catalog::Catalog;
pub use document::{load_document, parse_document, KeyPath};
pub use options::Options;
pub use registry::{Arg, Args, Param, ParamKind, Registry, Variant};

/// Builds the measurement described by `document` with the standard catalog.
pub fn build_measurement(document: &Value, options: &Options) -> Result<Box<dyn Measurement>, DprwError> {
    let catalog = Catalog::standard()?;
    Builder::new(&catalog, options).build::<dyn Measurement>(document)
}

/// Reads the YAML file at `path` and builds its measurement.
pub fn load_measurement(path: &Path, options: &Options) -> Result<Box<dyn Measurement>, DprwError> {
    let document = load_document(path)?;
    build_measurement(&document, options)
        .map_err(|err| err.with_context("file", path.display().to_string()))
}
