//! Recursive construction of components from document nodes.

use std::any::Any;
use std::borrow::Cow;

use dprw_core::{DprwError, ErrorInfo};
use serde_yaml::Value;

use crate::catalog::Catalog;
use crate::document::{
    as_count, as_flag, as_real, as_text, as_vector, expect_map, field, missing_field, KeyPath,
};
use crate::options::Options;
use crate::registry::{Arg, Args, Param, ParamKind, Registry};

/// YAML tag marking a node whose value comes from a named option.
pub const OPTION_TAG: &str = "option";

/// Longest chain of options resolving to further option references.
pub const MAX_SUBSTITUTION_DEPTH: usize = 8;

/// A capability interface whose variants live in a [`Catalog`] registry.
///
/// Implemented for the trait-object types, e.g. `dyn SocModel`.
pub trait Capability: Send + 'static {
    /// Capability name used in diagnostics.
    const KIND: &'static str;

    /// Registry holding this capability's variants.
    fn registry(catalog: &Catalog) -> &Registry<Self>;

    /// Mutable access for registration.
    fn registry_mut(catalog: &mut Catalog) -> &mut Registry<Self>;
}

/// Builds components from document nodes using a catalog and option map.
#[derive(Debug, Clone, Copy)]
pub struct Builder<'a> {
    catalog: &'a Catalog,
    options: &'a Options,
}

impl<'a> Builder<'a> {
    /// Creates a builder over `catalog`, substituting from `options`.
    pub fn new(catalog: &'a Catalog, options: &'a Options) -> Self {
        Self { catalog, options }
    }

    /// Builds the component described by the document root.
    pub fn build<C: Capability + ?Sized>(&self, node: &Value) -> Result<Box<C>, DprwError> {
        self.build_at::<C>(node, &KeyPath::root())
    }

    /// Builds the component described by `node`, located at `path`.
    ///
    /// Nested parameters are built first; the variant constructor runs only
    /// once every parameter decoded successfully.
    pub fn build_at<C: Capability + ?Sized>(
        &self,
        node: &Value,
        path: &KeyPath,
    ) -> Result<Box<C>, DprwError> {
        let node = self.resolve(node, path)?;
        let map = expect_map(&node, path)?;
        let type_path = path.child("type");
        let type_node = self.resolve(field(map, "type", path)?, &type_path)?;
        let type_name = as_text(&type_node, &type_path)?;

        let registry = C::registry(self.catalog);
        let variant = registry.get(&type_name).ok_or_else(|| {
            let known: Vec<&str> = registry.type_names().collect();
            DprwError::UnknownType(
                ErrorInfo::new(
                    "unknown-type",
                    format!("Unrecognized type: {type_name}"),
                )
                .with_context("type", type_name.clone())
                .with_context("capability", registry.capability())
                .with_context("path", path.to_string())
                .with_hint(format!(
                    "known {} types: {}",
                    registry.capability(),
                    known.join(", ")
                )),
            )
        })?;
        log::debug!(
            "building {} `{}` at {}",
            registry.capability(),
            variant.type_name,
            path
        );

        let mut values = Vec::with_capacity(variant.params.len());
        for param in variant.params {
            let param_path = path.child(param.name);
            let arg = match map.get(param.name) {
                Some(raw) => self.decode(param, raw, &param_path)?,
                None if param.required => return Err(missing_field(param.name, path)),
                None => Arg::Absent,
            };
            values.push((param.name, arg));
        }

        (variant.construct)(Args::new(variant.type_name, path.clone(), values))
            .map_err(|err| err.with_context("path", path.to_string()))
    }

    fn decode(&self, param: &Param, raw: &Value, path: &KeyPath) -> Result<Arg, DprwError> {
        let node = self.resolve(raw, path)?;
        match param.kind {
            ParamKind::Real => as_real(&node, path).map(Arg::Real),
            ParamKind::Count => as_count(&node, path).map(Arg::Count),
            ParamKind::Vector => as_vector(&node, path).map(Arg::Vector),
            ParamKind::Text => as_text(&node, path).map(Arg::Text),
            ParamKind::Flag => as_flag(&node, path).map(Arg::Flag),
            ParamKind::Nested(build) => build(self, &node, path).map(Arg::Nested),
        }
    }

    /// Follows `!option name` tags until a plain node is reached.
    ///
    /// Each option's text is parsed as a YAML fragment, which may itself be
    /// another option reference.
    pub fn resolve<'v>(&self, node: &'v Value, path: &KeyPath) -> Result<Cow<'v, Value>, DprwError> {
        let mut current = Cow::Borrowed(node);
        let mut depth = 0;
        loop {
            let reference = match current.as_ref() {
                Value::Tagged(tagged) if tagged.tag == OPTION_TAG => {
                    Some(option_name(&tagged.value, path)?)
                }
                _ => None,
            };
            let Some(name) = reference else {
                return Ok(current);
            };
            if depth == MAX_SUBSTITUTION_DEPTH {
                return Err(DprwError::Options(
                    ErrorInfo::new(
                        "option-depth",
                        format!("option references nest deeper than {MAX_SUBSTITUTION_DEPTH}"),
                    )
                    .with_context("option", name)
                    .with_context("path", path.to_string()),
                ));
            }
            depth += 1;
            let text = self.options.get(&name).ok_or_else(|| {
                DprwError::Options(
                    ErrorInfo::new(
                        "option-missing",
                        format!("option `{name}` was not supplied"),
                    )
                    .with_context("option", name.clone())
                    .with_context("path", path.to_string())
                    .with_hint(format!("pass --{name}=<value>")),
                )
            })?;
            let fragment: Value = serde_yaml::from_str(text).map_err(|err| {
                DprwError::Options(
                    ErrorInfo::new("option-parse", err.to_string())
                        .with_context("option", name.clone())
                        .with_context("path", path.to_string()),
                )
            })?;
            log::debug!("substituted option `{name}` at {path}");
            current = Cow::Owned(fragment);
        }
    }
}

fn option_name(node: &Value, path: &KeyPath) -> Result<String, DprwError> {
    node.as_str().map(str::to_string).ok_or_else(|| {
        DprwError::Config(
            ErrorInfo::new("option-name", "`!option` must name an option with a string")
                .with_context("path", path.to_string()),
        )
    })
}

/// Builds a component of capability `C` and erases its type.
///
/// Used as the [`ParamKind::Nested`] hook for parameters of capability `C`.
pub fn build_erased<C: Capability + ?Sized>(
    builder: &Builder<'_>,
    node: &Value,
    path: &KeyPath,
) -> Result<Box<dyn Any + Send>, DprwError> {
    let built: Box<C> = builder.build_at::<C>(node, path)?;
    Ok(Box::new(built))
}
