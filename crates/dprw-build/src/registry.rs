//! Per-capability registries of buildable variants.
//!
//! A variant declares its type name, an ordered parameter list and a
//! constructor. The builder decodes document fields in declared order into
//! [`Args`], and the constructor takes them back out positionally.

use std::any::Any;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use dprw_core::{DprwError, ErrorInfo, Vec3};
use serde_yaml::Value;

use crate::builder::{Builder, Capability};
use crate::document::KeyPath;

/// Builds a nested component and erases its type for transport in [`Args`].
pub type NestedBuild =
    fn(&Builder<'_>, &Value, &KeyPath) -> Result<Box<dyn Any + Send>, DprwError>;

/// Semantic type of a declared parameter.
#[derive(Clone, Copy)]
pub enum ParamKind {
    /// Floating point number; integers are accepted.
    Real,
    /// Non-negative integer.
    Count,
    /// Three-component vector.
    Vector,
    /// String.
    Text,
    /// Boolean.
    Flag,
    /// Another capability, built recursively.
    Nested(NestedBuild),
}

impl ParamKind {
    /// Short name used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            ParamKind::Real => "real",
            ParamKind::Count => "count",
            ParamKind::Vector => "vector",
            ParamKind::Text => "text",
            ParamKind::Flag => "flag",
            ParamKind::Nested(_) => "nested",
        }
    }
}

impl fmt::Debug for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// One declared constructor parameter.
#[derive(Debug, Clone, Copy)]
pub struct Param {
    /// Document key.
    pub name: &'static str,
    /// Semantic type.
    pub kind: ParamKind,
    /// Whether absence is an error.
    pub required: bool,
}

impl Param {
    /// Parameter that must be present.
    pub const fn required(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    /// Parameter whose absence the constructor resolves with a default.
    pub const fn optional(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// Decoded parameter value.
pub enum Arg {
    /// Decoded [`ParamKind::Real`].
    Real(f64),
    /// Decoded [`ParamKind::Count`].
    Count(u64),
    /// Decoded [`ParamKind::Vector`].
    Vector(Vec3),
    /// Decoded [`ParamKind::Text`].
    Text(String),
    /// Decoded [`ParamKind::Flag`].
    Flag(bool),
    /// Built nested component, type-erased.
    Nested(Box<dyn Any + Send>),
    /// Optional parameter missing from the document.
    Absent,
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Real(value) => f.debug_tuple("Real").field(value).finish(),
            Arg::Count(value) => f.debug_tuple("Count").field(value).finish(),
            Arg::Vector(value) => f.debug_tuple("Vector").field(value).finish(),
            Arg::Text(value) => f.debug_tuple("Text").field(value).finish(),
            Arg::Flag(value) => f.debug_tuple("Flag").field(value).finish(),
            Arg::Nested(_) => f.write_str("Nested(..)"),
            Arg::Absent => f.write_str("Absent"),
        }
    }
}

/// Decoded arguments handed to a constructor in declared order.
#[derive(Debug)]
pub struct Args {
    type_name: &'static str,
    path: KeyPath,
    values: VecDeque<(&'static str, Arg)>,
}

impl Args {
    pub(crate) fn new(type_name: &'static str, path: KeyPath, values: Vec<(&'static str, Arg)>) -> Self {
        Self {
            type_name,
            path,
            values: values.into(),
        }
    }

    /// Type name being constructed.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Location of the node being constructed.
    pub fn path(&self) -> &KeyPath {
        &self.path
    }

    fn mismatch(&self, name: &str, expected: &str) -> DprwError {
        DprwError::Config(
            ErrorInfo::new(
                "schema-mismatch",
                format!(
                    "constructor for `{}` expected a {expected} argument for `{name}`",
                    self.type_name
                ),
            )
            .with_context("path", self.path.to_string())
            .with_context("type", self.type_name),
        )
    }

    fn next(&mut self, expected: &str) -> Result<(&'static str, Arg), DprwError> {
        self.values
            .pop_front()
            .ok_or_else(|| self.mismatch("<end of arguments>", expected))
    }

    /// Next argument as a real number.
    pub fn take_real(&mut self) -> Result<f64, DprwError> {
        match self.next("real")? {
            (_, Arg::Real(value)) => Ok(value),
            (name, _) => Err(self.mismatch(name, "real")),
        }
    }

    /// Next argument as a real number, or `default` when absent.
    pub fn take_real_or(&mut self, default: f64) -> Result<f64, DprwError> {
        match self.next("real")? {
            (_, Arg::Real(value)) => Ok(value),
            (_, Arg::Absent) => Ok(default),
            (name, _) => Err(self.mismatch(name, "real")),
        }
    }

    /// Next argument as a count.
    pub fn take_count(&mut self) -> Result<u64, DprwError> {
        match self.next("count")? {
            (_, Arg::Count(value)) => Ok(value),
            (name, _) => Err(self.mismatch(name, "count")),
        }
    }

    /// Next argument as a count, or `default` when absent.
    pub fn take_count_or(&mut self, default: u64) -> Result<u64, DprwError> {
        match self.next("count")? {
            (_, Arg::Count(value)) => Ok(value),
            (_, Arg::Absent) => Ok(default),
            (name, _) => Err(self.mismatch(name, "count")),
        }
    }

    /// Next argument as a vector.
    pub fn take_vector(&mut self) -> Result<Vec3, DprwError> {
        match self.next("vector")? {
            (_, Arg::Vector(value)) => Ok(value),
            (name, _) => Err(self.mismatch(name, "vector")),
        }
    }

    /// Next argument as text.
    pub fn take_text(&mut self) -> Result<String, DprwError> {
        match self.next("text")? {
            (_, Arg::Text(value)) => Ok(value),
            (name, _) => Err(self.mismatch(name, "text")),
        }
    }

    /// Next argument as a flag, or `default` when absent.
    pub fn take_flag_or(&mut self, default: bool) -> Result<bool, DprwError> {
        match self.next("flag")? {
            (_, Arg::Flag(value)) => Ok(value),
            (_, Arg::Absent) => Ok(default),
            (name, _) => Err(self.mismatch(name, "flag")),
        }
    }

    /// Next argument as a built component of capability `C`.
    pub fn take_nested<C: Capability + ?Sized>(&mut self) -> Result<Box<C>, DprwError> {
        match self.next(C::KIND)? {
            (name, Arg::Nested(erased)) => match erased.downcast::<Box<C>>() {
                Ok(built) => Ok(*built),
                Err(_) => Err(self.mismatch(name, C::KIND)),
            },
            (name, _) => Err(self.mismatch(name, C::KIND)),
        }
    }
}

/// Constructor of one variant.
pub type Construct<T> = fn(Args) -> Result<Box<T>, DprwError>;

/// Registration record of one variant.
pub struct Variant<T: ?Sized> {
    /// Value of the `type` field selecting this variant.
    pub type_name: &'static str,
    /// Parameters decoded from the document, in constructor order.
    pub params: &'static [Param],
    /// Constructor.
    pub construct: Construct<T>,
}

impl<T: ?Sized> Clone for Variant<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Variant<T> {}

impl<T: ?Sized> fmt::Debug for Variant<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variant")
            .field("type_name", &self.type_name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Type name to variant map for one capability.
pub struct Registry<T: ?Sized> {
    capability: &'static str,
    variants: BTreeMap<&'static str, Variant<T>>,
}

impl<T: ?Sized> Registry<T> {
    /// Empty registry for the named capability.
    pub fn new(capability: &'static str) -> Self {
        Self {
            capability,
            variants: BTreeMap::new(),
        }
    }

    /// Capability name.
    pub fn capability(&self) -> &'static str {
        self.capability
    }

    /// Adds a variant. A name that is already taken is an error.
    pub fn register(&mut self, variant: Variant<T>) -> Result<(), DprwError> {
        if self.variants.contains_key(variant.type_name) {
            return Err(DprwError::Config(
                ErrorInfo::new(
                    "duplicate-type",
                    format!(
                        "`{}` is already registered for {}",
                        variant.type_name, self.capability
                    ),
                )
                .with_context("type", variant.type_name)
                .with_context("capability", self.capability),
            ));
        }
        self.variants.insert(variant.type_name, variant);
        Ok(())
    }

    /// Variant registered under `type_name`.
    pub fn get(&self, type_name: &str) -> Option<&Variant<T>> {
        self.variants.get(type_name)
    }

    /// Registered type names in sorted order.
    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.variants.keys().copied()
    }

    /// Number of registered variants.
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

impl<T: ?Sized> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("capability", &self.capability)
            .field("types", &self.variants.keys().collect::<Vec<_>>())
            .finish()
    }
}
