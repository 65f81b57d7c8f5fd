#![deny(missing_docs)]
#![doc = "Pluggable physical components of the spin random walk. Each capability is a trait; the variants here are plain values whose randomness is supplied by the caller."]

pub mod field;
pub mod initial;
pub mod output;
pub mod scattering;
pub mod soc;

pub use field::MagneticField;
pub use initial::{InitialCondition, SpinState};
pub use output::RecordSink;
pub use scattering::{ScatteringEvent, ScatteringModel};
pub use soc::SocModel;

use dprw_core::{DprwError, Vec3};

pub(crate) fn require_finite_vector(name: &str, value: &Vec3) -> Result<(), DprwError> {
    if value.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(DprwError::parameter(
            "non-finite-vector",
            format!("`{name}` must have finite components"),
        )
        .with_context("field", name))
    }
}

pub(crate) fn require_finite(name: &str, value: f64) -> Result<(), DprwError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(
            DprwError::parameter("non-finite", format!("`{name}` must be finite, got {value}"))
                .with_context("field", name),
        )
    }
}
