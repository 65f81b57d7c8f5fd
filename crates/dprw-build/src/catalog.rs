//! The standard set of buildable variants.

use dprw_core::DprwError;
use dprw_engine::{EchoDecay, Ensemble, Measurement, RunSettings, TimeGrid, DEFAULT_SEED};
use dprw_model::{
    field, initial, output, scattering, soc, InitialCondition, MagneticField, RecordSink,
    ScatteringModel, SocModel,
};

use crate::builder::{build_erased, Capability};
use crate::document::KeyPath;
use crate::registry::{Args, Param, ParamKind, Registry, Variant};

/// One registry per capability.
#[derive(Debug)]
pub struct Catalog {
    initial_conditions: Registry<dyn InitialCondition>,
    scattering_models: Registry<dyn ScatteringModel>,
    magnetic_fields: Registry<dyn MagneticField>,
    soc_models: Registry<dyn SocModel>,
    record_sinks: Registry<dyn RecordSink>,
    measurements: Registry<dyn Measurement>,
}

impl Catalog {
    /// Catalog with no variants registered.
    pub fn empty() -> Self {
        Self {
            initial_conditions: Registry::new(<dyn InitialCondition as Capability>::KIND),
            scattering_models: Registry::new(<dyn ScatteringModel as Capability>::KIND),
            magnetic_fields: Registry::new(<dyn MagneticField as Capability>::KIND),
            soc_models: Registry::new(<dyn SocModel as Capability>::KIND),
            record_sinks: Registry::new(<dyn RecordSink as Capability>::KIND),
            measurements: Registry::new(<dyn Measurement as Capability>::KIND),
        }
    }

    /// Catalog with every built-in variant.
    pub fn standard() -> Result<Self, DprwError> {
        let mut catalog = Self::empty();

        catalog.register::<dyn InitialCondition>(Variant {
            type_name: "Isotropic3D",
            params: &[],
            construct: isotropic_initial,
        })?;
        catalog.register::<dyn InitialCondition>(Variant {
            type_name: "Polarized3D",
            params: POLARIZED_3D,
            construct: polarized_initial,
        })?;

        catalog.register::<dyn ScatteringModel>(Variant {
            type_name: "Isotropic3D",
            params: ISOTROPIC_SCATTERING,
            construct: isotropic_scattering,
        })?;

        catalog.register::<dyn MagneticField>(Variant {
            type_name: "Zero",
            params: &[],
            construct: zero_field,
        })?;
        catalog.register::<dyn MagneticField>(Variant {
            type_name: "Step",
            params: STEP_FIELD,
            construct: step_field,
        })?;
        catalog.register::<dyn MagneticField>(Variant {
            type_name: "Echo",
            params: ECHO_FIELD,
            construct: echo_field,
        })?;

        catalog.register::<dyn SocModel>(Variant {
            type_name: "Isotropic3D",
            params: STRENGTH,
            construct: isotropic_soc,
        })?;
        catalog.register::<dyn SocModel>(Variant {
            type_name: "Dresselhaus",
            params: STRENGTH,
            construct: dresselhaus_soc,
        })?;
        catalog.register::<dyn SocModel>(Variant {
            type_name: "Zeeman",
            params: ZEEMAN_SOC,
            construct: zeeman_soc,
        })?;
        catalog.register::<dyn SocModel>(Variant {
            type_name: "Stretch",
            params: STRETCH_SOC,
            construct: stretch_soc,
        })?;

        catalog.register::<dyn RecordSink>(Variant {
            type_name: "CSVFile",
            params: CSV_FILE,
            construct: csv_file,
        })?;
        catalog.register::<dyn RecordSink>(Variant {
            type_name: "Stdout",
            params: STDOUT,
            construct: stdout_sink,
        })?;

        catalog.register::<dyn Measurement>(Variant {
            type_name: "Ensemble",
            params: ENSEMBLE,
            construct: ensemble,
        })?;
        catalog.register::<dyn Measurement>(Variant {
            type_name: "EchoDecay",
            params: ECHO_DECAY,
            construct: echo_decay,
        })?;

        Ok(catalog)
    }

    /// Adds a variant to the registry of capability `C`.
    pub fn register<C: Capability + ?Sized>(&mut self, variant: Variant<C>) -> Result<(), DprwError> {
        C::registry_mut(self).register(variant)
    }

    /// Registry of capability `C`.
    pub fn registry<C: Capability + ?Sized>(&self) -> &Registry<C> {
        C::registry(self)
    }
}

macro_rules! capability {
    ($trait_object:ty, $kind:literal, $field:ident) => {
        impl Capability for $trait_object {
            const KIND: &'static str = $kind;

            fn registry(catalog: &Catalog) -> &Registry<Self> {
                &catalog.$field
            }

            fn registry_mut(catalog: &mut Catalog) -> &mut Registry<Self> {
                &mut catalog.$field
            }
        }
    };
}

capability!(dyn InitialCondition, "initial condition", initial_conditions);
capability!(dyn ScatteringModel, "scattering model", scattering_models);
capability!(dyn MagneticField, "magnetic field", magnetic_fields);
capability!(dyn SocModel, "spin-orbit model", soc_models);
capability!(dyn RecordSink, "record sink", record_sinks);
capability!(dyn Measurement, "measurement", measurements);

fn to_usize(value: u64, name: &str, path: &KeyPath) -> Result<usize, DprwError> {
    usize::try_from(value).map_err(|_| {
        DprwError::parameter("count-overflow", format!("`{name}` = {value} does not fit in usize"))
            .with_context("field", name)
            .with_context("path", path.to_string())
    })
}

const POLARIZED_3D: &[Param] = &[Param::required("spin", ParamKind::Vector)];
const ISOTROPIC_SCATTERING: &[Param] = &[Param::required("scattering_rate", ParamKind::Real)];
const STEP_FIELD: &[Param] = &[
    Param::required("field", ParamKind::Vector),
    Param::required("tstep", ParamKind::Real),
];
const ECHO_FIELD: &[Param] = &[Param::required("tflip", ParamKind::Real)];
const STRENGTH: &[Param] = &[Param::required("omega", ParamKind::Real)];
const ZEEMAN_SOC: &[Param] = &[
    Param::required("bfield", ParamKind::Vector),
    Param::required("base", ParamKind::Nested(build_erased::<dyn SocModel>)),
];
const STRETCH_SOC: &[Param] = &[
    Param::required("lambdas", ParamKind::Vector),
    Param::required("base", ParamKind::Nested(build_erased::<dyn SocModel>)),
];
const CSV_FILE: &[Param] = &[
    Param::required("path", ParamKind::Text),
    Param::optional("header", ParamKind::Flag),
];
const STDOUT: &[Param] = &[Param::optional("header", ParamKind::Flag)];
const ENSEMBLE: &[Param] = &[
    Param::required("spin_count", ParamKind::Count),
    Param::required("duration", ParamKind::Real),
    Param::required("time_step", ParamKind::Real),
    Param::required("initial_condition", ParamKind::Nested(build_erased::<dyn InitialCondition>)),
    Param::required("scattering_model", ParamKind::Nested(build_erased::<dyn ScatteringModel>)),
    Param::required("magnetic_field", ParamKind::Nested(build_erased::<dyn MagneticField>)),
    Param::required("soc_model", ParamKind::Nested(build_erased::<dyn SocModel>)),
    Param::required("output", ParamKind::Nested(build_erased::<dyn RecordSink>)),
    Param::optional("seed", ParamKind::Count),
    Param::optional("threads", ParamKind::Count),
    Param::optional("start_time", ParamKind::Real),
];
const ECHO_DECAY: &[Param] = &[
    Param::required("spin_count", ParamKind::Count),
    Param::required("duration", ParamKind::Real),
    Param::required("time_step", ParamKind::Real),
    Param::required("initial_condition", ParamKind::Nested(build_erased::<dyn InitialCondition>)),
    Param::required("scattering_model", ParamKind::Nested(build_erased::<dyn ScatteringModel>)),
    Param::required("soc_model", ParamKind::Nested(build_erased::<dyn SocModel>)),
    Param::required("output", ParamKind::Nested(build_erased::<dyn RecordSink>)),
    Param::optional("seed", ParamKind::Count),
    Param::optional("threads", ParamKind::Count),
    Param::optional("start_time", ParamKind::Real),
];

fn isotropic_initial(_args: Args) -> Result<Box<dyn InitialCondition>, DprwError> {
    Ok(Box::new(initial::Isotropic3D))
}

fn polarized_initial(mut args: Args) -> Result<Box<dyn InitialCondition>, DprwError> {
    let spin = args.take_vector()?;
    Ok(Box::new(initial::Polarized3D::new(spin)?))
}

fn isotropic_scattering(mut args: Args) -> Result<Box<dyn ScatteringModel>, DprwError> {
    let rate = args.take_real()?;
    Ok(Box::new(scattering::Isotropic3D::new(rate)?))
}

fn zero_field(_args: Args) -> Result<Box<dyn MagneticField>, DprwError> {
    Ok(Box::new(field::Zero))
}

fn step_field(mut args: Args) -> Result<Box<dyn MagneticField>, DprwError> {
    let value = args.take_vector()?;
    let tstep = args.take_real()?;
    Ok(Box::new(field::Step::new(value, tstep)?))
}

fn echo_field(mut args: Args) -> Result<Box<dyn MagneticField>, DprwError> {
    let tflip = args.take_real()?;
    Ok(Box::new(field::Echo::new(tflip)?))
}

fn isotropic_soc(mut args: Args) -> Result<Box<dyn SocModel>, DprwError> {
    let omega = args.take_real()?;
    Ok(Box::new(soc::Isotropic3D::new(omega)?))
}

fn dresselhaus_soc(mut args: Args) -> Result<Box<dyn SocModel>, DprwError> {
    let omega = args.take_real()?;
    Ok(Box::new(soc::Dresselhaus::new(omega)?))
}

fn zeeman_soc(mut args: Args) -> Result<Box<dyn SocModel>, DprwError> {
    let bfield = args.take_vector()?;
    let base = args.take_nested::<dyn SocModel>()?;
    Ok(Box::new(soc::Zeeman::new(bfield, base)?))
}

fn stretch_soc(mut args: Args) -> Result<Box<dyn SocModel>, DprwError> {
    let lambdas = args.take_vector()?;
    let base = args.take_nested::<dyn SocModel>()?;
    Ok(Box::new(soc::Stretch::new(lambdas, base)?))
}

fn csv_file(mut args: Args) -> Result<Box<dyn RecordSink>, DprwError> {
    let path = args.take_text()?;
    let header = args.take_flag_or(true)?;
    Ok(Box::new(output::CsvFile::new(path, header)))
}

fn stdout_sink(mut args: Args) -> Result<Box<dyn RecordSink>, DprwError> {
    let header = args.take_flag_or(true)?;
    Ok(Box::new(output::Stdout::new(header)))
}

/// Shared trailing parameters of both measurements.
fn run_settings(args: &mut Args, spin_count: u64) -> Result<(RunSettings, f64), DprwError> {
    let seed = args.take_count_or(DEFAULT_SEED)?;
    let threads = args.take_count_or(1)?;
    let start_time = args.take_real_or(0.0)?;
    let path = args.path();
    let settings = RunSettings::new(
        to_usize(spin_count, "spin_count", path)?,
        seed,
        to_usize(threads, "threads", path)?,
    )?;
    Ok((settings, start_time))
}

fn ensemble(mut args: Args) -> Result<Box<dyn Measurement>, DprwError> {
    let spin_count = args.take_count()?;
    let duration = args.take_real()?;
    let time_step = args.take_real()?;
    let initial_condition = args.take_nested::<dyn InitialCondition>()?;
    let scattering_model = args.take_nested::<dyn ScatteringModel>()?;
    let magnetic_field = args.take_nested::<dyn MagneticField>()?;
    let soc_model = args.take_nested::<dyn SocModel>()?;
    let output = args.take_nested::<dyn RecordSink>()?;
    let (settings, start_time) = run_settings(&mut args, spin_count)?;
    let grid = TimeGrid::new(start_time, duration, time_step)?;
    Ok(Box::new(Ensemble::new(
        settings,
        grid,
        initial_condition,
        scattering_model,
        magnetic_field,
        soc_model,
        output,
    )))
}

fn echo_decay(mut args: Args) -> Result<Box<dyn Measurement>, DprwError> {
    let spin_count = args.take_count()?;
    let duration = args.take_real()?;
    let time_step = args.take_real()?;
    let initial_condition = args.take_nested::<dyn InitialCondition>()?;
    let scattering_model = args.take_nested::<dyn ScatteringModel>()?;
    let soc_model = args.take_nested::<dyn SocModel>()?;
    let output = args.take_nested::<dyn RecordSink>()?;
    let (settings, start_time) = run_settings(&mut args, spin_count)?;
    let grid = TimeGrid::new(start_time, duration, time_step)?;
    Ok(Box::new(EchoDecay::new(
        settings,
        grid,
        initial_condition,
        scattering_model,
        soc_model,
        output,
    )))
}
