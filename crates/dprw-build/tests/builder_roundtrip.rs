use dprw_build::{parse_document, Builder, Catalog, Options};
use dprw_core::vec3;
use dprw_engine::{Measurement, RunSettings, DEFAULT_SEED};
use dprw_model::{field, initial, scattering, soc, InitialCondition, MagneticField, ScatteringModel, SocModel};

fn build<C: dprw_build::Capability + ?Sized>(yaml: &str) -> Box<C> {
    let catalog = Catalog::standard().unwrap();
    let options = Options::new();
    let document = parse_document(yaml).unwrap();
    Builder::new(&catalog, &options).build::<C>(&document).unwrap()
}

fn debug<T: std::fmt::Debug + ?Sized>(value: &T) -> String {
    format!("{value:?}")
}

#[test]
fn initial_conditions_round_trip() {
    let built = build::<dyn InitialCondition>("{type: Polarized3D, spin: [0.25, -1, 2.5]}");
    let direct = initial::Polarized3D::new(vec3(0.25, -1.0, 2.5)).unwrap();
    assert_eq!(debug(built.as_ref()), debug(&direct));

    let built = build::<dyn InitialCondition>("type: Isotropic3D");
    assert_eq!(debug(built.as_ref()), debug(&initial::Isotropic3D));
}

#[test]
fn scattering_round_trips() {
    let built = build::<dyn ScatteringModel>("{type: Isotropic3D, scattering_rate: 12.5}");
    assert_eq!(debug(built.as_ref()), debug(&scattering::Isotropic3D::new(12.5).unwrap()));
}

#[test]
fn field_profiles_round_trip() {
    let built = build::<dyn MagneticField>("type: Zero");
    assert_eq!(debug(built.as_ref()), debug(&field::Zero));

    let built = build::<dyn MagneticField>("{type: Step, field: [0, 0, 3], tstep: 0.5}");
    let direct = field::Step::new(vec3(0.0, 0.0, 3.0), 0.5).unwrap();
    assert_eq!(debug(built.as_ref()), debug(&direct));

    let built = build::<dyn MagneticField>("{type: Echo, tflip: 1.25}");
    assert_eq!(debug(built.as_ref()), debug(&field::Echo::new(1.25).unwrap()));
}

#[test]
fn nested_soc_models_round_trip() {
    let yaml = r#"
type: Stretch
lambdas: [1, 2, 3]
base:
  type: Zeeman
  bfield: [0, 0, 0.5]
  base:
    type: Dresselhaus
    omega: 4
"#;
    let built = build::<dyn SocModel>(yaml);
    let direct = soc::Stretch::new(
        vec3(1.0, 2.0, 3.0),
        Box::new(
            soc::Zeeman::new(vec3(0.0, 0.0, 0.5), Box::new(soc::Dresselhaus::new(4.0).unwrap()))
                .unwrap(),
        ),
    )
    .unwrap();
    assert_eq!(debug(built.as_ref()), debug(&direct));

    let k = vec3(0.3, -0.4, 0.5);
    assert!((built.omega(&k) - direct.omega(&k)).amax() < 1e-12);
}

#[test]
fn measurement_settings_round_trip() {
    let yaml = r#"
type: Ensemble
spin_count: 32
duration: 2
time_step: 0.25
seed: 77
threads: 3
initial_condition: {type: Isotropic3D}
scattering_model: {type: Isotropic3D, scattering_rate: 1}
magnetic_field: {type: Zero}
soc_model: {type: Isotropic3D, omega: 1}
output: {type: Stdout}
"#;
    let built = build::<dyn Measurement>(yaml);
    assert_eq!(built.settings(), &RunSettings::new(32, 77, 3).unwrap());
}

#[test]
fn optional_settings_take_defaults() {
    let yaml = r#"
type: EchoDecay
spin_count: 4
duration: 1
time_step: 0.1
initial_condition: {type: Isotropic3D}
scattering_model: {type: Isotropic3D, scattering_rate: 0}
soc_model: {type: Isotropic3D, omega: 0}
output: {type: Stdout, header: false}
"#;
    let built = build::<dyn Measurement>(yaml);
    assert_eq!(built.settings(), &RunSettings::new(4, DEFAULT_SEED, 1).unwrap());
}
