//! Behavioural tests for the `Engine` dispatcher using rstest-bdd.

#![expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating-point lengths"
)]

use std::cell::RefCell;

use camino::{Utf8Path, Utf8PathBuf};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;
use tourkit::{
    AlgorithmOptions, AlgorithmOutput, ConfigError, Engine, EngineError, Instance, load_instance,
    save_instance,
};

#[derive(Debug)]
struct EngineWorld {
    workspace: TempDir,
    instance: RefCell<Option<Instance>>,
    options: RefCell<AlgorithmOptions>,
    outcome: RefCell<Option<Result<AlgorithmOutput, EngineError>>>,
    reloaded: RefCell<Option<Instance>>,
}

impl EngineWorld {
    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn new() -> Self {
        Self {
            workspace: TempDir::new().expect("create workspace"),
            instance: RefCell::new(None),
            options: RefCell::new(AlgorithmOptions::default()),
            outcome: RefCell::new(None),
            reloaded: RefCell::new(None),
        }
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn instance(&self) -> Instance {
        self.instance
            .borrow()
            .clone()
            .expect("an instance file should be loaded first")
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_output(&self) -> AlgorithmOutput {
        self.outcome
            .borrow()
            .clone()
            .expect("outcome should be recorded before assertions")
            .expect("expected the algorithm to succeed")
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_error(&self) -> EngineError {
        self.outcome
            .borrow()
            .clone()
            .expect("outcome should be recorded before assertions")
            .expect_err("expected the algorithm to fail")
    }
}

fn fixture_path(name: &str) -> Utf8PathBuf {
    Utf8Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn parse_tour(text: &str) -> Vec<usize> {
    text.split_whitespace()
        .filter_map(|city| city.parse().ok())
        .collect()
}

#[fixture]
fn world() -> EngineWorld {
    EngineWorld::new()
}

#[given("the {name} instance file")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn given_instance_file(world: &EngineWorld, name: String) {
    let file = match name.as_str() {
        "square" => "square.tsp",
        "triangle" => "triangle_upper_row.tsp",
        other => panic!("no fixture named {other}"),
    };
    let instance = load_instance(&fixture_path(file)).expect("fixture loads");
    world.instance.replace(Some(instance));
}

#[given("the starting tour {tour}")]
fn given_start_tour(world: &EngineWorld, tour: String) {
    world.options.borrow_mut().start_tour = Some(parse_tour(&tour));
}

#[given("a crossover rate of {rate}")]
fn given_crossover_rate(world: &EngineWorld, rate: f64) {
    world.options.borrow_mut().genetic.crossover_rate = rate;
}

#[when("{algorithm} runs")]
fn when_algorithm_runs(world: &EngineWorld, algorithm: String) {
    let mut engine = Engine::new(world.instance());
    let options = world.options.borrow().clone();
    let outcome = engine.run_algorithm(&algorithm, &options);
    world.outcome.replace(Some(outcome));
}

#[when("the instance is saved and reloaded")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn when_saved_and_reloaded(world: &EngineWorld) {
    let root = Utf8PathBuf::from_path_buf(world.workspace.path().to_path_buf())
        .expect("utf-8 workspace");
    let path = root.join("saved").join("square.tsp");
    save_instance(&world.instance(), &path).expect("save succeeds");
    world
        .reloaded
        .replace(Some(load_instance(&path).expect("saved file loads")));
}

#[then("the final tour is {tour}")]
fn then_final_tour(world: &EngineWorld, tour: String) {
    let output = world.expect_output();
    let last = output.trace().and_then(|trace| trace.last_tour());
    assert_eq!(last, Some(parse_tour(&tour).as_slice()));
}

#[then("the final length is {length}")]
fn then_final_length(world: &EngineWorld, length: f64) {
    let last = world.expect_output().final_length().unwrap_or(f64::NAN);
    assert!((last - length).abs() < 1e-9, "got {last}");
}

#[then("the first length is {length}")]
fn then_first_length(world: &EngineWorld, length: f64) {
    let output = world.expect_output();
    let first = output
        .trace()
        .and_then(|trace| trace.lengths().first().copied())
        .unwrap_or(f64::NAN);
    assert!((first - length).abs() < 1e-9, "got {first}");
}

#[then("the run fails as an unsupported algorithm")]
fn then_unsupported(world: &EngineWorld) {
    let err = world.expect_error();
    assert!(
        matches!(err, EngineError::UnsupportedAlgorithm(ref name) if name == "warp_drive"),
        "{err:?}"
    );
}

#[then("the run fails as an invalid configuration")]
fn then_invalid_configuration(world: &EngineWorld) {
    let err = world.expect_error();
    assert!(
        matches!(
            err,
            EngineError::InvalidConfiguration(ConfigError::RateOutOfRange {
                name: "crossover_rate",
                ..
            })
        ),
        "{err:?}"
    );
}

#[then("the display trace closes every snapshot")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn then_display_closed(world: &EngineWorld) {
    let instance = world.instance();
    let output = world.expect_output();
    let trace = output.trace().expect("construction yields a trace");
    let polylines = trace.points(&instance);
    assert_eq!(polylines.len(), trace.len());
    for (polyline, tour) in polylines.iter().zip(trace.tours()) {
        assert_eq!(polyline.len(), tour.len() + 1);
        assert_eq!(polyline.first(), polyline.last());
    }
}

#[then("the reloaded distances match the original")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn then_reloaded_match(world: &EngineWorld) {
    let reloaded = world.reloaded.borrow().clone().expect("instance reloaded");
    let original = world.instance();
    assert_eq!(reloaded.matrix(), original.matrix());
    assert_eq!(reloaded.info().name, original.info().name);
}

#[scenario(path = "tests/features/engine.feature", index = 0)]
fn nearest_neighbour_perimeter(world: EngineWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/engine.feature", index = 1)]
fn two_opt_repairs_crossing(world: EngineWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/engine.feature", index = 2)]
fn exact_optimum(world: EngineWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/engine.feature", index = 3)]
fn unknown_algorithm(world: EngineWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/engine.feature", index = 4)]
fn genetic_rejects_rate(world: EngineWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/engine.feature", index = 5)]
fn explicit_instance_display(world: EngineWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/engine.feature", index = 6)]
fn save_and_reload(world: EngineWorld) {
    let _ = world;
}
