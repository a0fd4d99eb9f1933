use chrono::{Duration, Utc};
use perfboard::math::point;
use perfboard::{
    BoardError, Execution, Gauge, Preparation, Status, TestBoard, TestDetails, TestRunDraft,
};

fn main() -> Result<(), BoardError> {
    // Set up logging stuff
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", "info");
    env_logger::init_from_env(env);

    let mut board = TestBoard::new();

    let login = board.insert_test(
        TestDetails::new("PT-001", "Login")
            .with_status(Status::Green)
            .with_preparation(Preparation::new(100, 90, 80)?)
            .with_execution(Execution::new(420.0, 500.0)?),
    )?;
    board.insert_test(
        TestDetails::new("PT-002", "Checkout")
            .with_status(Status::Amber)
            .with_note("Waiting on the payment stub")
            .with_preparation(Preparation::new(60, 40, 100)?)
            .with_execution(Execution::new(0.0, 250.0)?),
    )?;

    let end = Utc::now();
    let run = board.add_test_run(
        login,
        TestRunDraft::new(end - Duration::hours(1), end)
            .with_notes("Baseline at 80% of peak load")
            .with_load_runner_url("https://loadrunner.example.com/runs/1"),
    )?;
    log::info!("recorded {run} for PT-001");

    let gauge = Gauge::new(point(60.0, 60.0), 40.0);
    for (_, test) in board.iter() {
        log::info!(
            "{} {} ({:?}): {} runs",
            test.reference(),
            test.name,
            test.status,
            test.test_runs().len()
        );
        println!("{}", test.execution_gauge_svg(&gauge));
        for svg in test.preparation_gauge_svgs(&gauge) {
            println!("{svg}");
        }
    }

    Ok(())
}
