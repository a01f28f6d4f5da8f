use std::fs;

use bend_mesh::io::table::Table;
use bend_mesh::post::distribution::{ACCUMULATED_COLUMNS, DISTRIBUTION_COLUMNS};
use bend_mesh::post::{
    CoefficientHistory, LiftDistribution, ResidualHistory, relative_error_percent,
};

const SOLVER_LOG: &str = "\
/*---------------------------------------------------------------------------*\\
Create time

Starting time loop

Time = 1

smoothSolver:  Solving for Ux, Initial residual = 1, Final residual = 0.0421, No Iterations 3
smoothSolver:  Solving for Uy, Initial residual = 1, Final residual = 0.0388, No Iterations 3
GAMG:  Solving for p, Initial residual = 1, Final residual = 0.0079, No Iterations 7
smoothSolver:  Solving for omega, Initial residual = 0.0031, Final residual = 0.0001, No Iterations 2
smoothSolver:  Solving for k, Initial residual = 1, Final residual = 0.0412, No Iterations 3
ExecutionTime = 0.51 s  ClockTime = 1 s

Time = 2

smoothSolver:  Solving for Ux, Initial residual = 0.31, Final residual = 0.0107, No Iterations 3
smoothSolver:  Solving for Uy, Initial residual = 0.42, Final residual = 0.0151, No Iterations 3
GAMG:  Solving for p, Initial residual = 0.25, Final residual = 0.0022, No Iterations 6
ExecutionTime = 0.93 s  ClockTime = 1 s

End
";

#[test]
fn residual_log_to_table_file() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("log");
    fs::write(&log, SOLVER_LOG).unwrap();

    let history = ResidualHistory::read(&log).unwrap();
    assert_eq!(history.times, vec![1, 2]);
    assert_eq!(history.variables, vec!["Ux", "Uy", "p", "omega", "k"]);
    assert_eq!(history.variable("omega").unwrap(), &[Some(0.0001), Some(0.0001)]);
    assert_eq!(history.variable("p").unwrap(), &[Some(0.0079), Some(0.0022)]);

    let out = dir.path().join("residuals.tsv");
    history.to_table().write(&out).unwrap();
    let text = fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("# time\tUx\tUy\tp\tomega\tk\n"));
    assert!(text.contains("\n2.000000\t0.010700\t0.015100\t0.002200\t0.000100\t0.041200\n"));
}

#[test]
fn missing_log_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    assert!(ResidualHistory::read(dir.path().join("log")).is_err());
}

#[test]
fn lift_tables_round_trip_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("distribution_lift_data.txt");
    fs::write(
        &input,
        "# x (m)\tLift (N)\n0.000000\t10.000000\n0.010000\t20.000000\n0.020000\t30.000000\n",
    )
    .unwrap();

    let dist = LiftDistribution::read(&input, 0.01).unwrap();
    let accumulated = dist.accumulated();
    assert!((accumulated[2] - 0.6).abs() < 1e-12);
    assert!((dist.integrated() - 0.4).abs() < 1e-12);

    let out = dir.path().join("accumulated_lift_data.txt");
    dist.accumulated_table().unwrap().write(&out).unwrap();
    let back = Table::read(&out).unwrap();
    assert_eq!(back.columns, ACCUMULATED_COLUMNS);
    assert_eq!(back.rows.len(), 3);
    assert!((back.rows[2][1] - 0.6).abs() < 1e-9);

    let raw = dist.distribution_table().unwrap();
    assert_eq!(raw.columns, DISTRIBUTION_COLUMNS);
}

#[test]
fn integrated_error_against_direct_total() {
    let dist = LiftDistribution::new(vec![0.0, 1.0], vec![2.0, 2.0], 1.0).unwrap();
    let err = relative_error_percent(dist.integrated(), 2.5).unwrap();
    assert!((err + 20.0).abs() < 1e-12);
    assert_eq!(relative_error_percent(dist.integrated(), 0.0), None);
}

#[test]
fn coefficient_file_to_table() {
    let dir = tempfile::tempdir().unwrap();
    let dat = dir.path().join("coefficient.dat");
    fs::write(
        &dat,
        "# Force coefficients\n# Time Cd Cs Cl CmRoll\n1 0.61 0.0 -1.5 0.01\n2 0.58 0.0 -1.4 0.01\n",
    )
    .unwrap();
    let history = CoefficientHistory::read(&dat).unwrap();
    assert_eq!(history.iterations, vec![1, 2]);
    assert_eq!(history.last(), Some((0.58, -1.4)));
    let table = history.to_table().unwrap();
    assert_eq!(table.rows[0], vec![1.0, 0.61, -1.5]);
}
