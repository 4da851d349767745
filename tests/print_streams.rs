#![allow(non_snake_case)]

use linipm::{algebra::*, io::ConfigurablePrintTarget, solver::*};

fn test_print_solver() -> LinIpmSolver<f64> {
    let A = CscMatrix::from(&[[1., 1.]]);
    let b = [4.];
    let c = [-1., -2.];
    let settings = LinIpmSettingsBuilder::default()
        .verbose(true)
        .build()
        .unwrap();
    LinIpmSolver::new(&A, &b, &c, settings).unwrap()
}

#[test]
fn test_print_to_stdout() {
    let mut solver = test_print_solver();
    solver.print_to_stdout();
    solver.solve().unwrap();
}

#[test]
fn test_print_to_buffer() {
    let mut solver = test_print_solver();
    solver.print_to_buffer();
    solver.solve().unwrap();
    let result = solver.get_print_buffer().unwrap();
    assert!(result.contains("linipm v"));
    assert!(result.contains("direct / sparselu"));
    assert!(result.contains("iter    pcost"));
    assert!(result.contains("Terminated with status = Solved"));

    // one status line per iteration, numbered from zero
    let nlines = result
        .lines()
        .filter(|l| l.trim_start().starts_with(char::is_numeric))
        .count();
    assert_eq!(nlines as u32, solver.solution.iterations + 1);
}

#[test]
fn test_print_quiet() {
    let mut solver = test_print_solver();
    solver.settings.verbose = false;
    solver.print_to_buffer();
    solver.solve().unwrap();
    assert!(solver.get_print_buffer().unwrap().is_empty());
}

#[test]
fn test_print_to_file() {
    use std::io::{Read, Seek};

    let mut solver = test_print_solver();
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut file2 = file.reopen().unwrap();
    solver.print_to_file(file.into_file());
    solver.solve().unwrap();

    file2.seek(std::io::SeekFrom::Start(0)).unwrap();
    let mut result = String::new();
    file2.read_to_string(&mut result).unwrap();
    assert!(result.contains("linipm v"));
}

#[test]
fn test_print_to_stream() {
    use std::io::{Read, Seek};

    let mut solver = test_print_solver();
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut file2 = file.reopen().unwrap();
    let stream = Box::new(file.into_file());

    solver.print_to_stream(stream);
    solver.solve().unwrap();

    file2.seek(std::io::SeekFrom::Start(0)).unwrap();
    let mut result = String::new();
    file2.read_to_string(&mut result).unwrap();
    assert!(result.contains("Terminated with status"));
}

#[test]
fn test_print_to_sink() {
    let mut solver = test_print_solver();
    solver.print_to_sink();
    solver.solve().unwrap();
    assert!(solver.get_print_buffer().is_err());
}

#[test]
fn test_print_timers() {
    let mut solver = test_print_solver();
    solver.print_to_buffer();
    solver.solve().unwrap();
    solver.print_timers().unwrap();

    let result = solver.get_print_buffer().unwrap();
    assert!(result.contains("solve : "));
    assert!(result.contains("kkt factor : "));
    assert!(solver.info.solve_time > 0.);
}
