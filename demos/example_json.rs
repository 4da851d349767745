#![allow(non_snake_case)]

use linipm::algebra::*;
use linipm::solver::*;
use std::fs::File;
use std::io::{Seek, SeekFrom};

fn main() {
    let A = CscMatrix::from(&[[1., 1.]]);
    let b = [4.];
    let c = [-1., -2.];

    let settings = LinIpmSettingsBuilder::default()
        .verbose(true)
        .build()
        .unwrap();
    let solver = LinIpmSolver::new(&A, &b, &c, settings).unwrap();

    // write the problem out, then read it back and solve
    let path = std::env::temp_dir().join("linipm_example.json");
    let mut file = File::create(&path).unwrap();
    solver.save_to_file(&mut file).unwrap();

    let mut file = File::open(&path).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();
    let mut solver = LinIpmSolver::<f64>::load_from_file(&mut file).unwrap();
    solver.solve().unwrap();

    println!("x = {:?}", solver.x());
}
