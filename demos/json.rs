#![allow(non_snake_case)]
use eqkkt::algebra::*;
use eqkkt::solver::*;
use std::fs::File;
use std::io::{Seek, SeekFrom};

fn main() {
    // a small equality constrained problem, written to and read back
    // from json before solving
    let P = CscMatrix::from(&[
        [4., 1.], //
        [1., 2.], //
    ]);
    let A = CscMatrix::from(&[[1., 1.]]);
    let data = LsProblemData::new(P, vec![1., 1.], 0., A, vec![-1.]).unwrap();

    let path = std::env::temp_dir().join("eqkkt_demo.json");
    let mut file = File::create(&path).unwrap();
    data.write_to_file(&mut file, &LsSettings::default()).unwrap();

    let mut file = File::open(&path).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();
    let (data, mut settings) = LsProblemData::<f64>::read_from_file(&mut file).unwrap();

    // override the settings in the loaded file
    settings.verbose = true;

    let mut solver = LsSolver::new(settings).unwrap();
    let result = solver.solve_data(&data).unwrap();

    for (key, value) in result.to_map() {
        println!("{:8} => {:?}", key, value);
    }
}
