#![allow(non_snake_case)]

use super::{LsProblemData, LsSettings};
use crate::algebra::*;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::io::Write;
use std::{fs::File, io, io::Read};

// problem data and settings, as written to file
#[derive(Serialize, Deserialize)]
#[serde(bound = "T: Serialize + DeserializeOwned")]
struct JsonProblemData<T: FloatT> {
    pub P: CscMatrix<T>,
    pub q: Vec<T>,
    pub r: T,
    pub A: CscMatrix<T>,
    pub b: Vec<T>,
    pub settings: LsSettings<T>,
}

impl<T> LsProblemData<T>
where
    T: FloatT + DeserializeOwned + Serialize,
{
    /// Writes the problem data and solver settings as json
    pub fn write_to_file(&self, file: &mut File, settings: &LsSettings<T>) -> Result<(), io::Error> {
        let json_data = JsonProblemData {
            P: self.P.clone(),
            q: self.q.clone(),
            r: self.r,
            A: self.A.clone(),
            b: self.b.clone(),
            settings: settings.clone(),
        };

        // write to file
        let json = serde_json::to_string(&json_data)?;
        file.write_all(json.as_bytes())?;

        Ok(())
    }

    /// Reads problem data and solver settings written by
    /// [`write_to_file`](LsProblemData::write_to_file).  The data is
    /// checked as in [`new`](LsProblemData::new).
    pub fn read_from_file(file: &mut File) -> Result<(Self, LsSettings<T>), io::Error> {
        // read file
        let mut buffer = String::new();
        file.read_to_string(&mut buffer)?;
        let json_data: JsonProblemData<T> = serde_json::from_str(&buffer)?;

        let JsonProblemData {
            P,
            q,
            r,
            A,
            b,
            settings,
        } = json_data;

        settings
            .validate()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let data = Self::new(P, q, r, A, b)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok((data, settings))
    }
}

#[test]
fn test_json_io() {
    use crate::solver::LsSolver;
    use std::io::{Seek, SeekFrom};

    let P = CscMatrix {
        m: 1,
        n: 1,
        colptr: vec![0, 1],
        rowval: vec![0],
        nzval: vec![2.0],
    };
    let A = CscMatrix {
        m: 1,
        n: 1,
        colptr: vec![0, 1],
        rowval: vec![0],
        nzval: vec![-1.0],
    };
    let data = LsProblemData::new(P, vec![1.0], 0.5, A, vec![-2.0]).unwrap();
    let settings = crate::solver::LsSettingsBuilder::default()
        .iterative_refinement_max_iter(3)
        .build()
        .unwrap();

    // write the problem to a file
    let mut file = tempfile::tempfile().unwrap();
    data.write_to_file(&mut file, &settings).unwrap();

    // read the problem from the file
    file.seek(SeekFrom::Start(0)).unwrap();
    let (data2, settings2) = LsProblemData::<f64>::read_from_file(&mut file).unwrap();
    assert_eq!(data, data2);
    assert_eq!(settings, settings2);

    let mut solver = LsSolver::new(settings).unwrap();
    let mut solver2 = LsSolver::new(settings2).unwrap();
    let result = solver.solve_data(&data).unwrap();
    let result2 = solver2.solve_data(&data2).unwrap();
    assert_eq!(result.primal, result2.primal);
}
