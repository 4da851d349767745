use super::*;
use crate::algebra::*;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::io::Write;
use std::{fs::File, io, io::Read};

// Only the data provided by the user, so that a saved problem
// can be rebuilt with `LinIpmSolver::new`

#[derive(Serialize, Deserialize)]
#[serde(bound = "T: Serialize + DeserializeOwned")]
struct JsonProblemData<T: FloatT> {
    pub A: CscMatrix<T>,
    pub b: Vec<T>,
    pub c: Vec<T>,
    pub settings: LinIpmSettings<T>,
}

impl<T> LinIpmSolver<T>
where
    T: FloatT + DeserializeOwned + Serialize,
{
    /// Write the problem data and settings to `file` as JSON
    pub fn save_to_file(&self, file: &mut File) -> Result<(), io::Error> {
        let json_data = JsonProblemData {
            A: self.data.A.clone(),
            b: self.data.b.clone(),
            c: self.data.c.clone(),
            settings: self.settings.clone(),
        };

        let json = serde_json::to_string(&json_data)?;
        file.write_all(json.as_bytes())?;

        Ok(())
    }

    /// Create a solver from a file written by [`save_to_file`](LinIpmSolver::save_to_file)
    pub fn load_from_file(file: &mut File) -> Result<Self, io::Error> {
        let mut buffer = String::new();
        file.read_to_string(&mut buffer)?;
        let json_data: JsonProblemData<T> = serde_json::from_str(&buffer)?;

        Self::new(&json_data.A, &json_data.b, &json_data.c, json_data.settings)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

#[test]
fn test_json_io() {
    use std::io::{Seek, SeekFrom};

    let A = CscMatrix::from(&[[1., 1., 1.]]);
    let b = [1.0];
    let c = [1.0, 2.0, 3.0];

    let settings = LinIpmSettingsBuilder::default()
        .max_iter(30)
        .build()
        .unwrap();

    let mut solver = LinIpmSolver::<f64>::new(&A, &b, &c, settings).unwrap();
    solver.solve().unwrap();

    // write the problem to a file
    let mut file = tempfile::tempfile().unwrap();
    solver.save_to_file(&mut file).unwrap();

    // read the problem from the file
    file.seek(SeekFrom::Start(0)).unwrap();
    let mut solver2 = LinIpmSolver::<f64>::load_from_file(&mut file).unwrap();
    assert_eq!(solver2.settings, solver.settings);
    assert_eq!(solver2.data.A, solver.data.A);

    solver2.solve().unwrap();
    assert_eq!(solver.solution.x, solver2.solution.x);
}

#[test]
fn test_json_bad_data() {
    use std::io::{Seek, SeekFrom};

    let mut file = tempfile::tempfile().unwrap();
    file.write_all(br#"{"A": 1}"#).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();
    assert!(LinIpmSolver::<f64>::load_from_file(&mut file).is_err());
}
