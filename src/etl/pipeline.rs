//! Pipeline orchestration for ETL operations

use super::{Extractor, Loader, Transformer};
use crate::error::Result;

/// ETL Pipeline that orchestrates Extract, Transform, and Load operations
///
/// Stages run strictly in order. A stage that fails ends the run: later
/// stages are never invoked, and the failure is reported with the stage
/// it came from.
///
/// # Type Parameters
/// - `E`: Extractor type
/// - `T`: Transformer type (must transform from E::Output)
/// - `L`: Loader type (must load T::Output)
///
/// # Example
/// ```no_run
/// use employee_etl::etl::Pipeline;
/// use employee_etl::storage::{SpreadsheetReader, TableWriter};
/// use employee_etl::transform::EmployeeTransformer;
/// use employee_etl::config::Destination;
///
/// # fn example() -> employee_etl::error::Result<()> {
/// let pipeline = Pipeline::new(
///     SpreadsheetReader::new("employees_db.xlsx"),
///     EmployeeTransformer::new(),
///     TableWriter::new(Destination::InMemory, "employees")?,
/// );
///
/// let count = pipeline.run()?;
/// println!("Loaded {} rows", count);
/// # Ok(())
/// # }
/// ```
pub struct Pipeline<E, T, L> {
    extractor: E,
    transformer: T,
    loader: L,
}

impl<E, T, L> Pipeline<E, T, L>
where
    E: Extractor,
    T: Transformer<Input = E::Output>,
    L: Loader<Input = T::Output>,
{
    /// Create a new pipeline
    pub fn new(extractor: E, transformer: T, loader: L) -> Self {
        Self {
            extractor,
            transformer,
            loader,
        }
    }

    /// Run the complete ETL pipeline
    ///
    /// Steps:
    /// 1. Extract the source
    /// 2. Transform the extracted data
    /// 3. Load the result to the destination
    ///
    /// Returns the number of rows loaded
    ///
    /// # Errors
    /// Returns the first stage error; [`crate::error::EtlError::stage`]
    /// tells which stage failed
    pub fn run(&self) -> Result<usize> {
        log::info!("Starting ETL pipeline");

        log::debug!("Extracting from source...");
        let extracted = self.extractor.extract().inspect_err(report)?;
        log::info!("Data extracted successfully");

        log::debug!("Transforming...");
        let transformed = self.transformer.transform(extracted).inspect_err(report)?;
        log::info!("Data successfully transformed");

        log::debug!("Loading to destination...");
        let count = self.loader.load(transformed).inspect_err(report)?;
        log::info!("Loaded {} rows", count);

        Ok(count)
    }
}

fn report(err: &crate::error::EtlError) {
    log::error!("{} failed: {}", err.stage(), err);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EtlError, Stage};
    use std::cell::Cell;
    use std::path::PathBuf;
    use std::rc::Rc;

    struct MockExtractor(Option<Vec<i32>>);

    impl Extractor for MockExtractor {
        type Output = Vec<i32>;
        fn extract(&self) -> Result<Self::Output> {
            self.0.clone().ok_or_else(|| EtlError::EmptyData {
                path: PathBuf::from("mock.csv"),
            })
        }
    }

    struct DoubleTransformer {
        calls: Rc<Cell<usize>>,
        fail: bool,
    }

    impl Transformer for DoubleTransformer {
        type Input = Vec<i32>;
        type Output = Vec<i32>;
        fn transform(&self, input: Self::Input) -> Result<Self::Output> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(EtlError::missing_column("ID"));
            }
            Ok(input.into_iter().map(|i| i * 2).collect())
        }
    }

    struct SumLoader {
        sum: Rc<Cell<i32>>,
        calls: Rc<Cell<usize>>,
    }

    impl Loader for SumLoader {
        type Input = Vec<i32>;
        fn load(&self, items: Self::Input) -> Result<usize> {
            self.calls.set(self.calls.get() + 1);
            self.sum.set(items.iter().sum());
            Ok(items.len())
        }
    }

    struct Counters {
        transform_calls: Rc<Cell<usize>>,
        load_calls: Rc<Cell<usize>>,
        sum: Rc<Cell<i32>>,
    }

    fn pipeline(
        source: Option<Vec<i32>>,
        fail_transform: bool,
    ) -> (Pipeline<MockExtractor, DoubleTransformer, SumLoader>, Counters) {
        let counters = Counters {
            transform_calls: Rc::new(Cell::new(0)),
            load_calls: Rc::new(Cell::new(0)),
            sum: Rc::new(Cell::new(0)),
        };
        let pipeline = Pipeline::new(
            MockExtractor(source),
            DoubleTransformer {
                calls: counters.transform_calls.clone(),
                fail: fail_transform,
            },
            SumLoader {
                sum: counters.sum.clone(),
                calls: counters.load_calls.clone(),
            },
        );
        (pipeline, counters)
    }

    #[test]
    fn test_pipeline() {
        let (pipeline, counters) = pipeline(Some(vec![1, 2, 3]), false);

        let count = pipeline.run().unwrap();
        assert_eq!(count, 3);
        assert_eq!(counters.sum.get(), 12); // (1+2+3)*2 = 12
    }

    #[test]
    fn test_extract_failure_skips_later_stages() {
        let (pipeline, counters) = pipeline(None, false);

        let err = pipeline.run().unwrap_err();
        assert_eq!(err.stage(), Stage::Extract);
        assert_eq!(counters.transform_calls.get(), 0);
        assert_eq!(counters.load_calls.get(), 0);
    }

    #[test]
    fn test_transform_failure_skips_load() {
        let (pipeline, counters) = pipeline(Some(vec![1]), true);

        let err = pipeline.run().unwrap_err();
        assert_eq!(err.stage(), Stage::Transform);
        assert_eq!(counters.transform_calls.get(), 1);
        assert_eq!(counters.load_calls.get(), 0);
        assert_eq!(counters.sum.get(), 0);
    }
}
