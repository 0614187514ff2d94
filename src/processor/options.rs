use crate::error::{ProcessError, Result};
use serde::{Deserialize, Serialize};

/// Bounds the number of row workers.
///
/// `None` lets the scheduler use every available hardware thread. A bound of
/// zero is rejected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParallelOptions {
    pub max_degree_of_parallelism: Option<usize>,
}

impl ParallelOptions {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn bounded(max_threads: usize) -> Result<Self> {
        let options = Self {
            max_degree_of_parallelism: Some(max_threads),
        };
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        match self.max_degree_of_parallelism {
            Some(0) => Err(ProcessError::OutOfRange {
                name: "max_degree_of_parallelism",
                value: 0.0,
                min: 1.0,
                max: f64::INFINITY,
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_threads_is_rejected() {
        assert!(ParallelOptions::bounded(0).is_err());
        assert_eq!(
            ParallelOptions::bounded(2).unwrap().max_degree_of_parallelism,
            Some(2)
        );
    }

    #[test]
    fn deserializes_camel_case_with_defaults() {
        let opts: ParallelOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, ParallelOptions::unbounded());
        let opts: ParallelOptions =
            serde_json::from_str(r#"{"maxDegreeOfParallelism": 3}"#).unwrap();
        assert_eq!(opts.max_degree_of_parallelism, Some(3));
    }
}
