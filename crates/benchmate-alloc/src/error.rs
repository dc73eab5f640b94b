// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::validate::Finding;
use benchmate_model::input::InputError;

/// The error type for an allocation run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    /// The students or halls were rejected before any computation.
    #[error("invalid input: {0}")]
    Input(#[from] InputError),
    /// The produced plan failed validation and must be discarded as a whole.
    #[error("Seating allocation validation failed ({} findings)", .findings.len())]
    Rejected { findings: Vec<Finding> },
}

impl AllocationError {
    /// Returns the validation findings if the plan was rejected.
    #[inline]
    pub fn findings(&self) -> Option<&[Finding]> {
        match self {
            AllocationError::Rejected { findings } => Some(findings),
            AllocationError::Input(_) => None,
        }
    }
}

/// The error type for loading an `AllocatorConfig`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    /// The document is not valid TOML or holds out-of-range values.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_converts() {
        let err: AllocationError = InputError::NoHalls.into();
        assert_eq!(err, AllocationError::Input(InputError::NoHalls));
        assert_eq!(
            err.to_string(),
            "invalid input: No halls provided for seating allocation"
        );
        assert!(err.findings().is_none());
    }

    #[test]
    fn test_rejected_exposes_findings() {
        let err = AllocationError::Rejected {
            findings: vec![Finding::SameDepartment {
                bench_index: 0,
                department: "CS".into(),
            }],
        };
        assert_eq!(err.findings().map(<[Finding]>::len), Some(1));
        assert_eq!(
            err.to_string(),
            "Seating allocation validation failed (1 findings)"
        );
    }
}
