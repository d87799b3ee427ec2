use std::fmt;

use tg_gemm::Verification;

/// Outcome reported at the process boundary.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Passed = 0,
    Failed = 1,
}

impl CheckStatus {
    /// Process exit code: 0 when passed, 1 otherwise.
    pub fn exit_code(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CheckStatus::Passed => "passed",
            CheckStatus::Failed => "failed",
        }
    }
}

impl From<&Verification> for CheckStatus {
    fn from(v: &Verification) -> Self {
        if v.passed {
            CheckStatus::Passed
        } else {
            CheckStatus::Failed
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CheckStatus::Passed.exit_code(), 0);
        assert_eq!(CheckStatus::Failed.exit_code(), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(CheckStatus::Passed.to_string(), "passed");
        assert_eq!(CheckStatus::Failed.to_string(), "failed");
    }
}
