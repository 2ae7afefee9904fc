//! Decide whether the local runtime needs the LTS major installed

use std::fmt;

/// Why an install is needed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallReason {
    /// No runtime found, or its version could not be read
    Missing,
    /// A runtime is present but on another major
    Mismatch { current_major: u64 },
}

impl fmt::Display for InstallReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallReason::Missing => write!(f, "Node.js not found"),
            InstallReason::Mismatch { current_major } => {
                write!(f, "Node.js {} is not the current LTS", current_major)
            }
        }
    }
}

/// Outcome of comparing the local runtime against the LTS line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeAction {
    UpToDate,
    Install { major: u64, reason: InstallReason },
}

/// Compare the local major (if any) with the LTS major
pub fn plan(current_major: Option<u64>, lts_major: u64) -> RuntimeAction {
    match current_major {
        Some(current) if current == lts_major => RuntimeAction::UpToDate,
        Some(current) => RuntimeAction::Install {
            major: lts_major,
            reason: InstallReason::Mismatch {
                current_major: current,
            },
        },
        None => RuntimeAction::Install {
            major: lts_major,
            reason: InstallReason::Missing,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_major_is_up_to_date() {
        assert_eq!(plan(Some(20), 20), RuntimeAction::UpToDate);
    }

    #[test]
    fn test_missing_runtime_installs_lts() {
        assert_eq!(
            plan(None, 20),
            RuntimeAction::Install {
                major: 20,
                reason: InstallReason::Missing
            }
        );
    }

    #[test]
    fn test_older_and_newer_majors_install_lts() {
        for current in [16, 18, 21, 22] {
            assert_eq!(
                plan(Some(current), 20),
                RuntimeAction::Install {
                    major: 20,
                    reason: InstallReason::Mismatch {
                        current_major: current
                    }
                }
            );
        }
    }
}
