use std::io::IsTerminal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NonInteractiveReason {
    ExplicitDisable,
    CiDetected { env_var: String },
    NoTerminal,
}

pub fn is_interactive() -> bool {
    non_interactive_reason().is_none()
}

pub fn non_interactive_reason() -> Option<NonInteractiveReason> {
    if std::env::var("CHANGEKIT_NO_TTY").is_ok() {
        return Some(NonInteractiveReason::ExplicitDisable);
    }

    if std::env::var("CHANGEKIT_FORCE_TTY").is_ok() {
        return None;
    }

    if let Some(env_var) = detect_ci_env_var() {
        return Some(NonInteractiveReason::CiDetected { env_var });
    }

    if !std::io::stdin().is_terminal() {
        return Some(NonInteractiveReason::NoTerminal);
    }

    None
}

fn detect_ci_env_var() -> Option<String> {
    const CI_ENV_VARS: &[&str] = &[
        "CI",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "CIRCLECI",
        "TRAVIS",
        "JENKINS_URL",
        "BUILDKITE",
        "TF_BUILD",
    ];

    for var in CI_ENV_VARS {
        if std::env::var(var).is_ok() {
            return Some((*var).to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn with_env<F, R>(vars: &[(&str, &str)], clear: &[&str], f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let _guard = ENV_MUTEX.lock().expect("mutex poisoned");

        let mut old_values: Vec<(&str, Option<String>)> = Vec::new();

        for var in clear {
            old_values.push((var, std::env::var(var).ok()));
            // SAFETY: Test code runs sequentially with ENV_MUTEX held.
            unsafe { std::env::remove_var(var) };
        }

        for (key, value) in vars {
            old_values.push((key, std::env::var(key).ok()));
            // SAFETY: Test code runs sequentially with ENV_MUTEX held.
            unsafe { std::env::set_var(key, value) };
        }

        let result = f();

        for (key, old_value) in old_values {
            match old_value {
                // SAFETY: Test code runs sequentially with ENV_MUTEX held.
                Some(v) => unsafe { std::env::set_var(key, v) },
                // SAFETY: Test code runs sequentially with ENV_MUTEX held.
                None => unsafe { std::env::remove_var(key) },
            }
        }

        result
    }

    const ALL_TTY_VARS: &[&str] = &[
        "CI",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "CIRCLECI",
        "TRAVIS",
        "JENKINS_URL",
        "BUILDKITE",
        "TF_BUILD",
        "CHANGEKIT_NO_TTY",
        "CHANGEKIT_FORCE_TTY",
    ];

    #[test]
    fn detects_ci_env_var() {
        with_env(&[("GITHUB_ACTIONS", "true")], ALL_TTY_VARS, || {
            assert_eq!(detect_ci_env_var(), Some("GITHUB_ACTIONS".to_string()));
        });
    }

    #[test]
    fn returns_none_when_no_ci_vars_set() {
        with_env(&[], ALL_TTY_VARS, || {
            assert!(detect_ci_env_var().is_none());
        });
    }

    #[test]
    fn explicit_disable_takes_priority_over_force_tty() {
        with_env(
            &[
                ("CHANGEKIT_NO_TTY", "1"),
                ("CHANGEKIT_FORCE_TTY", "1"),
                ("CI", "true"),
            ],
            ALL_TTY_VARS,
            || {
                assert_eq!(
                    non_interactive_reason(),
                    Some(NonInteractiveReason::ExplicitDisable)
                );
            },
        );
    }

    #[test]
    fn force_tty_takes_priority_over_ci_detection() {
        with_env(
            &[("CI", "true"), ("CHANGEKIT_FORCE_TTY", "1")],
            ALL_TTY_VARS,
            || {
                assert!(non_interactive_reason().is_none());
                assert!(is_interactive());
            },
        );
    }

    #[test]
    fn ci_detection_returns_the_env_var() {
        with_env(&[("CI", "true")], ALL_TTY_VARS, || {
            assert_eq!(
                non_interactive_reason(),
                Some(NonInteractiveReason::CiDetected {
                    env_var: "CI".to_string()
                })
            );
            assert!(!is_interactive());
        });
    }
}
