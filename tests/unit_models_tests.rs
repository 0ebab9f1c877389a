//! # Models Module Unit Tests / Models 模块单元测试

use std::path::PathBuf;
use std::time::Duration;

use casper_runner::config::RunConfiguration;
use casper_runner::models::{ExtensionGroup, FileOutcome, InvocationResult, TestFile};

#[cfg(test)]
mod invocation_result_tests {
    use super::*;

    fn exited(code: Option<i32>) -> InvocationResult {
        InvocationResult::Exited {
            code,
            output: "log line\n".to_string(),
        }
    }

    #[test]
    fn test_only_exit_code_zero_is_success() {
        assert!(exited(Some(0)).is_success());
        assert!(!exited(Some(1)).is_success());
        assert!(!exited(Some(-1)).is_success());
        assert!(!exited(None).is_success());
        assert!(!InvocationResult::Failed {
            reason: "boom".to_string()
        }
        .is_success());
    }

    #[test]
    fn test_failure_detail() {
        assert_eq!(exited(Some(0)).failure_detail(), None);
        assert_eq!(exited(Some(7)).failure_detail().as_deref(), Some("exit code 7"));
        assert_eq!(
            exited(None).failure_detail().as_deref(),
            Some("terminated by signal")
        );
        let failed = InvocationResult::Failed {
            reason: "permission denied".to_string(),
        };
        assert_eq!(failed.failure_detail().as_deref(), Some("permission denied"));
        assert_eq!(failed.exit_code(), None);
        assert_eq!(failed.output(), "");
    }
}

#[cfg(test)]
mod test_file_tests {
    use super::*;

    #[test]
    fn test_name_is_the_file_name() {
        let file = TestFile::new(PathBuf::from("/suite/login.coffee"));
        assert_eq!(file.name, "login.coffee");
        assert_eq!(file.to_string(), "login.coffee");
    }

    #[test]
    fn test_file_outcome_from_result() {
        let file = TestFile::new(PathBuf::from("/suite/cart.js"));
        let result = InvocationResult::Exited {
            code: Some(2),
            output: "FAIL\n".to_string(),
        };

        let outcome = FileOutcome::new(
            file,
            ExtensionGroup::JavaScript,
            &result,
            Duration::from_millis(40),
        );

        assert_eq!(outcome.name, "cart.js");
        assert_eq!(outcome.path, PathBuf::from("/suite/cart.js"));
        assert!(!outcome.passed);
        assert_eq!(outcome.exit_code, Some(2));
        assert_eq!(outcome.detail.as_deref(), Some("exit code 2"));
        assert_eq!(outcome.output, "FAIL\n");
    }
}

#[cfg(test)]
mod extension_group_tests {
    use super::*;

    #[test]
    fn test_groups_run_javascript_first() {
        assert_eq!(
            ExtensionGroup::ALL,
            [ExtensionGroup::JavaScript, ExtensionGroup::CoffeeScript]
        );
        assert_eq!(ExtensionGroup::JavaScript.extension(), ".js");
        assert_eq!(ExtensionGroup::CoffeeScript.extension(), ".coffee");
    }

    #[test]
    fn test_groups_follow_configuration_switches() {
        let config = RunConfiguration {
            include_javascript: false,
            ..RunConfiguration::default()
        };
        assert!(!ExtensionGroup::JavaScript.is_enabled(&config));
        assert!(ExtensionGroup::CoffeeScript.is_enabled(&config));
    }
}
