//! External program execution and the preflight check.

mod preflight;
mod runner;

#[cfg(test)]
pub use runner::MockCommandRunner;
pub use preflight::{PreflightError, check_requirements, missing_tools};
pub use runner::{CommandRunner, Invocation, ProcessError, SystemRunner};

#[cfg(test)]
mod tests {
    use super::*;

    fn tools(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_missing_tools_none_missing() {
        let required = tools(&["aws", "ffmpeg"]);
        assert!(missing_tools(&required, |_| true).is_empty());
    }

    #[test]
    fn test_missing_tools_reports_in_order() {
        let required = tools(&["aws", "ffmpeg", "ffprobe"]);
        let missing = missing_tools(&required, |tool| tool == "ffmpeg");
        assert_eq!(missing, vec!["aws", "ffprobe"]);
    }

    #[test]
    fn test_check_requirements_missing_tool() {
        let required = tools(&["definitely-not-a-real-tool-3f9a"]);
        let result = check_requirements(&required);

        assert_eq!(
            result,
            Err(PreflightError::MissingTool(
                "definitely-not-a-real-tool-3f9a".to_string()
            ))
        );
    }

    #[test]
    fn test_missing_tool_message() {
        let err = PreflightError::MissingTool("ffmpeg".to_string());
        assert_eq!(
            err.to_string(),
            "ffmpeg could not be found. Please install ffmpeg and try again."
        );
    }

    #[test]
    fn test_invocation_builder() {
        let inv = Invocation::new("ffmpeg")
            .arg("-i")
            .args(["in.mp3", "out.mp4"]);

        assert_eq!(inv.program, "ffmpeg");
        assert_eq!(inv.args, vec!["-i", "in.mp3", "out.mp4"]);
        assert_eq!(inv.arg_after("-i"), Some("in.mp3"));
        assert!(inv.has_arg("out.mp4"));
        assert_eq!(inv.arg_after("out.mp4"), None);
    }

    #[test]
    fn test_invocation_display_quotes_spaces() {
        let inv = Invocation::new("aws").args(["--text", "<speak>it's here</speak>"]);
        assert_eq!(inv.to_string(), "aws --text '<speak>it'\\''s here</speak>'");
    }

    #[test]
    fn test_system_runner_spawn_failure() {
        let inv = Invocation::new("definitely-not-a-real-tool-3f9a");
        let result = SystemRunner.run(&inv);

        assert!(matches!(result, Err(ProcessError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_captures_stdout() {
        let inv = Invocation::new("sh").args(["-c", "echo hello"]);
        let out = SystemRunner.run(&inv).unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_nonzero_exit() {
        let inv = Invocation::new("sh").args(["-c", "echo oops >&2; exit 3"]);
        let result = SystemRunner.run(&inv);

        match result {
            Err(ProcessError::Failed { code, stderr, .. }) => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "oops");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }
}
