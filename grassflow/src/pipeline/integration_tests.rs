//! End-to-end runs against real child processes.

#[cfg(all(test, unix))]
mod tests {
    use crate::config::RunnerConfig;
    use crate::core::StageFailure;
    use crate::events::{render_event, CollectingEventSink, ConsoleEventSink, FanoutEventSink};
    use crate::pipeline::{PipelineRunner, ProcessLauncher};
    use crate::stages::{StageGroup, Workflow};
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::Path;
    use std::sync::Arc;

    fn write_script(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    fn sh_runner(dir: &Path) -> (PipelineRunner, Arc<CollectingEventSink>) {
        let config = RunnerConfig::new()
            .with_interpreter("sh")
            .with_working_dir(dir);
        let sink = Arc::new(CollectingEventSink::new());
        let runner = PipelineRunner::new(Arc::new(ProcessLauncher::new(config)), sink.clone());
        (runner, sink)
    }

    #[tokio::test]
    async fn test_failure_in_middle_does_not_stop_run() {
        let dir = tempfile::tempdir().unwrap();
        write_script(dir.path(), "one.sh", "echo one >> trace.log\n");
        write_script(dir.path(), "two.sh", "echo two >> trace.log\nexit 1\n");
        write_script(dir.path(), "three.sh", "echo three >> trace.log\n");

        let workflow = Workflow::new("Scenario").with_group(
            StageGroup::new("Only")
                .with_stage("stage-1", "one.sh")
                .with_stage("stage-2", "two.sh")
                .with_stage("stage-3", "three.sh"),
        );

        let (runner, sink) = sh_runner(dir.path());
        runner.run(&workflow).await;

        let lines: Vec<String> = sink.events().iter().map(render_event).collect();
        assert_eq!(
            lines,
            vec![
                "=== Scenario ===".to_string(),
                "\n[Step 1] Only".to_string(),
                "\n--- Running: stage-1 (one.sh) ---".to_string(),
                "\n--- Running: stage-2 (two.sh) ---".to_string(),
                "Failed to run stage-2: exit status 1".to_string(),
                "\n--- Running: stage-3 (three.sh) ---".to_string(),
                "\n=== All steps completed successfully ===".to_string(),
            ]
        );

        let trace = fs::read_to_string(dir.path().join("trace.log")).unwrap();
        assert_eq!(trace, "one\ntwo\nthree\n");
    }

    #[tokio::test]
    async fn test_missing_interpreter_reports_each_stage_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let config = RunnerConfig::new()
            .with_interpreter("grassflow-no-such-interpreter")
            .with_working_dir(dir.path());
        let sink = Arc::new(CollectingEventSink::new());
        let runner = PipelineRunner::new(Arc::new(ProcessLauncher::new(config)), sink.clone());

        let workflow = Workflow::new("wf")
            .with_group(StageGroup::new("g1").with_stage("a", "a.py"))
            .with_group(StageGroup::new("g2").with_stage("b", "b.py"));

        runner.run(&workflow).await;

        let failures = sink.failures();
        let names: Vec<_> = failures.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(failures
            .iter()
            .all(|(_, f)| matches!(f, StageFailure::Unexpected { .. })));
        assert_eq!(sink.event_types().last(), Some(&"run.completed"));
    }

    #[tokio::test]
    async fn test_missing_working_dir_reports_each_stage_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let (runner, sink) = sh_runner(&dir.path().join("absent"));

        let workflow = Workflow::new("wf")
            .with_group(StageGroup::new("g1").with_stage("a", "a.sh"))
            .with_group(StageGroup::new("g2").with_stage("b", "b.sh"));
        runner.run(&workflow).await;

        let failures = sink.failures();
        let names: Vec<_> = failures.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(failures
            .iter()
            .all(|(_, f)| matches!(f, StageFailure::Unexpected { .. })));
        assert_eq!(sink.event_types().last(), Some(&"run.completed"));
    }

    #[tokio::test]
    async fn test_missing_script_is_exit_status_failure() {
        let dir = tempfile::tempdir().unwrap();
        let (runner, sink) = sh_runner(dir.path());

        let workflow =
            Workflow::new("wf").with_group(StageGroup::new("g").with_stage("ghost", "ghost.sh"));
        runner.run(&workflow).await;

        let failures = sink.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, "ghost");
        assert_eq!(failures[0].1.kind(), "exit_status");
    }

    #[tokio::test]
    async fn test_console_transcript_through_fanout() {
        let dir = tempfile::tempdir().unwrap();
        write_script(dir.path(), "ok.sh", "exit 0\n");

        let console = Arc::new(ConsoleEventSink::new(Vec::new()));
        let collecting = Arc::new(CollectingEventSink::new());
        let fanout = FanoutEventSink::new()
            .with_sink(console.clone())
            .with_sink(collecting.clone());
        let config = RunnerConfig::new()
            .with_interpreter("sh")
            .with_working_dir(dir.path());
        let runner = PipelineRunner::new(Arc::new(ProcessLauncher::new(config)), Arc::new(fanout));

        let workflow =
            Workflow::new("wf").with_group(StageGroup::new("g").with_stage("ok", "ok.sh"));
        runner.run(&workflow).await;
        drop(runner);

        let console = Arc::try_unwrap(console).unwrap();
        let text = String::from_utf8(console.into_inner()).unwrap();
        assert_eq!(
            text,
            "=== wf ===\n\n[Step 1] g\n\n--- Running: ok (ok.sh) ---\n\n=== All steps completed successfully ===\n"
        );
        assert_eq!(collecting.len(), 4);
    }
}
