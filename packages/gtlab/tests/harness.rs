use std::path::PathBuf;

use gtlab::{
    Case, CaseOutcome, GraphFormat, HarnessConfig, Manifest, Task, TaskInput, TaskParams, harness,
};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("data")
}

fn case(name: &str, task: Task, input: &str, expected: &str) -> Case {
    Case {
        name: name.to_string(),
        task,
        input: PathBuf::from(input),
        format: Some(GraphFormat::EdgeList),
        expected: PathBuf::from(expected),
        params: TaskParams::default(),
    }
}

#[test]
fn fixture_manifest_passes() {
    let config = HarnessConfig {
        tests_dir: data_dir(),
        ..HarnessConfig::default()
    };
    let summary = harness::run(&config).unwrap();
    assert_eq!(summary.total(), 13);
    assert!(summary.all_passed(), "{}", summary.render(false));
}

#[test]
fn mismatches_and_missing_files_are_not_passes() {
    let manifest = Manifest {
        cases: vec![
            case("wrong", Task::MaxFlow, "flow_edges.txt", "mst_ans.txt"),
            case("no-answer", Task::Bipartite, "arc_edges.txt", "missing_ans.txt"),
            case("no-input", Task::Bipartite, "missing.txt", "bipartite_ans.txt"),
        ],
    };
    let summary = harness::run_manifest(&manifest, &data_dir());
    assert_eq!(summary.passed(), 0);
    assert!(matches!(
        &summary.reports[0].outcome,
        CaseOutcome::Failed { actual, .. } if actual.starts_with("Maximum flow value: 7.")
    ));
    assert!(matches!(summary.reports[1].outcome, CaseOutcome::Error(_)));
    assert!(summary.reports[1].actual.is_some());
    assert!(matches!(summary.reports[2].outcome, CaseOutcome::Error(_)));
    assert!(summary.reports[2].actual.is_none());
    assert!(summary.render(false).ends_with("0 of 3 case(s) passed"));
}

#[test]
fn graph_task_without_format_is_an_error() {
    let mut no_format = case("no-format", Task::Bipartite, "cycle4_list.txt", "bipartite_ans.txt");
    no_format.format = None;
    let summary = harness::run_manifest(&Manifest { cases: vec![no_format] }, &data_dir());
    assert!(matches!(
        &summary.reports[0].outcome,
        CaseOutcome::Error(message) if message.contains("format")
    ));
}

#[test]
fn long_maze_route_is_drawn() {
    let input = TaskInput {
        path: data_dir().join("serpentine_maze.txt"),
        format: None,
    };
    let params = TaskParams {
        start: Some((0, 0)),
        goal: Some((8, 24)),
        ..TaskParams::default()
    };
    let report = Task::Maze.run(&input, &params).unwrap();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines[0], "Length of path from (0, 0) to (8, 24): 128");
    assert_eq!(lines.len(), 10);
    assert!(!report.contains("Path:"));
    assert_eq!(lines[1], format!(">{}", ".".repeat(24)));
    assert_eq!(lines[9], format!("{}x", ".".repeat(24)));
}
