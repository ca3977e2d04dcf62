// tests/pipeline.rs

#![cfg(unix)]

mod common;
use crate::common::{FakeExecutor, TreeBuilder, init_tracing};

use std::error::Error;
use std::fs;
use std::process::Command;

use rf::discover::DiscoveryOptions;
use rf::errors::RfError;
use rf::exec::MakeExecutor;
use rf::fs::RealFileSystem;
use rf::{PlanOptions, run_pipeline};

type TestResult = Result<(), Box<dyn Error>>;

fn recursive() -> PlanOptions {
    PlanOptions {
        discovery: DiscoveryOptions { recursive: true },
        check_cycles: false,
    }
}

fn have_gnu_make() -> bool {
    Command::new("make")
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success() && String::from_utf8_lossy(&o.stdout).contains("GNU"))
}

#[tokio::test]
async fn executor_receives_rendered_script() -> TestResult {
    init_tracing();
    let tree = TreeBuilder::new();
    tree.node("a").node("a/b");

    let mut executor = FakeExecutor::new(0);
    let code = run_pipeline(&RealFileSystem, tree.root(), recursive(), &mut executor).await?;

    assert_eq!(code, 0);
    let scripts = executor.scripts();
    assert_eq!(scripts.len(), 1);
    let root = tree.root().display();
    assert!(scripts[0].starts_with(&format!("all: {root}/a/_/nohup.out {root}/a/b/_/nohup.out\n")));
    assert!(scripts[0].contains(&format!("{root}/a/b/_/nohup.out: {root}/a/_/nohup.out\n")));
    Ok(())
}

#[tokio::test]
async fn executor_exit_code_is_returned_verbatim() -> TestResult {
    init_tracing();
    let tree = TreeBuilder::new();
    tree.node("a");

    let mut executor = FakeExecutor::new(42);
    let code = run_pipeline(&RealFileSystem, tree.root(), recursive(), &mut executor).await?;
    assert_eq!(code, 42);
    Ok(())
}

#[tokio::test]
async fn invalid_root_never_reaches_executor() {
    init_tracing();
    let tree = TreeBuilder::new();

    let mut executor = FakeExecutor::new(0);
    let missing = tree.path("missing");
    let result = run_pipeline(&RealFileSystem, &missing, recursive(), &mut executor).await;

    assert!(result.is_err());
    assert!(executor.scripts().is_empty());
}

#[tokio::test]
async fn make_runs_nodes_in_dependency_order() -> TestResult {
    init_tracing();
    if !have_gnu_make() {
        eprintln!("GNU make not available; skipping");
        return Ok(());
    }

    let tree = TreeBuilder::new();
    tree.driver("a", "#!/bin/sh\necho A > ../out.txt\n")
        .driver("a/b", "#!/bin/sh\nset -e\ncat ../../_/out.txt > ../out.txt\necho B >> ../out.txt\n")
        .driver("c", "#!/bin/sh\nset -e\ncat ../../a/b/_/out.txt > ../out.txt\necho C >> ../out.txt\n")
        .link("c", "b", "a/b");

    let mut executor = MakeExecutor::default();
    let code = run_pipeline(&RealFileSystem, tree.root(), recursive(), &mut executor).await?;

    assert_eq!(code, 0);
    assert_eq!(fs::read_to_string(tree.path("a/b/_/out.txt"))?, "A\nB\n");
    assert_eq!(fs::read_to_string(tree.path("c/_/out.txt"))?, "A\nB\nC\n");

    // Everything has started now, so a second pass has nothing to do.
    let mut again = MakeExecutor::default();
    let code = run_pipeline(&RealFileSystem, tree.root(), recursive(), &mut again).await?;
    assert_eq!(code, 0);
    Ok(())
}

#[tokio::test]
async fn failing_driver_fails_the_run() -> TestResult {
    init_tracing();
    if !have_gnu_make() {
        eprintln!("GNU make not available; skipping");
        return Ok(());
    }

    let tree = TreeBuilder::new();
    tree.driver("a", "#!/bin/sh\nexit 3\n").node("a/b");

    let mut executor = MakeExecutor::default();
    let code = run_pipeline(&RealFileSystem, tree.root(), recursive(), &mut executor).await?;

    assert_ne!(code, 0);
    assert!(tree.path("a/_").is_dir());
    assert!(!tree.path("a/b/_").exists(), "dependent must not start after a failure");
    Ok(())
}

#[tokio::test]
async fn make_handles_percent_and_equals_in_node_names() -> TestResult {
    init_tracing();
    if !have_gnu_make() {
        eprintln!("GNU make not available; skipping");
        return Ok(());
    }

    let tree = TreeBuilder::new();
    tree.node("a")
        .node("a/pct%x")
        .node("a/lr=0.1")
        .node("a/lr=0.1/100%")
        .node("c")
        .link("c", "p", "a/pct%x");

    let mut executor = MakeExecutor::default();
    let code = run_pipeline(&RealFileSystem, tree.root(), recursive(), &mut executor).await?;

    assert_eq!(code, 0);
    for node in ["a", "a/pct%x", "a/lr=0.1", "a/lr=0.1/100%", "c"] {
        assert!(tree.path(node).join("_").is_dir(), "{node} did not start");
    }
    Ok(())
}

#[tokio::test]
async fn tab_in_node_name_is_rejected_before_launch() {
    init_tracing();
    let tree = TreeBuilder::new();
    tree.node("a").node("a/odd\tname");

    let mut executor = FakeExecutor::new(0);
    let result = run_pipeline(&RealFileSystem, tree.root(), recursive(), &mut executor).await;

    match result {
        Err(RfError::UnrepresentablePath { path, ch }) => {
            assert_eq!(path, tree.path("a/odd\tname"));
            assert_eq!(ch, '\t');
        }
        other => panic!("expected UnrepresentablePath, got {other:?}"),
    }
    assert!(executor.scripts().is_empty());
    assert!(!tree.path("a/_").exists());
}
