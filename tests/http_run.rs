use std::fs;

use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use clap::Parser;
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::net::TcpListener;
use woodpecker::{
    AggregatedResult, Executor, HttpExecutor, PeckConfig, PeckDefinition, RunOpts, Runner, Selector, Target, Verb,
    cli::PeckCli,
    reporter::{JsonReporter, ResultReporter},
};

/// Serves a few fixed routes on an ephemeral port and returns the base URL.
async fn serve() -> String {
    let app = Router::new()
        .route("/ok", get(|| async { "ok" }))
        .route("/fail", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route(
            "/echo",
            post(|Json(body): Json<Value>| async move {
                if body == json!({"foo": "bar"}) { StatusCode::OK } else { StatusCode::BAD_REQUEST }
            }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_executor_classifies_responses() {
    let base = serve().await;
    let exec = HttpExecutor::new();

    assert!(exec.execute(&base, Verb::Get, &Target::get("/ok")).await.success);
    assert!(!exec.execute(&base, Verb::Get, &Target::get("/fail")).await.success);
    assert!(!exec.execute(&base, Verb::Get, &Target::get("/missing")).await.success);

    let echo = Target::post("/echo", Some(json!({"foo": "bar"})));
    assert!(exec.execute(&base, Verb::Post, &echo).await.success);

    let wrong = Target::post("/echo", Some(json!({"foo": "baz"})));
    assert!(!exec.execute(&base, Verb::Post, &wrong).await.success);

    // no body means no JSON content type, which the route rejects
    assert!(!exec.execute(&base, Verb::Post, &Target::post("/echo", None)).await.success);
}

#[tokio::test]
async fn test_unreachable_target_is_a_failed_hit() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let hit = HttpExecutor::new().execute(&base, Verb::Get, &Target::get("/ok")).await;
    assert!(!hit.success);
}

#[tokio::test]
async fn test_runner_json_report_round_trip() {
    let base = serve().await;
    let pecks = vec![
        PeckDefinition::without_hooks(Target::get("/ok"), PeckConfig::new(100, false)).unwrap(),
        PeckDefinition::without_hooks(Target::get("/fail"), PeckConfig::new(100, false)).unwrap(),
        PeckDefinition::without_hooks(Target::post("/echo", Some(json!({"foo": "bar"}))), PeckConfig::new(0, true))
            .unwrap(),
        PeckDefinition::without_hooks(Target::get("/ok"), PeckConfig::new(0, false)).unwrap(),
    ];
    let mut runner = Runner::new(RunOpts { base_url: base, count: 4 }, pecks, HttpExecutor::new(), Selector::seeded(7));
    let results = runner.run().await.unwrap().finalize();

    let summary: Vec<_> = results.iter().map(|r| (r.path.as_str(), r.hits, r.successes, r.failures)).collect();
    assert_eq!(summary, [("/ok", 4, 4, 0), ("/fail", 4, 0, 4), ("/echo", 1, 1, 0), ("/ok", 0, 0, 0)]);
    assert!(results[0].avg_ms.is_some());
    assert_eq!(results[3].avg_ms, None);

    let mut out = Vec::new();
    JsonReporter.print(&mut out, &results).unwrap();
    let parsed: Vec<AggregatedResult> = serde_json::from_slice(&out).unwrap();
    assert_eq!(parsed, results);
}

#[tokio::test]
async fn test_cli_run_writes_report() {
    let base = serve().await;
    let dir = TempDir::new().unwrap();
    let pecks = dir.path().join("pecks");
    fs::create_dir_all(pecks.join("meta")).unwrap();
    fs::write(
        pecks.join("meta/ok.toml"),
        "[target]\nmethod = \"GET\"\npath = \"/ok\"\n\n[config]\nchance = 100\nat_least_once = true\n",
    )
    .unwrap();
    fs::write(
        pecks.join("never.json"),
        r#"{"target": {"method": "POST", "path": "/echo", "body": null}, "config": {"chance": 0}}"#,
    )
    .unwrap();

    let csv = dir.path().join("report.csv");
    let base_arg = format!("{base}/");
    let cli = PeckCli::try_parse_from([
        "woodpecker",
        base_arg.as_str(),
        "--count",
        "3",
        "--pecks",
        pecks.to_str().unwrap(),
        "--report",
        csv.to_str().unwrap(),
        "--type",
        "csv",
        "--seed",
        "1",
        "--no-color",
    ])
    .unwrap();
    woodpecker::cli::run(cli).await.unwrap();

    let report = fs::read_to_string(&csv).unwrap();
    let lines: Vec<_> = report.lines().collect();
    assert_eq!(lines[0], "Method,Path,# of Hits,# of Successes,# of Failures,Average Duration");
    assert!(lines[1].starts_with("GET,/ok,3,3,0,"), "{}", lines[1]);
    assert_eq!(lines[2], "POST,/echo,0,0,0,");
    assert_eq!(lines.len(), 3);
}

#[tokio::test]
async fn test_cli_rejects_bad_base_url_before_loading() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist");
    let cli = PeckCli::try_parse_from(["woodpecker", "///", "--pecks", missing.to_str().unwrap()]).unwrap();

    let err = woodpecker::cli::run(cli).await.unwrap_err();
    assert!(err.to_string().contains("missing base URL"), "{err}");
}
