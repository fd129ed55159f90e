// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use fg_adapters::{FakeExecutor, Script};
use fg_core::{approval_marker, AgentStatus, FakeClock, Priority, RamLimits, APPROVED};
use fg_engine::RuntimeConfig;

type TestConsole = Console<FakeExecutor, FakeClock, Vec<u8>>;

fn setup() -> (TestConsole, FakeExecutor) {
    setup_with(RuntimeConfig::default())
}

fn setup_with(config: RuntimeConfig) -> (TestConsole, FakeExecutor) {
    std::env::set_var("NO_COLOR", "1");
    let executor = FakeExecutor::new();
    let runtime = Runtime::new(executor.clone(), FakeClock::new(), config);
    (Console::new(runtime, Vec::new()), executor)
}

fn text(console: &TestConsole) -> String {
    String::from_utf8(console.writer().clone()).unwrap()
}

async fn exec(console: &mut TestConsole, line: &str) -> Flow {
    console.execute(line).await.unwrap()
}

#[tokio::test]
async fn new_matches_multi_word_template() {
    let (mut console, _) = setup();

    exec(&mut console, "new devops engineer Main Console").await;

    let out = text(&console);
    assert!(out.starts_with("Provisioned Main Console ("), "{out}");
    assert!(out.ends_with(") [DevOps Engineer]\n"), "{out}");
    assert!(console.runtime.resolve("Main Console").is_some());
}

#[tokio::test]
async fn new_reports_unknown_template_and_empty_name() {
    let (mut console, _) = setup();

    exec(&mut console, "new Chef Bob").await;
    exec(&mut console, "new Python Coder").await;

    let out = text(&console);
    assert!(out.contains("error: no template matches \"Chef Bob\""), "{out}");
    assert!(out.contains("error: agent name must not be empty"), "{out}");
    assert_eq!(console.runtime.agent_count(), 0);
}

#[tokio::test]
async fn new_applies_ram_and_priority_options() {
    let (mut console, _) = setup();

    exec(&mut console, "new Data Analyst Cruncher --ram 2048 --priority low").await;
    exec(&mut console, "new Data Analyst Hog --ram 4096").await;

    let id = console.runtime.resolve("Cruncher").unwrap();
    let config = console.runtime.get(&id).unwrap().config;
    assert_eq!(config.ram_limit_mb, 2048);
    assert_eq!(config.priority, Priority::Low);
    let out = text(&console);
    assert!(out.contains("error: ram limit 4096MB outside allowed range 128..=2048MB"), "{out}");
    assert_eq!(console.runtime.agent_count(), 1);
}

#[tokio::test]
async fn new_default_ram_fits_a_raised_floor() {
    let limits = RamLimits { min: 1024, max: 4096 };
    let (mut console, _) = setup_with(RuntimeConfig::default().ram_limits(limits));

    exec(&mut console, "new DevOps Engineer Worker").await;

    let id = console.runtime.resolve("Worker").unwrap();
    assert_eq!(console.runtime.get(&id).unwrap().config.ram_limit_mb, 1024);
    assert!(text(&console).starts_with("Provisioned Worker ("));
}

#[tokio::test]
async fn send_runs_in_background_until_wait() {
    let (mut console, executor) = setup();
    exec(&mut console, "new Python Coder A").await;
    executor.script("ls -la", Script::output(&["src\n", "Cargo.toml\n"]));

    exec(&mut console, "send A ls -la").await;
    assert_eq!(console.in_flight(), 1);
    exec(&mut console, "wait").await;

    assert_eq!(console.in_flight(), 0);
    assert!(text(&console).ends_with("[A] done\n"));
    let id = console.runtime.resolve("A").unwrap();
    let export = console.runtime.export(&id).unwrap();
    assert!(export.contains("> ls -la"));
    assert!(export.contains("src\nCargo.toml"));
}

#[tokio::test]
async fn approval_flow_through_console() {
    let (mut console, executor) = setup();
    exec(&mut console, "new DevOps Engineer Main Console").await;
    let marker = approval_marker("rm -rf /tmp/x");
    executor.script("rm -rf /tmp/x", Script::output(&["Analyzing...\n", marker.as_str()]));

    exec(&mut console, r#"send "Main Console" rm -rf /tmp/x"#).await;
    exec(&mut console, "wait").await;
    assert!(text(&console).contains("[Main Console] approval required: rm -rf /tmp/x"));

    exec(&mut console, "send Main Console ls").await;
    assert!(text(&console).contains("is AWAITING_APPROVAL"));

    exec(&mut console, "approve Main Console").await;
    exec(&mut console, "wait").await;

    let id = console.runtime.resolve("Main Console").unwrap();
    assert_eq!(console.runtime.get(&id).unwrap().status, AgentStatus::Idle);
    assert_eq!(executor.commands(), vec!["rm -rf /tmp/x", APPROVED]);
    assert!(text(&console).contains("[Main Console] approved\n"));
}

#[tokio::test]
async fn deny_without_pending_action_is_an_error() {
    let (mut console, _) = setup();
    exec(&mut console, "new Python Coder A").await;

    exec(&mut console, "deny A").await;

    assert!(text(&console).contains("error: agent agt-"));
    assert!(text(&console).contains("has no pending action"));
    assert_eq!(console.in_flight(), 0);
}

#[tokio::test]
async fn unknown_agent_is_reported() {
    let (mut console, _) = setup();

    for line in ["send ghost ls", "show ghost", "clear ghost", "reset ghost", "approve ghost"] {
        exec(&mut console, line).await;
    }

    assert_eq!(text(&console).matches("error: no agent matches \"ghost").count(), 5);
}

#[tokio::test]
async fn clear_reset_and_show() {
    let (mut console, executor) = setup();
    exec(&mut console, "new Python Coder A").await;
    exec(&mut console, "send A pwd").await;
    exec(&mut console, "wait").await;

    exec(&mut console, "clear A").await;
    exec(&mut console, "reset A").await;
    exec(&mut console, "show A").await;

    let out = text(&console);
    assert!(out.contains("Cleared transcript of A"));
    assert!(out.contains("Reset session of A"));
    assert!(out.contains("Agent: A (agt-"));
    assert!(out.contains("logs cleared."));
    assert!(out.contains("Session reset."));
    assert_eq!(executor.resets().len(), 1);
}

#[tokio::test]
async fn ls_events_and_stats() {
    let (mut console, _) = setup();
    exec(&mut console, "new DevOps Engineer ops").await;
    exec(&mut console, "new Security Researcher sec").await;

    exec(&mut console, "ls security").await;
    exec(&mut console, "events").await;
    exec(&mut console, "stats").await;

    let out = text(&console);
    let table: Vec<&str> = out.lines().skip_while(|l| !l.starts_with("ID")).take(2).collect();
    assert!(table[1].contains("Security Researcher"));
    assert_eq!(out.lines().filter(|l| l.contains("DevOps Engineer")).count(), 2);
    assert!(out.contains("agent     Provisioned new agent: ops [DevOps Engineer]"));
    assert!(out.contains("Agents: 2 total, 2 idle"));
    assert!(!out.contains("CPU:"));
}

#[tokio::test]
async fn parse_errors_do_not_stop_the_console() {
    let (mut console, _) = setup();

    assert_eq!(exec(&mut console, "launch").await, Flow::Continue);
    assert_eq!(exec(&mut console, "quit").await, Flow::Quit);
    assert!(text(&console).contains("error: unknown command: launch"));
}

#[tokio::test]
async fn run_stops_at_quit_and_drains_sessions() {
    let (mut console, executor) = setup();
    executor.script("uname", Script::output(&["Linux\n"]));
    let script = b"new Python Coder A\nsend A uname\nquit\nnew Python Coder B\n";

    console.run(&script[..], false).await.unwrap();

    assert_eq!(console.in_flight(), 0);
    assert_eq!(console.runtime.agent_count(), 1);
    assert!(text(&console).contains("[A] done"));
    assert!(!text(&console).contains("fg> "));
}

#[tokio::test]
async fn run_waits_for_sessions_at_end_of_input() {
    let (mut console, executor) = setup();
    executor.script("uname", Script::output(&["Linux\n"]));

    console.run(&b"new Python Coder A\nsend A uname\n"[..], true).await.unwrap();

    let id = console.runtime.resolve("A").unwrap();
    assert_eq!(console.runtime.get(&id).unwrap().status, AgentStatus::Idle);
    assert!(text(&console).starts_with("fg> Provisioned A"));
}
