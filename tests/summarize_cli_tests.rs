mod common;

use common::TestEnv;

#[test]
fn summarize_subcommand_is_available() {
    let output = TestEnv::new().run(&["summarize", "--help"]);

    assert!(
        output.status.success(),
        "summarize --help should succeed\nstdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn summarize_reports_missing_file() {
    let output = TestEnv::new().run(&["summarize", "does-not-exist.txt"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to read transcript"),
        "expected missing file error, got:\n{}",
        stderr
    );
}

#[test]
fn summarize_rejects_empty_transcript() {
    let env = TestEnv::new();
    env.write_file("empty.txt", "  \n\n");

    let output = env.run(&["summarize", "empty.txt"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Transcript is empty"));
}

#[test]
fn summarize_rejects_unknown_format() {
    let env = TestEnv::new();
    env.write_file("meeting.txt", "Bob moved to approve the budget.");

    let output = env.run(&["summarize", "meeting.txt", "--format", "xml"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unsupported format"));
}

#[test]
fn summarize_requires_api_key() {
    let env = TestEnv::new();

    let output = env.run_with_stdin(&["summarize"], "Bob moved to approve the budget.");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Gemini API key is missing"),
        "expected missing api key error, got:\n{}",
        stderr
    );
}
