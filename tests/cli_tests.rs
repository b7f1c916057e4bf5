mod common;

use common::{run_yt_lessons, TestEnv};

#[test]
fn help_shows_usage() {
    let output = run_yt_lessons(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "--help should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("Commands:"));
    assert!(stdout.contains("extract"));
    assert!(stdout.contains("tui"));
}

#[test]
fn version_shows_version() {
    let output = run_yt_lessons(&["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "--version should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("yt-lessons "));
}

#[test]
fn completions_bash_outputs_script() {
    let output = run_yt_lessons(&["completions", "bash"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "completions bash should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(
        stdout.contains("yt-lessons"),
        "expected completion output to reference command name\nstdout:\n{}",
        stdout
    );
}

#[test]
fn config_show_works() {
    let output = run_yt_lessons(&["config", "show"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "config show should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("[llm]"));
    assert!(stdout.contains("gemini-2.5-flash"));
    assert!(
        !stderr.contains("No config file found"),
        "config show should not log config fallback noise by default\nstderr:\n{}",
        stderr
    );
}

#[test]
fn config_show_masks_api_key() {
    let env = TestEnv::new();
    env.write_config("[llm]\napi_key = \"very-secret\"\n");

    let output = env.run(&["config", "show"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(!stdout.contains("very-secret"));
    assert!(stdout.contains("********"));
}

#[test]
fn config_path_returns_valid_path() {
    let output = run_yt_lessons(&["config", "path"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "config path should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("config.toml"));
}

#[test]
fn config_init_refuses_to_overwrite_without_force() {
    let env = TestEnv::new();

    let first = env.run(&["config", "init"]);
    assert!(first.status.success());
    assert!(env.config_path().exists());

    let second = env.run(&["config", "init"]);
    assert!(!second.status.success());
    assert!(String::from_utf8_lossy(&second.stderr).contains("--force"));

    let forced = env.run(&["config", "init", "--force"]);
    assert!(forced.status.success());
}

#[test]
fn prompt_show_prints_builtin_template() {
    let output = run_yt_lessons(&["prompt", "show"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("{transcript}"));
    assert!(stdout.contains("<markdown>"));
}

#[test]
fn prompt_check_reports_missing_markers() {
    let env = TestEnv::new();
    let good = env.scratch_file("good.txt", "Lessons from {transcript} in <markdown></markdown>");
    let bad = env.scratch_file("bad.txt", "Summarize this.");

    let output = env.run(&["prompt", "check", good.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(": ok"));

    let output = env.run(&["prompt", "check", bad.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!output.status.success());
    assert!(stdout.contains("{transcript}"), "stdout:\n{}", stdout);
    assert!(stdout.contains("<markdown>"), "stdout:\n{}", stdout);
}

#[test]
fn extract_rejects_url_without_video_id() {
    let output = run_yt_lessons(&["extract", "https://youtu.be/dQw4w9WgXcQ", "-k", "key"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(
        stderr.contains("Could not parse a video id"),
        "stderr:\n{}",
        stderr
    );
}

#[test]
fn env_api_key_fills_missing_config_key() {
    let env = TestEnv::new();

    let output = env.run_with_env(
        &["config", "show"],
        &[("YT_LESSONS_GEMINI_API_KEY", "env-secret-key-9876")],
    );
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(!stdout.contains("env-secret-key-9876"));
    assert!(stdout.contains("********9876"), "stdout:\n{}", stdout);
}

#[test]
fn env_api_key_does_not_replace_configured_key() {
    let env = TestEnv::new();
    env.write_config("[llm]\napi_key = \"config-secret-key-1111\"\n");

    let output = env.run_with_env(
        &["config", "show"],
        &[("YT_LESSONS_GEMINI_API_KEY", "env-secret-key-9876")],
    );
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("********1111"), "stdout:\n{}", stdout);
    assert!(!stdout.contains("9876"), "stdout:\n{}", stdout);
}

#[test]
fn prompt_file_flag_skips_configured_template_file() {
    let env = TestEnv::new();
    env.write_config("[prompt]\ntemplate_file = \"/definitely/not/here.txt\"\n");
    let template = env.scratch_file("template.txt", "Use {transcript} in <markdown></markdown>");

    let without_flag = env.run(&["extract", "https://youtu.be/abc", "-k", "key"]);
    assert!(!without_flag.status.success());
    assert!(String::from_utf8_lossy(&without_flag.stderr).contains("Failed to read prompt template"));

    let with_flag = env.run(&[
        "extract",
        "https://youtu.be/abc",
        "-k",
        "key",
        "-p",
        template.to_str().unwrap(),
    ]);
    let stderr = String::from_utf8_lossy(&with_flag.stderr);
    assert!(!with_flag.status.success());
    assert!(!stderr.contains("Failed to read prompt template"), "stderr:\n{}", stderr);
    assert!(stderr.contains("Could not parse a video id"), "stderr:\n{}", stderr);
}
