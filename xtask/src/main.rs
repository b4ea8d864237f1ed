//! Developer workflow tasks for the github-to-catalog workspace.

use std::{
    env,
    path::Path,
    process::{Command, ExitCode, Stdio},
};

/// Usage line printed for unknown tasks.
const USAGE: &str = "Usage: cargo xtask <tidy|test|ci>";

fn main() -> ExitCode {
    let Some(task) = parse_command() else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    let steps: &[fn() -> bool] = match task {
        Task::Tidy => &[run_fmt, run_clippy_fix],
        Task::Test => &[run_tests],
        Task::Ci => &[run_fmt_check, run_clippy_strict, run_tests],
    };

    if steps.iter().all(|step| step()) {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

enum Task {
    /// Format and apply clippy fixes.
    Tidy,
    /// Run the test suite.
    Test,
    /// Check formatting and lints without modifying files, then test.
    Ci,
}

fn parse_command() -> Option<Task> {
    let mut args = env::args().skip(1);
    let task = match args.next().as_deref() {
        Some("tidy") => Task::Tidy,
        Some("test") => Task::Test,
        Some("ci") => Task::Ci,
        _ => return None,
    };
    args.next().is_none().then_some(task)
}

/// Build `cargo +nightly fmt` arguments, honoring a nightly rustfmt config.
fn fmt_args(check: bool) -> Vec<&'static str> {
    let mut args = vec!["+nightly", "fmt", "--all"];
    let config = Path::new("rustfmt-nightly.toml").exists();
    if check || config {
        args.push("--");
    }
    if check {
        args.push("--check");
    }
    if config {
        args.extend(["--config-path", "./rustfmt-nightly.toml"]);
    }
    args
}

fn run_fmt() -> bool {
    run_command("cargo", &fmt_args(false))
}

fn run_fmt_check() -> bool {
    run_command("cargo", &fmt_args(true))
}

fn run_clippy_fix() -> bool {
    run_command(
        "cargo",
        &[
            "clippy",
            "-q",
            "--fix",
            "--all",
            "--all-targets",
            "--allow-dirty",
            "--tests",
        ],
    )
}

fn run_clippy_strict() -> bool {
    run_command(
        "cargo",
        &[
            "clippy",
            "-q",
            "--all",
            "--all-targets",
            "--",
            "-D",
            "warnings",
        ],
    )
}

fn run_tests() -> bool {
    run_command("cargo", &["test", "-q", "--all"])
}

fn run_command(program: &str, args: &[&str]) -> bool {
    match Command::new(program)
        .args(args)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
    {
        Ok(status) if status.success() => true,
        Ok(status) => {
            eprintln!("Command `{program}` failed with status {status}");
            false
        }
        Err(err) => {
            eprintln!("Failed to run `{program}`: {err}");
            false
        }
    }
}
