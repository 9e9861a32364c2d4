use assert_cmd::Command;
use predicates::prelude::*;
use rstest::rstest;

const SIMPLE_OPTIONS: &str = "\
--verbose,-v; More output
--output,-o=<path>; default=/dev/stdout; Output file path
--jump,-j=<host>; default=localhost; Host to connect to
--mode=<mode>; Processing mode
";

const POSITIONAL_OPTIONS: &str = "\
source-file; Source file to process
destination; Destination path
--verbose,-v; More output
";

fn bash_std(options: &str, args: &[&str]) -> Command {
    let mut command = Command::cargo_bin("bash-std").unwrap();
    command
        .args(args)
        .env_remove("BASH_STD_IGNORE_UNKNOWN_ARGS")
        .env_remove("BASH_STD_PREFIX")
        .env_remove("BASH_STD_PROGRAM")
        .write_stdin(options);
    command
}

// Runs the `eval` calling convention from a real bash, echoing the variables afterwards.
fn bash_eval(options: &str, args: &[&str], echo_vars: &[&str]) -> Command {
    let echo: Vec<String> = echo_vars
        .iter()
        .map(|v| format!("echo \"{v}=${{{v}}}\""))
        .collect();
    let script = format!(
        "eval \"$(\"$BASH_STD_BIN\" \"$@\" <<< \"$OPTIONS\")\"\n{}\n",
        echo.join("\n")
    );
    let mut command = Command::new("bash");
    command
        .arg("-c")
        .arg(script)
        .arg("script")
        .args(args)
        .env(
            "BASH_STD_BIN",
            assert_cmd::cargo::cargo_bin("bash-std").as_os_str(),
        )
        .env("OPTIONS", options)
        .env_remove("BASH_STD_IGNORE_UNKNOWN_ARGS")
        .env_remove("BASH_STD_PREFIX")
        .env_remove("BASH_STD_PROGRAM");
    command
}

#[test]
fn flag_defaults_to_zero() {
    bash_std(SIMPLE_OPTIONS, &["--mode=fast"])
        .assert()
        .success()
        .stdout(predicate::str::contains("options_verbose=0"));
}

#[rstest]
#[case(&["--mode=fast", "--verbose"])]
#[case(&["--mode=fast", "-v"])]
fn flag_set(#[case] args: &[&str]) {
    bash_std(SIMPLE_OPTIONS, args)
        .assert()
        .success()
        .stdout(predicate::str::contains("options_verbose=1"));
}

#[test]
fn defaults_applied() {
    bash_std(SIMPLE_OPTIONS, &["--mode=fast"])
        .assert()
        .success()
        .stdout(predicate::str::contains("options_output=/dev/stdout"))
        .stdout(predicate::str::contains("options_jump=localhost"))
        .stdout(predicate::str::contains("options_mode=fast"));
}

#[rstest]
#[case(&["--mode=fast", "--output=/tmp/out"])]
#[case(&["--mode=fast", "--output", "/tmp/out"])]
#[case(&["--mode=fast", "-o=/tmp/out"])]
#[case(&["--mode=fast", "-o", "/tmp/out"])]
#[case(&["-o", "/tmp/first", "--mode=fast", "--output=/tmp/out"])]
fn value_forms(#[case] args: &[&str]) {
    bash_std(SIMPLE_OPTIONS, args)
        .assert()
        .success()
        .stdout(predicate::str::contains("options_output=/tmp/out"));
}

#[test]
fn missing_required() {
    bash_std(SIMPLE_OPTIONS, &["--verbose"])
        .assert()
        .code(1)
        .stdout("exit 1\n")
        .stderr(predicate::str::contains("--mode"));
}

#[test]
fn missing_value() {
    bash_std(SIMPLE_OPTIONS, &["--mode=fast", "--output"])
        .assert()
        .code(1)
        .stdout("exit 1\n")
        .stderr(predicate::str::contains("requires a value"));
}

#[test]
fn unknown_argument_causes_failure() {
    bash_std(SIMPLE_OPTIONS, &["--mode=fast", "--not-a-real-flag"])
        .assert()
        .failure()
        .stdout("exit 1\n")
        .stderr(predicate::str::contains("unrecognised"))
        .stderr(predicate::str::contains("--mode=fast --not-a-real-flag\n"));
}

#[test]
fn unknown_argument_ignored_with_env_var() {
    bash_std(SIMPLE_OPTIONS, &["--mode=fast", "--not-a-real-flag"])
        .env("BASH_STD_IGNORE_UNKNOWN_ARGS", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("options_mode=fast"))
        .stderr(predicate::str::is_empty());
}

#[rstest]
#[case(&["--help"])]
#[case(&["-h"])]
#[case(&["--not-a-real-flag", "--help"])]
fn help_exits_zero(#[case] args: &[&str]) {
    bash_std(SIMPLE_OPTIONS, args)
        .env("BASH_STD_PROGRAM", "backup.sh")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("printf '%s\\n' 'usage: backup.sh [-h]"))
        .stdout(predicate::str::ends_with("exit 0\n"))
        .stdout(predicate::str::contains("--output, -o <path>"))
        .stdout(predicate::str::contains("options_").not());
}

#[test]
fn positional_assigned_in_order() {
    bash_std(POSITIONAL_OPTIONS, &["/tmp/in.txt", "/tmp/out.txt"])
        .assert()
        .success()
        .stdout("options_source_file=/tmp/in.txt\noptions_destination=/tmp/out.txt\noptions_verbose=0\n");
}

#[test]
fn positional_mixed_with_flags() {
    bash_std(POSITIONAL_OPTIONS, &["-v", "/tmp/in.txt", "/tmp/out.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("options_source_file=/tmp/in.txt"))
        .stdout(predicate::str::contains("options_destination=/tmp/out.txt"))
        .stdout(predicate::str::contains("options_verbose=1"));
}

#[test]
fn positional_missing() {
    bash_std(POSITIONAL_OPTIONS, &["/tmp/in.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("destination"));
}

#[test]
fn positional_extra() {
    bash_std(POSITIONAL_OPTIONS, &["a", "b", "c"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognised"));
}

#[rstest]
#[case(&["--backup-directory=/data"])]
#[case(&["--backup-dir", "/data"])]
#[case(&["-b=/data"])]
fn aliases(#[case] args: &[&str]) {
    bash_std(
        "--backup-directory,--backup-dir,-b=<dir>; default=/tmp; Backup directory",
        args,
    )
    .assert()
    .success()
    .stdout("options_backup_directory=/data\n");
}

#[test]
fn custom_prefix() {
    bash_std(SIMPLE_OPTIONS, &["--mode=fast"])
        .env("BASH_STD_PREFIX", "backup_")
        .assert()
        .success()
        .stdout(predicate::str::contains("backup_mode=fast"));
}

#[test]
fn invalid_prefix() {
    bash_std(SIMPLE_OPTIONS, &["--mode=fast"])
        .env("BASH_STD_PREFIX", "not-valid")
        .assert()
        .code(2)
        .stdout("exit 2\n")
        .stderr(predicate::str::contains("Binding error"));
}

#[test]
fn spec_malformed() {
    bash_std("--verbose,-v; More output\n--mode=; Processing mode\n", &[])
        .assert()
        .code(2)
        .stdout("exit 2\n")
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn eval_binds_variables() {
    bash_eval(
        SIMPLE_OPTIONS,
        &["--mode", "two words", "-v", "--jump=it's"],
        &["options_mode", "options_verbose", "options_jump"],
    )
    .assert()
    .success()
    .stdout("options_mode=two words\noptions_verbose=1\noptions_jump=it's\n");
}

#[test]
fn eval_help_stops_script() {
    bash_eval(SIMPLE_OPTIONS, &["--help"], &["options_mode"])
        .env("BASH_STD_PROGRAM", "backup.sh")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("usage: backup.sh [-h] [-v]"))
        .stdout(predicate::str::contains(" -h, --help"))
        .stdout(predicate::str::contains("options_mode=").not());
}

#[test]
fn eval_failure_stops_script() {
    bash_eval(SIMPLE_OPTIONS, &["--bogus"], &["options_mode"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unrecognised"));
}
