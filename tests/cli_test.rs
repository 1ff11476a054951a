//! Tests for CLI command dispatch and exit codes

use clap::Parser;
use rstest::rstest;

use hierarchy::cli::{execute_command, Cli, CliError};
use hierarchy::exitcode;

const ORG: &str = "tests/resources/hierarchies/org.toml";

fn run(args: &[&str]) -> Result<(), CliError> {
    let cli = Cli::try_parse_from(std::iter::once("hierarchy").chain(args.iter().copied()))
        .expect("valid arguments");
    execute_command(&cli)
}

#[rstest]
#[case(&["tree", ORG])]
#[case(&["roots", ORG])]
#[case(&["children", ORG])]
#[case(&["children", ORG, "cto"])]
#[case(&["children", ORG, "sre"])]
#[case(&["parent", ORG, "sre"])]
#[case(&["parent", ORG, "ceo"])]
#[case(&["ancestors", ORG, "sre"])]
#[case(&["leaves", ORG])]
#[case(&["branches", ORG])]
#[case(&["check", ORG])]
#[case(&["config", "template"])]
fn given_valid_command_when_executing_then_succeeds(#[case] args: &[&str]) {
    assert!(run(args).is_ok(), "command failed: {args:?}");
}

#[rstest]
#[case::non_member(&["children", ORG, "intern"], exitcode::DATAERR)]
#[case::non_member_parent(&["parent", ORG, "intern"], exitcode::DATAERR)]
#[case::child_first(&["check", "tests/resources/hierarchies/child_first.toml"], exitcode::DATAERR)]
#[case::malformed(&["tree", "tests/resources/hierarchies/malformed.toml"], exitcode::DATAERR)]
#[case::missing_file(&["roots", "tests/resources/hierarchies/missing.toml"], exitcode::IOERR)]
#[case::empty_element(&["ancestors", ORG, " "], exitcode::USAGE)]
#[case::missing_config(&["-C", "/nonexistent/hierarchy.toml", "roots", ORG], exitcode::CONFIG)]
fn given_failing_command_when_executing_then_maps_exit_code(
    #[case] args: &[&str],
    #[case] expected: i32,
) {
    let err = run(args).unwrap_err();
    assert_eq!(err.exit_code(), expected, "error: {err}");
}

#[test]
fn given_no_subcommand_when_executing_then_does_nothing() {
    assert!(run(&[]).is_ok());
}
