use assert_cmd::prelude::*;
use assert_fs::{fixture::FileWriteStr, NamedTempFile};
use std::process::Command;

// We check the --help output in order to confirm that the clap cli is setup correctly.
// Any arguments that are incorrectly will cause clap to panic regardless of the arguments or
// options provided.
// Calling help does not require any application logic so if this tests fails then we know it
// is to do with the clap cli setup code.
#[test]
fn check_clap_cli_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("matfill")?;

    cmd.arg("--help");
    cmd.assert().success();

    Ok(())
}

#[test]
fn check_subcommand_help() -> Result<(), Box<dyn std::error::Error>> {
    for subcommand in ["isbn", "doi", "session"] {
        let mut cmd = Command::cargo_bin("matfill")?;

        cmd.args([subcommand, "--help"]);
        cmd.assert().success();
    }

    Ok(())
}

#[test]
fn missing_config_file_exits_with_error() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("matfill")?;

    cmd.args(["--config", "does/not/exist.toml", "isbn", "9780735619678"]);
    cmd.assert().failure().code(2);

    Ok(())
}

#[test]
fn invalid_config_file_exits_with_error() -> Result<(), Box<dyn std::error::Error>> {
    let file = NamedTempFile::new("matfill.toml")?;
    file.write_str("area = \"admin\"\n")?;

    let mut cmd = Command::cargo_bin("matfill")?;
    cmd.arg("--config").arg(file.path()).args(["doi", "10.1/xyz"]);
    cmd.assert().failure().code(2);

    file.close()?;
    Ok(())
}

#[test]
fn unknown_area_is_rejected_by_the_cli() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("matfill")?;

    cmd.args(["--area", "admin", "isbn", "9780735619678"]);
    cmd.assert().failure();

    Ok(())
}
