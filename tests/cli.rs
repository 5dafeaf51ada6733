use std::process::Command;

use anyhow::Result;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use rstest::*;

macro_rules! cargo_run {
    ($cmd:expr, $($args:expr),*) => {
        {
            let mut cmd = Command::cargo_bin($cmd)?;
            $(cmd.arg($args);)*
            cmd.assert()
        }
    };
}

#[rstest]
#[case("sqlite")]
#[case("json")]
fn import_like_recommend(#[case] backend: &str) -> Result<()> {
    let conf_dir = assert_fs::TempDir::new()?;
    let c = conf_dir.path();

    cargo_run!("imrec", "-c", c, "-b", backend, "import", "tests/data/metadata.json").success();
    cargo_run!("imrec", "-c", c, "-b", backend, "like", "1", "A.jpg").success();

    let output = cargo_run!(
        "imrec", "-c", c, "-b", backend, "recommend", "1", "-m", "content", "--output-format", "json"
    )
    .success()
    .get_output()
    .stdout
    .clone();
    let result: Vec<String> = serde_json::from_slice(&output)?;
    assert_eq!(result, vec!["B.jpg", "C.jpg", "D.jpg"]);

    cargo_run!("imrec", "-c", c, "-b", backend, "show", "1")
        .success()
        .stdout(predicate::str::contains("A.jpg"));

    Ok(())
}

#[test]
fn import_legacy_preferences() -> Result<()> {
    let conf_dir = assert_fs::TempDir::new()?;
    let c = conf_dir.path();

    cargo_run!(
        "imrec",
        "-c",
        c,
        "import",
        "tests/data/metadata.json",
        "-p",
        "tests/data/user_preferences.json"
    )
    .success();

    cargo_run!("imrec", "-c", c, "recommend", "1", "-m", "collaborative")
        .success()
        .stdout(predicate::str::contains("C.jpg"))
        .stdout(predicate::str::contains("A.jpg").not());

    cargo_run!("imrec", "-c", c, "recommend", "1", "--alpha", "0.5", "--count", "1")
        .success()
        .stdout(predicate::str::is_match("^1\tB.jpg\n$")?);

    Ok(())
}

#[test]
fn cold_start_is_not_an_error() -> Result<()> {
    let conf_dir = assert_fs::TempDir::new()?;
    let c = conf_dir.path();

    cargo_run!("imrec", "-c", c, "recommend", "7").success().stdout(predicate::str::is_empty());
    cargo_run!("imrec", "-c", c, "recommend", "7", "-m", "collaborative", "--output-format", "json")
        .success()
        .stdout(predicate::str::contains("[]"));

    Ok(())
}

#[test]
fn invalid_alpha_is_rejected() -> Result<()> {
    let conf_dir = assert_fs::TempDir::new()?;
    cargo_run!("imrec", "-c", conf_dir.path(), "recommend", "1", "--alpha", "2")
        .failure()
        .stderr(predicate::str::contains("alpha"));
    Ok(())
}

#[test]
fn import_requires_input() -> Result<()> {
    let conf_dir = assert_fs::TempDir::new()?;
    cargo_run!("imrec", "-c", conf_dir.path(), "import").failure();
    Ok(())
}

#[test]
fn export_tfidf() -> Result<()> {
    let conf_dir = assert_fs::TempDir::new()?;
    let c = conf_dir.path();
    let output = c.join("tfidf.npy");

    cargo_run!("imrec", "-c", c, "import", "tests/data/metadata.json").success();
    cargo_run!("imrec", "-c", c, "export", "-o", &output).success();

    assert!(output.exists());
    let meta: serde_json::Value =
        serde_json::from_slice(&std::fs::read(output.with_extension("json"))?)?;
    assert_eq!(meta["ids"][0], "A.jpg");
    assert_eq!(meta["vocabulary"].as_array().map(Vec::len), Some(5));
    Ok(())
}
