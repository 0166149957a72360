/// Command-line behaviour that does not need a trained model
mod common;

use anyhow::Result;
use common::*;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_csv_without_seq_column() -> Result<()> {
    let env = TestEnvironment::new()?;
    let input = env.create_input_file("bad.csv", "Name,Sequence\nP1,MKT\n")?;
    let output = env.output_path("out.csv");

    solubench_cmd()
        .env_remove("SOLUBENCH_CONFIG")
        .arg("predict")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--model")
        .arg(env.input_dir.join("model.onnx"))
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("Seq"));

    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_input_errors_exit_with_code_4() -> Result<()> {
    let test_cases = vec![
        ("empty.fasta", ""),
        ("sequences.txt", ">P1\nMKT\n"),
        ("header_only.csv", "Seq\n"),
    ];

    let env = TestEnvironment::new()?;
    for (name, content) in test_cases {
        let input = env.create_input_file(name, content)?;
        let output = env.output_path(&format!("{}.out.csv", name));

        solubench_cmd()
            .env_remove("SOLUBENCH_CONFIG")
            .arg("predict")
            .arg("-i")
            .arg(&input)
            .arg("-o")
            .arg(&output)
            .arg("-m")
            .arg(env.input_dir.join("model.onnx"))
            .assert()
            .failure()
            .code(4)
            .stderr(predicate::str::contains("Error"));

        assert!(!output.exists(), "{}", name);
    }
    Ok(())
}

#[test]
fn test_missing_model_is_config_error() -> Result<()> {
    let env = TestEnvironment::new()?;
    let input = env.create_input_file("in.fasta", &create_simple_fasta(2))?;

    solubench_cmd()
        .env_remove("SOLUBENCH_CONFIG")
        .arg("predict")
        .arg("-i")
        .arg(&input)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--model"));

    solubench_cmd()
        .env_remove("SOLUBENCH_CONFIG")
        .arg("benchmark")
        .arg("--fasta")
        .arg(&input)
        .arg("--out")
        .arg(env.output_path("bench.csv"))
        .assert()
        .failure()
        .code(2);

    Ok(())
}

#[test]
fn test_model_file_not_found() -> Result<()> {
    let env = TestEnvironment::new()?;
    let input = env.create_input_file("in.fasta", &create_simple_fasta(1))?;
    let output = env.output_path("out.csv");

    solubench_cmd()
        .env_remove("SOLUBENCH_CONFIG")
        .arg("predict")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("-m")
        .arg(env.input_dir.join("missing.onnx"))
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("missing.onnx"));

    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_zero_pad_length_rejected() -> Result<()> {
    let env = TestEnvironment::new()?;
    let input = env.create_input_file("in.fasta", &create_simple_fasta(1))?;

    solubench_cmd()
        .env_remove("SOLUBENCH_CONFIG")
        .arg("predict")
        .arg("-i")
        .arg(&input)
        .arg("--pad-length")
        .arg("0")
        .assert()
        .failure()
        .code(2);

    Ok(())
}

#[test]
fn test_config_show_defaults() -> Result<()> {
    solubench_cmd()
        .env_remove("SOLUBENCH_CONFIG")
        .arg("config")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("pad_length = 1200"))
        .stdout(predicate::str::contains("ACDEFGHIKLMNPQRSTVWY"))
        .stdout(predicate::str::contains("DSResSol"));

    solubench_cmd()
        .env_remove("SOLUBENCH_CONFIG")
        .arg("config")
        .arg("show")
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"unknown_code\": 21"));

    Ok(())
}

#[test]
fn test_config_init_and_reload() -> Result<()> {
    let env = TestEnvironment::new()?;
    let path = env.output_path("solubench.toml");

    solubench_cmd()
        .env_remove("SOLUBENCH_CONFIG")
        .arg("config")
        .arg("init")
        .arg(&path)
        .assert()
        .success();
    assert!(path.exists());

    // refuses to overwrite without --force
    solubench_cmd()
        .env_remove("SOLUBENCH_CONFIG")
        .arg("config")
        .arg("init")
        .arg(&path)
        .assert()
        .failure()
        .code(2);

    let edited = fs::read_to_string(&path)?.replace("pad_length = 1200", "pad_length = 800");
    fs::write(&path, edited)?;

    solubench_cmd()
        .arg("--config")
        .arg(&path)
        .arg("config")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("pad_length = 800"));

    Ok(())
}

#[test]
fn test_invalid_config_file() -> Result<()> {
    let env = TestEnvironment::new()?;
    let path = env.create_input_file("broken.toml", "[encoding\npad_length = ")?;

    solubench_cmd()
        .env("SOLUBENCH_CONFIG", &path)
        .arg("config")
        .arg("show")
        .assert()
        .failure()
        .code(2);

    Ok(())
}
