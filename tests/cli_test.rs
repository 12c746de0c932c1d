use assert_cmd::Command;
use predicates::prelude::*;

type STDRESULT = Result<(), Box<dyn std::error::Error>>;

fn cmd() -> Command {
    Command::cargo_bin("emtf-core").unwrap()
}

#[test]
fn geometry_dumps_layer_count() -> STDRESULT {
    cmd()
        .arg("geometry")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"nlayers\":16"));
    Ok(())
}

#[test]
fn bank_reports_shape_of_a_freshly_saved_bank() -> STDRESULT {
    use emtf_core::bank::{PatternBank, NETA, NLAYERS, NPT};

    let count = NPT * NETA * NLAYERS;
    let bank = PatternBank::from_flat(vec![0i32; count * 3], vec![0i32; count * 3]).unwrap();
    let dir = tempfile::tempdir()?;
    let bank_path = dir.path().join("bank.bin");
    std::fs::write(&bank_path, bank.save()?)?;

    cmd()
        .arg("bank")
        .arg("-b")
        .arg(&bank_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"cells_populated\":0"));
    Ok(())
}

#[test]
fn run_rejects_a_missing_event_file() -> STDRESULT {
    use emtf_core::bank::{PatternBank, NETA, NLAYERS, NPT};

    let count = NPT * NETA * NLAYERS;
    let bank = PatternBank::from_flat(vec![0i32; count * 3], vec![0i32; count * 3]).unwrap();
    let dir = tempfile::tempdir()?;
    let bank_path = dir.path().join("bank.bin");
    std::fs::write(&bank_path, bank.save()?)?;

    cmd()
        .arg("run")
        .arg("-b")
        .arg(&bank_path)
        .arg("-e")
        .arg(dir.path().join("missing.json"))
        .assert()
        .failure();
    Ok(())
}

#[test]
fn run_produces_empty_track_list_for_an_empty_event() -> STDRESULT {
    use emtf_core::bank::{PatternBank, NETA, NLAYERS, NPT};

    let count = NPT * NETA * NLAYERS;
    let bank = PatternBank::from_flat(vec![0i32; count * 3], vec![0i32; count * 3]).unwrap();
    let dir = tempfile::tempdir()?;
    let bank_path = dir.path().join("bank.bin");
    std::fs::write(&bank_path, bank.save()?)?;
    let event_path = dir.path().join("event.json");
    std::fs::write(&event_path, "[]")?;

    cmd()
        .arg("run")
        .arg("-b")
        .arg(&bank_path)
        .arg("-e")
        .arg(&event_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
    Ok(())
}

#[test]
fn completions_writes_a_bash_script() -> STDRESULT {
    cmd()
        .arg("completions")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("emtf-core"));
    Ok(())
}
