use assert_cmd::Command;
use assert_fs::{
    prelude::{FileWriteStr, PathChild},
    NamedTempFile, TempDir,
};
use predicates::prelude::{predicate, PredicateBooleanExt};

const ITEMS: &str = r#"item_id,Content,Difficulty
a,1,easy
b,2,hard
c,1,hard
"#;

const CONSTRAINTS: &str = r#"{
    "Content": [
        {"comparator": "<=", "values": {"1": 1}}
    ]
}"#;

const EXPECTED: &str = r#"min: ;
a_0 + a_1<=1;
b_0 + b_1<=1;
c_0 + c_1<=1;
a_0 + b_0 + c_0=1;
a_1 + b_1 + c_1=1;
a_0 + c_0<=1;
a_1 + c_1<=1;
bin a_0, b_0, c_0, a_1, b_1, c_1;
"#;

fn temp_file(name: &str, content: &str) -> NamedTempFile {
    let file = NamedTempFile::new(name).unwrap();
    file.write_str(content).unwrap();
    file
}

fn encode_cmd(items: &NamedTempFile, constraints: Option<&NamedTempFile>) -> Command {
    let mut cmd = Command::cargo_bin("ata").unwrap();
    cmd.arg("encode")
        .arg("--logging-level")
        .arg("off")
        .arg("-f")
        .arg(items.path());
    if let Some(c) = constraints {
        cmd.arg("-c").arg(c.path());
    }
    cmd
}

#[test]
fn test_encode_to_stdout() -> Result<(), Box<dyn std::error::Error>> {
    let items = temp_file("items.csv", ITEMS);
    let constraints = temp_file("constraints.json", CONSTRAINTS);
    encode_cmd(&items, Some(&constraints))
        .args(["-n", "2", "-k", "1"])
        .assert()
        .success()
        .stdout(predicate::eq(EXPECTED));
    Ok(())
}

#[test]
fn test_encode_to_file() -> Result<(), Box<dyn std::error::Error>> {
    let items = temp_file("items.csv", ITEMS);
    let constraints = temp_file("constraints.json", CONSTRAINTS);
    let dir = TempDir::new()?;
    let output = dir.child("run.lp");
    encode_cmd(&items, Some(&constraints))
        .args(["-n", "2", "-k", "1", "-o"])
        .arg(output.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert_eq!(EXPECTED, std::fs::read_to_string(output.path())?);
    Ok(())
}

#[test]
fn test_encode_is_reproducible() -> Result<(), Box<dyn std::error::Error>> {
    let items = temp_file("items.csv", ITEMS);
    let run = || {
        encode_cmd(&items, None)
            .args(["-n", "3", "-k", "1"])
            .output()
            .unwrap()
            .stdout
    };
    let first = run();
    assert!(!first.is_empty());
    assert_eq!(first, run());
    Ok(())
}

#[test]
fn test_encode_default_constraints() -> Result<(), Box<dyn std::error::Error>> {
    let items = temp_file("items.csv", "item_id,Content\nx,3\ny,5\n");
    encode_cmd(&items, None)
        .args(["-n", "1", "-k", "1"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\n<=10;\n")
                .and(predicate::str::contains("\nx_0<=15;\n"))
                .and(predicate::str::contains("\ny_0>=0;\n"))
                .and(predicate::str::ends_with("bin x_0, y_0;\n")),
        );
    Ok(())
}

#[test]
fn test_encode_multi_attribute() -> Result<(), Box<dyn std::error::Error>> {
    let items = temp_file("items.csv", ITEMS);
    let constraints = temp_file(
        "constraints.json",
        r#"{"Content&Difficulty": [{"comparator": "=", "values": {"1&hard": 1}}]}"#,
    );
    encode_cmd(&items, Some(&constraints))
        .args(["-n", "1", "-k", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\nc_0=1;\n"));
    Ok(())
}

#[test]
fn test_encode_not_enough_items() -> Result<(), Box<dyn std::error::Error>> {
    let items = temp_file("items.csv", ITEMS);
    let constraints = temp_file("constraints.json", CONSTRAINTS);
    encode_cmd(&items, Some(&constraints))
        .args(["-n", "2", "-k", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a_1 + b_1 + c_1=5;\n"));
    Ok(())
}

#[test]
fn test_encode_unknown_attribute() -> Result<(), Box<dyn std::error::Error>> {
    let items = temp_file("items.csv", ITEMS);
    let constraints = temp_file(
        "constraints.json",
        r#"{"Gender": [{"comparator": "<=", "values": {"f": 1}}]}"#,
    );
    let dir = TempDir::new()?;
    let output = dir.child("run.lp");
    encode_cmd(&items, Some(&constraints))
        .arg("-o")
        .arg(output.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
    assert!(!output.path().exists());
    Ok(())
}

#[test]
fn test_encode_unknown_comparator() -> Result<(), Box<dyn std::error::Error>> {
    let items = temp_file("items.csv", ITEMS);
    let constraints = temp_file(
        "constraints.json",
        r#"{"Content": [{"comparator": "<", "values": {"1": 1}}]}"#,
    );
    encode_cmd(&items, Some(&constraints)).assert().failure();
    Ok(())
}

#[test]
fn test_encode_duplicate_item() -> Result<(), Box<dyn std::error::Error>> {
    let items = temp_file("items.csv", "item_id,Content\na,1\na,2\n");
    encode_cmd(&items, None).assert().failure();
    Ok(())
}

#[test]
fn test_encode_invalid_item_id() -> Result<(), Box<dyn std::error::Error>> {
    let items = temp_file("items.csv", "item_id,Content\n\"a;b\",1\n\"c, d\",2\n");
    let dir = TempDir::new()?;
    let output = dir.child("run.lp");
    encode_cmd(&items, None)
        .args(["-n", "1", "-k", "1", "-o"])
        .arg(output.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
    assert!(!output.path().exists());
    Ok(())
}

#[test]
fn test_encode_categories_compared_trimmed() -> Result<(), Box<dyn std::error::Error>> {
    let items = temp_file(
        "items.csv",
        "item_id,Content,Difficulty\na,1,hard\nb,\" 1\",hard\nc,2,hard\n",
    );
    let single = temp_file(
        "single.json",
        r#"{"Content": [{"comparator": "<=", "values": {" 1": 1}}]}"#,
    );
    let multi = temp_file(
        "multi.json",
        r#"{"Content&Difficulty": [{"comparator": "<=", "values": {" 1 & hard": 1}}]}"#,
    );
    for constraints in [&single, &multi] {
        encode_cmd(&items, Some(constraints))
            .args(["-n", "1", "-k", "1"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\na_0 + b_0<=1;\n"));
    }
    Ok(())
}

#[test]
fn test_encode_no_form() -> Result<(), Box<dyn std::error::Error>> {
    let items = temp_file("items.csv", ITEMS);
    encode_cmd(&items, None).args(["-n", "0"]).assert().failure();
    Ok(())
}

#[test]
fn test_encode_invalid_form_count() -> Result<(), Box<dyn std::error::Error>> {
    let items = temp_file("items.csv", ITEMS);
    encode_cmd(&items, None).args(["-n", "two"]).assert().failure();
    Ok(())
}

#[test]
fn test_encode_missing_input() {
    let mut cmd = Command::cargo_bin("ata").unwrap();
    cmd.args(["encode", "--logging-level", "off", "-f", "no_such_file.csv"])
        .assert()
        .failure();
}

#[test]
fn test_encode_custom_id_column() -> Result<(), Box<dyn std::error::Error>> {
    let items = temp_file("items.csv", "Content,id\n1,q1\n2,q2\n");
    let constraints = temp_file("constraints.json", "{}");
    encode_cmd(&items, Some(&constraints))
        .args(["--id-column", "id", "-n", "1", "-k", "1"])
        .assert()
        .success()
        .stdout(predicate::eq(
            "min: ;\nq1_0<=1;\nq2_0<=1;\nq1_0 + q2_0=1;\nbin q1_0, q2_0;\n",
        ));
    Ok(())
}
