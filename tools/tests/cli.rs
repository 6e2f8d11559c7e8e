//! Tests of the key generation tool against the real file system.
use std::{
    fs,
    num::NonZeroUsize,
    path::{Path, PathBuf},
    process::{Command, Output},
};
use tempfile::TempDir;
use volnix_crypto::{decode_base64_raw, ed25519, sha256::Sha256};
use volnix_testnet_tools::{
    generate, Config, FsPersister, KeyGenerator, NODE_KEY_FILE, VALIDATOR_KEY_FILE,
};

/// Runs the binary in `cwd` with the given arguments.
fn run_binary(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_generate-validator-keys"))
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn generate_into(testnet_dir: PathBuf, num_nodes: usize) -> Config {
    let cfg = Config {
        testnet_dir,
        num_nodes: NonZeroUsize::new(num_nodes).unwrap(),
    };
    generate(
        &cfg,
        &mut KeyGenerator::os(),
        &mut FsPersister,
        &mut std::io::sink(),
    )
    .unwrap();
    cfg
}

/// Sorted names of the entries of a directory.
fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    names
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_directory_layout() {
    let tmp = TempDir::new().unwrap();
    let cfg = generate_into(tmp.path().join("tmp"), 2);

    assert_eq!(vec!["node0", "node1"], list_dir(&cfg.testnet_dir));
    for i in cfg.node_indices() {
        let dir = cfg.node_config_dir(i);
        assert!(dir.is_dir());
        assert_eq!(vec![NODE_KEY_FILE, VALIDATOR_KEY_FILE], list_dir(&dir));
    }
}

#[test]
fn test_single_node_files() {
    let tmp = TempDir::new().unwrap();
    let cfg = generate_into(tmp.path().join("out"), 1);

    assert_eq!(vec!["node0"], list_dir(&cfg.testnet_dir));
    assert_eq!(vec![".volnix"], list_dir(&cfg.testnet_dir.join("node0")));
    assert_eq!(
        vec!["config"],
        list_dir(&cfg.testnet_dir.join("node0/.volnix"))
    );
    let dir = cfg.node_config_dir(0);

    let node_key = read_json(&dir.join(NODE_KEY_FILE));
    assert_eq!("tendermint/PrivKeyEd25519", node_key["priv_key"]["type"]);
    let raw = decode_base64_raw(node_key["priv_key"]["value"].as_str().unwrap()).unwrap();
    assert_eq!(64, raw.len());
    let seed: [u8; 32] = raw[..32].try_into().unwrap();
    assert_eq!(
        &raw[32..],
        ed25519::SecretKey::from_seed(&seed).public().as_bytes()
    );

    let validator_key = read_json(&dir.join(VALIDATOR_KEY_FILE));
    let address = validator_key["address"].as_str().unwrap();
    assert_eq!(40, address.len());
    assert!(address
        .chars()
        .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
    let public = decode_base64_raw(validator_key["pub_key"]["value"].as_str().unwrap()).unwrap();
    assert_eq!(
        hex::encode_upper(&Sha256::new(&public).as_bytes()[..20]),
        address
    );
    assert_eq!("tendermint/PubKeyEd25519", validator_key["pub_key"]["type"]);
    assert_eq!(
        "tendermint/PrivKeyEd25519",
        validator_key["priv_key"]["type"]
    );
}

#[test]
fn test_file_text_format() {
    let tmp = TempDir::new().unwrap();
    let cfg = generate_into(tmp.path().join("out"), 1);
    let text = fs::read_to_string(cfg.node_config_dir(0).join(VALIDATOR_KEY_FILE)).unwrap();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(11, lines.len());
    assert!(lines[1].starts_with("  \"address\": \""));
    assert_eq!("  \"pub_key\": {", lines[2]);
    assert_eq!("    \"type\": \"tendermint/PubKeyEd25519\",", lines[3]);
    assert_eq!("  \"priv_key\": {", lines[6]);
    assert!(!text.ends_with('\n'));
}

#[cfg(unix)]
#[test]
fn test_key_files_are_private() {
    use std::os::unix::fs::PermissionsExt as _;
    let tmp = TempDir::new().unwrap();
    let cfg = generate_into(tmp.path().join("out"), 1);
    for file in [NODE_KEY_FILE, VALIDATOR_KEY_FILE] {
        let meta = fs::metadata(cfg.node_config_dir(0).join(file)).unwrap();
        assert_eq!(0o600, meta.permissions().mode() & 0o777);
    }
}

#[cfg(unix)]
#[test]
fn test_overwritten_key_files_become_private() {
    use std::os::unix::fs::PermissionsExt as _;
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("out/node0/.volnix/config");
    fs::create_dir_all(&dir).unwrap();
    for file in [NODE_KEY_FILE, VALIDATOR_KEY_FILE] {
        fs::write(dir.join(file), "stale").unwrap();
        fs::set_permissions(dir.join(file), fs::Permissions::from_mode(0o644)).unwrap();
    }

    generate_into(tmp.path().join("out"), 1);
    for file in [NODE_KEY_FILE, VALIDATOR_KEY_FILE] {
        let meta = fs::metadata(dir.join(file)).unwrap();
        assert_eq!(0o600, meta.permissions().mode() & 0o777);
        assert_ne!("stale", fs::read_to_string(dir.join(file)).unwrap());
    }
}

#[test]
fn test_rerun_overwrites_keys() {
    let tmp = TempDir::new().unwrap();
    let cfg = generate_into(tmp.path().join("out"), 1);
    let path = cfg.node_config_dir(0).join(VALIDATOR_KEY_FILE);
    let first = fs::read_to_string(&path).unwrap();
    generate_into(tmp.path().join("out"), 1);
    let second = fs::read_to_string(&path).unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_binary_default_arguments() {
    let tmp = TempDir::new().unwrap();
    let output = run_binary(tmp.path(), &[]);
    assert!(output.status.success(), "{output:?}");

    let testnet = tmp.path().join("testnet-proper");
    assert_eq!(vec!["node0", "node1", "node2"], list_dir(&testnet));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Generating keys for 3 nodes\nDirectory: testnet-proper\n"));
    assert_eq!(3, stdout.matches("  Node ID: ").count());
    assert_eq!(3, stdout.matches("  Validator: ").count());
    assert!(stdout.ends_with("All keys generated!\n"));
}

#[test]
fn test_binary_reports_persisted_address() {
    let tmp = TempDir::new().unwrap();
    let output = run_binary(tmp.path(), &["out", "1"]);
    assert!(output.status.success(), "{output:?}");

    let validator_key = read_json(
        &tmp.path()
            .join("out/node0/.volnix/config")
            .join(VALIDATOR_KEY_FILE),
    );
    let stdout = String::from_utf8(output.stdout).unwrap();
    let want = format!("  Validator: {}\n", validator_key["address"].as_str().unwrap());
    assert!(stdout.contains(&want), "{stdout}");
}

#[test]
fn test_binary_rejects_invalid_node_count() {
    for count in ["abc", "0", "-1", " 3", "3 "] {
        let tmp = TempDir::new().unwrap();
        let output = run_binary(tmp.path(), &["out", count]);
        assert!(!output.status.success(), "{count}: {output:?}");
        assert!(list_dir(tmp.path()).is_empty(), "{count}");
    }
}

#[test]
fn test_binary_fails_on_path_collision() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("out"), "not a directory").unwrap();
    let output = run_binary(tmp.path(), &["out", "1"]);
    assert!(!output.status.success(), "{output:?}");
}

#[test]
fn test_binary_verify() {
    let tmp = TempDir::new().unwrap();
    assert!(run_binary(tmp.path(), &["out", "2"]).status.success());

    let output = run_binary(tmp.path(), &["out", "2", "--verify"]);
    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.ends_with("All keys verified!\n"), "{stdout}");

    // Corrupt the address of node1.
    let path = tmp
        .path()
        .join("out/node1/.volnix/config")
        .join(VALIDATOR_KEY_FILE);
    let mut validator_key = read_json(&path);
    validator_key["address"] = "0000000000000000000000000000000000000000".into();
    fs::write(&path, validator_key.to_string()).unwrap();

    let output = run_binary(tmp.path(), &["out", "2", "--verify"]);
    assert!(!output.status.success(), "{output:?}");
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("does not match pub_key"), "{stderr}");
}
