#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

pub fn bitacora_cmd() -> Command {
    let mut cmd = Command::cargo_bin("bitacora").unwrap();
    cmd.env_remove("BITACORA_ROOT");
    cmd.env_remove("BITACORA_REGION");
    cmd.env_remove("BITACORA_TABLE");
    cmd.env_remove("BITACORA_BUCKET");
    cmd.env_remove("EDITOR");
    cmd.env_remove("VISUAL");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Command running inside an initialized workspace
pub fn in_workspace(root: &Path) -> Command {
    let mut cmd = bitacora_cmd();
    cmd.current_dir(root);
    cmd
}

pub fn init_workspace(root: &Path) {
    bitacora_cmd().arg("init").arg(root).assert().success();
}

/// Create an entry and return its id
pub fn create_entry(root: &Path, title: &str, content: &str, tags: &str) -> String {
    let output = in_workspace(root)
        .args(["new", "--title", title, "--content", content, "--tags", tags])
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?}", output);

    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .split_whitespace()
        .find(|word| word.starts_with("entry-"))
        .unwrap()
        .to_string()
}
