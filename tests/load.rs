use std::fs;

use deployconf::configuration::{resolve, RawConfig};
use tempfile::tempdir;

const POLYMAIN_KEY: &str = "0xb6a567187c05c73c66ebf0540d2757761618f931f0f4f721285ebdf10fa17c98";


#[test]
fn loads_and_resolves_a_configuration_file() {
    let directory = tempdir().unwrap();
    fs::write(directory.path().join("polymain.key"), POLYMAIN_KEY).unwrap();

    let configuration_path = directory.path().join("deployconf.toml");
    fs::write(
        &configuration_path,
        r#"
        output_path = "./client/artifacts"
        default_profile = "hardhat"

        [compiler]
        version = "0.8.18"

        [compiler.optimizer]
        enabled = true
        runs = 1000

        [compiler.optimizer.details.yul]
        optimizerSteps = "dhfoDgvulfnTUtnIf"

        [profiles.hardhat]
        chain_id = 31337

        [profiles.polymain]
        chain_id = 137
        endpoint_url = "https://polygon-rpc.com/"
        credentials = [{ file = "polymain.key" }]
        "#,
    )
    .unwrap();

    let raw = RawConfig::load_from_path(&configuration_path).unwrap();
    let resolved = resolve(raw).unwrap();

    assert_eq!(resolved.select(None).unwrap().name(), "hardhat");
    assert_eq!(
        resolved.compiler().optimizer.runs().map(|runs| runs.get()),
        Some(1000)
    );

    let polymain = resolved.into_profile("polymain").unwrap();
    assert_eq!(polymain.credentials()[0].expose_hex(), POLYMAIN_KEY);
}

#[test]
fn missing_configuration_file_is_an_error() {
    let directory = tempdir().unwrap();

    assert!(RawConfig::load_from_path(directory.path().join("missing.toml")).is_err());
}
