use {super::*, std::fs};

#[test]
fn config_file_drives_split_policy() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("ordx.yaml");
  fs::write(&path, "dust_limit: 546\n").unwrap();
  let config = Config::load(&path).unwrap();

  let output = TxOutput::new(1000);
  assert_eq!(
    output
      .split_with(&config, &AssetName::plain_sat(), 0, &dec(500))
      .unwrap_err(),
    AssetError::BelowDustLimit {
      value: 500,
      dust: 546
    }
  );
  assert!(output
    .split_with(&config, &AssetName::plain_sat(), 0, &dec(546))
    .is_ok());
}

#[test]
fn logger_writes_engine_activity() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("ordx.log");
  ordx::logger::init(log::LevelFilter::Debug, Some(path.as_path())).unwrap();

  let config = Config::default();
  let inputs = [mixed_output(), TxOutput::new(990)];
  TxPool::compile(&config, inputs.iter()).unwrap();
  log::logger().flush();

  assert!(fs::read_to_string(&path)
    .unwrap()
    .contains("compiled pool of 1000 sats with 4 assets from 2 inputs"));
}
