use noah_logger::{LevelFilter, Logger};
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn json_file_layer_writes_structured_events() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs").join("nested");

    let logger = Logger::builder("xtask")
        .console(false)
        .file(&log_dir)
        .json()
        .level(LevelFilter::DEBUG)
        .init()?;
    assert!(logger.writes_files());

    tracing::info!(branch = "feature/login", "Branch resolved");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let file_name = log_file.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    assert!(file_name.starts_with("xtask"), "unexpected log file name {file_name}");

    let contents = fs::read_to_string(&log_file)?;
    assert!(contents.contains("\"branch\":\"feature/login\""), "got: {contents}");

    Ok(())
}
