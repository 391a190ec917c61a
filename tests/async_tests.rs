//! Tests for the async decoding layer

#![cfg(feature = "async")]

use futures::StreamExt;
use lcw::{decompress, decompress_async, decompress_file, AsyncBatchProcessor};
use std::fs;
use tempfile::tempdir;

const SAMPLE: [u8; 9] = [0x82, 0x01, 0x02, 0x30, 0x02, 0xFE, 0x04, 0x00, 0x09];

#[tokio::test]
async fn test_decompress_async_reader() -> Result<(), Box<dyn std::error::Error>> {
    let output = decompress_async(std::io::Cursor::new(SAMPLE.to_vec())).await?;
    assert_eq!(output, decompress(&SAMPLE));
    Ok(())
}

#[tokio::test]
async fn test_decompress_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("sample.lcw");
    let output = dir.path().join("sample.raw");
    fs::write(&input, SAMPLE)?;

    let stats = decompress_file(&input, &output).await?;
    assert_eq!(fs::read(&output)?, decompress(&SAMPLE));
    assert_eq!(stats.input_bytes, SAMPLE.len());
    assert_eq!(stats.output_bytes, 12);
    Ok(())
}

#[tokio::test]
async fn test_batch_preserves_order() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let mut paths = Vec::new();
    for i in 0..8u8 {
        let path = dir.path().join(format!("{i}.lcw"));
        fs::write(&path, [0xFE, i + 1, 0x00, i, 0x80])?;
        paths.push(path);
    }

    let processor = AsyncBatchProcessor::new().with_concurrency(3);
    assert_eq!(processor.concurrency(), 3);

    let results = processor.decompress_files(paths.clone()).await?;
    assert_eq!(results.len(), 8);
    for (i, (path, data)) in results.iter().enumerate() {
        assert_eq!(path, &paths[i]);
        assert_eq!(data, &vec![i as u8; i + 1]);
    }
    Ok(())
}

#[tokio::test]
async fn test_batch_streaming_stats() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let good = dir.path().join("good.lcw");
    let cut = dir.path().join("cut.lcw");
    fs::write(&good, [0x81, 0x01, 0x80])?;
    fs::write(&cut, [0x81, 0x01, 0xFF, 0x01])?;

    let processor = AsyncBatchProcessor::new().with_concurrency(0);
    assert_eq!(processor.concurrency(), 1);

    let mut truncated = 0;
    let mut stream = Box::pin(processor.decompress_files_streaming(vec![good, cut]));
    while let Some(result) = stream.next().await {
        let (_path, stats) = result?;
        if stats.termination.is_truncated() {
            truncated += 1;
        }
        assert_eq!(stats.output_bytes, 1);
    }
    assert_eq!(truncated, 1);
    Ok(())
}

#[tokio::test]
async fn test_batch_missing_file_errors() {
    let dir = tempdir().unwrap();
    let processor = AsyncBatchProcessor::default();
    let result = processor
        .decompress_files(vec![dir.path().join("missing.lcw")])
        .await;
    assert!(result.is_err());
}
