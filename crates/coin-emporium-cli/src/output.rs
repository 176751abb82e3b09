//! Output formatting for CLI results.

use anyhow::Result;
use coin_emporium_sdk::{EmporiumConfig, TransactionHash};

/// Print a value as JSON (pretty-printed).
pub fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a key-value pair in human-readable format.
pub fn print_kv(key: &str, value: &str) {
    println!("  {key}: {value}");
}

/// Print a section header.
pub fn print_header(title: &str) {
    println!("\n--- {title} ---");
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("Success: {msg}");
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("Warning: {msg}");
}

/// Print a transaction hash under `label`, followed by its explorer link when one is configured.
pub fn print_txn(config: &EmporiumConfig, label: &str, hash: &TransactionHash) {
    print_kv(label, &hash.to_string());
    if let Some(link) = config.explorer_link(&hash.to_hex()) {
        print_kv("Explorer", &link);
    }
}

/// JSON form of a transaction hash plus its explorer link.
pub fn txn_json(config: &EmporiumConfig, hash: &TransactionHash) -> serde_json::Value {
    serde_json::json!({
        "hash": hash.to_hex(),
        "explorer": config.explorer_link(&hash.to_hex()),
    })
}
