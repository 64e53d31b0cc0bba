use std::io::{IsTerminal, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// One command as sent, encoded or received.
#[derive(Debug, Serialize)]
pub struct CommandRecord {
    pub command: String,
    pub length: usize,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer: Option<String>,
    pub timestamp: String,
}

impl CommandRecord {
    pub fn new(text: String, peer: Option<String>) -> Self {
        Self {
            command: command_name(&text).unwrap_or("?").to_string(),
            length: text.len(),
            text,
            peer,
            timestamp: now_unix_seconds(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ArraySummary {
    pub path: String,
    pub shape: [i32; 4],
    pub elements: usize,
    pub min: Option<f32>,
    pub max: Option<f32>,
    pub mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<i32>>,
}

#[derive(Debug, Serialize)]
pub struct DataFileEntry {
    pub index: usize,
    pub name: String,
    pub size: u64,
}

pub fn print_command(record: &CommandRecord, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(record),
        OutputFormat::Table => {
            let mut table = new_table();
            table.set_header(vec!["COMMAND", "LENGTH", "PEER", "TEXT"]);
            table.add_row(vec![
                record.command.clone(),
                record.length.to_string(),
                record.peer.clone().unwrap_or_else(|| "-".to_string()),
                record.text.clone(),
            ]);
            println!("{table}");
        }
        OutputFormat::Pretty => match &record.peer {
            Some(peer) => println!(
                "cmd={} length={} peer={} text={}",
                record.command, record.length, peer, record.text
            ),
            None => println!(
                "cmd={} length={} text={}",
                record.command, record.length, record.text
            ),
        },
        OutputFormat::Raw => {
            print_raw(record.text.as_bytes());
            print_raw(b"\n");
        }
    }
}

pub fn print_array_summary(summary: &ArraySummary, format: OutputFormat) {
    let fmt_opt = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());
    let [d0, d1, d2, d3] = summary.shape;
    let shape = format!("{d0}x{d1}x{d2}x{d3}");
    let channels = summary.channels.as_ref().map(|chs| {
        chs.iter()
            .map(|ch| ch.to_string())
            .collect::<Vec<_>>()
            .join(",")
    });

    match format {
        OutputFormat::Json | OutputFormat::Raw => print_json(summary),
        OutputFormat::Table => {
            let mut table = new_table();
            table.set_header(vec!["FIELD", "VALUE"]);
            table.add_row(vec!["path".to_string(), summary.path.clone()]);
            table.add_row(vec!["shape".to_string(), shape]);
            table.add_row(vec!["elements".to_string(), summary.elements.to_string()]);
            table.add_row(vec![
                "min".to_string(),
                fmt_opt(summary.min.map(|v| v.to_string())),
            ]);
            table.add_row(vec![
                "max".to_string(),
                fmt_opt(summary.max.map(|v| v.to_string())),
            ]);
            table.add_row(vec![
                "mean".to_string(),
                fmt_opt(summary.mean.map(|v| v.to_string())),
            ]);
            if let Some(channels) = channels {
                table.add_row(vec!["channels".to_string(), channels]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "{} shape={} elements={} min={} max={} mean={}",
                summary.path,
                shape,
                summary.elements,
                fmt_opt(summary.min.map(|v| v.to_string())),
                fmt_opt(summary.max.map(|v| v.to_string())),
                fmt_opt(summary.mean.map(|v| v.to_string())),
            );
            if let Some(channels) = channels {
                println!("channels={channels}");
            }
        }
    }
}

pub fn print_data_files(entries: &[DataFileEntry], format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&entries),
        OutputFormat::Table => {
            let mut table = new_table();
            table.set_header(vec!["#", "NAME", "SIZE"]);
            for entry in entries {
                table.add_row(vec![
                    entry.index.to_string(),
                    entry.name.clone(),
                    entry.size.to_string(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for entry in entries {
                println!("{:>4}  {}  {} bytes", entry.index, entry.name, entry.size);
            }
        }
        OutputFormat::Raw => {
            for entry in entries {
                println!("{}", entry.name);
            }
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Pull the command name out of `{"cmd":"name"...`.
pub fn command_name(text: &str) -> Option<&str> {
    let rest = text.strip_prefix(r#"{"cmd":""#)?;
    rest.split_once('"').map(|(name, _)| name)
}

fn now_unix_seconds() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_name_from_text() {
        assert_eq!(command_name(r#"{"cmd":"quit"}"#), Some("quit"));
        assert_eq!(
            command_name(r#"{"cmd":"move","args":{"ch":3,"val":1.5}}"#),
            Some("move")
        );
        assert_eq!(command_name("garbage"), None);
    }

    #[test]
    fn record_serializes_without_missing_peer() {
        let record = CommandRecord::new(r#"{"cmd":"quit"}"#.to_string(), None);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["command"], "quit");
        assert_eq!(json["length"], 14);
        assert!(json.get("peer").is_none());
    }
}
