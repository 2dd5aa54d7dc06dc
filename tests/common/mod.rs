//! Shared helpers for integration tests

#![allow(dead_code)]

use rust_structured_logger::prelude::*;

/// Only the level is printed before the message
pub fn level_only() -> HumanFields {
    HumanFields {
        omit_time: true,
        omit_pid: true,
        omit_caller: true,
        omit_level: false,
    }
}

/// Caller and level, but no time or pid
pub fn caller_and_level() -> HumanFields {
    HumanFields {
        omit_caller: false,
        ..level_only()
    }
}

/// Logger over a human handler writing into memory
pub fn memory_logger(level: Level, fields: HumanFields) -> (Logger, MemoryWriter) {
    let memory = MemoryWriter::new();
    let handler = HumanHandler::new(memory.shared())
        .with_level(level)
        .with_fields(fields);
    (Logger::new(handler), memory)
}

pub fn parse_json_lines(text: &str) -> Vec<serde_json::Value> {
    text.lines()
        .map(|line| serde_json::from_str(line).expect("valid JSON line"))
        .collect()
}
