mod jsonl;

pub use jsonl::{flush_host_log, flush_to_jsonl};
