#![cfg(test)]

mod common;

mod test_file_cache;
mod test_node_failures;
