#![cfg_attr(not(feature = "export-abi"), no_main)]
extern crate alloc;

use stylus_sdk::{console, prelude::*, ArbResult};

#[storage]
#[entrypoint]
pub struct Hello;

#[public]
impl Hello {
    fn user_main(_input: Vec<u8>) -> ArbResult {
        // Printed by the local dev node when the "debug" feature is on.
        console!("Hello, world!");
        Ok(Vec::new())
    }
}
