#![no_main]

use fst_decode::PrimitiveBuf;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut src = data;
    while !src.is_empty() {
        if src.get_var::<i64>().is_err() {
            break;
        }
    }

    let mut src = data;
    while !src.is_empty() {
        if src.get_var::<u16>().is_err() {
            break;
        }
    }
});
