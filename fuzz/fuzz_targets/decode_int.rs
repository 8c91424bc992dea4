#![no_main]

use fst_decode::{PrimitiveBuf, VarPrimitive};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // attempts to decode all the data as ints, errors are ok, panics are not
    let mut src = data;
    while !src.is_empty() {
        let from_slice = i32::decode_var(src);
        match src.get_var::<i32>() {
            Ok(v) => assert_eq!(from_slice.unwrap().0, v),
            Err(_) => {
                assert!(from_slice.is_err());
                break;
            }
        }
    }
});
