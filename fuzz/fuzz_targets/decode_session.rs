#![no_main]

use std::sync::Arc;

use fst_decode::{DecoderSession, ElementKind, NamedTypeRegistry};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // the first byte picks the read, the rest is input
    let Some((&op, input)) = data.split_first() else {
        return;
    };
    let mut session = DecoderSession::new(Arc::new(NamedTypeRegistry::<u8>::new()));
    session.bind_to_owned_copy(input, 0, input.len()).unwrap();
    loop {
        let before = session.current_position();
        let ok = match op % 6 {
            0 => session.read_string_utf().is_ok(),
            1 => session.read_string_ascii().is_ok(),
            2 => session.read_class_header().is_ok(),
            3 => session.read_primitive_array(ElementKind::Char, 4).is_ok(),
            4 => session.read_primitive_array(ElementKind::Short, 4).is_ok(),
            _ => session.read_double().is_ok(),
        };
        assert!(session.current_position() >= before);
        assert!(session.current_position() <= input.len());
        if !ok || session.remaining() == 0 {
            break;
        }
    }
});
