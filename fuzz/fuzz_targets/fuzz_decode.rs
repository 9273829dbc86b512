#![no_main]
use libfuzzer_sys::fuzz_target;
use ukpr::{decode_with_options, unpack_with_options, Config, CopyStrategy, DecodeOptions};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    // First byte: copy strategy and refill; second byte: grammar variant
    let (flags1, flags2) = (data[0], data[1]);
    let on = |flags: u8, bit: u8| flags & (1 << bit) != 0;
    let copy_strategy = if on(flags1, 0) {
        CopyStrategy::Bytewise
    } else {
        CopyStrategy::Chunked
    };
    let config = Config {
        use_bitstream: on(flags1, 1),
        bitstream_is_big_endian: on(flags1, 2),
        invert_bit_encoding: on(flags1, 3),
        simplified_prob_update: on(flags1, 4),
        parity_contexts: if on(flags1, 5) { 2 } else { 1 },
        is_match_bit: on(flags2, 0),
        new_offset_bit: on(flags2, 1),
        continue_value_bit: on(flags2, 2),
        no_repeated_offsets: on(flags2, 3),
        eof_in_length: on(flags2, 4),
    };
    let options = DecodeOptions {
        copy_strategy,
        max_output: 64 * 1024,
        config,
    };
    let packed = &data[2..];

    let mut out = vec![0u8; 64 * 1024];
    let sliced = decode_with_options(packed, &mut out, &options);
    let grown = unpack_with_options(packed, &options);

    // Both front ends must agree on success and content
    if let (Ok(n), Ok(vec)) = (&sliced, &grown) {
        assert_eq!(&out[..*n], vec.as_slice());
    }
    assert_eq!(sliced.is_ok(), grown.is_ok());
});
