#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = ukpr::compressed_size(data);
    let _ = ukpr::calculate_margin(data);
    if let Ok(heatmap) = ukpr::create_heatmap(data, 64 * 1024) {
        assert_eq!(Ok(heatmap.bytes().to_vec()), ukpr::unpack(data, 64 * 1024).map_err(|_| ()));
    }
});
