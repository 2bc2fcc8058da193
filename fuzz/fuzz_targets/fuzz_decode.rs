#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Header parsing and full decode must never panic
    let _ = zenbmpfilter::ImageInfo::from_bytes(data);
    let limits = zenbmpfilter::Limits {
        max_pixels: Some(1 << 24),
        ..Default::default()
    };
    let _ = zenbmpfilter::DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable);
});
