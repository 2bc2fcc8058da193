#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmpfilter::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding and decoding again must produce identical pixels
    let limits = Limits {
        max_pixels: Some(1 << 20),
        ..Default::default()
    };
    let Ok(decoded) = DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable)
    else {
        return;
    };

    let reencoded = encode_bmp(&decoded, enough::Unstoppable).expect("decoded grid must encode");
    let Ok(decoded2) = decode_bmp(&reencoded, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded, decoded2, "roundtrip pixel mismatch");

    // Filters must not panic on any decodable image
    for filter in [Filter::Vignette, Filter::Posterize, Filter::RotateQuarterTurns { turns: 3 }] {
        let out = filter.apply(&decoded);
        assert!(!out.is_empty());
    }
});
