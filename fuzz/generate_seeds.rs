#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp(width: i32, height: i32, bpp: u16, row_bytes: usize) -> Vec<u8> {
    let stride = (row_bytes + 3) & !3;
    let size = 54 + stride * height as usize;
    let mut out = vec![0u8; size];
    out[0] = b'B'; out[1] = b'M';
    out[2..6].copy_from_slice(&(size as u32).to_le_bytes()); // file size
    out[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    out[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    out[18..22].copy_from_slice(&width.to_le_bytes());
    out[22..26].copy_from_slice(&height.to_le_bytes());
    out[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    out[28..30].copy_from_slice(&bpp.to_le_bytes());
    for (i, b) in out[54..].iter_mut().enumerate() {
        *b = (i * 37) as u8;
    }
    out
}

fn main() {
    use std::fs;
    for target in ["fuzz_decode", "fuzz_roundtrip"] {
        let dir = format!("fuzz/corpus/{target}");
        fs::create_dir_all(&dir).unwrap();

        fs::write(format!("{dir}/bmp24_1x1.bmp"), bmp(1, 1, 24, 3)).unwrap();
        fs::write(format!("{dir}/bmp24_3x2.bmp"), bmp(3, 2, 24, 9)).unwrap();
        fs::write(format!("{dir}/bmp24_4x2.bmp"), bmp(4, 2, 24, 12)).unwrap();
        fs::write(format!("{dir}/bmp32_2x2.bmp"), bmp(2, 2, 32, 8)).unwrap();

        // Truncated/malformed seeds for edge coverage
        let mut wrong_size = bmp(2, 2, 24, 6);
        wrong_size[2] ^= 1;
        fs::write(format!("{dir}/bad_size.bmp"), wrong_size).unwrap();
        fs::write(format!("{dir}/empty.bin"), b"").unwrap();
        fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    }

    println!("Generated seed corpora in fuzz/corpus/");
}
