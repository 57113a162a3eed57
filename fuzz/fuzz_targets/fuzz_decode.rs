#![no_main]
use libfuzzer_sys::fuzz_target;
use zenview::{DecodeRequest, Limits};

fuzz_target!(|data: &[u8]| {
    // Must never panic; cap allocations so huge headers fail fast
    let limits = Limits {
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    };
    if let Ok(image) = DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable)
    {
        let expected = image.width() as usize * image.height() as usize * 4;
        assert_eq!(image.pixels().len(), expected);
        assert!(image.pixels().chunks_exact(4).all(|c| c[0] == 255));
    }
});
