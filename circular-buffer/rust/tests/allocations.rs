use circular_buffer::RingBuffer;

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

// dhat only allows a single testing profiler per process, keep this the only test in the file
#[test]
fn hot_path_does_not_allocate() {
    let _profiler = dhat::Profiler::builder().testing().build();

    let rb = RingBuffer::<u64>::new(64).unwrap();

    // Warm up every path once so lazily registered tracing callsites are out of the way
    for i in 0..=64 {
        rb.put(i);
    }
    _ = rb.get();
    rb.reset();

    let before = dhat::HeapStats::get();

    for i in 0..10_000u64 {
        rb.put(i);
        if i % 3 == 0 {
            _ = rb.get();
        }
        if i % 1000 == 0 {
            rb.reset();
        }
        _ = rb.len();
        _ = rb.is_full();
    }

    let after = dhat::HeapStats::get();
    dhat::assert_eq!(before.total_blocks, after.total_blocks);
    dhat::assert_eq!(before.total_bytes, after.total_bytes);
    dhat::assert_eq!(64, rb.capacity());
}
