//! Integration tests for the paged arena allocator

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sqlview::memory::{Arena, ArenaSpan};

fn assert_within_page(arena: &Arena, span: ArenaSpan) {
    let page = arena.page(span.page()).unwrap();
    assert!(
        span.end() <= page.size(),
        "span {:?} crosses the end of page {} (size {})",
        span,
        span.page(),
        page.size()
    );
}

#[test]
fn test_allocations_never_straddle_pages() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut arena = Arena::new(256);
    let mut spans = Vec::new();

    for i in 0..2000u32 {
        // Roughly one request in twenty exceeds the page size
        let len = if rng.gen_ratio(1, 20) {
            rng.gen_range(257..1024)
        } else {
            rng.gen_range(1..64)
        };

        let span = arena.allocate(len);
        assert_eq!(span.len(), len);
        assert_within_page(&arena, span);

        let fill = (i % 251) as u8;
        arena.bytes_mut(span).fill(fill);
        spans.push((span, fill));
    }

    // Earlier allocations are untouched by later ones
    for (span, fill) in spans {
        assert!(arena.bytes(span).iter().all(|&b| b == fill));
    }
}

#[test]
fn test_oversized_allocation_gets_exact_page() {
    let mut arena = Arena::new(64);
    arena.allocate(10);

    let big = arena.allocate(500);
    assert_eq!(arena.page(big.page()).unwrap().size(), 500);
    assert_eq!(big.offset(), 0);

    // The nearly empty first page keeps serving small requests
    let small = arena.allocate(8);
    assert_eq!(small.page(), 0);
    assert_eq!(small.offset(), 10);
}

#[test]
fn test_used_bytes_accounts_for_terminators() {
    let mut arena = Arena::new(1024);
    arena.alloc_str("hello");
    arena.alloc_str("");
    arena.alloc_bytes(&[1, 2, 3]);

    // "hello\0" + "\0" + three raw bytes
    assert_eq!(arena.used_bytes(), 6 + 1 + 3);
    assert_eq!(arena.allocated_bytes(), 1024);
}

#[test]
fn test_strings_survive_page_growth() {
    let mut arena = Arena::new(32);
    let words: Vec<String> = (0..100).map(|i| format!("word-{i}")).collect();
    let spans: Vec<_> = words.iter().map(|w| arena.alloc_str(w)).collect();

    assert!(arena.page_count() > 1);
    for (word, span) in words.iter().zip(spans) {
        assert_eq!(arena.str(span), word);
    }
}
