use never_forget_core::{page_slice, total_pages, PaginationState, WordEntry, WordStore};
use proptest::prelude::*;

fn store_of(n: usize) -> WordStore {
    let entries = (0..n)
        .map(|i| WordEntry::new(&format!("w{i}"), "d", "c", "s", "a", "e"))
        .collect();
    WordStore::from_entries(entries).unwrap()
}

proptest! {
    /// Every page holds min(page_size, N - p*page_size) words
    #[test]
    fn page_sizes(n in 1usize..120, page_size in 1usize..15) {
        let store = store_of(n);
        for p in 0..total_pages(n, page_size) {
            let (entries, start, end) = page_slice(&store, p, page_size);
            prop_assert_eq!(entries.len(), page_size.min(n - p * page_size));
            prop_assert_eq!(end - start, entries.len());
        }
    }

    /// Pages cover the store in order with no gaps or overlaps
    #[test]
    fn pages_partition_store(n in 1usize..120, page_size in 1usize..15) {
        let store = store_of(n);
        let mut next = 0;
        for p in 0..total_pages(n, page_size) {
            let (entries, start, end) = page_slice(&store, p, page_size);
            prop_assert_eq!(start, next);
            for (offset, entry) in entries.iter().enumerate() {
                prop_assert_eq!(&entry.word, &format!("w{}", start + offset));
            }
            next = end;
        }
        prop_assert_eq!(next, n);
    }

    /// Word navigation always keeps the page on the current word
    #[test]
    fn go_to_index_syncs_page(n in 1usize..120, page_size in 1usize..15, pick in any::<prop::sample::Index>()) {
        let mut state = PaginationState::new(n, page_size);
        let index = pick.index(n);
        prop_assert!(state.go_to_index(index));
        prop_assert_eq!(state.page_index, index / page_size);
        prop_assert!(state.page_index < state.total_pages());
    }

    /// Stepping forward from the last word never moves
    #[test]
    fn no_wrap_at_end(n in 1usize..60) {
        let mut state = PaginationState::new(n, 10);
        state.go_to_index(n - 1);
        prop_assert!(!state.step_forward());
        prop_assert_eq!(state.current_word_index, n - 1);
    }
}
