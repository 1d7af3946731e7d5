//! Listing-page pagination.
//!
//! Every known page appears on exactly one listing page. Pages are ordered
//! most recent first; pages sharing a timestamp are ordered by checksum so
//! the split does not depend on map iteration order.

use crate::store::KnownStore;

/// Listing data for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSummary {
    pub checksum: String,
    pub timestamp: i64,
    pub slug: String,
    pub title: String,
}

/// One listing page worth of summaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationChunk {
    /// 0-based; chunk 0 is the homepage.
    pub index: usize,
    pub pages: Vec<PageSummary>,
}

/// Number of chunks needed for `pages` entries, `per_page` at a time.
pub fn chunk_count(pages: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    pages.div_ceil(per_page)
}

/// All known pages, most recent first.
pub fn sorted_summaries(known: &KnownStore) -> Vec<PageSummary> {
    let mut summaries: Vec<PageSummary> = known
        .iter()
        .map(|(checksum, entry)| PageSummary {
            checksum: checksum.to_string(),
            timestamp: entry.timestamp,
            slug: entry.slug.clone(),
            title: entry.title.clone(),
        })
        .collect();
    summaries.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| a.checksum.cmp(&b.checksum))
    });
    summaries
}

/// Split all known pages into listing chunks of `per_page`.
///
/// Returns no chunks when `known` is empty or `per_page` is zero.
pub fn paginate(known: &KnownStore, per_page: usize) -> Vec<PaginationChunk> {
    if per_page == 0 {
        return Vec::new();
    }
    sorted_summaries(known)
        .chunks(per_page)
        .enumerate()
        .map(|(index, pages)| PaginationChunk {
            index,
            pages: pages.to_vec(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::known_entry;

    fn store_with(entries: &[(&str, i64)]) -> KnownStore {
        let mut s = KnownStore::empty();
        for (checksum, ts) in entries {
            s.insert(
                checksum.to_string(),
                known_entry(*ts, &format!("slug-{checksum}"), &format!("Title {checksum}")),
            );
        }
        s
    }

    fn slugs(chunk: &PaginationChunk) -> Vec<&str> {
        chunk.pages.iter().map(|p| p.slug.as_str()).collect()
    }

    #[test]
    fn most_recent_first() {
        let s = store_with(&[("aaa", 100), ("bbb", 200)]);
        let chunks = paginate(&s, 10);

        assert_eq!(chunks.len(), 1);
        assert_eq!(slugs(&chunks[0]), vec!["slug-bbb", "slug-aaa"]);
        assert_eq!(chunks[0].pages[0].timestamp, 200);
    }

    #[test]
    fn equal_timestamps_ordered_by_checksum() {
        let s = store_with(&[("ccc", 5), ("aaa", 5), ("bbb", 5), ("zzz", 9)]);
        let chunks = paginate(&s, 10);
        assert_eq!(
            slugs(&chunks[0]),
            vec!["slug-zzz", "slug-aaa", "slug-bbb", "slug-ccc"]
        );
    }

    #[test]
    fn splits_into_fixed_size_chunks() {
        let entries: Vec<(String, i64)> = (0..25).map(|i| (format!("{i:03}"), i)).collect();
        let refs: Vec<(&str, i64)> = entries.iter().map(|(c, t)| (c.as_str(), *t)).collect();
        let chunks = paginate(&store_with(&refs), 10);

        let sizes: Vec<usize> = chunks.iter().map(|c| c.pages.len()).collect();
        assert_eq!(sizes, vec![10, 10, 5]);
        let indices: Vec<usize> = chunks.iter().map(|c| c.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn chunk_count_matches_ceiling() {
        for n in 0..35usize {
            for per_page in 1..12 {
                let entries: Vec<(String, i64)> =
                    (0..n).map(|i| (format!("{i:04}"), i as i64)).collect();
                let refs: Vec<(&str, i64)> =
                    entries.iter().map(|(c, t)| (c.as_str(), *t)).collect();
                let chunks = paginate(&store_with(&refs), per_page);
                assert_eq!(chunks.len(), n.div_ceil(per_page), "n={n} per_page={per_page}");
                assert_eq!(chunk_count(n, per_page), chunks.len());
            }
        }
    }

    #[test]
    fn concatenated_chunks_reproduce_full_order() {
        let s = store_with(&[("a", 3), ("b", 9), ("c", 1), ("d", 7), ("e", 7), ("f", 2)]);
        let all = sorted_summaries(&s);
        let flattened: Vec<PageSummary> = paginate(&s, 4)
            .into_iter()
            .flat_map(|c| c.pages)
            .collect();
        assert_eq!(flattened, all);

        let timestamps: Vec<i64> = all.iter().map(|p| p.timestamp).collect();
        assert_eq!(timestamps, vec![9, 7, 7, 3, 2, 1]);
    }

    #[test]
    fn empty_store_has_no_chunks() {
        assert!(paginate(&KnownStore::empty(), 10).is_empty());
        assert_eq!(chunk_count(0, 10), 0);
    }

    #[test]
    fn zero_per_page_has_no_chunks() {
        let s = store_with(&[("a", 1)]);
        assert!(paginate(&s, 0).is_empty());
        assert_eq!(chunk_count(5, 0), 0);
    }
}
