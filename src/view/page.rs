use crate::model::StudentRecord;

/// `ceil(len / page_size)`; zero when there are no rows.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Pulls a 1-based page index back into `[1, max(total_pages, 1)]`.
pub fn clamp_page(page_index: usize, len: usize, page_size: usize) -> usize {
    page_index.clamp(1, total_pages(len, page_size).max(1))
}

/// Rows `[(page_index - 1) * page_size, page_index * page_size)`, clipped to
/// the input. An index past the last page yields no rows.
pub fn paginate(
    records: &[StudentRecord],
    page_size: usize,
    page_index: usize,
) -> Vec<StudentRecord> {
    if page_size == 0 || page_index == 0 {
        return Vec::new();
    }
    let start = (page_index - 1).saturating_mul(page_size);
    if start >= records.len() {
        return Vec::new();
    }
    let end = start.saturating_add(page_size).min(records.len());
    records[start..end].to_vec()
}
