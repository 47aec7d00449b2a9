/// Number of records requested per page.
pub const PAGE_SIZE: u32 = 20;

/// Total page count for `total_matches`; never less than 1.
pub fn total_pages(total_matches: u64, page_size: u32) -> u32 {
    let page_size = u64::from(page_size.max(1));
    let pages = total_matches.div_ceil(page_size).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

pub fn previous_page(current: u32) -> u32 {
    current.saturating_sub(1).max(1)
}

pub fn next_page(current: u32, total_pages: u32) -> u32 {
    current.saturating_add(1).min(total_pages.max(1))
}

pub fn has_previous(current: u32) -> bool {
    current > 1
}

pub fn has_next(current: u32, total_pages: u32) -> bool {
    current < total_pages
}
