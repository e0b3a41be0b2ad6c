/// Maximum number of numbered page buttons shown at once.
pub const PAGE_WINDOW: u32 = 5;

/// Page numbers to render as buttons, centred on `current` where possible.
pub fn page_window(current: u32, total_pages: u32) -> Vec<u32> {
    if total_pages <= PAGE_WINDOW {
        return (1..=total_pages).collect();
    }

    let start = if current <= 3 {
        1
    } else if current >= total_pages - 2 {
        total_pages - PAGE_WINDOW + 1
    } else {
        current - 2
    };

    (start..start + PAGE_WINDOW).collect()
}

pub fn has_previous(current: u32) -> bool {
    current > 1
}

pub fn has_next(current: u32, total_pages: u32) -> bool {
    current < total_pages
}
