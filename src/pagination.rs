use futures::Future;

/// Largest page size the members endpoint accepts
pub const MEMBERS_PAGE_SIZE: u8 = 100;

/// One page of results and the total page count reported alongside it
#[derive(Clone, Debug, PartialEq)]
pub struct MemberPage<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
}

/// Fetch the first page and, if `exhaustive` is set and the first page is full, every remaining
/// page up to the total reported by the first page.
///
/// Pages are requested one at a time in increasing order and their items are returned in the
/// order received. Any failed request fails the whole collection.
pub async fn collect_pages<T, E, F, Fut>(
    mut fetch_page: F,
    page_size: u8,
    exhaustive: bool,
) -> Result<Vec<T>, E>
where
    F: FnMut(u32, u8) -> Fut,
    Fut: Future<Output = Result<MemberPage<T>, E>>,
{
    let first = fetch_page(1, page_size).await?;

    if !exhaustive || first.items.len() < usize::from(page_size) {
        return Ok(first.items);
    }

    let total_pages = first.total_pages;
    let mut items = first.items;

    for page in 2..=total_pages {
        log::debug!("Fetching page {} of {}", page, total_pages);
        let mut next = fetch_page(page, page_size).await?;
        items.append(&mut next.items);
    }

    Ok(items)
}
