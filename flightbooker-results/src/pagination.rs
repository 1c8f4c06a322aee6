use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "page", rename_all = "snake_case")]
pub enum PageLink {
    Page(usize),
    Ellipsis,
}

/// Page-number strip under the results list.
///
/// Up to five pages are all listed. Beyond that: first, last, and the
/// neighbours of the current page, with an ellipsis two pages away.
pub fn page_links(current: usize, total: usize) -> Vec<PageLink> {
    let mut links = Vec::new();
    for page in 1..=total {
        let distance = page.abs_diff(current);
        if total <= 5 || page == 1 || page == total || distance <= 1 {
            links.push(PageLink::Page(page));
        } else if distance == 2 {
            links.push(PageLink::Ellipsis);
        }
    }
    links
}
