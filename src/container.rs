//! Navigation container: the root of one logical menu/breadcrumb tree.

use crate::page::PageNode;

/// Root collection of page nodes, in render order.
///
/// `count()` reports top-level pages only (the original factory contract);
/// `iter()` walks the whole tree depth-first pre-order.
#[derive(Debug, Clone, Default)]
pub struct NavigationContainer {
    pages: Vec<PageNode>,
}

impl NavigationContainer {
    pub fn new(pages: Vec<PageNode>) -> Self {
        Self { pages }
    }

    /// Number of top-level pages.
    pub fn count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Top-level pages in render order.
    pub fn pages(&self) -> &[PageNode] {
        &self.pages
    }

    pub(crate) fn pages_mut(&mut self) -> &mut [PageNode] {
        &mut self.pages
    }

    /// Depth-first pre-order traversal over every node in the tree.
    pub fn iter(&self) -> DepthFirstIter<'_> {
        DepthFirstIter {
            stack: self.pages.iter().rev().collect(),
        }
    }

    /// Labels of all nodes in depth-first pre-order.
    pub fn labels(&self) -> Vec<&str> {
        self.iter().map(PageNode::label).collect()
    }

    /// First node (pre-order) with the given label, if any.
    pub fn find_by_label(&self, label: &str) -> Option<&PageNode> {
        self.iter().find(|page| page.label() == label)
    }
}

/// Explicit-stack pre-order iterator; children are pushed reversed so they
/// pop in render order.
pub struct DepthFirstIter<'a> {
    stack: Vec<&'a PageNode>,
}

impl<'a> Iterator for DepthFirstIter<'a> {
    type Item = &'a PageNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.pages().iter().rev());
        Some(node)
    }
}

impl<'a> IntoIterator for &'a NavigationContainer {
    type Item = &'a PageNode;
    type IntoIter = DepthFirstIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested() -> NavigationContainer {
        let mut mvc = PageNode::with_route("MVC Page", "foo");
        mvc.push(PageNode::with_route("Sub MVC Page", "foo"));
        NavigationContainer::new(vec![
            PageNode::with_uri("Page 1", "page1.html"),
            mvc,
            PageNode::with_uri("Page 3", "page3.html"),
        ])
    }

    #[test]
    fn test_count_is_top_level_only() {
        assert_eq!(nested().count(), 3);
    }

    #[test]
    fn test_depth_first_preorder_labels() {
        assert_eq!(
            nested().labels(),
            vec!["Page 1", "MVC Page", "Sub MVC Page", "Page 3"]
        );
    }

    #[test]
    fn test_empty_container() {
        let container = NavigationContainer::default();
        assert_eq!(container.count(), 0);
        assert!(container.iter().next().is_none());
    }

    #[test]
    fn test_find_by_label() {
        let container = nested();
        assert!(container.find_by_label("Sub MVC Page").is_some());
        assert!(container.find_by_label("Missing").is_none());
    }
}
