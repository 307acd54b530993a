//! Collects the child pages a conversion stopped at.

use crate::model::{BlockKind, BlockNode, ChildPageRef};

/// Every child page in `nodes` whose content was not assembled, in document order.
pub fn collect_child_pages(nodes: &[BlockNode]) -> Vec<ChildPageRef> {
    let mut pages = Vec::new();
    collect_into(nodes, &mut pages);
    pages
}

fn collect_into(nodes: &[BlockNode], pages: &mut Vec<ChildPageRef>) {
    for node in nodes {
        if let BlockKind::ChildPage(page) = &node.block.kind {
            if node.children.is_empty() {
                pages.push(ChildPageRef {
                    id: node.block.id.clone(),
                    title: page.title.clone(),
                });
                continue;
            }
        }
        collect_into(&node.children, pages);
    }
}
