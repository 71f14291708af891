// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree nodes.
//!
//! Fill a quadtree with Kurbo rectangles, print its node layout, then remove
//! items and watch branches collapse back into the node pool.
//!
//! Run:
//! - `cargo run -p understory_examples --example quadtree_nodes`

use understory_partition::{Bounded, Partitioning, QuadTree, Rect};

/// A labelled Kurbo rectangle.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Label(&'static str);

#[derive(Clone, Debug)]
struct Widget {
    label: Label,
    frame: kurbo::Rect,
}

impl PartialEq for Widget {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
    }
}

impl Eq for Widget {}

impl std::hash::Hash for Widget {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.label.hash(state);
    }
}

impl Bounded for Widget {
    fn bounds(&self) -> Rect {
        self.frame.into()
    }
}

fn widget(label: &'static str, x0: f64, y0: f64, x1: f64, y1: f64) -> Widget {
    Widget {
        label: Label(label),
        frame: kurbo::Rect::new(x0, y0, x1, y1),
    }
}

fn dump(tree: &QuadTree<Widget>) {
    for node in tree.query_nodes(tree.bounds()) {
        let frame: kurbo::Rect = node.bounds.into();
        let indent = "  ".repeat((tree.depth() - node.depth) as usize);
        if node.is_leaf {
            println!("{indent}leaf {frame:?} items={}", node.len);
        } else {
            println!("{indent}branch {frame:?}");
        }
    }
    println!(
        "nodes={} pooled={}\n",
        tree.node_count(),
        tree.pooled_nodes()
    );
}

fn main() {
    let mut tree = QuadTree::new(Rect::new(0.0, 0.0, 512.0, 512.0), 2, 4).expect("valid domain");
    let widgets = [
        widget("title", 8.0, 8.0, 200.0, 40.0),
        widget("close", 180.0, 8.0, 200.0, 28.0),
        widget("body", 8.0, 48.0, 500.0, 400.0),
        widget("ok", 400.0, 440.0, 460.0, 470.0),
        widget("cancel", 300.0, 440.0, 380.0, 470.0),
        widget("icon", 12.0, 12.0, 28.0, 28.0),
    ];
    for w in &widgets {
        tree.insert(w.clone()).expect("widgets have positive size");
    }
    dump(&tree);

    let hits: Vec<_> = tree
        .query_point(20.0, 20.0)
        .into_iter()
        .map(|w| w.label.0)
        .collect();
    println!("candidates at (20,20): {hits:?}\n");

    for w in &widgets[3..] {
        tree.remove(w);
    }
    dump(&tree);
}
