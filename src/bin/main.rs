use std::{env, num::ParseIntError};

use boxed_avl::{Avl, AvlTree, Rotation, SearchTree, Stats};
use log::{debug, info};

fn main() -> Result<(), ParseIntError> {
    env_logger::init();

    let mut keys = env::args()
        .skip(1)
        .map(|arg| arg.parse::<i64>())
        .collect::<Result<Vec<_>, _>>()?;

    if keys.is_empty() {
        keys = vec![10, 20, 30, 40, 50, 25];
    }

    let mut tree: AvlTree<i64, Stats> =
        SearchTree::with_balancer(Avl::with_observer(Stats::new()));

    for &key in &keys {
        tree.insert(key);
        tree.assert_invariants();
        debug!("after inserting {key}: {tree:?}");
    }

    println!("{:?}", tree.iter().collect::<Vec<_>>());
    println!("height: {}", tree.height());

    let stats = tree.balancer().observer();
    for rotation in Rotation::ALL {
        info!("{rotation:?} rotations: {}", stats.rotations(rotation));
    }
    info!(
        "{} height probes, {} comparisons, {:?} rebalancing",
        stats.probes(),
        stats.compares(),
        stats.elapsed()
    );

    let mut graph = String::new();
    if tree.dotgraph("demo", &mut graph).is_ok() {
        println!("{graph}");
    }

    // Remove the root, forcing a successor replacement.
    if let Some(&root) = tree.root().map(|node| node.key()) {
        let removed = tree.remove(&root);
        tree.assert_invariants();
        assert_eq!(removed, Some(root));
        println!("removed {root}: {:?}", tree.iter().collect::<Vec<_>>());
    }

    Ok(())
}
