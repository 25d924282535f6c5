//! CART Decision Tree (Gini impurity)

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Growth limits for a single tree
#[derive(Debug, Clone, Copy)]
pub(crate) struct TreeParams {
    /// Maximum depth (root = 0), unbounded if `None`
    pub max_depth: Option<usize>,
    /// Minimum samples required to split a node
    pub min_samples_split: usize,
    /// Candidate features evaluated per split
    pub max_features: usize,
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        distribution: Vec<f64>,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// Best split found for a node
struct SplitCandidate {
    impurity: f64,
    feature: usize,
    threshold: f64,
}

/// Binary classification tree stored as a flat node arena
#[derive(Debug, Clone)]
pub(crate) struct DecisionTree {
    nodes: Vec<Node>,
}

/// Shared read-only inputs while growing a tree
struct GrowContext<'a> {
    x: &'a Array2<f64>,
    y: &'a [usize],
    n_classes: usize,
    params: TreeParams,
}

impl DecisionTree {
    /// Grow a tree on the rows listed in `samples` (duplicates allowed)
    pub fn fit(
        x: &Array2<f64>,
        y: &[usize],
        samples: Vec<usize>,
        n_classes: usize,
        params: TreeParams,
        rng: &mut StdRng,
    ) -> Self {
        let ctx = GrowContext {
            x,
            y,
            n_classes,
            params,
        };
        let mut tree = Self { nodes: Vec::new() };
        tree.grow(&ctx, samples, 0, rng);
        tree
    }

    /// Class distribution of the leaf reached by `features`
    pub fn predict_distribution(&self, features: &[f64]) -> &[f64] {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { distribution } => return distribution,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if features[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    /// Number of nodes (splits + leaves)
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn grow(&mut self, ctx: &GrowContext<'_>, samples: Vec<usize>, depth: usize, rng: &mut StdRng) -> usize {
        let counts = class_counts(ctx.y, &samples, ctx.n_classes);
        let n = samples.len();

        let depth_reached = ctx.params.max_depth.is_some_and(|max| depth >= max);
        let pure = counts.iter().filter(|&&c| c > 0).count() <= 1;

        if depth_reached || pure || n < ctx.params.min_samples_split {
            return self.push_leaf(&counts, n);
        }

        let Some(split) = best_split(ctx, &samples, &counts, rng) else {
            return self.push_leaf(&counts, n);
        };

        let (left_samples, right_samples): (Vec<usize>, Vec<usize>) = samples
            .iter()
            .partition(|&&i| ctx.x[[i, split.feature]] <= split.threshold);

        // Reserve the parent slot before growing children
        let index = self.nodes.len();
        self.nodes.push(Node::Leaf {
            distribution: Vec::new(),
        });

        let left = self.grow(ctx, left_samples, depth + 1, rng);
        let right = self.grow(ctx, right_samples, depth + 1, rng);

        self.nodes[index] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        index
    }

    fn push_leaf(&mut self, counts: &[usize], n: usize) -> usize {
        let total = n.max(1) as f64;
        self.nodes.push(Node::Leaf {
            distribution: counts.iter().map(|&c| c as f64 / total).collect(),
        });
        self.nodes.len() - 1
    }
}

fn class_counts(y: &[usize], samples: &[usize], n_classes: usize) -> Vec<usize> {
    let mut counts = vec![0; n_classes];
    for &i in samples {
        counts[y[i]] += 1;
    }
    counts
}

fn gini(counts: &[usize], n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / n;
            p * p
        })
        .sum::<f64>()
}

/// Search a random subset of features for the lowest weighted child impurity.
///
/// Features are visited in shuffled order; constant features do not count
/// toward `max_features`, so the search continues past them.
fn best_split(
    ctx: &GrowContext<'_>,
    samples: &[usize],
    counts: &[usize],
    rng: &mut StdRng,
) -> Option<SplitCandidate> {
    let n = samples.len();
    let n_features = ctx.x.ncols();

    let mut order: Vec<usize> = (0..n_features).collect();
    order.shuffle(rng);

    let mut best: Option<SplitCandidate> = None;
    let mut visited = 0;
    let mut column: Vec<(f64, usize)> = Vec::with_capacity(n);

    for feature in order {
        if visited >= ctx.params.max_features && best.is_some() {
            break;
        }

        column.clear();
        column.extend(samples.iter().map(|&i| (ctx.x[[i, feature]], ctx.y[i])));
        column.sort_by(|a, b| a.0.total_cmp(&b.0));

        if column[0].0 >= column[n - 1].0 {
            continue;
        }
        visited += 1;

        let mut left = vec![0usize; ctx.n_classes];
        let mut right = counts.to_vec();

        for k in 0..n - 1 {
            let (value, label) = column[k];
            left[label] += 1;
            right[label] -= 1;

            let next = column[k + 1].0;
            if next <= value {
                continue;
            }

            let n_left = k + 1;
            let n_right = n - n_left;
            let impurity =
                (n_left as f64 * gini(&left, n_left) + n_right as f64 * gini(&right, n_right)) / n as f64;

            if best.as_ref().map_or(true, |b| impurity < b.impurity) {
                let mut threshold = value + (next - value) / 2.0;
                if threshold >= next {
                    threshold = value;
                }
                best = Some(SplitCandidate {
                    impurity,
                    feature,
                    threshold,
                });
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;

    fn params(max_depth: Option<usize>) -> TreeParams {
        TreeParams {
            max_depth,
            min_samples_split: 2,
            max_features: 2,
        }
    }

    #[test]
    fn test_separable_data_fits_exactly() {
        let x = array![[1.0, 0.0], [2.0, 0.0], [3.0, 0.0], [10.0, 0.0], [11.0, 0.0], [12.0, 0.0]];
        let y = vec![0, 0, 0, 1, 1, 1];
        let mut rng = StdRng::seed_from_u64(0);
        let tree = DecisionTree::fit(&x, &y, (0..6).collect(), 2, params(None), &mut rng);

        assert_eq!(tree.predict_distribution(&[2.5, 0.0]), &[1.0, 0.0]);
        assert_eq!(tree.predict_distribution(&[10.5, 0.0]), &[0.0, 1.0]);
        // One split, two leaves
        assert_eq!(tree.node_count(), 3);
    }

    #[test]
    fn test_depth_limit_produces_mixed_leaf() {
        let x = array![[1.0], [2.0], [3.0], [4.0]];
        let y = vec![0, 1, 0, 1];
        let mut rng = StdRng::seed_from_u64(0);
        let tree = DecisionTree::fit(&x, &y, (0..4).collect(), 2, params(Some(0)), &mut rng);

        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.predict_distribution(&[1.0]), &[0.5, 0.5]);
    }

    #[test]
    fn test_constant_feature_skipped() {
        let x = array![[5.0, 1.0], [5.0, 2.0], [5.0, 8.0], [5.0, 9.0]];
        let y = vec![0, 0, 1, 1];
        let mut rng = StdRng::seed_from_u64(3);
        let tree = DecisionTree::fit(&x, &y, (0..4).collect(), 2, params(None), &mut rng);

        assert_eq!(tree.predict_distribution(&[5.0, 1.5]), &[1.0, 0.0]);
        assert_eq!(tree.predict_distribution(&[5.0, 8.5]), &[0.0, 1.0]);
    }

    #[test]
    fn test_gini() {
        assert_eq!(gini(&[4, 0], 4), 0.0);
        assert!((gini(&[2, 2], 4) - 0.5).abs() < 1e-12);
        assert_eq!(gini(&[0, 0], 0), 0.0);
    }
}
