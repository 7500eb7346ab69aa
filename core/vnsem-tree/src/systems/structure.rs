use crate::{DepTree, TreeError};

/// Checks that the head edges form a single rooted tree.
pub fn check_structure(tree: &DepTree) -> Vec<TreeError> {
    let mut errors = Vec::new();

    // 1. Exactly one root
    let roots = tree.roots();
    if !tree.is_empty() && roots.len() != 1 {
        errors.push(TreeError::RootCount(roots.len()));
    }

    // 2. No head cycles: every chain of heads must end within len() steps
    for start in 0..tree.len() {
        let mut current = start;
        let mut steps = 0;
        while let Some(head) = tree.head(current) {
            steps += 1;
            if steps > tree.len() {
                errors.push(TreeError::Cycle(start));
                break;
            }
            current = head;
        }
    }

    errors
}
