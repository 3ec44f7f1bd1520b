use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::company::Department;
use crate::error::DepartmentError;

/// A department and the departments that name it as their parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentNode {
    pub name: String,
    pub children: Vec<DepartmentNode>,
}

impl DepartmentNode {
    /// Number of nodes in this subtree, including this one.
    pub fn subtree_size(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(DepartmentNode::subtree_size)
            .sum::<usize>()
    }
}

/// Group a flat department list into a forest by parent name.
///
/// Roots are departments with no parent or whose parent is not in the list.
/// Unnamed departments are ignored and a repeated name keeps its first
/// parent. Fails when any department is its own ancestor.
pub fn build_department_forest(
    departments: &[Department],
) -> Result<Vec<DepartmentNode>, DepartmentError> {
    let mut order: Vec<&str> = Vec::new();
    let mut parent_of: HashMap<&str, Option<&str>> = HashMap::new();

    for dept in departments {
        let Some(name) = dept.name.as_deref() else {
            continue;
        };
        if parent_of.contains_key(name) {
            continue;
        }
        order.push(name);
        parent_of.insert(name, dept.parent.as_deref());
    }

    let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut roots: Vec<&str> = Vec::new();
    for &name in &order {
        match parent_of.get(name).copied().flatten() {
            Some(parent) if parent_of.contains_key(parent) => {
                children.entry(parent).or_default().push(name)
            }
            _ => roots.push(name),
        }
    }

    let mut visited: HashSet<&str> = HashSet::new();
    let mut path: Vec<&str> = Vec::new();
    let mut forest = Vec::with_capacity(roots.len());
    for root in roots {
        forest.push(build_node(root, &children, &mut visited, &mut path)?);
    }

    // Anything never reached hangs off a loop of parents.
    if let Some(&start) = order.iter().find(|name| !visited.contains(*name)) {
        return Err(DepartmentError::Cycle {
            name: find_cycle_member(start, &parent_of).to_string(),
        });
    }

    Ok(forest)
}

fn build_node<'a>(
    name: &'a str,
    children: &HashMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
    path: &mut Vec<&'a str>,
) -> Result<DepartmentNode, DepartmentError> {
    if path.contains(&name) {
        return Err(DepartmentError::Cycle {
            name: name.to_string(),
        });
    }
    visited.insert(name);
    path.push(name);

    let mut nodes = Vec::new();
    for &child in children.get(name).map(Vec::as_slice).unwrap_or(&[]) {
        nodes.push(build_node(child, children, visited, path)?);
    }

    path.pop();
    Ok(DepartmentNode {
        name: name.to_string(),
        children: nodes,
    })
}

/// Walk up the parent chain from `start` until a name repeats.
fn find_cycle_member<'a>(start: &'a str, parent_of: &HashMap<&'a str, Option<&'a str>>) -> &'a str {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut current = start;
    loop {
        if !seen.insert(current) {
            return current;
        }
        match parent_of.get(current).copied().flatten() {
            Some(parent) if parent_of.contains_key(parent) => current = parent,
            _ => return current,
        }
    }
}
