//! In-place edits of a typed rule tree: the data side of adding rules and
//! groups, changing operators and operands, removing nodes, and reordering.
//!
//! Every edit validates its paths before touching the tree, so a failed edit
//! leaves the tree exactly as it was.

use std::mem;

use crate::types::{EditError, Node, NodePath, Rule, RuleSet};

impl<V> RuleSet<V> {
    /// Insert `node` at `position` among the children of the group at
    /// `parent`. `position` may equal the current number of children.
    ///
    /// # Errors
    ///
    /// [`EditError::PathNotFound`] / [`EditError::NotAGroup`] if `parent` does
    /// not name a group, [`EditError::PositionOutOfBounds`] if `position` is
    /// past the end.
    pub fn insert(
        &mut self,
        parent: &NodePath,
        position: usize,
        node: impl Into<Node<V>>,
    ) -> Result<(), EditError> {
        let group = self.group_at_mut(parent)?;
        let len = group.children.len();
        if position > len {
            return Err(EditError::PositionOutOfBounds {
                path: parent.clone(),
                position,
                len,
            });
        }
        group.children.insert(position, node.into());
        tracing::trace!(%parent, position, "inserted node");
        Ok(())
    }

    /// Append a rule to the group at `parent`, returning its path.
    ///
    /// # Errors
    ///
    /// As for [`insert`](Self::insert).
    pub fn add_rule(&mut self, parent: &NodePath, rule: Rule<V>) -> Result<NodePath, EditError> {
        self.push_child(parent, Node::Rule(rule))
    }

    /// Append an empty group to the group at `parent`, returning its path.
    ///
    /// # Errors
    ///
    /// As for [`insert`](Self::insert).
    pub fn add_group(
        &mut self,
        parent: &NodePath,
        operator: impl Into<String>,
    ) -> Result<NodePath, EditError> {
        self.push_child(parent, Node::RuleSet(RuleSet::new(operator)))
    }

    /// Detach and return the node at `path`.
    ///
    /// # Errors
    ///
    /// [`EditError::CannotRemoveRoot`] for the root path,
    /// [`EditError::PathNotFound`] if nothing lives at `path`.
    pub fn remove(&mut self, path: &NodePath) -> Result<Node<V>, EditError> {
        let (parent, idx) = split(path).ok_or(EditError::CannotRemoveRoot)?;
        let group = self
            .group_at_mut(&parent)
            .map_err(|_| EditError::PathNotFound { path: path.clone() })?;
        if idx >= group.children.len() {
            return Err(EditError::PathNotFound { path: path.clone() });
        }
        let node = group.children.remove(idx);
        tracing::trace!(%path, "removed node");
        Ok(node)
    }

    /// Move the node at `from` into the group at `to_parent`.
    ///
    /// Both paths are interpreted against the tree before the move.
    /// `position` is the index the node will occupy in the destination once
    /// it has been detached from its old place, so moving within one group
    /// uses the same indices as the final order.
    ///
    /// # Errors
    ///
    /// [`EditError::CannotRemoveRoot`] when moving the root,
    /// [`EditError::NotAGroup`] when `to_parent` names a rule,
    /// [`EditError::MoveIntoSelf`] when the destination lies inside the moved
    /// subtree, plus the errors of [`remove`](Self::remove) and
    /// [`insert`](Self::insert).
    pub fn move_node(
        &mut self,
        from: &NodePath,
        to_parent: &NodePath,
        position: usize,
    ) -> Result<(), EditError> {
        let (from_parent, from_idx) = split(from).ok_or(EditError::CannotRemoveRoot)?;
        let mut len = self.group_at(to_parent)?.children.len();
        if from == to_parent || from.is_ancestor_of(to_parent) {
            return Err(EditError::MoveIntoSelf {
                from: from.clone(),
                to: to_parent.clone(),
            });
        }
        if self.node(from).is_none() {
            return Err(EditError::PathNotFound { path: from.clone() });
        }
        if *to_parent == from_parent {
            len -= 1;
        }
        if position > len {
            return Err(EditError::PositionOutOfBounds {
                path: to_parent.clone(),
                position,
                len,
            });
        }

        // Detaching `from` shifts later siblings left, including any that
        // lie on the destination path.
        let mut target = to_parent.clone();
        let depth = from_parent.len();
        if target.len() > depth
            && target.indices()[..depth] == *from_parent.indices()
            && target.indices()[depth] > from_idx
        {
            target.indices_mut()[depth] -= 1;
        }

        let node = self.remove(from)?;
        self.group_at_mut(&target)?.children.insert(position, node);
        tracing::trace!(%from, to = %target, position, "moved node");
        Ok(())
    }

    /// Change the operator of the group at `path` (the root included),
    /// returning the previous one.
    ///
    /// # Errors
    ///
    /// [`EditError::PathNotFound`] / [`EditError::NotAGroup`].
    pub fn set_operator(
        &mut self,
        path: &NodePath,
        operator: impl Into<String>,
    ) -> Result<String, EditError> {
        let group = self.group_at_mut(path)?;
        let old = mem::replace(&mut group.operator_identifier, operator.into());
        tracing::trace!(%path, from = %old, to = %group.operator_identifier, "changed operator");
        Ok(old)
    }

    /// Replace the operand of the rule at `path`, returning the previous one.
    ///
    /// # Errors
    ///
    /// [`EditError::PathNotFound`] if nothing lives at `path`,
    /// [`EditError::NotARule`] if it names a group.
    pub fn set_rule_value(&mut self, path: &NodePath, value: V) -> Result<V, EditError> {
        let Some((parent, idx)) = split(path) else {
            return Err(EditError::NotARule { path: path.clone() });
        };
        let group = self
            .group_at_mut(&parent)
            .map_err(|_| EditError::PathNotFound { path: path.clone() })?;
        match group.children.get_mut(idx) {
            Some(Node::Rule(rule)) => {
                tracing::trace!(%path, "changed rule value");
                Ok(mem::replace(&mut rule.value, value))
            }
            Some(Node::RuleSet(_)) => Err(EditError::NotARule { path: path.clone() }),
            None => Err(EditError::PathNotFound { path: path.clone() }),
        }
    }

    fn push_child(&mut self, parent: &NodePath, node: Node<V>) -> Result<NodePath, EditError> {
        let group = self.group_at_mut(parent)?;
        group.children.push(node);
        let path = parent.child(group.children.len() - 1);
        tracing::trace!(%path, "appended node");
        Ok(path)
    }

    fn group_at(&self, path: &NodePath) -> Result<&RuleSet<V>, EditError> {
        let mut current = self;
        for (depth, &idx) in path.indices().iter().enumerate() {
            match current.children.get(idx) {
                Some(Node::RuleSet(group)) => current = group,
                Some(Node::Rule(_)) if depth + 1 == path.len() => {
                    return Err(EditError::NotAGroup { path: path.clone() });
                }
                _ => return Err(EditError::PathNotFound { path: path.clone() }),
            }
        }
        Ok(current)
    }

    fn group_at_mut(&mut self, path: &NodePath) -> Result<&mut RuleSet<V>, EditError> {
        let mut current = self;
        for (depth, &idx) in path.indices().iter().enumerate() {
            match current.children.get_mut(idx) {
                Some(Node::RuleSet(group)) => current = group,
                Some(Node::Rule(_)) if depth + 1 == path.len() => {
                    return Err(EditError::NotAGroup { path: path.clone() });
                }
                _ => return Err(EditError::PathNotFound { path: path.clone() }),
            }
        }
        Ok(current)
    }
}

fn split(path: &NodePath) -> Option<(NodePath, usize)> {
    Some((path.parent()?, path.last()?))
}
