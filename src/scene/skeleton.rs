use glam::{Affine3A, Quat, Vec3};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::errors::{GeckoError, Result};
use crate::scene::JointHandle;
use crate::scene::node::Node;
use crate::scene::transform::Transform;
use crate::scene::writer::JointWriter;

/// World-space position and rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    #[must_use]
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    #[inline]
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    #[inline]
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Keyed joint table.
///
/// # Data layout
///
/// Joints live in a `SlotMap` and are addressed by [`JointHandle`]; a name
/// index allows resolving handles once at activation. World transforms are
/// not cached: every world query walks the parent chain, so a write to a
/// parent is immediately visible on its children within the same frame
/// (the IK solver relies on this).
///
/// Reads through a stale handle return the identity transform; writes
/// through a stale handle are ignored. Outside this crate every write goes
/// through a [`JointWriter`] obtained from [`Skeleton::writer`].
#[derive(Debug, Clone, Default)]
pub struct Skeleton {
    joints: SlotMap<JointHandle, Node>,
    names: FxHashMap<String, JointHandle>,
    roots: Vec<JointHandle>,
}

impl Skeleton {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Construction & lookup
    // ========================================================================

    /// Adds a joint under `parent` with the given local transform.
    pub fn add_joint(
        &mut self,
        name: &str,
        parent: Option<JointHandle>,
        local: Transform,
    ) -> Result<JointHandle> {
        if self.names.contains_key(name) {
            return Err(GeckoError::DuplicateJoint(name.to_string()));
        }
        if let Some(parent) = parent
            && !self.joints.contains_key(parent)
        {
            return Err(GeckoError::InvalidJoint {
                context: format!("parent of '{name}'"),
            });
        }

        let mut node = Node::new(name);
        node.parent = parent;
        node.transform = local;
        let handle = self.joints.insert(node);

        match parent {
            Some(parent) => self.joints[parent].children.push(handle),
            None => self.roots.push(handle),
        }
        self.names.insert(name.to_string(), handle);
        Ok(handle)
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<JointHandle> {
        self.names.get(name).copied()
    }

    /// Like [`find`](Self::find) but reports a configuration error.
    pub fn require(&self, name: &str) -> Result<JointHandle> {
        self.find(name)
            .ok_or_else(|| GeckoError::MissingJoint(name.to_string()))
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, handle: JointHandle) -> bool {
        self.joints.contains_key(handle)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, handle: JointHandle) -> Option<&Node> {
        self.joints.get(handle)
    }

    #[must_use]
    pub fn name(&self, handle: JointHandle) -> Option<&str> {
        self.joints.get(handle).map(Node::name)
    }

    #[must_use]
    pub fn roots(&self) -> &[JointHandle] {
        &self.roots
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Ownership-scoped mutable view; see [`JointWriter`].
    ///
    /// The owned handles are copied, so `owned` may borrow from the layer
    /// that is about to receive the writer.
    pub fn writer(&mut self, owned: &[JointHandle]) -> JointWriter<'_> {
        JointWriter::new(self, owned)
    }

    // ========================================================================
    // Local space
    // ========================================================================

    #[must_use]
    pub fn local_transform(&self, handle: JointHandle) -> Transform {
        self.joints
            .get(handle)
            .map_or_else(Transform::new, |n| n.transform)
    }

    #[must_use]
    pub fn local_position(&self, handle: JointHandle) -> Vec3 {
        self.local_transform(handle).position
    }

    #[must_use]
    pub fn local_rotation(&self, handle: JointHandle) -> Quat {
        self.local_transform(handle).rotation
    }

    /// Local rotation as an Euler triple in degrees, each in `[0, 360)`.
    #[must_use]
    pub fn local_euler(&self, handle: JointHandle) -> Vec3 {
        self.local_transform(handle).rotation_euler()
    }

    pub(crate) fn set_local_position(&mut self, handle: JointHandle, position: Vec3) {
        if let Some(node) = self.joints.get_mut(handle) {
            node.transform.position = position;
        }
    }

    pub(crate) fn set_local_rotation(&mut self, handle: JointHandle, rotation: Quat) {
        if let Some(node) = self.joints.get_mut(handle) {
            node.transform.rotation = rotation;
        }
    }

    pub(crate) fn set_local_euler(&mut self, handle: JointHandle, euler: Vec3) {
        if let Some(node) = self.joints.get_mut(handle) {
            node.transform.set_rotation_euler(euler);
        }
    }

    // ========================================================================
    // World space
    // ========================================================================

    /// Walks from `handle` to its root, collecting the chain root-first.
    fn chain(&self, handle: JointHandle) -> Vec<JointHandle> {
        let mut chain = Vec::with_capacity(8);
        let mut cursor = Some(handle);
        while let Some(h) = cursor {
            let Some(node) = self.joints.get(h) else {
                break;
            };
            chain.push(h);
            cursor = node.parent;
        }
        chain.reverse();
        chain
    }

    /// World matrix of the joint (identity for a stale handle).
    #[must_use]
    pub fn world_matrix(&self, handle: JointHandle) -> Affine3A {
        self.chain(handle)
            .into_iter()
            .fold(Affine3A::IDENTITY, |acc, h| {
                acc * self.joints[h].transform.local_matrix()
            })
    }

    #[must_use]
    pub fn world_position(&self, handle: JointHandle) -> Vec3 {
        self.world_matrix(handle).translation.into()
    }

    #[must_use]
    pub fn world_rotation(&self, handle: JointHandle) -> Quat {
        self.chain(handle)
            .into_iter()
            .fold(Quat::IDENTITY, |acc, h| acc * self.joints[h].transform.rotation)
            .normalize()
    }

    #[must_use]
    pub fn world_pose(&self, handle: JointHandle) -> Pose {
        Pose::new(self.world_position(handle), self.world_rotation(handle))
    }

    fn parent_matrix(&self, handle: JointHandle) -> Affine3A {
        self.joints
            .get(handle)
            .and_then(|n| n.parent)
            .map_or(Affine3A::IDENTITY, |p| self.world_matrix(p))
    }

    fn parent_rotation(&self, handle: JointHandle) -> Quat {
        self.joints
            .get(handle)
            .and_then(|n| n.parent)
            .map_or(Quat::IDENTITY, |p| self.world_rotation(p))
    }

    pub(crate) fn set_world_position(&mut self, handle: JointHandle, position: Vec3) {
        let local = self.parent_matrix(handle).inverse().transform_point3(position);
        self.set_local_position(handle, local);
    }

    pub(crate) fn set_world_rotation(&mut self, handle: JointHandle, rotation: Quat) {
        let local = self.parent_rotation(handle).inverse() * rotation;
        self.set_local_rotation(handle, local.normalize());
    }
}
