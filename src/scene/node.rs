use crate::scene::JointHandle;
use crate::scene::transform::Transform;

/// A single joint of the skeleton.
///
/// # Hierarchy
///
/// Joints form a tree through parent-child relationships:
/// - `parent`: Optional handle to parent joint (None for root joints)
/// - `children`: List of child joint handles
///
/// The hierarchy is fixed once the skeleton is built; only transforms change
/// from frame to frame.
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent joint handle (None for root joints)
    pub(crate) parent: Option<JointHandle>,
    /// Child joint handles
    pub(crate) children: Vec<JointHandle>,
    /// Name the joint was registered under
    pub(crate) name: String,

    /// Local transform relative to the parent
    pub transform: Transform,
}

impl Node {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            name: name.to_string(),
            transform: Transform::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<JointHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[JointHandle] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
