//! Mobile Builder
//!
//! Nodes live in an arena and refer to their parent by index. Every
//! overridable setting is an `Option`; unset settings are resolved at build
//! time by walking up the parent chain, so a child picks up whatever its
//! ancestors hold when `build` runs.
//!
//! While inheriting, the radius halves and the arm direction flips at every
//! level.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec3;
use kinetic_core::{Mesh, WireMesh};
use kinetic_renderer::Material;

use crate::mobile::Mobile;
use crate::tracker::{AnimationTracker, Direction, Speed};
use crate::{BuildError, BuildResult};

static NEXT_BUILDER: AtomicU64 = AtomicU64::new(0);

/// Handle to a node inside a [`MobileBuilder`]
///
/// Ids carry the builder they came from and are only valid there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    builder: u64,
    index: usize,
}

impl NodeId {
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

/// Which arm a child hangs from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

impl FromStr for Side {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Side::Left),
            "right" => Ok(Side::Right),
            other => Err(BuildError::InvalidSide(other.to_string())),
        }
    }
}

/// Per-node settings; `None` defers to the parent
#[derive(Debug, Clone, Default)]
struct Overrides {
    radius: Option<f32>,
    parent_height: Option<f32>,
    child_height: Option<f32>,
    ambient: Option<Vec3>,
    diffuse: Option<Vec3>,
    specular: Option<Vec3>,
    shininess: Option<f32>,
    spin_speed: Option<Speed>,
    arm_speed: Option<Speed>,
    spin_direction: Option<Direction>,
    arm_direction: Option<Direction>,
}

#[derive(Debug, Clone)]
struct BuilderNode {
    mesh: Mesh,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
    hang_point: Option<Vec3>,
    fields: Overrides,
}

impl BuilderNode {
    fn new(mesh: Mesh, parent: Option<NodeId>) -> Self {
        Self {
            mesh,
            parent,
            left: None,
            right: None,
            hang_point: None,
            fields: Overrides::default(),
        }
    }

    fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Builder for a [`Mobile`] tree
#[derive(Debug, Clone)]
pub struct MobileBuilder {
    tag: u64,
    nodes: Vec<BuilderNode>,
}

impl MobileBuilder {
    /// Create a builder whose root displays `mesh`
    pub fn new(mesh: Mesh) -> Self {
        Self {
            tag: NEXT_BUILDER.fetch_add(1, Ordering::Relaxed),
            nodes: vec![BuilderNode::new(mesh, None)],
        }
    }

    /// The root node
    pub fn root(&mut self) -> NodeMut<'_> {
        let id = self.node_id(0);
        NodeMut { builder: self, id }
    }

    /// Any node by id; ids handed out by another builder are rejected
    pub fn at(&mut self, id: NodeId) -> BuildResult<NodeMut<'_>> {
        if id.builder != self.tag || id.index >= self.nodes.len() {
            return Err(BuildError::UnknownNode(id));
        }
        Ok(NodeMut { builder: self, id })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Build the tree hanging from the origin (or the root's hang point)
    pub fn build(self) -> BuildResult<Mobile> {
        self.build_at(0.0)
    }

    /// Build the tree with the root's hang point lowered or raised to `translate_y`
    pub fn build_at(self, translate_y: f32) -> BuildResult<Mobile> {
        let root = self.node_id(0);
        let hang = self.node(root).hang_point.unwrap_or(Vec3::ZERO);

        let mut mobile = self.build_node(root, translate_y + hang.y)?;
        mobile.origin = Vec3::new(hang.x, 0.0, hang.z);

        log::debug!(
            "built mobile with {} nodes, depth {}",
            mobile.node_count(),
            mobile.depth()
        );
        Ok(mobile)
    }

    fn node_id(&self, index: usize) -> NodeId {
        NodeId {
            builder: self.tag,
            index,
        }
    }

    fn node(&self, id: NodeId) -> &BuilderNode {
        &self.nodes[id.index]
    }

    fn add_child(&mut self, parent: NodeId, side: Side, mesh: Mesh) -> BuildResult<NodeId> {
        if self.node(parent).child(side).is_some() {
            return Err(BuildError::SideOccupied { node: parent, side });
        }

        let id = self.node_id(self.nodes.len());
        self.nodes.push(BuilderNode::new(mesh, Some(parent)));
        let parent = &mut self.nodes[parent.index];
        match side {
            Side::Left => parent.left = Some(id),
            Side::Right => parent.right = Some(id),
        }
        Ok(id)
    }

    /// First value set on `id` or its ancestors, with `inherit` applied once
    /// per level climbed
    fn resolve<T: Clone>(
        &self,
        id: NodeId,
        field: impl Fn(&Overrides) -> Option<&T>,
        inherit: impl Fn(T) -> T,
    ) -> Option<T> {
        let mut current = Some(id);
        let mut levels = 0;
        while let Some(node_id) = current {
            let node = self.node(node_id);
            if let Some(value) = field(&node.fields) {
                let mut value = value.clone();
                for _ in 0..levels {
                    value = inherit(value);
                }
                return Some(value);
            }
            current = node.parent;
            levels += 1;
        }
        None
    }

    fn inherited<T: Clone>(&self, id: NodeId, field: impl Fn(&Overrides) -> Option<&T>) -> Option<T> {
        self.resolve(id, field, |value| value)
    }

    /// Arms alternate direction per level, starting forward at the root
    fn arm_direction(&self, id: NodeId) -> Direction {
        let node = self.node(id);
        match (node.fields.arm_direction, node.parent) {
            (Some(direction), _) => direction,
            (None, Some(parent)) => self.arm_direction(parent).reversed(),
            (None, None) => Direction::Forward,
        }
    }

    fn build_node(&self, id: NodeId, translate_y: f32) -> BuildResult<Mobile> {
        let node = self.node(id);
        let has_children = node.left.is_some() || node.right.is_some();
        let has_both = node.left.is_some() && node.right.is_some();
        let missing = |field: &'static str| BuildError::Incomplete { node: id, field };

        let radius = self.resolve(id, |f| f.radius.as_ref(), |r| r / 2.0);
        let radius = match radius {
            Some(r) => r,
            None if has_both => return Err(missing("radius")),
            None => 0.0,
        };
        let parent_height = self
            .inherited(id, |f| f.parent_height.as_ref())
            .ok_or_else(|| missing("parent height"))?;
        let child_height = self.inherited(id, |f| f.child_height.as_ref());
        if has_children && child_height.is_none() {
            return Err(missing("child height"));
        }
        let spin_speed = self
            .inherited(id, |f| f.spin_speed.as_ref())
            .ok_or_else(|| missing("spin speed"))?;
        let arm_speed = self
            .inherited(id, |f| f.arm_speed.as_ref())
            .ok_or_else(|| missing("arm speed"))?;
        let material = self.resolve_material(id)?;

        if has_both && radius == 0.0 {
            return Err(BuildError::CoincidentChildren(id));
        }

        let spin_direction = self
            .inherited(id, |f| f.spin_direction.as_ref())
            .unwrap_or_default();
        let arm_direction = self.arm_direction(id);

        let mesh_height = node.mesh.height();
        let full_parent = parent_height + mesh_height / 2.0;
        let full_child = child_height.unwrap_or(0.0) + mesh_height / 2.0;

        let anchor_y = translate_y - full_parent;
        let attach_y = anchor_y - full_child;
        let mesh = node.mesh.translated(0.0, anchor_y, 0.0);

        let mut points = vec![Vec3::new(0.0, translate_y, 0.0), Vec3::new(0.0, anchor_y, 0.0)];
        let mut segments = vec![[0, 1]];
        if has_children {
            points.extend([
                Vec3::new(0.0, attach_y, 0.0),
                Vec3::new(-radius, attach_y, 0.0),
                Vec3::new(radius, attach_y, 0.0),
            ]);
            segments.push([1, 2]);
            if node.left.is_some() {
                segments.push([2, 3]);
            }
            if node.right.is_some() {
                segments.push([2, 4]);
            }
        }

        let left = node
            .left
            .map(|child| self.build_node(child, attach_y).map(Box::new))
            .transpose()?;
        let right = node
            .right
            .map(|child| self.build_node(child, attach_y).map(Box::new))
            .transpose()?;

        Ok(Mobile {
            mesh,
            material,
            arms: WireMesh::new(points, segments),
            radius,
            parent_height,
            child_height,
            left,
            right,
            rotation: AnimationTracker::new(spin_speed).with_direction(spin_direction),
            arm_rotation: AnimationTracker::new(arm_speed).with_direction(arm_direction),
            origin: Vec3::ZERO,
        })
    }

    /// Materials are only required for nodes that draw something
    fn resolve_material(&self, id: NodeId) -> BuildResult<Material> {
        if !self.node(id).mesh.has_faces() {
            return Ok(Material::default());
        }

        let missing = |field: &'static str| BuildError::Incomplete { node: id, field };
        Ok(Material {
            ambient: self
                .inherited(id, |f| f.ambient.as_ref())
                .ok_or_else(|| missing("ambient"))?,
            diffuse: self
                .inherited(id, |f| f.diffuse.as_ref())
                .ok_or_else(|| missing("diffuse"))?,
            specular: self
                .inherited(id, |f| f.specular.as_ref())
                .ok_or_else(|| missing("specular"))?,
            shininess: self
                .inherited(id, |f| f.shininess.as_ref())
                .ok_or_else(|| missing("shininess"))?,
        })
    }
}

/// Fluent access to one builder node
pub struct NodeMut<'a> {
    builder: &'a mut MobileBuilder,
    id: NodeId,
}

impl<'a> NodeMut<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    fn fields(&mut self) -> &mut Overrides {
        &mut self.builder.nodes[self.id.index].fields
    }

    /// Set ambient, diffuse and specular to one color
    pub fn color(mut self, color: Vec3) -> Self {
        let fields = self.fields();
        fields.ambient = Some(color);
        fields.diffuse = Some(color);
        fields.specular = Some(color);
        self
    }

    pub fn material(mut self, material: Material) -> Self {
        let fields = self.fields();
        fields.ambient = Some(material.ambient);
        fields.diffuse = Some(material.diffuse);
        fields.specular = Some(material.specular);
        fields.shininess = Some(material.shininess);
        self
    }

    pub fn ambient(mut self, ambient: Vec3) -> Self {
        self.fields().ambient = Some(ambient);
        self
    }

    pub fn diffuse(mut self, diffuse: Vec3) -> Self {
        self.fields().diffuse = Some(diffuse);
        self
    }

    pub fn specular(mut self, specular: Vec3) -> Self {
        self.fields().specular = Some(specular);
        self
    }

    pub fn shininess(mut self, shininess: f32) -> Self {
        self.fields().shininess = Some(shininess);
        self
    }

    /// Half the distance between this node's children
    pub fn radius(mut self, radius: f32) -> Self {
        self.fields().radius = Some(radius);
        self
    }

    /// Length of the arm above the mesh
    pub fn parent_height(mut self, height: f32) -> Self {
        self.fields().parent_height = Some(height);
        self
    }

    /// Length of the arm below the mesh
    pub fn child_height(mut self, height: f32) -> Self {
        self.fields().child_height = Some(height);
        self
    }

    /// Mesh spin in degrees per millisecond
    pub fn spin_speed(mut self, speed: f64) -> Self {
        self.fields().spin_speed = Some(Speed::constant(speed));
        self
    }

    pub fn spin_speed_fn(mut self, speed: impl Fn() -> f64 + Send + Sync + 'static) -> Self {
        self.fields().spin_speed = Some(Speed::from_fn(speed));
        self
    }

    /// Arm spin in degrees per millisecond
    pub fn arm_speed(mut self, speed: f64) -> Self {
        self.fields().arm_speed = Some(Speed::constant(speed));
        self
    }

    pub fn arm_speed_fn(mut self, speed: impl Fn() -> f64 + Send + Sync + 'static) -> Self {
        self.fields().arm_speed = Some(Speed::from_fn(speed));
        self
    }

    pub fn spin_direction(mut self, direction: Direction) -> Self {
        self.fields().spin_direction = Some(direction);
        self
    }

    pub fn arm_direction(mut self, direction: Direction) -> Self {
        self.fields().arm_direction = Some(direction);
        self
    }

    /// Hang the whole mobile from `point`; only valid on the root
    pub fn hanging_from(mut self, point: Vec3) -> BuildResult<Self> {
        if self.builder.nodes[self.id.index].parent.is_some() {
            return Err(BuildError::NotRoot(self.id));
        }
        self.builder.nodes[self.id.index].hang_point = Some(point);
        Ok(self)
    }

    /// Hang a new child from the given arm and move to it
    pub fn child(mut self, side: Side, mesh: Mesh) -> BuildResult<NodeMut<'a>> {
        let id = self.builder.add_child(self.id, side, mesh)?;
        Ok(NodeMut {
            builder: self.builder,
            id,
        })
    }

    pub fn left(self, mesh: Mesh) -> BuildResult<NodeMut<'a>> {
        self.child(Side::Left, mesh)
    }

    pub fn right(self, mesh: Mesh) -> BuildResult<NodeMut<'a>> {
        self.child(Side::Right, mesh)
    }

    /// Invisible hinge on the left arm, for branching without a shape
    pub fn empty_left(self) -> BuildResult<NodeMut<'a>> {
        self.empty_child(Side::Left)
    }

    /// Invisible hinge on the right arm, for branching without a shape
    pub fn empty_right(self) -> BuildResult<NodeMut<'a>> {
        self.empty_child(Side::Right)
    }

    fn empty_child(self, side: Side) -> BuildResult<NodeMut<'a>> {
        Ok(self
            .child(side, Mesh::empty())?
            .parent_height(0.0)
            .spin_speed(0.0))
    }
}
